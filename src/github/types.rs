// src/github/types.rs
// =============================================================================
// The parts of GitHub's JSON responses that we read.
//
// Every field is optional: GitHub omits or nulls fields freely (a repo
// without a detected language has `"language": null`), and a missing field
// must never fail the whole summary. Defaults are applied in
// `RepoMetadata::to_info()`.
// =============================================================================

use serde::Deserialize;

use crate::github::RepoUrl;
use crate::render::RepoInfo;

const NO_DESCRIPTION: &str = "no description";
const NO_LANGUAGE: &str = "not specified";
const FALLBACK_BRANCH: &str = "main";

// GET /repos/{owner}/{repo}
#[derive(Debug, Default, Deserialize)]
pub struct RepoMetadata {
    /// Present only in GitHub's error envelope ("Not Found", rate limit, ...)
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: Option<u64>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub forks_count: Option<u64>,
    #[serde(default)]
    pub open_issues_count: Option<u64>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl RepoMetadata {
    pub fn default_branch(&self) -> &str {
        non_empty(&self.default_branch).unwrap_or(FALLBACK_BRANCH)
    }

    pub fn to_info(&self, url: &RepoUrl) -> RepoInfo {
        RepoInfo {
            owner: url.owner.clone(),
            repo: url.repo.clone(),
            description: non_empty(&self.description)
                .unwrap_or(NO_DESCRIPTION)
                .to_string(),
            stars: self.stargazers_count.unwrap_or(0),
            language: non_empty(&self.language).unwrap_or(NO_LANGUAGE).to_string(),
            forks: self.forks_count.unwrap_or(0),
            open_issues: self.open_issues_count.unwrap_or(0),
            updated_at: non_empty(&self.updated_at).map(str::to_string),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

// GET /repos/{owner}/{repo}/git/trees/{branch}?recursive=1
#[derive(Debug, Default, Deserialize)]
pub struct TreeResponse {
    #[serde(default)]
    pub tree: Vec<TreeEntry>,
    /// Set by GitHub when the listing was cut short on its side
    #[serde(default)]
    pub truncated: bool,
}

#[derive(Debug, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    /// "blob" for files, "tree" for directories, "commit" for submodules
    #[serde(rename = "type")]
    pub kind: String,
}

impl TreeResponse {
    // Paths of files only, in the order GitHub listed them
    pub fn file_paths(&self) -> Vec<&str> {
        self.tree
            .iter()
            .filter(|entry| entry.kind == "blob")
            .map(|entry| entry.path.as_str())
            .collect()
    }
}
