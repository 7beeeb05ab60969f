// src/github/repo_url.rs
// =============================================================================
// Recognises GitHub repository URLs typed into an inline query.
//
// Accepted:
//   https://github.com/owner/repo
//   http://github.com/owner/repo.git
//   https://github.com/owner/repo/tree/main/src   (extra segments ignored)
//   https://github.com/owner/repo?tab=readme-ov-file  (query and fragment
//   https://github.com/owner/repo#readme               are dropped)
//
// Rejected:
//   github.com/owner/repo                         (no scheme)
//   https://www.github.com/owner/repo             (different prefix)
//   https://github.com/owner                      (no repository)
//
// The check is a plain prefix match followed by a split on '/', so
// "https://github.com/owner/repo" splits into exactly five segments:
//   ["https:", "", "github.com", "owner", "repo"]
// =============================================================================

const ACCEPTED_PREFIXES: [&str; 2] = ["http://github.com/", "https://github.com/"];
const MIN_SEGMENTS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoUrl {
    pub owner: String,
    pub repo: String,
}

impl RepoUrl {
    // Returns None for anything that is not a GitHub repository URL
    //
    // Both owner and repo are guaranteed non-empty on success
    pub fn parse(input: &str) -> Option<Self> {
        if !ACCEPTED_PREFIXES
            .iter()
            .any(|prefix| input.starts_with(prefix))
        {
            return None;
        }

        // GitHub itself hands out links like ".../repo?tab=readme-ov-file"
        let path = input.split(['?', '#']).next().unwrap_or(input);

        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        if segments.len() < MIN_SEGMENTS {
            return None;
        }

        let owner = segments[3];
        let repo = segments[4];
        let repo = repo.strip_suffix(".git").unwrap_or(repo);

        if owner.is_empty() || repo.is_empty() {
            return None;
        }

        Some(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    pub fn html_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.repo)
    }
}
