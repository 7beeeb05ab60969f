// src/github/mod.rs
// =============================================================================
// This module handles everything that talks to GitHub.
//
// Currently implements:
// - Parsing GitHub URLs to extract owner/repo (repo_url.rs)
// - The JSON shapes of the API responses we read (types.rs)
// - Fetching metadata, the file tree and the README (fetch.rs)
// - Remembering finished summaries (cache.rs)
//
// Private repositories are out of scope: requests are unauthenticated.
// =============================================================================

mod cache;
mod fetch;
mod repo_url;
mod types;

pub use fetch::{RepoFetcher, RepoSummary};
#[cfg(test)]
pub use fetch::{README_NOT_FOUND, TREE_UNAVAILABLE};
pub use repo_url::RepoUrl;
