// src/github/fetch.rs
// =============================================================================
// This module fetches everything we show about a repository.
//
// Strategy:
// 1. Metadata: GET /repos/{owner}/{repo}
//    Gives us stars, language, ... and the default branch. If this fails the
//    whole summary fails; there is nothing useful to show without it.
// 2. File tree: GET /repos/{owner}/{repo}/git/trees/{branch}?recursive=1
// 3. README:    GET {raw}/{owner}/{repo}/{branch}/README.md
//
// Steps 2 and 3 only need the branch name, so they run concurrently once
// step 1 is done. Either of them may fail on its own; the summary then
// carries a placeholder for that section instead of failing.
//
// Finished summaries are remembered in a `SummaryCache`, keyed by the query
// text, so the same URL typed again is answered without any request.
// =============================================================================

use std::sync::Arc;

use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};
use url::Url;

use crate::config::{Config, FILE_LIMIT, README_CHAR_LIMIT, USER_AGENT};
use crate::error::FetchError;
use crate::github::cache::SummaryCache;
use crate::github::types::{RepoMetadata, TreeResponse};
use crate::github::RepoUrl;
use crate::render::{format_info_block, render_tree, sanitize_readme, truncate_text};

pub const TREE_UNAVAILABLE: &str = "Failed to fetch file structure";
pub const README_NOT_FOUND: &str = "README.md not found";

const GITHUB_JSON: &str = "application/vnd.github+json";

// The three formatted sections of a repository preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSummary {
    /// HTML metadata header
    pub info_block: String,
    /// Plain-text file tree, or TREE_UNAVAILABLE
    pub tree_text: String,
    /// Sanitized README excerpt, or README_NOT_FOUND
    pub readme_text: String,
}

#[derive(Clone)]
pub struct RepoFetcher {
    client: Client,
    api_base: Url,
    raw_base: Url,
    cache: SummaryCache,
}

impl RepoFetcher {
    // Builds the fetcher with its own HTTP client
    //
    // The client carries the request timeout and the User-Agent header that
    // the GitHub API insists on
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            api_base: config.github_api_url.clone(),
            raw_base: config.github_raw_url.clone(),
            cache: SummaryCache::new(config.cache_capacity),
        })
    }

    // Returns the summary for `url`, from the cache when possible
    //
    // `key` is the query text the user typed; two spellings of the same
    // repository are cached separately
    pub async fn fetch(&self, key: &str, url: &RepoUrl) -> Result<Arc<RepoSummary>, FetchError> {
        if let Some(summary) = self.cache.get(key).await {
            debug!(key, "summary cache hit");
            return Ok(summary);
        }
        debug!(key, "summary cache miss");

        let summary = Arc::new(self.fetch_uncached(url).await?);
        self.cache.put(key.to_string(), Arc::clone(&summary)).await;
        Ok(summary)
    }

    async fn fetch_uncached(&self, url: &RepoUrl) -> Result<RepoSummary, FetchError> {
        let metadata = self.fetch_metadata(url).await?;
        let branch = metadata.default_branch();

        let (tree_text, readme_text) =
            futures::join!(self.fetch_tree(url, branch), self.fetch_readme(url, branch));

        Ok(RepoSummary {
            info_block: format_info_block(&metadata.to_info(url)),
            tree_text,
            readme_text,
        })
    }

    async fn fetch_metadata(&self, url: &RepoUrl) -> Result<RepoMetadata, FetchError> {
        let endpoint = build_endpoint(
            &self.api_base,
            ["repos", url.owner.as_str(), url.repo.as_str()],
        )?;

        let response = self
            .client
            .get(endpoint)
            .header(ACCEPT, GITHUB_JSON)
            .send()
            .await?;

        let status = response.status();
        debug!(repo = %url.html_url(), status = status.as_u16(), "metadata response");

        if !status.is_success() {
            return Err(not_found(url, format!("HTTP {}", status.as_u16())));
        }

        let metadata: RepoMetadata = response.json().await?;

        // GitHub sometimes reports errors in a 2xx body
        if let Some(message) = &metadata.message {
            return Err(not_found(url, message.clone()));
        }

        Ok(metadata)
    }

    // Always yields text: the rendered tree or TREE_UNAVAILABLE
    async fn fetch_tree(&self, url: &RepoUrl, branch: &str) -> String {
        match self.try_fetch_tree(url, branch).await {
            Ok(tree) => {
                if tree.truncated {
                    debug!(repo = %url.html_url(), "GitHub truncated the tree listing");
                }
                format_tree(&tree.file_paths())
            }
            Err(err) => {
                warn!(repo = %url.html_url(), branch, error = %err, "file tree unavailable");
                TREE_UNAVAILABLE.to_string()
            }
        }
    }

    async fn try_fetch_tree(&self, url: &RepoUrl, branch: &str) -> Result<TreeResponse, FetchError> {
        let mut endpoint = build_endpoint(
            &self.api_base,
            ["repos", url.owner.as_str(), url.repo.as_str(), "git", "trees"]
                .into_iter()
                .chain(branch.split('/')),
        )?;
        endpoint.query_pairs_mut().append_pair("recursive", "1");

        let tree = self
            .client
            .get(endpoint)
            .header(ACCEPT, GITHUB_JSON)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(tree)
    }

    // Always yields text: the cleaned excerpt or README_NOT_FOUND
    async fn fetch_readme(&self, url: &RepoUrl, branch: &str) -> String {
        match self.try_fetch_readme(url, branch).await {
            Ok(Some(raw)) => truncate_text(&sanitize_readme(&raw), README_CHAR_LIMIT),
            Ok(None) => README_NOT_FOUND.to_string(),
            Err(err) => {
                warn!(repo = %url.html_url(), branch, error = %err, "README unavailable");
                README_NOT_FOUND.to_string()
            }
        }
    }

    // Ok(None) means the server answered, but not with 200
    async fn try_fetch_readme(
        &self,
        url: &RepoUrl,
        branch: &str,
    ) -> Result<Option<String>, FetchError> {
        let endpoint = build_endpoint(
            &self.raw_base,
            [url.owner.as_str(), url.repo.as_str()]
                .into_iter()
                .chain(branch.split('/'))
                .chain(["README.md"]),
        )?;

        let response = self.client.get(endpoint).send().await?;
        let status = response.status();
        debug!(repo = %url.html_url(), status = status.as_u16(), "README response");

        if status != StatusCode::OK {
            return Ok(None);
        }
        Ok(Some(response.text().await?))
    }
}

// Appends path segments to a base URL, percent-encoding each one
//
// Branch names may contain '/', so callers split them into segments first
fn build_endpoint<'a>(
    base: &Url,
    segments: impl IntoIterator<Item = &'a str>,
) -> Result<Url, FetchError> {
    let mut endpoint = base.clone();
    endpoint
        .path_segments_mut()
        .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .extend(segments);
    Ok(endpoint)
}

// Renders the first FILE_LIMIT files and notes how many were left out
fn format_tree(paths: &[&str]) -> String {
    let mut text = render_tree(paths, FILE_LIMIT);
    if paths.len() > FILE_LIMIT {
        text.push_str(&format!("\n...and {} more files", paths.len() - FILE_LIMIT));
    }
    text
}

fn not_found(url: &RepoUrl, reason: String) -> FetchError {
    FetchError::NotFound {
        owner: url.owner.clone(),
        repo: url.repo.clone(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const QUERY: &str = "https://github.com/octo/hello";

    fn repo_url() -> RepoUrl {
        RepoUrl::parse(QUERY).unwrap()
    }

    fn fetcher(server: &MockServer) -> RepoFetcher {
        RepoFetcher::new(&Config::for_mock_server(&server.uri())).unwrap()
    }

    async fn mount_metadata(server: &MockServer, status: u16, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/repos/octo/hello"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(server)
            .await;
    }

    async fn mount_tree(server: &MockServer, branch: &str, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(format!("/repos/octo/hello/git/trees/{}", branch)))
            .and(query_param("recursive", "1"))
            .respond_with(template)
            .mount(server)
            .await;
    }

    async fn mount_readme(server: &MockServer, branch: &str, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(format!("/raw/octo/hello/{}/README.md", branch)))
            .respond_with(template)
            .mount(server)
            .await;
    }

    fn tree_body(paths: &[&str]) -> serde_json::Value {
        let entries: Vec<_> = paths
            .iter()
            .map(|p| json!({"path": p, "type": "blob"}))
            .collect();
        json!({ "tree": entries, "truncated": false })
    }

    #[test]
    fn test_format_tree_reports_overflow() {
        let names: Vec<String> = (0..53).map(|i| format!("file{:02}.rs", i)).collect();
        let paths: Vec<&str> = names.iter().map(String::as_str).collect();

        let text = format_tree(&paths);
        assert!(text.ends_with("\n...and 3 more files"));
        // 50 files drawn, plus the overflow line
        assert_eq!(text.lines().count(), 51);
    }

    #[test]
    fn test_format_tree_exactly_at_limit() {
        let names: Vec<String> = (0..50).map(|i| format!("f{}", i)).collect();
        let paths: Vec<&str> = names.iter().map(String::as_str).collect();
        assert!(!format_tree(&paths).contains("more files"));
    }

    #[tokio::test]
    async fn test_full_summary() {
        let server = MockServer::start().await;
        mount_metadata(
            &server,
            200,
            json!({
                "description": "Greets",
                "stargazers_count": 5,
                "language": "Rust",
                "default_branch": "trunk",
                "forks_count": 1,
                "open_issues_count": 2
            }),
        )
        .await;
        mount_tree(
            &server,
            "trunk",
            ResponseTemplate::new(200).set_body_json(json!({
                "tree": [
                    {"path": "src", "type": "tree"},
                    {"path": "src/main.rs", "type": "blob"},
                    {"path": "Cargo.toml", "type": "blob"}
                ]
            })),
        )
        .await;
        mount_readme(
            &server,
            "trunk",
            ResponseTemplate::new(200).set_body_string("# Hello\n\n![logo](l.png)\n\n\nSay <hi>"),
        )
        .await;

        let summary = fetcher(&server).fetch(QUERY, &repo_url()).await.unwrap();

        assert!(summary.info_block.contains("<code>Greets</code>"));
        assert!(summary.info_block.contains("<code>5</code>"));
        assert_eq!(summary.tree_text, "├─ Cargo.toml\n└─ src\n   └─ main.rs");
        assert_eq!(summary.readme_text, "# Hello\n\nSay &lt;hi&gt;");
    }

    #[tokio::test]
    async fn test_requests_carry_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/hello"))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let result = fetcher(&server).fetch(QUERY, &repo_url()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_metadata_404_is_fatal() {
        let server = MockServer::start().await;
        mount_metadata(&server, 404, json!({"message": "Not Found"})).await;

        // These would succeed, but must never be reached
        Mock::given(method("GET"))
            .and(path("/repos/octo/hello/git/trees/main"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tree_body(&["a.rs"])))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/raw/octo/hello/main/README.md"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hi"))
            .expect(0)
            .mount(&server)
            .await;

        let err = fetcher(&server).fetch(QUERY, &repo_url()).await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::NotFound { ref reason, .. } if reason == "HTTP 404"
        ));
    }

    #[tokio::test]
    async fn test_error_envelope_is_fatal() {
        let server = MockServer::start().await;
        mount_metadata(
            &server,
            200,
            json!({"message": "API rate limit exceeded", "documentation_url": "x"}),
        )
        .await;

        let err = fetcher(&server).fetch(QUERY, &repo_url()).await.unwrap_err();
        assert!(err.to_string().contains("API rate limit exceeded"));
    }

    #[tokio::test]
    async fn test_malformed_metadata_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/hello"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = fetcher(&server).fetch(QUERY, &repo_url()).await.unwrap_err();
        assert!(matches!(err, FetchError::Http(_)));
    }

    #[tokio::test]
    async fn test_tree_500_uses_placeholder() {
        let server = MockServer::start().await;
        mount_metadata(&server, 200, json!({"description": "d"})).await;
        mount_tree(&server, "main", ResponseTemplate::new(500)).await;
        mount_readme(&server, "main", ResponseTemplate::new(200).set_body_string("Readme")).await;

        let summary = fetcher(&server).fetch(QUERY, &repo_url()).await.unwrap();

        assert_eq!(summary.tree_text, TREE_UNAVAILABLE);
        assert!(summary.info_block.contains("<code>d</code>"));
        assert_eq!(summary.readme_text, "Readme");
    }

    #[tokio::test]
    async fn test_readme_404_uses_placeholder() {
        let server = MockServer::start().await;
        mount_metadata(&server, 200, json!({})).await;
        mount_tree(
            &server,
            "main",
            ResponseTemplate::new(200).set_body_json(tree_body(&["lib.rs"])),
        )
        .await;
        mount_readme(&server, "main", ResponseTemplate::new(404)).await;

        let summary = fetcher(&server).fetch(QUERY, &repo_url()).await.unwrap();

        assert_eq!(summary.tree_text, "└─ lib.rs");
        assert_eq!(summary.readme_text, README_NOT_FOUND);
        assert!(summary.info_block.contains("no description"));
    }

    #[tokio::test]
    async fn test_long_readme_is_truncated() {
        let server = MockServer::start().await;
        mount_metadata(&server, 200, json!({})).await;
        mount_tree(&server, "main", ResponseTemplate::new(200).set_body_json(tree_body(&[]))).await;
        mount_readme(
            &server,
            "main",
            ResponseTemplate::new(200).set_body_string("word ".repeat(600)),
        )
        .await;

        let summary = fetcher(&server).fetch(QUERY, &repo_url()).await.unwrap();

        assert_eq!(summary.readme_text.chars().count(), README_CHAR_LIMIT);
        assert!(summary.readme_text.ends_with("..."));
        assert_eq!(summary.tree_text, "");
    }

    #[tokio::test]
    async fn test_tree_overflow_suffix() {
        let server = MockServer::start().await;
        let names: Vec<String> = (0..60).map(|i| format!("src/f{:02}.rs", i)).collect();
        let paths: Vec<&str> = names.iter().map(String::as_str).collect();

        mount_metadata(&server, 200, json!({})).await;
        mount_tree(&server, "main", ResponseTemplate::new(200).set_body_json(tree_body(&paths))).await;
        mount_readme(&server, "main", ResponseTemplate::new(404)).await;

        let summary = fetcher(&server).fetch(QUERY, &repo_url()).await.unwrap();

        assert!(summary.tree_text.ends_with("...and 10 more files"));
        assert!(summary.tree_text.contains("f49.rs"));
        assert!(!summary.tree_text.contains("f50.rs"));
    }

    #[tokio::test]
    async fn test_links_with_query_or_fragment_fetch_every_section() {
        for query in [
            "https://github.com/octo/hello?tab=readme-ov-file",
            "https://github.com/octo/hello#readme",
        ] {
            let server = MockServer::start().await;
            mount_metadata(&server, 200, json!({"description": "d"})).await;
            mount_tree(
                &server,
                "main",
                ResponseTemplate::new(200).set_body_json(tree_body(&["lib.rs"])),
            )
            .await;
            mount_readme(&server, "main", ResponseTemplate::new(200).set_body_string("Readme")).await;

            let url = RepoUrl::parse(query).unwrap();
            let summary = fetcher(&server).fetch(query, &url).await.unwrap();

            assert_eq!(summary.tree_text, "└─ lib.rs", "{}", query);
            assert_eq!(summary.readme_text, "Readme", "{}", query);
            assert!(summary.info_block.contains(">hello</a>"), "{}", query);
            assert!(!summary.info_block.contains("readme"), "{}", query);
        }
    }

    #[tokio::test]
    async fn test_branch_with_slash_keeps_its_segments() {
        let server = MockServer::start().await;
        mount_metadata(&server, 200, json!({"default_branch": "release/1.0"})).await;
        mount_tree(
            &server,
            "release/1.0",
            ResponseTemplate::new(200).set_body_json(tree_body(&["a.rs"])),
        )
        .await;
        mount_readme(&server, "release/1.0", ResponseTemplate::new(200).set_body_string("R")).await;

        let summary = fetcher(&server).fetch(QUERY, &repo_url()).await.unwrap();

        assert_eq!(summary.tree_text, "└─ a.rs");
        assert_eq!(summary.readme_text, "R");
    }

    #[test]
    fn test_endpoint_segments_are_percent_encoded() {
        let base = crate::cli::parse_base_url("http://127.0.0.1:9/raw").unwrap();
        let endpoint = build_endpoint(&base, ["octo", "a?b#c d", "README.md"]).unwrap();
        assert_eq!(
            endpoint.as_str(),
            "http://127.0.0.1:9/raw/octo/a%3Fb%23c%20d/README.md"
        );
    }

    #[tokio::test]
    async fn test_second_fetch_is_served_from_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/hello"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;
        mount_tree(&server, "main", ResponseTemplate::new(500)).await;
        mount_readme(&server, "main", ResponseTemplate::new(404)).await;

        let fetcher = fetcher(&server);
        let first = fetcher.fetch(QUERY, &repo_url()).await.unwrap();
        let second = fetcher.fetch(QUERY, &repo_url()).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/hello"))
            .respond_with(ResponseTemplate::new(404))
            .expect(2)
            .mount(&server)
            .await;

        let fetcher = fetcher(&server);
        assert!(fetcher.fetch(QUERY, &repo_url()).await.is_err());
        assert!(fetcher.fetch(QUERY, &repo_url()).await.is_err());
    }
}
