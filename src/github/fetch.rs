// src/github/fetch.rs
// =============================================================================
// This module fetches raw file contents from a hosted repository.
//
// Strategy:
// - Build a URL of the form <base>/<repo>/<branch>/<file>
// - GET it from a raw-content host (raw.githubusercontent.com by default)
// - Hand back the body as text
//
// The renderer never talks to reqwest directly. It only knows the
// FileFetcher trait, so tests can swap in a fake that never touches the
// network.
//
// Rust concepts:
// - Traits: An interface that several types can implement
// - async fn in traits: Async methods without boxing
// - thiserror: Deriving std::error::Error for our own error enum
// =============================================================================

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;

// Everything that can go wrong while fetching a file
//
// The renderer passes these through untouched, so the caller sees exactly
// what the fetcher reported.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level failure (DNS, TLS, timeout, connection reset...)
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The host answered, but not with 2xx
    #[error("failed to fetch {url}: HTTP {status}")]
    Status { url: String, status: StatusCode },

    /// The body could not be read as text
    #[error("failed to read body of {url}: {detail}")]
    Body { url: String, detail: String },
}

// The capability to fetch a file's raw content by URL
//
// Implementors decide timeouts, headers and transport. Callers only see
// "content or error".
pub trait FileFetcher {
    fn fetch_file(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

// Builds the URL of a file inside a repository
//
// Segments are joined verbatim. Nothing is percent-encoded, so a file name
// like "docs/intro.md" becomes two path segments on the host.
//
// Example:
//   file_url("https://raw.githubusercontent.com", "rust-lang/rust", "master", "README.md")
//   -> "https://raw.githubusercontent.com/rust-lang/rust/master/README.md"
pub fn file_url(base_url: &str, repo_name: &str, branch_name: &str, file_name: &str) -> String {
    format!("{}/{}/{}/{}", base_url, repo_name, branch_name, file_name)
}

// Fetches files over HTTP(S) with reqwest
//
// The Client is built once and reused for every fetch (connection pooling).
#[derive(Debug, Clone)]
pub struct HttpFileFetcher {
    client: Client,
}

impl HttpFileFetcher {
    // Creates a fetcher with a per-request timeout and User-Agent
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }
}

impl FileFetcher for HttpFileFetcher {
    async fn fetch_file(&self, url: &str) -> Result<String, FetchError> {
        debug!(url, "fetching file");

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            detail: e.to_string(),
        })
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a trait instead of calling reqwest directly?
//    - The renderer takes "anything that can fetch a file"
//    - Production code passes HttpFileFetcher
//    - Tests pass a fake that returns canned content
//
// 2. What is `impl Future<Output = ...> + Send`?
//    - It's what `async fn` desugars to
//    - Writing it out in the trait lets us promise the future is Send,
//      so it can run on tokio's multi-threaded runtime
//    - Implementors can still just write `async fn`
//
// 3. What does #[from] do?
//    - It generates `impl From<reqwest::Error> for FetchError`
//    - That's what lets `?` convert reqwest errors automatically
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_url() {
        let url = file_url("https://raw.githubusercontent.com", "foo", "main", "README.md");
        assert_eq!(url, "https://raw.githubusercontent.com/foo/main/README.md");
    }

    #[test]
    fn test_file_url_keeps_segments_verbatim() {
        let url = file_url("https://host", "owner/repo", "feature/x", "docs/a b?.rs");
        assert_eq!(url, "https://host/owner/repo/feature/x/docs/a b?.rs");
    }

    #[test]
    fn test_http_fetcher_builds() {
        let fetcher = HttpFileFetcher::new(Duration::from_secs(5), "wiki-source-view-test");
        assert!(fetcher.is_ok());
    }

    #[test]
    fn test_status_error_message() {
        let err = FetchError::Status {
            url: "https://host/foo/main/missing.rs".to_string(),
            status: StatusCode::NOT_FOUND,
        };
        assert_eq!(
            err.to_string(),
            "failed to fetch https://host/foo/main/missing.rs: HTTP 404 Not Found"
        );
    }
}
