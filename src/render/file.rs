// src/render/file.rs
// =============================================================================
// The file renderer: fetch one file, turn it into HTML.
//
// How it works:
// 1. Build <base>/<repo>/<branch>/<file>
// 2. Fetch it (errors go straight back to the caller)
// 3. .md / .markdown -> markdown HTML
// 4. Anything else -> ask the highlighter for a language by extension
//    - no language: hand back the raw text untouched
//    - language: highlighted HTML, or the highlighter's error as text
//
// Highlighting failures are returned as Ok(String) on purpose. The wiki
// page shows the message where the file would have been.
// =============================================================================

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::highlight::{HighlightError, HighlightOptions, Highlighter};
use super::markdown::markdown_to_html;
use crate::github::{file_url, FetchError, FileFetcher};

const MARKDOWN_EXTENSIONS: [&str; 2] = [".md", ".markdown"];

// One render request: which file, in which repo, on which branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderRequest {
    pub file_name: String,
    pub repo_name: String,
    pub branch_name: String,
}

impl RenderRequest {
    pub fn new(
        repo_name: impl Into<String>,
        branch_name: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            repo_name: repo_name.into(),
            branch_name: branch_name.into(),
        }
    }

    /// Case-sensitive suffix match, so `README.MD` is not markdown.
    pub fn is_markdown(&self) -> bool {
        MARKDOWN_EXTENSIONS
            .iter()
            .any(|ext| self.file_name.ends_with(ext))
    }

    /// Text after the last `.` of the final path segment, or "".
    pub fn extension(&self) -> &str {
        let base_name = self
            .file_name
            .rsplit('/')
            .next()
            .unwrap_or(&self.file_name);

        match base_name.rfind('.') {
            Some(idx) => &base_name[idx + 1..],
            None => "",
        }
    }
}

// Renders repository files as HTML
//
// Holds only immutable collaborators, so a single renderer can be shared
// by concurrent requests.
pub struct FileRenderer<F, H> {
    fetcher: F,
    highlighter: H,
    base_url: String,
    theme: String,
}

impl<F: FileFetcher, H: Highlighter> FileRenderer<F, H> {
    pub fn new(fetcher: F, highlighter: H, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            highlighter,
            base_url: base_url.into(),
            theme: super::highlight::DEFAULT_THEME.to_string(),
        }
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    pub fn file_url(&self, request: &RenderRequest) -> String {
        file_url(
            &self.base_url,
            &request.repo_name,
            &request.branch_name,
            &request.file_name,
        )
    }

    // Entry point for the wiki host
    pub async fn handle(
        &self,
        repo_name: &str,
        branch_name: &str,
        file_name: &str,
    ) -> Result<String, FetchError> {
        self.render(&RenderRequest::new(repo_name, branch_name, file_name))
            .await
    }

    pub async fn render(&self, request: &RenderRequest) -> Result<String, FetchError> {
        let url = self.file_url(request);
        let content = self.fetcher.fetch_file(&url).await?;

        if request.is_markdown() {
            debug!(file = %request.file_name, "rendering as markdown");
            return Ok(markdown_to_html(&content));
        }

        let extension = request.extension();
        let Some(language) = self.highlighter.language_for_extension(extension) else {
            debug!(file = %request.file_name, extension, "no language for extension, passing through");
            return Ok(content);
        };

        debug!(file = %request.file_name, %language, "highlighting");
        let options = HighlightOptions::inline(&self.theme);

        match self.highlighter.highlight(&content, &language, &options) {
            Ok(html) => Ok(html),
            Err(err @ HighlightError::UnsupportedLanguage(_)) => {
                warn!(file = %request.file_name, error = %err, "highlighter rejected language");
                Ok(err.to_string())
            }
            Err(HighlightError::Internal(detail)) => {
                warn!(file = %request.file_name, %detail, "highlighting failed");
                Ok(format!("error parsing file: {}", detail))
            }
        }
    }
}
