// src/render/highlight.rs
// =============================================================================
// This module turns source code into syntax-highlighted HTML.
//
// We use the `syntect` crate which:
// - Ships Sublime Text grammars for most languages
// - Maps file extensions to those grammars
// - Writes HTML with either inline styles or CSS classes
//
// The renderer only sees the Highlighter trait. Looking up a language and
// highlighting with it are two separate calls on the same immutable value,
// so one SyntectHighlighter can serve any number of requests.
// =============================================================================

use syntect::highlighting::ThemeSet;
use syntect::html::{highlighted_html_for_string, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;
use thiserror::Error;

/// Theme used for inline styles when none is configured.
pub const DEFAULT_THEME: &str = "InspiredGitHub";

/// The only encoding we can produce; Rust strings are always UTF-8.
pub const UTF8: &str = "UTF-8";

// Why highlighting failed
//
// Display text matters here: the renderer shows these messages to the
// reader instead of the file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HighlightError {
    #[error("could not find the language {0}")]
    UnsupportedLanguage(String),

    #[error("{0}")]
    Internal(String),
}

// Knobs passed to the highlighter for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightOptions {
    pub encoding: String,
    /// Emit CSS classes instead of inline styles
    pub classes: bool,
    /// Link keywords to their documentation
    pub keyword_links: bool,
    /// Theme for inline styles (ignored when `classes` is on)
    pub theme: String,
}

impl HighlightOptions {
    // UTF-8, inline styles, no keyword links
    pub fn inline(theme: &str) -> Self {
        Self {
            encoding: UTF8.to_string(),
            classes: false,
            keyword_links: false,
            theme: theme.to_string(),
        }
    }
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self::inline(DEFAULT_THEME)
    }
}

// The capability to highlight source code
pub trait Highlighter {
    /// Name of the language for a file extension, if any grammar claims it.
    fn language_for_extension(&self, extension: &str) -> Option<String>;

    /// Highlights `code` as `language`.
    fn highlight(
        &self,
        code: &str,
        language: &str,
        options: &HighlightOptions,
    ) -> Result<String, HighlightError>;
}

// syntect-backed highlighter
//
// Loading the default syntaxes and themes takes a few milliseconds, so do
// it once and share the value.
pub struct SyntectHighlighter {
    syntaxes: SyntaxSet,
    themes: ThemeSet,
}

impl SyntectHighlighter {
    pub fn new() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            themes: ThemeSet::load_defaults(),
        }
    }

    fn find_syntax(&self, language: &str) -> Option<&SyntaxReference> {
        self.syntaxes
            .find_syntax_by_name(language)
            .or_else(|| self.syntaxes.find_syntax_by_token(language))
    }

    fn highlight_with_classes(
        &self,
        code: &str,
        syntax: &SyntaxReference,
    ) -> Result<String, HighlightError> {
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntaxes, ClassStyle::Spaced);

        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .map_err(|e| HighlightError::Internal(e.to_string()))?;
        }

        Ok(format!("<pre class=\"code\">{}</pre>\n", generator.finalize()))
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for SyntectHighlighter {
    fn language_for_extension(&self, extension: &str) -> Option<String> {
        if extension.is_empty() {
            return None;
        }

        self.syntaxes
            .find_syntax_by_extension(extension)
            .map(|syntax| syntax.name.clone())
    }

    fn highlight(
        &self,
        code: &str,
        language: &str,
        options: &HighlightOptions,
    ) -> Result<String, HighlightError> {
        let syntax = self
            .find_syntax(language)
            .ok_or_else(|| HighlightError::UnsupportedLanguage(language.to_string()))?;

        if !options.encoding.eq_ignore_ascii_case(UTF8) {
            return Err(HighlightError::Internal(format!(
                "unsupported encoding {}",
                options.encoding
            )));
        }
        if options.keyword_links {
            return Err(HighlightError::Internal(
                "keyword links are not supported".to_string(),
            ));
        }

        if options.classes {
            return self.highlight_with_classes(code, syntax);
        }

        let theme = self
            .themes
            .themes
            .get(&options.theme)
            .ok_or_else(|| HighlightError::Internal(format!("unknown theme {}", options.theme)))?;

        highlighted_html_for_string(code, &self.syntaxes, syntax, theme)
            .map_err(|e| HighlightError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_for_known_extensions() {
        let highlighter = SyntectHighlighter::new();
        assert_eq!(highlighter.language_for_extension("py").as_deref(), Some("Python"));
        assert_eq!(highlighter.language_for_extension("rs").as_deref(), Some("Rust"));
    }

    #[test]
    fn test_language_for_unknown_extension() {
        let highlighter = SyntectHighlighter::new();
        assert_eq!(highlighter.language_for_extension("xyz"), None);
        assert_eq!(highlighter.language_for_extension(""), None);
    }

    #[test]
    fn test_highlight_inline_styles() {
        let highlighter = SyntectHighlighter::new();
        let html = highlighter
            .highlight("fn main() {}\n", "Rust", &HighlightOptions::default())
            .unwrap();
        assert!(html.starts_with("<pre style="));
        assert!(html.contains("main"));
        assert!(!html.contains("class="));
    }

    #[test]
    fn test_highlight_with_classes() {
        let highlighter = SyntectHighlighter::new();
        let options = HighlightOptions {
            classes: true,
            ..HighlightOptions::default()
        };
        let html = highlighter.highlight("x = 1\n", "Python", &options).unwrap();
        assert!(html.starts_with("<pre class=\"code\">"));
        assert!(html.contains("class=\"source python\""));
    }

    #[test]
    fn test_highlight_escapes_html() {
        let highlighter = SyntectHighlighter::new();
        let html = highlighter
            .highlight("<b>\n", "Plain Text", &HighlightOptions::default())
            .unwrap();
        assert!(html.contains("&lt;b&gt;"));
    }

    #[test]
    fn test_unsupported_language() {
        let highlighter = SyntectHighlighter::new();
        let err = highlighter
            .highlight("code", "Klingon", &HighlightOptions::default())
            .unwrap_err();
        assert_eq!(err, HighlightError::UnsupportedLanguage("Klingon".to_string()));
        assert_eq!(err.to_string(), "could not find the language Klingon");
    }

    #[test]
    fn test_unknown_theme_is_internal_error() {
        let highlighter = SyntectHighlighter::new();
        let err = highlighter
            .highlight("x = 1\n", "Python", &HighlightOptions::inline("NoSuchTheme"))
            .unwrap_err();
        assert_eq!(err, HighlightError::Internal("unknown theme NoSuchTheme".to_string()));
    }

    #[test]
    fn test_other_encodings_rejected() {
        let highlighter = SyntectHighlighter::new();
        let options = HighlightOptions {
            encoding: "ISO-8859-1".to_string(),
            ..HighlightOptions::default()
        };
        let err = highlighter.highlight("x = 1\n", "Python", &options).unwrap_err();
        assert_eq!(err.to_string(), "unsupported encoding ISO-8859-1");
    }
}
