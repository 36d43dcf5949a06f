// src/render/mod.rs
// =============================================================================
// This module turns fetched files into HTML.
//
// Submodules:
// - markdown: Markdown -> HTML with pulldown-cmark
// - highlight: source code -> highlighted HTML with syntect
// - file: the renderer that fetches a file and picks one of the two
// =============================================================================

mod file;
mod highlight;
mod markdown;

pub use file::{FileRenderer, RenderRequest};
pub use highlight::{SyntectHighlighter, DEFAULT_THEME};
