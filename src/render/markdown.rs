// src/render/markdown.rs
// =============================================================================
// This module turns Markdown text into HTML.
//
// We use the `pulldown-cmark` crate which:
// - Parses Markdown into events (heading, paragraph, link, etc.)
// - Follows the CommonMark specification
// - Ships an HTML writer that consumes those events
// =============================================================================

use pulldown_cmark::{html, Options, Parser};

// Converts Markdown text into an HTML fragment
//
// Tables, footnotes, strikethrough and task lists are enabled on top of
// plain CommonMark, since READMEs use them everywhere.
//
// Example input:
//   "# Title"
//
// Example output:
//   "<h1>Title</h1>\n"
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);

    // Rendered HTML is usually a bit longer than the source
    let mut html_buf = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut html_buf, parser);
    html_buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn test_heading() {
        assert_eq!(markdown_to_html("# Title"), "<h1>Title</h1>\n");
    }

    #[test]
    fn test_link() {
        let html = markdown_to_html("Check out [Rust](https://www.rust-lang.org)!");
        let fragment = Html::parse_fragment(&html);
        let selector = Selector::parse("a[href]").unwrap();
        let links: Vec<_> = fragment
            .select(&selector)
            .filter_map(|a| a.value().attr("href"))
            .collect();
        assert_eq!(links, vec!["https://www.rust-lang.org"]);
    }

    #[test]
    fn test_table_enabled() {
        let markdown = r#"
| Name | Value |
|------|-------|
| a    | 1     |
"#;
        let html = markdown_to_html(markdown);
        let fragment = Html::parse_fragment(&html);
        let selector = Selector::parse("table td").unwrap();
        assert_eq!(fragment.select(&selector).count(), 2);
    }

    #[test]
    fn test_task_list_and_strikethrough() {
        let html = markdown_to_html("- [x] done\n- [ ] ~~dropped~~\n");
        assert!(html.contains(r#"type="checkbox""#));
        assert!(html.contains("<del>dropped</del>"));
    }

    #[test]
    fn test_raw_html_escaped_in_code() {
        let html = markdown_to_html("`<script>`");
        assert_eq!(html, "<p><code>&lt;script&gt;</code></p>\n");
    }
}
