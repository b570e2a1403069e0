//! Markdown rendering utilities.
//!
//! Provides safe markdown-to-HTML conversion with XSS protection.

use pulldown_cmark::{Options, Parser, html};

/// Convert markdown content to sanitized HTML.
///
/// Supports extended markdown syntax including:
/// - Strikethrough (`~~text~~`)
/// - Tables
/// - Footnotes
///
/// The output is sanitized using `ammonia` to prevent XSS attacks.
/// `class` is allowed on `code` so fenced blocks keep their
/// `language-*` marker for styling.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(markdown, options);

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    ammonia::Builder::default()
        .add_tag_attributes("code", &["class"])
        .clean(&html_output)
        .to_string()
}

/// Render a plain source file as a fenced, highlight-ready code block.
pub fn source_to_html(content: &str, language: &str) -> String {
    let fenced = format!("```{language}\n{content}\n```");
    markdown_to_html(&fenced)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_basic_markdown() {
        let html = markdown_to_html("# Title\n\nSome *emphasis*.");
        assert!(html.contains("<h1>"));
        assert!(html.contains("<em>"));
    }

    #[test]
    fn strips_script_tags() {
        let html = markdown_to_html("hello <script>alert(1)</script> world");
        assert!(!html.contains("<script>"));
        assert!(html.contains("hello"));
    }

    #[test]
    fn keeps_language_class_on_code_blocks() {
        let html = markdown_to_html("```rust\nfn main() {}\n```");
        assert!(html.contains("language-rust"), "got: {html}");
    }

    #[test]
    fn wraps_source_files_in_fences() {
        let html = source_to_html("let x = 1;", "rust");
        assert!(html.contains("<pre>"));
        assert!(html.contains("language-rust"));
        assert!(html.contains("let x = 1;"));
    }

    #[test]
    fn fence_content_with_backticks_survives() {
        let html = source_to_html("a `tick` inside", "text");
        assert!(html.contains("tick"));
    }
}
