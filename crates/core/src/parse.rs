//! HTML parsing and visible-text extraction.
//!
//! This module provides the [`Document`] type, a thin wrapper around
//! `scraper::Html` that knows how to pull the visible body text out of a
//! page once script/style payload has been stripped.
//!
//! # Example
//!
//! ```rust
//! use kotoba_core::parse::Document;
//!
//! let html = r#"
//!     <html lang="ja">
//!         <head><title>天気予報</title></head>
//!         <body><h1>明日の天気</h1><p>晴れ</p></body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html).unwrap();
//! assert_eq!(doc.title(), Some("天気予報".to_string()));
//! assert_eq!(doc.body_text(), "明日の天気\n晴れ");
//! ```

use std::sync::LazyLock;

use scraper::{Html, Node, Selector};

use crate::{PreprocessConfig, Result, preprocess};

static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").expect("valid selector"));
static BODY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").expect("valid selector"));
static HTML_ROOT: LazyLock<Selector> = LazyLock::new(|| Selector::parse("html").expect("valid selector"));

/// Elements that start a new line of text.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption", "figure", "footer",
    "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section",
    "table", "td", "th", "tr", "ul",
];

fn is_block(node: &Node) -> bool {
    node.as_element().is_some_and(|el| BLOCK_TAGS.contains(&el.name()))
}

/// Represents a parsed HTML document.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string without preprocessing.
    ///
    /// Script and style text is still present in a document parsed this
    /// way; use [`Document::parse_with_preprocessing`] before reading
    /// visible text.
    pub fn parse(html: &str) -> Result<Self> {
        let html = Html::parse_document(html);
        Ok(Self { html })
    }

    /// Parses HTML from a string after removing non-visible payload.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kotoba_core::{PreprocessConfig, parse::Document};
    ///
    /// let html = "<body><script>var 変数 = 1;</script><p>本文</p></body>";
    /// let doc = Document::parse_with_preprocessing(html, &PreprocessConfig::default()).unwrap();
    /// assert_eq!(doc.body_text(), "本文");
    /// ```
    pub fn parse_with_preprocessing(html: &str, config: &PreprocessConfig) -> Result<Self> {
        let cleaned = preprocess::preprocess_html(html, config);
        Self::parse(&cleaned)
    }

    /// Gets the title of the document.
    ///
    /// Returns the trimmed content of the `<title>` element if present and non-empty.
    pub fn title(&self) -> Option<String> {
        self.html
            .select(&TITLE)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|title| !title.is_empty())
    }

    /// Gets the declared document language from `<html lang="...">`.
    pub fn lang(&self) -> Option<String> {
        self.html
            .select(&HTML_ROOT)
            .next()
            .and_then(|el| el.value().attr("lang"))
            .map(|lang| lang.trim().to_string())
    }

    /// Gets the visible text of the document body.
    ///
    /// Text nodes under `<body>` (or under the root element when the markup
    /// has no body) are concatenated, so inline markup never splits a word.
    /// Block-level elements start a new line; each line is trimmed and
    /// blank lines are dropped.
    pub fn body_text(&self) -> String {
        let root = self.html.select(&BODY).next().unwrap_or_else(|| self.html.root_element());
        let mut text = String::new();

        for node in root.descendants() {
            let value = node.value();
            let after_block = value.is_text() && node.prev_sibling().is_some_and(|prev| is_block(prev.value()));
            if is_block(value) || after_block {
                text.push('\n');
            }
            if let Node::Text(chunk) = value {
                text.push_str(chunk);
            }
        }

        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
