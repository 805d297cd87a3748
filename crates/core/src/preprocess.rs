use regex::Regex;
use std::sync::LazyLock;

static HIDDEN_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(display\s*:\s*none|visibility\s*:\s*hidden)").expect("valid regex"));

/// Configuration for HTML preprocessing
#[derive(Debug, Clone)]
pub struct PreprocessConfig {
    /// Whether to remove script tags
    pub remove_scripts: bool,
    /// Whether to remove style tags
    pub remove_styles: bool,
    /// Whether to remove noscript tags
    pub remove_noscript: bool,
    /// Whether to remove template tags
    pub remove_templates: bool,
    /// Whether to remove iframe tags
    pub remove_iframes: bool,
    /// Whether to remove svg tags
    pub remove_svg: bool,
    /// Whether to remove canvas tags
    pub remove_canvas: bool,
    /// Whether to remove HTML comments
    pub remove_comments: bool,
    /// Whether to remove elements styled `display:none` / `visibility:hidden`
    pub remove_hidden: bool,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            remove_scripts: true,
            remove_styles: true,
            remove_noscript: true,
            remove_templates: true,
            remove_iframes: true,
            remove_svg: true,
            remove_canvas: true,
            remove_comments: true,
            remove_hidden: false,
        }
    }
}

impl PreprocessConfig {
    /// Tags whose whole subtree is dropped under this configuration.
    fn removed_tags(&self) -> Vec<&'static str> {
        [
            (self.remove_scripts, "script"),
            (self.remove_styles, "style"),
            (self.remove_noscript, "noscript"),
            (self.remove_templates, "template"),
            (self.remove_iframes, "iframe"),
            (self.remove_svg, "svg"),
            (self.remove_canvas, "canvas"),
        ]
        .into_iter()
        .filter_map(|(enabled, tag)| enabled.then_some(tag))
        .collect()
    }
}

/// Preprocess HTML by removing elements that carry no visible text
pub fn preprocess_html(html: &str, config: &PreprocessConfig) -> String {
    let mut processed = remove_unwanted_nodes(html, config);

    if config.remove_hidden {
        processed = remove_hidden_elements(&processed);
    }

    processed
}

/// Runs a `lol_html` rewriter over `html`, falling back to the input on failure.
///
/// Output is buffered as bytes so multi-byte characters split across
/// chunk boundaries survive intact.
fn rewrite(html: &str, settings: lol_html::Settings<'_, '_>) -> String {
    let mut output = Vec::with_capacity(html.len());
    let mut rewriter = lol_html::HtmlRewriter::new(settings, |c: &[u8]| output.extend_from_slice(c));

    if rewriter.write(html.as_bytes()).is_err() || rewriter.end().is_err() {
        return html.to_string();
    }

    if output.is_empty() { html.to_string() } else { String::from_utf8_lossy(&output).into_owned() }
}

/// Remove script, style, and other non-visible tags plus comments
fn remove_unwanted_nodes(html: &str, config: &PreprocessConfig) -> String {
    let element_content_handlers = config
        .removed_tags()
        .into_iter()
        .map(|tag| {
            lol_html::element!(tag, |el| {
                el.remove();
                Ok(())
            })
        })
        .collect();

    let document_content_handlers = if config.remove_comments {
        vec![lol_html::doc_comments!(|c| {
            c.remove();
            Ok(())
        })]
    } else {
        Vec::new()
    };

    rewrite(
        html,
        lol_html::Settings { element_content_handlers, document_content_handlers, ..Default::default() },
    )
}

/// Remove elements with display:none or visibility:hidden styles
fn remove_hidden_elements(html: &str) -> String {
    rewrite(
        html,
        lol_html::Settings {
            element_content_handlers: vec![lol_html::element!("*", |el| {
                if let Some(style) = el.get_attribute("style")
                    && HIDDEN_STYLE.is_match(&style)
                {
                    el.remove();
                }
                Ok(())
            })],
            ..Default::default()
        },
    )
}
