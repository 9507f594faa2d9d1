//! How a bundle ends up in a page.

mod document;
mod embed;

pub use document::{Document, HtmlDocument};
pub use embed::EmbedSpec;

/// Escape text for use inside a double-quoted HTML attribute.
pub(crate) fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub(crate) fn script_tag(url: &str) -> String {
    format!("<script src=\"{}\"></script>", escape_attr(url))
}

pub(crate) fn inline_script_tag(content: &str) -> String {
    format!("<script>\n{}</script>", content)
}
