use super::{inline_script_tag, script_tag};

/// Page that bundles attach their scripts to.
pub trait Document {
    /// Add a block of inline script content.
    fn add_script(&mut self, content: &str);

    /// Add external scripts by URL, in order.
    fn add_scripts(&mut self, urls: &[String]);
}

/// Collects scripts in insertion order and renders them as HTML.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlDocument {
    entries: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    External(String),
    Inline(String),
}

impl HtmlDocument {
    pub fn script_urls(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|entry| match entry {
                Entry::External(url) => Some(url.as_str()),
                Entry::Inline(_) => None,
            })
            .collect()
    }

    pub fn inline_scripts(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|entry| match entry {
                Entry::Inline(content) => Some(content.as_str()),
                Entry::External(_) => None,
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_html(&self) -> String {
        self.entries
            .iter()
            .map(|entry| match entry {
                Entry::External(url) => script_tag(url),
                Entry::Inline(content) => inline_script_tag(content),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Document for HtmlDocument {
    fn add_script(&mut self, content: &str) {
        self.entries.push(Entry::Inline(content.to_string()));
    }

    fn add_scripts(&mut self, urls: &[String]) {
        self.entries
            .extend(urls.iter().cloned().map(Entry::External));
    }
}
