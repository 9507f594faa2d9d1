use serde::Serialize;

use super::{inline_script_tag, script_tag};

/// Output of [`Bundle::resolve_for_embedding`](crate::Bundle::resolve_for_embedding).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum EmbedSpec {
    /// Individual script URLs plus inline template definitions.
    Debug { scripts: Vec<String>, inline: String },
    /// The compiled artifact.
    Compiled { url: String },
}

impl EmbedSpec {
    pub fn script_urls(&self) -> Vec<&str> {
        match self {
            EmbedSpec::Debug { scripts, .. } => scripts.iter().map(String::as_str).collect(),
            EmbedSpec::Compiled { url } => vec![url.as_str()],
        }
    }

    pub fn inline(&self) -> Option<&str> {
        match self {
            EmbedSpec::Debug { inline, .. } if !inline.is_empty() => Some(inline),
            _ => None,
        }
    }

    /// One `<script>` tag per line: external scripts first, then the inline block.
    pub fn to_html(&self) -> String {
        let mut lines: Vec<String> = self.script_urls().into_iter().map(script_tag).collect();
        if let Some(inline) = self.inline() {
            lines.push(inline_script_tag(inline));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiled_renders_a_single_tag() {
        let spec = EmbedSpec::Compiled {
            url: "/modulesVar/amdpack/app-main-1.minified.js".to_string(),
        };
        assert_eq!(
            spec.to_html(),
            "<script src=\"/modulesVar/amdpack/app-main-1.minified.js\"></script>"
        );
        assert!(spec.inline().is_none());
    }

    #[test]
    fn debug_renders_scripts_then_inline() {
        let spec = EmbedSpec::Debug {
            scripts: vec!["/modules/app/a.js".to_string(), "/modules/app/b.js".to_string()],
            inline: "define(\"text!x.html\", [], function () { return \"\"; });\n".to_string(),
        };

        let html = spec.to_html();
        let lines: Vec<&str> = html.lines().collect();
        assert_eq!(lines[0], "<script src=\"/modules/app/a.js\"></script>");
        assert_eq!(lines[1], "<script src=\"/modules/app/b.js\"></script>");
        assert_eq!(lines[2], "<script>");
        assert_eq!(lines.last(), Some(&"</script>"));
    }

    #[test]
    fn urls_are_attribute_escaped() {
        let spec = EmbedSpec::Compiled {
            url: "/a.js?x=1&y=\"2\"".to_string(),
        };
        assert_eq!(
            spec.to_html(),
            "<script src=\"/a.js?x=1&amp;y=&quot;2&quot;\"></script>"
        );
    }

    #[test]
    fn serializes_with_mode_tag() {
        let spec = EmbedSpec::Compiled {
            url: "/x.js".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&spec).unwrap(),
            serde_json::json!({ "mode": "compiled", "url": "/x.js" })
        );
    }
}
