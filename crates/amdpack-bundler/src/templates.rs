//! HTML templates bundled as named AMD text modules.
//!
//! Every `.html` file under a scanned directory becomes
//! `define("text!<relative/path.html>", [], function () { return "..."; });`
//! so `require(["text!widgets/menu.html"], ...)` resolves without a request.

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use crate::scanner::{TemplateFiles, relative_slash_path, scan};
use crate::{Error, Result};

/// Rendered template definitions of one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    pub script: String,
    pub last_modified: SystemTime,
    pub count: usize,
}

impl TemplateSet {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Render every template under `dir`.
pub fn template_definitions(dir: &Path) -> Result<TemplateSet> {
    let found = scan(dir, &TemplateFiles::default())?;

    let mut script = String::new();
    for file in &found.files {
        let content = fs::read(file)
            .map_err(|err| Error::io(format!("failed to read {}", file.display()), err))?;
        let name = format!("text!{}", relative_slash_path(dir, file));
        script.push_str(&render_definition(&name, &String::from_utf8_lossy(&content)));
    }

    Ok(TemplateSet {
        script,
        last_modified: found.last_modified,
        count: found.files.len(),
    })
}

fn render_definition(name: &str, content: &str) -> String {
    format!(
        "define({}, [], function () {{ return {}; }});\n",
        js_string(name),
        js_string(content)
    )
}

/// JSON string literal that is also safe inside an inline `<script>`.
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string())
        .to_string()
        .replace("</", "<\\/")
}
