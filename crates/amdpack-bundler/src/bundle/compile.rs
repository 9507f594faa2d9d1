use std::fs;
use std::path::{Path, PathBuf};

use super::{Bundle, read_script};
use crate::cache::ArtifactState;
use crate::scanner::relative_slash_path;
use crate::templates::template_definitions;
use crate::transform::TransformError;
use crate::{Error, Result};

/// What [`Bundle::ensure_compiled`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileReport {
    pub state: ArtifactState,
    pub path: PathBuf,
    pub rebuilt: bool,
    /// Recovered problems, such as a failed transform.
    pub warnings: Vec<String>,
}

impl Bundle {
    /// Compile the artifact if it is missing, or stale in watch mode.
    ///
    /// A failing transform does not fail the call: the unminified
    /// concatenation is cached instead and the failure is reported in
    /// [`CompileReport::warnings`].
    pub fn ensure_compiled(&self) -> Result<CompileReport> {
        let mut warnings = Vec::new();

        let outcome = self.cache.ensure(
            &self.key,
            self.watch,
            || self.last_source_modified(),
            || self.compile(&mut warnings),
        )?;

        Ok(CompileReport {
            state: outcome.state,
            path: outcome.path,
            rebuilt: outcome.rebuilt,
            warnings,
        })
    }

    /// Compile if needed and return the artifact's bytes.
    pub fn serve(&self) -> Result<Vec<u8>> {
        let report = self.ensure_compiled()?;
        fs::read(&report.path)
            .map_err(|err| Error::io(format!("failed to read {}", report.path.display()), err))
    }

    /// All sources in bundle order, separated by banner comments.
    pub fn concatenate(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        banner(
            &mut out,
            &format!(
                "app bundle in module {} {} {}",
                self.key.module(),
                self.key.name(),
                self.key.version()
            ),
        );

        let mut current_group = None;
        for script in self.scripts()? {
            if current_group != Some((script.kind, script.owner)) {
                out.push(b'\n');
                banner(
                    &mut out,
                    &format!("{} from module {}", script.kind.label(), script.owner),
                );
                current_group = Some((script.kind, script.owner));
            }

            out.push(b'\n');
            banner(&mut out, &slash_path(script.relative));
            append_source(&mut out, &read_script(&script)?);
        }

        for dir in self.scanned_directories()? {
            let shown = slash_path(dir.relative);
            out.push(b'\n');
            banner(&mut out, &format!("definitions in: {}", shown));

            for file in &dir.definitions.files {
                let content = fs::read(file)
                    .map_err(|err| Error::io(format!("failed to read {}", file.display()), err))?;
                out.push(b'\n');
                banner(&mut out, &relative_slash_path(&dir.path, file));
                append_source(&mut out, &content);
            }

            let templates = template_definitions(&dir.path)?;
            if !templates.is_empty() {
                out.push(b'\n');
                banner(&mut out, &format!("templates in: {}", shown));
                append_source(&mut out, templates.script.as_bytes());
            }
        }

        Ok(out)
    }

    fn compile(&self, warnings: &mut Vec<String>) -> Result<Vec<u8>> {
        let source = self.concatenate()?;
        if !self.key.compressed() {
            return Ok(source);
        }

        match self.transform.apply(&source) {
            Ok(minified) => Ok(minified),
            Err(err) => {
                let message = describe_failure(self.transform.name(), &err);
                tracing::warn!(
                    bundle = %self.key,
                    "{}; keeping the unminified bundle",
                    message
                );
                warnings.push(message);
                Ok(source)
            }
        }
    }
}

fn banner(out: &mut Vec<u8>, text: &str) {
    out.extend_from_slice(b"// ");
    out.extend_from_slice(text.as_bytes());
    out.push(b'\n');
}

fn append_source(out: &mut Vec<u8>, content: &[u8]) {
    out.extend_from_slice(content);
    if !content.is_empty() && !content.ends_with(b"\n") {
        out.push(b'\n');
    }
}

fn slash_path(path: &Path) -> String {
    relative_slash_path(Path::new(""), path)
}

fn describe_failure(name: &str, err: &TransformError) -> String {
    match err {
        TransformError::Failed { stderr, .. } if !stderr.is_empty() => {
            format!("transform {} failed: {}: {}", name, err, stderr)
        }
        _ => format!("transform {} failed: {}", name, err),
    }
}
