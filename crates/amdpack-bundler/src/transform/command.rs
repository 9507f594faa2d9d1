//! External minifier invoked as `<program> <args...> <input file>`.

use std::io::Write;
use std::process::{Command, Stdio};

use super::{Transform, TransformError};

/// Runs a command-line tool over the bundle.
///
/// The input is written to a temporary file whose path is passed as the last
/// argument. Exit status 0 means stdout holds the result; anything else is a
/// [`TransformError::Failed`] carrying stderr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTransform {
    program: String,
    args: Vec<String>,
}

impl CommandTransform {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// `uglifyjs <file>`
    pub fn uglifyjs() -> Self {
        Self::new("uglifyjs")
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for CommandTransform {
    fn default() -> Self {
        Self::uglifyjs()
    }
}

impl Transform for CommandTransform {
    fn name(&self) -> &str {
        &self.program
    }

    fn apply(&self, input: &[u8]) -> Result<Vec<u8>, TransformError> {
        let mut staged = tempfile::Builder::new()
            .prefix("amdpack-compile-")
            .suffix(".js")
            .tempfile()
            .map_err(TransformError::input)?;
        staged.write_all(input).map_err(TransformError::input)?;
        staged.flush().map_err(TransformError::input)?;

        tracing::debug!(program = %self.program, bytes = input.len(), "running transform");

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(staged.path())
            .stdin(Stdio::null())
            .output()
            .map_err(|err| TransformError::spawn(&self.program, err))?;

        if !output.status.success() {
            return Err(TransformError::failed(
                &self.program,
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim(),
            ));
        }

        Ok(output.stdout)
    }
}
