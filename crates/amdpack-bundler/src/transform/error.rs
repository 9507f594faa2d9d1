//! Error types for bundle transforms

use miette::Diagnostic;
use thiserror::Error;

fn format_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with code {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

/// Errors raised while transforming a bundle
#[derive(Error, Debug, Diagnostic)]
pub enum TransformError {
    /// Failed to spawn the transform process
    #[error("Failed to spawn '{program}': {source}")]
    #[diagnostic(
        code(amdpack::transform::spawn_failed),
        help("Install {program} or point [minifier] program at another tool")
    )]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status
    #[error("'{program}' {}", format_exit(.code))]
    #[diagnostic(code(amdpack::transform::failed))]
    Failed {
        program: String,
        code: Option<i32>,
        #[help]
        stderr: String,
    },

    /// The input could not be handed to the process
    #[error("Failed to stage transform input: {source}")]
    #[diagnostic(
        code(amdpack::transform::input),
        help("Check that the temporary directory is writable")
    )]
    Input {
        #[source]
        source: std::io::Error,
    },
}

impl TransformError {
    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            source,
        }
    }

    pub fn failed(program: impl Into<String>, code: Option<i32>, stderr: impl Into<String>) -> Self {
        Self::Failed {
            program: program.into(),
            code,
            stderr: stderr.into(),
        }
    }

    pub fn input(source: std::io::Error) -> Self {
        Self::Input { source }
    }
}
