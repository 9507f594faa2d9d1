//! Pluggable post-processing of a concatenated bundle.
//!
//! A [`Transform`] turns the concatenated source into the bytes that are
//! cached. [`CommandTransform`] shells out to a minifier; [`Identity`] keeps
//! the input as is.

mod command;
mod error;

pub use command::CommandTransform;
pub use error::TransformError;

pub trait Transform: Send + Sync {
    /// Short name used in logs and warnings.
    fn name(&self) -> &str;

    fn apply(&self, input: &[u8]) -> Result<Vec<u8>, TransformError>;
}

/// Returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Transform for Identity {
    fn name(&self) -> &str {
        "identity"
    }

    fn apply(&self, input: &[u8]) -> Result<Vec<u8>, TransformError> {
        Ok(input.to_vec())
    }
}
