//! Bridge from the loaded project config to bundler types.
//!
//! - `loading` - find, load and validate the config for the global flags
//! - `conversions` - layout, minifier and bundle declarations to bundler types

mod conversions;
mod loading;

pub use conversions::{bundle_options, registry_from_layout, transform_from_minifier};
pub use loading::{Project, peek_settings};
