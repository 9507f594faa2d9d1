use std::fmt;

use crate::{Error, Result};

/// Identity of a compiled artifact.
///
/// The file name is `<module>-<name>-<version>[.minified].js` and never
/// changes for a fixed key; bumping the version is how old artifacts are
/// retired.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactKey {
    module: String,
    name: String,
    version: String,
    compressed: bool,
}

impl ArtifactKey {
    pub fn new(
        module: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
        compressed: bool,
    ) -> Result<Self> {
        let key = Self {
            module: module.into(),
            name: name.into(),
            version: version.into(),
            compressed,
        };
        validate_part("module", &key.module)?;
        validate_part("name", &key.name)?;
        validate_part("version", &key.version)?;
        Ok(key)
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn compressed(&self) -> bool {
        self.compressed
    }

    pub fn file_name(&self) -> String {
        let suffix = if self.compressed { ".minified" } else { "" };
        format!("{}-{}-{}{}.js", self.module, self.name, self.version, suffix)
    }
}

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.module, self.name, self.version)
    }
}

fn validate_part(field: &'static str, value: &str) -> Result<()> {
    let reason = if value.is_empty() {
        "must not be empty"
    } else if value.contains(['/', '\\']) {
        "must not contain path separators"
    } else if value.contains("..") {
        "must not contain '..'"
    } else if value.contains('\0') {
        "must not contain NUL"
    } else {
        return Ok(());
    };

    Err(Error::InvalidIdentity {
        field,
        value: value.to_string(),
        reason,
    })
}
