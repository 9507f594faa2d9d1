/// Parse a file extension, adding the leading dot when missing.
///
/// # Examples
///
/// `js` and `.js` both parse to `.js`; `""`, `.` and `a/b` are rejected.
///
/// # Errors
///
/// Returns an error message if the extension is empty or contains a path
/// separator.
pub fn parse_extension(s: &str) -> Result<String, String> {
    let trimmed = s.trim_start_matches('.');
    if trimmed.is_empty() {
        return Err("Extension cannot be empty".to_string());
    }

    if trimmed.contains(['/', '\\']) {
        return Err(format!("Extension cannot contain path separators: '{}'", s));
    }

    Ok(format!(".{}", trimmed))
}

/// Parse a bundle handle: `name` or `module/name`.
///
/// # Errors
///
/// Returns an error message for empty parts or more than one `/`.
pub fn parse_bundle_handle(s: &str) -> Result<String, String> {
    let parts: Vec<&str> = s.split('/').collect();
    if parts.len() > 2 {
        return Err(format!(
            "Bundle must be 'name' or 'module/name', got '{}'",
            s
        ));
    }

    if parts.iter().any(|part| part.trim().is_empty()) {
        return Err(format!("Bundle name cannot be empty: '{}'", s));
    }

    Ok(s.to_string())
}
