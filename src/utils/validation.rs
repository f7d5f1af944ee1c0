use crate::core::parser::FIELD_SEPARATOR;
use crate::utils::error::{ImportError, Result};
use url::Url;

/// Settings check run once before an import starts.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> ImportError {
    ImportError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// The backend base URL must be absolute http(s); `/api/import` is joined onto it.
pub fn validate_url(field: &str, raw: &str) -> Result<()> {
    if raw.trim().is_empty() {
        return Err(invalid(field, raw, "URL cannot be empty"));
    }

    let url = Url::parse(raw).map_err(|e| invalid(field, raw, format!("Invalid URL format: {}", e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            field,
            raw,
            format!("Unsupported URL scheme: {}", url.scheme()),
        ));
    }
    Ok(())
}

/// A preselected CSV path; existence is checked later by the bridge.
pub fn validate_path(field: &str, path: &str) -> Result<()> {
    match path {
        "" => Err(invalid(field, path, "Path cannot be empty")),
        p if p.contains('\0') => Err(invalid(field, p.escape_default(), "Path contains null bytes")),
        _ => Ok(()),
    }
}

pub fn validate_min(field: &str, value: u64, min: u64) -> Result<()> {
    if value < min {
        return Err(invalid(field, value, format!("Value must be at least {}", min)));
    }
    Ok(())
}

/// Required header names are compared against cells split on the field
/// separator, so a name containing it could never match.
pub fn validate_header_names(field: &str, headers: &[String]) -> Result<()> {
    if let Some(blank) = headers.iter().find(|h| h.trim().is_empty()) {
        return Err(invalid(field, blank, "Header names cannot be empty"));
    }
    if let Some(bad) = headers.iter().find(|h| h.contains(FIELD_SEPARATOR)) {
        return Err(invalid(
            field,
            bad,
            "Header names cannot contain the field separator",
        ));
    }
    Ok(())
}
