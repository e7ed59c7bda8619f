use crate::errors::ApiError;

/// Validates a router mount prefix.
///
/// An empty prefix is allowed and mounts at the root. Otherwise the prefix
/// must start with `/` and must not end with `/`.
pub fn validate_prefix(prefix: &str) -> Result<(), ApiError> {
    if prefix.is_empty() {
        return Ok(());
    }
    if !prefix.starts_with('/') {
        return Err(ApiError::PrefixWithoutLeadingSlash(prefix.to_string()));
    }
    if prefix.ends_with('/') {
        return Err(ApiError::PrefixWithTrailingSlash(prefix.to_string()));
    }
    Ok(())
}

/// Validates HTTP/HTTPS URL
pub fn validate_http_url(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err("URL cannot be empty".to_string());
    }
    let url = url::Url::parse(value).map_err(|e| format!("Invalid URL: {}", e))?;
    match url.scheme() {
        "http" | "https" => {}
        _ => return Err("URL must use http or https scheme".to_string()),
    }
    if url.host_str().filter(|h| !h.is_empty()).is_none() {
        return Err("URL must have a valid host".to_string());
    }
    Ok(())
}
