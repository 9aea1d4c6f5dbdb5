use crate::utils::error::{ContentError, Result};
use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;
use url::{Host, Url};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl Display, reason: impl Into<String>) -> ContentError {
    ContentError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// 後端 base URL：必須是 http(s)，且不能帶查詢字串或 fragment（查詢參數另外設定）
pub fn validate_base_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.trim().is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    let url = Url::parse(url_str)
        .map_err(|e| invalid(field_name, url_str, format!("Invalid URL format: {}", e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            field_name,
            url_str,
            format!("Unsupported URL scheme: {}", url.scheme()),
        ));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid(
            field_name,
            url_str,
            "Put query parameters under [backend.query] instead of the base URL",
        ));
    }

    Ok(())
}

/// 端點路徑接在 base URL 之後，不能是完整 URL 或自帶查詢字串
pub fn validate_endpoint_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(invalid(field_name, path, "Endpoint path cannot be empty"));
    }
    if Url::parse(path).is_ok() {
        return Err(invalid(
            field_name,
            path,
            "Endpoint path must be relative to backend.base_url",
        ));
    }
    if path.contains(['?', '#']) {
        return Err(invalid(
            field_name,
            path,
            "Endpoint path cannot contain '?' or '#'",
        ));
    }
    Ok(())
}

/// 輸出目標："-" 代表 stdout，其餘視為檔案路徑
pub fn validate_output_target(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }
    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }
    Ok(())
}

pub fn validate_host(field_name: &str, host: &str) -> Result<()> {
    if host.contains(['/', ':']) {
        return Err(invalid(
            field_name,
            host,
            "Expected a bare host name without scheme, port or path",
        ));
    }
    Host::parse(host)
        .map(|_| ())
        .map_err(|e| invalid(field_name, host, format!("Invalid host: {}", e)))
}

pub fn validate_range<T: PartialOrd + Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

pub fn validate_unique<T, I>(field_name: &str, values: I) -> Result<()>
where
    T: Eq + Hash + Display,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    for value in values {
        let label = value.to_string();
        if !seen.insert(value) {
            return Err(invalid(field_name, label, "Value appears more than once"));
        }
    }
    Ok(())
}
