use crate::utils::error::{CredHubError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(CredHubError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(CredHubError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(CredHubError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// 作為 base URL 使用時，不可帶 query 或 fragment
pub fn validate_base_url(field_name: &str, url_str: &str) -> Result<()> {
    validate_url(field_name, url_str)?;

    let url = Url::parse(url_str).map_err(|e| CredHubError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: url_str.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })?;

    if url.query().is_some() || url.fragment().is_some() {
        return Err(CredHubError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "Base URL cannot carry a query or fragment".to_string(),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| CredHubError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CredHubError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(CredHubError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("credhub.url", "https://credhub.example.com:8844").is_ok());
        assert!(validate_url("credhub.url", "http://localhost:9000").is_ok());
        assert!(validate_url("credhub.url", "").is_err());
        assert!(validate_url("credhub.url", "invalid-url").is_err());
        assert!(validate_url("credhub.url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_base_url() {
        assert!(validate_base_url("credhub.url", "https://credhub.example.com/credhub").is_ok());
        assert!(validate_base_url("credhub.url", "https://credhub.example.com/credhub?x=1").is_err());
        assert!(validate_base_url("credhub.url", "https://credhub.example.com/#top").is_err());
        assert!(validate_base_url("credhub.url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("credhub.timeout_seconds", 30u64, 1, 600).is_ok());
        assert!(validate_range("credhub.timeout_seconds", 0u64, 1, 600).is_err());
        assert!(validate_range("credhub.timeout_seconds", 601u64, 1, 600).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let missing: Option<String> = None;
        match validate_required_field("url", &missing) {
            Err(CredHubError::MissingConfigError { field }) => assert_eq!(field, "url"),
            other => panic!("unexpected result: {:?}", other),
        }

        let present = Some("x".to_string());
        assert_eq!(validate_required_field("url", &present).unwrap(), "x");
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("header", "Authorization").is_ok());
        assert!(validate_non_empty_string("header", "   ").is_err());
    }
}
