use crate::utils::error::{CredHubError, Result};
use crate::utils::validation::{
    validate_base_url, validate_non_empty_string, validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub credhub: CredHubConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredHubConfig {
    pub url: String,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
    pub headers: Option<HashMap<String, String>>,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            credhub: CredHubConfig {
                url: url.into(),
                timeout_seconds: None,
                user_agent: None,
                headers: None,
            },
        }
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CredHubError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CredHubError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CREDHUB_TOKEN})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CredHubError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn url(&self) -> &str {
        &self.credhub.url
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.credhub.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.credhub.user_agent.as_deref()
    }

    pub fn headers(&self) -> impl Iterator<Item = (&String, &String)> {
        self.credhub.headers.iter().flatten()
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validate_base_url("credhub.url", &self.credhub.url)?;

        if let Some(timeout) = self.credhub.timeout_seconds {
            validate_range("credhub.timeout_seconds", timeout, 1, 600)?;
        }

        if let Some(user_agent) = &self.credhub.user_agent {
            validate_non_empty_string("credhub.user_agent", user_agent)?;
        }

        for (name, value) in self.headers() {
            validate_non_empty_string("credhub.headers", name)?;
            validate_non_empty_string(&format!("credhub.headers.{}", name), value)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[credhub]
url = "https://credhub.example.com:8844"
timeout_seconds = 10
user_agent = "credhub-interpolate/0.1"

[credhub.headers]
X-Correlation-Id = "abc-123"
"#;

        let config = ClientConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.url(), "https://credhub.example.com:8844");
        assert_eq!(config.timeout_seconds(), 10);
        assert_eq!(config.user_agent(), Some("credhub-interpolate/0.1"));
        let headers: Vec<_> = config.headers().collect();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].1, "abc-123");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_toml_str("[credhub]\nurl = \"http://localhost:9000\"\n")
            .unwrap();
        assert_eq!(config.timeout_seconds(), DEFAULT_TIMEOUT_SECONDS);
        assert_eq!(config.user_agent(), None);
        assert_eq!(config.headers().count(), 0);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_CREDHUB_TOKEN", "token-xyz");

        let toml_content = r#"
[credhub]
url = "https://credhub.example.com"

[credhub.headers]
Authorization = "Bearer ${TEST_CREDHUB_TOKEN}"
"#;

        let config = ClientConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.credhub.headers.as_ref().unwrap()["Authorization"],
            "Bearer token-xyz"
        );

        std::env::remove_var("TEST_CREDHUB_TOKEN");
    }

    #[test]
    fn test_unset_env_var_is_left_alone() {
        let config = ClientConfig::from_toml_str(
            "[credhub]\nurl = \"${TEST_CREDHUB_UNSET_URL}\"\n",
        )
        .unwrap();
        assert_eq!(config.url(), "${TEST_CREDHUB_UNSET_URL}");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        let invalid_url = ClientConfig::new("invalid-url");
        assert!(invalid_url.validate().is_err());

        let with_query = ClientConfig::new("https://credhub.example.com/credhub?x=1");
        assert!(with_query.validate().is_err());

        let mut zero_timeout = ClientConfig::new("https://credhub.example.com");
        zero_timeout.credhub.timeout_seconds = Some(0);
        assert!(zero_timeout.validate().is_err());

        let mut blank_header = ClientConfig::new("https://credhub.example.com");
        blank_header.credhub.headers =
            Some(HashMap::from([("Authorization".to_string(), " ".to_string())]));
        assert!(blank_header.validate().is_err());
    }

    #[test]
    fn test_missing_url_is_a_config_error() {
        let err = ClientConfig::from_toml_str("[credhub]\ntimeout_seconds = 5\n").unwrap_err();
        assert!(matches!(err, CredHubError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[credhub]\nurl = \"https://credhub.example.com\"\n")
            .unwrap();

        let config = ClientConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.url(), "https://credhub.example.com");
    }
}
