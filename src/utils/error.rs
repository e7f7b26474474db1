use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CredHubError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("CredHub responded with status {status}")]
    RemoteError {
        status: StatusCode,
        body: Option<String>,
    },

    #[error("HTTP transport failed: {0}")]
    TransportError(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Failed to deserialize response body: {0}")]
    DeserializationError(#[source] serde_json::Error),

    #[error("Failed to serialize request body: {0}")]
    SerializationError(#[source] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl From<reqwest::Error> for CredHubError {
    fn from(err: reqwest::Error) -> Self {
        CredHubError::TransportError(Box::new(err))
    }
}

impl CredHubError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        CredHubError::InvalidArgument {
            message: message.into(),
        }
    }

    /// 遠端回應的 HTTP 狀態碼（僅 `RemoteError` 有）
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            CredHubError::RemoteError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// CLI 退出碼：1 輸入或配置錯誤，2 遠端錯誤，3 傳輸或解碼錯誤
    pub fn exit_code(&self) -> i32 {
        match self {
            CredHubError::RemoteError { .. } => 2,
            CredHubError::TransportError(_) | CredHubError::DeserializationError(_) => 3,
            CredHubError::InvalidArgument { .. }
            | CredHubError::SerializationError(_)
            | CredHubError::IoError(_)
            | CredHubError::ConfigError { .. }
            | CredHubError::InvalidConfigValueError { .. }
            | CredHubError::MissingConfigError { .. } => 1,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CredHubError::InvalidArgument { message } => {
                format!("Input rejected: {}", message)
            }
            CredHubError::RemoteError { status, body } => match body.as_deref() {
                Some(text) if !text.trim().is_empty() => {
                    format!("CredHub returned {}: {}", status, text.trim())
                }
                _ => format!("CredHub returned {}", status),
            },
            CredHubError::TransportError(e) => format!("Could not reach CredHub: {}", e),
            CredHubError::DeserializationError(_) => {
                "CredHub returned a body that is not valid services data".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CredHubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_only_for_remote_errors() {
        let remote = CredHubError::RemoteError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: Some("boom".to_string()),
        };
        assert_eq!(remote.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(CredHubError::invalid_argument("x").status(), None);
    }

    #[test]
    fn test_exit_code_for_input_and_config_errors() {
        assert_eq!(CredHubError::invalid_argument("null").exit_code(), 1);
        assert_eq!(
            CredHubError::MissingConfigError {
                field: "url".to_string()
            }
            .exit_code(),
            1
        );
        assert_eq!(
            CredHubError::InvalidConfigValueError {
                field: "credhub.url".to_string(),
                value: "x".to_string(),
                reason: "bad".to_string(),
            }
            .exit_code(),
            1
        );
        assert_eq!(
            CredHubError::ConfigError {
                message: "toml".to_string()
            }
            .exit_code(),
            1
        );
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert_eq!(CredHubError::from(io).exit_code(), 1);
    }

    #[test]
    fn test_exit_code_for_remote_errors() {
        for status in [StatusCode::CREATED, StatusCode::INTERNAL_SERVER_ERROR] {
            let err = CredHubError::RemoteError { status, body: None };
            assert_eq!(err.exit_code(), 2);
        }
    }

    #[test]
    fn test_exit_code_for_transport_and_decoding_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert_eq!(CredHubError::TransportError(Box::new(io)).exit_code(), 3);

        let decode = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(CredHubError::DeserializationError(decode).exit_code(), 3);
    }

    #[test]
    fn test_user_friendly_message_includes_body() {
        let remote = CredHubError::RemoteError {
            status: StatusCode::FORBIDDEN,
            body: Some("  not allowed\n".to_string()),
        };
        assert_eq!(
            remote.user_friendly_message(),
            "CredHub returned 403 Forbidden: not allowed"
        );

        let empty = CredHubError::RemoteError {
            status: StatusCode::CREATED,
            body: None,
        };
        assert_eq!(empty.user_friendly_message(), "CredHub returned 201 Created");
    }
}
