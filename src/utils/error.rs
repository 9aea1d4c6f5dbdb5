use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("HTTP client error: {0}")]
    ClientError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ContentError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContentError::ClientError(_) => ErrorCategory::Network,
            ContentError::UrlError(_)
            | ContentError::ConfigError { .. }
            | ContentError::ConfigValidationError { .. }
            | ContentError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ContentError::SerializationError(_) => ErrorCategory::Data,
            ContentError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ContentError::ClientError(_) => "Could not reach the content backend".to_string(),
            ContentError::IoError(e) => format!("File system error: {}", e),
            ContentError::SerializationError(_) => {
                "Could not serialize the page content".to_string()
            }
            ContentError::UrlError(e) => format!("Invalid URL in configuration: {}", e),
            ContentError::ConfigError { message } => format!("Configuration problem: {}", message),
            ContentError::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            ContentError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check that the backend base URL is reachable",
            ErrorCategory::Configuration => "Review the TOML file and command line flags",
            ErrorCategory::Data => "Inspect the backend response for unexpected values",
            ErrorCategory::System => "Check file permissions and free disk space for the output path",
        }
    }
}

/// 單一端點請求失敗的診斷資訊，只寫入日誌，不會出現在頁面上。
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{url} returned a body that is not valid JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot build endpoint URL from '{path}': {source}")]
    InvalidUrl {
        path: String,
        #[source]
        source: url::ParseError,
    },
}

impl FetchError {
    pub(crate) fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Transport {
                url: url.to_string(),
                source,
            }
        }
    }
}

/// 單筆後端紀錄無法轉換的原因。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordRejection {
    #[error("record is not a JSON object")]
    NotAnObject,

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' has the wrong type, expected {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("image URL '{0}' is not an absolute http(s) URL")]
    InvalidImageUrl(String),

    #[error("image host '{0}' is not allowed")]
    DisallowedImageHost(String),
}

pub type Result<T> = std::result::Result<T, ContentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_errors_are_high_severity() {
        let err = ContentError::InvalidConfigValueError {
            field: "backend.base_url".to_string(),
            value: "cms".to_string(),
            reason: "Invalid URL format".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("backend.base_url"));
    }

    #[test]
    fn test_output_write_failure_is_critical() {
        let err = ContentError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only build directory",
        ));
        assert_eq!(err.category(), ErrorCategory::System);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_fetch_error_messages_name_the_endpoint() {
        let err = FetchError::Status {
            url: "http://backend/api/hero-slides".to_string(),
            status: 500,
        };
        assert_eq!(
            err.to_string(),
            "http://backend/api/hero-slides responded with HTTP 500"
        );
    }
}
