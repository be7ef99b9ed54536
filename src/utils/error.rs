use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("API request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("API responded with status {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Partner not found: {id}")]
    NotFound { id: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Lead validation failed: {}", format_field_errors(.errors))]
    ValidationError { errors: BTreeMap<String, String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Api,
    Configuration,
    Validation,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ClientError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::TransportError(_) => ErrorCategory::Network,
            ClientError::ApiError { .. } | ClientError::NotFound { .. } => ErrorCategory::Api,
            ClientError::ConfigError { .. }
            | ClientError::InvalidConfigValueError { .. }
            | ClientError::UrlError(_) => ErrorCategory::Configuration,
            ClientError::ValidationError { .. } => ErrorCategory::Validation,
            ClientError::IoError(_) | ClientError::SerializationError(_) => {
                ErrorCategory::Internal
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Api => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    /// Message shown in the error panel in place of the raw error chain.
    pub fn user_friendly_message(&self) -> String {
        match self {
            ClientError::TransportError(_) => "Unable to reach the Pixisphere API".to_string(),
            ClientError::ApiError { message, .. } => format!("Server Error: {}", message),
            ClientError::NotFound { id } => format!("No partner found with id {}", id),
            ClientError::ValidationError { errors } => format_field_errors(errors),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your connection and try again",
            ErrorCategory::Api => "Try again later or adjust the search filters",
            ErrorCategory::Configuration => "Check --api-base and the TOML config file",
            ErrorCategory::Validation => "Fix the highlighted fields and resubmit",
            ErrorCategory::Internal => "Re-run with --verbose and report the output",
        }
    }

    /// 取得單一欄位的驗證錯誤訊息
    pub fn field_error(&self, field: &str) -> Option<&str> {
        match self {
            ClientError::ValidationError { errors } => errors.get(field).map(String::as_str),
            _ => None,
        }
    }
}

fn format_field_errors(errors: &BTreeMap<String, String>) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{}: {}", field, message))
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_fields() {
        let mut errors = BTreeMap::new();
        errors.insert("budgetMax".to_string(), "Maximum budget is required".to_string());
        errors.insert("message".to_string(), "Message is required".to_string());
        let err = ClientError::ValidationError { errors };

        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.field_error("message"), Some("Message is required"));
        assert_eq!(
            err.user_friendly_message(),
            "budgetMax: Maximum budget is required; message: Message is required"
        );
    }

    #[test]
    fn test_api_error_is_retryable_severity() {
        let err = ClientError::ApiError {
            status: 502,
            message: "Bad gateway".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Api);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.user_friendly_message(), "Server Error: Bad gateway");
    }
}
