use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Trace fetch failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid trace: {message}")]
    TraceError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Audit processing error: {message}")]
    ProcessingError { message: String },
}

/// 錯誤嚴重程度，決定 CLI 退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Trace,
    Config,
    Output,
    System,
}

impl AuditError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AuditError::HttpError(_) => ErrorSeverity::Medium,
            AuditError::TraceError { .. }
            | AuditError::ProcessingError { .. }
            | AuditError::SerializationError(_)
            | AuditError::CsvError(_) => ErrorSeverity::High,
            AuditError::ConfigError { .. }
            | AuditError::ConfigValidationError { .. }
            | AuditError::InvalidConfigValueError { .. }
            | AuditError::MissingConfigError { .. } => ErrorSeverity::High,
            AuditError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AuditError::HttpError(_) => ErrorCategory::Network,
            AuditError::TraceError { .. } | AuditError::ProcessingError { .. } => {
                ErrorCategory::Trace
            }
            AuditError::ConfigError { .. }
            | AuditError::ConfigValidationError { .. }
            | AuditError::InvalidConfigValueError { .. }
            | AuditError::MissingConfigError { .. } => ErrorCategory::Config,
            AuditError::SerializationError(_) | AuditError::CsvError(_) => ErrorCategory::Output,
            AuditError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AuditError::HttpError(_) => {
                "Could not fetch the trace from the configured endpoint".to_string()
            }
            AuditError::TraceError { message } => format!("The trace could not be used: {}", message),
            AuditError::ConfigError { message } => format!("Configuration problem: {}", message),
            AuditError::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            AuditError::InvalidConfigValueError { field, value, reason } => {
                format!("'{}' is not a valid value for {}: {}", value, field, reason)
            }
            AuditError::MissingConfigError { field } => {
                format!("Required configuration '{}' is missing", field)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self.category() {
            ErrorCategory::Network => {
                "Check that the trace endpoint is reachable and returns JSON".to_string()
            }
            ErrorCategory::Trace => {
                "Record the trace with the 'devtools.timeline' category enabled and retry"
                    .to_string()
            }
            ErrorCategory::Config => {
                "Review the CLI flags or TOML file against the documented options".to_string()
            }
            ErrorCategory::Output => {
                "Verify the output path is writable and the formats list is valid".to_string()
            }
            ErrorCategory::System => "Check file permissions and available disk space".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuditError>;
