//! Error handling for the speed tester

use thiserror::Error;

/// Custom error types for the speed tester
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Parsing errors (URLs, numbers, etc.)
    #[error("Parsing error: {0}")]
    Parse(String),

    /// HTTP client construction / connectivity errors
    #[error("Network error: {0}")]
    Network(String),

    /// Failures during the upload measurement pass
    #[error("Upload test failed: {0}")]
    Upload(String),

    /// Failures during the download measurement pass
    #[error("Download test failed: {0}")]
    Download(String),

    /// I/O errors (stdout, etc.)
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Create a new parsing error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network(message.into())
    }

    /// Create a new upload-pass error
    pub fn upload<S: Into<String>>(message: S) -> Self {
        Self::Upload(message.into())
    }

    /// Create a new download-pass error
    pub fn download<S: Into<String>>(message: S) -> Self {
        Self::Download(message.into())
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG",
            Self::Validation(_) => "VALIDATION",
            Self::Parse(_) => "PARSE",
            Self::Network(_) => "NETWORK",
            Self::Upload(_) => "UPLOAD",
            Self::Download(_) => "DOWNLOAD",
            Self::Io(_) => "IO",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Check if the failure happened inside a measurement pass
    pub fn is_pass_failure(&self) -> bool {
        matches!(self, Self::Upload(_) | Self::Download(_))
    }

    /// Get exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Validation(_) | Self::Parse(_) => 1, // Invalid configuration/usage
            Self::Network(_) => 2,  // Client construction / connectivity
            Self::Upload(_) => 3,   // Upload pass failed
            Self::Download(_) => 4, // Download pass failed
            Self::Io(_) => 5,       // I/O issues
            Self::Internal(_) => 99, // Internal/unexpected errors
        }
    }

    /// Format error for console display with color coding
    pub fn format_for_console(&self, use_color: bool) -> String {
        let category = self.category();
        let message = self.to_string();

        if use_color {
            use colored::Colorize;
            match self {
                Self::Config(_) | Self::Validation(_) | Self::Parse(_) => {
                    format!("[{}] {}", category.red().bold(), message.red())
                }
                Self::Network(_) => {
                    format!("[{}] {}", category.yellow().bold(), message.yellow())
                }
                Self::Upload(_) | Self::Download(_) => {
                    format!("[{}] {}", category.yellow().bold(), message.yellow())
                }
                Self::Io(_) => {
                    format!("[{}] {}", category.cyan().bold(), message.cyan())
                }
                Self::Internal(_) => {
                    format!("[{}] {}", category.bright_red().bold(), message.bright_red())
                }
            }
        } else {
            format!("[{}] {}", category, message)
        }
    }
}

// Standard library and ecosystem error conversions
impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(error: url::ParseError) -> Self {
        Self::parse(format!("URL parse error: {}", error))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::parse(format!("JSON error: {}", error))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::internal(error.to_string())
    }
}

/// Result type alias using our custom error
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(AppError::config("x").category(), "CONFIG");
        assert_eq!(AppError::upload("x").category(), "UPLOAD");
        assert_eq!(AppError::download("x").category(), "DOWNLOAD");
        assert_eq!(AppError::network("x").category(), "NETWORK");
    }

    #[test]
    fn test_pass_failure_detection() {
        assert!(AppError::upload("boom").is_pass_failure());
        assert!(AppError::download("boom").is_pass_failure());
        assert!(!AppError::config("boom").is_pass_failure());
        assert!(!AppError::network("boom").is_pass_failure());
    }

    #[test]
    fn test_exit_codes_are_distinct_per_pass() {
        assert_ne!(
            AppError::upload("x").exit_code(),
            AppError::download("x").exit_code()
        );
        assert_eq!(AppError::internal("x").exit_code(), 99);
    }

    #[test]
    fn test_error_display_names_the_pass() {
        let err = AppError::upload("connection reset");
        assert!(err.to_string().contains("Upload test failed"));
        let err = AppError::download("connection reset");
        assert!(err.to_string().contains("Download test failed"));
    }

    #[test]
    fn test_plain_console_format() {
        let err = AppError::validation("payload size must be greater than 0");
        let formatted = err.format_for_console(false);
        assert!(formatted.starts_with("[VALIDATION]"));
        assert!(formatted.contains("payload size"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let app_error: AppError = io_error.into();
        assert_eq!(app_error.category(), "IO");
    }

    #[test]
    fn test_anyhow_integration() {
        let anyhow_error = anyhow::anyhow!("unexpected state");
        let app_error: AppError = anyhow_error.into();
        assert_eq!(app_error.category(), "INTERNAL");
    }
}
