use thiserror::Error;

/// Result alias used throughout the SDK
pub type Result<T> = std::result::Result<T, SdkError>;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ErrorCode {
    #[error("E001: Configuration missing or invalid")]
    E001,
    #[error("E002: Daemon unreachable")]
    E002,
    #[error("E003: Daemon returned a failure status")]
    E003,
    #[error("E004: Daemon response is not a JSON object")]
    E004,
    #[error("E005: Daemon response missing expected field")]
    E005,
    #[error("E006: Key-value store I/O failed")]
    E006,
    #[error("E007: Key-value store file is corrupt")]
    E007,
    #[error("E008: Request body could not be serialized")]
    E008,
}

impl ErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
            ErrorCode::E005 => "E005",
            ErrorCode::E006 => "E006",
            ErrorCode::E007 => "E007",
            ErrorCode::E008 => "E008",
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct SdkError {
    pub code: ErrorCode,
    pub message: String,
}

impl SdkError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Required configuration value is absent or unusable
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::E001, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::E002, message)
    }

    pub fn status(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::E003, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::E004, message)
    }

    pub fn missing_field(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::E005, message)
    }

    pub fn store_io(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::E006, message)
    }

    pub fn store_corrupt(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::E007, message)
    }

    pub fn serialize(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::E008, message)
    }

    /// True for failures that happened before the daemon produced a usable answer
    pub fn is_transport(&self) -> bool {
        matches!(self.code, ErrorCode::E002 | ErrorCode::E003)
    }
}
