// Error types
pub mod error;
pub use error::{ErrorCode, Result, SdkError};

// Configuration
pub mod types;
pub use types::SdkConfig;

// Daemon protocol
pub mod protocol;
pub use protocol::{
    GetSecretBody, Operation, ProgressBarAdvanceBody, ProgressBarStartBody, SetSecretBody,
    TextBody,
};
