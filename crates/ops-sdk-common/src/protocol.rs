use serde::{Deserialize, Serialize};

/// Daemon operations reachable over HTTP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Print text to the output interface
    Print,
    /// Start a spinner
    SpinnerStart,
    /// Stop the running spinner
    SpinnerStop,
    /// Show a progress bar
    ProgressBarStart,
    /// Fill more of the progress bar
    ProgressBarAdvance,
    /// Complete the progress bar
    ProgressBarStop,
    /// Read a secret from the secret store
    SecretGet,
    /// Write a secret into the secret store
    SecretSet,
    /// Record an analytics event
    Track,
}

impl Operation {
    /// Endpoint path relative to the daemon base URL
    pub fn path(&self) -> &'static str {
        match self {
            Operation::Print => "print",
            Operation::SpinnerStart => "start-spinner",
            Operation::SpinnerStop => "stop-spinner",
            Operation::ProgressBarStart => "progress-bar/start",
            Operation::ProgressBarAdvance => "progress-bar/advance",
            Operation::ProgressBarStop => "progress-bar/stop",
            Operation::SecretGet => "secret/get",
            Operation::SecretSet => "secret/set",
            Operation::Track => "track",
        }
    }
}

/// Body for print, spinner start/stop and progress bar stop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextBody {
    pub text: String,
}

impl TextBody {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressBarStartBody {
    /// Total units of the bar
    pub length: u64,
    /// Units already filled when the bar appears
    pub initial: u64,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressBarAdvanceBody {
    pub increment: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GetSecretBody {
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SetSecretBody {
    pub key: String,
    pub value: String,
}
