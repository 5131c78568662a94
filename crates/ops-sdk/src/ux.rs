// ops-sdk/src/ux.rs
// Presentation commands forwarded to the daemon
use crate::client::DaemonClient;
use ops_sdk_common::{
    Operation, ProgressBarAdvanceBody, ProgressBarStartBody, Result, SdkConfig, TextBody,
};

/// Print, spinner and progress bar on the output interface (terminal or slack).
///
/// The daemon owns what is on screen; nothing about spinner or progress bar
/// phase is tracked here.
#[derive(Debug, Clone)]
pub struct Ux {
    client: DaemonClient,
}

impl Ux {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: DaemonClient::new(config),
        }
    }

    pub fn print(&self, text: &str) -> Result<()> {
        self.client
            .simple_request(Operation::Print, &TextBody::new(text))
    }

    /// Show a spinner with `text` until `spinner_stop` is called
    pub fn spinner_start(&self, text: &str) -> Result<()> {
        self.client
            .simple_request(Operation::SpinnerStart, &TextBody::new(text))
    }

    pub fn spinner_stop(&self, text: &str) -> Result<()> {
        self.client
            .simple_request(Operation::SpinnerStop, &TextBody::new(text))
    }

    /// Show a progress bar of `length` units with `initial` units already filled
    pub fn progress_bar_start(&self, length: u64, initial: u64, text: &str) -> Result<()> {
        self.client.simple_request(
            Operation::ProgressBarStart,
            &ProgressBarStartBody {
                length,
                initial,
                text: text.to_string(),
            },
        )
    }

    pub fn progress_bar_advance(&self, increment: u64) -> Result<()> {
        self.client.simple_request(
            Operation::ProgressBarAdvance,
            &ProgressBarAdvanceBody { increment },
        )
    }

    /// Complete the progress bar, replacing its text
    pub fn progress_bar_stop(&self, text: &str) -> Result<()> {
        self.client
            .simple_request(Operation::ProgressBarStop, &TextBody::new(text))
    }
}
