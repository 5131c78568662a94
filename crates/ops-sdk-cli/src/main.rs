use anyhow::Result;
use clap::Parser;
use commands::Commands;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

mod client;
mod commands;

/// Ops CLI - talks to the ops daemon and the local state/config files
#[derive(Parser, Debug)]
#[command(name = "ops")]
#[command(author = "Ops SDK Team")]
#[command(version = "0.1.0")]
#[command(about = "Command line front end for the ops SDK", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    // Logs go to stderr so command output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!("Running {:?}", cli.command);

    cli.command.execute()
}

/// Filter from the `RUST_LOG` value, `warn` when unset or empty
fn log_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_defaults_to_warn() {
        assert_eq!(log_filter(None).to_string(), "warn");
        assert_eq!(log_filter(Some("")).to_string(), "warn");
    }

    #[test]
    fn test_log_filter_honors_rust_log_level() {
        assert_eq!(log_filter(Some("debug")).to_string(), "debug");
    }

    #[test]
    fn test_log_filter_keeps_target_directives() {
        let rendered = log_filter(Some("ops_sdk=trace")).to_string();
        assert!(rendered.contains("ops_sdk=trace"), "got {}", rendered);
    }
}
