use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde_json::{Map, Value};

use crate::client;

/// Ops CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print text on the output interface
    Print(PrintArgs),
    /// Spinner commands
    Spinner(SpinnerArgs),
    /// Progress bar commands
    Progress(ProgressArgs),
    /// Read or write workflow state
    State(KeyValueArgs),
    /// Read or write op config
    Config(KeyValueArgs),
    /// Read or write secrets through the daemon
    Secret(SecretArgs),
    /// Send an analytics event
    Track(TrackArgs),
    /// Show the environment the SDK was configured with
    Info,
}

impl Commands {
    pub fn execute(self) -> Result<()> {
        match self {
            Commands::Print(args) => cmd_print(args),
            Commands::Spinner(args) => cmd_spinner(args),
            Commands::Progress(args) => cmd_progress(args),
            Commands::State(args) => cmd_state(args),
            Commands::Config(args) => cmd_config(args),
            Commands::Secret(args) => cmd_secret(args),
            Commands::Track(args) => cmd_track(args),
            Commands::Info => cmd_info(),
        }
    }
}

/// Arguments for the `print` command
#[derive(Debug, Args)]
pub struct PrintArgs {
    /// Text to print
    pub text: String,
}

/// Arguments for the `spinner` command
#[derive(Debug, Args)]
pub struct SpinnerArgs {
    #[clap(subcommand)]
    pub subcommand: SpinnerSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum SpinnerSubcommand {
    /// Start a spinner
    Start { text: String },
    /// Stop the spinner
    Stop { text: String },
}

/// Arguments for the `progress` command
#[derive(Debug, Args)]
pub struct ProgressArgs {
    #[clap(subcommand)]
    pub subcommand: ProgressSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum ProgressSubcommand {
    /// Show a progress bar
    Start {
        /// Total units of the bar
        #[clap(long)]
        length: u64,
        /// Units filled at the start
        #[clap(long, default_value_t = 0)]
        initial: u64,
        text: String,
    },
    /// Fill more of the bar
    Advance {
        #[clap(default_value_t = 1)]
        increment: u64,
    },
    /// Complete the bar
    Stop { text: String },
}

/// Arguments for the `state` and `config` commands
#[derive(Debug, Args)]
pub struct KeyValueArgs {
    #[clap(subcommand)]
    pub subcommand: KeyValueSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum KeyValueSubcommand {
    /// Print the value stored under KEY, or null
    Get { key: String },
    /// Store VALUE under KEY (parsed as JSON, otherwise kept as a string)
    Set { key: String, value: String },
}

/// Arguments for the `secret` command
#[derive(Debug, Args)]
pub struct SecretArgs {
    #[clap(subcommand)]
    pub subcommand: SecretSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum SecretSubcommand {
    /// Fetch a secret
    Get { key: String },
    /// Store a secret
    Set { key: String, value: String },
}

/// Arguments for the `track` command
#[derive(Debug, Args)]
pub struct TrackArgs {
    /// Event name
    pub event: String,

    /// Tag attached to the event (repeatable)
    #[clap(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Extra metadata as key=value (repeatable)
    #[clap(long = "meta", value_name = "KEY=VALUE")]
    pub meta: Vec<String>,
}

pub fn cmd_print(args: PrintArgs) -> Result<()> {
    client::ux()?.print(&args.text).context("print failed")
}

pub fn cmd_spinner(args: SpinnerArgs) -> Result<()> {
    let ux = client::ux()?;
    let result = match args.subcommand {
        SpinnerSubcommand::Start { text } => ux.spinner_start(&text),
        SpinnerSubcommand::Stop { text } => ux.spinner_stop(&text),
    };
    result.context("spinner command failed")
}

pub fn cmd_progress(args: ProgressArgs) -> Result<()> {
    let ux = client::ux()?;
    let result = match args.subcommand {
        ProgressSubcommand::Start {
            length,
            initial,
            text,
        } => ux.progress_bar_start(length, initial, &text),
        ProgressSubcommand::Advance { increment } => ux.progress_bar_advance(increment),
        ProgressSubcommand::Stop { text } => ux.progress_bar_stop(&text),
    };
    result.context("progress bar command failed")
}

pub fn cmd_state(args: KeyValueArgs) -> Result<()> {
    let sdk = client::sdk()?;
    match args.subcommand {
        KeyValueSubcommand::Get { key } => {
            let value = sdk.get_state(&key).context("Failed to read state")?;
            println!("{}", value.unwrap_or(Value::Null));
        }
        KeyValueSubcommand::Set { key, value } => {
            sdk.set_state(&key, parse_value(&value))
                .context("Failed to write state")?;
        }
    }
    Ok(())
}

pub fn cmd_config(args: KeyValueArgs) -> Result<()> {
    let sdk = client::sdk()?;
    match args.subcommand {
        KeyValueSubcommand::Get { key } => {
            let value = sdk.get_config(&key).context("Failed to read config")?;
            println!("{}", value.unwrap_or(Value::Null));
        }
        KeyValueSubcommand::Set { key, value } => {
            sdk.set_config(&key, parse_value(&value))
                .context("Failed to write config")?;
        }
    }
    Ok(())
}

pub fn cmd_secret(args: SecretArgs) -> Result<()> {
    let sdk = client::sdk()?;
    match args.subcommand {
        SecretSubcommand::Get { key } => {
            let value = sdk
                .get_secret(&key)
                .with_context(|| format!("Failed to get secret {}", key))?;
            println!("{}", value);
        }
        SecretSubcommand::Set { key, value } => {
            let stored = sdk
                .set_secret(&key, &value)
                .with_context(|| format!("Failed to set secret {}", key))?;
            println!("{}", stored);
        }
    }
    Ok(())
}

pub fn cmd_track(args: TrackArgs) -> Result<()> {
    let metadata = parse_metadata(&args.meta)?;
    client::sdk()?.track(args.tags, &args.event, metadata);
    Ok(())
}

pub fn cmd_info() -> Result<()> {
    let config = client::load_config()?;
    let info = serde_json::json!({
        "host_platform": &config.host_platform,
        "interface_type": &config.interface_type,
        "home_dir": &config.home_dir,
        "state_dir": &config.state_dir,
        "config_dir": &config.config_dir,
        "daemon": config.daemon_base_url(),
    });
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

/// Parse a command line value as JSON, keeping it as a plain string otherwise
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Turn `key=value` pairs into a metadata object
pub fn parse_metadata(pairs: &[String]) -> Result<Map<String, Value>> {
    let mut metadata = Map::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("Invalid metadata {:?}: expected KEY=VALUE", pair))?;
        if key.is_empty() {
            anyhow::bail!("Invalid metadata {:?}: key is empty", pair);
        }
        metadata.insert(key.to_string(), parse_value(value));
    }
    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_value_json() {
        assert_eq!(parse_value("42"), json!(42));
        assert_eq!(parse_value("true"), json!(true));
        assert_eq!(parse_value(r#"{"a":[1]}"#), json!({"a": [1]}));
        assert_eq!(parse_value(r#""quoted""#), json!("quoted"));
    }

    #[test]
    fn test_parse_value_falls_back_to_string() {
        assert_eq!(parse_value("us-east-1"), json!("us-east-1"));
        assert_eq!(parse_value(""), json!(""));
    }

    #[test]
    fn test_parse_metadata() {
        let pairs = vec!["user=name".to_string(), "count=3".to_string(), "expr=a=b".to_string()];
        let metadata = parse_metadata(&pairs).unwrap();
        assert_eq!(metadata["user"], json!("name"));
        assert_eq!(metadata["count"], json!(3));
        assert_eq!(metadata["expr"], json!("a=b"));
    }

    #[test]
    fn test_parse_metadata_rejects_bad_pairs() {
        assert!(parse_metadata(&["novalue".to_string()]).is_err());
        assert!(parse_metadata(&["=value".to_string()]).is_err());
    }

    #[test]
    fn test_cli_parses_progress_start() {
        use clap::Parser;

        #[derive(Parser, Debug)]
        struct TestCli {
            #[command(subcommand)]
            command: Commands,
        }

        let cli = TestCli::try_parse_from([
            "ops", "progress", "start", "--length", "5", "--initial", "1", "Downloading",
        ])
        .unwrap();
        match cli.command {
            Commands::Progress(ProgressArgs {
                subcommand:
                    ProgressSubcommand::Start {
                        length,
                        initial,
                        text,
                    },
            }) => {
                assert_eq!(length, 5);
                assert_eq!(initial, 1);
                assert_eq!(text, "Downloading");
            }
            other => panic!("Expected progress start, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_parses_track_flags() {
        use clap::Parser;

        #[derive(Parser, Debug)]
        struct TestCli {
            #[command(subcommand)]
            command: Commands,
        }

        let cli = TestCli::try_parse_from([
            "ops", "track", "deployed", "--tag", "sdk", "--tag", "rust", "--meta", "x=1",
        ])
        .unwrap();
        match cli.command {
            Commands::Track(args) => {
                assert_eq!(args.event, "deployed");
                assert_eq!(args.tags, vec!["sdk", "rust"]);
                assert_eq!(args.meta, vec!["x=1"]);
            }
            other => panic!("Expected track, got {:?}", other),
        }
    }
}
