use crate::error::{Result, SdkError};
use crate::protocol::Operation;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_HOST_PLATFORM: &str = "OPS_HOST_PLATFORM";
pub const ENV_INTERFACE_TYPE: &str = "SDK_INTERFACE_TYPE";
pub const ENV_HOME_DIR: &str = "SDK_HOME_DIR";
pub const ENV_STATE_DIR: &str = "SDK_STATE_DIR";
pub const ENV_CONFIG_DIR: &str = "SDK_CONFIG_DIR";
pub const ENV_DAEMON_PORT: &str = "SDK_SPEEDLANE_PORT";
pub const ENV_DAEMON_HOST: &str = "SDK_DAEMON_HOST";

const DEFAULT_HOST_PLATFORM: &str = "unknown";
const DEFAULT_INTERFACE_TYPE: &str = "terminal";
const DEFAULT_HOME_DIR: &str = "/root";
const DEFAULT_DAEMON_HOST: &str = "127.0.0.1";

const STATE_FILE: &str = "state.json";
const CONFIG_FILE: &str = "config.json";

/// SDK configuration, built once at startup and handed to each facade
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SdkConfig {
    /// Host platform identifier (default: "unknown")
    pub host_platform: String,
    /// Interface the op is attached to, e.g. terminal or slack (default: "terminal")
    pub interface_type: String,
    /// User home directory
    pub home_dir: PathBuf,
    /// Directory holding state.json, local to one workflow run
    pub state_dir: PathBuf,
    /// Directory holding config.json, local to one op
    pub config_dir: PathBuf,
    /// Daemon host (default: 127.0.0.1)
    pub daemon_host: String,
    /// Daemon TCP port
    pub daemon_port: u16,
}

impl SdkConfig {
    /// Load the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Empty values count as unset. State dir, config dir and daemon port
    /// are required.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());
        let require = |name: &str| {
            get(name).ok_or_else(|| {
                SdkError::config(format!("{} not found in environment", name))
            })
        };

        let state_dir = PathBuf::from(require(ENV_STATE_DIR)?);
        let config_dir = PathBuf::from(require(ENV_CONFIG_DIR)?);
        let port_raw = require(ENV_DAEMON_PORT)?;
        let daemon_port = port_raw.trim().parse::<u16>().map_err(|e| {
            SdkError::config(format!(
                "{} is not a valid port ({:?}): {}",
                ENV_DAEMON_PORT, port_raw, e
            ))
        })?;

        let home_dir = get(ENV_HOME_DIR)
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HOME_DIR));

        Ok(Self {
            host_platform: get(ENV_HOST_PLATFORM)
                .unwrap_or_else(|| DEFAULT_HOST_PLATFORM.to_string()),
            interface_type: get(ENV_INTERFACE_TYPE)
                .unwrap_or_else(|| DEFAULT_INTERFACE_TYPE.to_string()),
            home_dir,
            state_dir,
            config_dir,
            daemon_host: get(ENV_DAEMON_HOST).unwrap_or_else(|| DEFAULT_DAEMON_HOST.to_string()),
            daemon_port,
        })
    }

    /// Build a configuration pointing at explicit directories and a local daemon port
    pub fn new(state_dir: impl AsRef<Path>, config_dir: impl AsRef<Path>, daemon_port: u16) -> Self {
        Self {
            host_platform: DEFAULT_HOST_PLATFORM.to_string(),
            interface_type: DEFAULT_INTERFACE_TYPE.to_string(),
            home_dir: dirs::home_dir().unwrap_or_else(|| PathBuf::from(DEFAULT_HOME_DIR)),
            state_dir: state_dir.as_ref().to_path_buf(),
            config_dir: config_dir.as_ref().to_path_buf(),
            daemon_host: DEFAULT_DAEMON_HOST.to_string(),
            daemon_port,
        }
    }

    /// Path to the workflow state file
    pub fn state_file(&self) -> PathBuf {
        self.state_dir.join(STATE_FILE)
    }

    /// Path to the op config file
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    pub fn daemon_base_url(&self) -> String {
        format!("http://{}:{}", self.daemon_host, self.daemon_port)
    }

    /// Full URL of the daemon endpoint serving `operation`
    pub fn endpoint(&self, operation: Operation) -> String {
        format!("{}/{}", self.daemon_base_url(), operation.path())
    }
}
