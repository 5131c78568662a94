// ops-sdk/src/sdk.rs
// State, config, secret and telemetry operations
use crate::client::DaemonClient;
use crate::store::KeyValueStore;
use ops_sdk_common::{GetSecretBody, Operation, Result, SdkConfig, SdkError, SetSecretBody};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::warn;

/// Entry point for everything an op needs besides presentation
#[derive(Debug, Clone)]
pub struct Sdk {
    config: SdkConfig,
    client: DaemonClient,
}

impl Sdk {
    pub fn new(config: SdkConfig) -> Self {
        let client = DaemonClient::new(&config);
        Self { config, client }
    }

    /// Build from the process environment, failing if a required variable is missing
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(SdkConfig::from_env()?))
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    /// Host platform identifier from `OPS_HOST_PLATFORM`
    pub fn host_os(&self) -> &str {
        &self.config.host_platform
    }

    /// Interface the op is attached to (terminal, slack, ...)
    pub fn interface_type(&self) -> &str {
        &self.config.interface_type
    }

    pub fn home_dir(&self) -> &Path {
        &self.config.home_dir
    }

    /// State directory, local to this workflow
    pub fn state_path(&self) -> &Path {
        &self.config.state_dir
    }

    /// Config directory, local to this op
    pub fn config_path(&self) -> &Path {
        &self.config.config_dir
    }

    pub fn get_state(&self, key: &str) -> Result<Option<Value>> {
        self.state_store().get(key)
    }

    pub fn set_state(&self, key: &str, value: impl Into<Value>) -> Result<()> {
        self.state_store().set(key, value)
    }

    pub fn get_config(&self, key: &str) -> Result<Option<Value>> {
        self.config_store().get(key)
    }

    pub fn set_config(&self, key: &str, value: impl Into<Value>) -> Result<()> {
        self.config_store().set(key, value)
    }

    /// Request a secret by key.
    ///
    /// The daemon tells the user the secret is in use, or prompts for it when
    /// the store has no value.
    pub fn get_secret(&self, key: &str) -> Result<String> {
        let body = self.client.async_request(
            Operation::SecretGet,
            &GetSecretBody {
                key: key.to_string(),
            },
        )?;

        match body.get(key) {
            Some(Value::String(value)) => Ok(value.clone()),
            Some(other) => Err(SdkError::missing_field(format!(
                "{} response value for key {} is not a string: {}",
                Operation::SecretGet.path(),
                key,
                other
            ))),
            None => Err(SdkError::missing_field(format!(
                "{} response should include key {}",
                Operation::SecretGet.path(),
                key
            ))),
        }
    }

    /// Store a secret. The daemon asks before overwriting an existing one.
    ///
    /// Returns the key the daemon confirms it stored.
    pub fn set_secret(&self, key: &str, value: &str) -> Result<String> {
        let body = self.client.async_request(
            Operation::SecretSet,
            &SetSecretBody {
                key: key.to_string(),
                value: value.to_string(),
            },
        )?;

        match body.get("key") {
            Some(Value::String(stored)) => Ok(stored.clone()),
            _ => Err(SdkError::missing_field(format!(
                "Secret set of {} failed",
                key
            ))),
        }
    }

    /// Send an analytics event.
    ///
    /// Tags, event name and metadata are flattened into one body; metadata
    /// keys are applied last. Delivery failures are logged and dropped.
    pub fn track<I, S>(&self, tags: I, event: &str, metadata: Map<String, Value>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: Vec<Value> = tags.into_iter().map(|tag| Value::String(tag.into())).collect();

        let mut body = Map::new();
        body.insert("tags".to_string(), Value::Array(tags));
        body.insert("event".to_string(), Value::String(event.to_string()));
        body.extend(metadata);

        if let Err(e) = self.client.simple_request(Operation::Track, &body) {
            warn!("Dropped tracking event {}: {}", event, e);
        }
    }

    fn state_store(&self) -> KeyValueStore {
        KeyValueStore::new(self.config.state_file())
    }

    fn config_store(&self) -> KeyValueStore {
        KeyValueStore::new(self.config.config_file())
    }
}
