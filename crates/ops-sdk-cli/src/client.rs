use anyhow::{Context, Result};
use ops_sdk::{Sdk, SdkConfig, Ux};

/// Load the SDK configuration from the environment
pub fn load_config() -> Result<SdkConfig> {
    SdkConfig::from_env().context("Ops SDK environment is incomplete")
}

/// Build the state/secret/telemetry facade
pub fn sdk() -> Result<Sdk> {
    Ok(Sdk::new(load_config()?))
}

/// Build the presentation facade
pub fn ux() -> Result<Ux> {
    Ok(Ux::new(&load_config()?))
}
