pub mod env;

use alloy_primitives::Address;
use clap::ValueEnum;
use env::EnvFile;
use tracing::info;

pub use config::{Config, Task};

/// Output format for `show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Toml,
}

/// Resolve the configuration once from the process environment and `env_file`.
pub fn load_config(env_file: &EnvFile) -> eyre::Result<Config> {
    let env = env::load_environment(env_file)?;
    let config = config::resolve(&env);

    info!(
        networks = config.networks.len(),
        compiler = %config.compiler.version,
        "Resolved configuration"
    );

    Ok(config)
}

/// Render the configuration, masking secrets unless `reveal` is set.
pub fn render(config: &Config, format: Format, reveal: bool) -> eyre::Result<String> {
    let shown = if reveal {
        config.clone()
    } else {
        config.redacted()
    };

    let out = match format {
        Format::Json => serde_json::to_string_pretty(&shown)?,
        Format::Toml => toml::to_string_pretty(&shown)?,
    };

    Ok(out)
}

/// Check that `task` can run against `network` without running it.
pub fn check(config: &Config, task: Task, network: Option<&str>) -> eyre::Result<()> {
    config.preflight(task, network)?;

    info!(task = %task, network = network.unwrap_or("-"), "Preflight passed");
    Ok(())
}

/// Addresses of the signers configured for `network`.
pub fn accounts(config: &Config, network: &str) -> eyre::Result<Vec<Address>> {
    let profile = config.network(network)?;
    let addresses = client::signer_addresses(profile)?;

    Ok(addresses)
}

/// Connect to `network` and return the chain id its endpoint reports.
pub async fn ping(config: &Config, network: &str) -> eyre::Result<u64> {
    let profile = config.network(network)?;

    info!(network, "Connecting...");
    let chain_id = client::check_chain_id(profile).await?;

    Ok(chain_id)
}
