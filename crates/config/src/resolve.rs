//! Resolution of an environment snapshot into a typed [`Config`].

use crate::{
    Accounts, CompilerSettings, ConfigError, Environment, ExplorerCredentials, NetworkProfile,
    PathLayout, NETWORKS,
};
use serde::Serialize;
use std::{collections::BTreeMap, fmt, str::FromStr};
use tracing::{debug, warn};

/// Placeholder written over secrets by [`Config::redacted`].
pub const REDACTED: &str = "<redacted>";

/// Fully resolved toolchain configuration.
///
/// Built once at startup and handed by reference to whatever needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub networks: BTreeMap<String, NetworkProfile>,
    pub etherscan_like_api_keys: ExplorerCredentials,
    pub compiler: CompilerSettings,
    pub paths: PathLayout,
}

/// Toolchain task whose configuration requirements can be checked up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    Compile,
    Deploy,
    Verify,
}

impl Task {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Compile => "compile",
            Self::Deploy => "deploy",
            Self::Verify => "verify",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Task {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compile" => Ok(Self::Compile),
            "deploy" => Ok(Self::Deploy),
            "verify" => Ok(Self::Verify),
            other => Err(format!("unknown task: {other}")),
        }
    }
}

/// Resolve `env` into a [`Config`].
///
/// Never fails: absent secrets become unset fields (or `""` for explorer
/// keys) and are only checked by the operation that needs them.
pub fn resolve(env: &Environment) -> Config {
    let networks = NETWORKS
        .iter()
        .map(|def| (def.name.to_string(), NetworkProfile::from_env(def, env)))
        .collect::<BTreeMap<_, _>>();

    for (name, profile) in &networks {
        debug!(
            network = %name,
            url_set = profile.url.is_some(),
            signer_set = profile.accounts.is_usable(),
            "Resolved network profile"
        );
    }

    Config {
        networks,
        etherscan_like_api_keys: ExplorerCredentials::from_env(env),
        compiler: CompilerSettings::default(),
        paths: PathLayout::default(),
    }
}

impl Config {
    /// Same as [`resolve`].
    pub fn resolve(env: &Environment) -> Self {
        resolve(env)
    }

    /// Profile for `name`.
    pub fn network(&self, name: &str) -> Result<&NetworkProfile, ConfigError> {
        self.networks
            .get(name)
            .ok_or_else(|| ConfigError::UnknownNetwork(name.to_string()))
    }

    /// Explorer API key for contracts deployed on `network`.
    ///
    /// The explorer is chosen by chain id, never by falling back to another
    /// network's key.
    pub fn verification_key(&self, network: &str) -> Result<&str, ConfigError> {
        let profile = self.network(network)?;
        let explorer = profile
            .chain_id
            .and_then(|id| self.etherscan_like_api_keys.explorer_for_chain(id))
            .ok_or_else(|| ConfigError::NoExplorer {
                network: network.to_string(),
            })?;

        self.etherscan_like_api_keys.api_key(explorer)
    }

    /// Check that everything `task` needs on `network` is configured.
    pub fn preflight(&self, task: Task, network: Option<&str>) -> Result<(), ConfigError> {
        if task == Task::Compile {
            return Ok(());
        }

        let name = network.ok_or(ConfigError::NetworkRequired { task })?;
        let profile = self.network(name)?;
        profile.require_url()?;

        match task {
            Task::Deploy => {
                profile.require_accounts()?;
            }
            Task::Verify => {
                self.verification_key(name)?;
            }
            Task::Compile => {}
        }

        Ok(())
    }

    /// Copy with mnemonics, private keys and explorer keys masked.
    ///
    /// Unset values stay unset so the output still shows what is missing.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        for profile in config.networks.values_mut() {
            match &mut profile.accounts {
                Accounts::Hd(hd) => {
                    if let Some(mnemonic) = hd.mnemonic.as_mut() {
                        *mnemonic = REDACTED.to_string();
                    }
                }
                Accounts::PrivateKeys(keys) => {
                    for key in keys.iter_mut() {
                        *key = REDACTED.to_string();
                    }
                }
            }
        }
        config.etherscan_like_api_keys = config.etherscan_like_api_keys.masked(REDACTED);
        config
    }
}

/// Builder for configurations that need overrides on top of the environment.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Start from the resolved environment.
    pub fn from_env(env: &Environment) -> Self {
        Self {
            config: resolve(env),
        }
    }

    /// Override the account source of `network`.
    pub fn accounts(mut self, network: &str, accounts: Accounts) -> Self {
        match self.config.networks.get_mut(network) {
            Some(profile) => profile.accounts = accounts,
            None => warn!(network, "Ignoring accounts override for unknown network"),
        }
        self
    }

    /// Override the RPC url of `network`.
    pub fn url(mut self, network: &str, url: impl Into<String>) -> Self {
        match self.config.networks.get_mut(network) {
            Some(profile) => profile.url = Some(url.into()),
            None => warn!(network, "Ignoring url override for unknown network"),
        }
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Config {
        self.config
    }
}
