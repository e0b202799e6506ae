//! Network profiles and signing-account sources.
//!
//! Each known network is described by a static [`NetworkDefinition`] naming
//! the environment variables it reads. Resolution turns a definition plus an
//! [`Environment`](crate::Environment) snapshot into a [`NetworkProfile`].

use crate::{ConfigError, Environment};
use serde::{Deserialize, Serialize};

/// Static description of a network and where its secrets come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkDefinition {
    /// Network identifier used on the command line and in the config map
    pub name: &'static str,
    /// Chain ID
    pub chain_id: u64,
    /// Variable holding the RPC endpoint url
    pub url_var: &'static str,
    /// Variable holding the HD wallet mnemonic
    pub mnemonic_var: &'static str,
}

impl NetworkDefinition {
    /// Polygon Mumbai testnet.
    pub const fn mumbai() -> Self {
        Self {
            name: "mumbai",
            chain_id: 80001,
            url_var: "MUMBAI_RPC",
            mnemonic_var: "SEED",
        }
    }
}

/// Every network the resolver knows about.
pub const NETWORKS: &[NetworkDefinition] = &[NetworkDefinition::mumbai()];

/// Default BIP-44 path for Ethereum accounts, without the trailing index.
pub const DEFAULT_HD_PATH: &str = "m/44'/60'/0'/0";

/// Default number of accounts derived from a mnemonic.
pub const DEFAULT_HD_COUNT: u32 = 20;

/// Upper bound on the number of accounts derived from a mnemonic.
pub const MAX_HD_COUNT: u32 = 1_000;

/// First hardened child index; account indices must stay below it.
pub const HARDENED_OFFSET: u32 = 1 << 31;

/// HD wallet derivation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HdAccounts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mnemonic: Option<String>,
    pub path: String,
    pub initial_index: u32,
    pub count: u32,
}

impl HdAccounts {
    pub fn new(mnemonic: Option<String>) -> Self {
        Self {
            mnemonic,
            path: DEFAULT_HD_PATH.to_string(),
            initial_index: 0,
            count: DEFAULT_HD_COUNT,
        }
    }

    /// Child index of the `i`th account (zero based), if it is a valid
    /// non-hardened index.
    pub fn index(&self, i: u32) -> Option<u32> {
        self.initial_index
            .checked_add(i)
            .filter(|index| *index < HARDENED_OFFSET)
    }

    /// Full derivation path of the `i`th account (zero based).
    pub fn derivation_path(&self, i: u32) -> Option<String> {
        self.index(i).map(|index| format!("{}/{}", self.path, index))
    }
}

/// Source from which signing accounts are derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Accounts {
    /// Keys derived from a mnemonic
    Hd(HdAccounts),
    /// Explicit list of hex encoded private keys
    PrivateKeys(Vec<String>),
}

impl Accounts {
    /// Whether at least one signer can be derived from this source.
    pub fn is_usable(&self) -> bool {
        match self {
            Self::Hd(hd) => hd.mnemonic.is_some(),
            Self::PrivateKeys(keys) => !keys.is_empty(),
        }
    }
}

/// A resolved network: endpoint plus signing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkProfile {
    #[serde(skip)]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    pub accounts: Accounts,
    #[serde(skip)]
    pub url_var: &'static str,
    #[serde(skip)]
    pub mnemonic_var: &'static str,
}

impl NetworkProfile {
    /// Build a profile from its definition and an environment snapshot.
    ///
    /// Empty values are treated as unset.
    pub fn from_env(def: &NetworkDefinition, env: &Environment) -> Self {
        Self {
            name: def.name.to_string(),
            url: env.non_empty(def.url_var).map(str::to_string),
            chain_id: Some(def.chain_id),
            accounts: Accounts::Hd(HdAccounts::new(
                env.non_empty(def.mnemonic_var).map(str::to_string),
            )),
            url_var: def.url_var,
            mnemonic_var: def.mnemonic_var,
        }
    }

    /// RPC url, or an error naming the variable that should provide it.
    pub fn require_url(&self) -> Result<&str, ConfigError> {
        self.url.as_deref().ok_or_else(|| ConfigError::MissingSecret {
            network: self.name.clone(),
            field: "url",
            variable: self.url_var,
        })
    }

    /// Account source, or an error naming the mnemonic variable when no
    /// signer can be derived.
    pub fn require_accounts(&self) -> Result<&Accounts, ConfigError> {
        if self.accounts.is_usable() {
            Ok(&self.accounts)
        } else {
            Err(self.missing_mnemonic())
        }
    }

    /// Error reported when this network has no usable signer.
    pub fn missing_mnemonic(&self) -> ConfigError {
        ConfigError::MissingSecret {
            network: self.name.clone(),
            field: "mnemonic",
            variable: self.mnemonic_var,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mumbai_definition() {
        let def = NetworkDefinition::mumbai();
        assert_eq!(def.chain_id, 80001);
        assert_eq!(def.url_var, "MUMBAI_RPC");
        assert_eq!(def.mnemonic_var, "SEED");
        assert_eq!(NETWORKS, &[def]);
    }

    #[test]
    fn test_profile_without_secrets() {
        let profile = NetworkProfile::from_env(&NetworkDefinition::mumbai(), &Environment::new());

        assert_eq!(profile.url, None);
        assert_eq!(
            profile.require_url().unwrap_err(),
            ConfigError::MissingSecret {
                network: "mumbai".into(),
                field: "url",
                variable: "MUMBAI_RPC",
            }
        );
        let err = profile.require_accounts().unwrap_err();
        assert_eq!(err.variable(), Some("SEED"));
        assert!(err.to_string().contains("mnemonic"));
    }

    #[test]
    fn test_profile_with_secrets() {
        let env = Environment::from_iter([("MUMBAI_RPC", "https://rpc.example"), ("SEED", "a b c")]);
        let profile = NetworkProfile::from_env(&NetworkDefinition::mumbai(), &env);

        assert_eq!(profile.require_url().unwrap(), "https://rpc.example");
        match profile.require_accounts().unwrap() {
            Accounts::Hd(hd) => {
                assert_eq!(hd.mnemonic.as_deref(), Some("a b c"));
                assert_eq!(hd.derivation_path(3).as_deref(), Some("m/44'/60'/0'/0/3"));
                assert_eq!(hd.count, 20);
            }
            other => panic!("unexpected accounts: {other:?}"),
        }
    }

    #[test]
    fn test_index_stays_non_hardened() {
        let mut hd = HdAccounts::new(None);
        hd.initial_index = HARDENED_OFFSET - 1;
        assert_eq!(hd.index(0), Some(HARDENED_OFFSET - 1));
        assert_eq!(hd.index(1), None);

        hd.initial_index = u32::MAX;
        assert_eq!(hd.index(2), None);
        assert_eq!(hd.derivation_path(2), None);
    }

    #[test]
    fn test_empty_private_key_list_is_unusable() {
        assert!(!Accounts::PrivateKeys(vec![]).is_usable());
        assert!(Accounts::PrivateKeys(vec!["0x01".into()]).is_usable());
    }
}
