//! Block-explorer API credentials used for contract verification.

use crate::{ConfigError, Environment};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Static description of an etherscan-like explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExplorerDefinition {
    /// Explorer network identifier
    pub name: &'static str,
    /// Chain ID the explorer indexes
    pub chain_id: u64,
    /// Variable holding the API key
    pub key_var: &'static str,
}

impl ExplorerDefinition {
    /// BscScan (BNB Smart Chain mainnet).
    pub const fn bsc() -> Self {
        Self {
            name: "bsc",
            chain_id: 56,
            key_var: "BSC_KEY",
        }
    }

    /// PolygonScan for the Mumbai testnet.
    pub const fn polygon_mumbai() -> Self {
        Self {
            name: "polygonMumbai",
            chain_id: 80001,
            key_var: "POLYGON_KEY",
        }
    }
}

/// Every explorer the resolver knows about.
pub const EXPLORERS: &[ExplorerDefinition] = &[
    ExplorerDefinition::bsc(),
    ExplorerDefinition::polygon_mumbai(),
];

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    key: String,
    chain_id: u64,
    key_var: &'static str,
}

/// Explorer network -> API key.
///
/// Every known explorer has an entry. An empty key is a placeholder meaning
/// verification is unsupported there, which is different from having no
/// entry at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplorerCredentials {
    entries: BTreeMap<String, Entry>,
}

impl ExplorerCredentials {
    /// Read every known explorer key from `env`, defaulting to `""`.
    pub fn from_env(env: &Environment) -> Self {
        let entries = EXPLORERS
            .iter()
            .map(|def| {
                let entry = Entry {
                    key: env.get(def.key_var).unwrap_or_default().to_string(),
                    chain_id: def.chain_id,
                    key_var: def.key_var,
                };
                (def.name.to_string(), entry)
            })
            .collect();

        Self { entries }
    }

    /// Raw key for `explorer`, empty placeholder included.
    pub fn get(&self, explorer: &str) -> Option<&str> {
        self.entries.get(explorer).map(|e| e.key.as_str())
    }

    /// Usable key for `explorer`.
    pub fn api_key(&self, explorer: &str) -> Result<&str, ConfigError> {
        let entry = self
            .entries
            .get(explorer)
            .ok_or_else(|| ConfigError::UnknownExplorer(explorer.to_string()))?;

        if entry.key.is_empty() {
            return Err(ConfigError::VerificationUnsupported {
                explorer: explorer.to_string(),
                variable: entry.key_var,
            });
        }

        Ok(&entry.key)
    }

    /// Explorer network name indexing `chain_id`, if any.
    pub fn explorer_for_chain(&self, chain_id: u64) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, e)| e.chain_id == chain_id)
            .map(|(name, _)| name.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Copy with every non-empty key replaced by `placeholder`.
    pub(crate) fn masked(&self, placeholder: &str) -> Self {
        let mut masked = self.clone();
        for entry in masked.entries.values_mut() {
            if !entry.key.is_empty() {
                entry.key = placeholder.to_string();
            }
        }
        masked
    }
}

impl Serialize for ExplorerCredentials {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(name, e)| (name, &e.key)))
    }
}
