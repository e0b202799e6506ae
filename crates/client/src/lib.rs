//! Providers and signers built from resolved network profiles.
//!
//! Every helper checks the profile fields it needs at the moment of use and
//! reports the environment variable that was expected to supply them.

use alloy_network::EthereumWallet;
use alloy_primitives::Address;
use alloy_provider::{Provider, ProviderBuilder};
use alloy_signer::Signer;
use alloy_signer_local::{coins_bip39::English, MnemonicBuilder, PrivateKeySigner};
use config::{Accounts, ConfigError, HdAccounts, NetworkProfile, MAX_HD_COUNT};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ClientError {
    /// A required configuration value is unset
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Error parsing or validating URLs
    #[error("Invalid RPC URL in {variable}: {reason}")]
    InvalidUrl {
        variable: &'static str,
        reason: String,
    },

    /// Error deriving keys from a mnemonic
    #[error("Invalid mnemonic in {variable}: {reason}")]
    InvalidMnemonic {
        variable: &'static str,
        reason: String,
    },

    /// HD derivation settings outside the supported range
    #[error("Invalid derivation settings in {variable}: {reason}")]
    InvalidDerivation {
        variable: &'static str,
        reason: String,
    },

    /// Error with private key
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// The account source produced no signers
    #[error("No accounts derived for network '{0}'")]
    NoAccounts(String),

    /// Error connecting to the RPC endpoint
    #[error("Connection error: {0}")]
    Connection(String),

    /// The endpoint serves a different chain than the profile expects
    #[error("Chain id mismatch on '{network}': expected {expected}, endpoint reports {actual}")]
    ChainIdMismatch {
        network: String,
        expected: u64,
        actual: u64,
    },
}

/// Create an rpc provider for the network's endpoint.
pub fn create_provider(profile: &NetworkProfile) -> Result<impl Provider + Clone, ClientError> {
    let url = parse_url(profile)?;
    let provider = ProviderBuilder::new().connect_http(url);

    Ok(provider)
}

/// Create a provider with wallet signing capability from the network's
/// account source.
///
/// The endpoint is checked before the accounts. The first derived account is
/// the wallet's default signer.
pub fn create_wallet_provider(
    profile: &NetworkProfile,
) -> Result<impl Provider + Clone, ClientError> {
    let url = parse_url(profile)?;

    let mut signers = derive_signers(profile)?.into_iter();
    let first = signers
        .next()
        .ok_or_else(|| ClientError::NoAccounts(profile.name.clone()))?;

    let mut wallet = EthereumWallet::from(first);
    for signer in signers {
        wallet.register_signer(signer);
    }

    let provider = ProviderBuilder::new().wallet(wallet).connect_http(url);

    Ok(provider)
}

/// Derive every local signer described by the network's account source.
pub fn derive_signers(profile: &NetworkProfile) -> Result<Vec<PrivateKeySigner>, ClientError> {
    let signers = match &profile.accounts {
        Accounts::Hd(hd @ HdAccounts {
            mnemonic: Some(phrase),
            ..
        }) => derive_hd(hd, phrase, profile.mnemonic_var)?,
        Accounts::PrivateKeys(keys) if !keys.is_empty() => keys
            .iter()
            .map(|key| {
                key.parse::<PrivateKeySigner>()
                    .map_err(|e| ClientError::InvalidPrivateKey(format!("{}", e)))
            })
            .collect::<Result<Vec<_>, _>>()?,
        _ => return Err(profile.missing_mnemonic().into()),
    };

    debug!(
        network = %profile.name,
        count = signers.len(),
        "Derived signers"
    );

    Ok(signers
        .into_iter()
        .map(|signer| signer.with_chain_id(profile.chain_id))
        .collect())
}

/// Addresses of every signer the network's account source yields.
pub fn signer_addresses(profile: &NetworkProfile) -> Result<Vec<Address>, ClientError> {
    Ok(derive_signers(profile)?
        .iter()
        .map(PrivateKeySigner::address)
        .collect())
}

/// Connect to the network and confirm the endpoint serves the expected chain.
///
/// Returns the chain id reported by the endpoint.
pub async fn check_chain_id(profile: &NetworkProfile) -> Result<u64, ClientError> {
    let provider = create_provider(profile)?;
    let actual = provider
        .get_chain_id()
        .await
        .map_err(|e| ClientError::Connection(format!("{}", e)))?;

    match profile.chain_id {
        Some(expected) if expected != actual => Err(ClientError::ChainIdMismatch {
            network: profile.name.clone(),
            expected,
            actual,
        }),
        _ => Ok(actual),
    }
}

/// Parse the profile's url into whatever url type the transport expects.
fn parse_url<U>(profile: &NetworkProfile) -> Result<U, ClientError>
where
    U: FromStr,
    U::Err: Display,
{
    profile
        .require_url()?
        .parse()
        .map_err(|e| ClientError::InvalidUrl {
            variable: profile.url_var,
            reason: format!("{}", e),
        })
}

fn derive_hd(
    hd: &HdAccounts,
    phrase: &str,
    variable: &'static str,
) -> Result<Vec<PrivateKeySigner>, ClientError> {
    if hd.count > MAX_HD_COUNT {
        return Err(ClientError::InvalidDerivation {
            variable,
            reason: format!("count {} exceeds {}", hd.count, MAX_HD_COUNT),
        });
    }

    (0..hd.count)
        .map(|i| {
            let path = hd
                .derivation_path(i)
                .ok_or_else(|| ClientError::InvalidDerivation {
                    variable,
                    reason: format!(
                        "account index {} + {} is not a non-hardened child index",
                        hd.initial_index, i
                    ),
                })?;

            MnemonicBuilder::<English>::default()
                .phrase(phrase)
                .derivation_path(path)
                .and_then(|builder| builder.build())
                .map_err(|e| ClientError::InvalidMnemonic {
                    variable,
                    reason: format!("{}", e),
                })
        })
        .collect()
}
