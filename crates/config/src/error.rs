use crate::Task;
use thiserror::Error;

/// Errors raised when a consuming operation needs a value the resolved
/// configuration does not have.
///
/// Resolution itself never fails; these only surface from accessors such as
/// [`NetworkProfile::require_url`](crate::NetworkProfile::require_url) or
/// [`Config::preflight`](crate::Config::preflight).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A secret or endpoint the operation needs was never provided.
    #[error("network '{network}' requires {field}: set {variable}")]
    MissingSecret {
        network: String,
        field: &'static str,
        variable: &'static str,
    },

    /// The explorer entry exists but carries an empty key.
    #[error("verification unsupported on '{explorer}': {variable} is empty")]
    VerificationUnsupported {
        explorer: String,
        variable: &'static str,
    },

    #[error("unknown explorer network: {0}")]
    UnknownExplorer(String),

    #[error("no block explorer configured for network '{network}'")]
    NoExplorer { network: String },

    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    #[error("task '{task}' requires a network")]
    NetworkRequired { task: Task },
}

impl ConfigError {
    /// Name of the environment variable that would fix this error, if any.
    pub const fn variable(&self) -> Option<&'static str> {
        match self {
            Self::MissingSecret { variable, .. } | Self::VerificationUnsupported { variable, .. } => {
                Some(*variable)
            }
            _ => None,
        }
    }
}
