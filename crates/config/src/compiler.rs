use serde::{Deserialize, Serialize};

/// Solidity optimizer parameters.
///
/// `runs` is only meaningful when `enabled` is true; that coupling is left
/// to the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Optimizer {
    pub enabled: bool,
    pub runs: u32,
}

/// Compiler version and settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerSettings {
    /// Semantic version of solc
    pub version: String,
    pub optimizer: Optimizer,
}

impl CompilerSettings {
    pub const VERSION: &'static str = "0.8.17";
    pub const OPTIMIZER: Optimizer = Optimizer {
        enabled: true,
        runs: 20_000,
    };
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            version: Self::VERSION.to_string(),
            optimizer: Self::OPTIMIZER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_compiler_settings() {
        let settings = CompilerSettings::default();
        assert_eq!(settings.version, "0.8.17");
        assert!(settings.optimizer.enabled);
        assert_eq!(settings.optimizer.runs, 20000);
    }
}
