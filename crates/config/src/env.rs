//! Immutable snapshot of environment variables.

use std::{collections::BTreeMap, ffi::OsString};
use tracing::warn;

/// A point-in-time copy of `name -> value` pairs that resolution reads from.
///
/// Resolution never touches the process environment directly, so the same
/// snapshot always resolves to the same configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    /// Empty snapshot.
    pub const fn new() -> Self {
        Self {
            vars: BTreeMap::new(),
        }
    }

    /// Snapshot of the current process environment.
    ///
    /// Variables whose name or value is not valid unicode are skipped with a
    /// warning.
    pub fn from_process() -> Self {
        Self::from_os_vars(std::env::vars_os())
    }

    /// Snapshot from raw OS strings, skipping non-unicode pairs.
    pub fn from_os_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        vars.into_iter()
            .filter_map(|(k, v)| match (k.into_string(), v.into_string()) {
                (Ok(k), Ok(v)) => Some((k, v)),
                (Ok(k), Err(_)) => {
                    warn!(variable = %k, "Skipping variable with non-unicode value");
                    None
                }
                (Err(k), _) => {
                    warn!(
                        variable = %k.to_string_lossy(),
                        "Skipping variable with non-unicode name"
                    );
                    None
                }
            })
            .collect()
    }

    /// Raw value of `name`, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Value of `name`, treating an empty value the same as an absent one.
    pub fn non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }

    /// Insert pairs from `other` that are not already set here.
    ///
    /// Used to layer a `.env` file underneath the process environment.
    pub fn merge_under<I, K, V>(mut self, other: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in other {
            self.vars.entry(k.into()).or_insert_with(|| v.into());
        }
        self
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Environment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_skips_blank_values() {
        let env = Environment::from_iter([("A", "1"), ("B", "")]);
        assert_eq!(env.get("B"), Some(""));
        assert_eq!(env.non_empty("A"), Some("1"));
        assert_eq!(env.non_empty("B"), None);
        assert_eq!(env.non_empty("C"), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_from_os_vars_skips_non_unicode() {
        use std::os::unix::ffi::OsStringExt;

        let env = Environment::from_os_vars([
            (OsString::from("MUMBAI_RPC"), OsString::from("https://rpc.example")),
            (OsString::from("SEED"), OsString::from_vec(vec![0x66, 0xff, 0x6f])),
            (OsString::from_vec(vec![0xfe, 0x41]), OsString::from("x")),
        ]);

        assert_eq!(env.get("MUMBAI_RPC"), Some("https://rpc.example"));
        assert_eq!(env.get("SEED"), None);
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_merge_under_keeps_existing() {
        let env = Environment::from_iter([("SEED", "process")])
            .merge_under([("SEED", "file"), ("MUMBAI_RPC", "http://file")]);

        assert_eq!(env.get("SEED"), Some("process"));
        assert_eq!(env.get("MUMBAI_RPC"), Some("http://file"));
        assert_eq!(env.len(), 2);
    }
}
