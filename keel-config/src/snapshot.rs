//! Immutable snapshot of deployment inputs
//!
//! A snapshot is captured once at process start and only read afterwards.
//! Inputs are case-sensitive names mapped to string values; an input that is
//! not in the map is "not provided". Empty values are dropped at capture time
//! so that `FOO=` behaves the same as an unset `FOO`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Read-only mapping of input name to value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct EnvironmentSnapshot {
    values: BTreeMap<String, String>,
}

impl EnvironmentSnapshot {
    /// Build a snapshot from name/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(_, v)| !v.is_empty())
            .collect();
        Self { values }
    }

    /// Capture the current process environment
    pub fn from_env() -> Self {
        Self::from_env_with_prefix(None)
    }

    /// Capture the process environment, keeping only variables that carry
    /// `{prefix}_` and stripping that prefix from their names.
    pub fn from_env_with_prefix(prefix: Option<&str>) -> Self {
        let marker = prefix.map(|p| format!("{}_", p));
        let mut values = BTreeMap::new();

        for (key, value) in std::env::vars_os() {
            let (Some(key), Some(value)) = (key.to_str(), value.to_str()) else {
                log::warn!("Skipping environment variable with non UTF-8 name or value");
                continue;
            };

            let name = match &marker {
                Some(marker) => match key.strip_prefix(marker.as_str()) {
                    Some(stripped) => stripped,
                    None => continue,
                },
                None => key,
            };

            if !value.is_empty() {
                values.insert(name.to_string(), value.to_string());
            }
        }

        Self { values }
    }

    /// Value of an input, `None` when it was not provided
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Whether an input was provided
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Whether every named input was provided
    pub fn has_all(&self, names: &[&str]) -> bool {
        names.iter().all(|name| self.contains(name))
    }

    /// Names from `names` that are present in this snapshot
    pub fn present_of<'a>(&self, names: &[&'a str]) -> Vec<&'a str> {
        names.iter().copied().filter(|n| self.contains(n)).collect()
    }

    /// New snapshot where entries of `over` replace entries of `self`
    pub fn layered(&self, over: &EnvironmentSnapshot) -> Self {
        let mut values = self.values.clone();
        values.extend(over.values.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self { values }
    }

    /// Iterate over all provided inputs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// Deserialized maps go through the same empty-value filter as captured ones
impl From<BTreeMap<String, String>> for EnvironmentSnapshot {
    fn from(values: BTreeMap<String, String>) -> Self {
        Self::from_pairs(values)
    }
}

impl From<EnvironmentSnapshot> for BTreeMap<String, String> {
    fn from(snapshot: EnvironmentSnapshot) -> Self {
        snapshot.values
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvironmentSnapshot {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}
