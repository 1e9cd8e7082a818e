//! Key/value environment stores.
//!
//! The resolver only needs a get-by-exact-key operation. [`ProcessEnv`] reads
//! the process environment table; [`MapEnv`] is an in-memory store used by
//! tests and by callers that want to resolve against a fixed snapshot.

use std::collections::HashMap;

/// A read-only key/value lookup.
///
/// Implementations return the stored value verbatim, including the empty
/// string. Treating empty values as absent is the resolver's job.
pub trait EnvStore {
    fn get(&self, key: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvStore for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        // The OS cannot hold these keys; asking for them is a guaranteed miss.
        if key.is_empty() || key.contains(['=', '\0']) {
            return None;
        }
        std::env::var_os(key).map(|value| value.to_string_lossy().into_owned())
    }
}

/// A fixed in-memory store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv {
    entries: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }
}

impl EnvStore for MapEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<S: EnvStore + ?Sized> EnvStore for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// Helper to build a [`MapEnv`] from a list of key-value pairs.
pub fn vars<I, K, V>(pairs: I) -> MapEnv
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs.into_iter().collect()
}
