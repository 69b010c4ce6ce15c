//! Registry keys.

use std::fmt;

/// Key a client is stored under in the registry.
///
/// Auto-indexed registrations and integer lookups use the decimal string
/// form of the index, so `ClientKey::from(1)` and `ClientKey::from("1")`
/// name the same client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientKey(String);

impl ClientKey {
    /// Key as stored in the registry
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<usize> for ClientKey {
    fn from(index: usize) -> Self {
        Self(index.to_string())
    }
}

impl From<i32> for ClientKey {
    fn from(index: i32) -> Self {
        Self(index.to_string())
    }
}

impl From<&str> for ClientKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for ClientKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&String> for ClientKey {
    fn from(key: &String) -> Self {
        Self(key.clone())
    }
}

impl fmt::Display for ClientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
