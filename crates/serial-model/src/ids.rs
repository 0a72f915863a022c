#![deny(unsafe_code)]

use std::borrow::Borrow;
use std::fmt;

/// A normalized serial number.
///
/// Keys are produced by the normalizer in `serial-core`; two raw values that
/// normalize to the same key are the same serial regardless of source.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct SerialKey(String);

impl SerialKey {
    /// Wraps an already-normalized value.
    pub fn from_normalized(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SerialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SerialKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SerialKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
