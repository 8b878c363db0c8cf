use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Immutable, reference-counted text carried by DOM commands.
///
/// Phrases, href values and style values are cloned into commands on every
/// frame; cloning here is a refcount bump rather than a fresh allocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SharedStr(Arc<str>);

impl SharedStr {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of Unicode scalar values.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    /// The first `n` characters (not bytes). Saturates at the full string.
    pub fn char_prefix(&self, n: usize) -> &str {
        match self.0.char_indices().nth(n) {
            Some((byte, _)) => &self.0[..byte],
            None => &self.0,
        }
    }
}

impl PartialEq<str> for SharedStr {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for SharedStr {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl std::ops::Deref for SharedStr {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SharedStr {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for SharedStr {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SharedStr {
    #[inline]
    fn from(s: &str) -> Self {
        SharedStr(Arc::from(s))
    }
}

impl From<String> for SharedStr {
    #[inline]
    fn from(s: String) -> Self {
        SharedStr(Arc::from(s))
    }
}

impl std::fmt::Display for SharedStr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// Hand-rolled so serde's `rc` feature stays off.
impl Serialize for SharedStr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SharedStr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(SharedStr::from(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_counts_chars_not_bytes() {
        let s = SharedStr::from("héllo");
        assert_eq!(s.char_len(), 5);
        assert_eq!(s.char_prefix(0), "");
        assert_eq!(s.char_prefix(2), "hé");
        assert_eq!(s.char_prefix(5), "héllo");
        assert_eq!(s.char_prefix(99), "héllo");
    }

    #[test]
    fn compares_with_str() {
        let s = SharedStr::from("#about");
        assert_eq!(s, "#about");
        assert!(s != "#projects");
    }

    #[test]
    fn deserializes_escaped_strings() {
        let s: SharedStr = serde_json::from_str("\"Data \\\"Viz\\\"\"").unwrap();
        assert_eq!(s, "Data \"Viz\"");
    }

    #[test]
    fn hashmap_lookup_by_str() {
        let mut map = std::collections::HashMap::new();
        map.insert(SharedStr::from("projects"), 3);
        assert_eq!(map.get("projects"), Some(&3));
    }
}
