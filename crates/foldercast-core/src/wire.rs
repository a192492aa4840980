//! Wire object and the normalization trait
//!
//! The wire object is the flat key/value structure actually sent to the
//! provider, after normalization strips every internal-only representation:
//! `Unset` fields vanish, `Sentinel` fields are replaced by their concrete
//! provider placeholder (or dropped when that placeholder means "leave this
//! setting alone"), and composite sub-objects are included only when at
//! least one member survived.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Normalized provider wire form of a patch.
///
/// Backed by a `serde_json::Map` (BTree-ordered), so the same patch always
/// serializes to the identical wire object.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WirePatch(Map<String, Value>);

impl WirePatch {
    /// Create an empty wire patch
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one wire property
    #[inline]
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Look up one wire property
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether the property is present
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of wire properties
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the patch carries no properties at all
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the wire properties in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Underlying JSON map
    #[inline]
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume into the underlying JSON map
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for WirePatch {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Conversion of a sparse session patch into its provider wire form.
///
/// Must be deterministic: the same patch always normalizes to the same
/// wire object, and normalizing twice never changes the result.
pub trait Normalize {
    /// Produce the exact wire object to send
    fn normalize(&self) -> WirePatch;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_patch_round_trips_through_json() {
        let mut patch = WirePatch::new();
        patch.insert("muted", json!(true));
        patch.insert("mobile_push", json!(false));

        let text = serde_json::to_string(&patch).unwrap();
        let back: WirePatch = serde_json::from_str(&text).unwrap();
        assert_eq!(back, patch);
    }

    #[test]
    fn key_order_is_stable() {
        let mut a = WirePatch::new();
        a.insert("b", json!(1));
        a.insert("a", json!(2));

        let mut b = WirePatch::new();
        b.insert("a", json!(2));
        b.insert("b", json!(1));

        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
