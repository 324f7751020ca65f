use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::player::RoleId;

/// Per-role scratch storage, keyed by role id, that lives for the whole game.
///
/// Each namespace belongs to exactly one role. The engine's access facade
/// scopes every read and write to the calling role, so roles cannot see each
/// other's entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomData(BTreeMap<RoleId, Value>);

impl CustomData {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a role's namespace.
    pub fn get(&self, role: &str) -> Option<&Value> {
        self.0.get(role)
    }

    /// Replace a role's namespace.
    pub fn set(&mut self, role: RoleId, value: Value) {
        self.0.insert(role, value);
    }

    /// Drop a role's namespace, returning what it held.
    pub fn clear(&mut self, role: &str) -> Option<Value> {
        self.0.remove(role)
    }

    /// Roles that currently hold data.
    pub fn roles(&self) -> impl Iterator<Item = &RoleId> {
        self.0.keys()
    }

    /// Whether no role holds data.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_get_clear() {
        let mut data = CustomData::new();
        data.set(RoleId::from("parassita"), json!({ "infetti": [2, 3] }));
        assert_eq!(data.get("parassita").unwrap()["infetti"], json!([2, 3]));
        assert!(data.get("strega").is_none());
        assert!(data.clear("parassita").is_some());
        assert!(data.is_empty());
    }

    #[test]
    fn serializes_as_plain_object() {
        let mut data = CustomData::new();
        data.set(RoleId::from("guardia"), json!({ "lastTarget": 4 }));
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json, json!({ "guardia": { "lastTarget": 4 } }));
    }
}
