use serde::{Deserialize, Serialize};

use crate::player::RoleId;

/// A static mapping letting `from_role`'s night action be exercised through
/// `to_role`, a role that would otherwise never act.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grouping {
    /// The acting role whose capability is borrowed.
    pub from_role: RoleId,
    /// The normally-inert role that stands in for it.
    pub to_role: RoleId,
}

impl Grouping {
    /// Map `from_role`'s action onto `to_role`.
    pub fn new(from_role: impl Into<RoleId>, to_role: impl Into<RoleId>) -> Self {
        Self {
            from_role: from_role.into(),
            to_role: to_role.into(),
        }
    }
}

/// The grouping table consulted by impersonation roles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupingTable(Vec<Grouping>);

impl GroupingTable {
    /// Build a table from a list of groupings.
    pub fn new(groupings: Vec<Grouping>) -> Self {
        Self(groupings)
    }

    /// Add a grouping.
    pub fn push(&mut self, grouping: Grouping) {
        self.0.push(grouping);
    }

    /// The acting role mapped onto `role`, if any. First match wins.
    pub fn acting_role_for(&self, role: &str) -> Option<&RoleId> {
        self.0
            .iter()
            .find(|g| g.to_role == role)
            .map(|g| &g.from_role)
    }

    /// All groupings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Grouping> {
        self.0.iter()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_by_inert_role() {
        let table = GroupingTable::new(vec![
            Grouping::new("lupo", "indemoniato"),
            Grouping::new("veggente", "indemoniato"),
        ]);
        assert_eq!(
            table.acting_role_for("indemoniato"),
            Some(&RoleId::from("lupo"))
        );
        assert_eq!(table.acting_role_for("lupo"), None);
    }

    #[test]
    fn serializes_camel_case() {
        let table = GroupingTable::new(vec![Grouping::new("lupo", "cucciolo")]);
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json[0]["fromRole"], "lupo");
        assert_eq!(json[0]["toRole"], "cucciolo");
    }
}
