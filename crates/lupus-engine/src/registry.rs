use std::collections::HashMap;

use crate::role::{PhaseOrder, RoleDefinition};
use crate::roles;

/// Keyed collection of role definitions.
///
/// Iteration follows registration order, which is also the tie-break for
/// roles sharing a phase slot. Roles declared
/// [`PhaseOrder::Any`](crate::role::PhaseOrder::Any) keep their registration
/// position in night order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    roles: Vec<RoleDefinition>,
    index: HashMap<&'static str, usize>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in role.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for def in roles::standard() {
            registry.register(def);
        }
        registry
    }

    /// Add a role. A role with the same id is replaced in place.
    pub fn register(&mut self, def: RoleDefinition) {
        match self.index.get(def.id) {
            Some(&i) => self.roles[i] = def,
            None => {
                self.index.insert(def.id, self.roles.len());
                self.roles.push(def);
            }
        }
    }

    /// Look up a role by id.
    pub fn get(&self, id: &str) -> Option<&RoleDefinition> {
        self.index.get(id).map(|&i| &self.roles[i])
    }

    /// Whether a role with this id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Roles in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RoleDefinition> {
        self.roles.iter()
    }

    /// Roles in night order.
    ///
    /// Numbered roles are sorted by ascending slot, ties in registration
    /// order, and fill the positions numbered roles occupy in the registry.
    /// `Any` roles stay where they were registered.
    pub fn ordered(&self) -> Vec<&RoleDefinition> {
        let mut numbered: Vec<&RoleDefinition> = self
            .roles
            .iter()
            .filter(|def| def.phase_order.slot().is_some())
            .collect();
        numbered.sort_by_key(|def| def.phase_order.slot());
        let mut numbered = numbered.into_iter();
        self.roles
            .iter()
            .filter_map(|def| match def.phase_order {
                PhaseOrder::Any => Some(def),
                PhaseOrder::At(_) => numbered.next(),
            })
            .collect()
    }

    /// Number of registered roles.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Whether no role is registered.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
