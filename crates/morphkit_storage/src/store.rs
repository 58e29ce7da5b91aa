//! Component storage with reference-counted disposal.

use std::collections::BTreeMap;

use morphkit_foundation::{ComponentId, ComponentKind, Error, RefPath, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentData};

/// Owns every component, keyed by stable id.
///
/// A `BTreeMap` keeps iteration and serialization order deterministic.
/// Components are only ever destroyed through [`ComponentStore::remove`],
/// driven by the attach/detach orchestration when a disposable
/// component loses its last owner.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComponentStore {
    components: BTreeMap<ComponentId, Component>,
    next_id: u64,
}

impl ComponentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a component and returns its id.
    ///
    /// With no explicit name, a stable `<kind>.<id>` name is generated.
    ///
    /// # Errors
    ///
    /// Fails with a duplicate-name error if the name is already taken.
    pub fn create(&mut self, data: ComponentData, name: Option<String>) -> Result<ComponentId> {
        let id = ComponentId(self.next_id);
        let name = name.unwrap_or_else(|| format!("{}.{}", data.kind().as_str(), id.0));
        if self.find_by_name(&name).is_some() {
            return Err(Error::duplicate_name(name));
        }
        self.next_id += 1;
        self.components.insert(id, Component::new(id, name, data));
        Ok(id)
    }

    /// Borrows a component by id.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for an unknown or disposed id.
    pub fn get(&self, id: ComponentId) -> Result<&Component> {
        self.components
            .get(&id)
            .ok_or_else(|| Error::lookup_failure(format!("component/{}", id.0)))
    }

    /// Mutably borrows a component by id.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for an unknown or disposed id.
    pub fn get_mut(&mut self, id: ComponentId) -> Result<&mut Component> {
        self.components
            .get_mut(&id)
            .ok_or_else(|| Error::lookup_failure(format!("component/{}", id.0)))
    }

    /// Permanently removes a component from the store.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for an unknown or already-disposed
    /// id, so double disposal is observable rather than silent.
    pub fn remove(&mut self, id: ComponentId) -> Result<Component> {
        self.components
            .remove(&id)
            .ok_or_else(|| Error::lookup_failure(format!("component/{}", id.0)))
    }

    /// Checks whether a component exists.
    #[must_use]
    pub fn contains(&self, id: ComponentId) -> bool {
        self.components.contains_key(&id)
    }

    /// Resolves a component path, validating the kind.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for entity paths and unknown ids,
    /// and with a type mismatch when the path kind does not match the
    /// stored component.
    pub fn resolve(&self, path: RefPath) -> Result<&Component> {
        let (kind, id) = path
            .as_component()
            .ok_or_else(|| Error::lookup_failure(path.to_string()))?;
        let component = self.get(id)?;
        if component.kind() != kind {
            return Err(Error::type_mismatch(kind, component.kind()));
        }
        Ok(component)
    }

    /// Finds a component by stable name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<ComponentId> {
        self.components
            .values()
            .find(|c| c.name() == name)
            .map(Component::id)
    }

    /// Iterates components of one kind in id order.
    pub fn of_kind(&self, kind: ComponentKind) -> impl Iterator<Item = &Component> {
        self.components.values().filter(move |c| c.kind() == kind)
    }

    /// Iterates all components in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    /// Returns the number of live components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns true if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
