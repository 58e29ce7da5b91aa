//! World state: the unified interface to both stores.

use morphkit_foundation::{
    ComponentId, ComponentKind, EntityId, Error, RefPath, Reference, ReferenceCollection, Result,
    StructuralKind, TagSet,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::component::Component;
use crate::entity::Entity;
use crate::store::ComponentStore;
use crate::tree::EntityStore;

/// The unified storage interface: entity tree plus component store,
/// with reference resolution and the low-level attachment links.
///
/// The world holds no reactive state; attach/detach orchestration,
/// hooks, and processor dispatch live a layer above and drive the
/// world through [`World::link`] / [`World::unlink`].
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct World {
    entities: EntityStore,
    components: ComponentStore,
}

impl World {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The entity tree.
    #[must_use]
    pub fn entities(&self) -> &EntityStore {
        &self.entities
    }

    /// The entity tree, mutable.
    pub fn entities_mut(&mut self) -> &mut EntityStore {
        &mut self.entities
    }

    /// The component store.
    #[must_use]
    pub fn components(&self) -> &ComponentStore {
        &self.components
    }

    /// The component store, mutable.
    pub fn components_mut(&mut self) -> &mut ComponentStore {
        &mut self.components
    }

    /// Resolves a reference to an entity.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for component paths and unknown ids.
    pub fn resolve_entity(&self, reference: &Reference) -> Result<&Entity> {
        match reference.path {
            RefPath::Entity(id) => self.entities.get(id),
            RefPath::Component(..) => Err(Error::lookup_failure(reference.path.to_string())),
        }
    }

    /// Resolves a reference to a component, validating the kind.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for entity paths and unknown ids,
    /// and with a type mismatch on a kind conflict.
    pub fn resolve_component(&self, reference: &Reference) -> Result<&Component> {
        self.components.resolve(reference.path)
    }

    /// Checks whether a component is attached to an entity.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure if either id is unknown.
    pub fn is_attached(&self, entity: EntityId, component: ComponentId) -> Result<bool> {
        let path = self.components.get(component)?.path();
        Ok(self.entities.get(entity)?.components().contains(path))
    }

    /// Records the attachment links on both sides.
    ///
    /// The entity side carries the attach-time tags; the component
    /// side records the owning entity. Validation happens before any
    /// mutation.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for unknown ids and a structural
    /// error if the component is already attached to the entity.
    pub fn link(&mut self, entity: EntityId, component: ComponentId, tags: TagSet) -> Result<()> {
        if self.is_attached(entity, component)? {
            return Err(Error::structural(StructuralKind::AlreadyAttached {
                entity,
                component,
            }));
        }

        let (component_name, component_path) = {
            let c = self.components.get(component)?;
            (c.name().to_string(), c.path())
        };
        let (entity_name, entity_path) = {
            let e = self.entities.get(entity)?;
            (e.name().to_string(), e.path())
        };

        self.entities
            .get_mut(entity)?
            .components_mut()
            .push(Reference::with_tags(component_name, component_path, tags));
        self.components
            .get_mut(component)?
            .owners_mut()
            .push(Reference::new(entity_name, entity_path));
        Ok(())
    }

    /// Removes the attachment links on both sides, returning the
    /// entity-side reference with its attach-time tags.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for unknown ids and a structural
    /// error if the component is not attached to the entity.
    pub fn unlink(&mut self, entity: EntityId, component: ComponentId) -> Result<Reference> {
        if !self.is_attached(entity, component)? {
            return Err(Error::structural(StructuralKind::NotAttached {
                entity,
                component,
            }));
        }

        let component_path = self.components.get(component)?.path();
        let entity_path = self.entities.get(entity)?.path();

        let removed = self
            .entities
            .get_mut(entity)?
            .components_mut()
            .remove(component_path)
            .ok_or_else(|| Error::internal("attachment links out of sync"))?;
        self.components
            .get_mut(component)?
            .owners_mut()
            .remove(entity_path)
            .ok_or_else(|| Error::internal("attachment links out of sync"))?;
        Ok(removed)
    }

    /// Wires an entity's morph-binding component: records the entity
    /// in the component's owner set and the component in the entity's
    /// `morph` slot. Morph bindings are wired directly, not attached
    /// through the component collection.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for unknown ids and a type mismatch
    /// if the component is not a morph-target binding.
    pub fn bind_morph(&mut self, entity: EntityId, component: ComponentId) -> Result<()> {
        let (kind, name, path) = {
            let c = self.components.get(component)?;
            (c.kind(), c.name().to_string(), c.path())
        };
        if kind != ComponentKind::MorphTarget {
            return Err(Error::type_mismatch(ComponentKind::MorphTarget, kind));
        }
        let (entity_name, entity_path) = {
            let e = self.entities.get(entity)?;
            (e.name().to_string(), e.path())
        };

        self.entities
            .get_mut(entity)?
            .set_morph(Some(Reference::new(name, path)));
        self.components
            .get_mut(component)?
            .owners_mut()
            .push(Reference::new(entity_name, entity_path));
        Ok(())
    }

    /// Records a driver-property parameter on an entity, linking the
    /// owner set on the component side.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for unknown ids and a type mismatch
    /// if the component is not a property.
    pub fn bind_parameter(&mut self, entity: EntityId, component: ComponentId) -> Result<()> {
        let (kind, name, path) = {
            let c = self.components.get(component)?;
            (c.kind(), c.name().to_string(), c.path())
        };
        if kind != ComponentKind::Property {
            return Err(Error::type_mismatch(ComponentKind::Property, kind));
        }
        let (entity_name, entity_path) = {
            let e = self.entities.get(entity)?;
            (e.name().to_string(), e.path())
        };

        self.entities
            .get_mut(entity)?
            .parameters_mut()
            .push(Reference::new(name, path));
        self.components
            .get_mut(component)?
            .owners_mut()
            .push(Reference::new(entity_name, entity_path));
        Ok(())
    }

    /// Severs every link an entity holds (attached components,
    /// parameters, morph binding) ahead of removing the entity itself.
    /// Returns the ids of all components whose owner sets changed, for
    /// the caller's disposal pass.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for an unknown entity.
    pub fn purge_entity_links(&mut self, entity: EntityId) -> Result<Vec<ComponentId>> {
        let entity_path = self.entities.get(entity)?.path();

        let mut component_ids = Vec::new();
        {
            let e = self.entities.get_mut(entity)?;
            for reference in e.components().iter() {
                if let Some((_, id)) = reference.path.as_component() {
                    component_ids.push(id);
                }
            }
            for reference in e.parameters().iter() {
                if let Some((_, id)) = reference.path.as_component() {
                    component_ids.push(id);
                }
            }
            if let Some(reference) = e.morph() {
                if let Some((_, id)) = reference.path.as_component() {
                    component_ids.push(id);
                }
            }
            *e.components_mut() = ReferenceCollection::new();
            *e.parameters_mut() = ReferenceCollection::new();
            e.set_morph(None);
        }

        for id in &component_ids {
            if let Ok(component) = self.components.get_mut(*id) {
                component.owners_mut().remove(entity_path);
            }
        }
        Ok(component_ids)
    }
}
