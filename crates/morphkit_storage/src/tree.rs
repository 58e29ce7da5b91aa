//! The flat preorder entity tree.
//!
//! Entities are stored in a contiguous sequence in preorder with
//! explicit depth tags: entity *j* is a child of entity *i* (*j > i*)
//! iff `depth[j] == depth[i] + 1` and no entity between them has
//! `depth <= depth[i]`. Traversal queries scan only the contiguous
//! range implied by the target's index and depth, and every structural
//! mutation validates fully before touching the sequence.

use std::collections::HashMap;

use morphkit_foundation::{EntityId, Error, RefPath, Result, StructuralKind};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::entity::Entity;

/// Ordered entity storage encoding the tree through depth tags.
///
/// Ids are stable; indices are invalidated by any structural mutation
/// and must be re-resolved through [`EntityStore::index_of`].
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Snapshot"))]
pub struct EntityStore {
    entities: Vec<Entity>,
    next_id: u64,
    /// Volatile id-to-index map, rebuilt on every structural mutation
    /// and on load.
    #[cfg_attr(feature = "serde", serde(skip))]
    index: HashMap<EntityId, usize>,
}

/// Serialized shape of the store: the index map is transient.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct Snapshot {
    entities: Vec<Entity>,
    next_id: u64,
}

#[cfg(feature = "serde")]
impl From<Snapshot> for EntityStore {
    fn from(snapshot: Snapshot) -> Self {
        let mut store = Self {
            entities: snapshot.entities,
            next_id: snapshot.next_id,
            index: HashMap::new(),
        };
        store.rebuild_index();
        store
    }
}

impl EntityStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new entity under `parent` (or as a root) and returns
    /// its id.
    ///
    /// `position` selects the child slot among the parent's existing
    /// children (clamped to the child count; `None` appends).
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for an unknown parent and a
    /// duplicate-name error when the name is already taken. Nothing is
    /// mutated on failure.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        parent: Option<EntityId>,
        position: Option<usize>,
    ) -> Result<EntityId> {
        let name = name.into();
        if self.find_by_name(&name).is_some() {
            return Err(Error::duplicate_name(name));
        }

        let (flat_index, depth) = match parent {
            Some(parent_id) => {
                let parent_index = self.index_of(parent_id)?;
                let parent_depth = self.entities[parent_index].depth();
                let at = self.child_slot_index(parent_index, position);
                (at, parent_depth + 1)
            }
            None => (self.root_slot_index(position), 0),
        };

        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.insert(flat_index, Entity::new(id, name, depth));
        self.rebuild_index();
        Ok(id)
    }

    /// Removes an entity and its whole subtree, returning the removed
    /// ids in preorder.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for an unknown id.
    pub fn remove(&mut self, id: EntityId) -> Result<Vec<EntityId>> {
        let start = self.index_of(id)?;
        let end = self.subtree_end(start);
        let removed: Vec<EntityId> = self.entities[start..end].iter().map(Entity::id).collect();
        self.entities.drain(start..end);
        self.rebuild_index();
        Ok(removed)
    }

    /// Moves an entity (with its subtree) under a new parent.
    ///
    /// Subtree depths shift by the difference between the old and new
    /// parent depth; nothing else changes inside the moved block.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for unknown ids and a structural
    /// error when the destination lies inside the moved subtree.
    /// Nothing is mutated on failure.
    pub fn move_to(
        &mut self,
        id: EntityId,
        new_parent: Option<EntityId>,
        position: Option<usize>,
    ) -> Result<()> {
        let start = self.index_of(id)?;
        let end = self.subtree_end(start);

        let (new_depth, parent_index) = match new_parent {
            Some(parent_id) => {
                let parent_index = self.index_of(parent_id)?;
                if parent_index >= start && parent_index < end {
                    return Err(Error::structural(StructuralKind::MoveIntoSubtree {
                        entity: id,
                        destination: parent_id,
                    }));
                }
                (self.entities[parent_index].depth() + 1, Some(parent_index))
            }
            None => (0, None),
        };

        let old_depth = self.entities[start].depth();
        let block: Vec<Entity> = self.entities.drain(start..end).collect();

        // Parent indices past the extracted block shifted down by the
        // block length.
        let destination = match parent_index {
            Some(parent_index) => {
                let parent_index = if parent_index > start {
                    parent_index - block.len()
                } else {
                    parent_index
                };
                self.child_slot_index(parent_index, position)
            }
            None => self.root_slot_index(position),
        };

        let delta = i64::try_from(new_depth).unwrap_or(0) - i64::try_from(old_depth).unwrap_or(0);
        let shifted = block.into_iter().map(|mut entity| {
            let depth = i64::try_from(entity.depth()).unwrap_or(0) + delta;
            entity.set_depth(usize::try_from(depth).unwrap_or(0));
            entity
        });
        self.entities.splice(destination..destination, shifted);
        self.rebuild_index();
        Ok(())
    }

    /// Resolves an id to its current index.
    ///
    /// The index is only valid until the next structural mutation.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for an unknown id.
    pub fn index_of(&self, id: EntityId) -> Result<usize> {
        self.index
            .get(&id)
            .copied()
            .ok_or_else(|| Error::lookup_failure(RefPath::Entity(id).to_string()))
    }

    /// Borrows an entity by id.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for an unknown id.
    pub fn get(&self, id: EntityId) -> Result<&Entity> {
        let index = self.index_of(id)?;
        Ok(&self.entities[index])
    }

    /// Mutably borrows an entity by id.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for an unknown id.
    pub fn get_mut(&mut self, id: EntityId) -> Result<&mut Entity> {
        let index = self.index_of(id)?;
        Ok(&mut self.entities[index])
    }

    /// Returns the parent of an entity, `None` for roots.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for an unknown id.
    pub fn parent_of(&self, id: EntityId) -> Result<Option<EntityId>> {
        let index = self.index_of(id)?;
        let depth = self.entities[index].depth();
        if depth == 0 {
            return Ok(None);
        }
        let parent = self.entities[..index]
            .iter()
            .rev()
            .find(|e| e.depth() == depth - 1)
            .map(Entity::id);
        Ok(parent)
    }

    /// Returns the direct children of an entity in order.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for an unknown id.
    pub fn children_of(&self, id: EntityId) -> Result<Vec<EntityId>> {
        let index = self.index_of(id)?;
        let depth = self.entities[index].depth();
        let mut children = Vec::new();
        for entity in &self.entities[index + 1..] {
            if entity.depth() <= depth {
                break;
            }
            if entity.depth() == depth + 1 {
                children.push(entity.id());
            }
        }
        Ok(children)
    }

    /// Returns the ancestor chain, nearest first.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for an unknown id.
    pub fn ancestors_of(&self, id: EntityId) -> Result<Vec<EntityId>> {
        let index = self.index_of(id)?;
        let mut target = self.entities[index].depth();
        let mut ancestors = Vec::new();
        for entity in self.entities[..index].iter().rev() {
            if target == 0 {
                break;
            }
            if entity.depth() == target - 1 {
                ancestors.push(entity.id());
                target -= 1;
            }
        }
        Ok(ancestors)
    }

    /// Returns all descendants in preorder (subtree minus the entity).
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for an unknown id.
    pub fn descendants_of(&self, id: EntityId) -> Result<Vec<EntityId>> {
        let mut subtree = self.subtree_of(id)?;
        subtree.remove(0);
        Ok(subtree)
    }

    /// Returns the subtree rooted at an entity in preorder, the entity
    /// itself included.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for an unknown id.
    pub fn subtree_of(&self, id: EntityId) -> Result<Vec<EntityId>> {
        let start = self.index_of(id)?;
        let end = self.subtree_end(start);
        Ok(self.entities[start..end].iter().map(Entity::id).collect())
    }

    /// Finds an entity by name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<EntityId> {
        self.entities
            .iter()
            .find(|e| e.name() == name)
            .map(Entity::id)
    }

    /// Returns the root entities in order.
    #[must_use]
    pub fn roots(&self) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|e| e.depth() == 0)
            .map(Entity::id)
            .collect()
    }

    /// Iterates all entities in preorder.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Returns the number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    // --- Private helpers ---

    /// Exclusive end index of the subtree rooted at `start`.
    fn subtree_end(&self, start: usize) -> usize {
        let depth = self.entities[start].depth();
        let mut end = start + 1;
        while end < self.entities.len() && self.entities[end].depth() > depth {
            end += 1;
        }
        end
    }

    /// Flat index of the `position`-th child slot under the parent at
    /// `parent_index` (clamped; `None` means the last slot).
    fn child_slot_index(&self, parent_index: usize, position: Option<usize>) -> usize {
        let parent_depth = self.entities[parent_index].depth();
        let mut at = parent_index + 1;
        let mut seen = 0;
        while at < self.entities.len() && self.entities[at].depth() > parent_depth {
            if self.entities[at].depth() == parent_depth + 1 {
                if position.is_some_and(|p| seen == p) {
                    return at;
                }
                seen += 1;
            }
            at += 1;
        }
        at
    }

    /// Flat index of the `position`-th root slot.
    fn root_slot_index(&self, position: Option<usize>) -> usize {
        let mut at = 0;
        let mut seen = 0;
        while at < self.entities.len() {
            if self.entities[at].depth() == 0 {
                if position.is_some_and(|p| seen == p) {
                    return at;
                }
                seen += 1;
            }
            at += 1;
        }
        at
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .entities
            .iter()
            .enumerate()
            .map(|(index, entity)| (entity.id(), index))
            .collect();
    }
}
