//! Tree node entities.

use morphkit_foundation::{EntityId, RefPath, Reference, ReferenceCollection};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Minimum gap kept between the two ends of a remap range.
const RANGE_GAP: f64 = 0.001;

/// A tree node pairing a morph-target binding with attached components.
///
/// Entities live in the [`EntityStore`](crate::EntityStore)'s flat
/// preorder sequence; `depth` is the node's tree depth and is owned by
/// the store. The entity's position in the sequence is volatile and
/// must be re-resolved through the id after any structural mutation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Entity {
    id: EntityId,
    name: String,
    depth: usize,
    influence: f64,
    input_range: (f64, f64),
    value_range: (f64, f64),
    morph: Option<Reference>,
    parameters: ReferenceCollection,
    components: ReferenceCollection,
}

impl Entity {
    pub(crate) fn new(id: EntityId, name: impl Into<String>, depth: usize) -> Self {
        Self {
            id,
            name: name.into(),
            depth,
            influence: 1.0,
            input_range: (0.0, 1.0),
            value_range: (0.0, 1.0),
            morph: None,
            parameters: ReferenceCollection::new(),
            components: ReferenceCollection::new(),
        }
    }

    /// The entity's stable id.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// The entity's reference path.
    #[must_use]
    pub fn path(&self) -> RefPath {
        RefPath::Entity(self.id)
    }

    /// The entity's display name (the bound morph target's name).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the entity.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Tree depth; 0 for roots.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn set_depth(&mut self, depth: usize) {
        self.depth = depth;
    }

    /// The influence scalar in `[0, 1]` applied to this entity's
    /// contribution.
    #[must_use]
    pub fn influence(&self) -> f64 {
        self.influence
    }

    /// Sets the influence scalar, clamped to `[0, 1]`.
    pub fn set_influence(&mut self, influence: f64) {
        self.influence = influence.clamp(0.0, 1.0);
    }

    /// The domain remap applied to this entity's curve input.
    #[must_use]
    pub fn input_range(&self) -> (f64, f64) {
        self.input_range
    }

    /// Sets the lower input bound, kept below the upper bound.
    pub fn set_input_range_min(&mut self, value: f64) {
        self.input_range.0 = value.min(self.input_range.1 - RANGE_GAP);
    }

    /// Sets the upper input bound, kept above the lower bound.
    pub fn set_input_range_max(&mut self, value: f64) {
        self.input_range.1 = value.max(self.input_range.0 + RANGE_GAP);
    }

    /// Replaces both input bounds at once (order enforced).
    pub fn set_input_range(&mut self, min: f64, max: f64) {
        let (min, max) = if min > max { (max, min) } else { (min, max) };
        self.input_range = (min, max);
    }

    /// The range remap applied to this entity's curve output.
    #[must_use]
    pub fn value_range(&self) -> (f64, f64) {
        self.value_range
    }

    /// Sets the lower value bound, kept below the upper bound.
    pub fn set_value_range_min(&mut self, value: f64) {
        self.value_range.0 = value.min(self.value_range.1 - RANGE_GAP);
    }

    /// Sets the upper value bound, kept above the lower bound.
    pub fn set_value_range_max(&mut self, value: f64) {
        self.value_range.1 = value.max(self.value_range.0 + RANGE_GAP);
    }

    /// Replaces both value bounds at once (order enforced).
    pub fn set_value_range(&mut self, min: f64, max: f64) {
        let (min, max) = if min > max { (max, min) } else { (min, max) };
        self.value_range = (min, max);
    }

    /// Reference to the entity's morph-target binding component, if
    /// one has been wired.
    #[must_use]
    pub fn morph(&self) -> Option<&Reference> {
        self.morph.as_ref()
    }

    pub(crate) fn set_morph(&mut self, reference: Option<Reference>) {
        self.morph = reference;
    }

    /// Driver-property parameters owned by this entity.
    #[must_use]
    pub fn parameters(&self) -> &ReferenceCollection {
        &self.parameters
    }

    pub(crate) fn parameters_mut(&mut self) -> &mut ReferenceCollection {
        &mut self.parameters
    }

    /// Components currently attached to this entity, with their
    /// attach-time tags.
    #[must_use]
    pub fn components(&self) -> &ReferenceCollection {
        &self.components
    }

    pub(crate) fn components_mut(&mut self) -> &mut ReferenceCollection {
        &mut self.components
    }
}
