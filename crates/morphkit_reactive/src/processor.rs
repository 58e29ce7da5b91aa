//! Processors: reactive handlers with tag-matched argument lists.

use morphkit_foundation::{RefPath, Reference, TagSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A reactive handler bound to one entity.
///
/// The argument list is exactly the components currently attached to
/// the entity whose attach tags are a superset of `tags`. It is
/// maintained incrementally by the [`System`](crate::System) on every
/// attach/detach, never recomputed by a full scan.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Processor {
    entity: Reference,
    handler: String,
    tags: TagSet,
    arguments: Vec<Reference>,
}

impl Processor {
    /// Creates a processor with a pre-seeded argument list.
    #[must_use]
    pub fn new(
        entity: Reference,
        handler: impl Into<String>,
        tags: TagSet,
        arguments: Vec<Reference>,
    ) -> Self {
        Self {
            entity,
            handler: handler.into(),
            tags,
            arguments,
        }
    }

    /// Reference to the bound entity.
    #[must_use]
    pub fn entity(&self) -> &Reference {
        &self.entity
    }

    /// The stable handler id resolved through the registry.
    #[must_use]
    pub fn handler(&self) -> &str {
        &self.handler
    }

    /// The required tag set.
    #[must_use]
    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// The current argument references.
    #[must_use]
    pub fn arguments(&self) -> &[Reference] {
        &self.arguments
    }

    /// Whether a component attached with `attach_tags` belongs in this
    /// processor's arguments.
    #[must_use]
    pub fn matches(&self, attach_tags: &TagSet) -> bool {
        self.tags.is_subset(attach_tags)
    }

    /// Whether a component is currently among the arguments.
    #[must_use]
    pub fn has_argument(&self, path: RefPath) -> bool {
        self.arguments.iter().any(|r| r.path == path)
    }

    pub(crate) fn push_argument(&mut self, reference: Reference) {
        self.arguments.push(reference);
    }

    pub(crate) fn remove_argument(&mut self, path: RefPath) -> bool {
        if let Some(pos) = self.arguments.iter().position(|r| r.path == path) {
            self.arguments.remove(pos);
            true
        } else {
            false
        }
    }
}
