//! Path-resolvable weak references between core objects.
//!
//! The backing stores are serialized and reorganized, so objects never
//! hold live addresses of each other. Every relationship is a
//! [`Reference`] carrying a string-encodable [`RefPath`] that is
//! re-resolved against the stores on each use. An unresolved path is a
//! recoverable [`lookup failure`](crate::Error::lookup_failure), never
//! a fault.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::ids::{ComponentId, EntityId};
use crate::kind::ComponentKind;
use crate::tags::TagSet;

/// A typed locator for a core object.
///
/// String form: `entity/<id>` or `component/<kind>/<id>`. The string
/// form is what gets serialized, so paths survive store reorganization
/// and file round-trips.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RefPath {
    /// Locates an entity by stable id.
    Entity(EntityId),
    /// Locates a component by kind and stable id.
    Component(ComponentKind, ComponentId),
}

impl RefPath {
    /// Returns the entity id if this path locates an entity.
    #[must_use]
    pub fn as_entity(self) -> Option<EntityId> {
        match self {
            RefPath::Entity(id) => Some(id),
            RefPath::Component(..) => None,
        }
    }

    /// Returns the component id if this path locates a component.
    #[must_use]
    pub fn as_component(self) -> Option<(ComponentKind, ComponentId)> {
        match self {
            RefPath::Entity(_) => None,
            RefPath::Component(kind, id) => Some((kind, id)),
        }
    }
}

impl fmt::Display for RefPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefPath::Entity(id) => write!(f, "entity/{}", id.0),
            RefPath::Component(kind, id) => write!(f, "component/{}/{}", kind.as_str(), id.0),
        }
    }
}

impl FromStr for RefPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || Error::lookup_failure(s);
        let mut parts = s.split('/');
        match parts.next() {
            Some("entity") => {
                let id = parts
                    .next()
                    .and_then(|raw| raw.parse::<u64>().ok())
                    .ok_or_else(malformed)?;
                if parts.next().is_some() {
                    return Err(malformed());
                }
                Ok(RefPath::Entity(EntityId(id)))
            }
            Some("component") => {
                let kind = parts
                    .next()
                    .and_then(ComponentKind::from_token)
                    .ok_or_else(malformed)?;
                let id = parts
                    .next()
                    .and_then(|raw| raw.parse::<u64>().ok())
                    .ok_or_else(malformed)?;
                if parts.next().is_some() {
                    return Err(malformed());
                }
                Ok(RefPath::Component(kind, ComponentId(id)))
            }
            _ => Err(malformed()),
        }
    }
}

#[cfg(feature = "serde")]
mod serde_support {
    use super::RefPath;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for RefPath {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for RefPath {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let raw = String::deserialize(deserializer)?;
            raw.parse()
                .map_err(|_| D::Error::custom(format!("malformed reference path: {raw}")))
        }
    }
}

/// A named, non-owning link to another core object.
///
/// `tags` carries the attach-time capability labels when the reference
/// links an entity to a component; it is empty for owner back-links and
/// mirror links.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reference {
    /// Role name of the link (e.g. the component's stable name).
    pub name: String,
    /// Locator re-resolved against the stores on each use.
    pub path: RefPath,
    /// Attach-time capability labels.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: TagSet,
}

impl Reference {
    /// Creates an untagged reference.
    #[must_use]
    pub fn new(name: impl Into<String>, path: RefPath) -> Self {
        Self {
            name: name.into(),
            path,
            tags: TagSet::new(),
        }
    }

    /// Creates a reference carrying attach tags.
    #[must_use]
    pub fn with_tags(name: impl Into<String>, path: RefPath, tags: TagSet) -> Self {
        Self {
            name: name.into(),
            path,
            tags,
        }
    }

    /// Creates an entity reference.
    #[must_use]
    pub fn to_entity(name: impl Into<String>, id: EntityId) -> Self {
        Self::new(name, RefPath::Entity(id))
    }

    /// Creates a component reference.
    #[must_use]
    pub fn to_component(name: impl Into<String>, kind: ComponentKind, id: ComponentId) -> Self {
        Self::new(name, RefPath::Component(kind, id))
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.path)
    }
}

/// An ordered collection of references with tag-filtered views.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ReferenceCollection {
    items: Vec<Reference>,
}

impl ReferenceCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a reference.
    pub fn push(&mut self, reference: Reference) {
        self.items.push(reference);
    }

    /// Returns the position of the first reference with the given path.
    #[must_use]
    pub fn position(&self, path: RefPath) -> Option<usize> {
        self.items.iter().position(|r| r.path == path)
    }

    /// Checks whether any reference has the given path.
    #[must_use]
    pub fn contains(&self, path: RefPath) -> bool {
        self.position(path).is_some()
    }

    /// Returns the first reference with the given role name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Reference> {
        self.items.iter().find(|r| r.name == name)
    }

    /// Removes and returns the first reference with the given path.
    pub fn remove(&mut self, path: RefPath) -> Option<Reference> {
        self.position(path).map(|pos| self.items.remove(pos))
    }

    /// Iterates references whose tags are a superset of `required`.
    pub fn matching<'a>(&'a self, required: &'a TagSet) -> impl Iterator<Item = &'a Reference> {
        self.items.iter().filter(|r| required.is_subset(&r.tags))
    }

    /// Iterates all references in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Reference> {
        self.items.iter()
    }

    /// Returns the number of references.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a ReferenceCollection {
    type Item = &'a Reference;
    type IntoIter = std::slice::Iter<'a, Reference>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
