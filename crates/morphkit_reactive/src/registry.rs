//! Named processor handler registration.

use std::collections::HashMap;
use std::fmt;

use morphkit_foundation::{EntityId, Error, Reference, Result};
use morphkit_storage::World;

/// A reactive handler: receives the world, the bound entity, and the
/// processor's current argument references.
pub type Handler = Box<dyn Fn(&mut World, EntityId, &[Reference]) -> Result<()>>;

/// Registry mapping stable handler ids to handler functions.
///
/// Handlers are registered once at bootstrap; processors store only
/// the id, so serialized state never carries function pointers.
#[derive(Default)]
pub struct ProcessorRegistry {
    handlers: HashMap<String, Handler>,
}

impl ProcessorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler under a stable id.
    ///
    /// # Errors
    ///
    /// Fails with a duplicate-name error if the id is already taken.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        handler: impl Fn(&mut World, EntityId, &[Reference]) -> Result<()> + 'static,
    ) -> Result<()> {
        let id = id.into();
        if self.handlers.contains_key(&id) {
            return Err(Error::duplicate_name(id));
        }
        self.handlers.insert(id, Box::new(handler));
        Ok(())
    }

    /// Checks whether a handler id is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.handlers.contains_key(id)
    }

    /// Resolves a handler id.
    ///
    /// # Errors
    ///
    /// Fails with a processor-binding error for unknown ids.
    pub fn get(&self, id: &str) -> Result<&Handler> {
        self.handlers
            .get(id)
            .ok_or_else(|| Error::processor_binding(id))
    }

    /// Returns the number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true if no handlers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for ProcessorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        ids.sort_unstable();
        f.debug_struct("ProcessorRegistry")
            .field("handlers", &ids)
            .finish()
    }
}
