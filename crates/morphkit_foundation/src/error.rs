//! Error types for the Morphkit runtime.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::ids::{ComponentId, EntityId};
use crate::kind::ComponentKind;

/// Result alias used across all Morphkit crates.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Morphkit operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about the operation that failed.
    pub context: Option<String>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Creates a lookup failure for an unresolved path or id.
    #[must_use]
    pub fn lookup_failure(path: impl Into<String>) -> Self {
        Self::new(ErrorKind::LookupFailure { path: path.into() })
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: ComponentKind, actual: ComponentKind) -> Self {
        Self::new(ErrorKind::TypeMismatch { expected, actual })
    }

    /// Creates a duplicate name error.
    #[must_use]
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateName { name: name.into() })
    }

    /// Creates a structural error.
    #[must_use]
    pub fn structural(kind: StructuralKind) -> Self {
        Self::new(ErrorKind::Structural(kind))
    }

    /// Creates an unregistered-handler error.
    #[must_use]
    pub fn processor_binding(handler: impl Into<String>) -> Self {
        Self::new(ErrorKind::ProcessorBinding {
            handler: handler.into(),
        })
    }

    /// Creates an internal invariant violation error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Returns true if this is a lookup failure.
    #[must_use]
    pub fn is_lookup_failure(&self) -> bool {
        matches!(self.kind, ErrorKind::LookupFailure { .. })
    }

    /// Returns true if this is a structural error.
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(self.kind, ErrorKind::Structural(_))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A reference path or id did not resolve.
    ///
    /// Always recoverable: dangling references are an expected state
    /// after reload or disposal, never a fault.
    #[error("unresolved reference: {path}")]
    LookupFailure {
        /// The path or id that failed to resolve.
        path: String,
    },

    /// The wrong component kind was passed to a typed operation.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected component kind.
        expected: ComponentKind,
        /// The actual component kind encountered.
        actual: ComponentKind,
    },

    /// A name or attachment collided with an existing one.
    #[error("duplicate name: {name}")]
    DuplicateName {
        /// The colliding name.
        name: String,
    },

    /// An invalid tree or attachment operation was rejected.
    #[error("structural error: {0}")]
    Structural(StructuralKind),

    /// A processor referenced a handler id that is not registered.
    #[error("unregistered processor handler: {handler}")]
    ProcessorBinding {
        /// The unknown handler id.
        handler: String,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// File IO failed.
    #[error("io error: {0}")]
    Io(String),

    /// Internal invariant violation (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// The specific invalid structural operation that was rejected.
///
/// All of these are detected before any mutation; a structural error
/// never leaves partial state behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralKind {
    /// Attach of a component that is already attached to the entity.
    AlreadyAttached {
        /// The target entity.
        entity: EntityId,
        /// The component being attached.
        component: ComponentId,
    },
    /// Detach of a component that is not attached to the entity.
    NotAttached {
        /// The target entity.
        entity: EntityId,
        /// The component being detached.
        component: ComponentId,
    },
    /// Move of an entity into its own subtree.
    MoveIntoSubtree {
        /// The entity being moved.
        entity: EntityId,
        /// The destination parent inside its subtree.
        destination: EntityId,
    },
    /// Removal of a curve point below the two-point minimum.
    PointMinimum,
}

impl fmt::Display for StructuralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyAttached { entity, component } => {
                write!(f, "{component} is already attached to {entity}")
            }
            Self::NotAttached { entity, component } => {
                write!(f, "{component} is not attached to {entity}")
            }
            Self::MoveIntoSubtree {
                entity,
                destination,
            } => {
                write!(f, "cannot move {entity} into its own subtree (at {destination})")
            }
            Self::PointMinimum => {
                write!(f, "a curve must keep at least two points")
            }
        }
    }
}
