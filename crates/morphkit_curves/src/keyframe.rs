//! Compiled keyframe descriptors.

use crate::geom::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One compiled keyframe: a position with free (independently editable)
/// left and right tangent handles, consumed by the host's evaluator.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Keyframe {
    /// The keyframe position in remapped curve space.
    pub position: Vec2,
    /// Incoming tangent handle.
    pub handle_left: Vec2,
    /// Outgoing tangent handle.
    pub handle_right: Vec2,
}

impl Keyframe {
    /// Creates a keyframe from its position and handles.
    #[must_use]
    pub const fn new(position: Vec2, handle_left: Vec2, handle_right: Vec2) -> Self {
        Self {
            position,
            handle_left,
            handle_right,
        }
    }
}
