//! Curve control points and handle policies.

use crate::geom::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tangent handle policy at a control point.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum HandleType {
    /// Smooth tangent from the neighbor directions.
    Auto,
    /// Smooth tangent, clamped against neighbor y to prevent overshoot.
    #[default]
    AutoClamped,
    /// Straight segments toward both neighbors.
    Vector,
}

/// A single control point of an editable curve.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CurvePoint {
    /// X/Y coordinates; x lives in the curve's `[0, 1]` edit domain.
    pub location: Vec2,
    /// Tangent handle policy at this point.
    pub handle: HandleType,
    /// Editor selection state.
    pub select: bool,
}

impl CurvePoint {
    /// Creates a point with the given location and handle policy.
    #[must_use]
    pub fn new(location: impl Into<Vec2>, handle: HandleType) -> Self {
        Self {
            location: location.into(),
            handle,
            select: false,
        }
    }
}

impl Default for CurvePoint {
    fn default() -> Self {
        Self {
            location: Vec2::default(),
            handle: HandleType::default(),
            select: false,
        }
    }
}
