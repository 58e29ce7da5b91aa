//! Easing preset tables.
//!
//! Selecting a non-custom interpolation replaces a curve's entire point
//! list with one of these tables. The control points reproduce the
//! classic easing families with two to four Bezier points each.

use crate::point::{CurvePoint, HandleType};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Interpolation preset family.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Interpolation {
    /// Straight line.
    #[default]
    Linear,
    /// Sinusoidal easing.
    Sine,
    /// Quadratic easing.
    Quad,
    /// Cubic easing.
    Cubic,
    /// Quartic easing.
    Quart,
    /// Quintic easing.
    Quint,
    /// User-edited control points.
    Custom,
}

/// Easing direction for the non-linear preset families.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Easing {
    /// Ease in.
    In,
    /// Ease out.
    Out,
    /// Ease in and out.
    #[default]
    InOut,
}

/// Behavior of the curve outside its point range.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Extend {
    /// Extend horizontally: outer handles are flattened.
    #[default]
    Horizontal,
    /// Extrapolate along the computed end tangents.
    Extrapolated,
}

fn pt(x: f64, y: f64, handle: HandleType) -> CurvePoint {
    CurvePoint::new((x, y), handle)
}

fn eased(ease_in: (f64, f64), ease_out: (f64, f64), easing: Easing) -> Vec<CurvePoint> {
    use HandleType::{Auto, AutoClamped};
    let first = pt(0.0, 0.0, Auto);
    let last = pt(1.0, 1.0, Auto);
    match easing {
        Easing::In => vec![first, pt(ease_in.0, ease_in.1, AutoClamped), last],
        Easing::Out => vec![first, pt(ease_out.0, ease_out.1, AutoClamped), last],
        Easing::InOut => vec![
            first,
            pt(ease_in.0, ease_in.1, AutoClamped),
            pt(ease_out.0, ease_out.1, AutoClamped),
            last,
        ],
    }
}

/// Returns the control points of a preset, or `None` for
/// [`Interpolation::Custom`].
///
/// [`Interpolation::Linear`] ignores the easing direction.
#[must_use]
pub fn preset_points(interpolation: Interpolation, easing: Easing) -> Option<Vec<CurvePoint>> {
    use HandleType::Vector;
    match interpolation {
        Interpolation::Linear => Some(vec![pt(0.0, 0.0, Vector), pt(1.0, 1.0, Vector)]),
        Interpolation::Sine => Some(eased((0.1, 0.03), (0.9, 0.97), easing)),
        Interpolation::Quad => Some(eased((0.15, 0.045), (0.85, 0.955), easing)),
        Interpolation::Cubic => Some(eased((0.2, 0.03), (0.8, 0.97), easing)),
        Interpolation::Quart => Some(eased((0.25, 0.03), (0.75, 0.97), easing)),
        Interpolation::Quint => Some(eased((0.275, 0.025), (0.725, 0.975), easing)),
        Interpolation::Custom => None,
    }
}
