//! Curve model and Bezier keyframe compilation for Morphkit.
//!
//! This crate provides:
//! - [`Curve`] - An editable parametric remapping curve
//! - [`CurvePoint`] / [`HandleType`] - Control points with handle policies
//! - [`Interpolation`] / [`Easing`] - Easing preset selection
//! - [`Keyframe`] - Compiled tangent-handle keyframe descriptors
//! - [`to_bezier`] - The point-list to keyframe compiler

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod compile;
mod curve;
mod geom;
mod keyframe;
mod point;
mod presets;

pub use compile::to_bezier;
pub use curve::Curve;
pub use geom::Vec2;
pub use keyframe::Keyframe;
pub use point::{CurvePoint, HandleType};
pub use presets::{Easing, Extend, Interpolation, preset_points};
