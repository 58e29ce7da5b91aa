//! Editable parametric curves.

use morphkit_foundation::{Error, Result, StructuralKind};

use crate::compile::to_bezier;
use crate::geom::Vec2;
use crate::keyframe::Keyframe;
use crate::point::{CurvePoint, HandleType};
use crate::presets::{Easing, Extend, Interpolation, preset_points};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An editable remapping curve: a preset or custom control point list
/// plus the extend policy, compiled on demand into [`Keyframe`]s.
///
/// The point list is kept x-ascending at all times and never drops
/// below two points. Any point edit switches the curve to
/// [`Interpolation::Custom`]; selecting a preset replaces the entire
/// point list.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Curve {
    points: Vec<CurvePoint>,
    interpolation: Interpolation,
    easing: Easing,
    extend: Extend,
}

impl Default for Curve {
    fn default() -> Self {
        Self::new()
    }
}

impl Curve {
    /// Creates a linear curve.
    #[must_use]
    pub fn new() -> Self {
        Self::from_preset(Interpolation::Linear, Easing::InOut)
    }

    /// Creates a curve from a preset; `Custom` falls back to linear.
    #[must_use]
    pub fn from_preset(interpolation: Interpolation, easing: Easing) -> Self {
        let points = preset_points(interpolation, easing)
            .unwrap_or_else(|| preset_points(Interpolation::Linear, easing).unwrap_or_default());
        Self {
            points,
            interpolation,
            easing,
            extend: Extend::default(),
        }
    }

    /// The control points, x-ascending.
    #[must_use]
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// The active interpolation preset.
    #[must_use]
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// The easing direction used by non-linear presets.
    #[must_use]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// The extend policy.
    #[must_use]
    pub fn extend(&self) -> Extend {
        self.extend
    }

    /// Selects an interpolation preset, replacing the point list;
    /// `Custom` keeps the current points and opens them for editing.
    pub fn set_interpolation(&mut self, interpolation: Interpolation) {
        if let Some(points) = preset_points(interpolation, self.easing) {
            self.points = points;
        }
        self.interpolation = interpolation;
    }

    /// Changes the easing direction, re-applying the active preset for
    /// the non-linear families (linear and custom curves are
    /// unaffected beyond the stored direction).
    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
        if !matches!(self.interpolation, Interpolation::Custom | Interpolation::Linear) {
            if let Some(points) = preset_points(self.interpolation, easing) {
                self.points = points;
            }
        }
    }

    /// Sets the extend policy.
    pub fn set_extend(&mut self, extend: Extend) {
        self.extend = extend;
    }

    /// Adds a control point, keeping the list x-ascending. Switches the
    /// curve to custom editing. Returns the new point's index.
    pub fn add_point(&mut self, location: impl Into<Vec2>) -> usize {
        let location = location.into();
        let index = self
            .points
            .partition_point(|p| p.location.x <= location.x);
        self.points
            .insert(index, CurvePoint::new(location, HandleType::default()));
        self.interpolation = Interpolation::Custom;
        index
    }

    /// Removes a control point.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for an out-of-range index and a
    /// structural error when only two points remain. Nothing is
    /// mutated on failure.
    pub fn remove_point(&mut self, index: usize) -> Result<CurvePoint> {
        if index >= self.points.len() {
            return Err(Error::lookup_failure(format!("curve point {index}")));
        }
        if self.points.len() <= 2 {
            return Err(Error::structural(StructuralKind::PointMinimum));
        }
        self.interpolation = Interpolation::Custom;
        Ok(self.points.remove(index))
    }

    /// Moves a control point, re-sorting the list by x.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for an out-of-range index.
    pub fn set_location(&mut self, index: usize, location: impl Into<Vec2>) -> Result<()> {
        let point = self
            .points
            .get_mut(index)
            .ok_or_else(|| Error::lookup_failure(format!("curve point {index}")))?;
        point.location = location.into();
        self.points
            .sort_by(|a, b| a.location.x.total_cmp(&b.location.x));
        self.interpolation = Interpolation::Custom;
        Ok(())
    }

    /// Changes a control point's handle policy.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for an out-of-range index.
    pub fn set_handle(&mut self, index: usize, handle: HandleType) -> Result<()> {
        let point = self
            .points
            .get_mut(index)
            .ok_or_else(|| Error::lookup_failure(format!("curve point {index}")))?;
        point.handle = handle;
        self.interpolation = Interpolation::Custom;
        Ok(())
    }

    /// Sets a control point's editor selection state.
    ///
    /// # Errors
    ///
    /// Fails with a lookup failure for an out-of-range index.
    pub fn set_selected(&mut self, index: usize, select: bool) -> Result<()> {
        let point = self
            .points
            .get_mut(index)
            .ok_or_else(|| Error::lookup_failure(format!("curve point {index}")))?;
        point.select = select;
        Ok(())
    }

    /// Compiles the curve into keyframes, optionally remapping the
    /// domain and range.
    ///
    /// # Errors
    ///
    /// Propagates the compiler's invariant check; see [`to_bezier`].
    pub fn compile(
        &self,
        range_x: Option<(f64, f64)>,
        range_y: Option<(f64, f64)>,
    ) -> Result<Vec<Keyframe>> {
        to_bezier(
            &self.points,
            range_x,
            range_y,
            self.extend == Extend::Extrapolated,
        )
    }
}
