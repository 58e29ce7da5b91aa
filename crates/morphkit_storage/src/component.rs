//! Typed component capsules.
//!
//! A component is a data capsule attachable to any number of entities.
//! The capsule fields (name, label, visibility, disposal policy, owner
//! links, mirror link) are shared; the payload is one of the typed
//! variants of [`ComponentData`].

use morphkit_curves::Curve;
use morphkit_foundation::{
    ComponentId, ComponentKind, Error, RefPath, Reference, ReferenceCollection, Result,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Hard clamp applied to externally driven scalar values.
const VALUE_MIN: f64 = 0.0;
const VALUE_MAX: f64 = 10.0;

/// An externally driven scalar.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ValueData {
    value: f64,
}

impl ValueData {
    /// Creates a value capsule, clamped to the hard range.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            value: value.clamp(VALUE_MIN, VALUE_MAX),
        }
    }

    /// The current value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Sets the value, clamped to the hard range.
    pub fn set_value(&mut self, value: f64) {
        self.value = value.clamp(VALUE_MIN, VALUE_MAX);
    }
}

/// A min/max interval.
///
/// The `min <= max` invariant is maintained by clamping on write, never
/// by rejecting.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RangeData {
    min: f64,
    max: f64,
}

impl Default for RangeData {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

impl RangeData {
    /// Creates an interval; reversed bounds are swapped.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        if min > max {
            Self { min: max, max: min }
        } else {
            Self { min, max }
        }
    }

    /// The lower bound.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// The upper bound.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Sets the lower bound, clamped against the upper bound.
    /// Returns true if the stored value changed.
    pub fn set_min(&mut self, value: f64) -> bool {
        let value = value.min(self.max);
        let changed = (self.min - value).abs() > f64::EPSILON;
        self.min = value;
        changed
    }

    /// Sets the upper bound, clamped against the lower bound.
    /// Returns true if the stored value changed.
    pub fn set_max(&mut self, value: f64) -> bool {
        let value = value.max(self.min);
        let changed = (self.max - value).abs() > f64::EPSILON;
        self.max = value;
        changed
    }
}

/// A numeric driver-property descriptor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PropertyData {
    /// Default value of the property.
    pub default: f64,
    /// Hard lower bound.
    pub min: f64,
    /// Hard upper bound.
    pub max: f64,
    /// Soft lower bound used by slider interfaces.
    pub soft_min: f64,
    /// Soft upper bound used by slider interfaces.
    pub soft_max: f64,
    /// Human-readable description.
    pub description: String,
}

impl Default for PropertyData {
    fn default() -> Self {
        Self {
            default: 0.0,
            min: -100_000.0,
            max: 100_000.0,
            soft_min: -100_000.0,
            soft_max: 100_000.0,
            description: String::new(),
        }
    }
}

impl PropertyData {
    /// A unit-interval property defaulting to 1.0, the shape used for
    /// per-entity input parameters.
    #[must_use]
    pub fn unit() -> Self {
        Self {
            default: 1.0,
            min: 0.0,
            max: 1.0,
            soft_min: 0.0,
            soft_max: 1.0,
            description: String::new(),
        }
    }
}

/// Component-local mirror of an externally owned morph target.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MorphTargetData {
    /// The target's current name.
    pub target: String,
    /// Mirror of the target's lower slider bound.
    pub slider_min: f64,
    /// Mirror of the target's upper slider bound.
    pub slider_max: f64,
}

impl MorphTargetData {
    /// Creates a binding mirror for the named target.
    #[must_use]
    pub fn new(target: impl Into<String>, slider_min: f64, slider_max: f64) -> Self {
        Self {
            target: target.into(),
            slider_min,
            slider_max,
        }
    }
}

/// The typed payload of a component.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ComponentData {
    /// Externally driven scalar.
    Value(ValueData),
    /// Min/max interval.
    Range(RangeData),
    /// Parametric remapping curve.
    Curve(Curve),
    /// Numeric driver-property descriptor.
    Property(PropertyData),
    /// Morph-target binding mirror.
    MorphTarget(MorphTargetData),
}

impl ComponentData {
    /// The kind tag of this payload.
    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentData::Value(_) => ComponentKind::Value,
            ComponentData::Range(_) => ComponentKind::Range,
            ComponentData::Curve(_) => ComponentKind::Curve,
            ComponentData::Property(_) => ComponentKind::Property,
            ComponentData::MorphTarget(_) => ComponentKind::MorphTarget,
        }
    }
}

/// A typed, attachable data capsule.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Component {
    id: ComponentId,
    name: String,
    label: String,
    hide: bool,
    disposable: bool,
    owners: ReferenceCollection,
    mirror: Option<Reference>,
    data: ComponentData,
}

impl Component {
    pub(crate) fn new(id: ComponentId, name: impl Into<String>, data: ComponentData) -> Self {
        Self {
            id,
            name: name.into(),
            label: String::new(),
            hide: false,
            disposable: false,
            owners: ReferenceCollection::new(),
            mirror: None,
            data,
        }
    }

    /// The component's stable id.
    #[must_use]
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// The component's stable unique name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The payload kind.
    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        self.data.kind()
    }

    /// The component's reference path.
    #[must_use]
    pub fn path(&self) -> RefPath {
        RefPath::Component(self.kind(), self.id)
    }

    /// A reference to this component carrying its name.
    #[must_use]
    pub fn reference(&self) -> Reference {
        Reference::new(self.name.clone(), self.path())
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Sets the display label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Whether the component is hidden from generic interfaces.
    #[must_use]
    pub fn hide(&self) -> bool {
        self.hide
    }

    /// Sets the hidden flag.
    pub fn set_hide(&mut self, hide: bool) {
        self.hide = hide;
    }

    /// Whether the component is destroyed once its owner set empties.
    #[must_use]
    pub fn disposable(&self) -> bool {
        self.disposable
    }

    /// Sets the disposal policy.
    pub fn set_disposable(&mut self, disposable: bool) {
        self.disposable = disposable;
    }

    /// The entities currently owning (attached to) this component.
    #[must_use]
    pub fn owners(&self) -> &ReferenceCollection {
        &self.owners
    }

    pub(crate) fn owners_mut(&mut self) -> &mut ReferenceCollection {
        &mut self.owners
    }

    /// The symmetry-linked counterpart, if any.
    #[must_use]
    pub fn mirror(&self) -> Option<&Reference> {
        self.mirror.as_ref()
    }

    /// Sets or clears the symmetry link.
    pub fn set_mirror(&mut self, mirror: Option<Reference>) {
        self.mirror = mirror;
    }

    /// The raw payload.
    #[must_use]
    pub fn data(&self) -> &ComponentData {
        &self.data
    }

    /// Typed access to a value payload.
    ///
    /// # Errors
    ///
    /// Fails with a type mismatch for any other payload kind.
    pub fn value(&self) -> Result<&ValueData> {
        match &self.data {
            ComponentData::Value(data) => Ok(data),
            other => Err(Error::type_mismatch(ComponentKind::Value, other.kind())),
        }
    }

    /// Typed mutable access to a value payload.
    ///
    /// # Errors
    ///
    /// Fails with a type mismatch for any other payload kind.
    pub fn value_mut(&mut self) -> Result<&mut ValueData> {
        match &mut self.data {
            ComponentData::Value(data) => Ok(data),
            other => Err(Error::type_mismatch(ComponentKind::Value, other.kind())),
        }
    }

    /// Typed access to a range payload.
    ///
    /// # Errors
    ///
    /// Fails with a type mismatch for any other payload kind.
    pub fn range(&self) -> Result<&RangeData> {
        match &self.data {
            ComponentData::Range(data) => Ok(data),
            other => Err(Error::type_mismatch(ComponentKind::Range, other.kind())),
        }
    }

    /// Typed mutable access to a range payload.
    ///
    /// # Errors
    ///
    /// Fails with a type mismatch for any other payload kind.
    pub fn range_mut(&mut self) -> Result<&mut RangeData> {
        match &mut self.data {
            ComponentData::Range(data) => Ok(data),
            other => Err(Error::type_mismatch(ComponentKind::Range, other.kind())),
        }
    }

    /// Typed access to a curve payload.
    ///
    /// # Errors
    ///
    /// Fails with a type mismatch for any other payload kind.
    pub fn curve(&self) -> Result<&Curve> {
        match &self.data {
            ComponentData::Curve(data) => Ok(data),
            other => Err(Error::type_mismatch(ComponentKind::Curve, other.kind())),
        }
    }

    /// Typed mutable access to a curve payload.
    ///
    /// # Errors
    ///
    /// Fails with a type mismatch for any other payload kind.
    pub fn curve_mut(&mut self) -> Result<&mut Curve> {
        match &mut self.data {
            ComponentData::Curve(data) => Ok(data),
            other => Err(Error::type_mismatch(ComponentKind::Curve, other.kind())),
        }
    }

    /// Typed access to a property payload.
    ///
    /// # Errors
    ///
    /// Fails with a type mismatch for any other payload kind.
    pub fn property(&self) -> Result<&PropertyData> {
        match &self.data {
            ComponentData::Property(data) => Ok(data),
            other => Err(Error::type_mismatch(ComponentKind::Property, other.kind())),
        }
    }

    /// Typed mutable access to a property payload.
    ///
    /// # Errors
    ///
    /// Fails with a type mismatch for any other payload kind.
    pub fn property_mut(&mut self) -> Result<&mut PropertyData> {
        match &mut self.data {
            ComponentData::Property(data) => Ok(data),
            other => Err(Error::type_mismatch(ComponentKind::Property, other.kind())),
        }
    }

    /// Typed access to a morph-target payload.
    ///
    /// # Errors
    ///
    /// Fails with a type mismatch for any other payload kind.
    pub fn morph_target(&self) -> Result<&MorphTargetData> {
        match &self.data {
            ComponentData::MorphTarget(data) => Ok(data),
            other => Err(Error::type_mismatch(
                ComponentKind::MorphTarget,
                other.kind(),
            )),
        }
    }

    /// Typed mutable access to a morph-target payload.
    ///
    /// # Errors
    ///
    /// Fails with a type mismatch for any other payload kind.
    pub fn morph_target_mut(&mut self) -> Result<&mut MorphTargetData> {
        match &mut self.data {
            ComponentData::MorphTarget(data) => Ok(data),
            other => Err(Error::type_mismatch(
                ComponentKind::MorphTarget,
                other.kind(),
            )),
        }
    }
}
