//! Component type descriptors.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kind of payload a component carries.
///
/// Used to validate typed accessors and to encode component paths.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ComponentKind {
    /// Externally driven scalar value.
    Value,
    /// Min/max interval.
    Range,
    /// Parametric remapping curve.
    Curve,
    /// Numeric driver-property descriptor.
    Property,
    /// Binding to an externally owned morph target.
    MorphTarget,
}

impl ComponentKind {
    /// All component kinds, in declaration order.
    pub const ALL: [ComponentKind; 5] = [
        ComponentKind::Value,
        ComponentKind::Range,
        ComponentKind::Curve,
        ComponentKind::Property,
        ComponentKind::MorphTarget,
    ];

    /// Returns the path token for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ComponentKind::Value => "value",
            ComponentKind::Range => "range",
            ComponentKind::Curve => "curve",
            ComponentKind::Property => "property",
            ComponentKind::MorphTarget => "target",
        }
    }

    /// Parses a path token back into a kind.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == token)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
