//! Per-entity weight expressions and their compiled form.

use morphkit_foundation::Reference;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How an explicit contributor set is folded into one output.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum AggregatePolicy {
    /// Product of the contributor outputs.
    #[default]
    Multiply,
    /// Minimum contributor output.
    Min,
    /// Maximum contributor output.
    Max,
    /// Arithmetic mean of the contributor outputs.
    Average,
}

/// The declared output expression of one entity.
///
/// The default family (`Stored` for roots, `ParentScaled` otherwise)
/// depends only on the entity's immediate parent, never on the whole
/// ancestor chain. `Combine` replaces the default with an aggregation
/// over an explicit, user-curated set of sibling outputs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum WeightExpr {
    /// Root form: the entity's stored value drives the channel
    /// directly, with no parent factor.
    Stored,
    /// Non-root default: `output(parent) * curve(input(self))`.
    ParentScaled {
        /// Reference to the immediate parent entity.
        parent: Reference,
    },
    /// Aggregation policy over an explicit contributor set.
    Combine {
        /// The fold applied over the contributor outputs.
        policy: AggregatePolicy,
        /// References to the contributing entities.
        contributors: Vec<Reference>,
    },
}

/// A compiled scripted binding for one channel, consumed by the host
/// evaluator: an expression over named variables, each variable bound
/// to a channel or component path.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WeightBinding {
    /// The driven channel (the entity's name).
    pub channel: String,
    /// Scripted expression over the variable names.
    pub expression: String,
    /// `(variable name, target path)` pairs. Targets are either
    /// `channel/<name>` for another entity's output or a component
    /// path for the entity's own input parameter.
    pub variables: Vec<(String, String)>,
}
