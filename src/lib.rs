//! Morphkit - Reactive morph-target weight runtime
//!
//! This crate re-exports all layers of the Morphkit system for convenient
//! access. For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: morphkit_runtime    — Snapshot persistence
//! Layer 3: morphkit_weights    — Weight-propagation topology
//!          morphkit_reactive   — Processors, tag dispatch, system facade
//! Layer 2: morphkit_storage    — Entity tree, component store, world
//! Layer 1: morphkit_curves     — Curve model, Bezier keyframe compiler
//! Layer 0: morphkit_foundation — Ids, errors, tags, references
//! ```

pub use morphkit_curves as curves;
pub use morphkit_foundation as foundation;
pub use morphkit_reactive as reactive;
pub use morphkit_runtime as runtime;
pub use morphkit_storage as storage;
pub use morphkit_weights as weights;
