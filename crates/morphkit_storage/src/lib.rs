//! Entity tree storage, component storage, and world state for Morphkit.
//!
//! This crate provides:
//! - [`Entity`] / [`EntityStore`] - A preorder tree stored as a flat
//!   sequence with depth tags
//! - [`Component`] / [`ComponentStore`] - Typed component capsules with
//!   reference-counted disposal
//! - [`World`] - The unified storage interface and reference resolver

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod component;
mod entity;
mod store;
mod tree;
mod world;

pub use component::{
    Component, ComponentData, MorphTargetData, PropertyData, RangeData, ValueData,
};
pub use entity::Entity;
pub use store::ComponentStore;
pub use tree::EntityStore;
pub use world::World;
