//! Reactive dispatch for Morphkit.
//!
//! This crate provides:
//! - [`ProcessorRegistry`] - Named handler registration
//! - [`Processor`] - A handler bound to an entity with a tag-matched,
//!   incrementally maintained argument list
//! - [`System`] - The orchestration facade: attach/detach with hooks
//!   and dispatch, mirror propagation, and external change intake
//! - [`host`] - Traits for the host-owned collaborators

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod host;
mod processor;
mod registry;
mod system;

pub use processor::Processor;
pub use registry::{Handler, ProcessorRegistry};
pub use system::System;
