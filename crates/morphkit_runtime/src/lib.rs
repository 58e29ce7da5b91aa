//! Snapshot persistence for Morphkit.
//!
//! Serializes the core state (world, processor declarations, weight
//! topology) as plain structured data via `MessagePack`. No transient
//! pointers or indices are persisted; references travel as string
//! paths and resolve lazily on first dereference after reload.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod serialize;

pub use serialize::{Snapshot, from_bytes, load_from_file, save_to_file, to_bytes};
