//! Snapshot serialization and deserialization using `MessagePack`.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use morphkit_foundation::{EntityId, Error, ErrorKind, Result};
use morphkit_reactive::host::{ChangeBroker, KeyframeSink};
use morphkit_reactive::{Processor, ProcessorRegistry, System};
use morphkit_storage::World;
use morphkit_weights::WeightGraph;

/// The complete serializable core state.
///
/// Handler functions are not part of the snapshot; processors carry
/// only their stable handler ids, re-resolved against the registry the
/// host rebuilds at bootstrap.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    /// Entity tree and component store.
    pub world: World,
    /// Processor declarations per entity.
    pub processors: BTreeMap<EntityId, Vec<Processor>>,
    /// Declared weight-propagation topology.
    pub weights: WeightGraph,
}

impl Snapshot {
    /// Captures the current state of a system and weight graph.
    #[must_use]
    pub fn capture<S: KeyframeSink, B: ChangeBroker>(
        system: &System<S, B>,
        weights: &WeightGraph,
    ) -> Self {
        Self {
            world: system.world().clone(),
            processors: system.processors().clone(),
            weights: weights.clone(),
        }
    }

    /// Reassembles a live system around freshly provided host
    /// collaborators and a bootstrap-filled registry.
    pub fn into_system<S: KeyframeSink, B: ChangeBroker>(
        self,
        registry: ProcessorRegistry,
        sink: S,
        broker: B,
    ) -> (System<S, B>, WeightGraph) {
        (
            System::from_parts(self.world, self.processors, registry, sink, broker),
            self.weights,
        )
    }
}

/// Serializes a snapshot to bytes using `MessagePack` format.
///
/// Uses named serialization to preserve struct field names.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes(snapshot: &Snapshot) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(snapshot)
        .map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))
}

/// Deserializes a snapshot from `MessagePack` bytes.
///
/// # Errors
///
/// Returns an error if deserialization fails.
pub fn from_bytes(bytes: &[u8]) -> Result<Snapshot> {
    rmp_serde::from_slice(bytes).map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))
}

/// Saves a snapshot to a file using `MessagePack` format.
///
/// Creates the file if it doesn't exist, or overwrites it if it does.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to, or if
/// serialization fails.
pub fn save_to_file<P: AsRef<Path>>(snapshot: &Snapshot, path: P) -> Result<()> {
    let file = File::create(path.as_ref()).map_err(|e| {
        Error::new(ErrorKind::Io(format!(
            "failed to create file '{}': {e}",
            path.as_ref().display()
        )))
    })?;

    let mut writer = BufWriter::new(file);
    let bytes = to_bytes(snapshot)?;

    writer.write_all(&bytes).map_err(|e| {
        Error::new(ErrorKind::Io(format!(
            "failed to write to file '{}': {e}",
            path.as_ref().display()
        )))
    })?;

    writer.flush().map_err(|e| {
        Error::new(ErrorKind::Io(format!(
            "failed to flush file '{}': {e}",
            path.as_ref().display()
        )))
    })?;

    Ok(())
}

/// Loads a snapshot from a `MessagePack` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or if deserialization
/// fails.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Snapshot> {
    let file = File::open(path.as_ref()).map_err(|e| {
        Error::new(ErrorKind::Io(format!(
            "failed to open file '{}': {e}",
            path.as_ref().display()
        )))
    })?;

    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();

    reader.read_to_end(&mut bytes).map_err(|e| {
        Error::new(ErrorKind::Io(format!(
            "failed to read file '{}': {e}",
            path.as_ref().display()
        )))
    })?;

    from_bytes(&bytes)
}
