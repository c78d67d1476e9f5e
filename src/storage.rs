//! Durable slot storage.
//!
//! Named JSON slots under the configured data directory, mirroring the
//! two-slot client storage contract: a slot is read once when the owning
//! state is first needed and rewritten after every mutation. Reads are
//! fail-soft: a missing or corrupt slot is logged and treated as absent so
//! startup never fails on bad persisted state.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub struct SlotStorage {
    dir: PathBuf,
}

impl SlotStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating data directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }

    /// Read and deserialize a slot. Returns `None` when the slot does not
    /// exist or cannot be parsed; the latter is logged but never fatal.
    pub fn read<T: DeserializeOwned>(&self, slot: &str) -> Option<T> {
        let path = self.slot_path(slot);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!(slot, error = %err, "failed to read storage slot");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(slot, error = %err, "corrupt storage slot ignored");
                None
            }
        }
    }

    /// Serialize and write a slot, replacing any previous contents.
    pub fn write<T: Serialize>(&self, slot: &str, value: &T) -> Result<()> {
        let path = self.slot_path(slot);
        let raw = serde_json::to_string_pretty(value)
            .with_context(|| format!("serializing slot {slot}"))?;
        fs::write(&path, raw).with_context(|| format!("writing slot {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SlotStorage;

    #[test]
    fn round_trips_a_slot() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let storage = SlotStorage::new(dir.path())?;

        storage.write("cart-demo", &vec![1i64, 2, 3])?;
        let restored: Option<Vec<i64>> = storage.read("cart-demo");
        assert_eq!(restored, Some(vec![1, 2, 3]));
        Ok(())
    }

    #[test]
    fn missing_slot_reads_as_none() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let storage = SlotStorage::new(dir.path())?;
        let restored: Option<Vec<i64>> = storage.read("never-written");
        assert!(restored.is_none());
        Ok(())
    }

    #[test]
    fn corrupt_slot_reads_as_none() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let storage = SlotStorage::new(dir.path())?;

        std::fs::write(dir.path().join("cart-demo.json"), "{not json")?;
        let restored: Option<Vec<i64>> = storage.read("cart-demo");
        assert!(restored.is_none());
        Ok(())
    }
}
