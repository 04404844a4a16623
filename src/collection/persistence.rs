//! Snapshot persistence for the band collection.
//!
//! A snapshot is the whole collection serialized as MessagePack and written
//! atomically: to a temp file first, synced, then renamed over the target.
//! A crash mid-save leaves the previous snapshot intact.

use crate::core::{CommandError, Result};
use crate::model::MusicBand;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionSnapshot {
    pub version: u32,
    pub next_id: u64,
    pub bands: Vec<MusicBand>,
    pub metadata: SnapshotMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub collection_created_at: DateTime<Utc>,
    pub saved_at: DateTime<Utc>,
    pub band_count: usize,
}

impl CollectionSnapshot {
    pub fn new(bands: Vec<MusicBand>, next_id: u64, collection_created_at: DateTime<Utc>) -> Self {
        let band_count = bands.len();
        Self {
            version: SNAPSHOT_VERSION,
            next_id,
            bands,
            metadata: SnapshotMetadata {
                collection_created_at,
                saved_at: Utc::now(),
                band_count,
            },
        }
    }
}

/// Owns the snapshot file location; the store itself never does I/O.
#[derive(Debug, Clone)]
pub struct SnapshotManager {
    snapshot_path: PathBuf,
}

impl SnapshotManager {
    pub fn new<P: AsRef<Path>>(snapshot_path: P) -> Self {
        Self {
            snapshot_path: snapshot_path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.snapshot_path
    }

    pub fn save(&self, snapshot: &CollectionSnapshot) -> Result<()> {
        if let Some(parent) = self.snapshot_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                CommandError::Persistence(format!("failed to create snapshot directory: {}", e))
            })?;
        }
        let temp_path = self.snapshot_path.with_extension("tmp");
        let temp_file = File::create(&temp_path)
            .map_err(|e| CommandError::Persistence(format!("failed to create temp file: {}", e)))?;
        let mut writer = BufWriter::new(temp_file);
        let serialized = rmp_serde::to_vec(snapshot).map_err(|e| {
            CommandError::Persistence(format!("failed to serialize snapshot: {}", e))
        })?;
        writer
            .write_all(&serialized)
            .map_err(|e| CommandError::Persistence(format!("failed to write snapshot: {}", e)))?;
        writer
            .flush()
            .map_err(|e| CommandError::Persistence(format!("failed to flush snapshot: {}", e)))?;
        writer
            .get_mut()
            .sync_all()
            .map_err(|e| CommandError::Persistence(format!("failed to sync snapshot: {}", e)))?;
        fs::rename(&temp_path, &self.snapshot_path)
            .map_err(|e| CommandError::Persistence(format!("failed to rename snapshot: {}", e)))?;
        Ok(())
    }

    /// `Ok(None)` when no snapshot exists yet; an unreadable snapshot is an
    /// error the caller decides how to treat (fatal at startup).
    pub fn load(&self) -> Result<Option<CollectionSnapshot>> {
        if !self.snapshot_path.exists() {
            return Ok(None);
        }
        let mut file = File::open(&self.snapshot_path)
            .map_err(|e| CommandError::Persistence(format!("failed to open snapshot: {}", e)))?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)
            .map_err(|e| CommandError::Persistence(format!("failed to read snapshot: {}", e)))?;
        let snapshot: CollectionSnapshot = rmp_serde::from_slice(&data).map_err(|e| {
            CommandError::Persistence(format!("failed to deserialize snapshot: {}", e))
        })?;
        Ok(Some(snapshot))
    }

    pub fn exists(&self) -> bool {
        self.snapshot_path.exists()
    }

    pub fn delete(&self) -> Result<()> {
        if self.snapshot_path.exists() {
            fs::remove_file(&self.snapshot_path).map_err(|e| {
                CommandError::Persistence(format!("failed to delete snapshot: {}", e))
            })?;
        }
        Ok(())
    }
}
