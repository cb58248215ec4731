// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JSON snapshot file backing the in-memory store.
//!
//! The whole store is written as one document after each mutation. Writes go
//! to a temp file that is renamed over the target, so a crash mid-write
//! leaves the previous snapshot intact.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use super::StorageResult;

/// Snapshot file name inside the data directory.
pub const SNAPSHOT_FILE_NAME: &str = "store.json";

#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    /// Use `store.json` inside `data_dir`, creating the directory if needed.
    pub fn in_dir(data_dir: impl AsRef<Path>) -> StorageResult<Self> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir)?;
        Ok(Self {
            path: data_dir.join(SNAPSHOT_FILE_NAME),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot, or `None` if it has never been written.
    pub fn read<T: DeserializeOwned>(&self) -> StorageResult<Option<T>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let value = serde_json::from_reader(BufReader::new(file))?;
        Ok(Some(value))
    }

    /// Write the snapshot (atomic write via rename).
    pub fn write<T: Serialize>(&self, value: &T) -> StorageResult<()> {
        let temp_path = self.path.with_extension("tmp");
        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, value)?;
            writer.flush()?;
        }

        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}
