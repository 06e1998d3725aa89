//! File-backed address store
//!
//! Keeps all records in memory and rewrites a JSON file after every mutation.
//! Default location: ~/.local/share/address-book/addresses.json

use super::{records, AddressStore};
use crate::address::Address;
use crate::config::defaults::{APP_DIR_NAME, STORE_FILE_NAME};
use crate::error::{Error, Result};
use crate::geo::BoundingBox;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::debug;

/// JSON file store
#[derive(Debug)]
pub struct JsonFileStore {
    records: RwLock<Vec<Address>>,
    path: PathBuf,
}

impl JsonFileStore {
    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Store("Could not determine data directory".to_string()))
    }

    /// Get the default store file path
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join(STORE_FILE_NAME))
    }

    /// Open the store at `path`, starting empty if the file doesn't exist
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let exists = tokio::fs::try_exists(&path)
            .await
            .map_err(|e| Error::Store(format!("Failed to access {}: {}", path.display(), e)))?;

        let records: Vec<Address> = if exists {
            let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
                Error::Store(format!("Failed to read {}: {}", path.display(), e))
            })?;

            serde_json::from_str(&content).map_err(|e| {
                Error::Store(format!("Failed to parse {}: {}", path.display(), e))
            })?
        } else {
            Vec::new()
        };

        debug!("Opened {} with {} addresses", path.display(), records.len());

        Ok(Self {
            records: RwLock::new(records),
            path,
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write all records to disk
    async fn save(&self, records: &[Address]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Error::Store(format!("Failed to create store directory: {}", e))
            })?;
        }

        let content = serde_json::to_string_pretty(records)
            .map_err(|e| Error::Store(format!("Failed to serialize addresses: {}", e)))?;

        // Atomic replace
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content)
            .await
            .map_err(|e| Error::Store(format!("Failed to write store file: {}", e)))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| Error::Store(format!("Failed to replace store file: {}", e)))?;

        Ok(())
    }
}

impl AddressStore for JsonFileStore {
    async fn insert(&self, address: Address) -> Result<Address> {
        let mut entries = self.records.write().await;
        if entries.iter().any(|a| a.id == address.id) {
            return Err(Error::Store(format!("Duplicate address id: {}", address.id)));
        }
        entries.push(address.clone());

        if let Err(e) = self.save(&entries).await {
            entries.pop();
            return Err(e);
        }
        Ok(address)
    }

    async fn get(&self, id: &str) -> Result<Option<Address>> {
        Ok(records::find(&self.records.read().await, id))
    }

    async fn range_query(&self, bounds: &BoundingBox) -> Result<Vec<Address>> {
        Ok(records::within(&self.records.read().await, bounds))
    }

    async fn update(&self, address: Address) -> Result<Option<Address>> {
        let mut entries = self.records.write().await;
        let Some(previous) = records::find(&entries, &address.id) else {
            return Ok(None);
        };

        let updated = records::replace(&mut entries, address);
        if let Err(e) = self.save(&entries).await {
            records::replace(&mut entries, previous);
            return Err(e);
        }
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut entries = self.records.write().await;
        let Some(idx) = entries.iter().position(|a| a.id == id) else {
            return Ok(false);
        };

        let removed = entries.remove(idx);
        if let Err(e) = self.save(&entries).await {
            entries.insert(idx, removed);
            return Err(e);
        }
        Ok(true)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.records.read().await.len())
    }
}
