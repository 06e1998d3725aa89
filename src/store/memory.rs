//! In-memory address store

use super::{records, AddressStore};
use crate::address::Address;
use crate::error::{Error, Result};
use crate::geo::BoundingBox;
use tokio::sync::RwLock;

/// Volatile store backed by a vector in insertion order
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<Address>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl AddressStore for MemoryStore {
    async fn insert(&self, address: Address) -> Result<Address> {
        let mut records = self.records.write().await;
        if records.iter().any(|a| a.id == address.id) {
            return Err(Error::Store(format!("Duplicate address id: {}", address.id)));
        }
        records.push(address.clone());
        Ok(address)
    }

    async fn get(&self, id: &str) -> Result<Option<Address>> {
        Ok(records::find(&self.records.read().await, id))
    }

    async fn range_query(&self, bounds: &BoundingBox) -> Result<Vec<Address>> {
        Ok(records::within(&self.records.read().await, bounds))
    }

    async fn update(&self, address: Address) -> Result<Option<Address>> {
        Ok(records::replace(&mut self.records.write().await, address))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        Ok(records::remove(&mut *self.records.write().await, id))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.records.read().await.len())
    }
}
