//! Address persistence
//!
//! This module defines the `AddressStore` trait and its implementations.
//! Any backend that can range-query two numeric columns fits the trait.
//!
//! ## Backends
//! - `memory`: volatile, for tests and throwaway servers
//! - `file`: JSON file, rewritten after every mutation

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::address::Address;
use crate::error::Result;
use crate::geo::BoundingBox;
use std::future::Future;

/// Persistence for address records, keyed by id
pub trait AddressStore: Send + Sync {
    /// Store a new record
    fn insert(&self, address: Address) -> impl Future<Output = Result<Address>> + Send;

    /// Look a record up by id
    fn get(&self, id: &str) -> impl Future<Output = Result<Option<Address>>> + Send;

    /// All records whose coordinates lie inside `bounds`, in storage order
    fn range_query(&self, bounds: &BoundingBox)
        -> impl Future<Output = Result<Vec<Address>>> + Send;

    /// Replace the record with the same id
    ///
    /// Returns `None` if no such record exists.
    fn update(&self, address: Address) -> impl Future<Output = Result<Option<Address>>> + Send;

    /// Remove a record, returning whether it existed
    fn delete(&self, id: &str) -> impl Future<Output = Result<bool>> + Send;

    /// Number of stored records
    fn count(&self) -> impl Future<Output = Result<usize>> + Send;
}

/// Storage backend selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Memory,
    File,
}

impl std::fmt::Display for StorageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::File => write!(f, "file"),
        }
    }
}

impl std::str::FromStr for StorageKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "mem" => Ok(Self::Memory),
            "file" | "json" => Ok(Self::File),
            _ => Err(format!("Unknown storage backend: {}", s)),
        }
    }
}

/// Shared in-memory operations over storage-ordered records
pub(crate) mod records {
    use super::*;

    pub fn find(records: &[Address], id: &str) -> Option<Address> {
        records.iter().find(|a| a.id == id).cloned()
    }

    pub fn within(records: &[Address], bounds: &BoundingBox) -> Vec<Address> {
        records
            .iter()
            .filter(|a| bounds.contains(&a.coordinates()))
            .cloned()
            .collect()
    }

    pub fn replace(records: &mut [Address], address: Address) -> Option<Address> {
        let slot = records.iter_mut().find(|a| a.id == address.id)?;
        *slot = address.clone();
        Some(address)
    }

    pub fn remove(records: &mut Vec<Address>, id: &str) -> bool {
        match records.iter().position(|a| a.id == id) {
            Some(idx) => {
                records.remove(idx);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_kind_parsing() {
        assert_eq!("memory".parse::<StorageKind>().unwrap(), StorageKind::Memory);
        assert_eq!("FILE".parse::<StorageKind>().unwrap(), StorageKind::File);
        assert!("sqlite".parse::<StorageKind>().is_err());
        assert_eq!(StorageKind::File.to_string(), "file");
    }
}
