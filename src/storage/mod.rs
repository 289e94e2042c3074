//! Storage abstraction layer
//!
//! Provides a unified interface over the in-memory and local filesystem
//! contact stores

use async_trait::async_trait;

use crate::types::Contact;
use crate::{Error, Result};

pub mod local;
pub mod memory;

/// Storage backend trait
///
/// Implementations keep contacts in insertion order.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// List every stored contact
    async fn list(&self) -> Result<Vec<Contact>>;

    /// Fetch a contact by id
    async fn get(&self, id: &str) -> Result<Option<Contact>>;

    /// Insert a new contact; the id must not already exist
    async fn insert(&self, contact: Contact) -> Result<()>;

    /// Replace an existing contact, returning false if the id is unknown
    async fn replace(&self, contact: Contact) -> Result<bool>;

    /// Remove a contact, returning false if the id is unknown
    async fn remove(&self, id: &str) -> Result<bool>;

    /// Number of stored contacts
    async fn count(&self) -> Result<usize> {
        Ok(self.list().await?.len())
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    Memory,
    Local { root_path: String },
}

/// Create storage backend from config
pub async fn create_storage(config: StorageConfig) -> Result<Box<dyn ContactStore>> {
    match config {
        StorageConfig::Memory => Ok(Box::new(memory::MemoryStore::new())),
        StorageConfig::Local { root_path } => {
            let backend = local::LocalStore::open(root_path).await?;
            Ok(Box::new(backend))
        }
    }
}

pub(crate) fn insert_into(contacts: &mut Vec<Contact>, contact: Contact) -> Result<()> {
    if contacts.iter().any(|c| c.id == contact.id) {
        return Err(Error::storage(format!("duplicate contact id: {}", contact.id)));
    }
    contacts.push(contact);
    Ok(())
}

pub(crate) fn replace_in(contacts: &mut [Contact], contact: Contact) -> bool {
    match contacts.iter_mut().find(|c| c.id == contact.id) {
        Some(slot) => {
            *slot = contact;
            true
        }
        None => false,
    }
}

pub(crate) fn remove_from(contacts: &mut Vec<Contact>, id: &str) -> bool {
    match contacts.iter().position(|c| c.id == id) {
        Some(idx) => {
            contacts.remove(idx);
            true
        }
        None => false,
    }
}
