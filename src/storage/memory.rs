//! In-memory storage backend

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::types::Contact;
use crate::Result;

use super::{insert_into, remove_from, replace_in, ContactStore};

/// Volatile contact storage; contents are lost on restart
#[derive(Default)]
pub struct MemoryStore {
    contacts: RwLock<Vec<Contact>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Contact>> {
        Ok(self.contacts.read().await.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<Contact>> {
        let contacts = self.contacts.read().await;
        Ok(contacts.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, contact: Contact) -> Result<()> {
        let mut contacts = self.contacts.write().await;
        insert_into(&mut contacts, contact)
    }

    async fn replace(&self, contact: Contact) -> Result<bool> {
        let mut contacts = self.contacts.write().await;
        Ok(replace_in(&mut contacts, contact))
    }

    async fn remove(&self, id: &str) -> Result<bool> {
        let mut contacts = self.contacts.write().await;
        Ok(remove_from(&mut contacts, id))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.contacts.read().await.len())
    }
}
