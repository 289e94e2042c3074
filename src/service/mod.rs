//! Contact management
//!
//! `ContactService` is the collaborator the HTTP layer talks to. It owns
//! identifier assignment and existence checks; persistence is delegated to a
//! [`ContactStore`].

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::storage::ContactStore;
use crate::types::{Contact, ContactPayload};
use crate::validation::Validate;
use crate::{Error, Result};

#[async_trait]
pub trait ContactService: Send + Sync {
    /// All contacts, in insertion order
    async fn list_contacts(&self) -> Result<Vec<Contact>>;

    async fn get_by_id(&self, id: &str) -> Result<Contact>;

    /// Store a new contact under a freshly assigned id
    async fn save(&self, payload: ContactPayload) -> Result<Contact>;

    /// Replace every field of an existing contact
    async fn update(&self, id: &str, payload: ContactPayload) -> Result<()>;

    async fn delete(&self, id: &str) -> Result<()>;

    async fn count(&self) -> Result<usize>;
}

/// `ContactService` backed by a storage backend
pub struct StoredContactService {
    store: Arc<dyn ContactStore>,
}

impl StoredContactService {
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ContactService for StoredContactService {
    async fn list_contacts(&self) -> Result<Vec<Contact>> {
        self.store.list().await
    }

    async fn get_by_id(&self, id: &str) -> Result<Contact> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| Error::not_found(id))
    }

    async fn save(&self, mut payload: ContactPayload) -> Result<Contact> {
        payload.normalize();
        payload.validate().map_err(Error::Validation)?;

        let contact = Contact::from_payload(Uuid::new_v4().to_string(), payload);
        self.store.insert(contact.clone()).await?;

        tracing::info!(contact_id = %contact.id, "Created contact");
        Ok(contact)
    }

    async fn update(&self, id: &str, mut payload: ContactPayload) -> Result<()> {
        payload.normalize();
        payload.validate().map_err(Error::Validation)?;

        let contact = Contact::from_payload(id.to_string(), payload);
        if !self.store.replace(contact).await? {
            return Err(Error::not_found(id));
        }

        tracing::info!(contact_id = %id, "Updated contact");
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        if !self.store.remove(id).await? {
            return Err(Error::not_found(id));
        }

        tracing::info!(contact_id = %id, "Deleted contact");
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        self.store.count().await
    }
}
