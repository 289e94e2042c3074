//! Local filesystem storage backend
//!
//! Contacts are held in memory and written through to a single JSON snapshot
//! under the root path. Each write goes to a temp file which is then renamed
//! over the snapshot, so a crash never leaves a half-written file behind.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;

use crate::types::Contact;
use crate::Result;

use super::{insert_into, remove_from, replace_in, ContactStore};

const SNAPSHOT_FILE: &str = "contacts.json";

/// Local filesystem storage
pub struct LocalStore {
    snapshot_path: PathBuf,
    contacts: RwLock<Vec<Contact>>,
}

impl LocalStore {
    /// Open the store under `root_path`, loading any existing snapshot
    pub async fn open(root_path: impl Into<PathBuf>) -> Result<Self> {
        let root_path = root_path.into();
        fs::create_dir_all(&root_path).await?;

        let snapshot_path = root_path.join(SNAPSHOT_FILE);
        let contacts = if fs::try_exists(&snapshot_path).await? {
            let data = fs::read(&snapshot_path).await?;
            serde_json::from_slice(&data)?
        } else {
            Vec::new()
        };

        tracing::info!(
            path = %snapshot_path.display(),
            contacts = contacts.len(),
            "Opened local contact store"
        );

        Ok(Self {
            snapshot_path,
            contacts: RwLock::new(contacts),
        })
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    async fn persist(&self, contacts: &[Contact]) -> Result<()> {
        let data = serde_json::to_vec_pretty(contacts)?;
        let tmp_path = self.snapshot_path.with_extension("json.tmp");
        fs::write(&tmp_path, &data).await?;
        fs::rename(&tmp_path, &self.snapshot_path).await?;
        Ok(())
    }
}

#[async_trait]
impl ContactStore for LocalStore {
    async fn list(&self) -> Result<Vec<Contact>> {
        Ok(self.contacts.read().await.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<Contact>> {
        let contacts = self.contacts.read().await;
        Ok(contacts.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, contact: Contact) -> Result<()> {
        let mut contacts = self.contacts.write().await;
        let mut next = contacts.clone();
        insert_into(&mut next, contact)?;
        self.persist(&next).await?;
        *contacts = next;
        Ok(())
    }

    async fn replace(&self, contact: Contact) -> Result<bool> {
        let mut contacts = self.contacts.write().await;
        let mut next = contacts.clone();
        if !replace_in(&mut next, contact) {
            return Ok(false);
        }
        self.persist(&next).await?;
        *contacts = next;
        Ok(true)
    }

    async fn remove(&self, id: &str) -> Result<bool> {
        let mut contacts = self.contacts.write().await;
        let mut next = contacts.clone();
        if !remove_from(&mut next, id) {
            return Ok(false);
        }
        self.persist(&next).await?;
        *contacts = next;
        Ok(true)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.contacts.read().await.len())
    }
}
