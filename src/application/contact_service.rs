// Contact service - Use cases for the in-memory contact list
use crate::domain::contact::{Contact, ContactList, NewContact};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct ContactService {
    contacts: Arc<RwLock<ContactList>>,
}

impl ContactService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_contact(&self, record: NewContact) -> Contact {
        let contact = self.contacts.write().await.add(record);
        tracing::debug!(id = %contact.id, "contact added");
        contact
    }

    /// Returns false when no contact had this identity
    pub async fn remove_contact(&self, id: Uuid) -> bool {
        let removed = self.contacts.write().await.remove(id);
        tracing::debug!(%id, removed, "contact removal");
        removed
    }

    pub async fn list_contacts(&self) -> Vec<Contact> {
        self.contacts.read().await.as_slice().to_vec()
    }

    pub async fn get_contact(&self, id: Uuid) -> Option<Contact> {
        self.contacts.read().await.get(id).cloned()
    }
}
