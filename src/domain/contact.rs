// Contact domain model
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when creating a contact
#[derive(Debug, Clone, Deserialize)]
pub struct NewContact {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl NewContact {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
        }
    }
}

/// Insertion-ordered contact collection
#[derive(Debug, Clone, Default)]
pub struct ContactList {
    contacts: Vec<Contact>,
}

impl ContactList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a contact with a fresh identity. Duplicates are allowed.
    pub fn add(&mut self, record: NewContact) -> Contact {
        let contact = Contact {
            id: Uuid::new_v4(),
            name: record.name,
            email: record.email,
            created_at: Utc::now(),
        };
        self.contacts.push(contact.clone());
        contact
    }

    /// Remove the first contact with this identity; returns false if none matched.
    pub fn remove(&mut self, id: Uuid) -> bool {
        match self.contacts.iter().position(|c| c.id == id) {
            Some(idx) => {
                self.contacts.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: Uuid) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    pub fn as_slice(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}
