use std::sync::Mutex;

use chrono::{DateTime, Utc};
use folio_common::ContactError;
use serde::{Deserialize, Serialize};

use crate::form::ContactForm;

/// A stored contact message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Where validated submissions go.
pub trait ContactStorage: Send + Sync {
    fn create_contact_message(&self, form: ContactForm) -> Result<ContactMessage, ContactError>;
}

#[derive(Debug, Default)]
struct Inbox {
    next_id: u64,
    messages: Vec<ContactMessage>,
}

/// In-process store with sequential ids starting at 1.
#[derive(Debug, Default)]
pub struct MemoryContactStorage {
    inbox: Mutex<Inbox>,
}

impl MemoryContactStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything stored so far, oldest first.
    pub fn messages(&self) -> Vec<ContactMessage> {
        self.inbox
            .lock()
            .map(|inbox| inbox.messages.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.inbox.lock().map(|inbox| inbox.messages.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ContactStorage for MemoryContactStorage {
    fn create_contact_message(&self, form: ContactForm) -> Result<ContactMessage, ContactError> {
        let mut inbox = self
            .inbox
            .lock()
            .map_err(|e| ContactError::Storage(format!("inbox lock poisoned: {e}")))?;
        inbox.next_id += 1;
        let message = ContactMessage {
            id: inbox.next_id,
            name: form.name,
            email: form.email,
            subject: form.subject,
            message: form.message,
            timestamp: Utc::now(),
        };
        inbox.messages.push(message.clone());
        Ok(message)
    }
}
