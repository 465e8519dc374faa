use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a contact, never reused after deletion
pub type ContactId = u64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub phone_number: String,
}

impl Contact {
    pub fn new(id: ContactId, name: String, phone_number: String) -> Self {
        Self {
            id,
            name,
            phone_number,
        }
    }
}
