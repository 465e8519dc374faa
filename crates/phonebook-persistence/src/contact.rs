use phonebook_core::contact::{Contact, ContactId};

use super::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ContactStoreApi: Send + Sync {
    /// Returns all contacts, ordered by name
    async fn get_all(&self) -> Result<Vec<Contact>>;
    /// Returns the contacts whose phone number contains the given search term, ordered by name
    async fn search(&self, search_term: &str) -> Result<Vec<Contact>>;
    async fn get(&self, id: ContactId) -> Result<Option<Contact>>;
    async fn get_by_name(&self, name: &str) -> Result<Option<Contact>>;
    /// Advances the id sequence and returns the new value. Returned ids are never handed out
    /// twice, even after the contact they were assigned to got deleted.
    async fn next_id(&self) -> Result<ContactId>;
    async fn insert(&self, data: &Contact) -> Result<()>;
    async fn update(&self, data: &Contact) -> Result<()>;
    async fn delete(&self, id: ContactId) -> Result<()>;
}
