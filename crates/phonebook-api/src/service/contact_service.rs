use super::{Error, Result};
use async_trait::async_trait;
use log::debug;
use phonebook_core::contact::{Contact, ContactId};
use phonebook_persistence::ContactStoreApi;
use std::sync::Arc;
use tokio::sync::Mutex;

#[async_trait]
pub trait ContactServiceApi: Send + Sync {
    /// Returns all contacts ordered by name. If a non-empty search term is given, only the
    /// contacts whose phone number contains it are returned.
    async fn get_contacts(&self, search_term: Option<&str>) -> Result<Vec<Contact>>;

    /// Returns the contact with the given id
    async fn get_contact(&self, id: ContactId) -> Result<Contact>;

    /// Validates and creates a new contact with a freshly assigned id
    async fn add_contact(
        &self,
        name: Option<String>,
        phone_number: Option<String>,
    ) -> Result<Contact>;

    /// Replaces the given, non-empty fields of an existing contact
    async fn update_contact(
        &self,
        id: ContactId,
        name: Option<String>,
        phone_number: Option<String>,
    ) -> Result<Contact>;

    /// Deletes the contact with the given id, deleting an unknown id is a no-op
    async fn delete(&self, id: ContactId) -> Result<()>;
}

/// The contact service is responsible for managing the phonebook
#[derive(Clone)]
pub struct ContactService {
    store: Arc<dyn ContactStoreApi>,
    // uniqueness checks, id assignment and the write itself happen under this lock
    write_lock: Arc<Mutex<()>>,
}

impl ContactService {
    pub fn new(store: Arc<dyn ContactStoreApi>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    async fn ensure_name_is_free(&self, name: &str, id: Option<ContactId>) -> Result<()> {
        match self.store.get_by_name(name).await? {
            Some(existing) if Some(existing.id) != id => Err(Error::Conflict(format!(
                "records with the name '{name}' already exist"
            ))),
            _ => Ok(()),
        }
    }
}

/// Drops blank values, non-blank values are kept exactly as submitted
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    non_blank(value).ok_or_else(|| Error::Validation(format!("{field} cannot be empty")))
}

/// A write rejected by the store's unique index is a conflict like any other taken name
fn write_error(err: phonebook_persistence::Error) -> Error {
    match err {
        phonebook_persistence::Error::UniqueConstraint(msg) => {
            Error::Conflict(format!("records with the same name already exist: {msg}"))
        }
        other => other.into(),
    }
}

#[async_trait]
impl ContactServiceApi for ContactService {
    async fn get_contacts(&self, search_term: Option<&str>) -> Result<Vec<Contact>> {
        let contacts = match search_term.filter(|t| !t.is_empty()) {
            Some(term) => self.store.search(term).await?,
            None => self.store.get_all().await?,
        };
        Ok(contacts)
    }

    async fn get_contact(&self, id: ContactId) -> Result<Contact> {
        self.store.get(id).await?.ok_or(Error::NotFound)
    }

    async fn add_contact(
        &self,
        name: Option<String>,
        phone_number: Option<String>,
    ) -> Result<Contact> {
        let name = required(name, "name")?;
        let phone_number = required(phone_number, "phone_number")?;

        let _guard = self.write_lock.lock().await;
        self.ensure_name_is_free(&name, None).await?;

        let id = self.store.next_id().await?;
        let contact = Contact::new(id, name, phone_number);
        self.store.insert(&contact).await.map_err(write_error)?;
        debug!("Created contact {} ({})", contact.id, contact.name);
        Ok(contact)
    }

    async fn update_contact(
        &self,
        id: ContactId,
        name: Option<String>,
        phone_number: Option<String>,
    ) -> Result<Contact> {
        let name = non_blank(name);
        let phone_number = non_blank(phone_number);

        let _guard = self.write_lock.lock().await;
        let mut contact = self.store.get(id).await?.ok_or(Error::NotFound)?;

        if let Some(name) = name {
            self.ensure_name_is_free(&name, Some(id)).await?;
            contact.name = name;
        }
        if let Some(phone_number) = phone_number {
            contact.phone_number = phone_number;
        }

        self.store.update(&contact).await.map_err(write_error)?;
        debug!("Updated contact {}", contact.id);
        Ok(contact)
    }

    async fn delete(&self, id: ContactId) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.store.delete(id).await?;
        debug!("Deleted contact {id}");
        Ok(())
    }
}
