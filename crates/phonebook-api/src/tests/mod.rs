#[cfg(test)]
#[allow(clippy::module_inception)]
pub mod tests {
    use async_trait::async_trait;
    use phonebook_core::contact::{Contact, ContactId};
    use phonebook_persistence::{ContactStoreApi, Result};

    // Need to wrap mocks, because traits are in a different crate
    mockall::mock! {
        pub ContactStoreApiMock {}

        #[async_trait]
        impl ContactStoreApi for ContactStoreApiMock {
            async fn get_all(&self) -> Result<Vec<Contact>>;
            async fn search(&self, search_term: &str) -> Result<Vec<Contact>>;
            async fn get(&self, id: ContactId) -> Result<Option<Contact>>;
            async fn get_by_name(&self, name: &str) -> Result<Option<Contact>>;
            async fn next_id(&self) -> Result<ContactId>;
            async fn insert(&self, data: &Contact) -> Result<()>;
            async fn update(&self, data: &Contact) -> Result<()>;
            async fn delete(&self, id: ContactId) -> Result<()>;
        }
    }

    pub fn get_baseline_contact() -> Contact {
        Contact {
            id: 1,
            name: "Cypress".to_owned(),
            phone_number: "123456789".to_owned(),
        }
    }
}
