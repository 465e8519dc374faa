use super::Result;
use crate::{
    Error,
    constants::{DB_KEY, DB_NAME, DB_SEARCH_TERM, DB_TABLE},
    contact::ContactStoreApi,
};
use async_trait::async_trait;
use phonebook_core::contact::{Contact, ContactId};
use serde::{Deserialize, Serialize};
use surrealdb::{Surreal, engine::any::Any};

#[derive(Clone)]
pub struct SurrealContactStore {
    db: Surreal<Any>,
}

impl SurrealContactStore {
    const TABLE: &'static str = "contact";
    const SEQUENCE_TABLE: &'static str = "contact_sequence";
    const SEQUENCE_KEY: &'static str = "contact";

    pub fn new(db: Surreal<Any>) -> Self {
        Self { db }
    }

    /// Defines the unique index on `name`, so duplicate names are rejected by the database
    /// itself and not only by callers checking first
    pub async fn define_indexes(&self) -> Result<()> {
        self.db
            .query("DEFINE INDEX IF NOT EXISTS contact_name ON TABLE contact FIELDS name UNIQUE")
            .await?
            .check()?;
        Ok(())
    }
}

/// Maps a violation of the unique `name` index, everything else stays a database error
fn map_write_error(err: surrealdb::Error, name: &str) -> Error {
    if err.to_string().contains("already contains") {
        Error::UniqueConstraint(format!("contact name {name}"))
    } else {
        Error::SurrealConnection(err)
    }
}

#[async_trait]
impl ContactStoreApi for SurrealContactStore {
    async fn get_all(&self) -> Result<Vec<Contact>> {
        let result: Vec<ContactDb> = self
            .db
            .query("SELECT * FROM type::table($table) ORDER BY name ASC")
            .bind((DB_TABLE, Self::TABLE))
            .await?
            .take(0)?;
        Ok(result.into_iter().map(|c| c.into()).collect())
    }

    async fn search(&self, search_term: &str) -> Result<Vec<Contact>> {
        let result: Vec<ContactDb> = self
            .db
            .query(
                "SELECT * FROM type::table($table) WHERE string::contains(phone_number, $search_term) ORDER BY name ASC",
            )
            .bind((DB_TABLE, Self::TABLE))
            .bind((DB_SEARCH_TERM, search_term.to_owned()))
            .await?
            .take(0)?;
        Ok(result.into_iter().map(|c| c.into()).collect())
    }

    async fn get(&self, id: ContactId) -> Result<Option<Contact>> {
        let result: Option<ContactDb> = self.db.select((Self::TABLE, id.to_string())).await?;
        Ok(result.map(|c| c.into()))
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Contact>> {
        let result: Vec<ContactDb> = self
            .db
            .query("SELECT * FROM type::table($table) WHERE name = $name LIMIT 1")
            .bind((DB_TABLE, Self::TABLE))
            .bind((DB_NAME, name.to_owned()))
            .await?
            .take(0)?;
        Ok(result.into_iter().next().map(|c| c.into()))
    }

    async fn next_id(&self) -> Result<ContactId> {
        // a single statement, so concurrent writers never read the same value
        let result: Vec<SequenceDb> = self
            .db
            .query("UPSERT type::thing($table, $key) SET current += 1 RETURN AFTER")
            .bind((DB_TABLE, Self::SEQUENCE_TABLE))
            .bind((DB_KEY, Self::SEQUENCE_KEY))
            .await?
            .take(0)?;
        match result.into_iter().next() {
            Some(sequence) => Ok(sequence.current),
            None => Err(Error::InsertFailed(Self::SEQUENCE_TABLE.to_string())),
        }
    }

    async fn insert(&self, data: &Contact) -> Result<()> {
        let entity: ContactDb = data.into();
        let created: Option<ContactDb> = self
            .db
            .create((Self::TABLE, data.id.to_string()))
            .content(entity)
            .await
            .map_err(|e| map_write_error(e, &data.name))?;
        match created {
            Some(_) => Ok(()),
            None => Err(Error::InsertFailed(format!("contact {}", data.id))),
        }
    }

    async fn update(&self, data: &Contact) -> Result<()> {
        let entity: ContactDb = data.into();
        let updated: Option<ContactDb> = self
            .db
            .update((Self::TABLE, data.id.to_string()))
            .content(entity)
            .await
            .map_err(|e| map_write_error(e, &data.name))?;
        match updated {
            Some(_) => Ok(()),
            None => Err(Error::NoSuchEntity(
                "contact".to_string(),
                data.id.to_string(),
            )),
        }
    }

    async fn delete(&self, id: ContactId) -> Result<()> {
        let _: Option<ContactDb> = self.db.delete((Self::TABLE, id.to_string())).await?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactDb {
    pub contact_id: ContactId,
    pub name: String,
    pub phone_number: String,
}

impl From<ContactDb> for Contact {
    fn from(value: ContactDb) -> Self {
        Self {
            id: value.contact_id,
            name: value.name,
            phone_number: value.phone_number,
        }
    }
}

impl From<&Contact> for ContactDb {
    fn from(value: &Contact) -> Self {
        Self {
            contact_id: value.id,
            name: value.name.clone(),
            phone_number: value.phone_number.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SequenceDb {
    current: ContactId,
}
