mod persistence;
pub mod service;
#[cfg(test)]
mod tests;

pub use persistence::DbContext;
pub use persistence::get_db_context;
pub use phonebook_core as data;

#[derive(Debug, Clone)]
pub struct Config {
    pub surreal_db_connection: String,
    pub surreal_db_namespace: String,
    pub surreal_db_database: String,
}

impl Config {
    /// A config pointing to a fresh, in-memory database
    pub fn in_memory() -> Self {
        Self {
            surreal_db_connection: String::from("mem://"),
            surreal_db_namespace: String::from("default"),
            surreal_db_database: String::from("phonebook"),
        }
    }
}
