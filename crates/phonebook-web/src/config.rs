use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    #[arg(default_value_t = 8080, long, env = "HTTP_PORT")]
    pub http_port: u16,
    #[arg(default_value_t = String::from("127.0.0.1"), long, env = "HTTP_ADDRESS")]
    pub http_address: String,
    /// `mem://` keeps all contacts in memory, `rocksdb://<path>` needs the embedded-db feature
    #[arg(default_value_t = String::from("mem://"), long, env = "SURREAL_DB_CONNECTION")]
    pub surreal_db_connection: String,
    #[arg(default_value_t = String::from("default"), long, env = "SURREAL_DB_NAMESPACE")]
    pub surreal_db_namespace: String,
    #[arg(default_value_t = String::from("phonebook"), long, env = "SURREAL_DB_DATABASE")]
    pub surreal_db_database: String,
}

impl Config {
    pub fn http_listen_url(&self) -> String {
        format!("http://{}:{}", self.http_address, self.http_port)
    }

    pub fn api_config(&self) -> phonebook_api::Config {
        phonebook_api::Config {
            surreal_db_connection: self.surreal_db_connection.clone(),
            surreal_db_namespace: self.surreal_db_namespace.clone(),
            surreal_db_database: self.surreal_db_database.clone(),
        }
    }
}
