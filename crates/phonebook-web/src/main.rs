use anyhow::Result;
use clap::Parser;
use config::Config;
use log::{error, info};
use phonebook_api::get_db_context;
use phonebook_api::service::create_service_context;

mod api_docs;
mod config;
mod constants;
mod data;
mod error;
mod handlers;
mod router;

// MAIN
#[macro_use]
extern crate lazy_static;
lazy_static! {
    pub static ref CONFIG: Config = Config::parse();
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let conf = CONFIG.clone();
    let api_config = conf.api_config();
    info!("Chosen database: {}", api_config.surreal_db_connection);

    let db = get_db_context(&api_config).await?;
    let service_context = create_service_context(db);

    if let Err(e) = router::rocket_main(conf, service_context).launch().await {
        error!("Web server stopped with error: {e}");
        return Err(e.into());
    }

    info!("web server was shut down...");
    Ok(())
}
