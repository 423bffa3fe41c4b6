mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod services;
mod store;
mod utils;

use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use std::io;
use std::sync::Arc;
use log::{error, info, warn};
use config::Config;
use services::employee::EmployeeService;
use store::{EmployeeStore, MemoryEmployeeStore, PgEmployeeStore};

async fn build_store(config: &Config) -> io::Result<Arc<dyn EmployeeStore>> {
    let Some(database_url) = config.database_url.as_deref() else {
        warn!("DATABASE_URL not set, employees will be kept in memory only");
        return Ok(Arc::new(MemoryEmployeeStore::new()));
    };

    let pool = db::create_pool(database_url, config.max_connections)
        .await
        .map_err(|err| {
            error!("Failed to connect to the database: {}", err);
            io::Error::new(io::ErrorKind::ConnectionRefused, err)
        })?;
    db::run_migrations(&pool)
        .await
        .map_err(|err| {
            error!("Failed to apply migrations: {}", err);
            io::Error::new(io::ErrorKind::Other, err)
        })?;

    Ok(Arc::new(PgEmployeeStore::new(pool)))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|err| {
        error!("Invalid configuration: {}", err);
        io::Error::new(io::ErrorKind::InvalidInput, err)
    })?;

    let store = build_store(&config).await?;
    let service = web::Data::new(EmployeeService::new(store));

    let (host, port) = config.bind_address();
    info!("Starting server at {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(service.clone())
            .configure(handlers::employee::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
