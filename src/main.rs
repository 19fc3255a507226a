use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Logger, web};
use dotenv::dotenv;
use std::sync::Arc;

mod config;
mod controllers;
mod db;
mod error;
mod models;
mod service;

use config::Config;
use db::Database;
use service::NoteService;

pub struct AppState {
    pub config: Config,
    pub notes: NoteService,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let port = config.port;

    log::info!("notes-backend v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Initializing database at {}", config.database_url);
    let db = Arc::new(Database::new(&config.database_url).expect("Failed to initialize database"));

    log::info!("Listening on 0.0.0.0:{}", port);

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(AppState {
                config: config.clone(),
                notes: NoteService::new(Arc::clone(&db)),
            }))
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config)
            .configure(controllers::notes::config)
    })
    .bind(("0.0.0.0", port))?
    .run();

    let server_handle = server.handle();

    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
        log::info!("Received Ctrl+C, shutting down...");
        server_handle.stop(true).await;
    });

    server.await
}
