use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use log::info;
use mongodb::bson::doc;
use mongodb::Client;

use eventhub_users::config::CONFIG;
use eventhub_users::repositories::UserRepository;
use eventhub_users::routes;
use eventhub_users::store::MongoStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment variables and logger
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Connect to MongoDB
    info!("Connecting to MongoDB...");
    let client = Client::with_uri_str(&CONFIG.mongodb_uri)
        .await
        .expect("Failed to connect to MongoDB");

    let db = client.database(&CONFIG.database_name);

    // Test MongoDB connection
    db.run_command(doc! { "ping": 1 })
        .await
        .expect("Failed to ping MongoDB");
    info!("Connected to MongoDB successfully!");

    let repository = UserRepository::new(Arc::new(MongoStore::new(&db)));
    repository
        .create_indexes()
        .await
        .expect("Failed to create database indexes");
    let repository = web::Data::new(repository);

    // Start HTTP server
    let server_addr = format!("{}:{}", CONFIG.server_host, CONFIG.server_port);
    info!("Starting server at http://{}", server_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(repository.clone())
            .configure(routes::configure_routes)
    })
    .bind(&server_addr)?
    .run()
    .await
}
