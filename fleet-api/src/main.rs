mod routes;
mod store;
mod types;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use log::info;

use store::FleetStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .format_module_path(false)
        .init();

    let store = web::Data::new(FleetStore::default());

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let bind_address = format!("{}:{}", host, port);

    info!("serving on http://{}", bind_address);
    info!("  /api/buses   - bus registry (CRUD)");
    info!("  /api/stops   - stop registry (CRUD)");
    info!("  /api/tracks  - telemetry snapshots (create, list, latest, near)");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(store.clone())
            .configure(routes::configure)
            .default_service(web::route().to(routes::not_found))
    })
    .bind(&bind_address)?
    .run()
    .await
}
