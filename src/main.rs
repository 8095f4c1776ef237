use actix_web::{web, App, HttpServer};
use log::{error, info};

use chess_sync::authority::ArbiterGame;
use chess_sync::config::Config;
use chess_sync::models::AppState;
use chess_sync::routes::configure_routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let path = std::env::args().nth(1);
    let config = match Config::load(path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    info!("Starting chess authority server at http://{}", config.bind_address);

    // Create shared application state
    let app_state = web::Data::new(AppState::new(ArbiterGame::default()));

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .configure(configure_routes)
    })
    .bind(config.bind_address.as_str())?
    .run()
    .await
}
