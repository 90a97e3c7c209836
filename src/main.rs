use std::path::Path;

use actix_web::{web, App, HttpServer};

use wicket::api::gate_routes;
use wicket::{AppConfig, Argon2Hasher};

fn to_io_error(err: wicket::AuthError) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidInput, err)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.json".to_owned());
    let app_config = AppConfig::load(Path::new(&config_path)).map_err(to_io_error)?;

    let hasher = Argon2Hasher::default();
    let credentials = app_config.credentials(&hasher).map_err(to_io_error)?;
    let session_config = app_config.session_config();

    log::info!(
        target: "wicket",
        "msg=\"starting server\" bind_addr=\"{}\"",
        app_config.bind_addr
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(session_config.clone()))
            .app_data(web::Data::new(credentials.clone()))
            .app_data(web::Data::new(hasher.clone()))
            .configure(gate_routes::<Argon2Hasher>)
    })
    .bind(&app_config.bind_addr)?
    .run()
    .await
}
