mod config;
mod relay;
mod services;

use crate::config::AppConfig;
use crate::relay::SubmissionRelay;
use actix_web::{middleware, web, App, HttpServer};
use env_logger::Env;
use log::info;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(io::Error::other)?;
    config.warn_on_gaps();

    let relay = SubmissionRelay::from_config(&config.relay).map_err(io::Error::other)?;
    let relay = web::Data::new(relay);
    let origin = config.allowed_origin.clone();

    info!(
        "Server running at http://{}:{} (CORS origin {})",
        config.host, config.port, origin
    );

    HttpServer::new(move || {
        App::new()
            .wrap(services::cors_headers(&origin))
            .wrap(middleware::Logger::default())
            .app_data(services::json_config())
            .app_data(relay.clone())
            .configure(services::configure)
    })
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
