//! HTTP surface of the relay.
//!
//! Every response carries the CORS headers the quiz page needs, whatever the
//! route or status. Bodies that cannot be read as JSON are answered like a
//! submission with no fields, except oversized ones which get a `413`.

mod home;
pub mod quiz;

use actix_web::error::JsonPayloadError;
use actix_web::middleware::DefaultHeaders;
use actix_web::web;
use log::info;

use crate::relay::error::RelayError;

const ALLOWED_METHODS: &str = "GET,POST,OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type,Authorization";
const BODY_LIMIT: usize = 256 * 1024;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(quiz::configure_routes())
        .route("/", web::get().to(home::process));
}

/// CORS headers added to every response. `origin` must be a valid header
/// value, which `AppConfig` checks at load time.
pub fn cors_headers(origin: &str) -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", origin.to_string()))
        .add(("Access-Control-Allow-Methods", ALLOWED_METHODS))
        .add(("Access-Control-Allow-Headers", ALLOWED_HEADERS))
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(BODY_LIMIT)
        .error_handler(|err, _req| match err {
            JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                info!("Submission body rejected: {}", err);
                RelayError::BodyTooLarge { limit: BODY_LIMIT }.into()
            }
            err => {
                info!("Unreadable submission body: {}", err);
                RelayError::InvalidBody(err.to_string()).into()
            }
        })
}
