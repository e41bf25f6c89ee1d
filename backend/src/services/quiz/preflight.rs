//! # CORS Pre-flight
//!
//! Browsers send an `OPTIONS /api/quiz` before the actual `POST`, since the
//! quiz page lives on another origin and posts JSON. The answer only has to
//! carry the `Access-Control-Allow-*` headers, which the app-wide
//! `DefaultHeaders` middleware adds, so nothing here reads the request or
//! touches the relay.

use actix_web::{HttpResponse, Responder};

/// The Actix web handler for `OPTIONS /api/quiz`.
///
/// # Returns
/// An empty `200 OK`.
pub(crate) async fn process() -> impl Responder {
    HttpResponse::Ok().finish()
}
