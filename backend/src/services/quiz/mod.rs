//! # Quiz Endpoint
//!
//! Single resource called by the quiz page once the quiz taker has filled in
//! their contact details.
//!
//! ## Registered methods on `/api/quiz`:
//!
//! *   **`POST`** (`submit::process`): relays a `QuizSubmission` to the CRM and
//!     the automation webhook. Answers `200 { success: true }` when at least one
//!     of them accepted it.
//! *   **`GET`** (`status::process`): liveness check meant to be opened in a
//!     browser.
//! *   **`OPTIONS`** (`preflight::process`): CORS pre-flight, answered
//!     immediately with an empty body.
//! *   Anything else gets a `405` (`not_allowed::process`).

mod not_allowed;
mod preflight;
mod status;
mod submit;

use actix_web::http::Method;
use actix_web::web::{get, method, post, resource, route};
use actix_web::Resource;

const API_PATH: &str = "/api/quiz";

pub fn configure_routes() -> Resource {
    resource(API_PATH)
        .route(post().to(submit::process))
        .route(get().to(status::process))
        .route(method(Method::OPTIONS).to(preflight::process))
        .default_service(route().to(not_allowed::process))
}
