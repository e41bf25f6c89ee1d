//! `GET /api/quiz`, a liveness check meant to be opened in a browser after a
//! deployment. It never touches the integrations.

use actix_web::{HttpResponse, Responder};
use common::responses::StatusResponse;

/// # Returns
/// `200 OK` with a `StatusResponse` (`ok: true` and a short hint on how the
/// endpoint is meant to be called).
pub(crate) async fn process() -> impl Responder {
    HttpResponse::Ok().json(StatusResponse {
        ok: true,
        message: "Ton API sécurisée fonctionne 🎉 (utilise POST /api/quiz depuis le quiz)".to_string(),
    })
}
