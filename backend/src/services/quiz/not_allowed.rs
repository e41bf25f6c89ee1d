//! Fallback for methods `/api/quiz` does not serve (`PUT`, `DELETE`, ...).

use actix_web::{HttpResponse, Responder};
use common::responses::ErrorResponse;

use crate::relay::error::METHOD_NOT_ALLOWED_MESSAGE;

/// # Returns
/// `405 Method Not Allowed` with `{ "error": "Méthode non autorisée" }`.
pub(crate) async fn process() -> impl Responder {
    HttpResponse::MethodNotAllowed().json(ErrorResponse {
        error: METHOD_NOT_ALLOWED_MESSAGE.to_string(),
        details: None,
    })
}
