//! # Quiz Submission
//!
//! `POST /api/quiz`, called by the quiz page once the quiz taker has entered
//! their contact details.
//!
//! ## Workflow:
//!
//! 1.  **Body extraction**: the JSON body is read into a `QuizSubmission`.
//!     Unreadable bodies are turned into a `400` (or `413` when too large) by
//!     the extractor error handler in `services::json_config`.
//!
//! 2.  **Relay**: the submission is handed to the shared `SubmissionRelay`,
//!     which validates the required fields, builds one payload per
//!     integration and sends both concurrently.
//!
//! 3.  **Response**: any `RelayError` is rendered through its `ResponseError`
//!     implementation (`400`, `502` or a generic `500`). Otherwise the caller
//!     gets `{ "success": true }`, even if one of the two integrations
//!     rejected the submission.

use actix_web::{web, HttpResponse};
use common::requests::QuizSubmission;
use common::responses::SuccessResponse;
use log::info;

use crate::relay::error::RelayError;
use crate::relay::SubmissionRelay;

/// The Actix web handler for `POST /api/quiz`.
///
/// # Arguments
/// * `relay` - The shared `SubmissionRelay`, injected by Actix.
/// * `payload` - The submission posted by the quiz page.
///
/// # Returns
/// `200 OK` with a `SuccessResponse` when at least one integration accepted
/// the submission, or the `RelayError` that stopped it.
pub(crate) async fn process(
    relay: web::Data<SubmissionRelay>,
    payload: web::Json<QuizSubmission>,
) -> Result<HttpResponse, RelayError> {
    let outcome = relay.relay(payload.into_inner()).await?;
    info!(
        "Submission {} relayed (systeme: {:?}, make: {:?})",
        outcome.submission_id, outcome.crm.status, outcome.automation.status
    );
    Ok(HttpResponse::Ok().json(SuccessResponse { success: true }))
}
