//! Failure modes of a relayed submission and how each one is answered over HTTP.
//!
//! Client mistakes become `400`, a submission rejected by both integrations
//! becomes `502`, everything else is an internal error answered with a
//! generic `500` body. Internal details only ever reach the logs.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::responses::{DownstreamDetails, ErrorResponse};
use thiserror::Error;

pub const MISSING_FIELDS_MESSAGE: &str = "Champs manquants";
pub const DOWNSTREAM_MESSAGE: &str = "Erreur Systeme.io et Make";
pub const INTERNAL_MESSAGE: &str = "Erreur serveur interne";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Méthode non autorisée";
pub const BODY_TOO_LARGE_MESSAGE: &str = "Requête trop volumineuse";

#[derive(Debug, Error)]
pub enum RelayError {
    /// One or more of `firstName`, `email`, `profile` is absent or empty.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// The request body could not be read as a JSON submission.
    #[error("unreadable submission body: {0}")]
    InvalidBody(String),

    /// The request body exceeds the configured limit.
    #[error("submission body larger than {limit} bytes")]
    BodyTooLarge { limit: usize },

    /// Neither integration accepted the submission.
    #[error("both integrations rejected the submission (crm: {:?}, automation: {:?})", .0.systeme, .0.make)]
    Downstream(DownstreamDetails),

    /// A destination URL is missing or cannot be used.
    #[error("invalid destination for {integration}: {reason}")]
    Destination {
        integration: &'static str,
        reason: String,
    },

    #[error("failed to encode payload: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("forwarding task did not complete: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl RelayError {
    /// Whether the error is the server's fault rather than the caller's or
    /// the integrations'.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            RelayError::Destination { .. }
                | RelayError::Encoding(_)
                | RelayError::TaskJoin(_)
                | RelayError::HttpClient(_)
        )
    }
}

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            RelayError::MissingFields(_) | RelayError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            RelayError::BodyTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            RelayError::Downstream(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            RelayError::MissingFields(_) | RelayError::InvalidBody(_) => ErrorResponse {
                error: MISSING_FIELDS_MESSAGE.to_string(),
                details: None,
            },
            RelayError::BodyTooLarge { .. } => ErrorResponse {
                error: BODY_TOO_LARGE_MESSAGE.to_string(),
                details: None,
            },
            RelayError::Downstream(details) => ErrorResponse {
                error: DOWNSTREAM_MESSAGE.to_string(),
                details: Some(details.clone()),
            },
            _ => ErrorResponse {
                error: INTERNAL_MESSAGE.to_string(),
                details: None,
            },
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
