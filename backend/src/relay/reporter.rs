use log::error;
use uuid::Uuid;

use super::error::RelayError;

/// Receives internal errors before they are turned into a generic `500`.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, submission_id: &Uuid, error: &RelayError);
}

/// Writes internal errors to the application log.
pub struct LogReporter;

impl ErrorReporter for LogReporter {
    fn report(&self, submission_id: &Uuid, error: &RelayError) {
        error!("Erreur serveur [{}]: {}", submission_id, error);
    }
}
