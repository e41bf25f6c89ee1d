use serde::{Deserialize, Serialize};

/// Body of a `200` answer to a relayed submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Body of every error answer. `details` is only filled for downstream failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<DownstreamDetails>,
}

/// What each integration answered when both rejected a submission.
///
/// Statuses are `None` when the integration could not be reached at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownstreamDetails {
    pub systeme: Option<u16>,
    pub systeme_body: String,
    pub make: Option<u16>,
    pub make_body: String,
}

/// Body of `GET /api/quiz`, used to check the deployment from a browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub ok: bool,
    pub message: String,
}
