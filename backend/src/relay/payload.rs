//! Payload construction for the two integrations.
//!
//! Both builders expect a submission that already passed
//! `QuizSubmission::missing_required`. Identity fields are copied as posted;
//! only `phone` is normalized, to an empty string when it is absent or falsy.
//!
//! - `crm_payload` adds the tag resolved from the profile code, flattens the
//!   answers and stamps the processing time.
//! - `automation_payload` forwards the answers exactly as received, `null`
//!   included.

use common::model::payload::{join_answers, AutomationPayload, CrmFields, CrmPayload};
use common::model::profile::{tag_for_profile, SOURCE};
use common::requests::QuizSubmission;
use serde_json::Value;

/// Builds the CRM contact for a validated submission.
pub fn crm_payload(submission: &QuizSubmission, timestamp: String) -> CrmPayload {
    let profile = submission.profile.clone().unwrap_or(Value::Null);

    CrmPayload {
        first_name: submission.first_name.clone().unwrap_or(Value::Null),
        email: submission.email.clone().unwrap_or(Value::Null),
        phone: submission.phone_or_empty(),
        tags: vec![tag_for_profile(profile.as_str()).to_string()],
        fields: CrmFields {
            profile,
            quiz_answers: join_answers(submission.answers.as_ref()),
            source: SOURCE.to_string(),
            timestamp,
        },
    }
}

/// Builds the automation webhook body. Answers are passed through unchanged.
pub fn automation_payload(submission: QuizSubmission) -> AutomationPayload {
    AutomationPayload {
        phone: submission.phone_or_empty(),
        first_name: submission.first_name.unwrap_or(Value::Null),
        email: submission.email.unwrap_or(Value::Null),
        profile: submission.profile.unwrap_or(Value::Null),
        answers: submission.answers,
        source: SOURCE.to_string(),
    }
}
