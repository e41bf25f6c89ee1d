//! Bodies sent to the two downstream integrations.
//!
//! Field names follow what the CRM (Systeme.io) and the automation scenario
//! (Make) were configured to read, hence the camelCase renames.

use serde::Serialize;
use serde_json::Value;

/// Contact upsert sent to the CRM.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrmPayload {
    pub first_name: Value,
    pub email: Value,
    pub phone: Value,
    /// Always a single tag, resolved from the profile code.
    pub tags: Vec<String>,
    pub fields: CrmFields,
}

/// Custom contact fields stored alongside the CRM contact.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrmFields {
    pub profile: Value,
    /// Answers flattened into a single comma separated string.
    pub quiz_answers: String,
    pub source: String,
    /// ISO-8601 instant at which the submission was processed.
    pub timestamp: String,
}

/// Raw submission forwarded to the automation webhook.
///
/// Identity fields are carried as posted, whatever their JSON type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationPayload {
    pub first_name: Value,
    pub email: Value,
    pub phone: Value,
    pub profile: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answers: Option<Value>,
    pub source: String,
}

/// Flattens quiz answers for the CRM `quizAnswers` field.
///
/// Only a JSON array counts as a list of answers; anything else yields an
/// empty string. `null` entries become empty segments.
pub fn join_answers(answers: Option<&Value>) -> String {
    let Some(Value::Array(items)) = answers else {
        return String::new();
    };

    items
        .iter()
        .map(|item| match item {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(",")
}
