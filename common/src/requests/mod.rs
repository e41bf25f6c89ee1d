use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Body posted by the quiz page to `POST /api/quiz`.
///
/// Fields are kept as raw JSON so that any shape the page sends still
/// deserializes and is forwarded as posted. A field is `None` only when it is
/// absent from the body; an explicit `null` is `Some(Value::Null)`. Presence
/// of the required ones is checked with [`QuizSubmission::missing_required`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSubmission {
    #[serde(default, deserialize_with = "present")]
    pub first_name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub email: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub phone: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub profile: Option<Value>,
    /// Only an array is treated as answers, other shapes are still passed
    /// through to the automation webhook untouched.
    #[serde(default, deserialize_with = "present")]
    pub answers: Option<Value>,
}

/// Keeps an explicit `null` instead of folding it into `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Truthiness as the quiz page's JavaScript sees it: absent, `null`, `false`,
/// `0` and `""` are falsy, everything else (including `[]` and `{}`) is truthy.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(_) => true,
    }
}

impl QuizSubmission {
    /// Names of the required fields that are absent or falsy.
    pub fn missing_required(&self) -> Vec<&'static str> {
        [
            ("firstName", &self.first_name),
            ("email", &self.email),
            ("profile", &self.profile),
        ]
        .into_iter()
        .filter(|(_, value)| !is_truthy(value.as_ref()))
        .map(|(name, _)| name)
        .collect()
    }

    /// The phone number as sent to both integrations: the posted value when
    /// truthy, otherwise an empty string.
    pub fn phone_or_empty(&self) -> Value {
        match &self.phone {
            Some(phone) if is_truthy(Some(phone)) => phone.clone(),
            _ => Value::String(String::new()),
        }
    }
}
