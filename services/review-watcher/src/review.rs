//! Review verdicts and response validation

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::practicum::ApiResponse;

/// Review status of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Approved,
    Reviewing,
    Rejected,
}

impl Verdict {
    pub const ALL: [Verdict; 3] = [Verdict::Approved, Verdict::Reviewing, Verdict::Rejected];

    /// Status code as sent by the API
    pub fn code(&self) -> &'static str {
        match self {
            Verdict::Approved => "approved",
            Verdict::Reviewing => "reviewing",
            Verdict::Rejected => "rejected",
        }
    }

    /// Text shown to the student
    pub fn text(&self) -> &'static str {
        match self {
            Verdict::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Verdict::Reviewing => "Работа взята на проверку ревьюером.",
            Verdict::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Verdict {
    type Err = crate::WatcherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verdict::ALL
            .into_iter()
            .find(|v| v.code() == s)
            .ok_or_else(|| crate::WatcherError::InvalidStatus(s.to_string()))
    }
}

/// Return the most recent submission, `homeworks[0]`.
///
/// Checks run in a fixed order: `homeworks` key, its type, the `code`
/// fault marker, then emptiness.
pub fn extract_latest_submission(response: &ApiResponse) -> crate::Result<Value> {
    tracing::info!("Checking API response");
    let body = response.body();

    let homeworks = body
        .get("homeworks")
        .ok_or_else(|| crate::WatcherError::MissingKey("homeworks".to_string()))?;

    let homeworks = homeworks.as_array().ok_or_else(|| {
        crate::WatcherError::Type(format!(
            "homeworks must be a list, got {}",
            json_type_name(homeworks)
        ))
    })?;

    if let Some(code) = body.get("code") {
        return Err(crate::WatcherError::Api(format!(
            "server reported fault code {}",
            code
        )));
    }

    homeworks
        .first()
        .cloned()
        .ok_or(crate::WatcherError::EmptyList)
}

/// Render the status-change message for a submission
pub fn format_verdict(submission: &Value) -> crate::Result<String> {
    let record = submission.as_object().ok_or_else(|| {
        crate::WatcherError::DataType(format!(
            "expected an object, got {}",
            json_type_name(submission)
        ))
    })?;

    let name = match record.get("homework_name") {
        None => return Err(crate::WatcherError::MissingName),
        Some(Value::String(name)) => name.as_str(),
        Some(other) => {
            return Err(crate::WatcherError::DataType(format!(
                "homework_name must be a string, got {}",
                json_type_name(other)
            )))
        }
    };

    let status = record.get("status").and_then(Value::as_str);
    let verdict = match status.map(Verdict::from_str) {
        Some(Ok(verdict)) => verdict,
        Some(Err(e)) => {
            tracing::error!("Unknown status for '{}': {}", name, e);
            return Err(e);
        }
        None => {
            let raw = record
                .get("status")
                .map(Value::to_string)
                .unwrap_or_else(|| "<missing>".to_string());
            tracing::error!("Unknown status for '{}': {}", name, raw);
            return Err(crate::WatcherError::InvalidStatus(raw));
        }
    };

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        name,
        verdict.text()
    ))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
