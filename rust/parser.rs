use serde_json::Value;

use crate::error::CycleError;
use crate::models::HomeworkStatus;

const MISSING_STATUS: &str = "<missing>";

/// Turns one submission record into the chat message announcing its status.
pub fn parse_status(homework: &Value) -> Result<String, CycleError> {
    let homework_name = homework
        .get("homework_name")
        .ok_or(CycleError::MissingField("homework_name"))?;
    let homework_name = match homework_name {
        Value::String(name) => name.clone(),
        other => other.to_string(),
    };

    let status = match homework.get("status") {
        Some(Value::String(code)) => code
            .parse::<HomeworkStatus>()
            .map_err(|()| CycleError::UnknownStatus(code.clone()))?,
        Some(other) => return Err(CycleError::UnknownStatus(other.to_string())),
        None => return Err(CycleError::UnknownStatus(MISSING_STATUS.to_string())),
    };

    Ok(format!(
        "Changed status of review for \"{homework_name}\". {}",
        status.verdict()
    ))
}
