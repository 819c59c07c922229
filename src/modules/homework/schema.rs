use serde_json::{Map, Value};

use super::model::{Homework, HomeworkStatus, StatusPayload};
use crate::errors::BotError;

const HOMEWORKS_KEY: &str = "homeworks";
const CURRENT_DATE_KEY: &str = "current_date";

/// Checks a decoded status API response against the documented shape.
///
/// Fail-fast: a single bad item rejects the whole batch, so no partial
/// state update can follow from a half-valid response.
pub fn validate(payload: &Value) -> Result<StatusPayload, BotError> {
    let object = payload
        .as_object()
        .ok_or_else(|| violation("response not an object"))?;

    for key in [HOMEWORKS_KEY, CURRENT_DATE_KEY] {
        if !object.contains_key(key) {
            return Err(violation(format!("missing key: {key}")));
        }
    }

    let items = object[HOMEWORKS_KEY]
        .as_array()
        .ok_or_else(|| violation("homeworks not a list"))?;

    let current_date = object[CURRENT_DATE_KEY]
        .as_u64()
        .and_then(|d| i64::try_from(d).ok())
        .ok_or_else(|| violation("current_date not an integer"))?;

    let homeworks = items
        .iter()
        .map(parse_item)
        .collect::<Result<Vec<_>, _>>()?;

    if homeworks.is_empty() {
        tracing::debug!("Status API returned no homeworks since the cursor");
    }

    Ok(StatusPayload {
        homeworks,
        current_date,
    })
}

fn parse_item(item: &Value) -> Result<Homework, BotError> {
    let item = item.as_object().ok_or_else(|| violation("malformed item"))?;

    let name = string_field(item, "homework_name")?;
    let raw_status = string_field(item, "status")?;

    let id = match item.get("id") {
        None | Some(Value::Null) => None,
        Some(value) => Some(value.as_u64().ok_or_else(|| violation("malformed item"))?),
    };

    let status = raw_status
        .parse::<HomeworkStatus>()
        .map_err(|unknown| violation(format!("unknown status: {unknown}")))?;

    Ok(Homework {
        id,
        name: name.to_string(),
        status,
    })
}

fn string_field<'a>(item: &'a Map<String, Value>, key: &str) -> Result<&'a str, BotError> {
    item.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| violation("malformed item"))
}

fn violation(reason: impl Into<String>) -> BotError {
    BotError::SchemaViolation(reason.into())
}
