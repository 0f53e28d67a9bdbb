//! Upcasters for records written by the web client.
//!
//! The web client stored the wizard form flat, with its own key names and
//! with every value as typed (numbers sometimes as strings, unchecked
//! checkbox groups as `false`, unselected options as `""`). These upcasters
//! lift those shapes to schema version 2.

use serde_json::{json, Map, Value as JsonValue};

use super::envelope::{USER_RECORD_KIND, WIZARD_STATE_KIND};
use crate::domain::foundation::{UpcastError, Upcaster};

/// Timestamp used when a legacy profile carries none.
const UNKNOWN_TIME: &str = "1970-01-01T00:00:00Z";

/// `{form, step, connectedDevices}` to `{currentStep, draft}`.
pub struct WizardStateV1ToV2;

impl Upcaster for WizardStateV1ToV2 {
    fn kind(&self) -> &str {
        WIZARD_STATE_KIND
    }

    fn source_version(&self) -> u32 {
        1
    }

    fn upcast(&self, payload: JsonValue) -> Result<JsonValue, UpcastError> {
        let obj = payload
            .as_object()
            .ok_or_else(|| UpcastError::InvalidValue("legacy draft is not an object".into()))?;

        let empty = Map::new();
        let form = obj.get("form").and_then(JsonValue::as_object).unwrap_or(&empty);
        let step = obj
            .get("step")
            .and_then(number)
            .map(|s| s.round().clamp(1.0, 5.0) as u8)
            .unwrap_or(1);
        let devices = device_ids(obj.get("connectedDevices"));

        Ok(json!({
            "currentStep": step,
            "draft": form_to_profile(form, devices),
        }))
    }
}

/// Flat `profileData` to the nested CommittedProfile shape.
pub struct UserRecordV1ToV2;

impl Upcaster for UserRecordV1ToV2 {
    fn kind(&self) -> &str {
        USER_RECORD_KIND
    }

    fn source_version(&self) -> u32 {
        1
    }

    fn upcast(&self, payload: JsonValue) -> Result<JsonValue, UpcastError> {
        let obj = payload
            .as_object()
            .ok_or_else(|| UpcastError::InvalidValue("legacy user is not an object".into()))?;

        let updated_at = text(obj.get("updatedAt"));
        let profile_data = obj
            .get("profileData")
            .or_else(|| obj.get("profile"))
            .and_then(JsonValue::as_object)
            .map(|data| {
                let mut profile = form_to_profile(data, device_ids(data.get("connectedDevices")));
                let last_updated = text(data.get("lastUpdated"))
                    .or_else(|| updated_at.clone())
                    .unwrap_or_else(|| JsonValue::String(UNKNOWN_TIME.to_string()));
                profile["lastUpdated"] = last_updated;
                profile
            });

        Ok(json!({
            "name": text(obj.get("name")),
            "email": text(obj.get("email")),
            "profileCompleted": obj.get("profileCompleted").and_then(JsonValue::as_bool).unwrap_or(false),
            "profileData": profile_data,
            "profilePromptDismissed": obj.get("profilePromptDismissed").map_or(false, truthy),
            "updatedAt": updated_at,
        }))
    }
}

fn form_to_profile(form: &Map<String, JsonValue>, devices: Vec<String>) -> JsonValue {
    let field = |key: &str| form.get(key);
    json!({
        "personal": {
            "fullName": text(field("fullName")),
            "gender": text(field("gender")),
            "age": field("age").and_then(number).map(|a| a.round() as i64),
            "caregiverId": text(field("caregiverId")),
            "doctorId": text(field("doctorId")),
        },
        "health": {
            "conditions": string_list(field("chronic").or_else(|| field("chronicConditions"))),
            "conditionOther": text(field("chronicOther")),
            "familyHistory": text(field("familyHistory")),
            "weightKg": field("weightKg").and_then(number),
            "heightCm": field("heightCm").and_then(number),
        },
        "habits": {
            "exerciseFrequency": text(field("exercise")),
            "sleepHours": field("sleepHours").and_then(number),
            "waterGoalLiters": field("waterGoalL").and_then(number),
            "diet": text(field("diet")),
            "smoking": text(field("smoking")),
            "alcohol": text(field("alcohol")),
        },
        "connectedDeviceIds": devices,
    })
}

/// Non-blank string, or null.
fn text(value: Option<&JsonValue>) -> Option<JsonValue> {
    match value {
        Some(JsonValue::String(s)) if !s.trim().is_empty() => {
            Some(JsonValue::String(s.trim().to_string()))
        }
        _ => None,
    }
}

/// Finite number, accepting numeric strings.
fn number(value: &JsonValue) -> Option<f64> {
    let n = match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// Checkbox groups: an array, a single string, or `false` when nothing is ticked.
fn string_list(value: Option<&JsonValue>) -> Vec<String> {
    match value {
        Some(JsonValue::Array(items)) => items
            .iter()
            .filter_map(JsonValue::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.trim().to_string())
            .collect(),
        Some(JsonValue::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => Vec::new(),
    }
}

/// Device lists hold either plain ids or `{id, connected}` objects.
fn device_ids(value: Option<&JsonValue>) -> Vec<String> {
    let Some(JsonValue::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            JsonValue::String(id) => Some(id.as_str()),
            JsonValue::Object(obj) => {
                let connected = obj.get("connected").map_or(true, truthy);
                obj.get("id").and_then(JsonValue::as_str).filter(|_| connected)
            }
            _ => None,
        })
        .filter(|id| !id.trim().is_empty())
        .map(|id| id.trim().to_string())
        .collect()
}

fn truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Bool(b) => *b,
        JsonValue::String(s) => s == "true",
        _ => false,
    }
}
