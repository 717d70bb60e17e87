use serde::{de::{self, DeserializeOwned}, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{domain::SelectionState, error::ApiError};

/// Body of `POST /generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRequest {
    pub budget: String,
    pub interests: String,
    pub travel_style: String,
    /// `None` serializes as `null`, which is what an unparseable days field produces.
    pub days: Option<i64>,
    pub destination: String,
}

impl TripRequest {
    pub fn from_form(
        selection: &SelectionState,
        destination: &str,
        days: &str,
        travel_style: &str,
    ) -> Self {
        Self {
            budget: selection.budget_or_empty().to_string(),
            interests: selection.interests.joined(),
            travel_style: travel_style.to_string(),
            days: parse_days(days),
            destination: destination.to_string(),
        }
    }
}

/// Integer-prefix parse of a form field: leading whitespace, an optional
/// sign, then decimal digits. Trailing text is ignored.
pub fn parse_days(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    rest[..digits_len]
        .parse::<i64>()
        .ok()
        .map(|value| value * sign)
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccommodationCard {
    #[serde(default, deserialize_with = "display_text")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "display_text")]
    pub kind: String,
    #[serde(default, deserialize_with = "display_text")]
    pub rating: String,
    #[serde(default, deserialize_with = "display_text")]
    pub price_range: String,
    #[serde(default, deserialize_with = "display_text")]
    pub description: String,
    #[serde(default, deserialize_with = "display_text")]
    pub photo: String,
    #[serde(default, deserialize_with = "display_text")]
    pub booking_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActivityCard {
    #[serde(default, deserialize_with = "display_text")]
    pub location_name: String,
    #[serde(default, deserialize_with = "display_text")]
    pub time: String,
    #[serde(default, deserialize_with = "display_text")]
    pub description: String,
    #[serde(default, deserialize_with = "display_text")]
    pub category: String,
    #[serde(default, deserialize_with = "display_text")]
    pub estimated_cost: String,
    #[serde(default, deserialize_with = "display_text")]
    pub travel_time: String,
    #[serde(default, deserialize_with = "display_text")]
    pub photo: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DayPlan {
    #[serde(default, deserialize_with = "display_text")]
    pub day: String,
    #[serde(default, deserialize_with = "display_text")]
    pub theme: String,
    pub activities: Vec<ActivityCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Itinerary {
    #[serde(default, deserialize_with = "display_text")]
    pub destination: String,
    #[serde(default, deserialize_with = "optional_list")]
    pub accommodation: Vec<AccommodationCard>,
    pub itinerary: Vec<DayPlan>,
}

/// A decoded `/generate` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItineraryResponse {
    Error(ApiError),
    Itinerary(Itinerary),
}

impl ItineraryResponse {
    pub fn from_json_str(body: &str) -> Result<Self, serde_json::Error> {
        Self::from_value(serde_json::from_str(body)?)
    }

    /// A truthy `error` member wins; a falsy one is ignored and the body
    /// must then be a complete itinerary.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        if !value.is_object() {
            return Err(de::Error::custom(format!(
                "expected an itinerary object, got {}",
                json_kind(&value)
            )));
        }
        if let Some(error) = value.get("error").filter(|error| is_truthy(error)) {
            return Ok(Self::Error(ApiError::new(value_to_text(error))));
        }
        serde_json::from_value(value).map(Self::Itinerary)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => match number.as_f64() {
            Some(n) if number.is_f64() && n.fract() == 0.0 && n.abs() < 1e15 => {
                format!("{}", n as i64)
            }
            _ => number.to_string(),
        },
        other => other.to_string(),
    }
}

/// Display fields are shown as-is: strings, numbers and booleans become text,
/// missing or `null` becomes empty.
fn display_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_text(&value))
}

/// Anything other than an array renders as no entries.
fn optional_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        list @ Value::Array(_) => serde_json::from_value(list).map_err(de::Error::custom),
        _ => Ok(Vec::new()),
    }
}
