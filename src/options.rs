#![deny(clippy::all, clippy::pedantic)]

use serde_json::Value;
use tracing::warn;

use crate::args::RawOptions;
use crate::error::CliError;

/// Typed view of the flags passed to a resource command. Absent flags stay `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub id: Option<String>,
    pub sort: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub body: Option<Value>,
}

impl RequestOptions {
    /// The id, unless it was supplied empty.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// The body, unless it is a falsy JSON value (`null`, `false`, `0` or `""`).
    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref().filter(|body| !is_falsy(body))
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Convert raw flag strings into [`RequestOptions`].
///
/// # Errors
///
/// Returns [`CliError::BodyParse`] when `--body` is not valid JSON.
pub fn parse(raw: RawOptions) -> Result<RequestOptions, CliError> {
    let body = raw.body.as_deref().map(parse_body).transpose()?;
    Ok(RequestOptions {
        id: raw.id,
        sort: raw.sort.as_deref().map(parse_sort),
        page: raw.page.as_deref().and_then(|v| parse_number("page", v)),
        limit: raw.limit.as_deref().and_then(|v| parse_number("limit", v)),
        body,
    })
}

/// Drop the brackets of the `[-name,+id]` sort notation.
#[must_use]
pub fn parse_sort(sort: &str) -> String {
    sort.chars().filter(|c| !matches!(c, '[' | ']')).collect()
}

/// Non-numeric input yields `None` and is left out of the request.
#[must_use]
pub fn parse_number(flag: &'static str, value: &str) -> Option<u64> {
    match value.trim().parse::<u64>() {
        Ok(number) => Some(number),
        Err(err) => {
            warn!(flag, value, error = %err, "ignoring non-numeric option");
            None
        }
    }
}

/// # Errors
///
/// Returns [`CliError::BodyParse`] carrying the JSON parser's message.
pub fn parse_body(input: &str) -> Result<Value, CliError> {
    serde_json::from_str(input).map_err(CliError::BodyParse)
}
