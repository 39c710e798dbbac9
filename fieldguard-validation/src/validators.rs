// Built-in validators

use crate::ValidationError;
use crate::schema::FieldType;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::borrow::Cow;

// Dotted local part, hostname domain, alphabetic TLD of at least two characters
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[-!#$%&'*+/0-9=?A-Z^_a-z`{|}~](\.?[-!#$%&'*+/0-9=?A-Z^_a-z`{|}~])*@[a-zA-Z0-9](-*\.?[a-zA-Z0-9])*\.[a-zA-Z](-?[a-zA-Z0-9])+$").unwrap()
});

const MAX_EMAIL_LENGTH: usize = 254;
const MAX_LOCAL_PART_LENGTH: usize = 64;
const MAX_DOMAIN_LABEL_LENGTH: usize = 63;

/// Email well-formedness predicate shared by [`IsEmail`] and [`crate::validate_email`]
pub fn is_well_formed_email(value: &str) -> bool {
    if value.len() > MAX_EMAIL_LENGTH || !EMAIL_REGEX.is_match(value) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    local.len() <= MAX_LOCAL_PART_LENGTH
        && domain
            .split('.')
            .all(|label| label.len() <= MAX_DOMAIN_LABEL_LENGTH)
}

/// Interpret a JSON value as an instant.
///
/// Strings may be RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.fff]` (UTC) or a bare
/// `YYYY-MM-DD` (UTC midnight). Numbers are Unix epoch milliseconds.
pub fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_date_str(s.trim()),
        Value::Number(n) => {
            let millis = match n.as_i64() {
                Some(ms) => ms,
                None => n.as_f64().filter(|f| f.is_finite())? as i64,
            };
            DateTime::from_timestamp_millis(millis)
        }
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Name of a JSON value's kind, for diagnostics
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn render(value: &Value) -> String {
    value.to_string()
}

// Presence

/// Fails when a field is absent
pub struct Required;

impl Required {
    /// `value` is `None` when the field is missing (or treated as missing).
    pub fn validate(value: Option<&Value>, field: &str) -> Result<(), ValidationError> {
        match value {
            Some(_) => Ok(()),
            None => Err(
                ValidationError::new(field, format!("{} is a required field", field))
                    .with_constraint("required"),
            ),
        }
    }
}

// Type checks

/// Cast `value` toward `field_type` the way form input is interpreted.
///
/// Numeric strings (whitespace ignored) become numbers, numbers and booleans
/// become strings, and `true`/`false`/`1`/`0` become booleans. Returns `None`
/// when there is nothing to cast or the cast does not apply.
pub fn cast(field_type: FieldType, value: &Value) -> Option<Value> {
    match (field_type, value) {
        (FieldType::Number | FieldType::Integer, Value::String(s)) => cast_number(s),
        (FieldType::String, Value::Number(n)) => Some(Value::String(number_to_string(n))),
        (FieldType::String, Value::Bool(b)) => Some(Value::String(b.to_string())),
        (FieldType::Boolean, Value::String(s)) => cast_bool(s).map(Value::Bool),
        (FieldType::Boolean, Value::Number(n)) => cast_bool(&number_to_string(n)).map(Value::Bool),
        _ => None,
    }
}

fn cast_number(s: &str) -> Option<Value> {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if let Ok(n) = compact.parse::<i64>() {
        return Some(Value::from(n));
    }
    compact
        .parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
}

fn cast_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") || s == "1" {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") || s == "0" {
        Some(false)
    } else {
        None
    }
}

// Integral floats print without a trailing `.0`
fn number_to_string(n: &serde_json::Number) -> String {
    if n.is_f64() {
        n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string())
    } else {
        n.to_string()
    }
}

/// Validates the JSON kind of a value
pub struct IsType(pub FieldType);

impl IsType {
    pub fn validate(&self, value: &Value, field: &str) -> Result<(), ValidationError> {
        if self.accepts(value) {
            return Ok(());
        }

        let shown = if self.0 == FieldType::Date {
            "Invalid Date".to_string()
        } else {
            render(value)
        };
        Err(self.type_error(field, shown, None, value))
    }

    /// Cast `value` first, then check the kind of the result.
    ///
    /// On success returns the value the remaining constraints run against. A
    /// failed number or date cast reports `NaN`/`Invalid Date` along with the
    /// value it was cast from.
    pub fn cast_and_validate<'a>(
        &self,
        value: &'a Value,
        field: &str,
    ) -> Result<Cow<'a, Value>, ValidationError> {
        let candidate = match cast(self.0, value) {
            Some(cast) => Cow::Owned(cast),
            None => Cow::Borrowed(value),
        };

        if self.accepts(&candidate) {
            return Ok(candidate);
        }

        let shown = match self.0 {
            FieldType::Number | FieldType::Integer if !value.is_null() => "NaN",
            FieldType::Date if !value.is_null() => "Invalid Date",
            _ => return Err(self.type_error(field, render(value), None, value)),
        };
        Err(self.type_error(field, shown.to_string(), Some(render(value)), value))
    }

    fn accepts(&self, value: &Value) -> bool {
        match self.0 {
            FieldType::String => value.is_string(),
            FieldType::Number | FieldType::Integer => value.is_number(),
            FieldType::Boolean => value.is_boolean(),
            FieldType::Date => parse_date(value).is_some(),
            FieldType::Object => value.is_object(),
            FieldType::Array => value.is_array(),
            FieldType::Any => true,
        }
    }

    fn type_error(
        &self,
        field: &str,
        shown: String,
        cast_from: Option<String>,
        value: &Value,
    ) -> ValidationError {
        let suffix = match cast_from {
            Some(original) => format!(" (cast from the value `{}`).", original),
            None => ".".to_string(),
        };

        ValidationError::new(
            field,
            format!(
                "{} must be a `{}` type, but the final value was: `{}`{}",
                field,
                self.0.type_label(),
                shown,
                suffix
            ),
        )
        .with_constraint("typeError")
        .with_value(render(value))
    }
}

/// Rejects numbers with a fractional part
pub struct IsInteger;

impl IsInteger {
    pub fn validate(value: f64, field: &str) -> Result<(), ValidationError> {
        if value.fract() == 0.0 {
            Ok(())
        } else {
            Err(
                ValidationError::new(field, format!("{} must be an integer", field))
                    .with_constraint("integer")
                    .with_value(value.to_string()),
            )
        }
    }
}

// String validators

/// Validates minimum string length, in characters
pub struct MinLength(pub usize);

impl MinLength {
    pub fn validate(&self, value: &str, field: &str) -> Result<(), ValidationError> {
        if value.chars().count() < self.0 {
            Err(ValidationError::new(
                field,
                format!("{} must be at least {} characters", field, self.0),
            )
            .with_constraint("minLength")
            .with_value(value.to_string()))
        } else {
            Ok(())
        }
    }
}

/// Validates maximum string length, in characters
pub struct MaxLength(pub usize);

impl MaxLength {
    pub fn validate(&self, value: &str, field: &str) -> Result<(), ValidationError> {
        if value.chars().count() > self.0 {
            Err(ValidationError::new(
                field,
                format!("{} must be at most {} characters", field, self.0),
            )
            .with_constraint("maxLength")
            .with_value(value.to_string()))
        } else {
            Ok(())
        }
    }
}

/// Validates email format
pub struct IsEmail;

impl IsEmail {
    pub fn validate(value: &str, field: &str) -> Result<(), ValidationError> {
        if is_well_formed_email(value) {
            Ok(())
        } else {
            Err(
                ValidationError::new(field, format!("{} must be a valid email", field))
                    .with_constraint("email")
                    .with_value(value.to_string()),
            )
        }
    }
}

/// Validates against a regex pattern
#[derive(Debug, Clone)]
pub struct Matches(pub Regex);

impl Matches {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self(Regex::new(pattern)?))
    }

    pub fn validate(&self, value: &str, field: &str) -> Result<(), ValidationError> {
        if self.0.is_match(value) {
            Ok(())
        } else {
            Err(ValidationError::new(
                field,
                format!(
                    "{} must match the following: \"{}\"",
                    field,
                    self.0.as_str()
                ),
            )
            .with_constraint("matches")
            .with_value(value.to_string()))
        }
    }
}

// Number validators

/// Validates minimum value (inclusive)
pub struct Min(pub f64);

impl Min {
    pub fn validate(&self, value: f64, field: &str) -> Result<(), ValidationError> {
        if value < self.0 {
            Err(ValidationError::new(
                field,
                format!("{} must be greater than or equal to {}", field, self.0),
            )
            .with_constraint("min")
            .with_value(value.to_string()))
        } else {
            Ok(())
        }
    }
}

/// Validates maximum value (inclusive)
pub struct Max(pub f64);

impl Max {
    pub fn validate(&self, value: f64, field: &str) -> Result<(), ValidationError> {
        if value > self.0 {
            Err(ValidationError::new(
                field,
                format!("{} must be less than or equal to {}", field, self.0),
            )
            .with_constraint("max")
            .with_value(value.to_string()))
        } else {
            Ok(())
        }
    }
}

// Date validators

/// Passes only for instants strictly after `now`
pub struct IsFutureDate<'a> {
    pub message: &'a str,
}

impl IsFutureDate<'_> {
    pub fn validate(
        &self,
        value: &Value,
        field: &str,
        now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        match parse_date(value) {
            Some(instant) if instant > now => Ok(()),
            _ => Err(ValidationError::new(field, self.message)
                .with_constraint("isFutureDate")
                .with_value(render(value))),
        }
    }
}
