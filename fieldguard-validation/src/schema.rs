// Schema definitions and the compiled schema evaluator

use crate::validators::{
    IsEmail, IsFutureDate, IsInteger, IsType, Matches, Max, MaxLength, Min, MinLength, Required,
    json_kind,
};
use crate::errors::Result;
use crate::{SchemaError, ValidationErrors, ValidatorConfig};
use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;

/// Primitive type expectation of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Integer,
    Boolean,
    Date,
    Object,
    Array,
    #[default]
    Any,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Object => "object",
            FieldType::Array => "array",
            FieldType::Any => "any",
        }
    }

    /// Name used in type-mismatch messages; integers are numbers there.
    pub fn type_label(&self) -> &'static str {
        match self {
            FieldType::Integer => "number",
            other => other.as_str(),
        }
    }

    fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Number | FieldType::Integer)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named custom predicates
#[derive(Debug, Clone, PartialEq)]
pub enum CustomRule {
    /// Passes only when the value is an instant strictly after "now"
    FutureDate { message: String },
}

impl CustomRule {
    pub fn name(&self) -> &'static str {
        match self {
            CustomRule::FutureDate { .. } => "isFutureDate",
        }
    }
}

/// A single constraint on a field
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    Required,
    TypeOf(FieldType),
    MinLength(usize),
    MaxLength(usize),
    Min(f64),
    Max(f64),
    Email,
    Matches(String),
    Custom(CustomRule),
}

impl Constraint {
    pub fn name(&self) -> &'static str {
        match self {
            Constraint::Required => "required",
            Constraint::TypeOf(_) => "type",
            Constraint::MinLength(_) => "minLength",
            Constraint::MaxLength(_) => "maxLength",
            Constraint::Min(_) => "min",
            Constraint::Max(_) => "max",
            Constraint::Email => "email",
            Constraint::Matches(_) => "matches",
            Constraint::Custom(rule) => rule.name(),
        }
    }
}

/// Type expectation plus modifiers for one field.
///
/// ```
/// use fieldguard_validation::FieldConstraint;
///
/// let name = FieldConstraint::string().required().min_length(2).max_length(50);
/// let age = FieldConstraint::integer().min(0.0);
/// assert_eq!(name.constraints().len(), 4);
/// assert_eq!(age.field_type(), fieldguard_validation::FieldType::Integer);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConstraint {
    constraints: Vec<Constraint>,
}

impl FieldConstraint {
    pub fn new(field_type: FieldType) -> Self {
        Self {
            constraints: vec![Constraint::TypeOf(field_type)],
        }
    }

    pub fn string() -> Self {
        Self::new(FieldType::String)
    }

    pub fn number() -> Self {
        Self::new(FieldType::Number)
    }

    pub fn integer() -> Self {
        Self::new(FieldType::Integer)
    }

    pub fn boolean() -> Self {
        Self::new(FieldType::Boolean)
    }

    pub fn date() -> Self {
        Self::new(FieldType::Date)
    }

    pub fn object() -> Self {
        Self::new(FieldType::Object)
    }

    pub fn array() -> Self {
        Self::new(FieldType::Array)
    }

    pub fn any() -> Self {
        Self::new(FieldType::Any)
    }

    /// Append an arbitrary constraint
    pub fn with(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn required(self) -> Self {
        self.with(Constraint::Required)
    }

    pub fn min_length(self, min: usize) -> Self {
        self.with(Constraint::MinLength(min))
    }

    pub fn max_length(self, max: usize) -> Self {
        self.with(Constraint::MaxLength(max))
    }

    pub fn min(self, min: f64) -> Self {
        self.with(Constraint::Min(min))
    }

    pub fn max(self, max: f64) -> Self {
        self.with(Constraint::Max(max))
    }

    pub fn email(self) -> Self {
        self.with(Constraint::Email)
    }

    pub fn matches(self, pattern: impl Into<String>) -> Self {
        self.with(Constraint::Matches(pattern.into()))
    }

    pub fn future_date(self, message: impl Into<String>) -> Self {
        self.with(Constraint::Custom(CustomRule::FutureDate {
            message: message.into(),
        }))
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Declared type, `Any` when none was given
    pub fn field_type(&self) -> FieldType {
        self.constraints
            .iter()
            .find_map(|c| match c {
                Constraint::TypeOf(t) => Some(*t),
                _ => None,
            })
            .unwrap_or_default()
    }
}

// Keys of the declarative form, e.g. `{"type": "string", "required": true, "minLength": 2}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(field_identifier, rename_all = "camelCase")]
enum FieldKey {
    #[serde(rename = "type")]
    Type,
    Required,
    MinLength,
    MaxLength,
    Min,
    Max,
    Email,
    Matches,
    FutureDate,
}

impl FieldKey {
    fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Type => "type",
            FieldKey::Required => "required",
            FieldKey::MinLength => "minLength",
            FieldKey::MaxLength => "maxLength",
            FieldKey::Min => "min",
            FieldKey::Max => "max",
            FieldKey::Email => "email",
            FieldKey::Matches => "matches",
            FieldKey::FutureDate => "futureDate",
        }
    }
}

// Modifiers are pushed in the order their keys appear in the document
impl<'de> Deserialize<'de> for FieldConstraint {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ConstraintVisitor;

        impl<'de> Visitor<'de> for ConstraintVisitor {
            type Value = FieldConstraint;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a field constraint map")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut field_type = FieldType::default();
                let mut modifiers = Vec::new();
                let mut seen: Vec<FieldKey> = Vec::new();

                while let Some(key) = map.next_key::<FieldKey>()? {
                    if seen.contains(&key) {
                        return Err(de::Error::duplicate_field(key.as_str()));
                    }
                    seen.push(key);

                    match key {
                        FieldKey::Type => field_type = map.next_value()?,
                        FieldKey::Required => {
                            if map.next_value()? {
                                modifiers.push(Constraint::Required);
                            }
                        }
                        FieldKey::MinLength => modifiers.push(Constraint::MinLength(map.next_value()?)),
                        FieldKey::MaxLength => modifiers.push(Constraint::MaxLength(map.next_value()?)),
                        FieldKey::Min => modifiers.push(Constraint::Min(map.next_value()?)),
                        FieldKey::Max => modifiers.push(Constraint::Max(map.next_value()?)),
                        FieldKey::Email => {
                            if map.next_value()? {
                                modifiers.push(Constraint::Email);
                            }
                        }
                        FieldKey::Matches => modifiers.push(Constraint::Matches(map.next_value()?)),
                        FieldKey::FutureDate => modifiers.push(Constraint::Custom(CustomRule::FutureDate {
                            message: map.next_value()?,
                        })),
                    }
                }

                let mut field = FieldConstraint::new(field_type);
                field.constraints.extend(modifiers);
                Ok(field)
            }
        }

        deserializer.deserialize_map(ConstraintVisitor)
    }
}

/// Ordered mapping from field name to constraint, as supplied by the caller.
///
/// Deserializing from a map keeps the entries in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaDefinition {
    fields: Vec<(String, FieldConstraint)>,
}

impl SchemaDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field
    pub fn field(mut self, name: impl Into<String>, constraint: FieldConstraint) -> Self {
        self.insert(name, constraint);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, constraint: FieldConstraint) {
        self.fields.push((name.into(), constraint));
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldConstraint)> {
        self.fields.iter().map(|(name, c)| (name.as_str(), c))
    }

    /// Parse the declarative JSON form
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(SchemaError::Definition)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(SchemaError::Definition)
    }
}

impl<K: Into<String>> FromIterator<(K, FieldConstraint)> for SchemaDefinition {
    fn from_iter<I: IntoIterator<Item = (K, FieldConstraint)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, c)| (k.into(), c)).collect(),
        }
    }
}

impl<'de> Deserialize<'de> for SchemaDefinition {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DefinitionVisitor;

        impl<'de> Visitor<'de> for DefinitionVisitor {
            type Value = SchemaDefinition;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from field name to field constraint")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut definition = SchemaDefinition::new();
                while let Some((name, constraint)) =
                    map.next_entry::<String, FieldConstraint>()?
                {
                    definition.insert(name, constraint);
                }
                Ok(definition)
            }
        }

        deserializer.deserialize_map(DefinitionVisitor)
    }
}

#[derive(Debug, Clone)]
enum Check {
    MinLength(usize),
    MaxLength(usize),
    Min(f64),
    Max(f64),
    Email,
    Matches(Matches),
    FutureDate(String),
}

#[derive(Debug, Clone)]
struct CompiledField {
    name: String,
    field_type: FieldType,
    required: bool,
    checks: Vec<Check>,
}

impl CompiledField {
    fn compile(name: &str, definition: &FieldConstraint) -> Result<Self> {
        if name.is_empty() {
            return Err(SchemaError::EmptyFieldName);
        }

        let field_type = definition.field_type();
        let mut required = false;
        let mut seen_type = false;
        let mut checks = Vec::new();

        let incompatible = |constraint: &'static str| SchemaError::IncompatibleConstraint {
            field: name.to_string(),
            constraint,
            field_type: field_type.to_string(),
        };

        for constraint in definition.constraints() {
            match constraint {
                Constraint::Required => required = true,
                Constraint::TypeOf(_) => {
                    if seen_type {
                        return Err(incompatible("type"));
                    }
                    seen_type = true;
                }
                Constraint::MinLength(n) | Constraint::MaxLength(n) => {
                    if field_type != FieldType::String {
                        return Err(incompatible(constraint.name()));
                    }
                    checks.push(match constraint {
                        Constraint::MinLength(_) => Check::MinLength(*n),
                        _ => Check::MaxLength(*n),
                    });
                }
                Constraint::Min(x) | Constraint::Max(x) => {
                    if !field_type.is_numeric() {
                        return Err(incompatible(constraint.name()));
                    }
                    if !x.is_finite() {
                        return Err(SchemaError::NonFiniteBound {
                            field: name.to_string(),
                            constraint: constraint.name(),
                        });
                    }
                    checks.push(match constraint {
                        Constraint::Min(_) => Check::Min(*x),
                        _ => Check::Max(*x),
                    });
                }
                Constraint::Email => {
                    if field_type != FieldType::String {
                        return Err(incompatible("email"));
                    }
                    checks.push(Check::Email);
                }
                Constraint::Matches(pattern) => {
                    if field_type != FieldType::String {
                        return Err(incompatible("matches"));
                    }
                    let matcher =
                        Matches::new(pattern).map_err(|source| SchemaError::InvalidPattern {
                            field: name.to_string(),
                            source,
                        })?;
                    checks.push(Check::Matches(matcher));
                }
                Constraint::Custom(CustomRule::FutureDate { message }) => {
                    if !matches!(field_type, FieldType::String | FieldType::Date) {
                        return Err(incompatible("isFutureDate"));
                    }
                    checks.push(Check::FutureDate(message.clone()));
                }
            }
        }

        let field = Self {
            name: name.to_string(),
            field_type,
            required,
            checks,
        };
        field.check_bounds()?;
        Ok(field)
    }

    fn check_bounds(&self) -> Result<()> {
        let min_length = self.checks.iter().filter_map(|c| match c {
            Check::MinLength(n) => Some(*n),
            _ => None,
        });
        let max_length = self.checks.iter().filter_map(|c| match c {
            Check::MaxLength(n) => Some(*n),
            _ => None,
        });
        if let (Some(min), Some(max)) = (min_length.max(), max_length.min()) {
            if min > max {
                return Err(SchemaError::InvalidBounds {
                    field: self.name.clone(),
                    constraint: "length",
                    min: min.to_string(),
                    max: max.to_string(),
                });
            }
        }

        let min = self
            .checks
            .iter()
            .filter_map(|c| match c {
                Check::Min(x) => Some(*x),
                _ => None,
            })
            .reduce(f64::max);
        let max = self
            .checks
            .iter()
            .filter_map(|c| match c {
                Check::Max(x) => Some(*x),
                _ => None,
            })
            .reduce(f64::min);
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(SchemaError::InvalidBounds {
                    field: self.name.clone(),
                    constraint: "range",
                    min: min.to_string(),
                    max: max.to_string(),
                });
            }
        }

        Ok(())
    }

    // Every failing constraint is recorded; nothing here returns early on a violation
    // except a type mismatch, after which the modifiers have nothing to inspect.
    fn evaluate(
        &self,
        raw: Option<&Value>,
        config: &ValidatorConfig,
        now: DateTime<Utc>,
        errors: &mut ValidationErrors,
    ) {
        let value = match raw {
            Some(Value::Null) if config.treat_null_as_missing => None,
            Some(Value::String(s))
                if s.is_empty() && self.required && self.field_type == FieldType::String =>
            {
                None
            }
            other => other,
        };

        let Some(value) = value else {
            if self.required {
                if let Err(e) = Required::validate(None, &self.name) {
                    errors.add(e);
                }
            }
            return;
        };

        let checked = if config.coerce_types {
            IsType(self.field_type).cast_and_validate(value, &self.name)
        } else {
            IsType(self.field_type)
                .validate(value, &self.name)
                .map(|()| Cow::Borrowed(value))
        };
        let value = match checked {
            Ok(value) => value,
            Err(e) => {
                errors.add(e);
                return;
            }
        };

        if self.field_type == FieldType::Integer {
            if let Some(Err(e)) = value.as_f64().map(|n| IsInteger::validate(n, &self.name)) {
                errors.add(e);
            }
        }

        for check in &self.checks {
            let outcome = match check {
                Check::MinLength(n) => value
                    .as_str()
                    .map_or(Ok(()), |s| MinLength(*n).validate(s, &self.name)),
                Check::MaxLength(n) => value
                    .as_str()
                    .map_or(Ok(()), |s| MaxLength(*n).validate(s, &self.name)),
                Check::Min(x) => value
                    .as_f64()
                    .map_or(Ok(()), |v| Min(*x).validate(v, &self.name)),
                Check::Max(x) => value
                    .as_f64()
                    .map_or(Ok(()), |v| Max(*x).validate(v, &self.name)),
                Check::Email => value
                    .as_str()
                    .map_or(Ok(()), |s| IsEmail::validate(s, &self.name)),
                Check::Matches(matcher) => value
                    .as_str()
                    .map_or(Ok(()), |s| matcher.validate(s, &self.name)),
                Check::FutureDate(message) => IsFutureDate {
                    message: message.as_str(),
                }
                .validate(&value, &self.name, now),
            };

            if let Err(e) = outcome {
                errors.add(e);
            }
        }
    }
}

/// Compiled, immutable schema.
///
/// Built once from a [`SchemaDefinition`]; evaluation never mutates it.
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<CompiledField>,
}

impl Schema {
    /// Compile a definition, rejecting malformed ones
    pub fn compile(definition: &SchemaDefinition) -> Result<Self> {
        let mut fields: Vec<CompiledField> = Vec::with_capacity(definition.len());

        for (name, constraint) in definition.iter() {
            if fields.iter().any(|f| f.name == name) {
                return Err(SchemaError::DuplicateField(name.to_string()));
            }
            fields.push(CompiledField::compile(name, constraint)?);
        }

        tracing::debug!(fields = fields.len(), "Schema compiled");

        Ok(Self { fields })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in schema order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f.name == field)
    }

    /// Evaluate every field constraint against `data`.
    ///
    /// Returns `Err` only when `data` is not an object; violations come back in
    /// the `Ok` collection, in schema order.
    pub fn evaluate(
        &self,
        data: &Value,
        config: &ValidatorConfig,
        now: DateTime<Utc>,
    ) -> Result<ValidationErrors> {
        let object = data.as_object().ok_or(SchemaError::NotAnObject {
            found: json_kind(data),
        })?;

        let mut errors = ValidationErrors::default();

        for field in &self.fields {
            field.evaluate(object.get(&field.name), config, now, &mut errors);
        }

        if config.deny_unknown_fields {
            self.check_unknown(object, &mut errors);
        }

        Ok(errors)
    }

    fn check_unknown(&self, object: &Map<String, Value>, errors: &mut ValidationErrors) {
        let unknown: Vec<&str> = object
            .keys()
            .map(String::as_str)
            .filter(|key| !self.contains(key))
            .collect();

        if !unknown.is_empty() {
            errors.add(
                crate::ValidationError::new(
                    "this",
                    format!("this field has unspecified keys: {}", unknown.join(", ")),
                )
                .with_constraint("noUnknown"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()
    }

    fn messages(schema: &Schema, data: Value) -> Vec<String> {
        schema
            .evaluate(&data, &ValidatorConfig::default(), now())
            .unwrap()
            .messages()
    }

    #[test]
    fn test_collects_every_violation() {
        let schema = Schema::compile(
            &SchemaDefinition::new()
                .field("name", FieldConstraint::string().required())
                .field("age", FieldConstraint::number().min(0.0)),
        )
        .unwrap();

        assert_eq!(
            messages(&schema, json!({"age": -1})),
            vec![
                "name is a required field",
                "age must be greater than or equal to 0",
            ]
        );
    }

    #[test]
    fn test_multiple_modifiers_on_one_field() {
        let schema = Schema::compile(
            &SchemaDefinition::new().field(
                "code",
                FieldConstraint::string()
                    .min_length(5)
                    .matches("^[0-9]+$"),
            ),
        )
        .unwrap();

        let errors = messages(&schema, json!({"code": "ab"}));
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0], "code must be at least 5 characters");
        assert_eq!(errors[1], r#"code must match the following: "^[0-9]+$""#);
    }

    #[test]
    fn test_type_mismatch_skips_modifiers() {
        let schema = Schema::compile(
            &SchemaDefinition::new().field("age", FieldConstraint::integer().min(18.0).max(99.0)),
        )
        .unwrap();

        assert_eq!(
            messages(&schema, json!({"age": "old"})),
            vec![
                "age must be a `number` type, but the final value was: `NaN` (cast from the value `\"old\"`)."
            ]
        );
        assert_eq!(
            messages(&schema, json!({"age": 17.5})),
            vec![
                "age must be an integer",
                "age must be greater than or equal to 18",
            ]
        );
    }

    #[test]
    fn test_optional_fields_skip_when_absent_or_null() {
        let schema = Schema::compile(
            &SchemaDefinition::new().field("email", FieldConstraint::string().email()),
        )
        .unwrap();

        assert!(messages(&schema, json!({})).is_empty());
        assert!(messages(&schema, json!({"email": null})).is_empty());
        assert_eq!(
            messages(&schema, json!({"email": "nope"})),
            vec!["email must be a valid email"]
        );
    }

    #[test]
    fn test_null_not_missing_when_configured() {
        let schema = Schema::compile(
            &SchemaDefinition::new().field("nickname", FieldConstraint::string()),
        )
        .unwrap();
        let config = ValidatorConfig::default().treat_null_as_missing(false);

        let errors = schema
            .evaluate(&json!({"nickname": null}), &config, now())
            .unwrap();
        assert_eq!(
            errors.messages(),
            vec!["nickname must be a `string` type, but the final value was: `null`."]
        );
    }

    #[test]
    fn test_required_string_rejects_empty() {
        let schema = Schema::compile(
            &SchemaDefinition::new()
                .field("name", FieldConstraint::string().required())
                .field("note", FieldConstraint::any().required()),
        )
        .unwrap();

        assert_eq!(
            messages(&schema, json!({"name": "", "note": ""})),
            vec!["name is a required field"]
        );
    }

    #[test]
    fn test_future_date_constraint() {
        let schema = Schema::compile(
            &SchemaDefinition::new().field(
                "start",
                FieldConstraint::date().future_date("Start must be in the future"),
            ),
        )
        .unwrap();

        assert!(messages(&schema, json!({"start": "2030-01-02"})).is_empty());
        assert_eq!(
            messages(&schema, json!({"start": "2030-01-01T00:00:00Z"})),
            vec!["Start must be in the future"]
        );
    }

    #[test]
    fn test_absent_optional_future_date_passes() {
        let schema = Schema::compile(
            &SchemaDefinition::new()
                .field("start", FieldConstraint::date().future_date("Start must be in the future"))
                .field(
                    "end",
                    FieldConstraint::date()
                        .required()
                        .future_date("End must be in the future"),
                ),
        )
        .unwrap();

        assert_eq!(
            messages(&schema, json!({})),
            vec!["end is a required field"]
        );
        assert!(messages(&schema, json!({"start": null, "end": "2030-02-01"})).is_empty());
    }

    #[test]
    fn test_unknown_fields() {
        let schema =
            Schema::compile(&SchemaDefinition::new().field("a", FieldConstraint::any())).unwrap();
        let config = ValidatorConfig::default().deny_unknown_fields(true);

        let errors = schema
            .evaluate(&json!({"a": 1, "b": 2, "c": 3}), &config, now())
            .unwrap();
        assert_eq!(
            errors.messages(),
            vec!["this field has unspecified keys: b, c"]
        );
        assert_eq!(errors.errors[0].constraint, "noUnknown");
    }

    #[test]
    fn test_empty_schema_accepts_any_object() {
        let schema = Schema::compile(&SchemaDefinition::new()).unwrap();
        assert!(schema.is_empty());
        assert!(messages(&schema, json!({"anything": true})).is_empty());
    }

    #[test]
    fn test_non_object_input_is_structural() {
        let schema = Schema::compile(&SchemaDefinition::new()).unwrap();
        let err = schema
            .evaluate(&json!([1, 2]), &ValidatorConfig::default(), now())
            .unwrap_err();
        assert!(matches!(err, SchemaError::NotAnObject { found: "array" }));
    }

    #[test]
    fn test_compile_rejects_malformed_definitions() {
        let dup = SchemaDefinition::new()
            .field("a", FieldConstraint::any())
            .field("a", FieldConstraint::string());
        assert!(matches!(
            Schema::compile(&dup),
            Err(SchemaError::DuplicateField(name)) if name == "a"
        ));

        let empty = SchemaDefinition::new().field("", FieldConstraint::any());
        assert!(matches!(
            Schema::compile(&empty),
            Err(SchemaError::EmptyFieldName)
        ));

        let wrong_type = SchemaDefinition::new().field("n", FieldConstraint::number().min_length(2));
        assert!(matches!(
            Schema::compile(&wrong_type),
            Err(SchemaError::IncompatibleConstraint { constraint: "minLength", .. })
        ));

        let inverted = SchemaDefinition::new()
            .field("s", FieldConstraint::string().min_length(5).max_length(2));
        assert!(matches!(
            Schema::compile(&inverted),
            Err(SchemaError::InvalidBounds { constraint: "length", .. })
        ));

        let range = SchemaDefinition::new().field("n", FieldConstraint::number().min(10.0).max(1.0));
        assert!(matches!(
            Schema::compile(&range),
            Err(SchemaError::InvalidBounds { constraint: "range", .. })
        ));

        let infinite = SchemaDefinition::new().field("n", FieldConstraint::number().max(f64::NAN));
        assert!(matches!(
            Schema::compile(&infinite),
            Err(SchemaError::NonFiniteBound { constraint: "max", .. })
        ));

        let bad_regex = SchemaDefinition::new().field("s", FieldConstraint::string().matches("("));
        assert!(matches!(
            Schema::compile(&bad_regex),
            Err(SchemaError::InvalidPattern { .. })
        ));

        let two_types = SchemaDefinition::new().field(
            "s",
            FieldConstraint::string().with(Constraint::TypeOf(FieldType::Number)),
        );
        assert!(matches!(
            Schema::compile(&two_types),
            Err(SchemaError::IncompatibleConstraint { constraint: "type", .. })
        ));
    }

    #[test]
    fn test_declarative_definition_keeps_order() {
        let definition = SchemaDefinition::from_json_str(
            r#"{
                "zeta": {"type": "string", "required": true, "minLength": 2},
                "alpha": {"type": "integer", "min": 0},
                "start": {"type": "date", "futureDate": "Start must be in the future"}
            }"#,
        )
        .unwrap();

        let names: Vec<&str> = definition.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zeta", "alpha", "start"]);

        let (_, zeta) = definition.iter().next().unwrap();
        assert_eq!(
            zeta.constraints(),
            &[
                Constraint::TypeOf(FieldType::String),
                Constraint::Required,
                Constraint::MinLength(2),
            ]
        );
    }

    #[test]
    fn test_declarative_definition_rejects_unknown_keys() {
        let err = SchemaDefinition::from_json_str(r#"{"a": {"type": "string", "minLen": 2}}"#)
            .unwrap_err();
        assert!(matches!(err, SchemaError::Definition(_)));

        let err = SchemaDefinition::from_json_str(r#"{"a": {"type": "uuid"}}"#).unwrap_err();
        assert!(matches!(err, SchemaError::Definition(_)));

        let err = SchemaDefinition::from_json_str(r#"{"a": {"min": 1, "min": 2}}"#).unwrap_err();
        assert!(matches!(err, SchemaError::Definition(_)));
    }

    #[test]
    fn test_declarative_modifiers_follow_document_order() {
        let definition = SchemaDefinition::from_json_str(
            r#"{"code": {"matches": "^[0-9]+$", "type": "string", "minLength": 5}}"#,
        )
        .unwrap();
        let (_, code) = definition.iter().next().unwrap();
        assert_eq!(
            code.constraints(),
            &[
                Constraint::TypeOf(FieldType::String),
                Constraint::Matches("^[0-9]+$".to_string()),
                Constraint::MinLength(5),
            ]
        );

        let schema = Schema::compile(&definition).unwrap();
        assert_eq!(
            messages(&schema, json!({"code": "ab"})),
            vec![
                r#"code must match the following: "^[0-9]+$""#,
                "code must be at least 5 characters",
            ]
        );
    }

    #[test]
    fn test_declarative_false_flags_add_nothing() {
        let definition =
            SchemaDefinition::from_json_str(r#"{"a": {"required": false, "email": false}}"#).unwrap();
        let (_, a) = definition.iter().next().unwrap();
        assert_eq!(a.constraints(), &[Constraint::TypeOf(FieldType::Any)]);
    }

    fn form_schema() -> Schema {
        Schema::compile(
            &SchemaDefinition::new()
                .field("age", FieldConstraint::number().min(0.0))
                .field("zip", FieldConstraint::string().min_length(5)),
        )
        .unwrap()
    }

    #[test]
    fn test_form_input_is_cast_before_checks() {
        let schema = form_schema();

        assert!(messages(&schema, json!({"age": "5", "zip": 12345})).is_empty());
        assert_eq!(
            messages(&schema, json!({"age": " -3 ", "zip": 123})),
            vec![
                "age must be greater than or equal to 0",
                "zip must be at least 5 characters",
            ]
        );
    }

    #[test]
    fn test_failed_cast_shows_original_value() {
        let schema = form_schema();

        assert_eq!(
            messages(&schema, json!({"age": "abc"})),
            vec!["age must be a `number` type, but the final value was: `NaN` (cast from the value `\"abc\"`)."]
        );
        assert_eq!(
            messages(&schema, json!({"zip": {"code": 1}})),
            vec![r#"zip must be a `string` type, but the final value was: `{"code":1}`."#]
        );
    }

    #[test]
    fn test_cast_to_integer_and_boolean() {
        let schema = Schema::compile(
            &SchemaDefinition::new()
                .field("seats", FieldConstraint::integer().max(10.0))
                .field("agree", FieldConstraint::boolean().required()),
        )
        .unwrap();

        assert!(messages(&schema, json!({"seats": "4", "agree": "true"})).is_empty());
        assert_eq!(
            messages(&schema, json!({"seats": "4.5", "agree": "false"})),
            vec!["seats must be an integer"]
        );
    }

    #[test]
    fn test_casting_can_be_disabled() {
        let schema = form_schema();
        let config = ValidatorConfig::default().coerce_types(false);

        let errors = schema
            .evaluate(&json!({"age": "5", "zip": 12345}), &config, now())
            .unwrap();
        assert_eq!(
            errors.messages(),
            vec![
                "age must be a `number` type, but the final value was: `\"5\"`.",
                "zip must be a `string` type, but the final value was: `12345`.",
            ]
        );
    }
}
