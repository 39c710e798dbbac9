// Custom rules and rule aggregation

use crate::validators::{is_well_formed_email, parse_date};
use crate::{Clock, ValidationReport};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

type RuleFn = Arc<dyn Fn(&Value) -> Option<String> + Send + Sync>;

/// Bounds for [`validate_string_length`], inclusive, counted in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LengthOptions {
    pub min: usize,
    pub max: usize,
}

impl LengthOptions {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

impl Default for LengthOptions {
    fn default() -> Self {
        Self { min: 0, max: 255 }
    }
}

/// `None` for a well-formed address, otherwise `"Invalid email format."`
pub fn validate_email(email: &str) -> Option<String> {
    if is_well_formed_email(email) {
        None
    } else {
        Some("Invalid email format.".to_string())
    }
}

/// `None` when the character count lies within `options`
pub fn validate_string_length(value: &str, options: LengthOptions) -> Option<String> {
    let len = value.chars().count();
    if len < options.min || len > options.max {
        Some(format!(
            "String must be between {} and {} characters long.",
            options.min, options.max
        ))
    } else {
        None
    }
}

/// A named pure check over a whole record.
///
/// Returns `None` on success and a message on failure.
///
/// ```
/// use fieldguard_validation::Rule;
/// use serde_json::json;
///
/// let passwords_match = Rule::new("passwordsMatch", |data| {
///     (data["password"] != data["confirm"]).then(|| "Passwords must match".to_string())
/// });
///
/// assert_eq!(passwords_match.check(&json!({"password": "a", "confirm": "a"})), None);
/// assert!(passwords_match.check(&json!({"password": "a", "confirm": "b"})).is_some());
/// ```
#[derive(Clone)]
pub struct Rule {
    name: Cow<'static, str>,
    check: RuleFn,
}

impl Rule {
    pub fn new<F>(name: impl Into<Cow<'static, str>>, check: F) -> Self
    where
        F: Fn(&Value) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    /// Apply `check` to one field; an absent or null field passes
    pub fn for_field<F>(field: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Value) -> Option<String> + Send + Sync + 'static,
    {
        let field = field.into();
        Self::new(format!("field:{}", field), move |data| {
            match data.get(&field) {
                None | Some(Value::Null) => None,
                Some(value) => check(value),
            }
        })
    }

    /// Email format check on `field`
    pub fn email(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::for_field(field.clone(), |value| match value.as_str() {
            Some(s) => validate_email(s),
            None => validate_email(""),
        })
        .named(format!("email:{}", field))
    }

    /// Length bounds check on `field`
    pub fn string_length(field: impl Into<String>, options: LengthOptions) -> Self {
        let field = field.into();
        Self::for_field(field.clone(), move |value| match value.as_str() {
            Some(s) => validate_string_length(s, options),
            None => Some(format!(
                "String must be between {} and {} characters long.",
                options.min, options.max
            )),
        })
        .named(format!("stringLength:{}", field))
    }

    /// Passes when `field` holds an instant strictly after `clock.now()`
    pub fn future_date(
        field: impl Into<String>,
        message: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let field = field.into();
        let message = message.into();
        Self::for_field(field.clone(), move |value| match parse_date(value) {
            Some(instant) if instant > clock.now() => None,
            _ => Some(message.clone()),
        })
        .named(format!("isFutureDate:{}", field))
    }

    fn named(mut self, name: String) -> Self {
        self.name = Cow::Owned(name);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn check(&self, data: &Value) -> Option<String> {
        (self.check)(data)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// Apply every rule to `data` in order and collect the failures.
///
/// Errors appear in the same order as the rules that produced them. An empty
/// rule list yields a valid report.
pub fn validate_custom_rules(data: &Value, rules: &[Rule]) -> ValidationReport {
    let errors: Vec<String> = rules
        .iter()
        .filter_map(|rule| {
            let outcome = rule.check(data);
            if outcome.is_some() {
                tracing::trace!(rule = rule.name(), "Custom rule failed");
            }
            outcome
        })
        .collect();

    tracing::debug!(
        rules = rules.len(),
        errors = errors.len(),
        "Custom rules evaluated"
    );

    ValidationReport::from_errors(errors)
}

/// Ordered list of rules
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule
    #[allow(clippy::should_implement_trait)]
    pub fn add(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Add an anonymous closure rule
    pub fn check<F>(self, check: F) -> Self
    where
        F: Fn(&Value) -> Option<String> + Send + Sync + 'static,
    {
        let name = format!("rule#{}", self.rules.len());
        self.add(Rule::new(name, check))
    }

    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Validate `data` against all rules
    pub fn validate(&self, data: &Value) -> ValidationReport {
        validate_custom_rules(data, &self.rules)
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
