//! Field rules - pure judgments on a single value.

use std::collections::BTreeMap;
use std::fmt;

use crate::value::FieldValue;

use super::result::RuleOutcome;

/// Code reported by `required` (and by the multi-language variant).
pub const CODE_REQUIRED: &str = "error.field.required";
/// Code reported when a value does not parse as an integer.
pub const CODE_NUMERIC: &str = "error.field.numeric";
/// Code reported for a malformed email address.
pub const CODE_EMAIL: &str = "error.field.email";
/// Generic code for custom rules without one of their own.
pub const CODE_GENERIC: &str = "error.field";

/// Code for exceeding an upper bound, parameterized with the limit.
pub fn max_code(limit: impl fmt::Display) -> String {
    format!("error.field.max#{limit}")
}

/// Code for violating a lower bound, parameterized with the limit.
pub fn min_code(limit: impl fmt::Display) -> String {
    format!("error.field.min#{limit}")
}

/// A pure, stateless judgment on one field value.
///
/// Rules are resolved once at registration time and dispatch on the value's
/// variant; they never touch the request and never have side effects.
pub trait Rule: Send + Sync {
    /// Judge a single value.
    fn apply(&self, value: &FieldValue) -> RuleOutcome;
}

/// A registered rule, boxed for storage in a field's rule list.
pub type BoxedRule = Box<dyn Rule>;

/// The value must be present and non-blank after string conversion.
pub struct Required;

impl Rule for Required {
    fn apply(&self, value: &FieldValue) -> RuleOutcome {
        if value.is_null() || value.to_string().trim().is_empty() {
            RuleOutcome::fail(CODE_REQUIRED)
        } else {
            RuleOutcome::ok()
        }
    }
}

/// The value must carry at least one non-blank translation.
///
/// Runs the basic required check first, then expects a language-code → text
/// mapping, either as a `Map` value or as JSON text. Malformed JSON degrades
/// to "no languages present"; it is never a parse error.
pub struct RequiredMultiLanguage;

impl Rule for RequiredMultiLanguage {
    fn apply(&self, value: &FieldValue) -> RuleOutcome {
        let base = Required.apply(value);
        if !base.success {
            return base;
        }
        let languages = language_map(value);
        if languages.values().any(|text| !text.trim().is_empty()) {
            RuleOutcome::ok()
        } else {
            RuleOutcome::fail(CODE_REQUIRED)
        }
    }
}

fn language_map(value: &FieldValue) -> BTreeMap<String, String> {
    match value {
        FieldValue::Map(map) => map.clone(),
        FieldValue::Text(text) => serde_json::from_str(text).unwrap_or_default(),
        _ => BTreeMap::new(),
    }
}

/// String length must stay within the supplied bounds.
///
/// Bounds are checked independently; both codes can fire at once.
pub struct Length {
    min: Option<usize>,
    max: Option<usize>,
}

impl Rule for Length {
    fn apply(&self, value: &FieldValue) -> RuleOutcome {
        let len = value.to_string().chars().count();
        let mut codes = Vec::new();
        if let Some(max) = self.max
            && len > max
        {
            codes.push(max_code(max));
        }
        if let Some(min) = self.min
            && len < min
        {
            codes.push(min_code(min));
        }
        if codes.is_empty() {
            RuleOutcome::ok()
        } else {
            RuleOutcome::fail_all(codes)
        }
    }
}

/// The value must be an integer, optionally within bounds.
///
/// A parse failure reports only the numeric-format code; range checks are
/// skipped so a non-numeric value never also reads as out-of-range. A null
/// value fails only when the rule is marked required.
pub struct Number {
    min: Option<i64>,
    max: Option<i64>,
    required: bool,
}

impl Rule for Number {
    fn apply(&self, value: &FieldValue) -> RuleOutcome {
        if value.is_null() {
            return if self.required {
                RuleOutcome::fail(CODE_REQUIRED)
            } else {
                RuleOutcome::ok()
            };
        }
        let parsed = match value {
            FieldValue::Int(n) => Some(*n),
            FieldValue::Text(text) => text.trim().parse::<i64>().ok(),
            _ => None,
        };
        let Some(n) = parsed else {
            return RuleOutcome::fail(CODE_NUMERIC);
        };
        let mut codes = Vec::new();
        if let Some(max) = self.max
            && n > max
        {
            codes.push(max_code(max));
        }
        if let Some(min) = self.min
            && n < min
        {
            codes.push(min_code(min));
        }
        if codes.is_empty() {
            RuleOutcome::ok()
        } else {
            RuleOutcome::fail_all(codes)
        }
    }
}

/// The value must be a non-blank, well-formed email address.
pub struct Email;

impl Rule for Email {
    fn apply(&self, value: &FieldValue) -> RuleOutcome {
        let text = value.to_string();
        let trimmed = text.trim();
        if value.is_null() || trimmed.is_empty() || !email_address::EmailAddress::is_valid(trimmed)
        {
            RuleOutcome::fail(CODE_EMAIL)
        } else {
            RuleOutcome::ok()
        }
    }
}

/// The string conversion must match a regex pattern.
pub struct Pattern {
    re: regex::Regex,
}

impl Pattern {
    pub fn new(re: regex::Regex) -> Self {
        Self { re }
    }
}

impl Rule for Pattern {
    fn apply(&self, value: &FieldValue) -> RuleOutcome {
        if self.re.is_match(&value.to_string()) {
            RuleOutcome::ok()
        } else {
            RuleOutcome::fail(CODE_GENERIC)
        }
    }
}

/// Adapter for custom closure rules.
pub(crate) struct Check<F> {
    predicate: F,
    code: String,
}

impl<F> Check<F> {
    pub(crate) fn new(predicate: F, code: impl Into<String>) -> Self {
        Self {
            predicate,
            code: code.into(),
        }
    }
}

impl<F: Fn(&FieldValue) -> bool + Send + Sync> Rule for Check<F> {
    fn apply(&self, value: &FieldValue) -> RuleOutcome {
        if (self.predicate)(value) {
            RuleOutcome::ok()
        } else {
            RuleOutcome::fail(self.code.clone())
        }
    }
}

/// Rule factory: [`Required`].
pub fn required() -> BoxedRule {
    Box::new(Required)
}

/// Rule factory: [`RequiredMultiLanguage`].
pub fn required_multi_language() -> BoxedRule {
    Box::new(RequiredMultiLanguage)
}

/// Rule factory: [`Length`] with optional bounds.
pub fn length(min: Option<usize>, max: Option<usize>) -> BoxedRule {
    Box::new(Length { min, max })
}

/// Rule factory: [`Number`] with optional bounds.
pub fn number(min: Option<i64>, max: Option<i64>, required: bool) -> BoxedRule {
    Box::new(Number { min, max, required })
}

/// Rule factory: [`Email`].
pub fn email() -> BoxedRule {
    Box::new(Email)
}
