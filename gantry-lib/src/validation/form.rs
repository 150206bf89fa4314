//! Form validator builder and aggregation.

use std::collections::BTreeMap;

use log::debug;

use crate::source::ValueSource;
use crate::value::FieldValue;

use super::result::{FieldReport, FormReport};
use super::rule::{self, BoxedRule, Check};

const DEFAULT_VALID_TOKEN: &str = "valid";
const DEFAULT_INVALID_TOKEN: &str = "invalid";

/// A declared field and its ordered rule list.
struct FieldSpec {
    name: String,
    rules: Vec<BoxedRule>,
}

/// Builder for validating multiple form fields.
///
/// # Example
///
/// ```
/// use gantry_lib::source::FormData;
/// use gantry_lib::validation::FormValidator;
///
/// let mut data = FormData::new();
/// data.set("name", "norpie");
///
/// let ok = FormValidator::new("profile")
///     .source(&data)
///     .field("name")
///         .required()
///     .validate(None);
///
/// assert!(ok);
/// ```
pub struct FormValidator<'a> {
    name: String,
    source: Option<&'a dyn ValueSource>,
    fields: Vec<FieldSpec>,
    extra: BTreeMap<String, FieldValue>,
    valid_token: String,
    invalid_token: String,
}

impl<'a> FormValidator<'a> {
    /// Create a validator for a named form.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: None,
            fields: Vec::new(),
            extra: BTreeMap::new(),
            valid_token: DEFAULT_VALID_TOKEN.to_string(),
            invalid_token: DEFAULT_INVALID_TOKEN.to_string(),
        }
    }

    /// Attach the ambient value source fields are resolved from.
    pub fn source(mut self, source: &'a dyn ValueSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Override the valid/invalid display tokens echoed in field reports.
    pub fn display_tokens(
        mut self,
        valid: impl Into<String>,
        invalid: impl Into<String>,
    ) -> Self {
        self.valid_token = valid.into();
        self.invalid_token = invalid.into();
        self
    }

    /// Supply a value for a field the source does not carry.
    ///
    /// Keys that are never declared as fields come back in the report as
    /// always-valid passthrough entries.
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Declare a field to validate.
    pub fn field(self, name: impl Into<String>) -> FieldBuilder<'a> {
        FieldBuilder {
            validator: self,
            name: name.into(),
            rules: Vec::new(),
        }
    }

    /// Run every field's rules and build the full report.
    ///
    /// Values resolve from `data` first, then the attached source, then the
    /// extra-data map. Every rule runs even after one fails; codes accumulate
    /// in declaration order. The overall flag is the AND over declared fields.
    pub fn validate_and_form(
        &self,
        data: Option<&BTreeMap<String, FieldValue>>,
    ) -> FormReport {
        let mut ok = true;
        let mut entries = Vec::with_capacity(self.fields.len() + self.extra.len());

        for field in &self.fields {
            let value = self.resolve(&field.name, data);
            let mut codes = Vec::new();
            for rule in &field.rules {
                let outcome = rule.apply(&value);
                if !outcome.success {
                    codes.extend(outcome.errors);
                }
            }
            ok &= codes.is_empty();
            entries.push((
                field.name.clone(),
                FieldReport::new(value, codes, &self.valid_token, &self.invalid_token),
            ));
        }

        for (key, value) in &self.extra {
            if self.fields.iter().any(|field| field.name == *key) {
                continue;
            }
            entries.push((
                key.clone(),
                FieldReport::new(
                    value.clone(),
                    Vec::new(),
                    &self.valid_token,
                    &self.invalid_token,
                ),
            ));
        }

        debug!("form '{}' validated: ok={}", self.name, ok);
        FormReport::new(self.name.clone(), ok, entries)
    }

    /// Convenience wrapper returning only the overall outcome.
    pub fn validate(&self, data: Option<&BTreeMap<String, FieldValue>>) -> bool {
        self.validate_and_form(data).is_valid()
    }

    /// Normalize arbitrary data through the report shape without constraints.
    ///
    /// Every key in `data` becomes a rule-free field, so every entry is
    /// successful and carries its original value.
    pub fn filling(name: impl Into<String>, data: &BTreeMap<String, FieldValue>) -> FormReport {
        let mut validator = FormValidator::new(name);
        for key in data.keys() {
            validator = validator.field(key.clone()).done();
        }
        validator.validate_and_form(Some(data))
    }

    fn resolve(&self, field: &str, data: Option<&BTreeMap<String, FieldValue>>) -> FieldValue {
        if let Some(data) = data
            && let Some(value) = data.get(field)
        {
            return value.clone();
        }
        if let Some(source) = self.source
            && let Some(value) = source.value(field)
        {
            return value;
        }
        self.extra.get(field).cloned().unwrap_or(FieldValue::Null)
    }
}

/// Builder for adding rules to a single field.
pub struct FieldBuilder<'a> {
    validator: FormValidator<'a>,
    name: String,
    rules: Vec<BoxedRule>,
}

impl<'a> FieldBuilder<'a> {
    /// Require the value to be present and non-blank.
    pub fn required(mut self) -> Self {
        self.rules.push(rule::required());
        self
    }

    /// Require at least one non-blank translation in a language map.
    pub fn required_multi_language(mut self) -> Self {
        self.rules.push(rule::required_multi_language());
        self
    }

    /// Require the string length to stay within the supplied bounds.
    pub fn length(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.rules.push(rule::length(min, max));
        self
    }

    /// Require an integer value, optionally bounded.
    pub fn number(mut self, min: Option<i64>, max: Option<i64>, required: bool) -> Self {
        self.rules.push(rule::number(min, max, required));
        self
    }

    /// Require a well-formed email address.
    pub fn email(mut self) -> Self {
        self.rules.push(rule::email());
        self
    }

    /// Require the value to match a regex pattern.
    pub fn pattern(mut self, pattern: &str) -> Self {
        let re = regex::Regex::new(pattern).expect("Invalid regex pattern");
        self.rules.push(Box::new(rule::Pattern::new(re)));
        self
    }

    /// Add a custom rule with the generic failure code.
    pub fn rule<F>(self, predicate: F) -> Self
    where
        F: Fn(&FieldValue) -> bool + Send + Sync + 'static,
    {
        self.rule_with_code(predicate, rule::CODE_GENERIC)
    }

    /// Add a custom rule with an explicit failure code.
    pub fn rule_with_code<F>(mut self, predicate: F, code: impl Into<String>) -> Self
    where
        F: Fn(&FieldValue) -> bool + Send + Sync + 'static,
    {
        self.rules.push(Box::new(Check::new(predicate, code)));
        self
    }

    /// Continue to the next field.
    pub fn field(self, name: impl Into<String>) -> FieldBuilder<'a> {
        self.done().field(name)
    }

    /// Finalize this field and return the validator.
    pub fn done(mut self) -> FormValidator<'a> {
        self.validator.fields.push(FieldSpec {
            name: self.name,
            rules: self.rules,
        });
        self.validator
    }

    /// Finalize and run every field's rules, building the full report.
    pub fn validate_and_form(
        self,
        data: Option<&BTreeMap<String, FieldValue>>,
    ) -> FormReport {
        self.done().validate_and_form(data)
    }

    /// Finalize and return only the overall outcome.
    pub fn validate(self, data: Option<&BTreeMap<String, FieldValue>>) -> bool {
        self.done().validate(data)
    }
}
