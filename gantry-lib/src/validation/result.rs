//! Validation outcome types.

use crate::value::FieldValue;

/// Delimiter for the plain joined error string.
pub(crate) const ERROR_SEPARATOR: &str = ", ";
/// Delimiter for the markup joined error string.
pub(crate) const ERROR_SEPARATOR_HTML: &str = "<br/>";

/// Outcome of applying one rule to one value.
///
/// Immutable once constructed; consumed only by the form aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    /// Whether the value passed the rule.
    pub success: bool,
    /// Error codes reported by the rule (empty on success).
    pub errors: Vec<String>,
}

impl RuleOutcome {
    /// A passing outcome.
    pub fn ok() -> Self {
        Self {
            success: true,
            errors: Vec::new(),
        }
    }

    /// A failing outcome with a single error code.
    pub fn fail(code: impl Into<String>) -> Self {
        Self {
            success: false,
            errors: vec![code.into()],
        }
    }

    /// A failing outcome with multiple error codes.
    pub fn fail_all(codes: Vec<String>) -> Self {
        Self {
            success: false,
            errors: codes,
        }
    }
}

/// The per-field record in a finished form report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReport {
    /// The resolved value the rules ran against.
    pub value: FieldValue,
    /// Caller-chosen valid/invalid display token.
    pub display: String,
    /// Error codes joined for plain rendering.
    pub error: String,
    /// Error codes joined for markup rendering.
    pub error_html: String,
    /// Raw error code list, in rule-declaration order.
    pub errors: Vec<String>,
    /// Whether every rule passed.
    pub success: bool,
    /// Whether any rule failed.
    pub failed: bool,
}

impl FieldReport {
    pub(crate) fn new(
        value: FieldValue,
        errors: Vec<String>,
        valid_token: &str,
        invalid_token: &str,
    ) -> Self {
        let success = errors.is_empty();
        Self {
            value,
            display: if success { valid_token } else { invalid_token }.to_string(),
            error: errors.join(ERROR_SEPARATOR),
            error_html: errors.join(ERROR_SEPARATOR_HTML),
            errors,
            success,
            failed: !success,
        }
    }
}

/// Result of validating a whole form.
///
/// Field entries keep declaration order: declared fields first, then
/// passthrough extras. The overall flag is the AND over declared fields only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormReport {
    name: String,
    ok: bool,
    fields: Vec<(String, FieldReport)>,
}

impl FormReport {
    pub(crate) fn new(name: String, ok: bool, fields: Vec<(String, FieldReport)>) -> Self {
        Self { name, ok, fields }
    }

    /// The form name this report was produced under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if every declared field passed.
    pub fn is_valid(&self) -> bool {
        self.ok
    }

    /// Look up one field's report.
    pub fn get(&self, field: &str) -> Option<&FieldReport> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, report)| report)
    }

    /// Iterate field entries in report order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldReport)> {
        self.fields.iter().map(|(name, report)| (name.as_str(), report))
    }

    /// Number of field entries, passthrough extras included.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the report carries no field entries.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
