//! Tests for form-level validation and reporting.

use std::collections::BTreeMap;

use gantry_lib::source::FormData;
use gantry_lib::validation::{CODE_GENERIC, CODE_REQUIRED, FormValidator, min_code};
use gantry_lib::value::FieldValue;

fn data(entries: &[(&str, FieldValue)]) -> BTreeMap<String, FieldValue> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn test_field_without_rules_is_successful() {
    let report = FormValidator::new("form")
        .field("anything")
        .validate_and_form(None);
    let field = report.get("anything").unwrap();
    assert!(field.success);
    assert!(!field.failed);
    assert!(field.errors.is_empty());
    assert!(report.is_valid());
}

#[test]
fn test_failing_rules_accumulate_in_declaration_order() {
    let submitted = data(&[("name", FieldValue::from(""))]);
    let report = FormValidator::new("form")
        .field("name")
            .required()
            .length(Some(3), None)
        .validate_and_form(Some(&submitted));

    let field = report.get("name").unwrap();
    assert!(field.failed);
    assert_eq!(field.errors, vec![CODE_REQUIRED.to_string(), min_code(3)]);
    assert_eq!(field.error, format!("{CODE_REQUIRED}, {}", min_code(3)));
    assert_eq!(field.error_html, format!("{CODE_REQUIRED}<br/>{}", min_code(3)));
}

#[test]
fn test_overall_result_is_and_of_declared_fields() {
    let submitted = data(&[
        ("good", FieldValue::from("value")),
        ("bad", FieldValue::from("")),
    ]);
    let report = FormValidator::new("form")
        .field("good")
            .required()
        .field("bad")
            .required()
        .validate_and_form(Some(&submitted));

    assert!(!report.is_valid());
    assert!(report.get("good").unwrap().success);
    assert!(report.get("bad").unwrap().failed);
}

#[test]
fn test_values_resolve_from_source_when_data_absent() {
    let mut source = FormData::new();
    source.set("name", "norpie");

    let report = FormValidator::new("form")
        .source(&source)
        .field("name")
            .required()
        .validate_and_form(None);

    assert!(report.is_valid());
    assert_eq!(report.get("name").unwrap().value, FieldValue::from("norpie"));
}

#[test]
fn test_explicit_data_overrides_source() {
    let mut source = FormData::new();
    source.set("name", "from-source");
    let submitted = data(&[("name", FieldValue::from("from-data"))]);

    let report = FormValidator::new("form")
        .source(&source)
        .field("name")
        .validate_and_form(Some(&submitted));

    assert_eq!(
        report.get("name").unwrap().value,
        FieldValue::from("from-data")
    );
}

#[test]
fn test_extra_data_fills_missing_field_value() {
    let report = FormValidator::new("form")
        .extra("kind", "static")
        .field("kind")
            .required()
        .validate_and_form(None);

    assert!(report.is_valid());
    assert_eq!(report.get("kind").unwrap().value, FieldValue::from("static"));
}

#[test]
fn test_undeclared_extra_keys_pass_through() {
    let submitted = data(&[("name", FieldValue::from(""))]);
    let report = FormValidator::new("form")
        .extra("page_title", "Signup")
        .field("name")
            .required()
        .validate_and_form(Some(&submitted));

    // The extra entry is present and successful, but never flips the result.
    assert!(!report.is_valid());
    let extra = report.get("page_title").unwrap();
    assert!(extra.success);
    assert_eq!(extra.value, FieldValue::from("Signup"));
    assert_eq!(report.len(), 2);
}

#[test]
fn test_extra_only_form_is_valid() {
    let report = FormValidator::new("form")
        .extra("note", "hello")
        .validate_and_form(None);
    assert!(report.is_valid());
    assert_eq!(report.len(), 1);
}

#[test]
fn test_missing_field_resolves_to_null() {
    let report = FormValidator::new("form")
        .field("absent")
            .required()
        .validate_and_form(None);

    let field = report.get("absent").unwrap();
    assert!(field.failed);
    assert_eq!(field.value, FieldValue::Null);
}

#[test]
fn test_display_tokens_echoed_per_field() {
    let submitted = data(&[
        ("good", FieldValue::from("value")),
        ("bad", FieldValue::from("")),
    ]);
    let report = FormValidator::new("form")
        .display_tokens("is-valid", "is-invalid")
        .field("good")
            .required()
        .field("bad")
            .required()
        .validate_and_form(Some(&submitted));

    assert_eq!(report.get("good").unwrap().display, "is-valid");
    assert_eq!(report.get("bad").unwrap().display, "is-invalid");
}

#[test]
fn test_validate_returns_only_the_outcome() {
    let submitted = data(&[("name", FieldValue::from("ok"))]);
    let ok = FormValidator::new("form")
        .field("name")
            .required()
        .validate(Some(&submitted));
    assert!(ok);
}

#[test]
fn test_custom_rule_uses_generic_code() {
    let submitted = data(&[("even", FieldValue::from(3))]);
    let report = FormValidator::new("form")
        .field("even")
            .rule(|value| value.as_int().is_some_and(|n| n % 2 == 0))
        .validate_and_form(Some(&submitted));

    assert_eq!(
        report.get("even").unwrap().errors,
        vec![CODE_GENERIC.to_string()]
    );
}

#[test]
fn test_filling_echoes_data_as_successful_entries() {
    let submitted = data(&[("a", FieldValue::from(1)), ("b", FieldValue::from(2))]);
    let report = FormValidator::filling("echo", &submitted);

    assert!(report.is_valid());
    assert_eq!(report.name(), "echo");
    let a = report.get("a").unwrap();
    assert!(a.success);
    assert_eq!(a.value, FieldValue::from(1));
    let b = report.get("b").unwrap();
    assert!(b.success);
    assert_eq!(b.value, FieldValue::from(2));
}

#[test]
fn test_report_preserves_declaration_order() {
    let report = FormValidator::new("form")
        .field("first")
        .field("second")
        .field("third")
        .validate_and_form(None);

    let names: Vec<&str> = report.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["first", "second", "third"]);
}
