//! Form validation system for Gantry.
//!
//! Composes named field rules into a form-level pass/fail judgment with a
//! structured per-field report. Rules never raise errors: failures are
//! accumulated error codes, left for a localization layer to render.
//!
//! # Example
//!
//! ```
//! use gantry_lib::source::FormData;
//! use gantry_lib::validation::FormValidator;
//!
//! let mut data = FormData::new();
//! data.set("username", "no");
//! data.set("email", "not-an-email");
//!
//! let report = FormValidator::new("signup")
//!     .source(&data)
//!     .field("username")
//!         .required()
//!         .length(Some(3), Some(20))
//!     .field("email")
//!         .required()
//!         .email()
//!     .validate_and_form(None);
//!
//! assert!(!report.is_valid());
//! assert!(report.get("username").is_some_and(|f| f.failed));
//! ```

mod form;
mod result;
mod rule;

pub use form::{FieldBuilder, FormValidator};
pub use result::{FieldReport, FormReport, RuleOutcome};
pub use rule::{
    BoxedRule, CODE_EMAIL, CODE_GENERIC, CODE_NUMERIC, CODE_REQUIRED, Email, Length, Number,
    Pattern, Required, RequiredMultiLanguage, Rule, email, length, max_code, min_code, number,
    required, required_multi_language,
};
