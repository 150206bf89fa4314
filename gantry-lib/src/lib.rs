pub mod forms;
pub mod source;
pub mod validation;
pub mod value;

/// Framework version, reported by the dev runner's `i` command.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod prelude {
    pub use crate::forms::FormStore;
    pub use crate::source::{FormData, ValueSource};
    pub use crate::validation::{
        FieldBuilder, FieldReport, FormReport, FormValidator, Rule, RuleOutcome,
    };
    pub use crate::value::FieldValue;
}
