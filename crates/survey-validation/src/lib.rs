//! Survey Validation
//!
//! Pure validation of the survey form (required fields, phone and email
//! patterns) plus the controller that turns a result into submit/reset
//! decisions through a host adapter.
//! Used both by native tests and by the WASM client-side bindings.

pub mod config;
pub mod field;
pub mod form;
pub mod rules;
pub mod validator;

pub use config::{FieldConfig, SurveyConfig};
pub use field::FieldValues;
pub use form::{FormAction, FormError, FormHost, FormSettings, SurveyForm};
pub use rules::{FieldRules, FieldRuleSet, Pattern, RuleError, ValidationRule};
pub use validator::{SurveyValidator, ValidationResult};

/// Field identifiers of the survey form, in focus-priority order
pub const FNAME: &str = "fname";
pub const PHONENUM: &str = "phonenum";
pub const EMAIL: &str = "email";
