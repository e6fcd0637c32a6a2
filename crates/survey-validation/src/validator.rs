//! The survey validation predicate

use crate::field::FieldValues;
use crate::rules::FieldRuleSet;
use serde::{Deserialize, Serialize};

/// Outcome of one validation pass
///
/// Only `SurveyValidator::validate` builds one, which keeps `failed` in
/// rule-set order without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Failing fields, in rule-set order, without duplicates
    failed: Vec<String>,
    /// Field that should receive focus; the first failing field
    focus: Option<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn has_failed(&self, field: &str) -> bool {
        self.failed.iter().any(|f| f == field)
    }

    pub fn failed(&self) -> &[String] {
        &self.failed
    }

    pub fn focus(&self) -> Option<&str> {
        self.focus.as_deref()
    }
}

/// Checks field values against an ordered rule set.
///
/// Validation is a pure function of the supplied values: no state is kept
/// between calls and nothing outside the result is touched.
#[derive(Debug, Clone)]
pub struct SurveyValidator {
    rules: FieldRuleSet,
}

impl Default for SurveyValidator {
    fn default() -> Self {
        Self::survey()
    }
}

impl SurveyValidator {
    pub fn new(rules: FieldRuleSet) -> Self {
        Self { rules }
    }

    /// Validator for the `fname` / `phonenum` / `email` survey
    pub fn survey() -> Self {
        Self::new(FieldRuleSet::survey())
    }

    pub fn rules(&self) -> &FieldRuleSet {
        &self.rules
    }

    /// Evaluate every rule of every field exactly once.
    ///
    /// A field fails when any of its rules fails; a pattern failure is
    /// recorded even when the required check already failed the field.
    pub fn validate(&self, values: &FieldValues) -> ValidationResult {
        let mut result = ValidationResult::default();

        for field in self.rules.iter() {
            let value = values.get(&field.field);
            // Evaluate all rules rather than short-circuiting
            let failures = field.rules.iter().filter(|rule| !rule.check(value)).count();

            if failures > 0 {
                if result.focus.is_none() {
                    result.focus = Some(field.field.clone());
                }
                result.failed.push(field.field.clone());
            }
        }

        tracing::debug!(
            failed = ?result.failed,
            focus = ?result.focus,
            "survey validated"
        );

        result
    }
}
