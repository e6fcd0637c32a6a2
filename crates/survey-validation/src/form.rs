//! Submit / reset handling over a host form surface
//!
//! `SurveyForm` owns the decisions (which errors to show, where focus goes,
//! whether the pending action proceeds). The host only performs them.

use crate::field::FieldValues;
use crate::validator::{SurveyValidator, ValidationResult};

pub const DEFAULT_FORM_ID: &str = "survey_form";
pub const DEFAULT_ERROR_CLASS: &str = "error";
pub const DEFAULT_ERROR_SUFFIX: &str = "_error";
pub const DEFAULT_RESET_PROMPT: &str = "Clear survey?";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("element '{0}' not found")]
    MissingElement(String),
    #[error("host error: {0}")]
    Host(String),
}

/// Whether the intercepted submit/reset should go ahead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Proceed,
    Suppress,
}

impl FormAction {
    pub fn proceeds(self) -> bool {
        self == FormAction::Proceed
    }
}

/// The form surface the controller reads from and mutates
pub trait FormHost {
    /// Current value of a field, `None` when the field has no value
    fn field_value(&self, field: &str) -> Result<Option<String>, FormError>;

    fn show_error(&self, error_id: &str) -> Result<(), FormError>;

    /// Hide every error indicator on the form
    fn hide_all_errors(&self) -> Result<(), FormError>;

    /// Move focus to a field and select its contents
    fn focus_and_select(&self, field: &str) -> Result<(), FormError>;

    fn focus(&self, field: &str) -> Result<(), FormError>;

    /// Ask the user a yes/no question
    fn confirm(&self, message: &str) -> Result<bool, FormError>;

    /// Native form reset; normalizes radio buttons and other exclusive inputs
    fn clear_fields(&self) -> Result<(), FormError>;
}

/// Names and messages the controller and host agree on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSettings {
    pub form_id: String,
    pub error_class: String,
    pub error_suffix: String,
    pub reset_prompt: String,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            form_id: DEFAULT_FORM_ID.to_string(),
            error_class: DEFAULT_ERROR_CLASS.to_string(),
            error_suffix: DEFAULT_ERROR_SUFFIX.to_string(),
            reset_prompt: DEFAULT_RESET_PROMPT.to_string(),
        }
    }
}

impl FormSettings {
    /// Id of the error indicator for `field` (`fname` -> `fname_error`)
    pub fn error_id(&self, field: &str) -> String {
        format!("{}{}", field, self.error_suffix)
    }
}

pub struct SurveyForm<H> {
    validator: SurveyValidator,
    settings: FormSettings,
    host: H,
}

impl<H: FormHost> SurveyForm<H> {
    pub fn new(validator: SurveyValidator, settings: FormSettings, host: H) -> Self {
        Self {
            validator,
            settings,
            host,
        }
    }

    /// The survey rule set with default settings
    pub fn survey(host: H) -> Self {
        Self::new(SurveyValidator::survey(), FormSettings::default(), host)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn settings(&self) -> &FormSettings {
        &self.settings
    }

    pub fn validator(&self) -> &SurveyValidator {
        &self.validator
    }

    /// Normalize pre-existing field state. Run once, before the reset
    /// hook is attached, so the native reset does not prompt.
    pub fn initialize(&self) -> Result<(), FormError> {
        self.host.clear_fields()?;
        tracing::debug!(form = %self.settings.form_id, "survey form initialized");
        Ok(())
    }

    /// Read the current values of every rule-set field from the host
    pub fn read_values(&self) -> Result<FieldValues, FormError> {
        let mut values = FieldValues::new();
        for field in self.validator.rules().field_names() {
            let value = self.host.field_value(field)?.unwrap_or_default();
            values.insert(field, value);
        }
        Ok(values)
    }

    /// Validate and render the outcome without deciding anything
    pub fn check(&self) -> Result<ValidationResult, FormError> {
        self.host.hide_all_errors()?;

        let values = self.read_values()?;
        let result = self.validator.validate(&values);

        for field in result.failed() {
            self.host.show_error(&self.settings.error_id(field))?;
        }
        if let Some(field) = result.focus() {
            self.host.focus_and_select(field)?;
        }

        Ok(result)
    }

    /// Handle a submit attempt; any failure suppresses the submit
    pub fn on_submit(&self) -> Result<FormAction, FormError> {
        let result = self.check()?;

        let action = if result.is_valid() {
            FormAction::Proceed
        } else {
            FormAction::Suppress
        };
        tracing::debug!(?action, failed = result.failed().len(), "survey submit");

        Ok(action)
    }

    /// Handle a reset attempt; the user must confirm
    pub fn on_reset(&self) -> Result<FormAction, FormError> {
        if !self.host.confirm(&self.settings.reset_prompt)? {
            tracing::debug!("survey reset declined");
            return Ok(FormAction::Suppress);
        }

        self.host.hide_all_errors()?;
        if let Some(field) = self.validator.rules().first_field() {
            self.host.focus(field)?;
        }
        tracing::debug!("survey reset confirmed");

        Ok(FormAction::Proceed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeHost {
        values: HashMap<String, String>,
        confirm_answer: bool,
        calls: RefCell<Vec<String>>,
    }

    impl FakeHost {
        fn log(&self, call: String) {
            self.calls.borrow_mut().push(call);
        }
    }

    impl FormHost for FakeHost {
        fn field_value(&self, field: &str) -> Result<Option<String>, FormError> {
            Ok(self.values.get(field).cloned())
        }

        fn show_error(&self, error_id: &str) -> Result<(), FormError> {
            self.log(format!("show {}", error_id));
            Ok(())
        }

        fn hide_all_errors(&self) -> Result<(), FormError> {
            self.log("hide all".to_string());
            Ok(())
        }

        fn focus_and_select(&self, field: &str) -> Result<(), FormError> {
            self.log(format!("select {}", field));
            Ok(())
        }

        fn focus(&self, field: &str) -> Result<(), FormError> {
            self.log(format!("focus {}", field));
            Ok(())
        }

        fn confirm(&self, message: &str) -> Result<bool, FormError> {
            self.log(format!("confirm {}", message));
            Ok(self.confirm_answer)
        }

        fn clear_fields(&self) -> Result<(), FormError> {
            self.log("clear".to_string());
            Ok(())
        }
    }

    fn host(fname: &str, phonenum: &str, email: &str) -> FakeHost {
        let values = [("fname", fname), ("phonenum", phonenum), ("email", email)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        FakeHost {
            values,
            ..Default::default()
        }
    }

    #[test]
    fn test_error_id() {
        assert_eq!(FormSettings::default().error_id("fname"), "fname_error");
    }

    #[test]
    fn test_submit_suppressed_on_failure() {
        let form = SurveyForm::survey(host("Jo", "abc", "bad"));

        assert_eq!(form.on_submit().unwrap(), FormAction::Suppress);
        assert_eq!(
            *form.host().calls.borrow(),
            vec![
                "hide all".to_string(),
                "show phonenum_error".to_string(),
                "show email_error".to_string(),
                "select phonenum".to_string(),
            ]
        );
    }

    #[test]
    fn test_submit_proceeds_when_valid() {
        let form = SurveyForm::survey(host("Jo", "1234567890", "jo@example.com"));

        assert!(form.on_submit().unwrap().proceeds());
        assert_eq!(*form.host().calls.borrow(), vec!["hide all".to_string()]);
    }

    #[test]
    fn test_submit_with_absent_fields() {
        let form = SurveyForm::survey(FakeHost::default());

        assert_eq!(form.on_submit().unwrap(), FormAction::Suppress);
        assert!(form.host().calls.borrow().contains(&"select fname".to_string()));
    }

    #[test]
    fn test_reset_declined() {
        let form = SurveyForm::survey(host("", "", ""));

        assert_eq!(form.on_reset().unwrap(), FormAction::Suppress);
        assert_eq!(
            *form.host().calls.borrow(),
            vec!["confirm Clear survey?".to_string()]
        );
    }

    #[test]
    fn test_reset_confirmed() {
        let mut fake = host("", "", "");
        fake.confirm_answer = true;
        let form = SurveyForm::survey(fake);

        assert_eq!(form.on_reset().unwrap(), FormAction::Proceed);
        assert_eq!(
            *form.host().calls.borrow(),
            vec![
                "confirm Clear survey?".to_string(),
                "hide all".to_string(),
                "focus fname".to_string(),
            ]
        );
    }

    #[test]
    fn test_initialize_clears_fields() {
        let form = SurveyForm::survey(FakeHost::default());
        form.initialize().unwrap();
        assert_eq!(*form.host().calls.borrow(), vec!["clear".to_string()]);
    }

    struct BrokenHost;

    impl FormHost for BrokenHost {
        fn field_value(&self, field: &str) -> Result<Option<String>, FormError> {
            Err(FormError::MissingElement(field.to_string()))
        }
        fn show_error(&self, _: &str) -> Result<(), FormError> {
            Ok(())
        }
        fn hide_all_errors(&self) -> Result<(), FormError> {
            Ok(())
        }
        fn focus_and_select(&self, _: &str) -> Result<(), FormError> {
            Ok(())
        }
        fn focus(&self, _: &str) -> Result<(), FormError> {
            Ok(())
        }
        fn confirm(&self, _: &str) -> Result<bool, FormError> {
            Err(FormError::Host("dialogs blocked".to_string()))
        }
        fn clear_fields(&self) -> Result<(), FormError> {
            Ok(())
        }
    }

    #[test]
    fn test_host_errors_propagate() {
        let form = SurveyForm::survey(BrokenHost);
        assert_eq!(
            form.on_submit(),
            Err(FormError::MissingElement("fname".to_string()))
        );
        assert_eq!(
            form.on_reset(),
            Err(FormError::Host("dialogs blocked".to_string()))
        );
    }
}
