//! Survey Validation WASM
//!
//! Wires the survey validator into the page: resets the form once the
//! document is ready, intercepts submit and reset, and exposes the
//! validator to JavaScript.

use serde::Serialize;
use std::rc::Rc;
use survey_validation::{
    rules, FieldValues, FormAction, FormError, SurveyConfig, SurveyForm, SurveyValidator,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget};

pub mod dom;

pub use dom::DomHost;

/// Set panic hook and attach to the survey form when the page is ready
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let config = SurveyConfig::default();
    let Some(host) = DomHost::current(config.settings()) else {
        // Not running in a browser window (e.g. node test runner)
        return;
    };

    if host.document().ready_state() == "loading" {
        let document = host.document().clone();
        let on_ready = Closure::once(move |_: Event| load(&config, host));
        let callback = on_ready.as_ref().unchecked_ref();
        if let Err(err) = listen(&document, "DOMContentLoaded", callback) {
            report(&err);
        }
        on_ready.forget();
    } else {
        load(&config, host);
    }
}

fn load(config: &SurveyConfig, host: DomHost) {
    let validator = match config.validator() {
        Ok(validator) => validator,
        Err(err) => {
            report(&err);
            return;
        }
    };

    let form = Rc::new(SurveyForm::new(validator, config.settings(), host));
    if let Err(err) = attach(form) {
        report(&err);
    }
}

/// Attach the submit and reset hooks.
///
/// The native reset runs before the reset hook exists so it clears any
/// restored radio state without prompting the user.
fn attach(form: Rc<SurveyForm<DomHost>>) -> Result<(), FormError> {
    let element = form.host().form()?;

    let on_submit = {
        let form = Rc::clone(&form);
        Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            intercept(&event, form.on_submit());
        })
    };
    listen(&element, "submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();

    form.initialize()?;

    let on_reset = {
        let form = Rc::clone(&form);
        Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            intercept(&event, form.on_reset());
        })
    };
    listen(&element, "reset", on_reset.as_ref().unchecked_ref())?;
    on_reset.forget();

    tracing::debug!(form = %form.settings().form_id, "survey hooks attached");
    Ok(())
}

fn listen(
    target: &EventTarget,
    event: &str,
    callback: &js_sys::Function,
) -> Result<(), FormError> {
    target
        .add_event_listener_with_callback(event, callback)
        .map_err(dom::js_error)
}

/// Cancel the pending action unless the controller allowed it.
/// Adapter errors also cancel it.
fn intercept(event: &Event, action: Result<FormAction, FormError>) {
    match action {
        Ok(FormAction::Proceed) => {}
        Ok(FormAction::Suppress) => event.prevent_default(),
        Err(err) => {
            report(&err);
            event.prevent_default();
        }
    }
}

fn report(err: &dyn std::error::Error) {
    tracing::warn!(error = %err, "survey form error");
    web_sys::console::error_1(&JsValue::from_str(&format!("survey form: {}", err)));
}

/// Validate a plain object of field values
///
/// # Returns
/// `{ failed: string[], focus: string | null }`
///
/// # Example (JavaScript)
/// ```javascript
/// const result = validateSurvey({
///     fname: 'Jo',
///     phonenum: '1234567890',
///     email: 'jo@example.com'
/// });
/// ```
#[wasm_bindgen(js_name = validateSurvey)]
pub fn validate_survey(values: JsValue) -> Result<JsValue, JsValue> {
    let values: serde_json::Value = serde_wasm_bindgen::from_value(values)
        .map_err(|e| JsValue::from_str(&format!("Failed to read field values: {}", e)))?;

    let result = SurveyValidator::survey().validate(&FieldValues::from_json(values));

    Ok(result.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?)
}

/// Quick ten-digit phone number validation
#[wasm_bindgen(js_name = isValidPhone)]
pub fn is_valid_phone_js(value: &str) -> bool {
    rules::is_valid_phone(value)
}

/// Quick email validation
#[wasm_bindgen(js_name = isValidEmail)]
pub fn is_valid_email_js(value: &str) -> bool {
    rules::is_valid_email(value)
}
