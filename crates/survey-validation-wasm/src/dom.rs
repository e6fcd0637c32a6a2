//! `FormHost` backed by the browser document

use survey_validation::{FormError, FormHost, FormSettings};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement, Window,
};

/// Convert a thrown JS value into a host error
pub(crate) fn js_error(value: JsValue) -> FormError {
    FormError::Host(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

#[derive(Clone)]
pub struct DomHost {
    window: Window,
    document: Document,
    settings: FormSettings,
}

impl DomHost {
    pub fn new(window: Window, document: Document, settings: FormSettings) -> Self {
        Self {
            window,
            document,
            settings,
        }
    }

    /// Host for the current page, if running in a browser window
    pub fn current(settings: FormSettings) -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self::new(window, document, settings))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn form(&self) -> Result<HtmlFormElement, FormError> {
        self.element(&self.settings.form_id)
    }

    fn element<T: JsCast>(&self, id: &str) -> Result<T, FormError> {
        self.document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<T>().ok())
            .ok_or_else(|| FormError::MissingElement(id.to_string()))
    }

    fn set_display(element: &HtmlElement, display: &str) -> Result<(), FormError> {
        element
            .style()
            .set_property("display", display)
            .map_err(js_error)
    }
}

impl FormHost for DomHost {
    fn field_value(&self, field: &str) -> Result<Option<String>, FormError> {
        let Some(element) = self.document.get_element_by_id(field) else {
            return Ok(None);
        };

        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            return Ok(Some(input.value()));
        }
        if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            return Ok(Some(area.value()));
        }
        Ok(None)
    }

    fn show_error(&self, error_id: &str) -> Result<(), FormError> {
        let element: HtmlElement = self.element(error_id)?;
        Self::set_display(&element, "block")
    }

    fn hide_all_errors(&self) -> Result<(), FormError> {
        let errors = self
            .document
            .get_elements_by_class_name(&self.settings.error_class);

        for i in 0..errors.length() {
            if let Some(element) = errors.item(i).and_then(|el| el.dyn_into::<HtmlElement>().ok()) {
                Self::set_display(&element, "none")?;
            }
        }
        Ok(())
    }

    fn focus_and_select(&self, field: &str) -> Result<(), FormError> {
        let element: HtmlElement = self.element(field)?;
        element.focus().map_err(js_error)?;

        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.select();
        } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            area.select();
        }
        Ok(())
    }

    fn focus(&self, field: &str) -> Result<(), FormError> {
        let element: HtmlElement = self.element(field)?;
        element.focus().map_err(js_error)
    }

    fn confirm(&self, message: &str) -> Result<bool, FormError> {
        self.window.confirm_with_message(message).map_err(js_error)
    }

    fn clear_fields(&self) -> Result<(), FormError> {
        self.form()?.reset();
        Ok(())
    }
}
