use std::rc::Rc;

use log::{debug, info};
use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement, Window};

use crate::dom;
use crate::error::WidgetResult;
use crate::modal::Modal;

const INVALID_BORDER: &str = "1px solid red";
const FAILURE_MESSAGE: &str = "❌ Please fill all fields correctly.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("required field is empty")]
    Missing,
    #[error("email address has no @")]
    InvalidEmail,
    #[error("phone number must be exactly ten digits")]
    InvalidPhone,
}

/// What validation needs to know about one `input` or `select`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSnapshot {
    pub kind: String,
    pub value: String,
    pub required: bool,
}

impl FieldSnapshot {
    pub fn new(kind: &str, value: &str, required: bool) -> Self {
        Self {
            kind: kind.to_string(),
            value: value.to_string(),
            required,
        }
    }
}

fn is_phone_number(value: &str) -> bool {
    value.len() == 10 && value.bytes().all(|b| b.is_ascii_digit())
}

pub fn validate_field(field: &FieldSnapshot) -> Result<(), FieldError> {
    if field.required && field.value.trim().is_empty() {
        return Err(FieldError::Missing);
    }
    if field.value.is_empty() {
        return Ok(());
    }
    match field.kind.as_str() {
        "email" if !field.value.contains('@') => Err(FieldError::InvalidEmail),
        "tel" if !is_phone_number(&field.value) => Err(FieldError::InvalidPhone),
        _ => Ok(()),
    }
}

/// Checks every field; nothing short-circuits so each bad field can be
/// highlighted.
pub fn validate_fields(fields: &[FieldSnapshot]) -> Vec<Result<(), FieldError>> {
    fields.iter().map(validate_field).collect()
}

fn snapshot(element: &Element) -> Option<FieldSnapshot> {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        return Some(FieldSnapshot::new(&input.type_(), &input.value(), input.required()));
    }
    element
        .dyn_ref::<HtmlSelectElement>()
        .map(|select| FieldSnapshot::new(&select.type_(), &select.value(), select.required()))
}

/// Validates the form and marks invalid fields with a red border.
fn check_form(form: &HtmlFormElement) -> WidgetResult<bool> {
    let (elements, fields): (Vec<HtmlElement>, Vec<FieldSnapshot>) =
        dom::find_all_in(form, "input, select")
            .into_iter()
            .filter_map(|element| {
                let field = snapshot(&element)?;
                let element = element.dyn_into::<HtmlElement>().ok()?;
                Some((element, field))
            })
            .unzip();

    let mut valid = true;
    for ((element, field), result) in elements.iter().zip(&fields).zip(validate_fields(&fields)) {
        element.style().remove_property("border")?;
        if let Err(e) = result {
            debug!("Field {:?} rejected: {}", field.kind, e);
            valid = false;
            element.style().set_property("border", INVALID_BORDER)?;
        }
    }
    Ok(valid)
}

struct FormBinding {
    id: &'static str,
    success_message: &'static str,
    closes_modal: bool,
}

const FORMS: [FormBinding; 2] = [
    FormBinding {
        id: "heroForm",
        success_message: "✅ Inquiry sent (demo). We will contact you soon.",
        closes_modal: false,
    },
    FormBinding {
        id: "modalForm",
        success_message: "📄 Brochure download link sent (demo).",
        closes_modal: true,
    },
];

fn submit(
    window: &Window,
    form: &HtmlFormElement,
    binding: &FormBinding,
    modal: Option<&Modal>,
) -> WidgetResult {
    if !check_form(form)? {
        window.alert_with_message(FAILURE_MESSAGE)?;
        return Ok(());
    }
    info!("Simulated submission of #{}", binding.id);
    window.alert_with_message(binding.success_message)?;
    form.reset();
    if binding.closes_modal {
        if let Some(modal) = modal {
            modal.close()?;
        }
    }
    Ok(())
}

/// Intercepts submits on the page's forms. Nothing leaves the browser:
/// a valid form gets a confirmation alert and is cleared.
pub fn init(window: &Window, document: &Document, modal: Option<Rc<Modal>>) -> WidgetResult {
    for binding in FORMS {
        let Some(form) = document.get_element_by_id(binding.id) else {
            debug!("No #{} on this page", binding.id);
            continue;
        };
        let Ok(form) = form.dyn_into::<HtmlFormElement>() else {
            debug!("#{} is not a form", binding.id);
            continue;
        };

        let window = window.clone();
        let modal = modal.clone();
        let target = form.clone();
        dom::listen(&target, "submit", move |event| {
            event.prevent_default();
            dom::report("forms", submit(&window, &form, &binding, modal.as_deref()));
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_fields_reject_blank_and_whitespace() {
        assert_eq!(
            validate_field(&FieldSnapshot::new("text", "", true)),
            Err(FieldError::Missing)
        );
        assert_eq!(
            validate_field(&FieldSnapshot::new("text", "   ", true)),
            Err(FieldError::Missing)
        );
        assert_eq!(
            validate_field(&FieldSnapshot::new("select-one", "", true)),
            Err(FieldError::Missing)
        );
        assert_eq!(validate_field(&FieldSnapshot::new("text", "Asha", true)), Ok(()));
    }

    #[test]
    fn optional_empty_fields_pass() {
        assert_eq!(validate_field(&FieldSnapshot::new("email", "", false)), Ok(()));
        assert_eq!(validate_field(&FieldSnapshot::new("tel", "", false)), Ok(()));
    }

    #[test]
    fn email_needs_an_at_sign() {
        assert_eq!(
            validate_field(&FieldSnapshot::new("email", "asha.example.com", false)),
            Err(FieldError::InvalidEmail)
        );
        assert_eq!(
            validate_field(&FieldSnapshot::new("email", "asha@example.com", true)),
            Ok(())
        );
    }

    #[test]
    fn phone_must_be_exactly_ten_digits() {
        let check = |value: &str| validate_field(&FieldSnapshot::new("tel", value, true));
        assert_eq!(check("9876543210"), Ok(()));
        assert_eq!(check("987654321"), Err(FieldError::InvalidPhone));
        assert_eq!(check("98765432101"), Err(FieldError::InvalidPhone));
        assert_eq!(check("98765-4321"), Err(FieldError::InvalidPhone));
        assert_eq!(check("+919876543"), Err(FieldError::InvalidPhone));
    }

    #[test]
    fn whitespace_phone_is_missing_when_required() {
        assert_eq!(
            validate_field(&FieldSnapshot::new("tel", "  ", true)),
            Err(FieldError::Missing)
        );
        assert_eq!(
            validate_field(&FieldSnapshot::new("tel", "  ", false)),
            Err(FieldError::InvalidPhone)
        );
    }

    #[test]
    fn every_field_is_reported() {
        let fields = vec![
            FieldSnapshot::new("text", "", true),
            FieldSnapshot::new("email", "asha@example.com", true),
            FieldSnapshot::new("tel", "12345", true),
        ];
        assert_eq!(
            validate_fields(&fields),
            vec![Err(FieldError::Missing), Ok(()), Err(FieldError::InvalidPhone)]
        );
    }
}
