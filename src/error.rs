use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("no window or document available")]
    NoDocument,
    #[error("element {0} is not an HtmlElement")]
    NotHtml(&'static str),
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for WidgetError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        WidgetError::Js(message)
    }
}

pub type WidgetResult<T = ()> = Result<T, WidgetError>;
