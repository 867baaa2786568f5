use std::rc::Rc;

use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, EventTarget, HtmlElement, KeyboardEvent, Window};

use crate::dom;
use crate::error::WidgetResult;

const OPEN_CLASS: &str = "active";
const OPEN_BUTTON_IDS: [&str; 2] = ["placementDetailsBtn", "downloadBrochureBtn"];

pub struct Modal {
    element: HtmlElement,
    body: Option<HtmlElement>,
}

impl Modal {
    pub fn find(document: &Document) -> WidgetResult<Option<Self>> {
        let Some(element) = document.get_element_by_id("modal") else {
            return Ok(None);
        };
        Ok(Some(Self {
            element: dom::html(element, "#modal")?,
            body: document.body(),
        }))
    }

    pub fn is_open(&self) -> bool {
        self.element.class_list().contains(OPEN_CLASS)
    }

    /// Shows the dialog and locks page scrolling behind it.
    pub fn open(&self) -> WidgetResult {
        self.element.class_list().add_1(OPEN_CLASS)?;
        if let Some(body) = &self.body {
            body.style().set_property("overflow", "hidden")?;
        }
        Ok(())
    }

    pub fn close(&self) -> WidgetResult {
        self.element.class_list().remove_1(OPEN_CLASS)?;
        if let Some(body) = &self.body {
            body.style().remove_property("overflow")?;
        }
        Ok(())
    }

    fn is_backdrop(&self, target: Option<EventTarget>) -> bool {
        let backdrop: &EventTarget = self.element.as_ref();
        target.as_ref() == Some(backdrop)
    }
}

pub fn init(window: &Window, document: &Document) -> WidgetResult<Option<Rc<Modal>>> {
    let Some(modal) = Modal::find(document)? else {
        debug!("No #modal on this page");
        return Ok(None);
    };
    let modal = Rc::new(modal);

    for id in OPEN_BUTTON_IDS {
        if let Some(button) = document.get_element_by_id(id) {
            let modal = modal.clone();
            dom::listen(&button, "click", move |_| dom::report("modal", modal.open()))?;
        }
    }

    if let Some(close_btn) = dom::find(document, ".close-btn") {
        let modal = modal.clone();
        dom::listen(&close_btn, "click", move |_| dom::report("modal", modal.close()))?;
    }

    {
        let modal = modal.clone();
        dom::listen(window, "click", move |event| {
            if modal.is_backdrop(event.target()) {
                dom::report("modal", modal.close());
            }
        })?;
    }

    {
        let modal = modal.clone();
        dom::listen(window, "keydown", move |event| {
            let escape = event
                .dyn_ref::<KeyboardEvent>()
                .map_or(false, |key| key.key() == "Escape");
            if escape && modal.is_open() {
                dom::report("modal", modal.close());
            }
        })?;
    }

    Ok(Some(modal))
}
