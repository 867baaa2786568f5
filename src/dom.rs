use log::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, TouchEvent, Window};

use crate::error::{WidgetError, WidgetResult};

pub fn window() -> WidgetResult<Window> {
    web_sys::window().ok_or(WidgetError::NoDocument)
}

pub fn document() -> WidgetResult<Document> {
    window()?.document().ok_or(WidgetError::NoDocument)
}

/// First match for `selector`, or `None` when nothing matches or the
/// selector itself is invalid.
pub fn find(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

pub fn find_in(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

pub fn find_all(document: &Document, selector: &str) -> Vec<Element> {
    match document.query_selector_all(selector) {
        Ok(list) => (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect(),
        Err(_) => Vec::new(),
    }
}

pub fn find_all_in(root: &Element, selector: &str) -> Vec<Element> {
    match root.query_selector_all(selector) {
        Ok(list) => (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect(),
        Err(_) => Vec::new(),
    }
}

pub fn children(root: &Element) -> Vec<HtmlElement> {
    let list = root.children();
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn html(element: Element, what: &'static str) -> WidgetResult<HtmlElement> {
    element
        .dyn_into::<HtmlElement>()
        .map_err(|_| WidgetError::NotHtml(what))
}

pub fn inner_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0)
}

pub fn translate_x(element: &HtmlElement, offset_px: f64) -> WidgetResult {
    element
        .style()
        .set_property("transform", &format!("translateX(-{}px)", offset_px))?;
    Ok(())
}

pub fn clear_transform(element: &HtmlElement) -> WidgetResult {
    element.style().remove_property("transform")?;
    Ok(())
}

/// Horizontal distance between neighbouring slides, falling back to the
/// width of a lone slide.
pub fn slide_step(slides: &[HtmlElement]) -> f64 {
    match slides {
        [first, second, ..] => f64::from(second.offset_left() - first.offset_left()),
        [only] => only.get_bounding_client_rect().width(),
        [] => 0.0,
    }
}

/// Leading number of a CSS length such as `16px`; 0 when there is none.
pub fn parse_css_px(value: &str) -> f64 {
    let value = value.trim();
    let end = value
        .char_indices()
        .find(|&(i, c)| {
            !(c.is_ascii_digit() || c == '.' || ((c == '-' || c == '+') && i == 0))
        })
        .map(|(i, _)| i)
        .unwrap_or(value.len());
    value[..end].parse::<f64>().unwrap_or(0.0)
}

pub fn touch_screen_x(event: &Event) -> Option<f64> {
    let touch = event.dyn_ref::<TouchEvent>()?.changed_touches().get(0)?;
    Some(f64::from(touch.screen_x()))
}

pub fn report(widget: &str, result: WidgetResult) {
    if let Err(e) = result {
        warn!("{}: {}", widget, e);
    }
}

/// An event listener that is removed again when dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Option<Closure<dyn FnMut(Event)>>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, event: &'static str, callback: F) -> WidgetResult<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(callback) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback: Some(callback),
        })
    }

    /// Keeps the listener attached for the rest of the page session.
    pub fn forget(mut self) {
        if let Some(callback) = self.callback.take() {
            callback.forget();
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Some(callback) = self.callback.take() {
            let _ = self
                .target
                .remove_event_listener_with_callback(self.event, callback.as_ref().unchecked_ref());
        }
    }
}

pub fn listen<F>(target: &EventTarget, event: &'static str, callback: F) -> WidgetResult
where
    F: FnMut(Event) + 'static,
{
    Listener::new(target, event, callback)?.forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_lengths_parse_their_leading_number() {
        assert_eq!(parse_css_px("16px"), 16.0);
        assert_eq!(parse_css_px(" 1.5rem"), 1.5);
        assert_eq!(parse_css_px("0"), 0.0);
    }

    #[test]
    fn unparsable_css_lengths_are_zero() {
        assert_eq!(parse_css_px(""), 0.0);
        assert_eq!(parse_css_px("normal"), 0.0);
    }
}
