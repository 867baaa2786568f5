use web_sys::{Document, Element, ScrollBehavior, ScrollIntoViewOptions};

use crate::dom;
use crate::error::WidgetResult;

/// Smooth-scrolls in-page anchor links to their target.
pub fn init(document: &Document) -> WidgetResult {
    for anchor in dom::find_all(document, r##"a[href^="#"]"##) {
        let document = document.clone();
        let target = anchor.clone();
        dom::listen(&target, "click", move |event| {
            event.prevent_default();
            let Some(href) = anchor.get_attribute("href") else {
                return;
            };
            // A bare "#" is not a valid selector and resolves to nothing.
            if let Some(section) = dom::find(&document, &href) {
                scroll_to(&section);
            }
        })?;
    }
    Ok(())
}

fn scroll_to(section: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    section.scroll_into_view_with_scroll_into_view_options(&options);
}
