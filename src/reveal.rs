use std::rc::Rc;

use log::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys::Array;
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::counter::CounterGroup;
use crate::dom;
use crate::error::WidgetResult;

const STATS_SELECTOR: &str = ".stats-navy";
const FIGURES_SELECTOR: &str = ".figures";

fn within(element: &Element, selector: &str) -> bool {
    matches!(element.closest(selector), Ok(Some(_)))
}

/// Adds `active` to `.reveal` elements as they scroll into view and kicks
/// off the counters once a statistics section shows up.
pub fn init(document: &Document, counters: Rc<CounterGroup>, threshold: f64) -> WidgetResult {
    let stats = dom::find(document, STATS_SELECTOR);
    let figures = dom::find(document, FIGURES_SELECTOR);

    let on_intersect = {
        let stats = stats.clone();
        let figures = figures.clone();
        Closure::wrap(Box::new(move |entries: Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                dom::report("reveal", target.class_list().add_1("active").map_err(Into::into));

                let is_stats = stats.as_ref() == Some(&target)
                    || figures.as_ref() == Some(&target)
                    || within(&target, STATS_SELECTOR)
                    || within(&target, FIGURES_SELECTOR);
                if is_stats {
                    counters.start();
                }
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>)
    };

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    let observer =
        IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &options)?;
    on_intersect.forget();

    let reveals = dom::find_all(document, ".reveal");
    debug!("Observing {} reveal elements", reveals.len());
    for element in reveals.iter().chain(stats.iter()).chain(figures.iter()) {
        observer.observe(element);
    }
    Ok(())
}
