use std::rc::Rc;

use log::{debug, info};
use web_sys::{Document, Window};

mod carousel;
mod config;
mod counter;
mod debounce;
mod dom;
mod error;
mod forms;
mod modal;
mod recruiters;
mod reveal;
mod scroll;

use config::PageConfig;
use counter::CounterGroup;
use error::WidgetResult;

/// Attaches every widget to the already rendered page. Each widget is
/// independent, so one failing only logs and the rest still mount.
fn mount(window: &Window, document: &Document) {
    let config = PageConfig::load(document);
    debug!("Page config: {:?}", config);

    let counters = Rc::new(CounterGroup::new(window, document, config.counter_frames));
    dom::report(
        "reveal",
        reveal::init(document, counters, config.reveal_threshold),
    );

    dom::report(
        "testimonials",
        carousel::testimonial::init(window, document, &config.testimonials),
    );
    dom::report(
        "stories",
        carousel::stories::init(window, document, &config.stories),
    );
    dom::report(
        "school highlights",
        carousel::school::init(window, document, &config.schools),
    );

    let modal = match modal::init(window, document) {
        Ok(modal) => modal,
        Err(e) => {
            dom::report("modal", Err(e));
            None
        }
    };
    dom::report("forms", forms::init(window, document, modal));
    dom::report("recruiters", recruiters::init(document));
    dom::report("smooth scroll", scroll::init(document));

    info!("Page interactions ready");
}

fn run() -> WidgetResult {
    let window = dom::window()?;
    let document = dom::document()?;

    if document.ready_state() == "loading" {
        let target = document.clone();
        dom::listen(&target, "DOMContentLoaded", move |_| mount(&window, &document))?;
    } else {
        mount(&window, &document);
    }
    Ok(())
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting page interactions");
    dom::report("startup", run());
}
