use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Interval;
use log::debug;
use web_sys::{Document, HtmlElement, Window};

use super::{Breakpoints, CarouselState, Edge, Swipe, SwipeTracker, Threshold};
use crate::config::StoriesConfig;
use crate::debounce::Debouncer;
use crate::dom;
use crate::error::WidgetResult;

const INITED_ATTR: &str = "data-inited";

struct StoriesCarousel {
    window: Window,
    track: HtmlElement,
    cards: Vec<HtmlElement>,
    state: CarouselState,
    breakpoints: Breakpoints,
    swipe: SwipeTracker,
    auto_advance_ms: u32,
    auto: Option<Interval>,
}

impl StoriesCarousel {
    fn render(&mut self) -> WidgetResult {
        let visible = self.breakpoints.visible_for(dom::inner_width(&self.window));
        self.state.set_visible(visible);
        let step = dom::slide_step(&self.cards);
        dom::translate_x(&self.track, self.state.offset_px(step))
    }

    fn go_next(&mut self) {
        self.state.next();
        dom::report("stories", self.render());
    }

    fn go_prev(&mut self) {
        self.state.prev();
        dom::report("stories", self.render());
    }
}

fn start_auto(carousel: &Rc<RefCell<StoriesCarousel>>) {
    let weak: Weak<RefCell<StoriesCarousel>> = Rc::downgrade(carousel);
    let mut inner = carousel.borrow_mut();
    inner.auto = Some(Interval::new(inner.auto_advance_ms, move || {
        if let Some(carousel) = weak.upgrade() {
            carousel.borrow_mut().go_next();
        }
    }));
}

/// Wires up `#storiesCarousel`. Runs at most once per root element.
pub fn init(window: &Window, document: &Document, config: &StoriesConfig) -> WidgetResult {
    let Some(root) = document.get_element_by_id("storiesCarousel") else {
        debug!("No #storiesCarousel on this page");
        return Ok(());
    };
    if root.get_attribute(INITED_ATTR).as_deref() == Some("true") {
        return Ok(());
    }

    let track = dom::find_in(&root, ".stories-track");
    let viewport = dom::find_in(&root, ".stories-viewport");
    let cards = track.as_ref().map(dom::children).unwrap_or_default();
    let (Some(track), Some(viewport)) = (track, viewport) else {
        debug!("Stories carousel is missing its track or viewport");
        return Ok(());
    };
    if cards.is_empty() {
        debug!("Stories carousel has no cards");
        return Ok(());
    }

    let breakpoints = Breakpoints::new(
        vec![(config.phone_max_width, 1), (config.tablet_max_width, 2)],
        3,
    );
    let carousel = Rc::new(RefCell::new(StoriesCarousel {
        window: window.clone(),
        track: dom::html(track, ".stories-track")?,
        state: CarouselState::new(cards.len(), 1, Edge::Wrap),
        cards,
        breakpoints,
        swipe: SwipeTracker::new(Threshold::AtLeast(config.swipe_px)),
        auto_advance_ms: config.auto_advance_ms,
        auto: None,
    }));

    if let Some(next_btn) = dom::find_in(&root, ".carousel-btn.next") {
        let carousel = carousel.clone();
        dom::listen(&next_btn, "click", move |_| carousel.borrow_mut().go_next())?;
    }
    if let Some(prev_btn) = dom::find_in(&root, ".carousel-btn.prev") {
        let carousel = carousel.clone();
        dom::listen(&prev_btn, "click", move |_| carousel.borrow_mut().go_prev())?;
    }

    {
        let carousel = carousel.clone();
        dom::listen(&viewport, "touchstart", move |event| {
            if let Some(x) = dom::touch_screen_x(&event) {
                carousel.borrow_mut().swipe.begin(x);
            }
        })?;
    }
    {
        let carousel = carousel.clone();
        dom::listen(&viewport, "touchend", move |event| {
            let Some(x) = dom::touch_screen_x(&event) else {
                return;
            };
            let mut carousel = carousel.borrow_mut();
            match carousel.swipe.finish(x) {
                Some(Swipe::Left) => carousel.go_next(),
                Some(Swipe::Right) => carousel.go_prev(),
                None => {}
            }
        })?;
    }

    {
        let carousel = carousel.clone();
        dom::listen(&root, "mouseenter", move |_| {
            carousel.borrow_mut().auto = None;
        })?;
    }
    {
        let carousel = carousel.clone();
        dom::listen(&root, "mouseleave", move |_| start_auto(&carousel))?;
    }

    let resize = {
        let carousel = carousel.clone();
        Debouncer::new(config.resize_debounce_ms, move || {
            let result = carousel.borrow_mut().render();
            dom::report("stories", result);
        })
    };
    dom::listen(window, "resize", move |_| resize.trigger())?;

    carousel.borrow_mut().render()?;
    start_auto(&carousel);
    root.set_attribute(INITED_ATTR, "true")?;
    Ok(())
}
