use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Interval;
use log::debug;
use web_sys::{Document, HtmlElement, Window};

use super::{CarouselState, Edge, Swipe, SwipeTracker, Threshold};
use crate::config::SchoolConfig;
use crate::debounce::Debouncer;
use crate::dom::{self, Listener};
use crate::error::WidgetResult;

const MOBILE_CLASS: &str = "mobile-carousel";

/// The school highlights grid turns into a one-card carousel on phones
/// and back into a plain grid on anything wider.
struct SchoolCarousel {
    window: Window,
    grid: HtmlElement,
    cards: Vec<HtmlElement>,
    state: CarouselState,
    swipe: SwipeTracker,
    touch: Option<(Listener, Listener)>,
    auto: Option<Interval>,
    config: SchoolConfig,
}

impl SchoolCarousel {
    fn render(&self) -> WidgetResult {
        let Some(first) = self.cards.first() else {
            return Ok(());
        };
        let card_width = first.get_bounding_client_rect().width();
        let gap = self
            .window
            .get_computed_style(&self.grid)?
            .and_then(|style| style.get_property_value("gap").ok())
            .map(|gap| dom::parse_css_px(&gap))
            .unwrap_or(0.0);
        dom::translate_x(&self.grid, self.state.offset_px(card_width + gap))
    }

    fn go_next(&mut self) {
        self.state.next();
        dom::report("school highlights", self.render());
    }

    fn go_prev(&mut self) {
        self.state.prev();
        dom::report("school highlights", self.render());
    }

    fn deactivate(&mut self) -> WidgetResult {
        self.auto = None;
        // Dropping the listeners detaches them.
        self.touch = None;
        self.state.reset();
        self.grid.class_list().remove_1(MOBILE_CLASS)?;
        dom::clear_transform(&self.grid)
    }
}

fn install_touch(carousel: &Rc<RefCell<SchoolCarousel>>) -> WidgetResult {
    let grid = carousel.borrow().grid.clone();

    let weak = Rc::downgrade(carousel);
    let start = Listener::new(&grid, "touchstart", move |event| {
        if let (Some(carousel), Some(x)) = (weak.upgrade(), dom::touch_screen_x(&event)) {
            carousel.borrow_mut().swipe.begin(x);
        }
    })?;

    let weak = Rc::downgrade(carousel);
    let end = Listener::new(&grid, "touchend", move |event| {
        let (Some(carousel), Some(x)) = (weak.upgrade(), dom::touch_screen_x(&event)) else {
            return;
        };
        let mut carousel = carousel.borrow_mut();
        match carousel.swipe.finish(x) {
            Some(Swipe::Left) => carousel.go_next(),
            Some(Swipe::Right) => carousel.go_prev(),
            None => {}
        }
    })?;

    carousel.borrow_mut().touch = Some((start, end));
    Ok(())
}

fn restart_auto(carousel: &Rc<RefCell<SchoolCarousel>>) {
    let weak: Weak<RefCell<SchoolCarousel>> = Rc::downgrade(carousel);
    let mut inner = carousel.borrow_mut();
    inner.auto = Some(Interval::new(inner.config.auto_advance_ms, move || {
        if let Some(carousel) = weak.upgrade() {
            carousel.borrow_mut().go_next();
        }
    }));
}

/// Brings the carousel in line with the current viewport width.
fn setup(carousel: &Rc<RefCell<SchoolCarousel>>) -> WidgetResult {
    let has_cards = {
        let mut inner = carousel.borrow_mut();
        if dom::inner_width(&inner.window) > inner.config.mobile_max_width {
            return inner.deactivate();
        }

        inner.cards = dom::find_all_in(&inner.grid, ".school-card")
            .into_iter()
            .filter_map(|card| dom::html(card, ".school-card").ok())
            .collect();
        let len = inner.cards.len();
        inner.state.set_len(len);
        len > 0
    };
    if !has_cards {
        return Ok(());
    }

    if carousel.borrow().touch.is_none() {
        carousel.borrow().grid.class_list().add_1(MOBILE_CLASS)?;
        install_touch(carousel)?;
    }

    restart_auto(carousel);
    let result = carousel.borrow().render();
    result
}

pub fn init(window: &Window, document: &Document, config: &SchoolConfig) -> WidgetResult {
    let Some(grid) = dom::find(document, ".school-grid") else {
        debug!("No .school-grid on this page");
        return Ok(());
    };

    let carousel = Rc::new(RefCell::new(SchoolCarousel {
        window: window.clone(),
        grid: dom::html(grid, ".school-grid")?,
        cards: Vec::new(),
        state: CarouselState::new(0, 1, Edge::Wrap),
        swipe: SwipeTracker::new(Threshold::AtLeast(config.swipe_px)),
        touch: None,
        auto: None,
        config: config.clone(),
    }));

    let resize = {
        let carousel = carousel.clone();
        Debouncer::new(config.resize_debounce_ms, move || {
            dom::report("school highlights", setup(&carousel));
        })
    };
    dom::listen(window, "resize", move |_| resize.trigger())?;

    setup(&carousel)
}
