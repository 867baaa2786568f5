use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Interval;
use log::debug;
use web_sys::{Document, Element, HtmlElement, Window};

use super::{Breakpoints, CarouselState, Edge, Swipe, SwipeTracker, Threshold};
use crate::config::TestimonialConfig;
use crate::debounce::Debouncer;
use crate::dom;
use crate::error::WidgetResult;

struct TestimonialSlider {
    window: Window,
    wrapper: HtmlElement,
    slides: Vec<HtmlElement>,
    dots: Vec<Element>,
    state: CarouselState,
    breakpoints: Breakpoints,
    swipe: SwipeTracker,
    auto_advance_ms: u32,
    auto: Option<Interval>,
}

impl TestimonialSlider {
    fn render(&mut self) -> WidgetResult {
        self.state.clamp();
        let step = dom::slide_step(&self.slides);
        dom::translate_x(&self.wrapper, self.state.offset_px(step))?;
        for (i, dot) in self.dots.iter().enumerate() {
            dot.class_list()
                .toggle_with_force("active", i == self.state.index())?;
        }
        Ok(())
    }

    fn handle_swipe(&mut self, x: f64) -> WidgetResult {
        match self.swipe.finish(x) {
            Some(Swipe::Right) => self.state.prev(),
            Some(Swipe::Left) => self.state.next(),
            None => return Ok(()),
        }
        self.render()
    }

    fn handle_resize(&mut self) -> WidgetResult {
        let visible = self.breakpoints.visible_for(dom::inner_width(&self.window));
        if self.state.set_visible(visible) {
            self.state.reset();
            self.render()?;
        }
        Ok(())
    }
}

fn start_auto(slider: &Rc<RefCell<TestimonialSlider>>) {
    let weak: Weak<RefCell<TestimonialSlider>> = Rc::downgrade(slider);
    let mut inner = slider.borrow_mut();
    let interval = Interval::new(inner.auto_advance_ms, move || {
        if let Some(slider) = weak.upgrade() {
            let mut slider = slider.borrow_mut();
            slider.state.advance_cyclic();
            dom::report("testimonials", slider.render());
        }
    });
    inner.auto = Some(interval);
}

fn create(document: &Document, tag: &str, class: &str) -> WidgetResult<Element> {
    let element = document.create_element(tag)?;
    element.set_class_name(class);
    Ok(element)
}

/// Rebuilds `.testimonial-slider` into a wrapper of cards with prev/next
/// buttons, dots, auto-advance and swipe support.
pub fn init(window: &Window, document: &Document, config: &TestimonialConfig) -> WidgetResult {
    let Some(container) = dom::find(document, ".testimonial-slider") else {
        debug!("No .testimonial-slider on this page");
        return Ok(());
    };
    let cards = dom::find_all(document, ".testimonial-card");
    if cards.is_empty() {
        debug!("Testimonial slider has no cards");
        return Ok(());
    }

    container.set_inner_html("");

    let wrapper = create(document, "div", "testimonial-wrapper")?;
    for card in &cards {
        wrapper.append_child(&card.clone_node_with_deep(true)?)?;
    }
    container.append_child(&wrapper)?;

    let prev_btn = create(document, "button", "slider-btn prev")?;
    prev_btn.set_inner_html("❮");
    let next_btn = create(document, "button", "slider-btn next")?;
    next_btn.set_inner_html("❯");
    container.append_child(&prev_btn)?;
    container.append_child(&next_btn)?;

    let slides = dom::children(&wrapper);
    let dots_container = create(document, "div", "slider-dots")?;
    let mut dots = Vec::with_capacity(slides.len());
    for i in 0..slides.len() {
        let dot = create(document, "span", "dot")?;
        dot.set_attribute("data-index", &i.to_string())?;
        dots_container.append_child(&dot)?;
        dots.push(dot);
    }
    container.append_child(&dots_container)?;

    let breakpoints = Breakpoints::new(vec![(config.narrow_max_width, 1)], config.wide_visible);
    let visible = breakpoints.visible_for(dom::inner_width(window));
    let slider = Rc::new(RefCell::new(TestimonialSlider {
        window: window.clone(),
        wrapper: dom::html(wrapper.clone(), ".testimonial-wrapper")?,
        state: CarouselState::new(slides.len(), visible, Edge::Clamp),
        slides,
        dots: dots.clone(),
        breakpoints,
        swipe: SwipeTracker::new(Threshold::Exceeds(config.swipe_px)),
        auto_advance_ms: config.auto_advance_ms,
        auto: None,
    }));

    {
        let slider = slider.clone();
        dom::listen(&prev_btn, "click", move |_| {
            let mut slider = slider.borrow_mut();
            slider.state.prev();
            dom::report("testimonials", slider.render());
        })?;
    }
    {
        let slider = slider.clone();
        dom::listen(&next_btn, "click", move |_| {
            let mut slider = slider.borrow_mut();
            slider.state.next();
            dom::report("testimonials", slider.render());
        })?;
    }
    for (i, dot) in dots.iter().enumerate() {
        let slider = slider.clone();
        dom::listen(dot, "click", move |_| {
            let mut slider = slider.borrow_mut();
            slider.state.go_to(i);
            dom::report("testimonials", slider.render());
        })?;
    }

    start_auto(&slider);
    {
        let slider = slider.clone();
        dom::listen(&container, "mouseenter", move |_| {
            slider.borrow_mut().auto = None;
        })?;
    }
    {
        let slider = slider.clone();
        dom::listen(&container, "mouseleave", move |_| start_auto(&slider))?;
    }

    {
        let slider = slider.clone();
        dom::listen(&wrapper, "touchstart", move |event| {
            if let Some(x) = dom::touch_screen_x(&event) {
                slider.borrow_mut().swipe.begin(x);
            }
        })?;
    }
    {
        let slider = slider.clone();
        dom::listen(&wrapper, "touchend", move |event| {
            if let Some(x) = dom::touch_screen_x(&event) {
                dom::report("testimonials", slider.borrow_mut().handle_swipe(x));
            }
        })?;
    }

    let resize = {
        let slider = slider.clone();
        Debouncer::new(config.resize_debounce_ms, move || {
            dom::report("testimonials", slider.borrow_mut().handle_resize());
        })
    };
    dom::listen(window, "resize", move |_| resize.trigger())?;

    let result = slider.borrow_mut().render();
    result
}
