use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

use crate::dom;

pub const COUNTER_SELECTOR: &str = ".stat-number-lg, .fig-number";

#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Running(String),
    Done(String),
}

/// Counts from zero up to `target` in equal increments, one per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    target: f64,
    current: f64,
    increment: f64,
}

impl CounterAnimation {
    pub fn new(target: f64, frames: u32) -> Self {
        Self {
            target,
            current: 0.0,
            increment: target / f64::from(frames),
        }
    }

    pub fn step(&mut self) -> Frame {
        self.current += self.increment;
        if self.current < self.target {
            Frame::Running(format_number(self.current.ceil()))
        } else {
            Frame::Done(format_number(self.target))
        }
    }
}

/// `data-target` value, if it is a finite number.
pub fn parse_target(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Avoids printing "-0" for ceil of a small negative.
        return "0".to_string();
    }
    value.to_string()
}

/// Every counter on the page. Animates the whole group at most once.
pub struct CounterGroup {
    window: Window,
    counters: Vec<HtmlElement>,
    frames: u32,
    animated: Cell<bool>,
}

impl CounterGroup {
    pub fn new(window: &Window, document: &Document, frames: u32) -> Self {
        let counters = dom::find_all(document, COUNTER_SELECTOR)
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
            .collect::<Vec<_>>();
        debug!("Found {} counters", counters.len());
        Self {
            window: window.clone(),
            counters,
            frames,
            animated: Cell::new(false),
        }
    }

    pub fn start(&self) {
        if self.animated.replace(true) {
            return;
        }
        for counter in &self.counters {
            let raw = counter.get_attribute("data-target").unwrap_or_default();
            match parse_target(&raw) {
                Some(target) => animate(
                    self.window.clone(),
                    counter.clone(),
                    CounterAnimation::new(target, self.frames),
                ),
                None => warn!("Counter has unusable data-target {:?}", raw),
            }
        }
    }
}

fn request_frame(window: &Window, callback: &Closure<dyn FnMut()>) {
    if let Err(e) = window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        warn!("requestAnimationFrame failed: {:?}", e);
    }
}

fn animate(window: Window, element: HtmlElement, mut animation: CounterAnimation) {
    let callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let handle = callback.clone();
    let frame_window = window.clone();

    *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || match animation.step() {
        Frame::Running(text) => {
            element.set_inner_text(&text);
            if let Some(next) = handle.borrow().as_ref() {
                request_frame(&frame_window, next);
            }
        }
        Frame::Done(text) => {
            element.set_inner_text(&text);
            // Drop the closure so the animation can be freed.
            let _ = handle.borrow_mut().take();
        }
    }) as Box<dyn FnMut()>));

    if let Some(first) = callback.borrow().as_ref() {
        request_frame(&window, first);
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(mut animation: CounterAnimation) -> Vec<Frame> {
        let mut frames = Vec::new();
        loop {
            let frame = animation.step();
            let done = matches!(frame, Frame::Done(_));
            frames.push(frame);
            if done || frames.len() > 1_000 {
                return frames;
            }
        }
    }

    #[test]
    fn counts_up_with_ceiling_and_lands_on_target() {
        let frames = run(CounterAnimation::new(1500.0, 80));
        assert_eq!(frames[0], Frame::Running("19".to_string()));
        assert_eq!(frames.last(), Some(&Frame::Done("1500".to_string())));
        assert!(frames.len() == 80 || frames.len() == 81);
    }

    #[test]
    fn intermediate_values_never_exceed_target() {
        let frames = run(CounterAnimation::new(97.0, 80));
        for frame in &frames {
            let text = match frame {
                Frame::Running(t) | Frame::Done(t) => t,
            };
            assert!(text.parse::<f64>().unwrap() <= 97.0);
        }
    }

    #[test]
    fn fractional_target_is_shown_exactly() {
        let frames = run(CounterAnimation::new(4.5, 80));
        assert_eq!(frames.last(), Some(&Frame::Done("4.5".to_string())));
    }

    #[test]
    fn zero_target_finishes_on_first_frame() {
        let frames = run(CounterAnimation::new(0.0, 80));
        assert_eq!(frames, vec![Frame::Done("0".to_string())]);
    }

    #[test]
    fn targets_must_be_finite_numbers() {
        assert_eq!(parse_target(" 250 "), Some(250.0));
        assert_eq!(parse_target("98.5"), Some(98.5));
        assert_eq!(parse_target(""), None);
        assert_eq!(parse_target("lots"), None);
        assert_eq!(parse_target("inf"), None);
    }
}
