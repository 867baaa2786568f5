use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

/// Trailing-edge debounce: every `trigger` cancels the pending run and
/// schedules a new one `delay_ms` later.
pub struct Debouncer {
    delay_ms: u32,
    action: Rc<dyn Fn()>,
    pending: RefCell<Option<Timeout>>,
}

impl Debouncer {
    pub fn new(delay_ms: u32, action: impl Fn() + 'static) -> Self {
        Self {
            delay_ms,
            action: Rc::new(action),
            pending: RefCell::new(None),
        }
    }

    pub fn trigger(&self) {
        let action = self.action.clone();
        // Replacing the handle drops, and so cancels, the previous timeout.
        *self.pending.borrow_mut() = Some(Timeout::new(self.delay_ms, move || action()));
    }
}
