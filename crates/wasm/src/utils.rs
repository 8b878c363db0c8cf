//! Timing helpers exported to page scripts.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use portfolio_fx_core::timing::{CountUp, Debounce, Throttle};
use wasm_bindgen::prelude::*;

use crate::timers::{self, CancelToken, HandleSlot};

/// Wrap `func` so it runs `wait_ms` after the last of a burst of calls.
/// The wrapper forwards its first argument.
#[wasm_bindgen]
pub fn debounce(func: js_sys::Function, wait_ms: u32) -> js_sys::Function {
    let gate = Rc::new(RefCell::new(Debounce::default()));
    // Holds only the latest timeout; replacing it clears the earlier one.
    let pending = HandleSlot::<Timeout>::default();
    let wrapper = Closure::<dyn FnMut(JsValue)>::new(move |arg: JsValue| {
        let generation = gate.borrow_mut().schedule();
        let gate = Rc::clone(&gate);
        let slot = pending.clone();
        let func = func.clone();
        let timeout = Timeout::new(wait_ms, move || {
            slot.release();
            let latest = gate.borrow_mut().fire(generation);
            if latest
                && let Err(err) = func.call1(&JsValue::NULL, &arg)
            {
                tracing::warn!(?err, "debounced callback threw");
            }
        });
        pending.store(timeout);
    });
    wrapper.into_js_value().unchecked_into()
}

/// Wrap `func` so it runs at most once per `limit_ms`; calls in between are
/// dropped. The wrapper forwards its first argument.
#[wasm_bindgen]
pub fn throttle(func: js_sys::Function, limit_ms: f64) -> js_sys::Function {
    let mut gate = Throttle::new(limit_ms);
    let wrapper = Closure::<dyn FnMut(JsValue)>::new(move |arg: JsValue| {
        if gate.try_acquire(timers::now())
            && let Err(err) = func.call1(&JsValue::NULL, &arg)
        {
            tracing::warn!(?err, "throttled callback threw");
        }
    });
    wrapper.into_js_value().unchecked_into()
}

/// Count the element's text from `start` to `end` over `duration_ms`.
#[wasm_bindgen(js_name = animateValue)]
pub fn animate_value(element: web_sys::Element, start: f64, end: f64, duration_ms: f64) {
    let animation = CountUp {
        start,
        end,
        duration_ms,
        started_at: timers::now(),
    };
    timers::frame_loop(CancelToken::default(), move |timestamp| {
        let (value, done) = animation.sample(timestamp);
        element.set_text_content(Some(value.to_string().as_str()));
        !done
    });
}
