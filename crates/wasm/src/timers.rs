use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::render::request_animation_frame;
use gloo::timers::callback::Timeout;

/// Shared flag that stops a self-rescheduling chain at its next link.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }

    /// React to `pagehide`. A page entering the back/forward cache
    /// (`persisted`) is frozen and later resumed as is, so its chains must
    /// survive.
    pub fn on_pagehide(&self, persisted: bool) {
        if !persisted {
            self.cancel();
        }
    }
}

/// Holds the pending handle of a one-shot browser callback (`Timeout`,
/// `AnimationFrame`). Storing a new handle drops the previous one, which
/// cancels it if it has not fired. The callback releases its own handle when
/// it runs, so nothing is leaked.
#[derive(Debug)]
pub struct HandleSlot<H>(Rc<RefCell<Option<H>>>);

impl<H> Clone for HandleSlot<H> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<H> Default for HandleSlot<H> {
    fn default() -> Self {
        Self(Rc::new(RefCell::new(None)))
    }
}

impl<H> HandleSlot<H> {
    pub fn store(&self, handle: H) {
        let previous = self.0.borrow_mut().replace(handle);
        drop(previous);
    }

    pub fn release(&self) {
        let handle = self.0.borrow_mut().take();
        drop(handle);
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_none()
    }
}

/// `performance.now()`, or 0 where the platform has no performance clock.
pub fn now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Run `step` after `delay_ms`, then again after whatever delay it returns,
/// until it returns `None` or `token` is cancelled.
pub fn timeout_chain<S>(delay_ms: u32, token: CancelToken, step: S)
where
    S: FnMut() -> Option<u32> + 'static,
{
    schedule_timeout(HandleSlot::default(), delay_ms, token, step);
}

fn schedule_timeout<S>(slot: HandleSlot<Timeout>, delay_ms: u32, token: CancelToken, mut step: S)
where
    S: FnMut() -> Option<u32> + 'static,
{
    let next_slot = slot.clone();
    let handle = Timeout::new(delay_ms, move || {
        next_slot.release();
        if token.is_cancelled() {
            return;
        }
        if let Some(next) = step() {
            schedule_timeout(next_slot, next, token, step);
        }
    });
    slot.store(handle);
}

/// Call `step` with the frame timestamp on every animation frame until it
/// returns `false` or `token` is cancelled.
pub fn frame_loop<S>(token: CancelToken, step: S)
where
    S: FnMut(f64) -> bool + 'static,
{
    schedule_frame(HandleSlot::default(), token, step);
}

fn schedule_frame<S>(
    slot: HandleSlot<gloo::render::AnimationFrame>,
    token: CancelToken,
    mut step: S,
) where
    S: FnMut(f64) -> bool + 'static,
{
    let next_slot = slot.clone();
    let handle = request_animation_frame(move |timestamp| {
        next_slot.release();
        if token.is_cancelled() || !step(timestamp) {
            return;
        }
        schedule_frame(next_slot, token, step);
    });
    slot.store(handle);
}
