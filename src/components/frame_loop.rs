//! Refresh-synchronized animation loop.
//!
//! Wraps `requestAnimationFrame` in a loop that re-schedules itself until a
//! [`CancelToken`] is cancelled. The token is checked on entry to every
//! frame, so cancelling from a component cleanup stops the loop before the
//! next tick runs. The frame that observes the cancellation runs the loop's
//! [`Teardown`] and releases the loop closure along with everything it owns.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, warn};
use wasm_bindgen::prelude::*;

/// Shared stop flag for a running frame loop.
///
/// Clones observe the same flag. Backed by an atomic so it can be moved into
/// `Send` cleanup callbacks.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn cancel(&self) {
		self.0.store(true, Ordering::Relaxed);
	}

	pub fn is_cancelled(&self) -> bool {
		self.0.load(Ordering::Relaxed)
	}
}

/// Work to run once when a frame loop stops.
///
/// Runs on [`run`](Self::run) or, failing that, on drop. Never runs twice.
#[derive(Default)]
pub struct Teardown(Option<Box<dyn FnOnce()>>);

impl Teardown {
	pub fn new(f: impl FnOnce() + 'static) -> Self {
		Self(Some(Box::new(f)))
	}

	pub fn run(&mut self) {
		if let Some(f) = self.0.take() {
			f();
		}
	}

	pub fn is_pending(&self) -> bool {
		self.0.is_some()
	}
}

impl Drop for Teardown {
	fn drop(&mut self) {
		self.run();
	}
}

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn request_frame(cb: &Closure<dyn FnMut(f64)>) -> Result<i32, JsValue> {
	let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
	window.request_animation_frame(cb.as_ref().unchecked_ref())
}

/// Runs `frame` once per display refresh until `cancel` is triggered.
///
/// `frame` receives the `requestAnimationFrame` timestamp in milliseconds.
/// Once cancelled, `teardown` runs and the loop closure is released; the
/// closure is self-referencing through its slot, so this is what frees it.
/// Returns an error only if the first frame cannot be scheduled.
pub fn run_until_cancelled(
	cancel: CancelToken,
	mut teardown: Teardown,
	mut frame: impl FnMut(f64) + 'static,
) -> Result<(), JsValue> {
	let slot: FrameSlot = Rc::new(RefCell::new(None));
	let next = slot.clone();

	*slot.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
		if cancel.is_cancelled() {
			debug!("frame loop cancelled");
			teardown.run();
			// wasm-bindgen defers freeing a closure that is still executing
			let this = next.borrow_mut().take();
			drop(this);
			return;
		}
		frame(timestamp);
		if let Some(ref cb) = *next.borrow() {
			if let Err(e) = request_frame(cb) {
				warn!("failed to schedule next frame: {:?}", e);
			}
		}
	}));

	match *slot.borrow() {
		Some(ref cb) => request_frame(cb).map(|_| ()),
		None => Ok(()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::cell::Cell;

	#[test]
	fn test_token_starts_live() {
		assert!(!CancelToken::new().is_cancelled());
	}

	#[test]
	fn test_clones_share_cancellation() {
		let token = CancelToken::new();
		let handle = token.clone();
		handle.cancel();
		assert!(token.is_cancelled());
		token.cancel();
		assert!(handle.is_cancelled());
	}

	#[test]
	fn test_teardown_runs_once() {
		let calls = Rc::new(Cell::new(0));
		let counted = calls.clone();
		let mut teardown = Teardown::new(move || counted.set(counted.get() + 1));
		assert!(teardown.is_pending());
		teardown.run();
		teardown.run();
		drop(teardown);
		assert_eq!(calls.get(), 1);
	}

	#[test]
	fn test_teardown_releases_captures_on_drop() {
		let owned = Rc::new(());
		let held = owned.clone();
		let teardown = Teardown::new(move || drop(held));
		assert_eq!(Rc::strong_count(&owned), 2);
		drop(teardown);
		assert_eq!(Rc::strong_count(&owned), 1);
	}

	#[test]
	fn test_teardown_clears_shared_state() {
		let state: Rc<RefCell<Option<Vec<u8>>>> = Rc::new(RefCell::new(Some(vec![0; 16])));
		let inner = state.clone();
		let mut teardown = Teardown::new(move || {
			inner.borrow_mut().take();
		});
		teardown.run();
		assert!(state.borrow().is_none());
		assert!(!teardown.is_pending());
		drop(teardown);
		assert_eq!(Rc::strong_count(&state), 1);
	}
}
