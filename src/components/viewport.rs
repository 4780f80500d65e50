//! Browser plumbing shared by both canvas components.

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::frame_loop::CancelToken;

/// Inner size of the browser window in CSS pixels.
pub fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// Acquires the 2D drawing context of `canvas`.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
	canvas
		.get_context("2d")?
		.ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
		.dyn_into::<CanvasRenderingContext2d>()
		.map_err(JsValue::from)
}

/// Converts client (viewport) coordinates into canvas-local pixels.
pub fn canvas_point(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		client_x as f64 - rect.left(),
		client_y as f64 - rect.top(),
	)
}

/// Sizes the canvas backing store to the window and returns the new size.
pub fn fit_to_window(canvas: &HtmlCanvasElement, window: &Window) -> Option<(f64, f64)> {
	let (w, h) = window_size(window)?;
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);
	Some((w, h))
}

/// Fresh RNG seeded from the browser's `Math.random`.
pub fn seeded_rng() -> SmallRng {
	let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
	SmallRng::seed_from_u64(seed)
}

/// A registered window `resize` listener.
///
/// Dropping it removes the listener from the window and frees the callback.
pub struct ResizeListener {
	window: Window,
	callback: Closure<dyn FnMut()>,
}

impl Drop for ResizeListener {
	fn drop(&mut self) {
		let removed = self
			.window
			.remove_event_listener_with_callback("resize", self.callback.as_ref().unchecked_ref());
		match removed {
			Ok(()) => debug!("resize listener removed"),
			Err(e) => warn!("failed to remove resize listener: {:?}", e),
		}
	}
}

/// Calls `on_resize` with the new window size on every `resize` event until
/// `cancel` fires or the returned listener is dropped.
pub fn on_window_resize(
	window: &Window,
	cancel: CancelToken,
	mut on_resize: impl FnMut(f64, f64) + 'static,
) -> Result<ResizeListener, JsValue> {
	let callback = Closure::<dyn FnMut()>::new(move || {
		if cancel.is_cancelled() {
			return;
		}
		let Some(win) = web_sys::window() else {
			return;
		};
		if let Some((w, h)) = window_size(&win) {
			info!("viewport resized to {}x{}", w, h);
			on_resize(w, h);
		}
	});
	window.add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())?;
	Ok(ResizeListener {
		window: window.clone(),
		callback,
	})
}
