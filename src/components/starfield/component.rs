//! Leptos component wrapping the starfield canvas.
//!
//! There is no pointer interaction: the component only sizes the canvas,
//! regenerates the field on resize and runs the frame loop.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::render::CanvasPainter;
use super::stars::StarfieldConfig;
use super::state::StarfieldState;
use crate::components::frame_loop::{CancelToken, Teardown, run_until_cancelled};
use crate::components::theme::StarfieldTheme;
use crate::components::viewport;

struct StarfieldContext {
	state: StarfieldState,
	theme: StarfieldTheme,
	ctx: CanvasRenderingContext2d,
}

impl StarfieldContext {
	/// Paints the trail color at full strength so the first frames start
	/// from a solid background.
	fn clear(&self) {
		self.ctx
			.set_fill_style_str(&self.theme.trail.with_alpha(1.0).to_css());
		self.ctx
			.fill_rect(0.0, 0.0, self.state.width, self.state.height);
	}
}

fn start(
	canvas: &HtmlCanvasElement,
	context: Rc<RefCell<Option<StarfieldContext>>>,
	cancel: CancelToken,
) -> Result<(), JsValue> {
	let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
	let (w, h) = viewport::fit_to_window(canvas, &window)
		.ok_or_else(|| JsValue::from_str("window has no size"))?;
	let ctx = viewport::context_2d(canvas)?;

	let c = StarfieldContext {
		state: StarfieldState::new(w, h, StarfieldConfig::default(), viewport::seeded_rng()),
		theme: StarfieldTheme::default(),
		ctx,
	};
	c.clear();
	*context.borrow_mut() = Some(c);

	let (context_resize, canvas_resize) = (context.clone(), canvas.clone());
	let resize = viewport::on_window_resize(&window, cancel.clone(), move |nw, nh| {
		canvas_resize.set_width(nw as u32);
		canvas_resize.set_height(nh as u32);
		if let Some(ref mut c) = *context_resize.borrow_mut() {
			c.state.resize(nw, nh);
			c.clear();
		}
	})?;

	let context_stop = context.clone();
	let teardown = Teardown::new(move || {
		drop(resize);
		if context_stop.borrow_mut().take().is_some() {
			info!("starfield: field released");
		}
	});

	let context_anim = context.clone();
	run_until_cancelled(cancel, teardown, move |timestamp| {
		if let Some(ref mut c) = *context_anim.borrow_mut() {
			let mut painter = CanvasPainter {
				ctx: &c.ctx,
				theme: &c.theme,
			};
			c.state.tick(timestamp / 1000.0, &mut painter);
		}
	})?;

	info!("starfield: frame loop started at {}x{}", w, h);
	Ok(())
}

/// Fullscreen canvas of stars orbiting a glowing orb.
#[component]
pub fn StarfieldCanvas() -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<StarfieldContext>>> = Rc::new(RefCell::new(None));
	let cancel = CancelToken::new();

	let cancel_init = cancel.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		if context.borrow().is_some() {
			return;
		}
		if let Err(e) = start(&canvas, context.clone(), cancel_init.clone()) {
			warn!("starfield: failed to start: {:?}", e);
		}
	});

	on_cleanup(move || cancel.cancel());

	view! {
		<canvas
			node_ref=canvas_ref
			class="starfield-canvas"
			style="display: block;"
		/>
	}
}
