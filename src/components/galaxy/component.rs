//! Leptos component wrapping the galaxy canvas.
//!
//! The component creates a fullscreen canvas, builds the [`GalaxyState`] once
//! the element is mounted and starts the frame loop. Click and touch spawn
//! hearts. Mouse drag, the wheel and one- or two-finger touch gestures drive
//! the orbit controls.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent, WheelEvent};

use super::render;
use super::state::GalaxyState;
use crate::components::frame_loop::{CancelToken, Teardown, run_until_cancelled};
use crate::components::theme::GalaxyTheme;
use crate::components::viewport;

/// Galaxy state plus the drawing surface it renders to.
struct GalaxyContext {
	state: GalaxyState,
	theme: GalaxyTheme,
	ctx: CanvasRenderingContext2d,
}

fn start(
	canvas: &HtmlCanvasElement,
	context: Rc<RefCell<Option<GalaxyContext>>>,
	cancel: CancelToken,
) -> Result<(), JsValue> {
	let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
	let (w, h) = viewport::fit_to_window(canvas, &window)
		.ok_or_else(|| JsValue::from_str("window has no size"))?;
	let ctx = viewport::context_2d(canvas)?;

	let theme = GalaxyTheme::default();
	*context.borrow_mut() = Some(GalaxyContext {
		state: GalaxyState::new(w, h, &theme, viewport::seeded_rng()),
		theme,
		ctx,
	});

	let (context_resize, canvas_resize) = (context.clone(), canvas.clone());
	let resize = viewport::on_window_resize(&window, cancel.clone(), move |nw, nh| {
		canvas_resize.set_width(nw as u32);
		canvas_resize.set_height(nh as u32);
		if let Some(ref mut c) = *context_resize.borrow_mut() {
			c.state.resize(nw, nh);
		}
	})?;

	let context_stop = context.clone();
	let teardown = Teardown::new(move || {
		drop(resize);
		if context_stop.borrow_mut().take().is_some() {
			info!("galaxy: scene released");
		}
	});

	let context_anim = context.clone();
	run_until_cancelled(cancel, teardown, move |_| {
		if let Some(ref mut c) = *context_anim.borrow_mut() {
			c.state.tick();
			render::render(
				&c.state.scene,
				&c.state.camera,
				&c.ctx,
				c.state.width,
				c.state.height,
				&c.theme,
			);
		}
	})?;

	info!("galaxy: frame loop started at {}x{}", w, h);
	Ok(())
}

/// Fullscreen canvas showing the rotating galaxy with click-spawned hearts.
#[component]
pub fn GalaxyCanvas() -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GalaxyContext>>> = Rc::new(RefCell::new(None));
	let cancel = CancelToken::new();

	let (context_init, cancel_init) = (context.clone(), cancel.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		if context_init.borrow().is_some() {
			return;
		}
		if let Err(e) = start(&canvas, context_init.clone(), cancel_init.clone()) {
			warn!("galaxy: failed to start: {:?}", e);
		}
	});

	on_cleanup(move || cancel.cancel());

	let local_point = move |x: i32, y: i32| -> Option<(f64, f64)> {
		let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
		Some(viewport::canvas_point(&canvas, x, y))
	};

	let context_click = context.clone();
	let on_click = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(ev.client_x(), ev.client_y()) else {
			return;
		};
		if let Some(ref mut c) = *context_click.borrow_mut() {
			c.state.spawn_heart(x, y);
		}
	};

	// Fingers still down, in canvas pixels
	let touch_points = move |ev: &TouchEvent| -> Vec<(f64, f64)> {
		let touches = ev.touches();
		(0..touches.length())
			.filter_map(|i| touches.get(i))
			.filter_map(|t| local_point(t.client_x(), t.client_y()))
			.collect()
	};

	let context_touch = context.clone();
	let on_touchstart = move |ev: TouchEvent| {
		// Suppress the synthetic click so a tap spawns exactly one heart
		ev.prevent_default();
		let points = touch_points(&ev);
		if let Some(ref mut c) = *context_touch.borrow_mut() {
			c.state.spawn_from_touch(points.first().copied());
			c.state.controls.touches_changed(&points);
		}
	};

	let context_tm = context.clone();
	let on_touchmove = move |ev: TouchEvent| {
		ev.prevent_default();
		let points = touch_points(&ev);
		if let Some(ref mut c) = *context_tm.borrow_mut() {
			let h = c.state.height;
			c.state.controls.touch_move(&points, h);
		}
	};

	let context_te = context.clone();
	let on_touchend = move |ev: TouchEvent| {
		let points = touch_points(&ev);
		if let Some(ref mut c) = *context_te.borrow_mut() {
			c.state.controls.touches_changed(&points);
		}
	};

	let context_tc = context.clone();
	let on_touchcancel = move |ev: TouchEvent| {
		let points = touch_points(&ev);
		if let Some(ref mut c) = *context_tc.borrow_mut() {
			c.state.controls.touches_changed(&points);
		}
	};

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(ev.client_x(), ev.client_y()) else {
			return;
		};
		let modified = ev.ctrl_key() || ev.meta_key() || ev.shift_key();
		if let Some(ref mut c) = *context_md.borrow_mut() {
			match ev.button() {
				0 if modified => c.state.controls.pan_down(x, y),
				0 => c.state.controls.pointer_down(x, y),
				2 => c.state.controls.pan_down(x, y),
				_ => {}
			}
		}
	};

	// Right drag pans, so keep the browser menu out of the way
	let on_contextmenu = move |ev: MouseEvent| ev.prevent_default();

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(ev.client_x(), ev.client_y()) else {
			return;
		};
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			let h = c.state.height;
			c.state.controls.pointer_move(x, y, h);
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			c.state.controls.pointer_up();
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.controls.pointer_up();
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			c.state.controls.wheel(ev.delta_y());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="galaxy-canvas"
			on:click=on_click
			on:touchstart=on_touchstart
			on:touchmove=on_touchmove
			on:touchend=on_touchend
			on:touchcancel=on_touchcancel
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			on:contextmenu=on_contextmenu
			style="display: block; cursor: grab; touch-action: none;"
		/>
	}
}
