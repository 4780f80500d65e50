//! heart-galaxy: decorative particle visualizations for the browser.
//!
//! This crate provides two WASM canvas components: a rotating 3D spiral
//! galaxy where clicks release drifting hearts, and a 2D field of stars
//! orbiting a glowing orb.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

pub mod components;

pub use components::galaxy::GalaxyCanvas;
pub use components::starfield::StarfieldCanvas;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("heart-galaxy: logging initialized");
}

/// Galaxy application: fullscreen galaxy canvas with a short hint overlay.
#[component]
pub fn GalaxyApp() -> impl IntoView {
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Heart Galaxy" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-canvas">
			<GalaxyCanvas />
			<div class="canvas-overlay">
				<p class="subtitle">"Click or tap to release hearts. Drag to orbit. Scroll to zoom."</p>
			</div>
		</div>
	}
}

/// Starfield application: fullscreen orbiting starfield.
#[component]
pub fn StarfieldApp() -> impl IntoView {
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Orbiting Stars" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-canvas">
			<StarfieldCanvas />
		</div>
	}
}
