//! Client entrypoint for the galaxy CSR build.

// Bin target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use heart_galaxy::{GalaxyApp, init_logging};
use leptos::prelude::*;

fn main() {
	init_logging();

	mount_to_body(|| {
		view! { <GalaxyApp /> }
	})
}
