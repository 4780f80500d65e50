//! Client entrypoint for the starfield CSR build.

// Bin target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use heart_galaxy::{StarfieldApp, init_logging};
use leptos::prelude::*;

fn main() {
	init_logging();

	mount_to_body(|| {
		view! { <StarfieldApp /> }
	})
}
