//! 2D starfield orbiting a glowing orb.
//!
//! Stars are scattered over the viewport and each circles the canvas center
//! on its own fixed orbit, inner stars faster than outer ones. Every tick
//! paints a translucent overlay first, so moving stars leave short trails.
//! Drawing happens while the stars update; there is no separate render pass.

mod component;
mod render;
mod stars;
mod state;

pub use component::StarfieldCanvas;
pub use render::CanvasPainter;
pub use stars::{Star, StarfieldConfig, angular_velocity_at, generate_stars, twinkle};
pub use state::{StarPainter, StarfieldState};
