//! 3D spiral galaxy with click-spawned hearts.
//!
//! A perspective camera looks at a disk of 5000 points wound into a spiral
//! around a purple orb. The scene is projected onto a 2D canvas each frame:
//! - The point cloud spins slowly about its axis, the orb tumbles
//! - Mouse drag orbits the camera, the wheel zooms
//! - Every click or tap drops a heart that drifts, grows and fades out
//!
//! # Example
//!
//! ```ignore
//! use heart_galaxy::components::galaxy::GalaxyCanvas;
//!
//! view! { <GalaxyCanvas /> }
//! ```

mod camera;
mod component;
mod field;
mod hearts;
mod render;
mod scene;
mod state;

pub use camera::{OrbitControls, PerspectiveCamera, Projected};
pub use component::GalaxyCanvas;
pub use field::{GalaxyConfig, GalaxyPoint, generate_galaxy};
pub use hearts::{HEART_OUTLINE, HEART_START, Heart, HeartConfig, HeartSet};
pub use scene::{Geometry, NodeId, Scene, SceneNode};
pub use state::{GalaxyState, SceneConfig};
