//! Canvas components and the pieces they share.

pub mod frame_loop;
pub mod galaxy;
pub mod starfield;
pub mod theme;
pub mod viewport;
