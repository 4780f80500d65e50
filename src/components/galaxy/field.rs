//! Procedural spiral-galaxy point field.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::Rng;

use crate::components::theme::Color;

/// Parameters of the spiral distribution.
#[derive(Clone, Debug)]
pub struct GalaxyConfig {
	/// Number of points
	pub star_count: usize,
	/// Outer radius `R` of the disk
	pub radius: f32,
	/// Disk thickness at the core
	pub arm_thickness: f32,
	/// How strongly the disk flattens toward the rim (0 = uniform thickness)
	pub center_density: f32,
	/// Spiral twist `k`; a point at the rim is offset by `k * PI` radians
	pub spiral_factor: f32,
	/// Full width of the per-axis random jitter
	pub jitter: f32,
	/// Color at the center
	pub core_color: Color,
	/// Color at the rim
	pub rim_color: Color,
	/// Point size in world units
	pub point_size: f32,
	/// Opacity of the whole point cloud
	pub point_opacity: f64,
}

impl Default for GalaxyConfig {
	fn default() -> Self {
		Self {
			star_count: 5000,
			radius: 150.0,
			arm_thickness: 20.0,
			center_density: 0.8,
			spiral_factor: 0.5,
			jitter: 10.0,
			core_color: Color::hex(0x8a2be2),
			rim_color: Color::hex(0xffffff),
			point_size: 2.0,
			point_opacity: 0.9,
		}
	}
}

/// One point of the galaxy.
#[derive(Clone, Debug)]
pub struct GalaxyPoint {
	pub position: Vec3,
	/// Sampled disk radius before jitter, in `[0, R)`
	pub base_radius: f32,
	pub color: Color,
}

impl GalaxyConfig {
	/// Color for a normalized distance from the center (0 = core, 1 = rim).
	pub fn color_at(&self, t: f64) -> Color {
		self.core_color.lerp(self.rim_color, t)
	}
}

/// Generates the galaxy field.
pub fn generate_galaxy(config: &GalaxyConfig, rng: &mut impl Rng) -> Vec<GalaxyPoint> {
	let r_max = config.radius;
	let mut points = Vec::with_capacity(config.star_count);

	for _ in 0..config.star_count {
		let radius = rng.gen_range(0.0..r_max);
		let angle = rng.gen_range(0.0..TAU);
		let spiral_offset = config.spiral_factor * PI * (radius / r_max);
		let falloff = 1.0 - radius / r_max * config.center_density;

		let mut position = Vec3::new(
			radius * (angle + spiral_offset).cos(),
			radius * (angle + spiral_offset).sin(),
			(rng.r#gen::<f32>() - 0.5) * config.arm_thickness * falloff,
		);
		position += Vec3::new(
			(rng.r#gen::<f32>() - 0.5) * config.jitter,
			(rng.r#gen::<f32>() - 0.5) * config.jitter,
			(rng.r#gen::<f32>() - 0.5) * config.jitter,
		);

		let t = (position.length() / r_max) as f64;
		points.push(GalaxyPoint {
			position,
			base_radius: radius,
			color: config.color_at(t),
		});
	}

	points
}
