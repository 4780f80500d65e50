//! Orbiting stars for the 2D starfield.

use std::f64::consts::TAU;

use rand::Rng;

/// Starfield generation and motion constants.
#[derive(Clone, Debug)]
pub struct StarfieldConfig {
	/// Number of stars
	pub star_count: usize,
	/// Angular speed numerator; a star at distance `d` turns
	/// `orbit_speed / (d + orbit_softening)` radians per tick
	pub orbit_speed: f64,
	/// Keeps stars near the center from spinning arbitrarily fast
	pub orbit_softening: f64,
	/// Angular speed floor added to every star
	pub min_angular_velocity: f64,
	/// Star radius range in pixels
	pub size_min: f64,
	pub size_max: f64,
	/// Base opacity range
	pub opacity_min: f64,
	pub opacity_max: f64,
	/// Twinkle frequency in radians per second
	pub twinkle_speed: f64,
	/// Center orb radius in pixels
	pub orb_radius: f64,
}

impl Default for StarfieldConfig {
	fn default() -> Self {
		Self {
			star_count: 500,
			orbit_speed: 1.5,
			orbit_softening: 30.0,
			min_angular_velocity: 0.002,
			size_min: 0.5,
			size_max: 2.0,
			opacity_min: 0.2,
			opacity_max: 1.0,
			twinkle_speed: 1.5,
			orb_radius: 40.0,
		}
	}
}

/// A star on a fixed circular orbit around the canvas center.
///
/// Orbit radius and angular velocity are set at creation and never change;
/// only the angle, position and current opacity move.
#[derive(Clone, Debug)]
pub struct Star {
	pub x: f64,
	pub y: f64,
	pub angle: f64,
	pub size: f64,
	pub base_opacity: f64,
	/// Opacity after the latest twinkle
	pub opacity: f64,
	pub phase: f64, // For twinkling
	orbit_radius: f64,
	angular_velocity: f64,
}

impl Star {
	pub fn orbit_radius(&self) -> f64 {
		self.orbit_radius
	}

	pub fn angular_velocity(&self) -> f64 {
		self.angular_velocity
	}

	/// Moves the star one tick along its orbit and recomputes its opacity for
	/// `time` (seconds).
	pub fn advance(&mut self, cx: f64, cy: f64, time: f64, twinkle_speed: f64) {
		self.angle += self.angular_velocity;
		self.x = cx + self.angle.cos() * self.orbit_radius;
		self.y = cy + self.angle.sin() * self.orbit_radius;
		self.opacity = self.base_opacity * twinkle(time * twinkle_speed + self.phase);
	}
}

/// Brightness multiplier in [0.6, 1.0] for a twinkle phase.
pub fn twinkle(phase: f64) -> f64 {
	(phase.sin() * 0.5 + 0.5) * 0.4 + 0.6
}

/// Angular velocity for a star `distance` pixels from the center.
pub fn angular_velocity_at(config: &StarfieldConfig, distance: f64) -> f64 {
	config.orbit_speed / (distance + config.orbit_softening) + config.min_angular_velocity
}

fn sample(rng: &mut impl Rng, min: f64, max: f64) -> f64 {
	if max > min {
		rng.gen_range(min..max)
	} else {
		min
	}
}

/// Scatters stars uniformly over a `width` x `height` box centered on the
/// canvas center.
pub fn generate_stars(
	config: &StarfieldConfig,
	width: f64,
	height: f64,
	rng: &mut impl Rng,
) -> Vec<Star> {
	let (cx, cy) = (width / 2.0, height / 2.0);
	let mut stars = Vec::with_capacity(config.star_count);

	for _ in 0..config.star_count {
		let x = cx + sample(rng, -0.5, 0.5) * width;
		let y = cy + sample(rng, -0.5, 0.5) * height;
		let (dx, dy) = (x - cx, y - cy);
		let distance = (dx * dx + dy * dy).sqrt();
		let base_opacity = sample(rng, config.opacity_min, config.opacity_max);

		stars.push(Star {
			x,
			y,
			angle: dy.atan2(dx),
			size: sample(rng, config.size_min, config.size_max),
			base_opacity,
			opacity: base_opacity,
			phase: sample(rng, 0.0, TAU),
			orbit_radius: distance,
			angular_velocity: angular_velocity_at(config, distance),
		});
	}

	stars
}
