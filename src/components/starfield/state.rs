//! Starfield animation state and the draw-on-update tick.

use log::info;
use rand::rngs::SmallRng;

use super::stars::{Star, StarfieldConfig, generate_stars};

/// Immediate-mode drawing surface the tick paints onto as it updates.
pub trait StarPainter {
	/// Paints the trail overlay over the whole surface.
	fn fade(&mut self, width: f64, height: f64);
	/// Paints the glowing center orb.
	fn orb(&mut self, cx: f64, cy: f64, radius: f64);
	/// Paints one star at its current position and opacity.
	fn star(&mut self, star: &Star);
}

/// Everything the starfield loop mutates.
pub struct StarfieldState {
	pub stars: Vec<Star>,
	pub width: f64,
	pub height: f64,
	pub config: StarfieldConfig,
	rng: SmallRng,
}

impl StarfieldState {
	pub fn new(width: f64, height: f64, config: StarfieldConfig, mut rng: SmallRng) -> Self {
		let stars = generate_stars(&config, width, height, &mut rng);
		info!("starfield: generated {} stars", stars.len());
		Self {
			stars,
			width,
			height,
			config,
			rng,
		}
	}

	pub fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}

	/// Advances every star one tick at `time` seconds, painting as it goes.
	pub fn tick(&mut self, time: f64, painter: &mut impl StarPainter) {
		let (cx, cy) = self.center();
		painter.fade(self.width, self.height);
		painter.orb(cx, cy, self.config.orb_radius);

		let twinkle_speed = self.config.twinkle_speed;
		for star in &mut self.stars {
			star.advance(cx, cy, time, twinkle_speed);
			painter.star(star);
		}
	}

	/// Discards the field and regenerates it for the new viewport.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.stars = generate_stars(&self.config, width, height, &mut self.rng);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;

	#[derive(Default)]
	struct Recorder {
		calls: Vec<&'static str>,
		stars: usize,
	}

	impl StarPainter for Recorder {
		fn fade(&mut self, _: f64, _: f64) {
			self.calls.push("fade");
		}
		fn orb(&mut self, _: f64, _: f64, _: f64) {
			self.calls.push("orb");
		}
		fn star(&mut self, _: &Star) {
			self.stars += 1;
		}
	}

	fn state() -> StarfieldState {
		StarfieldState::new(
			800.0,
			600.0,
			StarfieldConfig::default(),
			SmallRng::seed_from_u64(3),
		)
	}

	#[test]
	fn test_tick_fades_then_draws_orb_then_every_star() {
		let mut s = state();
		let mut rec = Recorder::default();
		s.tick(0.0, &mut rec);
		assert_eq!(rec.calls, vec!["fade", "orb"]);
		assert_eq!(rec.stars, 500);
	}

	#[test]
	fn test_resize_regenerates_full_set() {
		let mut s = state();
		s.stars.truncate(17);
		s.resize(1024.0, 768.0);
		assert_eq!(s.stars.len(), 500);
		assert_eq!(s.center(), (512.0, 384.0));
		for star in &s.stars {
			assert!(star.x >= 0.0 && star.x <= 1024.0);
		}
	}

	#[test]
	fn test_opacity_follows_twinkle() {
		let mut s = state();
		s.tick(2.5, &mut Recorder::default());
		for star in &s.stars {
			assert!(star.opacity <= star.base_opacity + 1e-12);
			assert!(star.opacity >= star.base_opacity * 0.6 - 1e-12);
		}
	}
}
