//! Click-spawned heart particles.
//!
//! Each heart drifts with a fixed random velocity while it grows and fades.
//! Opacity running out is what normally retires a heart; the life counter
//! caps how many ticks it can survive regardless of fade rate.

use std::collections::VecDeque;

use glam::Vec3;
use log::debug;
use rand::Rng;

use super::scene::{Geometry, NodeId, Scene, SceneNode};
use crate::components::theme::Color;

/// Heart outline in unit space, as cubic Bézier segments from `HEART_START`.
/// Each entry is `(control1, control2, end)`.
pub const HEART_OUTLINE: [((f64, f64), (f64, f64), (f64, f64)); 2] = [
	((0.7, 1.2), (1.2, 0.6), (0.0, 0.0)),
	((-1.2, 0.6), (-0.7, 1.2), (0.0, 0.7)),
];

/// Starting point of [`HEART_OUTLINE`].
pub const HEART_START: (f64, f64) = (0.0, 0.7);

/// Opacity at or below this counts as fully faded; repeated subtraction of
/// the fade step leaves rounding residue around zero.
const FADED: f64 = 1e-9;

/// Heart behavior constants.
#[derive(Clone, Debug)]
pub struct HeartConfig {
	/// Scale at spawn
	pub initial_scale: f32,
	/// Scale multiplier per tick
	pub growth: f32,
	/// Opacity subtracted per tick
	pub fade_step: f64,
	/// Maximum ticks a heart may live
	pub life: i32,
	/// Each velocity component is drawn from `[-max_speed, max_speed)`
	pub max_speed: f32,
	/// Live hearts allowed at once; the oldest is evicted beyond this
	pub max_live: usize,
	pub color: Color,
}

impl Default for HeartConfig {
	fn default() -> Self {
		Self {
			initial_scale: 0.5,
			growth: 1.02,
			fade_step: 0.01,
			life: 60,
			max_speed: 0.25,
			max_live: 256,
			color: Color::hex(0xff0000),
		}
	}
}

/// A live heart and the scene node that displays it.
#[derive(Clone, Debug)]
pub struct Heart {
	pub node: NodeId,
	pub position: Vec3,
	pub velocity: Vec3,
	pub opacity: f64,
	pub scale: f32,
	/// Ticks left before the backstop removes it
	pub life: i32,
}

impl Heart {
	/// Advances one tick.
	pub fn advance(&mut self, config: &HeartConfig) {
		self.position += self.velocity;
		self.opacity -= config.fade_step;
		self.scale *= config.growth;
		self.life = (self.life - 1).max(0);
	}

	pub fn is_spent(&self) -> bool {
		self.opacity <= FADED || self.life <= 0
	}

	fn sync(&self, node: &mut SceneNode) {
		node.position = self.position;
		node.scale = self.scale;
		node.opacity = self.opacity.max(0.0);
	}
}

/// The live set of hearts, oldest first.
#[derive(Clone, Debug, Default)]
pub struct HeartSet {
	hearts: VecDeque<Heart>,
	config: HeartConfig,
}

impl HeartSet {
	pub fn new(config: HeartConfig) -> Self {
		Self {
			hearts: VecDeque::new(),
			config,
		}
	}

	pub fn len(&self) -> usize {
		self.hearts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.hearts.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Heart> {
		self.hearts.iter()
	}

	/// Spawns one heart at `position` and registers it with `scene`.
	pub fn spawn(&mut self, scene: &mut Scene, position: Vec3, rng: &mut impl Rng) -> NodeId {
		while self.hearts.len() >= self.config.max_live.max(1) {
			if let Some(oldest) = self.hearts.pop_front() {
				scene.remove(oldest.node);
				debug!("evicted oldest heart, {} live", self.hearts.len());
			}
		}

		let s = self.config.max_speed;
		let velocity = if s > 0.0 {
			Vec3::new(
				rng.gen_range(-s..s),
				rng.gen_range(-s..s),
				rng.gen_range(-s..s),
			)
		} else {
			Vec3::ZERO
		};

		let mut node = SceneNode::new(Geometry::Heart, self.config.color);
		node.position = position;
		node.scale = self.config.initial_scale;
		let id = scene.add(node);

		self.hearts.push_back(Heart {
			node: id,
			position,
			velocity,
			opacity: 1.0,
			scale: self.config.initial_scale,
			life: self.config.life,
		});
		id
	}

	/// Advances every heart one tick and removes spent ones from the set and
	/// the scene. Returns how many were removed.
	pub fn update(&mut self, scene: &mut Scene) -> usize {
		let before = self.hearts.len();
		let config = &self.config;
		self.hearts.retain_mut(|heart| {
			heart.advance(config);
			if heart.is_spent() {
				scene.remove(heart.node);
				return false;
			}
			if let Some(node) = scene.get_mut(heart.node) {
				heart.sync(node);
			}
			true
		});
		before - self.hearts.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	fn setup(config: HeartConfig) -> (HeartSet, Scene, SmallRng) {
		(
			HeartSet::new(config),
			Scene::new(Color::rgb(0, 0, 0)),
			SmallRng::seed_from_u64(11),
		)
	}

	#[test]
	fn test_spawn_registers_node() {
		let (mut hearts, mut scene, mut rng) = setup(HeartConfig::default());
		let id = hearts.spawn(&mut scene, Vec3::new(1.0, 2.0, 0.0), &mut rng);
		assert_eq!(hearts.len(), 1);
		let node = scene.get(id).unwrap();
		assert_eq!(node.position, Vec3::new(1.0, 2.0, 0.0));
		assert_eq!(node.scale, 0.5);
		assert!(matches!(node.geometry, Geometry::Heart));
	}

	#[test]
	fn test_velocity_within_bounds() {
		let (mut hearts, mut scene, mut rng) = setup(HeartConfig::default());
		for _ in 0..100 {
			hearts.spawn(&mut scene, Vec3::ZERO, &mut rng);
		}
		for h in hearts.iter() {
			assert!(h.velocity.abs().max_element() <= 0.25);
		}
	}

	#[test]
	fn test_tick_moves_fades_and_grows() {
		let (mut hearts, mut scene, mut rng) = setup(HeartConfig::default());
		let id = hearts.spawn(&mut scene, Vec3::ZERO, &mut rng);
		let velocity = hearts.iter().next().unwrap().velocity;

		hearts.update(&mut scene);

		let h = hearts.iter().next().unwrap();
		assert_eq!(h.position, velocity);
		assert!((h.opacity - 0.99).abs() < 1e-12);
		assert!((h.scale - 0.51).abs() < 1e-6);
		assert_eq!(h.life, 59);
		let node = scene.get(id).unwrap();
		assert_eq!(node.position, velocity);
		assert!((node.opacity - 0.99).abs() < 1e-12);
	}

	#[test]
	fn test_opacity_exhaustion_removes_within_hundred_ticks() {
		let (mut hearts, mut scene, mut rng) = setup(HeartConfig {
			life: i32::MAX,
			..HeartConfig::default()
		});
		let id = hearts.spawn(&mut scene, Vec3::ZERO, &mut rng);
		for _ in 0..99 {
			hearts.update(&mut scene);
		}
		assert_eq!(hearts.len(), 1);
		assert_eq!(hearts.update(&mut scene), 1);
		assert!(hearts.is_empty());
		assert!(scene.get(id).is_none());
	}

	#[test]
	fn test_life_is_a_hard_cap() {
		let (mut hearts, mut scene, mut rng) = setup(HeartConfig {
			fade_step: 0.0,
			..HeartConfig::default()
		});
		hearts.spawn(&mut scene, Vec3::ZERO, &mut rng);
		for _ in 0..59 {
			hearts.update(&mut scene);
		}
		assert_eq!(hearts.len(), 1);
		hearts.update(&mut scene);
		assert!(hearts.is_empty());
		assert!(scene.is_empty());
	}

	#[test]
	fn test_life_never_negative() {
		let mut heart = Heart {
			node: Scene::new(Color::rgb(0, 0, 0)).add(SceneNode::new(
				Geometry::Heart,
				Color::rgb(0, 0, 0),
			)),
			position: Vec3::ZERO,
			velocity: Vec3::ZERO,
			opacity: 1.0,
			scale: 1.0,
			life: 1,
		};
		let config = HeartConfig::default();
		heart.advance(&config);
		heart.advance(&config);
		assert_eq!(heart.life, 0);
		assert!(heart.is_spent());
	}

	#[test]
	fn test_cap_evicts_oldest_first() {
		let (mut hearts, mut scene, mut rng) = setup(HeartConfig {
			max_live: 3,
			..HeartConfig::default()
		});
		let first = hearts.spawn(&mut scene, Vec3::ZERO, &mut rng);
		let second = hearts.spawn(&mut scene, Vec3::ZERO, &mut rng);
		hearts.spawn(&mut scene, Vec3::ZERO, &mut rng);
		hearts.spawn(&mut scene, Vec3::ZERO, &mut rng);

		assert_eq!(hearts.len(), 3);
		assert_eq!(scene.len(), 3);
		assert_eq!(hearts.iter().next().unwrap().node, second);
		// the evicted heart's slot is reused by the newest one
		assert_eq!(hearts.iter().last().unwrap().node, first);
	}

	#[test]
	fn test_removal_preserves_order_of_survivors() {
		let (mut hearts, mut scene, mut rng) = setup(HeartConfig::default());
		hearts.spawn(&mut scene, Vec3::ZERO, &mut rng);
		for _ in 0..30 {
			hearts.update(&mut scene);
		}
		let a = hearts.spawn(&mut scene, Vec3::ZERO, &mut rng);
		let b = hearts.spawn(&mut scene, Vec3::ZERO, &mut rng);
		for _ in 0..30 {
			hearts.update(&mut scene);
		}
		let ids: Vec<NodeId> = hearts.iter().map(|h| h.node).collect();
		assert_eq!(ids, vec![a, b]);
	}
}
