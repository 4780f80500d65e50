//! Galaxy animation state.
//!
//! Owns the scene, camera, controls and the live heart set. Created once when
//! the component mounts; the frame loop calls [`GalaxyState::tick`] and the
//! input handlers call the spawn methods on the same instance.

use glam::Vec3;
use log::{debug, info};
use rand::rngs::SmallRng;

use super::camera::{OrbitControls, PerspectiveCamera};
use super::field::{GalaxyConfig, generate_galaxy};
use super::hearts::{HeartConfig, HeartSet};
use super::scene::{Geometry, NodeId, Scene, SceneNode};
use crate::components::theme::GalaxyTheme;

/// Camera placement and decorative spin rates.
#[derive(Clone, Debug)]
pub struct SceneConfig {
	pub fov_y: f32,
	pub near: f32,
	pub far: f32,
	/// Camera distance from the origin along +Z
	pub camera_distance: f32,
	pub orb_radius: f32,
	/// Orb rotation added per tick (radians, XYZ)
	pub orb_spin: Vec3,
	/// Galaxy rotation about Y added per tick (radians)
	pub galaxy_spin: f32,
}

impl Default for SceneConfig {
	fn default() -> Self {
		Self {
			fov_y: 75.0,
			near: 0.1,
			far: 1000.0,
			camera_distance: 200.0,
			orb_radius: 30.0,
			orb_spin: Vec3::new(0.002, 0.005, 0.0),
			galaxy_spin: 0.0005,
		}
	}
}

/// Everything the galaxy loop mutates.
pub struct GalaxyState {
	pub scene: Scene,
	pub camera: PerspectiveCamera,
	pub controls: OrbitControls,
	pub hearts: HeartSet,
	pub width: f64,
	pub height: f64,
	/// Ticks run so far
	pub ticks: u64,
	orb: NodeId,
	field: NodeId,
	config: SceneConfig,
	rng: SmallRng,
}

impl GalaxyState {
	pub fn new(width: f64, height: f64, theme: &GalaxyTheme, rng: SmallRng) -> Self {
		Self::with_config(
			width,
			height,
			theme,
			&GalaxyConfig::default(),
			HeartConfig {
				color: theme.heart,
				..HeartConfig::default()
			},
			SceneConfig::default(),
			rng,
		)
	}

	pub fn with_config(
		width: f64,
		height: f64,
		theme: &GalaxyTheme,
		galaxy: &GalaxyConfig,
		hearts: HeartConfig,
		config: SceneConfig,
		mut rng: SmallRng,
	) -> Self {
		let mut camera = PerspectiveCamera::new(config.fov_y, 1.0, config.near, config.far);
		camera.set_viewport(width, height);
		camera.position = Vec3::new(0.0, 0.0, config.camera_distance);
		let controls = OrbitControls::new(&camera);

		let mut scene = Scene::new(theme.background);

		let orb = scene.add(SceneNode::new(
			Geometry::Sphere {
				radius: config.orb_radius,
			},
			theme.orb,
		));

		let points = generate_galaxy(galaxy, &mut rng);
		info!("galaxy: generated {} points", points.len());
		let mut cloud = SceneNode::new(
			Geometry::Points {
				points,
				size: galaxy.point_size,
			},
			galaxy.rim_color,
		);
		cloud.opacity = galaxy.point_opacity;
		cloud.additive = true;
		let field = scene.add(cloud);

		Self {
			scene,
			camera,
			controls,
			hearts: HeartSet::new(hearts),
			width,
			height,
			ticks: 0,
			orb,
			field,
			config,
			rng,
		}
	}

	pub fn orb(&self) -> NodeId {
		self.orb
	}

	pub fn field(&self) -> NodeId {
		self.field
	}

	/// Advances the animation by one frame.
	pub fn tick(&mut self) {
		self.controls.update(&mut self.camera);

		if let Some(orb) = self.scene.get_mut(self.orb) {
			orb.rotation += self.config.orb_spin;
		}
		if let Some(field) = self.scene.get_mut(self.field) {
			field.rotation.y += self.config.galaxy_spin;
		}

		self.hearts.update(&mut self.scene);
		self.ticks += 1;
	}

	/// Spawns a heart under a canvas pixel.
	pub fn spawn_heart(&mut self, sx: f64, sy: f64) -> NodeId {
		let position = self
			.camera
			.screen_to_plane(sx, sy, self.width, self.height);
		let id = self.hearts.spawn(&mut self.scene, position, &mut self.rng);
		debug!(
			"heart spawned at ({:.1}, {:.1}, {:.1}), {} live",
			position.x,
			position.y,
			position.z,
			self.hearts.len()
		);
		id
	}

	/// Spawns a heart at the first touch point, if any.
	pub fn spawn_from_touch(&mut self, first_touch: Option<(f64, f64)>) -> Option<NodeId> {
		let (x, y) = first_touch?;
		Some(self.spawn_heart(x, y))
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.camera.set_viewport(width, height);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;

	fn state() -> GalaxyState {
		GalaxyState::new(
			800.0,
			600.0,
			&GalaxyTheme::default(),
			SmallRng::seed_from_u64(5),
		)
	}

	#[test]
	fn test_initial_scene_has_orb_and_field() {
		let s = state();
		assert_eq!(s.scene.len(), 2);
		match &s.scene.get(s.field()).unwrap().geometry {
			Geometry::Points { points, .. } => assert_eq!(points.len(), 5000),
			other => panic!("unexpected geometry {other:?}"),
		}
		assert!(matches!(
			s.scene.get(s.orb()).unwrap().geometry,
			Geometry::Sphere { radius } if radius == 30.0
		));
	}

	#[test]
	fn test_tick_spins_orb_and_field() {
		let mut s = state();
		for _ in 0..10 {
			s.tick();
		}
		let orb = s.scene.get(s.orb()).unwrap();
		assert!((orb.rotation.x - 0.02).abs() < 1e-5);
		assert!((orb.rotation.y - 0.05).abs() < 1e-5);
		let field = s.scene.get(s.field()).unwrap();
		assert!((field.rotation.y - 0.005).abs() < 1e-6);
		assert_eq!(s.ticks, 10);
	}

	#[test]
	fn test_empty_touch_list_spawns_nothing() {
		let mut s = state();
		assert!(s.spawn_from_touch(None).is_none());
		assert!(s.hearts.is_empty());
		assert_eq!(s.scene.len(), 2);
	}

	#[test]
	fn test_touch_spawns_one_heart() {
		let mut s = state();
		let id = s.spawn_from_touch(Some((10.0, 10.0)));
		assert!(id.is_some());
		assert_eq!(s.hearts.len(), 1);
		assert_eq!(s.scene.len(), 3);
	}

	#[test]
	fn test_resize_updates_aspect() {
		let mut s = state();
		s.resize(1000.0, 500.0);
		assert!((s.camera.aspect - 2.0).abs() < 1e-6);
	}
}
