// Test target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use heart_galaxy::components::galaxy::{
	GalaxyConfig, GalaxyState, Geometry, HeartConfig, SceneConfig,
};
use heart_galaxy::components::starfield::{Star, StarPainter, StarfieldConfig, StarfieldState};
use heart_galaxy::components::theme::GalaxyTheme;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Galaxy at 800x600 with a deterministic seed
fn galaxy() -> GalaxyState {
	GalaxyState::new(
		800.0,
		600.0,
		&GalaxyTheme::default(),
		SmallRng::seed_from_u64(42),
	)
}

/// Galaxy with a small field so long runs stay cheap
fn small_galaxy(hearts: HeartConfig) -> GalaxyState {
	GalaxyState::with_config(
		800.0,
		600.0,
		&GalaxyTheme::default(),
		&GalaxyConfig {
			star_count: 100,
			..GalaxyConfig::default()
		},
		hearts,
		SceneConfig::default(),
		SmallRng::seed_from_u64(42),
	)
}

struct Counter(usize);

impl StarPainter for Counter {
	fn fade(&mut self, _: f64, _: f64) {}
	fn orb(&mut self, _: f64, _: f64, _: f64) {}
	fn star(&mut self, _: &Star) {
		self.0 += 1;
	}
}

#[test]
fn click_at_center_lands_on_galaxy_plane() {
	let mut g = galaxy();
	let id = g.spawn_heart(400.0, 300.0);
	let node = g.scene.get(id).unwrap();
	assert!(node.position.z.abs() < 1e-3, "{:?}", node.position);
	assert!(node.position.truncate().length() < 1e-2);
}

#[test]
fn click_off_center_stays_on_plane_after_orbit() {
	let mut g = galaxy();
	g.controls.pointer_down(0.0, 0.0);
	g.controls.pointer_move(40.0, 25.0, 600.0);
	g.controls.pointer_up();
	for _ in 0..5 {
		g.tick();
	}
	let id = g.spawn_heart(250.0, 180.0);
	assert!(g.scene.get(id).unwrap().position.z.abs() < 1e-2);
}

#[test]
fn one_heart_per_input_event() {
	let mut g = galaxy();
	let nodes_before = g.scene.len();
	g.spawn_heart(10.0, 20.0);
	g.spawn_from_touch(Some((30.0, 40.0)));
	g.spawn_from_touch(None);
	assert_eq!(g.hearts.len(), 2);
	assert_eq!(g.scene.len(), nodes_before + 2);
}

#[test]
fn hearts_expire_and_leave_the_scene() {
	let mut g = galaxy();
	for i in 0..5 {
		g.spawn_heart(100.0 * i as f64, 300.0);
	}
	for _ in 0..60 {
		g.tick();
	}
	assert!(g.hearts.is_empty());
	assert_eq!(g.scene.len(), 2);
}

#[test]
fn opacity_alone_retires_hearts_by_tick_hundred() {
	let mut g = small_galaxy(HeartConfig {
		life: 1000,
		..HeartConfig::default()
	});
	g.spawn_heart(400.0, 300.0);
	for _ in 0..99 {
		g.tick();
	}
	assert_eq!(g.hearts.len(), 1);
	let h = g.hearts.iter().next().unwrap();
	assert!(h.opacity > 0.0 && h.opacity < 0.02);
	g.tick();
	assert!(g.hearts.is_empty());
}

#[test]
fn heart_burst_is_capped() {
	let mut g = small_galaxy(HeartConfig {
		max_live: 32,
		..HeartConfig::default()
	});
	for i in 0..500 {
		g.spawn_heart((i % 800) as f64, 300.0);
	}
	assert_eq!(g.hearts.len(), 32);
	assert_eq!(g.scene.len(), 2 + 32);
	let hearts = g
		.scene
		.iter()
		.filter(|(_, n)| matches!(n.geometry, Geometry::Heart))
		.count();
	assert_eq!(hearts, 32);
}

#[test]
fn galaxy_colors_fade_from_core_to_rim() {
	let g = galaxy();
	let config = GalaxyConfig::default();
	let Geometry::Points { points, .. } = &g.scene.get(g.field()).unwrap().geometry else {
		panic!("field is not a point cloud");
	};
	for p in points {
		let t = (p.position.length() / config.radius) as f64;
		assert_eq!(p.color, config.color_at(t));
	}
}

#[test]
fn starfield_resize_resets_count() {
	let mut s = StarfieldState::new(
		300.0,
		200.0,
		StarfieldConfig::default(),
		SmallRng::seed_from_u64(1),
	);
	s.stars.extend(s.stars.clone());
	assert_eq!(s.stars.len(), 1000);
	s.resize(1920.0, 1080.0);
	assert_eq!(s.stars.len(), 500);

	let mut counter = Counter(0);
	s.tick(0.016, &mut counter);
	assert_eq!(counter.0, 500);
}

#[test]
fn starfield_survives_zero_viewport() {
	let mut s = StarfieldState::new(
		0.0,
		0.0,
		StarfieldConfig::default(),
		SmallRng::seed_from_u64(2),
	);
	s.tick(1.0, &mut Counter(0));
	for star in &s.stars {
		assert_eq!(star.orbit_radius(), 0.0);
		assert!(star.x.is_finite() && star.y.is_finite());
	}
}

#[test]
fn two_finger_pan_keeps_taps_on_plane() {
	let mut g = galaxy();
	g.controls.touches_changed(&[(300.0, 300.0), (500.0, 300.0)]);
	g.controls.touch_move(&[(360.0, 340.0), (560.0, 340.0)], 600.0);
	g.controls.touches_changed(&[]);
	for _ in 0..30 {
		g.tick();
	}
	assert_eq!(g.controls.target.z, 0.0);
	assert!(g.controls.target.truncate().length() > 1.0);

	let id = g.spawn_from_touch(Some((420.0, 310.0))).unwrap();
	assert!(g.scene.get(id).unwrap().position.z.abs() < 1e-2);
}
