//! Canvas rendering for the galaxy scene.
//!
//! Projects the scene through the camera and paints it in passes:
//! 1. Clear to the scene background, then the light halo at the origin
//! 2. Point clouds, additively blended
//! 3. Solid nodes (orb, hearts) back to front
//!
//! Hearts are flat shapes in their node's XY plane. Each one is drawn through
//! the 2D affine map that best matches its projection at the node origin, so
//! it foreshortens as the camera orbits.

use std::f64::consts::PI;

use glam::{Mat4, Vec3};
use web_sys::CanvasRenderingContext2d;

use super::camera::{PerspectiveCamera, Projected};
use super::field::GalaxyPoint;
use super::hearts::{HEART_OUTLINE, HEART_START};
use super::scene::{Geometry, Scene, SceneNode};
use crate::components::theme::{Color, GalaxyTheme};

/// Renders the complete scene to the canvas.
pub fn render(
	scene: &Scene,
	camera: &PerspectiveCamera,
	ctx: &CanvasRenderingContext2d,
	width: f64,
	height: f64,
	theme: &GalaxyTheme,
) {
	let view_projection = camera.view_projection();

	ctx.set_fill_style_str(&scene.background.to_css());
	ctx.fill_rect(0.0, 0.0, width, height);

	if theme.light_intensity > 0.0 {
		draw_light(camera, &view_projection, ctx, width, height, theme);
	}

	for (_, node) in scene.iter() {
		if let Geometry::Points { points, size } = &node.geometry {
			draw_points(camera, &view_projection, ctx, width, height, node, points, *size);
		}
	}

	let mut solids: Vec<(&SceneNode, Projected)> = scene
		.iter()
		.filter(|(_, n)| !matches!(n.geometry, Geometry::Points { .. }))
		.filter_map(|(_, n)| {
			camera
				.project_with(&view_projection, n.position, width, height)
				.map(|p| (n, p))
		})
		.collect();
	solids.sort_by(|a, b| b.1.depth.total_cmp(&a.1.depth));

	for (node, projected) in solids {
		match node.geometry {
			Geometry::Sphere { radius } => draw_sphere(ctx, node, radius, &projected),
			Geometry::Heart => {
				if let Some(basis) = plane_basis(camera, &view_projection, node, width, height) {
					draw_heart(ctx, node, basis);
				}
			}
			Geometry::Points { .. } => {}
		}
	}
}

fn draw_light(
	camera: &PerspectiveCamera,
	view_projection: &Mat4,
	ctx: &CanvasRenderingContext2d,
	width: f64,
	height: f64,
	theme: &GalaxyTheme,
) {
	let Some(center) = camera.project_with(view_projection, Vec3::ZERO, width, height) else {
		return;
	};
	let radius = theme.light_distance as f64 * center.pixels_per_unit;
	let Ok(gradient) = ctx.create_radial_gradient(center.x, center.y, 0.0, center.x, center.y, radius)
	else {
		return;
	};
	let _ = gradient.add_color_stop(0.0, &theme.light.with_alpha(theme.light_intensity).to_css());
	let _ = gradient.add_color_stop(1.0, "rgba(0, 0, 0, 0)");

	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, width, height);
}

#[allow(clippy::too_many_arguments)]
fn draw_points(
	camera: &PerspectiveCamera,
	view_projection: &Mat4,
	ctx: &CanvasRenderingContext2d,
	width: f64,
	height: f64,
	node: &SceneNode,
	points: &[GalaxyPoint],
	size: f32,
) {
	let mvp = *view_projection * node.model_matrix();

	ctx.save();
	if node.additive {
		let _ = ctx.set_global_composite_operation("lighter");
	}
	ctx.set_global_alpha(node.opacity);

	let mut last_color: Option<Color> = None;
	for p in points {
		let Some(projected) = camera.project_with(&mvp, p.position, width, height) else {
			continue;
		};
		let side = (size as f64 * node.scale as f64 * projected.pixels_per_unit).max(0.5);
		if last_color != Some(p.color) {
			ctx.set_fill_style_str(&p.color.to_css());
			last_color = Some(p.color);
		}
		ctx.fill_rect(
			projected.x - side / 2.0,
			projected.y - side / 2.0,
			side,
			side,
		);
	}

	ctx.restore();
}

fn draw_sphere(ctx: &CanvasRenderingContext2d, node: &SceneNode, radius: f32, p: &Projected) {
	let r = radius as f64 * node.scale as f64 * p.pixels_per_unit;
	if r < 0.5 {
		return;
	}

	ctx.set_global_alpha(node.opacity);

	// Slow drift of the highlight so the orb's spin reads on a flat disc
	let (hx, hy) = (
		node.rotation.y.sin() as f64 * r * 0.3,
		node.rotation.x.cos() as f64 * r * -0.3,
	);
	match ctx.create_radial_gradient(p.x + hx, p.y + hy, 0.0, p.x, p.y, r) {
		Ok(gradient) => {
			let _ = gradient.add_color_stop(0.0, &node.color.lighten(0.4).to_css());
			let _ = gradient.add_color_stop(0.7, &node.color.to_css());
			let _ = gradient.add_color_stop(1.0, &node.color.darken(0.2).to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		Err(_) => ctx.set_fill_style_str(&node.color.to_css()),
	}

	ctx.begin_path();
	let _ = ctx.arc(p.x, p.y, r, 0.0, 2.0 * PI);
	ctx.fill();

	ctx.set_global_alpha(1.0);
}

/// Canvas transform `[a, b, c, d, e, f]` taking the node's local XY plane
/// to screen pixels, linearized at the node origin. `None` when any of the
/// sample points is behind the camera.
fn plane_basis(
	camera: &PerspectiveCamera,
	view_projection: &Mat4,
	node: &SceneNode,
	width: f64,
	height: f64,
) -> Option<[f64; 6]> {
	let model = node.model_matrix();
	let at = |local: Vec3| {
		camera.project_with(view_projection, model.transform_point3(local), width, height)
	};
	let o = at(Vec3::ZERO)?;
	let x = at(Vec3::X)?;
	let y = at(Vec3::Y)?;
	Some([x.x - o.x, x.y - o.y, y.x - o.x, y.y - o.y, o.x, o.y])
}

fn draw_heart(ctx: &CanvasRenderingContext2d, node: &SceneNode, basis: [f64; 6]) {
	if node.opacity <= 0.0 {
		return;
	}
	let [a, b, c, d, e, f] = basis;

	ctx.save();
	let _ = ctx.transform(a, b, c, d, e, f);

	ctx.begin_path();
	ctx.move_to(HEART_START.0, HEART_START.1);
	for ((c1x, c1y), (c2x, c2y), (x, y)) in HEART_OUTLINE {
		ctx.bezier_curve_to(c1x, c1y, c2x, c2y, x, y);
	}
	ctx.close_path();

	ctx.set_fill_style_str(&node.color.with_alpha(node.opacity).to_css());
	ctx.fill();
	ctx.restore();
}

#[cfg(test)]
mod tests {
	use super::*;

	fn camera_at(position: Vec3) -> PerspectiveCamera {
		let mut cam = PerspectiveCamera::new(75.0, 800.0 / 600.0, 0.1, 1000.0);
		cam.position = position;
		cam
	}

	fn heart(scale: f32) -> SceneNode {
		let mut node = SceneNode::new(Geometry::Heart, Color::hex(0xff0000));
		node.scale = scale;
		node
	}

	#[test]
	fn test_facing_heart_maps_plane_to_screen() {
		let cam = camera_at(Vec3::new(0.0, 0.0, 200.0));
		let vp = cam.view_projection();
		let [a, b, c, d, e, f] = plane_basis(&cam, &vp, &heart(2.0), 800.0, 600.0).unwrap();
		let ppu = cam.project(Vec3::ZERO, 800.0, 600.0).unwrap().pixels_per_unit;

		assert!((a - 2.0 * ppu).abs() < 1e-3, "{a} vs {ppu}");
		assert!(b.abs() < 1e-3 && c.abs() < 1e-3);
		// world +Y is screen up
		assert!((d + 2.0 * ppu).abs() < 1e-3);
		assert!((e - 400.0).abs() < 1e-3 && (f - 300.0).abs() < 1e-3);
	}

	#[test]
	fn test_edge_on_heart_is_squashed() {
		let cam = camera_at(Vec3::new(200.0, 0.0, 0.0));
		let vp = cam.view_projection();
		let [a, b, c, d, ..] = plane_basis(&cam, &vp, &heart(2.0), 800.0, 600.0).unwrap();
		assert!(a.hypot(b) < 0.05 * c.hypot(d), "{a} {b} {c} {d}");
	}

	#[test]
	fn test_heart_behind_camera_has_no_basis() {
		let cam = camera_at(Vec3::new(0.0, 0.0, 200.0));
		let vp = cam.view_projection();
		let mut node = heart(1.0);
		node.position = Vec3::new(0.0, 0.0, 400.0);
		assert!(plane_basis(&cam, &vp, &node, 800.0, 600.0).is_none());
	}
}
