//! Perspective camera and damped orbit controls.
//!
//! Uses OpenGL clip conventions (NDC depth in [-1, 1]) so screen coordinates
//! map the same way they do in common WebGL scene graphs.

use std::f32::consts::PI;

use glam::{Mat4, Vec3, Vec4Swizzles};

/// Perspective camera looking at a target point.
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
	/// Vertical field of view in degrees.
	pub fov_y: f32,
	pub aspect: f32,
	pub near: f32,
	pub far: f32,
	pub position: Vec3,
	pub target: Vec3,
}

/// A world-space point mapped onto the canvas.
#[derive(Clone, Copy, Debug)]
pub struct Projected {
	pub x: f64,
	pub y: f64,
	/// Distance along the view axis; larger is farther.
	pub depth: f32,
	/// Screen pixels covered by one world unit at this depth.
	pub pixels_per_unit: f64,
}

impl PerspectiveCamera {
	pub fn new(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
		Self {
			fov_y,
			aspect,
			near,
			far,
			position: Vec3::ZERO,
			target: Vec3::ZERO,
		}
	}

	pub fn view_matrix(&self) -> Mat4 {
		Mat4::look_at_rh(self.position, self.target, Vec3::Y)
	}

	pub fn projection_matrix(&self) -> Mat4 {
		Mat4::perspective_rh_gl(self.fov_y.to_radians(), self.aspect, self.near, self.far)
	}

	pub fn view_projection(&self) -> Mat4 {
		self.projection_matrix() * self.view_matrix()
	}

	/// Updates the aspect ratio for a new viewport size.
	pub fn set_viewport(&mut self, width: f64, height: f64) {
		self.aspect = (width / height.max(1.0)) as f32;
	}

	/// Maps a normalized device coordinate back into world space.
	pub fn unproject(&self, ndc: Vec3) -> Vec3 {
		self.view_projection().inverse().project_point3(ndc)
	}

	/// Maps a canvas pixel onto the `z = 0` world plane.
	///
	/// Casts a ray from the camera through the pixel at mid depth and
	/// intersects it with the plane. A ray parallel to the plane returns the
	/// mid-depth point itself.
	pub fn screen_to_plane(&self, sx: f64, sy: f64, width: f64, height: f64) -> Vec3 {
		let ndc = Vec3::new(
			((sx / width.max(1.0)) * 2.0 - 1.0) as f32,
			(-(sy / height.max(1.0)) * 2.0 + 1.0) as f32,
			0.5,
		);
		let point = self.unproject(ndc);
		let dir = (point - self.position).normalize_or_zero();
		if dir.z.abs() < 1e-6 {
			return point;
		}
		let distance = -self.position.z / dir.z;
		self.position + dir * distance
	}

	/// Projects a world point onto the canvas. `None` if it is behind the
	/// near plane.
	pub fn project(&self, world: Vec3, width: f64, height: f64) -> Option<Projected> {
		self.project_with(&self.view_projection(), world, width, height)
	}

	/// Same as [`project`](Self::project) with a precomputed view-projection.
	pub fn project_with(
		&self,
		view_projection: &Mat4,
		world: Vec3,
		width: f64,
		height: f64,
	) -> Option<Projected> {
		let clip = *view_projection * world.extend(1.0);
		if clip.w < self.near {
			return None;
		}
		let ndc = clip.xyz() / clip.w;
		let half_fov = (self.fov_y.to_radians() / 2.0).tan() as f64;
		Some(Projected {
			x: (ndc.x as f64 + 1.0) / 2.0 * width,
			y: (1.0 - ndc.y as f64) / 2.0 * height,
			depth: clip.w,
			pixels_per_unit: height / (2.0 * half_fov * clip.w as f64),
		})
	}
}

/// Camera offset from the orbit target in spherical coordinates.
#[derive(Clone, Copy, Debug)]
struct Spherical {
	radius: f32,
	/// Polar angle from +Y.
	phi: f32,
	/// Azimuth around +Y, measured from +Z.
	theta: f32,
}

impl Spherical {
	fn from_offset(v: Vec3) -> Self {
		let radius = v.length();
		if radius == 0.0 {
			return Self {
				radius,
				phi: 0.0,
				theta: 0.0,
			};
		}
		Self {
			radius,
			theta: v.x.atan2(v.z),
			phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
		}
	}

	fn to_offset(self) -> Vec3 {
		let sin_phi = self.phi.sin();
		Vec3::new(
			self.radius * sin_phi * self.theta.sin(),
			self.radius * self.phi.cos(),
			self.radius * sin_phi * self.theta.cos(),
		)
	}
}

const POLE_EPS: f32 = 1e-6;

/// What a pointer drag currently does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DragMode {
	Rotate,
	Pan,
}

/// Two-finger gesture state: finger spread and midpoint at the last event.
#[derive(Clone, Copy, Debug)]
struct Pinch {
	spread: f64,
	center: (f64, f64),
}

impl Pinch {
	fn between(a: (f64, f64), b: (f64, f64)) -> Self {
		Self {
			spread: (a.0 - b.0).hypot(a.1 - b.1),
			center: ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0),
		}
	}
}

/// Orbit navigation around a movable target on the galaxy plane.
///
/// Mouse: left drag rotates, right drag (or a modified left drag) pans and
/// the wheel dollies. Touch: one finger rotates; two fingers dolly with
/// their spread and pan with their midpoint. Panning keeps the target on
/// the `z = 0` plane. With damping on, input accumulates into deltas that
/// [`update`](Self::update) bleeds off a fraction at a time.
#[derive(Clone, Debug)]
pub struct OrbitControls {
	pub target: Vec3,
	pub enable_damping: bool,
	pub damping_factor: f32,
	pub min_distance: f32,
	pub max_distance: f32,
	pub rotate_speed: f32,
	pub zoom_speed: f32,
	pub pan_speed: f32,
	/// Vertical field of view in degrees, used to scale pans to the view.
	fov_y: f32,
	spherical: Spherical,
	delta_theta: f32,
	delta_phi: f32,
	scale: f32,
	pan_offset: Vec3,
	drag_from: Option<(f64, f64)>,
	drag_mode: DragMode,
	pinch: Option<Pinch>,
}

impl OrbitControls {
	/// Controls orbiting `camera`'s current target from its current position.
	pub fn new(camera: &PerspectiveCamera) -> Self {
		Self {
			target: camera.target,
			enable_damping: true,
			damping_factor: 0.05,
			min_distance: 20.0,
			max_distance: 500.0,
			rotate_speed: 1.0,
			zoom_speed: 1.0,
			pan_speed: 1.0,
			fov_y: camera.fov_y,
			spherical: Spherical::from_offset(camera.position - camera.target),
			delta_theta: 0.0,
			delta_phi: 0.0,
			scale: 1.0,
			pan_offset: Vec3::ZERO,
			drag_from: None,
			drag_mode: DragMode::Rotate,
			pinch: None,
		}
	}

	pub fn distance(&self) -> f32 {
		self.spherical.radius
	}

	pub fn rotate_left(&mut self, angle: f32) {
		self.delta_theta -= angle;
	}

	pub fn rotate_up(&mut self, angle: f32) {
		self.delta_phi -= angle;
	}

	/// Starts a rotating drag.
	pub fn pointer_down(&mut self, x: f64, y: f64) {
		self.drag_from = Some((x, y));
		self.drag_mode = DragMode::Rotate;
	}

	/// Starts a panning drag.
	pub fn pan_down(&mut self, x: f64, y: f64) {
		self.drag_from = Some((x, y));
		self.drag_mode = DragMode::Pan;
	}

	/// Follows the active drag. When rotating, a full viewport height is
	/// one turn; when panning, the point under the pointer follows it.
	pub fn pointer_move(&mut self, x: f64, y: f64, viewport_height: f64) {
		let Some((px, py)) = self.drag_from else {
			return;
		};
		match self.drag_mode {
			DragMode::Rotate => {
				let h = viewport_height.max(1.0);
				self.rotate_left(2.0 * PI * ((x - px) / h) as f32 * self.rotate_speed);
				self.rotate_up(2.0 * PI * ((y - py) / h) as f32 * self.rotate_speed);
			}
			DragMode::Pan => self.pan(x - px, y - py, viewport_height),
		}
		self.drag_from = Some((x, y));
	}

	pub fn pointer_up(&mut self) {
		self.drag_from = None;
	}

	/// Wheel input: positive `delta_y` moves away from the target.
	pub fn wheel(&mut self, delta_y: f64) {
		let step = 0.95_f32.powf(self.zoom_speed);
		if delta_y > 0.0 {
			self.scale /= step;
		} else if delta_y < 0.0 {
			self.scale *= step;
		}
	}

	/// Pans by a screen-space drag of `(dx, dy)` pixels.
	///
	/// The camera's right and up axes are flattened onto the galaxy plane,
	/// so the target never leaves `z = 0`. One pixel moves the target by the
	/// world size of a pixel at the target's depth.
	pub fn pan(&mut self, dx: f64, dy: f64, viewport_height: f64) {
		let h = viewport_height.max(1.0) as f32;
		let world_per_pixel =
			2.0 * self.spherical.radius * (self.fov_y.to_radians() / 2.0).tan() / h * self.pan_speed;

		let theta = self.spherical.theta;
		let right = Vec3::new(theta.cos(), 0.0, -theta.sin());
		let forward = -self.spherical.to_offset().normalize_or_zero();
		let up = right.cross(forward);

		let mut offset = -right * dx as f32 * world_per_pixel + up * dy as f32 * world_per_pixel;
		offset.z = 0.0;
		self.pan_offset += offset;
	}

	/// Resets gesture state to the fingers currently down.
	///
	/// Call on `touchstart`, `touchend` and `touchcancel` with the remaining
	/// touches. One finger starts a rotation, two start a pinch.
	pub fn touches_changed(&mut self, points: &[(f64, f64)]) {
		match points {
			[] => {
				self.pointer_up();
				self.pinch = None;
			}
			[p] => {
				self.pinch = None;
				self.pointer_down(p.0, p.1);
			}
			[a, b, ..] => {
				self.pointer_up();
				self.pinch = Some(Pinch::between(*a, *b));
			}
		}
	}

	/// Follows a `touchmove` with the fingers currently down.
	pub fn touch_move(&mut self, points: &[(f64, f64)], viewport_height: f64) {
		match points {
			[] => {}
			[p] => self.pointer_move(p.0, p.1, viewport_height),
			[a, b, ..] => self.pinch_move(*a, *b, viewport_height),
		}
	}

	/// Dollies by the change in finger spread and pans by the midpoint's
	/// travel. Spreading the fingers moves toward the target, on the same
	/// scale the wheel drives.
	fn pinch_move(&mut self, a: (f64, f64), b: (f64, f64), viewport_height: f64) {
		let now = Pinch::between(a, b);
		let Some(before) = self.pinch.replace(now) else {
			return;
		};
		if before.spread > 0.0 && now.spread > 0.0 {
			self.scale *= ((before.spread / now.spread) as f32).powf(self.zoom_speed);
		}
		self.pan(
			now.center.0 - before.center.0,
			now.center.1 - before.center.1,
			viewport_height,
		);
	}

	/// Applies pending input and moves `camera`.
	pub fn update(&mut self, camera: &mut PerspectiveCamera) {
		if self.enable_damping {
			self.spherical.theta += self.delta_theta * self.damping_factor;
			self.spherical.phi += self.delta_phi * self.damping_factor;
			self.target += self.pan_offset * self.damping_factor;
		} else {
			self.spherical.theta += self.delta_theta;
			self.spherical.phi += self.delta_phi;
			self.target += self.pan_offset;
		}
		self.spherical.phi = self.spherical.phi.clamp(POLE_EPS, PI - POLE_EPS);
		self.spherical.radius =
			(self.spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

		camera.position = self.target + self.spherical.to_offset();
		camera.target = self.target;

		if self.enable_damping {
			self.delta_theta *= 1.0 - self.damping_factor;
			self.delta_phi *= 1.0 - self.damping_factor;
			self.pan_offset *= 1.0 - self.damping_factor;
		} else {
			self.delta_theta = 0.0;
			self.delta_phi = 0.0;
			self.pan_offset = Vec3::ZERO;
		}
		self.scale = 1.0;
	}
}
