//! Retained scene graph consumed by the renderer.
//!
//! Simulation code owns particle state and only pushes transforms and
//! opacity into the nodes it registered. Nodes live in an arena and are
//! addressed by [`NodeId`]; removed slots are reused.

use glam::{EulerRot, Mat4, Quat, Vec3};

use super::field::GalaxyPoint;
use crate::components::theme::Color;

/// Handle to a node registered in a [`Scene`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Shape drawn for a node.
#[derive(Clone, Debug)]
pub enum Geometry {
	/// Sphere of the given radius, drawn as a shaded disc.
	Sphere { radius: f32 },
	/// Point cloud in node-local coordinates, one square per point.
	Points { points: Vec<GalaxyPoint>, size: f32 },
	/// Unit heart outline, see [`super::hearts::HEART_OUTLINE`].
	Heart,
}

/// A drawable object with a transform.
#[derive(Clone, Debug)]
pub struct SceneNode {
	pub geometry: Geometry,
	pub color: Color,
	pub opacity: f64,
	pub position: Vec3,
	/// Euler angles in radians, applied X then Y then Z.
	pub rotation: Vec3,
	pub scale: f32,
	/// Blend additively instead of painting over.
	pub additive: bool,
}

impl SceneNode {
	pub fn new(geometry: Geometry, color: Color) -> Self {
		Self {
			geometry,
			color,
			opacity: 1.0,
			position: Vec3::ZERO,
			rotation: Vec3::ZERO,
			scale: 1.0,
			additive: false,
		}
	}

	pub fn model_matrix(&self) -> Mat4 {
		Mat4::from_scale_rotation_translation(
			Vec3::splat(self.scale),
			Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z),
			self.position,
		)
	}
}

/// Arena of scene nodes plus the clear color.
#[derive(Clone, Debug)]
pub struct Scene {
	pub background: Color,
	nodes: Vec<Option<SceneNode>>,
	free: Vec<usize>,
}

impl Scene {
	pub fn new(background: Color) -> Self {
		Self {
			background,
			nodes: Vec::new(),
			free: Vec::new(),
		}
	}

	/// Registers a node and returns its handle.
	pub fn add(&mut self, node: SceneNode) -> NodeId {
		match self.free.pop() {
			Some(slot) => {
				self.nodes[slot] = Some(node);
				NodeId(slot)
			}
			None => {
				self.nodes.push(Some(node));
				NodeId(self.nodes.len() - 1)
			}
		}
	}

	/// Unregisters a node. Returns `None` if the handle was already removed.
	pub fn remove(&mut self, id: NodeId) -> Option<SceneNode> {
		let node = self.nodes.get_mut(id.0)?.take()?;
		self.free.push(id.0);
		Some(node)
	}

	pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
		self.nodes.get(id.0)?.as_ref()
	}

	pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
		self.nodes.get_mut(id.0)?.as_mut()
	}

	pub fn len(&self) -> usize {
		self.nodes.len() - self.free.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
		self.nodes
			.iter()
			.enumerate()
			.filter_map(|(i, n)| n.as_ref().map(|n| (NodeId(i), n)))
	}
}
