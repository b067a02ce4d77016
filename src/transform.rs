use crate::components::Component;
use crate::entities::Entity;
use nalgebra_glm as glm;
use glm::{Mat4, Quat, Vec3};

/// Position, rotation and scale of an entity.
///
/// The rotation is stored as given; callers are responsible for keeping it normalized.
/// `parent` is a plain handle resolved through the [World](crate::world::World), so
/// destroying the parent simply turns this transform into a root.
#[derive(Component, Copy, Clone, Debug, PartialEq)]
pub struct Transform {
	pub position: Vec3,
	pub rotation: Quat,
	pub scale: Vec3,
	pub parent: Option<Entity>,
}

impl Default for Transform {
	fn default() -> Self {
		Self {
			position: Vec3::zeros(),
			rotation: glm::quat_identity(),
			scale: Vec3::new(1.0, 1.0, 1.0),
			parent: None,
		}
	}
}

impl Transform {
	pub fn from_position(position: Vec3) -> Self {
		Self {
			position,
			..Self::default()
		}
	}

	/// Same transform, nested under `parent`.
	pub fn with_parent(self, parent: Entity) -> Self {
		Self {
			parent: Some(parent),
			..self
		}
	}

	pub fn translate(&mut self, translation: &Vec3) {
		self.position += translation;
	}

	/// Apply `rotation` on top of the current rotation.
	pub fn rotate(&mut self, rotation: &Quat) {
		self.rotation = rotation * self.rotation;
	}

	pub fn forward(&self) -> Vec3 {
		glm::quat_rotate_vec3(&self.rotation, &Vec3::new(0.0, 0.0, 1.0))
	}

	pub fn right(&self) -> Vec3 {
		glm::quat_rotate_vec3(&self.rotation, &Vec3::new(1.0, 0.0, 0.0))
	}

	pub fn up(&self) -> Vec3 {
		glm::quat_rotate_vec3(&self.rotation, &Vec3::new(0.0, 1.0, 0.0))
	}

	/// Translation * rotation * scale, ignoring the parent.
	pub fn local_matrix(&self) -> Mat4 {
		glm::translation(&self.position) * glm::quat_to_mat4(&self.rotation) * glm::scaling(&self.scale)
	}
}
