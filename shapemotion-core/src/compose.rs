/// Shape composer: bake several shapes into one rigid mesh
use log::debug;
use nalgebra::{Matrix4, Vector3};

use crate::error::{Result, ShapeError};
use crate::geometry::Mesh;
use crate::shape::Shape;
use crate::transform::Rotation;

/// Placement of one part inside a composite, applied scale, then rotate, then translate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartOffset {
    pub scale: Vector3<f32>,
    pub rotation: Rotation,
    pub translation: Vector3<f32>,
}

impl PartOffset {
    pub fn identity() -> Self {
        Self {
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation: Rotation::identity(),
            translation: Vector3::zeros(),
        }
    }

    pub fn new(scale: Vector3<f32>, rotation: Rotation, translation: Vector3<f32>) -> Self {
        Self {
            scale,
            rotation,
            translation,
        }
    }

    pub fn translated(x: f32, y: f32, z: f32) -> Self {
        Self {
            translation: Vector3::new(x, y, z),
            ..Self::identity()
        }
    }

    pub fn with_scale(mut self, x: f32, y: f32, z: f32) -> Self {
        self.scale = Vector3::new(x, y, z);
        self
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::new_translation(&self.translation)
            * self.rotation.to_rotation3().to_homogeneous()
            * Matrix4::new_nonuniform_scaling(&self.scale)
    }

    fn validate(&self) -> Result<()> {
        if self.scale.iter().any(|s| *s == 0.0) {
            return Err(ShapeError::ZeroScale(self.scale.x, self.scale.y, self.scale.z));
        }
        Ok(())
    }
}

impl Default for PartOffset {
    fn default() -> Self {
        Self::identity()
    }
}

/// Join shapes into one flat shape.
///
/// Each source contributes its model-space triangles moved by its offset; the
/// sources' own transforms and textures are not carried over. Triangle order
/// follows the input order, so identical inputs give identical meshes.
pub fn join_shapes(id: impl Into<String>, shapes: &[&Shape], offsets: &[PartOffset]) -> Result<Shape> {
    if shapes.len() != offsets.len() {
        return Err(ShapeError::MismatchedOffsets {
            shapes: shapes.len(),
            offsets: offsets.len(),
        });
    }
    if shapes.is_empty() {
        return Err(ShapeError::NothingToJoin);
    }
    for offset in offsets {
        offset.validate()?;
    }

    let capacity = shapes.iter().map(|shape| shape.triangles().len()).sum();
    let mut mesh = Mesh::with_capacity(capacity);
    for (shape, offset) in shapes.iter().zip(offsets) {
        mesh.extend(shape.posed_mesh().transformed(&offset.matrix()));
    }

    let id = id.into();
    debug!(
        "joined {} shapes into {:?} ({} triangles)",
        shapes.len(),
        id,
        mesh.triangles.len()
    );
    Ok(Shape::new(id, mesh))
}

/// Two-part join; the common case of an origin shape plus one attachment
pub fn join_two(
    id: impl Into<String>,
    first: &Shape,
    first_offset: PartOffset,
    second: &Shape,
    second_offset: PartOffset,
) -> Result<Shape> {
    join_shapes(id, &[first, second], &[first_offset, second_offset])
}
