/// Named, transformable triangle meshes
use std::borrow::Cow;
use std::sync::Arc;

use nalgebra::{Point3, Vector3};

use crate::error::{Result, ShapeError};
use crate::geometry::{Mesh, Triangle};
use crate::texture::Texture;
use crate::transform::Transform;

/// A shape owns a fixed triangle set; only its transform and per-vertex
/// deformation change after construction.
#[derive(Debug, Clone)]
pub struct Shape {
    id: String,
    mesh: Arc<Mesh>,
    texture: Option<Arc<Texture>>,
    pub transform: Transform,
    /// Per-vertex displacement in model space, indexed like `Mesh::vertex`.
    /// Empty until something deforms the shape.
    vertex_offsets: Vec<Vector3<f32>>,
}

impl Shape {
    pub fn new(id: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            id: id.into(),
            mesh: Arc::new(mesh),
            texture: None,
            transform: Transform::identity(),
            vertex_offsets: Vec::new(),
        }
    }

    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.mesh.triangles
    }

    pub fn texture(&self) -> Option<&Arc<Texture>> {
        self.texture.as_ref()
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    /// Undeformed model-space position of a vertex
    pub fn base_position(&self, index: usize) -> Result<Point3<f32>> {
        self.mesh
            .vertex(index)
            .map(|vertex| vertex.position)
            .ok_or(ShapeError::VertexOutOfRange {
                index,
                count: self.vertex_count(),
            })
    }

    pub fn vertex_offset(&self, index: usize) -> Vector3<f32> {
        self.vertex_offsets
            .get(index)
            .copied()
            .unwrap_or_else(Vector3::zeros)
    }

    /// Displace one vertex by `delta`, accumulating with earlier displacements
    pub fn offset_vertex(&mut self, index: usize, delta: &Vector3<f32>) -> Result<()> {
        let count = self.vertex_count();
        if index >= count {
            return Err(ShapeError::VertexOutOfRange { index, count });
        }
        if self.vertex_offsets.is_empty() {
            self.vertex_offsets = vec![Vector3::zeros(); count];
        }
        self.vertex_offsets[index] += delta;
        Ok(())
    }

    pub fn is_deformed(&self) -> bool {
        self.vertex_offsets.iter().any(|offset| *offset != Vector3::zeros())
    }

    pub fn reset_deformation(&mut self) {
        self.vertex_offsets.clear();
    }

    /// Model-space mesh with vertex offsets applied
    pub fn posed_mesh(&self) -> Cow<'_, Mesh> {
        if self.vertex_offsets.is_empty() {
            return Cow::Borrowed(self.mesh());
        }

        let mut mesh = (*self.mesh).clone();
        for (i, triangle) in mesh.triangles.iter_mut().enumerate() {
            for (corner, vertex) in triangle.vertices.iter_mut().enumerate() {
                vertex.position += self.vertex_offsets[i * 3 + corner];
            }
        }
        Cow::Owned(mesh)
    }

    /// Posed mesh moved into world space by the shape's transform
    pub fn world_mesh(&self) -> Mesh {
        self.posed_mesh().transformed(&self.transform.model_matrix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Color;

    fn single_triangle() -> Shape {
        let mut mesh = Mesh::new();
        mesh.add_triangle(Triangle::flat(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Color::GREEN,
        ));
        Shape::new("tri", mesh)
    }

    #[test]
    fn test_offsets_leave_base_mesh_untouched() {
        let mut shape = single_triangle();
        shape.offset_vertex(1, &Vector3::new(0.0, 0.0, 2.0)).unwrap();
        shape.offset_vertex(1, &Vector3::new(0.0, 0.0, 1.0)).unwrap();

        assert_eq!(shape.base_position(1).unwrap(), Point3::new(1.0, 0.0, 0.0));
        let posed = shape.posed_mesh();
        assert_eq!(posed.triangles[0].vertices[1].position, Point3::new(1.0, 0.0, 3.0));
        assert!(shape.is_deformed());

        shape.reset_deformation();
        assert!(!shape.is_deformed());
    }

    #[test]
    fn test_offset_out_of_range() {
        let mut shape = single_triangle();
        assert_eq!(
            shape.offset_vertex(3, &Vector3::x()),
            Err(ShapeError::VertexOutOfRange { index: 3, count: 3 })
        );
    }

    #[test]
    fn test_world_mesh_applies_transform() {
        let mut shape = single_triangle();
        shape.transform.set_translation(0.0, 0.0, -4.0);
        let world = shape.world_mesh();
        assert_eq!(world.triangles[0].vertices[0].position, Point3::new(0.0, 0.0, -4.0));
    }
}
