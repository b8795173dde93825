/// Geometry primitives for shape meshes
use nalgebra::{Matrix3, Matrix4, Point2, Point3, Vector3};

/// RGBA color with components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
    pub const CYAN: Color = Color::rgb(0.0, 1.0, 1.0);
    pub const MAGENTA: Color = Color::rgb(1.0, 0.0, 1.0);
    pub const GREY: Color = Color::rgb(0.5, 0.5, 0.5);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Perceived brightness, used by the terminal surface for shading
    pub fn luminance(&self) -> f32 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// A vertex in model space with normal, color and optional texture coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
    pub color: Color,
    pub uv: Option<Point2<f32>>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>, color: Color) -> Self {
        Self {
            position,
            normal,
            color,
            uv: None,
        }
    }

    pub fn with_uv(mut self, u: f32, v: f32) -> Self {
        self.uv = Some(Point2::new(u, v));
        self
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Build a flat-shaded triangle: all three vertices share the face normal and color
    pub fn flat(p0: Point3<f32>, p1: Point3<f32>, p2: Point3<f32>, color: Color) -> Self {
        let normal = face_normal(&p0, &p1, &p2);
        Self::new(
            Vertex::new(p0, normal, color),
            Vertex::new(p1, normal, color),
            Vertex::new(p2, normal, color),
        )
    }

    /// Calculate the face normal from the triangle's vertices
    pub fn calculate_normal(&self) -> Vector3<f32> {
        face_normal(
            &self.vertices[0].position,
            &self.vertices[1].position,
            &self.vertices[2].position,
        )
    }

    pub fn centroid(&self) -> Point3<f32> {
        let sum = self.vertices[0].position.coords
            + self.vertices[1].position.coords
            + self.vertices[2].position.coords;
        Point3::from(sum / 3.0)
    }
}

/// Counter-clockwise face normal; zero for degenerate triangles
fn face_normal(p0: &Point3<f32>, p1: &Point3<f32>, p2: &Point3<f32>) -> Vector3<f32> {
    let edge1 = p1 - p0;
    let edge2 = p2 - p0;
    edge1
        .cross(&edge2)
        .try_normalize(1e-12)
        .unwrap_or_else(Vector3::zeros)
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn extend(&mut self, other: Mesh) {
        self.triangles.extend(other.triangles);
    }

    /// Number of vertices, counting each triangle corner separately
    pub fn vertex_count(&self) -> usize {
        self.triangles.len() * 3
    }

    /// Vertex by flat index (`triangle * 3 + corner`)
    pub fn vertex(&self, index: usize) -> Option<&Vertex> {
        self.triangles
            .get(index / 3)
            .map(|triangle| &triangle.vertices[index % 3])
    }

    /// Apply an affine matrix to every vertex. Normals go through the
    /// inverse-transpose of the linear part so non-uniform scales keep them perpendicular.
    pub fn transformed(&self, matrix: &Matrix4<f32>) -> Mesh {
        let linear: Matrix3<f32> = matrix.fixed_view::<3, 3>(0, 0).into_owned();
        let normal_matrix = linear
            .try_inverse()
            .map(|inverse| inverse.transpose())
            .unwrap_or(linear);

        let triangles = self
            .triangles
            .iter()
            .map(|triangle| {
                let mut out = triangle.clone();
                for vertex in &mut out.vertices {
                    vertex.position = matrix.transform_point(&vertex.position);
                    vertex.normal = (normal_matrix * vertex.normal)
                        .try_normalize(1e-12)
                        .unwrap_or_else(Vector3::zeros);
                }
                out
            })
            .collect();

        Mesh { triangles }
    }

    /// Axis-aligned bounds as (min, max), or None for an empty mesh
    pub fn bounds(&self) -> Option<(Point3<f32>, Point3<f32>)> {
        let mut positions = self
            .triangles
            .iter()
            .flat_map(|triangle| triangle.vertices.iter().map(|v| v.position));
        let first = positions.next()?;
        Some(positions.fold((first, first), |(min, max), p| {
            (min.inf(&p), max.sup(&p))
        }))
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Triangle {
        Triangle::flat(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Color::RED,
        )
    }

    #[test]
    fn test_flat_triangle_normal() {
        let triangle = unit_triangle();
        assert!((triangle.calculate_normal() - Vector3::z()).norm() < 1e-6);
        assert!((triangle.vertices[2].normal - Vector3::z()).norm() < 1e-6);
    }

    #[test]
    fn test_degenerate_triangle_has_zero_normal() {
        let p = Point3::new(1.0, 1.0, 1.0);
        let triangle = Triangle::flat(p, p, p, Color::WHITE);
        assert_eq!(triangle.calculate_normal(), Vector3::zeros());
    }

    #[test]
    fn test_flat_vertex_index() {
        let mut mesh = Mesh::new();
        mesh.add_triangle(unit_triangle());
        mesh.add_triangle(unit_triangle());
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.vertex(4).unwrap().position, Point3::new(1.0, 0.0, 0.0));
        assert!(mesh.vertex(6).is_none());
    }

    #[test]
    fn test_transformed_keeps_normals_perpendicular() {
        let mut mesh = Mesh::new();
        mesh.add_triangle(unit_triangle());
        let matrix = Matrix4::new_nonuniform_scaling(&Vector3::new(2.0, 1.0, 3.0));
        let out = mesh.transformed(&matrix);
        let triangle = &out.triangles[0];
        assert_eq!(triangle.vertices[1].position, Point3::new(2.0, 0.0, 0.0));
        assert!((triangle.vertices[0].normal - Vector3::z()).norm() < 1e-6);
    }

    #[test]
    fn test_bounds() {
        let mut mesh = Mesh::new();
        assert!(mesh.bounds().is_none());
        mesh.add_triangle(unit_triangle());
        let (min, max) = mesh.bounds().unwrap();
        assert_eq!(min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(max, Point3::new(1.0, 1.0, 0.0));
    }
}
