/// Shape factory: primitive and composite meshes
///
/// Convex solids are centred on the origin with Y up. Colors are given per
/// face (one entry per face, in the order documented on each constructor) or as
/// a single color for the whole shape.
use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::ops::Range;

use nalgebra::{Point3, Vector3};

use crate::compose::{join_shapes, PartOffset};
use crate::error::{Result, ShapeError};
use crate::geometry::{Color, Mesh, Triangle, Vertex};
use crate::shape::Shape;
use crate::texture::TextureAssets;
use crate::transform::Rotation;

/// Expand a color list to exactly `faces` entries
fn face_colors(colors: &[Color], faces: usize) -> Result<Vec<Color>> {
    match colors.len() {
        1 => Ok(vec![colors[0]; faces]),
        n if n == faces => Ok(colors.to_vec()),
        n => Err(ShapeError::MismatchedColors {
            expected: faces,
            got: n,
        }),
    }
}

fn positive(name: &str, value: f32) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ShapeError::InvalidPrimitive(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}

fn min_count(name: &str, value: usize, min: usize) -> Result<()> {
    if value >= min {
        Ok(())
    } else {
        Err(ShapeError::InvalidPrimitive(format!(
            "{} must be at least {}, got {}",
            name, min, value
        )))
    }
}

/// Add a flat triangle wound so its normal points away from the origin.
/// Degenerate triangles (collapsed at sphere poles) are dropped.
fn push_outward(mesh: &mut Mesh, p0: Point3<f32>, p1: Point3<f32>, p2: Point3<f32>, color: Color) {
    let mut triangle = Triangle::flat(p0, p1, p2, color);
    let normal = triangle.calculate_normal();
    if normal == Vector3::zeros() {
        return;
    }
    if normal.dot(&triangle.centroid().coords) < 0.0 {
        triangle = Triangle::flat(p0, p2, p1, color);
    }
    mesh.add_triangle(triangle);
}

fn push_quad(mesh: &mut Mesh, quad: [Point3<f32>; 4], color: Color) {
    push_outward(mesh, quad[0], quad[1], quad[2], color);
    push_outward(mesh, quad[0], quad[2], quad[3], color);
}

/// Regular polygon of `sides` points around the Y axis at height `y`
fn ring(sides: usize, radius: f32, y: f32) -> Vec<Point3<f32>> {
    (0..sides)
        .map(|i| {
            let theta = TAU * i as f32 / sides as f32;
            Point3::new(radius * theta.sin(), y, radius * theta.cos())
        })
        .collect()
}

/// Point on a sphere: `phi` from the north pole, `theta` around Y
fn sphere_point(radius: f32, phi: f32, theta: f32) -> Point3<f32> {
    // Exact poles so the collapsed band triangles are recognised as degenerate
    let (sin_phi, cos_phi) = if phi <= 0.0 {
        (0.0, 1.0)
    } else if phi >= PI {
        (0.0, -1.0)
    } else {
        phi.sin_cos()
    };
    Point3::new(
        radius * sin_phi * theta.sin(),
        radius * cos_phi,
        radius * sin_phi * theta.cos(),
    )
}

/// Vertex ranges and hinge axes of a bird's wings, for flapping
#[derive(Debug, Clone)]
pub struct BirdParts {
    pub shape: Shape,
    pub left_wing: Range<usize>,
    pub right_wing: Range<usize>,
    pub left_hinge: (Point3<f32>, Point3<f32>),
    pub right_hinge: (Point3<f32>, Point3<f32>),
}

/// Builds shapes; textured constructors resolve names against injected assets
pub struct ShapeFactory<'a> {
    textures: &'a TextureAssets,
}

impl<'a> ShapeFactory<'a> {
    pub fn new(textures: &'a TextureAssets) -> Self {
        Self { textures }
    }

    /// Wrap an existing mesh, e.g. one loaded from STL
    pub fn from_mesh(&self, id: &str, mesh: Mesh) -> Shape {
        Shape::new(id, mesh)
    }

    /// Triangle in the XY plane facing +Z
    pub fn triangle(&self, id: &str, colors: &[Color]) -> Result<Shape> {
        let colors = face_colors(colors, 1)?;
        let mut mesh = Mesh::with_capacity(1);
        mesh.add_triangle(Triangle::flat(
            Point3::new(-0.5, -0.5, 0.0),
            Point3::new(0.5, -0.5, 0.0),
            Point3::new(0.0, 0.5, 0.0),
            colors[0],
        ));
        Ok(Shape::new(id, mesh))
    }

    pub fn square(&self, id: &str, colors: &[Color]) -> Result<Shape> {
        self.rectangle(id, 1.0, 1.0, colors)
    }

    /// Rectangle in the XY plane facing +Z, with texture coordinates
    pub fn rectangle(&self, id: &str, width: f32, height: f32, colors: &[Color]) -> Result<Shape> {
        positive("width", width)?;
        positive("height", height)?;
        let colors = face_colors(colors, 1)?;
        let (w, h) = (width / 2.0, height / 2.0);
        let normal = Vector3::z();
        let corner = |x: f32, y: f32, u: f32, v: f32| {
            Vertex::new(Point3::new(x, y, 0.0), normal, colors[0]).with_uv(u, v)
        };

        let mut mesh = Mesh::with_capacity(2);
        mesh.add_triangle(Triangle::new(
            corner(-w, -h, 0.0, 1.0),
            corner(w, -h, 1.0, 1.0),
            corner(w, h, 1.0, 0.0),
        ));
        mesh.add_triangle(Triangle::new(
            corner(-w, -h, 0.0, 1.0),
            corner(w, h, 1.0, 0.0),
            corner(-w, h, 0.0, 0.0),
        ));
        Ok(Shape::new(id, mesh))
    }

    /// Unit square carrying a named texture
    pub fn textured_square(&self, id: &str, texture: &str) -> Result<Shape> {
        let texture = self.textures.get(texture)?;
        Ok(self.square(id, &[Color::WHITE])?.with_texture(texture))
    }

    /// Regular polygon in the XY plane facing +Z
    pub fn polygon(&self, id: &str, sides: usize, radius: f32, colors: &[Color]) -> Result<Shape> {
        min_count("sides", sides, 3)?;
        positive("radius", radius)?;
        let colors = face_colors(colors, 1)?;

        let center = Point3::origin();
        let points: Vec<_> = (0..sides)
            .map(|i| {
                let theta = TAU * i as f32 / sides as f32;
                Point3::new(radius * theta.cos(), radius * theta.sin(), 0.0)
            })
            .collect();

        let mut mesh = Mesh::with_capacity(sides);
        for i in 0..sides {
            let next = points[(i + 1) % sides];
            mesh.add_triangle(Triangle::flat(center, points[i], next, colors[0]));
        }
        Ok(Shape::new(id, mesh))
    }

    pub fn cube(&self, id: &str, size: f32, colors: &[Color]) -> Result<Shape> {
        self.cuboid(id, size, size, size, colors)
    }

    /// Box; faces are front (+Z), back, top (+Y), bottom, right (+X), left
    pub fn cuboid(&self, id: &str, width: f32, height: f32, depth: f32, colors: &[Color]) -> Result<Shape> {
        positive("width", width)?;
        positive("height", height)?;
        positive("depth", depth)?;
        let colors = face_colors(colors, 6)?;
        let (x, y, z) = (width / 2.0, height / 2.0, depth / 2.0);
        let p = Point3::new;

        let faces = [
            [p(-x, -y, z), p(x, -y, z), p(x, y, z), p(-x, y, z)],
            [p(-x, -y, -z), p(-x, y, -z), p(x, y, -z), p(x, -y, -z)],
            [p(-x, y, -z), p(-x, y, z), p(x, y, z), p(x, y, -z)],
            [p(-x, -y, -z), p(x, -y, -z), p(x, -y, z), p(-x, -y, z)],
            [p(x, -y, -z), p(x, y, -z), p(x, y, z), p(x, -y, z)],
            [p(-x, -y, -z), p(-x, -y, z), p(-x, y, z), p(-x, y, -z)],
        ];

        let mut mesh = Mesh::with_capacity(12);
        for (face, color) in faces.into_iter().zip(colors) {
            push_quad(&mut mesh, face, color);
        }
        Ok(Shape::new(id, mesh))
    }

    /// Cube with the same named texture on every face
    pub fn textured_cube(&self, id: &str, size: f32, texture: &str) -> Result<Shape> {
        let texture = self.textures.get(texture)?;
        let cube = self.cube(id, size, &[Color::WHITE])?;
        let mut mesh = cube.mesh().clone();
        // Each face is two triangles: (a, b, c) and (a, c, d)
        for (i, triangle) in mesh.triangles.iter_mut().enumerate() {
            let uvs = if i % 2 == 0 {
                [(0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]
            } else {
                [(0.0, 1.0), (1.0, 0.0), (0.0, 0.0)]
            };
            for (vertex, (u, v)) in triangle.vertices.iter_mut().zip(uvs) {
                *vertex = vertex.with_uv(u, v);
            }
        }
        Ok(Shape::new(id, mesh).with_texture(texture))
    }

    /// Truncated cone with `sides` side faces; faces are sides, then bottom, then top
    pub fn frustum(
        &self,
        id: &str,
        sides: usize,
        bottom_radius: f32,
        top_radius: f32,
        height: f32,
        colors: &[Color],
    ) -> Result<Shape> {
        min_count("sides", sides, 3)?;
        positive("bottom radius", bottom_radius)?;
        positive("top radius", top_radius)?;
        positive("height", height)?;
        let colors = face_colors(colors, sides + 2)?;

        let bottom = ring(sides, bottom_radius, -height / 2.0);
        let top = ring(sides, top_radius, height / 2.0);
        let (bottom_center, top_center) = (
            Point3::new(0.0, -height / 2.0, 0.0),
            Point3::new(0.0, height / 2.0, 0.0),
        );

        let mut mesh = Mesh::with_capacity(sides * 4);
        for i in 0..sides {
            let j = (i + 1) % sides;
            push_quad(&mut mesh, [bottom[i], bottom[j], top[j], top[i]], colors[i]);
        }
        for i in 0..sides {
            let j = (i + 1) % sides;
            push_outward(&mut mesh, bottom_center, bottom[i], bottom[j], colors[sides]);
        }
        for i in 0..sides {
            let j = (i + 1) % sides;
            push_outward(&mut mesh, top_center, top[i], top[j], colors[sides + 1]);
        }
        Ok(Shape::new(id, mesh))
    }

    /// Prism along Y; faces are sides, then bottom, then top
    pub fn prism(&self, id: &str, sides: usize, radius: f32, height: f32, colors: &[Color]) -> Result<Shape> {
        self.frustum(id, sides, radius, radius, height, colors)
    }

    /// Pyramid with apex at +Y; faces are sides, then base
    pub fn pyramid(&self, id: &str, sides: usize, radius: f32, height: f32, colors: &[Color]) -> Result<Shape> {
        min_count("sides", sides, 3)?;
        positive("radius", radius)?;
        positive("height", height)?;
        let colors = face_colors(colors, sides + 1)?;

        let base = ring(sides, radius, -height / 2.0);
        let apex = Point3::new(0.0, height / 2.0, 0.0);
        let base_center = Point3::new(0.0, -height / 2.0, 0.0);

        let mut mesh = Mesh::with_capacity(sides * 2);
        for i in 0..sides {
            let j = (i + 1) % sides;
            push_outward(&mut mesh, base[i], base[j], apex, colors[i]);
        }
        for i in 0..sides {
            let j = (i + 1) % sides;
            push_outward(&mut mesh, base_center, base[i], base[j], colors[sides]);
        }
        Ok(Shape::new(id, mesh))
    }

    /// Two pyramids sharing a base; faces are upper sides, then lower sides
    pub fn bipyramid(&self, id: &str, sides: usize, radius: f32, height: f32, colors: &[Color]) -> Result<Shape> {
        min_count("sides", sides, 3)?;
        positive("radius", radius)?;
        positive("height", height)?;
        let colors = face_colors(colors, sides * 2)?;

        let equator = ring(sides, radius, 0.0);
        let top = Point3::new(0.0, height / 2.0, 0.0);
        let bottom = Point3::new(0.0, -height / 2.0, 0.0);

        let mut mesh = Mesh::with_capacity(sides * 2);
        for i in 0..sides {
            let j = (i + 1) % sides;
            push_outward(&mut mesh, equator[i], equator[j], top, colors[i]);
        }
        for i in 0..sides {
            let j = (i + 1) % sides;
            push_outward(&mut mesh, equator[i], equator[j], bottom, colors[sides + i]);
        }
        Ok(Shape::new(id, mesh))
    }

    /// Regular tetrahedron with the given edge length
    pub fn tetrahedron(&self, id: &str, edge: f32, colors: &[Color]) -> Result<Shape> {
        positive("edge", edge)?;
        let colors = face_colors(colors, 4)?;
        let s = edge / (2.0 * 2f32.sqrt());
        let v = [
            Point3::new(s, s, s),
            Point3::new(s, -s, -s),
            Point3::new(-s, s, -s),
            Point3::new(-s, -s, s),
        ];

        let mut mesh = Mesh::with_capacity(4);
        for (face, color) in [[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]].iter().zip(colors) {
            push_outward(&mut mesh, v[face[0]], v[face[1]], v[face[2]], color);
        }
        Ok(Shape::new(id, mesh))
    }

    /// UV sphere; one face per latitude band, top to bottom
    pub fn sphere(&self, id: &str, radius: f32, segments: usize, rings: usize, colors: &[Color]) -> Result<Shape> {
        self.sphere_section(id, radius, segments, rings, PI, colors, rings)
    }

    /// Upper half sphere; faces are latitude bands, then the flat base
    pub fn hemisphere(&self, id: &str, radius: f32, segments: usize, rings: usize, colors: &[Color]) -> Result<Shape> {
        let dome = self.sphere_section(id, radius, segments, rings, FRAC_PI_2, colors, rings + 1)?;
        let colors = face_colors(colors, rings + 1)?;

        let mut mesh = dome.mesh().clone();
        let rim = ring(segments, radius, 0.0);
        // Base faces -Y; reference point above it keeps the winding outward
        for i in 0..segments {
            let j = (i + 1) % segments;
            let mut triangle = Triangle::flat(Point3::origin(), rim[j], rim[i], colors[rings]);
            if triangle.calculate_normal().y > 0.0 {
                triangle = Triangle::flat(Point3::origin(), rim[i], rim[j], colors[rings]);
            }
            mesh.add_triangle(triangle);
        }
        Ok(Shape::new(id, mesh))
    }

    #[allow(clippy::too_many_arguments)]
    fn sphere_section(
        &self,
        id: &str,
        radius: f32,
        segments: usize,
        rings: usize,
        max_phi: f32,
        colors: &[Color],
        faces: usize,
    ) -> Result<Shape> {
        min_count("segments", segments, 3)?;
        min_count("rings", rings, 2)?;
        positive("radius", radius)?;
        let colors = face_colors(colors, faces)?;

        let mut mesh = Mesh::with_capacity(segments * rings * 2);
        for band in 0..rings {
            let upper = max_phi * band as f32 / rings as f32;
            let lower = if band + 1 == rings {
                max_phi
            } else {
                max_phi * (band + 1) as f32 / rings as f32
            };
            for i in 0..segments {
                let t0 = TAU * i as f32 / segments as f32;
                let t1 = TAU * (i + 1) as f32 / segments as f32;
                push_quad(
                    &mut mesh,
                    [
                        sphere_point(radius, lower, t0),
                        sphere_point(radius, lower, t1),
                        sphere_point(radius, upper, t1),
                        sphere_point(radius, upper, t0),
                    ],
                    colors[band],
                );
            }
        }
        Ok(Shape::new(id, mesh))
    }

    /// Airplane pointing along +X
    pub fn airplane(&self, id: &str, body: Color, wings: Color) -> Result<Shape> {
        let nose_down = Rotation::euler(0.0, 0.0, -90.0);
        let fuselage = self.prism("fuselage", 12, 0.25, 2.0, &[body])?;
        let nose = self.pyramid("nose", 12, 0.25, 0.5, &[body])?;
        let wing = self.cuboid("wing", 0.6, 0.05, 3.0, &[wings])?;
        let tail = self.cuboid("tail", 0.3, 0.05, 1.0, &[wings])?;
        let fin = self.cuboid("fin", 0.3, 0.5, 0.05, &[wings])?;

        join_shapes(
            id,
            &[&fuselage, &nose, &wing, &tail, &fin],
            &[
                PartOffset::identity().with_rotation(nose_down),
                PartOffset::translated(1.25, 0.0, 0.0).with_rotation(nose_down),
                PartOffset::translated(0.1, 0.0, 0.0),
                PartOffset::translated(-0.85, 0.0, 0.0),
                PartOffset::translated(-0.85, 0.3, 0.0),
            ],
        )
    }

    /// Quad-rotor drone: body, two crossed arms and four rotor discs
    pub fn drone(&self, id: &str, body: Color, rotors: Color) -> Result<Shape> {
        let hull = self.cuboid("hull", 0.6, 0.2, 0.6, &[body])?;
        let arm = self.cuboid("arm", 1.6, 0.05, 0.08, &[body])?;
        let rotor = self.prism("rotor", 16, 0.25, 0.02, &[rotors])?;
        let reach = 0.8 * std::f32::consts::FRAC_1_SQRT_2;

        join_shapes(
            id,
            &[&hull, &arm, &arm, &rotor, &rotor, &rotor, &rotor],
            &[
                PartOffset::identity(),
                PartOffset::identity().with_rotation(Rotation::euler(0.0, 45.0, 0.0)),
                PartOffset::identity().with_rotation(Rotation::euler(0.0, -45.0, 0.0)),
                PartOffset::translated(reach, 0.12, reach),
                PartOffset::translated(reach, 0.12, -reach),
                PartOffset::translated(-reach, 0.12, reach),
                PartOffset::translated(-reach, 0.12, -reach),
            ],
        )
    }

    /// Bird facing +X with wings spread along Z
    pub fn bird(&self, id: &str, body: Color, wings: Color) -> Result<BirdParts> {
        let torso = self.sphere("torso", 0.5, 12, 8, &[body])?;
        let head = self.sphere("head", 0.25, 10, 6, &[body])?;
        let beak = self.pyramid("beak", 4, 0.08, 0.25, &[Color::YELLOW])?;
        let left = wing_mesh(wings, 1.0);
        let right = wing_mesh(wings, -1.0);

        let left_start = (torso.triangles().len() + head.triangles().len() + beak.triangles().len()) * 3;
        let left_wing = left_start..left_start + left.vertex_count();
        let right_wing = left_wing.end..left_wing.end + right.vertex_count();

        let (left, right) = (Shape::new("left wing", left), Shape::new("right wing", right));
        let shape = join_shapes(
            id,
            &[&torso, &head, &beak, &left, &right],
            &[
                PartOffset::identity().with_scale(1.2, 0.6, 0.6),
                PartOffset::translated(0.6, 0.25, 0.0),
                PartOffset::translated(0.9, 0.25, 0.0).with_rotation(Rotation::euler(0.0, 0.0, -90.0)),
                PartOffset::identity(),
                PartOffset::identity(),
            ],
        )?;

        Ok(BirdParts {
            shape,
            left_wing,
            right_wing,
            left_hinge: (Point3::new(-0.3, 0.0, WING_ROOT), Point3::new(0.3, 0.0, WING_ROOT)),
            right_hinge: (Point3::new(0.3, 0.0, -WING_ROOT), Point3::new(-0.3, 0.0, -WING_ROOT)),
        })
    }
}

const WING_ROOT: f32 = 0.2;

/// Flat, double-sided wing in the XZ plane; `side` is +1 for left (+Z), -1 for right
fn wing_mesh(color: Color, side: f32) -> Mesh {
    let root_back = Point3::new(-0.3, 0.0, side * WING_ROOT);
    let root_front = Point3::new(0.3, 0.0, side * WING_ROOT);
    let tip = Point3::new(-0.1, 0.0, side * (WING_ROOT + 1.0));

    let mut mesh = Mesh::with_capacity(2);
    mesh.add_triangle(Triangle::flat(root_back, root_front, tip, color));
    mesh.add_triangle(Triangle::flat(root_back, tip, root_front, color));
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::Texture;

    fn assets() -> TextureAssets {
        let mut assets = TextureAssets::new();
        assets.insert(
            "checker",
            Texture::checkerboard(8, 2, Color::WHITE, Color::BLACK).unwrap(),
        );
        assets
    }

    fn all_outward(shape: &Shape) -> bool {
        shape
            .triangles()
            .iter()
            .all(|t| t.calculate_normal().dot(&t.centroid().coords) > 0.0)
    }

    #[test]
    fn test_cube_has_twelve_outward_triangles() {
        let assets = assets();
        let factory = ShapeFactory::new(&assets);
        let cube = factory.cube("cube", 2.0, &[Color::RED]).unwrap();
        assert_eq!(cube.triangles().len(), 12);
        assert!(all_outward(&cube));
        let (min, max) = cube.mesh().bounds().unwrap();
        assert_eq!(min, Point3::new(-1.0, -1.0, -1.0));
        assert_eq!(max, Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_color_count_mismatch_rejected() {
        let assets = assets();
        let factory = ShapeFactory::new(&assets);
        let result = factory.cube("cube", 1.0, &[Color::RED, Color::GREEN]);
        assert_eq!(
            result.unwrap_err(),
            ShapeError::MismatchedColors {
                expected: 6,
                got: 2
            }
        );
        assert!(factory.pyramid("p", 4, 1.0, 1.0, &[]).is_err());
    }

    #[test]
    fn test_per_face_colors() {
        let assets = assets();
        let factory = ShapeFactory::new(&assets);
        let colors = [Color::RED, Color::GREEN, Color::BLUE, Color::YELLOW];
        let tetra = factory.tetrahedron("t", 1.0, &colors).unwrap();
        let used: Vec<_> = tetra.triangles().iter().map(|t| t.vertices[0].color).collect();
        assert_eq!(used, colors.to_vec());
        assert!(all_outward(&tetra));
    }

    #[test]
    fn test_solids_are_closed_and_outward() {
        let assets = assets();
        let factory = ShapeFactory::new(&assets);
        let white = [Color::WHITE];
        let shapes = [
            factory.prism("prism", 6, 1.0, 2.0, &white).unwrap(),
            factory.frustum("frustum", 8, 1.0, 0.5, 1.0, &white).unwrap(),
            factory.pyramid("pyramid", 4, 1.0, 1.0, &white).unwrap(),
            factory.bipyramid("bipyramid", 5, 1.0, 2.0, &white).unwrap(),
            factory.sphere("sphere", 1.0, 12, 6, &white).unwrap(),
        ];
        for shape in &shapes {
            assert!(all_outward(shape), "{} has inward faces", shape.id());
        }
        assert_eq!(shapes[0].triangles().len(), 6 * 4);
        assert_eq!(shapes[2].triangles().len(), 4 * 2);
        assert_eq!(shapes[3].triangles().len(), 5 * 2);
        // Pole bands lose their degenerate halves
        assert_eq!(shapes[4].triangles().len(), 12 * 6 * 2 - 2 * 12);
    }

    #[test]
    fn test_hemisphere_base_faces_down() {
        let assets = assets();
        let factory = ShapeFactory::new(&assets);
        let dome = factory.hemisphere("dome", 1.0, 8, 4, &[Color::WHITE]).unwrap();
        let base: Vec<_> = dome.triangles().iter().rev().take(8).collect();
        assert!(base.iter().all(|t| t.calculate_normal().y < -0.99));
        let (min, _) = dome.mesh().bounds().unwrap();
        assert!(min.y.abs() < 1e-6);
    }

    #[test]
    fn test_invalid_primitives_rejected() {
        let assets = assets();
        let factory = ShapeFactory::new(&assets);
        assert!(matches!(
            factory.polygon("p", 2, 1.0, &[Color::WHITE]),
            Err(ShapeError::InvalidPrimitive(_))
        ));
        assert!(factory.cube("c", 0.0, &[Color::WHITE]).is_err());
        assert!(factory.sphere("s", 1.0, 8, 1, &[Color::WHITE]).is_err());
    }

    #[test]
    fn test_textured_shapes_resolve_injected_assets() {
        let assets = assets();
        let factory = ShapeFactory::new(&assets);
        let square = factory.textured_square("sq", "checker").unwrap();
        assert!(square.texture().is_some());
        assert!(square.triangles()[0].vertices[0].uv.is_some());

        let cube = factory.textured_cube("cube", 1.0, "checker").unwrap();
        assert!(cube
            .triangles()
            .iter()
            .all(|t| t.vertices.iter().all(|v| v.uv.is_some())));

        assert_eq!(
            factory.textured_square("sq", "missing").unwrap_err(),
            ShapeError::UnknownTexture("missing".to_string())
        );
    }

    #[test]
    fn test_composites() {
        let assets = assets();
        let factory = ShapeFactory::new(&assets);
        let plane = factory.airplane("plane", Color::GREY, Color::BLUE).unwrap();
        let (min, max) = plane.mesh().bounds().unwrap();
        assert!(max.x > 1.4 && min.x < -0.9);
        assert!((max.z - 1.5).abs() < 1e-5);

        let drone = factory.drone("drone", Color::GREY, Color::RED).unwrap();
        assert!(!drone.triangles().is_empty());
    }

    #[test]
    fn test_bird_wing_ranges_point_at_wings() {
        let assets = assets();
        let factory = ShapeFactory::new(&assets);
        let bird = factory.bird("bird", Color::BLUE, Color::CYAN).unwrap();
        assert_eq!(bird.left_wing.len(), 6);
        assert_eq!(bird.right_wing.end, bird.shape.vertex_count());
        for index in bird.left_wing.clone() {
            assert!(bird.shape.base_position(index).unwrap().z >= WING_ROOT - 1e-6);
        }
        for index in bird.right_wing.clone() {
            assert!(bird.shape.base_position(index).unwrap().z <= -WING_ROOT + 1e-6);
        }
    }
}
