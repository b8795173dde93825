/// STL import (binary and ASCII) into white, flat-shaded meshes
use nalgebra::{Point3, Vector3};
use nom::{
    bytes::complete::{tag, take},
    character::complete::{multispace0, multispace1, not_line_ending},
    multi::{count, many0},
    number::complete::{float, le_f32, le_u32},
    sequence::{preceded, tuple},
    IResult,
};

use crate::error::{Result, ShapeError};
use crate::geometry::{Color, Mesh, Triangle, Vertex};

const HEADER_LEN: usize = 80;
const FACET_LEN: usize = 50;

fn facet_triangle(normal: Vector3<f32>, corners: [Point3<f32>; 3]) -> Triangle {
    let [a, b, c] = corners.map(|p| Vertex::new(p, normal, Color::WHITE));
    let triangle = Triangle::new(a, b, c);
    if normal == Vector3::zeros() {
        // Many exporters leave the stored normal empty
        let computed = triangle.calculate_normal();
        return Triangle::new(
            Vertex::new(a.position, computed, Color::WHITE),
            Vertex::new(b.position, computed, Color::WHITE),
            Vertex::new(c.position, computed, Color::WHITE),
        );
    }
    triangle
}

fn binary_vector(input: &[u8]) -> IResult<&[u8], Vector3<f32>> {
    let (input, (x, y, z)) = tuple((le_f32, le_f32, le_f32))(input)?;
    Ok((input, Vector3::new(x, y, z)))
}

fn binary_facet(input: &[u8]) -> IResult<&[u8], Triangle> {
    let (input, normal) = binary_vector(input)?;
    let (input, corners) = count(binary_vector, 3)(input)?;
    let (input, _attributes) = take(2usize)(input)?;
    let corners = [
        Point3::from(corners[0]),
        Point3::from(corners[1]),
        Point3::from(corners[2]),
    ];
    Ok((input, facet_triangle(normal, corners)))
}

/// Parse a binary STL file
pub fn parse_binary_stl(data: &[u8]) -> Result<Mesh> {
    if data.len() < HEADER_LEN + 4 {
        return Err(ShapeError::Stl("file too small to be a valid STL".to_string()));
    }

    let (body, triangle_count) = le_u32::<_, nom::error::Error<&[u8]>>(&data[HEADER_LEN..])
        .map_err(|e| ShapeError::Stl(format!("bad triangle count: {:?}", e)))?;
    let triangle_count = triangle_count as usize;
    if body.len() < triangle_count * FACET_LEN {
        return Err(ShapeError::Stl(format!(
            "expected {} facets, file ends after {}",
            triangle_count,
            body.len() / FACET_LEN
        )));
    }

    let (_, triangles) = count(binary_facet, triangle_count)(body)
        .map_err(|e| ShapeError::Stl(format!("bad facet: {:?}", e)))?;
    Ok(Mesh { triangles })
}

/// Parse an ASCII STL file
pub fn parse_ascii_stl(input: &str) -> Result<Mesh> {
    match ascii_solid(input) {
        Ok((_, mesh)) => Ok(mesh),
        Err(e) => Err(ShapeError::Stl(format!("{:?}", e))),
    }
}

fn ascii_solid(input: &str) -> IResult<&str, Mesh> {
    let (input, _) = preceded(multispace0, tag("solid"))(input)?;
    let (input, _name) = not_line_ending(input)?;
    let (input, triangles) = many0(ascii_facet)(input)?;
    let (input, _) = preceded(multispace0, tag("endsolid"))(input)?;
    let (input, _) = not_line_ending(input)?;
    Ok((input, Mesh { triangles }))
}

fn ascii_facet(input: &str) -> IResult<&str, Triangle> {
    let (input, _) = preceded(multispace0, tag("facet"))(input)?;
    let (input, _) = preceded(multispace1, tag("normal"))(input)?;
    let (input, normal) = ascii_vector(input)?;
    let (input, _) = preceded(multispace0, tag("outer"))(input)?;
    let (input, _) = preceded(multispace1, tag("loop"))(input)?;
    let (input, a) = ascii_vertex(input)?;
    let (input, b) = ascii_vertex(input)?;
    let (input, c) = ascii_vertex(input)?;
    let (input, _) = preceded(multispace0, tag("endloop"))(input)?;
    let (input, _) = preceded(multispace0, tag("endfacet"))(input)?;

    Ok((input, facet_triangle(normal, [a, b, c].map(Point3::from))))
}

fn ascii_vertex(input: &str) -> IResult<&str, Vector3<f32>> {
    preceded(preceded(multispace0, tag("vertex")), ascii_vector)(input)
}

fn ascii_vector(input: &str) -> IResult<&str, Vector3<f32>> {
    let (input, (x, y, z)) = tuple((
        preceded(multispace0, float),
        preceded(multispace1, float),
        preceded(multispace1, float),
    ))(input)?;
    Ok((input, Vector3::new(x, y, z)))
}

/// Detect and parse STL file (binary or ASCII)
pub fn parse_stl(data: &[u8]) -> Result<Mesh> {
    // Binary files may also start with "solid", so fall back on failure
    if data.starts_with(b"solid") {
        if let Ok(text) = std::str::from_utf8(data) {
            if let Ok(mesh) = parse_ascii_stl(text) {
                return Ok(mesh);
            }
        }
    }

    parse_binary_stl(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TETRA_FACE: &str = "solid part
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet
  facet normal 0 0 0
    outer loop
      vertex 0 0 0
      vertex 0 1 0
      vertex 1 0 0
    endloop
  endfacet
endsolid part
";

    #[test]
    fn test_parse_binary_header() {
        let mut data = vec![0u8; 84];
        data[80..84].copy_from_slice(&0u32.to_le_bytes());

        let mesh = parse_binary_stl(&data).unwrap();
        assert_eq!(mesh.triangles.len(), 0);
    }

    #[test]
    fn test_parse_binary_facet() {
        let mut data = vec![0u8; 80];
        data.extend_from_slice(&1u32.to_le_bytes());
        for value in [0.0f32, 0.0, 1.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 2.0, 0.0] {
            data.extend_from_slice(&value.to_le_bytes());
        }
        data.extend_from_slice(&[0, 0]);

        let mesh = parse_binary_stl(&data).unwrap();
        assert_eq!(mesh.triangles.len(), 1);
        assert_eq!(mesh.triangles[0].vertices[1].position, Point3::new(2.0, 0.0, 0.0));
        assert_eq!(mesh.triangles[0].vertices[1].normal, Vector3::z());
    }

    #[test]
    fn test_truncated_binary_rejected() {
        let mut data = vec![0u8; 80];
        data.extend_from_slice(&3u32.to_le_bytes());
        data.extend_from_slice(&[0u8; 60]);
        assert!(matches!(parse_binary_stl(&data), Err(ShapeError::Stl(_))));
    }

    #[test]
    fn test_parse_ascii() {
        let mesh = parse_stl(TETRA_FACE.as_bytes()).unwrap();
        assert_eq!(mesh.triangles.len(), 2);
        // Missing normal is recomputed from the winding
        assert_eq!(mesh.triangles[1].vertices[0].normal, -Vector3::z());
    }
}
