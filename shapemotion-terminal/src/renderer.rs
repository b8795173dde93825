/// ASCII rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Vector3};
use std::io::Write;
use shapemotion_core::{Camera, RenderSurface, Scene, Shape, Triangle};

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

const AMBIENT: f32 = 0.25;

/// ASCII renderer that converts scene shapes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
    pub camera: Camera,
    light_dir: Vector3<f32>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        // Terminal cells are about twice as tall as they are wide
        let camera = Camera::new(width as u32, (height * 2) as u32);
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::Reset; size],
            camera,
            light_dir: Vector3::new(0.4, 0.8, 0.6).normalize(),
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
        self.color_buffer.fill(Color::Reset);
    }

    /// Character at a cell, for inspecting a rendered frame
    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.char_buffer[y * self.width + x])
    }

    pub fn covered_cells(&self) -> usize {
        self.char_buffer.iter().filter(|c| **c != ' ').count()
    }

    pub fn render_shape(&mut self, shape: &Shape, view_projection: &Matrix4<f32>) {
        let world = shape.world_mesh();
        for triangle in &world.triangles {
            let color = surface_color(shape, triangle);
            self.render_triangle(triangle, color, view_projection);
        }
    }

    fn render_triangle(
        &mut self,
        triangle: &Triangle,
        color: shapemotion_core::Color,
        view_projection: &Matrix4<f32>,
    ) {
        // Project vertices to screen space
        let mut screen_coords = [(0.0, 0.0, 0.0); 3];
        for (slot, vertex) in screen_coords.iter_mut().zip(&triangle.vertices) {
            match self.camera.project_to_screen(
                &vertex.position,
                view_projection,
                self.width as u32,
                self.height as u32,
            ) {
                Some(coords) => *slot = coords,
                None => return, // Triangle is clipped
            }
        }

        // Two-sided lighting so open shapes (wings, squares) stay visible from behind
        let normal = triangle.calculate_normal();
        let diffuse = normal.dot(&self.light_dir).abs();
        let brightness = (AMBIENT + (1.0 - AMBIENT) * diffuse) * (0.5 + 0.5 * color.luminance());

        // Map brightness to character, never blank for a covered cell
        let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
        let char_index = char_index.clamp(1, LUMINOSITY_RAMP.len() - 1);
        let character = LUMINOSITY_RAMP[char_index];

        self.rasterize_triangle(&screen_coords, character, to_terminal_color(color));
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], character: char, color: Color) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        // Scanline rasterization
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                // Barycentric coordinates
                if let Some((w0, w1, w2)) = barycentric(
                    (v0.0, v0.1),
                    (v1.0, v1.1),
                    (v2.0, v2.1),
                    (px, py),
                ) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        // Interpolate depth
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;

                        let idx = y as usize * self.width + x as usize;
                        if depth < self.depth_buffer[idx] {
                            self.depth_buffer[idx] = depth;
                            self.char_buffer[idx] = character;
                            self.color_buffer[idx] = color;
                        }
                    }
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = Color::Reset;
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                let color = self.color_buffer[idx];
                if color != current {
                    writer.queue(SetForegroundColor(color))?;
                    current = color;
                }
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl RenderSurface for AsciiRenderer {
    type Error = anyhow::Error;

    fn present(&mut self, scene: &Scene) -> anyhow::Result<()> {
        self.clear();
        let view_projection = self.camera.view_projection();
        for shape in scene.shapes() {
            self.render_shape(shape, &view_projection);
        }
        Ok(())
    }
}

/// Face color: texture sampled at the triangle's centre, else the average vertex color
fn surface_color(shape: &Shape, triangle: &Triangle) -> shapemotion_core::Color {
    let uvs: Option<Vec<_>> = triangle.vertices.iter().map(|v| v.uv).collect();
    if let (Some(texture), Some(uvs)) = (shape.texture(), uvs) {
        let u = (uvs[0].x + uvs[1].x + uvs[2].x) / 3.0;
        let v = (uvs[0].y + uvs[1].y + uvs[2].y) / 3.0;
        return texture.sample(u, v);
    }

    let [a, b, c] = triangle.vertices.map(|v| v.color);
    shapemotion_core::Color::rgba(
        (a.r + b.r + c.r) / 3.0,
        (a.g + b.g + c.g) / 3.0,
        (a.b + b.b + c.b) / 3.0,
        (a.a + b.a + c.a) / 3.0,
    )
}

fn to_terminal_color(color: shapemotion_core::Color) -> Color {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::Rgb {
        r: channel(color.r),
        g: channel(color.g),
        b: channel(color.b),
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
