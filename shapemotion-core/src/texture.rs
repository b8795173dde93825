/// Named texture bitmaps, loaded once by the application and injected into the factory
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Result, ShapeError};
use crate::geometry::Color;

/// RGBA8 bitmap
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 4]>,
}

impl Texture {
    pub fn new(width: u32, height: u32, pixels: Vec<[u8; 4]>) -> Result<Self> {
        let expected = pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(ShapeError::InvalidPrimitive(format!(
                "texture of {}x{} needs {} pixels, got {}",
                width,
                height,
                expected,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Two-color checkerboard with `cells` squares per side
    pub fn checkerboard(size: u32, cells: u32, a: Color, b: Color) -> Result<Self> {
        let count = pixel_count(size, size)?;
        let (side, cell) = (size as usize, (size / cells.max(1)).max(1) as usize);
        let pixels = (0..count)
            .map(|i| {
                let (x, y) = (i % side, i / side);
                let color = if (x / cell + y / cell) % 2 == 0 { a } else { b };
                to_rgba8(color)
            })
            .collect();
        Self::new(size, size, pixels)
    }

    /// Nearest-neighbour lookup; coordinates wrap
    pub fn sample(&self, u: f32, v: f32) -> Color {
        let x = (u.rem_euclid(1.0) * self.width as f32) as u32;
        let y = (v.rem_euclid(1.0) * self.height as f32) as u32;
        let idx = y.min(self.height - 1) as usize * self.width as usize + x.min(self.width - 1) as usize;
        let [r, g, b, a] = self.pixels[idx];
        Color::rgba(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }
}

/// Pixels in a `width` x `height` bitmap; zero or overflowing sizes are rejected
fn pixel_count(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .filter(|count| *count > 0)
        .ok_or_else(|| {
            ShapeError::InvalidPrimitive(format!("texture size {}x{} is not usable", width, height))
        })
}

fn to_rgba8(color: Color) -> [u8; 4] {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    [
        channel(color.r),
        channel(color.g),
        channel(color.b),
        channel(color.a),
    ]
}

/// Texture registry owned by the application context
#[derive(Debug, Clone, Default)]
pub struct TextureAssets {
    textures: HashMap<String, Arc<Texture>>,
}

impl TextureAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, texture: Texture) {
        self.textures.insert(name.into(), Arc::new(texture));
    }

    pub fn get(&self, name: &str) -> Result<Arc<Texture>> {
        self.textures
            .get(name)
            .cloned()
            .ok_or_else(|| ShapeError::UnknownTexture(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
