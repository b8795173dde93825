/// Scene: the shape collection, its animations and the scene clock
use std::time::Duration;

use log::{debug, info};

use crate::animation::{AnimationPath, Animator, PathKind};
use crate::error::{Result, ShapeError};
use crate::shape::Shape;

/// Reference to a shape in a [`Scene`]. Handles from before the last
/// [`Scene::clear_shapes`] are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeHandle {
    index: usize,
    generation: u64,
}

/// Something that can draw a scene snapshot, e.g. a terminal or GPU surface
pub trait RenderSurface {
    type Error;

    fn present(&mut self, scene: &Scene) -> std::result::Result<(), Self::Error>;
}

struct Attached {
    target: usize,
    animator: Animator,
}

/// Shapes and the animations attached to them.
///
/// All mutation goes through `&mut self`, so a surface presenting `&Scene`
/// always sees a complete frame.
#[derive(Default)]
pub struct Scene {
    shapes: Vec<Shape>,
    animations: Vec<Attached>,
    generation: u64,
    clock: Duration,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every shape and every animation attached to them
    pub fn clear_shapes(&mut self) {
        info!(
            "clearing scene: {} shapes, {} animations",
            self.shapes.len(),
            self.animations.len()
        );
        self.shapes.clear();
        self.animations.clear();
        self.generation += 1;
    }

    pub fn add_shape(&mut self, shape: Shape) -> ShapeHandle {
        self.shapes.push(shape);
        ShapeHandle {
            index: self.shapes.len() - 1,
            generation: self.generation,
        }
    }

    pub fn add_shapes(&mut self, shapes: impl IntoIterator<Item = Shape>) -> Vec<ShapeHandle> {
        shapes.into_iter().map(|shape| self.add_shape(shape)).collect()
    }

    fn index_of(&self, handle: ShapeHandle) -> Result<usize> {
        if handle.generation == self.generation && handle.index < self.shapes.len() {
            Ok(handle.index)
        } else {
            Err(ShapeError::StaleHandle)
        }
    }

    pub fn shape(&self, handle: ShapeHandle) -> Result<&Shape> {
        let index = self.index_of(handle)?;
        Ok(&self.shapes[index])
    }

    pub fn shape_mut(&mut self, handle: ShapeHandle) -> Result<&mut Shape> {
        let index = self.index_of(handle)?;
        Ok(&mut self.shapes[index])
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Start `path` on a shape. Its start delay counts from the current scene time.
    pub fn animate(&mut self, handle: ShapeHandle, path: AnimationPath) -> Result<()> {
        let target = self.index_of(handle)?;
        if let PathKind::VertexHinge { vertices, .. } = path.kind() {
            let count = self.shapes[target].vertex_count();
            if let Some(&index) = vertices.iter().find(|&&index| index >= count) {
                return Err(ShapeError::VertexOutOfRange { index, count });
            }
        }

        debug!(
            "animating {:?} on {:?} channel, {:?}",
            self.shapes[target].id(),
            path.kind().channel(),
            path.timing()
        );
        self.animations.push(Attached {
            target,
            animator: Animator::new(path, self.clock),
        });
        Ok(())
    }

    /// Advance the clock by `delta` and apply every active animation once
    pub fn tick(&mut self, delta: Duration) -> Result<()> {
        self.advance_to(self.clock.saturating_add(delta))
    }

    /// Move the clock to `now` (never backwards) and apply every active animation once
    pub fn advance_to(&mut self, now: Duration) -> Result<()> {
        self.clock = self.clock.max(now);
        for attached in &mut self.animations {
            attached
                .animator
                .advance(self.clock, &mut self.shapes[attached.target])?;
        }
        self.animations.retain(|attached| !attached.animator.is_finished());
        Ok(())
    }

    /// Scene time since creation
    pub fn elapsed(&self) -> Duration {
        self.clock
    }

    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }

    pub fn is_animating(&self) -> bool {
        !self.animations.is_empty()
    }

    /// Advance by `delta`, then hand the frame to `surface`
    pub fn frame<S>(&mut self, delta: Duration, surface: &mut S) -> std::result::Result<(), S::Error>
    where
        S: RenderSurface,
        S::Error: From<ShapeError>,
    {
        self.tick(delta)?;
        surface.present(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Timing;
    use crate::geometry::Mesh;
    use nalgebra::{Point3, Vector3};

    fn shape(id: &str) -> Shape {
        Shape::new(id, Mesh::new())
    }

    #[test]
    fn test_clear_invalidates_handles_and_animations() {
        let mut scene = Scene::new();
        let handle = scene.add_shape(shape("a"));
        scene
            .animate(
                handle,
                AnimationPath::linear(Point3::new(1.0, 0.0, 0.0), Timing::from_millis(100).unwrap()),
            )
            .unwrap();
        assert!(scene.is_animating());

        scene.clear_shapes();
        assert!(scene.shapes().is_empty());
        assert!(!scene.is_animating());
        assert_eq!(scene.shape(handle).unwrap_err(), ShapeError::StaleHandle);

        let fresh = scene.add_shape(shape("b"));
        assert_ne!(fresh, handle);
        assert_eq!(scene.shape(fresh).unwrap().id(), "b");
    }

    #[test]
    fn test_add_shapes_returns_handles_in_order() {
        let mut scene = Scene::new();
        let handles = scene.add_shapes(vec![shape("a"), shape("b"), shape("c")]);
        let ids: Vec<_> = handles
            .iter()
            .map(|h| scene.shape(*h).unwrap().id().to_string())
            .collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn test_finished_animations_are_retired() {
        let mut scene = Scene::new();
        let handle = scene.add_shape(shape("a"));
        scene
            .animate(
                handle,
                AnimationPath::scale(Vector3::new(2.0, 2.0, 2.0), Timing::from_millis(100).unwrap()),
            )
            .unwrap();
        scene.tick(Duration::from_millis(50)).unwrap();
        assert_eq!(scene.animation_count(), 1);
        scene.tick(Duration::from_millis(50)).unwrap();
        assert_eq!(scene.animation_count(), 0);
        assert_eq!(scene.shape(handle).unwrap().transform.scale, Vector3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_start_delay_counts_from_attach_time() {
        let mut scene = Scene::new();
        let handle = scene.add_shape(shape("a"));
        scene.tick(Duration::from_secs(10)).unwrap();
        scene
            .animate(
                handle,
                AnimationPath::linear(Point3::new(4.0, 0.0, 0.0), Timing::from_millis(1000).unwrap()),
            )
            .unwrap();
        scene.tick(Duration::from_millis(500)).unwrap();
        let x = scene.shape(handle).unwrap().transform.translation.x;
        assert!((x - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_hinge_vertices_checked_on_attach() {
        let mut scene = Scene::new();
        let handle = scene.add_shape(shape("empty"));
        let path = AnimationPath::vertex_hinge(
            vec![0],
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            30.0,
            Timing::from_millis(100).unwrap(),
        )
        .unwrap();
        assert_eq!(
            scene.animate(handle, path).unwrap_err(),
            ShapeError::VertexOutOfRange { index: 0, count: 0 }
        );
    }

    #[test]
    fn test_clock_saturates_instead_of_overflowing() {
        let mut scene = Scene::new();
        scene.add_shape(shape("a"));
        scene.tick(Duration::MAX).unwrap();
        scene.tick(Duration::from_secs(1)).unwrap();
        assert_eq!(scene.elapsed(), Duration::MAX);
    }

    struct CountingSurface {
        frames: usize,
        shapes_seen: usize,
    }

    impl RenderSurface for CountingSurface {
        type Error = ShapeError;

        fn present(&mut self, scene: &Scene) -> Result<()> {
            self.frames += 1;
            self.shapes_seen = scene.shapes().len();
            Ok(())
        }
    }

    #[test]
    fn test_frame_ticks_then_presents() {
        let mut scene = Scene::new();
        scene.add_shapes([shape("a"), shape("b")]);
        let mut surface = CountingSurface {
            frames: 0,
            shapes_seen: 0,
        };
        scene.frame(Duration::from_millis(16), &mut surface).unwrap();
        scene.frame(Duration::from_millis(16), &mut surface).unwrap();
        assert_eq!(surface.frames, 2);
        assert_eq!(surface.shapes_seen, 2);
        assert_eq!(scene.elapsed(), Duration::from_millis(32));
    }
}
