/// Shapemotion Core - shape composition and animation paths
///
/// This library builds triangle-mesh shapes, joins them into rigid composites,
/// and animates them along linear, Bezier, arc and spiral paths. Rendering is
/// left to whatever implements `scene::RenderSurface`.

pub mod animation;
pub mod compose;
pub mod error;
pub mod factory;
pub mod geometry;
pub mod projection;
pub mod scene;
pub mod shape;
pub mod stl;
pub mod texture;
pub mod transform;

// Re-export commonly used types
pub use animation::{AnimationPath, Progress, Timing};
pub use compose::{join_shapes, join_two, PartOffset};
pub use error::{Result, ShapeError};
pub use factory::{BirdParts, ShapeFactory};
pub use geometry::{Color, Mesh, Triangle, Vertex};
pub use projection::{Camera, ProjectionMode};
pub use scene::{RenderSurface, Scene, ShapeHandle};
pub use shape::Shape;
pub use texture::{Texture, TextureAssets};
pub use transform::{Axis, EulerAngles, Rotation, RotationSpace, Transform};
