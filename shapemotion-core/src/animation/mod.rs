/// Animation path engine
///
/// Paths are pure functions of normalised time; [`Animator`] turns them into
/// per-tick changes on a shape.

pub mod animator;
pub mod path;
pub mod timing;

pub use animator::Animator;
pub use path::{AnimationPath, AxisLine, BezierControls, Channel, PathKind};
pub use timing::{Progress, Timing};
