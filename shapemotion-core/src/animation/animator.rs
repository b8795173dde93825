/// Per-animation playback state
use std::time::Duration;

use nalgebra::{Point3, Vector3};

use super::path::{AnimationPath, PathKind};
use super::timing::Progress;
use crate::error::Result;
use crate::shape::Shape;

/// Shape state captured when an animation leaves its start delay
#[derive(Debug, Clone, Copy, PartialEq)]
struct Snapshot {
    translation: Point3<f32>,
    scale: Vector3<f32>,
}

impl Snapshot {
    fn of(shape: &Shape) -> Self {
        Self {
            translation: Point3::from(shape.transform.translation),
            scale: shape.transform.scale,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Pending,
    Running { start: Snapshot, last: f32 },
    Finished,
}

/// One path playing on one shape.
///
/// Each tick applies only the change between the previous and the current
/// sample, so several animations on the same shape add up instead of
/// overwriting each other, and a delayed animation starts from wherever the
/// earlier ones left the shape.
#[derive(Debug, Clone)]
pub struct Animator {
    path: AnimationPath,
    attached_at: Duration,
    state: State,
}

impl Animator {
    pub fn new(path: AnimationPath, attached_at: Duration) -> Self {
        Self {
            path,
            attached_at,
            state: State::Pending,
        }
    }

    pub fn path(&self) -> &AnimationPath {
        &self.path
    }

    pub fn is_finished(&self) -> bool {
        self.state == State::Finished
    }

    /// Bring `shape` up to scene time `now`
    pub fn advance(&mut self, now: Duration, shape: &mut Shape) -> Result<()> {
        let (t, finished) = match self.path.progress(now.saturating_sub(self.attached_at)) {
            Progress::Pending => return Ok(()),
            Progress::Running(t) => (t, false),
            Progress::Finished(t) => (t, true),
        };

        let (start, last) = match self.state {
            State::Finished => return Ok(()),
            State::Pending => (Snapshot::of(shape), 0.0),
            State::Running { start, last } => (start, last),
        };

        apply(self.path.kind(), shape, &start, last, t)?;

        self.state = if finished {
            State::Finished
        } else {
            State::Running { start, last: t }
        };
        Ok(())
    }
}

/// Apply the change of `kind` between normalised times `from` and `to`
fn apply(kind: &PathKind, shape: &mut Shape, start: &Snapshot, from: f32, to: f32) -> Result<()> {
    match kind {
        PathKind::Rotation { space, axis, .. } => {
            if let (Some(a), Some(b)) = (kind.angle(from), kind.angle(to)) {
                shape.transform.rotate(*space, axis, b - a);
            }
        }
        PathKind::Scale { .. } => {
            if let (Some(a), Some(b)) = (kind.scale(&start.scale, from), kind.scale(&start.scale, to)) {
                shape.transform.scale += b - a;
            }
        }
        PathKind::VertexHinge {
            vertices, hinge, ..
        } => {
            let (Some(a), Some(b)) = (kind.angle(from), kind.angle(to)) else {
                return Ok(());
            };
            for &index in vertices {
                let base = shape.base_position(index)?;
                let before = hinge.rotate_point(&base, a.to_radians());
                let after = hinge.rotate_point(&base, b.to_radians());
                shape.offset_vertex(index, &(after - before))?;
            }
        }
        _ => {
            let origin = start.translation;
            if let (Some(a), Some(b)) = (kind.position(&origin, from), kind.position(&origin, to)) {
                shape.transform.translate(&(b - a));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::timing::Timing;
    use crate::geometry::Mesh;
    use crate::transform::{Axis, RotationSpace};

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn empty_shape() -> Shape {
        Shape::new("empty", Mesh::new())
    }

    #[test]
    fn test_pending_until_delay_then_captures_start() {
        let timing = Timing::from_millis(1000).unwrap().with_start_delay(ms(500));
        let mut animator = Animator::new(AnimationPath::linear(Point3::new(10.0, 0.0, 0.0), timing), ms(0));
        let mut shape = empty_shape();

        animator.advance(ms(400), &mut shape).unwrap();
        // Moved while pending; the path should start from here
        shape.transform.set_translation(0.0, 2.0, 0.0);
        animator.advance(ms(1000), &mut shape).unwrap();
        assert!((shape.transform.translation - Vector3::new(5.0, 1.0, 0.0)).norm() < 1e-5);

        animator.advance(ms(1600), &mut shape).unwrap();
        assert!(animator.is_finished());
        assert!((shape.transform.translation - Vector3::new(10.0, 0.0, 0.0)).norm() < 1e-5);
    }

    #[test]
    fn test_finished_animation_is_inert() {
        let mut animator = Animator::new(
            AnimationPath::scale(Vector3::new(2.0, 2.0, 2.0), Timing::from_millis(100).unwrap()),
            ms(0),
        );
        let mut shape = empty_shape();
        animator.advance(ms(200), &mut shape).unwrap();
        animator.advance(ms(300), &mut shape).unwrap();
        assert_eq!(shape.transform.scale, Vector3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_rotation_accumulates_across_ticks() {
        let path = AnimationPath::rotation_about(
            RotationSpace::World,
            Axis::Z,
            90.0,
            Timing::from_millis(1000).unwrap(),
        );
        let mut animator = Animator::new(path, ms(0));
        let mut shape = empty_shape();
        for step in 1..=10 {
            animator.advance(ms(step * 100), &mut shape).unwrap();
        }
        let x = shape.transform.rotation_matrix() * Vector3::x();
        assert!((x - Vector3::y()).norm() < 1e-5);
    }
}
