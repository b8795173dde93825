/// Path kinds and their pure evaluation over normalised time
use std::f32::consts::TAU;
use std::time::Duration;

use nalgebra::{Point3, Unit, Vector3};

use super::timing::{Progress, Timing};
use crate::error::{Result, ShapeError};
use crate::transform::{Axis, RotationSpace};

const EPSILON: f32 = 1e-6;

/// Infinite line through `origin` along `direction`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLine {
    pub origin: Point3<f32>,
    pub direction: Unit<Vector3<f32>>,
}

impl AxisLine {
    /// Line from `a` towards `b`; the points must differ
    pub fn through(a: Point3<f32>, b: Point3<f32>) -> Result<Self> {
        let direction = Unit::try_new(b - a, EPSILON).ok_or(ShapeError::DegenerateAxis)?;
        Ok(Self {
            origin: a,
            direction,
        })
    }

    /// Split `point - origin` into the part along the line and the perpendicular part
    pub fn decompose(&self, point: &Point3<f32>) -> (Vector3<f32>, Vector3<f32>) {
        let offset = point - self.origin;
        let axial = self.direction.as_ref() * self.direction.dot(&offset);
        (axial, offset - axial)
    }

    /// Rodrigues rotation of `point` by `angle` radians around the line
    pub fn rotate_point(&self, point: &Point3<f32>, angle: f32) -> Point3<f32> {
        let k = self.direction.as_ref();
        let v = point - self.origin;
        let (sin, cos) = angle.sin_cos();
        let rotated = v * cos + k.cross(&v) * sin + k * k.dot(&v) * (1.0 - cos);
        self.origin + rotated
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BezierControls {
    Quadratic(Point3<f32>),
    Cubic(Point3<f32>, Point3<f32>),
}

/// Channel of the shape a path writes to; paths on different channels never interfere
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Translation,
    Rotation,
    Scale,
    Vertices,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PathKind {
    /// Straight line from the starting position to `target`
    Linear { target: Point3<f32> },
    Bezier {
        controls: BezierControls,
        target: Point3<f32>,
    },
    /// Circle of the starting position around `axis`; orientation is untouched
    ArcAroundAxis { axis: AxisLine, sweep_deg: f32 },
    /// Arc whose radius scales from 1 to `end_radius_scale` while the
    /// position advances `axial_shift` along the axis
    SpiralAroundAxis {
        axis: AxisLine,
        sweep_deg: f32,
        end_radius_scale: f32,
        axial_shift: f32,
    },
    Rotation {
        space: RotationSpace,
        axis: Unit<Vector3<f32>>,
        angle_deg: f32,
    },
    /// Per-axis scale from the starting scale to `target`
    Scale { target: Vector3<f32> },
    /// Swing model-space vertices around a hinge, `amplitude_deg * sin(2πt)`
    VertexHinge {
        vertices: Vec<usize>,
        hinge: AxisLine,
        amplitude_deg: f32,
    },
}

/// `a` at t = 0 and `b` at t = 1, both exactly
pub fn lerp_point(a: &Point3<f32>, b: &Point3<f32>, t: f32) -> Point3<f32> {
    Point3::from(a.coords * (1.0 - t) + b.coords * t)
}

/// De Casteljau evaluation of a quadratic or cubic curve
pub fn bezier_point(
    start: &Point3<f32>,
    controls: &BezierControls,
    target: &Point3<f32>,
    t: f32,
) -> Point3<f32> {
    match controls {
        BezierControls::Quadratic(c) => {
            let a = lerp_point(start, c, t);
            let b = lerp_point(c, target, t);
            lerp_point(&a, &b, t)
        }
        BezierControls::Cubic(c1, c2) => {
            let a = lerp_point(start, c1, t);
            let b = lerp_point(c1, c2, t);
            let c = lerp_point(c2, target, t);
            let ab = lerp_point(&a, &b, t);
            let bc = lerp_point(&b, &c, t);
            lerp_point(&ab, &bc, t)
        }
    }
}

impl PathKind {
    pub fn channel(&self) -> Channel {
        match self {
            PathKind::Linear { .. }
            | PathKind::Bezier { .. }
            | PathKind::ArcAroundAxis { .. }
            | PathKind::SpiralAroundAxis { .. } => Channel::Translation,
            PathKind::Rotation { .. } => Channel::Rotation,
            PathKind::Scale { .. } => Channel::Scale,
            PathKind::VertexHinge { .. } => Channel::Vertices,
        }
    }

    /// Position at `t` for translation paths starting from `origin`
    pub fn position(&self, origin: &Point3<f32>, t: f32) -> Option<Point3<f32>> {
        match self {
            PathKind::Linear { target } => Some(lerp_point(origin, target, t)),
            PathKind::Bezier { controls, target } => Some(bezier_point(origin, controls, target, t)),
            PathKind::ArcAroundAxis { axis, sweep_deg } => {
                Some(axis.rotate_point(origin, (t * sweep_deg).to_radians()))
            }
            PathKind::SpiralAroundAxis {
                axis,
                sweep_deg,
                end_radius_scale,
                axial_shift,
            } => {
                let (axial, radial) = axis.decompose(origin);
                let radius_scale = 1.0 + t * (end_radius_scale - 1.0);
                let shifted = axis.origin + axial + axis.direction.as_ref() * (t * axial_shift);
                // The radial part is perpendicular to the axis, so Rodrigues drops its last term
                let (sin, cos) = (t * sweep_deg).to_radians().sin_cos();
                let k = axis.direction.as_ref();
                let radial = (radial * cos + k.cross(&radial) * sin) * radius_scale;
                Some(shifted + radial)
            }
            _ => None,
        }
    }

    /// Accumulated angle at `t` for rotation and hinge paths, in degrees
    pub fn angle(&self, t: f32) -> Option<f32> {
        match self {
            PathKind::Rotation { angle_deg, .. } => Some(t * angle_deg),
            PathKind::VertexHinge { amplitude_deg, .. } => Some(amplitude_deg * (TAU * t).sin()),
            _ => None,
        }
    }

    /// Scale at `t` for scale paths starting from `origin`
    pub fn scale(&self, origin: &Vector3<f32>, t: f32) -> Option<Vector3<f32>> {
        match self {
            PathKind::Scale { target } => Some(origin * (1.0 - t) + target * t),
            _ => None,
        }
    }
}

/// A path kind together with its timing
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationPath {
    kind: PathKind,
    timing: Timing,
}

impl AnimationPath {
    pub fn new(kind: PathKind, timing: Timing) -> Self {
        Self { kind, timing }
    }

    pub fn linear(target: Point3<f32>, timing: Timing) -> Self {
        Self::new(PathKind::Linear { target }, timing)
    }

    pub fn bezier_quadratic(control: Point3<f32>, target: Point3<f32>, timing: Timing) -> Self {
        Self::new(
            PathKind::Bezier {
                controls: BezierControls::Quadratic(control),
                target,
            },
            timing,
        )
    }

    pub fn bezier_cubic(
        control1: Point3<f32>,
        control2: Point3<f32>,
        target: Point3<f32>,
        timing: Timing,
    ) -> Self {
        Self::new(
            PathKind::Bezier {
                controls: BezierControls::Cubic(control1, control2),
                target,
            },
            timing,
        )
    }

    /// Circle around the line through `a` and `b`
    pub fn arc_around_axis(a: Point3<f32>, b: Point3<f32>, sweep_deg: f32, timing: Timing) -> Result<Self> {
        let axis = AxisLine::through(a, b)?;
        Ok(Self::new(PathKind::ArcAroundAxis { axis, sweep_deg }, timing))
    }

    /// Spiral around the line through `a` and `b` over `turns` full turns
    pub fn spiral_around_axis(
        a: Point3<f32>,
        b: Point3<f32>,
        turns: f32,
        end_radius_scale: f32,
        axial_shift: f32,
        timing: Timing,
    ) -> Result<Self> {
        let axis = AxisLine::through(a, b)?;
        Ok(Self::new(
            PathKind::SpiralAroundAxis {
                axis,
                sweep_deg: turns * 360.0,
                end_radius_scale,
                axial_shift,
            },
            timing,
        ))
    }

    /// Spin about an arbitrary axis through the shape's origin
    pub fn rotation(space: RotationSpace, axis: Vector3<f32>, angle_deg: f32, timing: Timing) -> Result<Self> {
        let axis = Unit::try_new(axis, EPSILON).ok_or(ShapeError::ZeroVector("rotation axis"))?;
        Ok(Self::new(
            PathKind::Rotation {
                space,
                axis,
                angle_deg,
            },
            timing,
        ))
    }

    /// Spin about one of X, Y or Z
    pub fn rotation_about(space: RotationSpace, axis: Axis, angle_deg: f32, timing: Timing) -> Self {
        Self::new(
            PathKind::Rotation {
                space,
                axis: axis.unit(),
                angle_deg,
            },
            timing,
        )
    }

    pub fn scale(target: Vector3<f32>, timing: Timing) -> Self {
        Self::new(PathKind::Scale { target }, timing)
    }

    /// Flap `vertices` around the hinge line through `a` and `b` (model space)
    pub fn vertex_hinge(
        vertices: Vec<usize>,
        a: Point3<f32>,
        b: Point3<f32>,
        amplitude_deg: f32,
        timing: Timing,
    ) -> Result<Self> {
        let hinge = AxisLine::through(a, b)?;
        Ok(Self::new(
            PathKind::VertexHinge {
                vertices,
                hinge,
                amplitude_deg,
            },
            timing,
        ))
    }

    pub fn kind(&self) -> &PathKind {
        &self.kind
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    pub fn progress(&self, elapsed: Duration) -> Progress {
        self.timing.progress(elapsed)
    }

    /// Angle after `elapsed`, or None before the start delay or for non-angular paths
    pub fn angle_at(&self, elapsed: Duration) -> Option<f32> {
        self.progress(elapsed)
            .fraction()
            .and_then(|t| self.kind.angle(t))
    }

    /// Position after `elapsed` for a shape that started at `origin`
    pub fn position_at(&self, origin: &Point3<f32>, elapsed: Duration) -> Option<Point3<f32>> {
        self.progress(elapsed)
            .fraction()
            .and_then(|t| self.kind.position(origin, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: &Point3<f32>, b: &Point3<f32>) -> bool {
        (a - b).norm() < 1e-5
    }

    fn timing(ms: u64) -> Timing {
        Timing::from_millis(ms).unwrap()
    }

    #[test]
    fn test_linear_is_monotonic() {
        let origin = Point3::new(1.0, 2.0, 3.0);
        let path = AnimationPath::linear(Point3::new(-4.0, 0.5, 9.0), timing(1000));
        let mut last = -1.0;
        for ms in (0..=1000).step_by(50) {
            let p = path.position_at(&origin, Duration::from_millis(ms)).unwrap();
            let distance = (p - origin).norm();
            assert!(distance > last);
            last = distance;
        }
    }

    #[test]
    fn test_bezier_endpoints_are_exact() {
        let start = Point3::new(0.3, -1.7, 2.9);
        let target = Point3::new(5.1, 0.7, -3.3);
        let quadratic = BezierControls::Quadratic(Point3::new(9.0, 9.0, 9.0));
        let cubic = BezierControls::Cubic(Point3::new(-2.0, 4.0, 0.1), Point3::new(7.7, -3.0, 1.0));
        for controls in [quadratic, cubic] {
            assert_eq!(bezier_point(&start, &controls, &target, 0.0), start);
            assert_eq!(bezier_point(&start, &controls, &target, 1.0), target);
        }
    }

    #[test]
    fn test_quadratic_bezier_midpoint() {
        let p = bezier_point(
            &Point3::new(0.0, 0.0, 0.0),
            &BezierControls::Quadratic(Point3::new(1.0, 2.0, 0.0)),
            &Point3::new(2.0, 0.0, 0.0),
            0.5,
        );
        assert!(close(&p, &Point3::new(1.0, 1.0, 0.0)));
    }

    #[test]
    fn test_rotation_angle_halfway() {
        let path = AnimationPath::rotation_about(RotationSpace::World, Axis::Y, 360.0, timing(5000));
        assert_eq!(path.angle_at(Duration::from_millis(2500)), Some(180.0));
    }

    #[test]
    fn test_arc_half_turn() {
        let path = AnimationPath::arc_around_axis(
            Point3::origin(),
            Point3::new(0.0, 1.0, 0.0),
            180.0,
            timing(1000),
        )
        .unwrap();
        let end = path
            .position_at(&Point3::new(1.0, 0.0, 0.0), Duration::from_millis(1000))
            .unwrap();
        assert!(close(&end, &Point3::new(-1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_full_arc_returns_to_start() {
        let axis = AxisLine::through(Point3::new(1.0, 1.0, 0.0), Point3::new(2.0, 3.0, 1.0)).unwrap();
        let kind = PathKind::ArcAroundAxis {
            axis,
            sweep_deg: 360.0,
        };
        let start = Point3::new(4.0, -2.0, 0.5);
        assert!(close(&kind.position(&start, 0.0).unwrap(), &start));
        assert!(close(&kind.position(&start, 1.0).unwrap(), &start));
        let (axial_before, radial_before) = axis.decompose(&start);
        let (axial_mid, radial_mid) = axis.decompose(&kind.position(&start, 0.37).unwrap());
        assert!((axial_before - axial_mid).norm() < 1e-5);
        assert!((radial_before.norm() - radial_mid.norm()).abs() < 1e-5);
    }

    #[test]
    fn test_spiral_scales_radius_and_shifts_along_axis() {
        let path = AnimationPath::spiral_around_axis(
            Point3::origin(),
            Point3::new(0.0, 0.0, 1.0),
            2.0,
            0.5,
            3.0,
            timing(1000),
        )
        .unwrap();
        let start = Point3::new(2.0, 0.0, 0.0);
        assert!(close(&path.kind().position(&start, 0.0).unwrap(), &start));
        let end = path.kind().position(&start, 1.0).unwrap();
        assert!(close(&end, &Point3::new(1.0, 0.0, 3.0)));
        let quarter = path.kind().position(&start, 0.125).unwrap();
        assert!(close(&quarter, &Point3::new(0.0, 1.875, 0.375)));
    }

    #[test]
    fn test_degenerate_axis_rejected() {
        let p = Point3::new(1.0, 1.0, 1.0);
        assert_eq!(
            AnimationPath::arc_around_axis(p, p, 90.0, timing(10)).unwrap_err(),
            ShapeError::DegenerateAxis
        );
        assert!(AnimationPath::rotation(RotationSpace::Model, Vector3::zeros(), 90.0, timing(10)).is_err());
    }

    #[test]
    fn test_hinge_angle_returns_to_rest() {
        let path = AnimationPath::vertex_hinge(
            vec![0],
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            40.0,
            timing(1000),
        )
        .unwrap();
        assert_eq!(path.kind().angle(0.0), Some(0.0));
        assert!((path.kind().angle(0.25).unwrap() - 40.0).abs() < 1e-4);
        assert!(path.kind().angle(1.0).unwrap().abs() < 1e-4);
    }

    #[test]
    fn test_scale_interpolation() {
        let kind = PathKind::Scale {
            target: Vector3::new(3.0, 1.0, 0.0),
        };
        let origin = Vector3::new(1.0, 1.0, 1.0);
        assert_eq!(kind.scale(&origin, 0.5), Some(Vector3::new(2.0, 1.0, 0.5)));
        assert_eq!(kind.channel(), Channel::Scale);
        assert_eq!(kind.position(&Point3::origin(), 0.5), None);
    }
}
