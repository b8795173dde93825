/// Shape transforms: scale, rotation (model or world space) and translation
use log::warn;
use nalgebra::{Matrix4, Point3, Rotation3, Unit, UnitQuaternion, Vector3};

use crate::error::{Result, ShapeError};

const EPSILON: f32 = 1e-6;

/// One of the three local axes of a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit(self) -> Unit<Vector3<f32>> {
        match self {
            Axis::X => Vector3::x_axis(),
            Axis::Y => Vector3::y_axis(),
            Axis::Z => Vector3::z_axis(),
        }
    }
}

impl TryFrom<usize> for Axis {
    type Error = ShapeError;

    fn try_from(index: usize) -> Result<Self> {
        match index {
            0 => Ok(Axis::X),
            1 => Ok(Axis::Y),
            2 => Ok(Axis::Z),
            other => Err(ShapeError::InvalidAxisIndex(other)),
        }
    }
}

/// Frame an incremental rotation is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationSpace {
    /// Intrinsic: about the shape's own, possibly already rotated, axes
    Model,
    /// Extrinsic: about the fixed global axes
    World,
}

/// Intrinsic Euler angles in degrees, applied pitch (X), then roll (Z), then yaw (Y)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EulerAngles {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl EulerAngles {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn to_rotation(&self) -> Rotation3<f32> {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), self.x.to_radians());
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), self.y.to_radians());
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), self.z.to_radians());

        // Intrinsic X, Z, Y: each later rotation acts in the frame produced by the earlier ones
        rx * rz * ry
    }
}

/// Rotation of a transform. Exactly one representation is held at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rotation {
    /// Intrinsic Euler angles about the shape's own axes
    ModelSpace(EulerAngles),
    /// Rotation by `angle_deg` about a fixed axis
    AxisAngle {
        axis: Unit<Vector3<f32>>,
        angle_deg: f32,
    },
    /// Explicit extrinsic rotation matrix
    WorldSpace(Rotation3<f32>),
}

impl Rotation {
    pub fn identity() -> Self {
        Rotation::WorldSpace(Rotation3::identity())
    }

    pub fn euler(x: f32, y: f32, z: f32) -> Self {
        Rotation::ModelSpace(EulerAngles::new(x, y, z))
    }

    /// Axis-angle rotation; the axis must be non-zero
    pub fn axis_angle(axis: Vector3<f32>, angle_deg: f32) -> Result<Self> {
        let axis = Unit::try_new(axis, EPSILON).ok_or(ShapeError::ZeroVector("rotation axis"))?;
        Ok(Rotation::AxisAngle { axis, angle_deg })
    }

    pub fn to_rotation3(&self) -> Rotation3<f32> {
        match self {
            Rotation::ModelSpace(angles) => angles.to_rotation(),
            Rotation::AxisAngle { axis, angle_deg } => {
                Rotation3::from_axis_angle(axis, angle_deg.to_radians())
            }
            Rotation::WorldSpace(matrix) => *matrix,
        }
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}

/// Scale, rotation and translation of a shape, applied in that order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: Vector3<f32>,
    pub rotation: Rotation,
    pub translation: Vector3<f32>,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation: Rotation::identity(),
            translation: Vector3::zeros(),
        }
    }

    pub fn set_scale(&mut self, x: f32, y: f32, z: f32) {
        self.scale = Vector3::new(x, y, z);
    }

    pub fn set_uniform_scale(&mut self, factor: f32) {
        self.scale = Vector3::repeat(factor);
    }

    pub fn set_scale_x(&mut self, x: f32) {
        self.scale.x = x;
    }

    pub fn set_scale_y(&mut self, y: f32) {
        self.scale.y = y;
    }

    pub fn set_scale_z(&mut self, z: f32) {
        self.scale.z = z;
    }

    pub fn set_translation(&mut self, x: f32, y: f32, z: f32) {
        self.translation = Vector3::new(x, y, z);
    }

    pub fn set_trans_x(&mut self, x: f32) {
        self.translation.x = x;
    }

    pub fn set_trans_y(&mut self, y: f32) {
        self.translation.y = y;
    }

    pub fn set_trans_z(&mut self, z: f32) {
        self.translation.z = z;
    }

    pub fn translate(&mut self, delta: &Vector3<f32>) {
        self.translation += delta;
    }

    /// Replace the rotation with intrinsic Euler angles (degrees, X then Z then Y)
    pub fn set_rotation_by_euler_angles(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Rotation::euler(x, y, z);
    }

    pub fn set_rotation_axis_angle(&mut self, axis: Vector3<f32>, angle_deg: f32) -> Result<()> {
        self.rotation = Rotation::axis_angle(axis, angle_deg)?;
        Ok(())
    }

    /// Replace the rotation wholesale with an explicit world-space matrix
    pub fn set_rotation_matrix(&mut self, matrix: Rotation3<f32>) {
        self.rotation = Rotation::WorldSpace(matrix);
    }

    pub fn rotation_matrix(&self) -> Rotation3<f32> {
        self.rotation.to_rotation3()
    }

    /// Compose an extra rotation onto the current one.
    ///
    /// World space pre-multiplies (global axes), model space post-multiplies
    /// (the shape's own axes). Either way the result is stored as a matrix.
    pub fn rotate(&mut self, space: RotationSpace, axis: &Unit<Vector3<f32>>, angle_deg: f32) {
        let delta = Rotation3::from_axis_angle(axis, angle_deg.to_radians());
        let current = self.rotation_matrix();
        let combined = match space {
            RotationSpace::World => delta * current,
            RotationSpace::Model => current * delta,
        };
        self.rotation = Rotation::WorldSpace(combined);
    }

    /// Rotate so that local `axis` points along `direction`.
    ///
    /// Uses the shortest arc from the local axis to the (optionally flipped)
    /// direction, then rolls `extra_roll_deg` around the aligned axis. The
    /// result does not depend on the previous rotation, so repeating a call is a no-op.
    pub fn align_with(
        &mut self,
        axis: Axis,
        direction: Vector3<f32>,
        flip: bool,
        extra_roll_deg: f32,
    ) -> Result<()> {
        let mut target = Unit::try_new(direction, EPSILON)
            .ok_or(ShapeError::ZeroVector("alignment direction"))?;
        if flip {
            target = -target;
        }

        let local = axis.unit();
        let base = UnitQuaternion::rotation_between_axis(&local, &target).unwrap_or_else(|| {
            // Anti-parallel: any half turn about an axis perpendicular to `local` works
            let helper = if local.x.abs() < 0.9 {
                Vector3::x()
            } else {
                Vector3::y()
            };
            let perpendicular = Unit::new_normalize(local.cross(&helper));
            warn!(
                "alignment direction is opposite to local axis {:?}; turning about {:?}",
                axis,
                perpendicular.as_ref()
            );
            UnitQuaternion::from_axis_angle(&perpendicular, std::f32::consts::PI)
        });

        let roll = UnitQuaternion::from_axis_angle(&target, extra_roll_deg.to_radians());
        self.rotation = Rotation::WorldSpace((roll * base).to_rotation_matrix());
        Ok(())
    }

    /// Model matrix: translation * rotation * scale
    pub fn model_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_translation(&self.translation)
            * self.rotation_matrix().to_homogeneous()
            * Matrix4::new_nonuniform_scaling(&self.scale)
    }

    pub fn transform_point(&self, point: &Point3<f32>) -> Point3<f32> {
        let scaled = point.coords.component_mul(&self.scale);
        Point3::from(self.rotation_matrix() * scaled + self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
