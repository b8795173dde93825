/// Orbiting camera and projection used by render surfaces
use nalgebra::{Matrix4, Point3, Vector3, Vector4};

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Camera orbiting a target point at a fixed distance
#[derive(Debug, Clone)]
pub struct Camera {
    pub target: Point3<f32>,
    pub distance: f32,
    /// Radians around +Y, zero looks down -Z
    pub yaw: f32,
    /// Radians above the horizon
    pub pitch: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub mode: ProjectionMode,
}

const MAX_PITCH: f32 = 1.5;

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            target: Point3::origin(),
            distance: 8.0,
            yaw: 0.0,
            pitch: 0.3,
            fov: std::f32::consts::PI / 4.0, // 45 degrees
            aspect: width as f32 / height.max(1) as f32,
            near: 0.1,
            far: 100.0,
            mode: ProjectionMode::Perspective,
        }
    }

    pub fn position(&self) -> Point3<f32> {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target
            + Vector3::new(sin_yaw * cos_pitch, sin_pitch, cos_yaw * cos_pitch) * self.distance
    }

    pub fn orbit(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw += d_yaw;
        self.pitch = (self.pitch + d_pitch).clamp(-MAX_PITCH, MAX_PITCH);
    }

    pub fn zoom(&mut self, factor: f32) {
        self.distance = (self.distance * factor).clamp(self.near * 2.0, self.far * 0.5);
    }

    /// Aim at the centre of a bounding box from far enough to see all of it
    pub fn frame_bounds(&mut self, min: &Point3<f32>, max: &Point3<f32>) {
        self.target = nalgebra::center(min, max);
        let radius = (max - min).norm() / 2.0;
        self.distance = (radius / (self.fov / 2.0).sin()).max(self.near * 2.0);
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position(), &self.target, &Vector3::y())
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        match self.mode {
            ProjectionMode::Perspective => {
                Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let height = self.distance;
                let width = height * self.aspect;
                Matrix4::new_orthographic(
                    -width / 2.0,
                    width / 2.0,
                    -height / 2.0,
                    height / 2.0,
                    self.near,
                    self.far,
                )
            }
        }
    }

    /// Project a world-space point to screen space as (x, y, depth)
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        view_projection: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let clip = view_projection * Vector4::new(point.x, point.y, point.z, 1.0);

        // Behind the camera or on the eye plane
        if clip.w <= 1e-6 {
            return None;
        }

        let ndc = clip.xyz() / clip.w;
        if ndc.z < -1.0 || ndc.z > 1.0 {
            return None;
        }

        // Convert to screen space; x/y outside the viewport are clipped by the rasterizer
        let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;

        Some((screen_x, screen_y, ndc.z))
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert_eq!(camera.mode, ProjectionMode::Perspective);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_target_projects_to_screen_centre() {
        let camera = Camera::new(80, 40);
        let (x, y, depth) = camera
            .project_to_screen(&camera.target, &camera.view_projection(), 80, 40)
            .unwrap();
        assert!((x - 40.0).abs() < 1e-3);
        assert!((y - 20.0).abs() < 1e-3);
        assert!(depth > -1.0 && depth < 1.0);
    }

    #[test]
    fn test_points_behind_camera_are_rejected() {
        let camera = Camera::new(80, 40);
        let behind = camera.position() + (camera.position() - camera.target);
        assert!(camera
            .project_to_screen(&behind, &camera.view_projection(), 80, 40)
            .is_none());
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = Camera::default();
        camera.orbit(0.0, 10.0);
        assert_eq!(camera.pitch, MAX_PITCH);
    }

    #[test]
    fn test_frame_bounds_centres_target() {
        let mut camera = Camera::default();
        camera.frame_bounds(&Point3::new(-1.0, 0.0, -1.0), &Point3::new(3.0, 2.0, 1.0));
        assert_eq!(camera.target, Point3::new(1.0, 1.0, 0.0));
        assert!(camera.distance > 3.0);
    }
}
