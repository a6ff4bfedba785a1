use crate::camera::orbit::CameraState;
use crate::foundation::core::{Point, Vec3};

/// Perspective scale numerator.
pub const FOCAL_SCALE: f32 = 300.0;
/// Floor applied to camera-space depth before dividing.
pub const MIN_DEPTH: f32 = 0.1;

const DEGENERATE_RIGHT_LEN: f32 = 1e-6;

/// A projected point: screen coordinates plus camera-space depth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedPoint {
    /// Screen x in pixels.
    pub x: f32,
    /// Screen y in pixels.
    pub y: f32,
    /// Camera-space depth along the forward axis (larger is farther).
    pub depth: f32,
}

impl ProjectedPoint {
    /// Screen position as a `kurbo` point.
    pub fn screen(self) -> Point {
        Point::new(f64::from(self.x), f64::from(self.y))
    }
}

/// Orthonormal camera frame for one camera state.
///
/// Building the basis once and reusing it for every vertex of a frame is what the renderer does;
/// [`project`] is the one-off convenience.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraBasis {
    /// World-space camera position.
    pub position: Vec3,
    /// Screen x axis.
    pub right: Vec3,
    /// Screen y axis.
    pub up: Vec3,
    /// Viewing direction.
    pub forward: Vec3,
    center_x: f32,
    center_y: f32,
}

impl CameraBasis {
    /// Build the (right, up, forward) basis for `camera`.
    pub fn new(camera: &CameraState) -> Self {
        let position = camera.position();
        let forward = (camera.target - position).normalize_or(Vec3::NEG_Z);

        // Looking straight up or down leaves world-up parallel to forward.
        let right_raw = Vec3::Y.cross(forward);
        let len = right_raw.length();
        let right = if len > DEGENERATE_RIGHT_LEN {
            right_raw / len
        } else {
            Vec3::X
        };
        let up = right.cross(forward);

        Self {
            position,
            right,
            up,
            forward,
            center_x: camera.center_x,
            center_y: camera.center_y,
        }
    }

    /// Camera-space coordinates `(x_c, y_c, z_c)` of a world point.
    pub fn to_camera_space(&self, p: Vec3) -> Vec3 {
        let d = p - self.position;
        Vec3::new(d.dot(self.right), d.dot(self.up), d.dot(self.forward))
    }

    /// Project a world point onto the screen.
    pub fn project(&self, p: Vec3) -> ProjectedPoint {
        let c = self.to_camera_space(p);
        let k = FOCAL_SCALE / c.z.max(MIN_DEPTH);
        ProjectedPoint {
            x: c.x * k + self.center_x,
            y: c.y * k + self.center_y,
            depth: c.z,
        }
    }
}

/// Project a world point through `camera`.
pub fn project(point: Vec3, camera: &CameraState) -> ProjectedPoint {
    CameraBasis::new(camera).project(point)
}

#[cfg(test)]
#[path = "../../tests/unit/camera/project.rs"]
mod tests;
