use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::foundation::core::{Point, Vec3};

/// Margin kept between the elevation clamp and the poles.
pub const ELEVATION_MARGIN: f32 = 0.1;
/// Largest allowed elevation; the smallest is its negation.
pub const MAX_ELEVATION: f32 = FRAC_PI_2 - ELEVATION_MARGIN;
/// Closest orbit distance.
pub const MIN_DISTANCE: f32 = 1.0;
/// Farthest orbit distance.
pub const MAX_DISTANCE: f32 = 10.0;
/// Default radians per pixel of drag.
pub const DEFAULT_DRAG_SENSITIVITY: f32 = 0.01;
/// Default distance units per wheel delta unit.
pub const DEFAULT_ZOOM_SENSITIVITY: f32 = 0.01;

/// Orbital camera: a look-at target plus a spherical offset.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraState {
    /// Point the camera looks at.
    pub target: Vec3,
    /// Rotation about the vertical axis, radians, wrapped into `[-PI, PI)`.
    pub azimuth: f32,
    /// Tilt above the horizon, radians, within `[-MAX_ELEVATION, MAX_ELEVATION]`.
    pub elevation: f32,
    /// Distance from target, within `[MIN_DISTANCE, MAX_DISTANCE]`.
    pub distance: f32,
    /// Screen position the camera-space origin projects to.
    pub center_x: f32,
    /// See `center_x`.
    pub center_y: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            target: Vec3::new(0.0, 0.9, 0.0),
            azimuth: 0.0,
            elevation: 0.3,
            distance: 3.0,
            center_x: 256.0,
            center_y: 256.0,
        }
    }
}

impl CameraState {
    /// Build a camera, clamping the angles and distance into their legal ranges.
    pub fn new(target: Vec3, azimuth: f32, elevation: f32, distance: f32, center: Point) -> Self {
        Self {
            target,
            azimuth: wrap_angle(finite_or(azimuth, 0.0)),
            elevation: clamp_elevation(finite_or(elevation, 0.0)),
            distance: clamp_distance(finite_or(distance, MIN_DISTANCE)),
            center_x: center.x as f32,
            center_y: center.y as f32,
        }
    }

    /// Unit vector from target towards the camera.
    pub fn direction(&self) -> Vec3 {
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        let (sin_el, cos_el) = self.elevation.sin_cos();
        Vec3::new(cos_el * sin_az, sin_el, cos_el * cos_az)
    }

    /// World-space camera position, derived from target and spherical offset.
    pub fn position(&self) -> Vec3 {
        self.target + self.distance * self.direction()
    }

    /// Screen center as a point.
    pub fn center(&self) -> Point {
        Point::new(f64::from(self.center_x), f64::from(self.center_y))
    }

    /// Move the projected origin to `center`.
    pub fn with_center(self, center: Point) -> Self {
        Self {
            center_x: center.x as f32,
            center_y: center.y as f32,
            ..self
        }
    }

    /// Look at `target`, keeping the spherical offset.
    pub fn with_target(self, target: Vec3) -> Self {
        if !target.is_finite() {
            return self;
        }
        Self { target, ..self }
    }
}

/// Apply a drag gesture of `(dx, dy)` pixels with the default sensitivity.
pub fn apply_drag(camera: CameraState, dx: f32, dy: f32) -> CameraState {
    apply_drag_with(camera, dx, dy, DEFAULT_DRAG_SENSITIVITY)
}

/// Apply a drag gesture: `azimuth -= dx*s`, `elevation += dy*s`, then clamp.
///
/// Non-finite input leaves the camera unchanged.
pub fn apply_drag_with(camera: CameraState, dx: f32, dy: f32, sensitivity: f32) -> CameraState {
    let d_az = dx * sensitivity;
    let d_el = dy * sensitivity;
    if !d_az.is_finite() || !d_el.is_finite() {
        return camera;
    }
    CameraState {
        azimuth: wrap_angle(camera.azimuth - d_az),
        elevation: clamp_elevation(camera.elevation + d_el),
        ..camera
    }
}

/// Apply a wheel gesture with the default sensitivity.
pub fn apply_zoom(camera: CameraState, delta_y: f32) -> CameraState {
    apply_zoom_with(camera, delta_y, DEFAULT_ZOOM_SENSITIVITY)
}

/// Apply a wheel gesture: `distance += delta_y*s`, then clamp into `[1, 10]`.
///
/// Non-finite input leaves the camera unchanged.
pub fn apply_zoom_with(camera: CameraState, delta_y: f32, sensitivity: f32) -> CameraState {
    let d = delta_y * sensitivity;
    if !d.is_finite() {
        return camera;
    }
    CameraState {
        distance: clamp_distance(camera.distance + d),
        ..camera
    }
}

fn clamp_elevation(el: f32) -> f32 {
    if el.is_nan() {
        return 0.0;
    }
    el.clamp(-MAX_ELEVATION, MAX_ELEVATION)
}

fn clamp_distance(d: f32) -> f32 {
    if d.is_nan() {
        return MIN_DISTANCE;
    }
    d.clamp(MIN_DISTANCE, MAX_DISTANCE)
}

fn wrap_angle(a: f32) -> f32 {
    if !a.is_finite() {
        return 0.0;
    }
    let wrapped = (a + PI).rem_euclid(TAU) - PI;
    // rem_euclid can round up to TAU for tiny negative inputs
    if wrapped >= PI { -PI } else { wrapped }
}

fn finite_or(v: f32, fallback: f32) -> f32 {
    if v.is_finite() { v } else { fallback }
}

#[cfg(test)]
#[path = "../../tests/unit/camera/orbit.rs"]
mod tests;
