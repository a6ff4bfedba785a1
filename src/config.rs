//! Viewer configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all) yields the stock viewer.

use std::path::Path;

use anyhow::Context as _;

use crate::camera::orbit::{CameraState, DEFAULT_DRAG_SENSITIVITY, DEFAULT_ZOOM_SENSITIVITY};
use crate::foundation::color::parse_hex_color;
use crate::foundation::core::{Canvas, Rgba8, Vec3};
use crate::foundation::error::{ViewerError, ViewerResult};
use crate::format::data::DEFAULT_MESH_COLOR;

/// Initial camera parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    /// Look-at point before any animation is loaded.
    pub target: [f32; 3],
    /// Initial azimuth in radians.
    pub azimuth: f32,
    /// Initial elevation in radians.
    pub elevation: f32,
    /// Initial orbit distance.
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            target: [0.0, 0.9, 0.0],
            azimuth: 0.0,
            elevation: 0.3,
            distance: 3.0,
        }
    }
}

/// Complete viewer configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Background fill color.
    pub background: String,
    /// Reference grid color.
    pub grid_color: String,
    /// Placeholder text color.
    pub text_color: String,
    /// Alpha applied to every wireframe triangle.
    pub face_alpha: f32,
    /// Stroke width in pixels.
    pub line_width: f32,
    /// Radians per pixel of drag.
    pub drag_sensitivity: f32,
    /// Distance units per wheel delta unit.
    pub zoom_sensitivity: f32,
    /// Re-target the camera on the first frame's bounding-box center when data is loaded.
    pub auto_center: bool,
    /// Lines shown while no animation is loaded.
    pub placeholder: Vec<String>,
    /// Initial camera.
    pub camera: CameraConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            background: "#1a1a1a".to_owned(),
            grid_color: "#333333".to_owned(),
            text_color: "#666666".to_owned(),
            face_alpha: 0.5,
            line_width: 1.0,
            drag_sensitivity: DEFAULT_DRAG_SENSITIVITY,
            zoom_sensitivity: DEFAULT_ZOOM_SENSITIVITY,
            auto_center: true,
            placeholder: vec![
                "Waiting for SMPL data...".to_owned(),
                "Connect SMPL params from GVHMR Inference".to_owned(),
            ],
            camera: CameraConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json_str(s: &str) -> ViewerResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| ViewerError::validation(format!("parse viewer config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> ViewerResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read viewer config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Check ranges and colors.
    pub fn validate(&self) -> ViewerResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ViewerError::validation("canvas width/height must be non-zero"));
        }
        if !(0.0..=1.0).contains(&self.face_alpha) {
            return Err(ViewerError::validation("face_alpha must be within [0, 1]"));
        }
        if !self.line_width.is_finite() || self.line_width <= 0.0 {
            return Err(ViewerError::validation("line_width must be positive"));
        }
        if !self.drag_sensitivity.is_finite() || !self.zoom_sensitivity.is_finite() {
            return Err(ViewerError::validation("sensitivities must be finite"));
        }
        let c = &self.camera;
        if !c.target.iter().all(|v| v.is_finite())
            || !c.azimuth.is_finite()
            || !c.elevation.is_finite()
            || !c.distance.is_finite()
        {
            return Err(ViewerError::validation("camera parameters must be finite"));
        }
        self.style()?;
        Ok(())
    }

    /// Canvas described by `width`/`height`.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Initial camera state, centered on the canvas.
    pub fn initial_camera(&self) -> CameraState {
        let c = &self.camera;
        CameraState::new(
            Vec3::from_array(c.target),
            c.azimuth,
            c.elevation,
            c.distance,
            self.canvas().center(),
        )
    }

    /// Parsed render style.
    pub fn style(&self) -> ViewerResult<RenderStyle> {
        Ok(RenderStyle {
            background: parse_hex_color(&self.background)?,
            grid: parse_hex_color(&self.grid_color)?,
            text: parse_hex_color(&self.text_color)?,
            face_alpha: self.face_alpha,
            line_width: self.line_width,
            placeholder: self.placeholder.clone(),
        })
    }
}

/// Render-facing colors and stroke parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderStyle {
    /// Background fill.
    pub background: Rgba8,
    /// Reference grid stroke.
    pub grid: Rgba8,
    /// Placeholder text.
    pub text: Rgba8,
    /// Alpha applied to mesh strokes.
    pub face_alpha: f32,
    /// Stroke width in pixels.
    pub line_width: f32,
    /// Placeholder lines.
    pub placeholder: Vec<String>,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background: Rgba8::rgb(0x1a, 0x1a, 0x1a),
            grid: Rgba8::rgb(0x33, 0x33, 0x33),
            text: Rgba8::rgb(0x66, 0x66, 0x66),
            face_alpha: 0.5,
            line_width: 1.0,
            placeholder: ViewerConfig::default().placeholder,
        }
    }
}

impl RenderStyle {
    /// Stroke color for a mesh with display color `mesh_color`.
    ///
    /// Colors that do not parse fall back to [`DEFAULT_MESH_COLOR`].
    pub fn mesh_stroke(&self, mesh_color: &str) -> Rgba8 {
        let base = parse_hex_color(mesh_color).unwrap_or_else(|e| {
            tracing::warn!(color = mesh_color, error = %e, "unparseable mesh color, using default");
            parse_hex_color(DEFAULT_MESH_COLOR).unwrap_or(Rgba8::rgb(0x4a, 0x9e, 0xff))
        });
        base.with_alpha(self.face_alpha * (f32::from(base.a) / 255.0))
    }
}
