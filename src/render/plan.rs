use crate::camera::orbit::CameraState;
use crate::camera::project::{CameraBasis, ProjectedPoint};
use crate::config::RenderStyle;
use crate::format::data::AnimationData;
use crate::foundation::core::{Canvas, FrameIndex, Point, Rgba8, Vec3};

/// Half extent of the reference grid on the XZ-plane.
pub const GRID_HALF_EXTENT: i32 = 2;

/// Line spacing between placeholder text lines, in pixels.
const STATUS_LINE_HEIGHT: f64 = 25.0;

/// One drawing instruction, in screen space.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Fill the whole canvas.
    Clear {
        /// Fill color.
        color: Rgba8,
    },
    /// Stroke a straight segment.
    Line {
        /// Segment start.
        from: Point,
        /// Segment end.
        to: Point,
        /// Stroke color.
        color: Rgba8,
        /// Stroke width in pixels.
        width: f32,
    },
    /// Stroke a closed, unfilled triangle outline.
    Triangle {
        /// Index of the face in the animation's face list.
        face: u32,
        /// Mean camera-space depth of the three vertices.
        depth: f32,
        /// Screen-space corners.
        points: [Point; 3],
        /// Stroke color, alpha included.
        color: Rgba8,
        /// Stroke width in pixels.
        width: f32,
    },
    /// Centered status text, one entry per line.
    Status {
        /// Text lines, top to bottom.
        lines: Vec<String>,
        /// Screen position of the first line's center.
        anchor: Point,
        /// Line spacing in pixels.
        line_height: f64,
        /// Text color.
        color: Rgba8,
    },
}

/// Backend-agnostic drawing instructions for one redraw.
#[derive(Clone, Debug, PartialEq)]
pub struct FramePlan {
    /// Surface size the plan was compiled for.
    pub canvas: Canvas,
    /// Operations in drawing order.
    pub ops: Vec<DrawOp>,
}

impl FramePlan {
    /// Whether the plan draws nothing at all.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Face indices in the order they are drawn.
    pub fn face_order(&self) -> Vec<u32> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Triangle { face, .. } => Some(*face),
                _ => None,
            })
            .collect()
    }
}

/// Mean camera-space depth of a face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceDepth {
    /// Face index.
    pub face: u32,
    /// Sort key.
    pub depth: f32,
}

/// Sort faces farthest first (painter's algorithm).
///
/// The sort is stable: faces with equal depth keep their face-list order.
pub fn sort_far_to_near(faces: &mut [FaceDepth]) {
    faces.sort_by(|a, b| b.depth.total_cmp(&a.depth));
}

/// Compile the drawing instructions for one redraw.
///
/// - No animation: background plus the placeholder status text.
/// - `frame` outside `0..F`: an empty plan (nothing is drawn).
/// - Otherwise: background, the 5x5 reference grid, then every face farthest first.
#[tracing::instrument(level = "trace", skip_all, fields(frame = frame.0))]
pub fn compile_frame(
    data: Option<&AnimationData>,
    frame: FrameIndex,
    camera: &CameraState,
    style: &RenderStyle,
    canvas: Canvas,
) -> FramePlan {
    let Some(data) = data else {
        return placeholder_plan(style, canvas);
    };
    let Some(vertices) = data.frame(frame) else {
        tracing::debug!(
            frame = frame.0,
            frames = data.frames(),
            "frame out of range, nothing drawn"
        );
        return FramePlan {
            canvas,
            ops: Vec::new(),
        };
    };

    let basis = CameraBasis::new(camera);
    let mut ops = Vec::with_capacity(1 + grid_line_count() + data.faces().len());
    ops.push(DrawOp::Clear {
        color: style.background,
    });
    push_grid(&mut ops, &basis, style);

    let projected: Vec<ProjectedPoint> = vertices.iter().map(|&v| basis.project(v)).collect();
    let mut order: Vec<FaceDepth> = data
        .faces()
        .iter()
        .enumerate()
        .map(|(i, f)| FaceDepth {
            face: i as u32,
            depth: (projected[f[0] as usize].depth
                + projected[f[1] as usize].depth
                + projected[f[2] as usize].depth)
                / 3.0,
        })
        .collect();
    sort_far_to_near(&mut order);

    let color = style.mesh_stroke(data.mesh_color());
    for FaceDepth { face, depth } in order {
        let f = data.faces()[face as usize];
        ops.push(DrawOp::Triangle {
            face,
            depth,
            points: f.map(|v| projected[v as usize].screen()),
            color,
            width: style.line_width,
        });
    }

    FramePlan { canvas, ops }
}

fn placeholder_plan(style: &RenderStyle, canvas: Canvas) -> FramePlan {
    FramePlan {
        canvas,
        ops: vec![
            DrawOp::Clear {
                color: style.background,
            },
            DrawOp::Status {
                lines: style.placeholder.clone(),
                anchor: canvas.center(),
                line_height: STATUS_LINE_HEIGHT,
                color: style.text,
            },
        ],
    }
}

fn grid_line_count() -> usize {
    2 * (2 * GRID_HALF_EXTENT as usize + 1)
}

fn push_grid(ops: &mut Vec<DrawOp>, basis: &CameraBasis, style: &RenderStyle) {
    let e = GRID_HALF_EXTENT as f32;
    let mut line = |a: Vec3, b: Vec3| {
        ops.push(DrawOp::Line {
            from: basis.project(a).screen(),
            to: basis.project(b).screen(),
            color: style.grid,
            width: style.line_width,
        });
    };
    for i in -GRID_HALF_EXTENT..=GRID_HALF_EXTENT {
        let i = i as f32;
        line(Vec3::new(i, 0.0, -e), Vec3::new(i, 0.0, e));
        line(Vec3::new(-e, 0.0, i), Vec3::new(e, 0.0, i));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
