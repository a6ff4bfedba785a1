pub(crate) mod cpu;
pub(crate) mod plan;
pub(crate) mod surface;
pub(crate) mod text;

use crate::camera::orbit::CameraState;
use crate::config::RenderStyle;
use crate::format::data::AnimationData;
use crate::foundation::core::{Canvas, FrameIndex};
use crate::foundation::error::ViewerResult;

/// Compile and execute one redraw against `surface`.
///
/// With no animation only the placeholder is drawn; an out-of-range frame draws nothing.
pub fn render_frame(
    data: Option<&AnimationData>,
    frame: FrameIndex,
    camera: &CameraState,
    style: &RenderStyle,
    canvas: Canvas,
    surface: &mut dyn surface::Surface,
) -> ViewerResult<()> {
    let plan = plan::compile_frame(data, frame, camera, style, canvas);
    surface::execute_plan(surface, &plan)
}
