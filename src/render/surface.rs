use crate::foundation::core::Canvas;
use crate::foundation::error::ViewerResult;
use crate::render::plan::{DrawOp, FramePlan};

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
    /// Status lines drawn into this frame, as plain text.
    pub overlay_text: Vec<String>,
}

/// A drawing target that executes [`FramePlan`]s.
pub trait Surface {
    /// Prepare to draw a plan of the given size.
    fn begin(&mut self, canvas: Canvas) -> ViewerResult<()>;
    /// Execute one operation.
    fn draw(&mut self, op: &DrawOp) -> ViewerResult<()>;
    /// Flush pending work; called once after the last op.
    fn finish(&mut self) -> ViewerResult<()>;
}

/// Run every operation of `plan` against `surface`.
///
/// An empty plan leaves the surface untouched.
pub fn execute_plan<S: Surface + ?Sized>(surface: &mut S, plan: &FramePlan) -> ViewerResult<()> {
    if plan.is_empty() {
        return Ok(());
    }
    surface.begin(plan.canvas)?;
    for op in &plan.ops {
        surface.draw(op)?;
    }
    surface.finish()
}

/// Surface that records the operations it receives.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    canvas: Option<Canvas>,
    ops: Vec<DrawOp>,
    frames: usize,
}

impl RecordingSurface {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Canvas of the last plan, if any plan was executed.
    pub fn canvas(&self) -> Option<Canvas> {
        self.canvas
    }

    /// Operations of the last plan.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Number of completed plans.
    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl Surface for RecordingSurface {
    fn begin(&mut self, canvas: Canvas) -> ViewerResult<()> {
        self.canvas = Some(canvas);
        self.ops.clear();
        Ok(())
    }

    fn draw(&mut self, op: &DrawOp) -> ViewerResult<()> {
        self.ops.push(op.clone());
        Ok(())
    }

    fn finish(&mut self) -> ViewerResult<()> {
        self.frames += 1;
        Ok(())
    }
}
