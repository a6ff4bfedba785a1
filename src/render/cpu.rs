use crate::foundation::core::{Canvas, Point, Rgba8};
use crate::foundation::error::{ViewerError, ViewerResult};
use crate::render::plan::DrawOp;
use crate::render::surface::{FrameRGBA, Surface};
use crate::render::text::StatusTextEngine;

/// CPU raster surface powered by `vello_cpu`.
///
/// Status text is rasterized with the host's sans-serif font and also carried on the frame as
/// [`FrameRGBA::overlay_text`].
pub struct CpuSurface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
    ctx: Option<vello_cpu::RenderContext>,
    text: StatusTextEngine,
    overlay_text: Vec<String>,
}

impl CpuSurface {
    /// Allocate a surface of the given size.
    pub fn new(canvas: Canvas) -> ViewerResult<Self> {
        let (width, height) = canvas_to_u16(canvas)?;
        Ok(Self {
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
            ctx: None,
            text: StatusTextEngine::new(),
            overlay_text: Vec::new(),
        })
    }

    /// Copy the last finished frame out of the surface.
    pub fn frame(&self) -> FrameRGBA {
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
            overlay_text: self.overlay_text.clone(),
        }
    }

    fn ctx_mut(&mut self) -> ViewerResult<&mut vello_cpu::RenderContext> {
        self.ctx
            .as_mut()
            .ok_or_else(|| ViewerError::render("cpu surface used outside begin/finish"))
    }
}

impl Surface for CpuSurface {
    fn begin(&mut self, canvas: Canvas) -> ViewerResult<()> {
        let (width, height) = canvas_to_u16(canvas)?;
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.pixmap = vello_cpu::Pixmap::new(width, height);
        }
        self.overlay_text.clear();
        self.ctx = Some(vello_cpu::RenderContext::new(width, height));
        Ok(())
    }

    fn draw(&mut self, op: &DrawOp) -> ViewerResult<()> {
        let (width, height) = (self.width, self.height);
        match op {
            DrawOp::Clear { color } => {
                let ctx = self.ctx_mut()?;
                ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                ctx.set_paint(to_cpu_color(*color));
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                    0.0,
                    0.0,
                    f64::from(width),
                    f64::from(height),
                ));
            }
            DrawOp::Line {
                from,
                to,
                color,
                width,
            } => {
                if !(finite(*from) && finite(*to)) {
                    return Ok(());
                }
                let mut path = vello_cpu::kurbo::BezPath::new();
                path.move_to(point_to_cpu(*from));
                path.line_to(point_to_cpu(*to));
                stroke(self.ctx_mut()?, &path, *color, *width);
            }
            DrawOp::Triangle {
                points,
                color,
                width,
                ..
            } => {
                if !points.iter().all(|p| finite(*p)) {
                    return Ok(());
                }
                let mut path = vello_cpu::kurbo::BezPath::new();
                path.move_to(point_to_cpu(points[0]));
                path.line_to(point_to_cpu(points[1]));
                path.line_to(point_to_cpu(points[2]));
                path.close_path();
                stroke(self.ctx_mut()?, &path, *color, *width);
            }
            DrawOp::Status {
                lines,
                anchor,
                line_height,
                color,
            } => {
                let ctx = self
                    .ctx
                    .as_mut()
                    .ok_or_else(|| ViewerError::render("cpu surface used outside begin/finish"))?;
                self.text
                    .draw_lines(ctx, lines, *anchor, *line_height, *color);
                self.overlay_text.extend(lines.iter().cloned());
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> ViewerResult<()> {
        let mut ctx = self
            .ctx
            .take()
            .ok_or_else(|| ViewerError::render("cpu surface finished without begin"))?;
        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);
        Ok(())
    }
}

fn stroke(ctx: &mut vello_cpu::RenderContext, path: &vello_cpu::kurbo::BezPath, color: Rgba8, width: f32) {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(to_cpu_color(color));
    ctx.set_stroke(vello_cpu::kurbo::Stroke::new(f64::from(width)));
    ctx.stroke_path(path);
}

fn canvas_to_u16(canvas: Canvas) -> ViewerResult<(u16, u16)> {
    let width: u16 = canvas
        .width
        .try_into()
        .map_err(|_| ViewerError::render("surface width exceeds u16"))?;
    let height: u16 = canvas
        .height
        .try_into()
        .map_err(|_| ViewerError::render("surface height exceeds u16"))?;
    if width == 0 || height == 0 {
        return Err(ViewerError::render("surface width/height must be non-zero"));
    }
    Ok((width, height))
}

fn to_cpu_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn finite(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}
