use std::collections::HashMap;

use crate::foundation::core::{Point, Rgba8};

/// Pixel size of status text.
pub(crate) const STATUS_FONT_SIZE: f32 = 16.0;

const STATUS_FONT_STACK: &str = "sans-serif";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Lays out status lines with the host's sans-serif font and draws them with `vello_cpu`.
///
/// Font blobs resolved by Parley are converted once and cached for the life of the engine.
pub(crate) struct StatusTextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    fonts: HashMap<(u64, u32), vello_cpu::peniko::FontData>,
}

impl Default for StatusTextEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusTextEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            fonts: HashMap::new(),
        }
    }

    fn layout_line(&mut self, text: &str, color: Rgba8) -> parley::Layout<TextBrushRgba8> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Borrowed(STATUS_FONT_STACK)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(STATUS_FONT_SIZE));
        builder.push_default(parley::style::StyleProperty::Brush(color.into()));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }

    /// Draw `lines` centered horizontally on `anchor.x`, stacked `line_height` apart and centered
    /// vertically on `anchor.y`.
    ///
    /// A line that shapes to no glyphs (no usable font on the host) is drawn as a bar of roughly
    /// the text's width so the placeholder stays visible.
    pub(crate) fn draw_lines(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        lines: &[String],
        anchor: Point,
        line_height: f64,
        color: Rgba8,
    ) {
        let first_offset = -(lines.len().saturating_sub(1) as f64) * line_height / 2.0;
        for (i, text) in lines.iter().enumerate() {
            if text.trim().is_empty() {
                continue;
            }
            let center = Point::new(anchor.x, anchor.y + first_offset + i as f64 * line_height);
            if !(center.x.is_finite() && center.y.is_finite()) {
                continue;
            }
            let drawn = self.draw_line(ctx, text, center, color);
            if drawn == 0 {
                tracing::debug!(line = %text, "no glyphs shaped for status text, drawing bar");
                draw_text_bar(ctx, text, center, color);
            }
        }
    }

    fn draw_line(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        center: Point,
        color: Rgba8,
    ) -> usize {
        let layout = self.layout_line(text, color);
        let left = center.x - f64::from(layout.width()) / 2.0;
        let top = center.y - f64::from(layout.height()) / 2.0;
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((left, top)));

        let mut drawn = 0;
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs: Vec<vello_cpu::Glyph> = run
                    .positioned_glyphs()
                    .map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    })
                    .collect();
                if glyphs.is_empty() {
                    continue;
                }
                drawn += glyphs.len();

                let font = run.run().font();
                let font = self
                    .fonts
                    .entry((font.data.id(), font.index))
                    .or_insert_with(|| {
                        vello_cpu::peniko::FontData::new(
                            vello_cpu::peniko::Blob::from(font.data.data().to_vec()),
                            font.index,
                        )
                    });
                ctx.glyph_run(font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs.into_iter());
            }
        }
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        drawn
    }
}

fn draw_text_bar(ctx: &mut vello_cpu::RenderContext, text: &str, center: Point, color: Rgba8) {
    let half_width = f64::from(STATUS_FONT_SIZE) * 0.25 * text.chars().count() as f64;
    let half_height = f64::from(STATUS_FONT_SIZE) * 0.2;
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        color.r, color.g, color.b, color.a,
    ));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        center.x - half_width,
        center.y - half_height,
        center.x + half_width,
        center.y + half_height,
    ));
}
