use std::fs::File;
use std::path::Path;

use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::core::Viewport;
use crate::error::{DashError, DashResult};
use crate::render::{
    Color, LineStrokeStyle, PolygonPrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign,
    TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub polygons_drawn: usize,
    pub texts_drawn: usize,
}

/// Cairo + Pango + PangoCairo renderer drawing into an offscreen image surface.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> DashResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(DashError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::WHITE,
            last_stats: CairoRenderStats::default(),
        })
    }

    /// Surface sized to a chart's logical viewport.
    pub fn for_viewport(viewport: Viewport) -> DashResult<Self> {
        let width = i32::try_from(viewport.width).map_err(|_| DashError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        })?;
        let height = i32::try_from(viewport.height).map_err(|_| DashError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        })?;
        Self::new(width, height)
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) -> DashResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Encodes the current surface content as PNG at `path`.
    pub fn write_png(&self, path: impl AsRef<Path>) -> DashResult<()> {
        let path = path.as_ref();
        let mut file = File::create(path)?;
        self.surface
            .write_to_png(&mut file)
            .map_err(|err| DashError::InvalidData(format!("failed to encode png: {err}")))?;
        Ok(())
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> DashResult<()> {
        frame.validate()?;
        self.clear_color.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        for line in &frame.lines {
            apply_color(context, line.color);
            context.set_line_width(line.stroke_width);
            match line.stroke_style {
                LineStrokeStyle::Solid => context.set_dash(&[], 0.0),
                LineStrokeStyle::Dashed { on_px, off_px } => {
                    context.set_dash(&[on_px, off_px], 0.0);
                }
            }
            context.move_to(line.x1, line.y1);
            context.line_to(line.x2, line.y2);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke line", err))?;
            stats.lines_drawn += 1;
        }
        context.set_dash(&[], 0.0);

        for rect in &frame.rects {
            draw_rect(context, *rect)?;
            stats.rects_drawn += 1;
        }

        for polygon in &frame.polygons {
            draw_polygon(context, polygon)?;
            stats.polygons_drawn += 1;
        }

        for text in &frame.texts {
            draw_text(context, text);
            stats.texts_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> DashResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn draw_rect(context: &Context, rect: RectPrimitive) -> DashResult<()> {
    context.rectangle(rect.x, rect.y, rect.width, rect.height);
    if let Some(fill) = rect.fill {
        apply_color(context, fill);
        if rect.border_width > 0.0 {
            context
                .fill_preserve()
                .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
        } else {
            return context
                .fill()
                .map_err(|err| map_backend_error("failed to fill rectangle", err));
        }
    }

    apply_color(context, rect.border_color);
    context.set_line_width(rect.border_width);
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke rectangle border", err))
}

fn draw_polygon(context: &Context, polygon: &PolygonPrimitive) -> DashResult<()> {
    let mut points = polygon.points.iter();
    if let Some(&(x, y)) = points.next() {
        context.move_to(x, y);
    }
    for &(x, y) in points {
        context.line_to(x, y);
    }
    context.close_path();
    apply_color(context, polygon.fill);
    context
        .fill()
        .map_err(|err| map_backend_error("failed to fill polygon", err))
}

fn draw_text(context: &Context, text: &TextPrimitive) {
    let layout = pangocairo::functions::create_layout(context);
    let mut font_description = FontDescription::from_string("Sans");
    font_description.set_absolute_size(text.font_size_px * f64::from(pango::SCALE));
    if text.bold {
        font_description.set_weight(pango::Weight::Bold);
    }
    layout.set_font_description(Some(&font_description));
    layout.set_text(&text.text);

    let (text_width, _text_height) = layout.pixel_size();
    let x = match text.h_align {
        TextHAlign::Left => text.x,
        TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
        TextHAlign::Right => text.x - f64::from(text_width),
    };
    let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);

    apply_color(context, text.color);
    context.move_to(x, text.y - baseline);
    pangocairo::functions::show_layout(context, &layout);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> DashError {
    DashError::InvalidData(format!("{prefix}: {err}"))
}
