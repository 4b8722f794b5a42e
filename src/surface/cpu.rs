use crate::foundation::core::{Affine, BezPath, Rect, Rgba, SurfaceSize, Viewport};
use crate::foundation::error::{BackdropError, BackdropResult};
use crate::render::frame::FrameRGBA;
use crate::surface::{LinearGradient, Paint, Surface};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct GradientKey {
    start: [u64; 2],
    end: [u64; 2],
    from: [u8; 4],
    to: [u8; 4],
}

impl GradientKey {
    fn new(g: &LinearGradient) -> Self {
        Self {
            start: [g.start.x.to_bits(), g.start.y.to_bits()],
            end: [g.end.x.to_bits(), g.end.y.to_bits()],
            from: g.from.to_premul().to_array(),
            to: g.to.to_premul().to_array(),
        }
    }
}

enum CpuPaint {
    Solid(vello_cpu::peniko::Color),
    Image(vello_cpu::Image),
}

/// CPU raster surface powered by `vello_cpu`.
///
/// The backing pixmap is premultiplied RGBA8 in device pixels and persists across frames.
/// Draw calls of a frame are queued into one render context that starts by repainting the
/// previous content; [`Surface::present`] rasterizes the queue back into the pixmap.
pub struct CpuSurface {
    viewport: Viewport,
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
    ctx: Option<vello_cpu::RenderContext>,
    // Keyed on logical geometry; cleared on resize since the device scale may change.
    gradient_cache: HashMap<GradientKey, vello_cpu::Image>,
}

impl CpuSurface {
    /// Allocate a transparent surface for `viewport`.
    pub fn new(viewport: Viewport) -> BackdropResult<Self> {
        let (width, height) = device_dims(viewport)?;
        Ok(Self {
            viewport,
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
            ctx: None,
            gradient_cache: HashMap::new(),
        })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Backing buffer size in device pixels.
    pub fn device_size(&self) -> (u32, u32) {
        (u32::from(self.width), u32::from(self.height))
    }

    /// Flush queued drawing and copy the current pixels out.
    pub fn snapshot(&mut self) -> FrameRGBA {
        self.flush();
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    fn device_transform(&self) -> Affine {
        Affine::scale(self.viewport.dpr())
    }

    fn frame_ctx(&mut self) -> Option<&mut vello_cpu::RenderContext> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        if self.ctx.is_none() {
            let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
            let previous = std::mem::replace(
                &mut self.pixmap,
                vello_cpu::Pixmap::new(self.width, self.height),
            );
            ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(vello_cpu::Image {
                image: vello_cpu::ImageSource::Pixmap(Arc::new(previous)),
                sampler: vello_cpu::peniko::ImageSampler::default(),
            });
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(self.width),
                f64::from(self.height),
            ));
            self.ctx = Some(ctx);
        }
        self.ctx.as_mut()
    }

    fn flush(&mut self) {
        if let Some(mut ctx) = self.ctx.take() {
            ctx.flush();
            ctx.render_to_pixmap(&mut self.pixmap);
        }
    }

    fn cpu_paint(&mut self, paint: &Paint) -> Option<CpuPaint> {
        match paint {
            Paint::Solid(c) => Some(CpuPaint::Solid(color_to_cpu(*c))),
            Paint::Linear(g) => self.gradient_paint(g).map(CpuPaint::Image),
        }
    }

    fn gradient_paint(&mut self, g: &LinearGradient) -> Option<vello_cpu::Image> {
        let key = GradientKey::new(g);
        if let Some(img) = self.gradient_cache.get(&key).cloned() {
            return Some(img);
        }

        let tr = self.device_transform();
        let p0 = tr * g.start;
        let p1 = tr * g.end;
        let axis = p1 - p0;
        let len2 = axis.hypot2();
        // A zero-length gradient paints nothing.
        if len2.is_nan() || len2 <= 0.0 {
            return None;
        }

        let from = g.from.to_premul();
        let to = g.to.to_premul();
        let w = usize::from(self.width);
        let h = usize::from(self.height);
        let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(w * h);
        for y in 0..h {
            let py = y as f64 + 0.5 - p0.y;
            for x in 0..w {
                let px = x as f64 + 0.5 - p0.x;
                let t = (px * axis.x + py * axis.y) / len2;
                let [r, g, b, a] = from.lerp(to, t).to_array();
                pixels.push(vello_cpu::peniko::color::PremulRgba8 { r, g, b, a });
            }
        }
        let pixmap =
            vello_cpu::Pixmap::from_parts_with_opacity(pixels, self.width, self.height, true);
        let img = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.gradient_cache.insert(key, img.clone());
        Some(img)
    }
}

impl Surface for CpuSurface {
    fn size(&self) -> SurfaceSize {
        self.viewport.logical_size()
    }

    fn resize(&mut self, viewport: Viewport) -> BackdropResult<()> {
        let (width, height) = device_dims(viewport)?;
        self.viewport = viewport;
        self.width = width;
        self.height = height;
        self.ctx = None;
        self.pixmap = vello_cpu::Pixmap::new(width, height);
        self.gradient_cache.clear();
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        let mut path = BezPath::new();
        path.move_to((rect.x0, rect.y0));
        path.line_to((rect.x1, rect.y0));
        path.line_to((rect.x1, rect.y1));
        path.line_to((rect.x0, rect.y1));
        path.close_path();
        self.fill_path(&path, paint);
    }

    fn fill_path(&mut self, path: &BezPath, paint: &Paint) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let Some(paint) = self.cpu_paint(paint) else {
            return;
        };
        let cpu_path = bezpath_to_cpu(path, self.device_transform());
        let Some(ctx) = self.frame_ctx() else {
            return;
        };
        match paint {
            CpuPaint::Solid(c) => ctx.set_paint(c),
            CpuPaint::Image(img) => ctx.set_paint(img),
        }
        ctx.fill_path(&cpu_path);
    }

    fn stroke_path(&mut self, path: &BezPath, width: f64, color: Rgba) {
        let dpr = self.viewport.dpr();
        let cpu_path = bezpath_to_cpu(path, self.device_transform());
        let Some(ctx) = self.frame_ctx() else {
            return;
        };
        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width * dpr));
        ctx.set_paint(color_to_cpu(color));
        ctx.stroke_path(&cpu_path);
    }

    fn present(&mut self) {
        self.flush();
    }
}

fn device_dims(viewport: Viewport) -> BackdropResult<(u16, u16)> {
    let (w, h) = viewport.device_size();
    let w: u16 = w
        .try_into()
        .map_err(|_| BackdropError::surface(format!("surface width exceeds u16: {w}")))?;
    let h: u16 = h
        .try_into()
        .map_err(|_| BackdropError::surface(format!("surface height exceeds u16: {h}")))?;
    Ok((w, h))
}

fn color_to_cpu(c: Rgba) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.alpha_u8())
}

fn bezpath_to_cpu(path: &BezPath, tr: Affine) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| {
        let p = tr * p;
        vello_cpu::kurbo::Point::new(p.x, p.y)
    };
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/surface/cpu.rs"]
mod tests;
