//! Drawing surfaces the engine renders into.
//!
//! [`Surface`] is the 2D path-and-fill API consumed by the variants. All geometry handed to a
//! surface is in logical pixels; implementations apply the device pixel ratio themselves.

use crate::foundation::core::{BezPath, Point, Rect, Rgba, SurfaceSize, Viewport};
use crate::foundation::error::BackdropResult;

pub mod cpu;
pub mod recording;

/// Two-stop linear gradient between `start` and `end`, in logical coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearGradient {
    /// Point where the gradient is `from`.
    pub start: Point,
    /// Point where the gradient is `to`.
    pub end: Point,
    /// Color at offset 0.
    pub from: Rgba,
    /// Color at offset 1.
    pub to: Rgba,
}

impl LinearGradient {
    /// Gradient fading `color` to fully transparent along `start -> end`.
    pub fn fade_out(start: Point, end: Point, color: Rgba) -> Self {
        Self {
            start,
            end,
            from: color,
            to: Rgba::TRANSPARENT,
        }
    }
}

/// Fill style for rects and paths.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    /// Uniform color.
    Solid(Rgba),
    /// Linear gradient.
    Linear(LinearGradient),
}

/// One recorded drawing operation.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    /// `fillRect`
    FillRect {
        /// Rectangle in logical pixels.
        rect: Rect,
        /// Fill style.
        paint: Paint,
    },
    /// `fill()` of a constructed path.
    FillPath {
        /// Path in logical pixels.
        path: BezPath,
        /// Fill style.
        paint: Paint,
    },
    /// `stroke()` of a constructed path.
    StrokePath {
        /// Path in logical pixels.
        path: BezPath,
        /// Line width in logical pixels.
        width: f64,
        /// Stroke color including alpha.
        color: Rgba,
    },
}

/// A persistent raster target with a 2D drawing context.
///
/// Content is never cleared between frames by the surface; variants overpaint it with a
/// translucent fade instead.
pub trait Surface {
    /// Current logical size (dpr-corrected).
    fn size(&self) -> SurfaceSize;

    /// Whether a drawing context could be obtained. Engines refuse to start without one.
    fn has_context(&self) -> bool {
        true
    }

    /// Re-derive dimensions from `viewport`. Discards accumulated content.
    fn resize(&mut self, viewport: Viewport) -> BackdropResult<()>;

    /// Fill an axis-aligned rectangle, compositing source-over.
    fn fill_rect(&mut self, rect: Rect, paint: &Paint);

    /// Fill a closed path using the non-zero rule.
    fn fill_path(&mut self, path: &BezPath, paint: &Paint);

    /// Stroke a path with a solid color.
    fn stroke_path(&mut self, path: &BezPath, width: f64, color: Rgba);

    /// Mark the end of a frame. Raster backends flush queued work here.
    fn present(&mut self) {}
}

/// Apply a [`DrawCmd`] to any surface.
pub fn replay(surface: &mut dyn Surface, cmd: &DrawCmd) {
    match cmd {
        DrawCmd::FillRect { rect, paint } => surface.fill_rect(*rect, paint),
        DrawCmd::FillPath { path, paint } => surface.fill_path(path, paint),
        DrawCmd::StrokePath { path, width, color } => surface.stroke_path(path, *width, *color),
    }
}

pub use cpu::CpuSurface;
pub use recording::RecordingSurface;
