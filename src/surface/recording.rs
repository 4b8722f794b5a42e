use crate::foundation::core::{BezPath, Rect, Rgba, SurfaceSize, Viewport};
use crate::foundation::error::BackdropResult;
use crate::surface::{DrawCmd, Paint, Surface};

/// Display-list surface: keeps every drawing command instead of rasterizing.
///
/// Commands accumulate per frame; [`RecordingSurface::present`] closes the current frame.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    size: SurfaceSize,
    has_context: bool,
    current: Vec<DrawCmd>,
    frames: Vec<Vec<DrawCmd>>,
    resizes: usize,
}

impl RecordingSurface {
    /// Recording surface with a usable context.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            size: viewport.logical_size(),
            has_context: true,
            current: Vec::new(),
            frames: Vec::new(),
            resizes: 0,
        }
    }

    /// Surface whose drawing context is unavailable (e.g. not yet mounted).
    pub fn without_context(viewport: Viewport) -> Self {
        Self {
            has_context: false,
            ..Self::new(viewport)
        }
    }

    /// Commands of every presented frame, oldest first.
    pub fn frames(&self) -> &[Vec<DrawCmd>] {
        &self.frames
    }

    /// Commands of the most recently presented frame.
    pub fn last_frame(&self) -> Option<&[DrawCmd]> {
        self.frames.last().map(Vec::as_slice)
    }

    /// Commands issued since the last `present`.
    pub fn pending(&self) -> &[DrawCmd] {
        &self.current
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn resize_count(&self) -> usize {
        self.resizes
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn has_context(&self) -> bool {
        self.has_context
    }

    fn resize(&mut self, viewport: Viewport) -> BackdropResult<()> {
        self.size = viewport.logical_size();
        self.current.clear();
        self.resizes += 1;
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.current.push(DrawCmd::FillRect {
            rect,
            paint: *paint,
        });
    }

    fn fill_path(&mut self, path: &BezPath, paint: &Paint) {
        self.current.push(DrawCmd::FillPath {
            path: path.clone(),
            paint: *paint,
        });
    }

    fn stroke_path(&mut self, path: &BezPath, width: f64, color: Rgba) {
        self.current.push(DrawCmd::StrokePath {
            path: path.clone(),
            width,
            color,
        });
    }

    fn present(&mut self) {
        self.frames.push(std::mem::take(&mut self.current));
    }
}
