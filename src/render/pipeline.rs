use crate::engine::Engine;
use crate::engine::config::BackdropConfig;
use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::{BackdropError, BackdropResult};
use crate::render::frame::FrameRGBA;
use crate::schedule::{FixedRateScheduler, FrameScheduler, RealtimeScheduler};
use crate::surface::CpuSurface;

/// Counters reported by the offline render helpers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames the engine actually drew (skipped empty frames excluded).
    pub frames_drawn: u64,
    /// Frames handed to the sink.
    pub frames_emitted: u64,
}

/// Render frame `frame` of `config` deterministically.
///
/// The surface keeps trails, so every earlier frame is simulated first.
pub fn render_frame(config: &BackdropConfig, frame: FrameIndex) -> BackdropResult<FrameRGBA> {
    let range = FrameRange::new(frame, FrameIndex(frame.0.saturating_add(1)))?;
    let mut out = None;
    render_frames(config, range, &mut |_, f| {
        out = Some(f.clone());
        Ok(())
    })?;
    out.ok_or_else(|| BackdropError::surface("no frame was produced"))
}

/// Render `range` deterministically, at `config.fps` of simulated time per frame.
#[tracing::instrument(skip(config, sink))]
pub fn render_frames(
    config: &BackdropConfig,
    range: FrameRange,
    sink: &mut dyn FnMut(FrameIndex, &FrameRGBA) -> BackdropResult<()>,
) -> BackdropResult<RenderStats> {
    config.validate()?;
    drive(config, FixedRateScheduler::new(config.fps), range, sink)
}

/// Render `range` paced against the wall clock, as a browser would at `config.fps`.
#[tracing::instrument(skip(config, sink))]
pub fn render_frames_realtime(
    config: &BackdropConfig,
    range: FrameRange,
    sink: &mut dyn FnMut(FrameIndex, &FrameRGBA) -> BackdropResult<()>,
) -> BackdropResult<RenderStats> {
    config.validate()?;
    drive(config, RealtimeScheduler::new(config.fps), range, sink)
}

fn drive<S: FrameScheduler>(
    config: &BackdropConfig,
    scheduler: S,
    range: FrameRange,
    sink: &mut dyn FnMut(FrameIndex, &FrameRGBA) -> BackdropResult<()>,
) -> BackdropResult<RenderStats> {
    let mut surface = CpuSurface::new(config.viewport)?;
    let mut engine = Engine::new(scheduler, config.seed);
    engine
        .start(&mut surface, config.variant, config.theme)
        .ok_or_else(|| BackdropError::surface("surface has no drawing context"))?;

    let mut stats = RenderStats::default();
    for f in 0..range.end.0 {
        // Frame 0 is drawn synchronously by `start`.
        if f > 0 {
            engine.pump(&mut surface);
        }
        let idx = FrameIndex(f);
        if range.contains(idx) {
            let frame = surface.snapshot();
            sink(idx, &frame)?;
            stats.frames_emitted += 1;
        }
    }
    stats.frames_drawn = engine.frames_rendered();
    engine.shutdown();

    tracing::debug!(
        drawn = stats.frames_drawn,
        emitted = stats.frames_emitted,
        "render finished"
    );
    Ok(stats)
}
