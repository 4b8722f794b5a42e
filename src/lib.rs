//! Backdrop is a procedural background animation engine.
//!
//! It renders one of three animated variants into a persistent 2D surface:
//!
//! - **Aurora**: five translucent ribbons whose control points oscillate on independent sines.
//! - **Waves**: three phase-drifting sine bands with a second harmonic.
//! - **Particles**: drifting discs that wrap at the edges, linked to near neighbours.
//!
//! # Architecture
//!
//! 1. **Surface** ([`Surface`]): a raster target with a path-and-fill API. The pixel buffer is
//!    never cleared; each frame starts with a translucent overpaint that leaves motion trails.
//! 2. **Scheduler** ([`FrameScheduler`]): the "call me before the next repaint" primitive,
//!    with cancellable [`FrameHandle`]s.
//! 3. **Engine** ([`Engine`]): owns variant state and the frame loop. `start` returns an
//!    [`EngineHandle`]; `stop` with that handle guarantees no further frame fires.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: randomness is injected ([`RandomSource`]) and offline
//!   rendering runs on a fixed-rate clock, so a seed reproduces a render byte for byte.
//! - **Premultiplied RGBA8**: the CPU surface stores and returns premultiplied pixels.
#![forbid(unsafe_code)]

mod engine;
mod foundation;
mod render;
mod schedule;
mod surface;
mod variants;

pub use engine::config::BackdropConfig;
pub use engine::{Engine, EngineHandle, EnginePhase};
pub use foundation::core::{
    Affine, BezPath, Fps, FrameIndex, FrameRange, Point, Rect, Rgba, Rgba8Premul, SurfaceSize,
    TRAIL_FADE_ALPHA, Theme, Variant, Vec2, Viewport,
};
pub use foundation::error::{BackdropError, BackdropResult};
pub use foundation::rng::{RandomSource, Rng64};
pub use render::frame::FrameRGBA;
pub use render::pipeline::{RenderStats, render_frame, render_frames, render_frames_realtime};
pub use schedule::{FixedRateScheduler, FrameHandle, FrameScheduler, RealtimeScheduler};
pub use surface::{CpuSurface, DrawCmd, LinearGradient, Paint, RecordingSurface, Surface, replay};
pub use variants::aurora::{AURORA_LAYERS, AURORA_POINTS, AuroraLayer, AuroraPoint};
pub use variants::particles::{LINK_DISTANCE, Particle, link_alpha, particle_count};
pub use variants::waves::{WAVE_COUNT, Wave};
pub use variants::{Aurora, FrameCtx, Particles, Renderer, VariantState, Waves};
