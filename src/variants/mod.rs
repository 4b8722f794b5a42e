//! Procedural background variants.
//!
//! Each variant owns its point/particle set, built once from the surface size, theme and a
//! random source, then advanced and painted once per frame.

use crate::foundation::core::{SurfaceSize, Theme, Variant};
use crate::foundation::rng::RandomSource;
use crate::surface::{Paint, Surface};

pub mod aurora;
pub mod particles;
pub mod waves;

pub use aurora::Aurora;
pub use particles::Particles;
pub use waves::Waves;

/// Per-frame inputs shared by all variants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameCtx {
    /// Seconds since the engine started this variant.
    pub elapsed_secs: f64,
    /// Surface size read at the start of this frame.
    pub size: SurfaceSize,
}

/// Strategy interface implemented by every variant.
pub trait Renderer {
    /// Advance state by one frame and paint it. `frame.size` is never empty here.
    fn render(&mut self, frame: &FrameCtx, surface: &mut dyn Surface);
}

/// The active variant's state. Exactly one exists per running engine.
#[derive(Clone, Debug)]
pub enum VariantState {
    /// Aurora ribbons.
    Aurora(Aurora),
    /// Layered sine waves.
    Waves(Waves),
    /// Drifting, linked particles.
    Particles(Particles),
}

impl VariantState {
    /// Build fresh state for `variant` sized to `size`.
    pub fn build(
        variant: Variant,
        theme: Theme,
        size: SurfaceSize,
        rng: &mut dyn RandomSource,
    ) -> Self {
        match variant {
            Variant::Aurora => Self::Aurora(Aurora::new(theme, size, rng)),
            Variant::Waves => Self::Waves(Waves::new(theme, size)),
            Variant::Particles => Self::Particles(Particles::new(theme, size, rng)),
        }
    }

    pub fn variant(&self) -> Variant {
        match self {
            Self::Aurora(_) => Variant::Aurora,
            Self::Waves(_) => Variant::Waves,
            Self::Particles(_) => Variant::Particles,
        }
    }

    pub fn theme(&self) -> Theme {
        match self {
            Self::Aurora(v) => v.theme(),
            Self::Waves(v) => v.theme(),
            Self::Particles(v) => v.theme(),
        }
    }
}

impl Renderer for VariantState {
    fn render(&mut self, frame: &FrameCtx, surface: &mut dyn Surface) {
        match self {
            Self::Aurora(v) => v.render(frame, surface),
            Self::Waves(v) => v.render(frame, surface),
            Self::Particles(v) => v.render(frame, surface),
        }
    }
}

/// Overpaint the whole surface with the theme's translucent fade color.
pub(crate) fn fade_background(surface: &mut dyn Surface, size: SurfaceSize, theme: Theme) {
    surface.fill_rect(size.rect(), &Paint::Solid(theme.trail_fade()));
}
