use crate::foundation::core::{BezPath, Point, Rgba, SurfaceSize, Theme};
use crate::surface::{LinearGradient, Paint, Surface};
use crate::variants::{FrameCtx, Renderer, fade_background};

/// Number of stacked waves.
pub const WAVE_COUNT: usize = 3;
/// Horizontal sampling step of the wave outline, in logical pixels.
pub const SAMPLE_STEP: f64 = 5.0;

const DARK_COLORS: [Rgba; WAVE_COUNT] = [
    Rgba::new(139, 92, 246, 0.3),
    Rgba::new(59, 130, 246, 0.2),
    Rgba::new(16, 185, 129, 0.1),
];

const LIGHT_COLORS: [Rgba; WAVE_COUNT] = [
    Rgba::new(139, 92, 246, 0.1),
    Rgba::new(59, 130, 246, 0.08),
    Rgba::new(16, 185, 129, 0.05),
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wave {
    pub amplitude: f64,
    /// Spatial frequency, radians per logical pixel.
    pub frequency: f64,
    /// Phase advance per frame.
    pub speed: f64,
    /// Accumulated phase; grows without bound.
    pub phase: f64,
    pub color: Rgba,
}

impl Wave {
    /// Surface height of the wave at `x` for a surface `height` tall.
    pub fn y_at(&self, x: f64, height: f64) -> f64 {
        height / 2.0
            + (x * self.frequency + self.phase).sin() * self.amplitude
            + (x * self.frequency * 2.0 + self.phase * 1.5).sin() * (self.amplitude * 0.5)
    }

    /// Closed outline of the wave sampled every [`SAMPLE_STEP`] pixels.
    pub fn outline(&self, size: SurfaceSize) -> BezPath {
        let mut path = BezPath::new();
        path.move_to((0.0, size.height));
        let mut x = 0.0;
        while x <= size.width {
            path.line_to((x, self.y_at(x, size.height)));
            x += SAMPLE_STEP;
        }
        path.line_to((size.width, size.height));
        path.line_to((0.0, size.height));
        path.close_path();
        path
    }
}

/// Waves variant: three phase-drifting sine bands with a second harmonic.
#[derive(Clone, Debug)]
pub struct Waves {
    theme: Theme,
    waves: Vec<Wave>,
}

impl Waves {
    pub fn new(theme: Theme, size: SurfaceSize) -> Self {
        let colors = if theme.is_dark() {
            DARK_COLORS
        } else {
            LIGHT_COLORS
        };
        let waves = (0..WAVE_COUNT)
            .map(|i| {
                let i_f = i as f64;
                Wave {
                    amplitude: size.height * (0.05 + i_f * 0.02),
                    frequency: 0.005 - i_f * 0.001,
                    speed: 0.001 + i_f * 0.0005,
                    phase: 0.0,
                    color: colors[i],
                }
            })
            .collect();
        Self { theme, waves }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn waves(&self) -> &[Wave] {
        &self.waves
    }
}

impl Renderer for Waves {
    fn render(&mut self, frame: &FrameCtx, surface: &mut dyn Surface) {
        let size = frame.size;
        fade_background(surface, size, self.theme);

        for wave in &mut self.waves {
            wave.phase += wave.speed;
            let paint = Paint::Linear(LinearGradient::fade_out(
                Point::ZERO,
                Point::new(0.0, size.height),
                wave.color,
            ));
            surface.fill_path(&wave.outline(size), &paint);
        }
    }
}
