use crate::foundation::core::{BezPath, Point, Rgba, SurfaceSize, Theme};
use crate::foundation::rng::RandomSource;
use crate::surface::{Paint, Surface};
use crate::variants::{FrameCtx, Renderer, fade_background};
use kurbo::Shape;

/// Pairs closer than this (logical pixels) are joined by a line.
pub const LINK_DISTANCE: f64 = 100.0;
/// Alpha of a link between coincident particles; fades linearly to zero at
/// [`LINK_DISTANCE`].
pub const LINK_MAX_ALPHA: f64 = 0.1;
/// Particles per logical pixel of the shorter surface side.
pub const DENSITY: f64 = 0.05;

const LINK_WIDTH: f64 = 1.0;
const DISC_TOLERANCE: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub speed_x: f64,
    pub speed_y: f64,
    /// Sampled at creation and not used when drawing; discs paint with `color`.
    pub opacity: f64,
    pub color: Rgba,
}

impl Particle {
    /// Integrate one frame of motion, wrapping toroidally at the surface edges.
    pub fn step(&mut self, size: SurfaceSize) {
        self.x += self.speed_x;
        self.y += self.speed_y;

        if self.x < 0.0 {
            self.x = size.width;
        }
        if self.x > size.width {
            self.x = 0.0;
        }
        if self.y < 0.0 {
            self.y = size.height;
        }
        if self.y > size.height {
            self.y = 0.0;
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Number of particles for a surface of `size`: `floor(min(w, h) * 0.05)`, never negative.
pub fn particle_count(size: SurfaceSize) -> usize {
    let n = size.width.min(size.height) * DENSITY;
    if n.is_finite() && n > 0.0 {
        n.floor() as usize
    } else {
        0
    }
}

/// Alpha of the link between two particles `distance` apart, or `None` when too far.
pub fn link_alpha(distance: f64) -> Option<f64> {
    (distance < LINK_DISTANCE).then(|| LINK_MAX_ALPHA * (1.0 - distance / LINK_DISTANCE))
}

/// Uniform integer in `0..n`.
fn floor_draw(rng: &mut dyn RandomSource, n: i32) -> i32 {
    (rng.next_f64() * f64::from(n)).floor() as i32
}

/// Theme tint: light themes add to black, dark themes subtract from white.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Tint {
    base: i32,
    variation: i32,
}

impl Tint {
    fn for_theme(theme: Theme) -> Self {
        if theme.is_dark() {
            Self {
                base: 255,
                variation: -1,
            }
        } else {
            Self {
                base: 0,
                variation: 1,
            }
        }
    }

    fn channel(self, amount: i32) -> u8 {
        (self.base + self.variation * amount).clamp(0, 255) as u8
    }

    fn link_color(self, alpha: f64) -> Rgba {
        Rgba::new(self.channel(100), self.channel(150), self.channel(200), alpha)
    }
}

/// Particles variant: drifting discs linked to their near neighbours.
#[derive(Clone, Debug)]
pub struct Particles {
    theme: Theme,
    tint: Tint,
    particles: Vec<Particle>,
}

impl Particles {
    pub fn new(theme: Theme, size: SurfaceSize, rng: &mut dyn RandomSource) -> Self {
        let tint = Tint::for_theme(theme);
        let particles = (0..particle_count(size))
            .map(|_| {
                let x = rng.next_f64() * size.width;
                let y = rng.next_f64() * size.height;
                let radius = 1.0 + rng.next_f64() * 3.0;
                let speed_x = (rng.next_f64() - 0.5) * 0.5;
                let speed_y = (rng.next_f64() - 0.5) * 0.5;
                let opacity = 0.1 + rng.next_f64() * 0.4;
                let r = tint.channel(floor_draw(&mut *rng, 50));
                let g = tint.channel(floor_draw(&mut *rng, 100));
                let b = tint.channel(floor_draw(&mut *rng, 150));
                let a = f64::from(floor_draw(&mut *rng, 9) + 1) / 10.0;
                Particle {
                    x,
                    y,
                    radius,
                    speed_x,
                    speed_y,
                    opacity,
                    color: Rgba::new(r, g, b, a),
                }
            })
            .collect();
        Self {
            theme,
            tint,
            particles,
        }
    }

    /// Particles variant over an explicit particle set.
    pub fn from_particles(theme: Theme, particles: Vec<Particle>) -> Self {
        Self {
            theme,
            tint: Tint::for_theme(theme),
            particles,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

impl Renderer for Particles {
    fn render(&mut self, frame: &FrameCtx, surface: &mut dyn Surface) {
        let size = frame.size;
        fade_background(surface, size, self.theme);

        for p in &mut self.particles {
            p.step(size);
        }

        for p in &self.particles {
            let disc = kurbo::Circle::new(p.position(), p.radius).to_path(DISC_TOLERANCE);
            surface.fill_path(&disc, &Paint::Solid(p.color));
        }

        // Each unordered pair once, O(n^2) in the particle count.
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let distance = a.position().distance(b.position());
                let Some(alpha) = link_alpha(distance) else {
                    continue;
                };
                let mut line = BezPath::new();
                line.move_to(a.position());
                line.line_to(b.position());
                surface.stroke_path(&line, LINK_WIDTH, self.tint.link_color(alpha));
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/variants/particles.rs"]
mod tests;
