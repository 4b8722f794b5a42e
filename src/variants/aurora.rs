use crate::foundation::core::{BezPath, Point, Rgba, SurfaceSize, Theme};
use crate::foundation::rng::RandomSource;
use crate::surface::{LinearGradient, Paint, Surface};
use crate::variants::{FrameCtx, Renderer, fade_background};

/// Number of stacked ribbons.
pub const AURORA_LAYERS: usize = 5;
/// Control points per ribbon, spread evenly across the width.
pub const AURORA_POINTS: usize = 7;

const PALETTE: [(u8, u8, u8); AURORA_LAYERS] = [
    (76, 29, 149),   // purple
    (16, 185, 129),  // emerald
    (59, 130, 246),  // blue
    (236, 72, 153),  // pink
    (139, 92, 246),  // violet
];

/// One ribbon control point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AuroraPoint {
    /// Baseline the oscillation is centered on.
    pub original_y: f64,
    /// Last computed height.
    pub y: f64,
    /// Oscillation rate, in radians per second.
    pub speed: f64,
    /// Phase offset.
    pub offset: f64,
}

/// One ribbon: control points plus fill color.
#[derive(Clone, Debug, PartialEq)]
pub struct AuroraLayer {
    pub points: Vec<AuroraPoint>,
    pub color: Rgba,
}

/// Aurora variant: five translucent ribbons undulating at independent rates.
#[derive(Clone, Debug)]
pub struct Aurora {
    theme: Theme,
    layers: Vec<AuroraLayer>,
}

impl Aurora {
    pub fn new(theme: Theme, size: SurfaceSize, rng: &mut dyn RandomSource) -> Self {
        let alpha = if theme.is_dark() { 0.3 } else { 0.1 };
        let layers = (0..AURORA_LAYERS)
            .map(|i| {
                let points = (0..AURORA_POINTS)
                    .map(|_| {
                        let speed = 0.2 + rng.next_f64() * 0.3;
                        let offset = rng.next_f64() * 100.0;
                        AuroraPoint {
                            original_y: size.height / 2.0,
                            y: size.height / 2.0,
                            speed,
                            offset,
                        }
                    })
                    .collect();
                let (r, g, b) = PALETTE[i % PALETTE.len()];
                AuroraLayer {
                    points,
                    color: Rgba::new(r, g, b, alpha),
                }
            })
            .collect();
        Self { theme, layers }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn layers(&self) -> &[AuroraLayer] {
        &self.layers
    }
}

/// Height of control point `point_index` of layer `layer_index` at time `t`.
///
/// Pure in its inputs: the same arguments always give the same height.
pub fn point_y(
    point: &AuroraPoint,
    point_index: usize,
    layer_index: usize,
    t: f64,
    height: f64,
) -> f64 {
    point.original_y
        + (t * point.speed + point.offset + point_index as f64 * 0.5).sin() * (height * 0.15)
        + (t * 0.2 + layer_index as f64).sin() * (height * 0.05)
}

/// Horizontal position of control point `index` for a surface `width` wide.
pub fn point_x(index: usize, width: f64) -> f64 {
    width / (AURORA_POINTS - 1) as f64 * index as f64
}

/// Closed ribbon outline through `ys`, smoothed with quadratic segments and dropped to the
/// bottom edge.
pub fn ribbon_path(ys: &[f64], size: SurfaceSize) -> BezPath {
    let mut path = BezPath::new();
    path.move_to((0.0, size.height));
    for (i, &y) in ys.iter().enumerate() {
        let x = point_x(i, size.width);
        if i == 0 {
            path.line_to((x, y));
        } else {
            let prev_x = point_x(i - 1, size.width);
            let ctrl = Point::new((prev_x + x) / 2.0, ys[i - 1]);
            path.quad_to(ctrl, Point::new(x, y));
        }
    }
    path.line_to((size.width, size.height));
    path.line_to((0.0, size.height));
    path.close_path();
    path
}

impl Renderer for Aurora {
    fn render(&mut self, frame: &FrameCtx, surface: &mut dyn Surface) {
        let size = frame.size;
        fade_background(surface, size, self.theme);

        let mut ys = Vec::with_capacity(AURORA_POINTS);
        for (layer_index, layer) in self.layers.iter_mut().enumerate() {
            ys.clear();
            for (i, point) in layer.points.iter_mut().enumerate() {
                point.y = point_y(point, i, layer_index, frame.elapsed_secs, size.height);
                ys.push(point.y);
            }
            let path = ribbon_path(&ys, size);
            let paint = Paint::Linear(LinearGradient::fade_out(
                Point::ZERO,
                Point::new(size.width, size.height),
                layer.color,
            ));
            surface.fill_path(&path, &paint);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/variants/aurora.rs"]
mod tests;
