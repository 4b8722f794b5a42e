use super::*;
use crate::foundation::core::Viewport;
use crate::foundation::rng::Rng64;
use crate::surface::{DrawCmd, RecordingSurface};

fn still(x: f64, y: f64) -> Particle {
    Particle {
        x,
        y,
        radius: 2.0,
        speed_x: 0.0,
        speed_y: 0.0,
        opacity: 0.3,
        color: Rgba::new(10, 20, 30, 0.5),
    }
}

fn render_once(p: &mut Particles, size: SurfaceSize) -> Vec<DrawCmd> {
    let mut surface = RecordingSurface::new(Viewport::new(size.width, size.height, 1.0));
    p.render(
        &FrameCtx {
            elapsed_secs: 0.0,
            size,
        },
        &mut surface,
    );
    surface.pending().to_vec()
}

fn strokes(cmds: &[DrawCmd]) -> Vec<Rgba> {
    cmds.iter()
        .filter_map(|c| match c {
            DrawCmd::StrokePath { color, .. } => Some(*color),
            _ => None,
        })
        .collect()
}

#[test]
fn count_is_five_percent_of_short_side() {
    assert_eq!(particle_count(SurfaceSize::new(600.0, 400.0)), 20);
    assert_eq!(particle_count(SurfaceSize::new(30.0, 30.0)), 1);
    assert_eq!(particle_count(SurfaceSize::new(19.0, 500.0)), 0);
    assert_eq!(particle_count(SurfaceSize::new(0.0, 0.0)), 0);
    assert_eq!(particle_count(SurfaceSize::new(-50.0, 500.0)), 0);
}

#[test]
fn crossing_right_edge_wraps_to_left() {
    let size = SurfaceSize::new(200.0, 100.0);
    let mut p = still(199.5, 50.0);
    p.speed_x = 1.0;
    p.step(size);
    assert!(p.x.abs() < 1e-9);
    assert_eq!(p.y, 50.0);
}

#[test]
fn crossing_top_edge_wraps_to_bottom() {
    let size = SurfaceSize::new(200.0, 100.0);
    let mut p = still(10.0, 0.1);
    p.speed_y = -0.25;
    p.step(size);
    assert_eq!(p.y, 100.0);
}

#[test]
fn far_pairs_draw_no_link() {
    let size = SurfaceSize::new(400.0, 400.0);
    let mut p =
        Particles::from_particles(Theme::Light, vec![still(100.0, 100.0), still(250.0, 100.0)]);
    assert!(strokes(&render_once(&mut p, size)).is_empty());
}

#[test]
fn near_pair_draws_exactly_one_link() {
    let size = SurfaceSize::new(400.0, 400.0);
    let mut p =
        Particles::from_particles(Theme::Light, vec![still(100.0, 100.0), still(130.0, 140.0)]);
    let links = strokes(&render_once(&mut p, size));
    assert_eq!(links.len(), 1);
    assert!((links[0].a - 0.05).abs() < 1e-12);
    assert_eq!((links[0].r, links[0].g, links[0].b), (100, 150, 200));
}

#[test]
fn lone_particle_never_links_to_itself() {
    let size = SurfaceSize::new(400.0, 400.0);
    let mut p = Particles::from_particles(Theme::Dark, vec![still(10.0, 10.0)]);
    let cmds = render_once(&mut p, size);
    assert!(strokes(&cmds).is_empty());
    // fade + one disc
    assert_eq!(cmds.len(), 2);
}

#[test]
fn link_alpha_fades_with_distance() {
    assert_eq!(link_alpha(0.0), Some(0.1));
    assert!((link_alpha(50.0).unwrap() - 0.05).abs() < 1e-12);
    assert_eq!(link_alpha(100.0), None);
    assert_eq!(link_alpha(150.0), None);
}

#[test]
fn dark_theme_links_subtract_from_white() {
    let size = SurfaceSize::new(400.0, 400.0);
    let mut p =
        Particles::from_particles(Theme::Dark, vec![still(0.0, 0.0), still(0.0, 10.0)]);
    let links = strokes(&render_once(&mut p, size));
    assert_eq!(links.len(), 1);
    assert_eq!((links[0].r, links[0].g, links[0].b), (155, 105, 55));
}

#[test]
fn seeded_particles_have_themed_colors_and_valid_ranges() {
    let size = SurfaceSize::new(800.0, 600.0);
    let light = Particles::new(Theme::Light, size, &mut Rng64::new(42));
    assert_eq!(light.particles().len(), 30);
    for p in light.particles() {
        assert!((0.0..800.0).contains(&p.x));
        assert!((0.0..600.0).contains(&p.y));
        assert!((1.0..4.0).contains(&p.radius));
        assert!(p.speed_x.abs() <= 0.25 && p.speed_y.abs() <= 0.25);
        assert!((0.1..0.5).contains(&p.opacity));
        assert!(p.color.r < 50 && p.color.g < 100 && p.color.b < 150);
        let tenths = p.color.a * 10.0;
        assert!((tenths - tenths.round()).abs() < 1e-9);
        assert!((0.1..=0.9).contains(&p.color.a));
    }

    let dark = Particles::new(Theme::Dark, size, &mut Rng64::new(42));
    for p in dark.particles() {
        assert!(p.color.r > 205 && p.color.g > 155 && p.color.b > 105);
    }
    let again = Particles::new(Theme::Dark, size, &mut Rng64::new(42));
    assert_eq!(dark.particles(), again.particles());
}

#[test]
fn colors_are_fixed_across_frames() {
    let size = SurfaceSize::new(300.0, 300.0);
    let mut p = Particles::new(Theme::Light, size, &mut Rng64::new(5));
    let before: Vec<Rgba> = p.particles().iter().map(|p| p.color).collect();
    for _ in 0..5 {
        render_once(&mut p, size);
    }
    let after: Vec<Rgba> = p.particles().iter().map(|p| p.color).collect();
    assert_eq!(before, after);
}

#[test]
fn opacity_does_not_change_what_is_drawn() {
    let size = SurfaceSize::new(200.0, 200.0);
    let mut faint = Particles::from_particles(Theme::Light, vec![still(50.0, 50.0)]);
    let mut solid = Particles::from_particles(
        Theme::Light,
        vec![Particle {
            opacity: 0.9,
            ..still(50.0, 50.0)
        }],
    );
    assert_eq!(render_once(&mut faint, size), render_once(&mut solid, size));
}
