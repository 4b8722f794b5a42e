use super::*;
use crate::foundation::core::{Fps, Viewport};
use crate::schedule::FixedRateScheduler;
use crate::surface::{DrawCmd, Paint, RecordingSurface};

fn engine() -> Engine<FixedRateScheduler> {
    Engine::new(FixedRateScheduler::new(Fps::new(60, 1).unwrap()), 7)
}

fn surface() -> RecordingSurface {
    RecordingSurface::new(Viewport::new(640.0, 360.0, 2.0))
}

#[test]
fn start_draws_first_frame_and_schedules_one_more() {
    let mut e = engine();
    let mut s = surface();
    assert_eq!(e.phase(), EnginePhase::Uninitialized);

    let h = e.start(&mut s, Variant::Aurora, Theme::Light).unwrap();
    assert_eq!(e.handle(), Some(h));
    assert_eq!(e.phase(), EnginePhase::Running(Variant::Aurora));
    assert_eq!(s.frame_count(), 1);
    assert_eq!(e.frames_rendered(), 1);
    assert!(e.pending_frame().is_some());
    assert_eq!(e.scheduler().outstanding(), 1);

    for _ in 0..4 {
        assert_eq!(e.pump(&mut s), 1);
    }
    assert_eq!(s.frame_count(), 5);
    assert_eq!(e.scheduler().outstanding(), 1);
}

#[test]
fn stop_cancels_the_pending_frame() {
    let mut e = engine();
    let mut s = surface();
    let h = e.start(&mut s, Variant::Aurora, Theme::Light).unwrap();
    e.stop(h);

    assert_eq!(e.phase(), EnginePhase::Stopped);
    assert!(e.pending_frame().is_none());
    assert_eq!(e.scheduler().outstanding(), 0);
    assert_eq!(e.pump(&mut s), 0);
    assert_eq!(s.frame_count(), 1);

    e.stop(h);
    e.shutdown();
    assert_eq!(e.phase(), EnginePhase::Stopped);
}

#[test]
fn stop_with_stale_handle_is_ignored() {
    let mut e = engine();
    let mut s = surface();
    let first = e.start(&mut s, Variant::Aurora, Theme::Dark).unwrap();
    let second = e.start(&mut s, Variant::Particles, Theme::Dark).unwrap();
    assert_ne!(first, second);

    e.stop(first);
    assert_eq!(e.phase(), EnginePhase::Running(Variant::Particles));
    assert_eq!(e.pump(&mut s), 1);
}

#[test]
fn switching_variant_discards_old_state_and_keeps_one_loop() {
    let mut e = engine();
    let mut s = surface();
    e.start(&mut s, Variant::Aurora, Theme::Light).unwrap();
    e.pump(&mut s);
    let stale = e.pending_frame().unwrap();

    e.start(&mut s, Variant::Waves, Theme::Light).unwrap();
    assert!(matches!(e.variant_state(), Some(VariantState::Waves(_))));
    assert_eq!(e.scheduler().outstanding(), 1);
    assert_ne!(e.pending_frame(), Some(stale));
    assert!(!e.on_frame(stale, &mut s));

    for _ in 0..3 {
        assert_eq!(e.pump(&mut s), 1);
        assert_eq!(e.scheduler().outstanding(), 1);
    }
}

#[test]
fn missing_context_abandons_start() {
    let mut e = engine();
    let mut detached = RecordingSurface::without_context(Viewport::new(100.0, 100.0, 1.0));
    assert!(e.start(&mut detached, Variant::Waves, Theme::Dark).is_none());
    assert_eq!(e.phase(), EnginePhase::Uninitialized);
    assert_eq!(e.scheduler().outstanding(), 0);

    let mut s = surface();
    e.start(&mut s, Variant::Waves, Theme::Dark).unwrap();
    assert!(e.start(&mut detached, Variant::Aurora, Theme::Dark).is_none());
    assert_eq!(e.phase(), EnginePhase::Stopped);
    assert_eq!(e.scheduler().outstanding(), 0);
}

#[test]
fn empty_surface_skips_frames_but_keeps_looping() {
    let mut e = engine();
    let mut s = RecordingSurface::new(Viewport::new(0.0, 300.0, 1.0));
    e.start(&mut s, Variant::Particles, Theme::Light).unwrap();
    e.pump(&mut s);
    e.pump(&mut s);
    assert_eq!(e.frames_rendered(), 0);
    assert_eq!(s.frame_count(), 0);
    assert_eq!(e.scheduler().outstanding(), 1);

    e.resize(&mut s, Viewport::new(400.0, 300.0, 1.0)).unwrap();
    e.pump(&mut s);
    assert_eq!(e.frames_rendered(), 1);
    let Some(VariantState::Particles(p)) = e.variant_state() else {
        panic!("expected particles");
    };
    assert_eq!(p.particles().len(), 15);
}

#[test]
fn resize_rebuilds_state_for_new_dimensions() {
    let mut e = engine();
    let mut s = RecordingSurface::new(Viewport::new(400.0, 200.0, 1.0));
    e.start(&mut s, Variant::Waves, Theme::Dark).unwrap();
    e.resize(&mut s, Viewport::new(400.0, 1000.0, 1.0)).unwrap();
    assert_eq!(s.resize_count(), 1);
    let Some(VariantState::Waves(w)) = e.variant_state() else {
        panic!("expected waves");
    };
    assert!((w.waves()[0].amplitude - 50.0).abs() < 1e-9);
    assert_eq!(w.waves()[0].phase, 0.0);
}

#[test]
fn update_restarts_only_on_change() {
    let mut e = engine();
    let mut s = surface();
    let h = e.update(&mut s, Variant::Aurora, Theme::Light).unwrap();
    assert_eq!(e.update(&mut s, Variant::Aurora, Theme::Light), Some(h));
    let toggled = e.update(&mut s, Variant::Aurora, Theme::Dark).unwrap();
    assert_ne!(toggled, h);
    assert_eq!(e.variant_state().unwrap().theme(), Theme::Dark);
    assert_eq!(e.scheduler().outstanding(), 1);
}

#[test]
fn every_variant_fades_with_translucent_overpaint() {
    for variant in [Variant::Aurora, Variant::Waves, Variant::Particles] {
        let mut e = engine();
        let mut s = surface();
        e.start(&mut s, variant, Theme::Dark).unwrap();
        e.pump(&mut s);
        for frame in s.frames() {
            let Some(DrawCmd::FillRect {
                paint: Paint::Solid(c),
                ..
            }) = frame.first()
            else {
                panic!("{variant}: frame must open with a fade rect");
            };
            assert!(c.a < 1.0, "{variant}: fade alpha {}", c.a);
        }
    }
}
