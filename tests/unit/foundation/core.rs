use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
    assert_eq!(r.len_frames(), 3);
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
}

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    let fps = Fps::new(30, 1).unwrap();
    assert!((fps.frames_to_secs(15) - 0.5).abs() < 1e-12);
}

#[test]
fn viewport_device_size_floors_and_falls_back_to_unit_dpr() {
    let vp = Viewport::new(100.5, 50.25, 2.0);
    assert_eq!(vp.device_size(), (201, 100));

    let vp = Viewport::new(80.0, 40.0, 0.0);
    assert_eq!(vp.dpr(), 1.0);
    assert_eq!(vp.device_size(), (80, 40));

    let vp = Viewport::new(-3.0, f64::NAN, f64::NAN);
    assert!(vp.logical_size().is_empty());
    assert_eq!(vp.device_size(), (0, 0));
}

#[test]
fn surface_size_emptiness() {
    assert!(SurfaceSize::new(0.0, 10.0).is_empty());
    assert!(SurfaceSize::new(10.0, 0.0).is_empty());
    assert!(!SurfaceSize::new(1.0, 1.0).is_empty());
}

#[test]
fn rgba_premultiplies_with_rounding() {
    let c = Rgba::new(255, 128, 0, 0.5).to_premul();
    assert_eq!(c.a, 128);
    assert_eq!(c.r, 128);
    assert_eq!(c.g, 64);
    assert_eq!(c.b, 0);
    assert_eq!(Rgba::new(1, 2, 3, 7.0).alpha_u8(), 255);
    assert_eq!(Rgba::new(1, 2, 3, f64::NAN).alpha_u8(), 0);
}

#[test]
fn premul_lerp_hits_endpoints() {
    let a = Rgba8Premul::from_straight_rgba(200, 100, 50, 255);
    let b = Rgba8Premul::transparent();
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
    assert_eq!(a.lerp(b, -4.0), a);
    assert_eq!(a.lerp(b, 0.5).a, 128);
}

#[test]
fn theme_fade_is_translucent() {
    for theme in [Theme::Dark, Theme::Light] {
        let fade = theme.trail_fade();
        assert!(fade.a > 0.0 && fade.a < 1.0);
        assert_eq!(theme.page_background().a, 1.0);
    }
    assert_eq!(Theme::from_is_dark(true), Theme::Dark);
    assert_eq!(Theme::default(), Theme::Light);
}

#[test]
fn variant_serde_names_are_lowercase() {
    let v: Variant = serde_json::from_str("\"particles\"").unwrap();
    assert_eq!(v, Variant::Particles);
    assert_eq!(serde_json::to_string(&Variant::Waves).unwrap(), "\"waves\"");
    assert_eq!(Variant::default().to_string(), "aurora");
}
