use super::*;
use crate::foundation::core::Point;

fn px(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    frame.pixel(x, y).unwrap()
}

#[test]
fn new_surface_is_transparent_and_dpr_scaled() {
    let mut s = CpuSurface::new(Viewport::new(16.0, 8.0, 2.0)).unwrap();
    assert_eq!(s.device_size(), (32, 16));
    assert_eq!(s.size(), SurfaceSize::new(16.0, 8.0));
    let frame = s.snapshot();
    assert!(frame.premultiplied);
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn solid_fill_lands_in_device_pixels() {
    let mut s = CpuSurface::new(Viewport::new(8.0, 8.0, 2.0)).unwrap();
    s.fill_rect(
        Rect::new(0.0, 0.0, 4.0, 8.0),
        &Paint::Solid(Rgba::opaque(255, 0, 0)),
    );
    s.present();
    let frame = s.snapshot();
    assert_eq!(px(&frame, 2, 2), [255, 0, 0, 255]);
    assert_eq!(px(&frame, 12, 2), [0, 0, 0, 0]);
}

#[test]
fn content_persists_and_fades_towards_overpaint() {
    let mut s = CpuSurface::new(Viewport::new(4.0, 4.0, 1.0)).unwrap();
    s.fill_rect(
        Rect::new(0.0, 0.0, 4.0, 4.0),
        &Paint::Solid(Rgba::opaque(0, 0, 0)),
    );
    s.present();

    let fade = Paint::Solid(Rgba::new(255, 255, 255, 0.05));
    let mut last = px(&s.snapshot(), 1, 1)[0];
    assert_eq!(last, 0);
    for _ in 0..10 {
        s.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), &fade);
        s.present();
        let now = px(&s.snapshot(), 1, 1);
        assert_eq!(now[3], 255);
        assert!(now[0] >= last);
        last = now[0];
    }
    assert!(last > 0);
    assert!(last < 255);
}

#[test]
fn resize_discards_content() {
    let mut s = CpuSurface::new(Viewport::new(4.0, 4.0, 1.0)).unwrap();
    s.fill_rect(
        Rect::new(0.0, 0.0, 4.0, 4.0),
        &Paint::Solid(Rgba::opaque(0, 255, 0)),
    );
    s.present();
    s.resize(Viewport::new(6.0, 3.0, 1.0)).unwrap();
    assert_eq!(s.device_size(), (6, 3));
    let frame = s.snapshot();
    assert_eq!(frame.data.len(), 6 * 3 * 4);
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn gradient_fades_along_its_axis() {
    let mut s = CpuSurface::new(Viewport::new(32.0, 4.0, 1.0)).unwrap();
    let g = LinearGradient::fade_out(
        Point::new(0.0, 0.0),
        Point::new(32.0, 0.0),
        Rgba::opaque(0, 0, 255),
    );
    s.fill_rect(Rect::new(0.0, 0.0, 32.0, 4.0), &Paint::Linear(g));
    s.present();
    let frame = s.snapshot();
    let left = px(&frame, 0, 1);
    let mid = px(&frame, 16, 1);
    let right = px(&frame, 31, 1);
    assert!(left[3] > mid[3]);
    assert!(mid[3] > right[3]);
    assert!(left[2] > 240);
}

#[test]
fn degenerate_gradient_paints_nothing() {
    let mut s = CpuSurface::new(Viewport::new(4.0, 4.0, 1.0)).unwrap();
    let g = LinearGradient::fade_out(
        Point::new(1.0, 1.0),
        Point::new(1.0, 1.0),
        Rgba::opaque(255, 0, 0),
    );
    s.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), &Paint::Linear(g));
    s.present();
    assert!(s.snapshot().data.iter().all(|&b| b == 0));
}

#[test]
fn zero_sized_surface_ignores_drawing() {
    let mut s = CpuSurface::new(Viewport::new(0.0, 0.0, 1.0)).unwrap();
    s.fill_rect(
        Rect::new(0.0, 0.0, 4.0, 4.0),
        &Paint::Solid(Rgba::opaque(255, 0, 0)),
    );
    s.present();
    assert!(s.snapshot().data.is_empty());
}

#[test]
fn oversized_viewport_is_rejected() {
    let err = CpuSurface::new(Viewport::new(70_000.0, 10.0, 1.0))
        .err()
        .unwrap();
    assert!(err.to_string().contains("surface error:"));
}
