use super::*;
use crate::foundation::core::{FrameIndex, FrameSize};
use crate::overlay::mapper::Mapping;

const BLACK: [u8; 4] = [0, 0, 0, 255];

fn black_frame() -> FrameRGBA {
    FrameRGBA::solid(
        FrameSize {
            width: 64,
            height: 48,
        },
        BLACK,
    )
}

fn overlay(points: &[(i32, i32, bool)]) -> FrameOverlay {
    FrameOverlay::from_points(
        FrameIndex(0),
        0,
        points
            .iter()
            .map(|&(x, y, outside)| Mapping::Mapped { x, y, outside })
            .collect(),
    )
}

fn is_blue(px: [u8; 4]) -> bool {
    px[2] > 200 && px[0] < 50 && px[1] < 50
}

fn is_red(px: [u8; 4]) -> bool {
    px[0] > 200 && px[1] < 50 && px[2] < 50
}

fn is_white(px: [u8; 4]) -> bool {
    px[0] > 200 && px[1] > 200 && px[2] > 200
}

#[test]
fn empty_overlay_leaves_frame_untouched() {
    let mut frame = black_frame();
    let before = frame.clone();
    let mut r = OverlayRenderer::new(OverlayStyle::default(), true);
    let marks = r.render(&mut frame, &overlay(&[])).unwrap();
    assert_eq!(marks, OverlayMarks::default());
    assert_eq!(frame, before);
}

#[test]
fn single_sample_draws_marker_and_centroid_without_ellipse() {
    let mut frame = black_frame();
    let mut r = OverlayRenderer::new(OverlayStyle::default(), true);
    let marks = r.render(&mut frame, &overlay(&[(20, 24, false)])).unwrap();
    assert_eq!(
        marks,
        OverlayMarks {
            markers: 1,
            centroid: true,
            ellipse: false
        }
    );
    // The larger centroid sits on top of the sample marker.
    assert!(is_red(frame.pixel(20, 24).unwrap()));
    assert_eq!(frame.pixel(60, 2).unwrap(), BLACK);
}

#[test]
fn samples_and_centroid_use_distinct_colors() {
    let mut frame = black_frame();
    let mut r = OverlayRenderer::new(OverlayStyle::default(), false);
    let marks = r
        .render(&mut frame, &overlay(&[(10, 10, false), (50, 40, false)]))
        .unwrap();
    assert_eq!(marks.markers, 2);
    assert!(marks.centroid);
    assert!(!marks.ellipse);
    assert!(is_blue(frame.pixel(6, 6).unwrap()));
    assert!(is_red(frame.pixel(30, 25).unwrap()));
    assert!(!frame.data.chunks_exact(4).any(|px| is_white([px[0], px[1], px[2], px[3]])));
}

#[test]
fn dispersion_ellipse_is_outlined_around_centroid() {
    // Centroid (30, 25), spread rounds to (28, 21): the right edge of the ring is near x = 58.
    let mut frame = black_frame();
    let mut r = OverlayRenderer::new(OverlayStyle::default(), true);
    let marks = r
        .render(&mut frame, &overlay(&[(10, 10, false), (50, 40, false)]))
        .unwrap();
    assert!(marks.ellipse);
    assert!(is_white(frame.pixel(57, 25).unwrap()));
    // Outline only: the area between centroid marker and ring stays dark.
    assert_eq!(frame.pixel(48, 25).unwrap(), BLACK);
}

#[test]
fn outside_samples_are_not_drawn() {
    let mut frame = black_frame();
    let before = frame.clone();
    let mut r = OverlayRenderer::new(OverlayStyle::default(), true);
    let marks = r.render(&mut frame, &overlay(&[(-30, 24, true)])).unwrap();
    assert_eq!(marks.markers, 0);
    assert!(marks.centroid);
    // Centroid lies off-frame, so no pixel changes.
    assert_eq!(frame, before);
}

#[test]
fn renderer_is_reusable_across_frames() {
    let mut r = OverlayRenderer::new(OverlayStyle::default(), false);
    let mut a = black_frame();
    r.render(&mut a, &overlay(&[(10, 10, false)])).unwrap();
    let mut b = black_frame();
    r.render(&mut b, &overlay(&[(50, 40, false)])).unwrap();
    // The second frame must not inherit marks from the first.
    assert_eq!(b.pixel(10, 10).unwrap(), BLACK);
    assert!(is_red(b.pixel(50, 40).unwrap()));
}
