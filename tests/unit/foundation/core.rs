use super::*;

#[test]
fn fps_rounds_half_frames_to_even() {
    let fps = Fps::DEFAULT;
    assert_eq!(fps.secs_to_frames(5.0), 125);
    assert_eq!(fps.secs_to_frames(0.5), 12);
    assert_eq!(fps.secs_to_frames(0.54), 14);
}

#[test]
fn fps_display_collapses_unit_denominator() {
    assert_eq!(Fps::new(30, 1).unwrap().to_string(), "30");
    assert_eq!(Fps::new(30000, 1001).unwrap().to_string(), "30000/1001");
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn aspect_ratio_parses_and_derives_canvas() {
    let r = AspectRatio::parse("9:16").unwrap();
    assert_eq!(r.canvas(), Canvas { width: 1080, height: 1920 });
    assert_eq!(r.to_string(), "9:16");

    let r = AspectRatio::parse("4/5").unwrap();
    assert_eq!(r.canvas(), Canvas { width: 1080, height: 1350 });

    assert_eq!(AspectRatio::parse("1:1").unwrap().canvas().width, 1080);
    assert!(AspectRatio::parse("wide").is_err());
    assert!(AspectRatio::parse("0:1").is_err());
}

#[test]
fn canvas_reduces_to_aspect_ratio() {
    assert_eq!(Canvas::DEFAULT.aspect_ratio().to_string(), "16:9");
    assert_eq!(Canvas::new(1080, 1080).unwrap().aspect_ratio().to_string(), "1:1");
}

#[test]
fn aspect_ratio_serializes_as_string() {
    let r = AspectRatio::new(16, 9).unwrap();
    assert_eq!(serde_json::to_value(r).unwrap(), serde_json::json!("16:9"));
    let back: AspectRatio = serde_json::from_value(serde_json::json!("16:9")).unwrap();
    assert_eq!(back, r);
}
