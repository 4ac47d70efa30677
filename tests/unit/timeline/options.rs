use super::*;

#[test]
fn defaults_target_1080p_without_fit() {
    let t = GlobalOptions::default().target();
    assert_eq!(t.canvas, Canvas::DEFAULT);
    assert_eq!(t.aspect.to_string(), "16:9");
    assert_eq!(t.fps, Fps::DEFAULT);
    assert!(!t.fit);
    assert!(t.preset.is_none());
}

#[test]
fn platform_wins_over_aspect_ratio() {
    let opts = GlobalOptions {
        platform: Some("tiktok".into()),
        aspect_ratio: Some(AspectRatio::new(1, 1).unwrap()),
        ..GlobalOptions::default()
    };
    let t = opts.target();
    assert_eq!((t.canvas.width, t.canvas.height), (1080, 1920));
    assert_eq!(t.aspect.to_string(), "9:16");
    assert!(t.fit);
}

#[test]
fn unknown_platform_falls_back() {
    let opts = GlobalOptions {
        platform: Some("betamax".into()),
        ..GlobalOptions::default()
    };
    let t = opts.target();
    assert_eq!(t.canvas, Canvas::DEFAULT);
    assert!(!t.fit);
}

#[test]
fn aspect_ratio_derives_canvas_unless_size_matches() {
    let opts = GlobalOptions {
        aspect_ratio: Some(AspectRatio::new(4, 5).unwrap()),
        ..GlobalOptions::default()
    };
    let t = opts.target();
    assert_eq!((t.canvas.width, t.canvas.height), (1080, 1350));
    assert!(t.fit);

    let opts = GlobalOptions {
        aspect_ratio: Some(AspectRatio::new(4, 5).unwrap()),
        size: Some(Canvas::new(800, 1000).unwrap()),
        ..GlobalOptions::default()
    };
    assert_eq!(opts.target().canvas, Canvas::new(800, 1000).unwrap());
}

#[test]
fn validate_rejects_bad_values() {
    let bad_fps = GlobalOptions {
        fps: Some(Fps { num: 25, den: 0 }),
        ..GlobalOptions::default()
    };
    assert!(bad_fps.validate().is_err());

    let bad_duration = GlobalOptions {
        duration: Some(-1.0),
        ..GlobalOptions::default()
    };
    assert!(bad_duration.validate().is_err());

    assert!(GlobalOptions::default().validate().is_ok());
}

#[test]
fn serde_fills_missing_fields_with_defaults() {
    let opts: GlobalOptions = serde_json::from_str(r#"{"platform":"youtube"}"#).unwrap();
    assert_eq!(opts.platform.as_deref(), Some("youtube"));
    assert!(opts.overwrite);
    assert_eq!(opts.seed, 0);
}
