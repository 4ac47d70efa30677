use super::*;
use serde_json::json;

fn video(path: &str) -> Layer {
    Layer::Video(VideoLayer {
        source: Source::from(path),
        options: VideoOptions::new(),
    })
}

#[test]
fn empty_paths_and_text_are_rejected() {
    assert!(video("").validate().is_err());
    assert!(video("  ").validate().is_err());
    assert!(video("v.mp4").validate().is_ok());

    let text = Layer::Text(TextLayer {
        text: " ".to_owned(),
        options: TextOptions::new(),
    });
    assert!(text.validate().is_err());
}

#[test]
fn volume_accepts_percentages() {
    assert_eq!(normalize_volume(0.5).unwrap(), 0.5);
    assert_eq!(normalize_volume(1.0).unwrap(), 1.0);
    assert_eq!(normalize_volume(50.0).unwrap(), 0.5);
    assert!(normalize_volume(-0.1).is_err());
    assert!(normalize_volume(150.0).is_err());
}

#[test]
fn watermark_requires_a_corner() {
    let mut wm = WatermarkLayer {
        source: "logo.png".to_owned(),
        options: WatermarkOptions::new(),
    };
    assert!(wm.validate().is_ok());
    wm.options.position = Anchor::Center;
    let err = wm.validate().unwrap_err().to_string();
    assert!(err.contains("corner"), "{err}");
}

#[test]
fn non_positive_scale_is_rejected() {
    let img = ImageLayer {
        source: "a.png".to_owned(),
        options: ImageOptions::new().scale(0.0),
    };
    assert!(img.validate().is_err());
    let img = ImageLayer {
        source: "a.png".to_owned(),
        options: ImageOptions::new().scale(-1.0),
    };
    assert!(img.validate().is_err());
}

#[test]
fn trim_must_fit_inside_known_source() {
    let l = VideoLayer {
        source: Source::from("v.mp4"),
        options: VideoOptions::new().source_duration(4.0).trim_start(4.0),
    };
    assert!(l.validate().is_err());
}

#[test]
fn custom_filter_cannot_smuggle_labels() {
    assert!(FilterKind::Custom("eq=gamma=1.2".into()).validate().is_ok());
    assert!(FilterKind::Custom("null[x];[x]null".into()).validate().is_err());
    assert!(FilterKind::Brightness(1.5).validate().is_err());
    assert!(FilterKind::Blur(0.0).validate().is_err());
}

#[test]
fn sidechain_ducking_needs_a_voice() {
    let l = AudioDuckingLayer {
        background: "music.mp3".into(),
        voice: None,
        detection: DuckingDetection::Sidechain,
        level: 0.2,
        fade_in: 0.3,
        fade_out: 0.5,
        hold: 0.0,
        threshold: 0.05,
        background_volume: 1.0,
        voice_volume: 1.0,
    };
    assert!(l.validate().is_err());
    let l = AudioDuckingLayer {
        voice: Some("voice.wav".into()),
        ..l
    };
    assert!(l.validate().is_ok());
}

#[test]
fn layer_json_is_tagged_by_type() {
    let v = serde_json::to_value(video("v.mp4")).unwrap();
    assert_eq!(v["type"], json!("video"));
    assert_eq!(v["source"], json!("v.mp4"));
    assert_eq!(v["options"]["duration"], json!("full"));

    let back: Layer = serde_json::from_value(v).unwrap();
    assert_eq!(back, video("v.mp4"));
}

#[test]
fn options_fill_defaults_when_missing() {
    let l: Layer = serde_json::from_value(json!({
        "type": "audio",
        "source": "m.mp3",
        "options": { "volume": 0.5, "start_time": 2 }
    }))
    .unwrap();
    let Layer::Audio(a) = l else {
        panic!("expected audio layer");
    };
    assert_eq!(a.options.volume, 0.5);
    assert_eq!(a.options.start_time, 2.0);
    assert_eq!(a.options.duration, LayerDuration::Full);
}
