use super::*;

#[test]
fn vertical_platforms_share_the_9_16_canvas() {
    for p in [
        Platform::TikTok,
        Platform::InstagramReels,
        Platform::YoutubeShorts,
    ] {
        let preset = p.preset();
        assert_eq!(preset.canvas, Canvas::new(1080, 1920).unwrap());
        assert_eq!(preset.aspect.to_string(), "9:16");
    }
}

#[test]
fn landscape_and_square_presets() {
    assert_eq!(Platform::Youtube.preset().aspect.to_string(), "16:9");
    assert_eq!(Platform::Youtube.preset().canvas.width, 1920);
    let sq = Platform::InstagramSquare.preset();
    assert_eq!((sq.canvas.width, sq.canvas.height), (1080, 1080));
    assert_eq!(sq.aspect.to_string(), "1:1");
    assert_eq!(Platform::InstagramPortrait.preset().aspect.to_string(), "4:5");
}

#[test]
fn from_name_normalizes_spelling() {
    assert_eq!(Platform::from_name("TikTok"), Some(Platform::TikTok));
    assert_eq!(Platform::from_name("youtube_shorts"), Some(Platform::YoutubeShorts));
    assert_eq!(Platform::from_name("Instagram Square"), Some(Platform::InstagramSquare));
    assert_eq!(Platform::from_name("instagram"), Some(Platform::InstagramSquare));
    assert_eq!(Platform::from_name("x"), Some(Platform::Twitter));
    assert_eq!(Platform::from_name("myspace"), None);
}

#[test]
fn canonical_names_round_trip() {
    for p in Platform::ALL {
        assert_eq!(Platform::from_name(p.name()), Some(p));
        assert_eq!(String::from(p), p.to_string());
    }
}

#[test]
fn canvas_matches_aspect() {
    for p in Platform::ALL {
        let preset = p.preset();
        assert_eq!(preset.canvas.aspect_ratio(), preset.aspect, "{p}");
    }
}

#[test]
fn bitrate_args_use_kbit_suffix() {
    assert_eq!(
        Platform::Youtube.preset().bitrate_args(),
        vec!["-b:v", "8000k", "-b:a", "192k"]
    );
}
