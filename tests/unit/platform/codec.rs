use super::*;

#[test]
fn every_preset_selects_codecs() {
    for p in [
        CodecPreset::Web,
        CodecPreset::HighQuality,
        CodecPreset::Fast,
        CodecPreset::Archive,
    ] {
        let args = p.args();
        assert!(args.contains(&"-c:v"));
        assert!(args.contains(&"-c:a"));
        assert_eq!(args.len() % 2, 0);
        assert!(p.approx_kbps() > 0);
    }
}

#[test]
fn web_preset_enables_fast_start() {
    assert!(CodecPreset::Web.args().ends_with(&["-movflags", "+faststart"]));
}

#[test]
fn serde_uses_snake_case() {
    let s = serde_json::to_string(&CodecPreset::HighQuality).unwrap();
    assert_eq!(s, "\"high_quality\"");
    let p: CodecPreset = serde_json::from_str("\"archive\"").unwrap();
    assert_eq!(p, CodecPreset::Archive);
}
