use super::*;

#[test]
fn whitespace_is_collapsed() {
    assert_eq!(
        normalize_whitespace("  ffmpeg \t -i   \"a.mp4\"\n -y "),
        "ffmpeg -i \"a.mp4\" -y"
    );
}

#[test]
fn equal_text_gives_equal_fingerprint() {
    let a = fingerprint_str("ffmpeg -i \"a.mp4\" \"o.mp4\"");
    let b = fingerprint_str("ffmpeg -i \"a.mp4\" \"o.mp4\"");
    let c = fingerprint_str("ffmpeg -i \"b.mp4\" \"o.mp4\"");
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.to_string().len(), 32);
}

#[test]
fn paths_become_placeholders() {
    let cmd = "ffmpeg -i \"clips/a.mp4\" -i \"clips/a.mp4.srt\" \"out/o.mp4\"";
    let redacted = redact_paths(cmd, &["clips/a.mp4", "clips/a.mp4.srt"], "out/o.mp4");
    assert_eq!(
        redacted,
        "ffmpeg -i \"{input0}\" -i \"{input1}\" \"{output}\""
    );
}
