use super::*;

fn layer(kind: TransitionKind, duration: f64) -> TransitionLayer {
    TransitionLayer { kind, duration }
}

#[test]
fn names_follow_xfade_vocabulary() {
    assert_eq!(xfade_name(TransitionKind::FadeBlack), "fadeblack");
    assert_eq!(xfade_name(TransitionKind::SlideUp), "slideup");
    assert_eq!(xfade_name(TransitionKind::CircleClose), "circleclose");
}

#[test]
fn crossfade_starts_before_outgoing_end() {
    let f = crossfade(&layer(TransitionKind::Dissolve, 1.0), 5.0);
    assert_eq!(
        f.to_string(),
        "xfade=transition=dissolve:duration=1:offset=4"
    );
}

#[test]
fn crossfade_offset_never_negative() {
    let f = crossfade(&layer(TransitionKind::Fade, 2.0), 1.5);
    assert_eq!(f.to_string(), "xfade=transition=fade:duration=2:offset=0");
}

#[test]
fn edge_fades() {
    let t = layer(TransitionKind::Fade, 0.5);
    assert_eq!(fade_in(&t).to_string(), "fade=t=in:st=0:d=0.5");
    assert_eq!(fade_out(&t, 10.0).to_string(), "fade=t=out:st=9.5:d=0.5");
}
