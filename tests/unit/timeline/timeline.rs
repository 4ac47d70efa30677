use super::*;
use crate::effects::zoompan::KenBurns;
use crate::model::position::Anchor;

#[test]
fn builders_return_new_timelines() {
    let t1 = Timeline::new()
        .add_video("v.mp4", VideoOptions::new())
        .unwrap();
    let t2 = t1.add_text("Hello", TextOptions::new()).unwrap();
    assert_eq!(t1.layers().len(), 1);
    assert_eq!(t2.layers().len(), 2);
    assert!(Arc::ptr_eq(&t1.layers()[0], &t2.layers()[0]));
    assert_ne!(t1, t2);
}

#[test]
fn invalid_layers_are_rejected_without_touching_the_source() {
    let t = Timeline::new();
    assert!(t.add_text("", TextOptions::new()).is_err());
    assert!(t.add_video("", VideoOptions::new()).is_err());
    assert!(
        t.add_watermark("logo.png", WatermarkOptions::new().position(Anchor::Center))
            .is_err()
    );
    assert!(
        t.add_image("a.png", ImageOptions::new().scale(0.0))
            .is_err()
    );
    assert!(t.layers().is_empty());
}

#[test]
fn global_setters_validate() {
    let t = Timeline::new();
    assert!(t.fps(0, 1).is_err());
    assert!(t.duration(-1.0).is_err());
    assert!(t.aspect_ratio("wide").is_err());
    assert!(t.platform(" ").is_err());

    let t = t.fps(30, 1).unwrap().aspect_ratio("9:16").unwrap();
    assert_eq!(t.options().fps, Some(Fps { num: 30, den: 1 }));
    assert_eq!(t.options().aspect_ratio.map(|a| a.to_string()).as_deref(), Some("9:16"));
}

#[test]
fn duration_estimate_prefers_explicit_duration() {
    let t = Timeline::new()
        .add_audio("m.mp3", AudioOptions::new().duration(8.0).start(1.0))
        .unwrap();
    assert_eq!(t.duration_estimate(), Some(9.0));
    assert_eq!(t.duration(4.0).unwrap().duration_estimate(), Some(4.0));
}

#[test]
fn nested_timelines_must_have_layers() {
    let err = Timeline::new()
        .add_video(Timeline::new(), VideoOptions::new())
        .unwrap_err();
    assert!(err.to_string().contains("nested timeline"), "{err}");
}

#[test]
fn apply_appends_every_builder_layer() {
    let t = Timeline::new()
        .apply(&KenBurns::new("p.jpg", 3.0))
        .unwrap();
    assert_eq!(t.layers()[0].kind_name(), "pan_zoom");
    assert!(Timeline::new().apply(&KenBurns::new("p.jpg", 0.0)).is_err());
}

#[test]
fn command_matches_compiled_command() {
    let t = Timeline::new()
        .add_captions(
            vec![CaptionCue::new("one", 0.0, 1.0), CaptionCue::new("two", 1.0, 2.0)],
            CaptionOptions::new(),
        )
        .unwrap();
    let c = t.compile("o.mp4");
    assert_eq!(t.command("o.mp4"), c.command());
    assert_eq!(c.filter_graph().map(|g| g.matches("drawtext").count()), Some(2));
}
