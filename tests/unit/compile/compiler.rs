use super::*;
use crate::effects::chroma::ChromaKey;
use crate::effects::ducking::AudioDucking;
use crate::effects::zoompan::KenBurns;
use crate::model::layer::{
    AudioOptions, Background, ImageOptions, KenBurnsDirection, TextOptions, TransitionKind,
    VideoOptions, WatermarkOptions,
};
use crate::model::position::Anchor;

fn graph(c: &CompiledCommand) -> &str {
    c.filter_graph().unwrap_or_default()
}

#[test]
fn empty_timeline_renders_black_canvas() {
    let c = compile(&Timeline::new(), "o.mp4");
    assert_eq!(
        c.command(),
        "ffmpeg -filter_complex \"color=c=black:s=1920x1080:r=25:d=5[v0]\" -map \"[v0]\" -y \"o.mp4\""
    );
    assert_eq!(c.duration_estimate(), None);
}

#[test]
fn base_video_with_delayed_music() {
    let t = Timeline::new()
        .add_video("v.mp4", VideoOptions::new())
        .unwrap()
        .add_audio("m.mp3", AudioOptions::new().volume(0.5).start(2.0))
        .unwrap();
    let c = compile(&t, "o.mp4");
    assert_eq!(
        c.command(),
        "ffmpeg -i \"v.mp4\" -i \"m.mp3\" -filter_complex \
         \"[1:a]volume=0.5,adelay=2000|2000[a0];[0:a][a0]amix=inputs=2:duration=longest[a1]\" \
         -map 0:v -map \"[a1]\" -y \"o.mp4\""
    );
}

#[test]
fn single_plain_video_needs_no_graph() {
    let t = Timeline::new()
        .add_video("v.mp4", VideoOptions::new())
        .unwrap();
    let c = compile(&t, "o.mp4");
    assert_eq!(c.filter_graph(), None);
    assert_eq!(
        c.command(),
        "ffmpeg -i \"v.mp4\" -map 0:v -map 0:a -y \"o.mp4\""
    );
}

#[test]
fn later_video_is_shifted_and_overlaid() {
    let t = Timeline::new()
        .add_video("a.mp4", VideoOptions::new())
        .unwrap()
        .add_video(
            "b.mp4",
            VideoOptions::new()
                .start(2.0)
                .duration(3.0)
                .position(Anchor::TopRight)
                .scale(0.5)
                .muted(true),
        )
        .unwrap();
    let c = compile(&t, "o.mp4");
    assert_eq!(
        graph(&c),
        "[1:v]scale=iw*0.5:-2,setpts=PTS-STARTPTS+2/TB[ov0];\
         [0:v][ov0]overlay=x=W-w:y=0:enable='between(t,2,5)'[v0]"
    );
    assert!(c.command().contains("-t 3 -i \"b.mp4\""));
    assert!(c.command().contains("-map \"[v0]\" -map 0:a -y"));
}

#[test]
fn transition_crossfades_into_next_clip() {
    let t = Timeline::new()
        .add_video("a.mp4", VideoOptions::new().source_duration(5.0))
        .unwrap()
        .add_transition(TransitionKind::Fade, 1.0)
        .unwrap()
        .add_video("b.mp4", VideoOptions::new().source_duration(4.0))
        .unwrap();
    let c = compile(&t, "o.mp4");
    assert_eq!(
        graph(&c),
        "[0:v][1:v]xfade=transition=fade:duration=1:offset=4[v0];\
         [1:a]adelay=4000|4000[a0];\
         [0:a][a0]amix=inputs=2:duration=longest[a1]"
    );
}

#[test]
fn edge_transitions_become_fades() {
    let t = Timeline::new()
        .add_transition(TransitionKind::Fade, 1.0)
        .unwrap()
        .add_video("a.mp4", VideoOptions::new().source_duration(6.0))
        .unwrap()
        .add_transition(TransitionKind::FadeBlack, 0.5)
        .unwrap();
    let c = compile(&t, "o.mp4");
    assert_eq!(
        graph(&c),
        "[0:v]fade=t=in:st=0:d=1,fade=t=out:st=5.5:d=0.5[v0]"
    );
}

#[test]
fn filters_chain_in_call_order() {
    let t = Timeline::new()
        .add_video("v.mp4", VideoOptions::new())
        .unwrap()
        .add_filter(FilterKind::Grayscale)
        .unwrap()
        .add_filter(FilterLayer::new(FilterKind::Blur(5.0)).window(1.0, 2.0))
        .unwrap();
    let c = compile(&t, "o.mp4");
    assert_eq!(
        graph(&c),
        "[0:v]hue=s=0,gblur=sigma=5:enable='between(t,1,3)'[v0]"
    );
}

#[test]
fn platform_preset_covers_and_crops() {
    let t = Timeline::new()
        .platform("tiktok")
        .unwrap()
        .add_video("v.mp4", VideoOptions::new())
        .unwrap();
    let c = compile(&t, "o.mp4");
    assert_eq!(
        graph(&c),
        "[0:v]scale=1080:1920:force_original_aspect_ratio=increase,\
         crop=1080:1920:(iw-1080)/2:(ih-1920)/2,setsar=1[v0]"
    );
    assert!(
        c.command()
            .ends_with("-b:v 6000k -b:a 192k -aspect 9:16 -y \"o.mp4\""),
        "{}",
        c.command()
    );
}

#[test]
fn ken_burns_becomes_the_base() {
    let t = Timeline::new()
        .add_ken_burns(KenBurns::new("p.jpg", 5.0))
        .unwrap();
    let c = compile(&t, "o.mp4");
    assert!(graph(&c).starts_with("[0:v]zoompan=z="), "{}", graph(&c));
    assert!(graph(&c).contains(":d=125:s=1920x1080:fps=25[v0]"));
    assert!(!c.command().contains("0:a"));
    assert_eq!(c.duration_estimate(), Some(5.0));
}

#[test]
fn random_direction_is_stable_per_seed() {
    let t = Timeline::new()
        .seed(7)
        .unwrap()
        .add_ken_burns(KenBurns::new("p.jpg", 2.0).direction(KenBurnsDirection::Random))
        .unwrap();
    assert_eq!(compile(&t, "o.mp4"), compile(&t, "o.mp4"));
}

#[test]
fn image_overlay_is_gated() {
    let t = Timeline::new()
        .add_video("v.mp4", VideoOptions::new())
        .unwrap()
        .add_image("logo.png", ImageOptions::new().start(1.0).duration(2.0))
        .unwrap();
    let c = compile(&t, "o.mp4");
    assert!(c.command().contains("-loop 1 -t 3 -i \"logo.png\""));
    assert_eq!(
        graph(&c),
        "[0:v][1:v]overlay=x=0:y=0:enable='between(t,1,3)'[v0]"
    );
}

#[test]
fn watermark_sits_in_its_corner() {
    let t = Timeline::new()
        .add_video("v.mp4", VideoOptions::new())
        .unwrap()
        .add_watermark("logo.png", WatermarkOptions::new())
        .unwrap();
    let c = compile(&t, "o.mp4");
    assert_eq!(
        graph(&c),
        "[1:v]format=rgba,colorchannelmixer=aa=0.7[ov0];\
         [0:v][ov0]overlay=x=W-w-20:y=H-h-20:shortest=1[v0]"
    );
}

#[test]
fn unbounded_stills_end_with_the_picture() {
    let t = Timeline::new()
        .add_video("v.mp4", VideoOptions::new().duration(4.0))
        .unwrap()
        .add_watermark("mark.png", WatermarkOptions::new())
        .unwrap()
        .add_image("logo.png", ImageOptions::new().position(Anchor::Center))
        .unwrap();
    let c = compile(&t, "o.mp4");
    assert!(c.command().contains("-loop 1 -i \"mark.png\""), "{}", c.command());
    assert!(c.command().contains("-loop 1 -i \"logo.png\""), "{}", c.command());
    assert_eq!(graph(&c).matches("shortest=1").count(), 2, "{}", graph(&c));
    assert!(graph(&c).ends_with("overlay=x=(W-w)/2:y=(H-h)/2:shortest=1[v1]"));
}

#[test]
fn unbounded_layers_starting_late_are_ungated() {
    let t = Timeline::new()
        .add_video("v.mp4", VideoOptions::new())
        .unwrap()
        .add_text("Hi", TextOptions::new().start(3.0))
        .unwrap();
    let g = compile(&t, "o.mp4").filter_graph().map(str::to_owned);
    let g = g.unwrap_or_default();
    assert!(g.starts_with("[0:v]drawtext=text='Hi'"), "{g}");
    assert!(!g.contains("enable="), "{g}");
}

#[test]
fn muted_video_never_references_its_audio() {
    let t = Timeline::new()
        .add_video("silent.mp4", VideoOptions::new().muted(true))
        .unwrap()
        .add_audio("m.mp3", AudioOptions::new())
        .unwrap();
    let c = compile(&t, "o.mp4");
    assert!(!c.command().contains("0:a"), "{}", c.command());
    assert!(c.command().contains("-map 0:v -map 1:a"), "{}", c.command());
}

#[test]
fn text_draws_a_new_node() {
    let t = Timeline::new()
        .add_video("v.mp4", VideoOptions::new())
        .unwrap()
        .add_text("Hi", TextOptions::new().start(1.0).duration(2.0))
        .unwrap();
    let g = compile(&t, "o.mp4").filter_graph().map(str::to_owned);
    let g = g.unwrap_or_default();
    assert!(g.starts_with("[0:v]drawtext=text='Hi':fontsize=48"), "{g}");
    assert!(g.ends_with(":enable='between(t,1,3)'[v0]"), "{g}");
}

#[test]
fn audio_fades_need_the_clip_length() {
    let t = Timeline::new()
        .add_audio(
            "m.mp3",
            AudioOptions::new().source_duration(10.0).fades(1.0, 2.0),
        )
        .unwrap();
    let c = compile(&t, "o.mp4");
    assert_eq!(
        graph(&c),
        "[0:a]afade=t=in:st=0:d=1,afade=t=out:st=8:d=2[a0];\
         color=c=black:s=1920x1080:r=25:d=10[v0]"
    );
    assert!(c.command().contains("-map \"[v0]\" -map \"[a0]\""));
}

#[test]
fn nested_timeline_compiles_inline() {
    let inner = Timeline::new()
        .add_video("a.mp4", VideoOptions::new().source_duration(2.0))
        .unwrap()
        .add_text("x", TextOptions::new())
        .unwrap();
    let t = Timeline::new()
        .add_video(inner, VideoOptions::new())
        .unwrap();
    let c = compile(&t, "o.mp4");
    assert_eq!(c.inputs().len(), 1);
    assert!(graph(&c).starts_with("[0:v]drawtext=text='x'"));
    assert!(c.command().contains("-map \"[v0]\" -map 0:a -y"));
    assert_eq!(c.duration_estimate(), Some(2.0));
}

#[test]
fn chroma_key_base_keeps_foreground_audio() {
    let t = Timeline::new()
        .add_chroma_key(ChromaKey::new("fg.mp4", Background::image("bg.jpg")))
        .unwrap();
    let c = compile(&t, "o.mp4");
    assert!(graph(&c).ends_with("overlay=x=(W-w)/2:y=(H-h)/2:shortest=1[v0]"));
    assert!(c.command().contains("-map \"[v0]\" -map 0:a -y"));
}

#[test]
fn ducking_pads_join_the_mix() {
    let t = Timeline::new()
        .add_video("v.mp4", VideoOptions::new())
        .unwrap()
        .add_audio_ducking(AudioDucking::sidechain("m.mp3", "voice.wav"))
        .unwrap();
    let c = compile(&t, "o.mp4");
    assert!(
        graph(&c).ends_with("[0:a][dk0][sc1]amix=inputs=3:duration=longest[a0]"),
        "{}",
        graph(&c)
    );
}

#[test]
fn codec_and_global_flags_follow_maps() {
    let t = Timeline::new()
        .codec(crate::platform::codec::CodecPreset::Fast)
        .unwrap()
        .fps(30, 1)
        .unwrap()
        .duration(12.0)
        .unwrap()
        .overwrite(false)
        .unwrap();
    let c = compile(&t, "o.mp4");
    assert!(c.command().ends_with(
        "-c:v libx264 -preset ultrafast -crf 28 -c:a aac -b:a 128k -r 30 -t 12 -n \"o.mp4\""
    ));
    assert!(graph(&c).contains("r=30:d=12[v0]"));
    assert_eq!(c.size_estimate_bytes(), Some(3128 * 1000 / 8 * 12));
}
