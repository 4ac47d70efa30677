use super::*;
use crate::model::color::Color;
use crate::model::layer::CaptionCue;

fn caption_of(b: &impl LayerBuilder) -> CaptionLayer {
    match b.layers().unwrap().pop() {
        Some(Layer::Caption(l)) => l,
        other => panic!("expected caption layer, got {other:?}"),
    }
}

#[test]
fn cues_become_one_gated_unit_each() {
    let layer = CaptionLayer {
        source: CaptionSource::Cues(vec![
            CaptionCue::new("Hello", 0.0, 1.5),
            CaptionCue::new("world", 1.5, 3.0),
        ]),
        options: CaptionOptions::default(),
    };
    let units = drawtext_units(&layer);
    assert_eq!(units.len(), 2);
    assert_eq!(units[0].enable.as_deref(), Some("between(t,0,1.5)*lt(t,1.5)"));
    assert_eq!(units[1].enable.as_deref(), Some("between(t,1.5,3)*lt(t,3)"));
    assert_eq!(units[0].x, "(w-text_w)/2");
    assert_eq!(units[0].y, "h-text_h-50");
}

#[test]
fn words_split_at_the_speaking_rate() {
    let layer = caption_of(&WordHighlight::new("one two three", 2.0).start(1.0).plain());
    let units = drawtext_units(&layer);
    let windows: Vec<_> = units.iter().map(|u| u.enable.clone().unwrap()).collect();
    assert_eq!(
        windows,
        vec![
            "between(t,1,1.5)*lt(t,1.5)",
            "between(t,1.5,2)*lt(t,2)",
            "between(t,2,2.5)*lt(t,2.5)"
        ]
    );
    assert_eq!(units[1].text, "two");
}

#[test]
fn highlight_adds_context_line_above() {
    let layer = caption_of(&WordHighlight::new("one two", 1.0));
    let units = drawtext_units(&layer);
    assert_eq!(units.len(), 3);

    let line = &units[0];
    assert_eq!(line.text, "one two");
    assert_eq!(line.y, "h-text_h-50-72");
    assert_eq!(line.enable.as_deref(), Some("between(t,0,2)*lt(t,2)"));
    assert_eq!(line.style.font_color, Color::keyword("white"));

    assert_eq!(units[1].style.font_color, Color::keyword("yellow"));
    assert_eq!(units[2].y, "h-text_h-50");
}

#[test]
fn custom_highlight_replaces_style() {
    let custom = TextStyle::new().font_size(80.0);
    let layer = caption_of(&WordHighlight::new("hi", 1.0).highlight(HighlightPreset::Custom(custom)));
    let units = drawtext_units(&layer);
    assert_eq!(units[1].style.font_size, 80.0);
}

#[test]
fn adjacent_words_never_share_a_frame() {
    let layer = caption_of(&WordHighlight::new("one two", 2.0).plain());
    let units = drawtext_units(&layer);
    assert_eq!(units[0].enable.as_deref(), Some("between(t,0,0.5)*lt(t,0.5)"));
    assert_eq!(units[1].enable.as_deref(), Some("between(t,0.5,1)*lt(t,1)"));
}
