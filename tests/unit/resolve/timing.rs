use super::*;
use crate::model::layer::{AudioLayer, AudioOptions, TextLayer, TextOptions};
use std::sync::Arc;

#[test]
fn bounded_window_emits_between_gate() {
    let w = resolve_window(2.0, LayerDuration::Seconds(3.0), None);
    assert_eq!(w, Window::bounded(2.0, 5.0));
    assert_eq!(w.gate().as_deref(), Some("between(t,2,5)"));
    assert_eq!(w.len(), Some(3.0));
}

#[test]
fn full_duration_uses_known_length() {
    let w = resolve_window(1.0, LayerDuration::Full, Some(4.5));
    assert_eq!(w.gate().as_deref(), Some("between(t,1,5.5)"));
}

#[test]
fn unknown_full_duration_is_ungated() {
    let w = resolve_window(0.0, LayerDuration::Full, None);
    assert_eq!(w.gate(), None);
    assert_eq!(w.len(), None);

    let w = resolve_window(3.0, LayerDuration::Full, None);
    assert_eq!(w, Window::unbounded(3.0));
    assert_eq!(w.gate(), None);
}

#[test]
fn half_open_gate_excludes_the_end() {
    let w = Window::bounded(0.5, 1.0);
    assert_eq!(w.gate_half_open().as_deref(), Some("between(t,0.5,1)*lt(t,1)"));
    assert_eq!(Window::unbounded(2.0).gate_half_open(), None);
}

#[test]
fn natural_length_subtracts_trim() {
    assert_eq!(natural_len(Some(10.0), 2.5), Some(7.5));
    assert_eq!(natural_len(Some(1.0), 2.5), Some(0.0));
    assert_eq!(natural_len(None, 1.0), None);
}

#[test]
fn layers_end_takes_latest_bounded_layer() {
    let layers = vec![
        Arc::new(Layer::Text(TextLayer {
            text: "a".into(),
            options: TextOptions::new().start(1.0).duration(2.0),
        })),
        Arc::new(Layer::Audio(AudioLayer {
            source: "m.mp3".into(),
            options: AudioOptions::new().start(2.0).source_duration(8.0),
        })),
        Arc::new(Layer::Text(TextLayer {
            text: "b".into(),
            options: TextOptions::new(),
        })),
    ];
    assert_eq!(layers_end(&layers), Some(10.0));
    assert_eq!(layers_end(&layers[2..]), None);
}
