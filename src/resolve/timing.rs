use crate::foundation::num::fmt_num;
use crate::model::layer::{CaptionSource, Layer, Source};
use crate::model::timing::LayerDuration;

/// Active time span of a layer on the output timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Window {
    pub(crate) start: f64,
    /// Exclusive end; `None` when the layer is unbounded.
    pub(crate) end: Option<f64>,
}

impl Window {
    pub(crate) fn bounded(start: f64, end: f64) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    pub(crate) fn unbounded(start: f64) -> Self {
        Self { start, end: None }
    }

    pub(crate) fn len(self) -> Option<f64> {
        self.end.map(|e| e - self.start)
    }

    /// Timeline gate expression.
    ///
    /// Bounded windows gate with `between(t,start,end)`. Unbounded windows apply to the whole
    /// output and get no gate, whatever their start.
    pub(crate) fn gate(self) -> Option<String> {
        self.end.map(|end| {
            format!("between(t,{},{})", fmt_num(self.start), fmt_num(end))
        })
    }

    /// Like [`Self::gate`], but the end instant is excluded so back-to-back windows never
    /// share a frame.
    pub(crate) fn gate_half_open(self) -> Option<String> {
        self.end.map(|end| {
            let end = fmt_num(end);
            format!("between(t,{},{end})*lt(t,{end})", fmt_num(self.start))
        })
    }
}

/// Resolve `start + duration` against an optional natural source length.
///
/// `Full` resolves to the natural length when it is known and is unbounded otherwise.
pub(crate) fn resolve_window(start: f64, duration: LayerDuration, natural: Option<f64>) -> Window {
    match duration {
        LayerDuration::Seconds(d) => Window::bounded(start, start + d),
        LayerDuration::Full => match natural {
            Some(len) if len > 0.0 => Window::bounded(start, start + len),
            _ => Window::unbounded(start),
        },
    }
}

/// Remaining source length after trimming, if the natural length is known.
pub(crate) fn natural_len(source_duration: Option<f64>, trim_start: f64) -> Option<f64> {
    source_duration.map(|d| (d - trim_start).max(0.0))
}

/// Active window of a layer, or `None` for layers that have no window of their own.
pub(crate) fn layer_window(layer: &Layer) -> Option<Window> {
    match layer {
        Layer::Video(l) => {
            let o = &l.options;
            let natural = match &l.source {
                Source::Path(_) => natural_len(o.source_duration, o.trim_start),
                Source::Timeline(t) => t.duration_estimate(),
            };
            let natural = if o.loop_source { None } else { natural };
            Some(resolve_window(o.start_time, o.duration, natural))
        }
        Layer::Audio(l) => {
            let o = &l.options;
            let natural = if o.loop_source {
                None
            } else {
                natural_len(o.source_duration, o.trim_start)
            };
            Some(resolve_window(o.start_time, o.duration, natural))
        }
        Layer::Image(l) => Some(resolve_window(
            l.options.start_time,
            l.options.duration,
            None,
        )),
        Layer::Text(l) => Some(resolve_window(
            l.options.start_time,
            l.options.duration,
            None,
        )),
        Layer::Watermark(l) => Some(resolve_window(
            l.options.start_time,
            l.options.duration,
            None,
        )),
        Layer::Caption(l) => match &l.source {
            CaptionSource::Cues(cues) => {
                let start = cues.iter().map(|c| c.start).fold(f64::INFINITY, f64::min);
                let end = cues.iter().map(|c| c.end).fold(0.0, f64::max);
                Some(Window::bounded(start, end))
            }
            CaptionSource::Words {
                text,
                words_per_second,
                start_time,
            } => {
                let n = text.split_whitespace().count() as f64;
                Some(Window::bounded(
                    *start_time,
                    start_time + n / words_per_second,
                ))
            }
        },
        Layer::Filter(l) => Some(resolve_window(l.start_time, l.duration, None)),
        Layer::PanZoom(l) => Some(Window::bounded(l.start_time, l.start_time + l.duration)),
        Layer::ChromaKey(l) => Some(resolve_window(
            l.start_time,
            l.duration,
            l.foreground_duration,
        )),
        Layer::AudioDucking(_) | Layer::Transition(_) => None,
    }
}

/// Latest bounded end across layers; `None` when nothing is bounded.
pub(crate) fn layers_end(layers: &[std::sync::Arc<Layer>]) -> Option<f64> {
    layers
        .iter()
        .filter(|l| !matches!(l.as_ref(), Layer::Filter(_)))
        .filter_map(|l| layer_window(l).and_then(|w| w.end))
        .fold(None, |acc: Option<f64>, e| Some(acc.map_or(e, |a| a.max(e))))
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/timing.rs"]
mod tests;
