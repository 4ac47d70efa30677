use crate::effects::LayerBuilder;
use crate::foundation::error::ReelResult;
use crate::foundation::num::fmt_num;
use crate::graph::filter::DrawText;
use crate::model::layer::{CaptionLayer, CaptionOptions, CaptionSource, Layer};
use crate::model::position::Position;
use crate::model::style::{HighlightPreset, TextStyle};
use crate::resolve::position::{DRAWTEXT, resolve_position};
use crate::resolve::timing::Window;

/// Word-by-word captions from plain text at a fixed speaking rate.
///
/// With a highlight preset the full line is shown above in the base style while the active word is
/// drawn in the preset's style.
#[derive(Clone, Debug, PartialEq)]
pub struct WordHighlight {
    text: String,
    words_per_second: f64,
    start_time: f64,
    options: CaptionOptions,
}

impl WordHighlight {
    /// Caption `text` at `words_per_second`, starting at zero with the yellow preset.
    pub fn new(text: impl Into<String>, words_per_second: f64) -> Self {
        Self {
            text: text.into(),
            words_per_second,
            start_time: 0.0,
            options: CaptionOptions::default().highlight(HighlightPreset::Yellow),
        }
    }

    /// Timeline start in seconds.
    pub fn start(mut self, secs: f64) -> Self {
        self.start_time = secs;
        self
    }

    /// Active-word style.
    pub fn highlight(mut self, preset: HighlightPreset) -> Self {
        self.options.highlight = Some(preset);
        self
    }

    /// Plain word-by-word captions without a context line.
    pub fn plain(mut self) -> Self {
        self.options.highlight = None;
        self
    }

    /// Base style.
    pub fn style(mut self, style: TextStyle) -> Self {
        self.options.style = style;
        self
    }

    /// Placement of the active word.
    pub fn position(mut self, p: impl Into<Position>) -> Self {
        self.options.position = p.into();
        self
    }

    /// Edge margin in pixels for keyword positions.
    pub fn margin(mut self, px: f64) -> Self {
        self.options.margin = px;
        self
    }
}

impl LayerBuilder for WordHighlight {
    fn layers(&self) -> ReelResult<Vec<Layer>> {
        Ok(vec![Layer::Caption(CaptionLayer {
            source: CaptionSource::Words {
                text: self.text.clone(),
                words_per_second: self.words_per_second,
                start_time: self.start_time,
            },
            options: self.options.clone(),
        })])
    }
}

/// Expand a caption layer into one `drawtext` per displayed unit, in drawing order.
///
/// Unit windows are half-open so a unit ending at `t` and the next starting at `t` never draw
/// on the same frame.
pub(crate) fn drawtext_units(layer: &CaptionLayer) -> Vec<DrawText> {
    let o = &layer.options;
    let xy = resolve_position(&o.position, o.margin, DRAWTEXT);
    let unit = |text: &str, style: &TextStyle, window: Window, y: &str| DrawText {
        text: text.to_owned(),
        style: style.clone(),
        x: xy.x.clone(),
        y: y.to_owned(),
        enable: window.gate_half_open(),
    };

    match &layer.source {
        CaptionSource::Cues(cues) => cues
            .iter()
            .map(|c| unit(&c.text, &o.style, Window::bounded(c.start, c.end), &xy.y))
            .collect(),
        CaptionSource::Words {
            text,
            words_per_second,
            start_time,
        } => {
            let words: Vec<&str> = text.split_whitespace().collect();
            let per_word = 1.0 / words_per_second;
            let mut out = Vec::with_capacity(words.len() + 1);

            let active_style = match &o.highlight {
                Some(preset) => {
                    let end = start_time + per_word * words.len() as f64;
                    let line_above = format!("{}-{}", xy.y, fmt_num(o.style.font_size * 1.5));
                    out.push(unit(
                        &words.join(" "),
                        &o.style,
                        Window::bounded(*start_time, end),
                        &line_above,
                    ));
                    preset.style(&o.style)
                }
                None => o.style.clone(),
            };

            for (i, word) in words.iter().enumerate() {
                let start = start_time + per_word * i as f64;
                out.push(unit(
                    word,
                    &active_style,
                    Window::bounded(start, start + per_word),
                    &xy.y,
                ));
            }
            out
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/captions.rs"]
mod tests;
