use crate::compile::command::InputSpec;
use crate::compile::session::Session;
use crate::effects::LayerBuilder;
use crate::foundation::error::ReelResult;
use crate::graph::alloc::Pad;
use crate::graph::filter::Filter;
use crate::model::color::Color;
use crate::model::layer::{Background, ChromaAudio, ChromaKeyLayer, Layer};
use crate::model::position::{Anchor, Position};
use crate::model::timing::LayerDuration;
use crate::resolve::position::{OVERLAY, resolve_position};
use crate::resolve::timing::Window;

impl Background {
    /// Still image background.
    pub fn image(path: impl Into<String>) -> Self {
        Self::Image { path: path.into() }
    }

    /// Video background; looped automatically when shorter than the foreground.
    pub fn video(path: impl Into<String>) -> Self {
        Self::Video {
            path: path.into(),
            loop_source: false,
            source_duration: None,
        }
    }

    /// Flat color background.
    pub fn color(color: Color) -> Self {
        Self::Color { color }
    }
}

/// Green-screen compositing builder.
#[derive(Clone, Debug, PartialEq)]
pub struct ChromaKey {
    layer: ChromaKeyLayer,
}

impl ChromaKey {
    /// Key pure green out of `foreground` and composite it over `background`.
    pub fn new(foreground: impl Into<String>, background: Background) -> Self {
        Self {
            layer: ChromaKeyLayer {
                foreground: foreground.into(),
                background,
                key_color: Color::green(),
                similarity: 0.3,
                blend: 0.1,
                audio: ChromaAudio::Greenscreen,
                start_time: 0.0,
                duration: LayerDuration::Full,
                foreground_duration: None,
                scale: None,
                position: None,
            },
        }
    }

    /// Color to remove.
    pub fn key_color(mut self, color: Color) -> Self {
        self.layer.key_color = color;
        self
    }

    /// Match tolerance in `(0, 1]`.
    pub fn similarity(mut self, s: f64) -> Self {
        self.layer.similarity = s;
        self
    }

    /// Edge softness in `[0, 1]`.
    pub fn blend(mut self, b: f64) -> Self {
        self.layer.blend = b;
        self
    }

    /// Which sources feed the audio mix.
    pub fn audio(mut self, mode: ChromaAudio) -> Self {
        self.layer.audio = mode;
        self
    }

    /// Timeline start in seconds.
    pub fn start(mut self, secs: f64) -> Self {
        self.layer.start_time = secs;
        self
    }

    /// Active duration.
    pub fn duration(mut self, d: impl Into<LayerDuration>) -> Self {
        self.layer.duration = d.into();
        self
    }

    /// Natural length of the foreground clip.
    pub fn foreground_duration(mut self, secs: f64) -> Self {
        self.layer.foreground_duration = Some(secs);
        self
    }

    /// Foreground scale factor.
    pub fn scale(mut self, s: f64) -> Self {
        self.layer.scale = Some(s);
        self
    }

    /// Foreground placement on the background (centered by default).
    pub fn position(mut self, p: impl Into<Position>) -> Self {
        self.layer.position = Some(p.into());
        self
    }
}

impl LayerBuilder for ChromaKey {
    fn layers(&self) -> ReelResult<Vec<Layer>> {
        Ok(vec![Layer::ChromaKey(self.layer.clone())])
    }
}

/// Output of a chroma-key composite.
pub(crate) struct Composite {
    pub(crate) video: Pad,
    /// Undelayed audio pads selected by the layer's audio mode.
    pub(crate) audio: Vec<Pad>,
}

/// Key the foreground, build the background and overlay one on the other.
///
/// The composite ends with the foreground: looping backgrounds are overlaid with `shortest=1`.
pub(crate) fn synthesize(s: &mut Session, layer: &ChromaKeyLayer, window: Window) -> Composite {
    let fg_len = window.len();

    let mut fg_spec = InputSpec::media(&layer.foreground);
    fg_spec.duration = layer.duration.seconds();
    let fg_in = s.input(fg_spec);

    let mut fg_chain = vec![Filter::ChromaKey {
        color: layer.key_color.clone(),
        similarity: layer.similarity,
        blend: layer.blend,
    }];
    if let Some(scale) = layer.scale {
        fg_chain.push(Filter::scale_by(scale));
    }
    let fg = s.graph.node([Pad::video(fg_in)], fg_chain, "ck");

    let (bg, bg_audio) = match &layer.background {
        Background::Image { path } => {
            let i = s.input(InputSpec::still(path));
            let fit = s.fit_filters();
            (s.graph.extend(Pad::video(i), fit, "bg"), None)
        }
        Background::Video {
            path,
            loop_source,
            source_duration,
        } => {
            let shorter = matches!((source_duration, fg_len), (Some(bg), Some(fg)) if *bg < fg);
            let mut spec = InputSpec::media(path);
            spec.stream_loop = *loop_source || shorter;
            let looped = spec.stream_loop;
            let i = s.input(spec);
            let fit = s.fit_filters();
            let video = s.graph.extend(Pad::video(i), fit, "bg");
            let audio = match fg_len {
                Some(len) if looped => {
                    s.graph
                        .node([Pad::audio(i)], vec![Filter::ATrim { duration: len }], "a")
                }
                _ => Pad::audio(i),
            };
            (video, Some(audio))
        }
        Background::Color { color } => {
            let chain = vec![
                Filter::ColorSource {
                    color: color.clone(),
                    size: s.target.canvas,
                    fps: s.target.fps,
                    duration: None,
                },
                Filter::FirstFrame,
                Filter::LoopForever,
            ];
            (s.graph.source(chain, "bg"), None)
        }
    };

    let center = Position::Keyword(Anchor::Center);
    let xy = resolve_position(layer.position.as_ref().unwrap_or(&center), 0.0, OVERLAY);
    let video = s.graph.node(
        [bg, fg],
        vec![Filter::Overlay {
            x: xy.x,
            y: xy.y,
            enable: None,
            shortest: true,
        }],
        "v",
    );

    let fg_audio = Pad::audio(fg_in);
    let audio = match layer.audio {
        ChromaAudio::Greenscreen => vec![fg_audio],
        ChromaAudio::Background => bg_audio.into_iter().collect(),
        ChromaAudio::Both => std::iter::once(fg_audio).chain(bg_audio).collect(),
    };

    Composite { video, audio }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/chroma.rs"]
mod tests;
