use crate::foundation::core::Canvas;
use crate::foundation::error::{ReelError, ReelResult};
use crate::model::color::Color;
use crate::model::position::{Anchor, Position};
use crate::model::style::{HighlightPreset, TextStyle};
use crate::model::timing::{
    LayerDuration, validate_non_negative, validate_positive, validate_start, validate_unit,
};
use crate::timeline::Timeline;

/// One timed, positioned unit of composition.
///
/// Layers are applied strictly in list order: later visual layers draw on top of earlier ones,
/// and filters act on whatever has been composed so far.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Layer {
    /// Video clip; the first one becomes the base picture, later ones are overlaid.
    Video(VideoLayer),
    /// Audio track mixed into the output.
    Audio(AudioLayer),
    /// Still image overlay.
    Image(ImageLayer),
    /// Static text.
    Text(TextLayer),
    /// Timed captions or word-by-word highlighting.
    Caption(CaptionLayer),
    /// Corner logo.
    Watermark(WatermarkLayer),
    /// Filter applied to the picture composed so far.
    Filter(FilterLayer),
    /// Pan/zoom (Ken Burns) motion over a still.
    PanZoom(PanZoomLayer),
    /// Green-screen foreground composited over a background.
    ChromaKey(ChromaKeyLayer),
    /// Background audio lowered under a voice track.
    AudioDucking(AudioDuckingLayer),
    /// Transition into the next video layer.
    Transition(TransitionLayer),
}

impl Layer {
    /// Short variant name, e.g. `"video"`.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Video(_) => "video",
            Self::Audio(_) => "audio",
            Self::Image(_) => "image",
            Self::Text(_) => "text",
            Self::Caption(_) => "caption",
            Self::Watermark(_) => "watermark",
            Self::Filter(_) => "filter",
            Self::PanZoom(_) => "pan_zoom",
            Self::ChromaKey(_) => "chroma_key",
            Self::AudioDucking(_) => "audio_ducking",
            Self::Transition(_) => "transition",
        }
    }

    /// Validate the layer's own invariants.
    pub fn validate(&self) -> ReelResult<()> {
        match self {
            Self::Video(l) => l.validate(),
            Self::Audio(l) => l.validate(),
            Self::Image(l) => l.validate(),
            Self::Text(l) => l.validate(),
            Self::Caption(l) => l.validate(),
            Self::Watermark(l) => l.validate(),
            Self::Filter(l) => l.validate(),
            Self::PanZoom(l) => l.validate(),
            Self::ChromaKey(l) => l.validate(),
            Self::AudioDucking(l) => l.validate(),
            Self::Transition(l) => l.validate(),
        }
    }
}

/// Where a video layer's frames come from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Source {
    /// Media file path.
    Path(String),
    /// Nested timeline compiled inline.
    Timeline(Box<Timeline>),
}

impl From<&str> for Source {
    fn from(s: &str) -> Self {
        Self::Path(s.to_owned())
    }
}

impl From<String> for Source {
    fn from(s: String) -> Self {
        Self::Path(s)
    }
}

impl From<Timeline> for Source {
    fn from(t: Timeline) -> Self {
        Self::Timeline(Box::new(t))
    }
}

pub(crate) fn validate_path(path: &str, what: &str) -> ReelResult<()> {
    if path.trim().is_empty() {
        return Err(ReelError::validation(format!("{what} path must be non-empty")));
    }
    Ok(())
}

/// Accept a 0–1 gain, or a 0–100 percentage which is divided by 100.
pub(crate) fn normalize_volume(v: f64) -> ReelResult<f64> {
    if !v.is_finite() || !(0.0..=100.0).contains(&v) {
        return Err(ReelError::validation(format!(
            "volume must be within [0, 1] or a percentage within [0, 100] (got {v})"
        )));
    }
    Ok(gain(v))
}

/// Linear gain for a volume already accepted by [`normalize_volume`].
pub(crate) fn gain(v: f64) -> f64 {
    if v > 1.0 { v / 100.0 } else { v }
}

fn validate_opt_position(p: &Option<Position>) -> ReelResult<()> {
    match p {
        Some(p) => p.validate(),
        None => Ok(()),
    }
}

fn validate_opt_scale(scale: Option<f64>) -> ReelResult<()> {
    if let Some(s) = scale {
        validate_positive(s, "scale")?;
    }
    Ok(())
}

fn validate_opt_source_duration(d: Option<f64>) -> ReelResult<()> {
    if let Some(d) = d {
        validate_positive(d, "source_duration")?;
    }
    Ok(())
}

// ----------------------------
// Video / audio
// ----------------------------

/// Video layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VideoLayer {
    /// Media path or nested timeline.
    pub source: Source,
    /// Placement and playback options.
    #[serde(default)]
    pub options: VideoOptions,
}

/// Options for [`Timeline::add_video`](crate::Timeline::add_video).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VideoOptions {
    /// Timeline start in seconds.
    pub start_time: f64,
    /// Active length.
    pub duration: LayerDuration,
    /// Seconds skipped at the beginning of the source.
    pub trim_start: f64,
    /// Natural length of the source in seconds, when known.
    pub source_duration: Option<f64>,
    /// Gain for the clip's own audio.
    pub volume: f64,
    /// Exclude the clip's own audio from the mix.
    ///
    /// An unmuted clip is read as `[i:a]`, so sources without an audio stream must be muted.
    pub muted: bool,
    /// Loop the source indefinitely.
    pub loop_source: bool,
    /// Placement when overlaid on an earlier picture.
    pub position: Option<Position>,
    /// Size relative to the source when overlaid.
    pub scale: Option<f64>,
    /// Opacity when overlaid.
    pub opacity: f64,
    /// Inset from the canvas edge for keyword positions.
    pub margin: f64,
}

impl Default for VideoOptions {
    fn default() -> Self {
        Self {
            start_time: 0.0,
            duration: LayerDuration::Full,
            trim_start: 0.0,
            source_duration: None,
            volume: 1.0,
            muted: false,
            loop_source: false,
            position: None,
            scale: None,
            opacity: 1.0,
            margin: 0.0,
        }
    }
}

impl VideoOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeline start in seconds.
    pub fn start(mut self, secs: f64) -> Self {
        self.start_time = secs;
        self
    }

    /// Set active length.
    pub fn duration(mut self, d: impl Into<LayerDuration>) -> Self {
        self.duration = d.into();
        self
    }

    /// Skip the first `secs` of the source.
    pub fn trim_start(mut self, secs: f64) -> Self {
        self.trim_start = secs;
        self
    }

    /// Declare the source's natural length.
    pub fn source_duration(mut self, secs: f64) -> Self {
        self.source_duration = Some(secs);
        self
    }

    /// Set audio gain (0–1, or 0–100 as a percentage).
    pub fn volume(mut self, v: f64) -> Self {
        self.volume = v;
        self
    }

    /// Drop the clip's own audio. Required for sources that have no audio stream.
    pub fn muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }

    /// Loop the source.
    pub fn looped(mut self, looped: bool) -> Self {
        self.loop_source = looped;
        self
    }

    /// Set overlay placement.
    pub fn position(mut self, p: impl Into<Position>) -> Self {
        self.position = Some(p.into());
        self
    }

    /// Set overlay scale.
    pub fn scale(mut self, s: f64) -> Self {
        self.scale = Some(s);
        self
    }

    /// Set overlay opacity.
    pub fn opacity(mut self, o: f64) -> Self {
        self.opacity = o;
        self
    }

    /// Set keyword-position margin.
    pub fn margin(mut self, px: f64) -> Self {
        self.margin = px;
        self
    }
}

impl VideoLayer {
    pub(crate) fn validate(&self) -> ReelResult<()> {
        match &self.source {
            Source::Path(p) => validate_path(p, "video")?,
            Source::Timeline(t) => {
                if t.layers().is_empty() {
                    return Err(ReelError::validation(
                        "nested timeline source must contain at least one layer",
                    ));
                }
                t.validate()?;
                if self.options.trim_start > 0.0 || self.options.loop_source {
                    return Err(ReelError::validation(
                        "nested timeline sources cannot be trimmed or looped",
                    ));
                }
            }
        }
        let o = &self.options;
        validate_start(o.start_time, "video")?;
        o.duration.validate("video")?;
        validate_non_negative(o.trim_start, "video trim_start")?;
        validate_opt_source_duration(o.source_duration)?;
        if let Some(len) = o.source_duration
            && o.trim_start >= len
        {
            return Err(ReelError::validation(
                "video trim_start must be shorter than source_duration",
            ));
        }
        normalize_volume(o.volume)?;
        validate_opt_position(&o.position)?;
        validate_opt_scale(o.scale)?;
        validate_unit(o.opacity, "video opacity")?;
        validate_non_negative(o.margin, "video margin")
    }
}

/// Audio layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AudioLayer {
    /// Media path.
    pub source: String,
    /// Playback options.
    #[serde(default)]
    pub options: AudioOptions,
}

/// Options for [`Timeline::add_audio`](crate::Timeline::add_audio).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AudioOptions {
    /// Timeline start in seconds.
    pub start_time: f64,
    /// Active length.
    pub duration: LayerDuration,
    /// Seconds skipped at the beginning of the source.
    pub trim_start: f64,
    /// Natural length of the source in seconds, when known.
    pub source_duration: Option<f64>,
    /// Gain (0–1, or 0–100 as a percentage).
    pub volume: f64,
    /// Fade-in length in seconds.
    pub fade_in: f64,
    /// Fade-out length in seconds (requires a bounded window).
    pub fade_out: f64,
    /// Loop the source indefinitely.
    pub loop_source: bool,
}

impl Default for AudioOptions {
    fn default() -> Self {
        Self {
            start_time: 0.0,
            duration: LayerDuration::Full,
            trim_start: 0.0,
            source_duration: None,
            volume: 1.0,
            fade_in: 0.0,
            fade_out: 0.0,
            loop_source: false,
        }
    }
}

impl AudioOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeline start in seconds.
    pub fn start(mut self, secs: f64) -> Self {
        self.start_time = secs;
        self
    }

    /// Set active length.
    pub fn duration(mut self, d: impl Into<LayerDuration>) -> Self {
        self.duration = d.into();
        self
    }

    /// Skip the first `secs` of the source.
    pub fn trim_start(mut self, secs: f64) -> Self {
        self.trim_start = secs;
        self
    }

    /// Declare the source's natural length.
    pub fn source_duration(mut self, secs: f64) -> Self {
        self.source_duration = Some(secs);
        self
    }

    /// Set gain (0–1, or 0–100 as a percentage).
    pub fn volume(mut self, v: f64) -> Self {
        self.volume = v;
        self
    }

    /// Set fade-in and fade-out lengths.
    pub fn fades(mut self, fade_in: f64, fade_out: f64) -> Self {
        self.fade_in = fade_in;
        self.fade_out = fade_out;
        self
    }

    /// Loop the source.
    pub fn looped(mut self, looped: bool) -> Self {
        self.loop_source = looped;
        self
    }
}

impl AudioLayer {
    pub(crate) fn validate(&self) -> ReelResult<()> {
        validate_path(&self.source, "audio")?;
        let o = &self.options;
        validate_start(o.start_time, "audio")?;
        o.duration.validate("audio")?;
        validate_non_negative(o.trim_start, "audio trim_start")?;
        validate_opt_source_duration(o.source_duration)?;
        normalize_volume(o.volume)?;
        validate_non_negative(o.fade_in, "audio fade_in")?;
        validate_non_negative(o.fade_out, "audio fade_out")
    }
}

// ----------------------------
// Image / text / captions / watermark
// ----------------------------

/// Still image overlay.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImageLayer {
    /// Image path.
    pub source: String,
    /// Placement options.
    #[serde(default)]
    pub options: ImageOptions,
}

/// Options for [`Timeline::add_image`](crate::Timeline::add_image).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ImageOptions {
    /// Timeline start in seconds.
    pub start_time: f64,
    /// Active length; `full` keeps the image for the whole output.
    pub duration: LayerDuration,
    /// Placement (top-left of the canvas when unset).
    pub position: Option<Position>,
    /// Size relative to the source image.
    pub scale: Option<f64>,
    /// Opacity.
    pub opacity: f64,
    /// Inset from the canvas edge for keyword positions.
    pub margin: f64,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            start_time: 0.0,
            duration: LayerDuration::Full,
            position: None,
            scale: None,
            opacity: 1.0,
            margin: 0.0,
        }
    }
}

impl ImageOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeline start in seconds.
    pub fn start(mut self, secs: f64) -> Self {
        self.start_time = secs;
        self
    }

    /// Set active length.
    pub fn duration(mut self, d: impl Into<LayerDuration>) -> Self {
        self.duration = d.into();
        self
    }

    /// Set placement.
    pub fn position(mut self, p: impl Into<Position>) -> Self {
        self.position = Some(p.into());
        self
    }

    /// Set scale.
    pub fn scale(mut self, s: f64) -> Self {
        self.scale = Some(s);
        self
    }

    /// Set opacity.
    pub fn opacity(mut self, o: f64) -> Self {
        self.opacity = o;
        self
    }

    /// Set keyword-position margin.
    pub fn margin(mut self, px: f64) -> Self {
        self.margin = px;
        self
    }
}

impl ImageLayer {
    pub(crate) fn validate(&self) -> ReelResult<()> {
        validate_path(&self.source, "image")?;
        let o = &self.options;
        validate_start(o.start_time, "image")?;
        o.duration.validate("image")?;
        validate_opt_position(&o.position)?;
        validate_opt_scale(o.scale)?;
        validate_unit(o.opacity, "image opacity")?;
        validate_non_negative(o.margin, "image margin")
    }
}

/// Static text.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextLayer {
    /// Text content.
    pub text: String,
    /// Placement and style.
    #[serde(default)]
    pub options: TextOptions,
}

/// Options for [`Timeline::add_text`](crate::Timeline::add_text).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextOptions {
    /// Timeline start in seconds.
    pub start_time: f64,
    /// Active length.
    pub duration: LayerDuration,
    /// Placement.
    pub position: Position,
    /// Font and decoration.
    pub style: TextStyle,
    /// Inset from the canvas edge for keyword positions.
    pub margin: f64,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            start_time: 0.0,
            duration: LayerDuration::Full,
            position: Position::Keyword(Anchor::Center),
            style: TextStyle::default(),
            margin: 10.0,
        }
    }
}

impl TextOptions {
    /// Default options (centered, 48px white).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeline start in seconds.
    pub fn start(mut self, secs: f64) -> Self {
        self.start_time = secs;
        self
    }

    /// Set active length.
    pub fn duration(mut self, d: impl Into<LayerDuration>) -> Self {
        self.duration = d.into();
        self
    }

    /// Set placement.
    pub fn position(mut self, p: impl Into<Position>) -> Self {
        self.position = p.into();
        self
    }

    /// Set style.
    pub fn style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    /// Set keyword-position margin.
    pub fn margin(mut self, px: f64) -> Self {
        self.margin = px;
        self
    }
}

impl TextLayer {
    pub(crate) fn validate(&self) -> ReelResult<()> {
        if self.text.trim().is_empty() {
            return Err(ReelError::validation("text must be non-empty"));
        }
        let o = &self.options;
        validate_start(o.start_time, "text")?;
        o.duration.validate("text")?;
        o.position.validate()?;
        o.style.validate()?;
        validate_non_negative(o.margin, "text margin")
    }
}

/// One caption line shown between `start` and `end`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CaptionCue {
    /// Caption text.
    pub text: String,
    /// Start in seconds.
    pub start: f64,
    /// End in seconds (exclusive of the next cue's start).
    pub end: f64,
}

impl CaptionCue {
    /// Create a cue.
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

/// What a caption layer displays.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptionSource {
    /// Explicitly timed cues.
    Cues(Vec<CaptionCue>),
    /// A sentence revealed word by word at a fixed rate.
    Words {
        /// Sentence to split on whitespace.
        text: String,
        /// Words shown per second.
        words_per_second: f64,
        /// Time the first word becomes active.
        start_time: f64,
    },
}

/// Caption layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CaptionLayer {
    /// Cues or word-timed sentence.
    pub source: CaptionSource,
    /// Placement and style.
    #[serde(default)]
    pub options: CaptionOptions,
}

/// Options for caption layers.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CaptionOptions {
    /// Placement.
    pub position: Position,
    /// Base style.
    pub style: TextStyle,
    /// Inset from the canvas edge for keyword positions.
    pub margin: f64,
    /// Active-word style; enables word highlighting.
    pub highlight: Option<HighlightPreset>,
}

impl Default for CaptionOptions {
    fn default() -> Self {
        Self {
            position: Position::Keyword(Anchor::BottomCenter),
            style: TextStyle::default(),
            margin: 50.0,
            highlight: None,
        }
    }
}

impl CaptionOptions {
    /// Default options (bottom-center, 48px white).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set placement.
    pub fn position(mut self, p: impl Into<Position>) -> Self {
        self.position = p.into();
        self
    }

    /// Set base style.
    pub fn style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    /// Set keyword-position margin.
    pub fn margin(mut self, px: f64) -> Self {
        self.margin = px;
        self
    }

    /// Set active-word style.
    pub fn highlight(mut self, preset: HighlightPreset) -> Self {
        self.highlight = Some(preset);
        self
    }
}

impl CaptionLayer {
    pub(crate) fn validate(&self) -> ReelResult<()> {
        match &self.source {
            CaptionSource::Cues(cues) => {
                if cues.is_empty() {
                    return Err(ReelError::validation("caption list must be non-empty"));
                }
                for (i, c) in cues.iter().enumerate() {
                    if c.text.trim().is_empty() {
                        return Err(ReelError::validation(format!(
                            "caption {i} text must be non-empty"
                        )));
                    }
                    validate_start(c.start, "caption")?;
                    if !c.end.is_finite() || c.end <= c.start {
                        return Err(ReelError::validation(format!(
                            "caption {i} end must be finite and > start"
                        )));
                    }
                }
            }
            CaptionSource::Words {
                text,
                words_per_second,
                start_time,
            } => {
                if text.split_whitespace().next().is_none() {
                    return Err(ReelError::validation("caption text must be non-empty"));
                }
                validate_positive(*words_per_second, "words_per_second")?;
                validate_start(*start_time, "caption")?;
            }
        }
        let o = &self.options;
        o.position.validate()?;
        o.style.validate()?;
        if let Some(HighlightPreset::Custom(style)) = &o.highlight {
            style.validate()?;
        }
        validate_non_negative(o.margin, "caption margin")
    }
}

/// Corner watermark.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WatermarkLayer {
    /// Image path.
    pub source: String,
    /// Placement options.
    #[serde(default)]
    pub options: WatermarkOptions,
}

/// Options for [`Timeline::add_watermark`](crate::Timeline::add_watermark).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WatermarkOptions {
    /// Corner; other keywords are rejected.
    pub position: Anchor,
    /// Opacity.
    pub opacity: f64,
    /// Size relative to the source image.
    pub scale: Option<f64>,
    /// Inset from the corner in pixels.
    pub margin: f64,
    /// Timeline start in seconds.
    pub start_time: f64,
    /// Active length.
    pub duration: LayerDuration,
}

impl Default for WatermarkOptions {
    fn default() -> Self {
        Self {
            position: Anchor::BottomRight,
            opacity: 0.7,
            scale: None,
            margin: 20.0,
            start_time: 0.0,
            duration: LayerDuration::Full,
        }
    }
}

impl WatermarkOptions {
    /// Default options (bottom-right, 70% opacity).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set corner.
    pub fn position(mut self, corner: Anchor) -> Self {
        self.position = corner;
        self
    }

    /// Set opacity.
    pub fn opacity(mut self, o: f64) -> Self {
        self.opacity = o;
        self
    }

    /// Set scale.
    pub fn scale(mut self, s: f64) -> Self {
        self.scale = Some(s);
        self
    }

    /// Set corner inset.
    pub fn margin(mut self, px: f64) -> Self {
        self.margin = px;
        self
    }
}

impl WatermarkLayer {
    pub(crate) fn validate(&self) -> ReelResult<()> {
        validate_path(&self.source, "watermark")?;
        let o = &self.options;
        if !o.position.is_corner() {
            return Err(ReelError::validation(format!(
                "watermark position must be a corner, got \"{}\"",
                o.position
            )));
        }
        validate_unit(o.opacity, "watermark opacity")?;
        validate_opt_scale(o.scale)?;
        validate_non_negative(o.margin, "watermark margin")?;
        validate_start(o.start_time, "watermark")?;
        o.duration.validate("watermark")
    }
}

// ----------------------------
// Filters / transitions
// ----------------------------

/// Closed set of picture filters, with [`FilterKind::Custom`] as the escape hatch.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Brightness offset in `[-1, 1]`.
    Brightness(f64),
    /// Contrast multiplier in `[0, 4]`.
    Contrast(f64),
    /// Saturation multiplier in `[0, 3]`.
    Saturation(f64),
    /// Gaussian blur with the given sigma.
    Blur(f64),
    /// Remove all color.
    Grayscale,
    /// Warm sepia tone.
    Sepia,
    /// Unsharp mask strength in `(0, 5]`.
    Sharpen(f64),
    /// Darkened corners.
    Vignette,
    /// Fade from black over the given seconds, starting at the layer start.
    FadeIn(f64),
    /// Fade to black over the given seconds, starting at the layer start.
    FadeOut(f64),
    /// Playback speed multiplier (2 = twice as fast).
    Speed(f64),
    /// Rotation in degrees (clockwise).
    Rotate(f64),
    /// Mirror horizontally.
    HFlip,
    /// Mirror vertically.
    VFlip,
    /// Raw filter expression, emitted verbatim.
    Custom(String),
}

impl FilterKind {
    pub(crate) fn validate(&self) -> ReelResult<()> {
        let in_range = |v: f64, lo: f64, hi: f64, name: &str| {
            if !v.is_finite() || v < lo || v > hi {
                return Err(ReelError::validation(format!(
                    "{name} must be within [{lo}, {hi}] (got {v})"
                )));
            }
            Ok(())
        };
        match self {
            Self::Brightness(v) => in_range(*v, -1.0, 1.0, "brightness"),
            Self::Contrast(v) => in_range(*v, 0.0, 4.0, "contrast"),
            Self::Saturation(v) => in_range(*v, 0.0, 3.0, "saturation"),
            Self::Blur(v) => validate_positive(*v, "blur sigma"),
            Self::Sharpen(v) => in_range(*v, 0.0, 5.0, "sharpen amount"),
            Self::FadeIn(d) | Self::FadeOut(d) => validate_positive(*d, "fade duration"),
            Self::Speed(v) => validate_positive(*v, "speed"),
            Self::Rotate(v) => {
                if !v.is_finite() {
                    return Err(ReelError::validation("rotation must be finite"));
                }
                Ok(())
            }
            Self::Custom(expr) => {
                if expr.trim().is_empty() {
                    return Err(ReelError::validation("custom filter must be non-empty"));
                }
                if expr.contains(['[', ']', ';']) {
                    return Err(ReelError::validation(
                        "custom filter must be a single chain without pad labels",
                    ));
                }
                Ok(())
            }
            Self::Grayscale | Self::Sepia | Self::Vignette | Self::HFlip | Self::VFlip => Ok(()),
        }
    }
}

/// Filter layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FilterLayer {
    /// Filter to apply.
    pub kind: FilterKind,
    /// Timeline start in seconds.
    #[serde(default)]
    pub start_time: f64,
    /// Active length; `full` applies to the whole output.
    #[serde(default)]
    pub duration: LayerDuration,
}

impl FilterLayer {
    /// Apply `kind` to the whole output.
    pub fn new(kind: FilterKind) -> Self {
        Self {
            kind,
            start_time: 0.0,
            duration: LayerDuration::Full,
        }
    }

    /// Restrict the filter to `[start, start + duration)`.
    pub fn window(mut self, start: f64, duration: impl Into<LayerDuration>) -> Self {
        self.start_time = start;
        self.duration = duration.into();
        self
    }

    pub(crate) fn validate(&self) -> ReelResult<()> {
        self.kind.validate()?;
        validate_start(self.start_time, "filter")?;
        self.duration.validate("filter")
    }
}

impl From<FilterKind> for FilterLayer {
    fn from(kind: FilterKind) -> Self {
        Self::new(kind)
    }
}

/// Transition style between two video layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Crossfade.
    Fade,
    /// Fade through black.
    FadeBlack,
    /// Fade through white.
    FadeWhite,
    /// Noisy dissolve.
    Dissolve,
    /// Wipe towards the left.
    WipeLeft,
    /// Wipe towards the right.
    WipeRight,
    /// Wipe upwards.
    WipeUp,
    /// Wipe downwards.
    WipeDown,
    /// Slide towards the left.
    SlideLeft,
    /// Slide towards the right.
    SlideRight,
    /// Slide upwards.
    SlideUp,
    /// Slide downwards.
    SlideDown,
    /// Expanding circle.
    CircleOpen,
    /// Shrinking circle.
    CircleClose,
    /// Pixelated crossfade.
    Pixelize,
    /// Clock-hand sweep.
    Radial,
}

/// Transition layer; applies to the next video layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionLayer {
    /// Transition style.
    pub kind: TransitionKind,
    /// Length in seconds.
    pub duration: f64,
}

impl TransitionLayer {
    pub(crate) fn validate(&self) -> ReelResult<()> {
        validate_positive(self.duration, "transition duration")
    }
}

// ----------------------------
// Pan/zoom
// ----------------------------

/// Progress-to-zoom mapping for pan/zoom motion.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomCurve {
    /// Constant speed.
    #[default]
    Linear,
    /// Slow start (quadratic).
    EaseIn,
    /// Slow end (quadratic).
    EaseOut,
    /// Slow start and end, split at the midpoint.
    EaseInOut,
    /// Caller-supplied expression; `{p}` is replaced by normalized progress.
    Custom(String),
}

/// Direction of a Ken Burns move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KenBurnsDirection {
    /// Zoom around the center.
    #[default]
    CenterOut,
    /// Pan from top to bottom.
    TopBottom,
    /// Pan from left to right.
    LeftRight,
    /// Pan from top-left to bottom-right.
    Diagonal,
    /// One of the above, chosen from the timeline seed.
    Random,
}

/// How the visible window travels during a pan/zoom.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanMotion {
    /// Preset Ken Burns direction.
    Direction(KenBurnsDirection),
    /// Focus point moving between two percentage points of the source.
    Path {
        /// Start focus `[x%, y%]`.
        from: [f64; 2],
        /// End focus `[x%, y%]`.
        to: [f64; 2],
    },
}

/// Pan/zoom layer over a still image.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PanZoomLayer {
    /// Image path.
    pub source: String,
    /// Timeline start in seconds.
    pub start_time: f64,
    /// Motion length in seconds.
    pub duration: f64,
    /// Zoom factor at the start (1 = no zoom).
    pub zoom_start: f64,
    /// Zoom factor at the end.
    pub zoom_end: f64,
    /// Progress mapping.
    pub curve: ZoomCurve,
    /// Pan path.
    pub motion: PanMotion,
    /// Output size; the timeline canvas when unset.
    pub size: Option<Canvas>,
    /// Placement when overlaid on an earlier picture.
    pub position: Option<Position>,
}

impl PanZoomLayer {
    pub(crate) fn validate(&self) -> ReelResult<()> {
        validate_path(&self.source, "pan/zoom")?;
        validate_start(self.start_time, "pan/zoom")?;
        validate_positive(self.duration, "pan/zoom duration")?;
        for (name, z) in [("zoom_start", self.zoom_start), ("zoom_end", self.zoom_end)] {
            if !z.is_finite() || !(1.0..=10.0).contains(&z) {
                return Err(ReelError::validation(format!(
                    "{name} must be within [1, 10] (got {z})"
                )));
            }
        }
        if let ZoomCurve::Custom(expr) = &self.curve
            && expr.trim().is_empty()
        {
            return Err(ReelError::validation("custom zoom curve must be non-empty"));
        }
        if let PanMotion::Path { from, to } = &self.motion {
            for v in from.iter().chain(to.iter()) {
                if !v.is_finite() || !(0.0..=100.0).contains(v) {
                    return Err(ReelError::validation(
                        "pan path points must be percentages within [0, 100]",
                    ));
                }
            }
        }
        if let Some(c) = self.size {
            Canvas::new(c.width, c.height)?;
        }
        validate_opt_position(&self.position)
    }
}

// ----------------------------
// Chroma key
// ----------------------------

/// What shows through the keyed-out color.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Background {
    /// Still image, looped for the foreground's length.
    Image {
        /// Image path.
        path: String,
    },
    /// Video, optionally looped to cover the foreground.
    Video {
        /// Video path.
        path: String,
        /// Loop the background.
        #[serde(default)]
        loop_source: bool,
        /// Natural length in seconds, when known.
        #[serde(default)]
        source_duration: Option<f64>,
    },
    /// Flat color.
    Color {
        /// Fill color.
        color: Color,
    },
}

/// Which inputs feed the audio mix for a chroma-key composite.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChromaAudio {
    /// The keyed foreground's audio.
    #[default]
    Greenscreen,
    /// The background video's audio.
    Background,
    /// Both.
    Both,
}

/// Chroma-key composite layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChromaKeyLayer {
    /// Green-screen foreground video.
    pub foreground: String,
    /// Replacement background.
    pub background: Background,
    /// Color removed from the foreground.
    pub key_color: Color,
    /// Color distance keyed out, `(0, 1]`.
    pub similarity: f64,
    /// Edge softness, `[0, 1]`.
    pub blend: f64,
    /// Audio source selection.
    pub audio: ChromaAudio,
    /// Timeline start in seconds.
    pub start_time: f64,
    /// Active length.
    pub duration: LayerDuration,
    /// Natural length of the foreground, when known.
    pub foreground_duration: Option<f64>,
    /// Foreground scale relative to the source.
    pub scale: Option<f64>,
    /// Foreground placement on the background.
    pub position: Option<Position>,
}

impl ChromaKeyLayer {
    pub(crate) fn validate(&self) -> ReelResult<()> {
        validate_path(&self.foreground, "chroma-key foreground")?;
        match &self.background {
            Background::Image { path } => validate_path(path, "chroma-key background")?,
            Background::Video {
                path,
                source_duration,
                ..
            } => {
                validate_path(path, "chroma-key background")?;
                validate_opt_source_duration(*source_duration)?;
            }
            Background::Color { .. } => {}
        }
        if !self.similarity.is_finite() || self.similarity <= 0.0 || self.similarity > 1.0 {
            return Err(ReelError::validation(format!(
                "chroma-key similarity must be within (0, 1] (got {})",
                self.similarity
            )));
        }
        validate_unit(self.blend, "chroma-key blend")?;
        if self.audio == ChromaAudio::Background
            && !matches!(self.background, Background::Video { .. })
        {
            return Err(ReelError::validation(
                "chroma-key background audio requires a video background",
            ));
        }
        validate_start(self.start_time, "chroma-key")?;
        self.duration.validate("chroma-key")?;
        validate_opt_source_duration(self.foreground_duration)?;
        validate_opt_scale(self.scale)?;
        validate_opt_position(&self.position)
    }
}

// ----------------------------
// Audio ducking
// ----------------------------

/// A span during which background audio is lowered.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DuckRegion {
    /// Start in seconds.
    pub start: f64,
    /// End in seconds.
    pub end: f64,
}

/// How ducking decides when to lower the background.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DuckingDetection {
    /// Caller-listed regions.
    Manual {
        /// Regions to duck; overlaps resolve to the deepest duck.
        regions: Vec<DuckRegion>,
    },
    /// Compressor keyed directly on the voice.
    Sidechain,
    /// Voice gated first so only speech above the gate threshold triggers the compressor.
    Automatic {
        /// Gate threshold in `(0, 1]`.
        gate_threshold: f64,
    },
}

/// Audio ducking layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AudioDuckingLayer {
    /// Background (music) path.
    pub background: String,
    /// Voice path; required by the sidechain and automatic modes.
    pub voice: Option<String>,
    /// Detection mode.
    pub detection: DuckingDetection,
    /// Background gain while ducked, `[0, 1)`.
    pub level: f64,
    /// Seconds to ramp down before a manual region.
    pub fade_in: f64,
    /// Seconds to ramp back up after a manual region.
    pub fade_out: f64,
    /// Seconds a manual duck is held past the region end.
    pub hold: f64,
    /// Compressor threshold in `(0, 1]`.
    pub threshold: f64,
    /// Background gain outside ducks.
    pub background_volume: f64,
    /// Voice gain.
    pub voice_volume: f64,
}

impl AudioDuckingLayer {
    pub(crate) fn validate(&self) -> ReelResult<()> {
        validate_path(&self.background, "ducking background")?;
        if let Some(v) = &self.voice {
            validate_path(v, "ducking voice")?;
        }
        match &self.detection {
            DuckingDetection::Manual { regions } => {
                if regions.is_empty() {
                    return Err(ReelError::validation(
                        "manual ducking requires at least one region",
                    ));
                }
                for r in regions {
                    validate_start(r.start, "ducking region")?;
                    if !r.end.is_finite() || r.end <= r.start {
                        return Err(ReelError::validation(
                            "ducking region end must be finite and > start",
                        ));
                    }
                }
            }
            DuckingDetection::Sidechain => {
                if self.voice.is_none() {
                    return Err(ReelError::validation("sidechain ducking requires a voice"));
                }
            }
            DuckingDetection::Automatic { gate_threshold } => {
                if self.voice.is_none() {
                    return Err(ReelError::validation("automatic ducking requires a voice"));
                }
                if !gate_threshold.is_finite() || *gate_threshold <= 0.0 || *gate_threshold > 1.0 {
                    return Err(ReelError::validation(
                        "ducking gate_threshold must be within (0, 1]",
                    ));
                }
            }
        }
        if !self.level.is_finite() || !(0.0..1.0).contains(&self.level) {
            return Err(ReelError::validation(format!(
                "ducking level must be within [0, 1) (got {})",
                self.level
            )));
        }
        validate_non_negative(self.fade_in, "ducking fade_in")?;
        validate_non_negative(self.fade_out, "ducking fade_out")?;
        validate_non_negative(self.hold, "ducking hold")?;
        if !self.threshold.is_finite() || self.threshold <= 0.0 || self.threshold > 1.0 {
            return Err(ReelError::validation(
                "ducking threshold must be within (0, 1]",
            ));
        }
        normalize_volume(self.background_volume)?;
        normalize_volume(self.voice_volume)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/layer.rs"]
mod tests;
