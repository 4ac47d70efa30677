//! The immutable timeline and its builder API.

use crate::compile::command::CompiledCommand;
use crate::compile::compiler;
use crate::effects::LayerBuilder;
use crate::effects::captions::WordHighlight;
use crate::effects::chroma::ChromaKey;
use crate::effects::ducking::AudioDucking;
use crate::effects::zoompan::{KenBurns, PanZoom};
use crate::foundation::core::{AspectRatio, Canvas, Fps};
use crate::foundation::error::{ReelError, ReelResult};
use crate::model::layer::{
    AudioLayer, AudioOptions, CaptionCue, CaptionLayer, CaptionOptions, CaptionSource, FilterLayer,
    ImageLayer, ImageOptions, Layer, Source, TextLayer, TextOptions, TransitionKind,
    TransitionLayer, VideoLayer, VideoOptions, WatermarkLayer, WatermarkOptions,
};
use crate::platform::codec::CodecPreset;
use crate::resolve::timing::layers_end;
use std::sync::Arc;

pub(crate) mod json;
pub(crate) mod options;

use options::GlobalOptions;

/// An ordered list of layers plus global render options.
///
/// Every builder method leaves `self` untouched and returns a new timeline; layers are shared
/// between the two through [`Arc`]. Builders validate their input and fail with
/// [`ReelError::Validation`].
///
/// ```
/// use reelcraft::{AudioOptions, Timeline, VideoOptions};
///
/// let cmd = Timeline::new()
///     .add_video("v.mp4", VideoOptions::new())?
///     .add_audio("m.mp3", AudioOptions::new().volume(0.5).start(2.0))?
///     .command("o.mp4");
/// assert!(cmd.contains("adelay=2000|2000"));
/// # Ok::<(), reelcraft::ReelError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeline {
    layers: Vec<Arc<Layer>>,
    options: GlobalOptions,
}

impl Timeline {
    /// Empty timeline with default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(layers: Vec<Layer>, options: GlobalOptions) -> ReelResult<Self> {
        let t = Self {
            layers: layers.into_iter().map(Arc::new).collect(),
            options,
        };
        t.validate()?;
        Ok(t)
    }

    /// Layers in application order.
    pub fn layers(&self) -> &[Arc<Layer>] {
        &self.layers
    }

    /// Global render options.
    pub fn options(&self) -> &GlobalOptions {
        &self.options
    }

    pub(crate) fn validate(&self) -> ReelResult<()> {
        self.options.validate()?;
        for layer in &self.layers {
            layer.validate()?;
        }
        Ok(())
    }

    /// Output length in seconds: the explicit duration, else the latest bounded layer end.
    pub fn duration_estimate(&self) -> Option<f64> {
        self.options
            .duration
            .or_else(|| layers_end(&self.layers))
    }

    /// Append an already-built layer.
    pub fn add_layer(&self, layer: Layer) -> ReelResult<Self> {
        layer.validate()?;
        let mut layers = self.layers.clone();
        layers.push(Arc::new(layer));
        Ok(Self {
            layers,
            options: self.options.clone(),
        })
    }

    /// Append every layer an effect builder produces.
    pub fn apply(&self, builder: &impl LayerBuilder) -> ReelResult<Self> {
        let mut layers = self.layers.clone();
        for layer in builder.layers()? {
            layer.validate()?;
            layers.push(Arc::new(layer));
        }
        Ok(Self {
            layers,
            options: self.options.clone(),
        })
    }

    fn with_options(&self, f: impl FnOnce(&mut GlobalOptions)) -> ReelResult<Self> {
        let mut options = self.options.clone();
        f(&mut options);
        options.validate()?;
        Ok(Self {
            layers: self.layers.clone(),
            options,
        })
    }

    // ----------------------------
    // Layers
    // ----------------------------

    /// Add a video clip, or a nested timeline compiled inline.
    pub fn add_video(&self, source: impl Into<Source>, options: VideoOptions) -> ReelResult<Self> {
        self.add_layer(Layer::Video(VideoLayer {
            source: source.into(),
            options,
        }))
    }

    /// Add an audio track.
    pub fn add_audio(&self, path: impl Into<String>, options: AudioOptions) -> ReelResult<Self> {
        self.add_layer(Layer::Audio(AudioLayer {
            source: path.into(),
            options,
        }))
    }

    /// Add a still image overlay.
    pub fn add_image(&self, path: impl Into<String>, options: ImageOptions) -> ReelResult<Self> {
        self.add_layer(Layer::Image(ImageLayer {
            source: path.into(),
            options,
        }))
    }

    /// Add static text.
    pub fn add_text(&self, text: impl Into<String>, options: TextOptions) -> ReelResult<Self> {
        self.add_layer(Layer::Text(TextLayer {
            text: text.into(),
            options,
        }))
    }

    /// Add timed caption cues.
    pub fn add_captions(
        &self,
        cues: Vec<CaptionCue>,
        options: CaptionOptions,
    ) -> ReelResult<Self> {
        self.add_layer(Layer::Caption(CaptionLayer {
            source: CaptionSource::Cues(cues),
            options,
        }))
    }

    /// Add word-by-word captions.
    pub fn add_word_highlight(&self, words: WordHighlight) -> ReelResult<Self> {
        self.apply(&words)
    }

    /// Add a corner watermark.
    pub fn add_watermark(
        &self,
        path: impl Into<String>,
        options: WatermarkOptions,
    ) -> ReelResult<Self> {
        self.add_layer(Layer::Watermark(WatermarkLayer {
            source: path.into(),
            options,
        }))
    }

    /// Apply a filter to everything composed so far.
    ///
    /// Filters run in call order; swapping two calls changes the output.
    pub fn add_filter(&self, filter: impl Into<FilterLayer>) -> ReelResult<Self> {
        self.add_layer(Layer::Filter(filter.into()))
    }

    /// Join the current picture and the next video layer with a transition.
    pub fn add_transition(&self, kind: TransitionKind, duration: f64) -> ReelResult<Self> {
        self.add_layer(Layer::Transition(TransitionLayer { kind, duration }))
    }

    /// Add pan/zoom motion over a still.
    pub fn add_pan_zoom(&self, pan_zoom: PanZoom) -> ReelResult<Self> {
        self.apply(&pan_zoom)
    }

    /// Add a Ken Burns move over a still.
    pub fn add_ken_burns(&self, ken_burns: KenBurns) -> ReelResult<Self> {
        self.apply(&ken_burns)
    }

    /// Add a green-screen composite.
    pub fn add_chroma_key(&self, chroma_key: ChromaKey) -> ReelResult<Self> {
        self.apply(&chroma_key)
    }

    /// Add background audio ducked under a voice.
    pub fn add_audio_ducking(&self, ducking: AudioDucking) -> ReelResult<Self> {
        self.apply(&ducking)
    }

    // ----------------------------
    // Global options
    // ----------------------------

    /// Output frame rate `num/den`.
    pub fn fps(&self, num: u32, den: u32) -> ReelResult<Self> {
        let fps = Fps::new(num, den)?;
        self.with_options(|o| o.fps = Some(fps))
    }

    /// Explicit output duration in seconds.
    pub fn duration(&self, secs: f64) -> ReelResult<Self> {
        self.with_options(|o| o.duration = Some(secs))
    }

    /// Canvas size used when no platform preset or aspect ratio applies.
    pub fn size(&self, width: u32, height: u32) -> ReelResult<Self> {
        let canvas = Canvas::new(width, height)?;
        self.with_options(|o| o.size = Some(canvas))
    }

    /// Target aspect ratio such as `"9:16"`.
    pub fn aspect_ratio(&self, ratio: &str) -> ReelResult<Self> {
        let aspect = AspectRatio::parse(ratio)?;
        self.with_options(|o| o.aspect_ratio = Some(aspect))
    }

    /// Platform preset by name (`"tiktok"`, `"youtube"`, ...). Unknown names are ignored when
    /// compiling.
    pub fn platform(&self, name: impl Into<String>) -> ReelResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ReelError::validation("platform name must be non-empty"));
        }
        self.with_options(|o| o.platform = Some(name))
    }

    /// Encoder preset.
    pub fn codec(&self, codec: CodecPreset) -> ReelResult<Self> {
        self.with_options(|o| o.codec = Some(codec))
    }

    /// Seed for choices resolved at compile time.
    pub fn seed(&self, seed: u64) -> ReelResult<Self> {
        self.with_options(|o| o.seed = seed)
    }

    /// Whether an existing output file is overwritten.
    pub fn overwrite(&self, overwrite: bool) -> ReelResult<Self> {
        self.with_options(|o| o.overwrite = overwrite)
    }

    // ----------------------------
    // Output
    // ----------------------------

    /// Compile into a command writing `output`, with derived metadata.
    #[tracing::instrument(skip(self), fields(layers = self.layers.len()))]
    pub fn compile(&self, output: &str) -> CompiledCommand {
        compiler::compile(self, output)
    }

    /// Shell-ready command writing `output`.
    pub fn command(&self, output: &str) -> String {
        self.compile(output).command().to_owned()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/timeline.rs"]
mod tests;
