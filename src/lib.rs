//! Reelcraft compiles declarative media timelines into `ffmpeg` invocations.
//!
//! A [`Timeline`] is an immutable, ordered list of layers (video, audio, images, text, captions,
//! filters, transitions and effects) plus global render options. Compiling it never touches the
//! file system or spawns a process; it produces a [`CompiledCommand`] whose command line is a pure
//! function of the timeline and the output path:
//!
//! - Build a [`Timeline`] with the `add_*` builders or [`Timeline::apply`]
//! - Call [`Timeline::compile`] (or [`Timeline::command`] for just the string)
//! - Hand the command to whatever runs `ffmpeg`
//!
//! Timelines round-trip through JSON with [`Timeline::to_json`] and [`Timeline::from_json`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod compile;
pub(crate) mod effects;
pub(crate) mod graph;
pub(crate) mod model;
pub(crate) mod platform;
pub(crate) mod resolve;
pub(crate) mod timeline;

pub use crate::foundation::core::{AspectRatio, Canvas, Fps};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::compile::command::{CompiledCommand, InputSpec};
pub use crate::compile::fingerprint::CommandFingerprint;
pub use crate::effects::LayerBuilder;
pub use crate::effects::captions::WordHighlight;
pub use crate::effects::chroma::ChromaKey;
pub use crate::effects::ducking::AudioDucking;
pub use crate::effects::zoompan::{KenBurns, PanZoom};
pub use crate::model::color::Color;
pub use crate::model::layer::{
    AudioDuckingLayer, AudioLayer, AudioOptions, Background, CaptionCue, CaptionLayer,
    CaptionOptions, CaptionSource, ChromaAudio, ChromaKeyLayer, DuckRegion, DuckingDetection,
    FilterKind, FilterLayer, ImageLayer, ImageOptions, KenBurnsDirection, Layer, PanMotion,
    PanZoomLayer, Source, TextLayer, TextOptions, TransitionKind, TransitionLayer, VideoLayer,
    VideoOptions, WatermarkLayer, WatermarkOptions, ZoomCurve,
};
pub use crate::model::position::{Anchor, Coord, Position};
pub use crate::model::style::{HighlightPreset, TextStyle};
pub use crate::model::timing::LayerDuration;
pub use crate::platform::codec::CodecPreset;
pub use crate::platform::presets::{Platform, PlatformPreset};
pub use crate::timeline::Timeline;
pub use crate::timeline::options::GlobalOptions;
