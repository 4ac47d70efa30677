use crate::compile::command::InputSpec;
use crate::compile::session::Session;
use crate::effects::LayerBuilder;
use crate::foundation::error::ReelResult;
use crate::foundation::num::fmt_num;
use crate::graph::alloc::Pad;
use crate::graph::filter::{Compressor, Filter};
use crate::model::layer::{AudioDuckingLayer, DuckRegion, DuckingDetection, Layer, gain};

/// Lower a background track while a voice is speaking.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioDucking {
    layer: AudioDuckingLayer,
}

impl AudioDucking {
    fn with(background: String, voice: Option<String>, detection: DuckingDetection) -> Self {
        Self {
            layer: AudioDuckingLayer {
                background,
                voice,
                detection,
                level: 0.2,
                fade_in: 0.3,
                fade_out: 0.5,
                hold: 0.2,
                threshold: 0.05,
                background_volume: 1.0,
                voice_volume: 1.0,
            },
        }
    }

    /// Duck `background` inside the given time regions.
    pub fn manual(background: impl Into<String>, regions: Vec<DuckRegion>) -> Self {
        Self::with(
            background.into(),
            None,
            DuckingDetection::Manual { regions },
        )
    }

    /// Duck `background` with a compressor keyed by `voice`.
    pub fn sidechain(background: impl Into<String>, voice: impl Into<String>) -> Self {
        Self::with(
            background.into(),
            Some(voice.into()),
            DuckingDetection::Sidechain,
        )
    }

    /// Like [`Self::sidechain`], with a noise gate cleaning the key signal first.
    pub fn automatic(background: impl Into<String>, voice: impl Into<String>) -> Self {
        Self::with(
            background.into(),
            Some(voice.into()),
            DuckingDetection::Automatic {
                gate_threshold: 0.02,
            },
        )
    }

    /// Voice track mixed alongside a manually ducked background.
    pub fn voice(mut self, path: impl Into<String>) -> Self {
        self.layer.voice = Some(path.into());
        self
    }

    /// Gain of the background while ducked, in `[0, 1)`.
    pub fn level(mut self, level: f64) -> Self {
        self.layer.level = level;
        self
    }

    /// Ramp down / ramp up times in seconds.
    pub fn fades(mut self, fade_in: f64, fade_out: f64) -> Self {
        self.layer.fade_in = fade_in;
        self.layer.fade_out = fade_out;
        self
    }

    /// Extra seconds the duck is held after a region or voice ends.
    pub fn hold(mut self, secs: f64) -> Self {
        self.layer.hold = secs;
        self
    }

    /// Compressor threshold in `(0, 1]`.
    pub fn threshold(mut self, t: f64) -> Self {
        self.layer.threshold = t;
        self
    }

    /// Gate threshold for automatic detection; switches the layer to automatic mode.
    pub fn gate_threshold(mut self, t: f64) -> Self {
        self.layer.detection = DuckingDetection::Automatic { gate_threshold: t };
        self
    }

    /// Background track volume (0-1 or 0-100).
    pub fn background_volume(mut self, v: f64) -> Self {
        self.layer.background_volume = v;
        self
    }

    /// Voice track volume (0-1 or 0-100).
    pub fn voice_volume(mut self, v: f64) -> Self {
        self.layer.voice_volume = v;
        self
    }
}

impl LayerBuilder for AudioDucking {
    fn layers(&self) -> ReelResult<Vec<Layer>> {
        Ok(vec![Layer::AudioDucking(self.layer.clone())])
    }
}

/// Gain envelope of one region: ramp down over `fade_in` before it, hold `level` until
/// `end + hold`, ramp back up over `fade_out`.
fn region_gain(r: &DuckRegion, level: f64, fade_in: f64, fade_out: f64, hold: f64) -> String {
    let l = fmt_num(level);
    let depth = fmt_num(1.0 - level);
    let start = r.start;
    let release = r.end + hold;
    let from = start - fade_in;
    let to = release + fade_out;

    let mut inner = l.clone();
    if fade_out > 0.0 {
        inner = format!(
            "if(gt(t,{rel}),{l}+{depth}*(t-{rel})/{fo},{inner})",
            rel = fmt_num(release),
            fo = fmt_num(fade_out)
        );
    }
    if fade_in > 0.0 {
        inner = format!(
            "if(lt(t,{s}),1-{depth}*(t-{from})/{fi},{inner})",
            s = fmt_num(start),
            from = fmt_num(from),
            fi = fmt_num(fade_in)
        );
    }
    format!(
        "if(between(t,{},{}),{inner},1)",
        fmt_num(from),
        fmt_num(to)
    )
}

/// Per-frame gain expression for manual ducking.
///
/// Overlapping regions combine with `min`, so the deepest duck wins regardless of order.
pub(crate) fn manual_gain_expr(layer: &AudioDuckingLayer, regions: &[DuckRegion]) -> String {
    let envelope = regions
        .iter()
        .map(|r| region_gain(r, layer.level, layer.fade_in, layer.fade_out, layer.hold))
        .reduce(|acc, g| format!("min({acc},{g})"))
        .unwrap_or_else(|| "1".to_owned());
    let bg = gain(layer.background_volume);
    if bg == 1.0 {
        envelope
    } else {
        format!("{}*{envelope}", fmt_num(bg))
    }
}

fn compressor(layer: &AudioDuckingLayer) -> Compressor {
    Compressor {
        threshold: layer.threshold,
        ratio: (1.0 / layer.level).clamp(1.0, 20.0),
        attack_ms: (layer.fade_in * 1000.0).clamp(0.01, 2000.0),
        release_ms: ((layer.fade_out + layer.hold) * 1000.0).clamp(0.01, 9000.0),
        makeup: 1.0,
    }
}

/// Build the ducking sub-graph; returns the audio pads to mix (background first).
pub(crate) fn synthesize(s: &mut Session, layer: &AudioDuckingLayer) -> Vec<Pad> {
    let bg_in = s.input(InputSpec::media(&layer.background));
    let voice = layer.voice.as_ref().map(|path| {
        let i = s.input(InputSpec::media(path));
        s.with_gain(Pad::audio(i), gain(layer.voice_volume))
    });

    let key_gate = match &layer.detection {
        DuckingDetection::Manual { regions } => {
            let expr = manual_gain_expr(layer, regions);
            let bg = s
                .graph
                .node([Pad::audio(bg_in)], vec![Filter::VolumeExpr(expr)], "dk");
            return std::iter::once(bg).chain(voice).collect();
        }
        DuckingDetection::Sidechain => None,
        DuckingDetection::Automatic { gate_threshold } => Some(*gate_threshold),
    };

    let bg = s.with_gain(Pad::audio(bg_in), gain(layer.background_volume));
    let Some(voice) = voice else {
        return vec![bg];
    };

    let [key, mix] = s.graph.fan_out(voice, Filter::ASplit(2), "sc");

    let comp = compressor(layer);
    let key = match key_gate {
        Some(threshold) => s.graph.node(
            [key],
            vec![Filter::AGate {
                threshold,
                attack_ms: comp.attack_ms,
                release_ms: comp.release_ms,
            }],
            "sc",
        ),
        None => key,
    };
    let ducked = s
        .graph
        .node([bg, key], vec![Filter::SidechainCompress(comp)], "dk");
    vec![ducked, mix]
}

#[cfg(test)]
#[path = "../../tests/unit/effects/ducking.rs"]
mod tests;
