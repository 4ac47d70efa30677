use crate::compile::command::{Assembly, CompiledCommand, InputSpec, assemble};
use crate::compile::session::Session;
use crate::effects::{captions, chroma, ducking, transitions, zoompan};
use crate::foundation::num::{fmt_num, secs_to_ms};
use crate::graph::alloc::Pad;
use crate::graph::filter::{DrawText, FadeDir, Filter};
use crate::model::color::Color;
use crate::model::layer::{
    AudioLayer, CaptionLayer, ChromaKeyLayer, FilterKind, FilterLayer, ImageLayer, Layer,
    PanZoomLayer, Source, TextLayer, TransitionLayer, VideoLayer, WatermarkLayer, gain,
};
use crate::model::position::Position;
use crate::resolve::position::{DRAWTEXT, OVERLAY, resolve_or_origin, resolve_position};
use crate::resolve::timing::{Window, layer_window};
use crate::timeline::Timeline;

/// Length of the generated black canvas when nothing bounds the output.
const DEFAULT_BACKGROUND_SECS: f64 = 5.0;

/// Bitrate assumed for size estimates without codec or platform hints.
const FALLBACK_KBPS: u32 = 5128;

/// Running accumulators of one timeline level; nested timelines get their own.
struct Fold {
    video: Option<Pad>,
    /// Output time at which the current picture ends, when known.
    video_end: Option<f64>,
    audio: Vec<Pad>,
    pending: Option<TransitionLayer>,
    /// Duration estimate of the timeline being folded.
    est: Option<f64>,
}

impl Fold {
    fn new(est: Option<f64>) -> Self {
        Self {
            video: None,
            video_end: None,
            audio: Vec::new(),
            pending: None,
            est,
        }
    }
}

struct Compiler {
    s: Session,
    fold: Fold,
    /// Layers seen so far across all nesting levels; keys seeded choices.
    seq: usize,
}

/// Compile a timeline into a command writing `output`.
pub(crate) fn compile(timeline: &Timeline, output: &str) -> CompiledCommand {
    let opts = timeline.options();
    let target = opts.target();
    let est = timeline.duration_estimate();

    let mut c = Compiler {
        s: Session::new(target, opts.seed),
        fold: Fold::new(est),
        seq: 0,
    };
    for layer in timeline.layers() {
        c.layer(layer);
    }
    let (video, audio) = c.finish_level();

    let s = c.s;
    let mapped: Vec<&Pad> = std::iter::once(&video).chain(audio.as_ref()).collect();
    let check = s.graph.check(&mapped);
    debug_assert!(check.is_ok(), "unbalanced filter graph: {check:?}");

    let mut global_args = Vec::new();
    match (opts.codec, target.preset) {
        (Some(codec), _) => global_args.extend(codec.args().iter().map(|a| (*a).to_owned())),
        (None, Some(preset)) => global_args.extend(preset.bitrate_args()),
        (None, None) => {}
    }
    if let Some(fps) = opts.fps {
        global_args.extend(["-r".to_owned(), fps.to_string()]);
    }
    if let Some(d) = opts.duration {
        global_args.extend(["-t".to_owned(), fmt_num(d)]);
    }
    if target.fit {
        global_args.extend(["-aspect".to_owned(), target.aspect.to_string()]);
    }

    let kbps = match (opts.codec, target.preset) {
        (Some(codec), _) => codec.approx_kbps(),
        (None, Some(p)) => p.video_kbps + p.audio_kbps,
        (None, None) => FALLBACK_KBPS,
    };

    tracing::debug!(
        inputs = s.inputs.len(),
        nodes = s.graph.nodes().len(),
        "compiled timeline"
    );

    assemble(Assembly {
        filter_graph: (!s.graph.is_empty()).then(|| s.graph.render()),
        inputs: s.inputs,
        video: Some(video),
        audio,
        global_args,
        overwrite: opts.overwrite,
        output,
        canvas: target.canvas,
        aspect: target.aspect,
        duration_estimate: est,
        kbps,
    })
}

impl Compiler {
    fn layer(&mut self, layer: &Layer) {
        let index = self.seq;
        self.seq += 1;
        let window = layer_window(layer).unwrap_or(Window::unbounded(0.0));
        match layer {
            Layer::Video(l) => self.video(l, window),
            Layer::Audio(l) => self.audio(l, window),
            Layer::Image(l) => self.image(l, window),
            Layer::Text(l) => self.text(l, window),
            Layer::Caption(l) => self.captions(l),
            Layer::Watermark(l) => self.watermark(l, window),
            Layer::Filter(l) => self.filter(l, window),
            Layer::PanZoom(l) => self.pan_zoom(l, window, index),
            Layer::ChromaKey(l) => self.chroma_key(l, window),
            Layer::AudioDucking(l) => {
                let pads = ducking::synthesize(&mut self.s, l);
                self.fold.audio.extend(pads);
            }
            Layer::Transition(t) => {
                if let Some(prev) = self.fold.pending.replace(t.clone()) {
                    tracing::warn!(
                        replaced = ?prev.kind,
                        by = ?t.kind,
                        "two transitions in a row, keeping the later one"
                    );
                }
            }
        }
    }

    /// Close the current level: resolve a trailing transition and mix its audio.
    fn finish_level(&mut self) -> (Pad, Option<Pad>) {
        if let Some(t) = self.fold.pending.take() {
            match (self.fold.video.take(), self.fold.video_end.or(self.fold.est)) {
                (Some(v), Some(end)) => {
                    let out = self
                        .s
                        .graph
                        .extend(v, vec![transitions::fade_out(&t, end)], "v");
                    self.fold.video = Some(out);
                }
                (v, _) => {
                    self.fold.video = v;
                    tracing::warn!(
                        kind = ?t.kind,
                        "trailing transition has no known end, ignoring"
                    );
                }
            }
        }
        let video = self.take_video();
        let audio = std::mem::take(&mut self.fold.audio);
        (video, self.mix(audio))
    }

    fn take_video(&mut self) -> Pad {
        match self.fold.video.take() {
            Some(v) => v,
            None => self.background(),
        }
    }

    /// Black canvas standing in for a missing base picture.
    fn background(&mut self) -> Pad {
        let secs = self.fold.est.unwrap_or(DEFAULT_BACKGROUND_SECS);
        self.fold.video_end = Some(secs);
        let t = self.s.target;
        self.s.graph.source(
            vec![Filter::ColorSource {
                color: Color::keyword("black"),
                size: t.canvas,
                fps: t.fps,
                duration: Some(secs),
            }],
            "v",
        )
    }

    fn mix(&mut self, mut pads: Vec<Pad>) -> Option<Pad> {
        match pads.len() {
            0 | 1 => pads.pop(),
            n => Some(
                self.s
                    .graph
                    .node(pads, vec![Filter::AMix { inputs: n }], "a"),
            ),
        }
    }

    fn delay_audio(&mut self, pad: Pad, start: f64) -> Pad {
        if start <= 0.0 {
            return pad;
        }
        self.s.graph.extend(
            pad,
            vec![Filter::ADelay {
                ms: secs_to_ms(start),
            }],
            "a",
        )
    }

    /// Apply `chain` to the running picture.
    fn apply(&mut self, chain: Vec<Filter>) {
        let base = self.take_video();
        self.fold.video = Some(self.s.graph.extend(base, chain, "v"));
    }

    /// Draw a new node on top of the running picture.
    fn draw(&mut self, chain: Vec<Filter>) {
        let base = self.take_video();
        self.fold.video = Some(self.s.graph.node([base], chain, "v"));
    }

    /// Put a moving clip into the picture and return the output time its audio starts at.
    ///
    /// An unpositioned clip starting at zero with nothing before it becomes the base picture. A
    /// pending transition crossfades from a picture with a known end into the clip, and otherwise
    /// fades the clip in. Everything else is shifted to its start and overlaid.
    fn place_clip(
        &mut self,
        clip: Pad,
        mut pre: Vec<Filter>,
        position: Option<&Position>,
        margin: f64,
        window: Window,
    ) -> f64 {
        let base = self.fold.video.take();
        let transition = self.fold.pending.take();

        let (base, transition) = match (base, transition, self.fold.video_end) {
            (Some(base), Some(t), Some(end)) => {
                let xfade = transitions::crossfade(&t, end);
                let offset = (end - t.duration).max(0.0);
                let clip = self.s.graph.extend(clip, pre, "ov");
                self.fold.video = Some(self.s.graph.node([base, clip], vec![xfade], "v"));
                self.fold.video_end = window.len().map(|len| offset + len);
                return offset;
            }
            (base, transition, _) => (base, transition),
        };

        if let Some(t) = transition {
            if base.is_some() {
                tracing::warn!(
                    kind = ?t.kind,
                    "transition after a clip of unknown length, fading in"
                );
            }
            pre.push(transitions::fade_in(&t));
        }

        match base {
            None if window.start == 0.0 && position.is_none() => {
                self.fold.video = Some(self.s.graph.extend(clip, pre, "v"));
                self.fold.video_end = window.end;
            }
            base => {
                self.fold.video = base;
                let base = self.take_video();
                if window.start > 0.0 {
                    pre.push(Filter::SetPts(format!(
                        "PTS-STARTPTS+{}/TB",
                        fmt_num(window.start)
                    )));
                }
                let clip = self.s.graph.extend(clip, pre, "ov");
                let xy = resolve_or_origin(position, margin, OVERLAY);
                let out = self.s.graph.node(
                    [base, clip],
                    vec![Filter::Overlay {
                        x: xy.x,
                        y: xy.y,
                        enable: window.gate(),
                        shortest: false,
                    }],
                    "v",
                );
                self.fold.video = Some(out);
            }
        }
        window.start
    }

    /// Overlay a still picture, gated to its window.
    ///
    /// A looped still without an end never finishes on its own, so the overlay then ends with the
    /// running picture.
    fn overlay_still(
        &mut self,
        still: Pad,
        pre: Vec<Filter>,
        position: Option<&Position>,
        margin: f64,
        window: Window,
    ) {
        let base = self.take_video();
        let still = self.s.graph.extend(still, pre, "ov");
        let xy = resolve_or_origin(position, margin, OVERLAY);
        let out = self.s.graph.node(
            [base, still],
            vec![Filter::Overlay {
                x: xy.x,
                y: xy.y,
                enable: window.gate(),
                shortest: window.end.is_none(),
            }],
            "v",
        );
        self.fold.video = Some(out);
    }

    fn video(&mut self, l: &VideoLayer, window: Window) {
        let o = &l.options;
        let (clip, own_audio) = match &l.source {
            Source::Path(path) => {
                let mut spec = InputSpec::media(path);
                if o.trim_start > 0.0 {
                    spec.seek = Some(o.trim_start);
                }
                spec.duration = o.duration.seconds();
                spec.stream_loop = o.loop_source;
                let i = self.s.input(spec);
                (Pad::video(i), Some(Pad::audio(i)))
            }
            Source::Timeline(t) => self.nested(t),
        };

        let mut pre = Vec::new();
        if o.position.is_none() && o.scale.is_none() {
            pre.extend(self.s.fit_filters());
        }
        if let Some(scale) = o.scale {
            pre.push(Filter::scale_by(scale));
        }
        if o.opacity < 1.0 {
            pre.extend(Filter::opacity(o.opacity));
        }

        let start = self.place_clip(clip, pre, o.position.as_ref(), o.margin, window);

        if let Some(a) = own_audio.filter(|_| !o.muted) {
            let a = self.s.with_gain(a, gain(o.volume));
            let a = self.delay_audio(a, start);
            self.fold.audio.push(a);
        }
    }

    /// Fold a nested timeline into the shared graph and hand back its output pads.
    fn nested(&mut self, t: &Timeline) -> (Pad, Option<Pad>) {
        let outer = std::mem::replace(&mut self.fold, Fold::new(t.duration_estimate()));
        for layer in t.layers() {
            self.layer(layer);
        }
        let out = self.finish_level();
        self.fold = outer;
        out
    }

    fn audio(&mut self, l: &AudioLayer, window: Window) {
        let o = &l.options;
        let mut spec = InputSpec::media(&l.source);
        if o.trim_start > 0.0 {
            spec.seek = Some(o.trim_start);
        }
        spec.duration = o.duration.seconds();
        spec.stream_loop = o.loop_source;
        let i = self.s.input(spec);

        let mut chain = Vec::new();
        let g = gain(o.volume);
        if g != 1.0 {
            chain.push(Filter::Volume(g));
        }
        if o.fade_in > 0.0 {
            chain.push(Filter::AFade {
                dir: FadeDir::In,
                start: 0.0,
                duration: o.fade_in,
            });
        }
        if o.fade_out > 0.0 {
            match window.len() {
                Some(len) => chain.push(Filter::AFade {
                    dir: FadeDir::Out,
                    start: (len - o.fade_out).max(0.0),
                    duration: o.fade_out,
                }),
                None => tracing::warn!(
                    source = %l.source,
                    "audio fade-out needs a known length, skipping"
                ),
            }
        }
        if window.start > 0.0 {
            chain.push(Filter::ADelay {
                ms: secs_to_ms(window.start),
            });
        }
        let pad = self.s.graph.extend(Pad::audio(i), chain, "a");
        self.fold.audio.push(pad);
    }

    fn image(&mut self, l: &ImageLayer, window: Window) {
        let o = &l.options;
        let mut spec = InputSpec::still(&l.source);
        spec.duration = window.end;
        let i = self.s.input(spec);

        let mut pre = Vec::new();
        if let Some(scale) = o.scale {
            pre.push(Filter::scale_by(scale));
        }
        if o.opacity < 1.0 {
            pre.extend(Filter::opacity(o.opacity));
        }
        self.overlay_still(Pad::video(i), pre, o.position.as_ref(), o.margin, window);
    }

    fn watermark(&mut self, l: &WatermarkLayer, window: Window) {
        let o = &l.options;
        let mut spec = InputSpec::still(&l.source);
        spec.duration = window.end;
        let i = self.s.input(spec);

        let mut pre = Vec::new();
        if let Some(scale) = o.scale {
            pre.push(Filter::scale_by(scale));
        }
        if o.opacity < 1.0 {
            pre.extend(Filter::opacity(o.opacity));
        }
        let corner = Position::Keyword(o.position);
        self.overlay_still(Pad::video(i), pre, Some(&corner), o.margin, window);
    }

    fn text(&mut self, l: &TextLayer, window: Window) {
        let o = &l.options;
        let xy = resolve_position(&o.position, o.margin, DRAWTEXT);
        self.draw(vec![Filter::DrawText(Box::new(DrawText {
            text: l.text.clone(),
            style: o.style.clone(),
            x: xy.x,
            y: xy.y,
            enable: window.gate(),
        }))]);
    }

    fn captions(&mut self, l: &CaptionLayer) {
        for unit in captions::drawtext_units(l) {
            self.draw(vec![Filter::DrawText(Box::new(unit))]);
        }
    }

    fn filter(&mut self, l: &FilterLayer, window: Window) {
        let enable = window.gate();
        let filter = match &l.kind {
            FilterKind::Brightness(v) => Filter::Eq {
                param: "brightness",
                value: *v,
                enable,
            },
            FilterKind::Contrast(v) => Filter::Eq {
                param: "contrast",
                value: *v,
                enable,
            },
            FilterKind::Saturation(v) => Filter::Eq {
                param: "saturation",
                value: *v,
                enable,
            },
            FilterKind::Blur(sigma) => Filter::GBlur {
                sigma: *sigma,
                enable,
            },
            FilterKind::Grayscale => Filter::Grayscale { enable },
            FilterKind::Sepia => Filter::Sepia { enable },
            FilterKind::Sharpen(amount) => Filter::Unsharp {
                amount: *amount,
                enable,
            },
            FilterKind::Vignette => Filter::Vignette { enable },
            FilterKind::FadeIn(d) => Filter::Fade {
                dir: FadeDir::In,
                start: window.start,
                duration: *d,
            },
            FilterKind::FadeOut(d) => {
                let start = match window.end.or(self.fold.est) {
                    Some(end) => (end - d).max(window.start),
                    None => window.start,
                };
                Filter::Fade {
                    dir: FadeDir::Out,
                    start,
                    duration: *d,
                }
            }
            FilterKind::Speed(factor) => {
                self.fold.video_end = self.fold.video_end.map(|end| end / factor);
                Filter::SetPts(format!("PTS/{}", fmt_num(*factor)))
            }
            FilterKind::Rotate(degrees) => Filter::Rotate { degrees: *degrees },
            FilterKind::HFlip => Filter::HFlip { enable },
            FilterKind::VFlip => Filter::VFlip { enable },
            FilterKind::Custom(expr) => Filter::Raw(expr.clone()),
        };
        self.apply(vec![filter]);
    }

    fn pan_zoom(&mut self, l: &PanZoomLayer, window: Window, index: usize) {
        let i = self.s.input(InputSpec::media(&l.source));
        let zoom = zoompan::zoompan_filter(l, &self.s.target, self.s.seed, index);
        self.place_clip(Pad::video(i), vec![zoom], l.position.as_ref(), 0.0, window);
    }

    fn chroma_key(&mut self, l: &ChromaKeyLayer, window: Window) {
        let composite = chroma::synthesize(&mut self.s, l, window);
        let start = self.place_clip(composite.video, Vec::new(), None, 0.0, window);
        for pad in composite.audio {
            let pad = self.delay_audio(pad, start);
            self.fold.audio.push(pad);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/compiler.rs"]
mod tests;
