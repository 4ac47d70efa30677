use crate::effects::LayerBuilder;
use crate::foundation::core::Canvas;
use crate::foundation::error::ReelResult;
use crate::foundation::num::fmt_num;
use crate::graph::filter::Filter;
use crate::model::layer::{KenBurnsDirection, Layer, PanMotion, PanZoomLayer, ZoomCurve};
use crate::model::position::Position;
use crate::timeline::options::OutputTarget;

/// Ken Burns motion over a still: zoom plus a pan along a named direction.
#[derive(Clone, Debug, PartialEq)]
pub struct KenBurns {
    layer: PanZoomLayer,
}

impl KenBurns {
    /// Zoom from 1.0 to 1.3 over `duration` seconds, centered.
    pub fn new(source: impl Into<String>, duration: f64) -> Self {
        Self {
            layer: PanZoomLayer {
                source: source.into(),
                start_time: 0.0,
                duration,
                zoom_start: 1.0,
                zoom_end: 1.3,
                curve: ZoomCurve::Linear,
                motion: PanMotion::Direction(KenBurnsDirection::CenterOut),
                size: None,
                position: None,
            },
        }
    }

    /// Pan direction.
    pub fn direction(mut self, dir: KenBurnsDirection) -> Self {
        self.layer.motion = PanMotion::Direction(dir);
        self
    }

    /// Zoom factors at the first and last frame.
    pub fn zoom(mut self, from: f64, to: f64) -> Self {
        self.layer.zoom_start = from;
        self.layer.zoom_end = to;
        self
    }

    /// Easing of the zoom.
    pub fn curve(mut self, curve: ZoomCurve) -> Self {
        self.layer.curve = curve;
        self
    }

    /// Timeline start in seconds.
    pub fn start(mut self, secs: f64) -> Self {
        self.layer.start_time = secs;
        self
    }

    /// Output size of the motion clip (defaults to the canvas).
    pub fn size(mut self, size: Canvas) -> Self {
        self.layer.size = Some(size);
        self
    }

    /// Placement when overlaid.
    pub fn position(mut self, p: impl Into<Position>) -> Self {
        self.layer.position = Some(p.into());
        self
    }
}

impl LayerBuilder for KenBurns {
    fn layers(&self) -> ReelResult<Vec<Layer>> {
        Ok(vec![Layer::PanZoom(self.layer.clone())])
    }
}

/// Pan between two focal points (percentages of the source) while zooming.
#[derive(Clone, Debug, PartialEq)]
pub struct PanZoom {
    layer: PanZoomLayer,
}

impl PanZoom {
    /// Centered, zooming from 1.0 to 1.5.
    pub fn new(source: impl Into<String>, duration: f64) -> Self {
        let mut layer = KenBurns::new(source, duration).layer;
        layer.zoom_end = 1.5;
        layer.motion = PanMotion::Path {
            from: [50.0, 50.0],
            to: [50.0, 50.0],
        };
        Self { layer }
    }

    /// Focal point path, `[x%, y%]` at the first and last frame.
    pub fn path(mut self, from: [f64; 2], to: [f64; 2]) -> Self {
        self.layer.motion = PanMotion::Path { from, to };
        self
    }

    /// Zoom factors at the first and last frame.
    pub fn zoom(mut self, from: f64, to: f64) -> Self {
        self.layer.zoom_start = from;
        self.layer.zoom_end = to;
        self
    }

    /// Easing of the zoom.
    pub fn curve(mut self, curve: ZoomCurve) -> Self {
        self.layer.curve = curve;
        self
    }

    /// Timeline start in seconds.
    pub fn start(mut self, secs: f64) -> Self {
        self.layer.start_time = secs;
        self
    }

    /// Output size of the motion clip (defaults to the canvas).
    pub fn size(mut self, size: Canvas) -> Self {
        self.layer.size = Some(size);
        self
    }

    /// Placement when overlaid.
    pub fn position(mut self, p: impl Into<Position>) -> Self {
        self.layer.position = Some(p.into());
        self
    }
}

impl LayerBuilder for PanZoom {
    fn layers(&self) -> ReelResult<Vec<Layer>> {
        Ok(vec![Layer::PanZoom(self.layer.clone())])
    }
}

/// Pick a concrete direction for `random`, stable for a given seed and layer index.
pub(crate) fn resolve_direction(
    dir: KenBurnsDirection,
    seed: u64,
    layer_index: usize,
) -> KenBurnsDirection {
    if dir != KenBurnsDirection::Random {
        return dir;
    }
    let h = xxhash_rust::xxh3::xxh3_64_with_seed(&(layer_index as u64).to_le_bytes(), seed);
    match h % 4 {
        0 => KenBurnsDirection::CenterOut,
        1 => KenBurnsDirection::TopBottom,
        2 => KenBurnsDirection::LeftRight,
        _ => KenBurnsDirection::Diagonal,
    }
}

/// Easing applied to `p`, the normalized progress expression.
fn curve_expr(curve: &ZoomCurve, p: &str, frames: u64) -> String {
    match curve {
        ZoomCurve::Linear => p.to_owned(),
        ZoomCurve::EaseIn => format!("pow({p},2)"),
        ZoomCurve::EaseOut => format!("1-pow(1-{p},2)"),
        ZoomCurve::EaseInOut => {
            format!("if(lt(on,{frames}/2),2*pow({p},2),1-pow(-2*{p}+2,2)/2)")
        }
        ZoomCurve::Custom(expr) => expr.replace("{p}", &format!("({p})")),
    }
}

fn zoom_expr(layer: &PanZoomLayer, p: &str, frames: u64) -> String {
    let start = fmt_num(layer.zoom_start);
    let delta = layer.zoom_end - layer.zoom_start;
    if delta == 0.0 {
        return start;
    }
    let sign = if delta < 0.0 { '-' } else { '+' };
    let curve = match &layer.curve {
        ZoomCurve::Linear => p.to_owned(),
        other => format!("({})", curve_expr(other, p, frames)),
    };
    format!("{start}{sign}{}*{curve}", fmt_num(delta.abs()))
}

const CENTER_X: &str = "iw/2-(iw/zoom/2)";
const CENTER_Y: &str = "ih/2-(ih/zoom/2)";

fn pan_axis(slack: &str, from_pct: f64, to_pct: f64, p: &str) -> String {
    let from = from_pct / 100.0;
    let delta = (to_pct - from_pct) / 100.0;
    if delta == 0.0 {
        return format!("({slack})*{}", fmt_num(from));
    }
    let sign = if delta < 0.0 { '-' } else { '+' };
    format!(
        "({slack})*({}{sign}{}*{p})",
        fmt_num(from),
        fmt_num(delta.abs())
    )
}

fn pan_exprs(motion: &PanMotion, dir: KenBurnsDirection, p: &str) -> (String, String) {
    let sweep_x = || format!("(iw-iw/zoom)*{p}");
    let sweep_y = || format!("(ih-ih/zoom)*{p}");
    match motion {
        PanMotion::Path { from, to } => (
            pan_axis("iw-iw/zoom", from[0], to[0], p),
            pan_axis("ih-ih/zoom", from[1], to[1], p),
        ),
        PanMotion::Direction(_) => match dir {
            KenBurnsDirection::CenterOut | KenBurnsDirection::Random => {
                (CENTER_X.to_owned(), CENTER_Y.to_owned())
            }
            KenBurnsDirection::TopBottom => (CENTER_X.to_owned(), sweep_y()),
            KenBurnsDirection::LeftRight => (sweep_x(), CENTER_Y.to_owned()),
            KenBurnsDirection::Diagonal => (sweep_x(), sweep_y()),
        },
    }
}

/// Build the `zoompan` filter for a pan/zoom layer.
///
/// The clip lasts `round(duration * fps)` frames (half frames round to even) and zoom/pan are
/// functions of `on/d`.
pub(crate) fn zoompan_filter(
    layer: &PanZoomLayer,
    target: &OutputTarget,
    seed: u64,
    layer_index: usize,
) -> Filter {
    let frames = target.fps.secs_to_frames(layer.duration).max(1);
    let p = format!("on/{frames}");
    let dir = match &layer.motion {
        PanMotion::Direction(d) => resolve_direction(*d, seed, layer_index),
        PanMotion::Path { .. } => KenBurnsDirection::CenterOut,
    };
    let (x, y) = pan_exprs(&layer.motion, dir, &p);
    Filter::ZoomPan {
        z: zoom_expr(layer, &p, frames),
        x,
        y,
        frames,
        size: layer.size.unwrap_or(target.canvas),
        fps: target.fps,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/zoompan.rs"]
mod tests;
