use crate::graph::filter::{FadeDir, Filter};
use crate::model::layer::{TransitionKind, TransitionLayer};

/// `xfade` transition name for a kind.
pub(crate) fn xfade_name(kind: TransitionKind) -> &'static str {
    match kind {
        TransitionKind::Fade => "fade",
        TransitionKind::FadeBlack => "fadeblack",
        TransitionKind::FadeWhite => "fadewhite",
        TransitionKind::Dissolve => "dissolve",
        TransitionKind::WipeLeft => "wipeleft",
        TransitionKind::WipeRight => "wiperight",
        TransitionKind::WipeUp => "wipeup",
        TransitionKind::WipeDown => "wipedown",
        TransitionKind::SlideLeft => "slideleft",
        TransitionKind::SlideRight => "slideright",
        TransitionKind::SlideUp => "slideup",
        TransitionKind::SlideDown => "slidedown",
        TransitionKind::CircleOpen => "circleopen",
        TransitionKind::CircleClose => "circleclose",
        TransitionKind::Pixelize => "pixelize",
        TransitionKind::Radial => "radial",
    }
}

/// Crossfade from the running picture into the next clip.
///
/// `offset` is where the outgoing picture starts fading: its end minus the transition length,
/// clamped at zero.
pub(crate) fn crossfade(t: &TransitionLayer, outgoing_end: f64) -> Filter {
    Filter::XFade {
        transition: xfade_name(t.kind),
        duration: t.duration,
        offset: (outgoing_end - t.duration).max(0.0),
    }
}

/// Fade from black, used when a transition opens the timeline.
pub(crate) fn fade_in(t: &TransitionLayer) -> Filter {
    Filter::Fade {
        dir: FadeDir::In,
        start: 0.0,
        duration: t.duration,
    }
}

/// Fade to black ending at `end`, used when a transition closes the timeline.
pub(crate) fn fade_out(t: &TransitionLayer, end: f64) -> Filter {
    Filter::Fade {
        dir: FadeDir::Out,
        start: (end - t.duration).max(0.0),
        duration: t.duration,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/transitions.rs"]
mod tests;
