use crate::foundation::num::fmt_num;
use crate::model::position::{Coord, Position};

/// Names the media tool gives the canvas and the placed item inside one filter.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Placeholders {
    pub(crate) main_w: &'static str,
    pub(crate) main_h: &'static str,
    pub(crate) item_w: &'static str,
    pub(crate) item_h: &'static str,
}

/// `overlay`: main picture `W`/`H`, overlaid picture `w`/`h`.
pub(crate) const OVERLAY: Placeholders = Placeholders {
    main_w: "W",
    main_h: "H",
    item_w: "w",
    item_h: "h",
};

/// `drawtext`: frame `w`/`h`, rendered text `text_w`/`text_h`.
pub(crate) const DRAWTEXT: Placeholders = Placeholders {
    main_w: "w",
    main_h: "h",
    item_w: "text_w",
    item_h: "text_h",
};

/// Resolved coordinate expressions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Xy {
    pub(crate) x: String,
    pub(crate) y: String,
}

/// Resolve a position to `x`/`y` expressions.
///
/// Keywords are inset by `margin` pixels from the edges they touch; explicit points are offset
/// by the anchor so that anchor point of the item lands on the coordinate.
pub(crate) fn resolve_position(pos: &Position, margin: f64, ph: Placeholders) -> Xy {
    match *pos {
        Position::Keyword(a) => Xy {
            x: keyword_axis(a.fx(), margin, ph.main_w, ph.item_w),
            y: keyword_axis(a.fy(), margin, ph.main_h, ph.item_h),
        },
        Position::Point { x, y, anchor } => Xy {
            x: point_axis(x, anchor.fx(), ph.main_w, ph.item_w),
            y: point_axis(y, anchor.fy(), ph.main_h, ph.item_h),
        },
    }
}

/// Top-left placement used when a layer has no position.
pub(crate) fn origin() -> Xy {
    Xy {
        x: "0".to_owned(),
        y: "0".to_owned(),
    }
}

/// Resolve an optional position, falling back to the canvas origin.
pub(crate) fn resolve_or_origin(pos: Option<&Position>, margin: f64, ph: Placeholders) -> Xy {
    match pos {
        Some(p) => resolve_position(p, margin, ph),
        None => origin(),
    }
}

fn keyword_axis(frac: f64, margin: f64, main: &str, item: &str) -> String {
    let m = fmt_num(margin);
    if frac == 0.0 {
        m
    } else if frac == 1.0 {
        if margin == 0.0 {
            format!("{main}-{item}")
        } else {
            format!("{main}-{item}-{m}")
        }
    } else {
        format!("({main}-{item})/2")
    }
}

fn point_axis(c: Coord, anchor_frac: f64, main: &str, item: &str) -> String {
    let base = match c {
        Coord::Px(v) => fmt_num(v),
        Coord::Percent(p) => format!("{}*{main}", fmt_num(p / 100.0)),
    };
    if anchor_frac == 0.0 {
        base
    } else if anchor_frac == 1.0 {
        format!("{base}-{item}")
    } else {
        format!("{base}-{item}/2")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/position.rs"]
mod tests;
