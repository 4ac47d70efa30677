use super::*;
use crate::model::position::Anchor;

fn kw(a: Anchor, margin: f64) -> Xy {
    resolve_position(&Position::Keyword(a), margin, OVERLAY)
}

#[test]
fn center_keyword_uses_canvas_and_item_placeholders() {
    let xy = kw(Anchor::Center, 10.0);
    assert_eq!(xy.x, "(W-w)/2");
    assert_eq!(xy.y, "(H-h)/2");
}

#[test]
fn corner_keywords_are_inset_by_margin() {
    assert_eq!(
        kw(Anchor::TopLeft, 10.0),
        Xy {
            x: "10".into(),
            y: "10".into()
        }
    );
    assert_eq!(
        kw(Anchor::BottomRight, 20.0),
        Xy {
            x: "W-w-20".into(),
            y: "H-h-20".into()
        }
    );
    assert_eq!(
        kw(Anchor::BottomRight, 0.0),
        Xy {
            x: "W-w".into(),
            y: "H-h".into()
        }
    );
}

#[test]
fn drawtext_keywords_use_text_placeholders() {
    let xy = resolve_position(&Position::Keyword(Anchor::BottomCenter), 50.0, DRAWTEXT);
    assert_eq!(xy.x, "(w-text_w)/2");
    assert_eq!(xy.y, "h-text_h-50");
}

#[test]
fn percentages_resolve_to_canvas_fractions() {
    let p = Position::percent(50.0, 30.0, Anchor::TopLeft);
    let xy = resolve_position(&p, 0.0, OVERLAY);
    assert_eq!(xy.x, "0.5*W");
    assert_eq!(xy.y, "0.3*H");
}

#[test]
fn non_top_left_anchors_add_offsets() {
    let p = Position::percent(50.0, 30.0, Anchor::Center);
    let xy = resolve_position(&p, 0.0, OVERLAY);
    assert_eq!(xy.x, "0.5*W-w/2");
    assert_eq!(xy.y, "0.3*H-h/2");

    let p = Position::Point {
        x: Coord::Px(100.0),
        y: Coord::Px(40.0),
        anchor: Anchor::BottomRight,
    };
    let xy = resolve_position(&p, 0.0, OVERLAY);
    assert_eq!(xy.x, "100-w");
    assert_eq!(xy.y, "40-h");
}

#[test]
fn absolute_coordinates_pass_through() {
    let p = Position::at(Coord::Px(12.5), Coord::Px(7.0));
    let xy = resolve_position(&p, 99.0, OVERLAY);
    assert_eq!(xy.x, "12.5");
    assert_eq!(xy.y, "7");
}
