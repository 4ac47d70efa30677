use super::*;
use crate::timeline::options::GlobalOptions;

fn layer_of(b: &impl LayerBuilder) -> PanZoomLayer {
    match b.layers().unwrap().pop() {
        Some(Layer::PanZoom(l)) => l,
        other => panic!("expected pan/zoom layer, got {other:?}"),
    }
}

fn target() -> OutputTarget {
    GlobalOptions::default().target()
}

#[test]
fn five_seconds_at_default_rate_is_125_frames() {
    let l = layer_of(&KenBurns::new("p.jpg", 5.0));
    let f = zoompan_filter(&l, &target(), 0, 0);
    let s = f.to_string();
    assert!(s.contains(":d=125:"), "{s}");
    assert!(s.contains("z='1+0.3*on/125'"), "{s}");
    assert!(s.contains(":s=1920x1080:fps=25"), "{s}");
}

#[test]
fn half_frame_rounds_to_even() {
    let l = layer_of(&KenBurns::new("p.jpg", 0.5));
    let Filter::ZoomPan { frames, .. } = zoompan_filter(&l, &target(), 0, 0) else {
        panic!("expected zoompan");
    };
    assert_eq!(frames, 12);
}

#[test]
fn curves_shape_the_zoom() {
    let base = layer_of(&KenBurns::new("p.jpg", 4.0).zoom(1.0, 2.0));
    let z = |curve: ZoomCurve| {
        let mut l = base.clone();
        l.curve = curve;
        match zoompan_filter(&l, &target(), 0, 0) {
            Filter::ZoomPan { z, .. } => z,
            _ => unreachable!(),
        }
    };
    assert_eq!(z(ZoomCurve::Linear), "1+1*on/100");
    assert_eq!(z(ZoomCurve::EaseIn), "1+1*(pow(on/100,2))");
    assert_eq!(z(ZoomCurve::EaseOut), "1+1*(1-pow(1-on/100,2))");
    assert_eq!(
        z(ZoomCurve::EaseInOut),
        "1+1*(if(lt(on,100/2),2*pow(on/100,2),1-pow(-2*on/100+2,2)/2))"
    );
    assert_eq!(z(ZoomCurve::Custom("sqrt({p})".into())), "1+1*(sqrt((on/100)))");
}

#[test]
fn zoom_out_uses_subtraction() {
    let l = layer_of(&KenBurns::new("p.jpg", 4.0).zoom(1.5, 1.0));
    let Filter::ZoomPan { z, .. } = zoompan_filter(&l, &target(), 0, 0) else {
        panic!("expected zoompan");
    };
    assert_eq!(z, "1.5-0.5*on/100");
}

#[test]
fn directions_select_pan_vectors() {
    let xy = |dir| {
        let l = layer_of(&KenBurns::new("p.jpg", 4.0).direction(dir));
        match zoompan_filter(&l, &target(), 0, 0) {
            Filter::ZoomPan { x, y, .. } => (x, y),
            _ => unreachable!(),
        }
    };
    assert_eq!(
        xy(KenBurnsDirection::CenterOut),
        (CENTER_X.to_owned(), CENTER_Y.to_owned())
    );
    assert_eq!(
        xy(KenBurnsDirection::TopBottom),
        (CENTER_X.to_owned(), "(ih-ih/zoom)*on/100".to_owned())
    );
    assert_eq!(
        xy(KenBurnsDirection::LeftRight).0,
        "(iw-iw/zoom)*on/100"
    );
    let (dx, dy) = xy(KenBurnsDirection::Diagonal);
    assert!(dx.starts_with("(iw-iw/zoom)") && dy.starts_with("(ih-ih/zoom)"));
}

#[test]
fn random_direction_is_stable_per_seed_and_index() {
    let a = resolve_direction(KenBurnsDirection::Random, 7, 3);
    let b = resolve_direction(KenBurnsDirection::Random, 7, 3);
    assert_eq!(a, b);
    assert_ne!(a, KenBurnsDirection::Random);
    assert_eq!(
        resolve_direction(KenBurnsDirection::Diagonal, 7, 3),
        KenBurnsDirection::Diagonal
    );
}

#[test]
fn pan_path_interpolates_focal_point() {
    let l = layer_of(&PanZoom::new("p.jpg", 4.0).path([0.0, 50.0], [100.0, 50.0]));
    let Filter::ZoomPan { x, y, z, .. } = zoompan_filter(&l, &target(), 0, 0) else {
        panic!("expected zoompan");
    };
    assert_eq!(x, "(iw-iw/zoom)*(0+1*on/100)");
    assert_eq!(y, "(ih-ih/zoom)*0.5");
    assert_eq!(z, "1+0.5*on/100");
}

#[test]
fn explicit_size_and_rate_are_used() {
    let l = layer_of(&KenBurns::new("p.jpg", 2.0).size(Canvas::new(640, 360).unwrap()));
    let opts = GlobalOptions {
        fps: Some(crate::foundation::core::Fps::new(30, 1).unwrap()),
        ..GlobalOptions::default()
    };
    let s = zoompan_filter(&l, &opts.target(), 0, 0).to_string();
    assert!(s.ends_with(":d=60:s=640x360:fps=30"), "{s}");
}
