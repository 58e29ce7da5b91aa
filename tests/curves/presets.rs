//! Preset table behavior.

use morphkit::curves::{Curve, Easing, HandleType, Interpolation, preset_points};

#[test]
fn linear_table_is_two_vector_endpoints() {
    let points = preset_points(Interpolation::Linear, Easing::InOut).unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].location.x, 0.0);
    assert_eq!(points[0].location.y, 0.0);
    assert_eq!(points[1].location.x, 1.0);
    assert_eq!(points[1].location.y, 1.0);
    assert!(points.iter().all(|p| p.handle == HandleType::Vector));
}

#[test]
fn easing_direction_selects_interior_points() {
    let ease_in = preset_points(Interpolation::Quad, Easing::In).unwrap();
    let ease_out = preset_points(Interpolation::Quad, Easing::Out).unwrap();
    let in_out = preset_points(Interpolation::Quad, Easing::InOut).unwrap();

    assert_eq!(ease_in.len(), 3);
    assert_eq!(ease_out.len(), 3);
    assert_eq!(in_out.len(), 4);
    assert_eq!(ease_in[1].location.x, 0.15);
    assert_eq!(ease_out[1].location.x, 0.85);
}

#[test]
fn preset_change_replaces_the_point_list() {
    let mut curve = Curve::new();
    curve.add_point((0.5, 0.5));
    assert_eq!(curve.interpolation(), Interpolation::Custom);

    curve.set_interpolation(Interpolation::Quint);
    assert_eq!(curve.points().len(), 4);
    assert_eq!(curve.points()[1].location.x, 0.275);
}

#[test]
fn custom_interpolation_preserves_edits() {
    let mut curve = Curve::from_preset(Interpolation::Cubic, Easing::In);
    curve.set_interpolation(Interpolation::Custom);
    let before = curve.points().to_vec();
    curve.set_easing(Easing::Out);
    assert_eq!(curve.points(), before.as_slice());
}
