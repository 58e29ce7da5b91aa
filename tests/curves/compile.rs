//! Keyframe compilation scenarios.

use morphkit::curves::{
    Curve, CurvePoint, Easing, Extend, HandleType, Interpolation, Vec2, to_bezier,
};

const EPS: f64 = 1e-9;

fn approx(a: Vec2, x: f64, y: f64) -> bool {
    (a.x - x).abs() < 1e-3 && (a.y - y).abs() < 1e-3
}

#[test]
fn linear_preset_compiles_to_third_handles() {
    let curve = Curve::from_preset(Interpolation::Linear, Easing::InOut);
    let mut extrapolated = curve.clone();
    extrapolated.set_extend(Extend::Extrapolated);
    let frames = extrapolated.compile(None, None).unwrap();

    // Exactly the two input points survive as keyframe positions.
    assert_eq!(frames.len(), 2);
    assert!((frames[0].position.x).abs() < EPS);
    assert!((frames[1].position.x - 1.0).abs() < EPS);

    // Handle offsets are one third of the vector to the sole neighbor.
    assert!(approx(frames[0].handle_right, 0.333, 0.333));
    assert!(approx(frames[1].handle_left, 0.667, 0.667));
}

#[test]
fn reversed_domain_remap_keeps_x_ascending() {
    let points = vec![
        CurvePoint::new((0.0, 0.0), HandleType::Vector),
        CurvePoint::new((0.3, 0.2), HandleType::Vector),
        CurvePoint::new((1.0, 1.0), HandleType::Vector),
    ];
    let frames = to_bezier(&points, Some((1.0, 0.0)), None, true).unwrap();

    for pair in frames.windows(2) {
        assert!(
            pair[0].position.x < pair[1].position.x,
            "reversed remap must never yield non-monotonic x"
        );
    }
    // The ascending input became a descending output curve.
    assert!(frames[0].position.y > frames[2].position.y);
}

#[test]
fn horizontal_extend_flattens_the_outer_handles() {
    let curve = Curve::from_preset(Interpolation::Sine, Easing::InOut);
    let frames = curve.compile(None, None).unwrap();

    let first = frames.first().unwrap();
    let last = frames.last().unwrap();
    assert!((first.handle_left.y - first.position.y).abs() < EPS);
    assert!((last.handle_right.y - last.position.y).abs() < EPS);
    assert!((first.handle_left.x).abs() < EPS);
    assert!((last.handle_right.x - 1.0).abs() < EPS);
}

#[test]
fn remapped_compile_spans_both_ranges() {
    let curve = Curve::from_preset(Interpolation::Linear, Easing::InOut);
    let frames = curve.compile(Some((2.0, 4.0)), Some((-1.0, 1.0))).unwrap();

    assert!(approx(frames[0].position, 2.0, -1.0));
    assert!(approx(frames[1].position, 4.0, 1.0));
    // Flattened handles stop at the remapped domain boundary.
    assert!((frames[0].handle_left.x - 2.0).abs() < EPS);
    assert!((frames[1].handle_right.x - 4.0).abs() < EPS);
}

#[test]
fn point_edits_resort_and_compile() {
    let mut curve = Curve::new();
    curve.add_point((0.7, 0.2));
    curve.add_point((0.3, 0.9));

    let xs: Vec<f64> = curve.points().iter().map(|p| p.location.x).collect();
    assert_eq!(xs, vec![0.0, 0.3, 0.7, 1.0]);

    let frames = curve.compile(None, None).unwrap();
    assert_eq!(frames.len(), 4);
    for pair in frames.windows(2) {
        assert!(pair[0].position.x <= pair[1].position.x);
    }
}

#[test]
fn compilation_needs_two_points() {
    let single = [CurvePoint::new((0.5, 0.5), HandleType::Auto)];
    assert!(to_bezier(&single, None, None, false).is_err());
}

mod remap_laws {
    use super::*;
    use proptest::prelude::*;

    fn sorted_points() -> impl Strategy<Value = Vec<CurvePoint>> {
        proptest::collection::vec((0.0f64..=1.0, 0.0f64..=1.0), 2..10).prop_map(|raw| {
            let mut points: Vec<CurvePoint> = raw
                .into_iter()
                .map(|(x, y)| CurvePoint::new((x, y), HandleType::AutoClamped))
                .collect();
            points.sort_by(|a, b| a.location.x.total_cmp(&b.location.x));
            points
        })
    }

    proptest! {
        #[test]
        fn any_remap_keeps_x_ascending(
            points in sorted_points(),
            a in -2.0f64..2.0,
            b in -2.0f64..2.0,
        ) {
            prop_assume!((a - b).abs() > 1e-6);
            let frames = to_bezier(&points, Some((a, b)), None, true).unwrap();
            for pair in frames.windows(2) {
                prop_assert!(pair[0].position.x <= pair[1].position.x + 1e-9);
            }
        }

        #[test]
        fn remapped_positions_stay_inside_the_range(
            points in sorted_points(),
            c in -3.0f64..3.0,
            d in -3.0f64..3.0,
        ) {
            let frames = to_bezier(&points, None, Some((c, d)), true).unwrap();
            let (lo, hi) = (c.min(d), c.max(d));
            for frame in &frames {
                prop_assert!(frame.position.y >= lo - 1e-9);
                prop_assert!(frame.position.y <= hi + 1e-9);
            }
        }
    }
}
