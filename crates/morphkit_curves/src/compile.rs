//! Point-list to Bezier keyframe compilation.
//!
//! The compiler turns an x-ascending control point list into tangent
//! handle keyframes: optional domain/range remapping, per-point tangent
//! computation with synthetic end neighbors, endpoint refinement for
//! smooth curves, and optional flattening of the outer handles when the
//! curve must not extrapolate.

use morphkit_foundation::{Error, Result};

use crate::geom::Vec2;
use crate::keyframe::Keyframe;
use crate::point::{CurvePoint, HandleType};

/// Tangent length constant for auto handles.
///
/// Scales the normalized neighbor-direction sum so that auto tangents
/// match the reference curve-mapping implementation exactly.
const AUTO_TANGENT_SCALE: f64 = 2.5614;

/// Directions shorter than this are treated as degenerate during
/// endpoint refinement.
const REFINE_EPSILON: f64 = 1e-5;

struct Work {
    co: Vec2,
    handle: HandleType,
    left: Vec2,
    right: Vec2,
}

/// Compiles an ordered control point list into keyframe descriptors.
///
/// `range_x` remaps the x domain and `range_y` the y range; a reversed
/// pair (`a > b`) reflects the points so the output keyframes always
/// stay x-ascending. With `extrapolate` unset the outermost handles are
/// flattened to the endpoint y and extended to the domain boundary.
///
/// # Errors
///
/// Returns an internal error if fewer than two points are given; curve
/// owners maintain the two-point minimum, so hitting this indicates
/// invariant corruption upstream.
pub fn to_bezier(
    points: &[CurvePoint],
    range_x: Option<(f64, f64)>,
    range_y: Option<(f64, f64)>,
    extrapolate: bool,
) -> Result<Vec<Keyframe>> {
    if points.len() < 2 {
        return Err(Error::internal(format!(
            "curve compilation needs at least two points, got {}",
            points.len()
        )));
    }

    let mut work: Vec<Work> = points
        .iter()
        .map(|p| Work {
            co: p.location,
            handle: p.handle,
            left: Vec2::default(),
            right: Vec2::default(),
        })
        .collect();

    if let Some((a, b)) = range_x {
        let (lo, hi) = if a > b {
            // Reflect about the midpoint and reverse the order so the
            // remapped sequence stays x-ascending.
            for item in &mut work {
                item.co.x = 1.0 - item.co.x;
            }
            work.reverse();
            (b, a)
        } else {
            (a, b)
        };
        let span = hi - lo;
        for item in &mut work {
            item.co.x = lo + item.co.x * span;
        }
    }

    if let Some((c, d)) = range_y {
        let (lo, hi) = if c > d {
            // Reflecting y leaves the x order untouched, so no reversal.
            for item in &mut work {
                item.co.y = 1.0 - item.co.y;
            }
            (d, c)
        } else {
            (c, d)
        };
        let span = hi - lo;
        for item in &mut work {
            item.co.y = lo + item.co.y * span;
        }
    }

    let count = work.len();
    for i in 0..count {
        let prev = (i > 0).then(|| work[i - 1].co);
        let next = (i + 1 < count).then(|| work[i + 1].co);
        let (left, right) = bezier_handles(work[i].co, work[i].handle, prev, next);
        work[i].left = left;
        work[i].right = right;
    }

    if count > 2 {
        refine_endpoints(&mut work);
    }

    if !extrapolate {
        let (lo, hi) = match range_x {
            Some((a, b)) => (a.min(b), a.max(b)),
            None => (0.0, 1.0),
        };
        let first = &mut work[0];
        first.left = Vec2::new(lo, first.co.y);
        let last = &mut work[count - 1];
        last.right = Vec2::new(hi, last.co.y);
    }

    Ok(work
        .into_iter()
        .map(|item| Keyframe::new(item.co, item.left, item.right))
        .collect())
}

/// Computes the left/right handles for one point from its neighbors.
///
/// A missing neighbor (first/last point) is synthesized by reflecting
/// the existing neighbor through the point, so both neighbor vectors
/// are always usable.
fn bezier_handles(
    p2: Vec2,
    handle: HandleType,
    prev: Option<Vec2>,
    next: Option<Vec2>,
) -> (Vec2, Vec2) {
    let (p1, p3) = match (prev, next) {
        (Some(p1), Some(p3)) => (p1, p3),
        (None, Some(p3)) => (p2 * 2.0 - p3, p3),
        (Some(p1), None) => (p1, p2 * 2.0 - p1),
        (None, None) => (p2, p2),
    };

    let dvec_a = p2 - p1;
    let dvec_b = p3 - p2;
    let mut len_a = dvec_a.length();
    let mut len_b = dvec_b.length();
    if len_a == 0.0 {
        len_a = 1.0;
    }
    if len_b == 0.0 {
        len_b = 1.0;
    }

    match handle {
        HandleType::Vector => (
            p2 - dvec_a * (1.0 / 3.0),
            p2 + dvec_b * (1.0 / 3.0),
        ),
        HandleType::Auto | HandleType::AutoClamped => {
            let tvec = Vec2::new(
                dvec_b.x / len_b + dvec_a.x / len_a,
                dvec_b.y / len_b + dvec_a.y / len_a,
            );
            let length = tvec.length() * AUTO_TANGENT_SCALE;
            if length == 0.0 {
                // Neighbor directions cancel exactly; collapse the
                // handles onto the point.
                return (p2, p2);
            }

            let clamped =
                handle == HandleType::AutoClamped && prev.is_some() && next.is_some();

            let ln = -(len_a / length);
            let mut left = p2 + tvec * ln;
            if clamped {
                let ydiff1 = p1.y - p2.y;
                let ydiff2 = p3.y - p2.y;
                if (ydiff1 <= 0.0 && ydiff2 <= 0.0) || (ydiff1 >= 0.0 && ydiff2 >= 0.0) {
                    // Local flat: pin the handle to the point's y.
                    left.y = p2.y;
                } else if ydiff1 <= 0.0 {
                    if p1.y > left.y {
                        left.y = p1.y;
                    }
                } else if p1.y < left.y {
                    left.y = p1.y;
                }
            }

            let ln = len_b / length;
            let mut right = p2 + tvec * ln;
            if clamped {
                let ydiff1 = p1.y - p2.y;
                let ydiff2 = p3.y - p2.y;
                if (ydiff1 <= 0.0 && ydiff2 <= 0.0) || (ydiff1 >= 0.0 && ydiff2 >= 0.0) {
                    right.y = p2.y;
                } else if ydiff1 <= 0.0 {
                    if p3.y < right.y {
                        right.y = p3.y;
                    }
                } else if p3.y > right.y {
                    right.y = p3.y;
                }
            }

            (left, right)
        }
    }
}

/// Recomputes the endpoints' outward handles from their interior
/// neighbor's already-computed handle, mirrored about the endpoint and
/// rescaled to the endpoint's own unrefined handle length. Only applies
/// to `Auto` endpoints; improves curvature continuity over the naive
/// synthetic-neighbor tangent.
fn refine_endpoints(work: &mut [Work]) {
    let count = work.len();

    if work[0].handle == HandleType::Auto {
        let pt = work[0].co;
        let hlen = (work[0].right - pt).length();
        let mut hvec = work[1].left;
        if hvec.x < pt.x {
            hvec.x = pt.x;
        }
        hvec = hvec - pt;
        let nlen = hvec.length();
        if nlen > REFINE_EPSILON {
            hvec = hvec * (hlen / nlen);
            work[0].right = pt + hvec;
            work[0].left = pt - hvec;
        }
    }

    if work[count - 1].handle == HandleType::Auto {
        let pt = work[count - 1].co;
        let hlen = (work[count - 1].left - pt).length();
        let mut hvec = work[count - 2].right;
        if hvec.x > pt.x {
            hvec.x = pt.x;
        }
        hvec = hvec - pt;
        let nlen = hvec.length();
        if nlen > REFINE_EPSILON {
            hvec = hvec * (hlen / nlen);
            work[count - 1].left = pt + hvec;
            work[count - 1].right = pt - hvec;
        }
    }
}
