//! Curve-curve intersection by recursive subdivision.
//!
//! The search runs in three phases:
//!
//! 1. Both curves are subdivided while the bounding boxes of their control
//!    polygons overlap. Once both pieces are flat, their chords are tested
//!    and touching pairs are recorded as candidates together with their
//!    parameter ranges.
//! 2. Candidates with adjacent parameter ranges are merged into clusters.
//!    A transversal crossing yields a small cluster; a tangential touch
//!    yields a longer run of candidates that all lie within precision.
//! 3. Each cluster is refined on the true curves. Sign changes of the signed
//!    distance from the first to the second curve are bisected; without a
//!    sign change the closest approach is located and accepted only if it
//!    lies within precision.
//!
//! Identical curves, and curves that stay within precision of each other
//! everywhere, yield no points. Overlapping curves yield the end points of
//! the overlap.

use tracing::{debug, trace, warn};

use crate::math::distance_2d;
use crate::math::intersect_2d;
use crate::math::precision::{self, FuzzyEq};

use super::{BezierCurve, Point};

/// Number of samples used when projecting onto a complete curve.
pub(crate) const FULL_RANGE_SAMPLES: usize = 64;

/// Number of samples used when projecting onto a cluster's parameter range.
const CLUSTER_SAMPLES: usize = 16;

/// Number of probes along the first curve while refining a cluster.
const REFINE_SAMPLES: usize = 32;

/// Samples per segment when testing whether two chains coincide.
const COVER_SAMPLES: u32 = 8;

const BISECTION_ITERATIONS: usize = 64;
const GOLDEN_ITERATIONS: usize = 80;

/// Tuning knobs for the subdivision search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionParams {
    /// Maximum number of subdivision levels.
    pub max_depth: u32,
    /// Flatness tolerance, as a fraction of the coordinate magnitude of the
    /// two curves.
    pub flatness_fraction: f64,
    /// Maximum number of candidate pairs collected before the search stops.
    pub max_candidates: usize,
}

impl Default for IntersectionParams {
    fn default() -> Self {
        Self {
            max_depth: 32,
            flatness_fraction: 1e-9,
            max_candidates: 4096,
        }
    }
}

/// Intersection points of two Bézier curves.
#[must_use]
pub fn bezier_intersections(
    a: &BezierCurve,
    b: &BezierCurve,
    params: &IntersectionParams,
) -> Vec<Point> {
    if a.fuzzy_eq(b) || a.fuzzy_eq(&b.reversed()) {
        return Vec::new();
    }

    let magnitude = a.magnitude().max(b.magnitude());
    let tolerance = precision::tolerance_for(magnitude);

    if coincident(std::slice::from_ref(a), std::slice::from_ref(b), tolerance) {
        debug!("curves coincide within tolerance");
        return Vec::new();
    }

    let touching = touching_end_points(a, b, tolerance);
    if overlaps(a, b, &touching, tolerance) {
        debug!(
            count = touching.len(),
            "curves overlap, reporting the end points of the overlap"
        );
        return touching;
    }

    if let (Some(la), Some(lb)) = (a.to_line(), b.to_line()) {
        // Parallel segments can still touch at an end point.
        return match la.intersection(&lb) {
            Some(p) => vec![p],
            None => touching,
        };
    }

    let mut search = Search {
        params,
        tolerance,
        flatness: params.flatness_fraction * magnitude.max(1.0),
        leaves: Vec::new(),
        truncated: false,
    };
    search.subdivide(a, (0.0, 1.0), b, (0.0, 1.0), 0);
    if search.truncated {
        warn!(
            max_candidates = params.max_candidates,
            "intersection candidate cap reached, result may be incomplete"
        );
    }

    let points = cluster(&search.leaves)
        .iter()
        .flat_map(|c| refine(a, b, c, tolerance))
        .collect();
    dedup_points(points)
}

/// Intersection points of two piecewise curves given as Bézier segments.
///
/// Fuzzy-equal segment lists (in either direction) yield no points.
#[must_use]
pub fn intersect_segments(
    a: &[BezierCurve],
    b: &[BezierCurve],
    params: &IntersectionParams,
) -> Vec<Point> {
    if same_segments(a, b) {
        return Vec::new();
    }
    let magnitude = a
        .iter()
        .chain(b)
        .map(BezierCurve::magnitude)
        .fold(0.0, f64::max);
    if coincident(a, b, precision::tolerance_for(magnitude)) {
        debug!("outlines coincide within tolerance");
        return Vec::new();
    }
    let mut points = Vec::new();
    for sa in a {
        for sb in b {
            points.extend(bezier_intersections(sa, sb, params));
        }
    }
    dedup_points(points)
}

fn same_segments(a: &[BezierCurve], b: &[BezierCurve]) -> bool {
    if a.len() != b.len() || a.is_empty() {
        return false;
    }
    a.fuzzy_eq(b)
        || a.iter()
            .zip(b.iter().rev())
            .all(|(sa, sb)| sa.fuzzy_eq(&sb.reversed()))
}

/// Returns `true` if each chain lies within `tolerance` of the other
/// everywhere.
fn coincident(a: &[BezierCurve], b: &[BezierCurve], tolerance: f64) -> bool {
    !a.is_empty() && !b.is_empty() && covered_by(a, b, tolerance) && covered_by(b, a, tolerance)
}

/// Returns `true` if every sample of `a` lies on some segment of `b`.
fn covered_by(a: &[BezierCurve], b: &[BezierCurve], tolerance: f64) -> bool {
    a.iter().all(|sa| {
        (0..=COVER_SAMPLES).all(|i| {
            let p = sa.sample(f64::from(i) / f64::from(COVER_SAMPLES));
            b.iter().any(|sb| on_curve(sb, &p, tolerance))
        })
    })
}

/// Removes points that are fuzzy-equal to an earlier one.
#[must_use]
pub fn dedup_points(points: Vec<Point>) -> Vec<Point> {
    let mut unique: Vec<Point> = Vec::with_capacity(points.len());
    for p in points {
        if !unique.iter().any(|q| q.fuzzy_eq(&p)) {
            unique.push(p);
        }
    }
    unique
}

/// Closest point of a curve to some query point.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Projection {
    pub t: f64,
    pub point: Point,
    pub distance: f64,
}

/// Projects `p` onto `curve` restricted to `[lo, hi]`.
///
/// The range is sampled to find the basin of the global minimum, which is
/// then narrowed by golden-section search.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn project(
    curve: &BezierCurve,
    p: &Point,
    lo: f64,
    hi: f64,
    samples: usize,
) -> Projection {
    let at = |t: f64| {
        let point = curve.sample(t);
        Projection {
            t,
            point,
            distance: point.distance(p),
        }
    };

    let step = (hi - lo) / samples as f64;
    let mut best = at(lo);
    for i in 1..=samples {
        let candidate = at(lo + step * i as f64);
        if candidate.distance < best.distance {
            best = candidate;
        }
    }

    let t = golden_section_min(
        (best.t - step).max(lo),
        (best.t + step).min(hi),
        |t| curve.sample(t).distance(p),
    );
    let refined = at(t);
    if refined.distance < best.distance {
        refined
    } else {
        best
    }
}

/// Minimizes a unimodal `f` over `[lo, hi]`.
fn golden_section_min(lo: f64, hi: f64, f: impl Fn(f64) -> f64) -> f64 {
    let inv_phi = (5f64.sqrt() - 1.0) / 2.0;
    let (mut a, mut b) = (lo, hi);
    let mut c = b - (b - a) * inv_phi;
    let mut d = a + (b - a) * inv_phi;
    let (mut fc, mut fd) = (f(c), f(d));
    for _ in 0..GOLDEN_ITERATIONS {
        if b - a <= f64::EPSILON {
            break;
        }
        if fc < fd {
            b = d;
            d = c;
            fd = fc;
            c = b - (b - a) * inv_phi;
            fc = f(c);
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + (b - a) * inv_phi;
            fd = f(d);
        }
    }
    (a + b) / 2.0
}

fn on_curve(curve: &BezierCurve, p: &Point, tolerance: f64) -> bool {
    project(curve, p, 0.0, 1.0, FULL_RANGE_SAMPLES).distance <= tolerance
}

/// End points of either curve that lie on the other one.
fn touching_end_points(a: &BezierCurve, b: &BezierCurve, tolerance: f64) -> Vec<Point> {
    let points = [(a.start(), b), (a.end(), b), (b.start(), a), (b.end(), a)]
        .into_iter()
        .filter(|(p, other)| on_curve(other, p, tolerance))
        .map(|(p, _)| p)
        .collect();
    dedup_points(points)
}

/// Returns `true` if the span between the touching end points lies on both
/// curves.
fn overlaps(a: &BezierCurve, b: &BezierCurve, touching: &[Point], tolerance: f64) -> bool {
    if touching.len() < 2 {
        return false;
    }
    let params: Vec<f64> = touching
        .iter()
        .map(|p| project(a, p, 0.0, 1.0, FULL_RANGE_SAMPLES).t)
        .collect();
    let lo = params.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = params.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if hi - lo <= precision::PRECISION_FRACTION {
        return false;
    }
    (1..4).all(|k| {
        let s = lo + (hi - lo) * f64::from(k) / 4.0;
        on_curve(b, &a.sample(s), tolerance)
    })
}

/// A pair of flat curve pieces whose chords touch.
#[derive(Debug, Clone, Copy)]
struct Leaf {
    s: (f64, f64),
    t: (f64, f64),
}

impl Leaf {
    fn touches(&self, other: &Leaf) -> bool {
        ranges_touch(self.s, other.s) && ranges_touch(self.t, other.t)
    }

    fn merged(&self, other: &Leaf) -> Leaf {
        Leaf {
            s: (self.s.0.min(other.s.0), self.s.1.max(other.s.1)),
            t: (self.t.0.min(other.t.0), self.t.1.max(other.t.1)),
        }
    }
}

fn ranges_touch(a: (f64, f64), b: (f64, f64)) -> bool {
    a.0 <= b.1 && b.0 <= a.1
}

struct Search<'a> {
    params: &'a IntersectionParams,
    tolerance: f64,
    flatness: f64,
    leaves: Vec<Leaf>,
    truncated: bool,
}

impl Search<'_> {
    fn subdivide(
        &mut self,
        a: &BezierCurve,
        ra: (f64, f64),
        b: &BezierCurve,
        rb: (f64, f64),
        depth: u32,
    ) {
        if self.leaves.len() >= self.params.max_candidates {
            self.truncated = true;
            return;
        }
        let box_a = a.control_bounds().expanded_uniform(self.tolerance);
        if !box_a.intersects(&b.control_bounds()) {
            return;
        }

        let flat_a = a.is_flat(self.flatness);
        let flat_b = b.is_flat(self.flatness);
        if (flat_a && flat_b) || depth >= self.params.max_depth {
            if !(flat_a && flat_b) {
                trace!(depth, "subdivision depth cutoff reached");
            }
            if chords_touch(a, b, self.tolerance) {
                self.leaves.push(Leaf { s: ra, t: rb });
            }
            return;
        }

        let depth = depth + 1;
        if flat_a {
            let (b0, b1) = b.split_unchecked(0.5);
            let mid = (rb.0 + rb.1) / 2.0;
            self.subdivide(a, ra, &b0, (rb.0, mid), depth);
            self.subdivide(a, ra, &b1, (mid, rb.1), depth);
        } else if flat_b {
            let (a0, a1) = a.split_unchecked(0.5);
            let mid = (ra.0 + ra.1) / 2.0;
            self.subdivide(&a0, (ra.0, mid), b, rb, depth);
            self.subdivide(&a1, (mid, ra.1), b, rb, depth);
        } else {
            let (a0, a1) = a.split_unchecked(0.5);
            let (b0, b1) = b.split_unchecked(0.5);
            let mid_a = (ra.0 + ra.1) / 2.0;
            let mid_b = (rb.0 + rb.1) / 2.0;
            self.subdivide(&a0, (ra.0, mid_a), &b0, (rb.0, mid_b), depth);
            self.subdivide(&a0, (ra.0, mid_a), &b1, (mid_b, rb.1), depth);
            self.subdivide(&a1, (mid_a, ra.1), &b0, (rb.0, mid_b), depth);
            self.subdivide(&a1, (mid_a, ra.1), &b1, (mid_b, rb.1), depth);
        }
    }
}

fn chords_touch(a: &BezierCurve, b: &BezierCurve, tolerance: f64) -> bool {
    let (a0, a1, b0, b1) = (a.start(), a.end(), b.start(), b.end());
    intersect_2d::segment_segment_intersect_2d(&a0, &a1, &b0, &b1).is_some()
        || distance_2d::segment_to_segment_dist(&a0, &a1, &b0, &b1) <= tolerance
}

/// Merges leaves whose parameter ranges touch on both curves.
fn cluster(leaves: &[Leaf]) -> Vec<Leaf> {
    let mut clusters: Vec<Leaf> = Vec::new();
    for leaf in leaves {
        let mut merged = *leaf;
        while let Some(i) = clusters.iter().position(|c| c.touches(&merged)) {
            merged = merged.merged(&clusters.swap_remove(i));
        }
        clusters.push(merged);
    }
    clusters
}

/// Point of the first curve at parameter `s`, with its signed distance to
/// the second curve.
#[derive(Debug, Clone, Copy)]
struct Probe {
    s: f64,
    on_a: Point,
    on_b: Point,
    distance: f64,
    signed: f64,
}

impl Probe {
    fn midpoint(&self) -> Point {
        self.on_a.lerp(&self.on_b, 0.5)
    }
}

#[allow(clippy::cast_precision_loss)]
fn refine(a: &BezierCurve, b: &BezierCurve, leaf: &Leaf, tolerance: f64) -> Vec<Point> {
    let (s_lo, s_hi) = widened(leaf.s);
    let (t_lo, t_hi) = widened(leaf.t);

    let probe = |s: f64| {
        let on_a = a.sample(s);
        let projection = project(b, &on_a, t_lo, t_hi, CLUSTER_SAMPLES);
        let side = b.derivative_at(projection.t).cross(&(on_a - projection.point));
        Probe {
            s,
            on_a,
            on_b: projection.point,
            distance: projection.distance,
            signed: if side < 0.0 {
                -projection.distance
            } else {
                projection.distance
            },
        }
    };

    let step = (s_hi - s_lo) / REFINE_SAMPLES as f64;
    let probes: Vec<Probe> = (0..=REFINE_SAMPLES)
        .map(|i| probe(s_lo + step * i as f64))
        .collect();

    let mut points = Vec::new();
    for pair in probes.windows(2) {
        let (p0, p1) = (pair[0], pair[1]);
        if p0.signed == 0.0 {
            points.push(p0.midpoint());
        } else if p0.signed * p1.signed < 0.0 {
            let root = bisect(p0, p1, &probe);
            if root.distance <= tolerance {
                points.push(root.midpoint());
            }
        }
    }
    if let Some(last) = probes.last() {
        if last.signed == 0.0 {
            points.push(last.midpoint());
        }
    }
    if !points.is_empty() {
        return points;
    }

    // No crossing: look for a touch at the closest approach.
    let Some(best) = probes
        .iter()
        .min_by(|p, q| p.distance.total_cmp(&q.distance))
    else {
        return points;
    };
    let s = golden_section_min(
        (best.s - step).max(s_lo),
        (best.s + step).min(s_hi),
        |s| probe(s).distance,
    );
    let touch = probe(s);
    let closest = if touch.distance < best.distance {
        touch
    } else {
        *best
    };
    if closest.distance <= tolerance {
        points.push(closest.midpoint());
    }
    points
}

fn bisect(mut lo: Probe, mut hi: Probe, probe: &impl Fn(f64) -> Probe) -> Probe {
    for _ in 0..BISECTION_ITERATIONS {
        let mid = probe((lo.s + hi.s) / 2.0);
        if mid.signed == 0.0 {
            return mid;
        }
        if (mid.signed < 0.0) == (lo.signed < 0.0) {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    if lo.distance <= hi.distance {
        lo
    } else {
        hi
    }
}

/// Widens a parameter range by its own width on both sides, within `[0, 1]`.
fn widened(range: (f64, f64)) -> (f64, f64) {
    let width = range.1 - range.0;
    ((range.0 - width).max(0.0), (range.1 + width).min(1.0))
}
