//! The visibility oracle consulted by roadmap search and path following.
//!
//! The navigation layer treats line-of-sight as a black box behind the
//! [`SpatialQuery`] trait.  Two small implementations ship here: [`OpenSpace`]
//! for obstacle-free scenes and [`SegmentObstacles`], a brute-force scan over
//! line-segment obstacles that is adequate for small scenes and tests.
//! Scenes with many obstacles should plug in a spatially indexed oracle.

use crate::Vec2;

/// Line-of-sight oracle.
///
/// # Thread safety
///
/// Queries run concurrently from every worker that updates agents, so
/// implementations must be `Send + Sync` and must not mutate through `&self`
/// without their own synchronisation.
pub trait SpatialQuery: Send + Sync {
    /// `true` if a disk of `radius` can sweep from `a` to `b` without touching
    /// any obstacle.
    fn is_visible(&self, a: Vec2, b: Vec2, radius: f32) -> bool;

    /// Weaker test used to connect agents to the roadmap: `true` if the link
    /// from `a` to `b` can be walked at all.  Defaults to
    /// [`is_visible`](Self::is_visible).
    fn is_traversible(&self, a: Vec2, b: Vec2, radius: f32) -> bool {
        self.is_visible(a, b, radius)
    }
}

impl<Q: SpatialQuery + ?Sized> SpatialQuery for std::sync::Arc<Q> {
    fn is_visible(&self, a: Vec2, b: Vec2, radius: f32) -> bool {
        (**self).is_visible(a, b, radius)
    }

    fn is_traversible(&self, a: Vec2, b: Vec2, radius: f32) -> bool {
        (**self).is_traversible(a, b, radius)
    }
}

// ── OpenSpace ─────────────────────────────────────────────────────────────────

/// Oracle for a scene without obstacles: everything is visible.
#[derive(Copy, Clone, Debug, Default)]
pub struct OpenSpace;

impl SpatialQuery for OpenSpace {
    fn is_visible(&self, _a: Vec2, _b: Vec2, _radius: f32) -> bool {
        true
    }
}

// ── SegmentObstacles ──────────────────────────────────────────────────────────

/// A closed line segment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment {
    pub p0: Vec2,
    pub p1: Vec2,
}

impl Segment {
    pub fn new(p0: Vec2, p1: Vec2) -> Self {
        Self { p0, p1 }
    }

    /// Distance from `q` to the closest point of the segment.
    pub fn distance_to_point(&self, q: Vec2) -> f32 {
        let d = self.p1 - self.p0;
        let len_sq = d.length_sq();
        if len_sq == 0.0 {
            return q.distance(self.p0);
        }
        let t = ((q - self.p0).dot(d) / len_sq).clamp(0.0, 1.0);
        q.distance(self.p0 + d * t)
    }

    /// `true` if the two closed segments share at least one point.
    pub fn intersects(&self, other: &Segment) -> bool {
        let o1 = orient(self.p0, self.p1, other.p0);
        let o2 = orient(self.p0, self.p1, other.p1);
        let o3 = orient(other.p0, other.p1, self.p0);
        let o4 = orient(other.p0, other.p1, self.p1);

        if o1 * o2 < 0.0 && o3 * o4 < 0.0 {
            return true;
        }
        (o1 == 0.0 && on_segment(self.p0, self.p1, other.p0))
            || (o2 == 0.0 && on_segment(self.p0, self.p1, other.p1))
            || (o3 == 0.0 && on_segment(other.p0, other.p1, self.p0))
            || (o4 == 0.0 && on_segment(other.p0, other.p1, self.p1))
    }

    /// Minimum distance between the two segments (0 when they intersect).
    pub fn distance_to_segment(&self, other: &Segment) -> f32 {
        if self.intersects(other) {
            return 0.0;
        }
        self.distance_to_point(other.p0)
            .min(self.distance_to_point(other.p1))
            .min(other.distance_to_point(self.p0))
            .min(other.distance_to_point(self.p1))
    }
}

#[inline]
fn orient(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).cross(c - a)
}

/// `c` is known to be collinear with `a..b`; is it inside the bounding box?
#[inline]
fn on_segment(a: Vec2, b: Vec2, c: Vec2) -> bool {
    c.x >= a.x.min(b.x) && c.x <= a.x.max(b.x) && c.y >= a.y.min(b.y) && c.y <= a.y.max(b.y)
}

/// Brute-force oracle over a list of segment obstacles.
///
/// - **Visible**: the capsule swept by a disk of `radius` along `a → b` stays
///   strictly clear of every obstacle.
/// - **Traversible**: the zero-width segment `a → b` crosses no obstacle.
#[derive(Clone, Debug, Default)]
pub struct SegmentObstacles {
    segments: Vec<Segment>,
}

impl SegmentObstacles {
    pub fn new() -> Self {
        Self { segments: Vec::new() }
    }

    pub fn with_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn push(&mut self, p0: Vec2, p1: Vec2) {
        self.segments.push(Segment::new(p0, p1));
    }

    /// Add a closed polygon as its boundary edges.
    pub fn push_polygon(&mut self, vertices: &[Vec2]) {
        for (i, &p) in vertices.iter().enumerate() {
            let q = vertices[(i + 1) % vertices.len()];
            self.push(p, q);
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl SpatialQuery for SegmentObstacles {
    fn is_visible(&self, a: Vec2, b: Vec2, radius: f32) -> bool {
        let sight = Segment::new(a, b);
        self.segments.iter().all(|obs| {
            !sight.intersects(obs) && sight.distance_to_segment(obs) >= radius
        })
    }

    fn is_traversible(&self, a: Vec2, b: Vec2, _radius: f32) -> bool {
        let link = Segment::new(a, b);
        !self.segments.iter().any(|obs| link.intersects(obs))
    }
}
