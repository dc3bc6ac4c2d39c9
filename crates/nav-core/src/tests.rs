//! Unit tests for nav-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, VertexId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(VertexId::INVALID.0, u32::MAX);
        assert!(!VertexId::default().is_valid());
        assert!(VertexId(0).is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(VertexId(7).to_string(), "VertexId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::Vec2;

    #[test]
    fn distance_and_length() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.distance_sq(b), 25.0);
        assert_eq!((b - a).length(), 5.0);
    }

    #[test]
    fn normalized_unit_length() {
        let n = Vec2::new(10.0, 0.0).normalized().unwrap();
        assert_eq!(n, Vec2::new(1.0, 0.0));
        let d = Vec2::new(1.0, 1.0).normalized().unwrap();
        assert!((d.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn normalized_degenerate_is_none() {
        assert!(Vec2::ZERO.normalized().is_none());
        assert!(Vec2::new(1e-7, -1e-7).normalized().is_none());
        assert!(Vec2::new(f32::NAN, 1.0).normalized().is_none());
    }

    #[test]
    fn cross_sign() {
        let x = Vec2::new(1.0, 0.0);
        let y = Vec2::new(0.0, 1.0);
        assert!(x.cross(y) > 0.0);
        assert!(y.cross(x) < 0.0);
    }
}

#[cfg(test)]
mod goal {
    use crate::{CircleGoal, Goal, MovingGoal, PointGoal, Vec2};

    #[test]
    fn point_goal_targets_itself() {
        let g = PointGoal(Vec2::new(2.0, 3.0));
        assert_eq!(g.centroid(), Vec2::new(2.0, 3.0));
        assert_eq!(g.target_point(Vec2::new(9.0, 9.0), 0.5), Vec2::new(2.0, 3.0));
        assert!(!g.moves());
    }

    #[test]
    fn circle_goal_inside_returns_query() {
        let g = CircleGoal::new(Vec2::ZERO, 2.0);
        let q = Vec2::new(0.5, 0.5);
        assert_eq!(g.target_point(q, 0.5), q);
    }

    #[test]
    fn circle_goal_outside_clamps_to_shrunken_disk() {
        let g = CircleGoal::new(Vec2::ZERO, 2.0);
        // Slack = 2.0 - 0.5 = 1.5 along +x.
        let t = g.target_point(Vec2::new(10.0, 0.0), 0.5);
        assert!((t.x - 1.5).abs() < 1e-6);
        assert_eq!(t.y, 0.0);
    }

    #[test]
    fn circle_goal_smaller_than_agent_returns_center() {
        let g = CircleGoal::new(Vec2::new(1.0, 1.0), 0.2);
        assert_eq!(g.target_point(Vec2::new(5.0, 5.0), 0.5), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn moving_goal_relocates() {
        let g = MovingGoal::new(Vec2::ZERO);
        assert!(g.moves());
        g.set_position(Vec2::new(4.0, -1.0));
        assert_eq!(g.centroid(), Vec2::new(4.0, -1.0));
    }
}

#[cfg(test)]
mod query {
    use crate::{OpenSpace, Segment, SegmentObstacles, SpatialQuery, Vec2};

    fn wall() -> SegmentObstacles {
        // Vertical wall x = 0, y ∈ [-1, 1].
        let mut q = SegmentObstacles::new();
        q.push(Vec2::new(0.0, -1.0), Vec2::new(0.0, 1.0));
        q
    }

    #[test]
    fn open_space_sees_everything() {
        assert!(OpenSpace.is_visible(Vec2::ZERO, Vec2::new(100.0, 0.0), 10.0));
        assert!(OpenSpace.is_traversible(Vec2::ZERO, Vec2::new(100.0, 0.0), 10.0));
    }

    #[test]
    fn wall_blocks_crossing_sightline() {
        let q = wall();
        assert!(!q.is_visible(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0), 0.0));
        assert!(!q.is_traversible(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0), 0.0));
    }

    #[test]
    fn clearance_radius_matters_for_visibility_only() {
        let q = wall();
        // Passes 0.2 above the wall's top end.
        let a = Vec2::new(-1.0, 1.2);
        let b = Vec2::new(1.0, 1.2);
        assert!(q.is_visible(a, b, 0.1));
        assert!(!q.is_visible(a, b, 0.5));
        assert!(q.is_traversible(a, b, 0.5));
    }

    #[test]
    fn segment_distance() {
        let s = Segment::new(Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0));
        assert_eq!(s.distance_to_point(Vec2::new(1.0, 3.0)), 3.0);
        assert_eq!(s.distance_to_point(Vec2::new(-3.0, 4.0)), 5.0);
        let t = Segment::new(Vec2::new(1.0, -1.0), Vec2::new(1.0, 1.0));
        assert!(s.intersects(&t));
        assert_eq!(s.distance_to_segment(&t), 0.0);
    }

    #[test]
    fn polygon_boundary() {
        let mut q = SegmentObstacles::new();
        q.push_polygon(&[
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 1.0),
        ]);
        assert_eq!(q.len(), 4);
        assert!(!q.is_visible(Vec2::new(-5.0, 0.0), Vec2::new(5.0, 0.0), 0.0));
        assert!(q.is_visible(Vec2::new(-5.0, 3.0), Vec2::new(5.0, 3.0), 0.5));
    }
}

#[cfg(test)]
mod velocity {
    use crate::{PrefVelocity, Vec2};

    #[test]
    fn single_direction_has_no_area() {
        let mut v = PrefVelocity::default();
        v.set_single(Vec2::new(0.0, 1.0));
        v.set_speed(1.5);
        assert!(!v.has_area());
        assert_eq!(v.preferred_velocity(), Vec2::new(0.0, 1.5));
    }

    #[test]
    fn span_has_area() {
        let mut v = PrefVelocity::default();
        v.set_span(Vec2::new(0.0, 1.0), Vec2::new(1.0, 0.0), Vec2::new(0.6, 0.8));
        assert!(v.has_area());
    }
}

#[cfg(test)]
mod config {
    use crate::{NavConfig, NavError};

    #[test]
    fn default_is_valid() {
        assert!(NavConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_contexts_rejected() {
        let cfg = NavConfig { search_contexts: Some(0), ..NavConfig::default() };
        assert!(matches!(cfg.validate(), Err(NavError::Config(_))));
    }

    #[test]
    fn non_positive_threshold_rejected() {
        let cfg = NavConfig { degenerate_distance: 0.0, ..NavConfig::default() };
        assert!(cfg.validate().is_err());
        let cfg = NavConfig { degenerate_distance: f32::NAN, ..NavConfig::default() };
        assert!(cfg.validate().is_err());
    }
}
