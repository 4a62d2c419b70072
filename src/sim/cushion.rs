//! Cushion segments and table rail geometry
//!
//! A cushion is a straight segment between two fixed endpoints. The table
//! boundary is an ordered ring of cushions: six straight rails, each flanked
//! by two angled pocket-mouth segments.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::vector::{distance, dot, unit};
use crate::consts::CUSHION_EPSILON;

/// A straight rail segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cushion {
    pub p1: Vec2,
    pub p2: Vec2,
    /// |p2 - p1|
    length: f32,
    /// Left perpendicular of (p2 - p1), normalized
    normal: Vec2,
}

impl Cushion {
    pub fn new(p1: Vec2, p2: Vec2) -> Self {
        Self {
            p1,
            p2,
            length: distance(p1, p2),
            normal: unit((p2 - p1).perp()),
        }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.length
    }

    #[inline]
    pub fn normal(&self) -> Vec2 {
        self.normal
    }

    /// Foot of the perpendicular from `pos` onto the infinite line p1-p2
    pub fn closest_point(&self, pos: Vec2) -> Vec2 {
        let span = self.p2 - self.p1;
        let len_sq = self.length * self.length;
        if len_sq == 0.0 {
            return self.p1;
        }
        let t = dot(pos - self.p1, span) / len_sq;
        self.p1 + span * t
    }

    /// Circle-vs-segment test with the default on-segment slack
    ///
    /// The slack is `consts::CUSHION_EPSILON`. The step driver passes
    /// `Settings::cushion_epsilon` to [`Cushion::collision_eps`] instead, so
    /// hosts that override the setting should call that to agree with it.
    pub fn collision(&self, pos: Vec2, radius: f32) -> bool {
        self.collision_eps(pos, radius, CUSHION_EPSILON)
    }

    /// Circle-vs-segment test
    ///
    /// Endpoints act as rounded caps. Otherwise the perpendicular foot must
    /// lie on the segment (within `eps`) and be no further than `radius`.
    pub fn collision_eps(&self, pos: Vec2, radius: f32, eps: f32) -> bool {
        if distance(pos, self.p1) <= radius || distance(pos, self.p2) <= radius {
            return true;
        }

        let closest = self.closest_point(pos);
        if distance(closest, self.p1) + distance(closest, self.p2) > self.length + eps {
            return false;
        }

        distance(pos, closest) <= radius
    }
}

/// Ordered ring of cushions bounding the table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableGeometry {
    pub cushions: Vec<Cushion>,
    /// Playing surface bounds (component-wise min and max corners)
    pub min: Vec2,
    pub max: Vec2,
}

impl TableGeometry {
    /// Build from endpoint pairs, in order
    ///
    /// The playing surface is taken to be the bounding box of the endpoints.
    pub fn from_segments(segments: &[(Vec2, Vec2)]) -> Self {
        let mut points = segments.iter().flat_map(|&(p1, p2)| [p1, p2]);
        let (min, max) = match points.next() {
            Some(first) => points.fold((first, first), |(min, max), p| (min.min(p), max.max(p))),
            None => (Vec2::ZERO, Vec2::ZERO),
        };
        Self {
            cushions: segments.iter().map(|&(p1, p2)| Cushion::new(p1, p2)).collect(),
            min,
            max,
        }
    }

    /// Standard six-pocket table centred on the origin, long axis along y
    ///
    /// `pocket_mouth` is the opening between cushion noses at each pocket and
    /// `mouth_depth` how far the angled jaw segments reach behind the rail line.
    /// Rails run clockwise (y down), so every normal faces the playing surface.
    pub fn standard(width: f32, height: f32, pocket_mouth: f32, mouth_depth: f32) -> Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        // Corner jaws sit on the diagonal, side jaws straddle the middle
        let corner = pocket_mouth / std::f32::consts::SQRT_2;
        let side = pocket_mouth / 2.0;

        // (start, end, outward direction)
        let rails = [
            (Vec2::new(-hw + corner, -hh), Vec2::new(hw - corner, -hh), Vec2::NEG_Y),
            (Vec2::new(hw, -hh + corner), Vec2::new(hw, -side), Vec2::X),
            (Vec2::new(hw, side), Vec2::new(hw, hh - corner), Vec2::X),
            (Vec2::new(hw - corner, hh), Vec2::new(-hw + corner, hh), Vec2::Y),
            (Vec2::new(-hw, hh - corner), Vec2::new(-hw, side), Vec2::NEG_X),
            (Vec2::new(-hw, -side), Vec2::new(-hw, -hh + corner), Vec2::NEG_X),
        ];

        let mut cushions = Vec::with_capacity(rails.len() * 3);
        for (start, end, outward) in rails {
            let along = unit(end - start);
            let jaw = outward * mouth_depth;
            cushions.push(Cushion::new(start - along * mouth_depth + jaw, start));
            cushions.push(Cushion::new(start, end));
            cushions.push(Cushion::new(end, end + along * mouth_depth + jaw));
        }

        log::debug!(
            "standard table {}x{} with {} cushions",
            width,
            height,
            cushions.len()
        );

        Self {
            cushions,
            min: Vec2::new(-hw, -hh),
            max: Vec2::new(hw, hh),
        }
    }

    pub fn len(&self) -> usize {
        self.cushions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cushions.is_empty()
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Whether a point lies on the playing surface
    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizontal() -> Cushion {
        Cushion::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0))
    }

    #[test]
    fn test_precomputed_length_and_normal() {
        let c = horizontal();
        assert_eq!(c.length(), 100.0);
        assert_eq!(c.normal(), Vec2::new(0.0, 1.0));

        let c = Cushion::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, 50.0));
        assert_eq!(c.length(), 50.0);
        assert_eq!(c.normal(), Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_collision_on_perpendicular_foot() {
        let c = horizontal();
        // Centred exactly on the segment
        assert!(c.collision(Vec2::new(50.0, 0.0), 20.0));
        // Touching from above and below
        assert!(c.collision(Vec2::new(50.0, 20.0), 20.0));
        assert!(c.collision(Vec2::new(50.0, -19.0), 20.0));
        // Clear of the rail
        assert!(!c.collision(Vec2::new(50.0, 21.0), 20.0));
    }

    #[test]
    fn test_collision_rounded_caps() {
        let c = horizontal();
        // Foot is off the segment but the endpoint is inside the ball
        assert!(c.collision(Vec2::new(-15.0, 5.0), 20.0));
        assert!(c.collision(Vec2::new(110.0, 0.0), 20.0));
    }

    #[test]
    fn test_no_collision_beyond_endpoints() {
        let c = horizontal();
        // Foot beyond either end by more than the radius
        assert!(!c.collision(Vec2::new(-25.0, 0.0), 20.0));
        assert!(!c.collision(Vec2::new(125.0, 0.0), 20.0));
        assert!(!c.collision(Vec2::new(140.0, 5.0), 20.0));
    }

    #[test]
    fn test_collision_slack_from_caller() {
        let c = horizontal();
        // Foot lies 5 before p1 and the cap is just out of reach; only a wider slack hits
        let pos = Vec2::new(-5.0, 19.9);
        assert!(!c.collision(pos, 20.0));
        assert_eq!(c.collision(pos, 20.0), c.collision_eps(pos, 20.0, CUSHION_EPSILON));
        assert!(c.collision_eps(pos, 20.0, 20.0));
    }

    #[test]
    fn test_degenerate_segment_is_a_point() {
        let c = Cushion::new(Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0));
        assert_eq!(c.normal(), Vec2::ZERO);
        assert!(c.collision(Vec2::new(10.0, 5.0), 6.0));
        assert!(!c.collision(Vec2::new(20.0, 5.0), 6.0));
    }

    #[test]
    fn test_standard_table_ring() {
        let table = TableGeometry::standard(560.0, 1120.0, 90.0, 20.0);
        assert_eq!(table.len(), 18);

        // Consecutive segments of a rail group share endpoints
        for group in table.cushions.chunks(3) {
            assert_eq!(group[0].p2, group[1].p1);
            assert_eq!(group[1].p2, group[2].p1);
        }

        // Straight rail normals point at the table centre
        for rail in table.cushions.iter().skip(1).step_by(3) {
            let mid = (rail.p1 + rail.p2) / 2.0;
            assert!(dot(rail.normal(), -mid) > 0.0);
        }

        assert_eq!(table.width(), 560.0);
        assert_eq!(table.height(), 1120.0);
        assert!(table.contains(Vec2::ZERO));
        assert!(table.contains(Vec2::new(280.0, -560.0)));
        assert!(!table.contains(Vec2::new(0.0, 600.0)));
    }

    #[test]
    fn test_from_segments_keeps_order() {
        let table = TableGeometry::from_segments(&[
            (Vec2::ZERO, Vec2::new(10.0, 0.0)),
            (Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cushions[1].p1, Vec2::new(10.0, 0.0));
        assert!(!table.is_empty());
    }

    #[test]
    fn test_from_segments_bounds() {
        let table = TableGeometry::from_segments(&[
            (Vec2::new(0.0, 100.0), Vec2::new(0.0, 0.0)),
            (Vec2::new(0.0, 0.0), Vec2::new(200.0, 0.0)),
            (Vec2::new(200.0, 0.0), Vec2::new(200.0, 100.0)),
            (Vec2::new(200.0, 100.0), Vec2::new(0.0, 100.0)),
        ]);
        assert_eq!(table.min, Vec2::ZERO);
        assert_eq!(table.max, Vec2::new(200.0, 100.0));
        assert!(table.contains(Vec2::new(150.0, 50.0)));
        assert!(!table.contains(Vec2::new(250.0, 50.0)));
        assert!(!table.contains(Vec2::new(50.0, -1.0)));

        let empty = TableGeometry::from_segments(&[]);
        assert!(empty.is_empty());
        assert_eq!(empty.width(), 0.0);
    }
}
