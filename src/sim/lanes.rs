//! Lane geometry
//!
//! Three fixed lanes on a road centred in the play field. Computed once from the
//! field width and never changed afterwards.

use serde::{Deserialize, Serialize};

use crate::consts::{LANE_COUNT, ROAD_WIDTH_RATIO};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneLayout {
    /// Width of a single lane
    pub lane_width: f32,
    /// Left edge of the road
    pub road_left: f32,
    /// Horizontal centre of each lane, left to right
    pub centers: [f32; LANE_COUNT],
}

impl LaneLayout {
    pub fn new(field_width: f32) -> Self {
        let road_width = field_width * ROAD_WIDTH_RATIO;
        let lane_width = road_width / LANE_COUNT as f32;
        let road_left = (field_width - road_width) / 2.0;

        let mut centers = [0.0; LANE_COUNT];
        for (i, center) in centers.iter_mut().enumerate() {
            *center = road_left + lane_width * (i as f32 + 0.5);
        }

        Self {
            lane_width,
            road_left,
            centers,
        }
    }

    /// Centre x of a lane; out-of-range indices clamp to the outer lanes
    #[inline]
    pub fn center_x(&self, lane: usize) -> f32 {
        self.centers[lane.min(LANE_COUNT - 1)]
    }

    pub fn road_width(&self) -> f32 {
        self.lane_width * LANE_COUNT as f32
    }

    /// Lane whose span contains `x`, if any
    pub fn lane_at(&self, x: f32) -> Option<usize> {
        let rel = x - self.road_left;
        if rel < 0.0 || rel >= self.road_width() {
            return None;
        }
        Some(((rel / self.lane_width) as usize).min(LANE_COUNT - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lanes_are_centred() {
        let lanes = LaneLayout::new(800.0);
        assert!((lanes.lane_width - 160.0).abs() < 1e-4);
        assert!((lanes.road_left - 160.0).abs() < 1e-4);
        assert!((lanes.centers[0] - 240.0).abs() < 1e-4);
        assert!((lanes.centers[1] - 400.0).abs() < 1e-4);
        assert!((lanes.centers[2] - 560.0).abs() < 1e-4);
    }

    #[test]
    fn test_center_lane_is_field_center() {
        for width in [320.0, 640.0, 1024.0, 1920.0] {
            let lanes = LaneLayout::new(width);
            assert!((lanes.center_x(1) - width / 2.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_center_x_clamps() {
        let lanes = LaneLayout::new(800.0);
        assert_eq!(lanes.center_x(7), lanes.centers[2]);
    }

    #[test]
    fn test_lane_at() {
        let lanes = LaneLayout::new(800.0);
        assert_eq!(lanes.lane_at(100.0), None);
        assert_eq!(lanes.lane_at(200.0), Some(0));
        assert_eq!(lanes.lane_at(400.0), Some(1));
        assert_eq!(lanes.lane_at(600.0), Some(2));
        assert_eq!(lanes.lane_at(700.0), None);
        assert_eq!(lanes.lane_at(720.0), None);
    }
}
