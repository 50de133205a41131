use std::f64::consts::TAU;

use glam::DVec2;
use kartrace_core::RaceConfig;
use serde::Serialize;

use crate::checkpoints::{Checkpoint, Waypoint};

// Below this normalized distance a kart is treated as sitting on the center
// point, where there is no radial direction to push it along
const CENTER_EPSILON: f64 = 1e-9;

/// The elliptical circuit. Built once per race and never mutated.
///
/// Karts race in the direction of increasing ellipse angle. The start line
/// sits at angle 0 and the last checkpoint sits on it, so a lap is completed
/// exactly when a kart crosses the line.
#[derive(Clone, Debug, Serialize)]
pub struct Track {
    pub center: DVec2,
    pub radius_x: f64,
    pub radius_y: f64,
    pub corridor_width: f64,
    pub wall_margin: f64,
    pub checkpoints: Vec<Checkpoint>,
    pub waypoints: Vec<Waypoint>,
    pub start_line: DVec2,
}

impl Track {
    pub fn new(config: &RaceConfig) -> Self {
        let tuning = &config.track;
        let mut track = Track {
            center: DVec2::new(tuning.center_x, tuning.center_y),
            radius_x: tuning.radius_x,
            radius_y: tuning.radius_y,
            corridor_width: tuning.corridor_width,
            wall_margin: tuning.wall_margin,
            checkpoints: Vec::with_capacity(tuning.checkpoint_count),
            waypoints: Vec::with_capacity(tuning.waypoint_count),
            start_line: DVec2::ZERO,
        };
        track.start_line = track.point_at(0.0);

        let checkpoint_count = tuning.checkpoint_count;
        for id in 0..checkpoint_count {
            let angle = TAU * (id + 1) as f64 / checkpoint_count as f64;
            track.checkpoints.push(Checkpoint::new(
                id,
                track.point_at(angle),
                angle,
                config.collision.checkpoint_radius,
            ));
        }
        for id in 0..checkpoint_count {
            let previous = track.checkpoints[(id + checkpoint_count - 1) % checkpoint_count].position;
            track.checkpoints[id].approach_length = previous.distance(track.checkpoints[id].position);
        }

        for i in 0..tuning.waypoint_count {
            let angle = TAU * i as f64 / tuning.waypoint_count as f64;
            let wobble = tuning.waypoint_wobble * (tuning.waypoint_wobble_frequency * angle).sin();
            track.waypoints.push(Waypoint {
                position: track.center
                    + DVec2::new(
                        (track.radius_x + wobble) * angle.cos(),
                        (track.radius_y + wobble) * angle.sin(),
                    ),
                angle,
            });
        }

        track
    }

    pub fn point_at(&self, angle: f64) -> DVec2 {
        self.center + DVec2::new(self.radius_x * angle.cos(), self.radius_y * angle.sin())
    }

    /// Racing direction of the centerline at the given ellipse angle.
    pub fn heading_at(&self, angle: f64) -> f64 {
        f64::atan2(self.radius_y * angle.cos(), -self.radius_x * angle.sin())
    }

    /// Ellipse angle of the ray from the center through `point`.
    pub fn angle_of(&self, point: DVec2) -> f64 {
        let offset = point - self.center;
        f64::atan2(offset.y / self.radius_y, offset.x / self.radius_x)
    }

    pub fn mean_radius(&self) -> f64 {
        (self.radius_x + self.radius_y) / 2.0
    }

    /// Radial distance from the center scaled so the centerline is 1.0.
    pub fn normalized_distance(&self, point: DVec2) -> f64 {
        let offset = point - self.center;
        ((offset.x / self.radius_x).powi(2) + (offset.y / self.radius_y).powi(2)).sqrt()
    }

    /// Inner and outer wall in normalized distance.
    pub fn corridor_limits(&self) -> (f64, f64) {
        let half_width = (self.corridor_width / 2.0 - self.wall_margin) / self.mean_radius();
        (1.0 - half_width, 1.0 + half_width)
    }

    pub fn is_on_track(&self, point: DVec2) -> bool {
        let (inner, outer) = self.corridor_limits();
        let distance = self.normalized_distance(point);
        distance >= inner && distance <= outer
    }

    // approximate: exact on a circle, close enough on a mild ellipse
    pub fn distance_from_centerline(&self, point: DVec2) -> f64 {
        (self.normalized_distance(point) - 1.0).abs() * self.mean_radius()
    }

    /// Moves `point` along the ray from the center until it sits at the
    /// given normalized distance.
    pub fn project_to_normalized_distance(&self, point: DVec2, target: f64) -> DVec2 {
        let distance = self.normalized_distance(point);
        if distance < CENTER_EPSILON {
            return self.center + DVec2::new(self.radius_x * target, 0.0);
        }
        self.center + (point - self.center) * (target / distance)
    }

    pub fn nearest_waypoint(&self, point: DVec2) -> usize {
        let mut nearest = 0;
        let mut nearest_distance = f64::MAX;
        for (i, waypoint) in self.waypoints.iter().enumerate() {
            let distance = waypoint.position.distance_squared(point);
            if distance < nearest_distance {
                nearest = i;
                nearest_distance = distance;
            }
        }
        nearest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_track() -> Track {
        Track::new(&RaceConfig::default())
    }

    #[test]
    fn test_last_checkpoint_sits_on_start_line() {
        let track = get_track();
        let last = track.checkpoints.last().unwrap();
        assert!(last.position.abs_diff_eq(track.start_line, 1e-6));
        assert_eq!(track.checkpoints.len(), 8);
        for (i, checkpoint) in track.checkpoints.iter().enumerate() {
            assert_eq!(checkpoint.id, i);
            assert!(checkpoint.approach_length > 0.0);
        }
    }

    #[test]
    fn test_centerline_is_on_track() {
        let track = get_track();
        for i in 0..16 {
            let point = track.point_at(i as f64 * 0.4);
            assert!((track.normalized_distance(point) - 1.0).abs() < 1e-9);
            assert!(track.is_on_track(point));
            assert!(track.distance_from_centerline(point) < 1e-6);
        }
        assert!(!track.is_on_track(track.center));
        assert!(!track.is_on_track(track.point_at(1.0) * 3.0));
    }

    #[test]
    fn test_waypoints_wobble_but_stay_inside() {
        let track = get_track();
        let off_centerline = track
            .waypoints
            .iter()
            .filter(|w| track.distance_from_centerline(w.position) > 1.0)
            .count();
        assert!(off_centerline > 0);
        assert!(track.waypoints.iter().all(|w| track.is_on_track(w.position)));
    }

    #[test]
    fn test_nearest_waypoint() {
        let track = get_track();
        for (i, waypoint) in track.waypoints.iter().enumerate() {
            assert_eq!(track.nearest_waypoint(waypoint.position + DVec2::new(0.5, 0.5)), i);
        }
    }

    #[test]
    fn test_heading_follows_increasing_angle() {
        let track = get_track();
        let angle = 0.3;
        let ahead = track.point_at(angle + 0.001) - track.point_at(angle);
        let heading = track.heading_at(angle);
        let direction = DVec2::new(heading.cos(), heading.sin());
        assert!(direction.dot(ahead.normalize()) > 0.999);
    }

    #[test]
    fn test_projection_keeps_ray() {
        let track = get_track();
        let point = track.point_at(0.7) + DVec2::new(300.0, 120.0);
        let projected = track.project_to_normalized_distance(point, 1.0);
        assert!((track.normalized_distance(projected) - 1.0).abs() < 1e-9);
        assert!((track.angle_of(projected) - track.angle_of(point)).abs() < 1e-9);
    }
}
