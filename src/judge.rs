//! Per-frame collision and scoring.
//!
//! The judge never mutates the stream in place: it consumes the current
//! obstacles and folds them into the surviving sequence plus the frame's
//! score delta and collision flag.

use crate::config::GameConfig;
use crate::obstacles::Obstacle;

/// Result of judging one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sweep {
    pub survivors: Vec<Obstacle>,
    /// Obstacles newly marked passed this frame.
    pub passed: u32,
    pub collided: bool,
}

/// Both boxes are shrunk by the forgiveness margin before testing.
pub fn overlaps(player_y: f64, obstacle: &Obstacle, config: &GameConfig) -> bool {
    let f = config.forgiveness;
    let left = config.player_x + f;
    let right = config.player_x + config.player_width - f;
    let top = player_y + f;
    let bottom = player_y + config.player_height - f;

    let in_span = right > obstacle.x && left < obstacle.right_edge(config);
    in_span && (top < obstacle.gap_top || bottom > obstacle.gap_bottom)
}

/// The player's leading edge is past the obstacle's trailing edge.
pub fn has_passed(obstacle: &Obstacle, config: &GameConfig) -> bool {
    config.player_x + config.player_width > obstacle.right_edge(config)
}

pub fn sweep(obstacles: Vec<Obstacle>, player_y: f64, config: &GameConfig) -> Sweep {
    obstacles
        .into_iter()
        .fold(Sweep::default(), |mut acc, mut obstacle| {
            if !obstacle.passed && has_passed(&obstacle, config) {
                obstacle.passed = true;
                acc.passed += 1;
            }
            if overlaps(player_y, &obstacle, config) {
                acc.collided = true;
            } else {
                acc.survivors.push(obstacle);
            }
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacle(x: f64, gap_top: f64, gap_bottom: f64) -> Obstacle {
        Obstacle { x, gap_top, gap_bottom, passed: false }
    }

    #[test]
    fn inside_gap_is_safe() {
        let config = GameConfig::default();
        let o = obstacle(120.0, 200.0, 500.0);
        assert!(!overlaps(300.0, &o, &config));
    }

    #[test]
    fn hitting_the_top_wall() {
        let config = GameConfig::default();
        let o = obstacle(120.0, 200.0, 500.0);
        assert!(overlaps(190.0, &o, &config));
        // forgiveness lets the top edge sit 5 px into the wall
        assert!(!overlaps(195.0, &o, &config));
    }

    #[test]
    fn hitting_the_bottom_wall() {
        let config = GameConfig::default();
        let o = obstacle(120.0, 200.0, 500.0);
        assert!(!overlaps(445.0, &o, &config));
        assert!(overlaps(446.0, &o, &config));
    }

    #[test]
    fn no_collision_outside_horizontal_span() {
        let config = GameConfig::default();
        // player spans 105..175 after forgiveness
        assert!(!overlaps(0.0, &obstacle(175.0, 200.0, 500.0), &config));
        assert!(overlaps(0.0, &obstacle(174.0, 200.0, 500.0), &config));
        assert!(!overlaps(0.0, &obstacle(25.0, 200.0, 500.0), &config));
        assert!(overlaps(0.0, &obstacle(26.0, 200.0, 500.0), &config));
    }

    #[test]
    fn pass_is_scored_once() {
        let config = GameConfig::default();
        let first = sweep(vec![obstacle(99.0, 200.0, 500.0)], 300.0, &config);
        assert_eq!(first.passed, 1);
        assert!(!first.collided);
        assert!(first.survivors[0].passed);

        let second = sweep(first.survivors, 300.0, &config);
        assert_eq!(second.passed, 0);
        assert_eq!(second.survivors.len(), 1);
    }

    #[test]
    fn not_passed_until_trailing_edge_is_cleared() {
        let config = GameConfig::default();
        let s = sweep(vec![obstacle(100.0, 200.0, 500.0)], 300.0, &config);
        assert_eq!(s.passed, 0);
    }

    #[test]
    fn collider_is_dropped_but_pass_still_counts() {
        let config = GameConfig::default();
        let s = sweep(
            vec![obstacle(90.0, 200.0, 500.0), obstacle(600.0, 200.0, 500.0)],
            100.0,
            &config,
        );
        assert!(s.collided);
        assert_eq!(s.passed, 1);
        assert_eq!(s.survivors.len(), 1);
        assert_eq!(s.survivors[0].x, 600.0);
    }
}
