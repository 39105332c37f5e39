use crate::config::GameConfig;

/// Vertical state of the flapper. Horizontal position is fixed by config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerBody {
    pub y: f64,
    pub vy: f64,
}

impl PlayerBody {
    pub fn new(y: f64) -> Self {
        Self { y, vy: 0.0 }
    }

    /// Semi-implicit Euler: velocity first, then position with the new velocity.
    pub fn apply_gravity(&mut self, gravity: f64, delta: f64) {
        self.vy += gravity * delta;
        self.y += self.vy * delta;
    }

    /// Flaps replace the velocity outright, so rapid input never stacks.
    pub fn apply_impulse(&mut self, impulse: f64) {
        self.vy = impulse;
    }

    pub fn is_out_of_bounds(&self, config: &GameConfig) -> bool {
        self.y < 0.0 || self.y > config.height - config.player_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_updates_before_position() {
        let mut body = PlayerBody { y: 100.0, vy: 2.0 };
        body.apply_gravity(0.3, 2.0);
        assert!((body.vy - 2.6).abs() < 1e-9);
        assert!((body.y - 105.2).abs() < 1e-9);
    }

    #[test]
    fn zero_delta_changes_nothing() {
        let mut body = PlayerBody { y: 42.0, vy: -3.0 };
        body.apply_gravity(0.3, 0.0);
        assert_eq!(body, PlayerBody { y: 42.0, vy: -3.0 });
    }

    #[test]
    fn impulse_resets_instead_of_accumulating() {
        let mut body = PlayerBody::new(300.0);
        body.apply_impulse(-6.0);
        body.apply_impulse(-6.0);
        body.apply_impulse(-6.0);
        assert_eq!(body.vy, -6.0);

        body.vy = 15.0;
        body.apply_impulse(-6.0);
        assert_eq!(body.vy, -6.0);
    }

    #[test]
    fn bounds_cover_top_and_bottom() {
        let config = GameConfig::default();
        assert!(!PlayerBody::new(0.0).is_out_of_bounds(&config));
        assert!(!PlayerBody::new(540.0).is_out_of_bounds(&config));
        assert!(PlayerBody::new(-0.1).is_out_of_bounds(&config));
        assert!(PlayerBody::new(540.1).is_out_of_bounds(&config));
        assert!(PlayerBody::new(config.height).is_out_of_bounds(&config));
    }
}
