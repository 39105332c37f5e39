use crate::config::GameConfig;
use rand::Rng;

#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Left edge.
    pub x: f64,
    pub gap_top: f64,
    pub gap_bottom: f64,
    pub passed: bool,
}

impl Obstacle {
    pub fn right_edge(&self, config: &GameConfig) -> f64 {
        self.x + config.obstacle_width
    }
}

/// Active obstacles, ordered oldest (leftmost) first.
#[derive(Debug, Clone, Default)]
pub struct ObstacleStream {
    obstacles: Vec<Obstacle>,
    last_spawn_ms: f64,
}

impl ObstacleStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the stream and puts the first obstacle at the right edge.
    pub fn start<R: Rng>(&mut self, now_ms: f64, config: &GameConfig, rng: &mut R) {
        self.obstacles.clear();
        self.spawn(config, rng);
        self.last_spawn_ms = now_ms;
    }

    pub fn maybe_spawn<R: Rng>(&mut self, now_ms: f64, config: &GameConfig, rng: &mut R) -> bool {
        if now_ms - self.last_spawn_ms > config.spawn_interval_ms {
            self.spawn(config, rng);
            self.last_spawn_ms = now_ms;
            true
        } else {
            false
        }
    }

    fn spawn<R: Rng>(&mut self, config: &GameConfig, rng: &mut R) {
        let range = config.gap_range().max(0.0);
        let gap_top = config.gap_margin + rng.gen_range(0.0..1.0) * range;
        log::debug!("spawning obstacle with gap at {gap_top:.1}");
        self.obstacles.push(Obstacle {
            x: config.width,
            gap_top,
            gap_bottom: gap_top + config.gap_height,
            passed: false,
        });
    }

    /// Scrolls everything left and drops obstacles that are fully gone.
    pub fn advance(&mut self, delta: f64, config: &GameConfig) {
        let shift = config.obstacle_speed * delta;
        for o in &mut self.obstacles {
            o.x -= shift;
        }
        self.obstacles
            .retain(|o| o.right_edge(config) > -config.offscreen_threshold);
    }

    /// Hands the obstacles to the judge; `restore` puts the survivors back.
    pub fn take(&mut self) -> Vec<Obstacle> {
        std::mem::take(&mut self.obstacles)
    }

    pub fn restore(&mut self, obstacles: Vec<Obstacle>) {
        self.obstacles = obstacles;
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn gaps_stay_inside_margins() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        let mut stream = ObstacleStream::new();
        for _ in 0..500 {
            stream.spawn(&config, &mut rng);
        }
        for o in stream.iter() {
            assert!(o.gap_top >= 50.0);
            assert!(o.gap_bottom <= config.height - 50.0);
            assert!((o.gap_bottom - o.gap_top - config.gap_height).abs() < 1e-9);
            assert_eq!(o.x, config.width);
            assert!(!o.passed);
        }
    }

    #[test]
    fn start_spawns_one_immediately() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut stream = ObstacleStream::new();
        assert!(stream.is_empty());
        stream.start(1000.0, &config, &mut rng);
        assert_eq!(stream.len(), 1);

        stream.start(2000.0, &config, &mut rng);
        assert_eq!(stream.len(), 1);
    }

    #[test]
    fn spawns_only_after_interval() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut stream = ObstacleStream::new();
        stream.start(0.0, &config, &mut rng);

        assert!(!stream.maybe_spawn(1500.0, &config, &mut rng));
        assert!(!stream.maybe_spawn(3000.0, &config, &mut rng));
        assert!(stream.maybe_spawn(3001.0, &config, &mut rng));
        assert_eq!(stream.len(), 2);
        assert!(!stream.maybe_spawn(5000.0, &config, &mut rng));
        assert!(stream.maybe_spawn(6002.0, &config, &mut rng));
        assert_eq!(stream.len(), 3);
    }

    #[test]
    fn advance_scrolls_and_drops_offscreen() {
        let config = GameConfig::default();
        let mut stream = ObstacleStream::new();
        stream.restore(vec![
            Obstacle { x: -170.0, gap_top: 100.0, gap_bottom: 400.0, passed: true },
            Obstacle { x: 400.0, gap_top: 100.0, gap_bottom: 400.0, passed: false },
        ]);

        stream.advance(2.0, &config);
        let xs: Vec<f64> = stream.iter().map(|o| o.x).collect();
        // -173 + 80 = -93, still inside the threshold
        assert_eq!(xs, vec![-173.0, 397.0]);

        stream.advance(5.0, &config);
        let xs: Vec<f64> = stream.iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![389.5]);
    }
}
