/// Measures time between frames. The first tick after a reset only sets the
/// baseline.
#[derive(Debug, Default, Clone)]
pub struct GameClock {
    last: Option<f64>,
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the milliseconds since the previous tick and re-baselines.
    pub fn tick(&mut self, timestamp_ms: f64) -> f64 {
        let elapsed = match self.last {
            Some(last) => timestamp_ms - last,
            None => 0.0,
        };
        self.last = Some(timestamp_ms);
        elapsed
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
