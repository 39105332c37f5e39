#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Collision,
    OutOfBounds,
}

/// What the summary overlay shows after a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSummary {
    pub score: u32,
    pub earned: u64,
    /// Balance after the round's earnings were flushed.
    pub total: u64,
    pub reason: EndReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundState {
    pub score: u32,
    pub earned: u64,
    pub running: bool,
}

impl RoundState {
    pub fn start() -> Self {
        Self {
            score: 0,
            earned: 0,
            running: true,
        }
    }

    pub fn record_pass(&mut self, reward: u64) {
        self.score += 1;
        self.earned += reward;
    }

    /// Stops the round. Returns true only for the call that actually stopped it.
    pub fn finish(&mut self) -> bool {
        std::mem::replace(&mut self.running, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_reports_once() {
        let mut round = RoundState::start();
        round.record_pass(100);
        round.record_pass(100);
        assert_eq!((round.score, round.earned), (2, 200));
        assert!(round.finish());
        assert!(!round.finish());
        assert!(!round.running);
    }

    #[test]
    fn idle_round_cannot_finish() {
        let mut round = RoundState::default();
        assert!(!round.finish());
    }
}
