//! The round lifecycle and the per-frame update.
//!
//! Frame order: clock, physics, obstacle spawn and scroll, judge, then the
//! round-end checks. The host calls [`Game::tick`] once per frame and draws
//! from the accessors afterwards.

use crate::clock::GameClock;
use crate::config::GameConfig;
use crate::judge;
use crate::obstacles::{Obstacle, ObstacleStream};
use crate::physics::PlayerBody;
use crate::promo::PromoOverlay;
use crate::reward::RewardSink;
use crate::round::{EndReason, RoundState, RoundSummary};
use rand::Rng;

/// Side effects the host reacts to (sounds, logging).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    RoundStarted,
    Flapped,
    ObstaclePassed { score: u32, earned: u64 },
    RoundOver(RoundSummary),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing played yet; the start screen is up.
    Ready,
    Playing,
    Over(RoundSummary),
}

pub struct Game<S: RewardSink> {
    config: GameConfig,
    sink: S,
    clock: GameClock,
    player: PlayerBody,
    obstacles: ObstacleStream,
    round: RoundState,
    promo: PromoOverlay,
    summary: Option<RoundSummary>,
    scroll_x: f64,
}

impl<S: RewardSink> Game<S> {
    pub fn new(config: GameConfig, sink: S) -> Self {
        let player = PlayerBody::new(config.player_start_y());
        Self {
            config,
            sink,
            clock: GameClock::new(),
            player,
            obstacles: ObstacleStream::new(),
            round: RoundState::default(),
            promo: PromoOverlay::new(),
            summary: None,
            scroll_x: 0.0,
        }
    }

    /// The single input: starts a round when idle, flaps while playing.
    pub fn activate<R: Rng>(&mut self, now_ms: f64, rng: &mut R) -> GameEvent {
        if self.round.running {
            self.player.apply_impulse(self.config.flap_impulse);
            GameEvent::Flapped
        } else {
            self.start_round(now_ms, rng);
            GameEvent::RoundStarted
        }
    }

    fn start_round<R: Rng>(&mut self, now_ms: f64, rng: &mut R) {
        log::info!("round started");
        self.player = PlayerBody::new(self.config.player_start_y());
        self.clock.reset();
        self.obstacles.start(now_ms, &self.config, rng);
        self.round = RoundState::start();
        self.promo.reset();
        self.summary = None;
        self.scroll_x = 0.0;
    }

    /// Advances one frame. Does nothing unless a round is running.
    pub fn tick<R: Rng>(&mut self, timestamp_ms: f64, rng: &mut R) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !self.round.running {
            return events;
        }

        let delta = self.config.steps(self.clock.tick(timestamp_ms));

        self.player.apply_gravity(self.config.gravity, delta);
        self.scroll_x += self.config.obstacle_speed * delta;

        self.obstacles.maybe_spawn(timestamp_ms, &self.config, rng);
        self.obstacles.advance(delta, &self.config);

        let sweep = judge::sweep(self.obstacles.take(), self.player.y, &self.config);
        self.obstacles.restore(sweep.survivors);
        for _ in 0..sweep.passed {
            self.round.record_pass(self.config.reward_per_obstacle);
            events.push(GameEvent::ObstaclePassed {
                score: self.round.score,
                earned: self.round.earned,
            });
        }
        self.promo.update(self.round.score);

        let reason = if sweep.collided {
            Some(EndReason::Collision)
        } else if self.player.is_out_of_bounds(&self.config) {
            Some(EndReason::OutOfBounds)
        } else {
            None
        };
        if let Some(summary) = reason.and_then(|r| self.end_round(r)) {
            events.push(GameEvent::RoundOver(summary));
        }
        events
    }

    /// Stops the round and pays out. Later calls return `None` and pay nothing.
    pub fn end_round(&mut self, reason: EndReason) -> Option<RoundSummary> {
        if !self.round.finish() {
            return None;
        }
        self.clock.reset();
        if self.round.earned > 0 {
            self.sink.add_flaps(self.round.earned);
        }
        let summary = RoundSummary {
            score: self.round.score,
            earned: self.round.earned,
            total: self.sink.flaps_balance(),
            reason,
        };
        log::info!(
            "round over ({:?}): {} obstacles, {} $FLAPS earned, {} total",
            reason,
            summary.score,
            summary.earned,
            summary.total
        );
        self.summary = Some(summary);
        Some(summary)
    }

    pub fn phase(&self) -> Phase {
        if self.round.running {
            Phase::Playing
        } else if let Some(summary) = self.summary {
            Phase::Over(summary)
        } else {
            Phase::Ready
        }
    }

    /// Stored balance plus whatever the running round has not flushed yet.
    pub fn display_total(&self) -> u64 {
        if self.round.running {
            self.sink.flaps_balance() + self.round.earned
        } else {
            self.sink.flaps_balance()
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self) -> &PlayerBody {
        &self.player
    }

    pub fn obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn promo(&self) -> &PromoOverlay {
        &self.promo
    }

    pub fn scroll_x(&self) -> f64 {
        self.scroll_x
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
