//! Flaps - a flappy arcade game for the terminal that pays out $FLAPS.
//!
//! The library holds the game loop and everything it talks to; the binary
//! only owns the terminal, the audio device and the frame pacing.

pub mod assets;
pub mod audio;
pub mod clock;
pub mod config;
pub mod error;
pub mod game;
pub mod judge;
pub mod obstacles;
pub mod physics;
pub mod promo;
pub mod render;
pub mod reward;
pub mod round;

pub use config::GameConfig;
pub use error::{FlapsError, Result};
pub use game::{Game, GameEvent, Phase};
pub use reward::{BalanceStore, FlapsLedger, JsonFileStore, MemoryStore, RewardSink};
pub use round::{EndReason, RoundSummary};
