//! The $FLAPS balance that outlives a round.
//!
//! The game only ever talks to a [`RewardSink`]. The sink owns persistence;
//! storage failures are logged here and never reach the game loop.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

/// Receives the currency earned in a round.
pub trait RewardSink {
    fn add_flaps(&mut self, amount: u64);
    fn flaps_balance(&self) -> u64;
}

impl<T: RewardSink + ?Sized> RewardSink for Box<T> {
    fn add_flaps(&mut self, amount: u64) {
        (**self).add_flaps(amount)
    }

    fn flaps_balance(&self) -> u64 {
        (**self).flaps_balance()
    }
}

/// A single persisted integer.
pub trait BalanceStore {
    /// Absent values read as zero.
    fn load(&self) -> Result<u64>;
    fn save(&mut self, balance: u64) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    value: Option<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BalanceStore for MemoryStore {
    fn load(&self) -> Result<u64> {
        Ok(self.value.unwrap_or(0))
    }

    fn save(&mut self, balance: u64) -> Result<()> {
        self.value = Some(balance);
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct BalanceFile {
    #[serde(rename = "flapsBalance", default)]
    flaps_balance: u64,
}

/// Keeps the balance as `{"flapsBalance": n}` in a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BalanceStore for JsonFileStore {
    fn load(&self) -> Result<u64> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        let file: BalanceFile = serde_json::from_str(&text)?;
        Ok(file.flaps_balance)
    }

    fn save(&mut self, balance: u64) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let text = serde_json::to_string(&BalanceFile {
            flaps_balance: balance,
        })?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

/// The reward sink used by the game: an in-memory balance written through
/// to a store on every change.
#[derive(Debug)]
pub struct FlapsLedger<S: BalanceStore> {
    store: S,
    balance: u64,
}

impl<S: BalanceStore> FlapsLedger<S> {
    /// Reads the stored balance. An unreadable store starts from zero.
    pub fn open(store: S) -> Self {
        let balance = match store.load() {
            Ok(balance) => balance,
            Err(e) => {
                log::warn!("could not read $FLAPS balance, starting from 0: {e}");
                0
            }
        };
        log::info!("opened $FLAPS ledger with balance {balance}");
        Self { store, balance }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: BalanceStore> RewardSink for FlapsLedger<S> {
    fn add_flaps(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
        log::info!("added {amount} $FLAPS, balance is now {}", self.balance);
        if let Err(e) = self.store.save(self.balance) {
            log::error!("could not persist $FLAPS balance: {e}");
        }
    }

    fn flaps_balance(&self) -> u64 {
        self.balance
    }
}
