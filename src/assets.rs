//! Decorative assets: cue sounds and the parallax backdrop with its
//! promo billboards.
//!
//! Everything is produced on a loader thread and collected by [`AssetTable::poll`]
//! once per frame. Gameplay never waits for it; the renderer and the sound
//! host check [`AssetTable::is_ready`] and skip decoration until then.

use crate::audio::{self, Cue};
use crate::promo::PROMOS;
use std::collections::HashMap;
use std::f64::consts::TAU;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKey {
    Sound(Cue),
    Backdrop,
}

pub const ALL_ASSETS: [AssetKey; 3] = [
    AssetKey::Sound(Cue::Purr),
    AssetKey::Sound(Cue::Crash),
    AssetKey::Backdrop,
];

#[derive(Debug, Clone)]
pub enum Asset {
    Sound(Vec<f32>),
    Backdrop(Backdrop),
}

/// Two rows of rolling hills, stored as heights in playfield units over one
/// seamless tile, and the billboards standing in front of them.
#[derive(Debug, Clone, PartialEq)]
pub struct Backdrop {
    pub far: Vec<f64>,
    pub near: Vec<f64>,
    pub billboards: Vec<Billboard>,
}

/// A promo board placed within one stretch of `BILLBOARD_SPACING`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Billboard {
    pub text: &'static str,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

pub const BACKDROP_TILE: usize = 1600;
pub const BILLBOARD_SPACING: f64 = 2000.0;
pub const BILLBOARD_PARALLAX: f64 = 0.5;

impl Backdrop {
    pub fn generate() -> Self {
        let wave = |x: usize, k1: f64, k2: f64, a1: f64, a2: f64, base: f64| {
            let u = x as f64 / BACKDROP_TILE as f64;
            base + (TAU * k1 * u).sin() * a1 + (TAU * k2 * u).sin() * a2
        };
        Self {
            far: (0..BACKDROP_TILE).map(|x| wave(x, 3.0, 5.0, 40.0, 20.0, 110.0)).collect(),
            near: (0..BACKDROP_TILE).map(|x| wave(x, 4.0, 9.0, 25.0, 12.0, 55.0)).collect(),
            billboards: vec![
                Billboard { text: PROMOS[0].text, x: 0.2 * BILLBOARD_SPACING, y: 150.0, w: 400.0, h: 100.0 },
                Billboard { text: PROMOS[1].text, x: 0.7 * BILLBOARD_SPACING, y: 350.0, w: 400.0, h: 100.0 },
            ],
        }
    }

    /// Billboards overlapping a view `width` wide, each with its left edge in
    /// view coordinates. The boards repeat every `BILLBOARD_SPACING`.
    pub fn billboards_in_view(&self, scroll_x: f64, width: f64) -> Vec<(f64, Billboard)> {
        let offset = scroll_x * BILLBOARD_PARALLAX;
        let widest = self.billboards.iter().map(|b| b.x + b.w).fold(0.0, f64::max);
        let first = ((offset - widest) / BILLBOARD_SPACING).floor() as i64;
        let last = ((offset + width) / BILLBOARD_SPACING).floor() as i64;
        let mut seen = Vec::new();
        for stretch in first..=last {
            let base = stretch as f64 * BILLBOARD_SPACING - offset;
            for b in &self.billboards {
                let x = base + b.x;
                if x + b.w > 0.0 && x < width {
                    seen.push((x, *b));
                }
            }
        }
        seen
    }

    /// Height at playfield column `x`, wrapping around the tile.
    pub fn sample(layer: &[f64], x: f64) -> f64 {
        if layer.is_empty() {
            return 0.0;
        }
        let i = x.rem_euclid(layer.len() as f64) as usize;
        layer[i.min(layer.len() - 1)]
    }
}

fn load(key: AssetKey) -> Result<Asset, String> {
    match key {
        AssetKey::Sound(cue) => {
            let samples = audio::synthesize(cue);
            if samples.is_empty() || samples.iter().any(|s| !s.is_finite()) {
                return Err(format!("{cue:?} rendered no usable samples"));
            }
            Ok(Asset::Sound(samples))
        }
        AssetKey::Backdrop => Ok(Asset::Backdrop(Backdrop::generate())),
    }
}

pub struct AssetTable {
    loaded: HashMap<AssetKey, Asset>,
    incoming: Option<Receiver<(AssetKey, Result<Asset, String>)>>,
}

impl AssetTable {
    /// Starts loading every asset in the background.
    pub fn load_in_background() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for key in ALL_ASSETS {
                if tx.send((key, load(key))).is_err() {
                    return;
                }
            }
        });
        Self {
            loaded: HashMap::new(),
            incoming: Some(rx),
        }
    }

    /// A table with nothing loaded and nothing coming.
    pub fn empty() -> Self {
        Self {
            loaded: HashMap::new(),
            incoming: None,
        }
    }

    /// Collects finished loads without blocking.
    pub fn poll(&mut self) {
        let Some(rx) = &self.incoming else {
            return;
        };
        loop {
            match rx.try_recv() {
                Ok((key, Ok(asset))) => {
                    log::debug!("asset {key:?} loaded");
                    self.loaded.insert(key, asset);
                }
                Ok((key, Err(e))) => log::warn!("asset {key:?} failed to load: {e}"),
                Err(TryRecvError::Empty) => return,
                Err(TryRecvError::Disconnected) => {
                    if !self.is_ready() {
                        log::warn!("asset loading finished incomplete, playing without decoration");
                    }
                    self.incoming = None;
                    return;
                }
            }
        }
    }

    pub fn insert(&mut self, key: AssetKey, asset: Asset) {
        self.loaded.insert(key, asset);
    }

    pub fn is_ready(&self) -> bool {
        ALL_ASSETS.iter().all(|k| self.loaded.contains_key(k))
    }

    pub fn sound(&self, cue: Cue) -> Option<&[f32]> {
        match self.loaded.get(&AssetKey::Sound(cue)) {
            Some(Asset::Sound(samples)) => Some(samples.as_slice()),
            _ => None,
        }
    }

    pub fn backdrop(&self) -> Option<&Backdrop> {
        match self.loaded.get(&AssetKey::Backdrop) {
            Some(Asset::Backdrop(b)) => Some(b),
            _ => None,
        }
    }
}
