use crate::error::{FlapsError, Result};
use fundsp::prelude::*;
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink};
use std::f32::consts::TAU;

pub const SAMPLE_RATE: u32 = 44_100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Plays on every flap, restarting if already playing.
    Purr,
    /// Plays once when a round ends.
    Crash,
}

// ── Synthesis ───────────────────────────────────────────────────────────────

/// Renders a cue to mono samples at [`SAMPLE_RATE`].
pub fn synthesize(cue: Cue) -> Vec<f32> {
    match cue {
        Cue::Purr => purr(),
        Cue::Crash => crash(),
    }
}

fn purr() -> Vec<f32> {
    let len = SAMPLE_RATE as usize * 35 / 100;
    let mut node = saw_hz(55.0_f32);
    (0..len)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            // 25 Hz tremolo gives the rumble, linear fade keeps it short
            let tremolo = 0.5 + 0.5 * (TAU * 25.0 * t).sin();
            let fade = 1.0 - t / 0.35;
            node.get_mono() as f32 * 0.12 * tremolo * fade
        })
        .collect()
}

fn crash() -> Vec<f32> {
    // Stepped sweep 400Hz -> 80Hz over 0.4s, gain 0.15 -> 0 over 0.5s
    const STEPS: usize = 20;
    let len = SAMPLE_RATE as usize / 2;
    let step_len = len / STEPS;
    let mut out = Vec::with_capacity(len);
    for step in 0..STEPS {
        let p = (step as f32 / STEPS as f32 / 0.8).min(1.0);
        let freq = 400.0 + (80.0 - 400.0) * p;
        let mut node = saw_hz(freq);
        for _ in 0..step_len {
            let t = out.len() as f32 / SAMPLE_RATE as f32;
            let gain = 0.15 * (1.0 - t / 0.5).max(0.0);
            out.push(node.get_mono() as f32 * gain);
        }
    }
    out
}

// ── Playback ────────────────────────────────────────────────────────────────

/// Output device plus the sink of the purr currently playing. Dropping this
/// silences everything.
pub struct Audio {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    purr: Option<Sink>,
}

impl Audio {
    pub fn open() -> Result<Self> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| FlapsError::Audio(e.to_string()))?;
        log::info!("audio output opened");
        Ok(Self {
            _stream: stream,
            handle,
            purr: None,
        })
    }

    /// Fire and forget. Missing samples or a failed sink only get logged.
    pub fn play(&mut self, cue: Cue, samples: &[f32]) {
        let sink = match Sink::try_new(&self.handle) {
            Ok(sink) => sink,
            Err(e) => {
                log::warn!("could not play {cue:?}: {e}");
                return;
            }
        };
        sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples.to_vec()));
        match cue {
            Cue::Purr => {
                if let Some(old) = self.purr.replace(sink) {
                    old.stop();
                }
            }
            Cue::Crash => sink.detach(),
        }
    }

    pub fn stop(&mut self, cue: Cue) {
        if cue == Cue::Purr {
            if let Some(sink) = self.purr.take() {
                sink.stop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cues_are_short_and_quiet() {
        for cue in [Cue::Purr, Cue::Crash] {
            let samples = synthesize(cue);
            assert!(!samples.is_empty());
            assert!(samples.len() <= SAMPLE_RATE as usize / 2);
            assert!(samples.iter().all(|s| s.is_finite() && s.abs() <= 0.2));
        }
    }

    #[test]
    fn crash_fades_out() {
        let samples = synthesize(Cue::Crash);
        let tail = &samples[samples.len() - 100..];
        assert!(tail.iter().all(|s| s.abs() < 0.01));
    }
}
