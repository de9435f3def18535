use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::chance::WeightCurve;

/*
Drifting Amplitude Envelope
===========================

A drone voice never gets a note-on or note-off. Its loudness wanders: every
block it takes one small step toward a target, and once in a while it picks
a new target and a new step size. Nothing here is shaped in seconds; a step
is one audio block.

Vocabulary
----------

  raw amplitude   The stored value. It may be negative. Reading the
                  amplitude clamps negatives to 0, so a voice started at -3
                  is silent until it climbs past 0. That is the fade-in
                  delay, with no separate "waiting" state.

  drift target    Where a sustaining voice is heading. Redrawn from a weight
                  curve, so it can sit slightly below 0 (a voice that drifts
                  into silence for a while).

  change rate     Size of one step. Also redrawn from a weight curve.

  move chance     Probability, per block, of redrawing the three values
                  above (itself included).

  mode            Sustaining, Silent, or Releasing. Only the caller changes it.


One Step
--------

    Silent       raw = 0, done.
    Sustaining   maybe redraw; target = drift target
                 (or (1 - input level) + drift target with input feedback)
    Releasing    target = -1, change rate = release rate

    delta = change_rate * sign(target - raw)      sign(0) = 0
    if raw > loudness threshold: delta -= loudness decrement
    raw += delta

The extra decrement above the threshold is a soft ceiling: loud voices are
pulled down a little harder than quiet ones are pushed up.

Releasing heads for -1 rather than 0 so the voice crosses zero and stays
below it. It hovers around -1 afterwards, which always reads as silence, and
it never turns back into a sustaining voice on its own.

    raw
     0.4 ┤╲
         │ ╲
     0.0 ┼──╲─────────────────→ blocks   (reads as 0 from here on)
         │   ╲
    -1.0 ┤    ╲_/\/\/\/\/\/\/\
*/

/// What the envelope does on its next step.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvelopeMode {
    /// Drift toward a randomly refreshed target.
    Sustaining,
    /// Forced to zero every step.
    #[default]
    Silent,
    /// Fade toward -1 and stay inaudible.
    Releasing,
}

/// How a measured input level feeds the sustaining target.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFeedback {
    /// The target is the drift target alone.
    #[default]
    Ignore,
    /// Target is `(1 - input) + drift_target`: louder rooms make a quieter drone.
    Inverted,
}

/// Tuning for one voice's envelope.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EnvelopeConfig {
    pub drift_targets: WeightCurve,
    pub change_rates: WeightCurve,
    pub move_chances: WeightCurve,
    pub initial_drift_target: f32,
    pub initial_change_rate: f32,
    pub initial_move_chance: f32,
    pub loudness_threshold: f32,
    pub loudness_decrement: f32,
    /// Change rate forced while releasing; `None` keeps the current rate.
    pub release_rate: Option<f32>,
    pub input_feedback: InputFeedback,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            drift_targets: WeightCurve::trusted(&[(-0.3, 0.0), (0.1, 12.0), (0.2, 4.0), (0.3, 0.0)]),
            change_rates: WeightCurve::trusted(&[(0.0001, 100.0), (0.001, 5.0), (0.01, 1.0)]),
            move_chances: WeightCurve::trusted(&[(0.001, 10.0), (0.01, 2.0)]),
            initial_drift_target: 0.0,
            initial_change_rate: 0.000_001,
            initial_move_chance: 0.0015,
            loudness_threshold: 0.5,
            loudness_decrement: 0.001,
            release_rate: Some(0.000_15),
            input_feedback: InputFeedback::Ignore,
        }
    }
}

impl EnvelopeConfig {
    pub fn with_input_feedback(mut self, feedback: InputFeedback) -> Self {
        self.input_feedback = feedback;
        self
    }

    pub fn with_loudness_ceiling(mut self, threshold: f32, decrement: f32) -> Self {
        self.loudness_threshold = threshold;
        self.loudness_decrement = decrement;
        self
    }

    pub fn with_release_rate(mut self, rate: Option<f32>) -> Self {
        self.release_rate = rate;
        self
    }
}

pub struct AmplitudeEnvelope {
    config: EnvelopeConfig,
    mode: EnvelopeMode,
    raw: f32,
    drift_target: f32,
    change_rate: f32,
    move_chance: f32,
}

impl AmplitudeEnvelope {
    /// Start in `mode` at `raw_amplitude`. Negative values delay audibility.
    pub fn new(config: EnvelopeConfig, mode: EnvelopeMode, raw_amplitude: f32) -> Self {
        Self {
            drift_target: config.initial_drift_target,
            change_rate: config.initial_change_rate,
            move_chance: config.initial_move_chance,
            config,
            mode,
            raw: raw_amplitude,
        }
    }

    /// Advance one block.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R, input_level: Option<f32>) {
        let target = match self.mode {
            EnvelopeMode::Silent => {
                self.raw = 0.0;
                return;
            }
            EnvelopeMode::Sustaining => {
                if rng.gen::<f32>() < self.move_chance {
                    self.refresh(rng);
                }
                match (self.config.input_feedback, input_level) {
                    (InputFeedback::Inverted, Some(level)) => (1.0 - level) + self.drift_target,
                    _ => self.drift_target,
                }
            }
            EnvelopeMode::Releasing => {
                if let Some(rate) = self.config.release_rate {
                    self.change_rate = rate;
                }
                -1.0
            }
        };

        let mut delta = self.change_rate * sign(target - self.raw);
        if self.raw > self.config.loudness_threshold {
            delta -= self.config.loudness_decrement;
        }
        self.raw += delta;
    }

    /// Redraw move chance, drift target and change rate from their curves.
    pub fn refresh<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.move_chance = self.config.move_chances.sample(rng);
        self.drift_target = self.config.drift_targets.sample(rng);
        self.change_rate = self.config.change_rates.sample(rng);
    }

    /// Audible amplitude: the raw value with negatives read as 0.
    pub fn amplitude(&self) -> f32 {
        self.raw.max(0.0)
    }

    pub fn raw_amplitude(&self) -> f32 {
        self.raw
    }

    pub fn set_raw_amplitude(&mut self, raw: f32) {
        self.raw = raw;
    }

    /// Resume sustaining from `raw`, usually a negative value so the voice fades in.
    pub fn fade_in_from(&mut self, raw: f32) {
        self.raw = raw;
        self.mode = EnvelopeMode::Sustaining;
    }

    pub fn mode(&self) -> EnvelopeMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: EnvelopeMode) {
        self.mode = mode;
    }

    pub fn drift_target(&self) -> f32 {
        self.drift_target
    }

    pub fn change_rate(&self) -> f32 {
        self.change_rate
    }

    pub fn move_chance(&self) -> f32 {
        self.move_chance
    }

    pub fn config(&self) -> &EnvelopeConfig {
        &self.config
    }
}

/// Sign with `sign(0) = 0`, unlike `f32::signum`.
#[inline]
fn sign(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}
