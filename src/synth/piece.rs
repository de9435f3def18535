//! Per-piece drone settings.
//!
//! The drone programs for different performances differ only in tuning:
//! which pitches sound, how long each cached table is, how the envelope
//! drifts, and whether a microphone feeds back. Each performance is one
//! [`PieceConfig`] rather than its own copy of the voice code.

use std::ops::Range;

use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::chance::WeightCurve;
use crate::dsp::{AmplitudeEnvelope, EnvelopeConfig, EnvelopeMode, InputFeedback, Oscillator};
use crate::error::{ConfigError, ConfigResult};

/// Frequency of a pitch class in the octave starting at A4.
///
/// 0 is C (523.25 Hz) through 11 is B (493.88 Hz); A (9) is 440 Hz. A, A#
/// and B sit below C because the octave is counted upward from A4.
pub fn pitch_class_frequency(pitch_class: u8) -> Option<f32> {
    let frequency = match pitch_class {
        9 => 440.0,
        10 => 466.16,
        11 => 493.88,
        0 => 523.25,
        1 => 554.37,
        2 => 587.33,
        3 => 622.25,
        4 => 659.26,
        5 => 698.46,
        6 => 739.99,
        7 => 783.99,
        8 => 830.61,
        _ => return None,
    };
    Some(frequency)
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PieceConfig {
    pub name: String,
    /// One voice per pitch, in Hz.
    pub pitches: Vec<f32>,
    pub repeat_factor: u32,
    pub gain: f32,
    /// Raw amplitude each voice starts from when the program opens.
    pub start_amplitude: Range<f32>,
    /// Raw amplitude each voice restarts from after a pause.
    pub restart_amplitude: Range<f32>,
    pub start_mode: EnvelopeMode,
    pub envelope: EnvelopeConfig,
}

/// Names accepted by [`PieceConfig::by_name`].
pub const PIECE_NAMES: &[&str] = &["second_hand", "listening"];

impl PieceConfig {
    /// "the second hand somehow different this time around": three octaves
    /// of E, starting paused.
    pub fn second_hand() -> Self {
        let e = pitch_class_frequency(4).unwrap_or(659.26);
        Self {
            name: "second_hand".into(),
            pitches: vec![e / 2.0, e, e * 2.0],
            repeat_factor: 1,
            gain: 1.0,
            start_amplitude: -8.0..0.0,
            restart_amplitude: -3.0..0.0,
            start_mode: EnvelopeMode::Silent,
            envelope: EnvelopeConfig::default(),
        }
    }

    /// Microphone-driven variant: long tables, rare uniform target changes,
    /// a lower loudness ceiling, and a drone that backs off as the room gets
    /// louder.
    pub fn listening() -> Self {
        let e = pitch_class_frequency(4).unwrap_or(659.26);
        Self {
            name: "listening".into(),
            pitches: vec![e / 2.0, e, e * 2.0],
            repeat_factor: 10,
            gain: 1.0,
            start_amplitude: -8.0..0.0,
            restart_amplitude: -3.0..0.0,
            start_mode: EnvelopeMode::Silent,
            envelope: EnvelopeConfig {
                drift_targets: WeightCurve::trusted(&[(0.0, 1.0), (1.0, 1.0)]),
                move_chances: WeightCurve::constant(0.001),
                initial_move_chance: 0.001,
                ..EnvelopeConfig::default()
            }
            .with_loudness_ceiling(0.2, 0.001)
            .with_input_feedback(InputFeedback::Inverted),
        }
    }

    pub fn by_name(name: &str) -> ConfigResult<Self> {
        match name {
            "second_hand" => Ok(Self::second_hand()),
            "listening" => Ok(Self::listening()),
            _ => Err(ConfigError::UnknownPiece(name.to_owned())),
        }
    }

    pub fn listens_to_input(&self) -> bool {
        self.envelope.input_feedback != InputFeedback::Ignore
    }

    /// One oscillator per pitch, each starting at a random raw amplitude from
    /// `start_amplitude`.
    pub fn build_voices<R: Rng + ?Sized>(
        &self,
        sample_rate: f32,
        rng: &mut R,
    ) -> ConfigResult<Vec<Oscillator>> {
        self.pitches
            .iter()
            .map(|&frequency| -> ConfigResult<Oscillator> {
                let start = draw_amplitude(&self.start_amplitude, &mut *rng);
                let envelope = AmplitudeEnvelope::new(self.envelope.clone(), self.start_mode, start);
                Ok(
                    Oscillator::with_repeat_factor(frequency, sample_rate, self.repeat_factor, envelope)?
                        .with_gain(self.gain),
                )
            })
            .collect()
    }

    /// A fresh fade-in amplitude for a voice resuming after a pause.
    pub fn restart_amplitude<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        draw_amplitude(&self.restart_amplitude, rng)
    }
}

fn draw_amplitude<R: Rng + ?Sized>(range: &Range<f32>, rng: &mut R) -> f32 {
    if range.start < range.end {
        rng.gen_range(range.clone())
    } else {
        range.start
    }
}
