use std::f64::consts::TAU;

use super::envelope::AmplitudeEnvelope;
use crate::error::{ConfigError, ConfigResult};

/*
Cached Sine Oscillator
======================

A drone holds the same pitch for minutes, so there is no reason to call
sin() per sample. Each oscillator computes its waveform once into a lookup
table and then only reads from it.

Vocabulary
----------

  table         One or more periods of a unit sine sampled at the sample
                rate: table[i] = sin(i · f · 2π / sr).

  repeat factor How many periods the table holds. The table length is
                round(sr / f · repeat), so the rounding error (a tiny pitch
                offset and a small seam where the table wraps) is spread over
                more periods and the seam comes around less often.

  cursor        Index of the next sample to play. Always in [0, len).


Reading Blocks
--------------

A block of n samples starts at the cursor and wraps around the table as many
times as needed:

    table:   [ a b c d e ]       cursor = 3, n = 7
    block:     d e a b c d e
    cursor:  3 → (3 + 7) mod 5 = 0

Because the cursor carries over between calls, successive blocks join with
continuous phase no matter how the caller sizes them. Reading any total of
samples in pieces gives the same waveform as reading it in one go.

The table is the only allocation, made at construction. Rendering writes
into a caller-provided slice and never allocates.
*/

/// Longest table an oscillator will cache: 2^22 samples, about 95 seconds at
/// 44.1kHz and 16 MB of f32.
pub const MAX_TABLE_LENGTH: usize = 1 << 22;

pub struct Oscillator {
    frequency: f32,
    sample_rate: f32,
    table: Vec<f32>,
    cursor: usize,
    gain: f32,
    envelope: AmplitudeEnvelope,
}

impl Oscillator {
    /// One-period table.
    pub fn new(frequency: f32, sample_rate: f32, envelope: AmplitudeEnvelope) -> ConfigResult<Self> {
        Self::with_repeat_factor(frequency, sample_rate, 1, envelope)
    }

    /// Table holding `repeat_factor` periods.
    pub fn with_repeat_factor(
        frequency: f32,
        sample_rate: f32,
        repeat_factor: u32,
        envelope: AmplitudeEnvelope,
    ) -> ConfigResult<Self> {
        if !frequency.is_finite() || frequency <= 0.0 {
            return Err(ConfigError::InvalidFrequency(frequency));
        }
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(ConfigError::InvalidSampleRate(sample_rate));
        }
        if repeat_factor == 0 {
            return Err(ConfigError::InvalidRepeatFactor);
        }

        let length = (f64::from(sample_rate) / f64::from(frequency) * f64::from(repeat_factor))
            .round()
            .max(1.0);
        if length > MAX_TABLE_LENGTH as f64 {
            return Err(ConfigError::TableTooLong {
                frequency,
                repeat_factor,
            });
        }
        let length = length as usize;
        let step = f64::from(frequency) * TAU / f64::from(sample_rate);
        let table = (0..length).map(|i| (i as f64 * step).sin() as f32).collect();

        Ok(Self {
            frequency,
            sample_rate,
            table,
            cursor: 0,
            gain: 1.0,
            envelope,
        })
    }

    /// Fixed scale applied on top of the envelope.
    pub fn with_gain(mut self, gain: f32) -> Self {
        self.gain = gain;
        self
    }

    /// Write the next `out.len()` samples, scaled by the current amplitude.
    pub fn fill_samples(&mut self, out: &mut [f32]) {
        let scale = self.scale();
        let len = self.table.len();
        let mut index = self.cursor;
        for sample in out.iter_mut() {
            *sample = self.table[index] * scale;
            index += 1;
            if index == len {
                index = 0;
            }
        }
        self.cursor = index;
    }

    /// Add the next `out.len()` samples onto `out`.
    pub fn mix_into(&mut self, out: &mut [f32]) {
        let scale = self.scale();
        let len = self.table.len();
        let mut index = self.cursor;
        for sample in out.iter_mut() {
            *sample += self.table[index] * scale;
            index += 1;
            if index == len {
                index = 0;
            }
        }
        self.cursor = index;
    }

    /// Allocating convenience over [`fill_samples`](Self::fill_samples).
    pub fn samples(&mut self, count: usize) -> Vec<f32> {
        let mut out = vec![0.0; count];
        self.fill_samples(&mut out);
        out
    }

    #[inline]
    fn scale(&self) -> f32 {
        self.envelope.amplitude() * self.gain
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn table(&self) -> &[f32] {
        &self.table
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn envelope(&self) -> &AmplitudeEnvelope {
        &self.envelope
    }

    pub fn envelope_mut(&mut self) -> &mut AmplitudeEnvelope {
        &mut self.envelope
    }
}
