//! Low-level DSP primitives for the drone voices.
//!
//! These components are allocation-free once constructed and realtime-safe,
//! so the composer can run them directly inside the audio callback. They stay
//! focused on the signal math; voice management and control live in `synth`.

/// Drifting amplitude envelope with sustain, silence and release modes.
pub mod envelope;
/// Input level measurement.
pub mod level;
/// Table-cached sine oscillator.
pub mod oscillator;

pub use envelope::{AmplitudeEnvelope, EnvelopeConfig, EnvelopeMode, InputFeedback};
pub use oscillator::{Oscillator, MAX_TABLE_LENGTH};
