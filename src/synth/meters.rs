//! Per-voice amplitude readout shared between the audio thread and the UI.
//!
//! The audio thread is the only writer. Values are f32 bit patterns in
//! atomics, so neither side ever waits on the other.

use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

#[derive(Debug, Clone)]
pub struct AmplitudeMeters {
    levels: Arc<[AtomicU32]>,
}

impl AmplitudeMeters {
    pub fn new(voices: usize) -> Self {
        let levels = (0..voices)
            .map(|_| AtomicU32::new(0.0f32.to_bits()))
            .collect::<Vec<_>>()
            .into();
        Self { levels }
    }

    /// Latest published amplitude of `voice`, or `None` past the last voice.
    pub fn amplitude(&self, voice: usize) -> Option<f32> {
        self.levels
            .get(voice)
            .map(|level| f32::from_bits(level.load(Ordering::Relaxed)))
    }

    pub fn publish(&self, voice: usize, amplitude: f32) {
        if let Some(level) = self.levels.get(voice) {
            level.store(amplitude.to_bits(), Ordering::Relaxed);
        }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.levels
            .iter()
            .map(|level| f32::from_bits(level.load(Ordering::Relaxed)))
    }
}

/// A single f32 handed from one thread to another, e.g. the measured input level.
#[derive(Debug, Default)]
pub struct SharedLevel(AtomicU32);

impl SharedLevel {
    pub fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    pub fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    pub fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}
