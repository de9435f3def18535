//! Control surface state
//!
//! Static facts are fixed at startup; the transport state changes only on
//! key presses, never from the audio thread.

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

/// Static state sent once at initialization (can allocate)
#[derive(Clone, Debug)]
pub struct UiStateInit {
    /// Piece name shown in the title
    pub piece: String,
    /// Audio sample rate in Hz
    pub sample_rate: f32,
    /// Samples per envelope step
    pub block_size: usize,
    /// Voice frequencies in Hz, in voice order
    pub frequencies: Vec<f32>,
    /// Whether the microphone level feeds the envelopes
    pub listening: bool,
}

/// What the performer last asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transport {
    Paused,
    Playing,
    /// Cue P: voices are releasing.
    FadingOut,
}

/// Performance clock. Starts on the first Play and can be reset to zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct CueTimer {
    started_at: Option<Instant>,
}

impl CueTimer {
    /// Start counting if not already started.
    pub fn start(&mut self, now: Instant) {
        self.started_at.get_or_insert(now);
    }

    pub fn reset(&mut self, now: Instant) {
        self.started_at = Some(now);
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        self.started_at
            .map(|start| now.saturating_duration_since(start))
            .unwrap_or_default()
    }
}

/// Latest problem worth showing the performer, shown in the help bar.
///
/// Written from device error callbacks and the control loop, so it sits
/// behind a mutex; the audio data callbacks never touch it. The terminal is
/// in the alternate screen while the drone runs, so stderr would be drawn
/// over the UI.
#[derive(Clone, Debug, Default)]
pub struct StatusLine(Arc<Mutex<Option<String>>>);

impl StatusLine {
    pub fn set(&self, message: impl Into<String>) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = Some(message.into());
        }
    }

    pub fn clear(&self) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = None;
        }
    }

    pub fn get(&self) -> Option<String> {
        self.0.lock().ok().and_then(|slot| slot.clone())
    }
}

/// `m:ss`, as on a conductor's stopwatch.
pub fn format_elapsed(elapsed: Duration) -> String {
    let seconds = elapsed.as_secs();
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_elapsed(Duration::from_secs(0)), "0:00");
        assert_eq!(format_elapsed(Duration::from_secs(7)), "0:07");
        assert_eq!(format_elapsed(Duration::from_secs(754)), "12:34");
    }

    #[test]
    fn status_line_is_shared_between_clones() {
        let status = StatusLine::default();
        let callback_side = status.clone();
        assert_eq!(status.get(), None);

        callback_side.set("Audio output error: device unplugged");
        assert_eq!(status.get().as_deref(), Some("Audio output error: device unplugged"));

        status.clear();
        assert_eq!(callback_side.get(), None);
    }

    #[test]
    fn timer_starts_once_and_resets() {
        let t0 = Instant::now();
        let mut timer = CueTimer::default();
        assert_eq!(timer.elapsed(t0), Duration::ZERO);

        timer.start(t0);
        timer.start(t0 + Duration::from_secs(5));
        assert_eq!(timer.elapsed(t0 + Duration::from_secs(10)), Duration::from_secs(10));

        timer.reset(t0 + Duration::from_secs(10));
        assert_eq!(timer.elapsed(t0 + Duration::from_secs(12)), Duration::from_secs(2));
    }
}
