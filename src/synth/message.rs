#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::dsp::EnvelopeMode;

/// Intent sent from the control thread to the audio thread.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ControlMessage {
    /// Switch one voice's envelope mode, keeping its amplitude.
    SetMode { voice: usize, mode: EnvelopeMode },
    /// Switch every voice's envelope mode.
    SetAllModes { mode: EnvelopeMode },
    /// Restart one voice sustaining from a (usually negative) raw amplitude.
    FadeIn { voice: usize, from: f32 },
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<ControlMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<ControlMessage> {
    fn pop(&mut self) -> Option<ControlMessage> {
        Consumer::pop(self).ok()
    }
}

/// A receiver with nothing to say, for composers driven directly.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoMessages;

impl MessageReceiver for NoMessages {
    fn pop(&mut self) -> Option<ControlMessage> {
        None
    }
}
