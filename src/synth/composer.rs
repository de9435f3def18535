use rand::{rngs::StdRng, SeedableRng};
#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer, RingBuffer};

use super::{
    message::{ControlMessage, MessageReceiver, NoMessages},
    meters::AmplitudeMeters,
};
use crate::dsp::{EnvelopeMode, Oscillator};

/// Capacity of the control inbox. Messages pushed while it is full are dropped.
pub const CONTROL_QUEUE_SIZE: usize = 256;

/// Owns every drone voice and renders their mix one block at a time.
///
/// All voice state lives here and is only touched from `produce_block`'s
/// thread. Other threads talk to it through the inbox and read the meters.
pub struct Composer<M = NoMessages> {
    voices: Vec<Oscillator>,
    inbox: M,
    rng: StdRng,
    meters: AmplitudeMeters,
}

impl Composer<NoMessages> {
    /// A composer driven directly, without a control inbox.
    pub fn new(voices: Vec<Oscillator>, seed: u64) -> Self {
        Self::with_inbox(voices, seed, NoMessages)
    }
}

#[cfg(feature = "rtrb")]
impl Composer<Consumer<ControlMessage>> {
    /// A composer plus the handle a control thread uses to steer it.
    pub fn with_handle(voices: Vec<Oscillator>, seed: u64) -> (Self, ComposerHandle) {
        let (tx, rx) = RingBuffer::<ControlMessage>::new(CONTROL_QUEUE_SIZE);
        let composer = Self::with_inbox(voices, seed, rx);
        let handle = ComposerHandle {
            tx,
            meters: composer.meters.clone(),
        };
        (composer, handle)
    }
}

impl<M: MessageReceiver> Composer<M> {
    pub fn with_inbox(voices: Vec<Oscillator>, seed: u64, inbox: M) -> Self {
        let meters = AmplitudeMeters::new(voices.len());
        let composer = Self {
            voices,
            inbox,
            rng: StdRng::seed_from_u64(seed),
            meters,
        };
        composer.publish_meters();
        composer
    }

    /// Render the summed, unclipped mix of every voice into `out`.
    ///
    /// Pending control messages are applied first, then each envelope steps
    /// once in voice order, then every voice is sampled. A block that comes out
    /// non-finite is replaced by silence rather than handed to the device.
    pub fn produce_block(&mut self, out: &mut [f32], input_level: Option<f32>) {
        self.drain_inbox();

        let input_level = input_level.filter(|level| level.is_finite());
        for voice in &mut self.voices {
            voice.envelope_mut().step(&mut self.rng, input_level);
        }

        out.fill(0.0);
        for voice in &mut self.voices {
            voice.mix_into(out);
        }

        if out.iter().any(|sample| !sample.is_finite()) {
            out.fill(0.0);
        }

        self.publish_meters();
    }

    fn drain_inbox(&mut self) {
        while let Some(msg) = self.inbox.pop() {
            self.apply(msg);
        }
    }

    fn apply(&mut self, msg: ControlMessage) {
        match msg {
            ControlMessage::SetMode { voice, mode } => self.set_mode(voice, mode),
            ControlMessage::SetAllModes { mode } => {
                for voice in &mut self.voices {
                    voice.envelope_mut().set_mode(mode);
                }
            }
            ControlMessage::FadeIn { voice, from } => {
                if let Some(voice) = self.voices.get_mut(voice) {
                    voice.envelope_mut().fade_in_from(from);
                }
            }
        }
    }

    fn publish_meters(&self) {
        for (index, voice) in self.voices.iter().enumerate() {
            self.meters.publish(index, voice.envelope().amplitude());
        }
    }

    /// Set one voice's mode immediately. Unknown voices are ignored.
    pub fn set_mode(&mut self, voice: usize, mode: EnvelopeMode) {
        if let Some(voice) = self.voices.get_mut(voice) {
            voice.envelope_mut().set_mode(mode);
        }
    }

    /// Audible amplitude of one voice.
    pub fn amplitude(&self, voice: usize) -> Option<f32> {
        self.voices.get(voice).map(|v| v.envelope().amplitude())
    }

    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }

    pub fn voices(&self) -> &[Oscillator] {
        &self.voices
    }

    pub fn voices_mut(&mut self) -> &mut [Oscillator] {
        &mut self.voices
    }

    pub fn meters(&self) -> &AmplitudeMeters {
        &self.meters
    }
}

/// Control-thread side of a [`Composer`].
///
/// Every method returns `false` when the inbox is full and the message was
/// dropped.
#[cfg(feature = "rtrb")]
pub struct ComposerHandle {
    tx: Producer<ControlMessage>,
    meters: AmplitudeMeters,
}

#[cfg(feature = "rtrb")]
impl ComposerHandle {
    pub fn send(&mut self, msg: ControlMessage) -> bool {
        self.tx.push(msg).is_ok()
    }

    pub fn set_mode(&mut self, voice: usize, mode: EnvelopeMode) -> bool {
        self.send(ControlMessage::SetMode { voice, mode })
    }

    pub fn set_all_modes(&mut self, mode: EnvelopeMode) -> bool {
        self.send(ControlMessage::SetAllModes { mode })
    }

    pub fn fade_in(&mut self, voice: usize, from: f32) -> bool {
        self.send(ControlMessage::FadeIn { voice, from })
    }

    /// Amplitude of `voice` as of the last rendered block.
    pub fn amplitude(&self, voice: usize) -> Option<f32> {
        self.meters.amplitude(voice)
    }

    pub fn meters(&self) -> &AmplitudeMeters {
        &self.meters
    }

    pub fn voice_count(&self) -> usize {
        self.meters.len()
    }
}
