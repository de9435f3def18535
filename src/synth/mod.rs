// Purpose: voice ownership, per-block mixing, and control between threads.
// This layer sits above the dsp primitives and is what the audio callback calls.

pub mod composer;
pub mod message;
pub mod meters;
pub mod piece;
pub mod stream;

#[cfg(feature = "rtrb")]
pub use composer::ComposerHandle;
pub use composer::{Composer, CONTROL_QUEUE_SIZE};
pub use message::{ControlMessage, MessageReceiver, NoMessages};
pub use meters::{AmplitudeMeters, SharedLevel};
pub use piece::{pitch_class_frequency, PieceConfig, PIECE_NAMES};
pub use stream::BlockStream;
