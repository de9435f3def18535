//! Weighted randomness: event networks and weight curves.
//!
//! Nothing here runs under a real-time deadline except [`curve::WeightCurve`],
//! which envelopes sample from inside the audio callback.

/// Injectable integer draws for weighted selection.
pub mod draw;
/// Piecewise-linear weighted random values.
pub mod curve;
/// Weighted directed graph walked as a Markov chain.
pub mod network;
/// Ready-made play/rest networks.
pub mod prebuilt;
/// Data description of a network.
pub mod topology;

pub use curve::WeightCurve;
pub use draw::WeightedDraw;
pub use network::{Network, Node, NodeId};
pub use topology::{LinkSpec, NetworkSpec, NodeSpec};
