//! Real-world scenario benchmarks.
//!
//! Full composer blocks for each preset piece, and event network walks of
//! the length a performance would use.

mod composer;
mod network;

pub use composer::bench_composer;
pub use network::bench_network;
