pub mod chance; // Weighted event networks and weight curves
pub mod dsp;
pub mod error;
pub mod synth; // Voice ownership, mixing and control

pub use error::{ConfigError, ConfigResult, LogicError};

/// Samples per envelope step when driving a device: 1024 at 44.1kHz is ~23ms.
pub const DEFAULT_BLOCK_SIZE: usize = 1024;
