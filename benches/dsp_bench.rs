//! Benchmarks for the drone's DSP primitives, the event network, and full
//! block renders.
//!
//! Run with: cargo bench
//!
//! The drone renders one block of 1024 samples per envelope step, so the
//! deadline that matters is the block at the device sample rate:
//!   - 1024 samples at 44.1kHz = 23.2ms
//!   - 1024 samples at 48kHz   = 21.3ms
//!
//! Benchmark groups:
//!   - dsp/*        Oscillator table reads, envelope steps, curve sampling
//!   - scenarios/*  Composer blocks for each piece, event network walks

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Block sizes worth comparing; 1024 is what the composer actually renders.
pub const BLOCK_SIZES: &[usize] = &[256, 512, 1024, 2048];

criterion_group!(
    benches,
    // Low-level DSP primitives
    dsp::bench_oscillator,
    dsp::bench_envelope,
    // Real-world scenarios
    scenarios::bench_composer,
    scenarios::bench_network,
);
criterion_main!(benches);
