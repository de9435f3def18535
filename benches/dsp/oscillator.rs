//! Benchmarks for wavetable reads.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use drone_chance::dsp::{AmplitudeEnvelope, EnvelopeConfig, EnvelopeMode, Oscillator};

use crate::BLOCK_SIZES;

fn sounding() -> AmplitudeEnvelope {
    AmplitudeEnvelope::new(EnvelopeConfig::default(), EnvelopeMode::Sustaining, 0.4)
}

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Single-cycle table, wraps every ~100 samples
        let mut osc = Oscillator::new(440.0, 44_100.0, sounding()).unwrap();
        group.bench_with_input(BenchmarkId::new("fill_short_table", size), &size, |b, _| {
            b.iter(|| {
                osc.fill_samples(black_box(&mut buffer));
            })
        });

        // Ten-period table as the listening piece uses
        let mut osc = Oscillator::with_repeat_factor(329.63, 44_100.0, 10, sounding()).unwrap();
        group.bench_with_input(BenchmarkId::new("fill_long_table", size), &size, |b, _| {
            b.iter(|| {
                osc.fill_samples(black_box(&mut buffer));
            })
        });

        // Accumulating into a shared mix buffer
        let mut osc = Oscillator::new(659.26, 44_100.0, sounding()).unwrap();
        group.bench_with_input(BenchmarkId::new("mix_into", size), &size, |b, _| {
            b.iter(|| {
                osc.mix_into(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
