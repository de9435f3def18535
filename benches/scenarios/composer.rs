//! Benchmarks for complete composer blocks.
//!
//! One iteration is one envelope step per voice plus the full mix, which is
//! the work the audio callback does between device buffers.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use drone_chance::synth::{Composer, PieceConfig};
use rand::{rngs::StdRng, SeedableRng};

use crate::BLOCK_SIZES;

fn playing(piece: &PieceConfig) -> Composer {
    let mut rng = StdRng::seed_from_u64(7);
    let mut voices = piece.build_voices(44_100.0, &mut rng).unwrap();
    for voice in &mut voices {
        voice.envelope_mut().fade_in_from(0.2);
    }
    Composer::new(voices, 7)
}

pub fn bench_composer(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/composer");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // === SECOND HAND ===
        // Three single-cycle voices, input ignored
        let mut composer = playing(&PieceConfig::second_hand());
        group.bench_with_input(BenchmarkId::new("second_hand", size), &size, |b, _| {
            b.iter(|| {
                composer.produce_block(black_box(&mut buffer), black_box(None));
            })
        });

        // === LISTENING ===
        // Ten-period tables, envelopes steered by the input level
        let mut composer = playing(&PieceConfig::listening());
        group.bench_with_input(BenchmarkId::new("listening", size), &size, |b, _| {
            b.iter(|| {
                composer.produce_block(black_box(&mut buffer), black_box(Some(0.3)));
            })
        });
    }

    group.finish();
}
