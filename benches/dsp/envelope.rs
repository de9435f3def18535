//! Benchmarks for per-block envelope steps and curve sampling.

use std::hint::black_box;

use criterion::Criterion;
use drone_chance::chance::WeightCurve;
use drone_chance::dsp::{AmplitudeEnvelope, EnvelopeConfig, EnvelopeMode, InputFeedback};
use rand::{rngs::StdRng, SeedableRng};

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");
    let mut rng = StdRng::seed_from_u64(1);

    // Sustaining with the default curves
    let mut env = AmplitudeEnvelope::new(EnvelopeConfig::default(), EnvelopeMode::Sustaining, 0.3);
    group.bench_function("step_sustaining", |b| {
        b.iter(|| {
            env.step(&mut rng, black_box(None));
        })
    });

    // Every step redraws all three parameters
    let mut env = AmplitudeEnvelope::new(EnvelopeConfig::default(), EnvelopeMode::Sustaining, 0.3);
    group.bench_function("refresh", |b| {
        b.iter(|| {
            env.refresh(&mut rng);
        })
    });

    // Listening to a half-loud room
    let config = EnvelopeConfig::default().with_input_feedback(InputFeedback::Inverted);
    let mut env = AmplitudeEnvelope::new(config, EnvelopeMode::Sustaining, 0.3);
    group.bench_function("step_inverted_input", |b| {
        b.iter(|| {
            env.step(&mut rng, black_box(Some(0.5)));
        })
    });

    // The four-point drift curve
    let curve = EnvelopeConfig::default().drift_targets;
    group.bench_function("curve_sample", |b| {
        b.iter(|| black_box(curve.sample(&mut rng)))
    });

    let uniform = WeightCurve::uniform(0.0, 1.0).unwrap();
    group.bench_function("curve_sample_uniform", |b| {
        b.iter(|| black_box(uniform.sample(&mut rng)))
    });

    group.finish();
}
