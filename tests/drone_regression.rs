use drone_chance::{
    chance::WeightCurve,
    dsp::{AmplitudeEnvelope, EnvelopeConfig, EnvelopeMode, Oscillator},
    synth::{Composer, PieceConfig},
};
use rand::{rngs::StdRng, SeedableRng};
use rustfft::{num_complex::Complex, FftPlanner};

fn full_volume() -> AmplitudeEnvelope {
    AmplitudeEnvelope::new(EnvelopeConfig::default(), EnvelopeMode::Sustaining, 1.0)
}

/// Frequency of the strongest FFT bin, and the bin width.
fn spectral_peak(samples: &[f32], sample_rate: f32) -> (f32, f32) {
    let n = samples.len();
    let mut buffer: Vec<Complex<f32>> = samples.iter().map(|&s| Complex::new(s, 0.0)).collect();
    FftPlanner::<f32>::new().plan_fft_forward(n).process(&mut buffer);

    let peak_bin = (1..n / 2)
        .max_by(|&a, &b| buffer[a].norm().total_cmp(&buffer[b].norm()))
        .unwrap();
    let bin_width = sample_rate / n as f32;
    (peak_bin as f32 * bin_width, bin_width)
}

#[test]
fn table_peaks_at_its_frequency() {
    for (frequency, sample_rate, repeat) in [
        (440.0, 44_100.0, 1),
        (440.0, 44_100.0, 10),
        (329.63, 44_100.0, 1),
        (659.26, 48_000.0, 10),
        (100.0, 8_000.0, 1),
    ] {
        let mut osc =
            Oscillator::with_repeat_factor(frequency, sample_rate, repeat, full_volume()).unwrap();
        let samples = osc.samples(8192);
        let (peak, bin_width) = spectral_peak(&samples, sample_rate);
        assert!(
            (peak - frequency).abs() <= bin_width,
            "{frequency} Hz at {sample_rate} Hz peaked at {peak} Hz (bin {bin_width} Hz)"
        );
    }
}

#[test]
fn successive_blocks_are_phase_continuous() {
    let mut whole = Oscillator::with_repeat_factor(466.16, 44_100.0, 10, full_volume()).unwrap();
    let mut split = Oscillator::with_repeat_factor(466.16, 44_100.0, 10, full_volume()).unwrap();

    let sizes = [1024, 1, 333, 4096, 7, 2048];
    let expected = whole.samples(sizes.iter().sum());
    let joined: Vec<f32> = sizes.iter().flat_map(|&n| split.samples(n)).collect();
    assert_eq!(joined, expected);
}

#[test]
fn seeded_composers_render_identically() {
    let piece = PieceConfig::second_hand();
    let build = || {
        let mut rng = StdRng::seed_from_u64(17);
        let mut voices = piece.build_voices(44_100.0, &mut rng).unwrap();
        for voice in &mut voices {
            voice.envelope_mut().fade_in_from(-0.01);
        }
        Composer::new(voices, 42)
    };
    let mut a = build();
    let mut b = build();

    let mut block_a = vec![0.0; 1024];
    let mut block_b = vec![0.0; 1024];
    for _ in 0..200 {
        a.produce_block(&mut block_a, None);
        b.produce_block(&mut block_b, None);
        assert_eq!(block_a, block_b);
    }
}

#[test]
fn paused_drone_is_silent_and_resumes_by_fading_in() {
    let piece = PieceConfig::second_hand();
    let mut rng = StdRng::seed_from_u64(3);
    let voices = piece.build_voices(44_100.0, &mut rng).unwrap();
    let mut composer = Composer::new(voices, 3);

    let mut block = vec![0.0; 1024];
    for _ in 0..10 {
        composer.produce_block(&mut block, None);
        assert!(block.iter().all(|&s| s == 0.0), "starts paused");
    }

    for voice in composer.voices_mut() {
        voice.envelope_mut().fade_in_from(-0.5);
    }
    composer.produce_block(&mut block, None);
    assert!(block.iter().all(|&s| s == 0.0), "fade-in starts below zero");
    for voice in composer.voices() {
        assert_eq!(voice.envelope().mode(), EnvelopeMode::Sustaining);
    }
}

#[test]
fn cue_p_fades_everything_out() {
    let piece = PieceConfig::second_hand();
    let mut rng = StdRng::seed_from_u64(8);
    let mut voices = piece.build_voices(44_100.0, &mut rng).unwrap();
    for voice in &mut voices {
        voice.envelope_mut().fade_in_from(0.3);
    }
    let mut composer = Composer::new(voices, 8);

    let mut block = vec![0.0; 1024];
    composer.produce_block(&mut block, None);
    assert!(block.iter().any(|&s| s != 0.0));

    for voice in 0..composer.voice_count() {
        composer.set_mode(voice, EnvelopeMode::Releasing);
    }
    let mut previous: Vec<f32> = (0..3).map(|v| composer.amplitude(v).unwrap()).collect();
    // At most 0.31 after the first block; 0.00015 per block reaches zero within 2067 blocks
    for _ in 0..2_100 {
        composer.produce_block(&mut block, None);
        for (voice, last) in previous.iter_mut().enumerate() {
            let now = composer.amplitude(voice).unwrap();
            assert!(now <= *last);
            *last = now;
        }
    }
    assert!(block.iter().all(|&s| s == 0.0));
}

#[test]
fn listening_piece_backs_off_in_a_loud_room() {
    let mut envelope = PieceConfig::listening().envelope;
    envelope.move_chances = WeightCurve::constant(0.0);
    envelope.initial_move_chance = 0.0;
    envelope.initial_change_rate = 0.001;
    envelope.initial_drift_target = 0.1;

    let render = |input_level: f32| {
        let voice = Oscillator::new(
            329.63,
            44_100.0,
            AmplitudeEnvelope::new(envelope.clone(), EnvelopeMode::Sustaining, 0.15),
        )
        .unwrap();
        let mut composer = Composer::new(vec![voice], 1);
        let mut block = vec![0.0; 256];
        for _ in 0..200 {
            composer.produce_block(&mut block, Some(input_level));
        }
        composer.amplitude(0).unwrap()
    };

    // Loud room: target is (1 - 1) + 0.1, so the voice settles near 0.1.
    let loud = render(1.0);
    assert!((loud - 0.1).abs() <= 0.001 + 1e-5, "got {loud}");

    // Quiet room: target is 1.1, held back only by the loudness ceiling at 0.2.
    let quiet = render(0.0);
    assert!(quiet > 0.19, "got {quiet}");
}
