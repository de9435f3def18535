//! Input level measurement for feeding a microphone back into the drone.

/// Half the peak-to-peak span of a block: `(|max| + |min|) / 2`.
///
/// A full-scale sine reads 1.0, silence reads 0.0. Empty blocks read 0.0.
pub fn peak_level(block: &[f32]) -> f32 {
    if block.is_empty() {
        return 0.0;
    }
    let (min, max) = block
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), &s| {
            (min.min(s), max.max(s))
        });
    (max.abs() + min.abs()) * 0.5
}

/// Interleaved frames reduced to the level of their first channel.
pub fn peak_level_interleaved(data: &[f32], channels: usize) -> f32 {
    if channels <= 1 {
        return peak_level(data);
    }
    let (min, max, seen) = data.iter().step_by(channels).fold(
        (f32::INFINITY, f32::NEG_INFINITY, false),
        |(min, max, _), &s| (min.min(s), max.max(s), true),
    );
    if !seen {
        return 0.0;
    }
    (max.abs() + min.abs()) * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_scale_sine_reads_one() {
        let block: Vec<f32> = (0..1024)
            .map(|i| (std::f32::consts::TAU * i as f32 / 64.0).sin())
            .collect();
        assert!((peak_level(&block) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn silence_and_empty_read_zero() {
        assert_eq!(peak_level(&[0.0; 64]), 0.0);
        assert_eq!(peak_level(&[]), 0.0);
        assert_eq!(peak_level_interleaved(&[], 2), 0.0);
    }

    #[test]
    fn offset_signal_averages_extremes() {
        assert!((peak_level(&[0.2, 0.6, 0.4]) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn interleaved_uses_first_channel() {
        let data = [0.5, 9.0, -0.5, 9.0];
        assert!((peak_level_interleaved(&data, 2) - 0.5).abs() < 1e-6);
    }
}
