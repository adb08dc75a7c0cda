//! Single-period sine wave generation.

use crate::error::{BinauralError, BinauralResult};

/// Generate one seamless period of a sine wave as signed PCM samples.
///
/// The period holds `floor(sample_rate / frequency_hz)` samples; sample `i`
/// is `sin(2π·i/N + shift) · full_scale`, truncated toward zero. Repeating
/// the returned buffer end to end is phase-continuous.
///
/// # Arguments
/// * `frequency_hz` - Tone frequency, must be positive and finite.
/// * `sample_rate` - Samples per second.
/// * `phase_shift_deg` - Phase offset in degrees applied to every sample.
/// * `full_scale` - Peak amplitude, `2^(bit_depth-1) - 1` for the target width.
///
/// # Returns
/// Returns `Ok(Vec<i32>)` with the period samples, or
/// `Err(InvalidParameter)` when the frequency is non-positive or too high
/// for the sample rate to fit a single whole sample.
pub fn generate_period(
    frequency_hz: f64,
    sample_rate: u32,
    phase_shift_deg: f64,
    full_scale: i32,
) -> BinauralResult<Vec<i32>> {
    if !frequency_hz.is_finite() || frequency_hz <= 0.0 {
        return Err(BinauralError::InvalidParameter(format!(
            "frequency must be positive, got {frequency_hz}"
        )));
    }

    let samples_per_period = (sample_rate as f64 / frequency_hz) as usize;
    if samples_per_period == 0 {
        return Err(BinauralError::InvalidParameter(format!(
            "sample rate {sample_rate} is too low for frequency {frequency_hz} Hz"
        )));
    }

    let shift_rad = phase_shift_deg.to_radians();
    let mut buffer = Vec::with_capacity(samples_per_period);
    for i in 0..samples_per_period {
        let angle = 2.0 * std::f64::consts::PI * i as f64 / samples_per_period as f64;
        // The cast truncates toward zero, matching integer PCM conversion.
        buffer.push(((angle + shift_rad).sin() * full_scale as f64) as i32);
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pcm::BitDepth;

    #[test]
    fn test_period_length_is_floor_of_ratio() {
        let cases = [(440.0, 44100, 100), (444.0, 44100, 99), (1.0, 44100, 44100)];
        for (freq, rate, expected) in cases {
            let period = generate_period(freq, rate, 0.0, 32767).unwrap();
            assert_eq!(period.len(), expected, "frequency {freq}");
        }
    }

    #[test]
    fn test_first_sample_without_shift_is_zero() {
        let period = generate_period(440.0, 44100, 0.0, 32767).unwrap();
        assert_eq!(period[0], 0);
    }

    #[test]
    fn test_quarter_period_reaches_full_scale() {
        // 4 samples per period puts sample 1 exactly at sin(π/2).
        let period = generate_period(11025.0, 44100, 0.0, 32767).unwrap();
        assert_eq!(period.len(), 4);
        assert_eq!(period[1], 32767);
    }

    #[test]
    fn test_phase_shift_rotates_waveform() {
        let base = generate_period(440.0, 44100, 0.0, 32767).unwrap();
        let shifted = generate_period(440.0, 44100, 180.0, 32767).unwrap();
        assert_eq!(base.len(), shifted.len());
        // sin(x + π) = -sin(x), up to one count of truncation slack.
        for (a, b) in base.iter().zip(shifted.iter()) {
            assert!((a + b).abs() <= 1, "a={a} b={b}");
        }
    }

    #[test]
    fn test_samples_bounded_by_full_scale() {
        let full_scale = BitDepth::Sixteen.full_scale();
        let period = generate_period(333.33, 48000, 90.0, full_scale).unwrap();
        for &s in &period {
            assert!(s.abs() <= full_scale);
        }
    }

    #[test]
    fn test_determinism() {
        let a = generate_period(49.96882653, 44100, 180.0, 32767).unwrap();
        let b = generate_period(49.96882653, 44100, 180.0, 32767).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_non_positive_frequency() {
        for freq in [0.0, -1.0, f64::NAN, f64::NEG_INFINITY] {
            let result = generate_period(freq, 44100, 0.0, 32767);
            assert!(matches!(
                result,
                Err(crate::error::BinauralError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_rejects_frequency_above_sample_rate() {
        // floor(8000 / 9000) == 0 samples per period.
        let result = generate_period(9000.0, 8000, 0.0, 32767);
        assert!(matches!(
            result,
            Err(crate::error::BinauralError::InvalidParameter(_))
        ));
    }
}
