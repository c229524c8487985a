//! Signal normalization and FFT-accelerated cross-correlation.
//!
//! Correlation peaks are only comparable across differently-gained camera
//! microphones after z-score normalization, so both operations live together.

use realfft::RealFftPlanner;
use rustfft::num_complex::Complex;

/// Z-score normalize a signal: subtract the mean, divide by the standard
/// deviation of the mean-subtracted signal.
///
/// Returns `None` for an empty signal or one with no variance (a silent
/// track), where the division is undefined.
pub fn zscore_normalize(samples: &[f32]) -> Option<Vec<f64>> {
    if samples.is_empty() {
        return None;
    }

    let n = samples.len() as f64;
    let mean = samples.iter().map(|&s| s as f64).sum::<f64>() / n;
    let centered: Vec<f64> = samples.iter().map(|&s| s as f64 - mean).collect();
    let std_dev = (centered.iter().map(|&s| s * s).sum::<f64>() / n).sqrt();

    if std_dev == 0.0 || !std_dev.is_finite() {
        return None;
    }

    Some(centered.iter().map(|&s| s / std_dev).collect())
}

/// Full-mode cross-correlation of `signal` against `reference`, returning the
/// sample shift with maximum correlation.
///
/// Correlation values are computed for every integer lag in
/// `[-(M-1), N-1]` for a reference of length `N` and a signal of length `M`,
/// the same lag range as scipy's `mode="full"`. Ties resolve to the lowest
/// lag, matching argmax-of-first-maximum. A positive result means the signal's
/// content starts later in the reference, i.e. its camera started recording
/// later.
///
/// Both inputs must be non-empty; callers normalize (and thereby validate)
/// the signals first.
pub fn cross_correlate(reference: &[f64], signal: &[f64]) -> i64 {
    let n = reference.len();
    let m = signal.len();
    debug_assert!(n > 0 && m > 0);

    // Linear correlation via circular FFT correlation, zero-padded so the
    // two ends cannot wrap into each other.
    let fft_size = (n + m - 1).next_power_of_two();

    let mut planner = RealFftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(fft_size);
    let ifft = planner.plan_fft_inverse(fft_size);

    let mut ref_padded = fft.make_input_vec();
    let mut sig_padded = fft.make_input_vec();
    ref_padded[..n].copy_from_slice(reference);
    sig_padded[..m].copy_from_slice(signal);

    let mut ref_spectrum = fft.make_output_vec();
    let mut sig_spectrum = fft.make_output_vec();
    // Lengths are planner-provided, process cannot fail
    fft.process(&mut ref_padded, &mut ref_spectrum)
        .expect("forward FFT with planner-sized buffers");
    fft.process(&mut sig_padded, &mut sig_spectrum)
        .expect("forward FFT with planner-sized buffers");

    // Cross-power spectrum: REF * conj(SIG), so the inverse transform at
    // index k holds sum_n reference[n + k] * signal[n]
    let mut cross_power: Vec<Complex<f64>> = ref_spectrum
        .iter()
        .zip(sig_spectrum.iter())
        .map(|(r, s)| r * s.conj())
        .collect();

    let mut correlation = ifft.make_output_vec();
    ifft.process(&mut cross_power, &mut correlation)
        .expect("inverse FFT with planner-sized buffers");

    // Scan lags in ascending order; negative lags wrap to the tail of the
    // circular correlation. Strict comparison keeps the first maximum.
    let mut best_lag = -(m as i64 - 1);
    let mut best_value = f64::NEG_INFINITY;

    for lag in -(m as i64 - 1)..=(n as i64 - 1) {
        let idx = lag.rem_euclid(fft_size as i64) as usize;
        let value = correlation[idx] / fft_size as f64;
        if value > best_value {
            best_value = value;
            best_lag = lag;
        }
    }

    best_lag
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic noise-like test signal; a pure tone would leave the
    /// correlation peak ambiguous across periods.
    fn test_signal(len: usize) -> Vec<f32> {
        let mut state: u32 = 0x2545_f491;
        (0..len)
            .map(|_| {
                state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                (state >> 8) as f32 / (1 << 24) as f32 - 0.5
            })
            .collect()
    }

    #[test]
    fn test_zscore_produces_zero_mean_unit_std() {
        let signal = test_signal(4096);
        let normalized = zscore_normalize(&signal).unwrap();

        let n = normalized.len() as f64;
        let mean = normalized.iter().sum::<f64>() / n;
        let std_dev = (normalized.iter().map(|&s| (s - mean) * (s - mean)).sum::<f64>() / n).sqrt();

        assert!(mean.abs() < 1e-9);
        assert!((std_dev - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zscore_is_idempotent() {
        let signal = test_signal(4096);
        let once = zscore_normalize(&signal).unwrap();
        let once_f32: Vec<f32> = once.iter().map(|&s| s as f32).collect();
        let twice = zscore_normalize(&once_f32).unwrap();

        let n = twice.len() as f64;
        let mean = twice.iter().sum::<f64>() / n;
        let std_dev = (twice.iter().map(|&s| (s - mean) * (s - mean)).sum::<f64>() / n).sqrt();

        assert!(mean.abs() < 1e-6);
        assert!((std_dev - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zscore_rejects_degenerate_signals() {
        assert!(zscore_normalize(&[]).is_none());
        assert!(zscore_normalize(&[0.5; 1024]).is_none());
        assert!(zscore_normalize(&[0.0; 1024]).is_none());
    }

    #[test]
    fn test_self_correlation_peaks_at_zero() {
        let signal = zscore_normalize(&test_signal(8192)).unwrap();
        assert_eq!(cross_correlate(&signal, &signal), 0);
    }

    #[test]
    fn test_known_shift_recovery() {
        let full = test_signal(16384);
        let shift = 1234usize;

        // The delayed camera misses the first `shift` samples
        let reference = zscore_normalize(&full).unwrap();
        let delayed = zscore_normalize(&full[shift..]).unwrap();

        let lag = cross_correlate(&reference, &delayed);
        assert!((lag - shift as i64).abs() <= 1, "recovered lag {lag}");
    }

    #[test]
    fn test_negative_shift_recovery() {
        let full = test_signal(16384);
        let shift = 777usize;

        // The reference itself started late relative to the other clip
        let reference = zscore_normalize(&full[shift..]).unwrap();
        let early = zscore_normalize(&full).unwrap();

        let lag = cross_correlate(&reference, &early);
        assert!((lag + shift as i64).abs() <= 1, "recovered lag {lag}");
    }

    #[test]
    fn test_unequal_lengths() {
        let full = test_signal(10000);
        let reference = zscore_normalize(&full[..8000]).unwrap();
        let delayed = zscore_normalize(&full[500..7000]).unwrap();

        let lag = cross_correlate(&reference, &delayed);
        assert!((lag - 500).abs() <= 1, "recovered lag {lag}");
    }
}
