use crate::matching::types::{DetectReason, SliceDetection};

/// Analysis window length in samples.
pub const WINDOW_SIZE: usize = 4096;

/// Practical range of the instrument: ~E2 to ~B6.
const MIN_FREQ_HZ: f64 = 80.0;
const MAX_FREQ_HZ: f64 = 2000.0;

const RMS_FLOOR: f64 = 0.005;
const CORRELATION_THRESHOLD: f64 = 0.9;

fn no_pitch(rms: f64, reason: DetectReason) -> SliceDetection {
    SliceDetection {
        frequency: None,
        rms,
        correlation: 0.0,
        reason,
    }
}

/// Estimate the fundamental frequency of one window via normalized
/// mean-absolute-difference autocorrelation.
///
/// A lag is accepted only if its correlation exceeds 0.9; among accepted lags
/// the highest correlation wins. Stateless: pure function of the window.
pub fn detect_pitch(samples: &[f32], sample_rate: f64) -> SliceDetection {
    if samples.is_empty() || sample_rate <= 0.0 {
        return no_pitch(0.0, DetectReason::RmsTooLow);
    }

    let mut energy = 0.0f64;
    for &s in samples {
        energy += s as f64 * s as f64;
    }
    let rms = (energy / samples.len() as f64).sqrt();
    if rms < RMS_FLOOR {
        return no_pitch(rms, DetectReason::RmsTooLow);
    }

    let min_lag = ((sample_rate / MAX_FREQ_HZ).floor() as usize).max(1);
    let max_lag = ((sample_rate / MIN_FREQ_HZ).floor() as usize)
        .min(samples.len().saturating_sub(1));

    let mut best_correlation = 0.0f64;
    let mut best_lag = 0usize;

    for lag in min_lag..=max_lag {
        let span = samples.len() - lag;
        let mut diff = 0.0f64;
        for i in 0..span {
            diff += (samples[i] as f64 - samples[i + lag] as f64).abs();
        }
        let correlation = 1.0 - diff / span as f64;

        if correlation > CORRELATION_THRESHOLD && correlation > best_correlation {
            best_correlation = correlation;
            best_lag = lag;
        }
    }

    if best_lag == 0 {
        return no_pitch(rms, DetectReason::NoCorrelation);
    }

    SliceDetection {
        frequency: Some(sample_rate / best_lag as f64),
        rms,
        correlation: best_correlation,
        reason: DetectReason::Success,
    }
}
