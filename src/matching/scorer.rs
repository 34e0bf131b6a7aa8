use crate::matching::types::{ErrorScore, Pattern, SliceDetection, SliceDiagnostic, Tempo};
use crate::notes;

/// Per-slice penalty when exactly one side is silent; also the per-slice cap.
const MAX_SLICE_ERROR: f64 = 10.0;

/// Average error reported when the comparison span is empty.
const EMPTY_SPAN_ERROR: f64 = 100.0;

/// Detected frequencies whose reference ratio falls in this band are treated
/// as 1/3-subharmonic detector artifacts and multiplied back up.
const SUBHARMONIC_BAND: (f64, f64) = (2.85, 3.15);

/// Error for one slice in scaled cents, capped at `MAX_SLICE_ERROR`.
fn slice_error(reference: Option<f64>, recorded: Option<f64>) -> f64 {
    match (reference, recorded) {
        (None, None) => 0.0,
        (None, Some(_)) | (Some(_), None) => MAX_SLICE_ERROR,
        (Some(ref_freq), Some(rec_freq)) => {
            let ratio = ref_freq / rec_freq;
            let corrected = if ratio >= SUBHARMONIC_BAND.0 && ratio <= SUBHARMONIC_BAND.1 {
                rec_freq * 3.0
            } else {
                rec_freq
            };

            // Fold into the octave nearest the reference, then measure cents.
            let octave_shift = (ref_freq / corrected).log2().round();
            let shifted = corrected * 2f64.powf(octave_shift);
            let cents = (1200.0 * (shifted / ref_freq).log2()).abs();
            (cents / 12.0).min(MAX_SLICE_ERROR)
        }
    }
}

/// Worst per-note average, grouping slices with the same slice-count formula
/// used to build the reference series.
fn max_note_error(slice_errors: &[f64], pattern: &Pattern, tempo: Tempo) -> f64 {
    let mut max_error = 0.0f64;
    let mut slice_index = 0usize;

    for &duration in &pattern.durations {
        let mut total = 0.0;
        let mut processed = 0usize;
        for _ in 0..tempo.slices_for(duration) {
            if slice_index >= slice_errors.len() {
                break;
            }
            total += slice_errors[slice_index];
            slice_index += 1;
            processed += 1;
        }
        if processed > 0 {
            max_error = max_error.max(total / processed as f64);
        }
    }
    max_error
}

/// Average and worst-note error over the shared span of the two series.
/// Used both to rank alignment candidates and for the final verdict.
pub fn series_errors(
    reference: &[f64],
    recorded: &[SliceDetection],
    pattern: &Pattern,
    tempo: Tempo,
) -> (f64, f64) {
    let min_len = reference.len().min(recorded.len());
    let slice_errors: Vec<f64> = (0..min_len)
        .map(|i| slice_error(Some(reference[i]), recorded[i].frequency))
        .collect();

    let avg_error = if min_len > 0 {
        slice_errors.iter().sum::<f64>() / min_len as f64
    } else {
        EMPTY_SPAN_ERROR
    };
    (avg_error, max_note_error(&slice_errors, pattern, tempo))
}

/// Score a recorded series against the reference. Passing requires both the
/// average and the worst note to clear the tolerance (inclusive), so a few
/// easy notes cannot mask one badly missed note.
pub fn score(
    reference: &[f64],
    recorded: &[SliceDetection],
    pattern: &Pattern,
    tempo: Tempo,
    tolerance: f64,
    with_diagnostics: bool,
) -> ErrorScore {
    let (avg_error, max_note_error) = series_errors(reference, recorded, pattern, tempo);
    let passed = avg_error <= tolerance && max_note_error <= tolerance;
    let slices = if with_diagnostics {
        Some(diagnostics(reference, recorded, tempo))
    } else {
        None
    };

    ErrorScore {
        avg_error,
        max_note_error,
        passed,
        slices,
    }
}

fn diagnostics(
    reference: &[f64],
    recorded: &[SliceDetection],
    tempo: Tempo,
) -> Vec<SliceDiagnostic> {
    let min_len = reference.len().min(recorded.len());
    (0..min_len)
        .map(|i| {
            let detection = &recorded[i];
            SliceDiagnostic {
                start_time: i as f64 * tempo.slice_interval(),
                expected: reference[i],
                expected_note: notes::frequency_to_note(reference[i]),
                detected: detection.frequency,
                error: slice_error(Some(reference[i]), detection.frequency),
                rms: detection.rms,
                correlation: detection.correlation,
                reason: detection.reason,
            }
        })
        .collect()
}
