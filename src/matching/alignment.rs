use crate::matching::scorer;
use crate::matching::types::{AlignmentAttempt, Pattern, SliceDetection, Tempo};
use crate::pitch::autocorrelate::{detect_pitch, WINDOW_SIZE};

/// Candidate start offsets tried, each one sixteenth note apart.
pub const NUM_OFFSETS: usize = 5;

/// Winning candidate plus the per-candidate scores kept for diagnostics.
pub struct Alignment {
    pub series: Vec<SliceDetection>,
    pub best_offset: usize,
    pub attempts: Vec<AlignmentAttempt>,
}

/// Extract one pitch estimate per slice, analyzing forward from each slice
/// position. Windows that start past the end of the recording are recorded
/// as out-of-bounds slices rather than truncating the series.
pub fn extract_series(
    samples: &[f32],
    sample_rate: f64,
    start_sample: usize,
    expected_slices: usize,
    tempo: Tempo,
) -> Vec<SliceDetection> {
    let slice_samples = (tempo.slice_interval() * sample_rate).round() as usize;
    let mut series = Vec::with_capacity(expected_slices);

    for slice_index in 0..expected_slices {
        let window_start = start_sample + slice_index * slice_samples;
        if window_start >= samples.len() {
            series.push(SliceDetection::out_of_bounds());
            continue;
        }
        let window_end = (window_start + WINDOW_SIZE).min(samples.len());
        series.push(detect_pitch(&samples[window_start..window_end], sample_rate));
    }
    series
}

/// Resolve unknown capture latency with a bounded content-based search.
///
/// The performer comes in one beat after the scheduled marker, but the true
/// first sample is smeared by audio round-trip latency. Rather than trying to
/// timestamp a transient, extract a candidate series at each of five
/// sixteenth-note offsets past the scheduled position and keep whichever one
/// scores best against the reference. Ties resolve to the lower offset.
pub fn search(
    samples: &[f32],
    sample_rate: f64,
    marker_time: f64,
    recording_start_time: f64,
    pattern: &Pattern,
    tempo: Tempo,
    reference: &[f64],
) -> Alignment {
    let beat_samples = (tempo.beat_duration() * sample_rate).round() as usize;
    let sixteenth_samples = (tempo.beat_duration() / 4.0 * sample_rate).round() as usize;
    let marker_offset = (marker_time - recording_start_time).max(0.0);
    let baseline = (marker_offset * sample_rate).round() as usize + beat_samples;

    let mut attempts = Vec::with_capacity(NUM_OFFSETS);
    let mut candidates = Vec::with_capacity(NUM_OFFSETS);

    for offset in 0..NUM_OFFSETS {
        let start_sample = baseline + offset * sixteenth_samples;
        let series = extract_series(samples, sample_rate, start_sample, reference.len(), tempo);
        let (avg_error, max_note_error) = scorer::series_errors(reference, &series, pattern, tempo);
        let worst_error = avg_error.max(max_note_error);

        attempts.push(AlignmentAttempt {
            offset,
            offset_ms: (offset * sixteenth_samples) as f64 / sample_rate * 1000.0,
            start_sample,
            avg_error,
            max_note_error,
            worst_error,
        });
        candidates.push(series);
    }

    let mut best_offset = 0;
    for (offset, attempt) in attempts.iter().enumerate().skip(1) {
        if attempt.worst_error < attempts[best_offset].worst_error {
            best_offset = offset;
        }
    }

    Alignment {
        series: candidates.swap_remove(best_offset),
        best_offset,
        attempts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::reference::generate_reference;
    use crate::matching::types::DetectReason;
    use std::f32::consts::PI;

    const SAMPLE_RATE: f64 = 44100.0;

    fn pattern(notes: &[&str], durations: &[f64]) -> Pattern {
        Pattern::new(
            notes.iter().map(|s| s.to_string()).collect(),
            durations.to_vec(),
        )
    }

    fn append_tone(buffer: &mut Vec<f32>, period: usize, len: usize) {
        let table: Vec<f32> = (0..period)
            .map(|i| 0.5 * (2.0 * PI * i as f32 / period as f32).sin())
            .collect();
        for i in 0..len {
            buffer.push(table[i % period]);
        }
    }

    /// Silence up to `performance_start`, then one (period, length) tone per
    /// pattern note, then a silent tail.
    fn synth_recording(performance_start: usize, notes: &[(usize, usize)]) -> Vec<f32> {
        let mut buffer = vec![0.0f32; performance_start];
        for &(period, len) in notes {
            append_tone(&mut buffer, period, len);
        }
        buffer.extend(std::iter::repeat(0.0).take(WINDOW_SIZE));
        buffer
    }

    #[test]
    fn test_extract_series_out_of_bounds() {
        let tempo = Tempo::new(90);
        let samples = vec![0.0f32; 1000];
        let series = extract_series(&samples, SAMPLE_RATE, 0, 4, tempo);
        assert_eq!(series.len(), 4);
        assert_eq!(series[0].reason, DetectReason::RmsTooLow);
        // Later slice positions fall past the end of the recording
        assert_eq!(series[1].reason, DetectReason::OutOfBounds);
        assert_eq!(series[3].reason, DetectReason::OutOfBounds);
    }

    #[test]
    fn test_selects_offset_two() {
        let tempo = Tempo::new(90);
        let p = pattern(&["A4", "B4"], &[2.0, 2.0]);
        let reference = generate_reference(&p, tempo).unwrap();

        let beat_samples = (tempo.beat_duration() * SAMPLE_RATE).round() as usize; // 29400
        let sixteenth = beat_samples / 4; // 7350
        let slice_samples = (tempo.slice_interval() * SAMPLE_RATE).round() as usize; // 14700

        // Marker 1.0s into the recording; performance begins two sixteenths
        // late, as if the capture path added ~333ms of latency.
        let marker_time = 1.0;
        let baseline = (marker_time * SAMPLE_RATE).round() as usize + beat_samples;
        let performance_start = baseline + 2 * sixteenth;

        // periods 100 and 89 -> 441.0 Hz and 495.5 Hz, near A4/B4
        let note_len = 4 * slice_samples;
        let samples = synth_recording(performance_start, &[(100, note_len), (89, note_len)]);

        let alignment = search(&samples, SAMPLE_RATE, marker_time, 0.0, &p, tempo, &reference);

        assert_eq!(alignment.best_offset, 2);
        assert_eq!(alignment.attempts.len(), NUM_OFFSETS);
        let best_error = alignment.attempts[2].worst_error;
        assert!(best_error < 1.0, "got {}", best_error);
        // Misaligned candidates read silence or the wrong note somewhere
        for i in [0, 1, 4] {
            assert!(
                alignment.attempts[i].worst_error > best_error + 1.0,
                "offset {} should score worse: {} vs {}",
                i,
                alignment.attempts[i].worst_error,
                best_error
            );
        }
        // The winning series is the one extracted at the winning offset
        assert_eq!(alignment.series.len(), reference.len());
        assert!(alignment.series.iter().all(|s| s.reason == DetectReason::Success));
    }

    #[test]
    fn test_tie_breaks_to_lower_offset() {
        // A sixteenth-note shift inside a held tone produces the same pitch
        // estimates, so offsets 2 and 3 tie; the lower index must win.
        let tempo = Tempo::new(90);
        let p = pattern(&["A4", "B4"], &[2.0, 2.0]);
        let reference = generate_reference(&p, tempo).unwrap();

        let beat_samples = (tempo.beat_duration() * SAMPLE_RATE).round() as usize;
        let sixteenth = beat_samples / 4;
        let slice_samples = (tempo.slice_interval() * SAMPLE_RATE).round() as usize;
        let baseline = (0.5 * SAMPLE_RATE).round() as usize + beat_samples;
        let performance_start = baseline + 2 * sixteenth;

        // Extend the final note by one sixteenth so offset 3 sees clean tone
        // through its last slice as well.
        let note_len = 4 * slice_samples;
        let samples =
            synth_recording(performance_start, &[(100, note_len), (89, note_len + sixteenth)]);

        let alignment = search(&samples, SAMPLE_RATE, 0.5, 0.0, &p, tempo, &reference);
        let attempts = &alignment.attempts;
        assert_eq!(
            attempts[2].worst_error, attempts[3].worst_error,
            "expected a tie between offsets 2 and 3"
        );
        assert_eq!(alignment.best_offset, 2);
    }

    #[test]
    fn test_recording_too_short_scores_least_bad() {
        // All candidates run off the end; the search still returns one.
        let tempo = Tempo::new(90);
        let p = pattern(&["A4"], &[2.0]);
        let reference = generate_reference(&p, tempo).unwrap();
        let samples = vec![0.0f32; 100];

        let alignment = search(&samples, SAMPLE_RATE, 0.0, 0.0, &p, tempo, &reference);
        assert_eq!(alignment.best_offset, 0);
        assert_eq!(alignment.series.len(), reference.len());
        assert!(alignment
            .series
            .iter()
            .all(|s| s.reason == DetectReason::OutOfBounds));
    }
}
