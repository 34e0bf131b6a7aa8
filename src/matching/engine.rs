use crate::matching::types::{MatchResult, Pattern, Tempo};
use crate::matching::{alignment, reference, scorer};

/// Run one full question: build the reference series, align the recording,
/// and score the winning candidate against the tolerance.
///
/// `recording_start_time` and `marker_time` share the capture clock's time
/// base; the performer is expected one beat after the marker. Per-slice
/// detection failures are folded into the numeric error model; only
/// structurally invalid input is rejected.
#[allow(clippy::too_many_arguments)]
pub fn match_performance(
    pattern: &Pattern,
    tempo: Tempo,
    samples: &[f32],
    sample_rate: f64,
    recording_start_time: f64,
    marker_time: f64,
    tolerance: f64,
    with_diagnostics: bool,
) -> Result<MatchResult, String> {
    pattern.validate()?;
    if sample_rate <= 0.0 {
        return Err(format!("invalid sample rate {}", sample_rate));
    }
    if marker_time < recording_start_time {
        return Err(format!(
            "marker time {} precedes recording start {}",
            marker_time, recording_start_time
        ));
    }

    let reference = reference::generate_reference(pattern, tempo)?;
    let alignment = alignment::search(
        samples,
        sample_rate,
        marker_time,
        recording_start_time,
        pattern,
        tempo,
        &reference,
    );
    let score = scorer::score(
        &reference,
        &alignment.series,
        pattern,
        tempo,
        tolerance,
        with_diagnostics,
    );

    Ok(MatchResult {
        avg_error: score.avg_error,
        max_note_error: score.max_note_error,
        passed: score.passed,
        best_offset: alignment.best_offset,
        attempts: alignment.attempts,
        slices: score.slices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::types::DetectReason;
    use crate::pitch::autocorrelate::WINDOW_SIZE;
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

    #[test]
    fn test_well_aligned_performance_passes() {
        let tempo = Tempo::new(90);
        let p = pattern(&["A4", "B4"], &[2.0, 2.0]);

        let beat_samples = (tempo.beat_duration() * SAMPLE_RATE).round() as usize;
        let slice_samples = (tempo.slice_interval() * SAMPLE_RATE).round() as usize;
        let marker_time = 0.5;
        let performance_start = (marker_time * SAMPLE_RATE).round() as usize + beat_samples;

        let mut samples = vec![0.0f32; performance_start];
        append_tone(&mut samples, 100, 4 * slice_samples); // ~441 Hz for A4
        append_tone(&mut samples, 89, 4 * slice_samples); // ~495.5 Hz for B4
        samples.extend(std::iter::repeat(0.0).take(WINDOW_SIZE));

        let result = match_performance(
            &p, tempo, &samples, SAMPLE_RATE, 0.0, marker_time, 6.0, true,
        )
        .unwrap();

        assert!(result.passed, "avg={} maxNote={}", result.avg_error, result.max_note_error);
        assert!(result.avg_error < 1.0);
        assert!(result.max_note_error < 1.0);
        assert_eq!(result.best_offset, 0);
        assert_eq!(result.attempts.len(), 5);

        let slices = result.slices.expect("diagnostics requested");
        assert_eq!(slices.len(), 8);
        assert_eq!(slices[0].expected_note, "A4");
        assert_eq!(slices[7].expected_note, "B4");
        assert!(slices.iter().all(|s| s.reason == DetectReason::Success));
    }

    #[test]
    fn test_silent_recording_fails() {
        let tempo = Tempo::new(90);
        let p = pattern(&["A4", "B4"], &[2.0, 2.0]);
        let samples = vec![0.0f32; 8 * SAMPLE_RATE as usize];

        let result =
            match_performance(&p, tempo, &samples, SAMPLE_RATE, 0.0, 0.5, 6.0, false).unwrap();
        assert!(!result.passed);
        assert_eq!(result.avg_error, 10.0);
        assert!(result.slices.is_none());
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let tempo = Tempo::new(90);
        let p = pattern(&["A4", "nope"], &[2.0, 2.0]);
        let samples = vec![0.0f32; 1000];
        assert!(match_performance(&p, tempo, &samples, SAMPLE_RATE, 0.0, 0.5, 6.0, false).is_err());
    }

    #[test]
    fn test_marker_before_recording_start_is_rejected() {
        let tempo = Tempo::new(90);
        let p = pattern(&["A4"], &[2.0]);
        let samples = vec![0.0f32; 1000];
        assert!(match_performance(&p, tempo, &samples, SAMPLE_RATE, 1.0, 0.5, 6.0, false).is_err());
    }

    #[test]
    fn test_invalid_sample_rate_is_rejected() {
        let tempo = Tempo::new(90);
        let p = pattern(&["A4"], &[2.0]);
        assert!(match_performance(&p, tempo, &[], 0.0, 0.0, 0.5, 6.0, false).is_err());
    }
}
