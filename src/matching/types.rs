use serde::{Deserialize, Serialize};

use crate::notes;

/// A melodic pattern: parallel arrays of note symbols and durations in beats.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Pattern {
    pub notes: Vec<String>,
    pub durations: Vec<f64>,
}

impl Pattern {
    pub fn new(notes: Vec<String>, durations: Vec<f64>) -> Self {
        Pattern { notes, durations }
    }

    /// Reject structurally invalid input before any analysis runs.
    pub fn validate(&self) -> Result<(), String> {
        if self.notes.len() != self.durations.len() {
            return Err(format!(
                "pattern has {} notes but {} durations",
                self.notes.len(),
                self.durations.len()
            ));
        }
        for (note, &duration) in self.notes.iter().zip(&self.durations) {
            notes::note_to_midi(note)?;
            if !duration.is_finite() || duration <= 0.0 {
                return Err(format!(
                    "note {} has non-positive duration {}",
                    note, duration
                ));
            }
        }
        Ok(())
    }
}

/// Tempo in beats per minute. Pitch is sampled on eighth-note slices.
#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct Tempo {
    pub bpm: u32,
}

impl Tempo {
    pub fn new(bpm: u32) -> Self {
        Tempo { bpm }
    }

    /// Seconds per beat.
    pub fn beat_duration(&self) -> f64 {
        60.0 / self.bpm as f64
    }

    /// Seconds per slice (half a beat).
    pub fn slice_interval(&self) -> f64 {
        self.beat_duration() / 2.0
    }

    /// Number of slices covered by a note of the given length in beats.
    pub fn slices_for(&self, duration_beats: f64) -> usize {
        (duration_beats * self.beat_duration() / self.slice_interval()).round() as usize
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DetectReason {
    Success,
    RmsTooLow,
    NoCorrelation,
    OutOfBounds,
}

/// Outcome of pitch detection on one analysis window.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SliceDetection {
    pub frequency: Option<f64>,
    pub rms: f64,
    pub correlation: f64,
    pub reason: DetectReason,
}

impl SliceDetection {
    /// Slice whose analysis window starts past the end of the recording.
    pub fn out_of_bounds() -> Self {
        SliceDetection {
            frequency: None,
            rms: 0.0,
            correlation: 0.0,
            reason: DetectReason::OutOfBounds,
        }
    }
}

/// One candidate start offset evaluated by the alignment search.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AlignmentAttempt {
    pub offset: usize,
    pub offset_ms: f64,
    pub start_sample: usize,
    pub avg_error: f64,
    pub max_note_error: f64,
    pub worst_error: f64,
}

/// Per-slice diagnostics for the external debug display.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SliceDiagnostic {
    pub start_time: f64,
    pub expected: f64,
    pub expected_note: String,
    pub detected: Option<f64>,
    pub error: f64,
    pub rms: f64,
    pub correlation: f64,
    pub reason: DetectReason,
}

/// Final verdict for one reference/recording comparison.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ErrorScore {
    pub avg_error: f64,
    pub max_note_error: f64,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slices: Option<Vec<SliceDiagnostic>>,
}

/// Full result of matching one question, including alignment diagnostics.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MatchResult {
    pub avg_error: f64,
    pub max_note_error: f64,
    pub passed: bool,
    pub best_offset: usize,
    pub attempts: Vec<AlignmentAttempt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slices: Option<Vec<SliceDiagnostic>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_validate_ok() {
        let pattern = Pattern::new(
            vec!["A4".to_string(), "C#5".to_string()],
            vec![2.0, 2.0],
        );
        assert!(pattern.validate().is_ok());
    }

    #[test]
    fn test_pattern_validate_mismatched_lengths() {
        let pattern = Pattern::new(vec!["A4".to_string()], vec![2.0, 2.0]);
        assert!(pattern.validate().is_err());
    }

    #[test]
    fn test_pattern_validate_bad_note() {
        let pattern = Pattern::new(vec!["X4".to_string()], vec![2.0]);
        assert!(pattern.validate().is_err());
    }

    #[test]
    fn test_pattern_validate_bad_duration() {
        let pattern = Pattern::new(vec!["A4".to_string()], vec![0.0]);
        assert!(pattern.validate().is_err());
        let pattern = Pattern::new(vec!["A4".to_string()], vec![-1.0]);
        assert!(pattern.validate().is_err());
        let pattern = Pattern::new(vec!["A4".to_string()], vec![f64::NAN]);
        assert!(pattern.validate().is_err());
    }

    #[test]
    fn test_tempo_derived_values() {
        let tempo = Tempo::new(90);
        assert!((tempo.beat_duration() - 60.0 / 90.0).abs() < 1e-12);
        assert!((tempo.slice_interval() - 30.0 / 90.0).abs() < 1e-12);
        // Two beats at any tempo is four eighth-note slices
        assert_eq!(tempo.slices_for(2.0), 4);
        assert_eq!(Tempo::new(60).slices_for(2.0), 4);
        assert_eq!(Tempo::new(120).slices_for(1.0), 2);
    }
}
