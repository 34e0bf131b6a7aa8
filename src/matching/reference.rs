use crate::matching::types::{Pattern, Tempo};
use crate::notes;

/// Expand a pattern into one equal-temperament frequency per eighth-note
/// slice, in pattern order. Deterministic for a fixed pattern and tempo.
pub fn generate_reference(pattern: &Pattern, tempo: Tempo) -> Result<Vec<f64>, String> {
    pattern.validate()?;

    let mut series = Vec::new();
    for (note, &duration) in pattern.notes.iter().zip(&pattern.durations) {
        let frequency = notes::note_to_frequency(note)?;
        for _ in 0..tempo.slices_for(duration) {
            series.push(frequency);
        }
    }
    Ok(series)
}
