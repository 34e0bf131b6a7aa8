pub const A4_HZ: f64 = 440.0;
pub const A4_MIDI: i32 = 69;

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Parse a note symbol like "A4", "C#5" or "Bb3" into a MIDI number.
pub fn note_to_midi(name: &str) -> Result<i32, String> {
    let mut chars = name.chars();
    let letter = chars
        .next()
        .ok_or_else(|| "empty note symbol".to_string())?;
    let semitone = match letter {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return Err(format!("invalid note letter in {:?}", name)),
    };

    let rest: String = chars.collect();
    let (alter, octave_str) = if let Some(stripped) = rest.strip_prefix('#') {
        (1, stripped)
    } else if let Some(stripped) = rest.strip_prefix('b') {
        (-1, stripped)
    } else {
        (0, rest.as_str())
    };

    if octave_str.is_empty() || !octave_str.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("invalid octave in {:?}", name));
    }
    let octave: i32 = octave_str
        .parse()
        .map_err(|_| format!("invalid octave in {:?}", name))?;

    Ok((octave + 1) * 12 + semitone + alter)
}

/// Equal-temperament frequency for a MIDI number.
pub fn midi_to_frequency(midi: i32) -> f64 {
    A4_HZ * 2f64.powf((midi - A4_MIDI) as f64 / 12.0)
}

pub fn note_to_frequency(name: &str) -> Result<f64, String> {
    note_to_midi(name).map(midi_to_frequency)
}

/// Nearest note symbol for a frequency, used in diagnostics output.
pub fn frequency_to_note(freq: f64) -> String {
    let midi = A4_MIDI as f64 + 12.0 * (freq / A4_HZ).log2();
    let rounded = midi.round() as i32;
    let name = NOTE_NAMES[rounded.rem_euclid(12) as usize];
    let octave = rounded.div_euclid(12) - 1;
    format!("{}{}", name, octave)
}
