use serde::Serialize;

use crate::matching::types::Pattern;

/// A pattern in the built-in bank, referencing static data.
#[derive(Clone, Copy, Debug)]
pub struct PatternSpec {
    pub notes: &'static [&'static str],
    pub durations: &'static [f64],
}

impl PatternSpec {
    pub fn to_pattern(self) -> Pattern {
        Pattern::new(
            self.notes.iter().map(|s| s.to_string()).collect(),
            self.durations.to_vec(),
        )
    }
}

/// One difficulty level within a category.
#[derive(Serialize, Clone, Debug)]
pub struct LevelInfo {
    pub level: u8,
    pub pattern_count: usize,
}

/// Category listing for the front-end level picker.
#[derive(Serialize, Clone, Debug)]
pub struct CategoryInfo {
    pub name: &'static str,
    pub levels: Vec<LevelInfo>,
}

macro_rules! p {
    ([$($note:expr),+ $(,)?], [$($dur:expr),+ $(,)?]) => {
        PatternSpec {
            notes: &[$($note),+],
            durations: &[$($dur as f64),+],
        }
    };
}

const OPEN_STRINGS_L1: &[PatternSpec] = &[
    p!(["G3"], [4]),
    p!(["D4"], [4]),
    p!(["A4"], [4]),
    p!(["E5"], [4]),
];

const SEE_SAW_L1: &[PatternSpec] = &[
    p!(["A4", "A4"], [2, 2]),
    p!(["B4", "B4"], [2, 2]),
    p!(["E5", "E5"], [2, 2]),
];

const SEE_SAW_L2: &[PatternSpec] = &[
    p!(["A4", "A4"], [2, 2]),
    p!(["A4", "B4"], [2, 2]),
    p!(["A4", "E5"], [2, 2]),
    p!(["B4", "B4"], [2, 2]),
    p!(["B4", "A4"], [2, 2]),
    p!(["B4", "E5"], [2, 2]),
    p!(["E5", "E5"], [2, 2]),
    p!(["E5", "A4"], [2, 2]),
    p!(["E5", "B4"], [2, 2]),
];

const SEE_SAW_L3: &[PatternSpec] = &[
    p!(["A4", "A4", "A4"], [1, 1, 2]),
    p!(["A4", "B4", "E5"], [1, 1, 2]),
    p!(["B4", "B4", "A4"], [1, 1, 2]),
    p!(["E5", "E5", "B4"], [1, 1, 2]),
    p!(["A4", "A4", "B4"], [1, 2, 1]),
    p!(["B4", "B4", "E5"], [1, 2, 1]),
    p!(["E5", "A4", "A4"], [1, 2, 1]),
    p!(["A4", "E5", "A4"], [1, 2, 1]),
    p!(["A4", "B4", "A4"], [2, 1, 1]),
    p!(["B4", "A4", "E5"], [2, 1, 1]),
    p!(["E5", "E5", "A4"], [2, 1, 1]),
    p!(["A4", "A4", "E5"], [2, 1, 1]),
];

const SEE_SAW_L4: &[PatternSpec] = &[
    p!(["A4", "A4", "B4", "E5"], [1, 1, 1, 1]),
    p!(["A4", "B4", "A4", "E5"], [1, 1, 1, 1]),
    p!(["A4", "B4", "B4", "A4"], [1, 1, 1, 1]),
    p!(["A4", "E5", "B4", "A4"], [1, 1, 1, 1]),
    p!(["B4", "B4", "A4", "E5"], [1, 1, 1, 1]),
    p!(["B4", "E5", "A4", "B4"], [1, 1, 1, 1]),
    p!(["B4", "E5", "E5", "A4"], [1, 1, 1, 1]),
    p!(["E5", "A4", "B4", "A4"], [1, 1, 1, 1]),
    p!(["E5", "E5", "A4", "B4"], [1, 1, 1, 1]),
];

const TWINKLE_L1: &[PatternSpec] = &[
    p!(["A4", "B4"], [2, 2]),
    p!(["A4", "C#5"], [2, 2]),
    p!(["A4", "D5"], [2, 2]),
    p!(["A4", "E5"], [2, 2]),
    p!(["A4", "F#5"], [2, 2]),
];

const TWINKLE_L2: &[PatternSpec] = &[
    p!(["A4", "A4"], [2, 2]),
    p!(["B4", "B4"], [2, 2]),
    p!(["C#5", "C#5"], [2, 2]),
    p!(["D5", "D5"], [2, 2]),
    p!(["E5", "E5"], [2, 2]),
    p!(["F#5", "F#5"], [2, 2]),
];

const TWINKLE_L3: &[PatternSpec] = &[
    p!(["A4", "E5"], [2, 2]),
    p!(["E5", "F#5"], [2, 2]),
    p!(["F#5", "E5"], [2, 2]),
    p!(["E5", "D5"], [2, 2]),
    p!(["D5", "C#5"], [2, 2]),
    p!(["C#5", "B4"], [2, 2]),
    p!(["B4", "A4"], [2, 2]),
];

const TWINKLE_L4: &[PatternSpec] = &[
    p!(["A4", "A4", "E5"], [1, 1, 2]),
    p!(["A4", "A4", "E5"], [1, 2, 1]),
    p!(["A4", "A4", "E5"], [2, 1, 1]),
    p!(["E5", "F#5", "E5"], [1, 1, 2]),
    p!(["E5", "F#5", "E5"], [1, 2, 1]),
    p!(["E5", "F#5", "E5"], [2, 1, 1]),
    p!(["D5", "C#5", "B4"], [1, 1, 2]),
    p!(["D5", "C#5", "B4"], [1, 2, 1]),
    p!(["D5", "C#5", "B4"], [2, 1, 1]),
    p!(["F#5", "E5", "D5"], [1, 1, 2]),
    p!(["F#5", "E5", "D5"], [1, 2, 1]),
    p!(["F#5", "E5", "D5"], [2, 1, 1]),
    p!(["C#5", "B4", "A4"], [1, 1, 2]),
    p!(["C#5", "B4", "A4"], [1, 2, 1]),
    p!(["C#5", "B4", "A4"], [2, 1, 1]),
    p!(["E5", "D5", "C#5"], [1, 1, 2]),
    p!(["E5", "D5", "C#5"], [1, 2, 1]),
    p!(["E5", "D5", "C#5"], [2, 1, 1]),
];

const TWINKLE_L5: &[PatternSpec] = &[
    p!(["A4", "A4", "E5", "E5"], [1, 1, 1, 1]),
    p!(["E5", "E5", "F#5", "F#5"], [1, 1, 1, 1]),
    p!(["F#5", "F#5", "E5", "E5"], [1, 1, 1, 1]),
    p!(["D5", "D5", "C#5", "C#5"], [1, 1, 1, 1]),
    p!(["C#5", "C#5", "B4", "B4"], [1, 1, 1, 1]),
    p!(["B4", "B4", "A4", "A4"], [1, 1, 1, 1]),
    p!(["A4", "E5", "F#5", "E5"], [1, 1, 1, 1]),
    p!(["E5", "F#5", "E5", "D5"], [1, 1, 1, 1]),
    p!(["D5", "C#5", "B4", "A4"], [1, 1, 1, 1]),
    p!(["E5", "D5", "C#5", "B4"], [1, 1, 1, 1]),
];

const LIGHTLY_ROW_L1: &[PatternSpec] = &[
    p!(["E5", "A4"], [2, 2]),
    p!(["E5", "B4"], [2, 2]),
    p!(["E5", "C#5"], [2, 2]),
    p!(["E5", "D5"], [2, 2]),
    p!(["E5", "E5"], [2, 2]),
];

const LIGHTLY_ROW_L2: &[PatternSpec] = &[
    p!(["A4", "C#5"], [2, 2]),
    p!(["B4", "D5"], [2, 2]),
    p!(["C#5", "E5"], [2, 2]),
    p!(["C#5", "A4"], [2, 2]),
    p!(["D5", "B4"], [2, 2]),
    p!(["E5", "C#5"], [2, 2]),
    p!(["B4", "C#5"], [2, 2]),
    p!(["C#5", "D5"], [2, 2]),
    p!(["D5", "E5"], [2, 2]),
];

const LIGHTLY_ROW_L3: &[PatternSpec] = &[
    p!(["A4", "C#5", "A4"], [1, 1, 2]),
    p!(["A4", "C#5", "A4"], [1, 2, 1]),
    p!(["A4", "C#5", "A4"], [2, 1, 1]),
    p!(["C#5", "A4", "C#5"], [1, 1, 2]),
    p!(["C#5", "A4", "C#5"], [1, 2, 1]),
    p!(["C#5", "A4", "C#5"], [2, 1, 1]),
    p!(["B4", "D5", "B4"], [1, 1, 2]),
    p!(["B4", "D5", "B4"], [1, 2, 1]),
    p!(["B4", "D5", "B4"], [2, 1, 1]),
    p!(["D5", "B4", "D5"], [1, 1, 2]),
    p!(["D5", "B4", "D5"], [1, 2, 1]),
    p!(["D5", "B4", "D5"], [2, 1, 1]),
    p!(["C#5", "E5", "C#5"], [1, 1, 2]),
    p!(["C#5", "E5", "C#5"], [1, 2, 1]),
    p!(["C#5", "E5", "C#5"], [2, 1, 1]),
    p!(["E5", "C#5", "E5"], [1, 1, 2]),
    p!(["E5", "C#5", "E5"], [1, 2, 1]),
    p!(["E5", "C#5", "E5"], [2, 1, 1]),
    p!(["B4", "C#5", "D5"], [1, 1, 2]),
    p!(["B4", "C#5", "D5"], [1, 2, 1]),
    p!(["B4", "C#5", "D5"], [2, 1, 1]),
    p!(["C#5", "D5", "E5"], [1, 1, 2]),
    p!(["C#5", "D5", "E5"], [1, 2, 1]),
    p!(["C#5", "D5", "E5"], [2, 1, 1]),
    p!(["A4", "C#5", "E5"], [1, 1, 2]),
    p!(["A4", "C#5", "E5"], [1, 2, 1]),
    p!(["A4", "C#5", "E5"], [2, 1, 1]),
];

const LIGHTLY_ROW_L4: &[PatternSpec] = &[
    p!(["A4", "C#5", "A4", "C#5"], [1, 1, 1, 1]),
    p!(["A4", "C#5", "A4", "E5"], [1, 1, 1, 1]),
    p!(["A4", "C#5", "E5", "A4"], [1, 1, 1, 1]),
    p!(["A4", "C#5", "E5", "C#5"], [1, 1, 1, 1]),
    p!(["A4", "E5", "A4", "C#5"], [1, 1, 1, 1]),
    p!(["A4", "E5", "A4", "E5"], [1, 1, 1, 1]),
    p!(["A4", "E5", "C#5", "A4"], [1, 1, 1, 1]),
    p!(["A4", "E5", "C#5", "E5"], [1, 1, 1, 1]),
    p!(["C#5", "A4", "C#5", "A4"], [1, 1, 1, 1]),
    p!(["C#5", "A4", "C#5", "E5"], [1, 1, 1, 1]),
    p!(["C#5", "A4", "E5", "A4"], [1, 1, 1, 1]),
    p!(["C#5", "A4", "E5", "C#5"], [1, 1, 1, 1]),
    p!(["C#5", "E5", "A4", "C#5"], [1, 1, 1, 1]),
    p!(["C#5", "E5", "A4", "E5"], [1, 1, 1, 1]),
    p!(["C#5", "E5", "C#5", "A4"], [1, 1, 1, 1]),
    p!(["C#5", "E5", "C#5", "E5"], [1, 1, 1, 1]),
    p!(["E5", "A4", "C#5", "A4"], [1, 1, 1, 1]),
    p!(["E5", "A4", "C#5", "E5"], [1, 1, 1, 1]),
    p!(["E5", "A4", "E5", "A4"], [1, 1, 1, 1]),
    p!(["E5", "A4", "E5", "C#5"], [1, 1, 1, 1]),
    p!(["E5", "C#5", "A4", "C#5"], [1, 1, 1, 1]),
    p!(["E5", "C#5", "A4", "E5"], [1, 1, 1, 1]),
    p!(["E5", "C#5", "E5", "A4"], [1, 1, 1, 1]),
    p!(["E5", "C#5", "E5", "C#5"], [1, 1, 1, 1]),
    p!(["B4", "C#5", "B4", "C#5"], [1, 1, 1, 1]),
    p!(["B4", "C#5", "B4", "D5"], [1, 1, 1, 1]),
    p!(["B4", "C#5", "D5", "B4"], [1, 1, 1, 1]),
    p!(["B4", "C#5", "D5", "C#5"], [1, 1, 1, 1]),
    p!(["B4", "D5", "B4", "C#5"], [1, 1, 1, 1]),
    p!(["B4", "D5", "B4", "D5"], [1, 1, 1, 1]),
    p!(["B4", "D5", "C#5", "B4"], [1, 1, 1, 1]),
    p!(["B4", "D5", "C#5", "D5"], [1, 1, 1, 1]),
    p!(["C#5", "B4", "C#5", "B4"], [1, 1, 1, 1]),
    p!(["C#5", "B4", "C#5", "D5"], [1, 1, 1, 1]),
    p!(["C#5", "B4", "D5", "B4"], [1, 1, 1, 1]),
    p!(["C#5", "B4", "D5", "C#5"], [1, 1, 1, 1]),
    p!(["C#5", "D5", "B4", "C#5"], [1, 1, 1, 1]),
    p!(["C#5", "D5", "B4", "D5"], [1, 1, 1, 1]),
    p!(["C#5", "D5", "C#5", "B4"], [1, 1, 1, 1]),
    p!(["C#5", "D5", "C#5", "D5"], [1, 1, 1, 1]),
    p!(["D5", "B4", "C#5", "B4"], [1, 1, 1, 1]),
    p!(["D5", "B4", "C#5", "D5"], [1, 1, 1, 1]),
    p!(["D5", "B4", "D5", "B4"], [1, 1, 1, 1]),
    p!(["D5", "B4", "D5", "C#5"], [1, 1, 1, 1]),
    p!(["D5", "C#5", "B4", "C#5"], [1, 1, 1, 1]),
    p!(["D5", "C#5", "B4", "D5"], [1, 1, 1, 1]),
    p!(["D5", "C#5", "D5", "B4"], [1, 1, 1, 1]),
    p!(["D5", "C#5", "D5", "C#5"], [1, 1, 1, 1]),
    p!(["C#5", "D5", "C#5", "E5"], [1, 1, 1, 1]),
    p!(["C#5", "D5", "E5", "C#5"], [1, 1, 1, 1]),
    p!(["C#5", "D5", "E5", "D5"], [1, 1, 1, 1]),
    p!(["C#5", "E5", "C#5", "D5"], [1, 1, 1, 1]),
    p!(["C#5", "E5", "D5", "C#5"], [1, 1, 1, 1]),
    p!(["C#5", "E5", "D5", "E5"], [1, 1, 1, 1]),
    p!(["D5", "C#5", "D5", "E5"], [1, 1, 1, 1]),
    p!(["D5", "C#5", "E5", "C#5"], [1, 1, 1, 1]),
    p!(["D5", "C#5", "E5", "D5"], [1, 1, 1, 1]),
    p!(["D5", "E5", "C#5", "D5"], [1, 1, 1, 1]),
    p!(["D5", "E5", "C#5", "E5"], [1, 1, 1, 1]),
    p!(["D5", "E5", "D5", "C#5"], [1, 1, 1, 1]),
    p!(["D5", "E5", "D5", "E5"], [1, 1, 1, 1]),
    p!(["E5", "C#5", "D5", "C#5"], [1, 1, 1, 1]),
    p!(["E5", "C#5", "D5", "E5"], [1, 1, 1, 1]),
    p!(["E5", "D5", "C#5", "D5"], [1, 1, 1, 1]),
    p!(["E5", "D5", "C#5", "E5"], [1, 1, 1, 1]),
    p!(["E5", "D5", "E5", "C#5"], [1, 1, 1, 1]),
    p!(["E5", "D5", "E5", "D5"], [1, 1, 1, 1]),
];

const CATEGORIES: &[(&str, &[&[PatternSpec]])] = &[
    ("open-strings", &[OPEN_STRINGS_L1]),
    ("see-saw", &[SEE_SAW_L1, SEE_SAW_L2, SEE_SAW_L3, SEE_SAW_L4]),
    (
        "twinkle",
        &[TWINKLE_L1, TWINKLE_L2, TWINKLE_L3, TWINKLE_L4, TWINKLE_L5],
    ),
    (
        "lightly-row",
        &[LIGHTLY_ROW_L1, LIGHTLY_ROW_L2, LIGHTLY_ROW_L3, LIGHTLY_ROW_L4],
    ),
];

/// The bank for one category/level. Levels are 1-based.
pub fn patterns(category: &str, level: u8) -> Result<&'static [PatternSpec], String> {
    let (_, levels) = CATEGORIES
        .iter()
        .find(|(name, _)| *name == category)
        .ok_or_else(|| format!("unknown category: {}", category))?;
    if level == 0 || level as usize > levels.len() {
        return Err(format!("no level {} in category {}", level, category));
    }
    Ok(levels[level as usize - 1])
}

/// Select a pattern using an externally supplied roll in [0, 1).
/// Selection is with replacement; the same roll always picks the same pattern.
pub fn pick(category: &str, level: u8, roll: f64) -> Result<Pattern, String> {
    let bank = patterns(category, level)?;
    let index = ((roll.clamp(0.0, 1.0) * bank.len() as f64) as usize).min(bank.len() - 1);
    Ok(bank[index].to_pattern())
}

/// Listing of all categories and their levels for the host UI.
pub fn listing() -> Vec<CategoryInfo> {
    CATEGORIES
        .iter()
        .map(|(name, levels)| CategoryInfo {
            name,
            levels: levels
                .iter()
                .enumerate()
                .map(|(i, bank)| LevelInfo {
                    level: i as u8 + 1,
                    pattern_count: bank.len(),
                })
                .collect(),
        })
        .collect()
}
