use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Lowest repeat count an entry may carry.
pub const MIN_REPEAT: u32 = 1;
/// Highest repeat count an entry may carry.
pub const MAX_REPEAT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    Work,
    ShortBreak,
    LongBreak,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Work, Mode::ShortBreak, Mode::LongBreak];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Work => "work",
            Mode::ShortBreak => "shortBreak",
            Mode::LongBreak => "longBreak",
        }
    }

    /// Button label.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Work => "Timer",
            Mode::ShortBreak => "Short Break",
            Mode::LongBreak => "Long Break",
        }
    }

    /// Headline and sub-line shown above the countdown.
    pub fn banner(&self) -> (&'static str, &'static str) {
        match self {
            Mode::Work => (
                "MISSION: FOCUS",
                "The world fades. Only your task remains. Every second counts.",
            ),
            Mode::ShortBreak => (
                "INTERLUDE: RECOVER",
                "A fleeting moment. Breathe. The next challenge awaits.",
            ),
            Mode::LongBreak => (
                "RECHARGE: HERO'S REST",
                "You have earned this. Gather your strength for the next mission.",
            ),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "work" | "focus" => Ok(Mode::Work),
            "shortbreak" | "short" => Ok(Mode::ShortBreak),
            "longbreak" | "long" => Ok(Mode::LongBreak),
            _ => Err(ValidationError::UnknownMode(s.to_string())),
        }
    }
}

/// One `{mode, repeatCount}` row of the user's sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceEntry {
    pub mode: Mode,
    pub count: u32,
}

impl SequenceEntry {
    pub fn new(mode: Mode, count: u32) -> Self {
        Self {
            mode,
            count: count.clamp(MIN_REPEAT, MAX_REPEAT),
        }
    }
}

/// Ordered, never-empty list of sequence entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SequenceEntry>", into = "Vec<SequenceEntry>")]
pub struct Sequence {
    entries: Vec<SequenceEntry>,
}

impl Sequence {
    /// Build a sequence, clamping every repeat count into range.
    pub fn new(entries: Vec<SequenceEntry>) -> Result<Self, ValidationError> {
        if entries.is_empty() {
            return Err(ValidationError::EmptySequence);
        }
        Ok(Self {
            entries: entries
                .into_iter()
                .map(|e| SequenceEntry::new(e.mode, e.count))
                .collect(),
        })
    }

    pub fn entries(&self) -> &[SequenceEntry] {
        &self.entries
    }

    /// Each entry repeated `count` times, in order.
    pub fn expand(&self) -> Vec<Mode> {
        self.entries
            .iter()
            .flat_map(|e| std::iter::repeat(e.mode).take(e.count as usize))
            .collect()
    }

    pub fn expanded_len(&self) -> usize {
        self.entries.iter().map(|e| e.count as usize).sum()
    }

    /// Index of the first occurrence of `mode` in the expanded sequence.
    pub fn first_index_of(&self, mode: Mode) -> Option<usize> {
        self.expand().iter().position(|m| *m == mode)
    }

    pub fn push(&mut self, entry: SequenceEntry) {
        self.entries.push(SequenceEntry::new(entry.mode, entry.count));
    }

    pub fn remove(&mut self, index: usize) -> Result<SequenceEntry, ValidationError> {
        self.check_index(index)?;
        if self.entries.len() == 1 {
            return Err(ValidationError::EmptySequence);
        }
        Ok(self.entries.remove(index))
    }

    pub fn move_up(&mut self, index: usize) -> Result<(), ValidationError> {
        self.check_index(index)?;
        if index == 0 {
            return Err(self.out_of_bounds(index));
        }
        self.entries.swap(index - 1, index);
        Ok(())
    }

    pub fn move_down(&mut self, index: usize) -> Result<(), ValidationError> {
        if index + 1 >= self.entries.len() {
            return Err(self.out_of_bounds(index + 1));
        }
        self.entries.swap(index, index + 1);
        Ok(())
    }

    pub fn set_mode(&mut self, index: usize, mode: Mode) -> Result<(), ValidationError> {
        self.check_index(index)?;
        self.entries[index].mode = mode;
        Ok(())
    }

    /// Set a repeat count; out-of-range counts are clamped.
    pub fn set_count(&mut self, index: usize, count: u32) -> Result<(), ValidationError> {
        self.check_index(index)?;
        self.entries[index].count = count.clamp(MIN_REPEAT, MAX_REPEAT);
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), ValidationError> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(self.out_of_bounds(index))
        }
    }

    fn out_of_bounds(&self, index: usize) -> ValidationError {
        ValidationError::OutOfBounds {
            collection: "sequence".into(),
            index,
            len: self.entries.len(),
        }
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self {
            entries: vec![
                SequenceEntry::new(Mode::Work, 4),
                SequenceEntry::new(Mode::ShortBreak, 4),
                SequenceEntry::new(Mode::LongBreak, 1),
            ],
        }
    }
}

impl TryFrom<Vec<SequenceEntry>> for Sequence {
    type Error = ValidationError;

    fn try_from(entries: Vec<SequenceEntry>) -> Result<Self, Self::Error> {
        Sequence::new(entries)
    }
}

impl From<Sequence> for Vec<SequenceEntry> {
    fn from(sequence: Sequence) -> Self {
        sequence.entries
    }
}

/// Configured minute length per mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durations {
    pub work: u32,
    pub short_break: u32,
    pub long_break: u32,
}

impl Durations {
    pub fn get(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Work => self.work,
            Mode::ShortBreak => self.short_break,
            Mode::LongBreak => self.long_break,
        }
    }

    /// Allowed minutes for `mode`.
    pub fn range(mode: Mode) -> (u32, u32) {
        match mode {
            Mode::Work | Mode::LongBreak => (1, 60),
            Mode::ShortBreak => (1, 30),
        }
    }

    pub fn set(&mut self, mode: Mode, minutes: u32) -> Result<(), ValidationError> {
        let (min, max) = Self::range(mode);
        if !(min..=max).contains(&minutes) {
            return Err(ValidationError::OutOfRange {
                field: format!("{mode} duration"),
                value: minutes,
                min,
                max,
            });
        }
        match mode {
            Mode::Work => self.work = minutes,
            Mode::ShortBreak => self.short_break = minutes,
            Mode::LongBreak => self.long_break = minutes,
        }
        Ok(())
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            work: 25,
            short_break: 5,
            long_break: 15,
        }
    }
}
