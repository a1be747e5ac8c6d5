use crate::error::{ChoraleError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Letter name of a pitch, independent of accidentals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Step {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Step {
    pub const ALL: [Step; 7] = [
        Step::C,
        Step::D,
        Step::E,
        Step::F,
        Step::G,
        Step::A,
        Step::B,
    ];

    /// Position of the letter within the octave (C = 0, B = 6)
    pub fn index(self) -> i32 {
        self as i32
    }

    /// Semitones above C for the natural form of this letter
    pub fn semitones(self) -> i32 {
        match self {
            Step::C => 0,
            Step::D => 2,
            Step::E => 4,
            Step::F => 5,
            Step::G => 7,
            Step::A => 9,
            Step::B => 11,
        }
    }

    /// Letter `steps` positions above this one, wrapping at the octave
    pub fn offset(self, steps: i32) -> Step {
        Step::ALL[(self.index() + steps).rem_euclid(7) as usize]
    }

    fn from_char(c: char) -> Option<Step> {
        match c.to_ascii_uppercase() {
            'C' => Some(Step::C),
            'D' => Some(Step::D),
            'E' => Some(Step::E),
            'F' => Some(Step::F),
            'G' => Some(Step::G),
            'A' => Some(Step::A),
            'B' => Some(Step::B),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Step::C => "C",
            Step::D => "D",
            Step::E => "E",
            Step::F => "F",
            Step::G => "G",
            Step::A => "A",
            Step::B => "B",
        }
    }
}

/// A spelled pitch: letter, chromatic alteration and octave.
///
/// Spelling matters for every diatonic computation, so `D#4` and `Eb4`
/// are different pitches even though they sound the same. Octaves follow
/// scientific pitch notation (4 = middle C).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pitch {
    step: Step,
    alter: i8, // -1 = flat, +1 = sharp, ±2 = double
    octave: i8,
}

impl Pitch {
    pub fn new(step: Step, alter: i8, octave: i8) -> Self {
        Pitch {
            step,
            alter,
            octave,
        }
    }

    pub fn natural(step: Step, octave: i8) -> Self {
        Self::new(step, 0, octave)
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn alter(&self) -> i8 {
        self.alter
    }

    pub fn octave(&self) -> i8 {
        self.octave
    }

    /// Sounding height in semitones (MIDI numbering, C4 = 60)
    pub fn ps(&self) -> i32 {
        (self.octave as i32 + 1) * 12 + self.step.semitones() + self.alter as i32
    }

    /// Count of letter steps from C0, used for generic intervals
    pub fn diatonic_number(&self) -> i32 {
        self.octave as i32 * 7 + self.step.index()
    }

    /// Chromatic pitch class (0-11)
    pub fn pitch_class(&self) -> u8 {
        self.ps().rem_euclid(12) as u8
    }

    /// Same letter and alteration, ignoring octave
    pub fn same_name(&self, other: &Pitch) -> bool {
        self.step == other.step && self.alter == other.alter
    }

    /// Move to a different octave keeping the spelling
    pub fn with_octave(self, octave: i8) -> Pitch {
        Pitch { octave, ..self }
    }

    /// Spelling without octave, e.g. "F#" or "Bb"
    pub fn name(&self) -> String {
        let accidental = match self.alter.cmp(&0) {
            Ordering::Greater => "#".repeat(self.alter as usize),
            Ordering::Less => "b".repeat(self.alter.unsigned_abs() as usize),
            Ordering::Equal => String::new(),
        };
        format!("{}{}", self.step.name(), accidental)
    }
}

impl Ord for Pitch {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ps()
            .cmp(&other.ps())
            .then_with(|| self.diatonic_number().cmp(&other.diatonic_number()))
    }
}

impl PartialOrd for Pitch {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Pitch {
    type Err = ChoraleError;

    /// Parses `C4`, `F#5`, `Bb3`, `E-5`, `C##4`. The octave defaults to 4.
    /// `-` is read as a flat, so negative octaves are not accepted.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || ChoraleError::InvalidPitch(s.to_string());

        let mut chars = s.chars().peekable();
        let step = chars.next().and_then(Step::from_char).ok_or_else(invalid)?;

        let mut alter: i8 = 0;
        while let Some(&c) = chars.peek() {
            let delta = match c {
                '#' => 1,
                'b' | '-' => -1,
                _ => break,
            };
            // Mixed accidentals like "#b" are rejected
            if alter != 0 && alter.signum() != delta {
                return Err(invalid());
            }
            alter += delta;
            chars.next();
        }
        if alter.abs() > 2 {
            return Err(invalid());
        }

        let octave_part: String = chars.collect();
        let octave = if octave_part.is_empty() {
            4
        } else if octave_part.chars().all(|c| c.is_ascii_digit()) {
            octave_part.parse::<i8>().map_err(|_| invalid())?
        } else {
            return Err(invalid());
        };

        Ok(Pitch::new(step, alter, octave))
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name(), self.octave)
    }
}
