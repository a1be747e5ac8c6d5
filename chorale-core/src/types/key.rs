//! Keys and key detection
//!
//! [`KeyFinder`] is the seam the harmony check uses to obtain a key. The
//! default [`KrumhanslKeyFinder`] correlates the chorale's pitch-class
//! distribution against the Krumhansl-Kessler major and minor profiles.

use crate::error::{ChoraleError, Result};
use crate::types::chorale::Chorale;
use crate::types::pitch::{Pitch, Step};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mode {
    Major,
    Minor,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Mode::Major => "major",
            Mode::Minor => "minor",
        }
    }
}

/// A tonic spelling plus a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Key {
    tonic: Pitch, // octave is irrelevant and normalized to 4
    mode: Mode,
}

/// Semitones above the tonic for each scale degree (natural minor for minor keys)
const MAJOR_SCALE: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];
const MINOR_SCALE: [i32; 7] = [0, 2, 3, 5, 7, 8, 10];

impl Key {
    pub fn new(tonic: Pitch, mode: Mode) -> Self {
        Key {
            tonic: tonic.with_octave(4),
            mode,
        }
    }

    pub fn tonic(&self) -> Pitch {
        self.tonic
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_major(&self) -> bool {
        self.mode == Mode::Major
    }

    /// Zero-based scale degree of a pitch, by letter name
    pub fn degree_of(&self, pitch: &Pitch) -> usize {
        (pitch.step().index() - self.tonic.step().index()).rem_euclid(7) as usize
    }

    /// Chromatic offsets of `pitch` from each diatonic form of its degree.
    ///
    /// Minor keys accept the raised sixth and seventh degrees as diatonic,
    /// so the leading tone needs no accidental.
    pub fn alteration_of(&self, pitch: &Pitch) -> i32 {
        let degree = self.degree_of(pitch);
        let actual = (pitch.pitch_class() as i32 - self.tonic.pitch_class() as i32).rem_euclid(12);
        let expected = match self.mode {
            Mode::Major => MAJOR_SCALE[degree],
            Mode::Minor => MINOR_SCALE[degree],
        };
        let offset = wrap_semitones(actual - expected);
        if self.mode == Mode::Minor && matches!(degree, 5 | 6) && offset == 1 {
            0
        } else {
            offset
        }
    }
}

/// Reduce a semitone difference to the range -6..=5
fn wrap_semitones(diff: i32) -> i32 {
    (diff + 6).rem_euclid(12) - 6
}

impl FromStr for Key {
    type Err = ChoraleError;

    /// Parses "C major", "f# minor", "Bb" (major) or "g" (lowercase = minor)
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split_whitespace();
        let tonic_text = parts
            .next()
            .ok_or_else(|| ChoraleError::InvalidPitch(s.to_string()))?;
        let tonic: Pitch = tonic_text.parse()?;
        let mode = match parts.next().map(|m| m.to_lowercase()) {
            Some(m) if m == "major" => Mode::Major,
            Some(m) if m == "minor" => Mode::Minor,
            Some(other) => {
                return Err(ChoraleError::Syntax {
                    line: 0,
                    message: format!("unknown mode '{}'", other),
                })
            }
            None if tonic_text.starts_with(|c: char| c.is_ascii_lowercase()) => Mode::Minor,
            None => Mode::Major,
        };
        Ok(Key::new(tonic, mode))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tonic.name(), self.mode.name())
    }
}

/// Detects the key of a chorale
pub trait KeyFinder {
    fn find_key(&self, chorale: &Chorale) -> Result<Key>;
}

/// Always answers with the same key
#[derive(Debug, Clone, Copy)]
pub struct FixedKey(pub Key);

impl KeyFinder for FixedKey {
    fn find_key(&self, _chorale: &Chorale) -> Result<Key> {
        Ok(self.0)
    }
}

/// Krumhansl-Kessler key profiles
const MAJOR_PROFILE: [f64; 12] = [
    6.35, 2.23, 3.48, 2.33, 4.38, 4.09, 2.52, 5.19, 2.39, 3.66, 2.29, 2.88,
];
const MINOR_PROFILE: [f64; 12] = [
    6.33, 2.68, 3.52, 5.38, 2.60, 3.53, 2.54, 4.75, 3.98, 2.69, 3.34, 3.17,
];

/// Default spellings for tonics that do not appear in the chorale
const MAJOR_TONICS: [(Step, i8); 12] = [
    (Step::C, 0),
    (Step::D, -1),
    (Step::D, 0),
    (Step::E, -1),
    (Step::E, 0),
    (Step::F, 0),
    (Step::F, 1),
    (Step::G, 0),
    (Step::A, -1),
    (Step::A, 0),
    (Step::B, -1),
    (Step::B, 0),
];
const MINOR_TONICS: [(Step, i8); 12] = [
    (Step::C, 0),
    (Step::C, 1),
    (Step::D, 0),
    (Step::E, -1),
    (Step::E, 0),
    (Step::F, 0),
    (Step::F, 1),
    (Step::G, 0),
    (Step::G, 1),
    (Step::A, 0),
    (Step::B, -1),
    (Step::B, 0),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct KrumhanslKeyFinder;

impl KrumhanslKeyFinder {
    /// Pearson correlation between a pitch-class histogram and a profile
    /// rotated to start on `shift`
    fn correlate(histogram: &[f64; 12], profile: &[f64; 12], shift: usize) -> f64 {
        let mean_h = histogram.iter().sum::<f64>() / 12.0;
        let mean_p = profile.iter().sum::<f64>() / 12.0;

        let mut numerator = 0.0;
        let mut var_h = 0.0;
        let mut var_p = 0.0;
        for (i, &profile_value) in profile.iter().enumerate() {
            let h = histogram[(i + shift) % 12] - mean_h;
            let p = profile_value - mean_p;
            numerator += h * p;
            var_h += h * h;
            var_p += p * p;
        }

        if var_h == 0.0 || var_p == 0.0 {
            0.0
        } else {
            numerator / (var_h * var_p).sqrt()
        }
    }

    /// Spell the tonic the way the chorale spells that pitch class most often
    fn spell_tonic(chorale: &Chorale, pitch_class: usize, mode: Mode) -> Pitch {
        let mut spellings: Vec<(Step, i8, usize)> = Vec::new();
        for pitch in chorale.pitches() {
            if pitch.pitch_class() as usize != pitch_class {
                continue;
            }
            match spellings
                .iter_mut()
                .find(|(step, alter, _)| *step == pitch.step() && *alter == pitch.alter())
            {
                Some(entry) => entry.2 += 1,
                None => spellings.push((pitch.step(), pitch.alter(), 1)),
            }
        }

        let (step, alter) = spellings
            .iter()
            .max_by_key(|(_, _, count)| *count)
            .map(|(step, alter, _)| (*step, *alter))
            .unwrap_or(match mode {
                Mode::Major => MAJOR_TONICS[pitch_class],
                Mode::Minor => MINOR_TONICS[pitch_class],
            });
        Pitch::new(step, alter, 4)
    }
}

impl KeyFinder for KrumhanslKeyFinder {
    fn find_key(&self, chorale: &Chorale) -> Result<Key> {
        chorale.ensure_not_empty()?;

        let mut histogram = [0.0f64; 12];
        for pitch in chorale.pitches() {
            histogram[pitch.pitch_class() as usize] += 1.0;
        }

        let mut best = (f64::MIN, 0usize, Mode::Major);
        for mode in [Mode::Major, Mode::Minor] {
            let profile = match mode {
                Mode::Major => &MAJOR_PROFILE,
                Mode::Minor => &MINOR_PROFILE,
            };
            for shift in 0..12 {
                let score = Self::correlate(&histogram, profile, shift);
                if score > best.0 {
                    best = (score, shift, mode);
                }
            }
        }

        let (score, pitch_class, mode) = best;
        let key = Key::new(Self::spell_tonic(chorale, pitch_class, mode), mode);
        tracing::debug!(%key, score, "detected key");
        Ok(key)
    }
}
