// chorale-core/src/types/roman_numeral.rs
use crate::error::{ChoraleError, Result};
use crate::types::chord::{Chord, SeventhQuality, TriadQuality};
use crate::types::key::{Key, Mode};
use std::fmt;

/// Represents a Roman numeral chord analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomanNumeral {
    pub degree: ScaleDegree,
    pub quality: ChordQuality,
    pub inversion: u8,
    pub seventh: bool,
    pub accidental: Option<Accidental>, // For chromatic roots
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleDegree {
    I,
    II,
    III,
    IV,
    V,
    VI,
    VII,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accidental {
    Flat,
    Sharp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChordQuality {
    Major,          // I, IV, V
    Minor,          // ii, iii, vi
    Diminished,     // viio
    Augmented,      // III+
    HalfDiminished, // iiø7
}

impl ScaleDegree {
    const ALL: [ScaleDegree; 7] = [
        ScaleDegree::I,
        ScaleDegree::II,
        ScaleDegree::III,
        ScaleDegree::IV,
        ScaleDegree::V,
        ScaleDegree::VI,
        ScaleDegree::VII,
    ];

    fn numeral(self) -> &'static str {
        match self {
            ScaleDegree::I => "I",
            ScaleDegree::II => "II",
            ScaleDegree::III => "III",
            ScaleDegree::IV => "IV",
            ScaleDegree::V => "V",
            ScaleDegree::VI => "VI",
            ScaleDegree::VII => "VII",
        }
    }

    /// Quality of the diatonic triad on this degree. Minor keys use the
    /// harmonic form for V and VII.
    fn diatonic_quality(self, mode: Mode) -> ChordQuality {
        match (mode, self) {
            (Mode::Major, ScaleDegree::I | ScaleDegree::IV | ScaleDegree::V) => ChordQuality::Major,
            (Mode::Major, ScaleDegree::VII) => ChordQuality::Diminished,
            (Mode::Major, _) => ChordQuality::Minor,
            (Mode::Minor, ScaleDegree::I | ScaleDegree::IV) => ChordQuality::Minor,
            (Mode::Minor, ScaleDegree::II | ScaleDegree::VII) => ChordQuality::Diminished,
            (Mode::Minor, _) => ChordQuality::Major,
        }
    }
}

impl RomanNumeral {
    /// Analyze a chord in the context of a key
    pub fn analyze(chord: &Chord, key: &Key) -> Result<Self> {
        if chord.distinct_steps() < 2 {
            return Err(ChoraleError::Unlabelable(chord.to_string()));
        }
        let root = chord
            .root()
            .ok_or_else(|| ChoraleError::Unlabelable(chord.to_string()))?;

        let degree = ScaleDegree::ALL[key.degree_of(&root)];
        let accidental = match key.alteration_of(&root) {
            0 => None,
            a if a < 0 => Some(Accidental::Flat),
            _ => Some(Accidental::Sharp),
        };

        let quality = match (chord.seventh_quality(), chord.triad_quality()) {
            (Some(SeventhQuality::HalfDiminished), _) => ChordQuality::HalfDiminished,
            (Some(SeventhQuality::Other), _) => {
                return Err(ChoraleError::Unlabelable(chord.to_string()));
            }
            (_, Some(TriadQuality::Major)) => ChordQuality::Major,
            (_, Some(TriadQuality::Minor)) => ChordQuality::Minor,
            (_, Some(TriadQuality::Diminished)) => ChordQuality::Diminished,
            (_, Some(TriadQuality::Augmented)) => ChordQuality::Augmented,
            // No third: an open fifth takes the diatonic quality of its degree
            (None, None) if chord.third().is_none() && accidental.is_none() => {
                degree.diatonic_quality(key.mode())
            }
            _ => return Err(ChoraleError::Unlabelable(chord.to_string())),
        };

        Ok(RomanNumeral {
            degree,
            quality,
            inversion: chord.inversion() as u8,
            seventh: chord.is_seventh(),
            accidental,
        })
    }

    /// Figured-bass suffix for the inversion
    fn figures(&self) -> &'static str {
        match (self.seventh, self.inversion) {
            (false, 1) => "6",
            (false, 2) => "64",
            (false, _) => "",
            (true, 1) => "65",
            (true, 2) => "43",
            (true, 3) => "42",
            (true, _) => "7",
        }
    }

    /// The label as used by the progression grammar, e.g. "V65" or "viio7"
    pub fn figure(&self) -> String {
        let mut result = String::new();

        if let Some(acc) = self.accidental {
            match acc {
                Accidental::Flat => result.push('b'),
                Accidental::Sharp => result.push('#'),
            }
        }

        let numeral = self.degree.numeral();
        match self.quality {
            ChordQuality::Major => result.push_str(numeral),
            ChordQuality::Augmented => {
                result.push_str(numeral);
                result.push('+');
            }
            ChordQuality::Minor => result.push_str(&numeral.to_lowercase()),
            ChordQuality::Diminished => {
                result.push_str(&numeral.to_lowercase());
                result.push('o');
            }
            ChordQuality::HalfDiminished => {
                result.push_str(&numeral.to_lowercase());
                result.push('ø');
            }
        }

        result.push_str(self.figures());
        result
    }
}

impl fmt::Display for RomanNumeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.figure())
    }
}

/// Derives a functional label for one chord in a key
pub trait ChordLabeler {
    fn label(&self, chord: &Chord, key: &Key) -> Result<String>;
}

/// Labels chords with roman-numeral figures
#[derive(Debug, Clone, Copy, Default)]
pub struct RomanNumeralLabeler;

impl ChordLabeler for RomanNumeralLabeler {
    fn label(&self, chord: &Chord, key: &Key) -> Result<String> {
        RomanNumeral::analyze(chord, key).map(|rn| rn.figure())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(pitches: &[&str], key: &str) -> String {
        let chord = Chord::from_pitch_strings(pitches).unwrap();
        let key: Key = key.parse().unwrap();
        RomanNumeralLabeler.label(&chord, &key).unwrap()
    }

    #[test]
    fn test_triads_in_major() {
        assert_eq!(label(&["C3", "G3", "E4", "C5"], "C major"), "I");
        assert_eq!(label(&["E3", "G3", "C4", "G4"], "C major"), "I6");
        assert_eq!(label(&["G2", "G3", "C4", "E4"], "C major"), "I64");
        assert_eq!(label(&["D3", "F3", "A3", "D4"], "C major"), "ii");
        assert_eq!(label(&["F3", "A3", "C4", "F4"], "C major"), "IV");
        assert_eq!(label(&["G2", "B3", "D4", "G4"], "C major"), "V");
        assert_eq!(label(&["B2", "D3", "F3", "B3"], "C major"), "viio");
    }

    #[test]
    fn test_sevenths_and_inversions() {
        assert_eq!(label(&["G2", "F3", "B3", "D4"], "C major"), "V7");
        assert_eq!(label(&["B2", "G3", "D4", "F4"], "C major"), "V65");
        assert_eq!(label(&["D3", "G3", "B3", "F4"], "C major"), "V43");
        assert_eq!(label(&["F2", "G3", "B3", "D4"], "C major"), "V42");
        assert_eq!(label(&["D3", "F3", "A3", "C4"], "C major"), "ii7");
        assert_eq!(label(&["B2", "D3", "F3", "A3"], "C major"), "viiø7");
    }

    #[test]
    fn test_minor_key_labels() {
        assert_eq!(label(&["A2", "E3", "C4", "A4"], "A minor"), "i");
        assert_eq!(label(&["E2", "E3", "G#3", "B3"], "A minor"), "V");
        assert_eq!(label(&["G#2", "D3", "F3", "B3"], "A minor"), "viio7");
        assert_eq!(label(&["B2", "D3", "F3", "A3"], "A minor"), "iiø7");
        assert_eq!(label(&["F2", "C3", "A3", "F4"], "A minor"), "VI");
    }

    #[test]
    fn test_chromatic_root() {
        assert_eq!(label(&["Bb2", "D3", "F3", "Bb3"], "C major"), "bVII");
    }

    #[test]
    fn test_open_fifth_takes_diatonic_quality() {
        assert_eq!(label(&["D3", "A3", "D4", "A4"], "C major"), "ii");
    }

    #[test]
    fn test_unison_is_unlabelable() {
        let chord = Chord::from_pitch_strings(&["C3", "C4", "C4", "C5"]).unwrap();
        let key: Key = "C major".parse().unwrap();
        assert!(RomanNumeralLabeler.label(&chord, &key).is_err());
    }
}
