use crate::types::interval::Interval;
use crate::types::pitch::Pitch;
use std::fmt;

/// Triad quality measured from the root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriadQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
}

/// Seventh-chord type measured from the root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeventhQuality {
    /// Major triad, minor seventh
    Dominant,
    Major,
    Minor,
    HalfDiminished,
    Diminished,
    /// Any other combination (minor-major, augmented sevenths)
    Other,
}

/// A vertical sonority: the pitches sounding at one offset, bass first.
///
/// Roots are found by stacking thirds on letter names, so spelling
/// decides the analysis (`C E G Bb` stacks on C, `C E G A#` stacks on A#).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    pitches: Vec<Pitch>, // in voice order, bass first
}

impl Chord {
    pub fn from_pitches(pitches: Vec<Pitch>) -> Self {
        Chord { pitches }
    }

    /// Create a chord from pitch strings (e.g., vec!["C3", "E4", "G4"])
    pub fn from_pitch_strings(pitches: &[&str]) -> crate::Result<Self> {
        let pitches = pitches
            .iter()
            .map(|s| s.parse())
            .collect::<crate::Result<Vec<Pitch>>>()?;
        Ok(Self::from_pitches(pitches))
    }

    pub fn pitches(&self) -> &[Pitch] {
        &self.pitches
    }

    pub fn len(&self) -> usize {
        self.pitches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pitches.is_empty()
    }

    /// The lowest sounding pitch
    pub fn bass(&self) -> Option<Pitch> {
        self.pitches.iter().min().copied()
    }

    /// Letter distance (0-6) from `root` up to `pitch`, ignoring octave
    fn step_above(root: &Pitch, pitch: &Pitch) -> i32 {
        (pitch.step().index() - root.step().index()).rem_euclid(7)
    }

    /// Find the root by trying each pitch as the bottom of a stack of thirds.
    ///
    /// The candidate that places the most chord tones on a third, fifth or
    /// seventh wins; ties go to the lower sounding candidate.
    pub fn root(&self) -> Option<Pitch> {
        let mut candidates = self.pitches.clone();
        candidates.sort();

        let mut best: Option<(usize, Pitch)> = None;
        for candidate in candidates {
            let fitting = self
                .pitches
                .iter()
                .filter(|p| matches!(Self::step_above(&candidate, p), 0 | 2 | 4 | 6))
                .count();
            match best {
                Some((score, _)) if score >= fitting => {}
                _ => best = Some((fitting, candidate)),
            }
        }
        best.map(|(_, root)| root)
    }

    /// The chord member a given number of letters above the root
    fn member(&self, steps: i32) -> Option<Pitch> {
        let root = self.root()?;
        self.pitches
            .iter()
            .filter(|p| Self::step_above(&root, p) == steps)
            .min()
            .copied()
    }

    pub fn third(&self) -> Option<Pitch> {
        self.member(2)
    }

    pub fn fifth(&self) -> Option<Pitch> {
        self.member(4)
    }

    pub fn seventh(&self) -> Option<Pitch> {
        self.member(6)
    }

    pub fn is_seventh(&self) -> bool {
        self.seventh().is_some()
    }

    /// Whether `pitch` spells this chord's seventh (in any octave)
    pub fn is_seventh_tone(&self, pitch: &Pitch) -> bool {
        self.seventh().is_some_and(|s| s.same_name(pitch))
    }

    /// Distinct letter names sounding in the chord
    pub fn distinct_steps(&self) -> usize {
        let mut steps: Vec<_> = self.pitches.iter().map(|p| p.step()).collect();
        steps.sort();
        steps.dedup();
        steps.len()
    }

    /// Get the inversion number (0 = root position, 1 = first inversion, etc.)
    pub fn inversion(&self) -> usize {
        match (self.root(), self.bass()) {
            (Some(root), Some(bass)) => match Self::step_above(&root, &bass) {
                2 => 1,
                4 => 2,
                6 => 3,
                _ => 0,
            },
            _ => 0,
        }
    }

    /// Semitones above the root for a chord member, reduced within the octave
    fn semitones_above_root(&self, member: Option<Pitch>) -> Option<i32> {
        let root = self.root()?;
        let member = member?;
        let interval = Interval::between(&root.with_octave(4), &member.with_octave(4));
        Some(interval.semitones.rem_euclid(12))
    }

    /// Triad quality, or `None` when the third is missing or the sonority
    /// does not stack in thirds. A missing fifth is read as perfect.
    pub fn triad_quality(&self) -> Option<TriadQuality> {
        let third = self.semitones_above_root(self.third())?;
        let fifth = self.semitones_above_root(self.fifth()).unwrap_or(7);
        match (third, fifth) {
            (4, 7) => Some(TriadQuality::Major),
            (3, 7) => Some(TriadQuality::Minor),
            (3, 6) => Some(TriadQuality::Diminished),
            (4, 8) => Some(TriadQuality::Augmented),
            _ => None,
        }
    }

    pub fn seventh_quality(&self) -> Option<SeventhQuality> {
        let seventh = self.semitones_above_root(self.seventh())?;
        let quality = match (self.triad_quality(), seventh) {
            (Some(TriadQuality::Major), 10) => SeventhQuality::Dominant,
            (Some(TriadQuality::Major), 11) => SeventhQuality::Major,
            (Some(TriadQuality::Minor), 10) => SeventhQuality::Minor,
            (Some(TriadQuality::Diminished), 10) => SeventhQuality::HalfDiminished,
            (Some(TriadQuality::Diminished), 9) => SeventhQuality::Diminished,
            _ => SeventhQuality::Other,
        };
        Some(quality)
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.pitches.iter().map(|p| p.to_string()).collect();
        write!(f, "[{}]", names.join(", "))
    }
}
