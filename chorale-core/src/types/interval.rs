//! Interval and motion classification between spelled pitches
//!
//! Generic intervals count letter names (a third is always three letters
//! wide whatever its accidentals); the exact [`Interval`] adds chromatic
//! quality on top. All functions here are pure.

use crate::types::pitch::Pitch;
use std::fmt;

/// Semitone size of the major/perfect form of each simple generic interval
const REFERENCE_SEMITONES: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Diatonic distance between two pitches, counted in letter names.
///
/// A unison is 1; ascending by n letters gives n + 1 and descending gives
/// -(n + 1). There is no directed zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GenericInterval {
    directed: i32,
}

impl GenericInterval {
    pub fn between(from: &Pitch, to: &Pitch) -> Self {
        let steps = to.diatonic_number() - from.diatonic_number();
        let directed = if steps >= 0 { steps + 1 } else { steps - 1 };
        GenericInterval { directed }
    }

    pub fn directed(&self) -> i32 {
        self.directed
    }

    pub fn undirected(&self) -> i32 {
        self.directed.abs()
    }

    /// Undirected size reduced to 1..=7 (an octave becomes a unison)
    pub fn simple_undirected(&self) -> i32 {
        (self.undirected() - 1) % 7 + 1
    }

    /// Undirected size reduced to 1..=8, keeping octaves as 8
    pub fn semi_simple_undirected(&self) -> i32 {
        simple_keeping_octave(self.undirected())
    }

    /// -1 descending, 0 unison, +1 ascending (by letter)
    pub fn direction(&self) -> i32 {
        if self.undirected() == 1 {
            0
        } else {
            self.directed.signum()
        }
    }

    /// A move of one letter in either direction
    pub fn is_step(&self) -> bool {
        self.undirected() == 2
    }
}

fn simple_keeping_octave(size: i32) -> i32 {
    if size <= 8 {
        size
    } else {
        (size - 2) % 7 + 2
    }
}

/// Chromatic quality of an interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quality {
    /// Diminished by the given count (2 = doubly diminished)
    Diminished(u8),
    Minor,
    Perfect,
    Major,
    /// Augmented by the given count
    Augmented(u8),
}

impl Quality {
    fn abbreviation(&self) -> String {
        match self {
            Quality::Diminished(n) => "d".repeat(*n as usize),
            Quality::Minor => "m".to_string(),
            Quality::Perfect => "P".to_string(),
            Quality::Major => "M".to_string(),
            Quality::Augmented(n) => "A".repeat(*n as usize),
        }
    }
}

/// An exact interval: generic size plus quality.
///
/// Quality and size are undirected; the directed generic and chromatic
/// distances from the first pitch to the second are kept alongside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub quality: Quality,
    pub size: i32,
    pub generic: GenericInterval,
    /// Signed semitone distance from the first pitch to the second
    pub semitones: i32,
}

impl Interval {
    pub fn between(from: &Pitch, to: &Pitch) -> Self {
        let generic = GenericInterval::between(from, to);

        // Measure quality upward from the pitch that is lower by letter
        let ascending = match to.diatonic_number().cmp(&from.diatonic_number()) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Less => false,
            std::cmp::Ordering::Equal => to.ps() >= from.ps(),
        };
        let (low, high) = if ascending { (from, to) } else { (to, from) };

        let size = high.diatonic_number() - low.diatonic_number() + 1;
        let octaves = (size - 1) / 7;
        let simple_size = size - 7 * octaves;
        let simple_semitones = high.ps() - low.ps() - 12 * octaves;
        let delta = simple_semitones - REFERENCE_SEMITONES[(simple_size - 1) as usize];

        let quality = if matches!(simple_size, 1 | 4 | 5) {
            match delta {
                0 => Quality::Perfect,
                d if d > 0 => Quality::Augmented(d as u8),
                d => Quality::Diminished((-d) as u8),
            }
        } else {
            match delta {
                0 => Quality::Major,
                -1 => Quality::Minor,
                d if d > 0 => Quality::Augmented(d as u8),
                d => Quality::Diminished((-d - 1) as u8),
            }
        };

        Interval {
            quality,
            size,
            generic,
            semitones: to.ps() - from.ps(),
        }
    }

    /// Name including compound size, e.g. "P12"
    pub fn name(&self) -> String {
        format!("{}{}", self.quality.abbreviation(), self.size)
    }

    /// Name reduced within an octave; an octave reduces to "P1"
    pub fn simple_name(&self) -> String {
        format!("{}{}", self.quality.abbreviation(), self.simple_size())
    }

    /// Name reduced within an octave, keeping octaves as "P8"
    pub fn semi_simple_name(&self) -> String {
        format!(
            "{}{}",
            self.quality.abbreviation(),
            simple_keeping_octave(self.size)
        )
    }

    pub fn simple_size(&self) -> i32 {
        (self.size - 1) % 7 + 1
    }

    pub fn is_augmented_second(&self) -> bool {
        self.size == 2 && self.quality == Quality::Augmented(1)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Generic interval between two pitches
pub fn classify_generic(a: &Pitch, b: &Pitch) -> GenericInterval {
    GenericInterval::between(a, b)
}

/// Exact interval between two pitches
pub fn classify_quality(a: &Pitch, b: &Pitch) -> Interval {
    Interval::between(a, b)
}

/// Any fourth (of any quality) once reduced within the octave
pub fn is_fourth(lower: &Pitch, upper: &Pitch) -> bool {
    GenericInterval::between(lower, upper).simple_undirected() == 4
}

/// Perfect fifth or any compound of it
pub fn is_perfect_fifth(lower: &Pitch, upper: &Pitch) -> bool {
    let interval = Interval::between(lower, upper);
    interval.quality == Quality::Perfect && interval.simple_size() == 5
}

/// Perfect octave or any compound of it; unisons do not count
pub fn is_perfect_octave(lower: &Pitch, upper: &Pitch) -> bool {
    let interval = Interval::between(lower, upper);
    interval.quality == Quality::Perfect && simple_keeping_octave(interval.size) == 8
}

/// `a` sounds at or below `b`
pub fn is_lower(a: &Pitch, b: &Pitch) -> bool {
    a.ps() <= b.ps()
}

/// Relative motion of two voices between consecutive offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Neither voice moves
    Static,
    /// One voice holds while the other moves
    Oblique,
    Contrary,
    /// Same direction into a different generic interval
    Similar,
    /// Same direction keeping the generic interval
    Parallel,
}

pub fn classify_motion(
    prev_lower: &Pitch,
    prev_upper: &Pitch,
    lower: &Pitch,
    upper: &Pitch,
) -> Motion {
    let lower_dir = (lower.ps() - prev_lower.ps()).signum();
    let upper_dir = (upper.ps() - prev_upper.ps()).signum();

    match (lower_dir, upper_dir) {
        (0, 0) => Motion::Static,
        (0, _) | (_, 0) => Motion::Oblique,
        (l, u) if l != u => Motion::Contrary,
        _ => {
            let before = GenericInterval::between(prev_lower, prev_upper).undirected();
            let after = GenericInterval::between(lower, upper).undirected();
            if before == after {
                Motion::Parallel
            } else {
                Motion::Similar
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> Pitch {
        s.parse().unwrap()
    }

    #[test]
    fn test_generic_intervals() {
        assert_eq!(classify_generic(&p("C4"), &p("C4")).directed(), 1);
        assert_eq!(classify_generic(&p("C4"), &p("E4")).directed(), 3);
        assert_eq!(classify_generic(&p("G4"), &p("D4")).directed(), -4);
        assert_eq!(classify_generic(&p("C3"), &p("G5")).undirected(), 19);

        let twelfth = classify_generic(&p("C3"), &p("G4"));
        assert_eq!(twelfth.simple_undirected(), 5);
        assert_eq!(twelfth.semi_simple_undirected(), 5);

        let octave = classify_generic(&p("C4"), &p("C5"));
        assert_eq!(octave.simple_undirected(), 1);
        assert_eq!(octave.semi_simple_undirected(), 8);

        let double_octave = classify_generic(&p("C4"), &p("C6"));
        assert_eq!(double_octave.semi_simple_undirected(), 8);
    }

    #[test]
    fn test_generic_ignores_accidentals() {
        assert_eq!(classify_generic(&p("C#4"), &p("Eb4")).directed(), 3);
        assert_eq!(classify_generic(&p("B3"), &p("C4")).directed(), 2);
    }

    #[test]
    fn test_interval_quality_names() {
        assert_eq!(classify_quality(&p("C4"), &p("G4")).name(), "P5");
        assert_eq!(classify_quality(&p("C4"), &p("E4")).name(), "M3");
        assert_eq!(classify_quality(&p("A4"), &p("C5")).name(), "m3");
        assert_eq!(classify_quality(&p("B3"), &p("F4")).name(), "d5");
        assert_eq!(classify_quality(&p("F4"), &p("B4")).name(), "A4");
        assert_eq!(classify_quality(&p("Eb5"), &p("F#5")).name(), "A2");
        assert_eq!(classify_quality(&p("C4"), &p("C#4")).name(), "A1");
        assert_eq!(classify_quality(&p("G3"), &p("F4")).name(), "m7");
    }

    #[test]
    fn test_quality_is_direction_independent() {
        let up = classify_quality(&p("Eb5"), &p("F#5"));
        let down = classify_quality(&p("F#5"), &p("Eb5"));
        assert_eq!(up.name(), down.name());
        assert_eq!(up.semitones, 3);
        assert_eq!(down.semitones, -3);
        assert_eq!(down.generic.directed(), -2);
    }

    #[test]
    fn test_compound_reductions() {
        let twelfth = classify_quality(&p("C3"), &p("G4"));
        assert_eq!(twelfth.name(), "P12");
        assert_eq!(twelfth.simple_name(), "P5");

        let octave = classify_quality(&p("C4"), &p("C5"));
        assert_eq!(octave.simple_name(), "P1");
        assert_eq!(octave.semi_simple_name(), "P8");

        let double_octave = classify_quality(&p("C4"), &p("C6"));
        assert_eq!(double_octave.semi_simple_name(), "P8");
    }

    #[test]
    fn test_perfect_interval_predicates() {
        assert!(is_perfect_fifth(&p("C4"), &p("G4")));
        assert!(is_perfect_fifth(&p("C4"), &p("G7")));
        assert!(!is_perfect_fifth(&p("G4"), &p("G7")));
        assert!(!is_perfect_fifth(&p("B3"), &p("F4")));

        assert!(is_perfect_octave(&p("C4"), &p("C5")));
        assert!(is_perfect_octave(&p("C4"), &p("C6")));
        assert!(!is_perfect_octave(&p("C4"), &p("G4")));
        assert!(!is_perfect_octave(&p("C4"), &p("C4")));

        assert!(is_fourth(&p("C4"), &p("F4")));
        assert!(is_fourth(&p("C2"), &p("F3")));
        assert!(is_fourth(&p("F4"), &p("B4")));
        assert!(!is_fourth(&p("C4"), &p("G4")));
    }

    #[test]
    fn test_motion() {
        assert_eq!(
            classify_motion(&p("C3"), &p("G3"), &p("D3"), &p("A3")),
            Motion::Parallel
        );
        assert_eq!(
            classify_motion(&p("C3"), &p("E3"), &p("D3"), &p("A3")),
            Motion::Similar
        );
        assert_eq!(
            classify_motion(&p("C3"), &p("G3"), &p("C3"), &p("A3")),
            Motion::Oblique
        );
        assert_eq!(
            classify_motion(&p("C3"), &p("G3"), &p("D3"), &p("F3")),
            Motion::Contrary
        );
        assert_eq!(
            classify_motion(&p("C3"), &p("G3"), &p("C3"), &p("G3")),
            Motion::Static
        );
    }

    #[test]
    fn test_is_lower() {
        assert!(is_lower(&p("C3"), &p("D3")));
        assert!(is_lower(&p("C3"), &p("C3")));
        assert!(!is_lower(&p("C3"), &p("B2")));
    }
}
