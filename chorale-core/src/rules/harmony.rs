//! Functional roles of chord labels
//!
//! A [`Vocabulary`] lists, for one mode, which roman-numeral labels act as
//! tonic, dominant or predominant. It is built from a table of chord
//! families so the grammar in [`crate::rules::progression`] can ask about
//! the special members (cadential six-fours, the submediant, and so on)
//! without matching on strings.

use crate::error::{ChoraleError, Result};
use crate::types::key::Mode;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Tonic,
    Dominant,
    Predominant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Tonic => "tonic",
            Role::Dominant => "dominant",
            Role::Predominant => "predominant",
        };
        write!(f, "{}", name)
    }
}

/// The part a chord family plays in the progression grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    Plain,
    /// Second-inversion tonic and first-inversion mediant over the dominant bass
    Cadential,
    DominantTriad,
    DominantSeventh,
    LeadingToneSeventh,
    Submediant,
    SubdominantTriad,
    SubdominantSeventh,
    SupertonicTriad,
    SupertonicSeventh,
}

/// Expand a root label into its inversions and pick `indices` from them.
///
/// Seventh chords (labels containing "7") expand to `7 65 43 42`, triads
/// to `_ 6 64`.
pub fn get_inversions(root: &str, indices: &[usize]) -> Result<Vec<String>> {
    let inversions: Vec<String> = if root.contains('7') {
        let stem = root.strip_suffix('7').unwrap_or(root);
        vec![
            root.to_string(),
            format!("{}65", stem),
            format!("{}43", stem),
            format!("{}42", stem),
        ]
    } else {
        vec![root.to_string(), format!("{}6", root), format!("{}64", root)]
    };

    indices
        .iter()
        .map(|&index| {
            inversions
                .get(index)
                .cloned()
                .ok_or_else(|| ChoraleError::InvalidInversion {
                    label: root.to_string(),
                    index,
                })
        })
        .collect()
}

const TRIAD: &[usize] = &[0, 1];
const SEVENTH: &[usize] = &[0, 1, 2, 3];
const ROOT: &[usize] = &[0];
const FIRST: &[usize] = &[1];
const SECOND: &[usize] = &[2];

/// (role, part, root label, inversion indices)
type Family = (Role, Part, &'static str, &'static [usize]);

const MAJOR_FAMILIES: &[Family] = &[
    (Role::Tonic, Part::Plain, "I", TRIAD),
    (Role::Tonic, Part::Plain, "iii", ROOT),
    (Role::Dominant, Part::DominantTriad, "V", TRIAD),
    (Role::Dominant, Part::DominantSeventh, "V7", SEVENTH),
    (Role::Dominant, Part::LeadingToneSeventh, "viiø7", SEVENTH),
    (Role::Dominant, Part::LeadingToneSeventh, "viio7", SEVENTH),
    (Role::Dominant, Part::Cadential, "I", SECOND),
    (Role::Dominant, Part::Cadential, "iii", FIRST),
    (Role::Predominant, Part::SupertonicTriad, "ii", TRIAD),
    (Role::Predominant, Part::SubdominantTriad, "IV", TRIAD),
    (Role::Predominant, Part::SupertonicSeventh, "ii7", SEVENTH),
    (Role::Predominant, Part::SubdominantSeventh, "IV7", SEVENTH),
    (Role::Predominant, Part::Submediant, "vi", ROOT),
];

const MINOR_FAMILIES: &[Family] = &[
    (Role::Tonic, Part::Plain, "i", TRIAD),
    (Role::Dominant, Part::DominantTriad, "V", TRIAD),
    (Role::Dominant, Part::DominantSeventh, "V7", SEVENTH),
    (Role::Dominant, Part::LeadingToneSeventh, "viio7", SEVENTH),
    (Role::Dominant, Part::Cadential, "i", SECOND),
    (Role::Dominant, Part::Cadential, "III", FIRST),
    (Role::Predominant, Part::SubdominantTriad, "iv", TRIAD),
    (Role::Predominant, Part::SupertonicSeventh, "iiø7", SEVENTH),
    (Role::Predominant, Part::SubdominantSeventh, "iv7", SEVENTH),
    (Role::Predominant, Part::Submediant, "VI", ROOT),
];

/// One label of the vocabulary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub label: String,
    pub role: Role,
    pub part: Part,
    /// Index into the family's inversion list (0 = root position)
    pub inversion: usize,
}

/// Labels with known roles for one mode, in table order
#[derive(Debug, Clone)]
pub struct Vocabulary {
    mode: Mode,
    entries: Vec<Entry>,
}

impl Vocabulary {
    pub fn for_mode(mode: Mode) -> Self {
        let families = match mode {
            Mode::Major => MAJOR_FAMILIES,
            Mode::Minor => MINOR_FAMILIES,
        };

        let mut entries = Vec::new();
        for &(role, part, root, indices) in families {
            // Every table index is in range for its family
            let labels = get_inversions(root, indices).unwrap_or_default();
            for (label, &inversion) in labels.into_iter().zip(indices) {
                entries.push(Entry {
                    label,
                    role,
                    part,
                    inversion,
                });
            }
        }
        Vocabulary { mode, entries }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry(&self, label: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.label == label)
    }

    pub fn role_of(&self, label: &str) -> Option<Role> {
        self.entry(label).map(|e| e.role)
    }

    pub fn is_tonic(&self, label: &str) -> bool {
        self.role_of(label) == Some(Role::Tonic)
    }

    pub fn is_dominant(&self, label: &str) -> bool {
        self.role_of(label) == Some(Role::Dominant)
    }

    pub fn is_predominant(&self, label: &str) -> bool {
        self.role_of(label) == Some(Role::Predominant)
    }

    /// Labels with the given role, in table order
    pub fn labels(&self, role: Role) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.role == role)
            .map(|e| e.label.as_str())
            .collect()
    }

    /// Labels of one part, optionally restricted to some inversions
    pub fn part_labels(&self, part: Part, inversions: Option<&[usize]>) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.part == part)
            .filter(|e| inversions.map_or(true, |allowed| allowed.contains(&e.inversion)))
            .map(|e| e.label.as_str())
            .collect()
    }
}

/// Whether a figure names a seventh chord
pub fn is_seventh_label(label: &str) -> bool {
    ["7", "65", "43", "42"]
        .iter()
        .any(|figure| label.ends_with(figure))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_inversions() {
        assert_eq!(get_inversions("V7", &[0]).unwrap(), vec!["V7"]);
        assert_eq!(get_inversions("IV", &[0]).unwrap(), vec!["IV"]);
        assert_eq!(
            get_inversions("viio7", &[0, 1, 2, 3]).unwrap(),
            vec!["viio7", "viio65", "viio43", "viio42"]
        );
        assert_eq!(get_inversions("I", &[2, 1]).unwrap(), vec!["I64", "I6"]);
    }

    #[test]
    fn test_get_inversions_rejects_out_of_range() {
        let err = get_inversions("ii", &[3]).unwrap_err();
        assert!(matches!(err, ChoraleError::InvalidInversion { index: 3, .. }));
        assert!(get_inversions("V7", &[4]).is_err());
    }

    #[test]
    fn test_major_roles() {
        let vocab = Vocabulary::for_mode(Mode::Major);
        assert_eq!(vocab.labels(Role::Tonic), vec!["I", "I6", "iii"]);
        assert!(vocab.is_dominant("V65"));
        assert!(vocab.is_dominant("viiø42"));
        assert!(vocab.is_dominant("viio7"));
        assert!(vocab.is_dominant("viio43"));
        assert!(vocab.is_dominant("I64"));
        assert!(vocab.is_dominant("iii6"));
        assert!(vocab.is_predominant("ii43"));
        assert!(vocab.is_predominant("vi"));
        assert!(!vocab.is_predominant("VI"));
        assert_eq!(vocab.role_of("viio"), None);
    }

    #[test]
    fn test_minor_roles() {
        let vocab = Vocabulary::for_mode(Mode::Minor);
        assert_eq!(vocab.labels(Role::Tonic), vec!["i", "i6"]);
        assert!(vocab.is_dominant("viio7"));
        assert!(vocab.is_dominant("i64"));
        assert!(vocab.is_dominant("III6"));
        assert!(vocab.is_predominant("iiø65"));
        assert!(vocab.is_predominant("VI"));
        assert!(!vocab.is_tonic("I"));
    }

    #[test]
    fn test_every_family_is_expanded() {
        // A family whose inversions failed to expand would vanish from these
        let major = Vocabulary::for_mode(Mode::Major);
        assert_eq!(major.entries().len(), 32);
        assert_eq!(major.labels(Role::Tonic).len(), 3);
        assert_eq!(major.labels(Role::Dominant).len(), 16);
        assert_eq!(major.labels(Role::Predominant).len(), 13);

        let minor = Vocabulary::for_mode(Mode::Minor);
        assert_eq!(minor.entries().len(), 25);
        assert_eq!(minor.labels(Role::Tonic).len(), 2);
        assert_eq!(minor.labels(Role::Dominant).len(), 12);
        assert_eq!(minor.labels(Role::Predominant).len(), 11);
    }

    #[test]
    fn test_roles_are_exclusive() {
        for mode in [Mode::Major, Mode::Minor] {
            let vocab = Vocabulary::for_mode(mode);
            for entry in vocab.entries() {
                let roles = [Role::Tonic, Role::Dominant, Role::Predominant]
                    .into_iter()
                    .filter(|&role| vocab.labels(role).contains(&entry.label.as_str()))
                    .count();
                assert_eq!(roles, 1, "{} in {:?}", entry.label, mode);
            }
        }
    }

    #[test]
    fn test_part_labels() {
        let vocab = Vocabulary::for_mode(Mode::Major);
        assert_eq!(vocab.part_labels(Part::Cadential, None), vec!["I64", "iii6"]);
        assert_eq!(
            vocab.part_labels(Part::SubdominantSeventh, Some(&[0, 1][..])),
            vec!["IV7", "IV65"]
        );
    }

    #[test]
    fn test_is_seventh_label() {
        assert!(is_seventh_label("V7"));
        assert!(is_seventh_label("iiø43"));
        assert!(!is_seventh_label("I64"));
        assert!(!is_seventh_label("IV6"));
    }
}
