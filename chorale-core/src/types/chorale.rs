//! Four-voice chorale storage
//!
//! A [`Chorale`] is stored as aligned columns: one [`Slice`] per offset,
//! each holding exactly one pitch for every voice. Voices therefore can
//! never drift out of step; [`Voice`] is a materialized view of one column.

use crate::error::{ChoraleError, Result};
use crate::types::chord::Chord;
use crate::types::pitch::Pitch;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

/// The four voice parts, ordered from the bottom up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VoiceId {
    Bass,
    Tenor,
    Alto,
    Soprano,
}

impl VoiceId {
    /// Bottom-up order, used when pairing voices
    pub const ALL: [VoiceId; 4] = [VoiceId::Bass, VoiceId::Tenor, VoiceId::Alto, VoiceId::Soprano];

    /// Score order, used for input and display
    pub const TOP_DOWN: [VoiceId; 4] = [VoiceId::Soprano, VoiceId::Alto, VoiceId::Tenor, VoiceId::Bass];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            VoiceId::Bass => "bass",
            VoiceId::Tenor => "tenor",
            VoiceId::Alto => "alto",
            VoiceId::Soprano => "soprano",
        }
    }

    /// Adjacent (lower, upper) pairs from the bottom up
    pub fn adjacent_pairs() -> impl Iterator<Item = (VoiceId, VoiceId)> {
        let all: &'static [VoiceId; 4] = &Self::ALL;
        all.windows(2).map(|w| (w[0], w[1]))
    }

    /// Every unordered (lower, upper) pair
    pub fn all_pairs() -> impl Iterator<Item = (VoiceId, VoiceId)> {
        let all: &'static [VoiceId; 4] = &Self::ALL;
        all.iter()
            .enumerate()
            .flat_map(move |(i, &lower)| all[i + 1..].iter().map(move |&upper| (lower, upper)))
    }
}

impl FromStr for VoiceId {
    type Err = ChoraleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "bass" | "b" => Ok(VoiceId::Bass),
            "tenor" | "t" => Ok(VoiceId::Tenor),
            "alto" | "a" => Ok(VoiceId::Alto),
            "soprano" | "s" => Ok(VoiceId::Soprano),
            other => Err(ChoraleError::Syntax {
                line: 0,
                message: format!("unknown voice '{}'", other),
            }),
        }
    }
}

impl fmt::Display for VoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A pitch placed at a chord-slice offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Note {
    pub pitch: Pitch,
    pub offset: usize,
}

/// One vertical slice: a pitch for every voice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    pitches: [Pitch; 4], // indexed by VoiceId::index
}

impl Slice {
    pub fn new(soprano: Pitch, alto: Pitch, tenor: Pitch, bass: Pitch) -> Self {
        Slice {
            pitches: [bass, tenor, alto, soprano],
        }
    }

    /// Pitches bottom-up (bass first)
    pub fn pitches(&self) -> &[Pitch; 4] {
        &self.pitches
    }

    pub fn to_chord(&self) -> Chord {
        Chord::from_pitches(self.pitches.to_vec())
    }
}

impl Index<VoiceId> for Slice {
    type Output = Pitch;

    fn index(&self, voice: VoiceId) -> &Pitch {
        &self.pitches[voice.index()]
    }
}

/// One voice's notes, indexed 0..n-1 by offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    id: VoiceId,
    notes: Vec<Note>,
}

impl Voice {
    pub fn new(id: VoiceId, pitches: Vec<Pitch>) -> Self {
        let notes = pitches
            .into_iter()
            .enumerate()
            .map(|(offset, pitch)| Note { pitch, offset })
            .collect();
        Voice { id, notes }
    }

    /// Parse a whitespace-separated list of pitch names
    pub fn parse(id: VoiceId, text: &str) -> Result<Self> {
        let pitches = text
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<Pitch>>>()?;
        Ok(Voice::new(id, pitches))
    }

    pub fn id(&self) -> VoiceId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn pitch(&self, offset: usize) -> Pitch {
        self.notes[offset].pitch
    }

    pub fn pitches(&self) -> Vec<Pitch> {
        self.notes.iter().map(|n| n.pitch).collect()
    }
}

/// A four-voice chorale
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chorale {
    slices: Vec<Slice>,
}

impl Chorale {
    /// An empty chorale, to be extended slice by slice
    pub fn new() -> Self {
        Chorale { slices: Vec::new() }
    }

    /// Build from four voice lines. Fails unless all voices have the same
    /// non-zero length.
    pub fn from_voices(
        soprano: Vec<Pitch>,
        alto: Vec<Pitch>,
        tenor: Vec<Pitch>,
        bass: Vec<Pitch>,
    ) -> Result<Self> {
        let lengths = [soprano.len(), alto.len(), tenor.len(), bass.len()];
        if lengths.iter().any(|&len| len != lengths[0]) {
            return Err(ChoraleError::MismatchedVoices {
                soprano: lengths[0],
                alto: lengths[1],
                tenor: lengths[2],
                bass: lengths[3],
            });
        }
        if lengths[0] == 0 {
            return Err(ChoraleError::EmptyChorale);
        }

        let slices = (0..lengths[0])
            .map(|i| Slice::new(soprano[i], alto[i], tenor[i], bass[i]))
            .collect();
        Ok(Chorale { slices })
    }

    /// Build from four whitespace-separated pitch lines in score order
    pub fn from_lines(soprano: &str, alto: &str, tenor: &str, bass: &str) -> Result<Self> {
        Self::from_voices(
            Voice::parse(VoiceId::Soprano, soprano)?.pitches(),
            Voice::parse(VoiceId::Alto, alto)?.pitches(),
            Voice::parse(VoiceId::Tenor, tenor)?.pitches(),
            Voice::parse(VoiceId::Bass, bass)?.pitches(),
        )
    }

    /// Append one slice (one note per voice)
    pub fn push(&mut self, slice: Slice) {
        self.slices.push(slice);
    }

    /// Remove and return the last slice
    pub fn pop(&mut self) -> Option<Slice> {
        self.slices.pop()
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Fails with [`ChoraleError::EmptyChorale`] when there is nothing to check
    pub fn ensure_not_empty(&self) -> Result<()> {
        if self.is_empty() {
            Err(ChoraleError::EmptyChorale)
        } else {
            Ok(())
        }
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    pub fn slice(&self, offset: usize) -> Option<&Slice> {
        self.slices.get(offset)
    }

    pub fn voice(&self, id: VoiceId) -> Voice {
        Voice::new(id, self.slices.iter().map(|s| s[id]).collect())
    }

    /// Every pitch in the chorale, slice by slice
    pub fn pitches(&self) -> impl Iterator<Item = &Pitch> + '_ {
        self.slices.iter().flat_map(|s| s.pitches().iter())
    }

    /// One chord per offset across all four voices
    pub fn chordify(&self) -> Vec<Chord> {
        self.slices.iter().map(Slice::to_chord).collect()
    }
}

impl FromStr for Chorale {
    type Err = ChoraleError;

    /// Reads four voice lines (soprano, alto, tenor, bass). Blank lines and
    /// lines starting with `#` are skipped.
    fn from_str(text: &str) -> Result<Self> {
        let mut voices: Vec<Vec<Pitch>> = Vec::with_capacity(4);

        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if voices.len() == 4 {
                return Err(ChoraleError::Syntax {
                    line: number + 1,
                    message: "expected exactly four voice lines".to_string(),
                });
            }

            let mut pitches = Vec::new();
            for (column, token) in line.split_whitespace().enumerate() {
                let pitch = token.parse::<Pitch>().map_err(|_| ChoraleError::Syntax {
                    line: number + 1,
                    message: format!("invalid pitch '{}' at position {}", token, column + 1),
                })?;
                pitches.push(pitch);
            }
            voices.push(pitches);
        }

        if voices.len() != 4 {
            return Err(ChoraleError::Syntax {
                line: text.lines().count(),
                message: format!("expected four voice lines, found {}", voices.len()),
            });
        }

        let bass = voices.pop().unwrap_or_default();
        let tenor = voices.pop().unwrap_or_default();
        let alto = voices.pop().unwrap_or_default();
        let soprano = voices.pop().unwrap_or_default();
        Chorale::from_voices(soprano, alto, tenor, bass)
    }
}

impl fmt::Display for Chorale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, id) in VoiceId::TOP_DOWN.iter().enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            write!(f, "{:<8}", id.name())?;
            for slice in &self.slices {
                write!(f, " {:<5}", slice[*id].to_string())?;
            }
        }
        Ok(())
    }
}
