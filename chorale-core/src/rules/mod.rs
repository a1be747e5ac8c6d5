//! Rule engine: voice-leading passes and the progression grammar
//!
//! Every pass returns the diagnostics it found instead of stopping at the
//! first one, so a single run reports everything wrong with a chorale.

pub mod harmony;
pub mod progression;
pub mod voice_leading;

use crate::error::{ChoraleError, Result};
use crate::types::VoiceId;
use std::fmt;
use std::str::FromStr;

/// One kind per rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum RuleKind {
    AugmentedSecond,
    UnresolvedLeap,
    UnresolvedSeventh,
    Spacing,
    VoiceCrossing,
    VoiceOverlapping,
    ParallelFourths,
    ParallelFifths,
    ParallelOctaves,
    DirectFifths,
    DirectOctaves,
    IllegalProgression,
}

impl RuleKind {
    pub const ALL: [RuleKind; 12] = [
        RuleKind::AugmentedSecond,
        RuleKind::UnresolvedLeap,
        RuleKind::UnresolvedSeventh,
        RuleKind::Spacing,
        RuleKind::VoiceCrossing,
        RuleKind::VoiceOverlapping,
        RuleKind::ParallelFourths,
        RuleKind::ParallelFifths,
        RuleKind::ParallelOctaves,
        RuleKind::DirectFifths,
        RuleKind::DirectOctaves,
        RuleKind::IllegalProgression,
    ];

    /// Kebab-case name used in configuration and commands
    pub fn name(self) -> &'static str {
        match self {
            RuleKind::AugmentedSecond => "augmented-second",
            RuleKind::UnresolvedLeap => "unresolved-leap",
            RuleKind::UnresolvedSeventh => "unresolved-seventh",
            RuleKind::Spacing => "spacing",
            RuleKind::VoiceCrossing => "voice-crossing",
            RuleKind::VoiceOverlapping => "voice-overlapping",
            RuleKind::ParallelFourths => "parallel-fourths",
            RuleKind::ParallelFifths => "parallel-fifths",
            RuleKind::ParallelOctaves => "parallel-octaves",
            RuleKind::DirectFifths => "direct-fifths",
            RuleKind::DirectOctaves => "direct-octaves",
            RuleKind::IllegalProgression => "illegal-progression",
        }
    }

    /// What the diagnostic message says was found
    fn description(self) -> &'static str {
        match self {
            RuleKind::AugmentedSecond => "augmented second",
            RuleKind::UnresolvedLeap => "unresolved leap",
            RuleKind::UnresolvedSeventh => "unresolved seventh",
            RuleKind::Spacing => "spacing error",
            RuleKind::VoiceCrossing => "voice crossing",
            RuleKind::VoiceOverlapping => "voice overlapping",
            RuleKind::ParallelFourths => "parallel fourths",
            RuleKind::ParallelFifths => "parallel fifths",
            RuleKind::ParallelOctaves => "parallel octaves",
            RuleKind::DirectFifths => "direct fifth",
            RuleKind::DirectOctaves => "direct octave",
            RuleKind::IllegalProgression => "invalid chord progression",
        }
    }

    /// Whether the rule belongs to the voice-leading checker
    pub fn is_voice_leading(self) -> bool {
        self != RuleKind::IllegalProgression
    }
}

impl FromStr for RuleKind {
    type Err = ChoraleError;

    /// Accepts kebab-case or snake_case names, case-insensitively
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        RuleKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| ChoraleError::UnknownRule(s.to_string()))
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single rule violation, located by offset
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    pub kind: RuleKind,
    pub index: usize,
    /// Voices involved, lower voice first for pairs
    pub voices: Vec<VoiceId>,
    /// Offending (from, to) labels for progression errors
    pub labels: Option<(String, String)>,
    pub message: String,
}

impl Diagnostic {
    fn new(kind: RuleKind, index: usize, voices: Vec<VoiceId>) -> Self {
        Diagnostic {
            kind,
            index,
            voices,
            labels: None,
            message: format!("Found {} at index {}", kind.description(), index),
        }
    }

    /// A violation inside one voice
    pub fn voice(kind: RuleKind, index: usize, voice: VoiceId) -> Self {
        Self::new(kind, index, vec![voice])
    }

    /// A violation between two voices
    pub fn pair(kind: RuleKind, index: usize, lower: VoiceId, upper: VoiceId) -> Self {
        Self::new(kind, index, vec![lower, upper])
    }

    /// An illegal move from `from` to the chord at `index`
    pub fn progression(index: usize, from: &str, to: &str) -> Self {
        let mut diagnostic = Self::new(RuleKind::IllegalProgression, index, Vec::new());
        diagnostic.message = format!("{} ({} -> {})", diagnostic.message, from, to);
        diagnostic.labels = Some((from.to_string(), to.to_string()));
        diagnostic
    }

    /// "alto & soprano" style prefix, empty for progression errors
    pub fn location(&self) -> String {
        self.voices
            .iter()
            .map(|v| v.name())
            .collect::<Vec<_>>()
            .join(" & ")
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.voices.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.location(), self.message)
        }
    }
}
