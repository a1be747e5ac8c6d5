//! Voice leading passes
//!
//! Each pass walks one voice or one pair of voices and returns every
//! violation it sees. Passes that need memory between offsets keep it in
//! a small state enum ([`LeapState`], [`MotionState`]) whose `step`
//! function is pure, so the state machines can be tested on their own.

use crate::config::CheckerConfig;
use crate::error::Result;
use crate::rules::{Diagnostic, RuleKind};
use crate::types::interval::{
    classify_generic, classify_quality, is_fourth, is_lower, is_perfect_fifth, is_perfect_octave,
    GenericInterval, Interval,
};
use crate::types::{Chorale, Pitch, Voice, VoiceId};

/// Undirected generic size from which a melodic move counts as a leap
pub const DEFAULT_LEAP_THRESHOLD: i32 = 4;

/// Largest undirected generic interval allowed between adjacent upper voices
pub const DEFAULT_SPACING_LIMIT: i32 = 8;

/// Flags every augmented second between consecutive notes of a voice
pub fn check_augmented_seconds(voice: &Voice) -> Vec<Diagnostic> {
    voice
        .notes()
        .windows(2)
        .filter(|pair| classify_quality(&pair[0].pitch, &pair[1].pitch).is_augmented_second())
        .map(|pair| Diagnostic::voice(RuleKind::AugmentedSecond, pair[1].offset, voice.id()))
        .collect()
}

/// Whether a voice owes a step after a leap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeapState {
    #[default]
    Idle,
    /// The next move must have exactly this directed generic size
    PendingResolution(i32),
}

impl LeapState {
    /// Advance over one melodic move. Returns the next state and whether
    /// the move failed to resolve a pending leap.
    ///
    /// Repeated pitches are not a move. A failed resolution returns to
    /// `Idle` even if the failing move is itself a leap.
    pub fn step(self, previous: &Pitch, current: &Pitch, threshold: i32) -> (LeapState, bool) {
        if previous == current {
            return (self, false);
        }

        let generic = GenericInterval::between(previous, current);
        match self {
            LeapState::PendingResolution(required) => {
                (LeapState::Idle, generic.directed() != required)
            }
            LeapState::Idle if generic.undirected() >= threshold => (
                LeapState::PendingResolution(-2 * generic.directed().signum()),
                false,
            ),
            LeapState::Idle => (LeapState::Idle, false),
        }
    }
}

/// Flags leaps that are not followed by a step in the opposite direction
pub fn check_unresolved_leaps(voice: &Voice, threshold: i32) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut state = LeapState::Idle;

    for pair in voice.notes().windows(2) {
        let (next, unresolved) = state.step(&pair[0].pitch, &pair[1].pitch, threshold);
        if next != state {
            tracing::trace!(voice = %voice.id(), offset = pair[1].offset, ?next, "leap state");
        }
        if unresolved {
            diagnostics.push(Diagnostic::voice(
                RuleKind::UnresolvedLeap,
                pair[1].offset,
                voice.id(),
            ));
        }
        state = next;
    }

    diagnostics
}

/// Checks whether a line starting on a tone that must resolve moves by
/// `resolve_interval` (a directed generic size, e.g. -2 for a descending
/// second).
///
/// Held notes are skipped; a chromatic inflection against the resolution
/// direction, or any other first move, fails. A line that never moves again
/// counts as resolved.
pub fn resolves(line: &[Pitch], resolve_interval: i32) -> bool {
    let Some((first, rest)) = line.split_first() else {
        return true;
    };

    for pitch in rest {
        let interval = Interval::between(first, pitch);
        if interval.generic.directed() == resolve_interval {
            return true;
        }
        if interval.generic.directed() != 1 || resolve_interval * interval.semitones < 0 {
            return false;
        }
    }
    true
}

/// Flags chordal sevenths that do not resolve down by step in the voice
/// that sounds them
pub fn check_unresolved_sevenths(chorale: &Chorale) -> Vec<Diagnostic> {
    let lines: Vec<(VoiceId, Vec<Pitch>)> = VoiceId::ALL
        .iter()
        .map(|&id| (id, chorale.voice(id).pitches()))
        .collect();

    let mut diagnostics = Vec::new();
    for (index, chord) in chorale.chordify().iter().enumerate() {
        if !chord.is_seventh() {
            continue;
        }
        for (id, line) in &lines {
            if chord.is_seventh_tone(&line[index]) && !resolves(&line[index..], -2) {
                diagnostics.push(Diagnostic::voice(RuleKind::UnresolvedSeventh, index, *id));
            }
        }
    }
    diagnostics
}

/// Flags offsets where two adjacent upper voices are more than `limit`
/// generic steps apart
pub fn check_spacing(lower: &Voice, upper: &Voice, limit: i32) -> Vec<Diagnostic> {
    lower
        .notes()
        .iter()
        .zip(upper.notes())
        .filter(|(l, u)| classify_generic(&l.pitch, &u.pitch).undirected() > limit)
        .map(|(l, _)| Diagnostic::pair(RuleKind::Spacing, l.offset, lower.id(), upper.id()))
        .collect()
}

/// Flags offsets where the nominally lower voice sounds above the upper one
pub fn check_voice_crossing(lower: &Voice, upper: &Voice) -> Vec<Diagnostic> {
    lower
        .notes()
        .iter()
        .zip(upper.notes())
        .filter(|(l, u)| !is_lower(&l.pitch, &u.pitch))
        .map(|(l, _)| Diagnostic::pair(RuleKind::VoiceCrossing, l.offset, lower.id(), upper.id()))
        .collect()
}

/// Flags moves where the lower voice rises above where the upper voice
/// just was, or where the previous slice was already crossed.
///
/// Offsets where neither voice changes pitch continue the same event and
/// are not checked again.
pub fn check_voice_overlapping(lower: &Voice, upper: &Voice) -> Vec<Diagnostic> {
    let lower_notes = lower.notes();
    let upper_notes = upper.notes();
    let len = lower_notes.len().min(upper_notes.len());

    let mut diagnostics = Vec::new();
    for i in 1..len {
        let (prev_lower, prev_upper) = (&lower_notes[i - 1].pitch, &upper_notes[i - 1].pitch);
        let (cur_lower, cur_upper) = (&lower_notes[i].pitch, &upper_notes[i].pitch);
        if prev_lower == cur_lower && prev_upper == cur_upper {
            continue;
        }
        if !is_lower(prev_lower, prev_upper) || !is_lower(cur_lower, prev_upper) {
            diagnostics.push(Diagnostic::pair(
                RuleKind::VoiceOverlapping,
                i,
                lower.id(),
                upper.id(),
            ));
        }
    }
    diagnostics
}

/// Whether the previous vertical of a voice pair formed the tracked interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionState {
    #[default]
    Clear,
    Holding,
}

impl MotionState {
    /// Advance one offset. Returns the next state and whether the pair
    /// moved in parallel into the tracked interval.
    pub fn step(self, forms_interval: bool, lower_moved: bool) -> (MotionState, bool) {
        let parallel = self == MotionState::Holding && forms_interval && lower_moved;
        let next = if forms_interval {
            MotionState::Holding
        } else {
            MotionState::Clear
        };
        (next, parallel)
    }
}

fn check_parallel(
    lower: &Voice,
    upper: &Voice,
    kind: RuleKind,
    forms_interval: fn(&Pitch, &Pitch) -> bool,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut state = MotionState::Clear;
    let mut previous_lower: Option<Pitch> = None;

    for (l, u) in lower.notes().iter().zip(upper.notes()) {
        let lower_moved = previous_lower.is_some_and(|p| p != l.pitch);
        let (next, parallel) = state.step(forms_interval(&l.pitch, &u.pitch), lower_moved);
        if parallel {
            diagnostics.push(Diagnostic::pair(kind, l.offset, lower.id(), upper.id()));
        }
        state = next;
        previous_lower = Some(l.pitch);
    }
    diagnostics
}

pub fn check_parallel_fifths(lower: &Voice, upper: &Voice) -> Vec<Diagnostic> {
    check_parallel(lower, upper, RuleKind::ParallelFifths, is_perfect_fifth)
}

pub fn check_parallel_octaves(lower: &Voice, upper: &Voice) -> Vec<Diagnostic> {
    check_parallel(lower, upper, RuleKind::ParallelOctaves, is_perfect_octave)
}

/// Parallel fourths above the bass
pub fn check_parallel_fourths(bass: &Voice, upper: &Voice) -> Vec<Diagnostic> {
    check_parallel(bass, upper, RuleKind::ParallelFourths, is_fourth)
}

fn check_direct(
    bass: &Voice,
    soprano: &Voice,
    kind: RuleKind,
    forms_interval: fn(&Pitch, &Pitch) -> bool,
) -> Vec<Diagnostic> {
    let bass_notes = bass.notes();
    let soprano_notes = soprano.notes();
    let len = bass_notes.len().min(soprano_notes.len());

    let mut diagnostics = Vec::new();
    for i in 1..len {
        if !forms_interval(&bass_notes[i].pitch, &soprano_notes[i].pitch) {
            continue;
        }
        let bass_motion = classify_generic(&bass_notes[i - 1].pitch, &bass_notes[i].pitch);
        let soprano_motion =
            classify_generic(&soprano_notes[i - 1].pitch, &soprano_notes[i].pitch);
        if bass_motion.direction() * soprano_motion.direction() > 0
            && soprano_motion.undirected() > 2
        {
            diagnostics.push(Diagnostic::pair(kind, i, bass.id(), soprano.id()));
        }
    }
    diagnostics
}

/// Similar motion into a fifth with a leap in the soprano
pub fn check_direct_fifths(bass: &Voice, soprano: &Voice) -> Vec<Diagnostic> {
    check_direct(bass, soprano, RuleKind::DirectFifths, is_perfect_fifth)
}

/// Similar motion into an octave with a leap in the soprano
pub fn check_direct_octaves(bass: &Voice, soprano: &Voice) -> Vec<Diagnostic> {
    check_direct(bass, soprano, RuleKind::DirectOctaves, is_perfect_octave)
}

/// Runs every enabled voice-leading pass over a chorale
pub struct VoiceLeadingChecker<'a> {
    config: &'a CheckerConfig,
}

impl<'a> VoiceLeadingChecker<'a> {
    pub fn new(config: &'a CheckerConfig) -> Self {
        Self { config }
    }

    fn run(
        &self,
        kind: RuleKind,
        scope: &str,
        diagnostics: &mut Vec<Diagnostic>,
        pass: impl FnOnce() -> Vec<Diagnostic>,
    ) {
        if !self.config.is_enabled(kind) {
            return;
        }
        let found = pass();
        tracing::debug!(rule = %kind, scope, count = found.len(), "voice-leading pass");
        diagnostics.extend(found);
    }

    /// Diagnostics come out grouped by pass: single voices bottom-up,
    /// sevenths, adjacent pairs, all pairs, then the bass-anchored checks.
    pub fn check(&self, chorale: &Chorale) -> Result<Vec<Diagnostic>> {
        chorale.ensure_not_empty()?;

        let voices: Vec<Voice> = VoiceId::ALL.iter().map(|&id| chorale.voice(id)).collect();
        let voice = |id: VoiceId| &voices[id.index()];
        let mut diagnostics = Vec::new();

        for v in &voices {
            let scope = v.id().name();
            self.run(RuleKind::AugmentedSecond, scope, &mut diagnostics, || {
                check_augmented_seconds(v)
            });
            if v.id() != VoiceId::Bass {
                self.run(RuleKind::UnresolvedLeap, scope, &mut diagnostics, || {
                    check_unresolved_leaps(v, self.config.leap_threshold)
                });
            }
        }

        self.run(RuleKind::UnresolvedSeventh, "all", &mut diagnostics, || {
            check_unresolved_sevenths(chorale)
        });

        for (lower, upper) in VoiceId::adjacent_pairs() {
            let scope = format!("{}-{}", lower, upper);
            let (l, u) = (voice(lower), voice(upper));
            if lower != VoiceId::Bass {
                self.run(RuleKind::Spacing, &scope, &mut diagnostics, || {
                    check_spacing(l, u, self.config.spacing_limit)
                });
            }
            self.run(RuleKind::VoiceCrossing, &scope, &mut diagnostics, || {
                check_voice_crossing(l, u)
            });
            self.run(RuleKind::VoiceOverlapping, &scope, &mut diagnostics, || {
                check_voice_overlapping(l, u)
            });
        }

        for (lower, upper) in VoiceId::all_pairs() {
            let scope = format!("{}-{}", lower, upper);
            let (l, u) = (voice(lower), voice(upper));
            self.run(RuleKind::ParallelFifths, &scope, &mut diagnostics, || {
                check_parallel_fifths(l, u)
            });
            self.run(RuleKind::ParallelOctaves, &scope, &mut diagnostics, || {
                check_parallel_octaves(l, u)
            });
        }

        let bass = voice(VoiceId::Bass);
        for &upper in &self.config.parallel_fourths_voices {
            if upper == VoiceId::Bass {
                continue;
            }
            let scope = format!("bass-{}", upper);
            self.run(RuleKind::ParallelFourths, &scope, &mut diagnostics, || {
                check_parallel_fourths(bass, voice(upper))
            });
        }

        let soprano = voice(VoiceId::Soprano);
        self.run(RuleKind::DirectFifths, "bass-soprano", &mut diagnostics, || {
            check_direct_fifths(bass, soprano)
        });
        self.run(RuleKind::DirectOctaves, "bass-soprano", &mut diagnostics, || {
            check_direct_octaves(bass, soprano)
        });

        Ok(diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice(id: VoiceId, pitches: &str) -> Voice {
        Voice::parse(id, pitches).unwrap()
    }

    fn indices(diagnostics: &[Diagnostic]) -> Vec<usize> {
        diagnostics.iter().map(|d| d.index).collect()
    }

    fn p(s: &str) -> Pitch {
        s.parse().unwrap()
    }

    #[test]
    fn test_augmented_seconds() {
        let soprano = voice(VoiceId::Soprano, "D5 E-5 F#5");
        let bass = voice(VoiceId::Bass, "B-2 G2 A2");
        assert_eq!(indices(&check_augmented_seconds(&soprano)), vec![2]);
        assert!(check_augmented_seconds(&bass).is_empty());
    }

    #[test]
    fn test_minor_thirds_are_not_augmented_seconds() {
        // Same sound as an augmented second, spelled as a third
        let alto = voice(VoiceId::Alto, "Eb4 Gb4 Eb4 C4 D4");
        assert!(check_augmented_seconds(&alto).is_empty());
    }

    #[test]
    fn test_augmented_seconds_reports_every_occurrence() {
        let tenor = voice(VoiceId::Tenor, "F3 G#3 A3 G#3 F3");
        assert_eq!(indices(&check_augmented_seconds(&tenor)), vec![1, 4]);
    }

    #[test]
    fn test_unresolved_leaps() {
        let soprano = voice(VoiceId::Soprano, "C5 F5 E5");
        let alto = voice(VoiceId::Alto, "G4 D4 C4");
        assert!(check_unresolved_leaps(&soprano, DEFAULT_LEAP_THRESHOLD).is_empty());

        let found = check_unresolved_leaps(&alto, DEFAULT_LEAP_THRESHOLD);
        assert_eq!(indices(&found), vec![2]);
        assert_eq!(found[0].voices, vec![VoiceId::Alto]);
    }

    #[test]
    fn test_leap_state_machine() {
        let (state, unresolved) = LeapState::Idle.step(&p("C4"), &p("A4"), 4);
        assert_eq!(state, LeapState::PendingResolution(-2));
        assert!(!unresolved);

        let (resolved, unresolved) = state.step(&p("A4"), &p("G4"), 4);
        assert_eq!(resolved, LeapState::Idle);
        assert!(!unresolved);

        let (failed, unresolved) = state.step(&p("A4"), &p("B4"), 4);
        assert_eq!(failed, LeapState::Idle);
        assert!(unresolved);

        // A repeated note neither resolves nor fails
        let (held, unresolved) = state.step(&p("A4"), &p("A4"), 4);
        assert_eq!(held, state);
        assert!(!unresolved);
    }

    #[test]
    fn test_leap_followed_by_wrong_step_reports_once() {
        let soprano = voice(VoiceId::Soprano, "C5 A5 B5 C6 D6");
        assert_eq!(
            indices(&check_unresolved_leaps(&soprano, DEFAULT_LEAP_THRESHOLD)),
            vec![2]
        );
    }

    #[test]
    fn test_failed_resolution_does_not_start_new_leap() {
        // G4 -> D5 leaps up, D5 -> G4 leaps back instead of stepping, then
        // G4 -> C5 is a fresh leap that resolves to B4
        let alto = voice(VoiceId::Alto, "G4 D5 G4 C5 B4");
        assert_eq!(
            indices(&check_unresolved_leaps(&alto, DEFAULT_LEAP_THRESHOLD)),
            vec![2]
        );
    }

    #[test]
    fn test_held_notes_defer_leap_resolution() {
        let tenor = voice(VoiceId::Tenor, "C4 G4 G4 F4");
        assert!(check_unresolved_leaps(&tenor, DEFAULT_LEAP_THRESHOLD).is_empty());
    }

    #[test]
    fn test_resolves() {
        let line = [p("F4"), p("E4"), p("F4")];
        assert!(resolves(&line, -2));
        assert!(!resolves(&line, 2));

        let held = [p("F4"), p("F4"), p("E4")];
        assert!(resolves(&held, -2));

        let inflected_up = [p("F4"), p("F#4"), p("E4")];
        assert!(!resolves(&inflected_up, -2));

        assert!(resolves(&[p("F4")], -2));
        assert!(resolves(&[p("F4"), p("F4")], -2));
    }

    #[test]
    fn test_unresolved_sevenths() {
        // V7 - I with the seventh (F4 in the alto) resolving to E4
        let resolved = Chorale::from_lines("D5 C5", "F4 E4", "B3 C4", "G2 C3").unwrap();
        assert!(check_unresolved_sevenths(&resolved).is_empty());

        // Same progression with the seventh leaping up to G4
        let unresolved = Chorale::from_lines("D5 C5", "F4 G4", "B3 C4", "G2 C3").unwrap();
        let found = check_unresolved_sevenths(&unresolved);
        assert_eq!(indices(&found), vec![0]);
        assert_eq!(found[0].voices, vec![VoiceId::Alto]);
    }

    #[test]
    fn test_spacing() {
        let soprano = voice(VoiceId::Soprano, "C5 D5 E5");
        let alto = voice(VoiceId::Alto, "A4 B4 A4");
        let tenor = voice(VoiceId::Tenor, "A3 G3 A3");
        assert!(check_spacing(&alto, &soprano, DEFAULT_SPACING_LIMIT).is_empty());

        let found = check_spacing(&tenor, &alto, DEFAULT_SPACING_LIMIT);
        assert_eq!(indices(&found), vec![1]);
        assert_eq!(found[0].voices, vec![VoiceId::Tenor, VoiceId::Alto]);
    }

    #[test]
    fn test_voice_crossing() {
        let soprano = voice(VoiceId::Soprano, "C5 B4 A4");
        let alto = voice(VoiceId::Alto, "A4 B4 C5");
        let tenor = voice(VoiceId::Tenor, "A3 G3 A3");
        assert_eq!(indices(&check_voice_crossing(&alto, &soprano)), vec![2]);
        assert!(check_voice_crossing(&tenor, &soprano).is_empty());
    }

    #[test]
    fn test_voice_crossing_symmetric_under_relabeling() {
        let lower = voice(VoiceId::Alto, "A4 B4 C5 E5");
        let upper = voice(VoiceId::Soprano, "C5 B4 A4 D5");
        let forward = indices(&check_voice_crossing(&lower, &upper));

        // Swap the roles: the old upper line is now nominally lower, and the
        // comparison flips to "upper sounds strictly below lower"
        let swapped_lower = voice(VoiceId::Alto, "C5 B4 A4 D5");
        let swapped_upper = voice(VoiceId::Soprano, "A4 B4 C5 E5");
        let mirrored: Vec<usize> = swapped_lower
            .notes()
            .iter()
            .zip(swapped_upper.notes())
            .filter(|(l, u)| l.pitch < u.pitch)
            .map(|(l, _)| l.offset)
            .collect();
        assert_eq!(forward, mirrored);
        assert_eq!(forward, vec![2, 3]);
    }

    #[test]
    fn test_voice_overlapping() {
        let soprano = voice(VoiceId::Soprano, "C5 E5 G5");
        let alto = voice(VoiceId::Alto, "A4 D5 C5");
        let tenor = voice(VoiceId::Tenor, "A3 G3 A3");
        assert_eq!(indices(&check_voice_overlapping(&alto, &soprano)), vec![1]);
        assert!(check_voice_overlapping(&tenor, &alto).is_empty());
    }

    #[test]
    fn test_overlapping_skips_repeated_events() {
        // The crossed slice at 0 is repeated at 1; only the move at 2 is
        // a new event, and it still starts from a crossed slice
        let lower = voice(VoiceId::Tenor, "E4 E4 C4");
        let upper = voice(VoiceId::Alto, "D4 D4 F4");
        assert_eq!(indices(&check_voice_overlapping(&lower, &upper)), vec![2]);
    }

    #[test]
    fn test_parallel_fifths() {
        let soprano = voice(VoiceId::Soprano, "F5 G5 A5");
        let alto = voice(VoiceId::Alto, "G4 G4 G4");
        let bass = voice(VoiceId::Bass, "C3 C3 D3");
        assert!(check_parallel_fifths(&alto, &soprano).is_empty());
        assert_eq!(indices(&check_parallel_fifths(&bass, &soprano)), vec![2]);
        assert!(check_parallel_fifths(&bass, &alto).is_empty());
    }

    #[test]
    fn test_static_fifth_is_not_parallel() {
        let lower = voice(VoiceId::Tenor, "C4 C4 C4");
        let upper = voice(VoiceId::Soprano, "G4 G5 G4");
        assert!(check_parallel_fifths(&lower, &upper).is_empty());

        let moving = voice(VoiceId::Tenor, "C4 D4 C4");
        let upper = voice(VoiceId::Soprano, "G4 A4 G4");
        assert_eq!(indices(&check_parallel_fifths(&moving, &upper)), vec![1, 2]);
    }

    #[test]
    fn test_parallel_octaves() {
        let soprano = voice(VoiceId::Soprano, "D5 C5 D5");
        let alto = voice(VoiceId::Alto, "C4 C4 G4");
        let bass = voice(VoiceId::Bass, "C3 C3 D3");
        assert!(check_parallel_octaves(&alto, &soprano).is_empty());
        assert_eq!(indices(&check_parallel_octaves(&bass, &soprano)), vec![2]);
        assert!(check_parallel_octaves(&bass, &alto).is_empty());
    }

    #[test]
    fn test_parallel_unisons_are_not_octaves() {
        let lower = voice(VoiceId::Tenor, "C4 D4");
        let upper = voice(VoiceId::Alto, "C4 D4");
        assert!(check_parallel_octaves(&lower, &upper).is_empty());
    }

    #[test]
    fn test_parallel_fourths() {
        let bass = voice(VoiceId::Bass, "C2 D2 E2");
        let tenor = voice(VoiceId::Tenor, "F3 G3 A3");
        let soprano = voice(VoiceId::Soprano, "A4 G4 F4");
        assert_eq!(indices(&check_parallel_fourths(&bass, &tenor)), vec![1, 2]);
        assert!(check_parallel_fourths(&bass, &soprano).is_empty());
    }

    #[test]
    fn test_motion_state() {
        assert_eq!(MotionState::Clear.step(true, true), (MotionState::Holding, false));
        assert_eq!(MotionState::Holding.step(true, true), (MotionState::Holding, true));
        assert_eq!(MotionState::Holding.step(true, false), (MotionState::Holding, false));
        assert_eq!(MotionState::Holding.step(false, true), (MotionState::Clear, false));
    }

    #[test]
    fn test_direct_fifths() {
        let soprano = voice(VoiceId::Soprano, "C5 C5 E5");
        let bass = voice(VoiceId::Bass, "E3 G3 A3");
        assert_eq!(indices(&check_direct_fifths(&bass, &soprano)), vec![2]);

        let stepping = voice(VoiceId::Soprano, "C5 D5 E5");
        assert!(check_direct_fifths(&bass, &stepping).is_empty());
    }

    #[test]
    fn test_direct_octaves() {
        let soprano = voice(VoiceId::Soprano, "C5 D5 E5");
        let bass = voice(VoiceId::Bass, "E3 D3 A3");
        assert!(check_direct_octaves(&bass, &soprano).is_empty());

        let leaping = voice(VoiceId::Soprano, "E5 E5 A5");
        assert_eq!(indices(&check_direct_octaves(&bass, &leaping)), vec![2]);
    }

    #[test]
    fn test_oblique_motion_into_octave_is_not_direct() {
        let bass = voice(VoiceId::Bass, "A2 A2");
        let soprano = voice(VoiceId::Soprano, "E4 A4");
        assert!(check_direct_octaves(&bass, &soprano).is_empty());
    }

    #[test]
    fn test_checker_respects_disabled_rules() {
        let chorale = Chorale::from_lines("D5 E-5 F#5", "G4 G4 A4", "B3 C4 D4", "G2 C3 D3").unwrap();
        let mut config = CheckerConfig::default();
        let all = VoiceLeadingChecker::new(&config).check(&chorale).unwrap();
        assert!(all.iter().any(|d| d.kind == RuleKind::AugmentedSecond));

        config.disable(RuleKind::AugmentedSecond);
        let filtered = VoiceLeadingChecker::new(&config).check(&chorale).unwrap();
        assert!(filtered.iter().all(|d| d.kind != RuleKind::AugmentedSecond));
    }

    #[test]
    fn test_checker_rejects_empty_chorale() {
        let config = CheckerConfig::default();
        assert!(VoiceLeadingChecker::new(&config)
            .check(&Chorale::new())
            .is_err());
    }
}
