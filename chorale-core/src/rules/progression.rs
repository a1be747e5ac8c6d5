//! Progression grammar
//!
//! [`expected_next`] answers which labels may follow a label, and
//! [`ChordWalker`] walks a labeled progression yielding a diagnostic for
//! every move the grammar does not allow.

use crate::error::{ChoraleError, Result};
use crate::rules::harmony::{Part, Role, Vocabulary};
use crate::rules::Diagnostic;

const HEAD: &[usize] = &[0, 1];

/// Push labels that are not already present, keeping order
fn extend_unique<'a>(target: &mut Vec<&'a str>, labels: Vec<&'a str>) {
    for label in labels {
        if !target.contains(&label) {
            target.push(label);
        }
    }
}

fn remove_all(target: &mut Vec<&str>, labels: &[&str]) {
    target.retain(|label| !labels.contains(label));
}

fn after_dominant<'a>(part: Part, inversion: usize, vocab: &'a Vocabulary) -> Vec<&'a str> {
    if part == Part::Cadential {
        return vocab.part_labels(Part::DominantTriad, Some(&[0][..]));
    }

    let mut next = vocab.labels(Role::Tonic);
    extend_unique(&mut next, vocab.part_labels(Part::DominantSeventh, None));
    if part == Part::DominantTriad && HEAD.contains(&inversion) {
        extend_unique(&mut next, vocab.part_labels(Part::DominantTriad, None));
    }
    next
}

fn after_predominant<'a>(part: Part, inversion: usize, vocab: &'a Vocabulary) -> Vec<&'a str> {
    let mut next = vocab.labels(Role::Predominant);
    extend_unique(&mut next, vocab.labels(Role::Dominant));
    if part == Part::Submediant {
        return next;
    }

    remove_all(&mut next, &vocab.part_labels(Part::Submediant, None));
    if part == Part::SubdominantTriad {
        return next;
    }

    remove_all(&mut next, &vocab.part_labels(Part::SubdominantTriad, Some(HEAD)));
    if part == Part::SubdominantSeventh {
        return next;
    }

    remove_all(&mut next, &vocab.part_labels(Part::SubdominantSeventh, Some(HEAD)));
    let is_supertonic_head = part == Part::SupertonicTriad && HEAD.contains(&inversion);
    if !is_supertonic_head {
        remove_all(&mut next, &vocab.part_labels(Part::SupertonicTriad, Some(HEAD)));
    }
    next
}

/// Labels allowed to follow `label`. Unknown labels allow nothing.
///
/// Tonics may go anywhere in the vocabulary. Dominants go to a tonic or a
/// dominant seventh, and a dominant triad may also be repeated or
/// reinverted; cadential six-fours go only to the dominant. Predominants
/// may not move back down the chain submediant, subdominant, supertonic.
pub fn expected_next<'a>(label: &str, vocab: &'a Vocabulary) -> Vec<&'a str> {
    let Some(entry) = vocab.entry(label) else {
        return Vec::new();
    };

    match entry.role {
        Role::Tonic => {
            let mut next = vocab.labels(Role::Dominant);
            extend_unique(&mut next, vocab.labels(Role::Predominant));
            extend_unique(&mut next, vocab.labels(Role::Tonic));
            next
        }
        Role::Dominant => after_dominant(entry.part, entry.inversion, vocab),
        Role::Predominant => after_predominant(entry.part, entry.inversion, vocab),
    }
}

/// Walks adjacent label pairs, yielding one diagnostic per illegal move.
///
/// After a violation the walker skips past the offending chord, so a bad
/// label is not reported again as the start of the following move.
pub struct ChordWalker<'a> {
    labels: &'a [String],
    vocab: &'a Vocabulary,
    index: usize,
}

impl<'a> ChordWalker<'a> {
    pub fn new(labels: &'a [String], vocab: &'a Vocabulary) -> Result<Self> {
        if labels.is_empty() {
            return Err(ChoraleError::EmptyProgression);
        }
        Ok(ChordWalker {
            labels,
            vocab,
            index: 0,
        })
    }

    /// Position of the chord whose move is examined next
    pub fn index(&self) -> usize {
        self.index
    }
}

impl Iterator for ChordWalker<'_> {
    type Item = Diagnostic;

    fn next(&mut self) -> Option<Diagnostic> {
        while self.index + 1 < self.labels.len() {
            let from = &self.labels[self.index];
            let to = &self.labels[self.index + 1];
            let allowed = expected_next(from, self.vocab).contains(&to.as_str());
            if allowed {
                self.index += 1;
                continue;
            }

            let diagnostic = Diagnostic::progression(self.index + 1, from, to);
            tracing::trace!(from = %from, to = %to, index = self.index + 1, "illegal move");
            self.index += 2;
            return Some(diagnostic);
        }
        None
    }
}

/// Every illegal move in a labeled progression
pub fn walk(labels: &[String], vocab: &Vocabulary) -> Result<Vec<Diagnostic>> {
    Ok(ChordWalker::new(labels, vocab)?.collect())
}
