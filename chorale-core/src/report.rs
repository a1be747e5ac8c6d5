//! Check results
//!
//! A [`Report`] holds every diagnostic from one run together with the key
//! and chord labels the harmony check worked from.

use crate::rules::{Diagnostic, RuleKind};
use crate::types::Key;
#[cfg(feature = "colored")]
use colored::*;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Report {
    /// Key used for labeling, when the harmony check ran
    pub key: Option<Key>,
    /// One label per slice ("?" for chords that could not be labeled)
    pub labels: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Diagnostics of one rule, in report order
    pub fn of_kind(&self, kind: RuleKind) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }

    pub fn counts_by_rule(&self) -> BTreeMap<RuleKind, usize> {
        let mut counts = BTreeMap::new();
        for diagnostic in &self.diagnostics {
            *counts.entry(diagnostic.kind).or_insert(0) += 1;
        }
        counts
    }

    /// Append another report's findings. The key and labels of `other`
    /// replace ours when present.
    pub fn merge(&mut self, other: Report) {
        if other.key.is_some() {
            self.key = other.key;
        }
        if !other.labels.is_empty() {
            self.labels = other.labels;
        }
        self.diagnostics.extend(other.diagnostics);
    }

    /// One-line result, e.g. "Result: 2 errors"
    pub fn summary(&self) -> String {
        match self.count() {
            0 => "Result: no errors".to_string(),
            1 => "Result: 1 error".to_string(),
            n => format!("Result: {} errors", n),
        }
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(feature = "colored")]
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(key) = &self.key {
            writeln!(f, "{} {}", "Key:".bold(), key.to_string().cyan())?;
        }
        if !self.labels.is_empty() {
            let labels: Vec<String> = self
                .labels
                .iter()
                .map(|l| {
                    if l == "?" {
                        l.bright_black().to_string()
                    } else {
                        l.green().to_string()
                    }
                })
                .collect();
            writeln!(f, "{} {}", "Chords:".bold(), labels.join(" "))?;
        }
        for diagnostic in &self.diagnostics {
            writeln!(f, "  {} {}", "✗".red(), diagnostic)?;
        }
        if self.is_clean() {
            write!(f, "{}", self.summary().green().bold())
        } else {
            write!(f, "{}", self.summary().red().bold())
        }
    }
}

#[cfg(not(feature = "colored"))]
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(key) = &self.key {
            writeln!(f, "Key: {}", key)?;
        }
        if !self.labels.is_empty() {
            writeln!(f, "Chords: {}", self.labels.join(" "))?;
        }
        for diagnostic in &self.diagnostics {
            writeln!(f, "  x {}", diagnostic)?;
        }
        write!(f, "{}", self.summary())
    }
}
