//! Runs the voice-leading passes and the progression grammar over a chorale

use crate::config::CheckerConfig;
use crate::error::Result;
use crate::report::Report;
use crate::rules::harmony::Vocabulary;
use crate::rules::progression;
use crate::rules::voice_leading::VoiceLeadingChecker;
use crate::types::{ChordLabeler, Chorale, Key, KeyFinder, KrumhanslKeyFinder, RomanNumeralLabeler};

/// Label recorded for chords the labeler cannot name
pub const UNLABELED: &str = "?";

/// Checks chorales against the enabled rules.
///
/// Key detection and chord labeling are pluggable; by default keys are
/// found with [`KrumhanslKeyFinder`] and chords are labeled with
/// [`RomanNumeralLabeler`].
pub struct ChoraleChecker {
    config: CheckerConfig,
    key_finder: Box<dyn KeyFinder>,
    labeler: Box<dyn ChordLabeler>,
}

impl Default for ChoraleChecker {
    fn default() -> Self {
        Self::new(CheckerConfig::default())
    }
}

impl ChoraleChecker {
    pub fn new(config: CheckerConfig) -> Self {
        ChoraleChecker {
            config,
            key_finder: Box::new(KrumhanslKeyFinder),
            labeler: Box::new(RomanNumeralLabeler),
        }
    }

    pub fn with_key_finder(mut self, finder: impl KeyFinder + 'static) -> Self {
        self.key_finder = Box::new(finder);
        self
    }

    pub fn with_labeler(mut self, labeler: impl ChordLabeler + 'static) -> Self {
        self.labeler = Box::new(labeler);
        self
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut CheckerConfig {
        &mut self.config
    }

    /// The configured key, or the detected one
    pub fn key(&self, chorale: &Chorale) -> Result<Key> {
        match self.config.key {
            Some(key) => Ok(key),
            None => self.key_finder.find_key(chorale),
        }
    }

    /// Label every slice in `key`. Chords the labeler rejects get
    /// [`UNLABELED`], which the grammar never accepts.
    pub fn labels(&self, chorale: &Chorale, key: &Key) -> Vec<String> {
        chorale
            .chordify()
            .iter()
            .enumerate()
            .map(|(index, chord)| match self.labeler.label(chord, key) {
                Ok(label) => label,
                Err(err) => {
                    tracing::warn!(index, %chord, error = %err, "unlabeled chord");
                    UNLABELED.to_string()
                }
            })
            .collect()
    }

    pub fn check_voice_leading(&self, chorale: &Chorale) -> Result<Report> {
        let diagnostics = VoiceLeadingChecker::new(&self.config).check(chorale)?;
        tracing::info!(count = diagnostics.len(), "voice-leading check completed");
        Ok(Report {
            diagnostics,
            ..Report::default()
        })
    }

    pub fn check_harmony(&self, chorale: &Chorale) -> Result<Report> {
        chorale.ensure_not_empty()?;

        let key = self.key(chorale)?;
        let labels = self.labels(chorale, &key);
        let diagnostics = if self.config.harmony_enabled() {
            let vocabulary = Vocabulary::for_mode(key.mode());
            progression::walk(&labels, &vocabulary)?
        } else {
            Vec::new()
        };
        tracing::info!(%key, count = diagnostics.len(), "harmony check completed");

        Ok(Report {
            key: Some(key),
            labels,
            diagnostics,
        })
    }

    /// Voice leading first, then harmony
    pub fn check(&self, chorale: &Chorale) -> Result<Report> {
        let mut report = self.check_voice_leading(chorale)?;
        report.merge(self.check_harmony(chorale)?);
        Ok(report)
    }
}
