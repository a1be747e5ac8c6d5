//! Checker configuration
//!
//! Everything a check run can be tuned with: which rules are enabled, the
//! numeric thresholds used by the voice-leading passes, and an optional key
//! that overrides key detection.

use crate::error::Result;
use crate::rules::voice_leading::{DEFAULT_LEAP_THRESHOLD, DEFAULT_SPACING_LIMIT};
use crate::rules::RuleKind;
use crate::types::{Key, VoiceId};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CheckerConfig {
    pub enabled: BTreeSet<RuleKind>,
    /// Largest generic interval between adjacent upper voices
    pub spacing_limit: i32,
    /// Smallest generic interval that counts as a leap
    pub leap_threshold: i32,
    /// Upper voices checked for parallel fourths against the bass
    pub parallel_fourths_voices: Vec<VoiceId>,
    /// Analyze in this key instead of detecting one
    pub key: Option<Key>,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        CheckerConfig {
            enabled: RuleKind::ALL.into_iter().collect(),
            spacing_limit: DEFAULT_SPACING_LIMIT,
            leap_threshold: DEFAULT_LEAP_THRESHOLD,
            parallel_fourths_voices: vec![VoiceId::Tenor, VoiceId::Alto],
            key: None,
        }
    }
}

impl CheckerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spacing_limit(mut self, limit: i32) -> Self {
        self.spacing_limit = limit;
        self
    }

    pub fn with_leap_threshold(mut self, threshold: i32) -> Self {
        self.leap_threshold = threshold;
        self
    }

    pub fn with_parallel_fourths_voices(mut self, voices: Vec<VoiceId>) -> Self {
        self.parallel_fourths_voices = voices;
        self
    }

    pub fn with_key(mut self, key: Key) -> Self {
        self.key = Some(key);
        self
    }

    /// Start from a config with only the given rules enabled
    pub fn only(rules: &[RuleKind]) -> Self {
        CheckerConfig {
            enabled: rules.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn is_enabled(&self, rule: RuleKind) -> bool {
        self.enabled.contains(&rule)
    }

    pub fn enable(&mut self, rule: RuleKind) {
        self.enabled.insert(rule);
    }

    pub fn disable(&mut self, rule: RuleKind) {
        self.enabled.remove(&rule);
    }

    /// Enable a rule by name ("parallel-fifths", "PARALLEL_FIFTHS", ...)
    pub fn enable_by_name(&mut self, name: &str) -> Result<RuleKind> {
        let rule: RuleKind = name.parse()?;
        self.enable(rule);
        Ok(rule)
    }

    pub fn disable_by_name(&mut self, name: &str) -> Result<RuleKind> {
        let rule: RuleKind = name.parse()?;
        self.disable(rule);
        Ok(rule)
    }

    /// Whether any voice-leading rule is enabled
    pub fn voice_leading_enabled(&self) -> bool {
        self.enabled.iter().any(|rule| rule.is_voice_leading())
    }

    pub fn harmony_enabled(&self) -> bool {
        self.is_enabled(RuleKind::IllegalProgression)
    }
}
