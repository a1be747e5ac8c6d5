#[cfg(test)]
mod tests {
    use chorale_core::rules::RuleKind;
    use chorale_core::{CheckerConfig, Chorale, ChoraleChecker, ChoraleError, VoiceId};

    const CADENCE: &str = "\
# Plain authentic cadence in C
E5 F5 D5 C5
G4 A4 G4 E4

C4 C4 B3 G3
C3 F3 G3 C3
";

    fn checker(rules: &[RuleKind]) -> ChoraleChecker {
        ChoraleChecker::new(CheckerConfig::only(rules))
    }

    fn in_key(rules: &[RuleKind], key: &str) -> ChoraleChecker {
        ChoraleChecker::new(CheckerConfig::only(rules).with_key(key.parse().unwrap()))
    }

    #[test]
    fn test_text_cadence_is_clean() {
        let chorale: Chorale = CADENCE.parse().unwrap();
        let report = ChoraleChecker::default().check(&chorale).unwrap();
        assert!(report.is_clean(), "{}", report);
        assert_eq!(report.key.unwrap().to_string(), "C major");
        assert_eq!(report.labels, vec!["I", "IV", "V", "I"]);
    }

    #[test]
    fn test_parallels_are_reported_per_pair() {
        let chorale = Chorale::from_lines("G4 A4", "E4 F4", "C4 D4", "C3 D3").unwrap();
        let report = checker(&[RuleKind::ParallelFifths, RuleKind::ParallelOctaves])
            .check_voice_leading(&chorale)
            .unwrap();

        let found: Vec<(RuleKind, Vec<VoiceId>)> = report
            .diagnostics
            .iter()
            .map(|d| (d.kind, d.voices.clone()))
            .collect();
        assert_eq!(
            found,
            vec![
                (RuleKind::ParallelOctaves, vec![VoiceId::Bass, VoiceId::Tenor]),
                (RuleKind::ParallelFifths, vec![VoiceId::Bass, VoiceId::Soprano]),
                (RuleKind::ParallelFifths, vec![VoiceId::Tenor, VoiceId::Soprano]),
            ]
        );
        assert!(report.diagnostics.iter().all(|d| d.index == 1));
    }

    #[test]
    fn test_retrogression_reported_once() {
        // I V IV I: V -> IV is illegal, and the walker resumes after IV
        let chorale =
            Chorale::from_lines("C5 B4 A4 C5", "E4 D4 C4 E4", "G3 G3 F3 G3", "C3 G2 F2 C3")
                .unwrap();
        let report = in_key(&[RuleKind::IllegalProgression], "C major")
            .check_harmony(&chorale)
            .unwrap();
        assert_eq!(report.labels, vec!["I", "V", "IV", "I"]);
        assert_eq!(report.count(), 1);
        assert_eq!(report.diagnostics[0].index, 2);
        assert_eq!(
            report.diagnostics[0].labels,
            Some(("V".to_string(), "IV".to_string()))
        );
    }

    #[test]
    fn test_minor_progression() {
        let chorale =
            Chorale::from_lines("A4 A4 G#4 A4", "E4 F4 E4 E4", "C4 D4 B3 C4", "A2 D3 E3 A2")
                .unwrap();
        let report = in_key(&[RuleKind::IllegalProgression], "a minor")
            .check_harmony(&chorale)
            .unwrap();
        assert_eq!(report.labels, vec!["i", "iv", "V", "i"]);
        assert!(report.is_clean());
    }

    #[test]
    fn test_voice_leading_passes_through_checker() {
        let chorale = Chorale::from_lines("D5 E-5 F#5", "A4 B4 A4", "A3 G3 A3", "D3 C3 D3").unwrap();
        let report = checker(&[RuleKind::AugmentedSecond, RuleKind::Spacing])
            .check_voice_leading(&chorale)
            .unwrap();

        let augmented: Vec<_> = report.of_kind(RuleKind::AugmentedSecond).collect();
        assert_eq!(augmented.len(), 1);
        assert_eq!(augmented[0].index, 2);
        assert_eq!(augmented[0].voices, vec![VoiceId::Soprano]);

        let spacing: Vec<_> = report.of_kind(RuleKind::Spacing).collect();
        assert_eq!(spacing.len(), 1);
        assert_eq!(spacing[0].index, 1);
        assert_eq!(spacing[0].voices, vec![VoiceId::Tenor, VoiceId::Alto]);
    }

    #[test]
    fn test_unequal_voices_rejected() {
        let err = Chorale::from_lines("C5 D5", "E4", "G3 G3", "C3 C3").unwrap_err();
        assert!(matches!(err, ChoraleError::MismatchedVoices { alto: 1, .. }));
    }

    #[test]
    fn test_bad_pitch_reports_line() {
        let err = "C5\nE4 X9\nG3\nC3".parse::<Chorale>().unwrap_err();
        assert!(matches!(err, ChoraleError::Syntax { line: 2, .. }));
    }

    #[test]
    fn test_empty_text_rejected() {
        assert!("# nothing here\n".parse::<Chorale>().is_err());
    }
}
