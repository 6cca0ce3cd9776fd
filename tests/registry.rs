use ecg2af::EcgError;
use ecg2af::heads::{
    self, HeadKind, HeadRegistry, OutputHeadSpec, builtin_registry, merge_specs, parse_heads_tsv,
};

#[test]
fn builtin_registry_has_four_heads() {
    let registry = builtin_registry().unwrap();
    assert_eq!(registry.len(), 4);
    let survival = registry.survival_head().unwrap();
    assert_eq!(survival.name, "survival_curve_af");
    assert_eq!(survival.kind, HeadKind::SurvivalCurve { days_window: 1825 });
    assert_eq!(survival.width, 50);
    assert_eq!(registry.get(heads::SEX_HEAD).unwrap().width, 2);
}

#[test]
fn lookup_by_reported_output_name() {
    let registry = builtin_registry().unwrap();
    let spec = registry.get("output_age_from_wide_csv_continuous").unwrap();
    assert_eq!(spec.name, "age_from_wide_csv");
    assert!(registry.get("output_age_from_wide_csv_categorical").is_none());
}

#[test]
fn duplicate_name_rejected() {
    let specs = vec![
        OutputHeadSpec::categorical("sex", 2),
        OutputHeadSpec::continuous("sex", 1),
    ];
    match HeadRegistry::build(specs) {
        Err(EcgError::DuplicateHeadName(name)) => assert_eq!(name, "sex"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn unknown_kind_fails_closed() {
    let err = parse_heads_tsv("rhythm\tordinal\t3\n", "test").unwrap_err();
    match err.downcast_ref::<EcgError>() {
        Some(EcgError::UnknownHeadKind(kind)) => assert_eq!(kind, "ordinal"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn survival_requires_days_window() {
    let err = HeadKind::parse("s", "survival_curve", None).unwrap_err();
    assert!(matches!(err, EcgError::InvalidHeadSpec { .. }));
    let err = HeadKind::parse("c", "categorical", Some(10)).unwrap_err();
    assert!(matches!(err, EcgError::InvalidHeadSpec { .. }));
}

#[test]
fn odd_survival_width_rejected_at_build() {
    let specs = vec![OutputHeadSpec::survival_curve("s", 7, 365)];
    assert!(matches!(
        HeadRegistry::build(specs),
        Err(EcgError::ShapeMismatch { .. })
    ));
}

#[test]
fn second_survival_head_is_ambiguous() {
    let specs = vec![
        OutputHeadSpec::survival_curve("af", 8, 365),
        OutputHeadSpec::survival_curve("death", 8, 365),
    ];
    match HeadRegistry::build(specs) {
        Err(EcgError::AmbiguousSurvivalHeads(names)) => {
            assert_eq!(names, vec!["af".to_string(), "death".to_string()])
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn user_heads_override_and_append() {
    let builtin = heads::load_builtin_v1().unwrap();
    let user = parse_heads_tsv(
        "# overrides\nsex_from_wide\tcategorical\t3\nbmi\tcontinuous\t1\n",
        "user",
    )
    .unwrap();
    let merged = merge_specs(builtin, user);
    assert_eq!(merged.len(), 5);
    let sex = merged.iter().find(|s| s.name == "sex_from_wide").unwrap();
    assert_eq!(sex.width, 3);
    assert_eq!(merged.last().unwrap().name, "bmi");
    assert!(HeadRegistry::build(merged).is_ok());
}

#[test]
fn malformed_tsv_reports_line() {
    let err = parse_heads_tsv("\n\nonly_two\tcontinuous\n", "cfg.tsv").unwrap_err();
    assert!(err.to_string().contains("cfg.tsv:3"));
}

#[test]
fn output_name_shadowing_another_head_is_rejected() {
    let specs = vec![
        OutputHeadSpec::categorical("rhythm", 2),
        OutputHeadSpec::continuous("output_rhythm_categorical", 1),
    ];
    match HeadRegistry::build(specs) {
        Err(EcgError::InvalidHeadSpec { name, reason }) => {
            assert_eq!(name, "rhythm");
            assert!(reason.contains("output_rhythm_categorical"));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn overlay_cannot_shadow_builtin_output_name() {
    let overlay = parse_heads_tsv("output_sex_from_wide_categorical\tcontinuous\t1\n", "user").unwrap();
    let merged = merge_specs(heads::load_builtin_v1().unwrap(), overlay);
    assert!(matches!(
        HeadRegistry::build(merged),
        Err(EcgError::InvalidHeadSpec { .. })
    ));
}
