use ecg2af::EcgError;
use ecg2af::decode::{days_per_bin, decode};
use ecg2af::heads::{HeadRegistry, OutputHeadSpec};
use ndarray::{Array2, array};

fn registry() -> HeadRegistry {
    HeadRegistry::build(vec![
        OutputHeadSpec::survival_curve("survival_curve_af", 8, 5000),
        OutputHeadSpec::continuous("age_from_wide_csv", 1),
        OutputHeadSpec::categorical("af_in_read", 2),
        OutputHeadSpec::categorical("sex_from_wide", 2),
    ])
    .unwrap()
}

fn row(values: &[f32]) -> Array2<f32> {
    Array2::from_shape_vec((1, values.len()), values.to_vec()).unwrap()
}

#[test]
fn days_for_uneven_window() {
    assert_eq!(days_per_bin(5000, 4).unwrap(), 1251);
    let raw = vec![(
        "survival_curve_af".to_string(),
        row(&[0.99, 0.98, 0.97, 0.96, 0.0, 0.0, 0.0, 0.0]),
    )];
    let set = decode(&raw, &registry()).unwrap();
    let curve = set.survival_curve.unwrap();
    assert_eq!(curve.days, vec![0, 1251, 2502, 3753]);
    assert_eq!(curve.values.len(), curve.days.len());
}

#[test]
fn survival_values_never_increase() {
    let reg = registry();
    let mut state: u32 = 0x2545_f491;
    for _ in 0..200 {
        let mut hazards = Vec::with_capacity(8);
        for _ in 0..8 {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            hazards.push((state >> 8) as f32 / (1u32 << 24) as f32);
        }
        let raw = vec![("survival_curve_af".to_string(), row(&hazards))];
        let curve = decode(&raw, &reg).unwrap().survival_curve.unwrap();
        for w in curve.values.windows(2) {
            assert!(w[1] <= w[0]);
        }
        assert!(curve.values.iter().all(|v| (0.0..=1.0).contains(v)));
        let last = *curve.values.last().unwrap();
        assert!((curve.risk - (1.0 - last)).abs() < 1e-7);
    }
}

#[test]
fn only_first_half_drives_the_curve() {
    let reg = registry();
    let a = decode(
        &[("survival_curve_af".to_string(), row(&[0.9, 0.9, 0.9, 0.9, 0.1, 0.2, 0.3, 0.4]))],
        &reg,
    )
    .unwrap();
    let b = decode(
        &[("survival_curve_af".to_string(), row(&[0.9, 0.9, 0.9, 0.9, 0.8, 0.7, 0.6, 0.5]))],
        &reg,
    )
    .unwrap();
    assert_eq!(a.survival_curve, b.survival_curve);
    let risk = a.af_risk().unwrap();
    assert!((risk - (1.0 - 0.9_f32.powi(4))).abs() < 1e-6);
}

#[test]
fn categorical_passthrough() {
    let raw = vec![("sex_from_wide".to_string(), row(&[0.3, 0.7]))];
    let set = decode(&raw, &registry()).unwrap();
    assert_eq!(set.head("sex_from_wide"), Some(&[0.3_f32, 0.7][..]));
    assert!(set.survival_curve.is_none());
}

#[test]
fn reported_output_names_map_to_head_names() {
    let raw = vec![
        ("output_age_from_wide_csv_continuous".to_string(), row(&[0.42])),
        ("output_af_in_read_categorical".to_string(), row(&[0.8, 0.2])),
    ];
    let set = decode(&raw, &registry()).unwrap();
    assert_eq!(set.head("age_from_wide_csv"), Some(&[0.42_f32][..]));
    assert_eq!(set.head("af_in_read"), Some(&[0.8_f32, 0.2][..]));
}

#[test]
fn only_first_row_of_batch_is_used() {
    let batch = array![[0.1_f32, 0.9], [0.5, 0.5]];
    let set = decode(&[("af_in_read".to_string(), batch)], &registry()).unwrap();
    assert_eq!(set.head("af_in_read"), Some(&[0.1_f32, 0.9][..]));
}

#[test]
fn unknown_head_rejects_whole_call() {
    let raw = vec![
        ("sex_from_wide".to_string(), row(&[0.3, 0.7])),
        ("ecg_rhythm".to_string(), row(&[0.1, 0.2, 0.7])),
    ];
    match decode(&raw, &registry()) {
        Err(EcgError::UnknownOutputHead(name)) => assert_eq!(name, "ecg_rhythm"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn width_mismatch_is_not_truncated() {
    let raw = vec![("sex_from_wide".to_string(), row(&[0.3, 0.6, 0.1]))];
    assert!(matches!(
        decode(&raw, &registry()),
        Err(EcgError::ShapeMismatch { .. })
    ));
    let raw = vec![("survival_curve_af".to_string(), row(&[0.9; 6]))];
    assert!(matches!(
        decode(&raw, &registry()),
        Err(EcgError::ShapeMismatch { .. })
    ));
}

#[test]
fn empty_batch_is_shape_mismatch() {
    let raw = vec![("sex_from_wide".to_string(), Array2::<f32>::zeros((0, 2)))];
    assert!(matches!(
        decode(&raw, &registry()),
        Err(EcgError::ShapeMismatch { .. })
    ));
}

#[test]
fn same_head_twice_is_rejected() {
    let raw = vec![
        ("sex_from_wide".to_string(), row(&[0.3, 0.7])),
        ("output_sex_from_wide_categorical".to_string(), row(&[0.4, 0.6])),
    ];
    match decode(&raw, &registry()) {
        Err(EcgError::DuplicateOutput(name)) => assert_eq!(name, "sex_from_wide"),
        other => panic!("unexpected {other:?}"),
    }
}
