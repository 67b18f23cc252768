//! Rule checking and encoding behaviour on the classic three-level designs.

use std::collections::HashMap;

use approx::assert_abs_diff_eq;
use contrix_contrast::{
    families, ContrastBuilder, ContrastConfig, ContrastError, ContrastSet, ContrastSpec, Factor,
    RulePolicy, RuleWarning,
};

const ALCOHOL: [&str; 3] = ["None", "2 Pints", "4 Pints"];

fn alcohol_contrasts() -> ContrastSet {
    ContrastSet::new()
        .with(ContrastSpec::new("alcohol vs none", vec![-1.0, 0.5, 0.5]))
        .with(ContrastSpec::new("4 vs 2 pints", vec![0.0, -1.0, 1.0]))
}

fn alcohol_means() -> HashMap<String, f64> {
    HashMap::from([
        ("None".to_string(), 63.75),
        ("2 Pints".to_string(), 64.6875),
        ("4 Pints".to_string(), 46.25),
    ])
}

#[test]
fn alcohol_contrasts_pass_every_rule() {
    let result = ContrastBuilder::new(ContrastConfig::strict())
        .validate(&ALCOHOL, &alcohol_contrasts())
        .unwrap();
    assert!(result.is_clean());
    assert!(result.is_complete());
    assert!(result.is_unit_scaled());
    assert_eq!(result.contrasts()[0].negative, vec![0]);
    assert_eq!(result.contrasts()[0].positive, vec![1, 2]);
}

#[test]
fn unscaled_contrast_only_fails_when_denied() {
    let set = ContrastSet::new()
        .with(ContrastSpec::new("c1", vec![-2.0, 1.0, 1.0]))
        .with(ContrastSpec::new("c2", vec![0.0, -1.0, 1.0]));

    let lenient = ContrastBuilder::default().validate(&ALCOHOL, &set).unwrap();
    assert!(lenient.is_clean());
    assert!(!lenient.is_unit_scaled());

    let warned = ContrastBuilder::new(ContrastConfig {
        unit_scaling: RulePolicy::Warn,
        ..ContrastConfig::default()
    })
    .validate(&ALCOHOL, &set)
    .unwrap();
    assert!(matches!(
        warned.warnings(),
        [RuleWarning::NonUnitScaled { index: 0, .. }]
    ));

    let err = ContrastBuilder::new(ContrastConfig::strict())
        .validate(&ALCOHOL, &set)
        .unwrap_err();
    assert!(matches!(err, ContrastError::NonUnitScaled { index: 0, .. }));
    assert!(err.is_advisory());
}

#[test]
fn too_many_contrasts_rejected_before_anything_else() {
    let set: ContrastSet = (0..4)
        .map(|i| ContrastSpec::new(format!("c{i}"), vec![1.0, 1.0, 1.0]))
        .collect();
    let err = ContrastBuilder::default().validate(&ALCOHOL, &set).unwrap_err();
    assert!(matches!(
        err,
        ContrastError::TooManyContrasts {
            given: 4,
            levels: 3,
            max: 2
        }
    ));
    assert!(!err.is_advisory());
}

#[test]
fn hard_rule_errors_name_the_contrast() {
    let set = ContrastSet::new()
        .with(ContrastSpec::new("fine", vec![-1.0, 0.5, 0.5]))
        .with(ContrastSpec::new("lopsided", vec![1.0, 0.5, 0.5]));
    let err = ContrastBuilder::default().validate(&ALCOHOL, &set).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("contrast 1"), "{msg}");
    assert!(msg.contains("lopsided"), "{msg}");

    let one_sided = ContrastSet::new().with(ContrastSpec::new("zero", vec![0.0, 0.0, 0.0]));
    assert!(matches!(
        ContrastBuilder::default().validate(&ALCOHOL, &one_sided),
        Err(ContrastError::Sign { index: 0, .. })
    ));
}

#[test]
fn basis_columns_sum_to_zero() {
    let basis = ContrastBuilder::default()
        .build_from_inverse(&ALCOHOL, &alcohol_contrasts())
        .unwrap();
    assert_eq!(basis.matrix().shape(), (3, 2));
    for s in basis.matrix().column_sums() {
        assert_abs_diff_eq!(s, 0.0, epsilon = 1e-12);
    }
}

#[test]
fn coefficients_equal_contrasts_applied_to_means() {
    let builder = ContrastBuilder::default();
    let validated = builder.validate(&ALCOHOL, &alcohol_contrasts()).unwrap();
    let basis = builder.basis_for(&validated).unwrap();
    let means = alcohol_means();

    let direct = builder.apply_to_means(&validated, &means).unwrap();
    let ordered = contrix_contrast::ordered_means(validated.levels(), &means).unwrap();
    let coef = basis.coefficients(&ordered).unwrap();

    assert_eq!(direct.len(), coef.contrasts.len());
    for (d, c) in direct.iter().zip(&coef.contrasts) {
        assert_eq!(d.label, c.label);
        assert_abs_diff_eq!(d.estimate, c.estimate, epsilon = 1e-9);
    }
    assert_abs_diff_eq!(direct[0].estimate, -8.28125, epsilon = 1e-12);
    assert_abs_diff_eq!(direct[1].estimate, -18.4375, epsilon = 1e-12);
}

#[test]
fn chunk_reuse_after_singling_out() {
    // "None" is singled out by the first contrast, then reused.
    let set = ContrastSet::new()
        .with(ContrastSpec::new("alcohol vs none", vec![-1.0, 0.5, 0.5]))
        .with(ContrastSpec::new("4 pints vs rest", vec![-0.5, -0.5, 1.0]));
    let result = ContrastBuilder::default().validate(&ALCOHOL, &set).unwrap();
    assert!(result.warnings().iter().any(|w| matches!(
        w,
        RuleWarning::ChunkReuse { index: 1, isolated_by: 0, level, .. } if level == "None"
    )));

    let err = ContrastBuilder::new(ContrastConfig {
        chunk_reuse: RulePolicy::Deny,
        ..ContrastConfig::default()
    })
    .validate(&ALCOHOL, &set)
    .unwrap_err();
    assert!(matches!(err, ContrastError::ChunkReuse { index: 1, .. }));
}

#[test]
fn from_chunks_and_families_agree() {
    let f = Factor::new("alcohol", ALCOHOL).unwrap();
    let by_hand = ContrastSet::new()
        .with(ContrastSpec::from_chunks("a", &f, &["2 Pints", "4 Pints"], &["None"]).unwrap())
        .with(ContrastSpec::from_chunks("b", &f, &["4 Pints"], &["2 Pints"]).unwrap());
    let helmert = families::helmert(&f);
    for (a, b) in by_hand.iter().zip(&helmert) {
        assert_eq!(a.weights(), b.weights());
    }
}

#[test]
fn encoding_attaches_only_to_matching_factor() {
    let basis = ContrastBuilder::default()
        .build_from_inverse(&ALCOHOL, &alcohol_contrasts())
        .unwrap();

    let mut other = Factor::new("dose", ["low", "mid", "high"]).unwrap();
    assert!(matches!(
        other.attach(basis.clone()),
        Err(ContrastError::EncodingMismatch { .. })
    ));

    let mut f = Factor::new("alcohol", ALCOHOL).unwrap();
    f.attach(basis).unwrap();
    assert_eq!(f.encoding().unwrap().names(), &["alcohol vs none", "4 vs 2 pints"]);
}
