//! Planned comparisons run end to end through a least-squares fitter.

mod common;

use approx::assert_abs_diff_eq;
use common::LeastSquares;
use contrix_contrast::{
    families, load_config, ContrastBuilder, ContrastConfig, ContrastError, ContrastSet,
    ContrastSpec, Factor, Observation, PlannedComparison, RulePolicy, CONFIG_FILE_NAME,
};

fn dose() -> Factor {
    Factor::new("dose", ["placebo", "low", "high"])
        .unwrap()
        .with_reference("placebo")
        .unwrap()
}

fn responses() -> Vec<Observation> {
    let data = [
        ("placebo", [3.0, 2.0, 1.0, 1.0, 4.0]),
        ("low", [5.0, 2.0, 4.0, 2.0, 3.0]),
        ("high", [7.0, 4.0, 5.0, 3.0, 6.0]),
    ];
    data.iter()
        .flat_map(|(level, ys)| ys.iter().map(move |&y| Observation::new(*level, y)))
        .collect()
}

#[test]
fn helmert_comparison_reports_matching_coefficients() {
    // means: placebo 2.2, low 3.2, high 5.0
    let mut f = dose();
    let contrasts = families::helmert(&f);
    let outcome = PlannedComparison::new(ContrastBuilder::default(), LeastSquares)
        .run(&mut f, &contrasts, &responses())
        .unwrap();

    assert_eq!(outcome.rows.len(), 2);
    let first = &outcome.rows[0];
    assert_eq!(first.label, "placebo vs later");
    assert_abs_diff_eq!(first.estimate, (3.2 + 5.0) / 2.0 - 2.2, epsilon = 1e-9);
    assert_abs_diff_eq!(first.coefficient.unwrap(), first.estimate, epsilon = 1e-9);

    // SS_within = 6.8 + 6.8 + 10.0 = 23.6 on 12 df
    let sigma2: f64 = 23.6 / 12.0;
    assert_abs_diff_eq!(
        first.std_error.unwrap(),
        (sigma2 * (1.0 + 0.25 + 0.25) / 5.0).sqrt(),
        epsilon = 1e-9
    );

    let second = &outcome.rows[1];
    assert_abs_diff_eq!(second.estimate, 1.8, epsilon = 1e-9);
    assert_abs_diff_eq!(second.std_error.unwrap(), (sigma2 * 2.0 / 5.0).sqrt(), epsilon = 1e-9);

    assert_abs_diff_eq!(outcome.fit.marginal_means["high"], 5.0, epsilon = 1e-9);
    assert_abs_diff_eq!(outcome.fit.rss(), 23.6, epsilon = 1e-9);
}

#[test]
fn outcome_serializes_to_json() {
    let mut f = dose();
    let contrasts = families::versus_reference(&f);
    let outcome = PlannedComparison::new(ContrastBuilder::default(), LeastSquares)
        .run(&mut f, &contrasts, &responses())
        .unwrap();
    assert!(!outcome.warnings.is_empty());

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["rows"][0]["label"], "low vs placebo");
    assert!(json["rows"][0]["coefficient"].is_number());
    assert_eq!(json["warnings"][0]["rule"], "chunk_reuse");

    let basis = serde_json::to_value(f.encoding().unwrap()).unwrap();
    assert_eq!(basis["levels"][2], "high");
}

#[test]
fn strict_config_from_disk_blocks_the_fit() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "chunk_reuse = \"deny\"\northogonality = \"deny\"\n",
    )
    .unwrap();
    let config = load_config(dir.path());
    assert_eq!(config.chunk_reuse, RulePolicy::Deny);

    let mut f = dose();
    let contrasts = families::versus_reference(&f);
    let err = PlannedComparison::new(ContrastBuilder::new(config), LeastSquares)
        .run(&mut f, &contrasts, &responses())
        .unwrap_err();
    assert!(matches!(err, ContrastError::ChunkReuse { .. }));
    assert!(f.encoding().is_none());
}

#[test]
fn padded_set_still_reports_requested_contrast() {
    let mut f = Factor::new("group", ["a", "b", "c", "d"]).unwrap();
    let contrasts = ContrastSet::new().with(
        ContrastSpec::from_chunks("cd vs ab", &f, &["c", "d"], &["a", "b"])
            .unwrap(),
    );
    let observations: Vec<Observation> = [("a", 1.0), ("b", 3.0), ("c", 6.0), ("d", 10.0)]
        .iter()
        .flat_map(|&(level, m)| [Observation::new(level, m - 1.0), Observation::new(level, m + 1.0)])
        .collect();

    let builder = ContrastBuilder::new(ContrastConfig {
        pad_underdetermined: true,
        ..ContrastConfig::default()
    });
    let outcome = PlannedComparison::new(builder, LeastSquares)
        .run(&mut f, &contrasts, &observations)
        .unwrap();

    assert_eq!(outcome.rows.len(), 1);
    assert_abs_diff_eq!(outcome.rows[0].estimate, 6.0, epsilon = 1e-9);
    assert_abs_diff_eq!(outcome.rows[0].coefficient.unwrap(), 6.0, epsilon = 1e-9);
    assert_eq!(f.encoding().unwrap().names(), &["cd vs ab", "pad1", "pad2"]);
    assert!(outcome.fit.coefficient("pad2").is_some());
}

#[test]
fn fit_recovers_intercept_and_residuals() {
    let mut f = dose();
    let contrasts = families::helmert(&f);
    let outcome = PlannedComparison::new(ContrastBuilder::default(), LeastSquares)
        .run(&mut f, &contrasts, &responses())
        .unwrap();
    let intercept = outcome.fit.coefficient(common::INTERCEPT).unwrap();
    assert_abs_diff_eq!(intercept.estimate, (2.2 + 3.2 + 5.0) / 3.0, epsilon = 1e-9);
    assert_eq!(outcome.fit.residuals.len(), 15);
    assert_abs_diff_eq!(outcome.fit.residuals[0], 0.8, epsilon = 1e-9);
    assert_abs_diff_eq!(outcome.fit.fitted_values[14], 5.0, epsilon = 1e-9);
}

#[test]
fn contrast_named_like_the_intercept_is_left_unpaired() {
    let mut f = dose();
    let contrasts = ContrastSet::new()
        .with(
            ContrastSpec::from_chunks(common::INTERCEPT, &f, &["low", "high"], &["placebo"])
                .unwrap(),
        )
        .with(ContrastSpec::from_chunks("high vs low", &f, &["high"], &["low"]).unwrap());
    let outcome = PlannedComparison::new(ContrastBuilder::default(), LeastSquares)
        .run(&mut f, &contrasts, &responses())
        .unwrap();

    let ambiguous = &outcome.rows[0];
    assert_abs_diff_eq!(ambiguous.estimate, 1.9, epsilon = 1e-9);
    assert_eq!(ambiguous.coefficient, None);
    assert_eq!(ambiguous.std_error, None);

    let second = &outcome.rows[1];
    assert_abs_diff_eq!(second.coefficient.unwrap(), 1.8, epsilon = 1e-9);
}

#[test]
fn duplicate_contrast_names_are_rejected() {
    let mut f = dose();
    let contrasts = ContrastSet::new()
        .with(ContrastSpec::new("c", vec![-1.0, 0.5, 0.5]))
        .with(ContrastSpec::new("c", vec![0.0, -1.0, 1.0]));
    let err = PlannedComparison::new(ContrastBuilder::default(), LeastSquares)
        .run(&mut f, &contrasts, &responses())
        .unwrap_err();
    assert!(matches!(err, ContrastError::DuplicateName { index: 1, first: 0, .. }));
    assert!(f.encoding().is_none());
}
