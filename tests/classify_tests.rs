//! Classification tests for the evaluation engine
//!
//! Covers the per-field evaluation rules (absent data, any-of multi-allelic
//! semantics, typed comparisons) and whole-record classification scenarios.

use ferro_filter::{
    classify, evaluate, resolve, CriteriaSet, FieldDatum, FieldValue, InfoValue, Predicate,
    VcfRecord, PASS_LABEL,
};

fn criteria() -> CriteriaSet {
    CriteriaSet::from_json_str(r#"{"TLOD": ">=10", "DP": ">=20"}"#).unwrap()
}

fn record() -> VcfRecord {
    VcfRecord::new(
        "chr1".to_string(),
        14653,
        "C".to_string(),
        vec!["T".to_string()],
    )
}

// =============================================================================
// Evaluator properties
// =============================================================================

#[test]
fn absent_fails_all_predicates() {
    for criterion in [">=10", "<=10", ">0", "<100", "==x", "!=x", "==0", "!=0"] {
        let p = Predicate::parse("F", criterion).unwrap();
        assert!(!evaluate(&p, &FieldValue::Absent), "criterion {}", criterion);
    }
}

#[test]
fn multi_is_or_of_scalar_evaluations() {
    let values = [3.0, 9.9, 10.0, 25.0];
    for criterion in [">=10", "<=5", ">24", "<3", "==9.9", "!=3"] {
        let p = Predicate::parse("F", criterion).unwrap();
        let scalar_or = values
            .iter()
            .any(|v| evaluate(&p, &FieldValue::Scalar(FieldDatum::Number(*v))));
        let multi = FieldValue::Multi(values.iter().map(|v| FieldDatum::Number(*v)).collect());
        assert_eq!(evaluate(&p, &multi), scalar_or, "criterion {}", criterion);
    }
}

#[test]
fn empty_multi_fails_all_predicates() {
    for criterion in [">=10", "==PASS", "!=PASS", "<0"] {
        let p = Predicate::parse("F", criterion).unwrap();
        assert!(!evaluate(&p, &FieldValue::Multi(Vec::new())));
    }
}

#[test]
fn resolve_missing_key_is_absent() {
    let rec = record();
    assert_eq!(resolve(&rec, "DP"), FieldValue::Absent);
}

// =============================================================================
// End-to-end scenarios
// =============================================================================

#[test]
fn scenario_all_criteria_met() {
    // TLOD=15, DP=25, FILTER=artifact against TLOD>=10, DP>=20
    let rec = record()
        .with_info("TLOD", InfoValue::Float(15.0))
        .with_info("DP", InfoValue::Integer(25))
        .with_filter("artifact");

    let decision = classify(&criteria(), &rec);
    assert!(decision.passed);
    assert_eq!(decision.updated_status.as_deref(), Some(PASS_LABEL));
}

#[test]
fn scenario_low_tlod_fails() {
    let rec = record()
        .with_info("TLOD", InfoValue::Float(5.0))
        .with_info("DP", InfoValue::Integer(25))
        .with_filter("artifact");

    let decision = classify(&criteria(), &rec);
    assert!(!decision.passed);
    assert!(decision.updated_status.is_none());
    // The record's own status is untouched by classification
    assert_eq!(rec.filter.as_deref(), Some("artifact"));
}

#[test]
fn scenario_multiallelic_second_value_passes() {
    // TLOD=[5, 15]: the second per-allele value satisfies >=10
    let rec = record()
        .with_info("TLOD", InfoValue::FloatArray(vec![5.0, 15.0]))
        .with_info("DP", InfoValue::Integer(30));

    assert!(classify(&criteria(), &rec).passed);
}

#[test]
fn scenario_missing_dp_fails_regardless_of_other_fields() {
    let rec = record().with_info("TLOD", InfoValue::Float(99.0));
    assert!(!classify(&criteria(), &rec).passed);
}

#[test]
fn scenario_filter_criterion_against_current_label() {
    let set = CriteriaSet::from_json_str(r#"{"FILTER": "==PASS"}"#).unwrap();

    let rec = record().with_filter("artifact");
    assert!(!classify(&set, &rec).passed);

    let rec = record().with_filter("PASS");
    assert!(classify(&set, &rec).passed);

    // Unset FILTER (".") is absent, not implicitly passing
    let rec = record();
    assert!(!classify(&set, &rec).passed);
}

#[test]
fn classification_is_and_commutative() {
    let documents = [
        r#"{"TLOD": ">=10", "DP": ">=20", "FILTER": "!=artifact"}"#,
        r#"{"DP": ">=20", "FILTER": "!=artifact", "TLOD": ">=10"}"#,
        r#"{"FILTER": "!=artifact", "TLOD": ">=10", "DP": ">=20"}"#,
    ];
    let sets: Vec<CriteriaSet> = documents
        .iter()
        .map(|doc| CriteriaSet::from_json_str(doc).unwrap())
        .collect();

    let records = [
        record()
            .with_info("TLOD", InfoValue::Float(15.0))
            .with_info("DP", InfoValue::Integer(25))
            .with_filter("germline"),
        record()
            .with_info("TLOD", InfoValue::Float(15.0))
            .with_info("DP", InfoValue::Integer(25))
            .with_filter("artifact"),
        record().with_info("DP", InfoValue::Integer(25)),
        record(),
    ];

    for rec in &records {
        let verdicts: Vec<bool> = sets.iter().map(|set| classify(set, rec).passed).collect();
        assert!(
            verdicts.windows(2).all(|w| w[0] == w[1]),
            "verdict changed with declaration order: {:?}",
            verdicts
        );
    }
}

#[test]
fn numeric_looking_string_field_is_coerced() {
    // A DP stored as text still satisfies a numeric criterion
    let rec = record()
        .with_info("TLOD", InfoValue::String("15".to_string()))
        .with_info("DP", InfoValue::String("25".to_string()));
    assert!(classify(&criteria(), &rec).passed);

    let rec = record()
        .with_info("TLOD", InfoValue::String("high".to_string()))
        .with_info("DP", InfoValue::Integer(25));
    assert!(!classify(&criteria(), &rec).passed);
}

#[test]
fn flag_field_is_truthy() {
    let set = CriteriaSet::from_json_str(r#"{"SOMATIC": "==1"}"#).unwrap();

    let rec = record().with_info("SOMATIC", InfoValue::Flag);
    assert!(classify(&set, &rec).passed);

    let rec = record();
    assert!(!classify(&set, &rec).passed);
}

#[test]
fn multi_label_filter_any_of() {
    let set = CriteriaSet::from_json_str(r#"{"FILTER": "==s50"}"#).unwrap();
    let rec = record().with_filter("q10;s50");
    assert!(classify(&set, &rec).passed);
}
