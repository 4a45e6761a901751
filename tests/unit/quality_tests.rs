/*!
 * Unit tests for deterministic scoring: MQM aggregation and ISO compliance
 */

use linguaqa::model::{Grade, MqmError, MqmSubcategory, Severity};
use linguaqa::quality::{aggregate_errors, evaluate_compliance, penalty_for};
use linguaqa::stages::StageOutputs;

fn error(subcategory: MqmSubcategory, severity: Severity) -> MqmError {
    MqmError::new(subcategory, severity)
}

#[test]
fn test_penaltyFor_accuracySubcategories_shouldShareOneRow() {
    for subcategory in [
        MqmSubcategory::Mistranslation,
        MqmSubcategory::Omission,
        MqmSubcategory::Addition,
        MqmSubcategory::Untranslated,
    ] {
        assert_eq!(penalty_for(subcategory, Severity::Minor), -1.0);
        assert_eq!(penalty_for(subcategory, Severity::Major), -5.0);
        assert_eq!(penalty_for(subcategory, Severity::Critical), -25.0);
    }
}

#[test]
fn test_penaltyFor_severityOrdering_shouldBeMonotonic() {
    for subcategory in [
        MqmSubcategory::Grammar,
        MqmSubcategory::Spelling,
        MqmSubcategory::Punctuation,
        MqmSubcategory::Awkward,
        MqmSubcategory::Unnatural,
        MqmSubcategory::InconsistentTerm,
        MqmSubcategory::WrongTerm,
    ] {
        let minor = penalty_for(subcategory, Severity::Minor);
        let major = penalty_for(subcategory, Severity::Major);
        let critical = penalty_for(subcategory, Severity::Critical);
        assert!(minor > major, "{:?}", subcategory);
        assert!(major > critical, "{:?}", subcategory);
    }
}

#[test]
fn test_aggregateErrors_scoreAndGrade_shouldFollowPenaltySum() {
    // One major accuracy error (-5) plus two minor grammar errors (-0.5
    // each) gives 94.0
    let report = aggregate_errors(
        vec![
            error(MqmSubcategory::Omission, Severity::Major),
            error(MqmSubcategory::Grammar, Severity::Minor),
            error(MqmSubcategory::Grammar, Severity::Minor),
        ],
        50,
    );

    assert!((report.total_score - 94.0).abs() < 1e-9);
    assert_eq!(report.mqm_grade, Grade::A);
    assert!(report.industry_compliance);
    assert_eq!(report.error_summary.total_errors, 3);
    assert_eq!(report.error_summary.accuracy_errors, 1);
    assert_eq!(report.error_summary.fluency_errors, 2);
}

#[test]
fn test_aggregateErrors_gradeBands_shouldMatchScore() {
    // 100 - 25 = 75: grade C, not compliant
    let c_grade = aggregate_errors(
        vec![error(MqmSubcategory::Untranslated, Severity::Critical)],
        20,
    );
    assert_eq!(c_grade.mqm_grade, Grade::C);
    assert!(!c_grade.industry_compliance);

    // 100 - 25 - 15 = 60: grade D
    let d_grade = aggregate_errors(
        vec![
            error(MqmSubcategory::Untranslated, Severity::Critical),
            error(MqmSubcategory::WrongTerm, Severity::Critical),
        ],
        20,
    );
    assert_eq!(d_grade.mqm_grade, Grade::D);
}

#[test]
fn test_aggregateErrors_wireTampering_shouldNotMoveScore() {
    let clean = aggregate_errors(vec![error(MqmSubcategory::Register, Severity::Major)], 15);

    let mut tampered_error = error(MqmSubcategory::Register, Severity::Major);
    tampered_error.penalty = 40.0;
    let tampered = aggregate_errors(vec![tampered_error], 15);

    assert_eq!(clean.total_score, tampered.total_score);
    assert_eq!(tampered.errors[0].penalty, -2.0);
}

#[test]
fn test_evaluateCompliance_emptyOutputs_shouldScoreZeroAndRecommendAll() {
    let report = evaluate_compliance(&StageOutputs::default());

    assert!((report.score - 0.0).abs() < 1e-9);
    assert!(!report.compliant);
    assert_eq!(report.areas.len(), 5);
    assert_eq!(report.recommendations.len(), 5);
    for recommendation in &report.recommendations {
        assert!(recommendation.ends_with("to meet ISO 17100:2015 standards"));
    }
}

#[test]
fn test_evaluateCompliance_areaWeights_shouldMatchDeclaredOrder() {
    let report = evaluate_compliance(&StageOutputs::default());
    let weights: Vec<f64> = report.areas.iter().map(|a| a.weight).collect();

    assert_eq!(weights, vec![0.25, 0.25, 0.20, 0.15, 0.15]);
}

#[test]
fn test_evaluateCompliance_reportMetadata_shouldNameStandard() {
    let report = evaluate_compliance(&StageOutputs::default());

    assert_eq!(report.iso_standard, "ISO 17100:2015");
    assert!(!report.assessment_date.is_empty());
}
