/*!
 * MQM (Multidimensional Quality Metrics) error-penalty aggregation.
 *
 * The generation collaborator detects errors; scoring is entirely local.
 * Every error's penalty is resolved from a fixed table keyed by
 * (subcategory, severity), the total starts at 100 and penalties are
 * summed, and the clamped result maps to a letter grade. The aggregation
 * is pure and order-independent.
 */

use serde::{Deserialize, Serialize};

use crate::model::{
    Grade, MqmCategory, MqmError, MqmErrorSummary, MqmReport, MqmSubcategory, Severity,
};

/// Score at or above which a translation meets the industry benchmark
pub const INDUSTRY_COMPLIANCE_THRESHOLD: f64 = 85.0;

/// Penalty points for an error, from the fixed MQM table.
///
/// The subcategory alone determines the table row; its category pairing is
/// declared on `MqmSubcategory`.
pub fn penalty_for(subcategory: MqmSubcategory, severity: Severity) -> f64 {
    use MqmSubcategory::*;
    use Severity::*;

    match (subcategory, severity) {
        // Accuracy: all four subcategories share one row
        (Mistranslation | Omission | Addition | Untranslated, Minor) => -1.0,
        (Mistranslation | Omission | Addition | Untranslated, Major) => -5.0,
        (Mistranslation | Omission | Addition | Untranslated, Critical) => -25.0,

        // Fluency
        (Grammar | Register, Minor) => -0.5,
        (Grammar | Register, Major) => -2.0,
        (Grammar | Register, Critical) => -5.0,
        (Spelling, Minor) => -0.25,
        (Spelling, Major) => -1.0,
        (Spelling, Critical) => -5.0,
        (Punctuation, Minor) => -0.1,
        (Punctuation, Major) => -0.5,
        (Punctuation, Critical) => -2.0,

        // Style
        (Awkward | InconsistentStyle, Minor) => -0.25,
        (Awkward | InconsistentStyle, Major) => -1.0,
        (Awkward | InconsistentStyle, Critical) => -3.0,
        (Unnatural, Minor) => -0.5,
        (Unnatural, Major) => -2.0,
        (Unnatural, Critical) => -5.0,

        // Terminology
        (InconsistentTerm, Minor) => -0.5,
        (InconsistentTerm, Major) => -2.0,
        (InconsistentTerm, Critical) => -10.0,
        (WrongTerm, Minor) => -1.0,
        (WrongTerm, Major) => -5.0,
        (WrongTerm, Critical) => -15.0,
    }
}

/// Raw findings as returned by the generation collaborator for the mqm
/// stage: a word count and a list of detected errors, before any scoring.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct MqmFindings {
    /// Word count of the analyzed text; zero means "not reported"
    #[serde(default)]
    pub word_count: usize,

    /// Detected errors
    #[serde(default)]
    pub errors: Vec<MqmError>,
}

/// Aggregate a list of detected errors into a full MQM report.
///
/// Each error's penalty and category are re-derived locally: the penalty
/// from the fixed table, the category from the subcategory pairing. The
/// total score is `clamp(100 + sum(penalties), 0, 100)`.
pub fn aggregate_errors(errors: Vec<MqmError>, word_count: usize) -> MqmReport {
    let mut summary = MqmErrorSummary::default();
    let mut total = 100.0;

    let errors: Vec<MqmError> = errors
        .into_iter()
        .map(|mut error| {
            error.category = error.subcategory.category();
            error.penalty = penalty_for(error.subcategory, error.severity);
            total += error.penalty;

            summary.total_errors += 1;
            match error.category {
                MqmCategory::Accuracy => summary.accuracy_errors += 1,
                MqmCategory::Fluency => summary.fluency_errors += 1,
                MqmCategory::Style => summary.style_errors += 1,
                MqmCategory::Terminology => summary.terminology_errors += 1,
            }

            error
        })
        .collect();

    let total_score = total.clamp(0.0, 100.0);

    MqmReport {
        total_score,
        word_count,
        errors,
        error_summary: summary,
        mqm_grade: Grade::from_score(total_score),
        industry_compliance: total_score >= INDUSTRY_COMPLIANCE_THRESHOLD,
    }
}
