/*!
 * ISO 17100:2015 compliance evaluation.
 *
 * Five weighted process areas are scored from predicates over the settled
 * outputs of other stages. The evaluator never calls the generation
 * service; it is a deterministic function of the stage outputs it is given.
 */

use crate::model::{
    ComplianceArea, CulturalAppropriateness, IsoArea, IsoReport, TargetAudienceFit,
};
use crate::stages::StageOutputs;

/// Overall score at or above which the process is ISO compliant
pub const COMPLIANCE_THRESHOLD: f64 = 85.0;

/// Per-area score at or above which a single area is compliant
pub const AREA_THRESHOLD: f64 = 0.85;

/// Evaluate ISO 17100:2015 compliance over the settled stage outputs.
pub fn evaluate_compliance(outputs: &StageOutputs) -> IsoReport {
    let mut areas = Vec::with_capacity(IsoArea::ALL.len());
    let mut recommendations = Vec::new();
    let mut weighted_total = 0.0;

    for area in IsoArea::ALL {
        let score = area_score(area, outputs);
        let weight = area.weight();
        weighted_total += score * weight;

        let compliant = score >= AREA_THRESHOLD;
        if !compliant {
            recommendations.push(format!(
                "Improve {} to meet ISO 17100:2015 standards",
                area.display_name().to_lowercase()
            ));
        }

        areas.push(ComplianceArea {
            area,
            weight,
            score,
            compliant,
        });
    }

    let score = weighted_total * 100.0;

    IsoReport {
        compliant: score >= COMPLIANCE_THRESHOLD,
        score,
        areas,
        recommendations,
        iso_standard: "ISO 17100:2015".to_string(),
        assessment_date: chrono::Utc::now().to_rfc3339(),
    }
}

/// Score a single area in 0-1 from its fixed predicate increments.
fn area_score(area: IsoArea, outputs: &StageOutputs) -> f64 {
    let score = match area {
        IsoArea::TranslationCompetence => translation_competence(outputs),
        IsoArea::QualityAssurance => quality_assurance(outputs),
        IsoArea::ProjectManagement => project_management(outputs),
        IsoArea::TechnicalResources => technical_resources(outputs),
        IsoArea::ClientRequirements => client_requirements(outputs),
    };
    score.min(1.0)
}

fn overall_quality(outputs: &StageOutputs) -> f64 {
    outputs
        .quality
        .as_ref()
        .map(|q| q.overall_score)
        .unwrap_or(0.0)
}

fn translation_competence(outputs: &StageOutputs) -> f64 {
    let mut score = 0.0;

    // Linguistic competence
    if outputs
        .quality
        .as_ref()
        .map(|q| q.detailed_scores.grammar >= 85.0)
        .unwrap_or(false)
    {
        score += 0.40;
    }

    // Cultural competence
    if outputs.cultural.as_ref().map_or(false, |c| {
        matches!(
            c.cultural_appropriateness,
            CulturalAppropriateness::High | CulturalAppropriateness::Medium
        )
    }) {
        score += 0.35;
    }

    // Domain expertise
    if overall_quality(outputs) >= 85.0 {
        score += 0.25;
    }

    score
}

fn quality_assurance(outputs: &StageOutputs) -> f64 {
    let mut score = 0.0;

    // Review process implemented
    if outputs.review.is_some() {
        score += 0.50;
    }

    // Error detection capability
    if outputs.mqm.as_ref().map_or(false, |m| m.total_score >= 80.0) {
        score += 0.30;
    }

    // Quality metrics available
    if outputs.quality.is_some() {
        score += 0.20;
    }

    score
}

fn project_management(outputs: &StageOutputs) -> f64 {
    let mut score = 0.0;

    // Process documentation
    if outputs
        .review
        .as_ref()
        .map_or(false, |r| !r.review_comments.is_empty())
    {
        score += 0.40;
    }

    // Resource allocation across the core stages
    let core_stages_run = [
        outputs.translation.is_some(),
        outputs.cultural.is_some(),
        outputs.review.is_some(),
        outputs.quality.is_some(),
    ]
    .iter()
    .filter(|ran| **ran)
    .count();
    if core_stages_run >= 4 {
        score += 0.30;
    }

    // Delivery standards
    if overall_quality(outputs) >= 85.0 {
        score += 0.30;
    }

    score
}

fn technical_resources(outputs: &StageOutputs) -> f64 {
    let mut score = 0.0;

    // Tools usage
    if outputs.translation.is_some() {
        score += 0.40;
    }

    // Terminology management
    if outputs
        .quality
        .as_ref()
        .map_or(false, |q| q.detailed_scores.vocabulary >= 85.0)
    {
        score += 0.35;
    }

    // Consistency checks
    if outputs
        .mqm
        .as_ref()
        .map_or(false, |m| m.error_summary.terminology_errors <= 2)
    {
        score += 0.25;
    }

    score
}

fn client_requirements(outputs: &StageOutputs) -> f64 {
    let mut score = 0.0;

    // Requirements analysis
    if outputs.cultural.as_ref().map_or(false, |c| {
        matches!(
            c.target_audience_fit,
            TargetAudienceFit::Excellent | TargetAudienceFit::Good
        )
    }) {
        score += 0.40;
    }

    // Target audience consideration
    if outputs.cultural.as_ref().map_or(false, |c| {
        c.cultural_appropriateness == CulturalAppropriateness::High
    }) {
        score += 0.35;
    }

    // Purpose fitness
    let overall = overall_quality(outputs);
    if overall >= 90.0 {
        score += 0.25;
    } else if overall >= 85.0 {
        score += 0.15;
    }

    score
}
