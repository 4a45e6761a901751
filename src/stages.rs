/*!
 * Stage catalogue for the translation quality pipeline.
 *
 * The catalogue is fixed: seven named stages with a static dependency
 * table. Which stages run for a given job is a pure function of the quality
 * mode and the synthesis flag. The `StageRunner` executes a single stage:
 * it builds the stage's prompt from the settled upstream outputs, invokes
 * the generation client, parses the response against the stage's payload
 * schema, and substitutes a schema-conformant fallback payload when any of
 * that fails.
 */

use log::{debug, warn};
use std::sync::Arc;

use crate::errors::StageError;
use crate::model::{
    ConfidenceLevel, CulturalAppropriateness, CulturalReport, Difficulty, Grade, IsoReport,
    MqmErrorSummary, MqmReport, QualityMode, QualityReport, QualityScores, Register,
    ReviewReport, StageId, StagePayload, StageResult, SynthesisReport, TargetAudienceFit,
    TargetLanguage, TranslationDraft,
};
use crate::providers::{GenerationClient, GenerationRequest};
use crate::quality::{aggregate_errors, evaluate_compliance, MqmFindings};

/// All stages, in dependency order
pub const CATALOGUE: [StageId; 7] = [
    StageId::Translate,
    StageId::Cultural,
    StageId::Review,
    StageId::QualityAssess,
    StageId::Mqm,
    StageId::Iso,
    StageId::Synthesize,
];

/// Static dependency table.
///
/// A stage may run once every listed dependency has settled. Dependencies
/// that are inactive for the job's mode count as settled with no output.
pub fn dependencies(stage: StageId) -> &'static [StageId] {
    match stage {
        StageId::Translate => &[],
        StageId::Cultural => &[StageId::Translate],
        StageId::Review => &[StageId::Translate, StageId::Cultural],
        StageId::QualityAssess => &[StageId::Translate, StageId::Review],
        StageId::Mqm => &[StageId::QualityAssess],
        // iso consumes the settled MQM report, so it must run after mqm
        StageId::Iso => &[StageId::QualityAssess, StageId::Mqm],
        StageId::Synthesize => &[
            StageId::Review,
            StageId::QualityAssess,
            StageId::Mqm,
            StageId::Iso,
        ],
    }
}

/// The stages that run for a mode, in catalogue order.
///
/// Synthesis is honored only in quality mode; in any other mode the flag is
/// ignored.
pub fn active_set(mode: QualityMode, include_synthesis: bool) -> Vec<StageId> {
    CATALOGUE
        .iter()
        .copied()
        .filter(|stage| match stage {
            StageId::Translate | StageId::Review => true,
            StageId::Cultural | StageId::QualityAssess => mode != QualityMode::Fast,
            StageId::Mqm | StageId::Iso => mode == QualityMode::Quality,
            StageId::Synthesize => mode == QualityMode::Quality && include_synthesis,
        })
        .collect()
}

/// Settled typed outputs of the stages that have run so far.
///
/// Only successful and fallback payloads are recorded; skipped stages leave
/// their slot empty.
#[derive(Debug, Clone, Default)]
pub struct StageOutputs {
    pub translation: Option<TranslationDraft>,
    pub cultural: Option<CulturalReport>,
    pub review: Option<ReviewReport>,
    pub quality: Option<QualityReport>,
    pub mqm: Option<MqmReport>,
    pub iso: Option<IsoReport>,
    pub synthesis: Option<SynthesisReport>,
}

impl StageOutputs {
    /// Record a settled payload into its slot
    pub fn record(&mut self, payload: &StagePayload) {
        match payload {
            StagePayload::Translate(draft) => self.translation = Some(draft.clone()),
            StagePayload::Cultural(report) => self.cultural = Some(report.clone()),
            StagePayload::Review(report) => self.review = Some(report.clone()),
            StagePayload::QualityAssess(report) => self.quality = Some(report.clone()),
            StagePayload::Mqm(report) => self.mqm = Some(report.clone()),
            StagePayload::Iso(report) => self.iso = Some(report.clone()),
            StagePayload::Synthesize(report) => self.synthesis = Some(report.clone()),
        }
    }

    /// The best translated text settled so far: review output, then the
    /// initial draft, then the source text itself.
    pub fn best_translation<'a>(&'a self, source_text: &'a str) -> &'a str {
        if let Some(review) = &self.review {
            return &review.final_translation;
        }
        if let Some(draft) = &self.translation {
            return &draft.translation;
        }
        source_text
    }
}

/// Per-job context handed to every stage execution
#[derive(Debug)]
pub struct StageContext<'a> {
    /// Source text of the job
    pub source_text: &'a str,

    /// Target language of the job
    pub target_language: TargetLanguage,

    /// Settled outputs of stages that have already run
    pub outputs: &'a StageOutputs,
}

/// Executes one stage against the generation client
#[derive(Debug, Clone)]
pub struct StageRunner {
    /// Client for generation calls
    client: Arc<dyn GenerationClient>,
}

impl StageRunner {
    /// Create a runner backed by the given client
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self { client }
    }

    /// Run a stage to settlement: `ok` with a parsed payload, or `fallback`
    /// with a substitute payload when the call or the parse fails.
    pub async fn run(&self, stage: StageId, ctx: &StageContext<'_>) -> StageResult {
        match self.invoke(stage, ctx).await {
            Ok(payload) => {
                debug!("Stage {} settled ok", stage);
                StageResult::ok(stage, payload)
            }
            Err(e) => {
                warn!("Stage {} failed, substituting fallback: {}", stage, e);
                StageResult::fallback(stage, self.fallback_payload(stage, ctx), e.to_string())
            }
        }
    }

    /// Invoke the stage and parse its payload.
    ///
    /// The iso stage never reaches the client: its report is a deterministic
    /// function of the settled upstream outputs.
    async fn invoke(&self, stage: StageId, ctx: &StageContext<'_>) -> Result<StagePayload, StageError> {
        if stage == StageId::Iso {
            return Ok(StagePayload::Iso(evaluate_compliance(ctx.outputs)));
        }

        let request = self.build_request(stage, ctx);
        let response = self.client.invoke(request).await?;
        self.parse_payload(stage, ctx, &response.content)
    }

    /// Parse raw response content against the stage's payload schema.
    ///
    /// Numeric scores are clamped on ingest. For the mqm stage, the wire
    /// carries raw findings; penalties and categories are resolved locally.
    fn parse_payload(
        &self,
        stage: StageId,
        ctx: &StageContext<'_>,
        content: &str,
    ) -> Result<StagePayload, StageError> {
        let unparsable = |e: serde_json::Error| StageError::Unparsable {
            stage,
            detail: e.to_string(),
        };

        let payload = match stage {
            StageId::Translate => {
                let draft: TranslationDraft = serde_json::from_str(content).map_err(unparsable)?;
                StagePayload::Translate(draft.clamped())
            }
            StageId::Cultural => {
                let report: CulturalReport = serde_json::from_str(content).map_err(unparsable)?;
                StagePayload::Cultural(report)
            }
            StageId::Review => {
                let report: ReviewReport = serde_json::from_str(content).map_err(unparsable)?;
                StagePayload::Review(report.clamped())
            }
            StageId::QualityAssess => {
                let report: QualityReport = serde_json::from_str(content).map_err(unparsable)?;
                StagePayload::QualityAssess(report.clamped())
            }
            StageId::Mqm => {
                let findings: MqmFindings = serde_json::from_str(content).map_err(unparsable)?;
                let word_count = if findings.word_count > 0 {
                    findings.word_count
                } else {
                    ctx.source_text.split_whitespace().count()
                };
                StagePayload::Mqm(aggregate_errors(findings.errors, word_count))
            }
            StageId::Synthesize => {
                let report: SynthesisReport = serde_json::from_str(content).map_err(unparsable)?;
                StagePayload::Synthesize(report)
            }
            StageId::Iso => {
                return Err(StageError::Unparsable {
                    stage,
                    detail: "iso stage has no wire payload".to_string(),
                })
            }
        };

        Ok(payload)
    }

    /// Schema-conformant substitute payload for a failed stage.
    ///
    /// Fallbacks are pessimistic: text fields carry the best settled
    /// upstream translation, every score and grade sits at the floor, and
    /// nothing claims compliance. A failed analysis must never look like a
    /// clean one.
    pub(crate) fn fallback_payload(&self, stage: StageId, ctx: &StageContext<'_>) -> StagePayload {
        match stage {
            StageId::Translate => StagePayload::Translate(TranslationDraft {
                translation: ctx.source_text.to_string(),
                confidence: 0.0,
                translation_notes: vec![
                    "Generation unavailable; source text passed through".to_string(),
                ],
                difficulty_level: Difficulty::Medium,
                key_decisions: Vec::new(),
            }),
            StageId::Cultural => StagePayload::Cultural(CulturalReport {
                cultural_appropriateness: CulturalAppropriateness::Low,
                adaptations: Vec::new(),
                regional_notes: vec!["Cultural analysis unavailable".to_string()],
                register_recommendations: Register::Neutral,
                localization_suggestions: Vec::new(),
                cultural_risks: Vec::new(),
                target_audience_fit: TargetAudienceFit::Poor,
            }),
            StageId::Review => StagePayload::Review(ReviewReport {
                final_translation: ctx.outputs.best_translation(ctx.source_text).to_string(),
                review_comments: vec!["Review unavailable; upstream translation retained".to_string()],
                changes_made: Vec::new(),
                confidence_improvement: 0.0,
                quality_grade: Grade::F,
            }),
            StageId::QualityAssess => StagePayload::QualityAssess(QualityReport {
                overall_score: 0.0,
                detailed_scores: QualityScores::default(),
                assessment_notes: vec!["Quality assessment unavailable".to_string()],
                strengths: Vec::new(),
                areas_for_improvement: Vec::new(),
                industry_benchmark_met: false,
                error_count: 0,
                errors_per_1000_words: 0.0,
            }),
            StageId::Mqm => StagePayload::Mqm(MqmReport {
                total_score: 0.0,
                word_count: ctx.source_text.split_whitespace().count(),
                errors: Vec::new(),
                error_summary: MqmErrorSummary::default(),
                mqm_grade: Grade::F,
                industry_compliance: false,
            }),
            // The iso stage is local and cannot fail; this arm exists to
            // keep the match exhaustive.
            StageId::Iso => StagePayload::Iso(evaluate_compliance(ctx.outputs)),
            StageId::Synthesize => StagePayload::Synthesize(SynthesisReport {
                final_translation: ctx.outputs.best_translation(ctx.source_text).to_string(),
                quality_improvements: Vec::new(),
                errors_fixed: Vec::new(),
                iso_enhancements: Vec::new(),
                confidence_level: ConfidenceLevel::Poor,
                translation_grade: Grade::F,
                professional_ready: false,
                final_notes: vec!["Synthesis unavailable; best upstream translation retained".to_string()],
            }),
        }
    }

    /// Build the prompt context for a stage.
    ///
    /// The user prompt carries the source text and the JSON of the upstream
    /// payloads the stage depends on.
    fn build_request(&self, stage: StageId, ctx: &StageContext<'_>) -> GenerationRequest {
        let language = ctx.target_language.display_name();

        let system_prompt = match stage {
            StageId::Translate => format!(
                "You are an expert English-to-{} translator. Respond with a single \
                 JSON object with fields: translation, confidence (0-100), \
                 translation_notes, difficulty_level (easy|medium|hard), key_decisions.",
                language
            ),
            StageId::Cultural => format!(
                "You are a {} cultural adaptation specialist. Respond with a single \
                 JSON object with fields: cultural_appropriateness (high|medium|low), \
                 adaptations, regional_notes, register_recommendations \
                 (formal|informal|neutral), localization_suggestions, cultural_risks, \
                 target_audience_fit (excellent|good|fair|poor).",
                language
            ),
            StageId::Review => format!(
                "You are a senior {} translation reviewer. Refine the translation and \
                 respond with a single JSON object with fields: final_translation, \
                 review_comments, changes_made, confidence_improvement (0-100), \
                 quality_grade (A|B|C|D|F).",
                language
            ),
            StageId::QualityAssess => format!(
                "You are a {} translation quality assessor. Score the translation and \
                 respond with a single JSON object with fields: overall_score (0-100), \
                 detailed_scores (fluency, grammar, accuracy, naturalness, vocabulary, \
                 colloquial_usage, each 0-100), assessment_notes, strengths, \
                 areas_for_improvement, industry_benchmark_met, error_count, \
                 errors_per_1000_words.",
                language
            ),
            StageId::Mqm => format!(
                "You are an MQM annotator for {} translations. List every error you \
                 find and respond with a single JSON object with fields: word_count, \
                 errors (each with category, subcategory, severity, description, \
                 location). Subcategories: mistranslation, omission, addition, \
                 untranslated, grammar, spelling, punctuation, register, awkward, \
                 unnatural, inconsistent_style, inconsistent_term, wrong_term. \
                 Severities: minor, major, critical.",
                language
            ),
            StageId::Synthesize => format!(
                "You are the final synthesis editor for a {} translation workflow. \
                 Produce the definitive translation and respond with a single JSON \
                 object with fields: final_translation, quality_improvements, \
                 errors_fixed, iso_enhancements, confidence_level (excellent|\
                 very_good|good|fair|poor), translation_grade (A|B|C|D|F), \
                 professional_ready, final_notes.",
                language
            ),
            // Never sent; the iso stage is computed locally
            StageId::Iso => String::new(),
        };

        let mut user_prompt = format!(
            "Source text (English):\n{}\n\nTarget language: {}",
            ctx.source_text, language
        );

        let mut append_context = |label: &str, json: Option<String>| {
            if let Some(json) = json {
                user_prompt.push_str(&format!("\n\n{}:\n{}", label, json));
            }
        };

        match stage {
            StageId::Translate => {}
            StageId::Cultural => {
                append_context("Initial translation", to_json(&ctx.outputs.translation));
            }
            StageId::Review => {
                append_context("Initial translation", to_json(&ctx.outputs.translation));
                append_context("Cultural analysis", to_json(&ctx.outputs.cultural));
            }
            StageId::QualityAssess => {
                append_context("Initial translation", to_json(&ctx.outputs.translation));
                append_context("Reviewed translation", to_json(&ctx.outputs.review));
            }
            StageId::Mqm => {
                append_context("Reviewed translation", to_json(&ctx.outputs.review));
                append_context("Quality assessment", to_json(&ctx.outputs.quality));
            }
            StageId::Synthesize => {
                append_context("Reviewed translation", to_json(&ctx.outputs.review));
                append_context("Quality assessment", to_json(&ctx.outputs.quality));
                append_context("MQM analysis", to_json(&ctx.outputs.mqm));
                append_context("ISO compliance", to_json(&ctx.outputs.iso));
            }
            StageId::Iso => {}
        }

        GenerationRequest {
            stage,
            system_prompt,
            user_prompt,
        }
    }
}

/// Serialize an optional upstream payload for prompt context
fn to_json<T: serde::Serialize>(value: &Option<T>) -> Option<String> {
    value
        .as_ref()
        .and_then(|v| serde_json::to_string_pretty(v).ok())
}
