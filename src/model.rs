/*!
 * Shared data model for the translation quality pipeline.
 *
 * Every stage produces a closed, typed payload; dependents consume a typed
 * view instead of untyped lookups. All numeric scores are clamped to their
 * declared range before storage.
 */

use serde::{Deserialize, Serialize};

use crate::config::PipelineSettings;
use crate::errors::ValidationError;

/// Supported target languages
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    #[default]
    Swedish,
    Dutch,
}

impl TargetLanguage {
    /// ISO 639-1 code for the language
    pub fn code(&self) -> &'static str {
        match self {
            Self::Swedish => "sv",
            Self::Dutch => "nl",
        }
    }

    /// English display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Swedish => "Swedish",
            Self::Dutch => "Dutch",
        }
    }
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name().to_lowercase())
    }
}

impl std::str::FromStr for TargetLanguage {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "swedish" | "sv" => Ok(Self::Swedish),
            "dutch" | "nl" => Ok(Self::Dutch),
            _ => Err(ValidationError::UnsupportedLanguage(s.to_string())),
        }
    }
}

/// Caller-selected quality mode determining the active stage subset
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum QualityMode {
    /// Translation plus review only
    Fast,
    /// Adds cultural analysis and quality assessment
    #[default]
    Balanced,
    /// Full pipeline with MQM and ISO scoring
    Quality,
}

impl std::fmt::Display for QualityMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Fast => "fast",
            Self::Balanced => "balanced",
            Self::Quality => "quality",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for QualityMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "balanced" => Ok(Self::Balanced),
            "quality" => Ok(Self::Quality),
            _ => Err(ValidationError::UnsupportedMode(s.to_string())),
        }
    }
}

/// Letter grade on the A-F scale
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Map a 0-100 score to a letter grade.
    ///
    /// Boundary values (exactly 90, 80, 70, 60) map to the higher grade.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 90.0 => Self::A,
            s if s >= 80.0 => Self::B,
            s if s >= 70.0 => Self::C,
            s if s >= 60.0 => Self::D,
            _ => Self::F,
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        };
        write!(f, "{}", letter)
    }
}

/// Error severity levels
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Minor,
    Major,
    Critical,
}

/// Cultural appropriateness levels
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CulturalAppropriateness {
    High,
    Medium,
    Low,
}

/// Target audience fit levels
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TargetAudienceFit {
    Excellent,
    Good,
    Fair,
    Poor,
}

/// Register recommendation levels
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Register {
    Formal,
    Informal,
    #[default]
    Neutral,
}

/// Translation difficulty as judged by the translate stage
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Confidence level reported by the synthesis stage
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    Excellent,
    VeryGood,
    Good,
    Fair,
    Poor,
}

/// Named stage in the fixed pipeline catalogue.
///
/// Declaration order matches the dependency order of the catalogue.
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "snake_case")]
pub enum StageId {
    Translate,
    Cultural,
    Review,
    QualityAssess,
    Mqm,
    Iso,
    Synthesize,
}

impl StageId {
    /// Stable identifier string for logs and serialized results
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Translate => "translate",
            Self::Cultural => "cultural",
            Self::Review => "review",
            Self::QualityAssess => "quality_assess",
            Self::Mqm => "mqm",
            Self::Iso => "iso",
            Self::Synthesize => "synthesize",
        }
    }
}

impl std::fmt::Display for StageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Clamp a score to the 0-100 range
pub(crate) fn clamp_score(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// Initial translation produced by the translate stage
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TranslationDraft {
    /// Translated text
    pub translation: String,

    /// Translation confidence score (0-100)
    pub confidence: f64,

    /// Notes recorded while translating
    #[serde(default)]
    pub translation_notes: Vec<String>,

    /// Judged translation difficulty
    #[serde(default)]
    pub difficulty_level: Difficulty,

    /// Key translation decisions
    #[serde(default)]
    pub key_decisions: Vec<String>,
}

impl TranslationDraft {
    /// Clamp numeric fields to their declared ranges
    pub fn clamped(mut self) -> Self {
        self.confidence = clamp_score(self.confidence);
        self
    }
}

/// Cultural analysis produced by the cultural stage
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CulturalReport {
    /// Cultural appropriateness level
    pub cultural_appropriateness: CulturalAppropriateness,

    /// Cultural adaptations made
    #[serde(default)]
    pub adaptations: Vec<String>,

    /// Regional considerations
    #[serde(default)]
    pub regional_notes: Vec<String>,

    /// Recommended register
    #[serde(default)]
    pub register_recommendations: Register,

    /// Localization suggestions
    #[serde(default)]
    pub localization_suggestions: Vec<String>,

    /// Potential cultural risks
    #[serde(default)]
    pub cultural_risks: Vec<String>,

    /// Target audience fit
    pub target_audience_fit: TargetAudienceFit,
}

/// Review and refinement produced by the review stage
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReviewReport {
    /// Final refined translation
    pub final_translation: String,

    /// Review comments
    #[serde(default)]
    pub review_comments: Vec<String>,

    /// Changes made during review
    #[serde(default)]
    pub changes_made: Vec<String>,

    /// Confidence improvement percentage (0-100)
    #[serde(default)]
    pub confidence_improvement: f64,

    /// Quality grade assigned by the reviewer
    pub quality_grade: Grade,
}

impl ReviewReport {
    /// Clamp numeric fields to their declared ranges
    pub fn clamped(mut self) -> Self {
        self.confidence_improvement = clamp_score(self.confidence_improvement);
        self
    }
}

/// Fixed weights for the six quality dimensions
pub const QUALITY_DIMENSION_WEIGHTS: [(&str, f64); 6] = [
    ("fluency", 0.20),
    ("grammar", 0.20),
    ("accuracy", 0.25),
    ("naturalness", 0.15),
    ("vocabulary", 0.10),
    ("colloquial_usage", 0.10),
];

/// Detailed per-dimension quality scores, each in 0-100
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct QualityScores {
    pub fluency: f64,
    pub grammar: f64,
    pub accuracy: f64,
    pub naturalness: f64,
    pub vocabulary: f64,
    pub colloquial_usage: f64,
}

impl QualityScores {
    /// Clamp every dimension to 0-100
    pub fn clamped(self) -> Self {
        Self {
            fluency: clamp_score(self.fluency),
            grammar: clamp_score(self.grammar),
            accuracy: clamp_score(self.accuracy),
            naturalness: clamp_score(self.naturalness),
            vocabulary: clamp_score(self.vocabulary),
            colloquial_usage: clamp_score(self.colloquial_usage),
        }
    }

    /// Overall score implied by the fixed dimension weights
    pub fn weighted_overall(&self) -> f64 {
        self.fluency * 0.20
            + self.grammar * 0.20
            + self.accuracy * 0.25
            + self.naturalness * 0.15
            + self.vocabulary * 0.10
            + self.colloquial_usage * 0.10
    }
}

/// Quality assessment produced by the quality_assess stage
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct QualityReport {
    /// Overall quality score (0-100), weighted by the collaborator and
    /// re-validated here
    pub overall_score: f64,

    /// Per-dimension scores
    pub detailed_scores: QualityScores,

    /// Assessment notes
    #[serde(default)]
    pub assessment_notes: Vec<String>,

    /// Translation strengths
    #[serde(default)]
    pub strengths: Vec<String>,

    /// Areas for improvement
    #[serde(default)]
    pub areas_for_improvement: Vec<String>,

    /// Whether the industry benchmark was met
    #[serde(default)]
    pub industry_benchmark_met: bool,

    /// Total error count
    #[serde(default)]
    pub error_count: u32,

    /// Errors per 1000 words
    #[serde(default)]
    pub errors_per_1000_words: f64,
}

impl QualityReport {
    /// Clamp numeric fields to their declared ranges
    pub fn clamped(mut self) -> Self {
        self.overall_score = clamp_score(self.overall_score);
        self.detailed_scores = self.detailed_scores.clamped();
        self
    }
}

/// MQM error category
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MqmCategory {
    Accuracy,
    Fluency,
    Style,
    Terminology,
}

/// MQM error subcategory.
///
/// Each subcategory belongs to exactly one category; the pairing is
/// enforced when errors are aggregated.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MqmSubcategory {
    Mistranslation,
    Omission,
    Addition,
    Untranslated,
    Grammar,
    Spelling,
    Punctuation,
    Register,
    Awkward,
    Unnatural,
    InconsistentStyle,
    InconsistentTerm,
    WrongTerm,
}

impl MqmSubcategory {
    /// The category this subcategory belongs to
    pub fn category(&self) -> MqmCategory {
        match self {
            Self::Mistranslation | Self::Omission | Self::Addition | Self::Untranslated => {
                MqmCategory::Accuracy
            }
            Self::Grammar | Self::Spelling | Self::Punctuation | Self::Register => {
                MqmCategory::Fluency
            }
            Self::Awkward | Self::Unnatural | Self::InconsistentStyle => MqmCategory::Style,
            Self::InconsistentTerm | Self::WrongTerm => MqmCategory::Terminology,
        }
    }
}

/// A single error detected during MQM analysis
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MqmError {
    /// Error category
    pub category: MqmCategory,

    /// Error subcategory
    pub subcategory: MqmSubcategory,

    /// Error severity
    pub severity: Severity,

    /// Error description
    #[serde(default)]
    pub description: String,

    /// Text segment where the error occurs
    #[serde(default)]
    pub location: String,

    /// Penalty points (negative). Always resolved from the fixed penalty
    /// table during aggregation; values arriving on the wire are ignored.
    #[serde(default)]
    pub penalty: f64,
}

impl MqmError {
    /// Create an error with the minimum detail needed for scoring
    pub fn new(subcategory: MqmSubcategory, severity: Severity) -> Self {
        Self {
            category: subcategory.category(),
            subcategory,
            severity,
            description: String::new(),
            location: String::new(),
            penalty: 0.0,
        }
    }
}

/// Per-category error counts
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct MqmErrorSummary {
    pub total_errors: u32,
    pub accuracy_errors: u32,
    pub fluency_errors: u32,
    pub style_errors: u32,
    pub terminology_errors: u32,
}

/// MQM analysis produced by the mqm stage
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MqmReport {
    /// Total MQM score (0-100)
    pub total_score: f64,

    /// Word count of the source text
    pub word_count: usize,

    /// Detected errors with resolved penalties
    #[serde(default)]
    pub errors: Vec<MqmError>,

    /// Per-category error counts
    pub error_summary: MqmErrorSummary,

    /// Letter grade for the total score
    pub mqm_grade: Grade,

    /// Whether the score meets the industry threshold (>= 85)
    pub industry_compliance: bool,
}

/// The five ISO 17100 compliance areas
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IsoArea {
    TranslationCompetence,
    QualityAssurance,
    ProjectManagement,
    TechnicalResources,
    ClientRequirements,
}

impl IsoArea {
    /// Human-readable area name, as used in recommendations
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::TranslationCompetence => "Translation Competence",
            Self::QualityAssurance => "Quality Assurance",
            Self::ProjectManagement => "Project Management",
            Self::TechnicalResources => "Technical Resources",
            Self::ClientRequirements => "Client Requirements",
        }
    }

    /// Fixed weight of this area in the overall compliance score
    pub fn weight(&self) -> f64 {
        match self {
            Self::TranslationCompetence => 0.25,
            Self::QualityAssurance => 0.25,
            Self::ProjectManagement => 0.20,
            Self::TechnicalResources => 0.15,
            Self::ClientRequirements => 0.15,
        }
    }

    /// All areas, in weight order
    pub const ALL: [IsoArea; 5] = [
        IsoArea::TranslationCompetence,
        IsoArea::QualityAssurance,
        IsoArea::ProjectManagement,
        IsoArea::TechnicalResources,
        IsoArea::ClientRequirements,
    ];
}

/// Score for a single ISO compliance area
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ComplianceArea {
    /// The area being scored
    pub area: IsoArea,

    /// Fixed weight in 0-1
    pub weight: f64,

    /// Area score in 0-1
    pub score: f64,

    /// Whether the area score meets the 0.85 threshold
    pub compliant: bool,
}

/// ISO 17100:2015 compliance report produced by the iso stage
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IsoReport {
    /// Overall compliance status (score >= 85)
    pub compliant: bool,

    /// Overall compliance score (0-100)
    pub score: f64,

    /// Per-area scores and compliance flags
    pub areas: Vec<ComplianceArea>,

    /// Recommendations for non-compliant areas
    #[serde(default)]
    pub recommendations: Vec<String>,

    /// ISO standard version
    pub iso_standard: String,

    /// Assessment date (RFC 3339)
    pub assessment_date: String,
}

/// Final synthesis produced by the synthesize stage
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SynthesisReport {
    /// Ultimate refined translation
    pub final_translation: String,

    /// Quality improvements made
    #[serde(default)]
    pub quality_improvements: Vec<String>,

    /// Errors that were fixed
    #[serde(default)]
    pub errors_fixed: Vec<String>,

    /// ISO compliance enhancements
    #[serde(default)]
    pub iso_enhancements: Vec<String>,

    /// Final confidence level
    pub confidence_level: ConfidenceLevel,

    /// Final translation grade
    pub translation_grade: Grade,

    /// Whether the translation is ready for professional use
    #[serde(default)]
    pub professional_ready: bool,

    /// Final notes
    #[serde(default)]
    pub final_notes: Vec<String>,
}

/// Typed payload produced by a stage
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StagePayload {
    Translate(TranslationDraft),
    Cultural(CulturalReport),
    Review(ReviewReport),
    QualityAssess(QualityReport),
    Mqm(MqmReport),
    Iso(IsoReport),
    Synthesize(SynthesisReport),
}

impl StagePayload {
    /// The stage this payload belongs to
    pub fn stage(&self) -> StageId {
        match self {
            Self::Translate(_) => StageId::Translate,
            Self::Cultural(_) => StageId::Cultural,
            Self::Review(_) => StageId::Review,
            Self::QualityAssess(_) => StageId::QualityAssess,
            Self::Mqm(_) => StageId::Mqm,
            Self::Iso(_) => StageId::Iso,
            Self::Synthesize(_) => StageId::Synthesize,
        }
    }

    /// View as a translation draft
    pub fn as_translation(&self) -> Option<&TranslationDraft> {
        match self {
            Self::Translate(draft) => Some(draft),
            _ => None,
        }
    }

    /// View as a review report
    pub fn as_review(&self) -> Option<&ReviewReport> {
        match self {
            Self::Review(report) => Some(report),
            _ => None,
        }
    }

    /// View as an MQM report
    pub fn as_mqm(&self) -> Option<&MqmReport> {
        match self {
            Self::Mqm(report) => Some(report),
            _ => None,
        }
    }

    /// View as an ISO report
    pub fn as_iso(&self) -> Option<&IsoReport> {
        match self {
            Self::Iso(report) => Some(report),
            _ => None,
        }
    }
}

/// Settlement status of a stage within a job
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    /// The stage's generation call succeeded and parsed
    Ok,
    /// The stage failed and a schema-conformant default was substituted
    Fallback,
    /// The stage was not run (inactive for the mode, or deadline expired)
    Skipped,
}

/// Result of one stage within a job. Written exactly once per stage.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StageResult {
    /// The stage this result belongs to
    pub stage: StageId,

    /// Settlement status
    pub status: StageStatus,

    /// Stage payload; present for `ok` and `fallback`, absent for `skipped`
    pub payload: Option<StagePayload>,

    /// Failure detail when the status is `fallback`, or the skip reason
    pub error_detail: Option<String>,
}

impl StageResult {
    /// A successful stage result
    pub fn ok(stage: StageId, payload: StagePayload) -> Self {
        Self {
            stage,
            status: StageStatus::Ok,
            payload: Some(payload),
            error_detail: None,
        }
    }

    /// A degraded stage result carrying a substitute payload
    pub fn fallback(stage: StageId, payload: StagePayload, detail: String) -> Self {
        Self {
            stage,
            status: StageStatus::Fallback,
            payload: Some(payload),
            error_detail: Some(detail),
        }
    }

    /// A stage that was never run
    pub fn skipped(stage: StageId, reason: Option<String>) -> Self {
        Self {
            stage,
            status: StageStatus::Skipped,
            payload: None,
            error_detail: reason,
        }
    }

    /// Whether the stage settled with a payload (ok or fallback)
    pub fn settled_with_payload(&self) -> bool {
        self.payload.is_some()
    }
}

/// A single translation job submission
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JobRequest {
    /// Source text to translate
    pub source_text: String,

    /// Target language
    #[serde(default)]
    pub target_language: TargetLanguage,

    /// Quality mode selecting the active stage subset
    #[serde(default)]
    pub quality_mode: QualityMode,

    /// Run the synthesis stage on top of quality mode
    #[serde(default)]
    pub include_synthesis: bool,
}

impl JobRequest {
    /// Create a request with the default balanced mode
    pub fn new(source_text: &str, target_language: TargetLanguage) -> Self {
        Self {
            source_text: source_text.to_string(),
            target_language,
            quality_mode: QualityMode::Balanced,
            include_synthesis: false,
        }
    }

    /// Set the quality mode
    pub fn with_mode(mut self, mode: QualityMode) -> Self {
        self.quality_mode = mode;
        self
    }

    /// Request the synthesis stage (honored only in quality mode)
    pub fn with_synthesis(mut self, enabled: bool) -> Self {
        self.include_synthesis = enabled;
        self
    }

    /// Validate the request against the configured limits.
    ///
    /// Runs before any stage executes; a failure here is the only error a
    /// caller sees from the pipeline boundary.
    pub fn validate(&self, settings: &PipelineSettings) -> Result<(), ValidationError> {
        if self.source_text.trim().is_empty() {
            return Err(ValidationError::EmptySourceText);
        }
        let length = self.source_text.chars().count();
        if length > settings.max_text_length {
            return Err(ValidationError::SourceTextTooLong {
                length,
                max: settings.max_text_length,
            });
        }
        Ok(())
    }
}

/// Assembled view of a completed job: one entry per catalogue stage
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FinalResult {
    /// Unique request identifier
    pub request_id: String,

    /// Original source text
    pub source_text: String,

    /// Target language
    pub target_language: TargetLanguage,

    /// Quality mode the job ran under
    pub quality_mode: QualityMode,

    /// One result per stage in the catalogue, in catalogue order
    pub stages: Vec<StageResult>,

    /// Processing time in seconds
    pub processing_time: f64,

    /// Completion timestamp (RFC 3339)
    pub timestamp: String,
}

impl FinalResult {
    /// Look up the result slot for a stage
    pub fn stage(&self, stage: StageId) -> Option<&StageResult> {
        self.stages.iter().find(|r| r.stage == stage)
    }

    /// Settlement status for a stage
    pub fn status(&self, stage: StageId) -> Option<StageStatus> {
        self.stage(stage).map(|r| r.status)
    }

    /// The best available translated text: synthesis, then review, then the
    /// initial draft
    pub fn best_translation(&self) -> Option<&str> {
        for result in &self.stages {
            if let Some(StagePayload::Synthesize(report)) = &result.payload {
                return Some(&report.final_translation);
            }
        }
        for result in &self.stages {
            if let Some(StagePayload::Review(report)) = &result.payload {
                return Some(&report.final_translation);
            }
        }
        for result in &self.stages {
            if let Some(StagePayload::Translate(draft)) = &result.payload {
                return Some(&draft.translation);
            }
        }
        None
    }

    /// Build a degraded result for a job whose orchestration failed
    /// catastrophically. The translate slot carries an error-marker payload
    /// at confidence zero; every other slot is skipped.
    pub fn degraded(request: &JobRequest, request_id: String, detail: &str) -> Self {
        let marker = TranslationDraft {
            translation: format!("Translation failed: {}", detail),
            confidence: 0.0,
            translation_notes: vec!["Error in translation process".to_string()],
            difficulty_level: Difficulty::Medium,
            key_decisions: Vec::new(),
        };

        let stages = crate::stages::CATALOGUE
            .iter()
            .map(|&stage| {
                if stage == StageId::Translate {
                    StageResult::fallback(
                        stage,
                        StagePayload::Translate(marker.clone()),
                        detail.to_string(),
                    )
                } else {
                    StageResult::skipped(stage, Some("job failed".to_string()))
                }
            })
            .collect();

        Self {
            request_id,
            source_text: request.source_text.clone(),
            target_language: request.target_language,
            quality_mode: request.quality_mode,
            stages,
            processing_time: 0.0,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Aggregate outcome of a batch run
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BatchOutcome {
    /// Batch identifier
    pub batch_id: String,

    /// Per-job results, in submission order
    pub results: Vec<FinalResult>,

    /// Number of jobs that completed without catastrophic failure
    pub success_count: usize,

    /// Number of jobs converted to degraded results
    pub error_count: usize,

    /// Total batch processing time in seconds
    pub total_processing_time: f64,

    /// Completion timestamp (RFC 3339)
    pub timestamp: String,
}
