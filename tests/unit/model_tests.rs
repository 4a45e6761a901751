/*!
 * Unit tests for the shared data model
 */

use std::str::FromStr;

use linguaqa::config::PipelineSettings;
use linguaqa::errors::ValidationError;
use linguaqa::model::{
    Grade, JobRequest, QualityMode, StageId, StagePayload, StageResult, StageStatus,
    TargetLanguage, TranslationDraft,
};

#[test]
fn test_targetLanguage_roundTrip_shouldParseDisplayForm() {
    for language in [TargetLanguage::Swedish, TargetLanguage::Dutch] {
        let displayed = language.to_string();
        assert_eq!(TargetLanguage::from_str(&displayed).unwrap(), language);
        assert_eq!(TargetLanguage::from_str(language.code()).unwrap(), language);
    }
}

#[test]
fn test_qualityMode_fromStr_shouldRejectUnknownMode() {
    assert_eq!(QualityMode::from_str("quality").unwrap(), QualityMode::Quality);
    assert!(matches!(
        QualityMode::from_str("turbo"),
        Err(ValidationError::UnsupportedMode(_))
    ));
}

#[test]
fn test_grade_fromScore_boundaries() {
    assert_eq!(Grade::from_score(90.0), Grade::A);
    assert_eq!(Grade::from_score(89.999), Grade::B);
    assert_eq!(Grade::from_score(60.0), Grade::D);
    assert_eq!(Grade::from_score(0.0), Grade::F);
}

#[test]
fn test_jobRequest_validate_shouldEnforceTextLimits() {
    let settings = PipelineSettings::default();

    let empty = JobRequest::new("", TargetLanguage::Swedish);
    assert!(matches!(
        empty.validate(&settings),
        Err(ValidationError::EmptySourceText)
    ));

    let at_limit = JobRequest::new(&"a".repeat(settings.max_text_length), TargetLanguage::Dutch);
    assert!(at_limit.validate(&settings).is_ok());

    let over_limit = JobRequest::new(
        &"a".repeat(settings.max_text_length + 1),
        TargetLanguage::Dutch,
    );
    assert!(matches!(
        over_limit.validate(&settings),
        Err(ValidationError::SourceTextTooLong { .. })
    ));
}

#[test]
fn test_stageResult_serialization_shouldTagPayloadKind() {
    let draft = TranslationDraft {
        translation: "Hej".to_string(),
        confidence: 88.0,
        translation_notes: Vec::new(),
        difficulty_level: Default::default(),
        key_decisions: Vec::new(),
    };
    let result = StageResult::ok(StageId::Translate, StagePayload::Translate(draft));

    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"kind\":\"translate\""));
    assert!(json.contains("\"status\":\"ok\""));

    let parsed: StageResult = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.stage, StageId::Translate);
    assert_eq!(parsed.status, StageStatus::Ok);
}

#[test]
fn test_stageId_serialization_shouldUseSnakeCase() {
    let json = serde_json::to_string(&StageId::QualityAssess).unwrap();
    assert_eq!(json, "\"quality_assess\"");
    assert_eq!(StageId::QualityAssess.to_string(), "quality_assess");
}

#[test]
fn test_finalResult_degraded_shouldCarryErrorMarker() {
    let request = JobRequest::new("Hello", TargetLanguage::Swedish)
        .with_mode(QualityMode::Quality);
    let result = linguaqa::model::FinalResult::degraded(
        &request,
        "req-7".to_string(),
        "task cancelled",
    );

    assert_eq!(result.request_id, "req-7");
    let translate = result.stage(StageId::Translate).unwrap();
    assert_eq!(translate.status, StageStatus::Fallback);
    assert_eq!(
        translate.error_detail.as_deref(),
        Some("task cancelled")
    );
    assert_eq!(
        result.best_translation(),
        Some("Translation failed: task cancelled")
    );
}
