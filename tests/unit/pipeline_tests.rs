/*!
 * Unit tests for single-job orchestration
 */

use std::time::Duration;

use linguaqa::model::{Grade, QualityMode, StageId, StagePayload, StageStatus};
use linguaqa::providers::mock::MockClient;

use crate::common::{pipeline_with, request};

#[tokio::test]
async fn test_fastMode_shouldNeverProduceAnalysisPayloads() {
    let pipeline = pipeline_with(MockClient::scripted());

    let result = pipeline
        .run(&request("Hello world", QualityMode::Fast))
        .await
        .unwrap();

    for stage in [StageId::Mqm, StageId::Iso, StageId::Synthesize] {
        let slot = result.stage(stage).unwrap();
        assert_eq!(slot.status, StageStatus::Skipped);
        assert!(slot.payload.is_none());
    }
    assert_eq!(result.best_translation(), Some("Hej världen!"));
}

#[tokio::test]
async fn test_balancedMode_synthesisFlag_shouldBeIgnored() {
    let pipeline = pipeline_with(MockClient::scripted());
    let request = request("Hello world", QualityMode::Balanced).with_synthesis(true);

    let result = pipeline.run(&request).await.unwrap();

    assert_eq!(
        result.status(StageId::Synthesize),
        Some(StageStatus::Skipped)
    );
    assert_eq!(result.status(StageId::QualityAssess), Some(StageStatus::Ok));
}

#[tokio::test]
async fn test_qualityMode_isoReport_shouldReflectSettledOutputs() {
    let pipeline = pipeline_with(MockClient::scripted());

    let result = pipeline
        .run(&request("Hello world", QualityMode::Quality))
        .await
        .unwrap();

    let payload = result.stage(StageId::Iso).unwrap().payload.as_ref().unwrap();
    match payload {
        StagePayload::Iso(report) => {
            // The scripted outputs satisfy every area predicate, including
            // the ones reading the settled MQM report
            assert!(report.compliant);
            assert!((report.score - 100.0).abs() < 1e-9);
            assert!(report.recommendations.is_empty());
            for area in &report.areas {
                assert!(area.compliant, "{:?}", area.area);
                assert!((area.score - 1.0).abs() < 1e-9, "{:?}", area.area);
            }
        }
        other => panic!("unexpected payload: {:?}", other),
    }
}

#[tokio::test]
async fn test_failedMqmStage_shouldFallBackToZeroScore() {
    let pipeline = pipeline_with(MockClient::fail_stage(StageId::Mqm));

    let result = pipeline
        .run(&request("Hello world", QualityMode::Quality))
        .await
        .unwrap();

    let slot = result.stage(StageId::Mqm).unwrap();
    assert_eq!(slot.status, StageStatus::Fallback);
    match slot.payload.as_ref().unwrap() {
        StagePayload::Mqm(report) => {
            assert_eq!(report.total_score, 0.0);
            assert_eq!(report.mqm_grade, Grade::F);
            assert!(!report.industry_compliance);
        }
        other => panic!("unexpected payload: {:?}", other),
    }

    // The iso stage then sees the degraded score and withholds the
    // error-detection increment
    let iso = result.stage(StageId::Iso).unwrap().payload.as_ref().unwrap();
    match iso {
        StagePayload::Iso(report) => {
            let qa = &report.areas[1];
            assert!(!qa.compliant);
            assert!((qa.score - 0.70).abs() < 1e-9);
        }
        other => panic!("unexpected payload: {:?}", other),
    }
}

#[tokio::test]
async fn test_failedTranslateStage_shouldDegradeButCompleteJob() {
    let pipeline = pipeline_with(MockClient::fail_stage(StageId::Translate));

    let result = pipeline
        .run(&request("Hello world", QualityMode::Balanced))
        .await
        .unwrap();

    assert_eq!(result.status(StageId::Translate), Some(StageStatus::Fallback));
    // Downstream stages still run against the fallback draft
    assert_eq!(result.status(StageId::Cultural), Some(StageStatus::Ok));
    assert_eq!(result.status(StageId::Review), Some(StageStatus::Ok));
    assert!(result.best_translation().is_some());
}

#[tokio::test]
async fn test_intermittentFailures_shouldNeverLoseStageSlots() {
    let pipeline = pipeline_with(MockClient::intermittent(2));

    let result = pipeline
        .run(&request("Hello world", QualityMode::Quality))
        .await
        .unwrap();

    assert_eq!(result.stages.len(), 7);
    for stage in [
        StageId::Translate,
        StageId::Cultural,
        StageId::Review,
        StageId::QualityAssess,
        StageId::Mqm,
        StageId::Iso,
    ] {
        let slot = result.stage(stage).unwrap();
        assert_ne!(slot.status, StageStatus::Skipped, "{}", stage);
        assert!(slot.settled_with_payload(), "{}", stage);
    }
}

#[tokio::test]
async fn test_zeroDeadline_shouldSkipEverythingWithoutFailing() {
    let pipeline = pipeline_with(MockClient::slow(100));

    let result = pipeline
        .run_with_deadline(
            &request("Hello world", QualityMode::Quality),
            Some(Duration::ZERO),
        )
        .await
        .unwrap();

    for slot in &result.stages {
        assert_eq!(slot.status, StageStatus::Skipped);
    }
    assert_eq!(result.best_translation(), None);
}

#[tokio::test]
async fn test_resultMetadata_shouldCarryRequestFields() {
    let pipeline = pipeline_with(MockClient::scripted());
    let request = request("Hello world", QualityMode::Balanced);

    let result = pipeline.run(&request).await.unwrap();

    assert!(!result.request_id.is_empty());
    assert_eq!(result.source_text, "Hello world");
    assert_eq!(result.quality_mode, QualityMode::Balanced);
    assert!(result.processing_time >= 0.0);
    assert!(!result.timestamp.is_empty());
}
