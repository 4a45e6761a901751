/*!
 * Unit tests for batch coordination
 */

use linguaqa::errors::ValidationError;
use linguaqa::model::{QualityMode, StageId, StageStatus};
use linguaqa::providers::mock::MockClient;

use crate::common::{batch_of, coordinator_with, request};

#[tokio::test]
async fn test_fullBatch_shouldBeAcceptedAtTheCap() {
    let coordinator = coordinator_with(MockClient::scripted());

    let outcome = coordinator.process(batch_of(10)).await.unwrap();

    assert_eq!(outcome.results.len(), 10);
    assert_eq!(outcome.success_count, 10);
    assert_eq!(outcome.error_count, 0);
    assert!(!outcome.batch_id.is_empty());
}

#[tokio::test]
async fn test_overCapBatch_shouldBeRejectedBeforeAnyWork() {
    let coordinator = coordinator_with(MockClient::scripted());

    assert!(matches!(
        coordinator.process(batch_of(11)).await,
        Err(ValidationError::BatchTooLarge { size: 11, max: 10 })
    ));
}

#[tokio::test]
async fn test_emptyBatch_shouldBeRejected() {
    let coordinator = coordinator_with(MockClient::scripted());

    assert!(matches!(
        coordinator.process(Vec::new()).await,
        Err(ValidationError::EmptyBatch)
    ));
}

#[tokio::test]
async fn test_mixedModes_shouldEachFollowTheirOwnActiveSet() {
    let coordinator = coordinator_with(MockClient::scripted());
    let requests = vec![
        request("first", QualityMode::Fast),
        request("second", QualityMode::Balanced),
        request("third", QualityMode::Quality),
    ];

    let outcome = coordinator.process(requests).await.unwrap();

    assert_eq!(
        outcome.results[0].status(StageId::Cultural),
        Some(StageStatus::Skipped)
    );
    assert_eq!(
        outcome.results[1].status(StageId::Cultural),
        Some(StageStatus::Ok)
    );
    assert_eq!(
        outcome.results[1].status(StageId::Mqm),
        Some(StageStatus::Skipped)
    );
    assert_eq!(
        outcome.results[2].status(StageId::Mqm),
        Some(StageStatus::Ok)
    );
}

#[tokio::test]
async fn test_slowJobs_shouldAllCompleteUnderConcurrencyLimit() {
    let coordinator = coordinator_with(MockClient::slow(20));

    let outcome = coordinator.process(batch_of(6)).await.unwrap();

    assert_eq!(outcome.success_count, 6);
    for (index, result) in outcome.results.iter().enumerate() {
        assert_eq!(result.source_text, format!("batch text {}", index));
        assert_eq!(result.status(StageId::Translate), Some(StageStatus::Ok));
    }
}

#[tokio::test]
async fn test_crashingJobs_shouldDegradeOnlyTheirOwnSlots() {
    let coordinator = coordinator_with(MockClient::panic_on("crash"));
    let requests = vec![
        request("first text", QualityMode::Fast),
        request("please crash here", QualityMode::Fast),
        request("third text", QualityMode::Fast),
        request("another crash case", QualityMode::Fast),
        request("fifth text", QualityMode::Fast),
    ];

    let outcome = coordinator.process(requests).await.unwrap();

    assert_eq!(outcome.results.len(), 5);
    assert_eq!(outcome.success_count, 3);
    assert_eq!(outcome.error_count, 2);

    let expected_texts = [
        "first text",
        "please crash here",
        "third text",
        "another crash case",
        "fifth text",
    ];
    for (index, result) in outcome.results.iter().enumerate() {
        assert_eq!(result.source_text, expected_texts[index]);

        let translate = result.stage(StageId::Translate).unwrap();
        if result.source_text.contains("crash") {
            // A crashed job becomes a degraded result in its own slot
            assert_eq!(translate.status, StageStatus::Fallback);
            assert!(result
                .best_translation()
                .unwrap()
                .starts_with("Translation failed"));
            assert_eq!(result.status(StageId::Review), Some(StageStatus::Skipped));
        } else {
            assert_eq!(translate.status, StageStatus::Ok);
            assert_eq!(result.best_translation(), Some("Hej världen!"));
        }
    }
}

#[tokio::test]
async fn test_degradedStages_shouldNotCountAsJobErrors() {
    let coordinator = coordinator_with(MockClient::failing());

    let outcome = coordinator.process(batch_of(4)).await.unwrap();

    // Stage failures degrade stages inside otherwise-successful jobs
    assert_eq!(outcome.success_count, 4);
    assert_eq!(outcome.error_count, 0);
    for result in &outcome.results {
        assert_eq!(
            result.status(StageId::Translate),
            Some(StageStatus::Fallback)
        );
        assert_eq!(result.best_translation(), result.stage(StageId::Review)
            .and_then(|r| r.payload.as_ref())
            .and_then(|p| p.as_review())
            .map(|r| r.final_translation.as_str()));
    }
}
