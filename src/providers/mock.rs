/*!
 * Mock generation clients for testing.
 *
 * The mock client simulates different service behaviors:
 * - `MockClient::scripted()` - Always succeeds with valid per-stage JSON
 * - `MockClient::failing()` - Always fails with an error
 * - `MockClient::fail_stage(..)` - Fails only one stage's calls
 * - `MockClient::intermittent(..)` - Fails every Nth request
 * - `MockClient::malformed()` - Succeeds with unparsable content
 * - `MockClient::slow(..)` - Delays every response
 * - `MockClient::panic_on(..)` - Panics when the prompt carries a marker
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::model::StageId;

use super::{GenerationClient, GenerationRequest, GenerationResponse};

/// Behavior mode for the mock client
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with valid scripted JSON for the requested stage
    Scripted,
    /// Always fails with an error
    Failing,
    /// Fails calls for one stage, succeeds for every other
    FailStage(StageId),
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Succeeds but returns content that is not valid JSON
    Malformed,
    /// Delays every response (for timeout testing)
    Slow { delay_ms: u64 },
    /// Panics when the user prompt contains the marker (simulates a task
    /// crashing mid-job)
    PanicOn(&'static str),
}

/// Mock generation client
#[derive(Debug)]
pub struct MockClient {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter for intermittent failures
    request_count: Arc<AtomicUsize>,
}

impl MockClient {
    /// Create a new mock client with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a client that always succeeds with valid scripted payloads
    pub fn scripted() -> Self {
        Self::new(MockBehavior::Scripted)
    }

    /// Create a client that always fails
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a client that fails only the given stage
    pub fn fail_stage(stage: StageId) -> Self {
        Self::new(MockBehavior::FailStage(stage))
    }

    /// Create an intermittently failing client
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a client that returns unparsable content
    pub fn malformed() -> Self {
        Self::new(MockBehavior::Malformed)
    }

    /// Create a client that delays every response
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Create a client that panics on prompts containing the marker
    pub fn panic_on(marker: &'static str) -> Self {
        Self::new(MockBehavior::PanicOn(marker))
    }

    /// Number of requests this client has served
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Valid scripted JSON content for a stage, matching its payload schema.
    pub fn scripted_content(stage: StageId) -> String {
        match stage {
            StageId::Translate => r#"{
                "translation": "Hej världen",
                "confidence": 92.0,
                "translation_notes": [],
                "difficulty_level": "easy",
                "key_decisions": ["kept the greeting informal"]
            }"#
            .to_string(),
            StageId::Cultural => r#"{
                "cultural_appropriateness": "high",
                "adaptations": ["greeting adapted to everyday register"],
                "regional_notes": [],
                "register_recommendations": "neutral",
                "localization_suggestions": [],
                "cultural_risks": [],
                "target_audience_fit": "excellent"
            }"#
            .to_string(),
            StageId::Review => r#"{
                "final_translation": "Hej världen!",
                "review_comments": ["tightened punctuation"],
                "changes_made": ["added exclamation mark"],
                "confidence_improvement": 4.0,
                "quality_grade": "A"
            }"#
            .to_string(),
            StageId::QualityAssess => r#"{
                "overall_score": 91.0,
                "detailed_scores": {
                    "fluency": 92.0,
                    "grammar": 90.0,
                    "accuracy": 93.0,
                    "naturalness": 89.0,
                    "vocabulary": 88.0,
                    "colloquial_usage": 87.0
                },
                "assessment_notes": [],
                "strengths": ["fluent and natural phrasing"],
                "areas_for_improvement": [],
                "industry_benchmark_met": true,
                "error_count": 1,
                "errors_per_1000_words": 2.0
            }"#
            .to_string(),
            StageId::Mqm => r#"{
                "word_count": 2,
                "errors": [
                    {
                        "category": "fluency",
                        "subcategory": "punctuation",
                        "severity": "minor",
                        "description": "missing exclamation mark",
                        "location": "sentence end"
                    }
                ]
            }"#
            .to_string(),
            StageId::Synthesize => r#"{
                "final_translation": "Hej världen!",
                "quality_improvements": ["confirmed reviewer punctuation"],
                "errors_fixed": [],
                "iso_enhancements": [],
                "confidence_level": "very_good",
                "translation_grade": "A",
                "professional_ready": true,
                "final_notes": []
            }"#
            .to_string(),
            // The iso stage is computed locally and never reaches a client
            StageId::Iso => "{}".to_string(),
        }
    }
}

impl Clone for MockClient {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
        }
    }
}

#[async_trait]
impl GenerationClient for MockClient {
    async fn invoke(&self, request: GenerationRequest) -> Result<GenerationResponse, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Scripted => Ok(GenerationResponse {
                content: Self::scripted_content(request.stage),
            }),

            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated provider failure".to_string(),
            }),

            MockBehavior::FailStage(stage) => {
                if request.stage == stage {
                    Err(ProviderError::ApiError {
                        status_code: 503,
                        message: format!("Simulated failure for stage {}", stage),
                    })
                } else {
                    Ok(GenerationResponse {
                        content: Self::scripted_content(request.stage),
                    })
                }
            }

            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        status_code: 503,
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                    })
                } else {
                    Ok(GenerationResponse {
                        content: Self::scripted_content(request.stage),
                    })
                }
            }

            MockBehavior::Malformed => Ok(GenerationResponse {
                content: "this is not the JSON you are looking for".to_string(),
            }),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                Ok(GenerationResponse {
                    content: Self::scripted_content(request.stage),
                })
            }

            MockBehavior::PanicOn(marker) => {
                if request.user_prompt.contains(marker) {
                    panic!("simulated crash on marker '{}'", marker);
                }
                Ok(GenerationResponse {
                    content: Self::scripted_content(request.stage),
                })
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "Simulated connection failure".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_for(stage: StageId) -> GenerationRequest {
        GenerationRequest {
            stage,
            system_prompt: "system".to_string(),
            user_prompt: "user".to_string(),
        }
    }

    #[tokio::test]
    async fn test_scriptedClient_shouldReturnValidJsonPerStage() {
        let client = MockClient::scripted();

        for stage in crate::stages::CATALOGUE {
            let response = client.invoke(request_for(stage)).await.unwrap();
            assert!(serde_json::from_str::<serde_json::Value>(&response.content).is_ok());
        }
    }

    #[tokio::test]
    async fn test_failingClient_shouldReturnError() {
        let client = MockClient::failing();

        let result = client.invoke(request_for(StageId::Translate)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_failStageClient_shouldOnlyFailTargetStage() {
        let client = MockClient::fail_stage(StageId::Review);

        assert!(client.invoke(request_for(StageId::Translate)).await.is_ok());
        assert!(client.invoke(request_for(StageId::Review)).await.is_err());
        assert!(client.invoke(request_for(StageId::Mqm)).await.is_ok());
    }

    #[tokio::test]
    async fn test_intermittentClient_shouldFailPeriodically() {
        let client = MockClient::intermittent(3);
        let request = request_for(StageId::Translate);

        assert!(client.invoke(request.clone()).await.is_ok());
        assert!(client.invoke(request.clone()).await.is_ok());
        assert!(client.invoke(request.clone()).await.is_err());
        assert!(client.invoke(request.clone()).await.is_ok());
    }

    #[tokio::test]
    async fn test_clonedClient_shouldShareRequestCount() {
        let client = MockClient::intermittent(2);
        let cloned = client.clone();
        let request = request_for(StageId::Translate);

        assert!(client.invoke(request.clone()).await.is_ok());
        // Second request on the clone fails (shared counter)
        assert!(cloned.invoke(request.clone()).await.is_err());
    }

    #[tokio::test]
    async fn test_panicOnClient_shouldPassCleanPrompts() {
        let client = MockClient::panic_on("boom");

        assert!(client.invoke(request_for(StageId::Translate)).await.is_ok());
    }

    #[tokio::test]
    async fn test_malformedClient_shouldReturnNonJsonContent() {
        let client = MockClient::malformed();

        let response = client.invoke(request_for(StageId::Translate)).await.unwrap();
        assert!(serde_json::from_str::<serde_json::Value>(&response.content).is_err());
    }
}
