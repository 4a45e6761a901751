/*!
 * Common test utilities for the linguaqa test suite
 */

use std::sync::Arc;

use linguaqa::config::PipelineSettings;
use linguaqa::model::{JobRequest, QualityMode, TargetLanguage};
use linguaqa::pipeline::{BatchCoordinator, Pipeline};
use linguaqa::providers::mock::MockClient;

/// Creates a pipeline backed by the given mock client with default settings
pub fn pipeline_with(client: MockClient) -> Pipeline {
    Pipeline::new(Arc::new(client), PipelineSettings::default())
}

/// Creates a batch coordinator backed by the given mock client
pub fn coordinator_with(client: MockClient) -> BatchCoordinator {
    BatchCoordinator::new(Arc::new(pipeline_with(client)))
}

/// Creates a Swedish job request in the given mode
pub fn request(text: &str, mode: QualityMode) -> JobRequest {
    JobRequest::new(text, TargetLanguage::Swedish).with_mode(mode)
}

/// Creates a batch of distinct fast-mode requests
pub fn batch_of(count: usize) -> Vec<JobRequest> {
    (0..count)
        .map(|i| request(&format!("batch text {}", i), QualityMode::Fast))
        .collect()
}
