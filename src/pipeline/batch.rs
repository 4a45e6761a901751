/*!
 * Bounded batch coordination.
 *
 * A batch is validated as a whole before any job starts, then each job runs
 * in its own task under a concurrency limit. Job failures are isolated: a
 * panic or internal error in one job becomes a degraded result in its slot
 * and never disturbs its siblings. Results keep submission order.
 */

use log::{error, info};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use uuid::Uuid;

use crate::config::PipelineSettings;
use crate::errors::ValidationError;
use crate::model::{BatchOutcome, FinalResult, JobRequest};

use super::Pipeline;

/// Runs batches of jobs through a shared pipeline
#[derive(Debug, Clone)]
pub struct BatchCoordinator {
    /// Shared single-job pipeline
    pipeline: Arc<Pipeline>,

    /// Maximum number of jobs running concurrently
    concurrency: usize,
}

impl BatchCoordinator {
    /// Create a coordinator whose concurrency matches the batch cap, so a
    /// full batch runs with every job in flight at once.
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        let concurrency = pipeline.settings().max_batch_size.max(1);
        Self {
            pipeline,
            concurrency,
        }
    }

    /// Override the concurrency limit (clamped to at least one job)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// The number of jobs allowed to run at once
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    fn settings(&self) -> &PipelineSettings {
        self.pipeline.settings()
    }

    /// Run a batch to completion.
    ///
    /// Validation rejects the whole batch up front; after that the batch
    /// always completes with one result per submitted job, in submission
    /// order.
    pub async fn process(&self, requests: Vec<JobRequest>) -> Result<BatchOutcome, ValidationError> {
        if requests.is_empty() {
            return Err(ValidationError::EmptyBatch);
        }
        let max = self.settings().max_batch_size;
        if requests.len() > max {
            return Err(ValidationError::BatchTooLarge {
                size: requests.len(),
                max,
            });
        }
        for request in &requests {
            request.validate(self.settings())?;
        }

        let batch_id = Uuid::new_v4().to_string();
        let start = Instant::now();
        info!("Batch {} starting with {} jobs", batch_id, requests.len());

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let handles: Vec<_> = requests
            .into_iter()
            .map(|request| {
                let pipeline = Arc::clone(&self.pipeline);
                let semaphore = Arc::clone(&semaphore);
                let job = request.clone();
                let handle = tokio::spawn(async move {
                    // The semaphore is never closed, so acquisition only
                    // fails if the task is being torn down
                    let _permit = semaphore.acquire_owned().await;
                    pipeline.run(&job).await
                });
                (request, handle)
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        let mut error_count = 0;
        for (request, handle) in handles {
            let result = match handle.await {
                Ok(Ok(result)) => result,
                Ok(Err(e)) => {
                    // Requests were validated up front, so this is internal
                    error!("Batch {}: job rejected mid-flight: {}", batch_id, e);
                    error_count += 1;
                    FinalResult::degraded(&request, Uuid::new_v4().to_string(), &e.to_string())
                }
                Err(e) => {
                    error!("Batch {}: job task failed: {}", batch_id, e);
                    error_count += 1;
                    FinalResult::degraded(&request, Uuid::new_v4().to_string(), &e.to_string())
                }
            };
            results.push(result);
        }

        let success_count = results.len() - error_count;
        let total_processing_time = start.elapsed().as_secs_f64();
        info!(
            "Batch {} finished in {:.2}s: {} succeeded, {} failed",
            batch_id, total_processing_time, success_count, error_count
        );

        Ok(BatchOutcome {
            batch_id,
            results,
            success_count,
            error_count,
            total_processing_time,
            timestamp: chrono::Utc::now().to_rfc3339(),
        })
    }
}
