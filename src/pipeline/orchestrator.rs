/*!
 * Single-job pipeline orchestrator.
 *
 * A job runs through the fixed stage catalogue under its quality mode's
 * active set. Stages whose dependencies have all settled are dispatched
 * concurrently; each stage settles exactly once as ok, fallback, or
 * skipped. A failed generation call degrades only its own stage, and a
 * caller-supplied deadline skips (never fails) the stages it cuts off.
 */

use futures::future::join_all;
use log::{debug, info};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::config::PipelineSettings;
use crate::errors::ValidationError;
use crate::model::{FinalResult, JobRequest, StageId, StageResult};
use crate::providers::GenerationClient;
use crate::stages::{active_set, dependencies, StageContext, StageOutputs, StageRunner, CATALOGUE};

/// Orchestrates a single job through the stage catalogue
#[derive(Debug, Clone)]
pub struct Pipeline {
    /// Executes individual stages
    runner: StageRunner,

    /// Configured limits and timeouts
    settings: PipelineSettings,
}

impl Pipeline {
    /// Create a pipeline backed by the given generation client
    pub fn new(client: Arc<dyn GenerationClient>, settings: PipelineSettings) -> Self {
        Self {
            runner: StageRunner::new(client),
            settings,
        }
    }

    /// Run a job with no overall deadline.
    ///
    /// Validation is the only fallible boundary; once a job is accepted it
    /// always produces a `FinalResult`.
    pub async fn run(&self, request: &JobRequest) -> Result<FinalResult, ValidationError> {
        self.run_with_deadline(request, None).await
    }

    /// Run a job, bounding its total wall-clock time when a deadline is
    /// given. Stages that cannot start or finish before the deadline settle
    /// as skipped.
    pub async fn run_with_deadline(
        &self,
        request: &JobRequest,
        deadline: Option<Duration>,
    ) -> Result<FinalResult, ValidationError> {
        request.validate(&self.settings)?;

        let request_id = Uuid::new_v4().to_string();
        let start = Instant::now();
        let deadline = deadline.map(|d| start + d);

        let active = active_set(request.quality_mode, request.include_synthesis);
        info!(
            "Job {} starting: mode={}, language={}, {} active stages",
            request_id,
            request.quality_mode,
            request.target_language,
            active.len()
        );

        let mut pending: Vec<StageId> = active;
        let mut settled: HashMap<StageId, StageResult> = HashMap::new();
        let mut outputs = StageOutputs::default();

        while !pending.is_empty() {
            // A stage is ready once none of its dependencies is still
            // pending; inactive dependencies count as settled with no output
            let ready: Vec<StageId> = pending
                .iter()
                .copied()
                .filter(|stage| dependencies(*stage).iter().all(|dep| !pending.contains(dep)))
                .collect();
            debug!("Job {}: dispatching {:?}", request_id, ready);

            let ctx = StageContext {
                source_text: &request.source_text,
                target_language: request.target_language,
                outputs: &outputs,
            };
            let results = join_all(
                ready
                    .iter()
                    .map(|&stage| self.execute_stage(stage, &ctx, deadline)),
            )
            .await;

            pending.retain(|stage| !ready.contains(stage));
            for result in results {
                if let Some(payload) = &result.payload {
                    outputs.record(payload);
                }
                settled.insert(result.stage, result);
            }
        }

        let stages = CATALOGUE
            .iter()
            .map(|&stage| {
                settled
                    .remove(&stage)
                    .unwrap_or_else(|| StageResult::skipped(stage, None))
            })
            .collect();

        let processing_time = start.elapsed().as_secs_f64();
        info!("Job {} finished in {:.2}s", request_id, processing_time);

        Ok(FinalResult {
            request_id,
            source_text: request.source_text.clone(),
            target_language: request.target_language,
            quality_mode: request.quality_mode,
            stages,
            processing_time,
            timestamp: chrono::Utc::now().to_rfc3339(),
        })
    }

    /// Execute one stage under the per-stage timeout and the job deadline.
    ///
    /// A stage timeout substitutes a fallback payload; running out of job
    /// deadline skips the stage instead, since the stage was never given
    /// its full budget.
    async fn execute_stage(
        &self,
        stage: StageId,
        ctx: &StageContext<'_>,
        deadline: Option<Instant>,
    ) -> StageResult {
        let mut budget = self.settings.stage_timeout();
        let mut deadline_bound = false;

        if let Some(deadline) = deadline {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return StageResult::skipped(stage, Some("job deadline exceeded".to_string()));
            }
            if remaining < budget {
                budget = remaining;
                deadline_bound = true;
            }
        }

        match tokio::time::timeout(budget, self.runner.run(stage, ctx)).await {
            Ok(result) => result,
            Err(_) if deadline_bound => {
                StageResult::skipped(stage, Some("job deadline exceeded".to_string()))
            }
            Err(_) => StageResult::fallback(
                stage,
                self.runner.fallback_payload(stage, ctx),
                format!("stage timed out after {}s", budget.as_secs()),
            ),
        }
    }

    /// The configured settings this pipeline runs under
    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }
}
