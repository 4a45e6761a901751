/*!
 * Pipeline orchestration.
 *
 * - `orchestrator`: Runs a single job through the stage catalogue,
 *   dispatching independent stages concurrently and containing failures
 *   per stage
 * - `batch`: Runs a bounded batch of jobs with per-job failure isolation
 */

pub mod batch;
pub mod orchestrator;

pub use batch::BatchCoordinator;
pub use orchestrator::Pipeline;
