/*!
 * # linguaqa - Multi-Agent Translation Quality Pipeline
 *
 * A Rust library that orchestrates a multi-stage translation job in which
 * every stage delegates its linguistic work to an external text-generation
 * service, while the orchestrator owns stage sequencing, conditional
 * inclusion, failure containment, and deterministic scoring.
 *
 * ## Features
 *
 * - Quality-mode driven stage selection (fast / balanced / quality)
 * - Dependency-ordered stage execution with concurrent dispatch of
 *   independent stages
 * - Per-stage fallback payloads: a failed generation call degrades a single
 *   stage, never the whole job
 * - Deterministic MQM error-penalty scoring with letter grades
 * - ISO 17100:2015 weighted compliance evaluation
 * - Bounded batch processing with per-job failure isolation
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `config`: Pipeline settings and limits
 * - `model`: Typed stage payloads, job requests and assembled results
 * - `stages`: The stage catalogue, prompts, parsing and fallback payloads
 * - `pipeline`: The DAG orchestrator and the batch coordinator
 * - `quality`: Deterministic scoring:
 *   - `quality::mqm`: MQM error-penalty aggregation
 *   - `quality::iso`: ISO 17100 compliance evaluation
 * - `providers`: Generation-service clients:
 *   - `providers::openai`: OpenAI-compatible API client
 *   - `providers::mock`: Scripted clients for testing
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod config;
pub mod errors;
pub mod model;
pub mod pipeline;
pub mod providers;
pub mod quality;
pub mod stages;

// Re-export main types for easier usage
pub use config::PipelineSettings;
pub use errors::{ProviderError, StageError, ValidationError};
pub use model::{
    BatchOutcome, FinalResult, JobRequest, QualityMode, StageId, StageResult, StageStatus,
    TargetLanguage,
};
pub use pipeline::{BatchCoordinator, Pipeline};
pub use providers::GenerationClient;
