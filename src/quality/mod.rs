/*!
 * Deterministic quality scoring.
 *
 * This module contains the two scoring algorithms that turn stage outputs
 * into numeric and letter quality judgments:
 *
 * - `mqm`: MQM (Multidimensional Quality Metrics) error-penalty aggregation
 * - `iso`: ISO 17100:2015 weighted compliance evaluation
 *
 * Both are pure functions of their inputs; re-running either with the same
 * inputs yields an identical result.
 */

pub use self::iso::evaluate_compliance;
pub use self::mqm::{aggregate_errors, penalty_for, MqmFindings};

pub mod iso;
pub mod mqm;
