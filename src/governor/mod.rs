//! Registry Governor
//!
//! For each model role independently, decides whether the most recent
//! Candidate becomes the Active version:
//!
//! 1. No candidate: nothing to do.
//! 2. Gate the evaluation data and score the candidate. A failing gate or an
//!    unusable candidate archives it.
//! 3. No Active version: promote the candidate (first deployment).
//! 4. Otherwise score the Active version on the same data and apply the
//!    role's conjunctive [`PromotionRule`]. Ties keep the Active version.
//!
//! Every run produces a [`DecisionRecord`], including aborted ones.

mod decision;
mod rules;
mod runner;
mod sink;


pub use decision::{DecisionRecord, Outcome};
pub use rules::{Comparison, MetricRequirement, PromotionRule, RuleOutcome};
pub use runner::Governor;
pub use sink::{DecisionSink, InMemoryDecisionSink, JsonLinesDecisionSink};

pub(crate) use sink::read_json_lines;
