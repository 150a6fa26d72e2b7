// ============================================================
// Layer 4 — Evaluation Layer
// ============================================================
// Scores model hypotheses against references and sources.
//
// What's in this layer:
//
//   coverage.rs   — fractional requirement coverage, plain and
//                   essential-only, via loose word overlap
//
//   ordering.rs   — task-ordering concordance: best-match
//                   alignment by text similarity, then Kendall
//                   tau over the rank sequences
//
//   similarity.rs — the production TextSimilarity backend
//                   (sentence embeddings, lazily loaded once,
//                   shared process-wide)
//
//   scores.rs     — corpus drivers, the explicit scorer
//                   registry, and the harness entry point
//
// Per-example failures never abort a corpus run; see scores.rs
// for the (asymmetric) handling per scorer family.

/// Requirement coverage metric
pub mod coverage;

/// Task-ordering concordance metric
pub mod ordering;

/// Embedding-based similarity backend
pub mod similarity;

/// Corpus scorers, registry, harness entry point
pub mod scores;

pub use coverage::compute_requirement_coverage;
pub use ordering::compute_task_order_score;
pub use scores::{
    get_scores, KendallTaskRankingScorer, MetricReport, RequirementCoverageScorer, ScoreInputs,
    Scorer, ScorerRegistry,
};
pub use similarity::EmbeddingSimilarity;
