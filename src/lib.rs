//! # proc2seq
//!
//! Prepares procedural text (recipes: target product, requirement list,
//! ordered task steps) for sequence-to-sequence training, and scores
//! model output against references with order-aware, domain-specific
//! metrics.
//!
//! The crate is organised in layers:
//!
//!   - `domain`   — pure value types (Procedure, Method, Requirement)
//!                  and the trait seams external collaborators implement
//!   - `problems` — the closed set of src/tgt framings and their
//!                  task-type groups
//!   - `data`     — the serialization codec: Procedure ↔ delimited
//!                  (src, tgt) text, plus the tokenization seam
//!   - `evaluate` — requirement coverage, task-ordering concordance,
//!                  the embedding similarity backend, and the corpus
//!                  scorer registry
//!
//! Ingestion adapters, the trainer, tokenizer backends and report
//! rendering all live outside this crate; the contracts they implement
//! are in `domain::traits`.

pub mod data;
pub mod domain;
pub mod error;
pub mod evaluate;
pub mod problems;

// Re-exports for convenience
pub use data::{decode, encode, TranslationExample, SPECIAL_TOKENS};
pub use domain::{Method, Partition, Procedure, Requirement};
pub use error::{CodecError, ScoreError, UnknownProblem, UnknownTaskType};
pub use evaluate::{
    compute_requirement_coverage, compute_task_order_score, get_scores, EmbeddingSimilarity,
    MetricReport, ScorerRegistry,
};
pub use problems::{problems_for_task_type, Problem, TaskType};
