// ============================================================
// Crate-Wide Error Taxonomy
// ============================================================
// Typed failures shared by the data and evaluation layers.
//
// Two families with different propagation rules:
//
//   CodecError — encode/decode failures. Always surfaced to the
//                caller: a malformed procedure must never enter
//                training data undetected.
//
//   ScoreError — per-example metric failures. Caught at the
//                corpus aggregation boundary; see evaluate::scores
//                for how each scorer family treats them
//                (coverage scores the example 0, task ranking
//                drops the example from the mean).
//
// Reference: thiserror crate documentation

use thiserror::Error;

use crate::problems::Problem;

/// Failures converting between a `Procedure` and a `TranslationExample`.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Encoding reads `methods[0]`, so a procedure without methods
    /// cannot become a translation example.
    #[error("procedure `{target_product}` has no methods; cannot build a translation example")]
    NoMethods { target_product: String },

    /// No (de)serialization is defined for this problem.
    /// Language-modeling framings have no decode direction, and the
    /// shuffle variant is not wired into the codec yet.
    #[error("no codec implementation for problem `{0}`")]
    UnsupportedProblem(Problem),

    /// An expected-once separator was absent from a field that requires it.
    #[error("expected separator `{separator}` missing from {field}")]
    MissingSeparator {
        separator: &'static str,
        field:     &'static str,
    },

    /// Decode post-condition: target product, requirement list and task
    /// list must all be non-empty in the decoded procedure.
    #[error("decoded procedure has an empty {field}")]
    EmptyField { field: &'static str },
}

/// Failures while computing one example's metric score.
#[derive(Debug, Error)]
pub enum ScoreError {
    /// The structured source/reference text could not be parsed back
    /// into domain objects.
    #[error("cannot parse structured text: {0}")]
    Codec(#[from] CodecError),

    /// Ordering is undefined when the model truncates its prediction.
    #[error("{predicted} predicted tasks for {expected} ground-truth tasks; ordering is undefined for truncated predictions")]
    TruncatedPrediction { predicted: usize, expected: usize },

    /// Every predicted task matched the same ground-truth task, so the
    /// rank sequence carries no ordering information.
    #[error("predicted ranks were constant ({ranks:?}); Kendall tau is not defined")]
    ConstantRanks { ranks: Vec<usize> },

    /// The rank correlation evaluated to NaN.
    #[error("Kendall tau was NaN")]
    UndefinedCorrelation,

    /// Best-match alignment needs non-empty text on both sides.
    #[error("cannot best-match an empty task text")]
    EmptyTask,

    /// The metric is only defined for task-predicting problems.
    #[error("metric `{metric}` is not defined for problem `{problem}`")]
    InapplicableProblem {
        metric:  &'static str,
        problem: Problem,
    },

    /// The injected similarity backend failed.
    #[error(transparent)]
    Similarity(#[from] anyhow::Error),
}

/// Task-type lookup received a name outside the closed set.
#[derive(Debug, Error)]
#[error("unknown task type `{0}`; expected `translation` or `language_modeling`")]
pub struct UnknownTaskType(pub String);

/// Problem lookup received a name outside the closed set.
#[derive(Debug, Error)]
#[error("unknown problem `{0}`")]
pub struct UnknownProblem(pub String);
