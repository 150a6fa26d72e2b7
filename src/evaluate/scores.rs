// ============================================================
// Layer 4 — Corpus Scorers & Registry
// ============================================================
// Drives the per-example metrics over whole hypothesis arrays
// and aggregates corpus-level numbers. The scoring harness
// supplies parallel sources/references/hypotheses arrays (one
// hypothesis array per model) and the active problem name.
//
// Failure handling differs by scorer family, deliberately:
//   - requirement coverage scores a failing example 0
//   - task ranking drops a failing example from the mean
// This asymmetry is observed, repeated behavior of the system
// being reimplemented — do not "fix" one side to match the other.
//
// Scorers are registered in one explicit map at construction
// time; nothing depends on import or registration order.

use std::collections::BTreeMap;
use std::sync::Arc;

use rayon::prelude::*;

use crate::data::codec::{split_target_product, string_to_tasks};
use crate::domain::traits::TextSimilarity;
use crate::error::ScoreError;
use crate::evaluate::coverage::compute_requirement_coverage;
use crate::evaluate::ordering::compute_task_order_score;
use crate::problems::Problem;

/// One scorer's output: per-example scores plus the corpus aggregate.
///
/// `corpus_score` is `None` when no example could be scored. For the
/// task-ranking scorer, `example_scores` holds only the examples that
/// survived (dropped examples leave no placeholder).
#[derive(Debug, Clone, PartialEq)]
pub struct MetricReport {
    pub corpus_score:   Option<f64>,
    pub example_scores: Vec<f64>,
}

/// The parallel text arrays one scoring run consumes.
#[derive(Debug, Clone, Copy)]
pub struct ScoreInputs<'a> {
    pub sources:    &'a [String],
    pub references: &'a [String],
    pub hypotheses: &'a [String],
    pub problem:    Problem,
}

pub trait Scorer: Send + Sync {
    /// Stable identifier used for registry lookup ("req_cov", ...).
    fn id(&self) -> &'static str;

    /// Human-readable metric name for report tables.
    fn name(&self) -> &'static str;

    fn score(&self, inputs: &ScoreInputs<'_>) -> Result<MetricReport, ScoreError>;
}

fn mean(scores: &[f64]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    Some(scores.iter().sum::<f64>() / scores.len() as f64)
}

// ─── Requirement coverage ─────────────────────────────────────────────────────

/// Corpus driver for `compute_requirement_coverage`, in plain and
/// essential-only flavours.
pub struct RequirementCoverageScorer {
    essential_only: bool,
}

impl RequirementCoverageScorer {
    pub fn new() -> Self {
        Self { essential_only: false }
    }

    pub fn essential() -> Self {
        Self { essential_only: true }
    }
}

impl Default for RequirementCoverageScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Scorer for RequirementCoverageScorer {
    fn id(&self) -> &'static str {
        if self.essential_only {
            "essential_req_cov"
        } else {
            "req_cov"
        }
    }

    fn name(&self) -> &'static str {
        if self.essential_only {
            "Essential Requirement Coverage"
        } else {
            "Requirement Coverage"
        }
    }

    fn score(&self, inputs: &ScoreInputs<'_>) -> Result<MetricReport, ScoreError> {
        if !inputs.problem.predicts_tasks() {
            return Err(ScoreError::InapplicableProblem {
                metric:  self.id(),
                problem: inputs.problem,
            });
        }

        // Independent examples; a failed parse degrades to 0, it does
        // not abort the corpus
        let example_scores: Vec<f64> = inputs
            .sources
            .par_iter()
            .zip(inputs.hypotheses.par_iter())
            .map(|(source, hypothesis)| {
                compute_requirement_coverage(
                    hypothesis,
                    source,
                    self.essential_only,
                    inputs.problem,
                )
                .unwrap_or_else(|err| {
                    tracing::debug!("coverage failed, scoring 0: {err}");
                    0.0
                })
            })
            .collect();

        // Coverage is a percentage at the corpus level
        let corpus_score = mean(&example_scores).map(|m| m * 100.0);

        Ok(MetricReport { corpus_score, example_scores })
    }
}

// ─── Kendall task ranking ─────────────────────────────────────────────────────

/// Corpus driver for `compute_task_order_score`.
///
/// The similarity backend is shared and injected; it is prepared once
/// before the examples fan out across the thread pool.
pub struct KendallTaskRankingScorer {
    similarity: Arc<dyn TextSimilarity>,
}

impl KendallTaskRankingScorer {
    pub fn new(similarity: Arc<dyn TextSimilarity>) -> Self {
        Self { similarity }
    }

    /// Pull the task lists out of one reference/hypothesis pair.
    ///
    /// Returns `None` (skip the example) when the hypothesis lacks the
    /// expected target-product separator; a malformed *reference* is a
    /// corpus-level error instead, since ground truth is supposed to be
    /// well-formed.
    fn extract_tasks(
        &self,
        reference:  &str,
        hypothesis: &str,
        problem:    Problem,
    ) -> Result<Option<(Vec<String>, Vec<String>)>, ScoreError> {
        match problem {
            Problem::RequirementsToTargetProductAndTasks
            | Problem::RequirementsAndTargetProductAndTasks => {
                let (_tp, tasks_gt) = split_target_product(reference, "reference tasks")?;
                let tasks_pred = match split_target_product(hypothesis, "hypothesis tasks") {
                    Ok((_tp, tasks)) => tasks,
                    Err(_) => return Ok(None),
                };
                Ok(Some((string_to_tasks(tasks_gt), string_to_tasks(tasks_pred))))
            }
            Problem::TargetProductAndRequirementsToTasks
            | Problem::TargetProductAndRequirementsAndTasks => Ok(Some((
                string_to_tasks(reference),
                string_to_tasks(hypothesis),
            ))),
            other => Err(ScoreError::InapplicableProblem {
                metric:  self.id(),
                problem: other,
            }),
        }
    }
}

impl Scorer for KendallTaskRankingScorer {
    fn id(&self) -> &'static str {
        "kendall_task_ranking"
    }

    fn name(&self) -> &'static str {
        "Kendall tau (task ranking)"
    }

    fn score(&self, inputs: &ScoreInputs<'_>) -> Result<MetricReport, ScoreError> {
        if !inputs.problem.predicts_tasks() {
            return Err(ScoreError::InapplicableProblem {
                metric:  self.id(),
                problem: inputs.problem,
            });
        }

        // Shared model must exist before the parallel section
        self.similarity.prepare()?;

        let scored: Vec<Option<f64>> = inputs
            .references
            .par_iter()
            .zip(inputs.hypotheses.par_iter())
            .map(|(reference, hypothesis)| {
                let Some((tasks_gt, tasks_pred)) =
                    self.extract_tasks(reference, hypothesis, inputs.problem)?
                else {
                    return Ok(None);
                };

                match compute_task_order_score(&tasks_gt, &tasks_pred, self.similarity.as_ref()) {
                    Ok(tau) => Ok(Some(tau)),
                    // Backend trouble aborts the corpus; a degenerate
                    // example is simply dropped from the mean
                    Err(ScoreError::Similarity(err)) => Err(ScoreError::Similarity(err)),
                    Err(err) => {
                        tracing::debug!("task ordering undefined, dropping example: {err}");
                        Ok(None)
                    }
                }
            })
            .collect::<Result<_, ScoreError>>()?;

        let example_scores: Vec<f64> = scored.into_iter().flatten().collect();
        tracing::info!(
            "task ranking scored {} of {} examples",
            example_scores.len(),
            inputs.references.len(),
        );

        Ok(MetricReport {
            corpus_score: mean(&example_scores),
            example_scores,
        })
    }
}

// ─── Registry & harness entry point ───────────────────────────────────────────

/// Explicit name → scorer map, populated in one place at startup.
pub struct ScorerRegistry {
    scorers: BTreeMap<&'static str, Box<dyn Scorer>>,
}

impl ScorerRegistry {
    pub fn new() -> Self {
        Self { scorers: BTreeMap::new() }
    }

    /// The built-in scorer set, sharing one similarity backend.
    pub fn with_default_scorers(similarity: Arc<dyn TextSimilarity>) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(RequirementCoverageScorer::new()));
        registry.register(Box::new(RequirementCoverageScorer::essential()));
        registry.register(Box::new(KendallTaskRankingScorer::new(similarity)));
        registry
    }

    pub fn register(&mut self, scorer: Box<dyn Scorer>) {
        self.scorers.insert(scorer.id(), scorer);
    }

    pub fn get(&self, id: &str) -> Option<&dyn Scorer> {
        self.scorers.get(id).map(|scorer| &**scorer)
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.scorers.keys().copied().collect()
    }
}

impl Default for ScorerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Run every requested metric over every model's hypotheses.
///
/// Returns metric id → model name → report. Metric names missing from
/// the registry are warned about and skipped rather than failing the
/// whole run, matching the harness this feeds.
pub fn get_scores(
    registry:            &ScorerRegistry,
    sources:             &[String],
    references:          &[String],
    model_to_hypotheses: &BTreeMap<String, Vec<String>>,
    metrics:             &[String],
    problem:             Problem,
) -> Result<BTreeMap<String, BTreeMap<String, MetricReport>>, ScoreError> {
    let mut all_scores = BTreeMap::new();

    for metric in metrics {
        let Some(scorer) = registry.get(metric) else {
            tracing::warn!("`{metric}` is not a valid metric, skipping");
            continue;
        };

        let mut per_model = BTreeMap::new();
        for (model, hypotheses) in model_to_hypotheses {
            let report = scorer.score(&ScoreInputs {
                sources,
                references,
                hypotheses,
                problem,
            })?;
            per_model.insert(model.clone(), report);
        }
        all_scores.insert(metric.clone(), per_model);
    }

    Ok(all_scores)
}
