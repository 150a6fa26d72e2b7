// ============================================================
// Layer 4 — Task-Ordering Concordance
// ============================================================
// How well does the predicted task order match the ground-truth
// order? Predicted tasks rarely repeat the reference verbatim,
// so each prediction is first aligned to its best-matching
// ground-truth task by embedding similarity, and the resulting
// rank sequence is compared to 1..N with Kendall's tau.
//
// Alignment properties:
//   - one ground-truth task may be matched by several predictions
//     (ties are fine — tau-b handles them)
//   - the inverse, one prediction subsuming several ground-truth
//     tasks, is a documented limitation of the alignment and is
//     not handled
//
// Reference: Kendall (1938), A New Measure of Rank Correlation

use crate::domain::traits::TextSimilarity;
use crate::error::ScoreError;

/// Rank of the ground-truth task most similar to one predicted task.
///
/// Both sides are lowercased before scoring; the first maximum wins.
/// Returns a one-based rank into `ground_truth`.
pub fn best_match_rank(
    ground_truth: &[String],
    predicted:    &str,
    similarity:   &dyn TextSimilarity,
) -> Result<usize, ScoreError> {
    if predicted.is_empty() || ground_truth.is_empty() {
        return Err(ScoreError::EmptyTask);
    }

    let references: Vec<String> = ground_truth.iter().map(|task| task.to_lowercase()).collect();
    let scores = similarity.score_all(&references, &predicted.to_lowercase())?;

    let mut best = 0;
    for (index, score) in scores.iter().enumerate() {
        if *score > scores[best] {
            best = index;
        }
    }

    Ok(best + 1)
}

/// Kendall tau-b over two rank sequences of equal length.
///
/// Concordant pairs count +1, discordant −1, normalized with the
/// standard tie correction in either sequence. NaN when every pair is
/// tied on one side.
fn kendall_tau(x: &[usize], y: &[usize]) -> f64 {
    let n = x.len();
    let mut concordant = 0i64;
    let mut discordant = 0i64;
    let mut tied_x     = 0i64;
    let mut tied_y     = 0i64;

    for i in 0..n {
        for j in (i + 1)..n {
            let dx = x[i].cmp(&x[j]);
            let dy = y[i].cmp(&y[j]);
            match (dx, dy) {
                (std::cmp::Ordering::Equal, std::cmp::Ordering::Equal) => {
                    tied_x += 1;
                    tied_y += 1;
                }
                (std::cmp::Ordering::Equal, _) => tied_x += 1,
                (_, std::cmp::Ordering::Equal) => tied_y += 1,
                _ if dx == dy => concordant += 1,
                _ => discordant += 1,
            }
        }
    }

    let total_pairs = (n * (n - 1) / 2) as f64;
    let denominator =
        ((total_pairs - tied_x as f64) * (total_pairs - tied_y as f64)).sqrt();

    (concordant - discordant) as f64 / denominator
}

/// Rank-correlate predicted task order against ground truth.
///
/// Fails when the model truncated (fewer predictions than ground-truth
/// tasks), when every prediction aligned to the same ground-truth task,
/// or when the correlation is undefined. Predictions beyond the first N
/// are ignored.
pub fn compute_task_order_score(
    tasks_gt:   &[String],
    tasks_pred: &[String],
    similarity: &dyn TextSimilarity,
) -> Result<f64, ScoreError> {
    if tasks_pred.len() < tasks_gt.len() {
        return Err(ScoreError::TruncatedPrediction {
            predicted: tasks_pred.len(),
            expected:  tasks_gt.len(),
        });
    }

    let ranks_gt: Vec<usize> = (1..=tasks_gt.len()).collect();

    let ranks_pred: Vec<usize> = tasks_pred[..tasks_gt.len()]
        .iter()
        .map(|predicted| best_match_rank(tasks_gt, predicted, similarity))
        .collect::<Result<_, _>>()?;

    if ranks_pred.iter().all(|&rank| rank == ranks_pred[0]) {
        return Err(ScoreError::ConstantRanks { ranks: ranks_pred });
    }

    let tau = kendall_tau(&ranks_gt, &ranks_pred);
    if tau.is_nan() {
        return Err(ScoreError::UndefinedCorrelation);
    }

    Ok(tau)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    /// Word-overlap stand-in for the embedding backend.
    struct WordOverlap;

    impl TextSimilarity for WordOverlap {
        fn similarity(&self, reference: &str, candidate: &str) -> Result<f32> {
            let a: std::collections::HashSet<&str> = reference.split_whitespace().collect();
            let b: std::collections::HashSet<&str> = candidate.split_whitespace().collect();
            let union = a.union(&b).count();
            if union == 0 {
                return Ok(0.0);
            }
            Ok(a.intersection(&b).count() as f32 / union as f32)
        }
    }

    fn tasks(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_identical_order_scores_one() {
        let gt = tasks(&["peel the bananas", "mash them well", "bake the loaf"]);
        let score = compute_task_order_score(&gt, &gt.clone(), &WordOverlap).unwrap();
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_reversed_order_scores_minus_one() {
        let gt = tasks(&["peel the bananas", "mash them well", "bake the loaf"]);
        let mut pred = gt.clone();
        pred.reverse();
        let score = compute_task_order_score(&gt, &pred, &WordOverlap).unwrap();
        assert!((score + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_stays_in_bounds() {
        let gt   = tasks(&["peel the bananas", "mash them well", "bake the loaf"]);
        let pred = tasks(&["mash them well", "peel the bananas", "bake the loaf"]);
        let score = compute_task_order_score(&gt, &pred, &WordOverlap).unwrap();
        assert!((-1.0..=1.0).contains(&score));
        assert!(score < 1.0);
    }

    #[test]
    fn test_extra_predictions_are_ignored() {
        let gt   = tasks(&["peel the bananas", "mash them well"]);
        let pred = tasks(&["peel the bananas", "mash them well", "serve warm"]);
        let score = compute_task_order_score(&gt, &pred, &WordOverlap).unwrap();
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_truncated_prediction_fails() {
        let gt   = tasks(&["one step", "two step", "three step"]);
        let pred = tasks(&["one step", "two step"]);
        let err = compute_task_order_score(&gt, &pred, &WordOverlap).unwrap_err();
        assert!(matches!(
            err,
            ScoreError::TruncatedPrediction { predicted: 2, expected: 3 }
        ));
    }

    #[test]
    fn test_constant_ranks_fail() {
        // Every prediction aligns to the same ground-truth task
        let gt   = tasks(&["stir the pot", "completely unrelated text"]);
        let pred = tasks(&["stir the pot", "stir the pot"]);
        let err = compute_task_order_score(&gt, &pred, &WordOverlap).unwrap_err();
        assert!(matches!(err, ScoreError::ConstantRanks { .. }));
    }

    #[test]
    fn test_ties_use_tau_b_correction() {
        // Two predictions hit rank 1, one hits rank 3: tau-b with a tie
        // group of size 2 in the predicted ranks
        let tau = kendall_tau(&[1, 2, 3], &[1, 1, 3]);
        assert!((-1.0..=1.0).contains(&tau));
        // nc=2, nd=0, tied_y=1 → 2 / sqrt(3 * 2)
        assert!((tau - 2.0 / 6.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_empty_predicted_task_fails() {
        let gt = tasks(&["stir the pot", "serve warm"]);
        let err = best_match_rank(&gt, "", &WordOverlap).unwrap_err();
        assert!(matches!(err, ScoreError::EmptyTask));
    }

    #[test]
    fn test_first_maximum_wins_on_tied_scores() {
        let gt = tasks(&["stir the pot", "stir the pot"]);
        let rank = best_match_rank(&gt, "stir the pot", &WordOverlap).unwrap();
        assert_eq!(rank, 1);
    }
}
