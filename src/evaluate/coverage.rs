// ============================================================
// Layer 4 — Requirement Coverage
// ============================================================
// Fraction of ground-truth requirements a hypothesis mentions.
// The match is deliberately loose: a requirement counts as
// covered when any single lowercase word of its object appears
// in the hypothesis ("all-purpose flour" is covered by a recipe
// that just says "flour").

use std::collections::HashSet;

use crate::data::codec::{split_target_product, string_to_requirements};
use crate::domain::procedure::Requirement;
use crate::error::ScoreError;
use crate::problems::Problem;

/// Parse the requirement list out of an example's source text.
///
/// Which part of the source holds the requirements depends on where
/// the problem's encoder put the target-product segment: nowhere
/// (plain), before the requirements, or after them.
fn requirements_from_source(
    source:  &str,
    problem: Problem,
) -> Result<Vec<Requirement>, ScoreError> {
    match problem {
        // Source is the requirements string alone. For the
        // requirements-first language-modeling framing the tail past
        // <rts> bleeds into the last requirement's object; the loose
        // word match tolerates that, as the original pipeline did.
        Problem::RequirementsToTargetProductAndTasks
        | Problem::RequirementsAndTargetProductAndTasks => Ok(string_to_requirements(source)),

        // Target product precedes the requirements
        Problem::TargetProductAndRequirementsToTasks => {
            let (_tp, requirements_string) = split_target_product(source, "source requirements")?;
            Ok(string_to_requirements(requirements_string))
        }

        // Requirements precede the target product
        Problem::TargetProductAndRequirementsAndTasks => {
            let (requirements_string, _rest) = split_target_product(source, "source requirements")?;
            Ok(string_to_requirements(requirements_string))
        }

        other => Err(ScoreError::InapplicableProblem {
            metric:  "requirement coverage",
            problem: other,
        }),
    }
}

/// Compute fractional requirement coverage of one hypothesis.
///
/// With `essential_only`, optional requirements are filtered out first.
/// An empty requirement set (possible after filtering) is vacuously
/// fully covered and scores 1.0.
pub fn compute_requirement_coverage(
    hypothesis:          &str,
    source_requirements: &str,
    essential_only:      bool,
    problem:             Problem,
) -> Result<f64, ScoreError> {
    let mut requirements = requirements_from_source(source_requirements, problem)?;
    if essential_only {
        requirements.retain(|req| !req.optional);
    }

    let num_total = requirements.len();
    if num_total == 0 {
        return Ok(1.0);
    }

    let hypothesis = hypothesis.to_lowercase();
    let hypothesis_words: HashSet<&str> = hypothesis.split_whitespace().collect();

    // One shared word between hypothesis and object suffices
    let num_covered = requirements
        .iter()
        .filter(|req| {
            req.object
                .to_lowercase()
                .split_whitespace()
                .any(|word| hypothesis_words.contains(word))
        })
        .count();

    Ok(num_covered as f64 / num_total as f64)
}
