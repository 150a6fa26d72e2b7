// ============================================================
// Layer 3 — Serialization Codec
// ============================================================
// Converts a Procedure plus a Problem into a flat delimited
// (src, tgt) pair, and back. This is the densest logic in the
// crate: encode and decode must be exact inverses for every
// supported problem, *given* that no requirement or task text
// contains a reserved separator token. The randomized round-trip
// test at the bottom of this file is the primary verification of
// that contract.
//
// Only methods[0] is read or written. Joins use the reserved
// tokens from data::example with single surrounding spaces;
// parses use single-split semantics: an expected-once separator
// splits into exactly two parts, a repeated separator into N+1.

use crate::data::example::{TranslationExample, TARGET_PRODUCT_SEP};
use crate::domain::procedure::{Method, Procedure, Requirement};
use crate::error::CodecError;
use crate::problems::Problem;

// Space-padded forms, as they appear on the wire.
const TP_DELIM:  &str = " <tps> ";
const REQ_DELIM: &str = " <eor> ";
const TASK_DELIM: &str = " <eot> ";
const RTS_DELIM: &str = " <rts> ";

// ─── Field joins ──────────────────────────────────────────────────────────────

/// Join requirement strings with the requirement separator.
pub fn requirements_to_string(requirements: &[Requirement]) -> String {
    requirements
        .iter()
        .map(|req| req.to_string())
        .collect::<Vec<_>>()
        .join(REQ_DELIM)
}

/// Join tasks with the task separator.
pub fn tasks_to_string(tasks: &[String]) -> String {
    tasks.join(TASK_DELIM)
}

// ─── Field parses ─────────────────────────────────────────────────────────────

/// Split a requirements string back into requirements.
///
/// Splitting never fails: an empty string yields a single empty-object
/// requirement, which is tolerated rather than stripped.
pub fn string_to_requirements(requirements_string: &str) -> Vec<Requirement> {
    requirements_string
        .split(REQ_DELIM)
        .map(Requirement::from_string)
        .collect()
}

/// Split a tasks string back into tasks.
pub fn string_to_tasks(tasks_string: &str) -> Vec<String> {
    tasks_string
        .split(TASK_DELIM)
        .map(str::to_string)
        .collect()
}

/// Split a field on the expected-once target-product separator.
///
/// Returns the text before and after the separator; which side holds
/// the target product depends on the problem's framing.
pub fn split_target_product<'a>(
    text:  &'a str,
    field: &'static str,
) -> Result<(&'a str, &'a str), CodecError> {
    text.split_once(TP_DELIM).ok_or(CodecError::MissingSeparator {
        separator: TARGET_PRODUCT_SEP,
        field,
    })
}

// ─── Encode ───────────────────────────────────────────────────────────────────

/// Flatten a procedure into one training example under the given problem.
///
/// Fails when the procedure has no methods, or when the problem has no
/// encoding (the shuffle placeholder).
pub fn encode(proc: &Procedure, problem: Problem) -> Result<TranslationExample, CodecError> {
    let method = proc.methods.first().ok_or_else(|| CodecError::NoMethods {
        target_product: proc.target_product.clone(),
    })?;

    let tp    = &proc.target_product;
    let reqs  = requirements_to_string(&method.requirements);
    let tasks = tasks_to_string(&method.tasks);

    let example = match problem {
        Problem::RequirementsToTargetProductAndTasks => TranslationExample {
            src: reqs,
            tgt: format!("{tp}{TP_DELIM}{tasks}"),
        },
        Problem::TargetProductAndRequirementsToTasks => TranslationExample {
            src: format!("{tp}{TP_DELIM}{reqs}"),
            tgt: tasks,
        },
        Problem::RequirementsToTargetProduct => TranslationExample {
            src: reqs,
            tgt: tp.clone(),
        },
        Problem::TargetProductToRequirements => TranslationExample {
            src: tp.clone(),
            tgt: reqs,
        },
        Problem::TasksToTargetProduct => TranslationExample {
            src: tasks,
            tgt: tp.clone(),
        },
        // Language-modeling framings carry everything on the source side;
        // the target language is empty.
        Problem::RequirementsAndTargetProductAndTasks => TranslationExample {
            src: format!("{reqs}{RTS_DELIM}{tp}{TP_DELIM}{tasks}"),
            tgt: String::new(),
        },
        Problem::TargetProductAndRequirementsAndTasks => TranslationExample {
            src: format!("{reqs}{TP_DELIM}{tp}{RTS_DELIM}{tasks}"),
            tgt: String::new(),
        },
        Problem::RequirementsAndTargetProductShuffle => {
            return Err(CodecError::UnsupportedProblem(problem));
        }
    };

    Ok(example)
}

// ─── Decode ───────────────────────────────────────────────────────────────────

/// Rebuild a procedure from a flattened example under the given problem.
///
/// Only the translation framings decode; the language-modeling framings
/// and the shuffle placeholder are unsupported. Post-conditions are
/// enforced unconditionally: the decoded target product, requirement
/// list and task list must all be non-empty, so framings that carry
/// only two of the three fields parse but fail the completeness check.
pub fn decode(example: &TranslationExample, problem: Problem) -> Result<Procedure, CodecError> {
    let mut target_product = String::new();
    let mut requirements   = Vec::new();
    let mut tasks          = Vec::new();

    match problem {
        Problem::RequirementsToTargetProductAndTasks => {
            requirements = string_to_requirements(&example.src);
            let (tp, tasks_string) = split_target_product(&example.tgt, "target text")?;
            target_product = tp.to_string();
            tasks = string_to_tasks(tasks_string);
        }
        Problem::TargetProductAndRequirementsToTasks => {
            let (tp, requirements_string) = split_target_product(&example.src, "source text")?;
            target_product = tp.to_string();
            requirements = string_to_requirements(requirements_string);
            tasks = string_to_tasks(&example.tgt);
        }
        Problem::RequirementsToTargetProduct => {
            requirements = string_to_requirements(&example.src);
            target_product = example.tgt.clone();
        }
        Problem::TargetProductToRequirements => {
            target_product = example.src.clone();
            requirements = string_to_requirements(&example.tgt);
        }
        Problem::TasksToTargetProduct => {
            tasks = string_to_tasks(&example.src);
            target_product = example.tgt.clone();
        }
        Problem::RequirementsAndTargetProductShuffle
        | Problem::TargetProductAndRequirementsAndTasks
        | Problem::RequirementsAndTargetProductAndTasks => {
            return Err(CodecError::UnsupportedProblem(problem));
        }
    }

    if target_product.is_empty() {
        return Err(CodecError::EmptyField { field: "target product" });
    }
    if requirements.is_empty() {
        return Err(CodecError::EmptyField { field: "requirement list" });
    }
    if tasks.is_empty() {
        return Err(CodecError::EmptyField { field: "task list" });
    }

    Ok(Procedure {
        target_product,
        methods: vec![Method { requirements, tasks }],
    })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::example::{REQUIREMENTS_TASKS_SEP, REQUIREMENT_SEP, TASK_SEP};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    fn banana_bread() -> Procedure {
        Procedure::new(
            "Banana bread",
            vec![Method::new(
                vec![
                    Requirement::new("flour", "2 cups"),
                    Requirement::optional("banana", "3"),
                ],
                vec!["Mix ingredients.".to_string(), "Bake at 350F.".to_string()],
            )],
        )
    }

    #[test]
    fn test_padded_delimiters_match_reserved_tokens() {
        assert_eq!(TP_DELIM,   format!(" {TARGET_PRODUCT_SEP} "));
        assert_eq!(REQ_DELIM,  format!(" {REQUIREMENT_SEP} "));
        assert_eq!(TASK_DELIM, format!(" {TASK_SEP} "));
        assert_eq!(RTS_DELIM,  format!(" {REQUIREMENTS_TASKS_SEP} "));
    }

    #[test]
    fn test_encode_requirements_to_target_product_and_tasks() {
        let example = encode(&banana_bread(), Problem::RequirementsToTargetProductAndTasks).unwrap();
        assert_eq!(example.src, "flour (2 cups) <eor> banana (3) - optional");
        assert_eq!(example.tgt, "Banana bread <tps> Mix ingredients. <eot> Bake at 350F.");
    }

    #[test]
    fn test_decode_reproduces_original_procedure() {
        let proc = banana_bread();
        let example = encode(&proc, Problem::RequirementsToTargetProductAndTasks).unwrap();
        let decoded = decode(&example, Problem::RequirementsToTargetProductAndTasks).unwrap();
        assert_eq!(decoded, proc);
    }

    #[test]
    fn test_encode_target_product_and_requirements_to_tasks() {
        let example = encode(&banana_bread(), Problem::TargetProductAndRequirementsToTasks).unwrap();
        assert_eq!(example.src, "Banana bread <tps> flour (2 cups) <eor> banana (3) - optional");
        assert_eq!(example.tgt, "Mix ingredients. <eot> Bake at 350F.");

        let decoded = decode(&example, Problem::TargetProductAndRequirementsToTasks).unwrap();
        assert_eq!(decoded, banana_bread());
    }

    #[test]
    fn test_encode_single_field_problems() {
        let proc = banana_bread();

        let example = encode(&proc, Problem::RequirementsToTargetProduct).unwrap();
        assert_eq!(example.src, "flour (2 cups) <eor> banana (3) - optional");
        assert_eq!(example.tgt, "Banana bread");

        let example = encode(&proc, Problem::TargetProductToRequirements).unwrap();
        assert_eq!(example.src, "Banana bread");
        assert_eq!(example.tgt, "flour (2 cups) <eor> banana (3) - optional");

        let example = encode(&proc, Problem::TasksToTargetProduct).unwrap();
        assert_eq!(example.src, "Mix ingredients. <eot> Bake at 350F.");
        assert_eq!(example.tgt, "Banana bread");
    }

    #[test]
    fn test_encode_language_modeling_problems() {
        let proc = banana_bread();

        let example = encode(&proc, Problem::RequirementsAndTargetProductAndTasks).unwrap();
        assert_eq!(
            example.src,
            "flour (2 cups) <eor> banana (3) - optional <rts> \
             Banana bread <tps> Mix ingredients. <eot> Bake at 350F."
        );
        assert_eq!(example.tgt, "");

        let example = encode(&proc, Problem::TargetProductAndRequirementsAndTasks).unwrap();
        assert_eq!(
            example.src,
            "flour (2 cups) <eor> banana (3) - optional <tps> \
             Banana bread <rts> Mix ingredients. <eot> Bake at 350F."
        );
        assert_eq!(example.tgt, "");
    }

    #[test]
    fn test_encode_without_methods_fails() {
        let proc = Procedure::new("Banana bread", vec![]);
        let err = encode(&proc, Problem::RequirementsToTargetProduct).unwrap_err();
        assert!(matches!(err, CodecError::NoMethods { .. }));
    }

    #[test]
    fn test_encode_shuffle_placeholder_unsupported() {
        let err = encode(&banana_bread(), Problem::RequirementsAndTargetProductShuffle).unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedProblem(_)));
    }

    #[test]
    fn test_decode_language_modeling_unsupported() {
        let example = TranslationExample::new("anything", "");
        let err = decode(&example, Problem::TargetProductAndRequirementsAndTasks).unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedProblem(_)));
    }

    #[test]
    fn test_decode_missing_separator_fails() {
        // Target side should be "tp <tps> tasks" but carries no <tps>
        let example = TranslationExample::new("flour (2 cups)", "Banana bread Mix ingredients.");
        let err = decode(&example, Problem::RequirementsToTargetProductAndTasks).unwrap_err();
        assert!(matches!(
            err,
            CodecError::MissingSeparator { separator: "<tps>", .. }
        ));
    }

    #[test]
    fn test_decode_partial_framings_fail_completeness() {
        // Single-field framings parse, but the unconditional post-conditions
        // reject the fields they cannot reconstruct
        let example = encode(&banana_bread(), Problem::RequirementsToTargetProduct).unwrap();
        let err = decode(&example, Problem::RequirementsToTargetProduct).unwrap_err();
        assert!(matches!(err, CodecError::EmptyField { field: "task list" }));
    }

    #[test]
    fn test_decode_empty_target_product_fails() {
        let example = TranslationExample::new("flour (2 cups)", "");
        let err = decode(&example, Problem::RequirementsToTargetProduct).unwrap_err();
        assert!(matches!(err, CodecError::EmptyField { field: "target product" }));
    }

    #[test]
    fn test_empty_source_requirement_is_tolerated() {
        let parsed = string_to_requirements("");
        assert_eq!(parsed, vec![Requirement::new("", "")]);
    }

    #[test]
    fn test_round_trip_random_procedures() {
        // Primary verification of the codec contract: decode(encode(p)) == p
        // for any procedure whose text avoids the reserved tokens.
        let words = [
            "flour", "sugar", "diced", "onion", "stir", "gently", "boil",
            "the", "mixture", "until", "golden", "salt", "pepper", "whisk",
        ];
        let mut rng = StdRng::seed_from_u64(17);

        for _ in 0..200 {
            let proc = random_procedure(&mut rng, &words);
            for problem in [
                Problem::RequirementsToTargetProductAndTasks,
                Problem::TargetProductAndRequirementsToTasks,
            ] {
                let example = encode(&proc, problem).unwrap();
                let decoded = decode(&example, problem).unwrap();
                assert_eq!(decoded, proc, "round trip failed for {problem}");
            }
        }
    }

    fn random_procedure(rng: &mut StdRng, words: &[&str]) -> Procedure {
        let phrase = |rng: &mut StdRng, max_words: usize| {
            let len = rng.gen_range(1..=max_words);
            (0..len)
                .map(|_| *words.choose(rng).unwrap())
                .collect::<Vec<_>>()
                .join(" ")
        };

        let requirements = (0..rng.gen_range(1..=5))
            .map(|_| {
                let quantity = if rng.gen_bool(0.7) { phrase(rng, 2) } else { String::new() };
                // The " - optional" suffix only survives a round trip after
                // a quantity segment (known parse fragility)
                let optional = !quantity.is_empty() && rng.gen_bool(0.3);
                Requirement {
                    object: phrase(rng, 3),
                    quantity,
                    optional,
                }
            })
            .collect();
        let tasks = (0..rng.gen_range(1..=6)).map(|_| phrase(rng, 6)).collect();

        Procedure::new(phrase(rng, 2), vec![Method::new(requirements, tasks)])
    }
}
