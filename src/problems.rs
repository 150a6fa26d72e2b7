// ============================================================
// Layer 2 — Problem Registry
// ============================================================
// A problem is a named framing of which procedure fields form
// the input vs the output of one seq2seq training example.
// The set is closed: the codec dispatches on it exhaustively,
// and the scoring harness passes the active problem around by
// name, so every variant has a stable string form.
//
// Problems are grouped by the downstream task type that consumes
// them: translation-style (distinct src/tgt languages) or
// language-modeling-style (a single autoregressive stream, empty
// tgt). The groups are a pure lookup table — no mutable state,
// no registration order to get wrong.

use std::fmt;
use std::str::FromStr;

use crate::error::{UnknownProblem, UnknownTaskType};

/// One supported string→string framing of a procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Problem {
    /// e.g. reaction prediction
    RequirementsToTargetProduct,

    /// e.g. retrosynthesis
    TargetProductToRequirements,

    /// e.g. recipe generation
    RequirementsToTargetProductAndTasks,
    TargetProductAndRequirementsToTasks,

    /// e.g. goal prediction
    TasksToTargetProduct,

    /// Placeholder for a shuffled language-modeling framing — listed in
    /// the registry but not wired into the codec yet.
    RequirementsAndTargetProductShuffle,

    /// Autoregressive generation: prompt with target product and
    /// requirements to generate tasks.
    TargetProductAndRequirementsAndTasks,
    /// Autoregressive generation: prompt with requirements to generate
    /// the target product and tasks.
    RequirementsAndTargetProductAndTasks,
}

impl Problem {
    /// Every problem, in declaration order.
    pub const ALL: [Problem; 8] = [
        Problem::RequirementsToTargetProduct,
        Problem::TargetProductToRequirements,
        Problem::RequirementsToTargetProductAndTasks,
        Problem::TargetProductAndRequirementsToTasks,
        Problem::TasksToTargetProduct,
        Problem::RequirementsAndTargetProductShuffle,
        Problem::TargetProductAndRequirementsAndTasks,
        Problem::RequirementsAndTargetProductAndTasks,
    ];

    /// Stable wire name, used by the scoring harness to pass the active
    /// problem out-of-band.
    pub fn as_str(&self) -> &'static str {
        match self {
            Problem::RequirementsToTargetProduct         => "RequirementsToTargetProduct",
            Problem::TargetProductToRequirements         => "TargetProductToRequirements",
            Problem::RequirementsToTargetProductAndTasks => "RequirementsToTargetProductAndTasks",
            Problem::TargetProductAndRequirementsToTasks => "TargetProductAndRequirementsToTasks",
            Problem::TasksToTargetProduct                => "TasksToTargetProduct",
            Problem::RequirementsAndTargetProductShuffle => "RequirementsAndTargetProductShuffle",
            Problem::TargetProductAndRequirementsAndTasks => "TargetProductAndRequirementsAndTasks",
            Problem::RequirementsAndTargetProductAndTasks => "RequirementsAndTargetProductAndTasks",
        }
    }

    /// Whether the model's output side contains the task list under this
    /// framing. The requirement-coverage and task-ranking metrics are
    /// only defined for these problems.
    pub fn predicts_tasks(&self) -> bool {
        matches!(
            self,
            Problem::RequirementsToTargetProductAndTasks
                | Problem::TargetProductAndRequirementsToTasks
                | Problem::TargetProductAndRequirementsAndTasks
                | Problem::RequirementsAndTargetProductAndTasks
        )
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Problem {
    type Err = UnknownProblem;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Problem::ALL
            .into_iter()
            .find(|problem| problem.as_str() == name)
            .ok_or_else(|| UnknownProblem(name.to_string()))
    }
}

// ─── Task-type groups ─────────────────────────────────────────────────────────

/// The downstream training task a problem feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskType {
    Translation,
    LanguageModeling,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Translation      => "translation",
            TaskType::LanguageModeling => "language_modeling",
        }
    }

    /// Look a task type up by its harness name.
    pub fn from_name(name: &str) -> Result<TaskType, UnknownTaskType> {
        match name {
            "translation"       => Ok(TaskType::Translation),
            "language_modeling" => Ok(TaskType::LanguageModeling),
            other               => Err(UnknownTaskType(other.to_string())),
        }
    }

    /// The ordered list of problems this task type supports.
    pub fn problems(&self) -> &'static [Problem] {
        match self {
            TaskType::Translation => &[
                Problem::RequirementsToTargetProduct,
                Problem::TargetProductToRequirements,
                Problem::RequirementsToTargetProductAndTasks,
                Problem::TargetProductAndRequirementsToTasks,
                Problem::TasksToTargetProduct,
            ],
            TaskType::LanguageModeling => &[
                Problem::RequirementsAndTargetProductShuffle,
                Problem::TargetProductAndRequirementsAndTasks,
                Problem::RequirementsAndTargetProductAndTasks,
            ],
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convenience lookup straight from a harness-supplied name.
pub fn problems_for_task_type(name: &str) -> Result<&'static [Problem], UnknownTaskType> {
    Ok(TaskType::from_name(name)?.problems())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_group_contents_and_order() {
        let problems = problems_for_task_type("translation").unwrap();
        assert_eq!(
            problems,
            &[
                Problem::RequirementsToTargetProduct,
                Problem::TargetProductToRequirements,
                Problem::RequirementsToTargetProductAndTasks,
                Problem::TargetProductAndRequirementsToTasks,
                Problem::TasksToTargetProduct,
            ]
        );
    }

    #[test]
    fn test_language_modeling_group_contents() {
        let problems = problems_for_task_type("language_modeling").unwrap();
        assert_eq!(problems.len(), 3);
        assert!(problems.contains(&Problem::RequirementsAndTargetProductShuffle));
    }

    #[test]
    fn test_unknown_task_type_fails() {
        let err = problems_for_task_type("classification").unwrap_err();
        assert_eq!(err.0, "classification");
    }

    #[test]
    fn test_groups_cover_all_problems_exactly_once() {
        let mut seen: Vec<Problem> = Vec::new();
        for task_type in [TaskType::Translation, TaskType::LanguageModeling] {
            seen.extend_from_slice(task_type.problems());
        }
        assert_eq!(seen.len(), Problem::ALL.len());
        for problem in Problem::ALL {
            assert!(seen.contains(&problem));
        }
    }

    #[test]
    fn test_problem_name_round_trip() {
        for problem in Problem::ALL {
            assert_eq!(problem.as_str().parse::<Problem>().unwrap(), problem);
        }
        assert!("RecipeGPT".parse::<Problem>().is_err());
    }

    #[test]
    fn test_task_predicting_problems() {
        let predicting: Vec<Problem> = Problem::ALL
            .into_iter()
            .filter(Problem::predicts_tasks)
            .collect();
        assert_eq!(predicting.len(), 4);
        assert!(!predicting.contains(&Problem::TasksToTargetProduct));
    }
}
