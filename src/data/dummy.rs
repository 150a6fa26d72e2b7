// ============================================================
// Layer 3 — Dummy Procedure Source
// ============================================================
// Deterministic synthetic procedures for exercising the full
// pipeline without any real dataset on disk. Real adapters live
// outside this crate; this one exists so encode/decode and the
// scorers can be driven end to end in tests and smoke runs.

use anyhow::Result;

use crate::domain::procedure::{Method, Partition, Procedure, Requirement};
use crate::domain::traits::ProcedureSource;

/// Build the synthetic procedure for one record index, with its
/// partition assignment: indices 1–9 go to test, 11–19 to valid,
/// everything else to train.
pub fn dummy_procedure(index: usize) -> (Procedure, Partition) {
    let requirements = (0..5)
        .map(|_| Requirement::new("dry dummy", "1/2 teaspoon"))
        .collect();
    let tasks = (0..7)
        .map(|_| "Cook dummy according to package directions; drain well.".to_string())
        .collect();

    let proc = Procedure::new(
        "Dummy target product",
        vec![Method::new(requirements, tasks)],
    );

    let partition = if (1..10).contains(&index) {
        Partition::Test
    } else if (11..20).contains(&index) {
        Partition::Valid
    } else {
        Partition::Train
    };

    (proc, partition)
}

/// A `ProcedureSource` yielding `count` dummy records.
pub struct DummySource {
    count: usize,
}

impl DummySource {
    pub fn new(count: usize) -> Self {
        Self { count }
    }
}

impl ProcedureSource for DummySource {
    fn procedures(&self) -> Result<Vec<(Procedure, Partition)>> {
        Ok((0..self.count).map(dummy_procedure).collect())
    }
}
