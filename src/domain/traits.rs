// ============================================================
// Layer 1 — Core Traits (Abstractions)
// ============================================================
// The seams where external collaborators plug into this crate.
//
// By programming against traits instead of concrete types, the
// codec and scorers never depend on where procedures come from,
// which tokenizer the trainer uses, or which model backs text
// similarity:
//   - ProcedureSource → one implementation per raw data source
//   - Tokenize        → the trainer's tokenization capability
//   - TextSimilarity  → embedding model behind task alignment,
//                       replaceable with a cheap stub in tests

use anyhow::Result;

use crate::domain::procedure::{Partition, Procedure};

// ─── ProcedureSource ──────────────────────────────────────────────────────────
/// Any component that can produce parsed procedures from a raw dataset.
///
/// Implementations:
///   - DummySource → deterministic synthetic procedures for pipeline checks
///   - (external)  → one adapter per real data source
pub trait ProcedureSource {
    /// Produce every available `(Procedure, Partition)` pair.
    /// A raw record missing a mandatory field aborts ingestion of that
    /// record — adapters must not emit half-parsed procedures.
    fn procedures(&self) -> Result<Vec<(Procedure, Partition)>>;
}

// ─── Tokenize ─────────────────────────────────────────────────────────────────
/// The external tokenization capability applied to flattened examples.
///
/// Implementations must treat every reserved separator token
/// (`data::SPECIAL_TOKENS`) as atomic: never split, escape or merge
/// them, or the wire format stops being parseable.
pub trait Tokenize {
    fn tokenize(&self, text: &str) -> String;

    fn detokenize(&self, text: &str) -> String;
}

// ─── TextSimilarity ───────────────────────────────────────────────────────────
/// Scores how close two text spans are, in model units where larger
/// means more alike.
///
/// Injected into the task-ordering scorer at construction time, so the
/// expensive embedding backend is built once by the caller and test
/// code can pass a stub instead.
pub trait TextSimilarity: Send + Sync {
    /// Similarity between a reference span and a candidate span.
    fn similarity(&self, reference: &str, candidate: &str) -> Result<f32>;

    /// Score one candidate against every reference.
    ///
    /// The default loops over `similarity`; backends that can batch
    /// (one embedding pass for all spans) should override this.
    fn score_all(&self, references: &[String], candidate: &str) -> Result<Vec<f32>> {
        references
            .iter()
            .map(|reference| self.similarity(reference, candidate))
            .collect()
    }

    /// Perform any one-time setup eagerly.
    ///
    /// Callers that fan scoring out across threads invoke this once
    /// before the parallel section, so lazy backends do not race on
    /// first use.
    fn prepare(&self) -> Result<()> {
        Ok(())
    }
}
