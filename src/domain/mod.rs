// ============================================================
// Layer 1 — Domain Layer
// ============================================================
// Pure value types and trait seams — the dictionary of the
// system. It defines what a procedure IS, not how it is
// flattened, scored or stored.
//
// Rules for this layer:
//   - No codec logic, no separators
//   - No I/O, no embedding models
//   - Only plain structs, enums and traits

// Procedure, Method, Requirement and the dataset Partition
pub mod procedure;

// Contracts for ingestion adapters, tokenizers and similarity backends
pub mod traits;

pub use procedure::{Method, Partition, Procedure, Requirement};
pub use traits::{ProcedureSource, TextSimilarity, Tokenize};
