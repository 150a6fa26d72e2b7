// ============================================================
// Layer 3 — Data Pipeline
// ============================================================
// Everything between a parsed Procedure and the flat text the
// trainer consumes.
//
// The pipeline flows in this order:
//
//   raw record (external adapter)
//       │
//       ▼
//   Procedure          → domain value object
//       │
//       ▼
//   codec::encode      → delimited (src, tgt) pair per problem
//       │
//       ▼
//   tokenize_example   → external tokenizer, reserved tokens atomic
//       │
//       ▼
//   text files / trainer (external)
//
// and back through codec::decode when scorers need structure.
// Each module is responsible for exactly one step.

/// Reserved separator tokens and the flattened example type
pub mod example;

/// Procedure ↔ example conversion, per problem framing
pub mod codec;

/// Applies an external tokenizer to both example fields
pub mod tokenize;

/// Synthetic procedures for pipeline checks
pub mod dummy;

pub use codec::{decode, encode};
pub use example::{
    TranslationExample, REQUIREMENTS_TASKS_SEP, REQUIREMENT_SEP, SPECIAL_TOKENS,
    TARGET_PRODUCT_SEP, TASK_SEP,
};
