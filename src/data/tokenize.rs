// ============================================================
// Layer 3 — Example-Level Tokenization
// ============================================================
// Applies an external tokenization capability to both fields of
// a flattened example. The tokenizer itself is out of scope —
// the trainer brings its own — but the application point lives
// here so every caller routes text through it the same way,
// after encoding and before decoding.
//
// The one hard rule: reserved separator tokens pass through
// untouched. A tokenizer that splits "<eor>" into "< eor >"
// destroys the wire format.

use crate::data::example::TranslationExample;
use crate::domain::traits::Tokenize;

/// Tokenize both fields of an example, returning a new example.
pub fn tokenize_example(example: &TranslationExample, tokenizer: &dyn Tokenize) -> TranslationExample {
    TranslationExample {
        src: tokenizer.tokenize(&example.src),
        tgt: tokenizer.tokenize(&example.tgt),
    }
}

/// Detokenize both fields of an example, returning a new example.
pub fn detokenize_example(example: &TranslationExample, tokenizer: &dyn Tokenize) -> TranslationExample {
    TranslationExample {
        src: tokenizer.detokenize(&example.src),
        tgt: tokenizer.detokenize(&example.tgt),
    }
}
