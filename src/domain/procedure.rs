// ============================================================
// Layer 1 — Procedure Domain Types
// ============================================================
// In-memory representation of one procedure: a target product
// (the goal) achieved by one or more methods, each with an
// ordered requirement list and an ordered task list.
//
// Recipes are the canonical instance:
//   target product: "Banana bread"
//   requirements:   flour (2 cups), banana (3) - optional, ...
//   tasks:          "Mix ingredients.", "Bake at 350F.", ...
//
// These are pure value types. Ingestion adapters construct them
// from raw records, the codec flattens them into training text,
// and they are discarded — there is no caching or persistence
// layer in this crate.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which dataset split an ingested procedure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Partition {
    Train,
    Valid,
    Test,
}

impl Partition {
    /// All partitions, in their canonical order.
    pub const ALL: [Partition; 3] = [Partition::Train, Partition::Valid, Partition::Test];

    pub fn as_str(&self) -> &'static str {
        match self {
            Partition::Train => "train",
            Partition::Valid => "valid",
            Partition::Test  => "test",
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One item needed to carry out a method, with an optional quantity
/// and optionality flag.
///
/// `quantity` is kept as text ("2 cups", "3", "1/2 teaspoon") because
/// the sources mix counts, fractions and free-form amounts; an empty
/// string means no quantity was given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub object:   String,

    #[serde(default)]
    pub quantity: String,

    #[serde(default)]
    pub optional: bool,
}

impl Requirement {
    pub fn new(object: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            object:   object.into(),
            quantity: quantity.into(),
            optional: false,
        }
    }

    pub fn optional(object: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            object:   object.into(),
            quantity: quantity.into(),
            optional: true,
        }
    }

    /// Inverse of the `Display` rendering.
    ///
    /// Split once on `" ("` to separate the object from the rest, then
    /// once on `")"` to take the quantity; any non-empty text after the
    /// closing paren marks the requirement optional.
    ///
    /// This parse is not a perfect inverse when the object or quantity
    /// text itself contains a literal `" ("` or `")"` — such text
    /// corrupts the split. Known fragility, kept as-is rather than
    /// silently patched.
    pub fn from_string(req_str: &str) -> Requirement {
        let (object, rest) = match req_str.split_once(" (") {
            Some(parts) => parts,
            None => return Requirement::new(req_str, ""),
        };

        let (quantity, tail) = match rest.split_once(')') {
            Some(parts) => parts,
            None => return Requirement::new(object, ""),
        };

        Requirement {
            object:   object.to_string(),
            quantity: quantity.trim().to_string(),
            optional: !tail.is_empty(),
        }
    }
}

/// Renders `"<object> (<quantity>)"`, appending `" - optional"` when the
/// requirement is optional. The quantity segment is omitted entirely
/// when `quantity` is empty.
impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.object)?;
        if !self.quantity.is_empty() {
            write!(f, " ({})", self.quantity)?;
        }
        if self.optional {
            f.write_str(" - optional")?;
        }
        Ok(())
    }
}

/// One way of producing the target product: what you need, then what
/// you do, in order. Tasks are opaque text spans with no internal
/// structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    pub requirements: Vec<Requirement>,
    pub tasks:        Vec<String>,
}

impl Method {
    pub fn new(requirements: Vec<Requirement>, tasks: Vec<String>) -> Self {
        Self { requirements, tasks }
    }
}

/// A goal (target product) achieved via one or more methods.
///
/// All current producers and the codec only ever read `methods[0]` —
/// a known simplification of the producers, not a limit of the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Procedure {
    pub target_product: String,
    pub methods:        Vec<Method>,
}

impl Procedure {
    pub fn new(target_product: impl Into<String>, methods: Vec<Method>) -> Self {
        Self {
            target_product: target_product.into(),
            methods,
        }
    }
}
