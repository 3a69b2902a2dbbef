//! Nested Budget Editor
//!
//! Holds the detached, editable copy of one budget as an explicit tree
//! (tools → parts → operation usages) and converts it to and from the wire
//! format. Every structural edit addresses its target by position; reference
//! fields (client, material, operation) are plain values, never identities.
//!
//! Numeric inputs are kept as the text the user typed. They are parsed only
//! by [`BudgetDraft::validate`] and [`BudgetDraft::serialize`], which report
//! unparsable values as field errors instead of storing NaN.

mod draft;
mod field;
mod wire;

#[cfg(test)]
mod tests;

pub use draft::{BudgetDraft, NumberInput, OperationUsageDraft, PartDraft, ToolDraft};
pub use field::{BudgetField, FieldPath, OperationField, PartField, ToolField};
