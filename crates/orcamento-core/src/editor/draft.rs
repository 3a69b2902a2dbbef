//! Draft tree and structural operations

use std::fmt;

use crate::domain::RecordId;
use crate::validation::{parse_count, parse_decimal};

/// Numeric input held as typed text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberInput(String);

impl NumberInput {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn raw(&self) -> &str {
        &self.0
    }

    /// Value as a non-negative decimal, `None` when it does not parse
    pub fn as_decimal(&self) -> Option<f64> {
        parse_decimal(&self.0)
    }

    /// Value as a non-negative integer, `None` when it does not parse
    pub fn as_count(&self) -> Option<u32> {
        parse_count(&self.0)
    }
}

impl Default for NumberInput {
    fn default() -> Self {
        Self("0".to_string())
    }
}

impl fmt::Display for NumberInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<f64> for NumberInput {
    fn from(value: f64) -> Self {
        Self(value.to_string())
    }
}

impl From<u32> for NumberInput {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for NumberInput {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationUsageDraft {
    pub operation_ref: RecordId,
    pub hours: NumberInput,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartDraft {
    pub name: String,
    pub quantity: NumberInput,
    pub note: String,
    pub material_ref: RecordId,
    pub weight: NumberInput,
    pub operations: Vec<OperationUsageDraft>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolDraft {
    pub name: String,
    pub quantity: NumberInput,
    pub parts: Vec<PartDraft>,
}

/// Editable copy of one budget
///
/// Structural operations take `self` by value and hand back the updated
/// draft, so a view can do `draft.update(|d| *d = d.clone().add_tool())`.
/// An index that does not exist leaves the draft unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetDraft {
    pub name: String,
    pub client_ref: RecordId,
    pub contact: String,
    pub tools: Vec<ToolDraft>,
}

impl BudgetDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty tool (name "", quantity 0, no parts)
    pub fn add_tool(mut self) -> Self {
        self.tools.push(ToolDraft::default());
        self
    }

    pub fn remove_tool(mut self, tool: usize) -> Self {
        remove_at(&mut self.tools, tool, "tool");
        self
    }

    /// Append an empty part to tool `tool`
    pub fn add_part(mut self, tool: usize) -> Self {
        match self.tools.get_mut(tool) {
            Some(t) => t.parts.push(PartDraft::default()),
            None => log::debug!("add_part: no tool at {tool}"),
        }
        self
    }

    pub fn remove_part(mut self, tool: usize, part: usize) -> Self {
        match self.tools.get_mut(tool) {
            Some(t) => remove_at(&mut t.parts, part, "part"),
            None => log::debug!("remove_part: no tool at {tool}"),
        }
        self
    }

    /// Append an empty operation usage to part `part` of tool `tool`
    pub fn add_operation_usage(mut self, tool: usize, part: usize) -> Self {
        match self.part_mut(tool, part) {
            Some(p) => p.operations.push(OperationUsageDraft::default()),
            None => log::debug!("add_operation_usage: no part at {tool}/{part}"),
        }
        self
    }

    pub fn remove_operation_usage(mut self, tool: usize, part: usize, op: usize) -> Self {
        match self.part_mut(tool, part) {
            Some(p) => remove_at(&mut p.operations, op, "operation usage"),
            None => log::debug!("remove_operation_usage: no part at {tool}/{part}"),
        }
        self
    }

    pub fn tool(&self, tool: usize) -> Option<&ToolDraft> {
        self.tools.get(tool)
    }

    pub fn part(&self, tool: usize, part: usize) -> Option<&PartDraft> {
        self.tools.get(tool)?.parts.get(part)
    }

    pub fn operation_usage(&self, tool: usize, part: usize, op: usize) -> Option<&OperationUsageDraft> {
        self.part(tool, part)?.operations.get(op)
    }

    pub(super) fn tool_mut(&mut self, tool: usize) -> Option<&mut ToolDraft> {
        self.tools.get_mut(tool)
    }

    pub(super) fn part_mut(&mut self, tool: usize, part: usize) -> Option<&mut PartDraft> {
        self.tools.get_mut(tool)?.parts.get_mut(part)
    }

    pub(super) fn operation_usage_mut(
        &mut self,
        tool: usize,
        part: usize,
        op: usize,
    ) -> Option<&mut OperationUsageDraft> {
        self.part_mut(tool, part)?.operations.get_mut(op)
    }

    /// Hours of every usage that currently parses, summed
    pub fn total_hours(&self) -> f64 {
        self.tools
            .iter()
            .flat_map(|t| &t.parts)
            .flat_map(|p| &p.operations)
            .filter_map(|o| o.hours.as_decimal())
            .sum()
    }
}

fn remove_at<T>(items: &mut Vec<T>, index: usize, what: &str) {
    if index < items.len() {
        items.remove(index);
    } else {
        log::debug!("remove {what}: index {index} out of range ({})", items.len());
    }
}
