//! Field addressing for `set_field`

use std::fmt;

use super::draft::{BudgetDraft, NumberInput};
use crate::domain::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetField {
    Name,
    Client,
    Contact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolField {
    Name,
    Quantity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartField {
    Name,
    Quantity,
    Note,
    Material,
    Weight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationField {
    Operation,
    Hours,
}

/// Location of one leaf value in the draft tree
///
/// Displays as the wire path (`ferramentas[0].pecas[1].peso`), which is
/// also the key used for validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath {
    Budget(BudgetField),
    Tool {
        tool: usize,
        field: ToolField,
    },
    Part {
        tool: usize,
        part: usize,
        field: PartField,
    },
    Operation {
        tool: usize,
        part: usize,
        op: usize,
        field: OperationField,
    },
}

impl FieldPath {
    pub fn tool(tool: usize, field: ToolField) -> Self {
        Self::Tool { tool, field }
    }

    pub fn part(tool: usize, part: usize, field: PartField) -> Self {
        Self::Part { tool, part, field }
    }

    pub fn operation(tool: usize, part: usize, op: usize, field: OperationField) -> Self {
        Self::Operation { tool, part, op, field }
    }

    /// Wire path as a string, used as the validation key
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            FieldPath::Budget(field) => f.write_str(match field {
                BudgetField::Name => "nome",
                BudgetField::Client => "cliente_id",
                BudgetField::Contact => "contato",
            }),
            FieldPath::Tool { tool, field } => {
                let leaf = match field {
                    ToolField::Name => "nome",
                    ToolField::Quantity => "quantidade",
                };
                write!(f, "ferramentas[{tool}].{leaf}")
            }
            FieldPath::Part { tool, part, field } => {
                let leaf = match field {
                    PartField::Name => "nome",
                    PartField::Quantity => "quantidade",
                    PartField::Note => "nota",
                    PartField::Material => "material_id",
                    PartField::Weight => "peso",
                };
                write!(f, "ferramentas[{tool}].pecas[{part}].{leaf}")
            }
            FieldPath::Operation { tool, part, op, field } => {
                let leaf = match field {
                    OperationField::Operation => "operacao_id",
                    OperationField::Hours => "horas",
                };
                write!(f, "ferramentas[{tool}].pecas[{part}].operacoes[{op}].{leaf}")
            }
        }
    }
}

impl BudgetDraft {
    /// Replace the value at `path` with the raw input text
    ///
    /// Numeric fields keep the text as typed; reference fields store the
    /// selected id. A path pointing past the end of the tree changes nothing.
    pub fn set_field(mut self, path: FieldPath, value: impl Into<String>) -> Self {
        let value = value.into();
        let applied = match path {
            FieldPath::Budget(field) => {
                match field {
                    BudgetField::Name => self.name = value,
                    BudgetField::Client => self.client_ref = RecordId::new(value),
                    BudgetField::Contact => self.contact = value,
                }
                true
            }
            FieldPath::Tool { tool, field } => match self.tool_mut(tool) {
                Some(t) => {
                    match field {
                        ToolField::Name => t.name = value,
                        ToolField::Quantity => t.quantity = NumberInput::new(value),
                    }
                    true
                }
                None => false,
            },
            FieldPath::Part { tool, part, field } => match self.part_mut(tool, part) {
                Some(p) => {
                    match field {
                        PartField::Name => p.name = value,
                        PartField::Quantity => p.quantity = NumberInput::new(value),
                        PartField::Note => p.note = value,
                        PartField::Material => p.material_ref = RecordId::new(value),
                        PartField::Weight => p.weight = NumberInput::new(value),
                    }
                    true
                }
                None => false,
            },
            FieldPath::Operation { tool, part, op, field } => match self.operation_usage_mut(tool, part, op) {
                Some(o) => {
                    match field {
                        OperationField::Operation => o.operation_ref = RecordId::new(value),
                        OperationField::Hours => o.hours = NumberInput::new(value),
                    }
                    true
                }
                None => false,
            },
        };
        if !applied {
            log::debug!("set_field: {path} does not exist");
        }
        self
    }

    /// Current raw text at `path`, for binding inputs
    pub fn get_field(&self, path: FieldPath) -> Option<String> {
        let value = match path {
            FieldPath::Budget(field) => match field {
                BudgetField::Name => self.name.clone(),
                BudgetField::Client => self.client_ref.to_string(),
                BudgetField::Contact => self.contact.clone(),
            },
            FieldPath::Tool { tool, field } => {
                let t = self.tool(tool)?;
                match field {
                    ToolField::Name => t.name.clone(),
                    ToolField::Quantity => t.quantity.to_string(),
                }
            }
            FieldPath::Part { tool, part, field } => {
                let p = self.part(tool, part)?;
                match field {
                    PartField::Name => p.name.clone(),
                    PartField::Quantity => p.quantity.to_string(),
                    PartField::Note => p.note.clone(),
                    PartField::Material => p.material_ref.to_string(),
                    PartField::Weight => p.weight.to_string(),
                }
            }
            FieldPath::Operation { tool, part, op, field } => {
                let o = self.operation_usage(tool, part, op)?;
                match field {
                    OperationField::Operation => o.operation_ref.to_string(),
                    OperationField::Hours => o.hours.to_string(),
                }
            }
        };
        Some(value)
    }
}
