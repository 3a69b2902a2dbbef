//! Conversion between the draft tree and the API shapes

use super::draft::{BudgetDraft, NumberInput, OperationUsageDraft, PartDraft, ToolDraft};
use super::field::{BudgetField, FieldPath, OperationField, PartField, ToolField};
use crate::domain::{Budget, BudgetPayload, OperationUsageWire, PartWire, ToolWire};
use crate::validation::{ValidationErrors, REQUIRED};

const NOT_A_NUMBER: &str = "Informe um número válido";
const NOT_A_COUNT: &str = "Informe um número inteiro";

impl BudgetDraft {
    /// Build the request body for POST/PUT
    ///
    /// Fails only when a numeric field holds text that does not parse; empty
    /// names and references pass through unchanged (use [`validate`] before
    /// submitting). The flat `pecas`/`operacoes` arrays are derived from the
    /// tree, never edited separately.
    ///
    /// [`validate`]: BudgetDraft::validate
    pub fn serialize(&self) -> Result<BudgetPayload, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let tools = self
            .tools
            .iter()
            .enumerate()
            .map(|(ti, tool)| tool_to_wire(ti, tool, &mut errors))
            .collect();
        errors.into_result()?;
        Ok(BudgetPayload::from_tools(
            self.name.clone(),
            self.client_ref.clone(),
            self.contact.clone(),
            tools,
        ))
    }

    /// Every problem that blocks submitting: required fields plus numbers
    /// that do not parse
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        require(&mut errors, FieldPath::Budget(BudgetField::Name), &self.name);
        require(&mut errors, FieldPath::Budget(BudgetField::Client), self.client_ref.as_str());
        require(&mut errors, FieldPath::Budget(BudgetField::Contact), &self.contact);

        for (ti, tool) in self.tools.iter().enumerate() {
            require(&mut errors, FieldPath::tool(ti, ToolField::Name), &tool.name);
            for (pi, part) in tool.parts.iter().enumerate() {
                require(&mut errors, FieldPath::part(ti, pi, PartField::Name), &part.name);
                require(
                    &mut errors,
                    FieldPath::part(ti, pi, PartField::Material),
                    part.material_ref.as_str(),
                );
                for (oi, usage) in part.operations.iter().enumerate() {
                    require(
                        &mut errors,
                        FieldPath::operation(ti, pi, oi, OperationField::Operation),
                        usage.operation_ref.as_str(),
                    );
                }
            }
        }

        if let Err(numeric) = self.serialize() {
            errors.merge(numeric);
        }
        errors
    }

    /// Detached editable copy of a stored budget
    ///
    /// Nested records map one to one. Older records that only carry the flat
    /// `pecas` array are regrouped into tools by `ferramenta_nome`, in order
    /// of first appearance; their flat `operacoes` cannot be attributed to a
    /// part and are left out.
    pub fn from_record(budget: &Budget) -> Self {
        let tools = if !budget.tools.is_empty() {
            budget.tools.iter().map(tool_from_wire).collect()
        } else {
            regroup_flat_parts(budget)
        };
        Self {
            name: budget.name.clone(),
            client_ref: budget.cliente_id.clone(),
            contact: budget.contact.clone(),
            tools,
        }
    }
}

impl From<&Budget> for BudgetDraft {
    fn from(budget: &Budget) -> Self {
        Self::from_record(budget)
    }
}

fn require(errors: &mut ValidationErrors, path: FieldPath, value: &str) {
    if value.trim().is_empty() {
        errors.add(path.key(), REQUIRED);
    }
}

fn count(input: &NumberInput, path: FieldPath, errors: &mut ValidationErrors) -> u32 {
    input.as_count().unwrap_or_else(|| {
        errors.add(path.key(), NOT_A_COUNT);
        0
    })
}

fn decimal(input: &NumberInput, path: FieldPath, errors: &mut ValidationErrors) -> f64 {
    input.as_decimal().unwrap_or_else(|| {
        errors.add(path.key(), NOT_A_NUMBER);
        0.0
    })
}

fn tool_to_wire(ti: usize, tool: &ToolDraft, errors: &mut ValidationErrors) -> ToolWire {
    ToolWire {
        name: tool.name.clone(),
        quantity: count(&tool.quantity, FieldPath::tool(ti, ToolField::Quantity), errors),
        parts: tool
            .parts
            .iter()
            .enumerate()
            .map(|(pi, part)| part_to_wire(ti, pi, part, errors))
            .collect(),
    }
}

fn part_to_wire(ti: usize, pi: usize, part: &PartDraft, errors: &mut ValidationErrors) -> PartWire {
    PartWire {
        name: part.name.clone(),
        quantity: count(&part.quantity, FieldPath::part(ti, pi, PartField::Quantity), errors),
        note: part.note.clone(),
        material_id: part.material_ref.clone(),
        weight: decimal(&part.weight, FieldPath::part(ti, pi, PartField::Weight), errors),
        operations: part
            .operations
            .iter()
            .enumerate()
            .map(|(oi, usage)| OperationUsageWire {
                operacao_id: usage.operation_ref.clone(),
                hours: decimal(
                    &usage.hours,
                    FieldPath::operation(ti, pi, oi, OperationField::Hours),
                    errors,
                ),
            })
            .collect(),
    }
}

/// Stored weights and hours that the form would refuse load as zero so a
/// reopened record can always be saved again
fn loaded_decimal(value: f64) -> NumberInput {
    if value.is_finite() && value >= 0.0 {
        value.into()
    } else {
        log::warn!("stored value {value} is not a valid decimal, loading 0");
        NumberInput::default()
    }
}

fn tool_from_wire(tool: &ToolWire) -> ToolDraft {
    ToolDraft {
        name: tool.name.clone(),
        quantity: tool.quantity.into(),
        parts: tool
            .parts
            .iter()
            .map(|part| PartDraft {
                name: part.name.clone(),
                quantity: part.quantity.into(),
                note: part.note.clone(),
                material_ref: part.material_id.clone(),
                weight: loaded_decimal(part.weight),
                operations: part
                    .operations
                    .iter()
                    .map(|usage| OperationUsageDraft {
                        operation_ref: usage.operacao_id.clone(),
                        hours: loaded_decimal(usage.hours),
                    })
                    .collect(),
            })
            .collect(),
    }
}

fn regroup_flat_parts(budget: &Budget) -> Vec<ToolDraft> {
    let mut tools: Vec<ToolDraft> = Vec::new();
    for flat in &budget.parts {
        let part = PartDraft {
            name: flat.name.clone(),
            quantity: flat.quantity.into(),
            note: flat.note.clone(),
            material_ref: flat.material_id.clone(),
            weight: loaded_decimal(flat.weight),
            operations: Vec::new(),
        };
        match tools.iter_mut().find(|t| t.name == flat.ferramenta_nome) {
            Some(tool) => tool.parts.push(part),
            None => tools.push(ToolDraft {
                name: flat.ferramenta_nome.clone(),
                quantity: NumberInput::default(),
                parts: vec![part],
            }),
        }
    }
    if !budget.operations.is_empty() {
        log::warn!(
            "budget {}: {} flat operation usages have no owning part and were not loaded",
            budget.id,
            budget.operations.len()
        );
    }
    tools
}
