//! Budget Entity
//!
//! A quote ("orçamento") made of tools, each with parts, each consuming
//! machine operations for some hours. The API keeps the nested tree in
//! `ferramentas` and, alongside it, two flattened arrays (`pecas`,
//! `operacoes`). Older rows only carry the flat arrays.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::entity::{de_count, de_list, de_number, Entity, RecordId};

/// Budget record as listed by `GET /orcamentos`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    #[serde(default)]
    pub id: RecordId,
    #[serde(rename = "nome", default)]
    pub name: String,
    #[serde(default)]
    pub cliente_id: RecordId,
    #[serde(rename = "contato", default)]
    pub contact: String,
    #[serde(rename = "criado_em", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "ferramentas", default, deserialize_with = "de_list")]
    pub tools: Vec<ToolWire>,
    #[serde(rename = "pecas", default, deserialize_with = "de_list")]
    pub parts: Vec<FlatPart>,
    #[serde(rename = "operacoes", default, deserialize_with = "de_list")]
    pub operations: Vec<OperationUsageWire>,
}

/// Nested tool as it travels inside `ferramentas`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolWire {
    #[serde(rename = "nome", default)]
    pub name: String,
    #[serde(rename = "quantidade", default, deserialize_with = "de_count")]
    pub quantity: u32,
    #[serde(rename = "pecas", default, deserialize_with = "de_list")]
    pub parts: Vec<PartWire>,
}

/// Nested part inside a tool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartWire {
    #[serde(rename = "nome", default)]
    pub name: String,
    #[serde(rename = "quantidade", default, deserialize_with = "de_count")]
    pub quantity: u32,
    #[serde(rename = "nota", default)]
    pub note: String,
    #[serde(default)]
    pub material_id: RecordId,
    #[serde(rename = "peso", default, deserialize_with = "de_number")]
    pub weight: f64,
    #[serde(rename = "operacoes", default, deserialize_with = "de_list")]
    pub operations: Vec<OperationUsageWire>,
}

/// One operation applied to a part, nested or flattened
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationUsageWire {
    #[serde(default)]
    pub operacao_id: RecordId,
    #[serde(rename = "horas", default, deserialize_with = "de_number")]
    pub hours: f64,
}

/// Flattened part, tagged with the name of the tool that owns it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatPart {
    #[serde(rename = "nome", default)]
    pub name: String,
    #[serde(rename = "quantidade", default, deserialize_with = "de_count")]
    pub quantity: u32,
    #[serde(rename = "nota", default)]
    pub note: String,
    #[serde(default)]
    pub material_id: RecordId,
    #[serde(rename = "peso", default, deserialize_with = "de_number")]
    pub weight: f64,
    #[serde(default)]
    pub ferramenta_nome: String,
}

/// Exact request body for `POST /orcamentos` and `PUT /orcamentos/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetPayload {
    pub nome: String,
    pub cliente_id: RecordId,
    pub contato: String,
    pub ferramentas: Vec<ToolWire>,
    pub pecas: Vec<FlatPart>,
    pub operacoes: Vec<OperationUsageWire>,
}

impl BudgetPayload {
    /// Build the payload from the nested tree, deriving both flat arrays by
    /// walking tools → parts → operations in order.
    pub fn from_tools(nome: String, cliente_id: RecordId, contato: String, ferramentas: Vec<ToolWire>) -> Self {
        let mut pecas = Vec::new();
        let mut operacoes = Vec::new();
        for tool in &ferramentas {
            for part in &tool.parts {
                pecas.push(FlatPart {
                    name: part.name.clone(),
                    quantity: part.quantity,
                    note: part.note.clone(),
                    material_id: part.material_id.clone(),
                    weight: part.weight,
                    ferramenta_nome: tool.name.clone(),
                });
                operacoes.extend(part.operations.iter().cloned());
            }
        }
        Self {
            nome,
            cliente_id,
            contato,
            ferramentas,
            pecas,
            operacoes,
        }
    }
}

impl Budget {
    /// Sum of hours over every nested operation usage
    pub fn total_hours(&self) -> f64 {
        if self.tools.is_empty() {
            return self.operations.iter().map(|op| op.hours).sum();
        }
        self.tools
            .iter()
            .flat_map(|tool| &tool.parts)
            .flat_map(|part| &part.operations)
            .map(|op| op.hours)
            .sum()
    }

    /// Creation timestamp formatted `dd/mm/yyyy HH:MM` when it parses
    pub fn created_at_display(&self) -> Option<String> {
        let raw = self.created_at.as_deref()?.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.format("%d/%m/%Y %H:%M").to_string());
        }
        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
                return Some(dt.format("%d/%m/%Y %H:%M").to_string());
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .map(|d| d.format("%d/%m/%Y").to_string())
    }
}

impl Entity for Budget {
    type Payload = BudgetPayload;

    const COLLECTION: &'static str = "orcamentos";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}
