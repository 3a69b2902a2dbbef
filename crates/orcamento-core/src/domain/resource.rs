//! Resource Entity
//!
//! A machine operation billed by the hour ("operação"). Budget parts
//! reference resources through `operacao_id`.

use serde::{Deserialize, Serialize};

use super::entity::{de_number, Entity, RecordId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default)]
    pub id: RecordId,
    #[serde(flatten)]
    pub data: ResourcePayload,
}

/// Editable resource fields, also the POST/PUT body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcePayload {
    #[serde(rename = "operacao", alias = "operation")]
    pub operation: String,
    #[serde(rename = "precoHora", alias = "pricePerHour", deserialize_with = "de_number")]
    pub price_per_hour: f64,
    #[serde(rename = "descricao", alias = "description")]
    pub description: String,
}

impl Entity for Resource {
    type Payload = ResourcePayload;

    const COLLECTION: &'static str = "operacoes";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn label(&self) -> String {
        self.data.operation.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_accepts_legacy_keys() {
        let json = r#"{"id":9,"operation":"Torneamento","pricePerHour":120,"description":"CNC"}"#;
        let resource: Resource = serde_json::from_str(json).unwrap();
        assert_eq!(resource.data.operation, "Torneamento");
        assert_eq!(resource.data.price_per_hour, 120.0);
        assert_eq!(resource.label(), "Torneamento");
    }

    #[test]
    fn test_resource_writes_current_keys() {
        let payload = ResourcePayload {
            operation: "Fresamento".into(),
            price_per_hour: 95.5,
            description: String::new(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["operacao"], "Fresamento");
        assert_eq!(value["precoHora"], 95.5);
    }
}
