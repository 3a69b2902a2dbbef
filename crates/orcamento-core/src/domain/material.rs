//! Material Entity

use serde::{Deserialize, Serialize};

use super::entity::{de_number, Entity, RecordId};

/// Raw material with a price per kilogram
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Material {
    #[serde(default)]
    pub id: RecordId,
    #[serde(flatten)]
    pub data: MaterialPayload,
}

/// Editable material fields, also the POST/PUT body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialPayload {
    #[serde(rename = "nome")]
    pub name: String,
    /// Price per kg; older rows carry it as a string
    #[serde(rename = "preco", deserialize_with = "de_number")]
    pub price: f64,
    #[serde(rename = "especificacaoTecnica")]
    pub technical_spec: String,
    #[serde(rename = "origem")]
    pub origin: String,
    #[serde(rename = "descricao")]
    pub description: String,
}

impl Entity for Material {
    type Payload = MaterialPayload;

    const COLLECTION: &'static str = "materiais";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn label(&self) -> String {
        self.data.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_price_as_string() {
        let json = r#"{"id":"m1","nome":"Aço 1045","preco":"32.90","especificacaoTecnica":"SAE 1045","origem":"Gerdau","descricao":""}"#;
        let material: Material = serde_json::from_str(json).unwrap();
        assert_eq!(material.data.price, 32.9);
        assert_eq!(material.label(), "Aço 1045");
    }

    #[test]
    fn test_material_payload_wire_keys() {
        let payload = MaterialPayload {
            name: "Alumínio".into(),
            price: 18.0,
            ..Default::default()
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["nome"], "Alumínio");
        assert_eq!(value["preco"], 18.0);
        assert!(value.get("especificacaoTecnica").is_some());
    }
}
