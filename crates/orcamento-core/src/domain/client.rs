//! Client Entity
//!
//! Company identity, one contact person and a postal address.

use serde::{Deserialize, Serialize};

use super::entity::{Entity, RecordId};

/// Client record as listed by `GET /clientes`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(default)]
    pub id: RecordId,
    #[serde(flatten)]
    pub data: ClientPayload,
}

/// Editable client fields, also the POST/PUT body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientPayload {
    pub cnpj: String,
    pub razao_social: String,
    pub nome_fantasia: String,
    pub inscricao_estadual: String,
    pub email: String,
    pub telefone: String,
    pub cep: String,
    pub pais: String,
    pub estado: String,
    pub cidade: String,
    pub bairro: String,
    pub logradouro: String,
    pub numero: String,
    pub contato_nome: String,
    pub contato_cargo: String,
    pub contato_setor: String,
}

impl Client {
    /// One-line address for list rows
    pub fn address_line(&self) -> String {
        let d = &self.data;
        [
            format!("{}, {}", d.logradouro, d.numero),
            d.bairro.clone(),
            format!("{}/{}", d.cidade, d.estado),
        ]
        .into_iter()
        .filter(|part| !part.trim_matches(&[',', '/', ' '][..]).is_empty())
        .collect::<Vec<_>>()
        .join(" - ")
    }
}

impl Entity for Client {
    type Payload = ClientPayload;

    const COLLECTION: &'static str = "clientes";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn label(&self) -> String {
        if self.data.nome_fantasia.trim().is_empty() {
            self.data.razao_social.clone()
        } else {
            self.data.nome_fantasia.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_deserializes_camel_case() {
        let json = r#"{
            "id": 3,
            "razaoSocial": "Metalúrgica Alfa LTDA",
            "nomeFantasia": "",
            "cnpj": "12.345.678/0001-90",
            "contatoNome": "Ana",
            "cidade": "Joinville",
            "estado": "SC"
        }"#;
        let client: Client = serde_json::from_str(json).unwrap();
        assert_eq!(client.id.as_str(), "3");
        assert_eq!(client.data.contato_nome, "Ana");
        assert_eq!(client.label(), "Metalúrgica Alfa LTDA");
        assert_eq!(client.data.pais, "");
    }

    #[test]
    fn test_label_prefers_trade_name() {
        let mut client = Client::default();
        client.data.razao_social = "Alfa LTDA".into();
        client.data.nome_fantasia = "Alfa".into();
        assert_eq!(client.label(), "Alfa");
    }

    #[test]
    fn test_address_line_skips_empty_parts() {
        let mut client = Client::default();
        client.data.cidade = "Joinville".into();
        client.data.estado = "SC".into();
        assert_eq!(client.address_line(), "Joinville/SC");
    }
}
