//! Flat Record Forms
//!
//! Editable drafts for the single-level entities (client, material,
//! resource). Each form describes its inputs through [`FieldSpec`] so one
//! generic view can render, mask and validate any of them.

use crate::domain::{Client, ClientPayload, Entity, Material, MaterialPayload, Resource, ResourcePayload};
use crate::masks;
use crate::validation::{self, ValidationErrors};

/// How an input is formatted while typing and shown in read-only mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mask {
    Plain,
    Cnpj,
    Phone,
    Cep,
    /// Typed as a plain decimal, shown as `R$ 0,00`
    Currency,
}

impl Mask {
    /// Apply the mask to freshly typed text
    pub fn apply(self, raw: &str) -> String {
        match self {
            Mask::Plain | Mask::Currency => raw.to_string(),
            Mask::Cnpj => masks::format_cnpj(raw),
            Mask::Phone => masks::format_phone(raw),
            Mask::Cep => masks::format_cep(raw),
        }
    }

    /// Read-only rendering of a stored value
    pub fn display(self, value: &str) -> String {
        match self {
            Mask::Currency => validation::parse_decimal(value)
                .map(masks::format_brl)
                .unwrap_or_else(|| value.to_string()),
            _ => value.to_string(),
        }
    }
}

/// One input of a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire key, also the validation key
    pub key: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub mask: Mask,
}

const fn field(key: &'static str, label: &'static str, required: bool, mask: Mask) -> FieldSpec {
    FieldSpec {
        key,
        label,
        required,
        mask,
    }
}

/// Editable draft of one flat record
pub trait RecordForm: Clone + Default + PartialEq + 'static {
    type Record: Entity;

    const FIELDS: &'static [FieldSpec];

    fn from_record(record: &Self::Record) -> Self;

    /// Current text of the input `key` ("" for unknown keys)
    fn get(&self, key: &str) -> String;

    /// Store text for `key` as is; unknown keys are ignored
    fn set(&mut self, key: &str, value: String);

    /// Checks beyond "required" (formats, numbers)
    fn check_formats(&self, errors: &mut ValidationErrors);

    /// Body for POST/PUT; only called once `validate` came back empty
    fn build_payload(&self) -> <Self::Record as Entity>::Payload;

    /// Masked input: format `raw` with the field's mask, then store it
    fn input(&mut self, key: &str, raw: &str) {
        let mask = Self::spec(key).map(|f| f.mask).unwrap_or(Mask::Plain);
        self.set(key, mask.apply(raw));
    }

    fn spec(key: &str) -> Option<&'static FieldSpec> {
        Self::FIELDS.iter().find(|f| f.key == key)
    }

    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for f in Self::FIELDS.iter().filter(|f| f.required) {
            validation::require(&mut errors, f.key, &self.get(f.key));
        }
        self.check_formats(&mut errors);
        errors
    }

    fn to_payload(&self) -> Result<<Self::Record as Entity>::Payload, ValidationErrors> {
        self.validate().into_result()?;
        Ok(self.build_payload())
    }

    /// `(label, display value)` pairs for the read-only view
    fn detail_rows(record: &Self::Record) -> Vec<(&'static str, String)> {
        let form = Self::from_record(record);
        Self::FIELDS
            .iter()
            .map(|f| (f.label, f.mask.display(&form.get(f.key))))
            .collect()
    }
}

fn check_format(errors: &mut ValidationErrors, key: &str, value: &str, valid: fn(&str) -> bool, message: &str) {
    if !value.is_empty() && !valid(value) {
        errors.add(key, message);
    }
}

// -- Client ------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientForm(pub ClientPayload);

impl RecordForm for ClientForm {
    type Record = Client;

    const FIELDS: &'static [FieldSpec] = &[
        field("cnpj", "CNPJ", true, Mask::Cnpj),
        field("razaoSocial", "Razão Social", true, Mask::Plain),
        field("nomeFantasia", "Nome Fantasia", false, Mask::Plain),
        field("inscricaoEstadual", "Inscrição Estadual", true, Mask::Plain),
        field("email", "E-mail", true, Mask::Plain),
        field("telefone", "Telefone", true, Mask::Phone),
        field("cep", "CEP", true, Mask::Cep),
        field("pais", "País", true, Mask::Plain),
        field("estado", "Estado", true, Mask::Plain),
        field("cidade", "Cidade", true, Mask::Plain),
        field("bairro", "Bairro", true, Mask::Plain),
        field("logradouro", "Logradouro", true, Mask::Plain),
        field("numero", "Número", true, Mask::Plain),
        field("contatoNome", "Nome do Contato", true, Mask::Plain),
        field("contatoCargo", "Cargo", true, Mask::Plain),
        field("contatoSetor", "Setor", true, Mask::Plain),
    ];

    fn from_record(record: &Client) -> Self {
        Self(record.data.clone())
    }

    fn get(&self, key: &str) -> String {
        let d = &self.0;
        match key {
            "cnpj" => &d.cnpj,
            "razaoSocial" => &d.razao_social,
            "nomeFantasia" => &d.nome_fantasia,
            "inscricaoEstadual" => &d.inscricao_estadual,
            "email" => &d.email,
            "telefone" => &d.telefone,
            "cep" => &d.cep,
            "pais" => &d.pais,
            "estado" => &d.estado,
            "cidade" => &d.cidade,
            "bairro" => &d.bairro,
            "logradouro" => &d.logradouro,
            "numero" => &d.numero,
            "contatoNome" => &d.contato_nome,
            "contatoCargo" => &d.contato_cargo,
            "contatoSetor" => &d.contato_setor,
            _ => return String::new(),
        }
        .clone()
    }

    fn set(&mut self, key: &str, value: String) {
        let d = &mut self.0;
        let slot = match key {
            "cnpj" => &mut d.cnpj,
            "razaoSocial" => &mut d.razao_social,
            "nomeFantasia" => &mut d.nome_fantasia,
            "inscricaoEstadual" => &mut d.inscricao_estadual,
            "email" => &mut d.email,
            "telefone" => &mut d.telefone,
            "cep" => &mut d.cep,
            "pais" => &mut d.pais,
            "estado" => &mut d.estado,
            "cidade" => &mut d.cidade,
            "bairro" => &mut d.bairro,
            "logradouro" => &mut d.logradouro,
            "numero" => &mut d.numero,
            "contatoNome" => &mut d.contato_nome,
            "contatoCargo" => &mut d.contato_cargo,
            "contatoSetor" => &mut d.contato_setor,
            _ => {
                log::debug!("client form: unknown field {key}");
                return;
            }
        };
        *slot = value;
    }

    fn check_formats(&self, errors: &mut ValidationErrors) {
        let d = &self.0;
        check_format(errors, "cnpj", &d.cnpj, validation::is_valid_cnpj, "CNPJ inválido");
        check_format(errors, "email", &d.email, validation::is_valid_email, "E-mail inválido");
        check_format(errors, "cep", &d.cep, validation::is_valid_cep, "CEP inválido");
        check_format(errors, "telefone", &d.telefone, validation::is_valid_phone, "Telefone inválido");
    }

    fn build_payload(&self) -> ClientPayload {
        let mut payload = self.0.clone();
        payload.email = payload.email.trim().to_string();
        payload
    }
}

// -- Material ----------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialForm {
    pub name: String,
    pub price: String,
    pub technical_spec: String,
    pub origin: String,
    pub description: String,
}

impl RecordForm for MaterialForm {
    type Record = Material;

    const FIELDS: &'static [FieldSpec] = &[
        field("nome", "Nome", true, Mask::Plain),
        field("preco", "Preço (kg)", true, Mask::Currency),
        field("especificacaoTecnica", "Especificação Técnica", true, Mask::Plain),
        field("origem", "Origem", true, Mask::Plain),
        field("descricao", "Descrição", false, Mask::Plain),
    ];

    fn from_record(record: &Material) -> Self {
        let d = &record.data;
        Self {
            name: d.name.clone(),
            price: d.price.to_string(),
            technical_spec: d.technical_spec.clone(),
            origin: d.origin.clone(),
            description: d.description.clone(),
        }
    }

    fn get(&self, key: &str) -> String {
        match key {
            "nome" => &self.name,
            "preco" => &self.price,
            "especificacaoTecnica" => &self.technical_spec,
            "origem" => &self.origin,
            "descricao" => &self.description,
            _ => return String::new(),
        }
        .clone()
    }

    fn set(&mut self, key: &str, value: String) {
        let slot = match key {
            "nome" => &mut self.name,
            "preco" => &mut self.price,
            "especificacaoTecnica" => &mut self.technical_spec,
            "origem" => &mut self.origin,
            "descricao" => &mut self.description,
            _ => {
                log::debug!("material form: unknown field {key}");
                return;
            }
        };
        *slot = value;
    }

    fn check_formats(&self, errors: &mut ValidationErrors) {
        if !self.price.trim().is_empty() && validation::parse_decimal(&self.price).is_none() {
            errors.add("preco", "Preço deve ser um número válido");
        }
    }

    fn build_payload(&self) -> MaterialPayload {
        MaterialPayload {
            name: self.name.trim().to_string(),
            price: validation::parse_decimal(&self.price).unwrap_or_default(),
            technical_spec: self.technical_spec.clone(),
            origin: self.origin.clone(),
            description: self.description.clone(),
        }
    }
}

// -- Resource ----------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceForm {
    pub operation: String,
    pub price_per_hour: String,
    pub description: String,
}

impl RecordForm for ResourceForm {
    type Record = Resource;

    const FIELDS: &'static [FieldSpec] = &[
        field("operacao", "Operação", true, Mask::Plain),
        field("precoHora", "Preço/Hora", true, Mask::Currency),
        field("descricao", "Descrição", false, Mask::Plain),
    ];

    fn from_record(record: &Resource) -> Self {
        let d = &record.data;
        Self {
            operation: d.operation.clone(),
            price_per_hour: d.price_per_hour.to_string(),
            description: d.description.clone(),
        }
    }

    fn get(&self, key: &str) -> String {
        match key {
            "operacao" => &self.operation,
            "precoHora" => &self.price_per_hour,
            "descricao" => &self.description,
            _ => return String::new(),
        }
        .clone()
    }

    fn set(&mut self, key: &str, value: String) {
        let slot = match key {
            "operacao" => &mut self.operation,
            "precoHora" => &mut self.price_per_hour,
            "descricao" => &mut self.description,
            _ => {
                log::debug!("resource form: unknown field {key}");
                return;
            }
        };
        *slot = value;
    }

    fn check_formats(&self, errors: &mut ValidationErrors) {
        if !self.price_per_hour.trim().is_empty() && validation::parse_decimal(&self.price_per_hour).is_none() {
            errors.add("precoHora", "Informe um valor numérico válido para Preço/Hora");
        }
    }

    fn build_payload(&self) -> ResourcePayload {
        ResourcePayload {
            operation: self.operation.trim().to_string(),
            price_per_hour: validation::parse_decimal(&self.price_per_hour).unwrap_or_default(),
            description: self.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::REQUIRED;

    fn filled_client() -> ClientForm {
        let mut form = ClientForm::default();
        for f in ClientForm::FIELDS {
            form.set(f.key, "x".into());
        }
        form.input("cnpj", "12345678000190");
        form.input("telefone", "47998765432");
        form.input("cep", "89201100");
        form.set("email", "compras@alfa.com.br".into());
        form
    }

    #[test]
    fn test_client_required_fields() {
        let errors = ClientForm::default().validate();
        assert_eq!(errors.get("razaoSocial"), Some(REQUIRED));
        assert_eq!(errors.get("contatoSetor"), Some(REQUIRED));
        assert_eq!(errors.get("nomeFantasia"), None);
        assert_eq!(errors.len(), ClientForm::FIELDS.len() - 1);
    }

    #[test]
    fn test_client_masks_applied_on_input() {
        let form = filled_client();
        assert_eq!(form.0.cnpj, "12.345.678/0001-90");
        assert_eq!(form.0.telefone, "(47) 99876-5432");
        assert_eq!(form.0.cep, "89201-100");
        assert!(form.validate().is_empty());
        assert_eq!(form.to_payload().unwrap().cnpj, "12.345.678/0001-90");
    }

    #[test]
    fn test_client_format_errors() {
        let mut form = filled_client();
        form.set("cnpj", "123".into());
        form.set("email", "sem-arroba".into());
        form.input("cep", "892");
        let errors = form.to_payload().unwrap_err();
        assert_eq!(errors.get("cnpj"), Some("CNPJ inválido"));
        assert_eq!(errors.get("email"), Some("E-mail inválido"));
        assert_eq!(errors.get("cep"), Some("CEP inválido"));
        assert_eq!(errors.get("telefone"), None);
    }

    #[test]
    fn test_material_price_must_parse() {
        let mut form = MaterialForm {
            name: "Aço 1045".into(),
            price: "abc".into(),
            technical_spec: "SAE 1045".into(),
            origin: "Nacional".into(),
            description: String::new(),
        };
        assert_eq!(form.validate().get("preco"), Some("Preço deve ser um número válido"));
        form.set("preco", "12,5".into());
        assert_eq!(form.to_payload().unwrap().price, 12.5);
    }

    #[test]
    fn test_material_detail_rows_format_price() {
        let material = Material {
            id: "1".into(),
            data: MaterialPayload {
                name: "Aço".into(),
                price: 1234.5,
                ..Default::default()
            },
        };
        let rows = MaterialForm::detail_rows(&material);
        assert_eq!(rows[0], ("Nome", "Aço".to_string()));
        assert_eq!(rows[1], ("Preço (kg)", "R$ 1.234,50".to_string()));
    }

    #[test]
    fn test_resource_price_non_negative() {
        let mut form = ResourceForm {
            operation: "Torno".into(),
            price_per_hour: "-3".into(),
            description: String::new(),
        };
        assert!(form.validate().get("precoHora").is_some());
        form.set("precoHora", "80".into());
        let payload = form.to_payload().unwrap();
        assert_eq!(payload.price_per_hour, 80.0);
        assert_eq!(payload.operation, "Torno");
    }

    #[test]
    fn test_unknown_key_is_ignored() {
        let mut form = ResourceForm::default();
        form.set("nope", "x".into());
        assert_eq!(form, ResourceForm::default());
        assert_eq!(form.get("nope"), "");
    }
}
