//! List table columns per record type

use orcamento_core::domain::{Client, Material, Resource};
use orcamento_core::masks::format_brl;

pub trait ListColumns {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

impl ListColumns for Client {
    const HEADERS: &'static [&'static str] = &["Empresa", "CNPJ", "E-mail", "Telefone", "Endereço"];

    fn cells(&self) -> Vec<String> {
        use orcamento_core::Entity;
        vec![
            self.label(),
            self.data.cnpj.clone(),
            self.data.email.clone(),
            self.data.telefone.clone(),
            self.address_line(),
        ]
    }
}

impl ListColumns for Material {
    const HEADERS: &'static [&'static str] = &["Nome", "Preço (kg)", "Especificação", "Origem"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.data.name.clone(),
            format_brl(self.data.price),
            self.data.technical_spec.clone(),
            self.data.origin.clone(),
        ]
    }
}

impl ListColumns for Resource {
    const HEADERS: &'static [&'static str] = &["Operação", "Preço/Hora", "Descrição"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.data.operation.clone(),
            format_brl(self.data.price_per_hour),
            self.data.description.clone(),
        ]
    }
}
