//! Placeholder fields recognized in petition templates

use serde::{Deserialize, Serialize};
use shared_types::ClientRecord;

/// Every semantic field a template can reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderField {
    FullName,
    Nationality,
    MaritalStatus,
    Profession,
    TaxId,
    Street,
    Number,
    Complement,
    Neighborhood,
    City,
    State,
    PostalCode,
    Phone,
    CounterpartyName,
    CurrentDate,
    /// Street, number, complement, neighborhood, city/state and CEP in one line
    FullAddress,
}

impl PlaceholderField {
    /// All fields, in the order they appear in a petition's qualification
    pub const ALL: [PlaceholderField; 16] = [
        PlaceholderField::FullName,
        PlaceholderField::Nationality,
        PlaceholderField::MaritalStatus,
        PlaceholderField::Profession,
        PlaceholderField::TaxId,
        PlaceholderField::Street,
        PlaceholderField::Number,
        PlaceholderField::Complement,
        PlaceholderField::Neighborhood,
        PlaceholderField::City,
        PlaceholderField::State,
        PlaceholderField::PostalCode,
        PlaceholderField::FullAddress,
        PlaceholderField::Phone,
        PlaceholderField::CounterpartyName,
        PlaceholderField::CurrentDate,
    ];

    /// Keys a template author may write for this field, as they are
    /// usually typed. Case and accent variants are derived from these.
    pub fn keys(&self) -> &'static [&'static str] {
        match self {
            PlaceholderField::FullName => &["nome completo", "nome"],
            PlaceholderField::Nationality => &["nacionalidade"],
            PlaceholderField::MaritalStatus => &["estado civil"],
            PlaceholderField::Profession => &["profissão"],
            PlaceholderField::TaxId => &["cpf", "cnpj", "cpf/cnpj"],
            PlaceholderField::Street => &["rua", "logradouro", "endereço"],
            PlaceholderField::Number => &["número"],
            PlaceholderField::Complement => &["complemento"],
            PlaceholderField::Neighborhood => &["bairro"],
            PlaceholderField::City => &["cidade"],
            PlaceholderField::State => &["estado", "uf"],
            PlaceholderField::PostalCode => &["cep"],
            PlaceholderField::Phone => &["telefone"],
            PlaceholderField::CounterpartyName => &["parte contrária", "nome da parte contrária"],
            PlaceholderField::CurrentDate => &["data atual", "data"],
            PlaceholderField::FullAddress => &["endereço completo"],
        }
    }

    /// Project the field out of a client record. Absent and blank values
    /// both come back as an empty string.
    pub fn value(&self, record: &ClientRecord) -> String {
        let raw = match self {
            PlaceholderField::FullName => record.full_name.as_deref(),
            PlaceholderField::Nationality => record.nationality.as_deref(),
            PlaceholderField::MaritalStatus => record.marital_status.as_deref(),
            PlaceholderField::Profession => record.profession.as_deref(),
            PlaceholderField::TaxId => record.cpf_cnpj.as_deref(),
            PlaceholderField::Street => record.street.as_deref(),
            PlaceholderField::Number => record.number.as_deref(),
            PlaceholderField::Complement => record.complement.as_deref(),
            PlaceholderField::Neighborhood => record.neighborhood.as_deref(),
            PlaceholderField::City => record.city.as_deref(),
            PlaceholderField::State => record.state.as_deref(),
            PlaceholderField::PostalCode => record.postal_code.as_deref(),
            PlaceholderField::Phone => record.phone.as_deref(),
            PlaceholderField::CounterpartyName => record.counterparty_name.as_deref(),
            PlaceholderField::CurrentDate => record.current_date.as_deref(),
            PlaceholderField::FullAddress => return full_address(record),
        };
        raw.map(str::trim).unwrap_or_default().to_string()
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// "Rua das Flores, 12, apto 3, Boa Viagem, Recife/PE, CEP 51020-000"
fn full_address(record: &ClientRecord) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(street) = present(&record.street) {
        parts.push(street.to_string());
    }
    if let Some(number) = present(&record.number) {
        parts.push(number.to_string());
    }
    if let Some(complement) = present(&record.complement) {
        parts.push(complement.to_string());
    }
    if let Some(neighborhood) = present(&record.neighborhood) {
        parts.push(neighborhood.to_string());
    }
    match (present(&record.city), present(&record.state)) {
        (Some(city), Some(state)) => parts.push(format!("{}/{}", city, state)),
        (Some(city), None) => parts.push(city.to_string()),
        (None, Some(state)) => parts.push(state.to_string()),
        (None, None) => {}
    }
    if let Some(cep) = present(&record.postal_code) {
        parts.push(format!("CEP {}", cep));
    }

    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_has_keys() {
        for field in PlaceholderField::ALL {
            assert!(!field.keys().is_empty(), "{:?} has no keys", field);
        }
    }

    #[test]
    fn test_value_trims_and_defaults() {
        let record = ClientRecord {
            profession: Some("  advogada ".to_string()),
            ..Default::default()
        };

        assert_eq!(PlaceholderField::Profession.value(&record), "advogada");
        assert_eq!(PlaceholderField::City.value(&record), "");
    }

    #[test]
    fn test_full_address() {
        let record = ClientRecord {
            street: Some("Rua das Flores".to_string()),
            number: Some("12".to_string()),
            neighborhood: Some("Boa Viagem".to_string()),
            city: Some("Recife".to_string()),
            state: Some("PE".to_string()),
            postal_code: Some("51020-000".to_string()),
            ..Default::default()
        };

        assert_eq!(
            PlaceholderField::FullAddress.value(&record),
            "Rua das Flores, 12, Boa Viagem, Recife/PE, CEP 51020-000"
        );
    }

    #[test]
    fn test_full_address_empty_record() {
        assert_eq!(PlaceholderField::FullAddress.value(&ClientRecord::default()), "");
    }
}
