/// A client of the practice as handed over by the client registry.
///
/// Every field is optional: records are often created from partial intake
/// forms and completed later. Field names follow the registry's JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ClientRecord {
    pub full_name: Option<String>,
    pub nationality: Option<String>,
    pub marital_status: Option<String>,
    pub profession: Option<String>,
    pub cpf_cnpj: Option<String>, // Tax id, stored unformatted
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>, // Two-letter UF
    pub postal_code: Option<String>,
    pub phone: Option<String>,
    pub counterparty_name: Option<String>,
    pub current_date: Option<String>, // Pre-formatted, e.g. "19 de outubro de 2026"
}

impl ClientRecord {
    /// Display name used in generated file names and logs
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or("cliente")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_partial_record() {
        let record: ClientRecord =
            serde_json::from_str(r#"{"full_name": "ANA SILVA", "city": "Recife"}"#).unwrap();

        assert_eq!(record.full_name.as_deref(), Some("ANA SILVA"));
        assert_eq!(record.city.as_deref(), Some("Recife"));
        assert!(record.cpf_cnpj.is_none());
    }

    #[test]
    fn test_display_name_falls_back() {
        let mut record = ClientRecord::default();
        assert_eq!(record.display_name(), "cliente");

        record.full_name = Some("   ".to_string());
        assert_eq!(record.display_name(), "cliente");

        record.full_name = Some(" Ana Silva ".to_string());
        assert_eq!(record.display_name(), "Ana Silva");
    }
}
