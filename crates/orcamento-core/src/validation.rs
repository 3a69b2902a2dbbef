//! Field Validation
//!
//! Required-field and format checks shared by every form. Errors are keyed
//! by the field's wire name (or structural path for the budget editor) so
//! views can render them inline next to the input.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static CNPJ_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}\.\d{3}\.\d{3}/\d{4}-\d{2}$").expect("valid CNPJ regex"));
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid e-mail regex"));
static CEP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{5}-\d{3}$").expect("valid CEP regex"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(\d{2}\) \d{4,5}-\d{4}$").expect("valid phone regex"));

pub const REQUIRED: &str = "Este campo é obrigatório";

/// One failed check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Ordered collection of field errors (first error per field wins)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error unless the field already has one
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        if self.get(&field).is_none() {
            self.errors.push(FieldError {
                field,
                message: message.into(),
            });
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Drop the error for one field (user started typing in it)
    pub fn clear(&mut self, field: &str) {
        self.errors.retain(|e| e.field != field);
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        for e in other.errors {
            self.add(e.field, e.message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// `Ok(())` when nothing failed
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

pub fn require(errors: &mut ValidationErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, REQUIRED);
    }
}

pub fn is_valid_cnpj(value: &str) -> bool {
    CNPJ_RE.is_match(value)
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub fn is_valid_cep(value: &str) -> bool {
    CEP_RE.is_match(value)
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

/// Parse a non-negative decimal typed by the user (`"12.5"` or `"12,5"`)
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().replace(',', ".").parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Parse a non-negative integer typed by the user
pub fn parse_count(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_error_per_field_wins() {
        let mut errors = ValidationErrors::new();
        errors.add("cnpj", REQUIRED);
        errors.add("cnpj", "CNPJ inválido");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("cnpj"), Some(REQUIRED));
        errors.clear("cnpj");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_formats() {
        assert!(is_valid_cnpj("12.345.678/0001-90"));
        assert!(!is_valid_cnpj("12345678000190"));
        assert!(is_valid_email("compras@alfa.com.br"));
        assert!(!is_valid_email("compras@alfa"));
        assert!(is_valid_cep("89201-100"));
        assert!(!is_valid_cep("89201100"));
        assert!(is_valid_phone("(47) 99876-5432"));
        assert!(is_valid_phone("(47) 3433-1234"));
        assert!(!is_valid_phone("47 99876-5432"));
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("12.5"), Some(12.5));
        assert_eq!(parse_decimal(" 12,5 "), Some(12.5));
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("-1"), None);
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("NaN"), None);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("3"), Some(3));
        assert_eq!(parse_count("3.5"), None);
        assert_eq!(parse_count("-2"), None);
    }
}
