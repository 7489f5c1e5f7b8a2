//! Request bodies accepted by the portal API and their conversion into domain payloads.

use std::collections::BTreeMap;

use thiserror::Error;
use validator::ValidationErrors;

pub mod client;
pub mod employee;
pub mod job;
pub mod material;
pub mod quote;

/// Field name mapped to the messages shown next to it.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid name")]
    InvalidName,

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid phone number")]
    InvalidPhoneNumber,

    #[error("invalid address")]
    InvalidAddress,

    #[error("invalid description")]
    InvalidDescription,

    #[error("invalid title")]
    InvalidTitle,

    #[error("invalid unit")]
    InvalidUnit,

    #[error("invalid amount in `{0}`")]
    InvalidAmount(&'static str),

    #[error("invalid stock level")]
    InvalidStock,

    #[error("invalid client id")]
    InvalidClientId,

    #[error("invalid employee id")]
    InvalidEmployeeId,

    #[error("unknown option for `{0}`")]
    InvalidChoice(&'static str),
}

impl FormError {
    fn field(&self) -> &'static str {
        match self {
            FormError::Validation(_) => "form",
            FormError::InvalidName => "name",
            FormError::InvalidEmail => "email",
            FormError::InvalidPhoneNumber => "phone",
            FormError::InvalidAddress => "address",
            FormError::InvalidDescription => "description",
            FormError::InvalidTitle => "title",
            FormError::InvalidUnit => "unit",
            FormError::InvalidAmount(field) | FormError::InvalidChoice(field) => *field,
            FormError::InvalidStock => "stock",
            FormError::InvalidClientId => "clientId",
            FormError::InvalidEmployeeId => "employeeId",
        }
    }

    fn message(&self) -> &'static str {
        match self {
            FormError::Validation(_) => "Formulario inválido",
            FormError::InvalidName => "El nombre es obligatorio",
            FormError::InvalidEmail => "Correo electrónico inválido",
            FormError::InvalidPhoneNumber => "Número de teléfono inválido",
            FormError::InvalidAddress => "Dirección inválida",
            FormError::InvalidDescription => "La descripción es obligatoria",
            FormError::InvalidTitle => "El título es obligatorio",
            FormError::InvalidUnit => "La unidad es obligatoria",
            FormError::InvalidAmount(_) => "El importe no puede ser negativo",
            FormError::InvalidStock => "El stock no puede ser negativo",
            FormError::InvalidClientId => "Cliente inválido",
            FormError::InvalidEmployeeId => "Empleado inválido",
            FormError::InvalidChoice(_) => "Opción no válida",
        }
    }

    /// Per-field messages for the API error body.
    pub fn field_errors(&self) -> FieldErrors {
        let mut fields = FieldErrors::new();

        match self {
            FormError::Validation(errors) => {
                for (field, errors) in errors.field_errors() {
                    let messages = errors
                        .iter()
                        .map(|error| match &error.message {
                            Some(message) => message.to_string(),
                            None => format!("Valor inválido ({})", error.code),
                        })
                        .collect();
                    fields.insert(field.to_string(), messages);
                }
            }
            other => {
                fields.insert(other.field().to_string(), vec![other.message().to_string()]);
            }
        }

        fields
    }
}

/// Treats blank optional inputs as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_errors_point_at_their_field() {
        let fields = FormError::InvalidEmail.field_errors();
        assert_eq!(
            fields.get("email"),
            Some(&vec!["Correo electrónico inválido".to_string()])
        );

        let fields = FormError::InvalidChoice("role").field_errors();
        assert!(fields.contains_key("role"));
    }

    #[test]
    fn blank_inputs_become_none() {
        assert_eq!(non_blank(Some("   ".into())), None);
        assert_eq!(non_blank(Some(" x ".into())), Some("x".into()));
        assert_eq!(non_blank(None), None);
    }
}
