use serde::Deserialize;
use validator::Validate;

use crate::domain::client::{NewClient, UpdateClient};
use crate::domain::types::{EmailAddress, PersonName, PhoneNumber, StreetAddress};
use crate::forms::{FormError, non_blank};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Body of `POST /clients` and `PUT /clients/{id}`.
pub struct ClientForm {
    #[validate(length(min = 1, max = 200, message = "El nombre es obligatorio"))]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Validated client fields.
pub struct ClientPayload {
    pub name: PersonName,
    pub email: Option<EmailAddress>,
    pub phone: Option<PhoneNumber>,
    pub address: Option<StreetAddress>,
    pub active: bool,
}

impl TryFrom<ClientForm> for ClientPayload {
    type Error = FormError;

    fn try_from(form: ClientForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let name = PersonName::new(form.name).map_err(|_| FormError::InvalidName)?;
        let email = non_blank(form.email)
            .map(EmailAddress::new)
            .transpose()
            .map_err(|_| FormError::InvalidEmail)?;
        let phone = non_blank(form.phone)
            .map(PhoneNumber::new)
            .transpose()
            .map_err(|_| FormError::InvalidPhoneNumber)?;
        let address = non_blank(form.address)
            .map(StreetAddress::new)
            .transpose()
            .map_err(|_| FormError::InvalidAddress)?;

        Ok(Self {
            name,
            email,
            phone,
            address,
            active: form.active,
        })
    }
}

impl ClientPayload {
    pub fn into_new_client(self) -> NewClient {
        NewClient {
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            active: self.active,
        }
    }

    pub fn into_update(self) -> UpdateClient {
        UpdateClient {
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            active: self.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(email: Option<&str>, phone: Option<&str>) -> ClientForm {
        ClientForm {
            name: " Lucía Fernández ".into(),
            email: email.map(str::to_string),
            phone: phone.map(str::to_string),
            address: Some("   ".into()),
            active: true,
        }
    }

    #[test]
    fn normalizes_contact_fields() {
        let payload =
            ClientPayload::try_from(form(Some(" Lucia@Example.COM "), Some("+34 612 345 678")))
                .unwrap();

        assert_eq!(payload.name.as_str(), "Lucía Fernández");
        assert_eq!(payload.email.unwrap().as_str(), "lucia@example.com");
        assert_eq!(payload.phone.unwrap().as_str(), "+34612345678");
        assert!(payload.address.is_none());
    }

    #[test]
    fn blank_contact_fields_are_optional() {
        let payload = ClientPayload::try_from(form(Some(""), None)).unwrap();
        assert!(payload.email.is_none());
        assert!(payload.phone.is_none());
    }

    #[test]
    fn rejects_malformed_email() {
        let result = ClientPayload::try_from(form(Some("not-an-email"), None));
        assert!(matches!(result, Err(FormError::InvalidEmail)));
    }

    #[test]
    fn empty_name_fails_validation() {
        let mut form = form(None, None);
        form.name = String::new();

        let err = ClientPayload::try_from(form).err().unwrap();
        let fields = err.field_errors();
        assert_eq!(
            fields.get("name"),
            Some(&vec!["El nombre es obligatorio".to_string()])
        );
    }
}
