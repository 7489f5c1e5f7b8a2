use serde::Deserialize;
use validator::Validate;

use crate::domain::employee::{EmployeeRole, NewEmployee};
use crate::domain::types::{EmailAddress, PersonName, PhoneNumber};
use crate::forms::{FormError, non_blank};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Body of `POST /employees` and `PUT /employees/{id}`.
pub struct EmployeeForm {
    #[validate(length(min = 1, max = 200, message = "El nombre es obligatorio"))]
    pub name: String,
    #[validate(email(message = "Correo electrónico inválido"))]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

pub struct EmployeePayload {
    pub name: PersonName,
    pub email: EmailAddress,
    pub phone: Option<PhoneNumber>,
    pub role: EmployeeRole,
    pub active: bool,
}

impl TryFrom<EmployeeForm> for EmployeePayload {
    type Error = FormError;

    fn try_from(form: EmployeeForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            name: PersonName::new(form.name).map_err(|_| FormError::InvalidName)?,
            email: EmailAddress::new(form.email).map_err(|_| FormError::InvalidEmail)?,
            phone: non_blank(form.phone)
                .map(PhoneNumber::new)
                .transpose()
                .map_err(|_| FormError::InvalidPhoneNumber)?,
            role: form
                .role
                .parse()
                .map_err(|_| FormError::InvalidChoice("role"))?,
            active: form.active,
        })
    }
}

impl From<EmployeePayload> for NewEmployee {
    fn from(payload: EmployeePayload) -> Self {
        NewEmployee {
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            role: payload.role,
            active: payload.active,
        }
    }
}
