use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, EmailAddress, PersonName, PhoneNumber, StreetAddress};

/// Customer of the workshop.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: ClientId,
    pub name: PersonName,
    pub email: Option<EmailAddress>,
    pub phone: Option<PhoneNumber>,
    pub address: Option<StreetAddress>,
    pub active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    pub name: PersonName,
    pub email: Option<EmailAddress>,
    pub phone: Option<PhoneNumber>,
    pub address: Option<StreetAddress>,
    pub active: bool,
}

impl NewClient {
    #[must_use]
    pub fn new(
        name: PersonName,
        email: Option<EmailAddress>,
        phone: Option<PhoneNumber>,
        address: Option<StreetAddress>,
    ) -> Self {
        Self {
            name,
            email,
            phone,
            address,
            active: true,
        }
    }
}

/// Full replacement of the editable client fields.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClient {
    pub name: PersonName,
    pub email: Option<EmailAddress>,
    pub phone: Option<PhoneNumber>,
    pub address: Option<StreetAddress>,
    pub active: bool,
}
