use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::client::{
    Client as DomainClient, NewClient as DomainNewClient, UpdateClient as DomainUpdateClient,
};
use crate::domain::types::{
    ClientId, EmailAddress, PersonName, PhoneNumber, StreetAddress, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::clients)]
/// Diesel model for [`crate::domain::client::Client`].
pub struct Client {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
/// Insertable form of [`Client`].
pub struct NewClient<'a> {
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub active: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::clients)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating a [`Client`] record.
pub struct UpdateClient<'a> {
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub active: bool,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Client> for DomainClient {
    type Error = TypeConstraintError;

    fn try_from(client: Client) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ClientId::new(client.id)?,
            name: PersonName::new(client.name)?,
            email: client.email.map(EmailAddress::new).transpose()?,
            phone: client.phone.map(PhoneNumber::new).transpose()?,
            address: client.address.map(StreetAddress::new).transpose()?,
            active: client.active,
            created_at: client.created_at,
            updated_at: client.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewClient> for NewClient<'a> {
    fn from(client: &'a DomainNewClient) -> Self {
        Self {
            name: client.name.as_str(),
            email: client.email.as_ref().map(EmailAddress::as_str),
            phone: client.phone.as_ref().map(PhoneNumber::as_str),
            address: client.address.as_ref().map(StreetAddress::as_str),
            active: client.active,
        }
    }
}

impl<'a> UpdateClient<'a> {
    pub fn new(client: &'a DomainUpdateClient, updated_at: NaiveDateTime) -> Self {
        Self {
            name: client.name.as_str(),
            email: client.email.as_ref().map(EmailAddress::as_str),
            phone: client.phone.as_ref().map(PhoneNumber::as_str),
            address: client.address.as_ref().map(StreetAddress::as_str),
            active: client.active,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_domain_new() -> DomainNewClient {
        DomainNewClient::new(
            PersonName::new("Juana").unwrap(),
            Some(EmailAddress::new("juana@example.com").unwrap()),
            None,
            Some(StreetAddress::new("Av. Italia 1020").unwrap()),
        )
    }

    #[test]
    fn from_domain_new_creates_newclient() {
        let domain = sample_domain_new();
        let new: NewClient = (&domain).into();
        assert_eq!(new.name, "Juana");
        assert_eq!(new.email, Some("juana@example.com"));
        assert_eq!(new.phone, None);
        assert_eq!(new.address, Some("Av. Italia 1020"));
        assert!(new.active);
    }

    #[test]
    fn client_into_domain() {
        let now: NaiveDateTime = Utc::now().naive_utc();
        let db_client = Client {
            id: 1,
            name: "n".to_string(),
            email: Some("E@x.com".to_string()),
            phone: None,
            address: Some("a".to_string()),
            active: false,
            created_at: now,
            updated_at: now,
        };
        let domain = DomainClient::try_from(db_client).unwrap();
        assert_eq!(domain.id.get(), 1);
        assert_eq!(domain.name.as_str(), "n");
        assert_eq!(domain.email.map(String::from), Some("e@x.com".to_string()));
        assert!(!domain.active);
        assert_eq!(domain.created_at, now);
    }

    #[test]
    fn invalid_row_is_rejected() {
        let now: NaiveDateTime = Utc::now().naive_utc();
        let db_client = Client {
            id: 0,
            name: "n".to_string(),
            email: None,
            phone: None,
            address: None,
            active: true,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(
            DomainClient::try_from(db_client),
            Err(TypeConstraintError::NonPositiveId)
        );
    }
}
