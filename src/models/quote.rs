use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::quote::{NewQuote as DomainNewQuote, Quote as DomainQuote};
use crate::domain::types::{
    Cents, EmailAddress, PersonName, PhoneNumber, PublicId, QuoteId, SanitizedText,
    TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::quotes)]
/// Diesel model for [`crate::domain::quote::Quote`].
pub struct Quote {
    pub id: i32,
    pub public_id: Vec<u8>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub description: String,
    pub status: String,
    pub estimate_cents: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::quotes)]
pub struct NewQuote<'a> {
    pub public_id: &'a [u8],
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub description: &'a str,
    pub status: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::quotes)]
#[diesel(treat_none_as_null = true)]
pub struct ReviewQuote<'a> {
    pub status: &'a str,
    pub estimate_cents: Option<i64>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Quote> for DomainQuote {
    type Error = TypeConstraintError;

    fn try_from(quote: Quote) -> Result<Self, Self::Error> {
        Ok(Self {
            id: QuoteId::new(quote.id)?,
            public_id: PublicId::from_bytes(&quote.public_id)?,
            name: PersonName::new(quote.name)?,
            email: EmailAddress::new(quote.email)?,
            phone: quote.phone.map(PhoneNumber::new).transpose()?,
            description: SanitizedText::new(quote.description)?,
            status: quote.status.parse()?,
            estimate: quote.estimate_cents.map(Cents::new).transpose()?,
            created_at: quote.created_at,
            updated_at: quote.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewQuote> for NewQuote<'a> {
    fn from(quote: &'a DomainNewQuote) -> Self {
        Self {
            public_id: quote.public_id.as_bytes(),
            name: quote.name.as_str(),
            email: quote.email.as_str(),
            phone: quote.phone.as_ref().map(PhoneNumber::as_str),
            description: quote.description.as_str(),
            status: "pending",
        }
    }
}
