use serde::Deserialize;
use validator::Validate;

use crate::domain::quote::{NewQuote, QuoteReview, QuoteStatus};
use crate::domain::types::{Cents, EmailAddress, PersonName, PhoneNumber, SanitizedText};
use crate::forms::{FormError, non_blank};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Quote request submitted from the landing page.
pub struct QuoteRequestForm {
    #[validate(length(min = 1, max = 200, message = "El nombre es obligatorio"))]
    pub name: String,
    #[validate(email(message = "Correo electrónico inválido"))]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[validate(length(min = 10, max = 4000, message = "Describe el mueble (mínimo 10 caracteres)"))]
    pub description: String,
}

impl TryFrom<QuoteRequestForm> for NewQuote {
    type Error = FormError;

    fn try_from(form: QuoteRequestForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let name = PersonName::new(form.name).map_err(|_| FormError::InvalidName)?;
        let email = EmailAddress::new(form.email).map_err(|_| FormError::InvalidEmail)?;
        let phone = non_blank(form.phone)
            .map(PhoneNumber::new)
            .transpose()
            .map_err(|_| FormError::InvalidPhoneNumber)?;
        let description =
            SanitizedText::new(form.description).map_err(|_| FormError::InvalidDescription)?;

        Ok(NewQuote::new(name, email, phone, description))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Admin review of a quote request.
pub struct ReviewQuoteForm {
    pub status: String,
    /// Estimated price in cents.
    #[serde(default)]
    pub estimate: Option<i64>,
}

impl TryFrom<ReviewQuoteForm> for QuoteReview {
    type Error = FormError;

    fn try_from(form: ReviewQuoteForm) -> Result<Self, Self::Error> {
        let status: QuoteStatus = form
            .status
            .parse()
            .map_err(|_| FormError::InvalidChoice("status"))?;
        let estimate = form
            .estimate
            .map(Cents::new)
            .transpose()
            .map_err(|_| FormError::InvalidAmount("estimate"))?;

        Ok(QuoteReview { status, estimate })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_markup_is_stripped() {
        let form = QuoteRequestForm {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            phone: Some(String::new()),
            description: "Sofá de 3 plazas <script>alert(1)</script>con cojines".into(),
        };

        let quote = NewQuote::try_from(form).unwrap();
        assert_eq!(quote.description.as_str(), "Sofá de 3 plazas con cojines");
        assert!(quote.phone.is_none());
    }

    #[test]
    fn short_description_is_a_field_error() {
        let form = QuoteRequestForm {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            phone: None,
            description: "silla".into(),
        };

        let err = NewQuote::try_from(form).err().unwrap();
        assert!(err.field_errors().contains_key("description"));
    }

    #[test]
    fn review_parses_status_and_estimate() {
        let review = QuoteReview::try_from(ReviewQuoteForm {
            status: "approved".into(),
            estimate: Some(45_000),
        })
        .unwrap();

        assert_eq!(review.status, QuoteStatus::Approved);
        assert_eq!(review.estimate.map(Cents::get), Some(45_000));
    }
}
