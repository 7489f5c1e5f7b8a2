use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    Cents, EmailAddress, PersonName, PhoneNumber, PublicId, QuoteId, SanitizedText,
    TypeConstraintError,
};

/// Quote (cotización) requested from the public landing page.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: QuoteId,
    pub public_id: PublicId,
    pub name: PersonName,
    pub email: EmailAddress,
    pub phone: Option<PhoneNumber>,
    pub description: SanitizedText,
    pub status: QuoteStatus,
    pub estimate: Option<Cents>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    #[default]
    Pending,
    Reviewed,
    Approved,
    Rejected,
}

impl QuoteStatus {
    pub const ALL: [QuoteStatus; 4] = [
        QuoteStatus::Pending,
        QuoteStatus::Reviewed,
        QuoteStatus::Approved,
        QuoteStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::Pending => "pending",
            QuoteStatus::Reviewed => "reviewed",
            QuoteStatus::Approved => "approved",
            QuoteStatus::Rejected => "rejected",
        }
    }

    /// Approved and rejected quotes are final.
    pub fn can_become(self, next: QuoteStatus) -> bool {
        match self {
            QuoteStatus::Approved | QuoteStatus::Rejected => self == next,
            QuoteStatus::Pending | QuoteStatus::Reviewed => next != QuoteStatus::Pending,
        }
    }
}

impl Display for QuoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuoteStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuoteStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("unknown status `{s}`")))
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewQuote {
    pub public_id: PublicId,
    pub name: PersonName,
    pub email: EmailAddress,
    pub phone: Option<PhoneNumber>,
    pub description: SanitizedText,
}

impl NewQuote {
    #[must_use]
    pub fn new(
        name: PersonName,
        email: EmailAddress,
        phone: Option<PhoneNumber>,
        description: SanitizedText,
    ) -> Self {
        Self {
            public_id: PublicId::new(),
            name,
            email,
            phone,
            description,
        }
    }
}

/// Admin review of a quote.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteReview {
    pub status: QuoteStatus,
    pub estimate: Option<Cents>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn final_statuses_do_not_move() {
        assert!(!QuoteStatus::Approved.can_become(QuoteStatus::Rejected));
        assert!(QuoteStatus::Approved.can_become(QuoteStatus::Approved));
        assert!(!QuoteStatus::Rejected.can_become(QuoteStatus::Pending));
    }

    #[test]
    fn open_statuses_move_forward_only() {
        assert!(QuoteStatus::Pending.can_become(QuoteStatus::Reviewed));
        assert!(QuoteStatus::Reviewed.can_become(QuoteStatus::Approved));
        assert!(!QuoteStatus::Reviewed.can_become(QuoteStatus::Pending));
    }
}
