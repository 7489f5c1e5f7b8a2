//! Quote (cotización) workflows: public submission, tracking and admin review.

use crate::auth::AuthenticatedUser;
use crate::domain::quote::{NewQuote, Quote, QuoteReview, QuoteStatus};
use crate::domain::types::{EmailAddress, PublicId, QuoteId};
use crate::dto::api::{QuoteTracking, QuotesQuery, parse_filter};
use crate::forms::quote::{QuoteRequestForm, ReviewQuoteForm};
use crate::pagination::PageEnvelope;
use crate::repository::{QuoteListQuery, QuoteReader, QuoteWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::{PORTAL_ADMIN_ROLE, PORTAL_CLIENT_ROLE};

/// Stores a quote request sent from the landing page. No authentication.
pub fn submit_quote<R>(repo: &R, form: QuoteRequestForm) -> ServiceResult<Quote>
where
    R: QuoteWriter + ?Sized,
{
    let new_quote = NewQuote::try_from(form)?;

    let quote = repo.create_quote(&new_quote)?;
    log::info!("Quote {} received from {}", quote.public_id, quote.email);

    Ok(quote)
}

/// Looks a quote up by the tracking code handed to the visitor.
pub fn track_quote<R>(repo: &R, public_id: &str) -> ServiceResult<QuoteTracking>
where
    R: QuoteReader + ?Sized,
{
    let public_id: PublicId = public_id.parse().map_err(|_| ServiceError::NotFound)?;

    repo.get_quote_by_public_id(public_id)?
        .map(QuoteTracking::from)
        .ok_or(ServiceError::NotFound)
}

fn build_query(params: &QuotesQuery) -> ServiceResult<(QuoteListQuery, usize, usize)> {
    let window = params.window();
    let mut query = QuoteListQuery::default().paginate(window.page, window.per_page);

    if let Some(term) = window.search {
        query = query.search(term);
    }
    if let Some(status) = parse_filter::<QuoteStatus>("status", params.status.as_deref())? {
        query = query.status(status);
    }

    Ok((query, window.page, window.per_page))
}

pub fn list_quotes<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: QuotesQuery,
) -> ServiceResult<PageEnvelope<Quote>>
where
    R: QuoteReader + ?Sized,
{
    ensure_role(user, PORTAL_ADMIN_ROLE)?;

    let (query, page, per_page) = build_query(&params)?;
    let (total, quotes) = repo.list_quotes(query)?;

    Ok(PageEnvelope::new(quotes, total, page, per_page))
}

/// Lists the quotes requested with the signed-in client's email.
pub fn list_my_quotes<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: QuotesQuery,
) -> ServiceResult<PageEnvelope<Quote>>
where
    R: QuoteReader + ?Sized,
{
    ensure_role(user, PORTAL_CLIENT_ROLE)?;

    let email = EmailAddress::new(user.email.as_str())?;
    let (query, page, per_page) = build_query(&params)?;
    let (total, quotes) = repo.list_quotes(query.email(email))?;

    Ok(PageEnvelope::new(quotes, total, page, per_page))
}

/// Records the admin decision on a quote.
pub fn review_quote<R>(
    repo: &R,
    user: &AuthenticatedUser,
    quote_id: i32,
    form: ReviewQuoteForm,
) -> ServiceResult<Quote>
where
    R: QuoteReader + QuoteWriter + ?Sized,
{
    ensure_role(user, PORTAL_ADMIN_ROLE)?;

    let quote_id = QuoteId::new(quote_id).map_err(|_| ServiceError::NotFound)?;
    let review = QuoteReview::try_from(form)?;

    let quote = repo
        .get_quote_by_id(quote_id)?
        .ok_or(ServiceError::NotFound)?;

    if !quote.status.can_become(review.status) {
        return Err(ServiceError::Form(format!(
            "No se puede pasar de «{}» a «{}»",
            quote.status, review.status
        )));
    }

    Ok(repo.review_quote(quote_id, &review)?)
}

pub fn delete_quote<R>(repo: &R, user: &AuthenticatedUser, quote_id: i32) -> ServiceResult<()>
where
    R: QuoteWriter + ?Sized,
{
    ensure_role(user, PORTAL_ADMIN_ROLE)?;

    let quote_id = QuoteId::new(quote_id).map_err(|_| ServiceError::NotFound)?;
    repo.delete_quote(quote_id)?;

    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::domain::types::{PersonName, SanitizedText};
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{admin_user, client_user};

    fn sample_quote(status: QuoteStatus) -> Quote {
        Quote {
            id: QuoteId::new(5).expect("valid id"),
            public_id: PublicId::new(),
            name: PersonName::new("Ana").expect("valid name"),
            email: EmailAddress::new("ana@example.com").expect("valid email"),
            phone: None,
            description: SanitizedText::new("Butaca orejera").expect("valid text"),
            status,
            estimate: None,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn submission_needs_no_user() {
        let mut repo = MockRepository::new();
        repo.expect_create_quote()
            .withf(|new_quote| new_quote.email.as_str() == "ana@example.com")
            .times(1)
            .returning(|_| Ok(sample_quote(QuoteStatus::Pending)));

        let form = QuoteRequestForm {
            name: "Ana".into(),
            email: "ANA@example.com".into(),
            phone: None,
            description: "Retapizar dos sillas de comedor".into(),
        };

        let quote = submit_quote(&repo, form).expect("should submit");
        assert_eq!(quote.status, QuoteStatus::Pending);
    }

    #[test]
    fn malformed_tracking_code_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_quote_by_public_id().times(0);

        let result = track_quote(&repo, "not-a-uuid");

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn client_sees_only_own_quotes() {
        let mut repo = MockRepository::new();
        repo.expect_list_quotes()
            .withf(|query| query.email.as_ref().map(|e| e.as_str()) == Some("ana@example.com"))
            .times(1)
            .returning(|_| Ok((1, vec![sample_quote(QuoteStatus::Reviewed)])));

        let envelope = list_my_quotes(
            &repo,
            &client_user("Ana@Example.com"),
            QuotesQuery::default(),
        )
        .expect("should list");

        assert_eq!(envelope.pagination.total, 1);
    }

    #[test]
    fn final_quote_cannot_be_reopened() {
        let mut repo = MockRepository::new();
        repo.expect_get_quote_by_id()
            .times(1)
            .returning(|_| Ok(Some(sample_quote(QuoteStatus::Approved))));
        repo.expect_review_quote().times(0);

        let form = ReviewQuoteForm {
            status: "rejected".into(),
            estimate: None,
        };
        let result = review_quote(&repo, &admin_user(), 5, form);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn review_stores_estimate() {
        let mut repo = MockRepository::new();
        repo.expect_get_quote_by_id()
            .times(1)
            .returning(|_| Ok(Some(sample_quote(QuoteStatus::Pending))));
        repo.expect_review_quote()
            .withf(|id, review| {
                id.get() == 5
                    && review.status == QuoteStatus::Reviewed
                    && review.estimate.map(|cents| cents.get()) == Some(32_000)
            })
            .times(1)
            .returning(|_, _| Ok(sample_quote(QuoteStatus::Reviewed)));

        let form = ReviewQuoteForm {
            status: "reviewed".into(),
            estimate: Some(32_000),
        };

        review_quote(&repo, &admin_user(), 5, form).expect("should review");
    }
}
