//! Repository implementation for quote requests.

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    domain::{
        quote::{NewQuote, Quote, QuoteReview},
        types::{PublicId, QuoteId},
    },
    models::quote::{NewQuote as DbNewQuote, Quote as DbQuote, ReviewQuote as DbReviewQuote},
    repository::{
        DieselRepository, QuoteListQuery, QuoteReader, QuoteWriter,
        errors::{RepositoryError, RepositoryResult},
        like_pattern,
    },
};

impl QuoteReader for DieselRepository {
    fn get_quote_by_id(&self, id: QuoteId) -> RepositoryResult<Option<Quote>> {
        use crate::schema::quotes;

        let mut conn = self.conn()?;
        let db_quote = quotes::table
            .find(id.get())
            .first::<DbQuote>(&mut conn)
            .optional()?;

        Ok(db_quote.map(Quote::try_from).transpose()?)
    }

    fn get_quote_by_public_id(&self, public_id: PublicId) -> RepositoryResult<Option<Quote>> {
        use crate::schema::quotes;

        let mut conn = self.conn()?;
        let db_quote = quotes::table
            .filter(quotes::public_id.eq(public_id.as_bytes().to_vec()))
            .first::<DbQuote>(&mut conn)
            .optional()?;

        Ok(db_quote.map(Quote::try_from).transpose()?)
    }

    fn list_quotes(&self, query: QuoteListQuery) -> RepositoryResult<(usize, Vec<Quote>)> {
        use crate::schema::quotes;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = quotes::table.into_boxed::<Sqlite>();

            if let Some(status) = query.status {
                items = items.filter(quotes::status.eq(status.as_str()));
            }

            if let Some(email) = &query.email {
                items = items.filter(quotes::email.eq(email.as_str().to_string()));
            }

            if let Some(term) = &query.search {
                let pattern = like_pattern(term);
                items = items.filter(
                    quotes::name
                        .like(pattern.clone())
                        .escape('\\')
                        .or(quotes::email.like(pattern.clone()).escape('\\'))
                        .or(quotes::description.like(pattern).escape('\\')),
                );
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        // Newest requests first.
        let quotes = items
            .order(quotes::created_at.desc())
            .then_order_by(quotes::id.desc())
            .load::<DbQuote>(&mut conn)?
            .into_iter()
            .map(Quote::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total, quotes))
    }
}

impl QuoteWriter for DieselRepository {
    fn create_quote(&self, new_quote: &NewQuote) -> RepositoryResult<Quote> {
        use crate::schema::quotes;

        let mut conn = self.conn()?;
        let insertable: DbNewQuote = new_quote.into();

        let db_quote = diesel::insert_into(quotes::table)
            .values(&insertable)
            .get_result::<DbQuote>(&mut conn)?;

        Ok(Quote::try_from(db_quote)?)
    }

    fn review_quote(&self, id: QuoteId, review: &QuoteReview) -> RepositoryResult<Quote> {
        use crate::schema::quotes;

        let mut conn = self.conn()?;
        let changeset = DbReviewQuote {
            status: review.status.as_str(),
            estimate_cents: review.estimate.map(|estimate| estimate.get()),
            updated_at: Utc::now().naive_utc(),
        };

        let db_quote = diesel::update(quotes::table.find(id.get()))
            .set(&changeset)
            .get_result::<DbQuote>(&mut conn)?;

        Ok(Quote::try_from(db_quote)?)
    }

    fn delete_quote(&self, id: QuoteId) -> RepositoryResult<()> {
        use crate::schema::quotes;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(quotes::table.find(id.get())).execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
