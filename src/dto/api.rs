//! Query strings and response bodies of the `/api/v1` endpoints.

use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::quote::{Quote, QuoteStatus};
use crate::domain::types::{Cents, PublicId};
use crate::forms::FormError;
use crate::pagination::clamp_page_size;

/// Filter value meaning "no constraint".
pub const ALL_SENTINEL: &str = "all";

/// Normalized paging and search window of a list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListWindow {
    pub page: usize,
    pub per_page: usize,
    pub search: Option<String>,
}

impl ListWindow {
    pub fn new(page: Option<usize>, limit: Option<usize>, search: Option<&str>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: clamp_page_size(limit),
            search: search
                .map(str::trim)
                .filter(|term| !term.is_empty())
                .map(str::to_string),
        }
    }
}

macro_rules! list_params {
    ($(#[$meta:meta])* $name:ident { $($filter:ident),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Default, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            pub page: Option<usize>,
            pub limit: Option<usize>,
            pub search_term: Option<String>,
            $(pub $filter: Option<String>,)*
        }

        impl $name {
            pub fn window(&self) -> ListWindow {
                ListWindow::new(self.page, self.limit, self.search_term.as_deref())
            }
        }
    };
}

list_params!(
    /// `GET /api/v1/clients`
    ClientsQuery { active }
);
list_params!(
    /// `GET /api/v1/employees`
    EmployeesQuery { role, active }
);
list_params!(
    /// `GET /api/v1/materials`
    MaterialsQuery { category, active }
);
list_params!(
    /// `GET /api/v1/quotes` and `GET /api/v1/me/quotes`
    QuotesQuery { status }
);
list_params!(
    /// `GET /api/v1/jobs`
    JobsQuery { status, employee_id, client_id }
);

/// Returns the filter value unless it is blank or the `all` sentinel.
pub fn filter_value(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty() && !value.eq_ignore_ascii_case(ALL_SENTINEL))
}

pub fn parse_filter<T: FromStr>(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<T>, FormError> {
    filter_value(raw)
        .map(|value| value.parse::<T>().map_err(|_| FormError::InvalidChoice(field)))
        .transpose()
}

pub fn parse_flag(field: &'static str, raw: Option<&str>) -> Result<Option<bool>, FormError> {
    filter_value(raw)
        .map(|value| match value.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(FormError::InvalidChoice(field)),
        })
        .transpose()
}

/// Public view of a quote returned by the tracking endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteTracking {
    pub public_id: PublicId,
    pub status: QuoteStatus,
    pub estimate: Option<Cents>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Quote> for QuoteTracking {
    fn from(quote: Quote) -> Self {
        Self {
            public_id: quote.public_id,
            status: quote.status,
            estimate: quote.estimate,
            created_at: quote.created_at,
            updated_at: quote.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::employee::EmployeeRole;

    #[test]
    fn window_clamps_page_and_limit() {
        let window = ListWindow::new(Some(0), Some(7), Some("  "));
        assert_eq!(
            window,
            ListWindow {
                page: 1,
                per_page: 10,
                search: None
            }
        );

        let window = ListWindow::new(Some(3), Some(50), Some(" john "));
        assert_eq!(window.page, 3);
        assert_eq!(window.per_page, 50);
        assert_eq!(window.search.as_deref(), Some("john"));
    }

    #[test]
    fn all_sentinel_and_blank_mean_no_filter() {
        assert_eq!(filter_value(Some("all")), None);
        assert_eq!(filter_value(Some("")), None);
        assert_eq!(filter_value(Some("active")), Some("active"));
        assert_eq!(parse_flag("active", Some("ALL")).unwrap(), None);
    }

    #[test]
    fn parses_typed_filters() {
        let role: Option<EmployeeRole> = parse_filter("role", Some("carpenter")).unwrap();
        assert_eq!(role, Some(EmployeeRole::Carpenter));
        assert!(parse_filter::<EmployeeRole>("role", Some("boss")).is_err());
        assert_eq!(parse_flag("active", Some("false")).unwrap(), Some(false));
    }

    #[test]
    fn query_string_uses_search_term() {
        let query: JobsQuery =
            serde_json::from_value(serde_json::json!({"searchTerm": "sofá", "employeeId": "3"}))
                .unwrap();
        assert_eq!(query.search_term.as_deref(), Some("sofá"));
        assert_eq!(query.employee_id.as_deref(), Some("3"));
    }
}
