//! Configurations of the five admin list pages.

use crate::listing::error::ListError;
use crate::listing::query::{FilterValue, PageSize};

/// Values a structured filter accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterKind {
    /// `true` / `false`.
    Flag,
    /// One of a fixed set of wire values.
    Choice(&'static [&'static str]),
    /// Free text, e.g. an identifier.
    Text,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterSpec {
    pub name: &'static str,
    pub kind: FilterKind,
}

impl FilterSpec {
    /// Checks `value` against the filter's kind.
    pub fn accepts(&self, value: &FilterValue) -> Result<(), ListError> {
        let ok = match (self.kind, value) {
            (_, FilterValue::Any) => true,
            (FilterKind::Flag, FilterValue::Flag(_)) => true,
            (FilterKind::Flag, FilterValue::Text(text)) => text == "true" || text == "false",
            (FilterKind::Choice(options), FilterValue::Text(text)) => {
                options.contains(&text.as_str())
            }
            (FilterKind::Choice(_), FilterValue::Flag(_)) => false,
            (FilterKind::Text, _) => true,
        };

        if ok {
            Ok(())
        } else {
            Err(ListError::InvalidFilterValue {
                filter: self.name.to_string(),
                value: value.query_value().unwrap_or_default(),
            })
        }
    }

    /// Validates `value` and returns its canonical form, so equal wire
    /// values compare equal.
    pub fn normalize(&self, value: FilterValue) -> Result<FilterValue, ListError> {
        self.accepts(&value)?;
        Ok(match (self.kind, value) {
            (FilterKind::Flag, FilterValue::Text(text)) => FilterValue::Flag(text == "true"),
            (FilterKind::Text, FilterValue::Flag(flag)) => FilterValue::Text(flag.to_string()),
            (_, value) => value,
        })
    }
}

/// One admin list view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListConfig {
    pub name: &'static str,
    pub endpoint: &'static str,
    pub default_page_size: PageSize,
    pub filters: &'static [FilterSpec],
}

impl ListConfig {
    pub fn filter(&self, name: &str) -> Result<&FilterSpec, ListError> {
        self.filters
            .iter()
            .find(|spec| spec.name == name)
            .ok_or_else(|| ListError::UnknownFilter(name.to_string()))
    }
}

pub const ACTIVE_FILTER: FilterSpec = FilterSpec {
    name: "active",
    kind: FilterKind::Flag,
};

pub const EMPLOYEE_ROLES: &[&str] = &["admin", "upholsterer", "seamstress", "carpenter"];
pub const MATERIAL_CATEGORIES: &[&str] =
    &["fabric", "leather", "foam", "wood", "hardware", "other"];
pub const QUOTE_STATUSES: &[&str] = &["pending", "reviewed", "approved", "rejected"];
pub const JOB_STATUSES: &[&str] = &[
    "pending",
    "in_progress",
    "completed",
    "delivered",
    "cancelled",
];

pub const CLIENTS: ListConfig = ListConfig {
    name: "clients",
    endpoint: "/api/v1/clients",
    default_page_size: PageSize::Ten,
    filters: &[ACTIVE_FILTER],
};

pub const EMPLOYEES: ListConfig = ListConfig {
    name: "employees",
    endpoint: "/api/v1/employees",
    default_page_size: PageSize::Ten,
    filters: &[
        FilterSpec {
            name: "role",
            kind: FilterKind::Choice(EMPLOYEE_ROLES),
        },
        ACTIVE_FILTER,
    ],
};

/// The materials endpoint answers with a bare array.
pub const MATERIALS: ListConfig = ListConfig {
    name: "materials",
    endpoint: "/api/v1/materials",
    default_page_size: PageSize::Ten,
    filters: &[
        FilterSpec {
            name: "category",
            kind: FilterKind::Choice(MATERIAL_CATEGORIES),
        },
        ACTIVE_FILTER,
    ],
};

pub const QUOTES: ListConfig = ListConfig {
    name: "quotes",
    endpoint: "/api/v1/quotes",
    default_page_size: PageSize::Ten,
    filters: &[FilterSpec {
        name: "status",
        kind: FilterKind::Choice(QUOTE_STATUSES),
    }],
};

pub const JOBS: ListConfig = ListConfig {
    name: "jobs",
    endpoint: "/api/v1/jobs",
    default_page_size: PageSize::Ten,
    filters: &[
        FilterSpec {
            name: "status",
            kind: FilterKind::Choice(JOB_STATUSES),
        },
        FilterSpec {
            name: "employeeId",
            kind: FilterKind::Text,
        },
        FilterSpec {
            name: "clientId",
            kind: FilterKind::Text,
        },
    ],
};

pub const ALL_PAGES: [&ListConfig; 5] = [&CLIENTS, &EMPLOYEES, &MATERIALS, &QUOTES, &JOBS];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::employee::EmployeeRole;
    use crate::domain::job::JobStatus;
    use crate::domain::material::MaterialCategory;
    use crate::domain::quote::QuoteStatus;

    #[test]
    fn choice_options_match_domain_values() {
        let roles: Vec<_> = EmployeeRole::ALL.iter().map(|r| r.as_str()).collect();
        let categories: Vec<_> = MaterialCategory::ALL.iter().map(|c| c.as_str()).collect();
        let quote_statuses: Vec<_> = QuoteStatus::ALL.iter().map(|s| s.as_str()).collect();
        let job_statuses: Vec<_> = JobStatus::ALL.iter().map(|s| s.as_str()).collect();

        assert_eq!(roles, EMPLOYEE_ROLES);
        assert_eq!(categories, MATERIAL_CATEGORIES);
        assert_eq!(quote_statuses, QUOTE_STATUSES);
        assert_eq!(job_statuses, JOB_STATUSES);
    }

    #[test]
    fn unknown_filter_is_rejected() {
        assert_eq!(
            CLIENTS.filter("role"),
            Err(ListError::UnknownFilter("role".into()))
        );
        assert!(EMPLOYEES.filter("role").is_ok());
    }

    #[test]
    fn choice_filter_validates_option() {
        let status = JOBS.filter("status").unwrap();
        assert!(status.accepts(&FilterValue::from("in_progress")).is_ok());
        assert!(status.accepts(&FilterValue::Any).is_ok());
        assert!(status.accepts(&FilterValue::from("lost")).is_err());
    }

    #[test]
    fn flag_text_normalizes_to_flag() {
        assert_eq!(
            ACTIVE_FILTER.normalize(FilterValue::from("true")),
            Ok(FilterValue::Flag(true))
        );
        assert_eq!(
            ACTIVE_FILTER.normalize(FilterValue::from("false")),
            Ok(FilterValue::Flag(false))
        );
        assert_eq!(ACTIVE_FILTER.normalize(FilterValue::Any), Ok(FilterValue::Any));
        assert!(ACTIVE_FILTER.normalize(FilterValue::from("yes")).is_err());

        let status = JOBS.filter("status").unwrap();
        assert_eq!(
            status.normalize(FilterValue::from("completed")),
            Ok(FilterValue::from("completed"))
        );
    }

    #[test]
    fn jobs_filter_by_client_and_employee() {
        let client = JOBS.filter("clientId").unwrap();
        assert_eq!(client.kind, FilterKind::Text);
        assert_eq!(client.normalize(FilterValue::from("12")), Ok(FilterValue::from("12")));
        assert!(JOBS.filter("employeeId").is_ok());
    }

    #[test]
    fn endpoints_are_unique() {
        let mut endpoints: Vec<_> = ALL_PAGES.iter().map(|page| page.endpoint).collect();
        endpoints.sort_unstable();
        endpoints.dedup();
        assert_eq!(endpoints.len(), ALL_PAGES.len());
    }
}
