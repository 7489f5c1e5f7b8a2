//! Query state of a list view and the request composed from it.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::listing::error::ListError;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, PAGE_SIZES};

/// Number of rows per page offered by the list views.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum PageSize {
    Five,
    #[default]
    Ten,
    Twenty,
    Fifty,
}

impl PageSize {
    pub const ALL: [PageSize; 4] = [
        PageSize::Five,
        PageSize::Ten,
        PageSize::Twenty,
        PageSize::Fifty,
    ];

    pub const fn get(self) -> usize {
        match self {
            PageSize::Five => PAGE_SIZES[0],
            PageSize::Ten => PAGE_SIZES[1],
            PageSize::Twenty => PAGE_SIZES[2],
            PageSize::Fifty => PAGE_SIZES[3],
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = ListError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        PageSize::ALL
            .into_iter()
            .find(|size| size.get() == value)
            .ok_or(ListError::InvalidPageSize(value))
    }
}

impl From<PageSize> for usize {
    fn from(value: PageSize) -> Self {
        value.get()
    }
}

impl Display for PageSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Selected value of one structured filter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FilterValue {
    /// No constraint; omitted from the request.
    #[default]
    Any,
    Text(String),
    Flag(bool),
}

impl FilterValue {
    /// Value sent on the wire, `None` for "no constraint".
    pub fn query_value(&self) -> Option<String> {
        match self {
            FilterValue::Any => None,
            FilterValue::Text(text) => Some(text.clone()),
            FilterValue::Flag(flag) => Some(flag.to_string()),
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, FilterValue::Any)
    }
}

impl From<&str> for FilterValue {
    /// Blank input and the `all` sentinel mean no constraint.
    fn from(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            FilterValue::Any
        } else {
            FilterValue::Text(value.to_string())
        }
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::from(value.as_str())
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Flag(value)
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FilterValue::Any, Into::into)
    }
}

/// The effective remote query: the only thing the endpoint ever sees.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ListRequest {
    pub page: usize,
    pub limit: usize,
    #[serde(rename = "searchTerm", skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    #[serde(flatten)]
    pub filters: BTreeMap<String, String>,
}

impl ListRequest {
    pub fn new(
        page: usize,
        page_size: PageSize,
        search: &str,
        filters: &BTreeMap<String, FilterValue>,
    ) -> Self {
        let search = search.trim();
        Self {
            page: page.max(1),
            limit: page_size.get(),
            search_term: (!search.is_empty()).then(|| search.to_string()),
            filters: filters
                .iter()
                .filter_map(|(name, value)| Some((name.clone(), value.query_value()?)))
                .collect(),
        }
    }

    /// `(name, value)` pairs in wire order: page, limit, searchTerm, filters.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if let Some(term) = &self.search_term {
            pairs.push(("searchTerm".to_string(), term.clone()));
        }
        pairs.extend(
            self.filters
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );
        pairs
    }

    /// URL-encoded query string, without the leading `?`.
    pub fn to_query_string(&self) -> Result<String, serde_html_form::ser::Error> {
        serde_html_form::to_string(self.query_pairs())
    }
}

impl Default for ListRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_ITEMS_PER_PAGE,
            search_term: None,
            filters: BTreeMap::new(),
        }
    }
}
