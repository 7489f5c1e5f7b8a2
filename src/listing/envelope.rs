//! Normalization of list responses into one canonical [`Page`].
//!
//! Endpoints answer either with `{ data, pagination }` or with a bare
//! array. Both are turned into a `Page` right after the network call so the
//! controller never looks at the wire shape.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::listing::error::FetchError;
use crate::listing::query::ListRequest;
use crate::pagination::{PageEnvelope, PageMeta};

/// One page of a remote collection.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_items: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl<T> Page<T> {
    fn from_parts(items: Vec<T>, meta: PageMeta) -> Self {
        Self {
            items,
            total_items: meta.total,
            total_pages: meta.total_pages,
            current_page: meta.page,
            has_next_page: meta.has_next_page,
            has_prev_page: meta.has_prev_page,
        }
    }

    /// Slices a complete collection down to the requested page.
    pub fn paginate_locally(all: Vec<T>, request: &ListRequest) -> Self {
        let meta = PageMeta::new(all.len(), request.page, request.limit);
        let skip = (meta.page - 1).saturating_mul(request.limit);
        let items = all.into_iter().skip(skip).take(request.limit).collect();
        Self::from_parts(items, meta)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Converts a successful response body into a page.
pub fn normalize<T: DeserializeOwned>(
    body: Value,
    request: &ListRequest,
) -> Result<Page<T>, FetchError> {
    let wrapped = matches!(
        &body,
        Value::Object(map) if map.contains_key("data") && map.contains_key("pagination")
    );

    if body.is_array() {
        let all: Vec<T> = serde_json::from_value(body).map_err(|err| {
            log::warn!("List items did not match the expected shape: {err}");
            FetchError::UnexpectedFormat
        })?;
        Ok(Page::paginate_locally(all, request))
    } else if wrapped {
        let envelope: PageEnvelope<T> = serde_json::from_value(body).map_err(|err| {
            log::warn!("Paged envelope did not match the expected shape: {err}");
            FetchError::UnexpectedFormat
        })?;
        Ok(Page::from_parts(envelope.data, envelope.pagination))
    } else {
        log::warn!("Unexpected list response: {}", kind_of(&body));
        Err(FetchError::UnexpectedFormat)
    }
}

/// Interprets a raw HTTP outcome: error statuses become
/// [`FetchError::Server`], success bodies are normalized.
pub fn decode_response<T: DeserializeOwned>(
    status: u16,
    body: &[u8],
    request: &ListRequest,
) -> Result<Page<T>, FetchError> {
    if !(200..300).contains(&status) {
        return Err(FetchError::from_error_body(status, body));
    }

    let value: Value = serde_json::from_slice(body).map_err(|err| {
        log::warn!("List response is not JSON: {err}");
        FetchError::UnexpectedFormat
    })?;

    normalize(value, request)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object without data/pagination",
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use super::*;
    use crate::listing::query::PageSize;

    fn request(page: usize, size: PageSize) -> ListRequest {
        ListRequest::new(page, size, "", &BTreeMap::new())
    }

    #[test]
    fn wrapped_envelope_is_taken_verbatim() {
        let body = json!({
            "data": [1, 2],
            "pagination": {
                "total": 12,
                "page": 2,
                "totalPages": 2,
                "hasNextPage": false,
                "hasPrevPage": true
            }
        });

        let page: Page<u32> = normalize(body, &request(2, PageSize::Ten)).unwrap();

        assert_eq!(page.items, vec![1, 2]);
        assert_eq!(page.total_items, 12);
        assert_eq!(page.total_pages, 2);
        assert!(page.has_prev_page);
        assert!(!page.has_next_page);
    }

    #[test]
    fn flat_array_is_paginated_locally() {
        let body = json!([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);

        let page: Page<u32> = normalize(body, &request(3, PageSize::Five)).unwrap();

        assert_eq!(page.items, vec![11, 12]);
        assert_eq!(page.total_items, 12);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 3);
        assert!(!page.has_next_page);
        assert!(page.has_prev_page);
    }

    #[test]
    fn flat_array_past_the_end_is_empty() {
        let page: Page<u32> = normalize(json!([1, 2]), &request(4, PageSize::Five)).unwrap();

        assert!(page.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn other_shapes_are_unexpected() {
        let result: Result<Page<u32>, _> =
            normalize(json!({"items": []}), &request(1, PageSize::Ten));
        assert_eq!(result, Err(FetchError::UnexpectedFormat));

        let result: Result<Page<u32>, _> = normalize(json!(["x"]), &request(1, PageSize::Ten));
        assert_eq!(result, Err(FetchError::UnexpectedFormat));
    }

    #[test]
    fn error_status_becomes_server_error() {
        let result: Result<Page<u32>, _> = decode_response(
            403,
            r#"{"message":"No tienes permisos para esta acción"}"#.as_bytes(),
            &request(1, PageSize::Ten),
        );

        assert_eq!(
            result,
            Err(FetchError::Server {
                status: 403,
                message: "No tienes permisos para esta acción".into()
            })
        );
    }
}
