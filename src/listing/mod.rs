//! Debounced, paginated, filtered list synchronization.
//!
//! Every admin list page (clients, employees, materials, quotes, jobs) is a
//! [`ListController`] driven by one of the [`pages`] configurations.

pub mod controller;
pub mod debounce;
pub mod envelope;
pub mod error;
pub mod notice;
pub mod pages;
pub mod query;

pub use controller::{Completion, FetchStatus, FetchTicket, ListController};
pub use envelope::{Page, decode_response, normalize};
pub use error::{FetchError, ListError};
pub use notice::{Notice, NoticeLevel};
pub use pages::{FilterKind, FilterSpec, ListConfig};
pub use query::{FilterValue, ListRequest, PageSize};
