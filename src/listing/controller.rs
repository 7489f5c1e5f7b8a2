//! The per-view list controller.
//!
//! A [`ListController`] owns the query state of one admin list (search text,
//! structured filters, page and page size) and turns every meaningful change
//! into at most one [`FetchTicket`]. It performs no I/O: the caller sends the
//! ticket's request, then hands the outcome back through
//! [`ListController::complete`] together with the ticket's sequence number.
//! Outcomes for anything but the latest ticket are dropped.

use std::collections::BTreeMap;
use std::time::Instant;

use serde::de::DeserializeOwned;

use crate::listing::debounce::{Debouncer, SEARCH_DEBOUNCE};
use crate::listing::envelope::{Page, decode_response};
use crate::listing::error::{FetchError, ListError};
use crate::listing::notice::{Notice, NoticeLevel, Notices};
use crate::listing::pages::ListConfig;
use crate::listing::query::{FilterValue, ListRequest, PageSize};
use crate::pagination::page_window;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FetchStatus {
    #[default]
    Idle,
    Fetching,
    Succeeded,
    Failed,
}

/// A fetch the caller must dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub endpoint: &'static str,
    pub request: ListRequest,
}

impl FetchTicket {
    /// Endpoint path with the encoded query appended.
    pub fn uri(&self) -> Result<String, serde_html_form::ser::Error> {
        Ok(format!("{}?{}", self.endpoint, self.request.to_query_string()?))
    }
}

/// What [`ListController::complete`] did with an outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// Stale or arrived after teardown.
    Discarded,
    /// The collection shrank below the current page; the last page must be
    /// fetched instead.
    Redirected(FetchTicket),
}

pub struct ListController<T> {
    config: &'static ListConfig,
    search: Debouncer<String>,
    filters: BTreeMap<String, FilterValue>,
    page: usize,
    page_size: PageSize,
    status: FetchStatus,
    last_request: Option<ListRequest>,
    latest_seq: u64,
    in_flight: Option<u64>,
    result: Option<Page<T>>,
    error: Option<FetchError>,
    notices: Notices,
    torn_down: bool,
}

impl<T> ListController<T> {
    /// Creates a controller with default query state, optionally seeding
    /// the search text. No fetch is issued until [`Self::start`].
    pub fn new(config: &'static ListConfig, seed_search: Option<&str>) -> Self {
        let seed = seed_search.unwrap_or_default().trim().to_string();

        Self {
            config,
            search: Debouncer::new(seed, SEARCH_DEBOUNCE),
            filters: config
                .filters
                .iter()
                .map(|spec| (spec.name.to_string(), FilterValue::Any))
                .collect(),
            page: 1,
            page_size: config.default_page_size,
            status: FetchStatus::Idle,
            last_request: None,
            latest_seq: 0,
            in_flight: None,
            result: None,
            error: None,
            notices: Notices::default(),
            torn_down: false,
        }
    }

    /// Issues the initial fetch.
    pub fn start(&mut self) -> Option<FetchTicket> {
        self.compose(false)
    }

    /// Records a keystroke. The query changes only once the text settles.
    pub fn set_search_text(&mut self, text: impl Into<String>, now: Instant) {
        if self.torn_down {
            return;
        }
        self.search.input(text.into(), now);
    }

    /// Advances timers: expires notices and applies settled search text.
    pub fn tick(&mut self, now: Instant) -> Option<FetchTicket> {
        self.notices.prune(now);
        if self.torn_down {
            return None;
        }

        let previous = self.search.settled().trim().to_string();
        let settled = self.search.poll(now)?;
        if settled.trim() == previous {
            return None;
        }
        self.page = 1;
        self.compose(false)
    }

    /// Applies the typed text immediately, skipping the quiet window.
    pub fn submit_search(&mut self) -> Option<FetchTicket> {
        if self.torn_down {
            return None;
        }
        let previous = self.search.settled().trim().to_string();
        if let Some(settled) = self.search.flush()
            && settled.trim() != previous
        {
            self.page = 1;
        }
        self.compose(false)
    }

    /// Replaces both raw and applied search text at once.
    pub fn reset_search(&mut self, text: &str) -> Option<FetchTicket> {
        if self.torn_down {
            return None;
        }
        let changed = self.search.settled().trim() != text.trim();
        self.search.reset(text.to_string());
        if !changed {
            return None;
        }
        self.page = 1;
        self.compose(false)
    }

    pub fn set_filter(
        &mut self,
        name: &str,
        value: impl Into<FilterValue>,
    ) -> Result<Option<FetchTicket>, ListError> {
        self.set_filters([(name, value.into())])
    }

    /// Applies several filter changes as one transition.
    ///
    /// Every entry is validated before any is applied.
    pub fn set_filters<'a, I>(&mut self, changes: I) -> Result<Option<FetchTicket>, ListError>
    where
        I: IntoIterator<Item = (&'a str, FilterValue)>,
    {
        let mut normalized = Vec::new();
        for (name, value) in changes {
            normalized.push((name, self.config.filter(name)?.normalize(value)?));
        }
        if self.torn_down {
            return Ok(None);
        }

        let mut changed = false;
        for (name, value) in normalized {
            let slot = self.filters.entry(name.to_string()).or_default();
            if *slot != value {
                *slot = value;
                changed = true;
            }
        }

        if !changed {
            return Ok(None);
        }
        self.page = 1;
        Ok(self.compose(false))
    }

    pub fn clear_filters(&mut self) -> Option<FetchTicket> {
        if self.torn_down || self.filters.values().all(FilterValue::is_any) {
            return None;
        }
        self.filters.values_mut().for_each(|value| *value = FilterValue::Any);
        self.page = 1;
        self.compose(false)
    }

    /// Moves to page `n` of the last reported result.
    ///
    /// Out of range targets and the current page are ignored.
    pub fn go_to_page(&mut self, n: usize) -> Option<FetchTicket> {
        let total_pages = self.result.as_ref()?.total_pages;
        if self.torn_down || n < 1 || n > total_pages || n == self.page {
            return None;
        }
        self.page = n;
        self.compose(false)
    }

    pub fn next_page(&mut self) -> Option<FetchTicket> {
        if !self.can_go_next() {
            return None;
        }
        self.go_to_page(self.page + 1)
    }

    pub fn prev_page(&mut self) -> Option<FetchTicket> {
        if !self.can_go_prev() {
            return None;
        }
        self.go_to_page(self.page - 1)
    }

    pub fn can_go_next(&self) -> bool {
        self.result
            .as_ref()
            .is_some_and(|page| page.has_next_page && self.page < page.total_pages)
    }

    pub fn can_go_prev(&self) -> bool {
        self.page > 1 && self.result.as_ref().is_some_and(|page| page.has_prev_page)
    }

    pub fn change_page_size(&mut self, size: PageSize) -> Option<FetchTicket> {
        if self.torn_down || size == self.page_size {
            return None;
        }
        self.page_size = size;
        self.page = 1;
        self.compose(false)
    }

    /// Re-issues the last composed request after a failure.
    pub fn retry(&mut self) -> Option<FetchTicket> {
        if self.torn_down || self.status != FetchStatus::Failed {
            return None;
        }
        let request = self.last_request.clone()?;
        Some(self.issue(request))
    }

    /// Re-fetches the current query even if it did not change.
    pub fn refresh(&mut self) -> Option<FetchTicket> {
        self.compose(true)
    }

    /// Re-fetches after a row was deleted, stepping back a page when the
    /// deleted row was the only one on a page past the first.
    pub fn item_deleted(
        &mut self,
        message: impl Into<String>,
        now: Instant,
    ) -> Option<FetchTicket> {
        if self.torn_down {
            return None;
        }
        let emptied = self
            .result
            .as_ref()
            .is_some_and(|page| page.items.len() == 1);
        if emptied && self.page > 1 {
            self.page -= 1;
        }
        self.notices.push(NoticeLevel::Success, message, now);
        self.compose(true)
    }

    pub fn mutation_succeeded(
        &mut self,
        message: impl Into<String>,
        now: Instant,
    ) -> Option<FetchTicket> {
        if self.torn_down {
            return None;
        }
        self.notices.push(NoticeLevel::Success, message, now);
        self.compose(true)
    }

    pub fn mutation_failed(&mut self, error: &FetchError, now: Instant) {
        if self.torn_down {
            return;
        }
        self.notices.push(NoticeLevel::Error, error.to_string(), now);
    }

    pub fn push_notice(&mut self, level: NoticeLevel, message: impl Into<String>, now: Instant) {
        self.notices.push(level, message, now);
    }

    pub fn dismiss_notice(&mut self, index: usize) -> Option<Notice> {
        self.notices.dismiss(index)
    }

    /// Applies the outcome of the fetch numbered `seq`.
    pub fn complete(&mut self, seq: u64, outcome: Result<Page<T>, FetchError>) -> Completion {
        if self.torn_down || self.in_flight != Some(seq) {
            log::debug!(
                "Discarding {} response #{seq}; latest is #{}",
                self.config.name,
                self.latest_seq
            );
            return Completion::Discarded;
        }
        self.in_flight = None;

        match outcome {
            Ok(page) => {
                let shrunk = page.total_pages > 0 && page.total_pages < self.page;
                let last_page = page.total_pages;
                self.result = Some(page);
                self.error = None;

                if shrunk {
                    self.page = last_page;
                    if let Some(ticket) = self.compose(false) {
                        return Completion::Redirected(ticket);
                    }
                }
                self.status = FetchStatus::Succeeded;
            }
            Err(err) => {
                match &err {
                    FetchError::UnexpectedFormat => {
                        log::warn!("Unexpected response shape from {}", self.config.endpoint)
                    }
                    _ => log::warn!("Fetching {} failed: {err}", self.config.endpoint),
                }
                self.error = Some(err);
                self.status = FetchStatus::Failed;
            }
        }

        Completion::Applied
    }

    /// Stops the controller. Pending timers are cancelled and every later
    /// response is discarded.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.search.cancel();
        self.in_flight = None;
        self.notices.clear();
    }

    /// Earliest instant at which [`Self::tick`] has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.search.deadline(), self.notices.next_expiry()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Page numbers for the navigator; `None` marks a gap.
    pub fn page_links(&self) -> Vec<Option<usize>> {
        let total_pages = self.result.as_ref().map_or(0, |page| page.total_pages);
        page_window(total_pages, self.page, 2, 2, 4, 2)
    }

    /// The request the current query state maps to.
    pub fn request(&self) -> ListRequest {
        ListRequest::new(
            self.page,
            self.page_size,
            self.search.settled(),
            &self.filters,
        )
    }

    pub fn config(&self) -> &'static ListConfig {
        self.config
    }

    pub fn search_text(&self) -> &str {
        self.search.raw()
    }

    pub fn debounced_search(&self) -> &str {
        self.search.settled()
    }

    pub fn filters(&self) -> &BTreeMap<String, FilterValue> {
        &self.filters
    }

    pub fn filter(&self, name: &str) -> Option<&FilterValue> {
        self.filters.get(name)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Fetching
    }

    pub fn result(&self) -> Option<&Page<T>> {
        self.result.as_ref()
    }

    pub fn items(&self) -> &[T] {
        self.result.as_ref().map_or(&[], |page| page.items.as_slice())
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    pub fn notices(&self) -> &[Notice] {
        self.notices.active()
    }

    pub fn last_request(&self) -> Option<&ListRequest> {
        self.last_request.as_ref()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn compose(&mut self, force: bool) -> Option<FetchTicket> {
        if self.torn_down {
            return None;
        }
        let request = self.request();
        if !force && self.last_request.as_ref() == Some(&request) {
            return None;
        }
        Some(self.issue(request))
    }

    fn issue(&mut self, request: ListRequest) -> FetchTicket {
        self.latest_seq += 1;
        self.in_flight = Some(self.latest_seq);
        self.status = FetchStatus::Fetching;
        self.error = None;
        self.last_request = Some(request.clone());

        log::debug!(
            "Fetching {} #{} page {} limit {}",
            self.config.name,
            self.latest_seq,
            request.page,
            request.limit
        );

        FetchTicket {
            seq: self.latest_seq,
            endpoint: self.config.endpoint,
            request,
        }
    }
}

impl<T: DeserializeOwned> ListController<T> {
    /// Decodes a raw HTTP outcome for ticket `seq` and applies it.
    pub fn complete_response(&mut self, seq: u64, status: u16, body: &[u8]) -> Completion {
        let request = match &self.last_request {
            Some(request) if self.in_flight == Some(seq) && !self.torn_down => request.clone(),
            _ => {
                log::debug!("Discarding stale {} response #{seq}", self.config.name);
                return Completion::Discarded;
            }
        };
        let outcome = decode_response(status, body, &request);
        self.complete(seq, outcome)
    }
}
