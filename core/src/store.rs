//! Client-side FAQ state and the operations that keep it in sync with the
//! backend.
//!
//! # Design
//! `FaqStore` is constructed explicitly with a `FaqClient` and a
//! `Transport`, owns one `FaqCollectionState`, and notifies subscribers
//! after every change. Every fallible operation both records its
//! normalized message in `last_error` and returns a typed `StoreError`,
//! so hosts can pick whichever channel suits them.
//!
//! List requests carry a monotonically increasing token. Hosts running
//! requests concurrently use `begin_list_page` / `complete_list_page`;
//! a completion older than the latest `begin` is dropped.

use tracing::{debug, warn};

use crate::client::FaqClient;
use crate::error::{ApiError, StoreError};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{AggregateCounts, FaqRecord, StatusFilter};

const FETCH_ALL_FAILED: &str = "Failed to fetch FAQs";
const FETCH_ONE_FAILED: &str = "Failed to fetch FAQ";
const DUPLICATE_CHECK_FAILED: &str = "Failed to check for duplicate FAQ";
const CREATE_FAILED: &str = "Failed to add FAQ";
const UPDATE_FAILED: &str = "Failed to update FAQ";
const DELETE_FAILED: &str = "Failed to delete FAQ";
const TOGGLE_FAILED: &str = "Failed to toggle status";

/// Everything the UI renders from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqCollectionState {
    /// Current page, in server order.
    pub items: Vec<FaqRecord>,
    /// Dataset-wide counts, not page-local.
    pub counts: AggregateCounts,
    /// True only while a list request is outstanding.
    pub is_loading: bool,
    pub last_error: Option<String>,
    pub current_page: u32,
    pub total_pages: u32,
}

impl Default for FaqCollectionState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            counts: AggregateCounts::default(),
            is_loading: false,
            last_error: None,
            current_page: 1,
            total_pages: 1,
        }
    }
}

impl FaqCollectionState {
    pub fn find(&self, id: &str) -> Option<&FaqRecord> {
        self.items.iter().find(|r| r.id.as_deref() == Some(id))
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut FaqRecord> {
        self.items.iter_mut().find(|r| r.id.as_deref() == Some(id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&FaqCollectionState)>;

/// A list request that has been issued but not yet applied.
#[derive(Debug, Clone)]
pub struct PendingList {
    token: u64,
    page: u32,
    request: HttpRequest,
}

impl PendingList {
    pub fn request(&self) -> &HttpRequest {
        &self.request
    }

    pub fn page(&self) -> u32 {
        self.page
    }
}

pub struct FaqStore<T> {
    client: FaqClient,
    transport: T,
    state: FaqCollectionState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    latest_list_token: u64,
}

impl<T: Transport> FaqStore<T> {
    pub fn new(client: FaqClient, transport: T) -> Self {
        Self {
            client,
            transport,
            state: FaqCollectionState::default(),
            listeners: Vec::new(),
            next_subscription: 0,
            latest_list_token: 0,
        }
    }

    pub fn state(&self) -> &FaqCollectionState {
        &self.state
    }

    pub fn client(&self) -> &FaqClient {
        &self.client
    }

    /// Call `listener` with the new state after every change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&FaqCollectionState) + 'static,
    {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    // -----------------------------------------------------------------------
    // List
    // -----------------------------------------------------------------------

    /// Fetch one page and replace `items`, `counts` and `total_pages`.
    pub fn list_page(&mut self, page: u32, limit: u32, filter: StatusFilter) -> Result<(), StoreError> {
        let pending = self.begin_list_page(page, limit, filter);
        let outcome = self.send(pending.request());
        self.complete_list_page(pending, outcome)
    }

    /// Mark the store loading and build the request. Supersedes any list
    /// request still in flight.
    pub fn begin_list_page(&mut self, page: u32, limit: u32, filter: StatusFilter) -> PendingList {
        self.latest_list_token += 1;
        let pending = PendingList {
            token: self.latest_list_token,
            page,
            request: self.client.build_list_page(page, limit, filter),
        };
        self.mutate(|s| {
            s.is_loading = true;
            s.last_error = None;
        });
        pending
    }

    /// Apply the outcome of `pending`. Stale completions leave state alone
    /// and return `Ok`.
    pub fn complete_list_page(
        &mut self,
        pending: PendingList,
        outcome: Result<HttpResponse, ApiError>,
    ) -> Result<(), StoreError> {
        if pending.token != self.latest_list_token {
            debug!(
                token = pending.token,
                latest = self.latest_list_token,
                "discarding stale list response"
            );
            return Ok(());
        }

        match outcome.and_then(|r| self.client.parse_list_page(r)) {
            Ok(page) => {
                debug!(page = pending.page, items = page.items.len(), "list page loaded");
                self.mutate(|s| {
                    s.items = page.items;
                    s.counts = page.counts;
                    s.current_page = pending.page;
                    s.total_pages = page.total_pages;
                    s.is_loading = false;
                    s.last_error = None;
                });
                Ok(())
            }
            Err(e) => {
                let err = StoreError::from_api(e, FETCH_ALL_FAILED);
                warn!(error = %err, "list request failed");
                self.mutate(|s| {
                    s.items.clear();
                    s.counts = AggregateCounts::default();
                    s.is_loading = false;
                    s.last_error = Some(err.message());
                });
                Err(err)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Single record
    // -----------------------------------------------------------------------

    /// Fetch one record, replacing it in place or appending it. `None`
    /// means the fetch failed; see `last_error`.
    pub fn get_by_id(&mut self, id: &str) -> Option<FaqRecord> {
        let request = self.client.build_get_faq(id);
        match self.send(&request).and_then(|r| self.client.parse_get_faq(r)) {
            Ok(record) => {
                let fetched = record.clone();
                self.mutate(|s| {
                    match s.find_mut(id) {
                        Some(existing) => *existing = record,
                        None => s.items.push(record),
                    }
                    s.last_error = None;
                });
                Some(fetched)
            }
            Err(e) => {
                self.fail(StoreError::from_api(e, FETCH_ONE_FAILED));
                None
            }
        }
    }

    /// Whether another record already has `question`. `exclude_id` lets a
    /// record being edited skip itself.
    pub fn check_duplicate(&mut self, question: &str, exclude_id: Option<&str>) -> Result<bool, StoreError> {
        let outcome = self
            .client
            .build_check_duplicate(question, exclude_id)
            .and_then(|req| self.send(&req))
            .and_then(|r| self.client.parse_check_duplicate(r));
        outcome.map_err(|e| self.fail(StoreError::from_api(e, DUPLICATE_CHECK_FAILED)))
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Duplicate-check, then create and append the saved record.
    pub fn create(&mut self, record: &FaqRecord) -> Result<FaqRecord, StoreError> {
        if self.check_duplicate(&record.question, None)? {
            return Err(self.fail(StoreError::Duplicate));
        }

        let outcome = self
            .client
            .build_create_faq(record)
            .and_then(|req| self.send(&req))
            .and_then(|r| self.client.parse_create_faq(r));
        match outcome {
            Ok(saved) => {
                let appended = saved.clone();
                self.mutate(|s| {
                    s.items.push(appended);
                    s.last_error = None;
                });
                Ok(saved)
            }
            Err(e) => Err(self.fail(StoreError::from_api(e, CREATE_FAILED))),
        }
    }

    /// Duplicate-check excluding `id`, then update and merge the returned
    /// fields into the local item.
    pub fn update(&mut self, id: &str, record: &FaqRecord) -> Result<(), StoreError> {
        if self.check_duplicate(&record.question, Some(id))? {
            return Err(self.fail(StoreError::Duplicate));
        }

        let outcome = self
            .client
            .build_update_faq(id, record)
            .and_then(|req| self.send(&req))
            .and_then(|r| self.client.parse_update_faq(r));
        match outcome {
            Ok(patch) => {
                self.mutate(|s| {
                    if let Some(existing) = s.find_mut(id) {
                        existing.merge(patch);
                    }
                    s.last_error = None;
                });
                Ok(())
            }
            Err(e) => Err(self.fail(StoreError::from_api(e, UPDATE_FAILED))),
        }
    }

    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let request = self.client.build_delete_faq(id);
        match self.send(&request).and_then(|r| self.client.parse_delete_faq(r)) {
            Ok(()) => {
                self.mutate(|s| {
                    s.items.retain(|r| r.id.as_deref() != Some(id));
                    s.last_error = None;
                });
                Ok(())
            }
            Err(e) => Err(self.fail(StoreError::from_api(e, DELETE_FAILED))),
        }
    }

    /// Flip the record's status and return the new local status.
    ///
    /// The backend answers with the status the record had *before* the
    /// flip, so the local status is its negation.
    pub fn toggle_status(&mut self, id: &str) -> Result<bool, StoreError> {
        let request = self.client.build_toggle_status(id);
        match self.send(&request).and_then(|r| self.client.parse_toggle_status(r)) {
            Ok(previous) => {
                let current = !previous;
                self.mutate(|s| {
                    if let Some(existing) = s.find_mut(id) {
                        existing.status = current;
                    }
                    s.last_error = None;
                });
                Ok(current)
            }
            Err(e) => Err(self.fail(StoreError::from_api(e, TOGGLE_FAILED))),
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, path = %request.path, "sending request");
        self.transport.execute(request)
    }

    fn fail(&mut self, err: StoreError) -> StoreError {
        warn!(error = %err, "faq operation failed");
        let message = err.message();
        self.mutate(|s| s.last_error = Some(message));
        err
    }

    fn mutate(&mut self, change: impl FnOnce(&mut FaqCollectionState)) {
        change(&mut self.state);
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.state);
        }
    }
}
