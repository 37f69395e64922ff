//! Data layer for an FAQ administration client.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps a client-side
//! page of FAQ records in sync with the backend through `FaqStore`.
//!
//! # Design
//! - `FaqClient` is stateless; it holds only `base_url`.
//! - Each endpoint is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `FaqStore` executes round-trips through an injected `Transport` and
//!   notifies subscribers on every state change.
//! - `validation` and `view` are pure helpers for forms and list screens.
//! - DTOs are defined independently from the mock-server crate; the live
//!   integration test catches schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod store;
pub mod transport;
pub mod types;
pub mod validation;
pub mod view;

pub use client::FaqClient;
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, StoreError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use store::{FaqCollectionState, FaqStore, PendingList, SubscriptionId};
pub use transport::{Transport, UreqTransport};
pub use types::{AggregateCounts, FaqPatch, FaqRecord, StatusFilter, DEFAULT_LIMIT, DEFAULT_PAGE};
pub use validation::{validate, validate_field, FaqForm, Field, ValidationErrors};
