//! Typed client for the Contentful content management API.
//!
//! # Overview
//! Spaces, content types, entries and editor appearances can be created,
//! read, updated, deleted, published and archived. Requests are built and
//! responses parsed as plain data (`HttpRequest` / `HttpResponse`); a
//! `Transport` performs the exchange, so the core stays deterministic and
//! testable.
//!
//! # Design
//! - `CmaClient` is stateless: `build_*` produces a request, `parse_*`
//!   consumes a response. Local validation (missing version, draft links)
//!   fails in `build_*`, before any network call.
//! - `CmaSession` pairs a client with a transport and a worker pool. Its
//!   operations return a `Call`, run either blocking (`send`) or in the
//!   background with the callback delivered to a `CallbackContext`
//!   (`enqueue`).
//! - Entry fields map field id to locale to `FieldValue`. Links between
//!   entries are stored by id, so mutually linked entries serialize without
//!   recursion.
//! - Resources are borrowed while requests are built. Results come back as
//!   new values, so a failed call leaves the caller's copy untouched.

pub mod call;
pub mod client;
pub mod codec;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod links;
pub mod logging;
pub mod model;
pub mod modules;
pub mod session;
pub mod transport;

pub use call::Call;
pub use client::CmaClient;
pub use config::ClientConfig;
pub use dispatch::CallbackContext;
pub use error::{CmaError, CmaResult, DRAFT_LINK_MESSAGE};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use model::{
    Appearance, ArrayItems, CmaArray, ContentType, Entry, Field, FieldType, FieldValue, Link, LinkType, Space,
    Sys, Widget, WidgetId,
};
pub use session::CmaSession;
pub use transport::Transport;

#[cfg(feature = "ureq-transport")]
pub use transport::UreqTransport;
