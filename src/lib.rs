//! # chatnet
//!
//! HTTP support primitives for chat-protocol client libraries.
//!
//! Chat clients tend to keep many HTTP requests in flight at once (long
//! polls, media uploads, API calls) and need to tear all of them down the
//! moment the session ends. `chatnet` provides the small, sharp pieces that
//! make that workable:
//!
//! - **Request tracking**: [`HttpConns`] holds every in-flight request for a
//!   session and cancels them en masse on logout or disconnect.
//! - **Parameter bags**: [`HttpParams`] builds and parses URL-encoded query
//!   strings with typed accessors and component-style percent-encoding.
//! - **URL comparison**: [`urls_equivalent`] decides whether two URLs point
//!   at the same endpoint structurally, for redirect and endpoint-change
//!   detection.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatnet::HttpParams;
//!
//! let mut params = HttpParams::new();
//! params.set_str("access_token", "abc=123");
//! params.set_int("limit", 50);
//! let url = params.close(Some("https://chat.example.com/api/threads"));
//! assert!(url.starts_with("https://chat.example.com/api/threads?"));
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Core error definitions
//! - [`http`] - Request tracking, parameter bags, and URL comparison
//!
//! The actual transport is a collaborator, not part of this crate: requests
//! are registered as opaque [`RequestHandle`]s that know how to abort
//! themselves, and the registry never blocks on cancellation delivery.
//!
//! [`HttpConns`]: http::conns::HttpConns
//! [`HttpParams`]: http::params::HttpParams
//! [`urls_equivalent`]: http::urlcmp::urls_equivalent
//! [`RequestHandle`]: http::conns::RequestHandle

pub mod base;
pub mod http;

pub use base::error::HttpError;
pub use http::conns::{AbortReason, AbortRequest, HttpConns, RequestHandle, TaskHandle};
pub use http::params::HttpParams;
pub use http::urlcmp::urls_equivalent;
