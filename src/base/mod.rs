//! Base types and error handling.
//!
//! Provides the foundational error taxonomy shared by the HTTP support
//! module:
//! - [`HttpError`]: parameter lookup, lifecycle, and transport-status errors
//!
//! [`HttpError`]: error::HttpError

pub mod error;
