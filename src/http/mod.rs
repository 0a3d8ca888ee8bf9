pub mod conns;
pub mod params;
pub mod urlcmp;

// Re-exports for convenience
pub use conns::{AbortReason, AbortRequest, HttpConns, RequestHandle, TaskHandle};
pub use params::HttpParams;
pub use urlcmp::urls_equivalent;
