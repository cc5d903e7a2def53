//! HTTP client module
//!
//! Thin `reqwest` wrapper used by the document-store repositories.
//!
//! # Features
//!
//! - **Base URL joining**: requests take paths relative to the store root
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Authentication**: Integration with auth module
//!
//! Requests are sent once. Failures surface to the caller unchanged.

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
