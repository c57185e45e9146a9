//! Back-office admin API client
//!
//! Authenticated HTTP adapter for the broker back-office REST API:
//! cookie-session transport, optional bearer tokens, CSRF header
//! injection, and paged list sources for the `pagegrid` table engine.

pub mod action;
pub mod auth;
pub mod error;
pub mod list;
pub mod response;

mod client;

pub use action::ActionOutcome;
pub use client::*;
pub use error::ApiError;
pub use list::RemoteSource;
pub use response::Body;
pub use response::ListPayload;
