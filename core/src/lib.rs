//! Dispatch core for the remote time-tracking service's REST API.
//!
//! # Overview
//! Turns a structured operation invocation (operation name plus argument
//! bag) into a single authenticated HTTP request, and turns the response —
//! or failure — back into a uniform result envelope. The protocol transport
//! that receives invocation messages sits outside this crate; it only needs
//! [`Dispatcher::dispatch`] and the catalog enumeration in [`catalog`].
//!
//! # Design
//! - `Dispatcher` plans a plain-data [`Request`] per operation (pure,
//!   unit-testable), then `ApiClient` executes it with credential header
//!   injection and outcome classification.
//! - Configuration is an explicit immutable [`Config`] value; nothing reads
//!   the environment after construction, so tests inject fakes.
//! - Every failure is classified into one of four kinds and converted to a
//!   failure [`Envelope`] at the dispatcher boundary; callers never see raw
//!   errors.
//! - No retries, no caching, no timeout enforcement: each dispatch issues
//!   exactly one request.

pub mod catalog;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod envelope;
pub mod error;
pub mod filter;
pub mod http;
pub mod query;

pub use client::ApiClient;
pub use config::Config;
pub use dispatch::{Args, Dispatcher};
pub use envelope::Envelope;
pub use error::{Error, ErrorKind};
pub use filter::compose_filter;
pub use http::{HttpMethod, Request};
pub use query::build_query;
