//! Client core for the course-platform API.
//!
//! # Overview
//! `RequestClient` turns a `RequestSpec` (path, verb, optional JSON body)
//! into an `HttpRequest` against a configured origin, hands it to a
//! `Transport`, and classifies the `HttpResponse` into a parsed JSON value or
//! a `SendError`.
//!
//! # Design
//! - `RequestClient` is stateless apart from its `ClientConfig`.
//! - I/O sits behind the `Transport` trait (host-does-IO). `UreqTransport`
//!   is the blocking implementation behind the default `ureq` feature.
//! - Failures are logged once with `tracing` where they are detected, then
//!   returned; nothing is swallowed or retried.
//! - `menu` holds the pure view-model the course menu UI is driven by.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod menu;
#[cfg(feature = "ureq")]
pub mod transport;
pub mod types;

pub use client::RequestClient;
pub use config::{ClientConfig, SessionToken};
pub use error::{ConfigError, FailureKind, SendError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestMode, Transport};
pub use menu::{MenuEvent, MenuItem, MenuSection};
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use types::{Course, LoginRequest, MessageResponse, RequestSpec};
