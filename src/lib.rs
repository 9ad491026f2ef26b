//! A fluent builder for assembling HTTP requests and running them through a transport.
//!
//! ```no_run
//! # async fn demo() -> Result<(), fluent_request::RequestError> {
//! use fluent_request::{FluentRequest, HTTPRequestMethod};
//!
//! let response = FluentRequest::new()
//!     .with_method(HTTPRequestMethod::Post)
//!     .with_url("https://jsonplaceholder.typicode.com/posts")
//!     .with_headers([("Content-Type", ["application/json"])])
//!     .with_body(r#"{"a":1}"#)
//!     .run()
//!     .await?;
//! println!("{}", response.status());
//! # Ok(())
//! # }
//! ```
#![allow(clippy::module_name_repetitions)]

pub mod http_handler;
pub mod logger;

pub use chrono;

pub use http_handler::client_config::ClientConfig;
pub use http_handler::http_client::{BoxError, HTTPClient, Transport};
pub use http_handler::http_request::fluent_request::FluentRequest;
pub use http_handler::http_request::request_common::{
    HTTPRequestMethod, InvalidRequestKind, RequestError,
};
