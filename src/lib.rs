//! Request descriptor model for declarative HTTP API clients.
//!
//! A [`RequestDescriptor`] accumulates everything a declarative layer knows
//! about one logical request — path template, query/path/header parameters,
//! headers from three distinct sources, an optional body — without encoding,
//! validating, or merging any of it. The [`Executor`] then realizes the
//! finalized descriptor into a concrete HTTP request: it substitutes path
//! placeholders, URL-encodes the query string, merges the header collections
//! with their precedence rules, serializes the body, and honors the
//! descriptor's cancellation signal.
//!
//! ```
//! use stencil::{CancelSignal, Method, RequestDescriptor};
//!
//! let mut descriptor = RequestDescriptor::new(Method::GET, "/users/{id}", CancelSignal::never());
//! descriptor.add_path_parameter("id", 42);
//! descriptor.add_query_parameter("tag", vec!["a", "b"]);
//! descriptor.add_interface_header("Accept: application/json");
//!
//! assert_eq!(descriptor.path_params(), &[("id".to_string(), Some("42".to_string()))]);
//! assert_eq!(descriptor.query_params().len(), 2);
//! ```

pub mod cancel;
pub mod constants;
pub mod descriptor;
pub mod error;
pub mod executor;
pub mod logging;

pub use cancel::{CancelHandle, CancelSignal};
pub use descriptor::{BodyEncoding, BodyParameter, BodyValue, ParamValue, RequestDescriptor};
pub use error::Error;
pub use executor::{Executor, HttpResponse};
pub use reqwest::Method;
