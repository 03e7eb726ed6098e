//! In-memory model of a single abstract HTTP request.
//!
//! A [`RequestDescriptor`] is created fresh for every logical call, populated
//! synchronously through its `add_*`/`set_*` methods, then handed to the
//! executor read-only. It records exactly what was requested — in order, with
//! duplicates — and performs no encoding, validation, or conflict resolution
//! of its own.

use std::fmt;

use reqwest::Method;

use crate::cancel::CancelSignal;

/// A parameter value, resolved into one of three shapes before it reaches
/// the descriptor.
///
/// The shape decides multiplicity: a [`Text`](ParamValue::Text) value is a
/// single entry even though strings are iterable character sequences, while a
/// [`Sequence`](ParamValue::Sequence) expands into one query entry per
/// element. Conversions from `&str`, numbers, `bool`, `Option<T>`, and
/// `Vec<T: Display>` are provided so call sites stay terse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// No value was supplied.
    Absent,
    /// A single textual value. Never expanded element-wise.
    Text(String),
    /// A single non-textual scalar, stringified on conversion.
    Scalar(String),
    /// A sequence of already-stringified scalars. `None` marks an absent
    /// element.
    Sequence(Vec<Option<String>>),
}

impl ParamValue {
    /// Builds a [`ParamValue::Sequence`] from any iterator of displayable
    /// items.
    pub fn sequence<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: fmt::Display,
    {
        Self::Sequence(items.into_iter().map(|item| Some(item.to_string())).collect())
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

macro_rules! scalar_values {
    ($($ty:ty),* $(,)?) => {
        $(impl From<$ty> for ParamValue {
            fn from(value: $ty) -> Self {
                Self::Scalar(value.to_string())
            }
        })*
    };
}

scalar_values!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

impl<T: fmt::Display> From<Vec<T>> for ParamValue {
    fn from(items: Vec<T>) -> Self {
        Self::sequence(items)
    }
}

impl<T: fmt::Display> From<&[T]> for ParamValue {
    fn from(items: &[T]) -> Self {
        Self::sequence(items)
    }
}

impl<T: fmt::Display, const N: usize> From<[T; N]> for ParamValue {
    fn from(items: [T; N]) -> Self {
        Self::sequence(items)
    }
}

/// Serialization strategy tag for a request body.
///
/// The descriptor stores the tag opaquely; only the executor interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    /// Serialize the payload as JSON.
    Json,
    /// Serialize the payload as a URL-encoded form.
    UrlEncoded,
    /// Pass the payload through verbatim.
    Raw,
}

/// Opaque request body payload. The descriptor never inspects it; its
/// concrete shape is resolved by the executor's serializer.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyValue {
    /// A structured value, encoded according to the body's [`BodyEncoding`].
    Json(serde_json::Value),
    /// Pre-encoded text.
    Text(String),
    /// Pre-encoded bytes.
    Bytes(Vec<u8>),
}

impl From<serde_json::Value> for BodyValue {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl From<String> for BodyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for BodyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Vec<u8>> for BodyValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

/// The single optional request body: a serialization tag plus an opaque
/// owned payload.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyParameter {
    /// How the executor should encode the payload.
    pub encoding: BodyEncoding,
    /// The payload itself.
    pub value: BodyValue,
}

/// One logical request, accumulated from declarative metadata.
///
/// Three header collections are deliberately kept separate: headers declared
/// on the API interface, headers declared on the individual method, and
/// headers passed as per-call arguments. Merging them — and resolving
/// same-name conflicts — is the executor's job, and keeping provenance here
/// is what makes its precedence rules implementable.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    method: Method,
    path: String,
    cancellation: CancelSignal,
    query_params: Vec<(String, Option<String>)>,
    path_params: Vec<(String, Option<String>)>,
    interface_headers: Vec<String>,
    method_headers: Vec<String>,
    header_params: Vec<(String, Option<String>)>,
    body: Option<BodyParameter>,
}

impl RequestDescriptor {
    /// Creates a descriptor for one logical call.
    ///
    /// `path` may contain `{name}` placeholders; their syntax is not checked
    /// here — the executor resolves and validates them.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>, cancellation: CancelSignal) -> Self {
        Self {
            method,
            path: path.into(),
            cancellation,
            query_params: Vec::new(),
            path_params: Vec::new(),
            interface_headers: Vec::new(),
            method_headers: Vec::new(),
            header_params: Vec::new(),
            body: None,
        }
    }

    /// Records a query parameter.
    ///
    /// A [`ParamValue::Sequence`] expands into one `(name, value)` pair per
    /// element, in element order, with absent elements recorded as empty
    /// strings. Every other shape appends exactly one pair. Nothing is
    /// escaped or deduplicated; call order is final order.
    pub fn add_query_parameter(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        let name = name.into();
        match value.into() {
            ParamValue::Absent => self.query_params.push((name, None)),
            ParamValue::Text(value) | ParamValue::Scalar(value) => {
                self.query_params.push((name, Some(value)));
            }
            ParamValue::Sequence(items) => {
                for item in items {
                    self.query_params.push((name.clone(), Some(item.unwrap_or_default())));
                }
            }
        }
    }

    /// Records a path parameter. Always appends exactly one pair.
    ///
    /// Unlike query parameters, a sequence is not expanded — a path
    /// placeholder is singular, so the sequence is rendered whole in its
    /// bracketed display form (`[a, b]`).
    pub fn add_path_parameter(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        let value = match value.into() {
            ParamValue::Absent => None,
            ParamValue::Text(value) | ParamValue::Scalar(value) => Some(value),
            ParamValue::Sequence(items) => {
                let rendered: Vec<&str> =
                    items.iter().map(|item| item.as_deref().unwrap_or_default()).collect();
                Some(format!("[{}]", rendered.join(", ")))
            }
        };
        self.path_params.push((name.into(), value));
    }

    /// Appends a raw `"Name: Value"` header declared on the API interface.
    /// The token is stored unparsed and unvalidated.
    pub fn add_interface_header(&mut self, header: impl Into<String>) {
        self.interface_headers.push(header.into());
    }

    /// Appends a raw `"Name: Value"` header declared on the method.
    pub fn add_method_header(&mut self, header: impl Into<String>) {
        self.method_headers.push(header.into());
    }

    /// Records a per-call header argument. The value is taken as the caller
    /// passed it — header parameters are pre-stringified upstream.
    pub fn add_header_parameter(&mut self, name: impl Into<String>, value: impl Into<Option<String>>) {
        self.header_params.push((name.into(), value.into()));
    }

    /// Records the request body. A later call replaces an earlier one — the
    /// last body set is the one the executor sees.
    pub fn set_body(&mut self, encoding: BodyEncoding, value: impl Into<BodyValue>) {
        if self.body.is_some() {
            tracing::debug!(
                target: "stencil::descriptor",
                "Replacing previously recorded request body"
            );
        }
        self.body = Some(BodyParameter { encoding, value: value.into() });
    }

    /// HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path template, possibly containing `{name}` placeholders.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The cancellation signal threaded through for the executor. The
    /// descriptor itself never observes it.
    #[must_use]
    pub const fn cancellation(&self) -> &CancelSignal {
        &self.cancellation
    }

    /// Recorded query parameters, in insertion order.
    #[must_use]
    pub fn query_params(&self) -> &[(String, Option<String>)] {
        &self.query_params
    }

    /// Recorded path parameters, in insertion order.
    #[must_use]
    pub fn path_params(&self) -> &[(String, Option<String>)] {
        &self.path_params
    }

    /// Raw headers declared on the API interface, in insertion order.
    #[must_use]
    pub fn interface_headers(&self) -> &[String] {
        &self.interface_headers
    }

    /// Raw headers declared on the method, in insertion order.
    #[must_use]
    pub fn method_headers(&self) -> &[String] {
        &self.method_headers
    }

    /// Per-call header arguments, in insertion order.
    #[must_use]
    pub fn header_params(&self) -> &[(String, Option<String>)] {
        &self.header_params
    }

    /// The recorded body, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&BodyParameter> {
        self.body.as_ref()
    }
}
