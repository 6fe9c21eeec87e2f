//! # HTTP-shaped messages and their envelope codec
//!
//! The bridge does not speak HTTP on the wire; it carries an HTTP-shaped
//! request or response inside a single envelope value. The map field names
//! below are the wire contract shared with the callee-side adapter.
//!
//! ## Invariants
//!
//! - Encoding is infallible: every field is representable in the envelope.
//! - Decoding validates shape and range; a well-formed message decodes back
//!   to exactly the message that was encoded (order included).

use crate::Error;
use crate::Result;
use crate::Value;

const FIELD_METHOD: &str = "method";
const FIELD_URI: &str = "uri";
const FIELD_STATUS: &str = "status";
const FIELD_HEADERS: &str = "headers";
const FIELD_BODY: &str = "body";

/// An HTTP-shaped request: what the caller hands to the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    pub uri: String,
    /// Ordered header pairs. Names are compared case-insensitively on lookup
    /// but stored as given.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Request {
    /// Creates a request with no headers and an empty body.
    pub fn new(method: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            uri: uri.into(),
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Appends a header pair.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Replaces the body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }
}

/// An HTTP-shaped response: what the bridge hands back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    /// Creates a response with no headers and an empty body.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Appends a header pair.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Replaces the body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Looks up the first header with the given name, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Encodes a request into the single boundary-crossing envelope argument.
pub fn encode_request(req: &Request) -> Value {
    Value::Map(vec![
        (FIELD_METHOD.into(), Value::Str(req.method.clone())),
        (FIELD_URI.into(), Value::Str(req.uri.clone())),
        (FIELD_HEADERS.into(), encode_headers(&req.headers)),
        (FIELD_BODY.into(), Value::Bytes(req.body.clone())),
    ])
}

/// Decodes a request from an envelope value.
pub fn decode_request(value: &Value) -> Result<Request> {
    let entries = value.as_map()?;
    Ok(Request {
        method: field(entries, FIELD_METHOD)?.as_str()?.to_string(),
        uri: field(entries, FIELD_URI)?.as_str()?.to_string(),
        headers: decode_headers(field(entries, FIELD_HEADERS)?)?,
        body: field(entries, FIELD_BODY)?.as_bytes()?.to_vec(),
    })
}

/// Encodes a response into an envelope value.
pub fn encode_response(resp: &Response) -> Value {
    Value::Map(vec![
        (FIELD_STATUS.into(), Value::U64(u64::from(resp.status))),
        (FIELD_HEADERS.into(), encode_headers(&resp.headers)),
        (FIELD_BODY.into(), Value::Bytes(resp.body.clone())),
    ])
}

/// Decodes a response from an envelope value.
///
/// This is the shape check the invocation engine relies on: anything that is
/// not a well-formed response map is rejected here, in one place.
pub fn decode_response(value: &Value) -> Result<Response> {
    let entries = value.as_map()?;

    let status = field(entries, FIELD_STATUS)?.as_u64()?;
    if !(100..=999).contains(&status) {
        return Err(Error::OutOfRange { field: FIELD_STATUS, value: status });
    }

    Ok(Response {
        status: status as u16,
        headers: decode_headers(field(entries, FIELD_HEADERS)?)?,
        body: field(entries, FIELD_BODY)?.as_bytes()?.to_vec(),
    })
}

fn encode_headers(headers: &[(String, String)]) -> Value {
    Value::Map(
        headers
            .iter()
            .map(|(name, value)| (name.clone(), Value::Str(value.clone())))
            .collect(),
    )
}

fn decode_headers(value: &Value) -> Result<Vec<(String, String)>> {
    let entries = value.as_map()?;
    entries
        .iter()
        .map(|(name, value)| Ok((name.clone(), value.as_str()?.to_string())))
        .collect()
}

fn field<'a>(entries: &'a [(String, Value)], name: &str) -> Result<&'a Value> {
    entries
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v)
        .ok_or_else(|| Error::MissingField(name.to_string()))
}
