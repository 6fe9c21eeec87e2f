//! # Status Mapper
//!
//! Converts dispatch-level failures into degraded HTTP-shaped responses.
//! Every per-call failure becomes an ordinary `Response` value; nothing in
//! this module can fail.

use propset::http::Response;

/// Diagnostic header carrying the decimal stringified raw failure code.
/// Present on transport-failure responses only.
pub const HEADER_RAW_CODE: &str = "hresult";

/// The dispatch itself failed: unreachable target, remote fault, marshaling
/// rejection. The raw code travels in the diagnostic header.
pub fn service_unavailable(raw_code: u32) -> Response {
    Response::new(503).with_header(HEADER_RAW_CODE, raw_code.to_string())
}

/// The dispatch succeeded but the callee returned an unexpected shape.
/// Deliberately bare: there is no raw code to report.
pub fn internal_error() -> Response {
    Response::new(500)
}
