//! # Appbridge
//!
//! The caller-side half of an inter-application call bridge: it turns an
//! HTTP-shaped request into a single cross-process dynamic invocation against
//! an already-activated remote endpoint, and turns the result back into an
//! HTTP-shaped response.
//!
//! ## Control flow
//!
//! - [`CallerProxy::connect`](proxy::CallerProxy::connect) activates the
//!   endpoint and resolves its call surface — or yields nothing at all.
//! - [`CallerProxy::invoke`](proxy::CallerProxy::invoke) performs one
//!   request/response exchange; every failure comes back as a degraded
//!   `Response`, never as an error.
//! - [`CallerProxy::close`](proxy::CallerProxy::close) is idempotent
//!   best-effort teardown.
//!
//! Activation and dispatch are external collaborators behind the traits in
//! [`target`]; the envelope itself lives in the `propset` crate.

pub mod proxy;
pub mod registry;
pub mod status;
pub mod target;

pub use propset::Value;
pub use propset::http::Request;
pub use propset::http::Response;
