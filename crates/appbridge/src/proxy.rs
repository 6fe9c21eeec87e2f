//! # Caller Proxy
//!
//! The caller-side face of the bridge: owns one activated target plus the
//! operation ids resolved on it, and exposes invoke and close. Packs the
//! incoming request into the single envelope argument, dispatches it by id,
//! and classifies whatever comes back.
//!
//! ## Invariants
//!
//! - `call_id` is valid on every live proxy; resolution failure aborts
//!   connect before a proxy exists.
//! - `invoke` always returns a `Response`. Remote-side failures never cross
//!   this boundary as errors.
//! - Once the target is cleared the proxy is permanently closed; nothing
//!   resurrects it.

use tokio::sync::Mutex;
use tracing::debug;
use tracing::warn;

use propset::Value;
use propset::http;
use propset::http::Request;
use propset::http::Response;

use crate::status;
use crate::target::Activator;
use crate::target::DynamicTarget;
use crate::target::EndpointIdentity;
use crate::target::OpId;
use crate::target::raw;

/// The dispatch operation carrying one request/response exchange.
pub const OP_CALL_HTTP: &str = "callhttp";
/// Companion name resolved together with [`OP_CALL_HTTP`]; the pair forms
/// the call surface a conforming callee must expose.
pub const OP_CALL_ARGS: &str = "args";
/// Optional teardown operation.
pub const OP_CLOSE: &str = "close";

/// Caller-side proxy over one activated endpoint.
///
/// Created only by a successful [`connect`](CallerProxy::connect). The proxy
/// is not clonable; share it by reference (or `Arc`) while alive. Dropping it
/// releases the target handle without issuing the remote close call — use
/// [`close`](CallerProxy::close) for a polite shutdown.
pub struct CallerProxy {
    /// The owned target. Locked for the duration of each call, so at most
    /// one dispatch is in flight per proxy. `None` once closed.
    target: Mutex<Option<Box<dyn DynamicTarget>>>,
    call_id: OpId,
    close_id: Option<OpId>,
}

impl CallerProxy {
    /// Activates the endpoint named by `identity` and resolves its call
    /// surface.
    ///
    /// Returns `None` when nothing is listening: activation failed (for any
    /// reason), or the endpoint activated but the mandatory
    /// [`OP_CALL_HTTP`]/[`OP_CALL_ARGS`] pair did not resolve. In the latter
    /// case the activated handle is dropped on the way out. A missing
    /// [`OP_CLOSE`] is tolerated and recorded as an absent capability.
    pub async fn connect(
        activator: &dyn Activator,
        identity: &EndpointIdentity,
    ) -> Option<CallerProxy> {
        let target = match activator.activate(identity).await {
            Ok(target) => target,
            Err(error) => {
                debug!(%identity, %error, "no endpoint");
                return None;
            }
        };

        // The pair resolves all-or-nothing; a partial surface is a
        // protocol-shape mismatch even though activation succeeded.
        let ids = match target.resolve(&[OP_CALL_HTTP, OP_CALL_ARGS]).await {
            Ok(ids) => ids,
            Err(error) => {
                warn!(%identity, %error, "endpoint activated but call surface missing");
                return None;
            }
        };
        let call_id = match ids.first() {
            Some(id) => *id,
            None => {
                warn!(%identity, "target resolved the call surface to nothing");
                return None;
            }
        };

        let close_id = match target.resolve(&[OP_CLOSE]).await {
            Ok(ids) => ids.first().copied(),
            Err(_) => {
                debug!(%identity, "no close operation on this endpoint");
                None
            }
        };

        Some(CallerProxy {
            target: Mutex::new(Some(target)),
            call_id,
            close_id,
        })
    }

    /// Performs one request/response exchange against the endpoint.
    ///
    /// Always returns a `Response`:
    /// - dispatch failure → `503` with the raw code in the
    ///   [`hresult`](status::HEADER_RAW_CODE) header;
    /// - dispatch succeeded but the output did not decode as a response →
    ///   `500`, bare;
    /// - otherwise the decoded response, verbatim.
    ///
    /// Calls on one proxy serialize: the target lock is held for the duration
    /// of the outstanding dispatch. Dropping the returned future abandons the
    /// wait at its suspension point but does not abort the remote call —
    /// cancellation here is cooperative and best-effort only.
    pub async fn invoke(&self, request: Request) -> Response {
        let argument = http::encode_request(&request);

        let guard = self.target.lock().await;
        let Some(target) = guard.as_ref() else {
            debug!("invoke on closed proxy");
            return status::service_unavailable(raw::DISCONNECTED);
        };

        match target.invoke(self.call_id, argument).await {
            Ok(output) => match http::decode_response(&output) {
                Ok(response) => response,
                Err(error) => {
                    debug!(%error, "callee returned an unexpected output shape");
                    status::internal_error()
                }
            },
            Err(error) => {
                debug!(raw_code = error.raw_code, %error, "dispatch failed");
                status::service_unavailable(error.raw_code)
            }
        }
    }

    /// Tears the proxy down. Idempotent; never fails.
    ///
    /// If the endpoint exposed a close operation it is invoked once,
    /// fire-and-forget: its result and any failure are discarded. The target
    /// handle is released afterwards regardless, and the proxy stays closed.
    pub async fn close(&self) {
        let mut guard = self.target.lock().await;
        let Some(target) = guard.take() else {
            return;
        };

        if let Some(close_id) = self.close_id {
            if let Err(error) = target.invoke(close_id, Value::Null).await {
                debug!(raw_code = error.raw_code, %error, "close invocation failed; discarded");
            }
        }
        // target drops here, releasing the handle whether or not the close
        // invocation was attempted or succeeded.
    }

    /// Whether the proxy has been closed.
    pub async fn is_closed(&self) -> bool {
        self.target.lock().await.is_none()
    }

    /// The resolved dispatch operation id.
    pub fn call_id(&self) -> OpId {
        self.call_id
    }

    /// The resolved close operation id, if the endpoint exposed one.
    pub fn close_id(&self) -> Option<OpId> {
        self.close_id
    }
}
