//! # Dynamic Target Seams
//!
//! The external collaborators of the bridge, expressed as object-safe async
//! traits: something that activates an endpoint (`Activator`) and something
//! that resolves and dispatches named operations on it (`DynamicTarget`).
//!
//! ## Philosophy
//!
//! - **Late-bound, opaque**: the bridge never sees a typed interface on the
//!   remote side. It resolves names to opaque ids once, then invokes by id
//!   with a single envelope argument.
//! - **Raw codes travel**: a failed dispatch reports an opaque `u32` code
//!   supplied by the target. The bridge stringifies it into a diagnostic
//!   header; it never interprets it.

use async_trait::async_trait;

use propset::Value;

/// Opaque value naming a remote endpoint to activate. Immutable, supplied by
/// the caller.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EndpointIdentity(String);

impl EndpointIdentity {
    pub fn new(identity: impl Into<String>) -> Self {
        Self(identity.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EndpointIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier for a resolved remote operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct OpId(pub u64);

impl std::fmt::Display for OpId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "op-{}", self.0)
    }
}

/// Well-known raw failure codes.
///
/// The code space is inherited from the original bridge protocol: the high
/// bit marks failure. Targets are free to report any code; these are the ones
/// the bridge itself needs by name.
pub mod raw {
    /// Generic dispatch failure.
    pub const E_FAIL: u32 = 0x8000_4005;
    /// The endpoint no longer exists or the channel dropped.
    pub const DISCONNECTED: u32 = 0x8001_0108;
    /// The operation id does not map to anything on the target.
    pub const MEMBER_NOT_FOUND: u32 = 0x8002_0003;
}

/// Activation failures.
#[derive(Debug, Clone)]
pub enum ActivateError {
    /// Nothing is registered or listening under this identity.
    NotFound(EndpointIdentity),
    /// Activation was attempted but did not produce a usable target.
    Failed(String),
}

impl std::fmt::Display for ActivateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(identity) => write!(f, "No endpoint under identity '{}'", identity),
            Self::Failed(msg) => write!(f, "Activation failed: {}", msg),
        }
    }
}

impl std::error::Error for ActivateError {}

/// Name resolution failures.
#[derive(Debug, Clone)]
pub enum ResolveError {
    /// The first requested name the target could not resolve.
    UnknownName(String),
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownName(name) => write!(f, "Operation '{}' not found on target", name),
        }
    }
}

impl std::error::Error for ResolveError {}

/// A failed dispatch, carrying the target's raw failure code.
#[derive(Debug, Clone)]
pub struct CallError {
    pub raw_code: u32,
    pub context: String,
}

impl CallError {
    pub fn new(raw_code: u32, context: impl Into<String>) -> Self {
        Self { raw_code, context: context.into() }
    }
}

impl std::fmt::Display for CallError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Dispatch failed ({:#010x}): {}", self.raw_code, self.context)
    }
}

impl std::error::Error for CallError {}

/// Handle to an out-of-process object supporting name-based operation
/// resolution and opaque-id invocation.
///
/// A target is exclusively owned by at most one caller proxy at a time;
/// dropping the handle releases the underlying resource.
#[async_trait]
pub trait DynamicTarget: Send + Sync {
    /// Resolves operation names to opaque ids, all-or-nothing.
    ///
    /// On success the returned vector has exactly one id per requested name,
    /// in order. If any name is unknown the whole batch fails.
    async fn resolve(&self, names: &[&str]) -> Result<Vec<OpId>, ResolveError>;

    /// Invokes a resolved operation with the single envelope argument and
    /// returns the single output value.
    ///
    /// A failure here is a dispatch/transport-level failure; the raw code it
    /// carries is surfaced verbatim to the caller as a diagnostic.
    async fn invoke(&self, op: OpId, argument: Value) -> Result<Value, CallError>;
}

/// Activates a dynamically-invocable endpoint instance.
///
/// How the instance comes to exist (spawned process, brokered connection,
/// in-process registry) is this collaborator's concern, not the bridge's.
#[async_trait]
pub trait Activator: Send + Sync {
    async fn activate(
        &self,
        identity: &EndpointIdentity,
    ) -> Result<Box<dyn DynamicTarget>, ActivateError>;
}
