//! # Endpoint Registry
//!
//! An in-process [`Activator`]: identities map to factories that produce a
//! fresh target per activation. Uses DashMap so registration and activation
//! can proceed concurrently without a global lock.
//!
//! Real out-of-process activation lives behind its own `Activator`
//! implementation; this registry covers in-process composition and tests.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::target::ActivateError;
use crate::target::Activator;
use crate::target::DynamicTarget;
use crate::target::EndpointIdentity;

/// Produces a fresh target for each activation of one endpoint identity.
pub trait TargetFactory: Send + Sync {
    fn activate(&self) -> Result<Box<dyn DynamicTarget>, ActivateError>;
}

impl<F> TargetFactory for F
where
    F: Fn() -> Result<Box<dyn DynamicTarget>, ActivateError> + Send + Sync,
{
    fn activate(&self) -> Result<Box<dyn DynamicTarget>, ActivateError> {
        self()
    }
}

/// Concurrent identity→factory registry.
#[derive(Default)]
pub struct Registry {
    endpoints: DashMap<EndpointIdentity, Arc<dyn TargetFactory>>,
}

impl Registry {
    pub fn new() -> Self {
        Self { endpoints: DashMap::new() }
    }

    /// Registers a factory under an identity, replacing any previous one.
    pub fn register(&self, identity: EndpointIdentity, factory: Arc<dyn TargetFactory>) {
        self.endpoints.insert(identity, factory);
    }

    /// Removes an identity. Returns whether anything was registered there.
    pub fn deregister(&self, identity: &EndpointIdentity) -> bool {
        self.endpoints.remove(identity).is_some()
    }

    /// Whether an identity is currently registered.
    pub fn contains(&self, identity: &EndpointIdentity) -> bool {
        self.endpoints.contains_key(identity)
    }
}

#[async_trait]
impl Activator for Registry {
    async fn activate(
        &self,
        identity: &EndpointIdentity,
    ) -> Result<Box<dyn DynamicTarget>, ActivateError> {
        let factory = self
            .endpoints
            .get(identity)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| ActivateError::NotFound(identity.clone()))?;
        factory.activate()
    }
}
