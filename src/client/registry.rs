//! Config-driven client resolution.
//!
//! # Responsibilities
//! - Map logical service ids to transports using `GatewayConfig`
//! - Build transports lazily and cache them per service
//!
//! # Design Decisions
//! - DashMap cache: many request tasks resolve concurrently without a
//!   global lock
//! - Unknown services resolve to `None`; the filter records the error

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use url::Url;

use crate::client::transport::HttpTransport;
use crate::client::{ClientFactory, ClientHandle};
use crate::config::GatewayConfig;

/// Default [`ClientFactory`] backed by static service configuration.
pub struct ClientRegistry {
    addresses: HashMap<String, Url>,
    cache: DashMap<String, Arc<dyn ClientHandle>>,
}

impl ClientRegistry {
    /// Build a registry from configuration. Services with an unparseable
    /// address are skipped with a warning; validation normally rejects
    /// those before this point.
    pub fn from_config(config: &GatewayConfig) -> Self {
        let mut addresses = HashMap::new();
        for service in &config.services {
            match Url::parse(&service.address) {
                Ok(url) => {
                    addresses.insert(service.name.clone(), url);
                }
                Err(error) => {
                    tracing::warn!(
                        service = %service.name,
                        address = %service.address,
                        %error,
                        "skipping service with invalid address"
                    );
                }
            }
        }

        Self {
            addresses,
            cache: DashMap::new(),
        }
    }

    /// Names of all services this registry can resolve.
    pub fn known_services(&self) -> impl Iterator<Item = &str> {
        self.addresses.keys().map(String::as_str)
    }
}

impl ClientFactory for ClientRegistry {
    fn client_for(&self, service_id: &str) -> Option<Arc<dyn ClientHandle>> {
        if let Some(handle) = self.cache.get(service_id) {
            return Some(handle.clone());
        }

        let base = self.addresses.get(service_id)?;
        match HttpTransport::new(base) {
            Ok(transport) => {
                let handle: Arc<dyn ClientHandle> = Arc::new(transport);
                self.cache.insert(service_id.to_string(), handle.clone());
                Some(handle)
            }
            Err(error) => {
                tracing::error!(service = service_id, %error, "failed to build transport");
                None
            }
        }
    }
}
