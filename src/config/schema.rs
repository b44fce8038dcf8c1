//! Configuration schema definitions.
//!
//! This module defines the configuration structure for the forwarding core.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the forwarding core.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Logical backend services the client registry can resolve.
    pub services: Vec<ServiceConfig>,

    /// Forwarding behavior settings.
    pub forwarding: ForwardingConfig,
}

/// A logical backend service definition.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Logical service identifier (e.g., "items-service").
    pub name: String,

    /// Base address of the service (e.g., "http://127.0.0.1:3000").
    pub address: String,
}

/// Settings for the forwarding filter itself.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ForwardingConfig {
    /// When true, each forward records a [`ForwardTrace`] on the request
    /// context for diagnostics.
    ///
    /// [`ForwardTrace`]: crate::context::ForwardTrace
    pub debug_routing: bool,
}

impl Default for ForwardingConfig {
    fn default() -> Self {
        Self {
            debug_routing: false,
        }
    }
}
