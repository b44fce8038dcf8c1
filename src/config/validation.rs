//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check service names are unique and nonempty
//! - Check service addresses parse as http/https base URLs
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyServiceName,
    DuplicateServiceName(String),
    InvalidServiceAddress { name: String, address: String },
    UnsupportedScheme { name: String, scheme: String },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyServiceName => write!(f, "service with empty name"),
            ValidationError::DuplicateServiceName(name) => {
                write!(f, "duplicate service name: {}", name)
            }
            ValidationError::InvalidServiceAddress { name, address } => {
                write!(f, "service {}: unparseable address {}", name, address)
            }
            ValidationError::UnsupportedScheme { name, scheme } => {
                write!(f, "service {}: unsupported scheme {}", name, scheme)
            }
        }
    }
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for service in &config.services {
        if service.name.is_empty() {
            errors.push(ValidationError::EmptyServiceName);
        } else if !seen.insert(service.name.clone()) {
            errors.push(ValidationError::DuplicateServiceName(service.name.clone()));
        }

        match Url::parse(&service.address) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => errors.push(ValidationError::UnsupportedScheme {
                name: service.name.clone(),
                scheme: url.scheme().to_string(),
            }),
            Err(_) => errors.push(ValidationError::InvalidServiceAddress {
                name: service.name.clone(),
                address: service.address.clone(),
            }),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ServiceConfig;

    fn config_with(services: Vec<ServiceConfig>) -> GatewayConfig {
        GatewayConfig {
            services,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_config() {
        let config = config_with(vec![ServiceConfig {
            name: "items-service".into(),
            address: "http://127.0.0.1:3000".into(),
        }]);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_duplicate_and_invalid_collected_together() {
        let config = config_with(vec![
            ServiceConfig {
                name: "a".into(),
                address: "http://127.0.0.1:3000".into(),
            },
            ServiceConfig {
                name: "a".into(),
                address: "not a url".into(),
            },
        ]);
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&ValidationError::DuplicateServiceName("a".into())));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let config = config_with(vec![ServiceConfig {
            name: "a".into(),
            address: "ftp://127.0.0.1".into(),
        }]);
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::UnsupportedScheme {
                name: "a".into(),
                scheme: "ftp".into(),
            }]
        );
    }
}
