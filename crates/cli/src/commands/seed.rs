//! Seed the catalog from a YAML file.
//!
//! The file is a list of services in the stored layout:
//!
//! ```yaml
//! - id: service-1
//!   name: Instagram Followers
//!   description: High-quality Instagram followers
//!   category: social
//!   price: 2.5
//!   minOrder: 100
//!   unit: follower
//!   targetOptions: [global, usa]
//!   deviceTypes: [mobile, tablet]
//! ```
//!
//! `admin service-create` and `admin service-update` read a single service
//! in the same layout, without the leading `-`.

use std::collections::HashSet;
use std::path::Path;
use std::slice;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{error, info};

use boostmart_storefront::db::{RepositoryError, ServiceRepository};
use boostmart_storefront::models::Service;
use boostmart_storefront::store::KeyValueStore;

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid service list.
    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The services failed validation.
    #[error("{0} validation errors found")]
    Invalid(usize),

    /// The catalog could not be written.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Replace the catalog with the services in `file`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, the services fail
/// validation, or the catalog cannot be written.
pub async fn services<S: KeyValueStore>(store: &S, file: &Path) -> Result<(), SeedError> {
    info!(path = %file.display(), "Loading services from file");

    let content = read(file).await?;
    let services: Vec<Service> = serde_yaml::from_str(&content)?;

    info!(services = services.len(), "Parsed catalog");

    check(&services)?;

    ServiceRepository::new(store).replace_all(&services).await?;

    info!("Seeding complete!");
    Ok(())
}

/// Read and validate a single service from `file`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or the service
/// fails validation.
pub async fn read_service(file: &Path) -> Result<Service, SeedError> {
    info!(path = %file.display(), "Loading service from file");
    parse_service(&read(file).await?)
}

fn parse_service(content: &str) -> Result<Service, SeedError> {
    let service: Service = serde_yaml::from_str(content)?;
    check(slice::from_ref(&service))?;
    Ok(service)
}

async fn read(file: &Path) -> Result<String, SeedError> {
    tokio::fs::read_to_string(file)
        .await
        .map_err(|source| SeedError::Read {
            path: file.display().to_string(),
            source,
        })
}

fn check(services: &[Service]) -> Result<(), SeedError> {
    let errors = validate_catalog(services);
    if errors.is_empty() {
        return Ok(());
    }

    error!("Catalog validation failed:");
    for err in &errors {
        error!("  - {err}");
    }
    Err(SeedError::Invalid(errors.len()))
}

/// Problems that would make the catalog unusable.
fn validate_catalog(services: &[Service]) -> Vec<String> {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for service in services {
        if !ids.insert(service.id.as_str()) {
            errors.push(format!("duplicate service id {}", service.id));
        }
        if service.name.trim().is_empty() {
            errors.push(format!("{}: name is empty", service.id));
        }
        if service.price <= Decimal::ZERO {
            errors.push(format!("{}: price must be positive", service.id));
        }
        if service.min_order == 0 {
            errors.push(format!("{}: minOrder must be at least 1", service.id));
        }
        if service.target_options.as_ref().is_some_and(Vec::is_empty) {
            errors.push(format!("{}: targetOptions is empty", service.id));
        }
        if service.device_types.as_ref().is_some_and(Vec::is_empty) {
            errors.push(format!("{}: deviceTypes is empty", service.id));
        }
    }

    errors
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use boostmart_storefront::db::services::default_catalog;

    use super::*;

    #[test]
    fn test_default_catalog_is_valid() {
        assert!(validate_catalog(&default_catalog()).is_empty());
    }

    #[test]
    fn test_validation_reports_every_problem() {
        let mut catalog = default_catalog();
        catalog[1].id = catalog[0].id.clone();
        catalog[2].price = Decimal::ZERO;
        catalog[3].target_options = Some(Vec::new());

        let errors = validate_catalog(&catalog);
        assert_eq!(errors.len(), 3);
        assert!(errors[0].starts_with("duplicate service id"));
    }

    #[test]
    fn test_yaml_uses_stored_layout() {
        let yaml = "
- id: service-9
  name: Twitch Followers
  description: Real-looking followers
  category: social
  price: 1.75
  minOrder: 50
  unit: follower
  deviceTypes: [desktop]
";
        let services: Vec<Service> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].min_order, 50);
        assert_eq!(services[0].price, Decimal::new(175, 2));
        assert!(validate_catalog(&services).is_empty());
    }

    #[test]
    fn test_single_service_file() {
        let yaml = "
id: service-4
name: TikTok Views
description: Fast views on any public video
category: social
price: 0.05
minOrder: 1000
unit: view
targetOptions: [global]
deviceTypes: [mobile]
";
        let service = parse_service(yaml).unwrap();
        assert_eq!(service.id.as_str(), "service-4");
        assert_eq!(service.price, Decimal::new(5, 2));
        assert_eq!(service.min_order, 1000);
    }

    #[test]
    fn test_single_service_is_validated() {
        let yaml = "
id: service-4
name: ' '
description: Fast views
category: social
price: 0.0
minOrder: 1000
unit: view
";
        let err = parse_service(yaml).unwrap_err();
        assert!(matches!(err, SeedError::Invalid(2)));
    }
}
