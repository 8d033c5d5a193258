//! Service catalog repository.

use std::collections::HashSet;

use rust_decimal::Decimal;
use tracing::{info, instrument};

use boostmart_core::{DeviceType, ServiceId};

use super::RepositoryError;
use crate::models::Service;
use crate::store::{Collection, KeyValueStore, SERVICES_KEY};

/// Repository for the service catalog.
pub struct ServiceRepository<'a, S> {
    services: Collection<'a, S, Service>,
}

impl<'a, S: KeyValueStore> ServiceRepository<'a, S> {
    /// Create a new service repository.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self {
            services: Collection::new(store, SERVICES_KEY),
        }
    }

    /// Get every service, seeding the built-in catalog if the store has
    /// never held one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the catalog cannot be read or
    /// seeded.
    pub async fn list(&self) -> Result<Vec<Service>, RepositoryError> {
        if !self.services.exists().await? {
            let catalog = default_catalog();
            info!(count = catalog.len(), "Seeding default service catalog");
            self.services.save(&catalog).await?;
            return Ok(catalog);
        }
        Ok(self.services.load().await?)
    }

    /// Get the services in one category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the catalog cannot be read.
    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Service>, RepositoryError> {
        let mut services = self.list().await?;
        services.retain(|s| s.category == category);
        Ok(services)
    }

    /// Get a service by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the catalog cannot be read.
    pub async fn get(&self, id: &ServiceId) -> Result<Option<Service>, RepositoryError> {
        Ok(self.list().await?.into_iter().find(|s| &s.id == id))
    }

    /// Replace the service with the same ID, or append it as new.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the catalog cannot be written.
    #[instrument(skip(self, service), fields(service_id = %service.id))]
    pub async fn upsert(&self, service: Service) -> Result<(), RepositoryError> {
        // Seed first so a new service does not mask the default catalog.
        self.list().await?;
        self.services.upsert(service).await?;
        Ok(())
    }

    /// Delete a service. Orders referencing it are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no service has the ID.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &ServiceId) -> Result<(), RepositoryError> {
        self.list().await?;
        if self.services.remove(id).await? {
            Ok(())
        } else {
            Err(RepositoryError::not_found("service", id))
        }
    }

    /// Replace the entire catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the catalog cannot be written.
    #[instrument(skip_all, fields(count = services.len()))]
    pub async fn replace_all(&self, services: &[Service]) -> Result<(), RepositoryError> {
        self.services.save(services).await?;
        Ok(())
    }

    /// Distinct categories, in first-seen order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the catalog cannot be read.
    pub async fn categories(&self) -> Result<Vec<String>, RepositoryError> {
        let services = self.list().await?;
        Ok(distinct(services.into_iter().map(|s| s.category)))
    }

    /// Distinct geographic target options across all services, in
    /// first-seen order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the catalog cannot be read.
    pub async fn target_options(&self) -> Result<Vec<String>, RepositoryError> {
        let services = self.list().await?;
        Ok(distinct(
            services
                .into_iter()
                .flat_map(|s| s.target_options.unwrap_or_default()),
        ))
    }
}

fn distinct(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(v.clone())).collect()
}

/// The catalog a fresh store starts with.
#[must_use]
pub fn default_catalog() -> Vec<Service> {
    let all_targets = ["global", "usa", "europe", "asia"];
    let all_devices = vec![DeviceType::Desktop, DeviceType::Mobile, DeviceType::Tablet];

    let service = |id: &str,
                   name: &str,
                   description: &str,
                   category: &str,
                   price: Decimal,
                   min_order: u64,
                   unit: &str,
                   devices: Vec<DeviceType>| Service {
        id: ServiceId::new(id),
        name: name.to_owned(),
        description: description.to_owned(),
        category: category.to_owned(),
        price,
        min_order,
        unit: unit.to_owned(),
        active: Some(true),
        target_options: Some(all_targets.iter().map(|t| (*t).to_owned()).collect()),
        device_types: Some(devices),
    };

    vec![
        service(
            "service-1",
            "Instagram Followers",
            "High-quality Instagram followers to boost your profile's credibility.",
            "social",
            Decimal::new(25, 1),
            100,
            "follower",
            all_devices.clone(),
        ),
        service(
            "service-2",
            "Facebook Page Likes",
            "Increase your Facebook page's popularity with real-looking likes.",
            "social",
            Decimal::new(3, 0),
            50,
            "like",
            all_devices.clone(),
        ),
        service(
            "service-3",
            "YouTube Views",
            "Boost your YouTube video's visibility with high-retention views.",
            "social",
            Decimal::new(15, 1),
            1000,
            "view",
            all_devices.clone(),
        ),
        service(
            "service-4",
            "Website Traffic",
            "Drive real-looking traffic to your website from various sources.",
            "traffic",
            Decimal::new(8, 1),
            1000,
            "visitor",
            all_devices.clone(),
        ),
        service(
            "service-5",
            "Telegram Channel Members",
            "Grow your Telegram channel with real-looking members.",
            "social",
            Decimal::new(2, 0),
            100,
            "member",
            all_devices,
        ),
        service(
            "service-6",
            "Mobile App Installs",
            "Increase your app's install count and improve store rankings.",
            "traffic",
            Decimal::new(5, 1),
            100,
            "install",
            vec![DeviceType::Mobile, DeviceType::Tablet],
        ),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_first_read_seeds_catalog() {
        let store = MemoryStore::new();
        let repo = ServiceRepository::new(&store);

        let services = repo.list().await.unwrap();
        assert_eq!(services.len(), 6);
        assert!(store.get(SERVICES_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_empty_catalog_is_not_reseeded() {
        let store = MemoryStore::with_entries([(SERVICES_KEY, "[]")]);
        let repo = ServiceRepository::new(&store);
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_categories_and_targets_are_distinct() {
        let store = MemoryStore::new();
        let repo = ServiceRepository::new(&store);

        assert_eq!(repo.categories().await.unwrap(), vec!["social", "traffic"]);
        assert_eq!(
            repo.target_options().await.unwrap(),
            vec!["global", "usa", "europe", "asia"]
        );
    }

    #[tokio::test]
    async fn test_list_by_category() {
        let store = MemoryStore::new();
        let repo = ServiceRepository::new(&store);

        let traffic = repo.list_by_category("traffic").await.unwrap();
        let ids: Vec<_> = traffic.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["service-4", "service-6"]);
    }

    #[tokio::test]
    async fn test_upsert_new_service_keeps_defaults() {
        let store = MemoryStore::new();
        let repo = ServiceRepository::new(&store);

        let mut custom = default_catalog().remove(0);
        custom.id = ServiceId::new("service-99");
        custom.name = "TikTok Likes".to_owned();
        repo.upsert(custom).await.unwrap();

        let services = repo.list().await.unwrap();
        assert_eq!(services.len(), 7);
        assert_eq!(services.last().unwrap().name, "TikTok Likes");
    }

    #[tokio::test]
    async fn test_delete_unknown_service() {
        let store = MemoryStore::new();
        let repo = ServiceRepository::new(&store);

        repo.delete(&ServiceId::new("service-1")).await.unwrap();
        assert!(repo.get(&ServiceId::new("service-1")).await.unwrap().is_none());

        let err = repo.delete(&ServiceId::new("service-1")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }

    #[test]
    fn test_default_catalog_round_trips_prices() {
        let json = serde_json::to_string(&default_catalog()).unwrap();
        assert!(json.contains("\"price\":2.5"));
        assert!(json.contains("\"minOrder\":100"));

        let parsed: Vec<Service> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, default_catalog());
    }
}
