// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-through cache of the catalogs every page looks up.

use crate::backend::DashboardBackend;
use crate::error::ApiError;
use ceutro::{GenerationToken, SharedGeneration};
use ceutro_domain::{Doctor, Employee, Giveaway, Product, Sample, Territory};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

type Slot<T> = RwLock<Option<Arc<Vec<T>>>>;

/// Memoizes catalog lists for the lifetime of the process.
///
/// Each list is fetched on first use and shared afterwards.
/// [`CatalogCache::refresh`] empties the cache; a fetch that started before
/// the refresh does not put its result back.
#[derive(Debug)]
pub struct CatalogCache<B> {
    backend: Arc<B>,
    generation: SharedGeneration,
    employees: Slot<Employee>,
    giveaways: Slot<Giveaway>,
    samples: Slot<Sample>,
    doctors: Slot<Doctor>,
    products: Slot<Product>,
    territories: Slot<Territory>,
}

impl<B: DashboardBackend> CatalogCache<B> {
    /// Creates an empty cache in front of `backend`.
    #[must_use]
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            generation: SharedGeneration::new(),
            employees: RwLock::new(None),
            giveaways: RwLock::new(None),
            samples: RwLock::new(None),
            doctors: RwLock::new(None),
            products: RwLock::new(None),
            territories: RwLock::new(None),
        }
    }

    /// Returns the backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns a shared handle to the backend.
    #[must_use]
    pub fn backend_handle(&self) -> Arc<B> {
        Arc::clone(&self.backend)
    }

    async fn cached<T, F, Fut>(
        &self,
        slot: &Slot<T>,
        catalog: &'static str,
        fetch: F,
    ) -> Result<Arc<Vec<T>>, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, ApiError>>,
    {
        if let Some(hit) = slot.read().await.as_ref() {
            debug!(catalog, "Catalog cache hit");
            return Ok(Arc::clone(hit));
        }

        debug!(catalog, "Catalog cache miss");
        let token: GenerationToken = self.generation.token();
        let fresh: Arc<Vec<T>> = Arc::new(fetch().await?);

        let mut guard = slot.write().await;
        if !self.generation.is_current(token) {
            debug!(catalog, "Catalog refreshed during fetch, not caching");
            return Ok(fresh);
        }
        if let Some(existing) = guard.as_ref() {
            return Ok(Arc::clone(existing));
        }
        *guard = Some(Arc::clone(&fresh));
        Ok(fresh)
    }

    /// Returns every employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    pub async fn employees(&self) -> Result<Arc<Vec<Employee>>, ApiError> {
        self.cached(&self.employees, "employees", || self.backend.list_employees())
            .await
    }

    /// Returns every giveaway.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    pub async fn giveaways(&self) -> Result<Arc<Vec<Giveaway>>, ApiError> {
        self.cached(&self.giveaways, "giveaways", || self.backend.list_giveaways())
            .await
    }

    /// Returns every sample.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    pub async fn samples(&self) -> Result<Arc<Vec<Sample>>, ApiError> {
        self.cached(&self.samples, "samples", || self.backend.list_samples())
            .await
    }

    /// Returns every doctor.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    pub async fn doctors(&self) -> Result<Arc<Vec<Doctor>>, ApiError> {
        self.cached(&self.doctors, "doctors", || self.backend.list_doctors())
            .await
    }

    /// Returns every product.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    pub async fn products(&self) -> Result<Arc<Vec<Product>>, ApiError> {
        self.cached(&self.products, "products", || self.backend.list_products())
            .await
    }

    /// Returns every territory.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    pub async fn territories(&self) -> Result<Arc<Vec<Territory>>, ApiError> {
        self.cached(&self.territories, "territories", || {
            self.backend.list_territories(None)
        })
        .await
    }

    /// Empties the cache so the next access fetches again.
    pub async fn refresh(&self) {
        self.generation.invalidate();
        *self.employees.write().await = None;
        *self.giveaways.write().await = None;
        *self.samples.write().await = None;
        *self.doctors.write().await = None;
        *self.products.write().await = None;
        *self.territories.write().await = None;
        debug!("Catalog cache cleared");
    }
}
