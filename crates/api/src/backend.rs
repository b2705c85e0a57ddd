// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The data source behind the dashboard.

use crate::error::ApiError;
use crate::fixture::CatalogFixture;
use crate::request_response::{
    CreateAllocationRequest, CreateDoctorRequest, CreateProductRequest, UpdateAllocationRequest,
};
use ceutro_domain::{
    Allocation, AllocationLine, Doctor, DomainError, Employee, Giveaway, Product, RecordId,
    ResourceKind, Sample, Territory, validate_allocation_lines, validate_doctor_fields,
    validate_product_code_unique, validate_product_fields,
};
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// The remote API the dashboard talks to.
///
/// Implementations must be shareable between request handlers.
pub trait DashboardBackend: Send + Sync {
    /// Lists every employee.
    fn list_employees(&self) -> impl Future<Output = Result<Vec<Employee>, ApiError>> + Send;

    /// Lists every giveaway.
    fn list_giveaways(&self) -> impl Future<Output = Result<Vec<Giveaway>, ApiError>> + Send;

    /// Lists every sample.
    fn list_samples(&self) -> impl Future<Output = Result<Vec<Sample>, ApiError>> + Send;

    /// Lists every doctor.
    fn list_doctors(&self) -> impl Future<Output = Result<Vec<Doctor>, ApiError>> + Send;

    /// Lists every product.
    fn list_products(&self) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send;

    /// Lists territories, optionally only those of one region.
    fn list_territories(
        &self,
        region: Option<String>,
    ) -> impl Future<Output = Result<Vec<Territory>, ApiError>> + Send;

    /// Fetches the allocation of one employee.
    fn get_allocation(
        &self,
        user_id: RecordId,
    ) -> impl Future<Output = Result<Allocation, ApiError>> + Send;

    /// Creates an allocation.
    fn create_allocation(
        &self,
        request: CreateAllocationRequest,
    ) -> impl Future<Output = Result<Allocation, ApiError>> + Send;

    /// Applies a diff-style update to an allocation.
    fn update_allocation(
        &self,
        user_id: RecordId,
        request: UpdateAllocationRequest,
    ) -> impl Future<Output = Result<Allocation, ApiError>> + Send;

    /// Creates a product.
    fn create_product(
        &self,
        request: CreateProductRequest,
    ) -> impl Future<Output = Result<Product, ApiError>> + Send;

    /// Creates a doctor.
    fn create_doctor(
        &self,
        request: CreateDoctorRequest,
    ) -> impl Future<Output = Result<Doctor, ApiError>> + Send;
}

/// A backend holding everything in memory.
///
/// Used by the server when no remote API is configured and by tests.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    data: RwLock<CatalogFixture>,
    offline: AtomicBool,
    list_calls: AtomicUsize,
}

impl InMemoryBackend {
    /// Creates a backend seeded with `fixture`.
    #[must_use]
    pub fn new(fixture: CatalogFixture) -> Self {
        Self {
            data: RwLock::new(fixture),
            offline: AtomicBool::new(false),
            list_calls: AtomicUsize::new(0),
        }
    }

    /// Makes every call fail with a network error while `offline` is set.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of list calls served so far.
    #[must_use]
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> Result<(), ApiError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(ApiError::Network {
                message: String::from("Backend unreachable"),
            });
        }
        Ok(())
    }

    async fn list<T, F>(&self, select: F) -> Result<Vec<T>, ApiError>
    where
        F: FnOnce(&CatalogFixture) -> Vec<T>,
    {
        self.check_online()?;
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let data = self.data.read().await;
        Ok(select(&data))
    }
}

/// Rejects lines that name unknown catalog items.
fn validate_catalog_refs(
    data: &CatalogFixture,
    giveaway: &[AllocationLine],
    sample: &[AllocationLine],
) -> Result<(), DomainError> {
    validate_allocation_lines(ResourceKind::Giveaway, giveaway)?;
    validate_allocation_lines(ResourceKind::Sample, sample)?;

    if let Some(line) = giveaway
        .iter()
        .filter(|line| line.quantity > 0)
        .find(|line| !data.giveaways.iter().any(|g| g.id == line.id))
    {
        return Err(DomainError::CatalogItemNotFound {
            kind: ResourceKind::Giveaway,
            id: line.id,
        });
    }
    if let Some(line) = sample
        .iter()
        .filter(|line| line.quantity > 0)
        .find(|line| !data.samples.iter().any(|s| s.id == line.id))
    {
        return Err(DomainError::CatalogItemNotFound {
            kind: ResourceKind::Sample,
            id: line.id,
        });
    }
    Ok(())
}

fn next_id(ids: impl Iterator<Item = RecordId>) -> RecordId {
    ids.max().unwrap_or(0) + 1
}

impl DashboardBackend for InMemoryBackend {
    async fn list_employees(&self) -> Result<Vec<Employee>, ApiError> {
        self.list(|data| data.employees.clone()).await
    }

    async fn list_giveaways(&self) -> Result<Vec<Giveaway>, ApiError> {
        self.list(|data| data.giveaways.clone()).await
    }

    async fn list_samples(&self) -> Result<Vec<Sample>, ApiError> {
        self.list(|data| data.samples.clone()).await
    }

    async fn list_doctors(&self) -> Result<Vec<Doctor>, ApiError> {
        self.list(|data| data.doctors.clone()).await
    }

    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.list(|data| data.products.clone()).await
    }

    async fn list_territories(&self, region: Option<String>) -> Result<Vec<Territory>, ApiError> {
        self.list(|data| {
            data.territories
                .iter()
                .filter(|t| {
                    region
                        .as_deref()
                        .is_none_or(|region| t.region.eq_ignore_ascii_case(region))
                })
                .cloned()
                .collect()
        })
        .await
    }

    async fn get_allocation(&self, user_id: RecordId) -> Result<Allocation, ApiError> {
        self.check_online()?;
        let data = self.data.read().await;
        data.allocations
            .iter()
            .find(|a| a.user_id == user_id)
            .cloned()
            .ok_or_else(|| DomainError::AllocationNotFound(user_id).into())
    }

    async fn create_allocation(
        &self,
        request: CreateAllocationRequest,
    ) -> Result<Allocation, ApiError> {
        self.check_online()?;
        let mut data = self.data.write().await;

        if !data.employees.iter().any(|e| e.id == request.user_id) {
            return Err(DomainError::EmployeeNotFound(request.user_id).into());
        }
        if data.allocations.iter().any(|a| a.user_id == request.user_id) {
            return Err(DomainError::AllocationExists(request.user_id).into());
        }
        validate_catalog_refs(&data, &request.giveaway, &request.sample)?;

        let allocation: Allocation =
            Allocation::new(request.user_id, request.giveaway, request.sample);
        if allocation.is_empty() {
            return Err(DomainError::EmptyAllocation.into());
        }

        info!(user_id = allocation.user_id, "Allocation created");
        data.allocations.push(allocation.clone());
        Ok(allocation)
    }

    async fn update_allocation(
        &self,
        user_id: RecordId,
        request: UpdateAllocationRequest,
    ) -> Result<Allocation, ApiError> {
        self.check_online()?;
        let mut data = self.data.write().await;
        validate_catalog_refs(&data, &request.giveaway, &request.sample)?;

        let allocation: &mut Allocation = data
            .allocations
            .iter_mut()
            .find(|a| a.user_id == user_id)
            .ok_or(DomainError::AllocationNotFound(user_id))?;
        allocation.apply_changes(&request.giveaway, &request.sample);

        debug!(
            user_id,
            giveaways = allocation.giveaway.len(),
            samples = allocation.sample.len(),
            "Allocation updated"
        );
        Ok(allocation.clone())
    }

    async fn create_product(&self, request: CreateProductRequest) -> Result<Product, ApiError> {
        self.check_online()?;
        let mut data = self.data.write().await;

        let product: Product = Product {
            id: next_id(data.products.iter().map(|p| p.id)),
            code: request.code.trim().to_uppercase(),
            name: request.name.trim().to_owned(),
            category: request.category.trim().to_owned(),
            price: request.price,
            pack_sizes: request.pack_sizes,
        };
        validate_product_fields(&product)?;
        validate_product_code_unique(&product.code, None, &data.products)?;

        info!(id = product.id, code = %product.code, "Product created");
        data.products.push(product.clone());
        Ok(product)
    }

    async fn create_doctor(&self, request: CreateDoctorRequest) -> Result<Doctor, ApiError> {
        self.check_online()?;
        let mut data = self.data.write().await;

        let doctor: Doctor = Doctor {
            id: next_id(data.doctors.iter().map(|d| d.id)),
            name: request.name.trim().to_owned(),
            speciality: request.speciality.trim().to_owned(),
            city: request.city.trim().to_owned(),
            territory: request.territory.trim().to_owned(),
            patients_per_day: request.patients_per_day,
            active: true,
        };
        validate_doctor_fields(&doctor)?;

        info!(id = doctor.id, "Doctor created");
        data.doctors.push(doctor.clone());
        Ok(doctor)
    }
}
