//! In-memory store used by tests and demos.
//!
//! Mirrors the hosted backend's surface closely enough to exercise the
//! core end to end, including injectable write failures for the
//! partial-save paths. Cloning is cheap (inner `Arc`); all access is
//! serialized through a `Mutex`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::error::StoreError;
use super::records::{Customer, JobRecord, Vehicle};
use super::{InspectionStore, JobStore};
use crate::inspection::InspectionRecord;

#[derive(Default)]
struct Inner {
    jobs: HashMap<String, JobRecord>,
    vehicles: HashMap<String, Vehicle>,
    customers: HashMap<String, Customer>,
    inspections: HashMap<String, InspectionRecord>,
    fail_next_write: bool,
    fail_next_inspection_write: bool,
}

/// Thread-safe in-memory implementation of both store traits.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_job(&self, job: JobRecord) {
        self.lock().jobs.insert(job.id.clone(), job);
    }

    pub fn seed_vehicle(&self, vehicle: Vehicle) {
        self.lock().vehicles.insert(vehicle.id.clone(), vehicle);
    }

    pub fn seed_customer(&self, customer: Customer) {
        self.lock().customers.insert(customer.id.clone(), customer);
    }

    pub fn seed_inspection(&self, record: InspectionRecord) {
        self.lock()
            .inspections
            .insert(record.job_id.clone(), record);
    }

    /// Makes the next write fail with a backend error, simulating an
    /// outage mid-save.
    pub fn fail_next_write(&self) {
        self.lock().fail_next_write = true;
    }

    /// Makes only the next inspection write fail, for exercising the
    /// job-saved-but-inspection-lost partial state.
    pub fn fail_next_inspection_write(&self) {
        self.lock().fail_next_inspection_write = true;
    }

    /// Snapshot of a stored inspection, for assertions.
    pub fn inspection(&self, job_id: &str) -> Option<InspectionRecord> {
        self.lock().inspections.get(job_id).cloned()
    }

    /// Snapshot of a stored job, for assertions.
    pub fn job(&self, job_id: &str) -> Option<JobRecord> {
        self.lock().jobs.get(job_id).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_write(inner: &mut Inner) -> Result<(), StoreError> {
        if inner.fail_next_write {
            inner.fail_next_write = false;
            return Err(StoreError::Backend("simulated outage".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl JobStore for MemoryStore {
    async fn fetch_job(&self, job_id: &str) -> Result<Option<JobRecord>, StoreError> {
        Ok(self.lock().jobs.get(job_id).cloned())
    }

    async fn update_job(&self, job: &JobRecord) -> Result<(), StoreError> {
        let mut inner = self.lock();
        Self::check_write(&mut inner)?;
        inner.jobs.insert(job.id.clone(), job.clone());
        Ok(())
    }

    async fn fetch_vehicle(&self, vehicle_id: &str) -> Result<Option<Vehicle>, StoreError> {
        Ok(self.lock().vehicles.get(vehicle_id).cloned())
    }

    async fn fetch_customer(&self, customer_id: &str) -> Result<Option<Customer>, StoreError> {
        Ok(self.lock().customers.get(customer_id).cloned())
    }
}

#[async_trait]
impl InspectionStore for MemoryStore {
    async fn fetch_inspection(&self, job_id: &str) -> Result<Option<InspectionRecord>, StoreError> {
        Ok(self.lock().inspections.get(job_id).cloned())
    }

    async fn upsert_inspection(&self, record: &InspectionRecord) -> Result<(), StoreError> {
        let mut inner = self.lock();
        Self::check_write(&mut inner)?;
        if inner.fail_next_inspection_write {
            inner.fail_next_inspection_write = false;
            return Err(StoreError::Backend("simulated outage".to_string()));
        }
        inner
            .inspections
            .insert(record.job_id.clone(), record.clone());
        Ok(())
    }
}
