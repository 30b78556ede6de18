//! Consumed persistence interfaces.
//!
//! Persistence, querying, and auth belong to an external hosted
//! backend; the core only sees these traits. Calls are async and may
//! suspend, but the core's in-memory state is updated optimistically
//! and never rolled back on failure — callers surface a failed write
//! once and leave retrying to the user.

use async_trait::async_trait;

pub mod error;
pub mod memory;
pub mod records;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use records::{Customer, JobRecord, JobStatus, Vehicle};

use crate::inspection::InspectionRecord;

/// Job rows plus their read-only vehicle/customer joins.
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn fetch_job(&self, job_id: &str) -> Result<Option<JobRecord>, StoreError>;

    /// Overwrites the job's mutable fields (status, diagnosis,
    /// assignment, archive flag). Last write wins; there is no version
    /// check between concurrent editors.
    async fn update_job(&self, job: &JobRecord) -> Result<(), StoreError>;

    async fn fetch_vehicle(&self, vehicle_id: &str) -> Result<Option<Vehicle>, StoreError>;

    async fn fetch_customer(&self, customer_id: &str) -> Result<Option<Customer>, StoreError>;
}

/// Inspection records, keyed 1:1 by job id.
#[async_trait]
pub trait InspectionStore: Send + Sync {
    async fn fetch_inspection(&self, job_id: &str) -> Result<Option<InspectionRecord>, StoreError>;

    /// Insert-or-replace on the job id.
    async fn upsert_inspection(&self, record: &InspectionRecord) -> Result<(), StoreError>;
}
