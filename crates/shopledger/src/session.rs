//! Work-order editing session.
//!
//! `WorkSession` is the in-memory state behind one open job ticket:
//! the job row, its vehicle/customer joins, and the merged inspection
//! data. Mutations are synchronous and optimistic; `save` writes the
//! job row and the inspection blob as two independent store calls with
//! no atomicity between them — a failure of the second write leaves
//! the first in place (the original system behaves the same way).
//! Unsaved edits are simply dropped when the session is discarded.

use chrono::Utc;

use crate::auth::{Action, AuthContext, PermissionDenied};
use crate::checklist::{Checklist, PointStatus};
use crate::error::{Result, ShopLedgerError};
use crate::inspection::InspectionRecord;
use crate::invoice::Invoice;
use crate::recommendation::{Decision, RecommendationLedger, RecommendationUpdate};
use crate::reconcile::{self, ReconcileOutcome};
use crate::service_job::ServiceJobList;
use crate::store::{Customer, InspectionStore, JobStatus, JobStore, Vehicle};
use crate::store::records::JobRecord;
use crate::template::VehicleType;

#[derive(Debug)]
pub struct WorkSession {
    auth: AuthContext,
    job: JobRecord,
    vehicle: Option<Vehicle>,
    customer: Option<Customer>,
    vehicle_type: VehicleType,
    checklist: Checklist,
    recommendations: RecommendationLedger,
    service_jobs: ServiceJobList,
}

impl WorkSession {
    /// Loads a session: job row, vehicle/customer joins, and the
    /// inspection record (or defaults when none exists yet), with the
    /// self-healing template merge applied to checklist and ledger.
    pub async fn load<S>(store: &S, auth: AuthContext, job_id: &str) -> Result<Self>
    where
        S: JobStore + InspectionStore,
    {
        let job = store
            .fetch_job(job_id)
            .await?
            .ok_or_else(|| ShopLedgerError::JobNotFound(job_id.to_string()))?;

        let vehicle = store.fetch_vehicle(&job.vehicle_id).await?;
        let customer = match &vehicle {
            Some(v) => store.fetch_customer(&v.customer_id).await?,
            None => None,
        };

        let vehicle_type = VehicleType::from_stored(
            vehicle
                .as_ref()
                .and_then(|v| v.vehicle_type.as_deref()),
        );

        // A job inspected for the first time has no record yet; that is
        // a normal state, not an error.
        let record = store
            .fetch_inspection(job_id)
            .await?
            .unwrap_or_else(|| InspectionRecord::new(job_id));

        let checklist = Checklist::load_or_init(vehicle_type, record.checklist);
        let recommendations = RecommendationLedger::load_or_init(
            &vehicle_type.template_points(),
            record.recommendations,
        );

        Ok(Self {
            auth,
            job,
            vehicle,
            customer,
            vehicle_type,
            checklist,
            recommendations,
            service_jobs: record.service_lines,
        })
    }

    pub fn job(&self) -> &JobRecord {
        &self.job
    }

    pub fn vehicle(&self) -> Option<&Vehicle> {
        self.vehicle.as_ref()
    }

    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    pub fn vehicle_type(&self) -> VehicleType {
        self.vehicle_type
    }

    pub fn checklist(&self) -> &Checklist {
        &self.checklist
    }

    pub fn recommendations(&self) -> &RecommendationLedger {
        &self.recommendations
    }

    pub fn service_jobs(&self) -> &ServiceJobList {
        &self.service_jobs
    }

    // --- open to every role ---

    pub fn set_point_status(&mut self, point: &str, status: PointStatus) {
        self.checklist.set_status(point, status);
    }

    pub fn set_point_note(&mut self, point: &str, note: impl Into<String>) {
        self.checklist.set_note(point, note);
    }

    pub fn set_diagnosis(&mut self, text: impl Into<String>) {
        self.job.tech_diagnosis = text.into();
    }

    pub fn set_job_status(&mut self, status: JobStatus) {
        self.job.status = status;
    }

    /// Records the customer's decision on a failed point. Approval
    /// triggers the reconciliation bridge; denial and reopening leave
    /// previously seeded jobs alone.
    pub fn decide(&mut self, point: &str, decision: Decision) -> Option<ReconcileOutcome> {
        match decision {
            Decision::Approved => Some(reconcile::approve(
                &mut self.recommendations,
                &mut self.service_jobs,
                point,
            )),
            Decision::Denied | Decision::Pending => {
                self.recommendations.set_decision(point, decision);
                None
            }
        }
    }

    // --- advisor/admin only ---

    pub fn update_recommendation(
        &mut self,
        point: &str,
        update: RecommendationUpdate,
    ) -> std::result::Result<(), PermissionDenied> {
        self.auth.require(Action::EditFinancials)?;
        self.recommendations.update(point, update);
        Ok(())
    }

    /// Mutable access to the service-job list, gated on the financial
    /// capability. All line CRUD goes through this.
    pub fn service_jobs_mut(
        &mut self,
    ) -> std::result::Result<&mut ServiceJobList, PermissionDenied> {
        self.auth.require(Action::EditFinancials)?;
        Ok(&mut self.service_jobs)
    }

    pub fn compile_invoice(&self, tax_rate: f64) -> std::result::Result<Invoice, PermissionDenied> {
        self.auth.require(Action::EditFinancials)?;
        Ok(Invoice::compile_from(
            &self.service_jobs,
            &self.recommendations,
            tax_rate,
        ))
    }

    /// Reassigns the technician and persists immediately (the original
    /// screen saves assignment outside the main save button).
    pub async fn assign_tech<S>(&mut self, store: &S, tech_id: Option<String>) -> Result<()>
    where
        S: JobStore,
    {
        self.auth.require(Action::AssignTech)?;
        self.job.assigned_tech_id = tech_id;
        store.update_job(&self.job).await?;
        Ok(())
    }

    /// Archives or restores the job. Destructive-adjacent; call sites
    /// confirm with the user before archiving.
    pub async fn set_archived<S>(&mut self, store: &S, archived: bool) -> Result<()>
    where
        S: JobStore,
    {
        self.auth.require(Action::Archive)?;
        self.job.is_archived = archived;
        store.update_job(&self.job).await?;
        Ok(())
    }

    /// Persists the session as two independent writes: the job row,
    /// then the inspection blob. No rollback: if the second write
    /// fails, the first stays applied and the error is surfaced once.
    pub async fn save<S>(&mut self, store: &S) -> Result<()>
    where
        S: JobStore + InspectionStore,
    {
        self.job.updated_at = Some(Utc::now());
        store.update_job(&self.job).await?;

        let record = self.to_inspection_record();
        if let Err(e) = store.upsert_inspection(&record).await {
            log::warn!(
                "inspection write failed after job write succeeded for {}: {e}",
                self.job.id
            );
            return Err(e.into());
        }
        Ok(())
    }

    fn to_inspection_record(&self) -> InspectionRecord {
        InspectionRecord {
            job_id: self.job.id.clone(),
            checklist: self.checklist.to_stored(),
            recommendations: self.recommendations.to_stored(),
            service_lines: self.service_jobs.clone(),
            updated_at: Some(Utc::now()),
        }
    }
}
