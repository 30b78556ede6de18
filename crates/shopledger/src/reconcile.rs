//! Reconciliation bridge: approval → service job.
//!
//! Single responsibility: when a recommendation's decision transitions to
//! approved, make sure a service job for it exists. The link is a
//! one-shot seed keyed by exact title match — not a live binding. Later
//! edits to the recommendation do not reach the job, and job edits never
//! flow back.
//!
//! TODO: replace title matching with a `source_point` id on ServiceJob
//! and propagate estimate edits while the job is untouched. Today a
//! service description renamed after approval seeds a second,
//! disconnected job on the next pending→approved cycle, and denying a
//! previously approved item leaves its job behind. Both behaviors are
//! intentional for now and covered by tests.

use crate::recommendation::{Decision, Recommendation, RecommendationLedger};
use crate::service_job::{LaborLine, PartLine, ServiceJob, ServiceJobList};
use uuid::Uuid;

/// Result of one approval cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// A new job was created and seeded from the estimate.
    Seeded { job_id: String },
    /// A job with the target title already exists; nothing was changed.
    AlreadyPresent { job_id: String },
}

/// Title used when the advisor never filled in a service description.
pub fn fallback_title(point: &str) -> String {
    format!("Repair: {point}")
}

/// The title a recommendation's job is matched and created under.
pub fn target_title(rec: &Recommendation, point: &str) -> String {
    if rec.service.is_empty() {
        fallback_title(point)
    } else {
        rec.service.clone()
    }
}

/// Records the approval on the ledger, then promotes it into the job
/// list. Idempotent per title: repeated approval clicks or reloads find
/// the existing job and do nothing further.
pub fn approve(
    ledger: &mut RecommendationLedger,
    jobs: &mut ServiceJobList,
    point: &str,
) -> ReconcileOutcome {
    ledger.set_decision(point, Decision::Approved);
    let rec = ledger.get(point).cloned().unwrap_or_default();
    promote(&rec, point, jobs)
}

/// Seeds a service job for an approved recommendation when no job with
/// the target title exists yet.
pub fn promote(rec: &Recommendation, point: &str, jobs: &mut ServiceJobList) -> ReconcileOutcome {
    let title = target_title(rec, point);

    if let Some(existing) = jobs.find_by_title(&title) {
        log::debug!("reconcile: job {:?} already present, skipping seed", title);
        return ReconcileOutcome::AlreadyPresent {
            job_id: existing.id.clone(),
        };
    }

    let mut job = ServiceJob::new(title.clone());
    if rec.labor > 0.0 {
        job.labor.push(LaborLine {
            id: Uuid::new_v4().to_string(),
            description: "Labor".to_string(),
            hours: 1.0,
            rate: rec.labor,
        });
    }
    if rec.parts > 0.0 {
        job.parts.push(PartLine {
            id: Uuid::new_v4().to_string(),
            part_number: String::new(),
            name: "Parts".to_string(),
            quantity: 1.0,
            unit_price: rec.parts,
        });
    }

    let job_id = job.id.clone();
    jobs.push_job(job);
    log::info!("reconcile: seeded job {:?} from point {:?}", title, point);
    ReconcileOutcome::Seeded { job_id }
}
