//! One-time migrations from the legacy invoicing shapes.
//!
//! The system has carried three invoice representations over its life:
//! the service-job list (canonical), raw approved recommendations with
//! no service lines, and a flat list of category-tagged line items. The
//! converters here bring the two legacy shapes into the canonical list;
//! they run once at load/import time, never as a parallel runtime mode.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::lenient::{deserialize_amount, deserialize_id, deserialize_text};
use crate::recommendation::{Decision, RecommendationLedger};
use crate::reconcile::target_title;
use crate::service_job::{LaborLine, PartLine, ServiceJob, ServiceJobList};

/// Category tag on the flat line-item shape. Only `part` lines were
/// taxed under that scheme, so `fee` migrates to the untaxed labor side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlatCategory {
    Part,
    Labor,
    Fee,
}

/// One entry of the flat tagged-line-item shape.
#[derive(Debug, Clone, Deserialize)]
pub struct FlatLineItem {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub description: String,
    pub category: FlatCategory,
    #[serde(rename = "qty", default, deserialize_with = "deserialize_amount")]
    pub quantity: f64,
    #[serde(rename = "price", default, deserialize_with = "deserialize_amount")]
    pub unit_price: f64,
}

/// Synthesizes the canonical list from approved recommendations, one
/// job per item in ledger order. This is also the invoice compiler's
/// fallback path, so legacy invoices total identically before and after
/// migration.
pub fn jobs_from_recommendations(ledger: &RecommendationLedger) -> ServiceJobList {
    let mut jobs = ServiceJobList::new();
    for (point, rec) in ledger.iter() {
        if rec.decision != Decision::Approved {
            continue;
        }
        let mut job = ServiceJob::new(target_title(rec, point));
        if rec.labor > 0.0 {
            job.labor.push(LaborLine {
                id: Uuid::new_v4().to_string(),
                description: "Service Labor".to_string(),
                hours: 1.0,
                rate: rec.labor,
            });
        }
        if rec.parts > 0.0 {
            job.parts.push(PartLine {
                id: Uuid::new_v4().to_string(),
                part_number: "N/A".to_string(),
                name: "Service Parts".to_string(),
                quantity: 1.0,
                unit_price: rec.parts,
            });
        }
        jobs.push_job(job);
    }
    jobs
}

/// Title given to the single job holding migrated flat line items.
pub const FLAT_IMPORT_TITLE: &str = "Imported invoice items";

/// Folds the flat tagged shape into one service job. `part` lines
/// become part lines (taxed downstream); `labor` and `fee` lines become
/// labor lines with their full amount as a one-hour rate, keeping them
/// out of the taxable base exactly as the flat scheme did.
pub fn jobs_from_flat_items(items: &[FlatLineItem]) -> ServiceJobList {
    let mut jobs = ServiceJobList::new();
    if items.is_empty() {
        return jobs;
    }

    let mut job = ServiceJob::new(FLAT_IMPORT_TITLE);
    for item in items {
        let quantity = if item.quantity > 0.0 { item.quantity } else { 1.0 };
        match item.category {
            FlatCategory::Part => job.parts.push(PartLine {
                id: Uuid::new_v4().to_string(),
                part_number: String::new(),
                name: item.description.clone(),
                quantity,
                unit_price: item.unit_price,
            }),
            FlatCategory::Labor | FlatCategory::Fee => job.labor.push(LaborLine {
                id: Uuid::new_v4().to_string(),
                description: item.description.clone(),
                hours: quantity,
                rate: item.unit_price,
            }),
        }
    }
    log::info!(
        "migrated {} flat line item(s) into service job {:?}",
        items.len(),
        FLAT_IMPORT_TITLE
    );
    jobs.push_job(job);
    jobs
}
