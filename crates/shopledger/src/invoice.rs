//! Invoice Compiler — flat taxed invoice from the service-job list.
//!
//! Two input paths: the service-job list when one exists (preferred), or
//! the raw recommendation ledger for legacy records written before
//! service lines existed. Tax applies to the parts subtotal only; labor
//! is never taxed.

use serde::Serialize;

use crate::recommendation::RecommendationLedger;
use crate::service_job::{JobTotals, ServiceJob, ServiceJobList};

/// Indiana sales tax, the rate every call site passes today.
pub const TAX_RATE: f64 = 0.07;

/// One job section on the compiled invoice: the job plus its subtotal.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceSection {
    #[serde(flatten)]
    pub job: ServiceJob,
    pub totals: JobTotals,
}

/// Render-ready invoice. All amounts are rounded to cents.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub sections: Vec<InvoiceSection>,
    pub labor_subtotal: f64,
    pub parts_subtotal: f64,
    pub tax_rate: f64,
    pub tax: f64,
    pub total: f64,
}

impl Invoice {
    /// Compiles from the service-job list.
    pub fn compile(jobs: &ServiceJobList, tax_rate: f64) -> Self {
        Self::from_sections(
            jobs.jobs()
                .iter()
                .map(|job| InvoiceSection {
                    job: job.clone(),
                    totals: job.totals(),
                })
                .collect(),
            tax_rate,
        )
    }

    /// Fallback for records with no service-job list: synthesizes one
    /// pseudo-job per approved recommendation, iterating the ledger in
    /// its deterministic (template) order. Complimentary items carry
    /// zero amounts and so contribute nothing.
    pub fn compile_legacy(ledger: &RecommendationLedger, tax_rate: f64) -> Self {
        Self::compile(&crate::migrate::jobs_from_recommendations(ledger), tax_rate)
    }

    /// Preferred-path dispatch: the service-job list when non-empty,
    /// else the legacy synthesis.
    pub fn compile_from(
        jobs: &ServiceJobList,
        ledger: &RecommendationLedger,
        tax_rate: f64,
    ) -> Self {
        if jobs.is_empty() {
            Self::compile_legacy(ledger, tax_rate)
        } else {
            Self::compile(jobs, tax_rate)
        }
    }

    fn from_sections(sections: Vec<InvoiceSection>, tax_rate: f64) -> Self {
        let labor_subtotal: f64 = sections.iter().map(|s| s.totals.labor_total).sum();
        let parts_subtotal: f64 = sections.iter().map(|s| s.totals.parts_total).sum();
        let labor_subtotal = round_cents(labor_subtotal);
        let parts_subtotal = round_cents(parts_subtotal);
        let tax = round_cents(parts_subtotal * tax_rate);
        Self {
            sections,
            labor_subtotal,
            parts_subtotal,
            tax_rate,
            tax,
            total: round_cents(labor_subtotal + parts_subtotal + tax),
        }
    }
}

/// Rounds to cents. Applied once per aggregate figure at compile time.
fn round_cents(n: f64) -> f64 {
    (n * 100.0).round() / 100.0
}

/// Currency formatting used on rendered invoices: `$12.34`. Non-finite
/// input prints as zero.
pub fn format_currency(n: f64) -> String {
    let n = if n.is_finite() { n } else { 0.0 };
    format!("${n:.2}")
}
