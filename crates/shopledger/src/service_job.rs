//! Service Job Aggregator — independently editable repair line items.
//!
//! A service job is a titled container of labor and part sub-lines. The
//! list is stored inside the inspection record's recommendations blob
//! (the `service_lines` array) rather than its own table; field names in
//! the stored shape (`desc`, `qty`, `price`, `partNumber`) are the blob's
//! historical spelling and are kept for compatibility.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::lenient::{clamp_amount, deserialize_amount, deserialize_id, deserialize_text};

/// Default hourly labor rate applied to new labor lines.
pub const DEFAULT_LABOR_RATE: f64 = 120.0;

/// One labor entry on a service job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaborLine {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(rename = "desc", default, deserialize_with = "deserialize_text")]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub hours: f64,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub rate: f64,
}

impl LaborLine {
    pub fn amount(&self) -> f64 {
        self.hours * self.rate
    }
}

/// One part entry on a service job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartLine {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(rename = "partNumber", default, deserialize_with = "deserialize_text")]
    pub part_number: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub name: String,
    #[serde(rename = "qty", default, deserialize_with = "deserialize_amount")]
    pub quantity: f64,
    #[serde(rename = "price", default, deserialize_with = "deserialize_amount")]
    pub unit_price: f64,
}

impl PartLine {
    pub fn amount(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

/// A titled repair with its labor and part lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceJob {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub title: String,
    #[serde(default)]
    pub labor: Vec<LaborLine>,
    #[serde(default)]
    pub parts: Vec<PartLine>,
}

/// Derived totals for one job or a whole list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobTotals {
    pub labor_total: f64,
    pub parts_total: f64,
    pub total: f64,
}

impl ServiceJob {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            labor: Vec::new(),
            parts: Vec::new(),
        }
    }

    /// Sums the job's lines. Amount fields were clamped on write and at
    /// the load boundary, so this never sees NaN.
    pub fn totals(&self) -> JobTotals {
        let labor_total: f64 = self.labor.iter().map(LaborLine::amount).sum();
        let parts_total: f64 = self.parts.iter().map(PartLine::amount).sum();
        JobTotals {
            labor_total,
            parts_total,
            total: labor_total + parts_total,
        }
    }
}

/// Initial values for a new labor line. Rate defaults to the shop rate.
#[derive(Debug, Clone)]
pub struct LaborLineInit {
    pub description: String,
    pub hours: f64,
    pub rate: f64,
}

impl Default for LaborLineInit {
    fn default() -> Self {
        Self {
            description: String::new(),
            hours: 0.0,
            rate: DEFAULT_LABOR_RATE,
        }
    }
}

/// Initial values for a new part line. Quantity defaults to 1.
#[derive(Debug, Clone)]
pub struct PartLineInit {
    pub part_number: String,
    pub name: String,
    pub quantity: f64,
    pub unit_price: f64,
}

impl Default for PartLineInit {
    fn default() -> Self {
        Self {
            part_number: String::new(),
            name: String::new(),
            quantity: 1.0,
            unit_price: 0.0,
        }
    }
}

/// A single labor-line field update.
#[derive(Debug, Clone, PartialEq)]
pub enum LaborLineUpdate {
    Description(String),
    Hours(f64),
    Rate(f64),
}

/// A single part-line field update.
#[derive(Debug, Clone, PartialEq)]
pub enum PartLineUpdate {
    PartNumber(String),
    Name(String),
    Quantity(f64),
    UnitPrice(f64),
}

/// The editable list of service jobs for one work order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceJobList {
    jobs: Vec<ServiceJob>,
}

impl ServiceJobList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_jobs(jobs: Vec<ServiceJob>) -> Self {
        Self { jobs }
    }

    pub fn jobs(&self) -> &[ServiceJob] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Appends a new empty job and returns its id.
    pub fn add_job(&mut self, title: impl Into<String>) -> String {
        let job = ServiceJob::new(title);
        let id = job.id.clone();
        self.jobs.push(job);
        id
    }

    /// Appends an already-built job (used by the reconciler and
    /// migrations).
    pub fn push_job(&mut self, job: ServiceJob) {
        self.jobs.push(job);
    }

    /// Removes a job and all its lines. Destructive; call sites confirm
    /// with the user first. Returns whether a job was removed.
    pub fn remove_job(&mut self, job_id: &str) -> bool {
        let before = self.jobs.len();
        self.jobs.retain(|j| j.id != job_id);
        before != self.jobs.len()
    }

    pub fn get(&self, job_id: &str) -> Option<&ServiceJob> {
        self.jobs.iter().find(|j| j.id == job_id)
    }

    /// Exact-title lookup used by the reconciliation bridge.
    pub fn find_by_title(&self, title: &str) -> Option<&ServiceJob> {
        self.jobs.iter().find(|j| j.title == title)
    }

    pub fn set_title(&mut self, job_id: &str, title: impl Into<String>) -> bool {
        match self.job_mut(job_id) {
            Some(job) => {
                job.title = title.into();
                true
            }
            None => false,
        }
    }

    /// Adds a labor line; returns the new line id if the job exists.
    pub fn add_labor_line(&mut self, job_id: &str, init: LaborLineInit) -> Option<String> {
        let job = self.job_mut(job_id)?;
        let line = LaborLine {
            id: Uuid::new_v4().to_string(),
            description: init.description,
            hours: clamp_amount(init.hours),
            rate: clamp_amount(init.rate),
        };
        let id = line.id.clone();
        job.labor.push(line);
        Some(id)
    }

    pub fn update_labor_line(
        &mut self,
        job_id: &str,
        line_id: &str,
        update: LaborLineUpdate,
    ) -> bool {
        let Some(line) = self
            .job_mut(job_id)
            .and_then(|j| j.labor.iter_mut().find(|l| l.id == line_id))
        else {
            return false;
        };
        match update {
            LaborLineUpdate::Description(text) => line.description = text,
            LaborLineUpdate::Hours(h) => line.hours = clamp_amount(h),
            LaborLineUpdate::Rate(r) => line.rate = clamp_amount(r),
        }
        true
    }

    pub fn remove_labor_line(&mut self, job_id: &str, line_id: &str) -> bool {
        let Some(job) = self.job_mut(job_id) else {
            return false;
        };
        let before = job.labor.len();
        job.labor.retain(|l| l.id != line_id);
        before != job.labor.len()
    }

    /// Adds a part line; returns the new line id if the job exists.
    pub fn add_part_line(&mut self, job_id: &str, init: PartLineInit) -> Option<String> {
        let job = self.job_mut(job_id)?;
        let line = PartLine {
            id: Uuid::new_v4().to_string(),
            part_number: init.part_number,
            name: init.name,
            quantity: clamp_amount(init.quantity),
            unit_price: clamp_amount(init.unit_price),
        };
        let id = line.id.clone();
        job.parts.push(line);
        Some(id)
    }

    pub fn update_part_line(&mut self, job_id: &str, line_id: &str, update: PartLineUpdate) -> bool {
        let Some(line) = self
            .job_mut(job_id)
            .and_then(|j| j.parts.iter_mut().find(|l| l.id == line_id))
        else {
            return false;
        };
        match update {
            PartLineUpdate::PartNumber(text) => line.part_number = text,
            PartLineUpdate::Name(text) => line.name = text,
            PartLineUpdate::Quantity(q) => line.quantity = clamp_amount(q),
            PartLineUpdate::UnitPrice(p) => line.unit_price = clamp_amount(p),
        }
        true
    }

    pub fn remove_part_line(&mut self, job_id: &str, line_id: &str) -> bool {
        let Some(job) = self.job_mut(job_id) else {
            return false;
        };
        let before = job.parts.len();
        job.parts.retain(|l| l.id != line_id);
        before != job.parts.len()
    }

    /// Grand totals across all jobs.
    pub fn grand_totals(&self) -> JobTotals {
        let mut labor_total = 0.0;
        let mut parts_total = 0.0;
        for job in &self.jobs {
            let t = job.totals();
            labor_total += t.labor_total;
            parts_total += t.parts_total;
        }
        JobTotals {
            labor_total,
            parts_total,
            total: labor_total + parts_total,
        }
    }

    fn job_mut(&mut self, job_id: &str) -> Option<&mut ServiceJob> {
        self.jobs.iter_mut().find(|j| j.id == job_id)
    }
}
