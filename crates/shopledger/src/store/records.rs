//! Record types owned by the external persistence collaborator.
//!
//! These mirror the hosted tables the application reads and writes.
//! Vehicle and customer rows are read-only joins through the job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Work-order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    Draft,
    Scheduled,
    InShop,
    WaitingApproval,
    WaitingParts,
    Ready,
    Invoiced,
}

/// A job row. `vehicle_id` joins to [`Vehicle`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: String,
    pub vehicle_id: String,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub customer_complaint: String,
    #[serde(default)]
    pub tech_diagnosis: String,
    #[serde(default)]
    pub assigned_tech_id: Option<String>,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A vehicle row. `vehicle_type` stays in its stored string form here;
/// the checklist template layer parses it with the `car` fallback.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub customer_id: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub vin: String,
    #[serde(default)]
    pub unit_number: String,
    #[serde(default)]
    pub vehicle_type: Option<String>,
}

/// A customer row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub billing_address: String,
    #[serde(default)]
    pub company_name: String,
}
