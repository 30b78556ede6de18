//! Builder patterns for creating test data programmatically.
//!
//! These builders assemble seeded stores and raw inspection blobs
//! without repetitive boilerplate.

#![allow(dead_code)]

use serde_json::{json, Map, Value};

use shopledger::inspection::InspectionRecord;
use shopledger::store::records::JobRecord;
use shopledger::store::{Customer, JobStatus, MemoryStore, Vehicle};

/// Builder for a `MemoryStore` pre-seeded with one job and its joins.
pub struct StoreBuilder {
    job_id: String,
    status: JobStatus,
    vehicle_type: Option<String>,
    complaint: String,
    customer_name: (String, String),
}

impl StoreBuilder {
    pub fn new(job_id: &str) -> Self {
        Self {
            job_id: job_id.to_string(),
            status: JobStatus::InShop,
            vehicle_type: Some("car".to_string()),
            complaint: String::new(),
            customer_name: ("Alex".to_string(), "Driver".to_string()),
        }
    }

    pub fn vehicle_type(mut self, vt: &str) -> Self {
        self.vehicle_type = Some(vt.to_string());
        self
    }

    pub fn no_vehicle_type(mut self) -> Self {
        self.vehicle_type = None;
        self
    }

    pub fn status(mut self, status: JobStatus) -> Self {
        self.status = status;
        self
    }

    pub fn complaint(mut self, text: &str) -> Self {
        self.complaint = text.to_string();
        self
    }

    pub fn build(self) -> MemoryStore {
        let store = MemoryStore::new();
        let customer_id = format!("{}-cust", self.job_id);
        let vehicle_id = format!("{}-veh", self.job_id);

        store.seed_customer(Customer {
            id: customer_id.clone(),
            first_name: self.customer_name.0,
            last_name: self.customer_name.1,
            ..Default::default()
        });
        store.seed_vehicle(Vehicle {
            id: vehicle_id.clone(),
            customer_id,
            vehicle_type: self.vehicle_type,
            ..Default::default()
        });
        store.seed_job(JobRecord {
            id: self.job_id,
            vehicle_id,
            status: self.status,
            customer_complaint: self.complaint,
            ..Default::default()
        });
        store
    }
}

/// Builder for raw inspection blobs in the persisted JSON shape,
/// including deliberately malformed legacy values.
pub struct InspectionBlobBuilder {
    checklist: Map<String, Value>,
    recommendations: Map<String, Value>,
    service_lines: Option<Value>,
}

impl InspectionBlobBuilder {
    pub fn new() -> Self {
        Self {
            checklist: Map::new(),
            recommendations: Map::new(),
            service_lines: None,
        }
    }

    pub fn point(mut self, name: &str, status: &str, note: &str) -> Self {
        self.checklist
            .insert(name.to_string(), json!({"status": status, "note": note}));
        self
    }

    pub fn raw_point(mut self, name: &str, value: Value) -> Self {
        self.checklist.insert(name.to_string(), value);
        self
    }

    pub fn recommendation(mut self, name: &str, value: Value) -> Self {
        self.recommendations.insert(name.to_string(), value);
        self
    }

    pub fn service_lines(mut self, value: Value) -> Self {
        self.service_lines = Some(value);
        self
    }

    /// Assembles the two stored JSON columns and parses them through
    /// the load boundary.
    pub fn build(self, job_id: &str) -> InspectionRecord {
        let mut recs = self.recommendations;
        if let Some(lines) = self.service_lines {
            recs.insert("service_lines".to_string(), lines);
        }
        InspectionRecord::from_json(job_id, &Value::Object(self.checklist), &Value::Object(recs))
    }
}

impl Default for InspectionBlobBuilder {
    fn default() -> Self {
        Self::new()
    }
}
