//! Typed load boundary for the persisted inspection record.
//!
//! One inspection record exists per job. Its `checklist` column is a
//! JSON map of point name → entry; its `recommendations` column is a
//! JSON map of point name → recommendation that ALSO carries the
//! `service_lines` array inside the same object — a schema-change
//! dodge inherited from the original data, kept so existing readers of
//! the blob keep working. All parsing here is lenient: malformed
//! entries collapse to defaults instead of failing the load.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::checklist::{ChecklistEntry, StoredChecklist};
use crate::recommendation::{Recommendation, StoredRecommendations};
use crate::service_job::ServiceJobList;

/// Key inside the recommendations object that holds the service jobs.
const SERVICE_LINES_KEY: &str = "service_lines";

/// The inspection record as persisted, after the load boundary.
#[derive(Debug, Clone, Default)]
pub struct InspectionRecord {
    pub job_id: String,
    pub checklist: StoredChecklist,
    pub recommendations: StoredRecommendations,
    pub service_lines: ServiceJobList,
    pub updated_at: Option<DateTime<Utc>>,
}

impl InspectionRecord {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            ..Default::default()
        }
    }

    /// Parses the two stored JSON columns. Null or structurally wrong
    /// columns yield empty maps (a job whose inspection has not been
    /// started is represented by exactly this record).
    pub fn from_json(job_id: impl Into<String>, checklist: &Value, recommendations: &Value) -> Self {
        let (recs, service_lines) = split_recommendations(recommendations);
        Self {
            job_id: job_id.into(),
            checklist: checklist_from_value(checklist),
            recommendations: recs,
            service_lines,
            updated_at: None,
        }
    }

    /// The checklist column value.
    pub fn checklist_json(&self) -> Value {
        let mut map = Map::new();
        for (name, entry) in &self.checklist {
            map.insert(
                name.clone(),
                serde_json::to_value(entry).unwrap_or(Value::Null),
            );
        }
        Value::Object(map)
    }

    /// The recommendations column value, with `service_lines` co-located
    /// in the same object.
    pub fn recommendations_json(&self) -> Value {
        let mut map = Map::new();
        for (name, rec) in &self.recommendations {
            map.insert(name.clone(), serde_json::to_value(rec).unwrap_or(Value::Null));
        }
        map.insert(
            SERVICE_LINES_KEY.to_string(),
            serde_json::to_value(&self.service_lines).unwrap_or(Value::Array(Vec::new())),
        );
        Value::Object(map)
    }
}

/// Lenient parse of the checklist column: non-object columns become an
/// empty map, non-object entries become defaults.
fn checklist_from_value(value: &Value) -> StoredChecklist {
    let Value::Object(map) = value else {
        return StoredChecklist::new();
    };
    map.iter()
        .map(|(name, entry)| {
            let entry: ChecklistEntry =
                serde_json::from_value(entry.clone()).unwrap_or_default();
            (name.clone(), entry)
        })
        .collect()
}

/// Splits the stored recommendations object into the per-point map and
/// the embedded service-lines array.
fn split_recommendations(value: &Value) -> (StoredRecommendations, ServiceJobList) {
    let Value::Object(map) = value else {
        return (StoredRecommendations::new(), ServiceJobList::new());
    };

    let mut recs = StoredRecommendations::new();
    let mut service_lines = ServiceJobList::new();

    for (key, entry) in map {
        if key == SERVICE_LINES_KEY {
            if entry.is_array() {
                service_lines =
                    serde_json::from_value(entry.clone()).unwrap_or_default();
            } else {
                log::warn!("inspection load: {SERVICE_LINES_KEY} is not an array, ignoring");
            }
            continue;
        }
        let rec: Recommendation = serde_json::from_value(entry.clone()).unwrap_or_default();
        recs.insert(key.clone(), rec);
    }

    (recs, service_lines)
}
