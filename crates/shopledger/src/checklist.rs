//! Checklist Store — per-point inspection status and notes for one job.
//!
//! The stored shape is a flat JSON map keyed by point name. On every load
//! the map is reconciled against the vehicle-type template: template
//! points missing from storage are seeded with pending/empty defaults,
//! and stored points no longer in the template are preserved so a
//! template revision never silently drops technician data.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::lenient::deserialize_text;
use crate::template::VehicleType;

/// Status of a single inspection point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointStatus {
    #[default]
    Pending,
    Pass,
    Fail,
    Na,
}

/// One checklist entry. `note` is free text: a failure reason for
/// general points, a tread-depth/PSI measurement for tire positions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChecklistEntry {
    #[serde(default)]
    pub status: PointStatus,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub note: String,
}

/// Raw stored form: point name → entry.
pub type StoredChecklist = HashMap<String, ChecklistEntry>;

/// In-memory checklist with deterministic iteration order: template
/// points first (template order), then preserved extras sorted by name.
#[derive(Debug, Clone, Default)]
pub struct Checklist {
    entries: HashMap<String, ChecklistEntry>,
    order: Vec<String>,
}

impl Checklist {
    /// Reconciles stored data against the template for `vehicle_type`.
    ///
    /// Every template point ends up present (stored entry if any, else a
    /// pending/empty default). Stored points absent from the template are
    /// carried over unchanged.
    pub fn load_or_init(vehicle_type: VehicleType, stored: StoredChecklist) -> Self {
        let template = vehicle_type.template_points();
        let mut entries = HashMap::with_capacity(stored.len().max(template.len()));
        let mut order = Vec::with_capacity(stored.len().max(template.len()));

        let mut remaining = stored;
        let mut seeded = 0usize;
        for point in &template {
            let entry = remaining.remove(*point).unwrap_or_else(|| {
                seeded += 1;
                ChecklistEntry::default()
            });
            entries.insert((*point).to_string(), entry);
            order.push((*point).to_string());
        }

        // Points recorded under an older template revision.
        let mut extras: Vec<String> = remaining.keys().cloned().collect();
        extras.sort();
        for name in extras {
            if let Some(entry) = remaining.remove(&name) {
                entries.insert(name.clone(), entry);
                order.push(name);
            }
        }

        if seeded > 0 {
            log::debug!(
                "checklist merge for {}: seeded {} template point(s), preserved {} total",
                vehicle_type.as_str(),
                seeded,
                entries.len()
            );
        }

        Self { entries, order }
    }

    /// Sets a point's status. In-memory only; the caller persists.
    /// Unknown point names are inserted, matching the stored-map shape.
    pub fn set_status(&mut self, point: &str, status: PointStatus) {
        self.entry_mut(point).status = status;
    }

    /// Sets a point's note text. In-memory only; the caller persists.
    pub fn set_note(&mut self, point: &str, note: impl Into<String>) {
        self.entry_mut(point).note = note.into();
    }

    fn entry_mut(&mut self, point: &str) -> &mut ChecklistEntry {
        if !self.entries.contains_key(point) {
            self.order.push(point.to_string());
        }
        self.entries.entry(point.to_string()).or_default()
    }

    pub fn entry(&self, point: &str) -> Option<&ChecklistEntry> {
        self.entries.get(point)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ChecklistEntry)> {
        self.order
            .iter()
            .filter_map(|name| self.entries.get(name).map(|e| (name.as_str(), e)))
    }

    /// Point names in deterministic order.
    pub fn point_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Points currently marked failed, in deterministic order.
    pub fn failed_points(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, e)| e.status == PointStatus::Fail)
            .map(|(name, _)| name)
            .collect()
    }

    /// The raw map form written back to the inspection record.
    pub fn to_stored(&self) -> StoredChecklist {
        self.entries.clone()
    }
}
