//! Recommendation Ledger — proposed repairs for failed checklist points.
//!
//! Keyed by the same point names as the checklist (1:1). A recommendation
//! only carries meaning while its point's status is `fail`; callers filter
//! on the checklist before surfacing entries for decision.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::lenient::{clamp_amount, deserialize_amount, deserialize_text};

/// Customer decision on a recommended repair. Freely reversible; there is
/// no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    #[default]
    Pending,
    Approved,
    Denied,
}

/// A proposed service for one failed point: description, parts/labor
/// estimate, complimentary flag, and the customer's decision.
///
/// Invariant: `no_cost` and nonzero amounts are mutually exclusive —
/// setting the flag zeroes both amounts in the same update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub service: String,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub parts: f64,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub labor: f64,
    #[serde(default)]
    pub no_cost: bool,
    #[serde(default)]
    pub decision: Decision,
}

impl Recommendation {
    /// Combined estimate for this item. Zero when complimentary.
    pub fn estimate(&self) -> f64 {
        self.parts + self.labor
    }

    /// Whether the advisor has quoted this item (an amount or an explicit
    /// complimentary flag).
    pub fn has_quote(&self) -> bool {
        self.estimate() > 0.0 || self.no_cost
    }
}

/// A single field update, as driven by the advisor estimate screen.
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendationUpdate {
    Service(String),
    Parts(f64),
    Labor(f64),
    NoCost(bool),
}

/// Raw stored form: point name → recommendation.
pub type StoredRecommendations = HashMap<String, Recommendation>;

/// In-memory ledger with the same deterministic ordering contract as the
/// checklist: template points first, preserved extras after.
#[derive(Debug, Clone, Default)]
pub struct RecommendationLedger {
    entries: HashMap<String, Recommendation>,
    order: Vec<String>,
}

impl RecommendationLedger {
    /// Same merge policy as the Checklist Store: every template point gets
    /// an entry (stored or default), stored extras are preserved.
    pub fn load_or_init<S: AsRef<str>>(
        template_points: &[S],
        stored: StoredRecommendations,
    ) -> Self {
        let mut entries = HashMap::with_capacity(stored.len().max(template_points.len()));
        let mut order = Vec::with_capacity(stored.len().max(template_points.len()));

        let mut remaining = stored;
        for point in template_points {
            let point = point.as_ref();
            let rec = remaining.remove(point).unwrap_or_default();
            entries.insert(point.to_string(), rec);
            order.push(point.to_string());
        }

        let mut extras: Vec<String> = remaining.keys().cloned().collect();
        extras.sort();
        for name in extras {
            if let Some(rec) = remaining.remove(&name) {
                entries.insert(name.clone(), rec);
                order.push(name);
            }
        }

        Self { entries, order }
    }

    /// Applies one field update to a point's recommendation.
    ///
    /// `NoCost(true)` forces `parts = 0, labor = 0` as part of the same
    /// update. Amount writes while the flag is set are ignored, keeping
    /// the flag and nonzero amounts mutually exclusive.
    pub fn update(&mut self, point: &str, update: RecommendationUpdate) {
        let rec = self.entry_mut(point);
        match update {
            RecommendationUpdate::Service(text) => rec.service = text,
            RecommendationUpdate::Parts(amount) => {
                if !rec.no_cost {
                    rec.parts = clamp_amount(amount);
                }
            }
            RecommendationUpdate::Labor(amount) => {
                if !rec.no_cost {
                    rec.labor = clamp_amount(amount);
                }
            }
            RecommendationUpdate::NoCost(flag) => {
                rec.no_cost = flag;
                if flag {
                    rec.parts = 0.0;
                    rec.labor = 0.0;
                }
            }
        }
    }

    /// Records the customer's decision. Reversible: reopening a decided
    /// item back to pending is allowed and does not retract a service job
    /// already seeded from an earlier approval.
    pub fn set_decision(&mut self, point: &str, decision: Decision) {
        self.entry_mut(point).decision = decision;
    }

    fn entry_mut(&mut self, point: &str) -> &mut Recommendation {
        if !self.entries.contains_key(point) {
            self.order.push(point.to_string());
        }
        self.entries.entry(point.to_string()).or_default()
    }

    pub fn get(&self, point: &str) -> Option<&Recommendation> {
        self.entries.get(point)
    }

    /// Iterates entries in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Recommendation)> {
        self.order
            .iter()
            .filter_map(|name| self.entries.get(name).map(|r| (name.as_str(), r)))
    }

    /// Point names in deterministic order.
    pub fn point_names(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Sum of approved estimates. Complimentary items contribute zero by
    /// construction (their amounts are forced to zero).
    pub fn approved_total(&self) -> f64 {
        self.iter()
            .filter(|(_, r)| r.decision == Decision::Approved)
            .map(|(_, r)| r.estimate())
            .sum()
    }

    /// The raw map form written back to the inspection record.
    pub fn to_stored(&self) -> StoredRecommendations {
        self.entries.clone()
    }
}
