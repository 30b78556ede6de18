pub mod auth;
pub mod checklist;
pub mod error;
pub mod inspection;
pub mod invoice;
pub(crate) mod lenient;
pub mod migrate;
pub mod recommendation;
pub mod reconcile;
pub mod service_job;
pub mod session;
pub mod store;
pub mod template;

pub use auth::{Action, AuthContext, PermissionDenied, Role};
pub use checklist::{Checklist, ChecklistEntry, PointStatus};
pub use error::{Result, ShopLedgerError};
pub use inspection::InspectionRecord;
pub use invoice::{format_currency, Invoice, TAX_RATE};
pub use recommendation::{Decision, Recommendation, RecommendationLedger, RecommendationUpdate};
pub use reconcile::ReconcileOutcome;
pub use service_job::{
    JobTotals, LaborLine, LaborLineInit, LaborLineUpdate, PartLine, PartLineInit, PartLineUpdate,
    ServiceJob, ServiceJobList, DEFAULT_LABOR_RATE,
};
pub use session::WorkSession;
pub use store::{InspectionStore, JobStore, MemoryStore, StoreError};
pub use template::VehicleType;
