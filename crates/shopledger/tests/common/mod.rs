//! Shared helpers for the integration suite.

pub mod builders;

#[allow(unused_imports)]
pub use builders::{InspectionBlobBuilder, StoreBuilder};
