use thiserror::Error;

use crate::auth::PermissionDenied;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum ShopLedgerError {
    #[error("job not found: {0}")]
    JobNotFound(String),

    #[error(transparent)]
    Permission(#[from] PermissionDenied),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, ShopLedgerError>;
