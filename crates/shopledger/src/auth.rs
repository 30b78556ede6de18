//! Role-based authorization for core mutations.
//!
//! The role comes from the excluded auth collaborator; this module only
//! decides what a role may do. Checks live in the core operations and
//! return `PermissionDenied` — hiding a button in the view is not a
//! security boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Staff role as stored on the profile record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Advisor,
    Technician,
}

impl Role {
    /// Parses the stored role string. Missing or unknown roles get the
    /// least-privileged role, matching how the job screens treat a
    /// profile without one.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("admin") => Self::Admin,
            Some("advisor") => Self::Advisor,
            _ => Self::Technician,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Advisor => "advisor",
            Self::Technician => "technician",
        }
    }
}

/// Gated operations. Checklist status/notes, diagnosis text, and job
/// status are open to every role and have no entry here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Estimate amounts, no-cost flag, service-job lines, invoices.
    EditFinancials,
    /// Archiving or restoring a job.
    Archive,
    /// Reassigning the job's technician.
    AssignTech,
}

impl Action {
    fn describe(&self) -> &'static str {
        match self {
            Self::EditFinancials => "edit financial fields",
            Self::Archive => "archive jobs",
            Self::AssignTech => "assign technicians",
        }
    }
}

/// Returned when a role attempts a gated operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("permission denied: {} may not {}", .role.as_str(), .action.describe())]
pub struct PermissionDenied {
    pub role: Role,
    pub action: Action,
}

/// Explicit authorization context passed into gated operations.
#[derive(Debug, Clone, Copy)]
pub struct AuthContext {
    pub role: Role,
}

impl AuthContext {
    pub fn new(role: Role) -> Self {
        Self { role }
    }

    pub fn can(&self, action: Action) -> bool {
        match action {
            Action::EditFinancials | Action::Archive | Action::AssignTech => {
                matches!(self.role, Role::Admin | Role::Advisor)
            }
        }
    }

    /// Errors with `PermissionDenied` unless the role may perform
    /// `action`.
    pub fn require(&self, action: Action) -> Result<(), PermissionDenied> {
        if self.can(action) {
            Ok(())
        } else {
            Err(PermissionDenied {
                role: self.role,
                action,
            })
        }
    }
}
