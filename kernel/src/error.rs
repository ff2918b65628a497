use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KernelError {
    Validation,
    NotFound,
    Ineligible,
    Conflict,
    Unavailable,
    BillingDeclined,
    Timeout,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::Validation => write!(f, "Validation failed"),
            KernelError::NotFound => write!(f, "Resource not found"),
            KernelError::Ineligible => write!(f, "Cyclist is not allowed to rent"),
            KernelError::Conflict => write!(f, "Conflicting state"),
            KernelError::Unavailable => write!(f, "Resource unavailable"),
            KernelError::BillingDeclined => write!(f, "Billing declined the charge"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
