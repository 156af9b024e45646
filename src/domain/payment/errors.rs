//! Payment-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | ReferenceNotFound | 404 |
//! | AmbiguousReference | 409 |
//! | AcquirerNotConfigured | 503 |
//! | ProvisioningFailed | 502 |
//! | ConcurrentModification | 409 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, TransactionReference, ValidationError};

/// Message shown to buyers and callers whenever the provider rejects something.
pub const CONTACT_SUPPORT_MESSAGE: &str = "Please contact support.";

/// Message recorded on a transaction whose charge was rejected.
pub const CHARGE_REJECTED_MESSAGE: &str = "Request rejected by Nelo.";

/// Payment-specific errors.
#[derive(Debug, Clone, Error)]
pub enum PaymentError {
    /// No transaction matches the reference.
    #[error("Nelo: received data for reference {0}; no order found.")]
    ReferenceNotFound(TransactionReference),

    /// More than one transaction matches the reference.
    #[error("Nelo: received data for reference {reference}; multiple order found ({count}).")]
    AmbiguousReference {
        reference: TransactionReference,
        count: usize,
    },

    /// No merchant configuration for the provider.
    #[error("No acquirer configured for provider '{0}'")]
    AcquirerNotConfigured(String),

    /// The provider refused to open a checkout session.
    ///
    /// Carries no provider detail on purpose; the raw response is only logged.
    #[error("Please contact support.")]
    ProvisioningFailed,

    /// The transaction kept changing underneath a state write.
    #[error("Transaction {reference} was modified concurrently")]
    ConcurrentModification { reference: TransactionReference },

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl PaymentError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        PaymentError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        PaymentError::Infrastructure(message.into())
    }

    /// Zero or several transactions matched a reference.
    pub fn is_lookup_fault(&self) -> bool {
        matches!(
            self,
            PaymentError::ReferenceNotFound(_) | PaymentError::AmbiguousReference { .. }
        )
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            PaymentError::ReferenceNotFound(_) => ErrorCode::TransactionNotFound,
            PaymentError::AmbiguousReference { .. } => ErrorCode::AmbiguousReference,
            PaymentError::AcquirerNotConfigured(_) => ErrorCode::AcquirerNotConfigured,
            PaymentError::ProvisioningFailed => ErrorCode::ProviderRejected,
            PaymentError::ConcurrentModification { .. } => ErrorCode::ConcurrentModification,
            PaymentError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            PaymentError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Text safe to hand to a caller outside the service.
    pub fn public_message(&self) -> String {
        match self {
            PaymentError::ProvisioningFailed
            | PaymentError::AcquirerNotConfigured(_)
            | PaymentError::Infrastructure(_) => CONTACT_SUPPORT_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<DomainError> for PaymentError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => PaymentError::ValidationFailed {
                field: err.details.get("field").cloned().unwrap_or_default(),
                message: err.message,
            },
            _ => PaymentError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationError> for PaymentError {
    fn from(err: ValidationError) -> Self {
        DomainError::from(err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> TransactionReference {
        TransactionReference::new("ORD-1001").unwrap()
    }

    #[test]
    fn lookup_faults_are_identified() {
        assert!(PaymentError::ReferenceNotFound(reference()).is_lookup_fault());
        assert!(PaymentError::AmbiguousReference {
            reference: reference(),
            count: 2
        }
        .is_lookup_fault());
        assert!(!PaymentError::ProvisioningFailed.is_lookup_fault());
    }

    #[test]
    fn lookup_fault_messages_name_the_reference() {
        let err = PaymentError::ReferenceNotFound(reference());
        assert_eq!(
            err.to_string(),
            "Nelo: received data for reference ORD-1001; no order found."
        );
    }

    #[test]
    fn provisioning_failure_is_generic() {
        let err = PaymentError::ProvisioningFailed;
        assert_eq!(err.to_string(), CONTACT_SUPPORT_MESSAGE);
        assert_eq!(err.public_message(), CONTACT_SUPPORT_MESSAGE);
        assert_eq!(err.code(), ErrorCode::ProviderRejected);
    }

    #[test]
    fn infrastructure_detail_is_not_public() {
        let err = PaymentError::infrastructure("connection refused on 10.0.0.3");
        assert!(!err.public_message().contains("10.0.0.3"));
    }

    #[test]
    fn validation_domain_error_keeps_field() {
        let err: PaymentError = ValidationError::empty_field("email").into();
        match err {
            PaymentError::ValidationFailed { field, .. } => assert_eq!(field, "email"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
