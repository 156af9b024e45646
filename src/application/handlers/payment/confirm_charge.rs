//! ConfirmChargeHandler - Command handler for the provider's confirm redirect.
//!
//! Runs the two-phase charge for the order referenced by the checkout token:
//!
//! 1. Decode the token claims (unverified; the reference is only a lookup hint)
//! 2. Resolve the acquirer for the provider
//! 3. Auth, then capture, with the same `ChargeRequest`
//! 4. Record the failure on the transaction, or finalize it
//!
//! Auth and capture are not atomic. A capture failure after a successful
//! auth leaves the charge authorized at the provider; the transaction
//! records `authorized_at` without `captured_at` so an operator can see it.
//! No reconciliation is attempted here.

use std::fmt;
use std::sync::Arc;

use crate::domain::foundation::{Timestamp, TransactionReference};
use crate::domain::payment::{
    try_decode_claims, ChargeProgress, FinalizeOutcome, PaymentError, TokenDecodeError,
    CHARGE_REJECTED_MESSAGE,
};
use crate::ports::{AcquirerConfigStore, ChargeRequest, CheckoutGateway, GatewayFault};

use super::transaction_state::{
    FinalizeTransactionCommand, MarkTransactionErrorCommand, TransactionStateHandler,
};

/// Command carrying the token from a confirm redirect.
#[derive(Debug, Clone)]
pub struct ConfirmChargeCommand {
    pub provider: String,
    pub checkout_token: String,
}

/// Which remote call of the charge failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargePhase {
    Auth,
    Capture,
}

impl fmt::Display for ChargePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChargePhase::Auth => write!(f, "auth"),
            ChargePhase::Capture => write!(f, "capture"),
        }
    }
}

/// A failed auth or capture call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeFault {
    pub phase: ChargePhase,
    pub fault: GatewayFault,
}

/// Why a confirm delivery was not acted upon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotApplicableReason {
    /// The token could not be decoded at all.
    MalformedToken(TokenDecodeError),
    /// The claims decoded but carry no order reference.
    NoOrderReference,
    /// No merchant configuration for the provider segment.
    UnknownProvider(String),
}

/// Result of a confirm delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmChargeOutcome {
    NotApplicable { reason: NotApplicableReason },
    /// Charge succeeded and this delivery moved the transaction to `done`.
    Finalized { reference: TransactionReference },
    /// Charge succeeded but another delivery had already finalized.
    AlreadyDone { reference: TransactionReference },
    /// Auth or capture failed; the transaction was marked as error.
    ChargeFailed {
        reference: TransactionReference,
        fault: ChargeFault,
    },
}

pub struct ConfirmChargeHandler {
    acquirers: Arc<dyn AcquirerConfigStore>,
    gateway: Arc<dyn CheckoutGateway>,
    transactions: Arc<TransactionStateHandler>,
}

impl ConfirmChargeHandler {
    pub fn new(
        acquirers: Arc<dyn AcquirerConfigStore>,
        gateway: Arc<dyn CheckoutGateway>,
        transactions: Arc<TransactionStateHandler>,
    ) -> Self {
        Self {
            acquirers,
            gateway,
            transactions,
        }
    }

    /// # Errors
    ///
    /// Lookup faults and persistence failures from the state write. Remote
    /// charge failures are reported as `ChargeFailed`, not as errors.
    pub async fn handle(
        &self,
        cmd: ConfirmChargeCommand,
    ) -> Result<ConfirmChargeOutcome, PaymentError> {
        let claims = match try_decode_claims(&cmd.checkout_token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::warn!(provider = %cmd.provider, error = %e, "Checkout token could not be decoded");
                return Ok(not_applicable(NotApplicableReason::MalformedToken(e)));
            }
        };

        let Some(reference) = claims.order_reference() else {
            tracing::info!(provider = %cmd.provider, "Checkout token carries no order reference");
            return Ok(not_applicable(NotApplicableReason::NoOrderReference));
        };

        let Some(acquirer) = self.acquirers.find_by_provider(&cmd.provider).await? else {
            tracing::warn!(provider = %cmd.provider, reference = %reference, "No acquirer configured");
            return Ok(not_applicable(NotApplicableReason::UnknownProvider(
                cmd.provider,
            )));
        };

        let request = ChargeRequest::new(cmd.checkout_token.as_str());
        let mut progress = ChargeProgress::new();

        let charged = match self.gateway.authorize(&acquirer, &request).await {
            Err(fault) => Err(ChargeFault {
                phase: ChargePhase::Auth,
                fault,
            }),
            Ok(()) => {
                progress.record_authorized(Timestamp::now());
                match self.gateway.capture(&acquirer, &request).await {
                    Err(fault) => Err(ChargeFault {
                        phase: ChargePhase::Capture,
                        fault,
                    }),
                    Ok(()) => {
                        progress.record_captured(Timestamp::now());
                        Ok(())
                    }
                }
            }
        };

        if let Err(fault) = charged {
            tracing::error!(
                reference = %reference,
                phase = %fault.phase,
                fault_kind = fault.fault.kind(),
                status = ?fault.fault.status_code(),
                error = %fault.fault,
                "Nelo charge failed"
            );
            self.transactions
                .mark_error(MarkTransactionErrorCommand {
                    reference: reference.clone(),
                    message: CHARGE_REJECTED_MESSAGE.to_string(),
                    progress,
                })
                .await?;
            return Ok(ConfirmChargeOutcome::ChargeFailed { reference, fault });
        }

        let outcome = self
            .transactions
            .finalize(FinalizeTransactionCommand {
                reference: reference.clone(),
                acquirer_reference: reference.to_string(),
                progress,
            })
            .await?;

        Ok(match outcome {
            FinalizeOutcome::Finalized => ConfirmChargeOutcome::Finalized { reference },
            FinalizeOutcome::AlreadyDone => ConfirmChargeOutcome::AlreadyDone { reference },
        })
    }
}

fn not_applicable(reason: NotApplicableReason) -> ConfirmChargeOutcome {
    ConfirmChargeOutcome::NotApplicable { reason }
}
