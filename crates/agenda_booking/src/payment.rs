// --- File: crates/agenda_booking/src/payment.rs ---
//! Payment collaborator. No provider is wired in; settling a booking only
//! drives the gateway's status hook.

use crate::dispatch::GatewayDispatcher;
use crate::error::BookingError;
use crate::session::BookingRequest;
use agenda_common::models::EventStatus;
use async_trait::async_trait;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentResult {
    Paid { reference: String },
    Declined { reason: String },
}

#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn process_payment(&self, request: &BookingRequest)
        -> Result<PaymentResult, BookingError>;
}

/// Stands in until a payment provider is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotConfiguredPayments;

#[async_trait]
impl PaymentProvider for NotConfiguredPayments {
    async fn process_payment(
        &self,
        _request: &BookingRequest,
    ) -> Result<PaymentResult, BookingError> {
        Err(BookingError::not_configured(
            "payment",
            vec!["payment.provider"],
        ))
    }
}

/// Charges the booking and, once paid, flips the calendar event to `PAGADO`.
pub async fn settle_booking(
    provider: &dyn PaymentProvider,
    gateway: &GatewayDispatcher,
    request: &BookingRequest,
    event_id: &str,
) -> Result<PaymentResult, BookingError> {
    let result = provider.process_payment(request).await?;
    match &result {
        PaymentResult::Paid { reference } => {
            info!("Payment {} received for event {}", reference, event_id);
            gateway
                .update_event_status(event_id, EventStatus::Paid)
                .await?;
        }
        PaymentResult::Declined { reason } => {
            warn!("Payment for event {} declined: {}", event_id, reason);
        }
    }
    Ok(result)
}
