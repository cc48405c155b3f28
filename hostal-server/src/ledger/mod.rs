//! Payment ledger
//!
//! Records a one-time payment against a reservation and moves it from
//! PENDING to ACTIVE. Payments here are local ledger entries; no gateway is
//! involved. Processing is idempotent by reservation: a repeat request
//! returns the existing reference instead of erroring.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::audit::AuditTrail;
use crate::booking::{EngineError, EngineResult};
use crate::domain::{Actor, AuditAction, Payment, PaymentStatus, ReservationStatus};
use crate::store::{PaymentStore, ReservationStore, ServiceStore, StoreError};
use crate::utils::Clock;

const DEFAULT_METHOD: &str = "CARD";
const DEFAULT_CHANNEL: &str = "WEB";

/// Payment request
///
/// `method` and `payment_method` are the same field under two legacy names;
/// either is accepted, with `method` winning when both are present.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentRequest {
    pub reservation_id: i64,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
}

impl PaymentRequest {
    /// First non-blank of the two legacy method fields, defaulting to CARD.
    fn normalized_method(&self) -> String {
        [self.method.as_deref(), self.payment_method.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|m| !m.is_empty())
            .unwrap_or(DEFAULT_METHOD)
            .to_string()
    }
}

/// Outcome of a processed (or re-requested) payment
#[derive(Debug, Clone, Serialize)]
pub struct PaymentOutcome {
    pub success: bool,
    pub message: String,
    pub reference: String,
    pub already_processed: bool,
}

#[derive(Clone)]
pub struct PaymentLedger {
    reservations: Arc<dyn ReservationStore>,
    payments: Arc<dyn PaymentStore>,
    services: Arc<dyn ServiceStore>,
    audit: AuditTrail,
    clock: Arc<dyn Clock>,
}

impl PaymentLedger {
    pub fn new(
        reservations: Arc<dyn ReservationStore>,
        payments: Arc<dyn PaymentStore>,
        services: Arc<dyn ServiceStore>,
        audit: AuditTrail,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            reservations,
            payments,
            services,
            audit,
            clock,
        }
    }

    /// Process a payment for a reservation.
    ///
    /// The payment row and the reservation update (state → ACTIVE, payment
    /// link) form one atomic unit: if the reservation update fails, the
    /// just-created payment is removed again before the error surfaces.
    pub async fn process(
        &self,
        request: PaymentRequest,
        actor: &Actor,
    ) -> EngineResult<PaymentOutcome> {
        if request.reservation_id <= 0 {
            return Err(EngineError::Validation("Invalid reservation id".into()));
        }
        let method = request.normalized_method();

        let mut reservation = self
            .reservations
            .find_by_id(request.reservation_id)
            .await?
            .ok_or_else(|| EngineError::Validation("Reservation not found".into()))?;

        if let Some(existing) = self
            .payments
            .find_by_reservation(reservation.id)
            .await?
        {
            tracing::info!(
                reservation = reservation.id,
                payment = existing.id,
                "Payment already recorded for reservation"
            );
            return Ok(PaymentOutcome {
                success: true,
                message: "The payment was already processed.".into(),
                reference: existing.reference,
                already_processed: true,
            });
        }

        let base_amount = reservation.total_price;
        let services_amount: Decimal = self
            .services
            .find_by_ids(&reservation.service_ids)
            .await?
            .iter()
            .map(|s| s.price)
            .sum();
        let total_amount = base_amount + services_amount;

        let now = self.clock.now();
        let payment = Payment {
            id: 0,
            reservation_id: reservation.id,
            base_amount,
            services_amount,
            total_amount,
            method,
            status: PaymentStatus::Completed,
            reference: format!("REF-{}-{}", now.timestamp_millis(), reservation.id),
            paid_at: now,
            channel: request
                .channel
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .unwrap_or(DEFAULT_CHANNEL)
                .to_string(),
        };

        let payment = self.payments.save(payment).await?;
        if payment.id == 0 {
            return Err(EngineError::Store(StoreError::Backend(
                "Payment id was not generated".into(),
            )));
        }

        // The reservation already passed full validation at creation time;
        // it is updated through the store directly.
        reservation.status = ReservationStatus::Active;
        reservation.payment_id = Some(payment.id);
        if let Err(e) = self.reservations.save(reservation.clone()).await {
            // Roll the unit back: without the reservation link the payment
            // row must not survive.
            let _ = self.payments.delete(payment.id).await;
            return Err(EngineError::Store(e));
        }

        self.audit
            .record(
                actor,
                AuditAction::PaymentProcessed,
                format!(
                    "Payment {} recorded for reservation {} (total {})",
                    payment.reference, reservation.id, payment.total_amount
                ),
                "payment",
                payment.id,
            )
            .await;

        tracing::info!(
            reservation = reservation.id,
            payment = payment.id,
            reference = %payment.reference,
            "Payment processed"
        );

        Ok(PaymentOutcome {
            success: true,
            message: "Payment processed successfully.".into(),
            reference: payment.reference,
            already_processed: false,
        })
    }

    pub async fn find_by_reservation(&self, reservation_id: i64) -> EngineResult<Option<Payment>> {
        Ok(self.payments.find_by_reservation(reservation_id).await?)
    }
}
