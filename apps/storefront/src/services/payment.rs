//! # Payment Gateway
//!
//! Charges the cart total. The storefront ships with a simulated gateway
//! that waits a fixed delay and approves every valid charge.
//!
//! ```text
//!   pay ──► charge(amount, method) ──► sleep(payment_delay) ──► PaymentReceipt
//!                                                                │
//!                                          PIX: copy-and-paste code attached
//! ```

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use delicia_core::validation::validate_payment_amount;
use delicia_core::{Money, PaymentMethod};

use crate::error::ApiError;

/// Proof that a charge went through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub transaction_id: Uuid,
    pub amount: Money,
    pub method: PaymentMethod,
    /// PIX copy-and-paste code; `None` for card payments
    pub pix_payload: Option<String>,
    pub approved_at: DateTime<Utc>,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, amount: Money, method: PaymentMethod)
        -> Result<PaymentReceipt, ApiError>;
}

/// Approves every positive charge after `delay`.
#[derive(Debug, Clone)]
pub struct SimulatedPaymentGateway {
    delay: Duration,
    pix_payload: String,
}

impl SimulatedPaymentGateway {
    pub fn new(delay: Duration, pix_payload: impl Into<String>) -> Self {
        SimulatedPaymentGateway {
            delay,
            pix_payload: pix_payload.into(),
        }
    }

    pub fn pix_payload(&self) -> &str {
        &self.pix_payload
    }
}

#[async_trait]
impl PaymentGateway for SimulatedPaymentGateway {
    async fn charge(
        &self,
        amount: Money,
        method: PaymentMethod,
    ) -> Result<PaymentReceipt, ApiError> {
        validate_payment_amount(amount.cents()).map_err(|e| ApiError::payment(e.to_string()))?;

        debug!(amount = amount.cents(), %method, delay_ms = self.delay.as_millis() as u64, "Processing payment");
        tokio::time::sleep(self.delay).await;

        let receipt = PaymentReceipt {
            transaction_id: Uuid::new_v4(),
            amount,
            method,
            pix_payload: match method {
                PaymentMethod::Pix => Some(self.pix_payload.clone()),
                PaymentMethod::Card => None,
            },
            approved_at: Utc::now(),
        };

        info!(transaction_id = %receipt.transaction_id, amount = amount.cents(), %method, "Payment approved");
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[tokio::test(start_paused = true)]
    async fn test_charge_waits_for_delay() {
        let gateway = SimulatedPaymentGateway::new(Duration::from_millis(2500), "PIX-CODE");
        let started = tokio::time::Instant::now();

        let receipt = gateway
            .charge(Money::from_cents(2590), PaymentMethod::Card)
            .await
            .unwrap();

        assert!(started.elapsed() >= Duration::from_millis(2500));
        assert_eq!(receipt.amount.cents(), 2590);
        assert!(receipt.pix_payload.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pix_receipt_carries_payload() {
        let gateway = SimulatedPaymentGateway::new(Duration::ZERO, "PIX-CODE");
        let receipt = gateway
            .charge(Money::from_cents(100), PaymentMethod::Pix)
            .await
            .unwrap();
        assert_eq!(receipt.pix_payload.as_deref(), Some("PIX-CODE"));
    }

    #[tokio::test]
    async fn test_rejects_non_positive_amount() {
        let gateway = SimulatedPaymentGateway::new(Duration::ZERO, "PIX-CODE");
        let err = gateway
            .charge(Money::zero(), PaymentMethod::Card)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PaymentError);
    }
}
