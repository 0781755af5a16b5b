//! Payment providers for coin purchases.
//!
//! Only `InstantPayment` exists today; mobile-money and card gateways plug in
//! behind the same trait.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

use super::Price;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    OrangeMoney,
    MtnMobileMoney,
    MoovMoney,
    BankCard,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::OrangeMoney,
        PaymentMethod::MtnMobileMoney,
        PaymentMethod::MoovMoney,
        PaymentMethod::BankCard,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::OrangeMoney => "Orange Money",
            PaymentMethod::MtnMobileMoney => "MTN Mobile Money",
            PaymentMethod::MoovMoney => "Moov Money",
            PaymentMethod::BankCard => "Carte Bancaire",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PaymentError {
    #[error("payment via {method} declined: {reason}")]
    Declined {
        method: PaymentMethod,
        reason: String,
    },
}

/// Proof that a charge went through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfirmation {
    pub reference: String,
    pub method: PaymentMethod,
    pub amount: Price,
}

pub trait PaymentProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn charge(
        &self,
        method: PaymentMethod,
        amount: Price,
    ) -> Result<PaymentConfirmation, PaymentError>;
}

/// Accepts every charge immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantPayment;

impl PaymentProvider for InstantPayment {
    fn name(&self) -> &'static str {
        "instant"
    }

    fn charge(
        &self,
        method: PaymentMethod,
        amount: Price,
    ) -> Result<PaymentConfirmation, PaymentError> {
        let reference = format!("instant-{}", Uuid::now_v7());
        tracing::debug!(%reference, %method, %amount, "charge accepted");
        Ok(PaymentConfirmation {
            reference,
            method,
            amount,
        })
    }
}
