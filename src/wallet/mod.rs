//! Coin bundles and the purchase flow that credits them.

pub mod payment;

use std::fmt;

use crate::catalog::models::User;
use payment::{PaymentError, PaymentMethod, PaymentProvider};

/// Coins needed for one premium chapter, used for bundle blurbs.
pub const CHAPTER_PRICE_COINS: u32 = 5;

/// Amount in minor units of the West African CFA franc (XOF has no
/// subdivision, so one unit is one franc).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price {
    minor_units: u64,
}

impl Price {
    pub const fn xof(minor_units: u64) -> Self {
        Self { minor_units }
    }

    pub const fn minor_units(&self) -> u64 {
        self.minor_units
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} F CFA", self.minor_units)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoinBundle {
    pub coins: u32,
    pub price: Price,
    pub bonus: Option<u32>,
    pub popular: bool,
}

impl CoinBundle {
    /// Coins credited on purchase, bonus included.
    pub fn total_coins(&self) -> u32 {
        self.coins.saturating_add(self.bonus.unwrap_or(0))
    }

    /// How many premium chapters the bundle pays for.
    pub fn premium_chapters(&self) -> u32 {
        self.total_coins() / CHAPTER_PRICE_COINS
    }

    /// Bonus as a whole percentage of the base coins, rounded down.
    pub fn savings_percent(&self) -> Option<u32> {
        let bonus = self.bonus?;
        if self.coins == 0 {
            return None;
        }
        Some((u64::from(bonus) * 100 / u64::from(self.coins)) as u32)
    }
}

/// Bundles offered in the purchase sheet, cheapest first.
pub fn bundles() -> Vec<CoinBundle> {
    vec![
        CoinBundle {
            coins: 100,
            price: Price::xof(200),
            bonus: None,
            popular: false,
        },
        CoinBundle {
            coins: 250,
            price: Price::xof(450),
            bonus: Some(25),
            popular: false,
        },
        CoinBundle {
            coins: 500,
            price: Price::xof(800),
            bonus: Some(100),
            popular: true,
        },
        CoinBundle {
            coins: 1000,
            price: Price::xof(1500),
            bonus: Some(250),
            popular: false,
        },
        CoinBundle {
            coins: 2500,
            price: Price::xof(3500),
            bonus: Some(750),
            popular: false,
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseReceipt {
    pub credited: u32,
    pub price: Price,
    pub method: PaymentMethod,
    pub reference: String,
    pub balance: u32,
}

impl fmt::Display for PurchaseReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "received {} coins for {} via {}",
            self.credited, self.price, self.method
        )
    }
}

/// Charge `provider` for `bundle` and credit the coins. Nothing is credited
/// if the charge fails.
pub fn purchase(
    user: &mut User,
    bundle: &CoinBundle,
    method: PaymentMethod,
    provider: &dyn PaymentProvider,
) -> Result<PurchaseReceipt, PaymentError> {
    let confirmation = provider.charge(method, bundle.price)?;
    let credited = bundle.total_coins();
    let balance = user.credit(credited);

    tracing::info!(
        provider = provider.name(),
        reference = %confirmation.reference,
        credited,
        price = %bundle.price,
        balance,
        "coins purchased"
    );

    Ok(PurchaseReceipt {
        credited,
        price: bundle.price,
        method,
        reference: confirmation.reference,
        balance,
    })
}
