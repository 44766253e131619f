use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DomainError;

/// Fractional digits kept for every stored monetary value.
pub const MONEY_SCALE: u32 = 2;

/// Upper bound of a `DECIMAL(10,2)` column.
pub const MONEY_MAX: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Positive monetary amount for a payment or refund.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, DomainError> {
        if value <= Decimal::ZERO {
            return Err(DomainError::Validation(
                "Amount must be positive".to_string(),
            ));
        }
        if value.normalize().scale() > MONEY_SCALE {
            return Err(DomainError::Validation(format!(
                "Amount {} has more than {} decimal places",
                value, MONEY_SCALE
            )));
        }
        if value > MONEY_MAX {
            return Err(DomainError::Validation(format!(
                "Amount {} exceeds the maximum of {}",
                value, MONEY_MAX
            )));
        }
        Ok(Self(value.round_dp(MONEY_SCALE)))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// Normalizes a value read back from the store to exactly two places.
pub fn to_money(value: Decimal) -> Decimal {
    let mut money = value.round_dp(MONEY_SCALE);
    money.rescale(MONEY_SCALE);
    money
}
