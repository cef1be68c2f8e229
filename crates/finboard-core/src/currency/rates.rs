use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FinboardError;
use crate::types::{Currency, Money, Rate};
use crate::FinboardResult;

/// Units of `currency` bought by one reference unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub currency: Currency,
    pub units_per_reference: Rate,
}

/// Conversion table between the reference unit and display currencies.
///
/// Engine figures are always in `reference`; conversion happens only at the
/// presentation boundary, after every derived figure has been computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRateTable {
    pub reference: Currency,
    pub rates: Vec<ExchangeRate>,
}

impl Default for ExchangeRateTable {
    fn default() -> Self {
        ExchangeRateTable {
            reference: Currency::USD,
            rates: vec![
                ExchangeRate {
                    currency: Currency::USD,
                    units_per_reference: Decimal::ONE,
                },
                ExchangeRate {
                    currency: Currency::GBP,
                    units_per_reference: dec!(0.79),
                },
                ExchangeRate {
                    currency: Currency::INR,
                    units_per_reference: dec!(83.45),
                },
            ],
        }
    }
}

impl ExchangeRateTable {
    /// Check the table is usable: positive rates, no duplicates, and the
    /// reference unit (if listed) quoted at exactly 1.
    pub fn validate(&self) -> FinboardResult<()> {
        for (i, entry) in self.rates.iter().enumerate() {
            if entry.units_per_reference <= Decimal::ZERO {
                return Err(FinboardError::CurrencyError(format!(
                    "Rate for {} must be positive, got {}",
                    entry.currency, entry.units_per_reference
                )));
            }
            if entry.currency == self.reference && entry.units_per_reference != Decimal::ONE {
                return Err(FinboardError::CurrencyError(format!(
                    "Reference currency {} must be quoted at 1, got {}",
                    entry.currency, entry.units_per_reference
                )));
            }
            if self.rates[..i].iter().any(|e| e.currency == entry.currency) {
                return Err(FinboardError::CurrencyError(format!(
                    "Duplicate rate for {}",
                    entry.currency
                )));
            }
        }
        Ok(())
    }

    /// Multiplier from the reference unit into `currency`.
    pub fn rate_for(&self, currency: &Currency) -> FinboardResult<Rate> {
        if *currency == self.reference {
            return Ok(Decimal::ONE);
        }
        let entry = self
            .rates
            .iter()
            .find(|e| e.currency == *currency)
            .ok_or_else(|| {
                FinboardError::CurrencyError(format!(
                    "No exchange rate from {} to {}",
                    self.reference, currency
                ))
            })?;
        if entry.units_per_reference <= Decimal::ZERO {
            return Err(FinboardError::CurrencyError(format!(
                "Rate for {} must be positive, got {}",
                currency, entry.units_per_reference
            )));
        }
        Ok(entry.units_per_reference)
    }

    /// Reference-unit amount expressed in `to`.
    pub fn convert(&self, amount: Money, to: &Currency) -> FinboardResult<Money> {
        let rate = self.rate_for(to)?;
        amount.checked_mul(rate).ok_or_else(|| {
            FinboardError::CurrencyError(format!("Overflow converting {amount} into {to}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_valid() {
        let table = ExchangeRateTable::default();
        assert!(table.validate().is_ok());
        assert_eq!(table.reference, Currency::USD);
        assert_eq!(table.rates.len(), 3);
    }

    #[test]
    fn test_convert_uses_rate() {
        let table = ExchangeRateTable::default();
        assert_eq!(table.convert(dec!(100), &Currency::GBP).unwrap(), dec!(79));
        assert_eq!(table.convert(dec!(2), &Currency::INR).unwrap(), dec!(166.90));
        assert_eq!(table.convert(dec!(5), &Currency::USD).unwrap(), dec!(5));
    }

    #[test]
    fn test_unknown_currency_rejected() {
        let table = ExchangeRateTable::default();
        let err = table.convert(dec!(1), &Currency::EUR).unwrap_err();
        assert!(matches!(err, FinboardError::CurrencyError(_)));
    }

    #[test]
    fn test_validate_rejects_bad_tables() {
        let mut table = ExchangeRateTable::default();
        table.rates[1].units_per_reference = Decimal::ZERO;
        assert!(table.validate().is_err());

        let mut table = ExchangeRateTable::default();
        table.rates[0].units_per_reference = dec!(1.1);
        assert!(table.validate().is_err());

        let mut table = ExchangeRateTable::default();
        table.rates.push(ExchangeRate {
            currency: Currency::GBP,
            units_per_reference: dec!(0.8),
        });
        assert!(table.validate().is_err());
    }
}
