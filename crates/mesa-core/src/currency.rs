//! # Currency
//!
//! Display currencies offered in the settings screen.
//!
//! Amounts are never converted: switching currency only changes the symbol
//! and grouping used to render the same number of minor units.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

/// Supported display currencies (ISO 4217 codes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Ves,
    Cop,
    Mxn,
    Ars,
    Pen,
    Clp,
    Brl,
}

impl Currency {
    pub const ALL: [Currency; 9] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Ves,
        Currency::Cop,
        Currency::Mxn,
        Currency::Ars,
        Currency::Pen,
        Currency::Clp,
        Currency::Brl,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Ves => "VES",
            Currency::Cop => "COP",
            Currency::Mxn => "MXN",
            Currency::Ars => "ARS",
            Currency::Pen => "PEN",
            Currency::Clp => "CLP",
            Currency::Brl => "BRL",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Eur => "€",
            Currency::Ves => "Bs.",
            Currency::Pen => "S/",
            Currency::Brl => "R$",
            Currency::Usd
            | Currency::Cop
            | Currency::Mxn
            | Currency::Ars
            | Currency::Clp => "$",
        }
    }

    /// Spanish display name, as shown in the settings dropdown.
    pub fn name(&self) -> &'static str {
        match self {
            Currency::Usd => "Dólar Americano",
            Currency::Eur => "Euro",
            Currency::Ves => "Bolívar Venezolano",
            Currency::Cop => "Peso Colombiano",
            Currency::Mxn => "Peso Mexicano",
            Currency::Ars => "Peso Argentino",
            Currency::Pen => "Sol Peruano",
            Currency::Clp => "Peso Chileno",
            Currency::Brl => "Real Brasileño",
        }
    }

    /// Formats an amount with the symbol, comma thousands and two decimals.
    ///
    /// ```rust
    /// use mesa_core::{Currency, Money};
    ///
    /// assert_eq!(Currency::Usd.format(Money::from_cents(123450)), "$1,234.50");
    /// assert_eq!(Currency::Brl.format(Money::from_cents(999)), "R$9.99");
    /// assert_eq!(Currency::Eur.format(Money::from_cents(-1999)), "-€19.99");
    /// ```
    pub fn format(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        let whole = group_thousands(amount.dollars().unsigned_abs());
        format!(
            "{}{}{}.{:02}",
            sign,
            self.symbol(),
            whole,
            amount.cents_part()
        )
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        Currency::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "currency".to_string(),
                reason: format!("unknown currency code '{}'", s.trim()),
            })
    }
}
