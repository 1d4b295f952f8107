use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SimulatorError;

/// Display currency for a scenario
///
/// Selecting a currency only changes the symbol shown next to amounts.
/// Amounts are always reported in the units the rates were entered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Aed,
    Sar,
    Egp,
    Gbp,
}

impl Currency {
    pub const ALL: [Currency; 6] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Aed,
        Currency::Sar,
        Currency::Egp,
        Currency::Gbp,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Aed => "AED",
            Self::Sar => "SAR",
            Self::Egp => "EGP",
            Self::Gbp => "GBP",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Aed => "د.إ",
            Self::Sar => "﷼",
            Self::Egp => "£",
            Self::Gbp => "£",
        }
    }

    /// Reference rate against USD.
    ///
    /// Listed by `cost-sim currencies` for information only. The pricing
    /// engine never converts with it.
    pub fn reference_rate(self) -> f64 {
        match self {
            Self::Usd => 1.0,
            Self::Eur => 0.88,
            Self::Aed => 3.6725,
            Self::Sar => 3.75,
            Self::Egp => 48.6,
            Self::Gbp => 0.77,
        }
    }

    /// Next currency in lookup order, wrapping around
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous currency in lookup order, wrapping around
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = SimulatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or_else(|| SimulatorError::UnknownCurrency(s.to_string()))
    }
}

impl TryFrom<String> for Currency {
    type Error = SimulatorError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        code.parse()
    }
}
