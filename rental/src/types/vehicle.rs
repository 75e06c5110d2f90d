use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which rule set decides a vehicle's deposit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleDepositMode {
    /// Defer entirely to the host's global deposit settings.
    #[default]
    Global,
    /// Use the vehicle's own `require_deposit` / `deposit_amount`.
    Individual,
}

impl std::fmt::Display for VehicleDepositMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VehicleDepositMode::Global => write!(f, "global"),
            VehicleDepositMode::Individual => write!(f, "individual"),
        }
    }
}

/// A vehicle listing as returned by the host vehicles endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: u16,
    /// Nightly rental price. Never negative.
    pub daily_rate: Decimal,
    #[serde(default)]
    pub vehicle_deposit_mode: VehicleDepositMode,
    /// Only read in individual mode.
    #[serde(default)]
    pub require_deposit: bool,
    /// Only read in individual mode; `None` falls back to the rate-based amount.
    #[serde(default)]
    pub deposit_amount: Option<Decimal>,
}

impl Vehicle {
    /// `"2021 Tesla Model 3"`.
    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.year, self.make, self.model)
    }
}
