use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Host-wide deposit settings applied to every vehicle in global mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostGlobalDepositSettings {
    /// Master switch. When false no global-mode vehicle charges a deposit.
    pub require_deposit: bool,
    /// Fallback for vehicles whose make has no override. Zero means unset.
    #[serde(default)]
    pub default_amount: Decimal,
    /// Per-make overrides keyed by the vehicle's `make` string.
    #[serde(default)]
    pub make_deposits: BTreeMap<String, Decimal>,
}

/// Rate-based deposit bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepositClass {
    Economy,
    Luxury,
    Exotic,
}

impl std::fmt::Display for DepositClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DepositClass::Economy => write!(f, "economy"),
            DepositClass::Luxury => write!(f, "luxury"),
            DepositClass::Exotic => write!(f, "exotic"),
        }
    }
}

/// Where a resolved deposit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositSource {
    /// Deposit switched off (vehicle or host level).
    Disabled,
    /// The vehicle's own `deposit_amount`.
    Vehicle,
    /// The host's per-make override.
    MakeOverride,
    /// The host's default amount.
    HostDefault,
    /// Derived from the daily rate.
    RateBased(DepositClass),
}

/// A resolved deposit together with its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDeposit {
    pub amount: Decimal,
    pub source: DepositSource,
}

/// Body of the bulk deposit-mode update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositModeUpdate {
    pub vehicle_ids: Vec<String>,
    pub vehicle_deposit_mode: super::VehicleDepositMode,
}

/// Body of a single-vehicle deposit save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDepositUpdate {
    pub vehicle_id: String,
    pub require_deposit: bool,
    pub deposit_amount: Option<Decimal>,
}
