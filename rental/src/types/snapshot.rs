use serde::{Deserialize, Serialize};

use super::{DiscountSettings, HostGlobalDepositSettings, RevenueSelection, Vehicle};

/// Everything the host tools read and write, as stored in the offline JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostSnapshot {
    #[serde(default)]
    pub deposit_settings: HostGlobalDepositSettings,
    #[serde(default)]
    pub discounts: DiscountSettings,
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
    #[serde(default)]
    pub revenue: RevenueSelection,
}

impl HostSnapshot {
    /// Vehicles counted toward the commission tier.
    pub fn fleet_size(&self) -> u32 {
        self.vehicles.len() as u32
    }
}
