use serde::Serialize;

/// A fleet-size bracket and the share of gross booking revenue the platform keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionTier {
    pub name: &'static str,
    pub min_fleet_size: u32,
    pub commission_percent: u8,
}

/// Standard commission table, ascending by `min_fleet_size`.
pub const COMMISSION_TIERS: [CommissionTier; 4] = [
    CommissionTier {
        name: "Standard",
        min_fleet_size: 0,
        commission_percent: 25,
    },
    CommissionTier {
        name: "Gold",
        min_fleet_size: 10,
        commission_percent: 20,
    },
    CommissionTier {
        name: "Platinum",
        min_fleet_size: 50,
        commission_percent: 15,
    },
    CommissionTier {
        name: "Diamond",
        min_fleet_size: 100,
        commission_percent: 10,
    },
];

/// A partner's position in the tier table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierProgress {
    pub current: CommissionTier,
    pub next: Option<CommissionTier>,
    /// 0..=100. 100 when already at the top tier.
    pub progress_percent: u8,
    pub units_to_next: u32,
}
