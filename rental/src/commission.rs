//! Fleet-size commission tiers.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::{CommissionTier, TierProgress};

/// Locate a partner in the tier table.
///
/// `tiers` must be non-empty and ascending by `min_fleet_size`; the first entry
/// is expected to start at zero. `current` is the highest tier the fleet
/// qualifies for. At the top tier `next` is `None` and progress reads 100.
pub fn resolve_tier(fleet_size: u32, tiers: &[CommissionTier]) -> TierProgress {
    let index = tiers
        .iter()
        .enumerate()
        .fold(0, |acc, (i, tier)| {
            if tier.min_fleet_size <= fleet_size {
                i
            } else {
                acc
            }
        });

    let current = tiers[index];
    let next = tiers.get(index + 1).copied();

    let (progress_percent, units_to_next) = match next {
        Some(next) => {
            let span = next.min_fleet_size - current.min_fleet_size;
            let done = fleet_size.saturating_sub(current.min_fleet_size);
            let pct = (Decimal::from(done) * Decimal::ONE_HUNDRED / Decimal::from(span))
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
            (pct.to_u8().unwrap_or(100), next.min_fleet_size - fleet_size)
        }
        None => (100, 0),
    };

    TierProgress {
        current,
        next,
        progress_percent,
        units_to_next,
    }
}

/// Platform share of a booking's gross revenue, rounded to cents.
pub fn commission_amount(gross: Decimal, tier: &CommissionTier) -> Decimal {
    (gross * Decimal::from(tier.commission_percent) / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// What the host keeps after commission.
pub fn host_earnings(gross: Decimal, tier: &CommissionTier) -> Decimal {
    gross - commission_amount(gross, tier)
}
