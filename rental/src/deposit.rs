//! Deposit resolution shared by guest checkout and the host dashboard.
//!
//! Both sides must call [`effective_deposit`]; the thresholds and amounts here
//! are the only copy of the rule set.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use tracing::{debug, warn};

use crate::error::{RentalError, Result};
use crate::types::{
    DepositClass, DepositSource, HostGlobalDepositSettings, ResolvedDeposit, Vehicle,
    VehicleDepositMode,
};

/// Saved deposit amounts are multiples of this step.
pub const DEPOSIT_STEP: Decimal = dec!(25);
/// Smallest deposit a host can save.
pub const MIN_DEPOSIT: Decimal = dec!(25);

/// Daily rate at which the luxury bracket starts.
pub const LUXURY_RATE_THRESHOLD: Decimal = dec!(150);
/// Daily rate at which the exotic bracket starts.
pub const EXOTIC_RATE_THRESHOLD: Decimal = dec!(500);

pub const ECONOMY_DEPOSIT: Decimal = dec!(250);
pub const LUXURY_DEPOSIT: Decimal = dec!(700);
pub const EXOTIC_DEPOSIT: Decimal = dec!(1000);

/// Bracket a daily rate falls into.
pub fn deposit_class(daily_rate: Decimal) -> DepositClass {
    if daily_rate < LUXURY_RATE_THRESHOLD {
        DepositClass::Economy
    } else if daily_rate < EXOTIC_RATE_THRESHOLD {
        DepositClass::Luxury
    } else {
        DepositClass::Exotic
    }
}

/// Fallback deposit derived purely from the daily rate.
pub fn rate_based_deposit(daily_rate: Decimal) -> Decimal {
    class_deposit(deposit_class(daily_rate))
}

fn class_deposit(class: DepositClass) -> Decimal {
    match class {
        DepositClass::Economy => ECONOMY_DEPOSIT,
        DepositClass::Luxury => LUXURY_DEPOSIT,
        DepositClass::Exotic => EXOTIC_DEPOSIT,
    }
}

/// Resolve a vehicle's deposit and report which rule produced it.
///
/// Rules are checked in order and the first match wins:
///
/// * individual mode: disabled → 0, own amount verbatim, else rate-based.
/// * global mode: host disabled → 0, make override, nonzero default, else
///   rate-based.
pub fn resolve_deposit(
    vehicle: &Vehicle,
    settings: &HostGlobalDepositSettings,
) -> ResolvedDeposit {
    match vehicle.vehicle_deposit_mode {
        VehicleDepositMode::Individual => {
            if !vehicle.require_deposit {
                return disabled();
            }
            match vehicle.deposit_amount {
                Some(amount) => ResolvedDeposit {
                    amount,
                    source: DepositSource::Vehicle,
                },
                None => rate_based(vehicle.daily_rate),
            }
        }
        VehicleDepositMode::Global => {
            if !settings.require_deposit {
                return disabled();
            }
            if let Some(amount) = settings.make_deposits.get(&vehicle.make) {
                return ResolvedDeposit {
                    amount: *amount,
                    source: DepositSource::MakeOverride,
                };
            }
            if !settings.default_amount.is_zero() {
                return ResolvedDeposit {
                    amount: settings.default_amount,
                    source: DepositSource::HostDefault,
                };
            }
            rate_based(vehicle.daily_rate)
        }
    }
}

/// The deposit a guest must pre-authorize for this vehicle.
pub fn effective_deposit(vehicle: &Vehicle, settings: &HostGlobalDepositSettings) -> Decimal {
    resolve_deposit(vehicle, settings).amount
}

fn disabled() -> ResolvedDeposit {
    ResolvedDeposit {
        amount: Decimal::ZERO,
        source: DepositSource::Disabled,
    }
}

fn rate_based(daily_rate: Decimal) -> ResolvedDeposit {
    let class = deposit_class(daily_rate);
    ResolvedDeposit {
        amount: class_deposit(class),
        source: DepositSource::RateBased(class),
    }
}

/// Round to the nearest multiple of 25 with a floor of 25.
///
/// Applied when an amount is saved, never when it is read.
pub fn normalize_amount(amount: Decimal) -> Decimal {
    let steps =
        (amount / DEPOSIT_STEP).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    (steps * DEPOSIT_STEP).max(MIN_DEPOSIT).normalize()
}

/// Normalize every amount in the host settings before they are saved.
///
/// Make overrides with a blank name are dropped and names are trimmed. When
/// two names trim to the same make, the exact spelling wins and the padded
/// duplicate is dropped with a warning. A zero default stays zero (meaning
/// "unset").
pub fn normalize_settings(settings: &HostGlobalDepositSettings) -> HostGlobalDepositSettings {
    let default_amount = if settings.default_amount > Decimal::ZERO {
        normalize_amount(settings.default_amount)
    } else {
        Decimal::ZERO
    };

    // Exact names first so a padded duplicate never displaces them.
    let (exact, padded): (Vec<_>, Vec<_>) = settings
        .make_deposits
        .iter()
        .partition(|(make, _)| make.trim() == make.as_str());

    let mut make_deposits = BTreeMap::new();
    for (make, amount) in exact.into_iter().chain(padded) {
        let trimmed = make.trim();
        if trimmed.is_empty() {
            continue;
        }
        match make_deposits.entry(trimmed.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(normalize_amount(*amount));
            }
            Entry::Occupied(kept) => {
                warn!(
                    make = %make,
                    kept = %kept.key(),
                    "duplicate make override dropped"
                );
            }
        }
    }

    HostGlobalDepositSettings {
        require_deposit: settings.require_deposit,
        default_amount,
        make_deposits,
    }
}

/// Validate an individual vehicle's deposit before it is saved.
///
/// Returns the `(require_deposit, deposit_amount)` pair to persist. A missing
/// or non-positive amount with `require_deposit` set silently turns the deposit
/// off instead of rejecting the save.
pub fn validate_individual(
    vehicle_id: &str,
    require_deposit: bool,
    deposit_amount: Option<Decimal>,
) -> (bool, Option<Decimal>) {
    let amount = deposit_amount
        .filter(|a| *a > Decimal::ZERO)
        .map(normalize_amount);

    match (require_deposit, amount) {
        (true, Some(a)) if a >= MIN_DEPOSIT => (true, Some(a)),
        (true, _) => {
            // TODO: report the disable back to the caller instead of only logging it.
            warn!(
                vehicle_id,
                "deposit required but no valid amount given; disabling deposit"
            );
            (false, None)
        }
        (false, amount) => (false, amount),
    }
}

/// Hand a vehicle back to the host's global settings.
///
/// Its own deposit fields are left untouched so moving back restores them.
pub fn move_to_global(vehicle: &mut Vehicle) {
    vehicle.vehicle_deposit_mode = VehicleDepositMode::Global;
}

/// Take a vehicle out of the global settings.
///
/// The vehicle's own fields are seeded from what it currently resolves to, so
/// the amount a guest sees does not change at the moment of the move.
pub fn move_to_individual(vehicle: &mut Vehicle, settings: &HostGlobalDepositSettings) {
    if vehicle.vehicle_deposit_mode == VehicleDepositMode::Individual {
        return;
    }
    let resolved = resolve_deposit(vehicle, settings);
    let (require, amount) = match resolved.source {
        DepositSource::Disabled => (false, None),
        DepositSource::RateBased(_) => (true, None),
        DepositSource::Vehicle | DepositSource::MakeOverride | DepositSource::HostDefault => {
            (true, Some(resolved.amount))
        }
    };
    vehicle.vehicle_deposit_mode = VehicleDepositMode::Individual;
    vehicle.require_deposit = require;
    vehicle.deposit_amount = amount;
}

/// Switch the deposit mode of every listed vehicle.
///
/// All ids are checked before anything changes; an unknown id fails the whole
/// update. Returns the number of vehicles whose mode actually changed.
pub fn set_deposit_mode(
    vehicles: &mut [Vehicle],
    vehicle_ids: &[String],
    mode: VehicleDepositMode,
    settings: &HostGlobalDepositSettings,
) -> Result<usize> {
    if let Some(missing) = vehicle_ids
        .iter()
        .find(|id| !vehicles.iter().any(|v| &v.id == *id))
    {
        return Err(RentalError::VehicleNotFound(missing.clone()));
    }

    let mut changed = 0;
    for vehicle in vehicles.iter_mut().filter(|v| vehicle_ids.contains(&v.id)) {
        if vehicle.vehicle_deposit_mode == mode {
            continue;
        }
        match mode {
            VehicleDepositMode::Global => move_to_global(vehicle),
            VehicleDepositMode::Individual => move_to_individual(vehicle, settings),
        }
        debug!(vehicle_id = %vehicle.id, mode = %mode, "deposit mode changed");
        changed += 1;
    }
    Ok(changed)
}
