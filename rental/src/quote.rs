//! Booking widget pricing.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::deposit::effective_deposit;
use crate::error::{RentalError, Result};
use crate::types::{BookingQuote, DiscountSettings, HostGlobalDepositSettings, Vehicle};

pub const WEEKLY_MIN_DAYS: u32 = 7;
pub const MONTHLY_MIN_DAYS: u32 = 28;

/// Billable days between pickup and return. Same-day trips bill one day.
pub fn rental_days(start: NaiveDate, end: NaiveDate) -> Result<u32> {
    let days = (end - start).num_days();
    if days < 0 {
        return Err(RentalError::Validation(format!(
            "return date {end} is before pickup date {start}"
        )));
    }
    u32::try_from(days.max(1))
        .map_err(|_| RentalError::Validation(format!("trip of {days} days is too long")))
}

/// Length-of-trip discount in percent. Monthly beats weekly.
pub fn trip_discount_percent(days: u32, discounts: &DiscountSettings) -> u8 {
    if days >= MONTHLY_MIN_DAYS && discounts.monthly_percent > 0 {
        discounts.monthly_percent.min(100)
    } else if days >= WEEKLY_MIN_DAYS {
        discounts.weekly_percent.min(100)
    } else {
        0
    }
}

fn cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Price a trip for the booking widget.
///
/// The deposit comes from [`effective_deposit`], the same function the host
/// dashboard uses, and is not included in `total`.
pub fn quote_booking(
    vehicle: &Vehicle,
    settings: &HostGlobalDepositSettings,
    discounts: &DiscountSettings,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<BookingQuote> {
    let days = rental_days(start, end)?;
    let subtotal = cents(vehicle.daily_rate * Decimal::from(days));
    let discount_percent = trip_discount_percent(days, discounts);
    let discount = cents(subtotal * Decimal::from(discount_percent) / Decimal::ONE_HUNDRED);

    Ok(BookingQuote {
        vehicle_id: vehicle.id.clone(),
        start,
        end,
        days,
        daily_rate: vehicle.daily_rate,
        subtotal,
        discount_percent,
        discount,
        total: subtotal - discount,
        deposit: effective_deposit(vehicle, settings),
    })
}
