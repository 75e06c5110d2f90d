use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Host length-of-trip discounts, in whole percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountSettings {
    /// Applied to trips of 7 days or more.
    #[serde(default)]
    pub weekly_percent: u8,
    /// Applied to trips of 28 days or more; takes precedence over weekly.
    #[serde(default)]
    pub monthly_percent: u8,
}

/// Price breakdown shown in the booking widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingQuote {
    pub vehicle_id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: u32,
    pub daily_rate: Decimal,
    pub subtotal: Decimal,
    pub discount_percent: u8,
    pub discount: Decimal,
    pub total: Decimal,
    /// Pre-authorized separately; not part of `total`.
    pub deposit: Decimal,
}
