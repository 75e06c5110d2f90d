//! Persistence seam for host and partner data.
//!
//! The calculations in this crate never touch a store; callers fetch through a
//! [`HostStore`], compute, and save through it again.

mod file;
mod guard;
mod http;

pub use file::JsonFileStore;
pub use guard::{SaveGuard, SaveTicket};
pub use http::HttpStore;

use rust_decimal::Decimal;

use crate::error::Result;
use crate::types::{
    DiscountSettings, HostGlobalDepositSettings, RevenueSelection, Vehicle, VehicleDepositMode,
};

/// Operations the marketplace backend exposes to the host tools.
///
/// Implementations store what they are given; normalization happens before a
/// value reaches the store.
#[allow(async_fn_in_trait)]
pub trait HostStore {
    async fn fetch_vehicles(&self) -> Result<Vec<Vehicle>>;

    async fn fetch_deposit_settings(&self) -> Result<HostGlobalDepositSettings>;

    async fn save_deposit_settings(
        &self,
        settings: &HostGlobalDepositSettings,
    ) -> Result<HostGlobalDepositSettings>;

    /// Move every listed vehicle to `mode`. Returns how many changed.
    async fn update_vehicle_deposit_mode(
        &self,
        vehicle_ids: &[String],
        mode: VehicleDepositMode,
    ) -> Result<usize>;

    async fn save_vehicle_deposit(
        &self,
        vehicle_id: &str,
        require_deposit: bool,
        deposit_amount: Option<Decimal>,
    ) -> Result<Vehicle>;

    async fn fetch_discounts(&self) -> Result<DiscountSettings>;

    async fn save_discounts(&self, discounts: &DiscountSettings) -> Result<DiscountSettings>;

    async fn fetch_revenue_selection(&self) -> Result<RevenueSelection>;

    async fn save_revenue_selection(&self, selection: &RevenueSelection)
        -> Result<RevenueSelection>;

    /// Number of active vehicles counted toward the commission tier.
    async fn fetch_fleet_size(&self) -> Result<u32>;
}
