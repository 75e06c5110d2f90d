//! Host and partner actions over a [`HostStore`].
//!
//! Every save goes through one [`SaveGuard`], so repeated clicks cannot start
//! a second request while one is in flight. Amounts are normalized here,
//! before they reach the store.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::commission::resolve_tier;
use crate::deposit::{normalize_settings, resolve_deposit, validate_individual};
use crate::error::{RentalError, Result};
use crate::quote::quote_booking;
use crate::revenue::RevenuePathEditor;
use crate::store::{HostStore, SaveGuard};
use crate::types::{
    BookingQuote, CommissionTier, DiscountSettings, HostGlobalDepositSettings, ResolvedDeposit,
    RevenuePath, RevenueSelection, RevenueTier, TierProgress, Vehicle, VehicleDepositMode,
};

/// One row of the host deposits table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDepositRow {
    pub vehicle: Vehicle,
    pub deposit: ResolvedDeposit,
}

pub struct HostDesk<S> {
    store: S,
    guard: SaveGuard,
}

impl<S: HostStore> HostDesk<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            guard: SaveGuard::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn save_guard(&self) -> &SaveGuard {
        &self.guard
    }

    /// Every vehicle with the deposit a guest would be asked for.
    pub async fn deposits(&self) -> Result<Vec<VehicleDepositRow>> {
        let settings = self.store.fetch_deposit_settings().await?;
        let vehicles = self.store.fetch_vehicles().await?;
        Ok(vehicles
            .into_iter()
            .map(|vehicle| {
                let deposit = resolve_deposit(&vehicle, &settings);
                VehicleDepositRow { vehicle, deposit }
            })
            .collect())
    }

    pub async fn deposit_settings(&self) -> Result<HostGlobalDepositSettings> {
        self.store.fetch_deposit_settings().await
    }

    /// Normalize and save the host's global deposit settings.
    pub async fn save_deposit_settings(
        &self,
        settings: &HostGlobalDepositSettings,
    ) -> Result<HostGlobalDepositSettings> {
        let _ticket = self.guard.try_begin()?;
        let normalized = normalize_settings(settings);
        let saved = self.store.save_deposit_settings(&normalized).await?;
        info!(
            require_deposit = saved.require_deposit,
            default_amount = %saved.default_amount,
            makes = saved.make_deposits.len(),
            "deposit settings saved"
        );
        Ok(saved)
    }

    /// Set or clear one make override. `None` removes it.
    pub async fn set_make_deposit(
        &self,
        make: &str,
        amount: Option<Decimal>,
    ) -> Result<HostGlobalDepositSettings> {
        if make.trim().is_empty() {
            return Err(RentalError::Validation("make must not be empty".into()));
        }
        let mut settings = self.store.fetch_deposit_settings().await?;
        match amount {
            Some(a) => {
                settings.make_deposits.insert(make.trim().to_string(), a);
            }
            None => {
                settings.make_deposits.remove(make.trim());
            }
        }
        self.save_deposit_settings(&settings).await
    }

    /// Save an individual vehicle's own deposit.
    ///
    /// A required deposit without a usable amount is switched off rather than
    /// rejected.
    pub async fn save_vehicle_deposit(
        &self,
        vehicle_id: &str,
        require_deposit: bool,
        deposit_amount: Option<Decimal>,
    ) -> Result<Vehicle> {
        let _ticket = self.guard.try_begin()?;
        let vehicle = self.find_vehicle(vehicle_id).await?;
        if vehicle.vehicle_deposit_mode != VehicleDepositMode::Individual {
            return Err(RentalError::Validation(format!(
                "vehicle {vehicle_id} follows the global settings; move it to individual first"
            )));
        }
        let (require, amount) = validate_individual(vehicle_id, require_deposit, deposit_amount);
        let saved = self
            .store
            .save_vehicle_deposit(vehicle_id, require, amount)
            .await?;
        info!(vehicle_id, require_deposit = require, amount = ?amount, "vehicle deposit saved");
        Ok(saved)
    }

    /// Bulk move vehicles between global and individual mode.
    pub async fn set_deposit_mode(
        &self,
        vehicle_ids: &[String],
        mode: VehicleDepositMode,
    ) -> Result<usize> {
        if vehicle_ids.is_empty() {
            return Ok(0);
        }
        let _ticket = self.guard.try_begin()?;
        let changed = self
            .store
            .update_vehicle_deposit_mode(vehicle_ids, mode)
            .await?;
        info!(mode = %mode, requested = vehicle_ids.len(), changed, "deposit mode updated");
        Ok(changed)
    }

    pub async fn discounts(&self) -> Result<DiscountSettings> {
        self.store.fetch_discounts().await
    }

    pub async fn save_discounts(&self, discounts: &DiscountSettings) -> Result<DiscountSettings> {
        if discounts.weekly_percent > 100 || discounts.monthly_percent > 100 {
            return Err(RentalError::Validation(
                "discounts are percentages between 0 and 100".into(),
            ));
        }
        let _ticket = self.guard.try_begin()?;
        self.store.save_discounts(discounts).await
    }

    /// Current commission tier for the partner's active fleet.
    pub async fn tier_progress(&self, tiers: &[CommissionTier]) -> Result<TierProgress> {
        let fleet_size = self.store.fetch_fleet_size().await?;
        Ok(resolve_tier(fleet_size, tiers))
    }

    pub async fn revenue_selection(&self) -> Result<RevenueSelection> {
        self.store.fetch_revenue_selection().await
    }

    /// Load the saved selection into an editor, apply the choice, and save.
    ///
    /// Returns the editor so callers can report its state and payout.
    pub async fn choose_revenue_path(
        &self,
        path: RevenuePath,
        tier: Option<RevenueTier>,
    ) -> Result<RevenuePathEditor> {
        let saved = self.store.fetch_revenue_selection().await?;
        let mut editor = RevenuePathEditor::new(saved);
        match (path, tier) {
            (RevenuePath::Tiers, Some(t)) => editor.select_tier(t),
            (RevenuePath::Insurance, Some(t)) => {
                warn!(tier = %t, "tier ignored on the insurance path");
                editor.select_path(path);
            }
            (_, None) => editor.select_path(path),
        }

        let _ticket = self.guard.try_begin()?;
        editor
            .save_with(|draft| async move { self.store.save_revenue_selection(&draft).await })
            .await?;
        Ok(editor)
    }

    /// Price a trip on one vehicle.
    pub async fn quote(
        &self,
        vehicle_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<BookingQuote> {
        let vehicle = self.find_vehicle(vehicle_id).await?;
        let settings = self.store.fetch_deposit_settings().await?;
        let discounts = self.store.fetch_discounts().await?;
        quote_booking(&vehicle, &settings, &discounts, start, end)
    }

    async fn find_vehicle(&self, vehicle_id: &str) -> Result<Vehicle> {
        self.store
            .fetch_vehicles()
            .await?
            .into_iter()
            .find(|v| v.id == vehicle_id)
            .ok_or_else(|| RentalError::VehicleNotFound(vehicle_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::JsonFileStore;
    use crate::types::{HostSnapshot, COMMISSION_TIERS};
    use rust_decimal_macros::dec;

    fn vehicle(id: &str, make: &str, rate: Decimal, mode: VehicleDepositMode) -> Vehicle {
        Vehicle {
            id: id.into(),
            make: make.into(),
            model: "X".into(),
            year: 2024,
            daily_rate: rate,
            vehicle_deposit_mode: mode,
            require_deposit: false,
            deposit_amount: None,
        }
    }

    async fn desk_with(snapshot: HostSnapshot) -> (tempfile::TempDir, HostDesk<JsonFileStore>) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("host.json"));
        store.store(&snapshot).await.unwrap();
        (dir, HostDesk::new(store))
    }

    #[tokio::test]
    async fn test_save_settings_normalizes() {
        let (_dir, desk) = desk_with(HostSnapshot::default()).await;
        let mut settings = HostGlobalDepositSettings {
            require_deposit: true,
            default_amount: dec!(480),
            ..Default::default()
        };
        settings.make_deposits.insert("Tesla".into(), dec!(790));
        let saved = desk.save_deposit_settings(&settings).await.unwrap();
        assert_eq!(saved.default_amount, dec!(475));
        assert_eq!(saved.make_deposits["Tesla"], dec!(800));
        assert_eq!(desk.deposit_settings().await.unwrap(), saved);
    }

    #[tokio::test]
    async fn test_save_rejected_while_in_flight() {
        let (_dir, desk) = desk_with(HostSnapshot::default()).await;
        let _ticket = desk.save_guard().try_begin().unwrap();
        let err = desk
            .save_deposit_settings(&HostGlobalDepositSettings::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RentalError::SaveInFlight));
    }

    #[tokio::test]
    async fn test_vehicle_deposit_silently_disabled() {
        let snapshot = HostSnapshot {
            vehicles: vec![vehicle("v1", "Kia", dec!(90), VehicleDepositMode::Individual)],
            ..Default::default()
        };
        let (_dir, desk) = desk_with(snapshot).await;
        let saved = desk.save_vehicle_deposit("v1", true, None).await.unwrap();
        assert!(!saved.require_deposit);
        assert_eq!(saved.deposit_amount, None);

        let saved = desk
            .save_vehicle_deposit("v1", true, Some(dec!(140)))
            .await
            .unwrap();
        assert!(saved.require_deposit);
        assert_eq!(saved.deposit_amount, Some(dec!(150)));
    }

    #[tokio::test]
    async fn test_vehicle_deposit_requires_individual_mode() {
        let snapshot = HostSnapshot {
            vehicles: vec![vehicle("v1", "Kia", dec!(90), VehicleDepositMode::Global)],
            ..Default::default()
        };
        let (_dir, desk) = desk_with(snapshot).await;
        let err = desk
            .save_vehicle_deposit("v1", true, Some(dec!(100)))
            .await
            .unwrap_err();
        assert!(matches!(err, RentalError::Validation(_)));
    }

    #[tokio::test]
    async fn test_deposits_and_quote_agree() {
        let mut snapshot = HostSnapshot {
            vehicles: vec![
                vehicle("v1", "Tesla", dec!(300), VehicleDepositMode::Global),
                vehicle("v2", "Kia", dec!(300), VehicleDepositMode::Global),
            ],
            ..Default::default()
        };
        snapshot.deposit_settings.require_deposit = true;
        snapshot
            .deposit_settings
            .make_deposits
            .insert("Tesla".into(), dec!(800));
        let (_dir, desk) = desk_with(snapshot).await;

        let rows = desk.deposits().await.unwrap();
        let start = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 7, 3).unwrap();
        for row in rows {
            let q = desk.quote(&row.vehicle.id, start, end).await.unwrap();
            assert_eq!(q.deposit, row.deposit.amount);
        }
        assert_eq!(desk.quote("v2", start, end).await.unwrap().deposit, dec!(700));
    }

    #[tokio::test]
    async fn test_tier_progress_from_fleet() {
        let snapshot = HostSnapshot {
            vehicles: (0..12)
                .map(|i| vehicle(&format!("v{i}"), "Kia", dec!(80), VehicleDepositMode::Global))
                .collect(),
            ..Default::default()
        };
        let (_dir, desk) = desk_with(snapshot).await;
        let p = desk.tier_progress(&COMMISSION_TIERS).await.unwrap();
        assert_eq!(p.current.name, "Gold");
        assert_eq!(p.units_to_next, 38);
        assert_eq!(p.progress_percent, 5);
    }

    #[tokio::test]
    async fn test_choose_revenue_path_persists() {
        let (_dir, desk) = desk_with(HostSnapshot::default()).await;
        let editor = desk
            .choose_revenue_path(RevenuePath::Tiers, Some(RevenueTier::Commercial))
            .await
            .unwrap();
        assert_eq!(editor.payout_percent(), Some(90));

        let editor = desk
            .choose_revenue_path(RevenuePath::Insurance, Some(RevenueTier::P2p))
            .await
            .unwrap();
        assert_eq!(editor.saved().revenue_tier, None);
        let stored = desk.revenue_selection().await.unwrap();
        assert_eq!(stored.revenue_path, Some(RevenuePath::Insurance));
        assert_eq!(stored.revenue_tier, None);
    }

    #[tokio::test]
    async fn test_choose_incomplete_tiers_path_fails() {
        let (_dir, desk) = desk_with(HostSnapshot::default()).await;
        let err = desk
            .choose_revenue_path(RevenuePath::Tiers, None)
            .await
            .unwrap_err();
        assert!(matches!(err, RentalError::Validation(_)));
        assert_eq!(desk.revenue_selection().await.unwrap(), RevenueSelection::default());
    }

    #[tokio::test]
    async fn test_set_make_deposit_insert_and_remove() {
        let (_dir, desk) = desk_with(HostSnapshot::default()).await;

        let saved = desk
            .set_make_deposit(" Tesla ", Some(dec!(812.5)))
            .await
            .unwrap();
        assert_eq!(saved.make_deposits["Tesla"], dec!(825));
        assert_eq!(desk.deposit_settings().await.unwrap(), saved);

        let saved = desk.set_make_deposit("Tesla", None).await.unwrap();
        assert!(saved.make_deposits.is_empty());
        assert!(desk
            .deposit_settings()
            .await
            .unwrap()
            .make_deposits
            .is_empty());

        let err = desk.set_make_deposit("  ", Some(dec!(100))).await.unwrap_err();
        assert!(matches!(err, RentalError::Validation(_)));
    }

    #[tokio::test]
    async fn test_set_deposit_mode_seeds_and_persists() {
        let mut snapshot = HostSnapshot {
            vehicles: vec![
                vehicle("v1", "Tesla", dec!(300), VehicleDepositMode::Global),
                vehicle("v2", "Kia", dec!(600), VehicleDepositMode::Global),
            ],
            ..Default::default()
        };
        snapshot.deposit_settings.require_deposit = true;
        snapshot
            .deposit_settings
            .make_deposits
            .insert("Tesla".into(), dec!(800));
        let (_dir, desk) = desk_with(snapshot).await;

        let ids = vec!["v1".to_string(), "v2".to_string()];
        let changed = desk
            .set_deposit_mode(&ids, VehicleDepositMode::Individual)
            .await
            .unwrap();
        assert_eq!(changed, 2);

        let stored = desk.store().load().await.unwrap();
        let v1 = &stored.vehicles[0];
        assert_eq!(v1.vehicle_deposit_mode, VehicleDepositMode::Individual);
        assert!(v1.require_deposit);
        assert_eq!(v1.deposit_amount, Some(dec!(800)));
        let v2 = &stored.vehicles[1];
        assert!(v2.require_deposit);
        assert_eq!(v2.deposit_amount, None);

        let rows = desk.deposits().await.unwrap();
        assert_eq!(rows[0].deposit.amount, dec!(800));
        assert_eq!(rows[1].deposit.amount, dec!(1000));

        assert_eq!(desk.set_deposit_mode(&[], VehicleDepositMode::Global).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_set_deposit_mode_unknown_id_leaves_file() {
        let snapshot = HostSnapshot {
            vehicles: vec![vehicle("v1", "Kia", dec!(90), VehicleDepositMode::Global)],
            ..Default::default()
        };
        let (_dir, desk) = desk_with(snapshot.clone()).await;

        let ids = vec!["v1".to_string(), "ghost".to_string()];
        let err = desk
            .set_deposit_mode(&ids, VehicleDepositMode::Individual)
            .await
            .unwrap_err();
        assert!(matches!(err, RentalError::VehicleNotFound(id) if id == "ghost"));
        assert_eq!(desk.store().load().await.unwrap(), snapshot);
        assert!(desk.save_guard().try_begin().is_ok());
    }

    #[tokio::test]
    async fn test_save_discounts_range() {
        let (_dir, desk) = desk_with(HostSnapshot::default()).await;

        let ok = DiscountSettings {
            weekly_percent: 10,
            monthly_percent: 100,
        };
        assert_eq!(desk.save_discounts(&ok).await.unwrap(), ok);

        let too_much = DiscountSettings {
            weekly_percent: 101,
            monthly_percent: 20,
        };
        let err = desk.save_discounts(&too_much).await.unwrap_err();
        assert!(matches!(err, RentalError::Validation(_)));
        assert_eq!(desk.discounts().await.unwrap(), ok);
    }
}
