use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use tokio::sync::Mutex;
use tracing::debug;

use super::HostStore;
use crate::deposit;
use crate::error::{RentalError, Result};
use crate::types::{
    DiscountSettings, HostGlobalDepositSettings, HostSnapshot, RevenueSelection, Vehicle,
    VehicleDepositMode,
};

/// Host data kept in a single JSON file.
///
/// Each write reads the whole snapshot, applies the change, and writes it back
/// under a lock. A missing file reads as an empty snapshot.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole snapshot.
    pub async fn load(&self) -> Result<HostSnapshot> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no snapshot yet; starting empty");
                Ok(HostSnapshot::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the whole snapshot.
    pub async fn store(&self, snapshot: &HostSnapshot) -> Result<()> {
        let _held = self.lock.lock().await;
        self.write(snapshot).await
    }

    async fn write(&self, snapshot: &HostSnapshot) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(snapshot)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    async fn update<T>(&self, apply: impl FnOnce(&mut HostSnapshot) -> Result<T>) -> Result<T> {
        let _held = self.lock.lock().await;
        let mut snapshot = self.load().await?;
        let out = apply(&mut snapshot)?;
        self.write(&snapshot).await?;
        Ok(out)
    }
}

impl HostStore for JsonFileStore {
    async fn fetch_vehicles(&self) -> Result<Vec<Vehicle>> {
        Ok(self.load().await?.vehicles)
    }

    async fn fetch_deposit_settings(&self) -> Result<HostGlobalDepositSettings> {
        Ok(self.load().await?.deposit_settings)
    }

    async fn save_deposit_settings(
        &self,
        settings: &HostGlobalDepositSettings,
    ) -> Result<HostGlobalDepositSettings> {
        self.update(|snap| {
            snap.deposit_settings = settings.clone();
            Ok(snap.deposit_settings.clone())
        })
        .await
    }

    async fn update_vehicle_deposit_mode(
        &self,
        vehicle_ids: &[String],
        mode: VehicleDepositMode,
    ) -> Result<usize> {
        self.update(|snap| {
            let settings = snap.deposit_settings.clone();
            deposit::set_deposit_mode(&mut snap.vehicles, vehicle_ids, mode, &settings)
        })
        .await
    }

    async fn save_vehicle_deposit(
        &self,
        vehicle_id: &str,
        require_deposit: bool,
        deposit_amount: Option<Decimal>,
    ) -> Result<Vehicle> {
        self.update(|snap| {
            let vehicle = snap
                .vehicles
                .iter_mut()
                .find(|v| v.id == vehicle_id)
                .ok_or_else(|| RentalError::VehicleNotFound(vehicle_id.to_string()))?;
            vehicle.require_deposit = require_deposit;
            vehicle.deposit_amount = deposit_amount;
            Ok(vehicle.clone())
        })
        .await
    }

    async fn fetch_discounts(&self) -> Result<DiscountSettings> {
        Ok(self.load().await?.discounts)
    }

    async fn save_discounts(&self, discounts: &DiscountSettings) -> Result<DiscountSettings> {
        self.update(|snap| {
            snap.discounts = *discounts;
            Ok(snap.discounts)
        })
        .await
    }

    async fn fetch_revenue_selection(&self) -> Result<RevenueSelection> {
        Ok(self.load().await?.revenue)
    }

    async fn save_revenue_selection(
        &self,
        selection: &RevenueSelection,
    ) -> Result<RevenueSelection> {
        self.update(|snap| {
            snap.revenue = *selection;
            Ok(snap.revenue)
        })
        .await
    }

    async fn fetch_fleet_size(&self) -> Result<u32> {
        Ok(self.load().await?.fleet_size())
    }
}
