use reqwest::{Client, Method, Url};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::HostStore;
use crate::error::{RentalError, Result};
use crate::types::{
    DepositModeUpdate, DiscountSettings, HostGlobalDepositSettings, RevenueSelection, Vehicle,
    VehicleDepositMode, VehicleDepositUpdate,
};

/// JSON client for the marketplace host API.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdatedCount {
    updated: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FleetSize {
    active_fleet_size: u32,
}

impl HttpStore {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL with `segments` appended, each percent-encoded on its own.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let invalid = || RentalError::Config(format!("invalid api url {}", self.base_url));
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET a JSON resource.
    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.endpoint(segments)?;
        let resp = self.client.get(url).send().await?;
        Self::decode(resp).await
    }

    /// Send a JSON body with `method` and decode the JSON reply.
    async fn send<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<T> {
        let url = self.endpoint(segments)?;
        debug!(%method, %url, "host api request");
        let resp = self.client.request(method, url).json(body).send().await?;
        Self::decode(resp).await
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(RentalError::Http {
                status,
                message: body,
            });
        }

        resp.json::<T>().await.map_err(RentalError::Request)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl HostStore for HttpStore {
    /// GET /host/vehicles
    async fn fetch_vehicles(&self) -> Result<Vec<Vehicle>> {
        self.get(&["host", "vehicles"]).await
    }

    /// GET /host/deposit-settings
    async fn fetch_deposit_settings(&self) -> Result<HostGlobalDepositSettings> {
        self.get(&["host", "deposit-settings"]).await
    }

    /// PUT /host/deposit-settings
    async fn save_deposit_settings(
        &self,
        settings: &HostGlobalDepositSettings,
    ) -> Result<HostGlobalDepositSettings> {
        self.send(Method::PUT, &["host", "deposit-settings"], settings)
            .await
    }

    /// POST /host/vehicles/deposit-mode
    async fn update_vehicle_deposit_mode(
        &self,
        vehicle_ids: &[String],
        mode: VehicleDepositMode,
    ) -> Result<usize> {
        let body = DepositModeUpdate {
            vehicle_ids: vehicle_ids.to_vec(),
            vehicle_deposit_mode: mode,
        };
        let reply: UpdatedCount = self
            .send(Method::POST, &["host", "vehicles", "deposit-mode"], &body)
            .await?;
        Ok(reply.updated)
    }

    /// PUT /host/vehicles/{id}/deposit
    async fn save_vehicle_deposit(
        &self,
        vehicle_id: &str,
        require_deposit: bool,
        deposit_amount: Option<Decimal>,
    ) -> Result<Vehicle> {
        let body = VehicleDepositUpdate {
            vehicle_id: vehicle_id.to_string(),
            require_deposit,
            deposit_amount,
        };
        self.send(
            Method::PUT,
            &["host", "vehicles", vehicle_id, "deposit"],
            &body,
        )
        .await
    }

    /// GET /host/discounts
    async fn fetch_discounts(&self) -> Result<DiscountSettings> {
        self.get(&["host", "discounts"]).await
    }

    /// PUT /host/discounts
    async fn save_discounts(&self, discounts: &DiscountSettings) -> Result<DiscountSettings> {
        self.send(Method::PUT, &["host", "discounts"], discounts).await
    }

    /// GET /partner/revenue-path
    async fn fetch_revenue_selection(&self) -> Result<RevenueSelection> {
        self.get(&["partner", "revenue-path"]).await
    }

    /// PUT /partner/revenue-path
    async fn save_revenue_selection(
        &self,
        selection: &RevenueSelection,
    ) -> Result<RevenueSelection> {
        self.send(Method::PUT, &["partner", "revenue-path"], selection)
            .await
    }

    /// GET /partner/fleet-size
    async fn fetch_fleet_size(&self) -> Result<u32> {
        let reply: FleetSize = self.get(&["partner", "fleet-size"]).await?;
        Ok(reply.active_fleet_size)
    }
}
