use super::error::DashboardError;
use crate::models::{Area, ChartPayload, DateRange, DateRangePayload, StatisticsPayload};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

#[async_trait]
pub trait DashboardSource: Send + Sync {
    async fn waiting_area_data(&self) -> Result<ChartPayload, DashboardError>;

    async fn customs_area_data(&self) -> Result<ChartPayload, DashboardError>;

    async fn date_range(&self, range: &DateRange) -> Result<DateRangePayload, DashboardError>;

    async fn statistics(&self, range: &DateRange) -> Result<StatisticsPayload, DashboardError>;

    async fn export_csv(&self, range: &DateRange, area: Area) -> Result<String, DashboardError>;
}

#[derive(Clone)]
pub struct DashboardClient {
    http: Client,
    base_url: String,
}

impl DashboardClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<reqwest::Response, DashboardError> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, ?query, "GET");

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|source| DashboardError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DashboardError::Status { url, status, body });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, DashboardError> {
        let response = self.get(path, query).await?;
        let url = response.url().to_string();
        response
            .json()
            .await
            .map_err(|source| DashboardError::Decode { url, source })
    }
}

#[async_trait]
impl DashboardSource for DashboardClient {
    async fn waiting_area_data(&self) -> Result<ChartPayload, DashboardError> {
        let payload: ChartPayload = self.get_json("/waiting_area_data", &[]).await?;
        payload.validate()?;
        Ok(payload)
    }

    async fn customs_area_data(&self) -> Result<ChartPayload, DashboardError> {
        let payload: ChartPayload = self.get_json("/customs_area_data", &[]).await?;
        payload.validate()?;
        Ok(payload)
    }

    async fn date_range(&self, range: &DateRange) -> Result<DateRangePayload, DashboardError> {
        let payload: DateRangePayload = self.get_json("/get_date_range", &range.query()).await?;
        payload.waiting_area.validate()?;
        payload.customs_area.validate()?;
        Ok(payload)
    }

    async fn statistics(&self, range: &DateRange) -> Result<StatisticsPayload, DashboardError> {
        self.get_json("/get_statistics", &range.query()).await
    }

    async fn export_csv(&self, range: &DateRange, area: Area) -> Result<String, DashboardError> {
        let mut query = range.query().to_vec();
        query.push(("area", area.as_str().to_string()));

        let response = self.get("/export_data_to_csv", &query).await?;
        let url = response.url().to_string();
        response
            .text()
            .await
            .map_err(|source| DashboardError::Http { url, source })
    }
}
