//! Janice appraisal client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::AppraisalConfig;
use crate::error::{LootError, LootResult};
use crate::models::{Isk, decimal_to_isk};

use super::Appraiser;

const API_KEY_HEADER: &str = "X-ApiKey";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppraisalResponse {
    immediate_prices: ImmediatePrices,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImmediatePrices {
    total_buy_price: Decimal,
}

/// Extracts `immediatePrices.totalBuyPrice` from an appraisal response, floored.
///
/// A body that cannot be read as an appraisal yields 0.
///
/// # Examples
///
/// ```
/// use loot_split::appraisal::parse_total_buy_price;
///
/// let body = r#"{"immediatePrices": {"totalBuyPrice": 1234567.89}}"#;
/// assert_eq!(parse_total_buy_price(body), 1_234_567);
/// assert_eq!(parse_total_buy_price("<html>oops</html>"), 0);
/// ```
pub fn parse_total_buy_price(body: &str) -> Isk {
    let parsed = serde_json::from_str::<AppraisalResponse>(body)
        .map_err(|e| e.to_string())
        .and_then(|r| {
            decimal_to_isk(r.immediate_prices.total_buy_price.floor()).map_err(|e| e.to_string())
        });

    match parsed {
        Ok(total) => total,
        Err(message) => {
            warn!(error = %message, "Unreadable appraisal response, reporting 0");
            0
        }
    }
}

/// Appraiser backed by the Janice REST API.
#[derive(Debug, Clone)]
pub struct JaniceAppraiser {
    http: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl JaniceAppraiser {
    /// Builds a client from configuration and an already-resolved API key.
    pub fn from_config(config: &AppraisalConfig, api_key: Option<String>) -> LootResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LootError::Appraisal {
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl Appraiser for JaniceAppraiser {
    async fn appraise(&self, loot: &str) -> LootResult<Isk> {
        let api_key = self.api_key.as_deref().ok_or_else(|| LootError::Appraisal {
            message: "API key not configured".to_string(),
        })?;

        debug!(endpoint = %self.endpoint, bytes = loot.len(), "Requesting appraisal");

        let response = self
            .http
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "text/plain")
            .header(API_KEY_HEADER, api_key)
            .body(loot.to_string())
            .send()
            .await
            .map_err(|e| LootError::Appraisal {
                message: format!("request failed: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LootError::Appraisal {
                message: format!("appraisal service returned status {}", status),
            });
        }

        let body = response.text().await.map_err(|e| LootError::Appraisal {
            message: format!("failed to read response: {}", e),
        })?;

        Ok(parse_total_buy_price(&body))
    }
}
