//! Loot appraisal.
//!
//! An [`Appraiser`] turns a free-text loot listing (as copied from the game
//! client) into a total buy price in whole ISK. [`JaniceAppraiser`] is the
//! HTTP implementation; tests substitute their own.

mod janice;

pub use janice::{JaniceAppraiser, parse_total_buy_price};

use async_trait::async_trait;

use crate::error::LootResult;
use crate::models::Isk;

/// Prices a loot listing.
#[async_trait]
pub trait Appraiser: Send + Sync {
    /// Returns the total buy price of `loot`, floored to whole ISK.
    async fn appraise(&self, loot: &str) -> LootResult<Isk>;
}
