//! Saved split records.
//!
//! A [`SavedSplit`] is the persisted form of a computed split. Amounts cross
//! the wire as exact integers; the total is string-encoded. Incoming amounts
//! may arrive as JSON numbers or numeric strings and must be whole ISK.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::{LootError, LootResult};

use super::Isk;

/// Converts a decimal amount to whole ISK, rejecting fractions and overflow.
///
/// # Example
///
/// ```
/// use loot_split::models::decimal_to_isk;
/// use rust_decimal::Decimal;
///
/// assert_eq!(decimal_to_isk(Decimal::new(1500, 0)).unwrap(), 1500);
/// assert!(decimal_to_isk(Decimal::new(15, 1)).is_err());
/// ```
pub fn decimal_to_isk(value: Decimal) -> LootResult<Isk> {
    if !value.fract().is_zero() {
        return Err(LootError::InvalidAmount {
            value: value.to_string(),
            message: "must be a whole number of ISK".to_string(),
        });
    }
    value.to_i64().ok_or_else(|| LootError::InvalidAmount {
        value: value.to_string(),
        message: "out of range".to_string(),
    })
}

/// Serde adapter writing ISK as a string and reading a string or number.
pub mod isk_string {
    use super::*;

    /// Writes the amount as a decimal string.
    pub fn serialize<S: Serializer>(value: &Isk, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    /// Reads a string or number holding a whole amount.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Isk, D::Error> {
        let value = <Decimal as Deserialize>::deserialize(deserializer)?;
        decimal_to_isk(value).map_err(D::Error::custom)
    }
}

fn deserialize_amounts<'de, D>(deserializer: D) -> Result<BTreeMap<String, Isk>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Decimal>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(label, value)| {
            decimal_to_isk(value)
                .map(|amount| (label, amount))
                .map_err(D::Error::custom)
        })
        .collect()
}

/// A split submitted for saving, before the server assigns id and date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSplit {
    /// The appraisal value that was split.
    #[serde(with = "isk_string")]
    pub total_buy_price: Isk,
    /// Label to amount mapping.
    #[serde(deserialize_with = "deserialize_amounts")]
    pub split_details: BTreeMap<String, Isk>,
    /// Free-text battle report reference.
    #[serde(default)]
    pub battle_report: String,
}

impl NewSplit {
    /// Checks the submission can be persisted.
    pub fn validate(&self) -> LootResult<()> {
        if self.total_buy_price <= 0 {
            return Err(LootError::InvalidAmount {
                value: self.total_buy_price.to_string(),
                message: "total buy price must be greater than 0".to_string(),
            });
        }
        if let Some((label, amount)) = self.split_details.iter().find(|(_, a)| **a < 0) {
            return Err(LootError::InvalidAmount {
                value: amount.to_string(),
                message: format!("payout for '{}' must not be negative", label),
            });
        }
        Ok(())
    }
}

/// A persisted split record.
///
/// # Example
///
/// ```
/// use loot_split::models::{NewSplit, SavedSplit};
/// use std::collections::BTreeMap;
///
/// let saved = SavedSplit::create(NewSplit {
///     total_buy_price: 1_000_000_000,
///     split_details: BTreeMap::from([("Corporation".to_string(), 1_000_000_000)]),
///     battle_report: "br-123".to_string(),
/// });
/// let json = serde_json::to_value(&saved).unwrap();
/// assert_eq!(json["totalBuyPrice"], "1000000000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSplit {
    /// Unique identifier assigned on save.
    pub id: Uuid,
    /// The appraisal value that was split.
    #[serde(with = "isk_string")]
    pub total_buy_price: Isk,
    /// Label to amount mapping.
    #[serde(deserialize_with = "deserialize_amounts")]
    pub split_details: BTreeMap<String, Isk>,
    /// Free-text battle report reference.
    #[serde(default)]
    pub battle_report: String,
    /// When the split was saved.
    pub date: DateTime<Utc>,
}

impl SavedSplit {
    /// Stamps a submission with a fresh id and the current time.
    pub fn create(split: NewSplit) -> Self {
        Self {
            id: Uuid::new_v4(),
            total_buy_price: split.total_buy_price,
            split_details: split.split_details,
            battle_report: split.battle_report,
            date: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_split_accepts_mixed_amounts() {
        let json = r#"{
            "totalBuyPrice": "1000000000",
            "splitDetails": {
                "Scanner Payout": "190000000",
                "Pilot Payout": 100000000,
                "Corporation": 0.0
            },
            "battleReport": "https://br.evetools.org/br/abc"
        }"#;

        let split: NewSplit = serde_json::from_str(json).unwrap();
        assert_eq!(split.total_buy_price, 1_000_000_000);
        assert_eq!(split.split_details["Scanner Payout"], 190_000_000);
        assert_eq!(split.split_details["Pilot Payout"], 100_000_000);
        assert_eq!(split.split_details["Corporation"], 0);
    }

    #[test]
    fn test_total_buy_price_accepts_number() {
        let json = r#"{"totalBuyPrice": 42, "splitDetails": {}}"#;
        let split: NewSplit = serde_json::from_str(json).unwrap();
        assert_eq!(split.total_buy_price, 42);
        assert!(split.battle_report.is_empty());
    }

    #[test]
    fn test_fractional_amount_rejected() {
        let json = r#"{"totalBuyPrice": "10", "splitDetails": {"Pilot": "2.5"}}"#;
        let err = serde_json::from_str::<NewSplit>(json).unwrap_err();
        assert!(err.to_string().contains("whole number"));
    }

    #[test]
    fn test_saved_split_round_trips_exactly() {
        let saved = SavedSplit::create(NewSplit {
            total_buy_price: 9_007_199_254_740_993,
            split_details: BTreeMap::from([("Kira".to_string(), 9_007_199_254_740_993)]),
            battle_report: "br".to_string(),
        });

        let json = serde_json::to_string(&saved).unwrap();
        assert!(json.contains("\"totalBuyPrice\":\"9007199254740993\""));
        let back: SavedSplit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, saved);
    }

    #[test]
    fn test_validate_rejects_non_positive_total() {
        let split = NewSplit {
            total_buy_price: 0,
            split_details: BTreeMap::new(),
            battle_report: String::new(),
        };
        assert!(split.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_payout() {
        let split = NewSplit {
            total_buy_price: 10,
            split_details: BTreeMap::from([("Kira".to_string(), -1)]),
            battle_report: String::new(),
        };
        match split.validate().unwrap_err() {
            LootError::InvalidAmount { message, .. } => assert!(message.contains("Kira")),
            other => panic!("Expected InvalidAmount, got {:?}", other),
        }
    }

    #[derive(Debug, Deserialize)]
    struct Amount {
        #[serde(with = "isk_string")]
        value: Isk,
    }

    #[test]
    fn test_isk_string_reads_string_and_number() {
        let from_string: Amount = serde_json::from_str(r#"{"value": "42"}"#).unwrap();
        let from_number: Amount = serde_json::from_str(r#"{"value": 42}"#).unwrap();
        assert_eq!(from_string.value, 42);
        assert_eq!(from_number.value, 42);

        let err = serde_json::from_str::<Amount>(r#"{"value": "4.2"}"#).unwrap_err();
        assert!(err.to_string().contains("whole number"));
    }
}
