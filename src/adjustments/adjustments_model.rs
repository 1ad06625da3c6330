use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::adjustments_errors::{AdjustmentError, Result};

/// One append-only ledger entry recording a fine-tuning override applied to a
/// unit. Entries are written exactly once and never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentHistoryEntry {
    pub id: String,
    pub unit_id: String,
    pub operator_id: String,
    pub previous_percentage: Option<f64>,
    pub new_percentage: f64,
    pub reason: Option<String>,
    pub value_before: Option<Decimal>,
    pub value_after: Decimal,
    pub created_at: NaiveDateTime,
}

/// Input model for applying a manual adjustment to a unit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAdjustment {
    pub unit_id: String,
    pub operator_id: String,
    pub percentage: f64,
    pub reason: Option<String>,
}

impl NewAdjustment {
    pub fn validate(&self) -> Result<()> {
        if self.unit_id.trim().is_empty() {
            return Err(AdjustmentError::InvalidData(
                "Unit ID cannot be empty".to_string(),
            ));
        }
        // Identity boundary: the caller authenticates, we only require the id
        if self.operator_id.trim().is_empty() {
            return Err(AdjustmentError::InvalidData(
                "Operator ID cannot be empty".to_string(),
            ));
        }
        if !self.percentage.is_finite() {
            return Err(AdjustmentError::InvalidData(
                "Adjustment percentage must be a finite number".to_string(),
            ));
        }
        Ok(())
    }
}

/// Before/after pair returned to the operator so the effect of the
/// adjustment can be sanity-checked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentOutcome {
    pub value_before: Option<Decimal>,
    pub value_after: Decimal,
}

/// Database model for adjustment history entries
#[derive(
    Queryable, Identifiable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::adjustment_history)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AdjustmentHistoryEntryDB {
    pub id: String,
    pub unit_id: String,
    pub operator_id: String,
    pub previous_percentage: Option<f64>,
    pub new_percentage: f64,
    pub reason: Option<String>,
    pub value_before: Option<String>,
    pub value_after: String,
    pub created_at: NaiveDateTime,
}

impl From<AdjustmentHistoryEntryDB> for AdjustmentHistoryEntry {
    fn from(db: AdjustmentHistoryEntryDB) -> Self {
        Self {
            id: db.id,
            unit_id: db.unit_id,
            operator_id: db.operator_id,
            previous_percentage: db.previous_percentage,
            new_percentage: db.new_percentage,
            reason: db.reason,
            value_before: db.value_before.and_then(|v| Decimal::from_str(&v).ok()),
            value_after: Decimal::from_str(&db.value_after).unwrap_or_default(),
            created_at: db.created_at,
        }
    }
}
