use std::sync::Arc;

use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use log::{debug, info};

use crate::adjustments::{AdjustmentError, Result};
use crate::constants::MONEY_DECIMAL_PLACES;
use crate::pricing::PricingRepository;
use crate::units::UnitRepository;
use crate::valuation::compute_value;

use super::adjustments_model::{
    AdjustmentHistoryEntry, AdjustmentHistoryEntryDB, AdjustmentOutcome, NewAdjustment,
};
use super::adjustments_repository::AdjustmentRepository;

/// Service applying fine-tuning overrides and maintaining their ledger
pub struct AdjustmentService {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl AdjustmentService {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    /// Applies a manual adjustment to a unit: writes the new percentage and
    /// reason, recomputes the unit's value under the active parameter set,
    /// and appends one ledger entry capturing the before/after pair.
    ///
    /// Fine-tuning only makes sense relative to a computed baseline, so the
    /// unit's development must have an active parameter set.
    pub async fn apply_adjustment(&self, new_adjustment: NewAdjustment) -> Result<AdjustmentOutcome> {
        new_adjustment.validate()?;

        let unit_repo = UnitRepository::new(self.pool.clone());
        let pricing_repo = PricingRepository::new(self.pool.clone());

        let unit = unit_repo
            .get_by_id(&new_adjustment.unit_id)
            .map_err(|e| AdjustmentError::NotFound(e.to_string()))?;

        let params = pricing_repo
            .get_active(&unit.development_id)
            .map_err(|e| AdjustmentError::DatabaseError(e.to_string()))?
            .ok_or_else(|| {
                AdjustmentError::NoActiveParameter(format!(
                    "Development {} has no active pricing parameter set",
                    unit.development_id
                ))
            })?;

        let floor_curve = pricing_repo
            .floor_curve(&params.id)
            .map_err(|e| AdjustmentError::DatabaseError(e.to_string()))?;

        debug!(
            "Applying adjustment of {}% to unit {} (operator {})",
            new_adjustment.percentage, unit.identifier, new_adjustment.operator_id
        );

        let value_before = unit.computed_value;
        let previous_percentage = unit.adjustment_percentage;

        let mut adjusted = unit;
        adjusted.adjustment_percentage = Some(new_adjustment.percentage);
        adjusted.adjustment_reason = new_adjustment.reason.clone();

        let value_after = compute_value(&adjusted, &params, &floor_curve)
            .map_err(|e| AdjustmentError::InvalidData(e.to_string()))?;

        let entry = AdjustmentHistoryEntryDB {
            id: uuid::Uuid::new_v4().to_string(),
            unit_id: new_adjustment.unit_id.clone(),
            operator_id: new_adjustment.operator_id.clone(),
            previous_percentage,
            new_percentage: new_adjustment.percentage,
            reason: new_adjustment.reason.clone(),
            value_before: value_before
                .map(|v| v.round_dp(MONEY_DECIMAL_PLACES).to_string()),
            value_after: value_after.to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        };

        let repo = AdjustmentRepository::new(self.pool.clone());
        repo.apply(entry, new_adjustment.reason)?;

        info!(
            "Adjusted unit {}: {:?} -> {}",
            adjusted.identifier, value_before, value_after
        );

        Ok(AdjustmentOutcome {
            value_before,
            value_after,
        })
    }

    /// Full adjustment history of a unit, newest first
    pub fn get_history(&self, unit_id: &str) -> Result<Vec<AdjustmentHistoryEntry>> {
        let repo = AdjustmentRepository::new(self.pool.clone());
        repo.history(unit_id)
    }
}
