use std::sync::Arc;

use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use log::{debug, info, warn};
use rayon::prelude::*;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::pricing::{PricingError, PricingParameterSet, PricingRepository};
use crate::units::UnitRepository;
use crate::valuation::compute_value;

use super::repricing_model::{RecalcError, RecalcResult};

/// Orchestrates activation of a pricing parameter set and the repricing of
/// every unit in the owning development.
pub struct RepricingService {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl RepricingService {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    /// Activates `parameter_set_id` (atomic swap against all sets of the
    /// development) and reprices every unit under the new parameters.
    ///
    /// The swap is all-or-nothing: if it fails, no unit is touched and the
    /// previously active set stays in place. Per-unit valuation failures
    /// after a successful swap are collected, not escalated — the batch
    /// finishes and reports counts.
    pub async fn activate_and_recalculate(
        &self,
        development_id: &str,
        parameter_set_id: &str,
    ) -> Result<RecalcResult> {
        let pricing_repo = PricingRepository::new(self.pool.clone());

        let params = pricing_repo.get_by_id(parameter_set_id)?;
        if params.development_id != development_id {
            return Err(PricingError::InvalidData(format!(
                "Parameter set {} does not belong to development {}",
                parameter_set_id, development_id
            ))
            .into());
        }

        let params = pricing_repo.activate(parameter_set_id)?;
        info!(
            "Activated parameter set {} for development {}",
            parameter_set_id, development_id
        );

        self.reprice_development(development_id, &params)
    }

    /// Reprices a development under its currently active parameter set
    /// without changing activation. Used after unit imports and edits.
    pub fn recalculate(&self, development_id: &str) -> Result<RecalcResult> {
        let pricing_repo = PricingRepository::new(self.pool.clone());

        let params = pricing_repo.get_active(development_id)?.ok_or_else(|| {
            PricingError::NoActiveParameter(format!(
                "Development {} has no active pricing parameter set",
                development_id
            ))
        })?;

        self.reprice_development(development_id, &params)
    }

    fn reprice_development(
        &self,
        development_id: &str,
        params: &PricingParameterSet,
    ) -> Result<RecalcResult> {
        let pricing_repo = PricingRepository::new(self.pool.clone());
        let unit_repo = UnitRepository::new(self.pool.clone());

        let units = unit_repo.list_by_development(development_id)?;
        let floor_curve = pricing_repo.floor_curve(&params.id)?;

        debug!(
            "Repricing {} units of development {} under parameter set {}",
            units.len(),
            development_id,
            params.id
        );

        // Each unit's valuation depends only on its own attributes and the
        // shared parameter set, so the batch is computed in parallel.
        let outcomes: Vec<std::result::Result<(String, Decimal), RecalcError>> = units
            .par_iter()
            .map(|unit| {
                compute_value(unit, params, &floor_curve)
                    .map(|value| (unit.id.clone(), value))
                    .map_err(|e| RecalcError {
                        unit_id: unit.id.clone(),
                        identifier: unit.identifier.clone(),
                        message: e.to_string(),
                    })
            })
            .collect();

        let mut computed: Vec<(String, Decimal)> = Vec::with_capacity(outcomes.len());
        let mut errors: Vec<RecalcError> = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(value) => computed.push(value),
                Err(err) => errors.push(err),
            }
        }

        let updated = unit_repo.save_computed_values(&computed)?;

        if !errors.is_empty() {
            warn!(
                "Repricing of development {} finished with {} failed units",
                development_id,
                errors.len()
            );
        }

        Ok(RecalcResult {
            parameter_set_id: params.id.clone(),
            updated,
            failed: errors.len(),
            errors,
        })
    }
}
