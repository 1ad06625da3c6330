use std::collections::HashMap;
use std::sync::Arc;

use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use log::debug;

use crate::constants::{FLOOR_MAX, FLOOR_MIN, MIN_NAME_LENGTH};
use crate::db::get_connection;
use crate::pricing::{PricingError, Result};
use crate::schema::{floor_valorizations, pricing_parameter_sets};

use super::pricing_model::{
    FloorValorization, NewPricingParameterSet, PricingParameterSet, PricingParameterSetDB,
    PricingParameterSetUpdate,
};

/// Repository for pricing parameter sets and their floor valorization curves
pub struct PricingRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl PricingRepository {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    /// Creates a parameter set together with its full 21-row floor curve in
    /// one transaction.
    pub fn create(&self, new_set: NewPricingParameterSet) -> Result<PricingParameterSet> {
        new_set.validate()?;

        let overrides = new_set.floor_overrides.clone();
        let mut set_db: PricingParameterSetDB = new_set.into();
        set_db.id = uuid::Uuid::new_v4().to_string();

        let mut conn = get_connection(&self.pool)
            .map_err(|e| PricingError::DatabaseError(e.to_string()))?;

        conn.transaction::<_, PricingError, _>(|tx_conn| {
            diesel::insert_into(pricing_parameter_sets::table)
                .values(&set_db)
                .execute(tx_conn)?;

            Self::regenerate_curve_rows(tx_conn, &set_db.id, &overrides)?;

            Ok(())
        })?;

        Ok(set_db.into())
    }

    /// Updates a parameter set. The floor curve is regenerated wholesale:
    /// delete all rows, insert 21 fresh ones. Both steps share the update's
    /// transaction so no reader ever sees a partial curve.
    pub fn update(&self, update: PricingParameterSetUpdate) -> Result<PricingParameterSet> {
        update.validate()?;

        let mut conn = get_connection(&self.pool)
            .map_err(|e| PricingError::DatabaseError(e.to_string()))?;

        let mut existing = pricing_parameter_sets::table
            .find(&update.id)
            .first::<PricingParameterSetDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => PricingError::NotFound(format!(
                    "Parameter set with id {} not found",
                    update.id
                )),
                _ => PricingError::DatabaseError(e.to_string()),
            })?;

        existing.name = update.name.clone();
        existing.description = update.description.clone();
        existing.rate_studio = update.rate_studio.map(|r| r.to_string());
        existing.rate_apartment = update.rate_apartment.map(|r| r.to_string());
        existing.rate_commercial = update.rate_commercial.map(|r| r.to_string());
        existing.rate_garden = update.rate_garden.map(|r| r.to_string());
        existing.value_suite = update.value_suite.to_string();
        existing.value_parking_simple = update.value_parking_simple.to_string();
        existing.value_parking_double = update.value_parking_double.to_string();
        existing.value_parking_moto = update.value_parking_moto.to_string();
        existing.value_storage_box = update.value_storage_box.to_string();
        existing.factor_north = update.factor_north;
        existing.factor_south = update.factor_south;
        existing.factor_east = update.factor_east;
        existing.factor_west = update.factor_west;
        existing.factor_northeast = update.factor_northeast;
        existing.factor_northwest = update.factor_northwest;
        existing.factor_southeast = update.factor_southeast;
        existing.factor_southwest = update.factor_southwest;
        existing.updated_at = chrono::Utc::now().naive_utc();

        conn.transaction::<_, PricingError, _>(|tx_conn| {
            diesel::update(pricing_parameter_sets::table.find(&existing.id))
                .set(&existing)
                .execute(tx_conn)?;

            Self::regenerate_curve_rows(tx_conn, &existing.id, &update.floor_overrides)?;

            Ok(())
        })?;

        Ok(existing.into())
    }

    /// Rebuilds the floor curve for a parameter set: always exactly one row
    /// per floor 0..=20, overrides applied where present, 0% elsewhere.
    pub fn regenerate_floor_curve(
        &self,
        set_id: &str,
        overrides: &HashMap<i32, f64>,
    ) -> Result<()> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| PricingError::DatabaseError(e.to_string()))?;

        // Ensure the set exists before touching curve rows
        pricing_parameter_sets::table
            .find(set_id)
            .first::<PricingParameterSetDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    PricingError::NotFound(format!("Parameter set with id {} not found", set_id))
                }
                _ => PricingError::DatabaseError(e.to_string()),
            })?;

        conn.transaction::<_, PricingError, _>(|tx_conn| {
            Self::regenerate_curve_rows(tx_conn, set_id, overrides)
        })
    }

    /// Clones a parameter set with its curve under a new name. The clone
    /// always starts inactive.
    pub fn clone_set(&self, set_id: &str, new_name: &str) -> Result<PricingParameterSet> {
        if new_name.trim().len() < MIN_NAME_LENGTH {
            return Err(PricingError::InvalidData(format!(
                "Parameter set name must have at least {} characters",
                MIN_NAME_LENGTH
            )));
        }

        let mut conn = get_connection(&self.pool)
            .map_err(|e| PricingError::DatabaseError(e.to_string()))?;

        let original = pricing_parameter_sets::table
            .find(set_id)
            .first::<PricingParameterSetDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    PricingError::NotFound(format!("Parameter set with id {} not found", set_id))
                }
                _ => PricingError::DatabaseError(e.to_string()),
            })?;

        let curve = self.floor_curve(set_id)?;

        let now = chrono::Utc::now().naive_utc();
        let mut clone = original;
        clone.id = uuid::Uuid::new_v4().to_string();
        clone.name = new_name.to_string();
        clone.is_active = false;
        clone.created_at = now;
        clone.updated_at = now;

        let cloned_rows: Vec<FloorValorization> = curve
            .into_iter()
            .map(|row| FloorValorization {
                id: uuid::Uuid::new_v4().to_string(),
                parameter_set_id: clone.id.clone(),
                floor: row.floor,
                percentage: row.percentage,
            })
            .collect();

        conn.transaction::<_, PricingError, _>(|tx_conn| {
            diesel::insert_into(pricing_parameter_sets::table)
                .values(&clone)
                .execute(tx_conn)?;

            diesel::insert_into(floor_valorizations::table)
                .values(&cloned_rows)
                .execute(tx_conn)?;

            Ok(())
        })?;

        Ok(clone.into())
    }

    /// Atomic activation swap: every set of the owning development is
    /// deactivated and the target activated inside a single transaction, so a
    /// concurrent reader never observes zero or two active sets.
    pub fn activate(&self, set_id: &str) -> Result<PricingParameterSet> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| PricingError::DatabaseError(e.to_string()))?;

        let target = pricing_parameter_sets::table
            .find(set_id)
            .first::<PricingParameterSetDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    PricingError::NotFound(format!("Parameter set with id {} not found", set_id))
                }
                _ => PricingError::DatabaseError(e.to_string()),
            })?;

        debug!(
            "Activating parameter set {} for development {}",
            set_id, target.development_id
        );

        let now = chrono::Utc::now().naive_utc();
        conn.immediate_transaction::<_, diesel::result::Error, _>(|tx_conn| {
            diesel::update(
                pricing_parameter_sets::table
                    .filter(pricing_parameter_sets::development_id.eq(&target.development_id)),
            )
            .set(pricing_parameter_sets::is_active.eq(false))
            .execute(tx_conn)?;

            diesel::update(pricing_parameter_sets::table.find(set_id))
                .set((
                    pricing_parameter_sets::is_active.eq(true),
                    pricing_parameter_sets::updated_at.eq(now),
                ))
                .execute(tx_conn)?;

            Ok(())
        })
        .map_err(|e| PricingError::ActivationFailed(e.to_string()))?;

        self.get_by_id(set_id)
    }

    pub fn get_by_id(&self, set_id: &str) -> Result<PricingParameterSet> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| PricingError::DatabaseError(e.to_string()))?;

        let set = pricing_parameter_sets::table
            .find(set_id)
            .first::<PricingParameterSetDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    PricingError::NotFound(format!("Parameter set with id {} not found", set_id))
                }
                _ => PricingError::DatabaseError(e.to_string()),
            })?;

        Ok(set.into())
    }

    pub fn list_by_development(&self, development_id: &str) -> Result<Vec<PricingParameterSet>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| PricingError::DatabaseError(e.to_string()))?;

        pricing_parameter_sets::table
            .filter(pricing_parameter_sets::development_id.eq(development_id))
            .order((
                pricing_parameter_sets::is_active.desc(),
                pricing_parameter_sets::name.asc(),
            ))
            .load::<PricingParameterSetDB>(&mut conn)
            .map_err(|e| PricingError::DatabaseError(e.to_string()))
            .map(|results| {
                results
                    .into_iter()
                    .map(PricingParameterSet::from)
                    .collect()
            })
    }

    /// The single active parameter set of a development, if any.
    pub fn get_active(&self, development_id: &str) -> Result<Option<PricingParameterSet>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| PricingError::DatabaseError(e.to_string()))?;

        pricing_parameter_sets::table
            .filter(pricing_parameter_sets::development_id.eq(development_id))
            .filter(pricing_parameter_sets::is_active.eq(true))
            .first::<PricingParameterSetDB>(&mut conn)
            .optional()
            .map_err(|e| PricingError::DatabaseError(e.to_string()))
            .map(|set| set.map(PricingParameterSet::from))
    }

    /// Floor curve rows for a parameter set, ordered by floor.
    pub fn floor_curve(&self, set_id: &str) -> Result<Vec<FloorValorization>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| PricingError::DatabaseError(e.to_string()))?;

        floor_valorizations::table
            .filter(floor_valorizations::parameter_set_id.eq(set_id))
            .order(floor_valorizations::floor.asc())
            .load::<FloorValorization>(&mut conn)
            .map_err(|e| PricingError::DatabaseError(e.to_string()))
    }

    /// Deletes a parameter set and its curve. The active set cannot be
    /// deleted; activate another set first.
    pub fn delete(&self, set_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| PricingError::DatabaseError(e.to_string()))?;

        let set = pricing_parameter_sets::table
            .find(set_id)
            .first::<PricingParameterSetDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    PricingError::NotFound(format!("Parameter set with id {} not found", set_id))
                }
                _ => PricingError::DatabaseError(e.to_string()),
            })?;

        if set.is_active {
            return Err(PricingError::ActiveSetDeletion(format!(
                "Parameter set {} is active and cannot be deleted",
                set_id
            )));
        }

        conn.transaction::<_, PricingError, _>(|tx_conn| {
            diesel::delete(
                floor_valorizations::table
                    .filter(floor_valorizations::parameter_set_id.eq(set_id)),
            )
            .execute(tx_conn)?;

            let affected = diesel::delete(pricing_parameter_sets::table.find(set_id))
                .execute(tx_conn)?;

            Ok(affected)
        })
    }

    fn regenerate_curve_rows(
        conn: &mut SqliteConnection,
        set_id: &str,
        overrides: &HashMap<i32, f64>,
    ) -> Result<()> {
        diesel::delete(
            floor_valorizations::table.filter(floor_valorizations::parameter_set_id.eq(set_id)),
        )
        .execute(conn)?;

        let rows: Vec<FloorValorization> = (FLOOR_MIN..=FLOOR_MAX)
            .map(|floor_index| FloorValorization {
                id: uuid::Uuid::new_v4().to_string(),
                parameter_set_id: set_id.to_string(),
                floor: floor_index,
                percentage: overrides.get(&floor_index).copied().unwrap_or(0.0),
            })
            .collect();

        diesel::insert_into(floor_valorizations::table)
            .values(&rows)
            .execute(conn)?;

        Ok(())
    }
}
