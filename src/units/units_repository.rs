use std::collections::HashSet;
use std::sync::Arc;

use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;

use crate::constants::MONEY_DECIMAL_PLACES;
use crate::db::get_connection;
use crate::schema::units;
use crate::units::{Result, UnitError};

use super::units_model::{NewUnit, Unit, UnitDB, UnitUpdate};

/// Repository for managing unit data in the database
pub struct UnitRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl UnitRepository {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    pub fn create(&self, new_unit: NewUnit) -> Result<Unit> {
        new_unit.validate()?;

        let mut conn = get_connection(&self.pool)
            .map_err(|e| UnitError::DatabaseError(e.to_string()))?;

        self.check_identifier_free(&mut conn, &new_unit.development_id, &new_unit.identifier, None)?;

        let mut unit_db: UnitDB = new_unit.into();
        unit_db.id = uuid::Uuid::new_v4().to_string();

        diesel::insert_into(units::table)
            .values(&unit_db)
            .execute(&mut conn)
            .map_err(|e| UnitError::DatabaseError(e.to_string()))?;

        Ok(unit_db.into())
    }

    /// Inserts a batch of units in one transaction. This is the landing point
    /// of the bulk import boundary: the importer maps external rows into
    /// `NewUnit` values and hands them here, then triggers a recalculation.
    pub fn bulk_create(&self, new_units: Vec<NewUnit>) -> Result<Vec<Unit>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| UnitError::DatabaseError(e.to_string()))?;

        let mut seen: HashSet<(String, String)> = HashSet::new();
        for new_unit in &new_units {
            new_unit.validate()?;
            if !seen.insert((new_unit.development_id.clone(), new_unit.identifier.clone())) {
                return Err(UnitError::DuplicateIdentifier(format!(
                    "Identifier {} appears more than once in the batch",
                    new_unit.identifier
                )));
            }
            self.check_identifier_free(
                &mut conn,
                &new_unit.development_id,
                &new_unit.identifier,
                None,
            )?;
        }

        conn.transaction::<_, UnitError, _>(|tx_conn| {
            let mut created = Vec::with_capacity(new_units.len());
            for new_unit in new_units {
                let mut unit_db: UnitDB = new_unit.into();
                unit_db.id = uuid::Uuid::new_v4().to_string();

                diesel::insert_into(units::table)
                    .values(&unit_db)
                    .execute(tx_conn)?;

                created.push(unit_db.into());
            }
            Ok(created)
        })
    }

    pub fn update(&self, update: UnitUpdate) -> Result<Unit> {
        update.validate()?;

        let mut conn = get_connection(&self.pool)
            .map_err(|e| UnitError::DatabaseError(e.to_string()))?;

        let mut existing = units::table
            .find(&update.id)
            .first::<UnitDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    UnitError::NotFound(format!("Unit with id {} not found", update.id))
                }
                _ => UnitError::DatabaseError(e.to_string()),
            })?;

        if existing.identifier != update.identifier {
            self.check_identifier_free(
                &mut conn,
                &existing.development_id,
                &update.identifier,
                Some(&existing.id),
            )?;
        }

        existing.identifier = update.identifier;
        existing.unit_type = update.unit_type.as_str().to_string();
        existing.private_area = update.private_area.to_string();
        existing.total_area = update
            .total_area
            .unwrap_or(update.private_area)
            .to_string();
        existing.floor = update.floor;
        existing.bedrooms = update.bedrooms;
        existing.suites = update.suites;
        existing.parking_simple = update.parking_simple;
        existing.parking_double = update.parking_double;
        existing.parking_moto = update.parking_moto;
        existing.storage_boxes = update.storage_boxes;
        existing.orientation = update.orientation.map(|o| o.as_str().to_string());
        existing.status = update.status.as_str().to_string();
        existing.updated_at = chrono::Utc::now().naive_utc();

        diesel::update(units::table.find(&existing.id))
            .set(&existing)
            .execute(&mut conn)
            .map_err(|e| UnitError::DatabaseError(e.to_string()))?;

        Ok(existing.into())
    }

    pub fn get_by_id(&self, unit_id: &str) -> Result<Unit> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| UnitError::DatabaseError(e.to_string()))?;

        let unit = units::table
            .find(unit_id)
            .first::<UnitDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    UnitError::NotFound(format!("Unit with id {} not found", unit_id))
                }
                _ => UnitError::DatabaseError(e.to_string()),
            })?;

        Ok(unit.into())
    }

    pub fn list_by_development(&self, development_id: &str) -> Result<Vec<Unit>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| UnitError::DatabaseError(e.to_string()))?;

        units::table
            .filter(units::development_id.eq(development_id))
            .order(units::identifier.asc())
            .load::<UnitDB>(&mut conn)
            .map_err(|e| UnitError::DatabaseError(e.to_string()))
            .map(|results| results.into_iter().map(Unit::from).collect())
    }

    pub fn delete(&self, unit_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| UnitError::DatabaseError(e.to_string()))?;

        let affected = diesel::delete(units::table.find(unit_id))
            .execute(&mut conn)
            .map_err(|e| UnitError::DatabaseError(e.to_string()))?;

        if affected == 0 {
            return Err(UnitError::NotFound(format!(
                "Unit with id {} not found",
                unit_id
            )));
        }

        Ok(affected)
    }

    /// Bulk write of freshly computed values, one transaction for the whole
    /// batch. Values are rounded to currency precision before persisting.
    pub fn save_computed_values(&self, values: &[(String, Decimal)]) -> Result<usize> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| UnitError::DatabaseError(e.to_string()))?;

        let now = chrono::Utc::now().naive_utc();

        conn.transaction::<_, UnitError, _>(|tx_conn| {
            let mut updated = 0;
            for (unit_id, value) in values {
                updated += diesel::update(units::table.find(unit_id))
                    .set((
                        units::computed_value
                            .eq(Some(value.round_dp(MONEY_DECIMAL_PLACES).to_string())),
                        units::updated_at.eq(now),
                    ))
                    .execute(tx_conn)?;
            }
            Ok(updated)
        })
    }

    fn check_identifier_free(
        &self,
        conn: &mut SqliteConnection,
        dev_id: &str,
        unit_identifier: &str,
        exclude_unit_id: Option<&str>,
    ) -> Result<()> {
        let mut query = units::table
            .filter(units::development_id.eq(dev_id))
            .filter(units::identifier.eq(unit_identifier))
            .into_boxed();

        if let Some(exclude) = exclude_unit_id {
            query = query.filter(units::id.ne(exclude));
        }

        let existing: i64 = query
            .count()
            .get_result(conn)
            .map_err(|e| UnitError::DatabaseError(e.to_string()))?;

        if existing > 0 {
            return Err(UnitError::DuplicateIdentifier(format!(
                "Identifier {} is already used in development {}",
                unit_identifier, dev_id
            )));
        }

        Ok(())
    }
}
