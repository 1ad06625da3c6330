use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use crate::db::get_connection;
use crate::developments::{DevelopmentError, Result};
use crate::schema::developments;
use crate::schema::developments::dsl::*;
use crate::schema::units;

use super::developments_model::{Development, DevelopmentDB, DevelopmentUpdate, NewDevelopment};

/// Repository for managing development data in the database
pub struct DevelopmentRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl DevelopmentRepository {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    pub fn create(&self, new_development: NewDevelopment) -> Result<Development> {
        new_development.validate()?;

        let mut development_db: DevelopmentDB = new_development.into();
        development_db.id = uuid::Uuid::new_v4().to_string();

        let mut conn = get_connection(&self.pool)
            .map_err(|e| DevelopmentError::DatabaseError(e.to_string()))?;

        diesel::insert_into(developments::table)
            .values(&development_db)
            .execute(&mut conn)
            .map_err(|e| DevelopmentError::DatabaseError(e.to_string()))?;

        Ok(development_db.into())
    }

    pub fn update(&self, update: DevelopmentUpdate) -> Result<Development> {
        update.validate()?;

        let mut conn = get_connection(&self.pool)
            .map_err(|e| DevelopmentError::DatabaseError(e.to_string()))?;

        let mut existing = developments
            .find(&update.id)
            .first::<DevelopmentDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => DevelopmentError::NotFound(format!(
                    "Development with id {} not found",
                    update.id
                )),
                _ => DevelopmentError::DatabaseError(e.to_string()),
            })?;

        existing.name = update.name;
        existing.description = update.description;
        existing.address = update.address;
        existing.city = update.city;
        existing.updated_at = chrono::Utc::now().naive_utc();

        diesel::update(developments.find(&existing.id))
            .set(&existing)
            .execute(&mut conn)
            .map_err(|e| DevelopmentError::DatabaseError(e.to_string()))?;

        Ok(existing.into())
    }

    pub fn get_by_id(&self, development_id: &str) -> Result<Development> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| DevelopmentError::DatabaseError(e.to_string()))?;

        let development = developments
            .find(development_id)
            .first::<DevelopmentDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => DevelopmentError::NotFound(format!(
                    "Development with id {} not found",
                    development_id
                )),
                _ => DevelopmentError::DatabaseError(e.to_string()),
            })?;

        Ok(development.into())
    }

    pub fn list(&self) -> Result<Vec<Development>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| DevelopmentError::DatabaseError(e.to_string()))?;

        developments
            .order(name.asc())
            .load::<DevelopmentDB>(&mut conn)
            .map_err(|e| DevelopmentError::DatabaseError(e.to_string()))
            .map(|results| results.into_iter().map(Development::from).collect())
    }

    /// Deletes a development. Refused while the development still owns units.
    pub fn delete(&self, development_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| DevelopmentError::DatabaseError(e.to_string()))?;

        let unit_count: i64 = units::table
            .filter(units::development_id.eq(development_id))
            .count()
            .get_result(&mut conn)
            .map_err(|e| DevelopmentError::DatabaseError(e.to_string()))?;

        if unit_count > 0 {
            return Err(DevelopmentError::HasUnits(format!(
                "Development {} still has {} units",
                development_id, unit_count
            )));
        }

        let affected = diesel::delete(developments.find(development_id))
            .execute(&mut conn)
            .map_err(|e| DevelopmentError::DatabaseError(e.to_string()))?;

        if affected == 0 {
            return Err(DevelopmentError::NotFound(format!(
                "Development with id {} not found",
                development_id
            )));
        }

        Ok(affected)
    }
}
