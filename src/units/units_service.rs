use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use log::debug;
use std::sync::Arc;

use super::units_model::{NewUnit, Unit, UnitUpdate};
use super::units_repository::UnitRepository;
use crate::units::Result;

/// Service for managing units
pub struct UnitService {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl UnitService {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    pub async fn create_unit(&self, new_unit: NewUnit) -> Result<Unit> {
        debug!(
            "Creating unit {} in development {}",
            new_unit.identifier, new_unit.development_id
        );
        let repo = UnitRepository::new(self.pool.clone());
        repo.create(new_unit)
    }

    /// Inserts a pre-validated batch of imported units in one transaction.
    /// Callers are expected to run the normal recalculation path afterwards.
    pub async fn import_units(&self, new_units: Vec<NewUnit>) -> Result<Vec<Unit>> {
        debug!("Importing {} units", new_units.len());
        let repo = UnitRepository::new(self.pool.clone());
        repo.bulk_create(new_units)
    }

    pub async fn update_unit(&self, update: UnitUpdate) -> Result<Unit> {
        let repo = UnitRepository::new(self.pool.clone());
        repo.update(update)
    }

    pub fn get_unit(&self, unit_id: &str) -> Result<Unit> {
        let repo = UnitRepository::new(self.pool.clone());
        repo.get_by_id(unit_id)
    }

    pub fn list_units(&self, development_id: &str) -> Result<Vec<Unit>> {
        let repo = UnitRepository::new(self.pool.clone());
        repo.list_by_development(development_id)
    }

    pub async fn delete_unit(&self, unit_id: &str) -> Result<()> {
        let repo = UnitRepository::new(self.pool.clone());
        repo.delete(unit_id)?;
        Ok(())
    }
}
