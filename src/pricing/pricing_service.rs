use std::collections::HashMap;
use std::sync::Arc;

use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use log::debug;

use super::pricing_model::{
    FloorValorization, NewPricingParameterSet, PricingParameterSet, PricingParameterSetUpdate,
};
use super::pricing_repository::PricingRepository;
use crate::pricing::Result;

/// Service for managing pricing parameter sets
pub struct PricingService {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl PricingService {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    pub async fn create_parameter_set(
        &self,
        new_set: NewPricingParameterSet,
    ) -> Result<PricingParameterSet> {
        debug!(
            "Creating parameter set {} for development {}",
            new_set.name, new_set.development_id
        );
        let repo = PricingRepository::new(self.pool.clone());
        repo.create(new_set)
    }

    pub async fn update_parameter_set(
        &self,
        update: PricingParameterSetUpdate,
    ) -> Result<PricingParameterSet> {
        let repo = PricingRepository::new(self.pool.clone());
        repo.update(update)
    }

    pub async fn clone_parameter_set(
        &self,
        set_id: &str,
        new_name: &str,
    ) -> Result<PricingParameterSet> {
        let repo = PricingRepository::new(self.pool.clone());
        repo.clone_set(set_id, new_name)
    }

    pub async fn delete_parameter_set(&self, set_id: &str) -> Result<()> {
        let repo = PricingRepository::new(self.pool.clone());
        repo.delete(set_id)?;
        Ok(())
    }

    pub async fn regenerate_floor_curve(
        &self,
        set_id: &str,
        overrides: &HashMap<i32, f64>,
    ) -> Result<()> {
        let repo = PricingRepository::new(self.pool.clone());
        repo.regenerate_floor_curve(set_id, overrides)
    }

    pub fn get_parameter_set(&self, set_id: &str) -> Result<PricingParameterSet> {
        let repo = PricingRepository::new(self.pool.clone());
        repo.get_by_id(set_id)
    }

    pub fn list_parameter_sets(&self, development_id: &str) -> Result<Vec<PricingParameterSet>> {
        let repo = PricingRepository::new(self.pool.clone());
        repo.list_by_development(development_id)
    }

    pub fn get_active_parameter_set(
        &self,
        development_id: &str,
    ) -> Result<Option<PricingParameterSet>> {
        let repo = PricingRepository::new(self.pool.clone());
        repo.get_active(development_id)
    }

    pub fn get_floor_curve(&self, set_id: &str) -> Result<Vec<FloorValorization>> {
        let repo = PricingRepository::new(self.pool.clone());
        repo.floor_curve(set_id)
    }
}
