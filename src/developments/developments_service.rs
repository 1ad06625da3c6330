use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use log::debug;
use std::sync::Arc;

use super::developments_model::{Development, DevelopmentUpdate, NewDevelopment};
use super::developments_repository::DevelopmentRepository;
use crate::developments::Result;

/// Service for managing developments
pub struct DevelopmentService {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl DevelopmentService {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    pub async fn create_development(&self, new_development: NewDevelopment) -> Result<Development> {
        debug!("Creating development {}", new_development.name);
        let repo = DevelopmentRepository::new(self.pool.clone());
        repo.create(new_development)
    }

    pub async fn update_development(&self, update: DevelopmentUpdate) -> Result<Development> {
        let repo = DevelopmentRepository::new(self.pool.clone());
        repo.update(update)
    }

    pub fn get_development(&self, development_id: &str) -> Result<Development> {
        let repo = DevelopmentRepository::new(self.pool.clone());
        repo.get_by_id(development_id)
    }

    pub fn list_developments(&self) -> Result<Vec<Development>> {
        let repo = DevelopmentRepository::new(self.pool.clone());
        repo.list()
    }

    pub async fn delete_development(&self, development_id: &str) -> Result<()> {
        let repo = DevelopmentRepository::new(self.pool.clone());
        repo.delete(development_id)?;
        Ok(())
    }
}
