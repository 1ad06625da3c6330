use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::TempDir;

use precifica_core::db::{self, DbPool};
use precifica_core::developments::{DevelopmentRepository, NewDevelopment};
use precifica_core::pricing::NewPricingParameterSet;
use precifica_core::units::{NewUnit, UnitStatus, UnitType};

/// Creates a throw-away database in a temp dir with all migrations applied.
/// The TempDir guard must be kept alive for the duration of the test.
pub fn setup_db() -> (TempDir, Arc<DbPool>) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = db::init(dir.path().to_str().unwrap()).expect("Failed to initialize database");
    let pool = db::create_pool(&db_path).expect("Failed to create database pool");
    db::run_migrations(&pool).expect("Failed to run migrations");
    (dir, pool)
}

pub fn seed_development(pool: &Arc<DbPool>, name: &str) -> String {
    let repo = DevelopmentRepository::new(pool.clone());
    let development = repo
        .create(NewDevelopment {
            id: None,
            name: name.to_string(),
            description: None,
            address: None,
            city: Some("Curitiba".to_string()),
        })
        .expect("Failed to seed development");
    development.id
}

pub fn new_unit(development_id: &str, identifier: &str, area: Decimal) -> NewUnit {
    NewUnit {
        id: None,
        development_id: development_id.to_string(),
        identifier: identifier.to_string(),
        unit_type: UnitType::Apartment,
        private_area: area,
        total_area: None,
        floor: Some(0),
        bedrooms: 2,
        suites: 0,
        parking_simple: None,
        parking_double: None,
        parking_moto: None,
        storage_boxes: 0,
        orientation: None,
        status: UnitStatus::Available,
    }
}

/// Parameter set with an apartment rate and neutral factors; floors default
/// to 0% unless `floor_overrides` says otherwise.
pub fn base_parameter_set(
    development_id: &str,
    name: &str,
    apartment_rate: Decimal,
    floor_overrides: HashMap<i32, f64>,
) -> NewPricingParameterSet {
    NewPricingParameterSet {
        development_id: development_id.to_string(),
        name: name.to_string(),
        rate_apartment: Some(apartment_rate),
        rate_studio: Some(dec!(5000)),
        floor_overrides,
        ..Default::default()
    }
}
