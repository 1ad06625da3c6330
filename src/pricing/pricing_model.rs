use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{MIN_NAME_LENGTH, NEUTRAL_ORIENTATION_FACTOR};
use crate::units::{SolarOrientation, UnitType};

use super::pricing_errors::{PricingError, Result};

/// Domain model for a named bundle of pricing parameters. At most one set is
/// active per development at any time.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PricingParameterSet {
    pub id: String,
    pub development_id: String,
    pub name: String,
    pub description: Option<String>,
    /// Per-m² rates by unit type. `None` means the type is intentionally unpriced.
    pub rate_studio: Option<Decimal>,
    pub rate_apartment: Option<Decimal>,
    pub rate_commercial: Option<Decimal>,
    pub rate_garden: Option<Decimal>,
    /// Flat additive values per attribute count
    pub value_suite: Decimal,
    pub value_parking_simple: Decimal,
    pub value_parking_double: Decimal,
    pub value_parking_moto: Decimal,
    pub value_storage_box: Decimal,
    /// Multiplicative solar-orientation factors, 1.0 is neutral
    pub factor_north: f64,
    pub factor_south: f64,
    pub factor_east: f64,
    pub factor_west: f64,
    pub factor_northeast: f64,
    pub factor_northwest: f64,
    pub factor_southeast: f64,
    pub factor_southwest: f64,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl PricingParameterSet {
    /// Per-m² rate for a unit type; an unpriced type values at zero.
    pub fn rate_for(&self, unit_type: UnitType) -> Decimal {
        let rate = match unit_type {
            UnitType::Studio => self.rate_studio,
            UnitType::Apartment => self.rate_apartment,
            UnitType::Commercial => self.rate_commercial,
            UnitType::Garden => self.rate_garden,
        };
        rate.unwrap_or(Decimal::ZERO)
    }

    pub fn orientation_factor(&self, orientation: SolarOrientation) -> f64 {
        match orientation {
            SolarOrientation::North => self.factor_north,
            SolarOrientation::South => self.factor_south,
            SolarOrientation::East => self.factor_east,
            SolarOrientation::West => self.factor_west,
            SolarOrientation::Northeast => self.factor_northeast,
            SolarOrientation::Northwest => self.factor_northwest,
            SolarOrientation::Southeast => self.factor_southeast,
            SolarOrientation::Southwest => self.factor_southwest,
        }
    }
}

fn validate_common(
    name: &str,
    rates: [Option<Decimal>; 4],
    factors: [f64; 8],
) -> Result<()> {
    if name.trim().len() < MIN_NAME_LENGTH {
        return Err(PricingError::InvalidData(format!(
            "Parameter set name must have at least {} characters",
            MIN_NAME_LENGTH
        )));
    }
    for rate in rates.into_iter().flatten() {
        if rate < Decimal::ZERO {
            return Err(PricingError::InvalidData(
                "Per-m² rates cannot be negative".to_string(),
            ));
        }
    }
    for factor in factors {
        if !factor.is_finite() || factor < 0.0 {
            return Err(PricingError::InvalidData(
                "Orientation factors must be finite and non-negative".to_string(),
            ));
        }
    }
    Ok(())
}

/// Input model for creating a new pricing parameter set.
/// `floor_overrides` maps floor index to valorization percentage; missing
/// floors default to 0%.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPricingParameterSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub development_id: String,
    pub name: String,
    pub description: Option<String>,
    pub rate_studio: Option<Decimal>,
    pub rate_apartment: Option<Decimal>,
    pub rate_commercial: Option<Decimal>,
    pub rate_garden: Option<Decimal>,
    pub value_suite: Decimal,
    pub value_parking_simple: Decimal,
    pub value_parking_double: Decimal,
    pub value_parking_moto: Decimal,
    pub value_storage_box: Decimal,
    pub factor_north: f64,
    pub factor_south: f64,
    pub factor_east: f64,
    pub factor_west: f64,
    pub factor_northeast: f64,
    pub factor_northwest: f64,
    pub factor_southeast: f64,
    pub factor_southwest: f64,
    #[serde(default)]
    pub floor_overrides: HashMap<i32, f64>,
}

impl NewPricingParameterSet {
    pub fn validate(&self) -> Result<()> {
        validate_common(
            &self.name,
            [
                self.rate_studio,
                self.rate_apartment,
                self.rate_commercial,
                self.rate_garden,
            ],
            [
                self.factor_north,
                self.factor_south,
                self.factor_east,
                self.factor_west,
                self.factor_northeast,
                self.factor_northwest,
                self.factor_southeast,
                self.factor_southwest,
            ],
        )
    }
}

/// Input model for updating an existing parameter set. The floor curve is
/// always regenerated wholesale from `floor_overrides`, never diffed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingParameterSetUpdate {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub rate_studio: Option<Decimal>,
    pub rate_apartment: Option<Decimal>,
    pub rate_commercial: Option<Decimal>,
    pub rate_garden: Option<Decimal>,
    pub value_suite: Decimal,
    pub value_parking_simple: Decimal,
    pub value_parking_double: Decimal,
    pub value_parking_moto: Decimal,
    pub value_storage_box: Decimal,
    pub factor_north: f64,
    pub factor_south: f64,
    pub factor_east: f64,
    pub factor_west: f64,
    pub factor_northeast: f64,
    pub factor_northwest: f64,
    pub factor_southeast: f64,
    pub factor_southwest: f64,
    #[serde(default)]
    pub floor_overrides: HashMap<i32, f64>,
}

impl PricingParameterSetUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(PricingError::InvalidData(
                "Parameter set ID is required for updates".to_string(),
            ));
        }
        validate_common(
            &self.name,
            [
                self.rate_studio,
                self.rate_apartment,
                self.rate_commercial,
                self.rate_garden,
            ],
            [
                self.factor_north,
                self.factor_south,
                self.factor_east,
                self.factor_west,
                self.factor_northeast,
                self.factor_northwest,
                self.factor_southeast,
                self.factor_southwest,
            ],
        )
    }
}

/// Per-floor percentage adjustment belonging to one parameter set.
/// Exactly one row per floor 0..=20 after configuration.
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Identifiable, Insertable, Selectable,
)]
#[serde(rename_all = "camelCase")]
#[diesel(table_name = crate::schema::floor_valorizations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FloorValorization {
    pub id: String,
    pub parameter_set_id: String,
    pub floor: i32,
    pub percentage: f64,
}

/// Database model for pricing parameter sets
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::pricing_parameter_sets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PricingParameterSetDB {
    pub id: String,
    pub development_id: String,
    pub name: String,
    pub description: Option<String>,
    pub rate_studio: Option<String>,
    pub rate_apartment: Option<String>,
    pub rate_commercial: Option<String>,
    pub rate_garden: Option<String>,
    pub value_suite: String,
    pub value_parking_simple: String,
    pub value_parking_double: String,
    pub value_parking_moto: String,
    pub value_storage_box: String,
    pub factor_north: f64,
    pub factor_south: f64,
    pub factor_east: f64,
    pub factor_west: f64,
    pub factor_northeast: f64,
    pub factor_northwest: f64,
    pub factor_southeast: f64,
    pub factor_southwest: f64,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<PricingParameterSetDB> for PricingParameterSet {
    fn from(db: PricingParameterSetDB) -> Self {
        let parse = |v: Option<String>| v.and_then(|s| Decimal::from_str(&s).ok());
        Self {
            id: db.id,
            development_id: db.development_id,
            name: db.name,
            description: db.description,
            rate_studio: parse(db.rate_studio),
            rate_apartment: parse(db.rate_apartment),
            rate_commercial: parse(db.rate_commercial),
            rate_garden: parse(db.rate_garden),
            value_suite: Decimal::from_str(&db.value_suite).unwrap_or_default(),
            value_parking_simple: Decimal::from_str(&db.value_parking_simple).unwrap_or_default(),
            value_parking_double: Decimal::from_str(&db.value_parking_double).unwrap_or_default(),
            value_parking_moto: Decimal::from_str(&db.value_parking_moto).unwrap_or_default(),
            value_storage_box: Decimal::from_str(&db.value_storage_box).unwrap_or_default(),
            factor_north: db.factor_north,
            factor_south: db.factor_south,
            factor_east: db.factor_east,
            factor_west: db.factor_west,
            factor_northeast: db.factor_northeast,
            factor_northwest: db.factor_northwest,
            factor_southeast: db.factor_southeast,
            factor_southwest: db.factor_southwest,
            is_active: db.is_active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewPricingParameterSet> for PricingParameterSetDB {
    fn from(domain: NewPricingParameterSet) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain.id.unwrap_or_default(),
            development_id: domain.development_id,
            name: domain.name,
            description: domain.description,
            rate_studio: domain.rate_studio.map(|r| r.to_string()),
            rate_apartment: domain.rate_apartment.map(|r| r.to_string()),
            rate_commercial: domain.rate_commercial.map(|r| r.to_string()),
            rate_garden: domain.rate_garden.map(|r| r.to_string()),
            value_suite: domain.value_suite.to_string(),
            value_parking_simple: domain.value_parking_simple.to_string(),
            value_parking_double: domain.value_parking_double.to_string(),
            value_parking_moto: domain.value_parking_moto.to_string(),
            value_storage_box: domain.value_storage_box.to_string(),
            factor_north: domain.factor_north,
            factor_south: domain.factor_south,
            factor_east: domain.factor_east,
            factor_west: domain.factor_west,
            factor_northeast: domain.factor_northeast,
            factor_northwest: domain.factor_northwest,
            factor_southeast: domain.factor_southeast,
            factor_southwest: domain.factor_southwest,
            // New sets always start inactive; activation is an explicit swap
            is_active: false,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Default for NewPricingParameterSet {
    fn default() -> Self {
        Self {
            id: None,
            development_id: String::new(),
            name: String::new(),
            description: None,
            rate_studio: None,
            rate_apartment: None,
            rate_commercial: None,
            rate_garden: None,
            value_suite: Decimal::ZERO,
            value_parking_simple: Decimal::ZERO,
            value_parking_double: Decimal::ZERO,
            value_parking_moto: Decimal::ZERO,
            value_storage_box: Decimal::ZERO,
            factor_north: NEUTRAL_ORIENTATION_FACTOR,
            factor_south: NEUTRAL_ORIENTATION_FACTOR,
            factor_east: NEUTRAL_ORIENTATION_FACTOR,
            factor_west: NEUTRAL_ORIENTATION_FACTOR,
            factor_northeast: NEUTRAL_ORIENTATION_FACTOR,
            factor_northwest: NEUTRAL_ORIENTATION_FACTOR,
            factor_southeast: NEUTRAL_ORIENTATION_FACTOR,
            factor_southwest: NEUTRAL_ORIENTATION_FACTOR,
            floor_overrides: HashMap::new(),
        }
    }
}
