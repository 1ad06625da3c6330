use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::units_errors::{Result, UnitError};

/// Commercial classification of a unit. Each type carries its own per-m² rate
/// in a pricing parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitType {
    Studio,
    #[default]
    Apartment,
    Commercial,
    Garden,
}

impl UnitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitType::Studio => "STUDIO",
            UnitType::Apartment => "APARTMENT",
            UnitType::Commercial => "COMMERCIAL",
            UnitType::Garden => "GARDEN",
        }
    }
}

impl FromStr for UnitType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "STUDIO" => Ok(UnitType::Studio),
            "APARTMENT" => Ok(UnitType::Apartment),
            "COMMERCIAL" => Ok(UnitType::Commercial),
            "GARDEN" => Ok(UnitType::Garden),
            _ => Err(format!("Unknown unit type: {}", s)),
        }
    }
}

/// Compass orientation of a unit's main facade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolarOrientation {
    North,
    South,
    East,
    West,
    Northeast,
    Northwest,
    Southeast,
    Southwest,
}

impl SolarOrientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            SolarOrientation::North => "NORTH",
            SolarOrientation::South => "SOUTH",
            SolarOrientation::East => "EAST",
            SolarOrientation::West => "WEST",
            SolarOrientation::Northeast => "NORTHEAST",
            SolarOrientation::Northwest => "NORTHWEST",
            SolarOrientation::Southeast => "SOUTHEAST",
            SolarOrientation::Southwest => "SOUTHWEST",
        }
    }
}

impl FromStr for SolarOrientation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NORTH" => Ok(SolarOrientation::North),
            "SOUTH" => Ok(SolarOrientation::South),
            "EAST" => Ok(SolarOrientation::East),
            "WEST" => Ok(SolarOrientation::West),
            "NORTHEAST" => Ok(SolarOrientation::Northeast),
            "NORTHWEST" => Ok(SolarOrientation::Northwest),
            "SOUTHEAST" => Ok(SolarOrientation::Southeast),
            "SOUTHWEST" => Ok(SolarOrientation::Southwest),
            _ => Err(format!("Unknown solar orientation: {}", s)),
        }
    }
}

/// Sales lifecycle status of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitStatus {
    #[default]
    Available,
    Reserved,
    Sold,
    Unavailable,
}

impl UnitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitStatus::Available => "AVAILABLE",
            UnitStatus::Reserved => "RESERVED",
            UnitStatus::Sold => "SOLD",
            UnitStatus::Unavailable => "UNAVAILABLE",
        }
    }
}

impl FromStr for UnitStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "AVAILABLE" => Ok(UnitStatus::Available),
            "RESERVED" => Ok(UnitStatus::Reserved),
            "SOLD" => Ok(UnitStatus::Sold),
            "UNAVAILABLE" => Ok(UnitStatus::Unavailable),
            _ => Err(format!("Unknown unit status: {}", s)),
        }
    }
}

/// Domain model representing a sellable unit inside a development
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: String,
    pub development_id: String,
    /// Operator-facing identifier, unique within the development (e.g. "T1-1204")
    pub identifier: String,
    pub unit_type: UnitType,
    pub private_area: Decimal,
    pub total_area: Decimal,
    pub floor: Option<i32>,
    pub bedrooms: i32,
    pub suites: i32,
    pub parking_simple: Option<i32>,
    pub parking_double: Option<i32>,
    pub parking_moto: Option<i32>,
    pub storage_boxes: i32,
    pub orientation: Option<SolarOrientation>,
    pub status: UnitStatus,
    pub adjustment_percentage: Option<f64>,
    pub adjustment_reason: Option<String>,
    pub computed_value: Option<Decimal>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new unit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUnit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub development_id: String,
    pub identifier: String,
    pub unit_type: UnitType,
    pub private_area: Decimal,
    /// Defaults to `private_area` when absent
    pub total_area: Option<Decimal>,
    pub floor: Option<i32>,
    pub bedrooms: i32,
    pub suites: i32,
    pub parking_simple: Option<i32>,
    pub parking_double: Option<i32>,
    pub parking_moto: Option<i32>,
    pub storage_boxes: i32,
    pub orientation: Option<SolarOrientation>,
    pub status: UnitStatus,
}

impl NewUnit {
    pub fn validate(&self) -> Result<()> {
        if self.identifier.trim().is_empty() {
            return Err(UnitError::InvalidData(
                "Unit identifier cannot be empty".to_string(),
            ));
        }
        if self.private_area <= Decimal::ZERO {
            return Err(UnitError::InvalidData(format!(
                "Unit {}: private area must be greater than zero",
                self.identifier
            )));
        }
        if let Some(total) = self.total_area {
            if total < self.private_area {
                return Err(UnitError::InvalidData(format!(
                    "Unit {}: total area cannot be smaller than private area",
                    self.identifier
                )));
            }
        }
        for (field, count) in [
            ("bedrooms", Some(self.bedrooms)),
            ("suites", Some(self.suites)),
            ("storageBoxes", Some(self.storage_boxes)),
            ("parkingSimple", self.parking_simple),
            ("parkingDouble", self.parking_double),
            ("parkingMoto", self.parking_moto),
        ] {
            if let Some(count) = count {
                if count < 0 {
                    return Err(UnitError::InvalidData(format!(
                        "Unit {}: {} cannot be negative",
                        self.identifier, field
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Input model for updating an existing unit.
/// Adjustment fields and the computed value are managed by the adjustment
/// and repricing flows, never by plain form updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitUpdate {
    pub id: String,
    pub identifier: String,
    pub unit_type: UnitType,
    pub private_area: Decimal,
    pub total_area: Option<Decimal>,
    pub floor: Option<i32>,
    pub bedrooms: i32,
    pub suites: i32,
    pub parking_simple: Option<i32>,
    pub parking_double: Option<i32>,
    pub parking_moto: Option<i32>,
    pub storage_boxes: i32,
    pub orientation: Option<SolarOrientation>,
    pub status: UnitStatus,
}

impl UnitUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(UnitError::InvalidData(
                "Unit ID is required for updates".to_string(),
            ));
        }
        if self.identifier.trim().is_empty() {
            return Err(UnitError::InvalidData(
                "Unit identifier cannot be empty".to_string(),
            ));
        }
        if self.private_area <= Decimal::ZERO {
            return Err(UnitError::InvalidData(format!(
                "Unit {}: private area must be greater than zero",
                self.identifier
            )));
        }
        if let Some(total) = self.total_area {
            if total < self.private_area {
                return Err(UnitError::InvalidData(format!(
                    "Unit {}: total area cannot be smaller than private area",
                    self.identifier
                )));
            }
        }
        Ok(())
    }
}

/// Database model for units
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::units)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UnitDB {
    pub id: String,
    pub development_id: String,
    pub identifier: String,
    pub unit_type: String,
    pub private_area: String,
    pub total_area: String,
    pub floor: Option<i32>,
    pub bedrooms: i32,
    pub suites: i32,
    pub parking_simple: Option<i32>,
    pub parking_double: Option<i32>,
    pub parking_moto: Option<i32>,
    pub storage_boxes: i32,
    pub orientation: Option<String>,
    pub status: String,
    pub adjustment_percentage: Option<f64>,
    pub adjustment_reason: Option<String>,
    pub computed_value: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<UnitDB> for Unit {
    fn from(db: UnitDB) -> Self {
        Self {
            id: db.id,
            development_id: db.development_id,
            identifier: db.identifier,
            unit_type: UnitType::from_str(&db.unit_type).unwrap_or_default(),
            private_area: Decimal::from_str(&db.private_area).unwrap_or_default(),
            total_area: Decimal::from_str(&db.total_area).unwrap_or_default(),
            floor: db.floor,
            bedrooms: db.bedrooms,
            suites: db.suites,
            parking_simple: db.parking_simple,
            parking_double: db.parking_double,
            parking_moto: db.parking_moto,
            storage_boxes: db.storage_boxes,
            orientation: db.orientation.and_then(|o| o.parse().ok()),
            status: UnitStatus::from_str(&db.status).unwrap_or_default(),
            adjustment_percentage: db.adjustment_percentage,
            adjustment_reason: db.adjustment_reason,
            computed_value: db
                .computed_value
                .and_then(|v| Decimal::from_str(&v).ok()),
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewUnit> for UnitDB {
    fn from(domain: NewUnit) -> Self {
        let now = chrono::Utc::now().naive_utc();
        let total_area = domain.total_area.unwrap_or(domain.private_area);
        Self {
            id: domain.id.unwrap_or_default(),
            development_id: domain.development_id,
            identifier: domain.identifier,
            unit_type: domain.unit_type.as_str().to_string(),
            private_area: domain.private_area.to_string(),
            total_area: total_area.to_string(),
            floor: domain.floor,
            bedrooms: domain.bedrooms,
            suites: domain.suites,
            parking_simple: domain.parking_simple,
            parking_double: domain.parking_double,
            parking_moto: domain.parking_moto,
            storage_boxes: domain.storage_boxes,
            orientation: domain.orientation.map(|o| o.as_str().to_string()),
            status: domain.status.as_str().to_string(),
            adjustment_percentage: None,
            adjustment_reason: None,
            computed_value: None,
            created_at: now,
            updated_at: now,
        }
    }
}
