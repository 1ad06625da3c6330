use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::MIN_NAME_LENGTH;

use super::developments_errors::{DevelopmentError, Result};

/// Domain model representing a real-estate development
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Development {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new development
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDevelopment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
}

impl NewDevelopment {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().len() < MIN_NAME_LENGTH {
            return Err(DevelopmentError::InvalidData(format!(
                "Development name must have at least {} characters",
                MIN_NAME_LENGTH
            )));
        }
        Ok(())
    }
}

/// Input model for updating an existing development
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevelopmentUpdate {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
}

impl DevelopmentUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(DevelopmentError::InvalidData(
                "Development ID is required for updates".to_string(),
            ));
        }
        if self.name.trim().len() < MIN_NAME_LENGTH {
            return Err(DevelopmentError::InvalidData(format!(
                "Development name must have at least {} characters",
                MIN_NAME_LENGTH
            )));
        }
        Ok(())
    }
}

/// Database model for developments
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::developments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DevelopmentDB {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<DevelopmentDB> for Development {
    fn from(db: DevelopmentDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            description: db.description,
            address: db.address,
            city: db.city,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewDevelopment> for DevelopmentDB {
    fn from(domain: NewDevelopment) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: domain.id.unwrap_or_default(),
            name: domain.name,
            description: domain.description,
            address: domain.address,
            city: domain.city,
            created_at: now,
            updated_at: now,
        }
    }
}
