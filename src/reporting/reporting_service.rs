use std::sync::Arc;

use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::units::{UnitRepository, UnitStatus};

use super::reporting_model::DevelopmentSummary;

/// Read-only reporting over persisted unit values
pub struct ReportingService {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl ReportingService {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    pub fn development_summary(&self, development_id: &str) -> Result<DevelopmentSummary> {
        let unit_repo = UnitRepository::new(self.pool.clone());
        let units = unit_repo.list_by_development(development_id)?;

        let mut summary = DevelopmentSummary {
            development_id: development_id.to_string(),
            unit_count: units.len(),
            ..Default::default()
        };

        for unit in &units {
            match unit.status {
                UnitStatus::Available => summary.available_count += 1,
                UnitStatus::Reserved => summary.reserved_count += 1,
                UnitStatus::Sold => summary.sold_count += 1,
                UnitStatus::Unavailable => summary.unavailable_count += 1,
            }

            if let Some(value) = unit.computed_value {
                summary.valued_count += 1;
                summary.total_vgv += value;
                match unit.status {
                    UnitStatus::Sold => summary.sold_vgv += value,
                    UnitStatus::Available => summary.available_vgv += value,
                    _ => {}
                }
            }
        }

        Ok(summary)
    }

    /// Total VGV of a development; shorthand used by dashboard widgets
    pub fn total_vgv(&self, development_id: &str) -> Result<Decimal> {
        Ok(self.development_summary(development_id)?.total_vgv)
    }
}
