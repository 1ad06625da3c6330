use std::sync::Arc;

use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;

use crate::adjustments::{AdjustmentError, Result};
use crate::db::get_connection;
use crate::schema::{adjustment_history, units};

use super::adjustments_model::{AdjustmentHistoryEntry, AdjustmentHistoryEntryDB};

/// Repository for the append-only adjustment ledger
pub struct AdjustmentRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl AdjustmentRepository {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    /// Persists the unit's new adjustment state and appends the ledger entry
    /// in one transaction: both land, or neither does.
    pub fn apply(
        &self,
        entry: AdjustmentHistoryEntryDB,
        reason: Option<String>,
    ) -> Result<AdjustmentHistoryEntry> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| AdjustmentError::DatabaseError(e.to_string()))?;

        let now = chrono::Utc::now().naive_utc();

        conn.transaction::<_, AdjustmentError, _>(|tx_conn| {
            diesel::update(units::table.find(&entry.unit_id))
                .set((
                    units::adjustment_percentage.eq(Some(entry.new_percentage)),
                    units::adjustment_reason.eq(reason.clone()),
                    units::computed_value.eq(Some(entry.value_after.clone())),
                    units::updated_at.eq(now),
                ))
                .execute(tx_conn)?;

            diesel::insert_into(adjustment_history::table)
                .values(&entry)
                .execute(tx_conn)?;

            Ok(())
        })?;

        Ok(entry.into())
    }

    /// Ledger entries for a unit, newest first
    pub fn history(&self, for_unit_id: &str) -> Result<Vec<AdjustmentHistoryEntry>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| AdjustmentError::DatabaseError(e.to_string()))?;

        adjustment_history::table
            .filter(adjustment_history::unit_id.eq(for_unit_id))
            .order(adjustment_history::created_at.desc())
            .load::<AdjustmentHistoryEntryDB>(&mut conn)
            .map_err(|e| AdjustmentError::DatabaseError(e.to_string()))
            .map(|results| {
                results
                    .into_iter()
                    .map(AdjustmentHistoryEntry::from)
                    .collect()
            })
    }
}
