use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregate sales metrics for one development, derived exclusively from
/// persisted computed values. Reporting never recomputes a unit's value; a
/// change to the pricing algorithm only shows up here after an explicit
/// recalculation pass.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DevelopmentSummary {
    pub development_id: String,
    /// Gross sales value: sum of computed values across all units
    pub total_vgv: Decimal,
    pub unit_count: usize,
    /// Units that currently carry a computed value
    pub valued_count: usize,
    pub available_count: usize,
    pub reserved_count: usize,
    pub sold_count: usize,
    pub unavailable_count: usize,
    /// VGV restricted to sold units
    pub sold_vgv: Decimal,
    /// VGV restricted to units still available for sale
    pub available_vgv: Decimal,
}
