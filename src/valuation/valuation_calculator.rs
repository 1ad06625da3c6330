use log::trace;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::constants::MONEY_DECIMAL_PLACES;
use crate::pricing::{FloorValorization, PricingParameterSet};
use crate::units::Unit;
use crate::valuation::ValuationError;

/// Computes the market value of a single unit under a pricing parameter set.
///
/// The computation is a fixed pipeline:
/// 1. base value = private area × per-m² rate for the unit type (unpriced
///    types value at zero, never an error);
/// 2. plus flat add-ons for suites, parking slots and storage boxes;
/// 3. times the solar-orientation factor (unset orientation is neutral; a
///    factor of zero is legal and zeroes the value);
/// 4. times the floor valorization `(1 + pct/100)` for the unit's floor
///    (missing floor or row means 0%);
/// 5. times the manual adjustment `(1 + pct/100)` when one is set — always
///    the last step, so regenerating the parameter set never reorders the
///    operator's override;
/// 6. rounded half-up to currency precision.
///
/// Pure function over already-loaded data; it touches no shared state.
pub fn compute_value(
    unit: &Unit,
    params: &PricingParameterSet,
    floor_curve: &[FloorValorization],
) -> std::result::Result<Decimal, ValuationError> {
    if unit.private_area <= Decimal::ZERO {
        return Err(ValuationError::InvalidUnit(format!(
            "Unit {} has non-positive private area",
            unit.identifier
        )));
    }

    let rate = params.rate_for(unit.unit_type);
    let mut value = unit.private_area * rate;

    value += Decimal::from(unit.suites) * params.value_suite;
    value += Decimal::from(unit.parking_simple.unwrap_or(0)) * params.value_parking_simple;
    value += Decimal::from(unit.parking_double.unwrap_or(0)) * params.value_parking_double;
    value += Decimal::from(unit.parking_moto.unwrap_or(0)) * params.value_parking_moto;
    value += Decimal::from(unit.storage_boxes) * params.value_storage_box;

    if let Some(orientation) = unit.orientation {
        let factor = Decimal::from_f64(params.orientation_factor(orientation)).ok_or_else(|| {
            ValuationError::InvalidParameters(format!(
                "Orientation factor for {} is not a representable number",
                orientation.as_str()
            ))
        })?;
        value *= factor;
    }

    if let Some(floor_index) = unit.floor {
        if let Some(row) = floor_curve.iter().find(|r| r.floor == floor_index) {
            let percentage = Decimal::from_f64(row.percentage).ok_or_else(|| {
                ValuationError::InvalidParameters(format!(
                    "Valorization percentage for floor {} is not a representable number",
                    floor_index
                ))
            })?;
            value *= Decimal::ONE + percentage / dec!(100);
        }
    }

    if let Some(adjustment) = unit.adjustment_percentage {
        let percentage = Decimal::from_f64(adjustment).ok_or_else(|| {
            ValuationError::InvalidParameters(format!(
                "Adjustment percentage of unit {} is not a representable number",
                unit.identifier
            ))
        })?;
        value *= Decimal::ONE + percentage / dec!(100);
    }

    let rounded = value.round_dp_with_strategy(
        MONEY_DECIMAL_PLACES,
        RoundingStrategy::MidpointAwayFromZero,
    );

    trace!("Unit {} valued at {}", unit.identifier, rounded);

    Ok(rounded)
}
