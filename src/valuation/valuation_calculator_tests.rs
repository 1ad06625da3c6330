use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::pricing::{FloorValorization, PricingParameterSet};
use crate::units::{SolarOrientation, Unit, UnitStatus, UnitType};
use crate::valuation::compute_value;
use crate::valuation::ValuationError;

fn neutral_params() -> PricingParameterSet {
    PricingParameterSet {
        id: "param-1".to_string(),
        development_id: "dev-1".to_string(),
        name: "Launch pricing".to_string(),
        factor_north: 1.0,
        factor_south: 1.0,
        factor_east: 1.0,
        factor_west: 1.0,
        factor_northeast: 1.0,
        factor_northwest: 1.0,
        factor_southeast: 1.0,
        factor_southwest: 1.0,
        is_active: true,
        ..Default::default()
    }
}

fn unit(identifier: &str, unit_type: UnitType, private_area: Decimal) -> Unit {
    Unit {
        id: format!("unit-{}", identifier),
        development_id: "dev-1".to_string(),
        identifier: identifier.to_string(),
        unit_type,
        private_area,
        total_area: private_area,
        status: UnitStatus::Available,
        ..Default::default()
    }
}

fn curve_with(floor: i32, percentage: f64) -> Vec<FloorValorization> {
    (0..=20)
        .map(|f| FloorValorization {
            id: format!("fv-{}", f),
            parameter_set_id: "param-1".to_string(),
            floor: f,
            percentage: if f == floor { percentage } else { 0.0 },
        })
        .collect()
}

#[test]
fn studio_base_rate_only() {
    // 40m² × R$5000/m², no add-ons, neutral factors, ground floor
    let mut params = neutral_params();
    params.rate_studio = Some(dec!(5000));

    let mut studio = unit("T1-001", UnitType::Studio, dec!(40));
    studio.floor = Some(0);

    let value = compute_value(&studio, &params, &curve_with(0, 0.0)).unwrap();
    assert_eq!(value, dec!(200000.00));
}

#[test]
fn full_pipeline_with_addons_orientation_floor_and_adjustment() {
    let mut params = neutral_params();
    params.rate_apartment = Some(dec!(6000));
    params.value_suite = dec!(15000);
    params.value_parking_simple = dec!(8000);
    params.factor_north = 1.05;

    let mut apartment = unit("T1-1002", UnitType::Apartment, dec!(70));
    apartment.suites = 1;
    apartment.parking_simple = Some(2);
    apartment.orientation = Some(SolarOrientation::North);
    apartment.floor = Some(10);
    apartment.adjustment_percentage = Some(-5.0);

    // ((70×6000) + 15000 + 16000) × 1.05 × 1.08 × 0.95
    let value = compute_value(&apartment, &params, &curve_with(10, 8.0)).unwrap();
    assert_eq!(value, dec!(485862.30));
}

#[test]
fn unpriced_type_values_at_zero_but_addons_still_count() {
    let mut params = neutral_params();
    params.value_suite = dec!(15000);

    let mut shop = unit("L-01", UnitType::Commercial, dec!(55));
    shop.suites = 1;

    let value = compute_value(&shop, &params, &[]).unwrap();
    assert_eq!(value, dec!(15000.00));
}

#[test]
fn unset_orientation_matches_factor_of_exactly_one() {
    let mut params = neutral_params();
    params.rate_apartment = Some(dec!(4800));
    params.factor_south = 1.0;

    let plain = unit("A-101", UnitType::Apartment, dec!(62.5));
    let mut oriented = unit("A-102", UnitType::Apartment, dec!(62.5));
    oriented.orientation = Some(SolarOrientation::South);

    let value_plain = compute_value(&plain, &params, &[]).unwrap();
    let value_oriented = compute_value(&oriented, &params, &[]).unwrap();
    assert_eq!(value_plain, value_oriented);
}

#[test]
fn zero_orientation_factor_zeroes_the_value() {
    let mut params = neutral_params();
    params.rate_apartment = Some(dec!(6000));
    params.factor_west = 0.0;

    let mut west_facing = unit("A-201", UnitType::Apartment, dec!(70));
    west_facing.orientation = Some(SolarOrientation::West);

    let value = compute_value(&west_facing, &params, &[]).unwrap();
    assert_eq!(value, dec!(0.00));
}

#[test]
fn missing_floor_row_means_no_valorization() {
    let mut params = neutral_params();
    params.rate_apartment = Some(dec!(5000));

    let mut high_rise = unit("A-2501", UnitType::Apartment, dec!(80));
    high_rise.floor = Some(25); // above the configured curve

    let value = compute_value(&high_rise, &params, &curve_with(10, 8.0)).unwrap();
    assert_eq!(value, dec!(400000.00));
}

#[test]
fn adjustment_is_applied_after_floor_valorization() {
    // base 100 × 1.05 (floor) × 1.10 (adjustment) = 115.50
    let mut params = neutral_params();
    params.rate_apartment = Some(dec!(5));

    let mut apartment = unit("A-501", UnitType::Apartment, dec!(20));
    apartment.floor = Some(5);
    apartment.adjustment_percentage = Some(10.0);

    let value = compute_value(&apartment, &params, &curve_with(5, 5.0)).unwrap();
    assert_eq!(value, dec!(115.50));
}

#[test]
fn non_positive_private_area_is_rejected() {
    let mut params = neutral_params();
    params.rate_apartment = Some(dec!(6000));

    let corrupted = unit("A-000", UnitType::Apartment, Decimal::ZERO);

    let result = compute_value(&corrupted, &params, &[]);
    assert!(matches!(result, Err(ValuationError::InvalidUnit(_))));
}

#[test]
fn unrepresentable_orientation_factor_is_rejected() {
    // A NaN factor can only come from a corrupted row; it must never be
    // silently treated as neutral
    let mut params = neutral_params();
    params.rate_apartment = Some(dec!(6000));
    params.factor_west = f64::NAN;

    let mut west_facing = unit("A-301", UnitType::Apartment, dec!(70));
    west_facing.orientation = Some(SolarOrientation::West);

    let result = compute_value(&west_facing, &params, &[]);
    assert!(matches!(result, Err(ValuationError::InvalidParameters(_))));
}

#[test]
fn computation_is_deterministic() {
    let mut params = neutral_params();
    params.rate_garden = Some(dec!(7250.55));
    params.value_storage_box = dec!(3500);
    params.factor_northeast = 1.037;

    let mut garden = unit("G-01", UnitType::Garden, dec!(123.45));
    garden.storage_boxes = 2;
    garden.orientation = Some(SolarOrientation::Northeast);
    garden.floor = Some(1);
    garden.adjustment_percentage = Some(2.5);

    let curve = curve_with(1, -3.0);
    let first = compute_value(&garden, &params, &curve).unwrap();
    let second = compute_value(&garden, &params, &curve).unwrap();
    assert_eq!(first, second);
}
