use std::collections::HashMap;

use diesel::prelude::*;
use rust_decimal_macros::dec;

use precifica_core::errors::Error;
use precifica_core::pricing::{PricingError, PricingRepository};
use precifica_core::repricing::RepricingService;
use precifica_core::schema::units as units_schema;
use precifica_core::units::UnitRepository;

mod common;

#[tokio::test]
async fn activation_swap_leaves_exactly_one_active_set() {
    let (_dir, pool) = common::setup_db();
    let development_id = common::seed_development(&pool, "Residencial Aurora");

    let pricing_repo = PricingRepository::new(pool.clone());
    let set_a = pricing_repo
        .create(common::base_parameter_set(
            &development_id,
            "Launch",
            dec!(6000),
            HashMap::new(),
        ))
        .unwrap();
    let set_b = pricing_repo
        .create(common::base_parameter_set(
            &development_id,
            "Phase 2",
            dec!(6500),
            HashMap::new(),
        ))
        .unwrap();

    let service = RepricingService::new(pool.clone());
    service
        .activate_and_recalculate(&development_id, &set_a.id)
        .await
        .unwrap();
    service
        .activate_and_recalculate(&development_id, &set_b.id)
        .await
        .unwrap();

    let sets = pricing_repo.list_by_development(&development_id).unwrap();
    let active: Vec<_> = sets.iter().filter(|s| s.is_active).collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, set_b.id);

    let previous = pricing_repo.get_by_id(&set_a.id).unwrap();
    assert!(!previous.is_active);
}

#[tokio::test]
async fn activation_reprices_every_unit() {
    let (_dir, pool) = common::setup_db();
    let development_id = common::seed_development(&pool, "Residencial Aurora");

    let unit_repo = UnitRepository::new(pool.clone());
    unit_repo
        .create(common::new_unit(&development_id, "T1-101", dec!(40)))
        .unwrap();
    unit_repo
        .create(common::new_unit(&development_id, "T1-102", dec!(70)))
        .unwrap();

    let pricing_repo = PricingRepository::new(pool.clone());
    let set = pricing_repo
        .create(common::base_parameter_set(
            &development_id,
            "Launch",
            dec!(5000),
            HashMap::new(),
        ))
        .unwrap();

    let service = RepricingService::new(pool.clone());
    let result = service
        .activate_and_recalculate(&development_id, &set.id)
        .await
        .unwrap();

    assert_eq!(result.updated, 2);
    assert_eq!(result.failed, 0);
    assert!(result.errors.is_empty());

    let units = unit_repo.list_by_development(&development_id).unwrap();
    let small = units.iter().find(|u| u.identifier == "T1-101").unwrap();
    assert_eq!(small.computed_value, Some(dec!(200000.00)));
}

#[tokio::test]
async fn corrupted_unit_fails_in_isolation() {
    let (_dir, pool) = common::setup_db();
    let development_id = common::seed_development(&pool, "Residencial Aurora");

    let unit_repo = UnitRepository::new(pool.clone());
    unit_repo
        .create(common::new_unit(&development_id, "U1", dec!(40)))
        .unwrap();
    unit_repo
        .create(common::new_unit(&development_id, "U2", dec!(55)))
        .unwrap();
    let u3 = unit_repo
        .create(common::new_unit(&development_id, "U3", dec!(60)))
        .unwrap();

    // Simulate stale data that slipped past validation
    let mut conn = pool.get().unwrap();
    diesel::update(units_schema::table.find(&u3.id))
        .set(units_schema::private_area.eq("0"))
        .execute(&mut conn)
        .unwrap();

    let pricing_repo = PricingRepository::new(pool.clone());
    let set = pricing_repo
        .create(common::base_parameter_set(
            &development_id,
            "Launch",
            dec!(5000),
            HashMap::new(),
        ))
        .unwrap();

    let service = RepricingService::new(pool.clone());
    let result = service
        .activate_and_recalculate(&development_id, &set.id)
        .await
        .unwrap();

    assert_eq!(result.updated, 2);
    assert_eq!(result.failed, 1);
    assert_eq!(result.errors[0].identifier, "U3");

    let units = unit_repo.list_by_development(&development_id).unwrap();
    let healthy = units.iter().find(|u| u.identifier == "U2").unwrap();
    assert!(healthy.computed_value.is_some());
    let corrupted = units.iter().find(|u| u.identifier == "U3").unwrap();
    assert!(corrupted.computed_value.is_none());
}

#[tokio::test]
async fn activation_rejects_foreign_parameter_set() {
    let (_dir, pool) = common::setup_db();
    let development_a = common::seed_development(&pool, "Residencial Aurora");
    let development_b = common::seed_development(&pool, "Parque das Flores");

    let pricing_repo = PricingRepository::new(pool.clone());
    let set_a = pricing_repo
        .create(common::base_parameter_set(
            &development_a,
            "Launch A",
            dec!(6000),
            HashMap::new(),
        ))
        .unwrap();
    let set_b = pricing_repo
        .create(common::base_parameter_set(
            &development_b,
            "Launch B",
            dec!(7000),
            HashMap::new(),
        ))
        .unwrap();

    let service = RepricingService::new(pool.clone());
    service
        .activate_and_recalculate(&development_a, &set_a.id)
        .await
        .unwrap();

    let result = service
        .activate_and_recalculate(&development_a, &set_b.id)
        .await;
    assert!(matches!(
        result,
        Err(Error::Pricing(PricingError::InvalidData(_)))
    ));

    // Failed activation must leave the previous active set untouched
    let active = pricing_repo.get_active(&development_a).unwrap().unwrap();
    assert_eq!(active.id, set_a.id);
}

#[tokio::test]
async fn recalculate_without_active_set_is_an_error() {
    let (_dir, pool) = common::setup_db();
    let development_id = common::seed_development(&pool, "Residencial Aurora");

    let service = RepricingService::new(pool.clone());
    let result = service.recalculate(&development_id);
    assert!(matches!(
        result,
        Err(Error::Pricing(PricingError::NoActiveParameter(_)))
    ));
}

#[tokio::test]
async fn floor_curve_regeneration_is_idempotent() {
    let (_dir, pool) = common::setup_db();
    let development_id = common::seed_development(&pool, "Residencial Aurora");

    let mut overrides = HashMap::new();
    overrides.insert(10, 8.0);
    overrides.insert(20, 15.0);

    let pricing_repo = PricingRepository::new(pool.clone());
    let set = pricing_repo
        .create(common::base_parameter_set(
            &development_id,
            "Launch",
            dec!(6000),
            overrides.clone(),
        ))
        .unwrap();

    let first = pricing_repo.floor_curve(&set.id).unwrap();
    assert_eq!(first.len(), 21);

    pricing_repo
        .regenerate_floor_curve(&set.id, &overrides)
        .unwrap();
    pricing_repo
        .regenerate_floor_curve(&set.id, &overrides)
        .unwrap();

    let third = pricing_repo.floor_curve(&set.id).unwrap();
    assert_eq!(third.len(), 21);

    for floor in 0..=20 {
        let row = third.iter().find(|r| r.floor == floor).unwrap();
        let expected = overrides.get(&floor).copied().unwrap_or(0.0);
        assert_eq!(row.percentage, expected);
    }
}

#[tokio::test]
async fn cloned_set_starts_inactive_with_copied_curve() {
    let (_dir, pool) = common::setup_db();
    let development_id = common::seed_development(&pool, "Residencial Aurora");

    let mut overrides = HashMap::new();
    overrides.insert(5, 3.5);

    let pricing_repo = PricingRepository::new(pool.clone());
    let original = pricing_repo
        .create(common::base_parameter_set(
            &development_id,
            "Launch",
            dec!(6000),
            overrides,
        ))
        .unwrap();

    let service = RepricingService::new(pool.clone());
    service
        .activate_and_recalculate(&development_id, &original.id)
        .await
        .unwrap();

    let clone = pricing_repo.clone_set(&original.id, "Launch v2").unwrap();
    assert!(!clone.is_active);
    assert_eq!(clone.name, "Launch v2");
    assert_eq!(clone.rate_apartment, original.rate_apartment);

    let curve = pricing_repo.floor_curve(&clone.id).unwrap();
    assert_eq!(curve.len(), 21);
    assert_eq!(
        curve.iter().find(|r| r.floor == 5).unwrap().percentage,
        3.5
    );

    // Cloning never disturbs the active set
    let active = pricing_repo.get_active(&development_id).unwrap().unwrap();
    assert_eq!(active.id, original.id);
}

#[tokio::test]
async fn clone_rejects_too_short_name() {
    let (_dir, pool) = common::setup_db();
    let development_id = common::seed_development(&pool, "Residencial Aurora");

    let pricing_repo = PricingRepository::new(pool.clone());
    let original = pricing_repo
        .create(common::base_parameter_set(
            &development_id,
            "Launch",
            dec!(6000),
            HashMap::new(),
        ))
        .unwrap();

    let result = pricing_repo.clone_set(&original.id, "v2");
    assert!(matches!(result, Err(PricingError::InvalidData(_))));
    assert_eq!(
        pricing_repo.list_by_development(&development_id).unwrap().len(),
        1
    );
}
