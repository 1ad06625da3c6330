use std::collections::HashMap;

use rust_decimal_macros::dec;

use precifica_core::adjustments::{AdjustmentError, AdjustmentService, NewAdjustment};
use precifica_core::pricing::PricingRepository;
use precifica_core::repricing::RepricingService;
use precifica_core::units::UnitRepository;

mod common;

async fn seed_priced_unit(
    pool: &std::sync::Arc<precifica_core::db::DbPool>,
) -> (String, String) {
    let development_id = common::seed_development(pool, "Residencial Aurora");

    let unit_repo = UnitRepository::new(pool.clone());
    let unit = unit_repo
        .create(common::new_unit(&development_id, "T1-101", dec!(40)))
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

    let repricing = RepricingService::new(pool.clone());
    repricing
        .activate_and_recalculate(&development_id, &set.id)
        .await
        .unwrap();

    (development_id, unit.id)
}

#[tokio::test]
async fn adjustment_updates_value_and_appends_ledger_entry() {
    let (_dir, pool) = common::setup_db();
    let (_development_id, unit_id) = seed_priced_unit(&pool).await;

    let service = AdjustmentService::new(pool.clone());
    let outcome = service
        .apply_adjustment(NewAdjustment {
            unit_id: unit_id.clone(),
            operator_id: "operator-1".to_string(),
            percentage: 10.0,
            reason: Some("Corner unit premium".to_string()),
        })
        .await
        .unwrap();

    // 40m² × 5000 = 200000, +10% = 220000
    assert_eq!(outcome.value_before, Some(dec!(200000.00)));
    assert_eq!(outcome.value_after, dec!(220000.00));

    let unit_repo = UnitRepository::new(pool.clone());
    let unit = unit_repo.get_by_id(&unit_id).unwrap();
    assert_eq!(unit.computed_value, Some(dec!(220000.00)));
    assert_eq!(unit.adjustment_percentage, Some(10.0));

    let history = service.get_history(&unit_id).unwrap();
    assert_eq!(history.len(), 1);
    let entry = &history[0];
    assert_eq!(entry.operator_id, "operator-1");
    assert_eq!(entry.previous_percentage, None);
    assert_eq!(entry.new_percentage, 10.0);
    assert_eq!(entry.value_before, Some(dec!(200000.00)));
    assert_eq!(entry.value_after, dec!(220000.00));
}

#[tokio::test]
async fn adjustment_requires_an_active_parameter_set() {
    let (_dir, pool) = common::setup_db();
    let development_id = common::seed_development(&pool, "Residencial Aurora");

    let unit_repo = UnitRepository::new(pool.clone());
    let unit = unit_repo
        .create(common::new_unit(&development_id, "T1-101", dec!(40)))
        .unwrap();

    let service = AdjustmentService::new(pool.clone());
    let result = service
        .apply_adjustment(NewAdjustment {
            unit_id: unit.id,
            operator_id: "operator-1".to_string(),
            percentage: 5.0,
            reason: None,
        })
        .await;

    assert!(matches!(
        result,
        Err(AdjustmentError::NoActiveParameter(_))
    ));
}

#[tokio::test]
async fn adjustment_rejects_empty_operator() {
    let (_dir, pool) = common::setup_db();
    let (_development_id, unit_id) = seed_priced_unit(&pool).await;

    let service = AdjustmentService::new(pool.clone());
    let result = service
        .apply_adjustment(NewAdjustment {
            unit_id,
            operator_id: "  ".to_string(),
            percentage: 5.0,
            reason: None,
        })
        .await;

    assert!(matches!(result, Err(AdjustmentError::InvalidData(_))));
}

#[tokio::test]
async fn repeated_adjustments_accumulate_history_not_effect() {
    let (_dir, pool) = common::setup_db();
    let (_development_id, unit_id) = seed_priced_unit(&pool).await;

    let service = AdjustmentService::new(pool.clone());
    service
        .apply_adjustment(NewAdjustment {
            unit_id: unit_id.clone(),
            operator_id: "operator-1".to_string(),
            percentage: 10.0,
            reason: None,
        })
        .await
        .unwrap();
    let second = service
        .apply_adjustment(NewAdjustment {
            unit_id: unit_id.clone(),
            operator_id: "operator-2".to_string(),
            percentage: -5.0,
            reason: Some("Price review".to_string()),
        })
        .await
        .unwrap();

    // The new percentage replaces the old one, it does not stack
    assert_eq!(second.value_after, dec!(190000.00));

    let history = service.get_history(&unit_id).unwrap();
    assert_eq!(history.len(), 2);
    let replacing = history
        .iter()
        .find(|e| e.new_percentage == -5.0)
        .unwrap();
    assert_eq!(replacing.previous_percentage, Some(10.0));
    assert_eq!(replacing.value_before, Some(dec!(220000.00)));
}

#[tokio::test]
async fn adjustment_survives_reactivation() {
    let (_dir, pool) = common::setup_db();
    let (development_id, unit_id) = seed_priced_unit(&pool).await;

    let service = AdjustmentService::new(pool.clone());
    service
        .apply_adjustment(NewAdjustment {
            unit_id: unit_id.clone(),
            operator_id: "operator-1".to_string(),
            percentage: 10.0,
            reason: None,
        })
        .await
        .unwrap();

    // Activating a fresh set re-reads and re-applies the stored percentage
    let pricing_repo = PricingRepository::new(pool.clone());
    let replacement = pricing_repo
        .create(common::base_parameter_set(
            &development_id,
            "Phase 2",
            dec!(6000),
            HashMap::new(),
        ))
        .unwrap();

    let repricing = RepricingService::new(pool.clone());
    repricing
        .activate_and_recalculate(&development_id, &replacement.id)
        .await
        .unwrap();

    let unit_repo = UnitRepository::new(pool.clone());
    let unit = unit_repo.get_by_id(&unit_id).unwrap();
    // 40 × 6000 = 240000, still +10%
    assert_eq!(unit.computed_value, Some(dec!(264000.00)));
    assert_eq!(unit.adjustment_percentage, Some(10.0));
}
