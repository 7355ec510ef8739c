//! Unit tests for trade plan generation

use proptest::prelude::*;
use stockscan::config::PlanConfig;
use stockscan::models::{SignalLabel, TradeDirection, TradePlan};
use stockscan::signals::TradePlanGenerator;
use stockscan::EngineError;

use crate::fixtures::price_context;

fn planner() -> TradePlanGenerator {
    TradePlanGenerator::new(PlanConfig::default())
}

#[test]
fn test_hold_has_no_plan() {
    let plan = planner()
        .generate(SignalLabel::Hold, &price_context(100.0, 100.0), Some(2.0))
        .unwrap();
    assert_eq!(plan, TradePlan::NotApplicable);
}

#[test]
fn test_long_plan_uses_atr_stop_when_swing_is_further() {
    let mut price = price_context(105.0, 103.0);
    price.swing_low = 100.0;
    let plan = planner()
        .generate(SignalLabel::StrongBuy, &price, Some(2.0))
        .unwrap();
    let levels = plan.levels().unwrap();
    assert_eq!(levels.direction, TradeDirection::Long);
    assert_eq!(levels.entry_price, 105.0);
    assert_eq!(levels.stop_loss_price, 102.0);
    assert_eq!(levels.target_prices, vec![109.5, 112.5]);
    assert_eq!(levels.risk_reward_ratio, 1.5);
}

#[test]
fn test_short_plan_mirrors_long() {
    let mut price = price_context(100.0, 102.0);
    price.swing_high = 110.0;
    let plan = planner().generate(SignalLabel::Sell, &price, Some(2.0)).unwrap();
    let levels = plan.levels().unwrap();
    assert_eq!(levels.direction, TradeDirection::Short);
    assert_eq!(levels.stop_loss_price, 103.0);
    assert_eq!(levels.target_prices, vec![95.5, 92.5]);
}

#[test]
fn test_entry_pullback_improves_entry() {
    let config = PlanConfig {
        entry_pullback_pct: 0.01,
        ..PlanConfig::default()
    };
    let plan = TradePlanGenerator::new(config)
        .generate(SignalLabel::Buy, &price_context(100.0, 99.0), Some(2.0))
        .unwrap();
    let levels = plan.levels().unwrap();
    assert!((levels.entry_price - 99.0).abs() < 1e-9);
    assert!(levels.is_consistent());
}

#[test]
fn test_zero_atr_is_degenerate() {
    let result = planner().generate(SignalLabel::Buy, &price_context(100.0, 99.0), Some(0.0));
    assert!(matches!(result, Err(EngineError::DegenerateRisk(_))));

    let result = planner().generate(SignalLabel::Sell, &price_context(100.0, 99.0), None);
    assert!(matches!(result, Err(EngineError::DegenerateRisk(_))));
}

#[test]
fn test_zero_atr_hold_is_still_fine() {
    let plan = planner()
        .generate(SignalLabel::Hold, &price_context(100.0, 100.0), Some(0.0))
        .unwrap();
    assert_eq!(plan, TradePlan::NotApplicable);
}

fn directional_label() -> impl Strategy<Value = SignalLabel> {
    prop_oneof![
        Just(SignalLabel::StrongBuy),
        Just(SignalLabel::Buy),
        Just(SignalLabel::Sell),
        Just(SignalLabel::StrongSell),
    ]
}

proptest! {
    #[test]
    fn prop_directional_plans_are_ordered(
        label in directional_label(),
        close in 1.0f64..1_000.0,
        atr_pct in 0.001f64..0.2,
        swing_low_pct in 0.0f64..0.5,
        swing_high_pct in 0.0f64..0.5,
    ) {
        let mut price = price_context(close, close);
        price.swing_low = close * (1.0 - swing_low_pct);
        price.swing_high = close * (1.0 + swing_high_pct);

        match planner().generate(label, &price, Some(close * atr_pct)) {
            Ok(TradePlan::Active(levels)) => {
                prop_assert!(levels.is_consistent());
                let risk = (levels.entry_price - levels.stop_loss_price).abs();
                prop_assert!(risk > 0.0);
                prop_assert!(risk <= close * atr_pct * 1.5 + 1e-9);
                match levels.direction {
                    TradeDirection::Long => prop_assert!(label.is_bullish()),
                    TradeDirection::Short => prop_assert!(label.is_bearish()),
                }
            }
            Ok(TradePlan::NotApplicable) => prop_assert!(false, "directional label without plan"),
            Err(e) => prop_assert!(matches!(e, EngineError::DegenerateRisk(_))),
        }
    }
}
