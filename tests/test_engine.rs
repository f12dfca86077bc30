use pretty_assertions::assert_eq;

use cbamcalc::error::Result;
use cbamcalc::types::*;
use cbamcalc::*;

use chrono::NaiveDate;

const EPS: f64 = 1e-9;

/// Approximate equality with diagnostics on failure
fn approx_equal(expected: f64, got: f64, tolerance: f64) -> bool {
    let diff = (expected - got).abs();
    if diff > tolerance {
        eprintln!("Expected: {}, Got: {}, Diff: {}", expected, got, diff);
    }
    diff <= tolerance
}

fn engine_with_price(price_eur: f64) -> EmissionCalculator {
    let record = CarbonPriceRecord::new(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(), price_eur);
    EmissionCalculator::new(
        cbam::default_registry().unwrap(),
        CarbonPriceProvider::with_record(record),
        AuditLog::new(),
    )
}

fn engine_without_price() -> EmissionCalculator {
    EmissionCalculator::new(
        cbam::default_registry().unwrap(),
        CarbonPriceProvider::new(),
        AuditLog::new(),
    )
}

/// Reference request: Tunisian steel plant reporting with default data
fn tn_steel_input() -> EmissionInput {
    let mut input = EmissionInput::new(Country::TN, Sector::IRON_STEEL);
    input.electricity_kwh = 100_000.0;
    input.natural_gas_kwh = 50_000.0;
    input.production_tonnes = 1000.0;
    input.preferred_method = Method::DEFAULT;
    input
}

#[test]
fn end_to_end_reference_case() {
    let calc = engine_without_price();
    let result = calc.calculate(&tn_steel_input()).unwrap();

    // scope2 = 100 MWh * 0.48 tCO2/MWh
    assert!(approx_equal(48.0, result.scope2.value, EPS));
    // scope1 = (50000 / 3.6) * 0.0556
    assert!(approx_equal(772.222222, result.scope1.value, 1e-5));
    // scope3 = scope1 * 0.15
    assert!(approx_equal(115.833333, result.scope3.value, 1e-5));
    assert!(approx_equal(936.055556, result.total.value, 1e-5));
    assert!(approx_equal(0.936056, result.per_unit.value, 1e-5));

    // only natural gas contributes to scope 1, so its 3 % carries through
    assert!(approx_equal(3.0, result.scope1.uncertainty_pct, EPS));
    assert!(approx_equal(12.0, result.scope2.uncertainty_pct, EPS));
    assert!(approx_equal(25.0, result.scope3.uncertainty_pct, EPS));
    // weighted RSS of the three scopes
    assert!(approx_equal(4.0093, result.total.uncertainty_pct, 1e-3));
    assert_eq!(result.total.confidence_level, ConfidenceLevel::HIGH);
    assert_eq!(result.per_unit.uncertainty_pct, result.total.uncertainty_pct);

    // DEFAULT method −20; both uncertainties below their thresholds
    assert_eq!(result.compliance_score, 80);
    assert_eq!(
        result.recommendations,
        vec![
            "Collect real activity data to replace default-method estimates".to_string(),
            "Add direct process emissions data to complete the scope 1 inventory".to_string(),
        ]
    );

    // no price was ever fetched: cost degrades to zero, calculation succeeds
    assert_eq!(result.carbon_cost_eur, 0.0);
}

#[test]
fn total_is_sum_of_scopes_and_other_ghg() {
    let calc = engine_without_price();
    let mut input = tn_steel_input();
    input.fuel_oil_gj = 300.0;
    input.coal_gj = 120.0;
    input.ch4_kg = 40.0;
    input.n2o_kg = 5.0;
    input.custom_process_emissions = Some(25.0);
    let result = calc.calculate(&input).unwrap();

    assert!(approx_equal(40.0 * 25.0 / 1000.0, result.all_ghg.ch4_co2e, EPS));
    assert!(approx_equal(5.0 * 298.0 / 1000.0, result.all_ghg.n2o_co2e, EPS));
    let expected = result.scope1.value
        + result.scope2.value
        + result.scope3.value
        + result.all_ghg.ch4_co2e
        + result.all_ghg.n2o_co2e;
    assert!(approx_equal(expected, result.total.value, EPS));
    assert!(approx_equal(result.scope1.value * 0.15, result.scope3.value, EPS));
}

#[test]
fn missing_factor_falls_back_to_eu_default() {
    let calc = engine_without_price();
    // no registry entry for Brazilian hydrogen in the default dataset
    let mut input = EmissionInput::new("BR".parse().unwrap(), Sector::HYDROGEN);
    input.electricity_kwh = 10_000.0;
    input.production_tonnes = 10.0;
    let result = calc.calculate(&input).unwrap();

    assert!(approx_equal(10.0 * 0.255, result.scope2.value, EPS));
    assert!(result.scope2.sources.iter().any(|s| s.contains("default")));
}

#[test]
fn custom_factor_overrides_registry() {
    let calc = engine_without_price();
    let mut input = tn_steel_input();
    input.custom_electricity_factor = Some(0.1);
    let result = calc.calculate(&input).unwrap();
    assert!(approx_equal(100.0 * 0.1, result.scope2.value, EPS));
    assert!(result.scope2.sources.iter().any(|s| s.contains("user-supplied")));
    assert!(approx_equal(10.0, result.scope2.uncertainty_pct, EPS));
}

#[test]
fn zero_production_divides_by_one() {
    let calc = engine_without_price();
    let mut input = tn_steel_input();
    input.production_tonnes = 0.0;
    let result = calc.calculate(&input).unwrap();
    assert!(approx_equal(result.total.value, result.per_unit.value, EPS));

    let mut input = tn_steel_input();
    input.production_tonnes = 500.0;
    let result = calc.calculate(&input).unwrap();
    assert!(approx_equal(result.total.value / 500.0, result.per_unit.value, EPS));
}

#[test]
fn negative_quantities_are_rejected() {
    let calc = engine_without_price();
    let mut input = tn_steel_input();
    input.electricity_kwh = -1.0;
    assert!(calc.calculate(&input).is_err());

    let mut input = tn_steel_input();
    input.production_tonnes = -5.0;
    assert!(calc.calculate(&input).is_err());
}

#[test]
fn carbon_cost_uses_current_price() {
    let calc = engine_with_price(80.0);
    let result = calc.calculate(&tn_steel_input()).unwrap();
    assert!(approx_equal(result.total.value * 80.0, result.carbon_cost_eur, 1e-6));
}

#[test]
fn price_refresh_failure_keeps_serving_last_good_value() {
    let calc = engine_with_price(80.0);
    let failing = || -> Result<CarbonPriceRecord> {
        Err(error::CbamError::PriceFetch("feed unreachable".into()))
    };
    assert!(calc.prices().refresh(&failing).is_err());

    let result = calc.calculate(&tn_steel_input()).unwrap();
    assert!(approx_equal(result.total.value * 80.0, result.carbon_cost_eur, 1e-6));
}

#[test]
fn compliance_deduction_reference_case() {
    let (score, _) = compliance::score(&compliance::ComplianceInput {
        method: Method::DEFAULT,
        scope1_uncertainty_pct: 12.0,
        scope2_uncertainty_pct: 20.0,
        has_process_emissions: true,
    });
    assert_eq!(score, 55);
}

#[test]
fn efficiency_scenario_scales_scope2() {
    let calc = engine_with_price(80.0);
    let mut base = tn_steel_input();
    base.electricity_kwh = 1000.0;
    let base_result = calc.calculate(&base).unwrap();
    let scenarios = ScenarioEngine::new(&calc).generate(&base).unwrap();

    assert_eq!(
        scenarios.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
        vec!["efficiency", "price_shock", "renewable_share"]
    );
    // 1000 kWh scaled to 900 kWh against the same TN factor
    let efficiency = &scenarios[0];
    assert!(approx_equal(
        base_result.scope2.value * 0.9,
        efficiency.results.scope2.value,
        EPS
    ));
    assert_eq!(efficiency.parameters["electricity_scale"], 0.9);
    assert_eq!(efficiency.parameters["natural_gas_scale"], 0.85);
}

#[test]
fn price_shock_scenario_is_cost_only() {
    let calc = engine_with_price(80.0);
    let base = tn_steel_input();
    let base_result = calc.calculate(&base).unwrap();
    let scenarios = ScenarioEngine::new(&calc).generate(&base).unwrap();

    let shock = &scenarios[1];
    assert!(approx_equal(
        base_result.carbon_cost_eur * 1.5,
        shock.results.carbon_cost_eur,
        1e-6
    ));
    assert_eq!(shock.results.total, base_result.total);
    assert_eq!(shock.results.scope1, base_result.scope1);
}

#[test]
fn every_detail_carries_formula_and_sources() {
    let calc = engine_without_price();
    let result = calc.calculate(&tn_steel_input()).unwrap();
    for detail in [
        &result.scope1,
        &result.scope2,
        &result.scope3,
        &result.total,
        &result.per_unit,
    ]
    .iter()
    {
        assert!(!detail.formula.is_empty());
        assert!(!detail.sources.is_empty());
        assert!(!detail.input_data.is_empty());
    }
}

#[test]
fn audit_log_traces_every_calculation() {
    let calc = engine_without_price();
    let input = tn_steel_input();
    calc.calculate(&input).unwrap();

    let mut other = tn_steel_input();
    other.coal_gj = 10.0;
    calc.calculate(&other).unwrap();

    let entries = calc.audit().entries();
    assert_eq!(entries.len(), 2);
    // different inputs hash differently; the hash is stable per input
    assert_ne!(entries[0].input_hash, entries[1].input_hash);
    calc.calculate(&input).unwrap();
    let entries = calc.audit().entries();
    assert_eq!(entries[0].input_hash, entries[2].input_hash);
}
