// Copyright (c) 2023-2024  Ministerio de Fomento
//                          Instituto de Ciencias de la Construcción Eduardo Torroja (IETcc-CSIC)

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

// Author(s): Rafael Villar Burke <pachi@ietcc.csic.es>

/*!
Generación de escenarios "qué pasaría si"
=========================================

Generates named perturbations of a base input and re-runs the calculation
pipeline for each, so results stay comparable. The base input is never
mutated: every scenario works on its own copy.

*/

use std::collections::HashMap;

use crate::emissions::EmissionCalculator;
use crate::error::Result;
use crate::types::{EmissionInput, EmissionResult, Scenario};

/// Escala de electricidad del escenario de eficiencia
const EFFICIENCY_ELECTRICITY_SCALE: f64 = 0.9;
/// Escala de gas natural del escenario de eficiencia
const EFFICIENCY_NATURAL_GAS_SCALE: f64 = 0.85;
/// Multiplicador de coste del escenario de shock de precio
const PRICE_SHOCK_COST_SCALE: f64 = 1.5;
/// Cuota renovable in situ del escenario renovable
const RENEWABLE_SHARE: f64 = 0.3;

/// Generador de escenarios sobre un calculador de emisiones.
pub struct ScenarioEngine<'a> {
    calculator: &'a EmissionCalculator,
}

impl<'a> ScenarioEngine<'a> {
    /// Constructor
    pub fn new(calculator: &'a EmissionCalculator) -> Self {
        Self { calculator }
    }

    /// Genera el conjunto estándar de escenarios para unos datos base.
    ///
    /// Produces, in order: an efficiency programme (electricity ×0.9, natural
    /// gas ×0.85, fully recalculated), a carbon price shock (same emissions,
    /// cost ×1.5 applied post hoc — deliberately a price-only sensitivity
    /// that does not recompute emissions or uncertainty) and an on-site
    /// renewable share of 30 % (grid electricity ×0.7, recalculated).
    pub fn generate(&self, base: &EmissionInput) -> Result<Vec<Scenario>> {
        let base_result = self.calculator.calculate(base)?;

        let mut efficient = base.clone();
        efficient.electricity_kwh *= EFFICIENCY_ELECTRICITY_SCALE;
        efficient.natural_gas_kwh *= EFFICIENCY_NATURAL_GAS_SCALE;
        let efficiency = self.run(
            "efficiency",
            "Energy efficiency programme",
            "Electricity demand reduced by 10 % and natural gas demand by 15 %",
            params(&[
                ("electricity_scale", EFFICIENCY_ELECTRICITY_SCALE),
                ("natural_gas_scale", EFFICIENCY_NATURAL_GAS_SCALE),
            ]),
            &efficient,
        )?;

        let price_shock = Scenario {
            id: "price_shock".into(),
            name: "Carbon price shock".into(),
            description: "Allowance price up 50 %; emissions unchanged, cost rescaled post hoc"
                .into(),
            parameters: params(&[("carbon_price_scale", PRICE_SHOCK_COST_SCALE)]),
            results: EmissionResult {
                carbon_cost_eur: base_result.carbon_cost_eur * PRICE_SHOCK_COST_SCALE,
                ..base_result.clone()
            },
        };

        let mut renewable = base.clone();
        renewable.electricity_kwh *= 1.0 - RENEWABLE_SHARE;
        let renewable_share = self.run(
            "renewable_share",
            "On-site renewable share",
            "30 % of grid electricity replaced by on-site renewable generation",
            params(&[("renewable_share", RENEWABLE_SHARE)]),
            &renewable,
        )?;

        Ok(vec![efficiency, price_shock, renewable_share])
    }

    /// Calcula un escenario arbitrario sobre unos datos ya perturbados.
    ///
    /// Custom-delta hook: mutate a copy of the base input, pass it here and
    /// get a comparable `Scenario` back.
    pub fn run<T: Into<String>>(
        &self,
        id: T,
        name: T,
        description: T,
        parameters: HashMap<String, f64>,
        input: &EmissionInput,
    ) -> Result<Scenario> {
        let results = self.calculator.calculate(input)?;
        Ok(Scenario {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            parameters,
            results,
        })
    }
}

fn params(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
    pairs
        .iter()
        .map(|&(key, value)| (key.to_string(), value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditLog;
    use crate::cbam;
    use crate::prices::CarbonPriceProvider;
    use crate::types::{CarbonPriceRecord, Country, Sector};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn calculator() -> EmissionCalculator {
        let price = CarbonPriceRecord::new(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(), 80.0);
        EmissionCalculator::new(
            cbam::default_registry().unwrap(),
            CarbonPriceProvider::with_record(price),
            AuditLog::new(),
        )
    }

    fn base_input() -> EmissionInput {
        let mut input = EmissionInput::new(Country::TN, Sector::IRON_STEEL);
        input.electricity_kwh = 1000.0;
        input.natural_gas_kwh = 2000.0;
        input.production_tonnes = 10.0;
        input
    }

    #[test]
    fn generate_does_not_mutate_base() {
        let calc = calculator();
        let engine = ScenarioEngine::new(&calc);
        let base = base_input();
        let before = base.clone();
        engine.generate(&base).unwrap();
        assert_eq!(base, before);
    }

    #[test]
    fn efficiency_scales_scope2_proportionally() {
        let calc = calculator();
        let engine = ScenarioEngine::new(&calc);
        let base = base_input();
        let base_result = calc.calculate(&base).unwrap();
        let scenarios = engine.generate(&base).unwrap();

        let efficiency = &scenarios[0];
        assert_eq!(efficiency.id, "efficiency");
        // 1000 kWh * 0.9 = 900 kWh against the same grid factor
        assert!(
            (efficiency.results.scope2.value - base_result.scope2.value * 0.9).abs() < 1e-9
        );
    }

    #[test]
    fn price_shock_rescales_cost_only() {
        let calc = calculator();
        let engine = ScenarioEngine::new(&calc);
        let base = base_input();
        let base_result = calc.calculate(&base).unwrap();
        let scenarios = engine.generate(&base).unwrap();

        let shock = &scenarios[1];
        assert_eq!(shock.id, "price_shock");
        assert!((shock.results.carbon_cost_eur - base_result.carbon_cost_eur * 1.5).abs() < 1e-9);
        // emissions and uncertainty stay those of the base calculation
        assert_eq!(shock.results.total.value, base_result.total.value);
        assert_eq!(
            shock.results.total.uncertainty_pct,
            base_result.total.uncertainty_pct
        );
    }
}
