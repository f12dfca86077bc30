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
Cálculo de emisiones por alcance
================================

Turns raw activity data into greenhouse-gas emission totals broken down by
scope, each carrying a propagated uncertainty, an advisory carbon cost and a
compliance score.

The pipeline is split in two layers: `compute_emissions` is a pure function
of its inputs (no I/O, trivially testable), while
[`EmissionCalculator::calculate`] wraps it with factor resolution, price
lookup and the audit side effect.

*/

use std::collections::HashMap;
use std::fmt;

use chrono::Utc;
use itertools::Itertools;
use sha2::{Digest, Sha256};

use crate::audit::{AuditLog, AuditRecord};
use crate::cbam::{
    COAL_FACTOR_TCO2_GJ, COAL_UNCERTAINTY_PCT, DEFAULT_ELECTRICITY_UNCERTAINTY_PCT,
    EU_DEFAULT_ELECTRICITY_FACTOR, FUEL_OIL_FACTOR_TCO2_GJ, FUEL_OIL_UNCERTAINTY_PCT, GWP100_CH4,
    GWP100_N2O, KWH_PER_MWH, NATURAL_GAS_FACTOR_TCO2_GJ, NATURAL_GAS_KWH_TO_GJ,
    NATURAL_GAS_UNCERTAINTY_PCT, PROCESS_EMISSIONS_UNCERTAINTY_PCT, SCOPE3_TO_SCOPE1_RATIO,
    SCOPE3_UNCERTAINTY_PCT,
};
use crate::compliance::{self, ComplianceInput};
use crate::error::Result;
use crate::prices::CarbonPriceProvider;
use crate::registry::FactorRegistry;
use crate::types::{
    CarbonPriceRecord, EmissionDetail, EmissionInput, EmissionResult, GhgBreakdown,
};
use crate::uncertainty::{self, EmissionComponent};

/// Origen del factor eléctrico aplicado (where the electricity factor came from).
#[allow(non_camel_case_types)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FactorOrigin {
    /// User-supplied override
    CUSTOM,
    /// Registry entry for the (country, sector) pair
    REGISTRY,
    /// Documented EU default fallback
    EU_DEFAULT,
}

impl fmt::Display for FactorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Factor eléctrico resuelto con su incertidumbre y procedencia.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorResolution {
    /// Grid electricity factor [tCO2/MWh]
    pub factor: f64,
    /// Uncertainty of the factor [%]
    pub uncertainty_pct: f64,
    /// Provenance string carried into `scope2.sources`
    pub source: String,
    /// Which rung of the fallback chain supplied the factor
    pub origin: FactorOrigin,
}

/// Resuelve el factor eléctrico aplicando la cadena de prioridad documentada.
///
/// Override → registry → EU default. The registry uncertainty applies only
/// when the registry supplied the factor; both the override and the default
/// carry the 10 % default uncertainty. A registry miss is not an error: the
/// EU default applies and the provenance string carries a "default" marker so
/// the result stays traceable as default-sourced.
pub fn resolve_electricity_factor(
    input: &EmissionInput,
    registry: &FactorRegistry,
) -> FactorResolution {
    if let Some(factor) = input.custom_electricity_factor {
        return FactorResolution {
            factor,
            uncertainty_pct: DEFAULT_ELECTRICITY_UNCERTAINTY_PCT,
            source: format!("user-supplied electricity factor ({:.3} tCO2/MWh)", factor),
            origin: FactorOrigin::CUSTOM,
        };
    }
    if let Some(entry) = registry.lookup(&input.country, input.sector) {
        return FactorResolution {
            factor: entry.electricity_factor,
            uncertainty_pct: entry.uncertainty_pct,
            source: format!(
                "registry factor {}/{} ({}, {})",
                entry.country, entry.sector, entry.verification_level, entry.source
            ),
            origin: FactorOrigin::REGISTRY,
        };
    }
    FactorResolution {
        factor: EU_DEFAULT_ELECTRICITY_FACTOR,
        uncertainty_pct: DEFAULT_ELECTRICITY_UNCERTAINTY_PCT,
        source: format!(
            "EU default electricity factor ({:.3} tCO2/MWh), no registry entry for {}/{}",
            EU_DEFAULT_ELECTRICITY_FACTOR, input.country, input.sector
        ),
        origin: FactorOrigin::EU_DEFAULT,
    }
}

/// Calcula el resultado completo de emisiones a partir de datos ya validados.
///
/// Pure function: no registry, price or audit access happens here. `input`
/// must have passed [`EmissionInput::validate`]; the electricity factor comes
/// pre-resolved and the price is optional (cost is advisory and degrades to
/// zero without one).
pub fn compute_emissions(
    input: &EmissionInput,
    resolution: &FactorResolution,
    price: Option<&CarbonPriceRecord>,
) -> EmissionResult {
    let method = input.preferred_method;

    // Scope 1: direct combustion plus declared process emissions
    let natural_gas_gj = input.natural_gas_kwh / NATURAL_GAS_KWH_TO_GJ;
    let process_emissions = input.custom_process_emissions.unwrap_or(0.0);
    let scope1_components = [
        EmissionComponent::new(
            natural_gas_gj * NATURAL_GAS_FACTOR_TCO2_GJ,
            NATURAL_GAS_UNCERTAINTY_PCT,
        ),
        EmissionComponent::new(input.fuel_oil_gj * FUEL_OIL_FACTOR_TCO2_GJ, FUEL_OIL_UNCERTAINTY_PCT),
        EmissionComponent::new(input.coal_gj * COAL_FACTOR_TCO2_GJ, COAL_UNCERTAINTY_PCT),
        EmissionComponent::new(
            process_emissions,
            if input.custom_process_emissions.is_some() {
                PROCESS_EMISSIONS_UNCERTAINTY_PCT
            } else {
                0.0
            },
        ),
    ];
    let scope1_value: f64 = scope1_components.iter().map(|c| c.value).sum();
    let scope1_uncertainty = uncertainty::combine(&scope1_components);
    let mut scope1_sources =
        vec!["IPCC default combustion factors (natural gas, fuel oil, coal)".to_string()];
    if input.custom_process_emissions.is_some() {
        scope1_sources.push("user-declared direct process emissions".to_string());
    }
    let scope1 = EmissionDetail::new(
        scope1_value,
        scope1_uncertainty,
        method,
        scope1_sources,
        "natural_gas_kwh / 3.6 * 0.0556 + fuel_oil_gj * 0.0741 + coal_gj * 0.0946 + process_emissions",
        collect_input_data(&[
            ("natural_gas_kwh", input.natural_gas_kwh),
            ("fuel_oil_gj", input.fuel_oil_gj),
            ("coal_gj", input.coal_gj),
            ("process_emissions_tco2", process_emissions),
        ]),
    );

    // Scope 2: purchased grid electricity
    let electricity_mwh = input.electricity_kwh / KWH_PER_MWH;
    let scope2 = EmissionDetail::new(
        electricity_mwh * resolution.factor,
        resolution.uncertainty_pct,
        method,
        vec![resolution.source.clone()],
        "(electricity_kwh / 1000) * electricity_factor",
        collect_input_data(&[
            ("electricity_kwh", input.electricity_kwh),
            ("electricity_factor", resolution.factor),
        ]),
    );

    // Scope 3: coarse precursor estimate, labeled as such
    let scope3 = EmissionDetail::new(
        scope1.value * SCOPE3_TO_SCOPE1_RATIO,
        SCOPE3_UNCERTAINTY_PCT,
        method,
        vec!["estimated as 15 % of scope 1 (default precursor ratio, not a measurement)".to_string()],
        "scope1 * 0.15",
        collect_input_data(&[("scope1_tco2e", scope1.value)]),
    );

    // Other greenhouse gases, converted by their 100-year GWP
    let ch4_co2e = input.ch4_kg * GWP100_CH4 / 1000.0;
    let n2o_co2e = input.n2o_kg * GWP100_N2O / 1000.0;
    let all_ghg = GhgBreakdown {
        co2: scope1.value + scope2.value + scope3.value,
        ch4_co2e,
        n2o_co2e,
        other_co2e: 0.0,
    };

    // Total: the other-GHG terms add to the value but the uncertainty keeps
    // combining the three scopes only (known simplification, preserved)
    let total_value = scope1.value + scope2.value + scope3.value + ch4_co2e + n2o_co2e;
    let total_uncertainty = uncertainty::combine(&[
        EmissionComponent::new(scope1.value, scope1.uncertainty_pct),
        EmissionComponent::new(scope2.value, scope2.uncertainty_pct),
        EmissionComponent::new(scope3.value, scope3.uncertainty_pct),
    ]);
    let total_sources: Vec<String> = scope1
        .sources
        .iter()
        .chain(scope2.sources.iter())
        .chain(scope3.sources.iter())
        .unique()
        .cloned()
        .collect();
    let total = EmissionDetail::new(
        total_value,
        total_uncertainty,
        method,
        total_sources,
        "scope1 + scope2 + scope3 + ch4_co2e + n2o_co2e",
        collect_input_data(&[
            ("scope1_tco2e", scope1.value),
            ("scope2_tco2e", scope2.value),
            ("scope3_tco2e", scope3.value),
            ("ch4_co2e", ch4_co2e),
            ("n2o_co2e", n2o_co2e),
        ]),
    );

    // Per-unit intensity: dividing by a deterministic constant keeps the
    // relative uncertainty of the total
    let production = input.normalized_production();
    let per_unit = EmissionDetail::new(
        total.value / production,
        total.uncertainty_pct,
        method,
        total.sources.clone(),
        "total / max(production_tonnes, 1)",
        collect_input_data(&[
            ("total_tco2e", total.value),
            ("production_tonnes", input.production_tonnes),
        ]),
    );

    // Advisory carbon cost; the calculation never fails for lack of a price
    let carbon_cost_eur = price
        .map(|p| total.value * p.price_eur_per_tonne)
        .unwrap_or(0.0);

    let (compliance_score, recommendations) = compliance::score(&ComplianceInput {
        method,
        scope1_uncertainty_pct: scope1.uncertainty_pct,
        scope2_uncertainty_pct: scope2.uncertainty_pct,
        has_process_emissions: input.custom_process_emissions.is_some(),
    });

    EmissionResult {
        scope1,
        scope2,
        scope3,
        total,
        per_unit,
        all_ghg,
        carbon_cost_eur,
        compliance_score,
        recommendations,
    }
}

fn collect_input_data(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
    pairs
        .iter()
        .map(|&(key, value)| (key.to_string(), value))
        .collect()
}

/// Motor de cálculo de emisiones y cumplimiento.
///
/// Owns its collaborators (factor registry, price provider, audit log). All
/// methods take `&self`, so one calculator can serve many concurrent
/// requests; the registry is read-only after construction and the provider
/// and log synchronize internally.
#[derive(Debug)]
pub struct EmissionCalculator {
    registry: FactorRegistry,
    prices: CarbonPriceProvider,
    audit: AuditLog,
}

impl EmissionCalculator {
    /// Constructor
    pub fn new(registry: FactorRegistry, prices: CarbonPriceProvider, audit: AuditLog) -> Self {
        Self {
            registry,
            prices,
            audit,
        }
    }

    /// Registro de factores consultado por los cálculos
    pub fn registry(&self) -> &FactorRegistry {
        &self.registry
    }

    /// Proveedor de precio del carbono (refreshable by the caller)
    pub fn prices(&self) -> &CarbonPriceProvider {
        &self.prices
    }

    /// Registro de auditoría de invocaciones
    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    /// Calcula emisiones, coste e indicadores de cumplimiento para una solicitud.
    ///
    /// Validates the input, resolves the electricity factor, runs the pure
    /// computation and appends an audit record. Fails only on out-of-domain
    /// input ([`crate::error::CbamError::WrongInput`]); missing registry or
    /// price data degrade as documented, and audit failures never propagate.
    pub fn calculate(&self, input: &EmissionInput) -> Result<EmissionResult> {
        input.validate()?;
        let resolution = resolve_electricity_factor(input, &self.registry);
        let price = self.prices.current();
        let result = compute_emissions(input, &resolution, price.as_ref());
        self.record_audit(input, &result);
        Ok(result)
    }

    // Audit side effect, kept apart from the pure computation. Serialization
    // failures are reported through the log facade and swallowed.
    fn record_audit(&self, input: &EmissionInput, result: &EmissionResult) {
        match serde_json::to_string(input) {
            Ok(canonical) => {
                let digest = Sha256::digest(canonical.as_bytes());
                self.audit.append(AuditRecord {
                    timestamp: Utc::now(),
                    input_hash: format!("{:x}", digest),
                    sources: result.total.sources.clone(),
                });
            }
            Err(err) => log::warn!("could not serialize input for audit: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cbam;
    use crate::types::{Country, Method, Sector};
    use pretty_assertions::assert_eq;

    fn base_input() -> EmissionInput {
        let mut input = EmissionInput::new(Country::TN, Sector::IRON_STEEL);
        input.electricity_kwh = 100_000.0;
        input.natural_gas_kwh = 50_000.0;
        input.production_tonnes = 1000.0;
        input
    }

    #[test]
    fn resolution_prefers_custom_factor() {
        let registry = cbam::default_registry().unwrap();
        let mut input = base_input();
        input.custom_electricity_factor = Some(0.12);
        let resolution = resolve_electricity_factor(&input, &registry);
        assert_eq!(resolution.origin, FactorOrigin::CUSTOM);
        assert_eq!(resolution.factor, 0.12);
        // the override does not inherit the registry uncertainty
        assert_eq!(resolution.uncertainty_pct, 10.0);
    }

    #[test]
    fn resolution_uses_registry_factor_and_uncertainty() {
        let registry = cbam::default_registry().unwrap();
        let resolution = resolve_electricity_factor(&base_input(), &registry);
        assert_eq!(resolution.origin, FactorOrigin::REGISTRY);
        assert_eq!(resolution.factor, 0.48);
        assert_eq!(resolution.uncertainty_pct, 12.0);
        assert!(resolution.source.contains("TN/IRON_STEEL"));
    }

    #[test]
    fn resolution_falls_back_to_eu_default() {
        let registry = FactorRegistry::new();
        let resolution = resolve_electricity_factor(&base_input(), &registry);
        assert_eq!(resolution.origin, FactorOrigin::EU_DEFAULT);
        assert_eq!(resolution.factor, 0.255);
        assert_eq!(resolution.uncertainty_pct, 10.0);
        assert!(resolution.source.contains("default"));
    }

    #[test]
    fn compute_scope_identities() {
        let registry = cbam::default_registry().unwrap();
        let input = base_input();
        let resolution = resolve_electricity_factor(&input, &registry);
        let result = compute_emissions(&input, &resolution, None);

        assert!((result.scope3.value - result.scope1.value * 0.15).abs() < 1e-9);
        let expected_total = result.scope1.value
            + result.scope2.value
            + result.scope3.value
            + result.all_ghg.ch4_co2e
            + result.all_ghg.n2o_co2e;
        assert!((result.total.value - expected_total).abs() < 1e-9);
        assert_eq!(result.carbon_cost_eur, 0.0);
        assert!(!result.total.sources.is_empty());
        assert!(!result.total.formula.is_empty());
    }

    #[test]
    fn calculate_rejects_negative_input() {
        let calc = EmissionCalculator::new(
            cbam::default_registry().unwrap(),
            CarbonPriceProvider::new(),
            AuditLog::new(),
        );
        let mut input = base_input();
        input.fuel_oil_gj = -1.0;
        assert!(calc.calculate(&input).is_err());
        // the failed request leaves no audit trace
        assert!(calc.audit().is_empty());
    }

    #[test]
    fn calculate_appends_audit_record() {
        let calc = EmissionCalculator::new(
            cbam::default_registry().unwrap(),
            CarbonPriceProvider::new(),
            AuditLog::new(),
        );
        let input = base_input();
        calc.calculate(&input).unwrap();
        calc.calculate(&input).unwrap();
        let entries = calc.audit().entries();
        assert_eq!(entries.len(), 2);
        // same input, same canonical hash
        assert_eq!(entries[0].input_hash, entries[1].input_hash);
        assert!(!entries[0].sources.is_empty());
    }
}
