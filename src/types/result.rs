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
Resultados del cálculo de emisiones
===================================

Definición de los tipos EmissionDetail, GhgBreakdown y EmissionResult.

Result value objects of a calculation. They are never mutated after
construction: a new `EmissionResult` is produced per calculation or scenario,
and each detail record carries the formula and provenance strings required
for regulatory traceability.

*/

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::basic::{ConfidenceLevel, Method};

/// Valor calculado con incertidumbre y trazabilidad.
///
/// One computed quantity (a scope, the total or the per-unit intensity) with
/// its propagated uncertainty, the human-readable formula it came from, the
/// provenance of its data and the raw inputs that fed it. `formula` and
/// `sources` are always populated; the report layer renders them verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionDetail {
    /// Computed value [tCO2e] (or [tCO2e/t] for the per-unit record)
    pub value: f64,
    /// Combined relative uncertainty [%]
    pub uncertainty_pct: f64,
    /// Confidence level derived from the uncertainty
    pub confidence_level: ConfidenceLevel,
    /// Data-quality method declared for the calculation
    pub method: Method,
    /// Provenance of the data used (registry entries, defaults, user overrides)
    pub sources: Vec<String>,
    /// Human-readable expression of the computation
    pub formula: String,
    /// Raw input quantities that fed the expression
    pub input_data: HashMap<String, f64>,
}

impl EmissionDetail {
    /// Constructor; the confidence level is derived from the uncertainty
    pub fn new<T: Into<String>>(
        value: f64,
        uncertainty_pct: f64,
        method: Method,
        sources: Vec<String>,
        formula: T,
        input_data: HashMap<String, f64>,
    ) -> Self {
        Self {
            value,
            uncertainty_pct,
            confidence_level: ConfidenceLevel::from_uncertainty(uncertainty_pct),
            method,
            sources,
            formula: formula.into(),
            input_data,
        }
    }
}

/// Desglose por gas en CO2 equivalente (all-gas breakdown, in tCO2e).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GhgBreakdown {
    /// CO2 from combustion, electricity and precursors
    pub co2: f64,
    /// Methane converted by its 100-year GWP
    pub ch4_co2e: f64,
    /// Nitrous oxide converted by its 100-year GWP
    pub n2o_co2e: f64,
    /// Other gases (not currently itemized)
    pub other_co2e: f64,
}

/// Resultado completo de un cálculo de emisiones.
///
/// Full outcome of one calculation: per-scope and aggregate records, all-gas
/// breakdown, advisory carbon cost, compliance score and recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionResult {
    /// Direct combustion and process emissions
    pub scope1: EmissionDetail,
    /// Purchased electricity emissions
    pub scope2: EmissionDetail,
    /// Value-chain (precursor) emissions estimate
    pub scope3: EmissionDetail,
    /// Total emissions, including CH4 and N2O as CO2e
    pub total: EmissionDetail,
    /// Emissions per tonne of production
    pub per_unit: EmissionDetail,
    /// Breakdown by greenhouse gas
    pub all_ghg: GhgBreakdown,
    /// Advisory carbon cost at the current market price [EUR]; 0 when no price is available
    pub carbon_cost_eur: f64,
    /// Regulatory readiness heuristic, 0-100
    pub compliance_score: u8,
    /// Data-quality recommendations, in a fixed rendering order
    pub recommendations: Vec<String>,
}
