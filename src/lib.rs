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
CbamCalc
========

This crate provides the **emissions and compliance calculation engine** of a
CBAM (Carbon Border Adjustment Mechanism, EU 2023/956) carbon-accounting
application. It turns raw activity data (fuel and electricity consumption,
production volume, country of origin, sector) into greenhouse-gas emission
totals broken down by scope, each carrying a propagated measurement
uncertainty, a monetary carbon-cost estimate and a regulatory compliance
score, and it supports what-if scenario comparison.

It holds the following assumptions:

- heterogeneous inputs are combined as independent error sources: combined
  uncertainties use a weighted root-sum-square, never a plain sum of percentages
- the electricity factor resolves through a documented priority chain:
  user override → country × sector registry entry → EU default (0.255 tCO2/MWh)
- scope 3 is a coarse default estimate (15 % of scope 1) and is labeled as
  such in the result provenance
- the carbon price is an injected, refreshable market feed; a missing price
  degrades the cost estimate to zero and never fails a calculation

The presentation layer (forms, charts, PDF/CSV export), document ingestion,
persisted storage and report rendering are external collaborators consumed
through the data contracts of this crate.

Este *crate* implementa el motor de cálculo de emisiones y cumplimiento de
una aplicación de contabilidad de carbono CBAM: convierte datos de actividad
en emisiones por alcance con incertidumbre propagada, coste de carbono y
puntuación de cumplimiento, y genera escenarios comparables.

# Ejemplo

```rust
use cbamcalc::*;
use cbamcalc::types::{Country, Method, Sector};

// Registro de factores por defecto y colaboradores del motor
let registry = cbam::default_registry().unwrap();
let calc = EmissionCalculator::new(registry, CarbonPriceProvider::new(), AuditLog::new());

// Datos de actividad de un periodo de declaración
let mut input = EmissionInput::new(Country::TN, Sector::IRON_STEEL);
input.electricity_kwh = 100_000.0;
input.natural_gas_kwh = 50_000.0;
input.production_tonnes = 1000.0;
input.preferred_method = Method::DEFAULT;

// Cálculo del resultado completo
let result = calc.calculate(&input).unwrap();
assert!((result.total.value - 936.06).abs() < 0.01);

// Escenarios comparables sobre los mismos datos base
let scenarios = ScenarioEngine::new(&calc).generate(&input).unwrap();
assert_eq!(scenarios.len(), 3);
```

*/

#![deny(missing_docs)]

mod audit;
mod emissions;
mod prices;
mod registry;
mod scenarios;
mod uncertainty;

pub mod cbam;
pub mod compliance;
pub mod error;
pub mod types;

pub use audit::{AuditLog, AuditRecord};
pub use emissions::{
    compute_emissions, resolve_electricity_factor, EmissionCalculator, FactorOrigin,
    FactorResolution,
};
pub use prices::{CarbonPriceProvider, PriceFetcher};
pub use registry::FactorRegistry;
pub use scenarios::ScenarioEngine;
pub use uncertainty::{combine, weighted_rss, EmissionComponent};

pub use types::EmissionInput;

/// Número de versión de la librería
///
/// Version number
pub static VERSION: &str = env!("CARGO_PKG_VERSION");
