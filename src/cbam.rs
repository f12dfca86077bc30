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
Valores reglamentarios y datos por defecto CBAM
===============================================

Regulatory constants and default datasets used by the calculation: fuel
emission factors, GWP conversion values, estimation ratios and the embedded
country × sector grid-factor table.

*/

use crate::error::Result;
use crate::registry::FactorRegistry;

/// Factor eléctrico por defecto UE [tCO2/MWh].
///
/// Documented fallback applied when no registry factor exists for the
/// (country, sector) pair and no user override was supplied.
pub const EU_DEFAULT_ELECTRICITY_FACTOR: f64 = 0.255;

/// Incertidumbre del factor eléctrico cuando no procede del registro [%]
pub const DEFAULT_ELECTRICITY_UNCERTAINTY_PCT: f64 = 10.0;

/// Factor de emisión del gas natural [tCO2/GJ]
pub const NATURAL_GAS_FACTOR_TCO2_GJ: f64 = 0.0556;
/// Incertidumbre del factor del gas natural [%]
pub const NATURAL_GAS_UNCERTAINTY_PCT: f64 = 3.0;

/// Factor de emisión del fuelóleo [tCO2/GJ]
pub const FUEL_OIL_FACTOR_TCO2_GJ: f64 = 0.0741;
/// Incertidumbre del factor del fuelóleo [%]
pub const FUEL_OIL_UNCERTAINTY_PCT: f64 = 2.0;

/// Factor de emisión del carbón [tCO2/GJ]
pub const COAL_FACTOR_TCO2_GJ: f64 = 0.0946;
/// Incertidumbre del factor del carbón [%]
pub const COAL_UNCERTAINTY_PCT: f64 = 2.0;

/// Incertidumbre de las emisiones de proceso declaradas por el usuario [%]
pub const PROCESS_EMISSIONS_UNCERTAINTY_PCT: f64 = 15.0;

/// Relación por defecto entre emisiones de alcance 3 y alcance 1.
///
/// Coarse estimation policy for precursor / value-chain emissions, not a
/// measurement; results built on it are labeled as estimates in `sources`.
pub const SCOPE3_TO_SCOPE1_RATIO: f64 = 0.15;
/// Incertidumbre fija de la estimación de alcance 3 [%]
pub const SCOPE3_UNCERTAINTY_PCT: f64 = 25.0;

/// Potencial de calentamiento a 100 años del CH4 [kg CO2e/kg]
pub const GWP100_CH4: f64 = 25.0;
/// Potencial de calentamiento a 100 años del N2O [kg CO2e/kg]
pub const GWP100_N2O: f64 = 298.0;

/// kWh por MWh
pub const KWH_PER_MWH: f64 = 1000.0;
/// Divisor de conversión de gas natural de kWh a GJ
pub const NATURAL_GAS_KWH_TO_GJ: f64 = 3.6;

/// Factores eléctricos por país y sector (datos por defecto).
///
/// Embedded default dataset, one factor per line in the registry text format
/// (`country, sector, factor tCO2/MWh, uncertainty %, updated, verification
/// # source`). Grid intensities from published IEA/national statistics for
/// the main CBAM exporter countries.
pub const CBAM_DEFAULT_FACTORS: &str = "
#META CBAM_FUENTE: IEA-2023
#META CBAM_FUENTE_COMENTARIO: Intensidad de la red por país, estadísticas 2023
country, sector, factor, uncertainty, updated, verification
TN, IRON_STEEL, 0.480, 12.0, 2024-03-01, ESTIMATED # IEA 2023 grid intensity, Tunisia
TN, CEMENT, 0.480, 12.0, 2024-03-01, ESTIMATED # IEA 2023 grid intensity, Tunisia
TN, FERTILIZERS, 0.480, 12.0, 2024-03-01, ESTIMATED # IEA 2023 grid intensity, Tunisia
MA, IRON_STEEL, 0.610, 15.0, 2023-11-20, ESTIMATED # IEA 2023 grid intensity, Morocco
MA, CEMENT, 0.610, 15.0, 2023-11-20, ESTIMATED # IEA 2023 grid intensity, Morocco
DZ, IRON_STEEL, 0.520, 15.0, 2023-11-20, ESTIMATED # IEA 2023 grid intensity, Algeria
EG, FERTILIZERS, 0.470, 12.0, 2024-01-15, ESTIMATED # IEA 2023 grid intensity, Egypt
EG, IRON_STEEL, 0.470, 12.0, 2024-01-15, ESTIMATED # IEA 2023 grid intensity, Egypt
TR, IRON_STEEL, 0.440, 10.0, 2024-02-01, VERIFIED # national inventory 2023, Turkey
TR, CEMENT, 0.440, 10.0, 2024-02-01, VERIFIED # national inventory 2023, Turkey
TR, ALUMINIUM, 0.440, 10.0, 2024-02-01, VERIFIED # national inventory 2023, Turkey
CN, IRON_STEEL, 0.580, 8.0, 2024-02-01, VERIFIED # national inventory 2023, China
CN, ALUMINIUM, 0.580, 8.0, 2024-02-01, VERIFIED # national inventory 2023, China
IN, IRON_STEEL, 0.710, 12.0, 2023-11-20, ESTIMATED # IEA 2023 grid intensity, India
UA, IRON_STEEL, 0.350, 18.0, 2023-06-30, DEFAULT # pre-war inventory carried forward, Ukraine
RS, ELECTRICITY, 0.780, 12.0, 2024-01-15, ESTIMATED # IEA 2023 grid intensity, Serbia
";

/// Registro con el conjunto de factores por defecto cargado.
pub fn default_registry() -> Result<FactorRegistry> {
    CBAM_DEFAULT_FACTORS.parse()
}
