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

//! Datos de actividad de una solicitud de cálculo (activity data of one calculation request)

use serde::{Deserialize, Serialize};

use crate::error::{CbamError, Result};
use crate::types::basic::{Country, Method, Sector};

/// Datos de actividad para un cálculo de emisiones.
///
/// Raw activity data for one calculation request. Quantities default to zero;
/// a zero `production_tonnes` means "unknown" and is floored to 1 t when
/// computing per-unit intensity (documented policy), while negative values
/// are rejected by [`EmissionInput::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionInput {
    /// Purchased grid electricity [kWh]
    pub electricity_kwh: f64,
    /// Natural gas burned on site [kWh]
    pub natural_gas_kwh: f64,
    /// Fuel oil burned on site [GJ]
    pub fuel_oil_gj: f64,
    /// Coal burned on site [GJ]
    pub coal_gj: f64,
    /// Fugitive / process methane [kg]
    pub ch4_kg: f64,
    /// Nitrous oxide [kg]
    pub n2o_kg: f64,
    /// Country of origin of the goods
    pub country: Country,
    /// CBAM goods sector
    pub sector: Sector,
    /// Production volume over the reporting period [t]
    pub production_tonnes: f64,
    /// User-supplied grid factor [tCO2/MWh], overrides the registry lookup
    pub custom_electricity_factor: Option<f64>,
    /// User-declared direct process emissions [tCO2]
    pub custom_process_emissions: Option<f64>,
    /// Declared data-quality method
    pub preferred_method: Method,
}

impl EmissionInput {
    /// Solicitud vacía para un país y sector (empty request for a country and sector)
    pub fn new(country: Country, sector: Sector) -> Self {
        Self {
            electricity_kwh: 0.0,
            natural_gas_kwh: 0.0,
            fuel_oil_gj: 0.0,
            coal_gj: 0.0,
            ch4_kg: 0.0,
            n2o_kg: 0.0,
            country,
            sector,
            production_tonnes: 1.0,
            custom_electricity_factor: None,
            custom_process_emissions: None,
            preferred_method: Method::DEFAULT,
        }
    }

    /// Comprueba el dominio de los datos de actividad.
    ///
    /// Checks that all quantities are finite and non negative. A zero
    /// production volume is accepted (it is normalized later, not here), a
    /// negative one is not.
    pub fn validate(&self) -> Result<()> {
        let quantities = [
            ("electricity_kwh", self.electricity_kwh),
            ("natural_gas_kwh", self.natural_gas_kwh),
            ("fuel_oil_gj", self.fuel_oil_gj),
            ("coal_gj", self.coal_gj),
            ("ch4_kg", self.ch4_kg),
            ("n2o_kg", self.n2o_kg),
            ("production_tonnes", self.production_tonnes),
        ];
        for &(name, value) in &quantities {
            if !value.is_finite() || value < 0.0 {
                return Err(CbamError::WrongInput(format!(
                    "{} must be a non negative number, got {}",
                    name, value
                )));
            }
        }
        if let Some(factor) = self.custom_electricity_factor {
            if !factor.is_finite() || factor < 0.0 {
                return Err(CbamError::WrongInput(format!(
                    "custom_electricity_factor must be a non negative number, got {}",
                    factor
                )));
            }
        }
        if let Some(process) = self.custom_process_emissions {
            if !process.is_finite() || process < 0.0 {
                return Err(CbamError::WrongInput(format!(
                    "custom_process_emissions must be a non negative number, got {}",
                    process
                )));
            }
        }
        Ok(())
    }

    /// Volumen de producción con el suelo de 1 t aplicado.
    ///
    /// Production volume floored to 1 t, so per-unit intensity never divides
    /// by zero when the caller reports an unknown (zero) volume.
    pub fn normalized_production(&self) -> f64 {
        self.production_tonnes.max(1.0)
    }
}
