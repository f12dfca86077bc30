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
Errores del cálculo de emisiones
================================

Error type and `Result` alias used across the crate.

*/

use std::fmt;

/// Error del cálculo de emisiones (calculation error)
#[derive(Debug, Clone, PartialEq)]
pub enum CbamError {
    /// Datos de entrada incorrectos (caller supplied data out of domain)
    WrongInput(String),
    /// Sector desconocido (unknown CBAM sector)
    SectorUnknown(String),
    /// Método de determinación desconocido (unknown determination method)
    MethodUnknown(String),
    /// Nivel de verificación desconocido (unknown verification level)
    VerificationUnknown(String),
    /// Error de interpretación de un factor de emisión (emission factor line parse error)
    FactorParse(String),
    /// Fecha con formato incorrecto (bad date format)
    DateParse(String),
    /// Número con formato incorrecto (bad number format)
    NumberParse(String),
    /// Fallo al obtener el precio del carbono (carbon price fetch failure)
    PriceFetch(String),
}

/// Resultado con error de cálculo de emisiones
pub type Result<T> = std::result::Result<T, CbamError>;

impl fmt::Display for CbamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use CbamError::*;
        match self {
            WrongInput(input) => write!(f, "Wrong input data: {}", input),
            SectorUnknown(sector) => write!(f, "Unknown sector: {}", sector),
            MethodUnknown(method) => write!(f, "Unknown determination method: {}", method),
            VerificationUnknown(level) => write!(f, "Unknown verification level: {}", level),
            FactorParse(line) => write!(f, "Could not parse emission factor from \"{}\"", line),
            DateParse(date) => write!(f, "Could not parse date from \"{}\"", date),
            NumberParse(num) => write!(f, "Could not parse number from \"{}\"", num),
            PriceFetch(cause) => write!(f, "Carbon price refresh failed: {}", cause),
        }
    }
}

impl std::error::Error for CbamError {}

impl From<std::num::ParseFloatError> for CbamError {
    fn from(err: std::num::ParseFloatError) -> Self {
        CbamError::NumberParse(err.to_string())
    }
}
