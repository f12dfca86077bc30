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

//! Registro de precio de mercado del carbono (carbon market price record)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Precio de mercado del carbono en una fecha (carbon price quote).
///
/// One quote from the carbon allowance market. The provider keeps exactly one
/// record as current and the rest as history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonPriceRecord {
    /// Quote date
    pub date: NaiveDate,
    /// Allowance price [EUR/tCO2], > 0
    pub price_eur_per_tonne: f64,
    /// Quote currency
    pub currency: String,
    /// Exchange rate to EUR applied to the quote
    pub exchange_rate: f64,
    /// Market name (e.g. "EEX")
    pub market: String,
    /// Contract type (e.g. "EUA-FUTURES")
    pub contract_type: String,
    /// Relative uncertainty of the quote [%]
    pub uncertainty_pct: f64,
}

impl CarbonPriceRecord {
    /// Cotización EUA en EEX con los valores habituales de mercado
    ///
    /// Convenience constructor for a plain EUR quote on the EEX EUA futures
    /// contract, the market this engine prices against by default.
    pub fn new(date: NaiveDate, price_eur_per_tonne: f64) -> Self {
        Self {
            date,
            price_eur_per_tonne,
            currency: "EUR".into(),
            exchange_rate: 1.0,
            market: "EEX".into(),
            contract_type: "EUA-FUTURES".into(),
            uncertainty_pct: 2.0,
        }
    }
}
