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
Registro de factores de emisión
===============================

Tabla de factores de emisión por país y sector (country × sector emission
factor registry).

Loading happens through `&mut self` (`upsert` or parsing a dataset) before
the registry is shared; every read is `&self` with no interior mutability, so
concurrent lookups after load need no locking.

*/

use std::collections::HashMap;
use std::fmt;
use std::str;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::CbamError;
use crate::types::{Country, EmissionFactor, Sector};

/// Registro de factores de emisión por (país, sector).
///
/// Entries are never replaced in place: `upsert` appends, and `lookup`
/// returns the entry with the most recent `last_updated` date for the pair.
/// A miss is not an error; callers apply the documented EU default factor.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct FactorRegistry {
    factors: HashMap<(Country, Sector), Vec<EmissionFactor>>,
}

impl FactorRegistry {
    /// Registro vacío (empty registry)
    pub fn new() -> Self {
        Self::default()
    }

    /// Añade un factor al registro.
    ///
    /// Appends a factor for its (country, sector) pair. Prior entries for the
    /// pair are retained; the one with the newest `last_updated` wins lookups.
    pub fn upsert(&mut self, factor: EmissionFactor) {
        self.factors
            .entry((factor.country.clone(), factor.sector))
            .or_insert_with(Vec::new)
            .push(factor);
    }

    /// Factor vigente para un país y sector (current factor for the pair).
    ///
    /// Deterministic pure read: the entry with the latest `last_updated` is
    /// returned ("most recent wins"); on an exact date tie the most recently
    /// upserted entry wins. `None` on a miss.
    pub fn lookup(&self, country: &Country, sector: Sector) -> Option<&EmissionFactor> {
        self.factors
            .get(&(country.clone(), sector))
            .and_then(|entries| entries.iter().max_by_key(|f| f.last_updated))
    }

    /// Todos los factores registrados, ordenados por país, sector y fecha.
    pub fn factors(&self) -> Vec<&EmissionFactor> {
        self.factors
            .values()
            .flatten()
            .sorted_by(|a, b| {
                (&a.country, a.sector, a.last_updated).cmp(&(&b.country, b.sector, b.last_updated))
            })
            .collect()
    }

    /// Número de factores registrados (todas las versiones incluidas)
    pub fn len(&self) -> usize {
        self.factors.values().map(Vec::len).sum()
    }

    /// ¿Está vacío el registro?
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

impl fmt::Display for FactorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = self
            .factors()
            .iter()
            .map(|factor| format!("{}", factor))
            .collect::<Vec<_>>()
            .join("\n");
        write!(f, "{}", lines)
    }
}

impl str::FromStr for FactorRegistry {
    type Err = CbamError;

    fn from_str(s: &str) -> Result<FactorRegistry, Self::Err> {
        let mut registry = FactorRegistry::new();
        let datalines = s
            .lines()
            .map(str::trim)
            .filter(|l| !(l.starts_with('#') || l.starts_with("country,") || l.is_empty()));
        for line in datalines {
            registry.upsert(line.parse()?);
        }
        Ok(registry)
    }
}
