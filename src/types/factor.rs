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

//! Factores de emisión por país y sector (country × sector emission factors)

use std::fmt;
use std::str;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CbamError;
use crate::types::basic::{Country, Sector, VerificationLevel};

/// Factor de emisión de la electricidad de red para un país y sector.
///
/// Grid electricity emission factor for a (country, sector) pair, with its
/// relative uncertainty and provenance. Entries are immutable: an update is a
/// new entry with a newer `last_updated` date, and the registry treats the
/// most recent one as current.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactor {
    /// Country of origin
    pub country: Country,
    /// CBAM goods sector
    pub sector: Sector,
    /// Grid electricity intensity [tCO2/MWh]
    pub electricity_factor: f64,
    /// Relative uncertainty of the factor [%], within 0-100
    pub uncertainty_pct: f64,
    /// Provenance free text (dataset, publication, verifier)
    pub source: String,
    /// Publication date of this value
    pub last_updated: NaiveDate,
    /// Verification level of this value
    pub verification_level: VerificationLevel,
}

impl EmissionFactor {
    /// Constructor
    pub fn new<T: Into<String>>(
        country: Country,
        sector: Sector,
        electricity_factor: f64,
        uncertainty_pct: f64,
        last_updated: NaiveDate,
        verification_level: VerificationLevel,
        source: T,
    ) -> Self {
        Self {
            country,
            sector,
            electricity_factor,
            uncertainty_pct,
            source: source.into(),
            last_updated,
            verification_level,
        }
    }
}

impl fmt::Display for EmissionFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = if self.source.is_empty() {
            "".to_owned()
        } else {
            format!(" # {}", self.source)
        };
        write!(
            f,
            "{}, {}, {:.3}, {:.1}, {}, {}{}",
            self.country,
            self.sector,
            self.electricity_factor,
            self.uncertainty_pct,
            self.last_updated.format("%Y-%m-%d"),
            self.verification_level,
            source
        )
    }
}

impl str::FromStr for EmissionFactor {
    type Err = CbamError;

    fn from_str(s: &str) -> Result<EmissionFactor, Self::Err> {
        let items: Vec<&str> = s.trim().splitn(2, '#').map(str::trim).collect();
        let source = items.get(1).unwrap_or(&"").to_string();
        let items: Vec<&str> = items[0].split(',').map(str::trim).collect();
        if items.len() < 6 {
            return Err(CbamError::FactorParse(s.into()));
        };
        let country: Country = items[0].parse()?;
        let sector: Sector = items[1].parse()?;
        let electricity_factor: f64 = items[2].parse()?;
        let uncertainty_pct: f64 = items[3].parse()?;
        let last_updated = NaiveDate::parse_from_str(items[4], "%Y-%m-%d")
            .map_err(|_| CbamError::DateParse(items[4].into()))?;
        let verification_level: VerificationLevel = items[5].parse()?;
        if electricity_factor < 0.0 || !(0.0..=100.0).contains(&uncertainty_pct) {
            return Err(CbamError::FactorParse(s.into()));
        }
        Ok(EmissionFactor {
            country,
            sector,
            electricity_factor,
            uncertainty_pct,
            source,
            last_updated,
            verification_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tfactor() {
        let factor = EmissionFactor {
            country: "TN".parse().unwrap(),
            sector: "IRON_STEEL".parse().unwrap(),
            electricity_factor: 0.48,
            uncertainty_pct: 12.0,
            source: "IEA 2023 grid intensity".into(),
            last_updated: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            verification_level: "ESTIMATED".parse().unwrap(),
        };
        let factorstr = "TN, IRON_STEEL, 0.480, 12.0, 2024-03-01, ESTIMATED # IEA 2023 grid intensity";

        assert_eq!(format!("{}", factor), factorstr);

        // roundtrip building from/to string
        assert_eq!(
            format!("{}", factorstr.parse::<EmissionFactor>().unwrap()),
            factorstr
        );
    }

    #[test]
    fn tfactor_bad_lines() {
        assert!("TN, IRON_STEEL, 0.480, 12.0".parse::<EmissionFactor>().is_err());
        assert!(
            "TN, IRON_STEEL, -0.1, 12.0, 2024-03-01, ESTIMATED"
                .parse::<EmissionFactor>()
                .is_err()
        );
        assert!(
            "TN, IRON_STEEL, 0.480, 12.0, 01/03/2024, ESTIMATED"
                .parse::<EmissionFactor>()
                .is_err()
        );
    }
}
