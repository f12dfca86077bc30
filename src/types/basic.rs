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

//! Vocabularios básicos del cálculo CBAM (sectores, países, métodos y niveles)

use std::fmt;
use std::str;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use strum_macros::{Display, EnumString};

use crate::error::CbamError;

/// Sector CBAM del bien importado (CBAM goods sector).
#[allow(non_camel_case_types)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sector {
    /// Iron and steel products
    IRON_STEEL,
    /// Cement and clinker
    CEMENT,
    /// Aluminium (primary and secondary)
    ALUMINIUM,
    /// Nitrogen fertilizers
    FERTILIZERS,
    /// Electricity as an imported good
    ELECTRICITY,
    /// Hydrogen
    HYDROGEN,
}

impl str::FromStr for Sector {
    type Err = CbamError;

    fn from_str(s: &str) -> Result<Sector, Self::Err> {
        match s.trim() {
            "IRON_STEEL" | "STEEL" => Ok(Sector::IRON_STEEL),
            "CEMENT" => Ok(Sector::CEMENT),
            "ALUMINIUM" | "ALUMINUM" => Ok(Sector::ALUMINIUM),
            "FERTILIZERS" | "FERTILISERS" => Ok(Sector::FERTILIZERS),
            "ELECTRICITY" => Ok(Sector::ELECTRICITY),
            "HYDROGEN" => Ok(Sector::HYDROGEN),
            _ => Err(CbamError::SectorUnknown(s.into())),
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// País de origen de los bienes (country of origin).
///
/// Closed list of the exporter countries present in the default CBAM factor
/// dataset. Codes outside the list are kept verbatim in `Other` so the
/// registry lookup can still miss them and fall back to the EU default
/// electricity factor.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Country {
    /// Tunisia
    TN,
    /// Morocco
    MA,
    /// Algeria
    DZ,
    /// Egypt
    EG,
    /// Turkey
    TR,
    /// China
    CN,
    /// India
    IN,
    /// Ukraine
    UA,
    /// Serbia
    RS,
    /// United Kingdom
    GB,
    /// Any other ISO-like code, kept verbatim (uppercased)
    Other(String),
}

impl Country {
    /// Código ISO del país (ISO-like country code)
    pub fn code(&self) -> &str {
        use Country::*;
        match self {
            TN => "TN",
            MA => "MA",
            DZ => "DZ",
            EG => "EG",
            TR => "TR",
            CN => "CN",
            IN => "IN",
            UA => "UA",
            RS => "RS",
            GB => "GB",
            Other(code) => code,
        }
    }
}

impl str::FromStr for Country {
    type Err = CbamError;

    fn from_str(s: &str) -> Result<Country, Self::Err> {
        let code = s.trim().to_uppercase();
        match code.as_str() {
            "" => Err(CbamError::WrongInput("empty country code".into())),
            "TN" => Ok(Country::TN),
            "MA" => Ok(Country::MA),
            "DZ" => Ok(Country::DZ),
            "EG" => Ok(Country::EG),
            "TR" => Ok(Country::TR),
            "CN" => Ok(Country::CN),
            "IN" => Ok(Country::IN),
            "UA" => Ok(Country::UA),
            "RS" => Ok(Country::RS),
            "GB" => Ok(Country::GB),
            _ => Ok(Country::Other(code)),
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// Serialized as its plain ISO code, not as an enum variant tree
impl Serialize for Country {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Country {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(de::Error::custom)
    }
}

/// Método de determinación de los datos declarados (declared data-quality method).
#[allow(non_camel_case_types)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    /// Measured plant data
    ACTUAL,
    /// Default values from published datasets
    DEFAULT,
    /// Mix of measured and default data
    HYBRID,
}

impl str::FromStr for Method {
    type Err = CbamError;

    fn from_str(s: &str) -> Result<Method, Self::Err> {
        match s.trim() {
            "ACTUAL" => Ok(Method::ACTUAL),
            "DEFAULT" => Ok(Method::DEFAULT),
            "HYBRID" => Ok(Method::HYBRID),
            _ => Err(CbamError::MethodUnknown(s.into())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Nivel de verificación de un factor de emisión (verification level).
#[allow(non_camel_case_types)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationLevel {
    /// Third-party verified value
    VERIFIED,
    /// Estimated from published statistics
    ESTIMATED,
    /// Regulatory default value
    DEFAULT,
}

impl str::FromStr for VerificationLevel {
    type Err = CbamError;

    fn from_str(s: &str) -> Result<VerificationLevel, Self::Err> {
        match s.trim() {
            "VERIFIED" => Ok(VerificationLevel::VERIFIED),
            "ESTIMATED" => Ok(VerificationLevel::ESTIMATED),
            "DEFAULT" => Ok(VerificationLevel::DEFAULT),
            _ => Err(CbamError::VerificationUnknown(s.into())),
        }
    }
}

impl fmt::Display for VerificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Umbral de incertidumbre para confianza alta [%]
const HIGH_CONFIDENCE_MAX_PCT: f64 = 5.0;
/// Umbral de incertidumbre para confianza media [%]
const MEDIUM_CONFIDENCE_MAX_PCT: f64 = 15.0;

/// Nivel de confianza de un valor calculado (confidence level), derivado de su incertidumbre.
#[allow(non_camel_case_types)]
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum ConfidenceLevel {
    /// Uncertainty up to 5 %
    HIGH,
    /// Uncertainty up to 15 %
    MEDIUM,
    /// Uncertainty above 15 %
    LOW,
}

impl ConfidenceLevel {
    /// Nivel de confianza correspondiente a una incertidumbre relativa [%]
    pub fn from_uncertainty(uncertainty_pct: f64) -> Self {
        if uncertainty_pct <= HIGH_CONFIDENCE_MAX_PCT {
            ConfidenceLevel::HIGH
        } else if uncertainty_pct <= MEDIUM_CONFIDENCE_MAX_PCT {
            ConfidenceLevel::MEDIUM
        } else {
            ConfidenceLevel::LOW
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sector_roundtrip() {
        let sector: Sector = "IRON_STEEL".parse().unwrap();
        assert_eq!(sector, Sector::IRON_STEEL);
        assert_eq!(format!("{}", sector), "IRON_STEEL");
        assert!("PLASTICS".parse::<Sector>().is_err());
    }

    #[test]
    fn country_fallback_to_other() {
        assert_eq!("TN".parse::<Country>().unwrap(), Country::TN);
        assert_eq!(
            "br".parse::<Country>().unwrap(),
            Country::Other("BR".into())
        );
        assert!("".parse::<Country>().is_err());
        assert_eq!(format!("{}", Country::Other("BR".into())), "BR");
    }

    #[test]
    fn confidence_from_uncertainty() {
        assert_eq!(ConfidenceLevel::from_uncertainty(3.0), ConfidenceLevel::HIGH);
        assert_eq!(
            ConfidenceLevel::from_uncertainty(10.0),
            ConfidenceLevel::MEDIUM
        );
        assert_eq!(ConfidenceLevel::from_uncertainty(25.0), ConfidenceLevel::LOW);
    }
}
