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

// -----------------------------------------------------------------------------------
// Propagación de incertidumbres (uncertainty propagation)
// -----------------------------------------------------------------------------------

//! Combinación de incertidumbres de medida independientes.
//!
//! Combines independent uncertain quantities summed into a total using a
//! weighted root-sum-square, each component weighted by its fractional
//! contribution to the total. The same function is reused at the activity-line
//! level and at the scope level.

use num::Float;
use serde::{Deserialize, Serialize};

/// Cantidad con incertidumbre relativa (uncertain quantity).
///
/// The unit the propagator operates on: a magnitude plus its relative
/// uncertainty in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionComponent {
    /// Magnitude of the quantity
    pub value: f64,
    /// Relative uncertainty [%]
    pub uncertainty_pct: f64,
}

impl EmissionComponent {
    /// Constructor
    pub fn new(value: f64, uncertainty_pct: f64) -> Self {
        Self {
            value,
            uncertainty_pct,
        }
    }
}

/// Incertidumbre combinada de componentes independientes, en % del total.
///
/// Weighted root-sum-square of `(value, uncertainty_pct)` pairs summed into
/// `T = Σ value_i`:
///
/// ```text
/// combined% = sqrt( Σ ( (value_i / T) * uncertainty_i% )^2 )    T ≠ 0
/// combined% = 0                                                  T == 0
/// ```
///
/// Pure and commutative; a single component yields its own uncertainty.
pub fn weighted_rss<T: Float>(components: &[(T, T)]) -> T {
    let total = components
        .iter()
        .fold(T::zero(), |acc, &(value, _)| acc + value);
    if total == T::zero() {
        return T::zero();
    }
    components
        .iter()
        .map(|&(value, uncertainty)| {
            let weighted = (value / total) * uncertainty;
            weighted * weighted
        })
        .fold(T::zero(), |acc, sq| acc + sq)
        .sqrt()
}

/// Incertidumbre combinada de una lista de componentes (combined uncertainty [%])
pub fn combine(components: &[EmissionComponent]) -> f64 {
    let pairs: Vec<(f64, f64)> = components
        .iter()
        .map(|c| (c.value, c.uncertainty_pct))
        .collect();
    weighted_rss(&pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rss_single_component_is_identity() {
        assert_eq!(weighted_rss(&[(10.0, 7.5)]), 7.5);
    }

    #[test]
    fn rss_zero_total() {
        assert_eq!(weighted_rss(&[(0.0, 10.0), (0.0, 25.0)]), 0.0);
        assert_eq!(weighted_rss::<f64>(&[]), 0.0);
    }

    #[test]
    fn rss_two_equal_components() {
        // sqrt((0.5*10)^2 + (0.5*10)^2) = 7.07
        let combined = weighted_rss(&[(10.0, 10.0), (10.0, 10.0)]);
        assert!((combined - 50.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn rss_is_commutative() {
        let a = weighted_rss(&[(3.0, 5.0), (7.0, 12.0), (1.0, 30.0)]);
        let b = weighted_rss(&[(1.0, 30.0), (3.0, 5.0), (7.0, 12.0)]);
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn rss_tiny_uncertain_component_does_not_dominate() {
        // a highly uncertain but tiny component barely moves the result
        let combined = weighted_rss(&[(1000.0, 3.0), (1.0, 90.0)]);
        assert!(combined < 3.1);
    }

    #[test]
    fn combine_matches_weighted_rss() {
        let components = [
            EmissionComponent::new(10.0, 10.0),
            EmissionComponent::new(10.0, 10.0),
        ];
        assert_eq!(combine(&components), weighted_rss(&[(10.0, 10.0), (10.0, 10.0)]));
    }
}
