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
Puntuación de cumplimiento normativo
====================================

Derives a 0-100 data-quality score and its recommendations from the declared
method and the propagated uncertainties. The score is a readiness heuristic,
not a legal certification. Recommendations are emitted in a fixed insertion
order because the report layer renders them verbatim.

*/

use crate::types::Method;

/// Deducción por método DEFAULT
const DEFAULT_METHOD_PENALTY: i32 = 20;
/// Deducción por método HYBRID
const HYBRID_METHOD_PENALTY: i32 = 10;
/// Deducción por incertidumbre de alcance 1 superior al umbral
const SCOPE1_UNCERTAINTY_PENALTY: i32 = 15;
/// Umbral de incertidumbre de alcance 1 [%]
const SCOPE1_UNCERTAINTY_THRESHOLD_PCT: f64 = 10.0;
/// Deducción por incertidumbre de alcance 2 superior al umbral
const SCOPE2_UNCERTAINTY_PENALTY: i32 = 10;
/// Umbral de incertidumbre de alcance 2 [%]
const SCOPE2_UNCERTAINTY_THRESHOLD_PCT: f64 = 15.0;
/// Puntuación por debajo de la cual se sugiere verificación externa
const VERIFICATION_ADVICE_THRESHOLD: i32 = 80;

/// Datos de calidad evaluados por la puntuación de cumplimiento.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplianceInput {
    /// Declared data-quality method
    pub method: Method,
    /// Combined scope 1 uncertainty [%]
    pub scope1_uncertainty_pct: f64,
    /// Scope 2 (electricity factor) uncertainty [%]
    pub scope2_uncertainty_pct: f64,
    /// Whether the caller declared direct process emissions
    pub has_process_emissions: bool,
}

/// Puntuación 0-100 y recomendaciones de mejora de calidad de datos.
///
/// Deterministic for the same inputs. Starting at 100: −20 for the DEFAULT
/// method, −10 for HYBRID, −15 when scope 1 uncertainty exceeds 10 %, −10
/// when scope 2 uncertainty exceeds 15 %; clamped to [0, 100].
pub fn score(input: &ComplianceInput) -> (u8, Vec<String>) {
    let mut score: i32 = 100;
    let mut recommendations = Vec::new();

    match input.method {
        Method::DEFAULT => score -= DEFAULT_METHOD_PENALTY,
        Method::HYBRID => score -= HYBRID_METHOD_PENALTY,
        Method::ACTUAL => {}
    }
    if input.scope1_uncertainty_pct > SCOPE1_UNCERTAINTY_THRESHOLD_PCT {
        score -= SCOPE1_UNCERTAINTY_PENALTY;
    }
    if input.scope2_uncertainty_pct > SCOPE2_UNCERTAINTY_THRESHOLD_PCT {
        score -= SCOPE2_UNCERTAINTY_PENALTY;
    }
    let score = score.max(0).min(100);

    if input.method == Method::DEFAULT {
        recommendations
            .push("Collect real activity data to replace default-method estimates".to_string());
    }
    if input.scope2_uncertainty_pct > SCOPE2_UNCERTAINTY_THRESHOLD_PCT {
        recommendations.push(format!(
            "Electricity factor uncertainty is high ({:.1} %): use a verified grid factor",
            input.scope2_uncertainty_pct
        ));
    }
    if score < VERIFICATION_ADVICE_THRESHOLD {
        recommendations
            .push("Consider third-party verification of the declared emissions".to_string());
    }
    if !input.has_process_emissions {
        recommendations.push(
            "Add direct process emissions data to complete the scope 1 inventory".to_string(),
        );
    }

    (score as u8, recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn worked_deduction_case() {
        // 100 - 20 (DEFAULT) - 15 (scope1 > 10) - 10 (scope2 > 15) = 55
        let (value, _) = score(&ComplianceInput {
            method: Method::DEFAULT,
            scope1_uncertainty_pct: 12.0,
            scope2_uncertainty_pct: 20.0,
            has_process_emissions: true,
        });
        assert_eq!(value, 55);
    }

    #[test]
    fn actual_method_with_low_uncertainty_scores_full() {
        let (value, recommendations) = score(&ComplianceInput {
            method: Method::ACTUAL,
            scope1_uncertainty_pct: 3.0,
            scope2_uncertainty_pct: 8.0,
            has_process_emissions: true,
        });
        assert_eq!(value, 100);
        assert!(recommendations.is_empty());
    }

    #[test]
    fn hybrid_deduction() {
        let (value, _) = score(&ComplianceInput {
            method: Method::HYBRID,
            scope1_uncertainty_pct: 3.0,
            scope2_uncertainty_pct: 8.0,
            has_process_emissions: true,
        });
        assert_eq!(value, 90);
    }

    #[test]
    fn recommendations_keep_insertion_order() {
        let (value, recommendations) = score(&ComplianceInput {
            method: Method::DEFAULT,
            scope1_uncertainty_pct: 12.0,
            scope2_uncertainty_pct: 20.0,
            has_process_emissions: false,
        });
        assert_eq!(value, 55);
        assert_eq!(
            recommendations,
            vec![
                "Collect real activity data to replace default-method estimates".to_string(),
                "Electricity factor uncertainty is high (20.0 %): use a verified grid factor"
                    .to_string(),
                "Consider third-party verification of the declared emissions".to_string(),
                "Add direct process emissions data to complete the scope 1 inventory".to_string(),
            ]
        );
    }

    #[test]
    fn minimum_achievable_score() {
        // the full deduction table bottoms out at 55, well inside [0, 100]
        let (value, _) = score(&ComplianceInput {
            method: Method::DEFAULT,
            scope1_uncertainty_pct: 100.0,
            scope2_uncertainty_pct: 100.0,
            has_process_emissions: false,
        });
        assert_eq!(value, 55);
    }
}
