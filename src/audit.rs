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
Registro de auditoría de cálculos
=================================

Write-only append log of calculation invocations, kept for regulatory
traceability. It carries no business logic; write failures are reported
through the `log` facade and never abort a calculation.

*/

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Apunte de auditoría de una invocación de cálculo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Invocation timestamp
    pub timestamp: DateTime<Utc>,
    /// SHA-256 hex digest of the canonical (JSON) input
    pub input_hash: String,
    /// Data sources consulted during the calculation
    pub sources: Vec<String>,
}

/// Registro de auditoría con escritura concurrente segura.
///
/// Append-only; ordering across concurrent writers is not guaranteed, only
/// per-writer ordering.
#[derive(Debug, Default)]
pub struct AuditLog {
    records: Mutex<Vec<AuditRecord>>,
}

impl AuditLog {
    /// Registro vacío (empty log)
    pub fn new() -> Self {
        Self::default()
    }

    /// Añade un apunte al registro.
    ///
    /// A poisoned lock drops the record with a warning instead of
    /// propagating; auditing must never corrupt or fail a calculation.
    pub fn append(&self, record: AuditRecord) {
        match self.records.lock() {
            Ok(mut records) => records.push(record),
            Err(_) => log::warn!("audit log lock poisoned, dropping record"),
        }
    }

    /// Apuntes registrados hasta el momento (copy-out for compliance export)
    pub fn entries(&self) -> Vec<AuditRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    /// Número de apuntes registrados
    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    /// ¿Está vacío el registro?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(hash: &str) -> AuditRecord {
        AuditRecord {
            timestamp: Utc::now(),
            input_hash: hash.into(),
            sources: vec!["EU default electricity factor".into()],
        }
    }

    #[test]
    fn appends_in_writer_order() {
        let audit = AuditLog::new();
        assert!(audit.is_empty());
        audit.append(record("aa"));
        audit.append(record("bb"));
        let entries = audit.entries();
        assert_eq!(audit.len(), 2);
        assert_eq!(entries[0].input_hash, "aa");
        assert_eq!(entries[1].input_hash, "bb");
    }
}
