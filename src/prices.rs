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
Proveedor del precio del carbono
================================

Holds the current carbon market price and its history. The actual price feed
is an injected [`PriceFetcher`]; the provider only validates and installs
what the fetcher returns, so the engine stays testable without network
access. The provider imposes no timeout or retry policy — both belong to the
fetcher.

*/

use std::sync::{Mutex, RwLock};

use crate::error::{CbamError, Result};
use crate::types::CarbonPriceRecord;

/// Fuente inyectable de cotizaciones del carbono (injected price feed).
pub trait PriceFetcher {
    /// Obtiene una nueva cotización (fetch a fresh quote)
    fn fetch(&self) -> Result<CarbonPriceRecord>;
}

impl<F> PriceFetcher for F
where
    F: Fn() -> Result<CarbonPriceRecord>,
{
    fn fetch(&self) -> Result<CarbonPriceRecord> {
        self()
    }
}

/// Proveedor del precio de mercado del carbono.
///
/// Exactly one record is current at any time. `refresh` installs a new record
/// with a single write-lock swap, so concurrent `current()` readers never
/// observe a half-updated record; on a failed refresh the previous record is
/// retained untouched. Prior records are kept in history.
#[derive(Debug, Default)]
pub struct CarbonPriceProvider {
    current: RwLock<Option<CarbonPriceRecord>>,
    history: Mutex<Vec<CarbonPriceRecord>>,
}

impl CarbonPriceProvider {
    /// Proveedor sin cotización inicial (provider with no quote yet)
    pub fn new() -> Self {
        Self::default()
    }

    /// Proveedor inicializado con una cotización (provider seeded with a quote)
    pub fn with_record(record: CarbonPriceRecord) -> Self {
        Self {
            current: RwLock::new(Some(record)),
            history: Mutex::new(vec![]),
        }
    }

    /// Cotización vigente, o `None` si nunca se ha inicializado.
    ///
    /// Clones under a read lock and never blocks on `refresh` beyond the swap.
    pub fn current(&self) -> Option<CarbonPriceRecord> {
        self.current
            .read()
            .ok()
            .and_then(|guard| guard.clone())
    }

    /// Actualiza la cotización vigente a partir del fetcher inyectado.
    ///
    /// Fails with [`CbamError::PriceFetch`] when the fetcher errors or returns
    /// an invalid (non-finite or ≤ 0) price. The previous record survives any
    /// failure; on success it moves to history and the new record becomes
    /// current atomically.
    pub fn refresh(&self, fetcher: &dyn PriceFetcher) -> Result<CarbonPriceRecord> {
        let record = fetcher.fetch().map_err(|e| match e {
            CbamError::PriceFetch(_) => e,
            other => CbamError::PriceFetch(other.to_string()),
        })?;
        if !record.price_eur_per_tonne.is_finite() || record.price_eur_per_tonne <= 0.0 {
            return Err(CbamError::PriceFetch(format!(
                "invalid price {} EUR/t from {}",
                record.price_eur_per_tonne, record.market
            )));
        }
        let mut guard = self
            .current
            .write()
            .map_err(|_| CbamError::PriceFetch("price store lock poisoned".into()))?;
        if let Some(previous) = guard.replace(record.clone()) {
            match self.history.lock() {
                Ok(mut history) => history.push(previous),
                Err(_) => log::warn!("price history lock poisoned, dropping prior record"),
            }
        }
        Ok(record)
    }

    /// Cotizaciones anteriores, de la más antigua a la más reciente.
    pub fn history(&self) -> Vec<CarbonPriceRecord> {
        self.history
            .lock()
            .map(|history| history.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn quote(price: f64) -> CarbonPriceRecord {
        CarbonPriceRecord::new(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(), price)
    }

    #[test]
    fn starts_uninitialized() {
        let provider = CarbonPriceProvider::new();
        assert_eq!(provider.current(), None);
        assert!(provider.history().is_empty());
    }

    #[test]
    fn refresh_installs_record_and_keeps_history() {
        let provider = CarbonPriceProvider::new();
        let first = || -> Result<CarbonPriceRecord> { Ok(quote(83.5)) };
        let second = || -> Result<CarbonPriceRecord> { Ok(quote(90.0)) };
        provider.refresh(&first).unwrap();
        provider.refresh(&second).unwrap();
        assert_eq!(provider.current().unwrap().price_eur_per_tonne, 90.0);
        let history = provider.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].price_eur_per_tonne, 83.5);
    }

    #[test]
    fn failed_refresh_retains_previous_record() {
        let provider = CarbonPriceProvider::with_record(quote(83.5));

        let failing: fn() -> Result<CarbonPriceRecord> =
            || Err(CbamError::PriceFetch("feed unreachable".into()));
        assert!(provider.refresh(&failing).is_err());
        assert_eq!(provider.current().unwrap().price_eur_per_tonne, 83.5);

        // an out-of-domain price is rejected too
        let zero = || -> Result<CarbonPriceRecord> { Ok(quote(0.0)) };
        let negative = || -> Result<CarbonPriceRecord> { Ok(quote(-10.0)) };
        assert!(provider.refresh(&zero).is_err());
        assert!(provider.refresh(&negative).is_err());
        assert_eq!(provider.current().unwrap().price_eur_per_tonne, 83.5);
        assert!(provider.history().is_empty());
    }
}
