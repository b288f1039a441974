//! Conversion core: validation against the catalog and the provider's
//! supported-codes list, then a unit-rate quote scaled locally.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::catalog::CurrencyCatalog;
use crate::error::{ConverterError, ValidationError};
use crate::provider::RateSource;

/// Outcome of a conversion request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Conversion {
    Converted(f64),
    /// Source and target codes are equal; no quote was requested.
    SameCurrency,
}

/// Converts amounts between currencies using live rates from a [`RateSource`].
///
/// All state is fixed at [`connect`](Self::connect) time: the catalog, the
/// source, and the provider's supported-codes list fetched once for the
/// converter's lifetime. `&self` methods are therefore safe to call from
/// concurrent tasks.
pub struct CurrencyConverter<S> {
    catalog: CurrencyCatalog,
    source: S,
    supported: Vec<String>,
}

impl<S: RateSource> CurrencyConverter<S> {
    /// Builds a converter, fetching the provider's supported currency codes.
    pub async fn connect(catalog: CurrencyCatalog, source: S) -> Result<Self, ConverterError> {
        let mut supported = source.supported_codes().await?;
        supported.sort();
        debug!(count = supported.len(), "Fetched provider-supported codes");

        Ok(CurrencyConverter {
            catalog,
            source,
            supported,
        })
    }

    /// True iff `code` exists in the reference catalog.
    pub fn is_known_code(&self, code: &str) -> bool {
        self.catalog.contains(code)
    }

    /// True iff the live provider quotes `code`.
    pub fn is_supported_code(&self, code: &str) -> bool {
        self.supported.binary_search(&code.to_string()).is_ok()
    }

    /// Full display name for `code`.
    pub fn currency_name(&self, code: &str) -> Result<&str, ConverterError> {
        self.catalog
            .name_of(code)
            .ok_or_else(|| ConverterError::UnknownCurrency(code.to_string()))
    }

    /// True iff `text` parses as a finite decimal number.
    pub fn is_valid_amount(text: &str) -> bool {
        text.trim().parse::<f64>().is_ok_and(f64::is_finite)
    }

    /// Provider-supported codes joined with their catalog names, in
    /// code-sorted order. Codes the catalog cannot name are skipped.
    pub fn available_currencies(&self) -> BTreeMap<String, String> {
        let mut currencies = BTreeMap::new();
        for code in &self.supported {
            match self.catalog.name_of(code) {
                Some(name) => {
                    currencies.insert(code.clone(), name.to_string());
                }
                None => debug!(code, "Provider supports a code missing from the catalog"),
            }
        }
        currencies
    }

    fn check_request(&self, from: &str, to: &str, amount: &str) -> Result<f64, ValidationError> {
        for code in [from, to] {
            if !self.is_known_code(code) {
                return Err(ValidationError::UnknownCode(code.to_string()));
            }
            if !self.is_supported_code(code) {
                return Err(ValidationError::UnsupportedCode(code.to_string()));
            }
        }

        if !Self::is_valid_amount(amount) {
            return Err(ValidationError::InvalidAmount(amount.to_string()));
        }
        // Validated above; the parse cannot fail here.
        amount
            .trim()
            .parse::<f64>()
            .map_err(|_| ValidationError::InvalidAmount(amount.to_string()))
    }

    /// Converts `amount` from one currency to another.
    ///
    /// Equal codes short-circuit to [`Conversion::SameCurrency`] without
    /// validation or a provider call. Otherwise the request is validated
    /// first so malformed input never spends a quota-limited API call, then
    /// the unit rate is fetched and scaled locally.
    #[instrument(skip(self))]
    pub async fn convert(
        &self,
        from: &str,
        to: &str,
        amount: &str,
    ) -> Result<Conversion, ConverterError> {
        if from == to {
            return Ok(Conversion::SameCurrency);
        }

        let amount = self.check_request(from, to, amount)?;
        let rate = self.source.unit_rate(from, to).await?;
        debug!(rate, "Received unit rate");

        Ok(Conversion::Converted(amount * rate))
    }
}
