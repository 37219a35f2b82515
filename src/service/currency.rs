use std::collections::BTreeMap;

use crate::store::{CurrencyStore, StoreResult};

/// Company name to the display form of its default currency.
pub async fn company_currency_map<S: CurrencyStore + ?Sized>(
    store: &S,
) -> StoreResult<BTreeMap<String, String>> {
    Ok(store
        .company_currencies()
        .await?
        .into_iter()
        .map(|c| {
            let display = c.display();
            (c.name, display)
        })
        .collect())
}

/// Currency code to its symbol, or the code itself when no symbol is set.
pub async fn currency_symbol_map<S: CurrencyStore + ?Sized>(
    store: &S,
) -> StoreResult<BTreeMap<String, String>> {
    Ok(store
        .currencies()
        .await?
        .into_iter()
        .map(|c| {
            let display = c.display();
            (c.name, display)
        })
        .collect())
}
