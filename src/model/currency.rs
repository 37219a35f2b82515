use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Currency {
    pub name: String,
    pub symbol: Option<String>,
}

impl Currency {
    /// The symbol when one is registered, the currency code otherwise.
    pub fn display(&self) -> String {
        display_symbol(self.symbol.as_deref(), &self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CompanyCurrency {
    pub name: String,
    pub default_currency: String,
    pub symbol: Option<String>,
}

impl CompanyCurrency {
    pub fn display(&self) -> String {
        display_symbol(self.symbol.as_deref(), &self.default_currency)
    }
}

fn display_symbol(symbol: Option<&str>, code: &str) -> String {
    match symbol {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => code.to_string(),
    }
}
