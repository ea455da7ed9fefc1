use serde::{Deserialize, Serialize};

pub const DEFAULT_IMPORT_PREFIX: &str = "YNAB";

/// Values the engine needs from the outside world, injected at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Ledger account every transaction is booked on.
    pub account_id: String,
    /// Payee id of the transfer into the cash account, used for ATM withdrawals.
    pub cash_account_payee_id: String,
    /// Leading token of every import id.
    #[serde(default = "default_import_prefix")]
    pub import_prefix: String,
}

fn default_import_prefix() -> String {
    DEFAULT_IMPORT_PREFIX.to_string()
}

impl EngineConfig {
    pub fn new(account_id: impl Into<String>, cash_account_payee_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            cash_account_payee_id: cash_account_payee_id.into(),
            import_prefix: default_import_prefix(),
        }
    }

    pub fn with_import_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.import_prefix = prefix.into();
        self
    }
}
