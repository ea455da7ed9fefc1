//! Transaction records and their import ids.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::extract::CompleteExtraction;
use crate::notification::{IsoDate, Payee};

/// Imported transactions always start uncleared; the user clears them in YNAB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClearedState {
    Uncleared,
}

impl ClearedState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClearedState::Uncleared => "uncleared",
        }
    }
}

/// A transaction ready for the ledger. Fields are private so a record is
/// never changed after [`TransactionBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRecord {
    account_id: String,
    date: IsoDate,
    amount: i64,
    payee: Option<Payee>,
    cleared: ClearedState,
    approved: bool,
    import_id: String,
}

impl TransactionRecord {
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn date(&self) -> &IsoDate {
        &self.date
    }

    /// Milliunits; negative for outflows.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn payee(&self) -> Option<&Payee> {
        self.payee.as_ref()
    }

    pub fn cleared(&self) -> ClearedState {
        self.cleared
    }

    pub fn approved(&self) -> bool {
        self.approved
    }

    pub fn import_id(&self) -> &str {
        &self.import_id
    }
}

/// Import id in the format `PREFIX:[milliunit_amount]:[iso_date]:[occurrence]`.
///
/// A transaction dated 2015-12-30 of -294.23 with the YNAB prefix is
/// `YNAB:-294230:2015-12-30:1`.
pub fn import_id(prefix: &str, amount: i64, date: &IsoDate, occurrence: u32) -> String {
    format!("{prefix}:{amount}:{date}:{occurrence}")
}

#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    account_id: String,
    import_prefix: String,
}

impl TransactionBuilder {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            account_id: config.account_id.clone(),
            import_prefix: config.import_prefix.clone(),
        }
    }

    pub fn build(&self, extraction: CompleteExtraction, occurrence: u32) -> TransactionRecord {
        let import_id = import_id(
            &self.import_prefix,
            extraction.amount,
            &extraction.date,
            occurrence,
        );

        TransactionRecord {
            account_id: self.account_id.clone(),
            date: extraction.date,
            amount: extraction.amount,
            payee: extraction.payee,
            cleared: ClearedState::Uncleared,
            approved: false,
            import_id,
        }
    }
}
