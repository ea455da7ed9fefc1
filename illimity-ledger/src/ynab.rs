//! Request bodies for `POST /budgets/{budget_id}/transactions`.

use illimity_core::{Payee, TransactionRecord};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveTransaction<'a> {
    pub account_id: &'a str,
    pub date: &'a str,
    /// Milliunits
    pub amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payee_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payee_name: Option<&'a str>,
    pub cleared: &'static str,
    pub approved: bool,
    pub import_id: &'a str,
}

impl<'a> From<&'a TransactionRecord> for SaveTransaction<'a> {
    fn from(record: &'a TransactionRecord) -> Self {
        let payee = record.payee();
        Self {
            account_id: record.account_id(),
            date: record.date().as_str(),
            amount: record.amount(),
            payee_id: payee.and_then(Payee::id),
            payee_name: payee.and_then(Payee::name),
            cleared: record.cleared().as_str(),
            approved: record.approved(),
            import_id: record.import_id(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SaveTransactionsPayload<'a> {
    pub transactions: Vec<SaveTransaction<'a>>,
}

impl<'a> SaveTransactionsPayload<'a> {
    pub fn new(records: &'a [TransactionRecord]) -> Self {
        Self {
            transactions: records.iter().map(SaveTransaction::from).collect(),
        }
    }
}

/// Render milliunits as a decimal amount: `-50000` -> `-50.00`.
///
/// Two decimals unless the third one is significant.
pub fn format_milliunits(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    let units = abs / 1000;
    let frac = abs % 1000;
    if frac % 10 == 0 {
        format!("{sign}{units}.{:02}", frac / 10)
    } else {
        format!("{sign}{units}.{frac:03}")
    }
}
