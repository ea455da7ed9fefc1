//! illimity-ledger: YNAB wire model and the sinks that hand batches over.

pub mod sinks;
pub mod ynab;

pub use sinks::{CsvFileSink, JsonFileSink};
pub use ynab::{SaveTransaction, SaveTransactionsPayload, format_milliunits};
