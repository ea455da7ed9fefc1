//! illimity-core: classification and extraction of illimity bank notifications
//! into YNAB-ready transactions.

pub mod batch;
pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod format;
pub mod notification;
pub mod occurrence;
pub mod transaction;

pub use batch::{BatchReport, LedgerSink, NotificationSource, build_transactions, run_batch};
pub use classify::{Classifier, NotificationShape};
pub use config::EngineConfig;
pub use engine::NotificationEngine;
pub use error::{EngineError, Result};
pub use extract::{CompleteExtraction, ExtractionResult, ShapeExtractor};
pub use notification::{IsoDate, Payee, RawNotification};
pub use occurrence::OccurrenceTracker;
pub use transaction::{ClearedState, TransactionBuilder, TransactionRecord, import_id};
