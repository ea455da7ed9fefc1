//! File sinks. The YNAB HTTP call itself happens elsewhere; these write the
//! exact payload (JSON) or a file YNAB's manual file import accepts (CSV).

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use illimity_core::{LedgerSink, TransactionRecord};

use crate::ynab::{SaveTransactionsPayload, format_milliunits};

/// Writes `{"transactions": [...]}` to a file, or stdout when no path is set.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: Option<PathBuf>,
}

impl JsonFileSink {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl LedgerSink for JsonFileSink {
    fn submit(&mut self, transactions: &[TransactionRecord]) -> Result<()> {
        let payload = SaveTransactionsPayload::new(transactions);
        let json = serde_json::to_string_pretty(&payload).context("serialize payload")?;

        match &self.path {
            Some(p) => {
                fs::write(p, json).with_context(|| format!("write {}", p.display()))?;
                info!(path = %p.display(), count = transactions.len(), "wrote YNAB payload");
            }
            None => {
                let mut out = std::io::stdout().lock();
                writeln!(out, "{json}").context("write stdout")?;
            }
        }
        Ok(())
    }
}

/// Writes `Date,Payee,Memo,Amount` rows. The import id goes into the memo.
///
/// A CSV file import only carries payee names, so transfer payees
/// ([`Payee::Id`](illimity_core::Payee::Id), e.g. cash withdrawals) leave the
/// Payee column empty. Use [`JsonFileSink`] to keep them.
#[derive(Debug, Clone)]
pub struct CsvFileSink {
    path: Option<PathBuf>,
}

impl CsvFileSink {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    fn write_rows<W: Write>(writer: W, transactions: &[TransactionRecord]) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["Date", "Payee", "Memo", "Amount"])?;
        for t in transactions {
            let payee = t.payee().and_then(|p| p.name()).unwrap_or("");
            let amount = format_milliunits(t.amount());
            wtr.write_record([t.date().as_str(), payee, t.import_id(), amount.as_str()])?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl LedgerSink for CsvFileSink {
    fn submit(&mut self, transactions: &[TransactionRecord]) -> Result<()> {
        match &self.path {
            Some(p) => {
                let file = fs::File::create(p).with_context(|| format!("create {}", p.display()))?;
                Self::write_rows(file, transactions)?;
                info!(path = %p.display(), count = transactions.len(), "wrote YNAB csv");
            }
            None => Self::write_rows(std::io::stdout().lock(), transactions)?,
        }
        Ok(())
    }
}
