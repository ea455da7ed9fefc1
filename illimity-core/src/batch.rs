//! Batch driver: notifications in, one ledger submission out.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use crate::engine::NotificationEngine;
use crate::notification::RawNotification;
use crate::occurrence::OccurrenceTracker;
use crate::transaction::{TransactionBuilder, TransactionRecord};

/// Where notification bodies come from (a mailbox export, a directory, stdin).
pub trait NotificationSource {
    /// Every pending notification, newlines already collapsed.
    fn fetch(&mut self) -> Result<Vec<RawNotification>>;

    /// Called once the sink accepted the batch, so processed notifications are
    /// not read again (marked read, moved away, ...).
    fn acknowledge(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Accepts a whole batch or fails as a whole.
pub trait LedgerSink {
    fn submit(&mut self, transactions: &[TransactionRecord]) -> Result<()>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub fetched: usize,
    pub skipped: usize,
    pub submitted: usize,
    pub acknowledged: bool,
}

/// Turn notifications into records, skipping those without a date or amount.
///
/// Occurrence counts start fresh on every call.
pub fn build_transactions(
    engine: &NotificationEngine,
    builder: &TransactionBuilder,
    notifications: &[RawNotification],
) -> (Vec<TransactionRecord>, usize) {
    let mut tracker = OccurrenceTracker::new();
    let mut records = Vec::new();
    let mut skipped = 0;

    for (index, raw) in notifications.iter().enumerate() {
        let Some(extraction) = engine.extract(raw).into_complete() else {
            warn!(index, "Skipping notification without date or amount");
            skipped += 1;
            continue;
        };

        let occurrence = tracker.track(&extraction.date, extraction.amount);
        records.push(builder.build(extraction, occurrence));
    }

    (records, skipped)
}

pub fn run_batch<S, L>(
    engine: &NotificationEngine,
    builder: &TransactionBuilder,
    source: &mut S,
    sink: &mut L,
) -> Result<BatchReport>
where
    S: NotificationSource + ?Sized,
    L: LedgerSink + ?Sized,
{
    let notifications = source.fetch().context("fetching notifications")?;
    let mut report = BatchReport {
        fetched: notifications.len(),
        ..BatchReport::default()
    };

    if notifications.is_empty() {
        info!("No notifications to process, aborting.");
        return Ok(report);
    }

    let (records, skipped) = build_transactions(engine, builder, &notifications);
    report.skipped = skipped;

    if records.is_empty() {
        info!("No transactions to process, aborting.");
        return Ok(report);
    }

    sink.submit(&records).context("submitting transactions")?;
    report.submitted = records.len();

    source.acknowledge().context("acknowledging processed notifications")?;
    report.acknowledged = true;

    info!(submitted = report.submitted, skipped = report.skipped, "Processed transactions");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::samples::*;
    use crate::config::EngineConfig;

    struct VecSource {
        items: Vec<RawNotification>,
        acknowledged: bool,
    }

    impl NotificationSource for VecSource {
        fn fetch(&mut self) -> Result<Vec<RawNotification>> {
            Ok(self.items.clone())
        }

        fn acknowledge(&mut self) -> Result<()> {
            self.acknowledged = true;
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        batches: Vec<Vec<TransactionRecord>>,
        fail: bool,
    }

    impl LedgerSink for RecordingSink {
        fn submit(&mut self, transactions: &[TransactionRecord]) -> Result<()> {
            if self.fail {
                anyhow::bail!("ledger unavailable");
            }
            self.batches.push(transactions.to_vec());
            Ok(())
        }
    }

    fn setup() -> (NotificationEngine, TransactionBuilder) {
        let config = EngineConfig::new("acct", "cash");
        (
            NotificationEngine::new(&config).unwrap(),
            TransactionBuilder::new(&config),
        )
    }

    fn source(texts: &[&str]) -> VecSource {
        VecSource {
            items: texts.iter().map(|t| RawNotification::new(*t)).collect(),
            acknowledged: false,
        }
    }

    #[test]
    fn test_duplicates_get_increasing_occurrences() {
        let (engine, builder) = setup();
        let mut src = source(&[CARD_PAYMENT, CARD_PAYMENT, WITHDRAWAL]);
        let mut sink = RecordingSink::default();

        let report = run_batch(&engine, &builder, &mut src, &mut sink).unwrap();
        assert_eq!(report.submitted, 3);
        assert!(src.acknowledged);

        let ids: Vec<&str> = sink.batches[0].iter().map(|r| r.import_id()).collect();
        assert_eq!(
            ids,
            vec![
                "YNAB:-50000:2024-03-15:1",
                "YNAB:-50000:2024-03-15:2",
                "YNAB:-100000:2024-03-16:1",
            ]
        );
    }

    #[test]
    fn test_unrecognized_notifications_are_skipped() {
        let (engine, builder) = setup();
        let mut src = source(&["newsletter", SALARY_CREDIT]);
        let mut sink = RecordingSink::default();

        let report = run_batch(&engine, &builder, &mut src, &mut sink).unwrap();
        assert_eq!(report.fetched, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.submitted, 1);
        assert_eq!(sink.batches[0][0].amount(), 0);
    }

    #[test]
    fn test_nothing_usable_means_no_submission() {
        let (engine, builder) = setup();
        let mut src = source(&["newsletter"]);
        let mut sink = RecordingSink::default();

        let report = run_batch(&engine, &builder, &mut src, &mut sink).unwrap();
        assert!(sink.batches.is_empty());
        assert!(!report.acknowledged);
        assert!(!src.acknowledged);
    }

    #[test]
    fn test_sink_failure_leaves_source_unacknowledged() {
        let (engine, builder) = setup();
        let mut src = source(&[CARD_PAYMENT]);
        let mut sink = RecordingSink {
            fail: true,
            ..RecordingSink::default()
        };

        assert!(run_batch(&engine, &builder, &mut src, &mut sink).is_err());
        assert!(!src.acknowledged);
    }

    #[test]
    fn test_each_batch_starts_counting_again() {
        let (engine, builder) = setup();
        let notes = vec![RawNotification::new(CARD_PAYMENT)];

        let (first, _) = build_transactions(&engine, &builder, &notes);
        let (second, _) = build_transactions(&engine, &builder, &notes);
        assert_eq!(first[0].import_id(), second[0].import_id());
    }
}
