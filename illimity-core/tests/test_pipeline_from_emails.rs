use illimity_core::{
    EngineConfig, LedgerSink, NotificationEngine, NotificationShape, NotificationSource, Payee,
    RawNotification, TransactionBuilder, TransactionRecord, run_batch,
};

/// Bodies exactly as the mail client renders them, line breaks included.
const EMAILS: [&str; 5] = [
    "Gentile cliente,\nil 15/03/2024 alle 14:30 hai effettuato un pagamento di *50,00* *EUR presso *AMAZON EU S.A R.L*\nGrazie",
    "Gentile cliente,\nil 15/03/2024 alle 18:02 hai effettuato un pagamento di *50,00* *EUR presso *LIBRERIA CENTRALE *\n",
    "il 16/03/2024 alle 10:15 hai effettuato un prelievo di *100,00* *EUR\n",
    "Ciao,\nbonifico istantaneo richiesto è andato a buon fine\nData di esecuzione * 20/03/2024\n*Importo * 1.500,00 EUR *\n",
    "Le ricordiamo che il servizio clienti è disponibile 24/7.\n",
];

struct Inbox {
    bodies: Vec<&'static str>,
    read: bool,
}

impl NotificationSource for Inbox {
    fn fetch(&mut self) -> anyhow::Result<Vec<RawNotification>> {
        Ok(self
            .bodies
            .iter()
            .map(|b| RawNotification::from_multiline(b))
            .collect())
    }

    fn acknowledge(&mut self) -> anyhow::Result<()> {
        self.read = true;
        Ok(())
    }
}

#[derive(Default)]
struct Ledger {
    received: Vec<TransactionRecord>,
}

impl LedgerSink for Ledger {
    fn submit(&mut self, transactions: &[TransactionRecord]) -> anyhow::Result<()> {
        self.received.extend_from_slice(transactions);
        Ok(())
    }
}

fn config() -> EngineConfig {
    EngineConfig::new("budget-account", "cash-account-transfer-payee-id")
}

#[test]
fn test_inbox_to_ledger() {
    let config = config();
    let engine = NotificationEngine::new(&config).unwrap();
    let builder = TransactionBuilder::new(&config);

    let mut inbox = Inbox {
        bodies: EMAILS.to_vec(),
        read: false,
    };
    let mut ledger = Ledger::default();

    let report = run_batch(&engine, &builder, &mut inbox, &mut ledger).unwrap();
    assert_eq!(report.fetched, 5);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.submitted, 4);
    assert!(inbox.read);

    let ids: Vec<&str> = ledger.received.iter().map(|r| r.import_id()).collect();
    assert_eq!(
        ids,
        vec![
            "YNAB:-50000:2024-03-15:1",
            "YNAB:-50000:2024-03-15:2",
            "YNAB:-100000:2024-03-16:1",
            "YNAB:-1500000:2024-03-20:1",
        ]
    );

    assert_eq!(
        ledger.received[1].payee(),
        Some(&Payee::Name("LIBRERIA CENTRALE".to_string()))
    );
    assert_eq!(
        ledger.received[2].payee(),
        Some(&Payee::Id("cash-account-transfer-payee-id".to_string()))
    );
    assert!(ledger.received.iter().all(|r| r.account_id() == "budget-account"));
}

#[test]
fn test_rerun_reproduces_import_ids() {
    let config = config();
    let engine = NotificationEngine::new(&config).unwrap();
    let builder = TransactionBuilder::new(&config);

    let mut first = Ledger::default();
    let mut second = Ledger::default();
    for ledger in [&mut first, &mut second] {
        let mut inbox = Inbox {
            bodies: EMAILS.to_vec(),
            read: false,
        };
        run_batch(&engine, &builder, &mut inbox, ledger).unwrap();
    }

    assert_eq!(first.received, second.received);
}

#[test]
fn test_classify_reports_shape() {
    let engine = NotificationEngine::new(&config()).unwrap();
    let raw = RawNotification::from_multiline(EMAILS[3]);
    assert_eq!(engine.classify(&raw).unwrap(), NotificationShape::InstantTransfer);
    assert!(engine.classify(&RawNotification::from_multiline(EMAILS[4])).is_err());
}
