//! Per-shape extraction rules: where the date, amount and payee live in each
//! template, and how the captured text is turned into ledger values.

use regex::Regex;
use serde::Serialize;

use crate::classify::NotificationShape;
use crate::error::Result;
use crate::format::{format_amount, format_date, format_outflow, format_payee};
use crate::notification::{IsoDate, Payee, RawNotification};

const DATE: &str = r"(\d{2}/\d{2}/\d{4})";
const AMOUNT: &str = r"(\d+,\d+)";
const GROUPED_AMOUNT: &str = r"(\d+(?:\.\d{3})*,\d+)";

/// What a notification yielded. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    pub date: Option<IsoDate>,
    pub amount: Option<i64>,
    pub payee: Option<Payee>,
}

/// An extraction with both date and amount, the only input a transaction
/// can be built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteExtraction {
    pub date: IsoDate,
    pub amount: i64,
    pub payee: Option<Payee>,
}

impl ExtractionResult {
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.amount.is_none() && self.payee.is_none()
    }

    pub fn into_complete(self) -> Option<CompleteExtraction> {
        Some(CompleteExtraction {
            date: self.date?,
            amount: self.amount?,
            payee: self.payee,
        })
    }
}

#[derive(Debug, Clone)]
enum AmountRule {
    Outflow(Regex),
    Inflow(Regex),
    Fixed(i64),
}

#[derive(Debug, Clone)]
enum PayeeRule {
    Absent,
    Name(Regex),
    CashAccount(String),
}

/// Extraction strategy bound to one [`NotificationShape`].
#[derive(Debug, Clone)]
pub struct ShapeExtractor {
    date: Regex,
    amount: AmountRule,
    payee: PayeeRule,
}

impl ShapeExtractor {
    /// Compile the rules for `shape`. `cash_payee_id` is only used by withdrawals.
    pub fn new(shape: NotificationShape, cash_payee_id: &str) -> Result<Self> {
        let date_after = |prefix: &str| Regex::new(&format!(r"(?i){prefix}{DATE}"));

        let (date, amount, payee) = match shape {
            NotificationShape::CardPayment => (
                Regex::new(&format!(r"(?i)il {DATE} alle"))?,
                AmountRule::Outflow(Regex::new(&format!(r"(?i)pagamento di \*{AMOUNT}\* \*EUR"))?),
                PayeeRule::Name(Regex::new(r"(?is)presso\s\*([^\\*]+?)\*")?),
            ),
            NotificationShape::Withdrawal => (
                Regex::new(&format!(r"(?i)il {DATE} alle"))?,
                AmountRule::Outflow(Regex::new(&format!(r"(?i)prelievo di \*{AMOUNT}\* \*EUR"))?),
                PayeeRule::CashAccount(cash_payee_id.to_string()),
            ),
            NotificationShape::RegularTransfer => (
                date_after(r"Data valuta \* ")?,
                AmountRule::Outflow(Regex::new(&format!(r"(?i)\*Importo \*{AMOUNT} euro\*"))?),
                PayeeRule::Absent,
            ),
            NotificationShape::RecurringTransfer => (
                date_after(r"Data di esecuzione \* ")?,
                AmountRule::Outflow(Regex::new(&format!(r"(?i)\*Importo \*{AMOUNT} EUR\*"))?),
                PayeeRule::Absent,
            ),
            NotificationShape::InstantTransfer => (
                date_after(r"Data di esecuzione \* ")?,
                AmountRule::Outflow(Regex::new(&format!(
                    r"(?i)\*Importo \* {GROUPED_AMOUNT} EUR \*"
                ))?),
                PayeeRule::Absent,
            ),
            NotificationShape::BillPayment => (
                date_after(r"Data di esecuzione del pagamento \* ")?,
                AmountRule::Outflow(Regex::new(&format!(
                    r"(?i)\*Importo totale \* {AMOUNT} EUR \*"
                ))?),
                PayeeRule::Absent,
            ),
            NotificationShape::CreditTransfer => (
                Regex::new(&format!(r"(?i)il {DATE} hai ricevuto"))?,
                AmountRule::Inflow(Regex::new(&format!(r"(?i)un accredito di \*{AMOUNT}\* \*EUR"))?),
                PayeeRule::Absent,
            ),
            // Salary notices never state the amount; a zero placeholder is recorded.
            NotificationShape::SalaryCredit => (
                Regex::new(&format!(r"(?i)il {DATE} hai ricevuto"))?,
                AmountRule::Fixed(0),
                PayeeRule::Absent,
            ),
        };

        Ok(Self {
            date,
            amount,
            payee,
        })
    }

    pub fn extract_date(&self, raw: &RawNotification) -> Result<Option<IsoDate>> {
        capture(&self.date, raw).map(format_date).transpose()
    }

    pub fn extract_amount(&self, raw: &RawNotification) -> Result<Option<i64>> {
        match &self.amount {
            AmountRule::Outflow(re) => capture(re, raw).map(format_outflow).transpose(),
            AmountRule::Inflow(re) => capture(re, raw).map(format_amount).transpose(),
            AmountRule::Fixed(value) => Ok(Some(*value)),
        }
    }

    pub fn extract_payee(&self, raw: &RawNotification) -> Option<Payee> {
        match &self.payee {
            PayeeRule::Absent => None,
            PayeeRule::Name(re) => capture(re, raw).map(|name| Payee::Name(format_payee(name))),
            PayeeRule::CashAccount(id) => Some(Payee::Id(id.clone())),
        }
    }

    pub fn extract(&self, raw: &RawNotification) -> Result<ExtractionResult> {
        Ok(ExtractionResult {
            date: self.extract_date(raw)?,
            amount: self.extract_amount(raw)?,
            payee: self.extract_payee(raw),
        })
    }
}

fn capture<'t>(re: &Regex, raw: &'t RawNotification) -> Option<&'t str> {
    re.captures(raw.as_str())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
