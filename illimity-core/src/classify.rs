//! Detects which notification template a body was rendered from.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{EngineError, Result};
use crate::notification::RawNotification;

/// Known illimity notification templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationShape {
    Withdrawal,
    InstantTransfer,
    CardPayment,
    RegularTransfer,
    RecurringTransfer,
    CreditTransfer,
    SalaryCredit,
    BillPayment,
}

impl NotificationShape {
    /// Classification order. Earlier entries win.
    pub const ALL: [NotificationShape; 8] = [
        NotificationShape::Withdrawal,
        NotificationShape::InstantTransfer,
        NotificationShape::CardPayment,
        NotificationShape::RegularTransfer,
        NotificationShape::RecurringTransfer,
        NotificationShape::CreditTransfer,
        NotificationShape::SalaryCredit,
        NotificationShape::BillPayment,
    ];

    /// Marker phrase unique to the template.
    fn marker(self) -> &'static str {
        match self {
            NotificationShape::Withdrawal => r"(?i)prelievo di \*(\d+,\d+)\* \*EUR",
            NotificationShape::InstantTransfer => {
                r"(?i)bonifico istantaneo richiesto è andato a buon fine"
            }
            NotificationShape::CardPayment => r"(?i)pagamento di \*(\d+,\d+)\* \*EUR",
            NotificationShape::RegularTransfer => r"(?i)hai inserito un bonifico dal tuo conto",
            NotificationShape::RecurringTransfer => r"(?i)Il bonifico richiestoè andato a buon fine",
            NotificationShape::CreditTransfer => {
                r"(?i)hai ricevuto sul tuo conto illimity un accredito"
            }
            NotificationShape::SalaryCredit => r"(?i)hai ricevuto l.*accredito dello stipendio",
            NotificationShape::BillPayment => {
                r"(?i)Il pagamento del bollettinoè andato a buon fine"
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NotificationShape::Withdrawal => "withdrawal",
            NotificationShape::InstantTransfer => "instant-transfer",
            NotificationShape::CardPayment => "card-payment",
            NotificationShape::RegularTransfer => "regular-transfer",
            NotificationShape::RecurringTransfer => "recurring-transfer",
            NotificationShape::CreditTransfer => "credit-transfer",
            NotificationShape::SalaryCredit => "salary-credit",
            NotificationShape::BillPayment => "bill-payment",
        }
    }
}

impl fmt::Display for NotificationShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered list of shape predicates; the first match is returned.
#[derive(Debug, Clone)]
pub struct Classifier {
    predicates: Vec<(NotificationShape, Regex)>,
}

impl Classifier {
    pub fn new() -> Result<Self> {
        let predicates = NotificationShape::ALL
            .iter()
            .map(|shape| Ok((*shape, Regex::new(shape.marker())?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { predicates })
    }

    pub fn classify(&self, raw: &RawNotification) -> Result<NotificationShape> {
        self.predicates
            .iter()
            .find(|(_, re)| re.is_match(raw.as_str()))
            .map(|(shape, _)| *shape)
            .ok_or(EngineError::UnrecognizedShape)
    }

    /// Every shape whose marker appears in the text, in classification order.
    #[cfg(test)]
    pub(crate) fn matching_shapes(&self, raw: &RawNotification) -> Vec<NotificationShape> {
        self.predicates
            .iter()
            .filter(|(_, re)| re.is_match(raw.as_str()))
            .map(|(shape, _)| *shape)
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod samples {
    //! Bodies as they arrive from the inbox: line breaks already removed.

    pub const CARD_PAYMENT: &str = "il 15/03/2024 alle 14:30 hai effettuato un pagamento di *50,00* *EUR presso *AMAZON EU S.A R.L*";
    pub const WITHDRAWAL: &str =
        "il 16/03/2024 alle 10:15 hai effettuato un prelievo di *100,00* *EUR";
    pub const REGULAR_TRANSFER: &str = "hai inserito un bonifico dal tuo conto      Data valuta * 17/03/2024      *Importo *200,00 euro*";
    pub const CREDIT_TRANSFER: &str =
        "il 18/03/2024 hai ricevuto sul tuo conto illimity un accredito di *300,00* *EUR";
    pub const BILL_PAYMENT: &str = "Il pagamento del bollettinoè andato a buon fine      Data di esecuzione del pagamento * 19/03/2024      *Importo totale * 75,50 EUR *";
    pub const INSTANT_TRANSFER: &str = "bonifico istantaneo richiesto è andato a buon fine      Data di esecuzione * 20/03/2024      *Importo * 150,00 EUR *";
    pub const SALARY_CREDIT: &str = "il 21/03/2024 hai ricevuto l'accredito dello stipendio";
    pub const RECURRING_TRANSFER: &str = "Il bonifico richiestoè andato a buon fine      Data di esecuzione * 22/03/2024      *Importo *250,00 EUR*";
}
