//! Input and value types shared by the classifier, extractors and builder.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The rendered text of a single bank notification.
///
/// The engine never relies on line breaks; sources are expected to hand over
/// bodies with newlines already removed (see [`RawNotification::from_multiline`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawNotification(String);

impl RawNotification {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Build from a plain-text email body, dropping every `\r\n`, `\n` and `\r`.
    pub fn from_multiline(body: &str) -> Self {
        Self(collapse_newlines(body))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RawNotification {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for RawNotification {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

/// Remove line breaks without inserting any separator.
///
/// Templates such as "richiesto\nè andato" only match once joined as
/// "richiestoè andato", so no space is substituted.
pub fn collapse_newlines(body: &str) -> String {
    body.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}

/// A `YYYY-MM-DD` date as written to the ledger. Not calendar-validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IsoDate(String);

impl IsoDate {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IsoDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Counterparty of a transaction: a free-text name or a known ledger payee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Payee {
    Name(String),
    Id(String),
}

impl Payee {
    pub fn name(&self) -> Option<&str> {
        match self {
            Payee::Name(name) => Some(name),
            Payee::Id(_) => None,
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Payee::Id(id) => Some(id),
            Payee::Name(_) => None,
        }
    }
}
