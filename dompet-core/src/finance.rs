//! Transaction types shared by the parser and its callers

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionType {
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "expense")]
    Expense,
}

impl TransactionType {
    /// Description used when nothing is left after extraction
    pub fn placeholder_description(&self) -> &'static str {
        match self {
            TransactionType::Income => "Pemasukan",
            TransactionType::Expense => "Transaksi",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "pemasukan" => Ok(TransactionType::Income),
            "expense" | "pengeluaran" => Ok(TransactionType::Expense),
            other => Err(format!("unknown transaction type: {other}")),
        }
    }
}

/// Which amount pattern produced the amount
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AmountRule {
    #[serde(rename = "suffixed")]
    Suffixed,
    #[serde(rename = "grouped")]
    Grouped,
    #[serde(rename = "digits")]
    Digits,
}

/// Which date expression produced the date
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DateRule {
    #[serde(rename = "natural")]
    Natural,
    #[serde(rename = "numeric")]
    Numeric,
    #[serde(rename = "month-name")]
    MonthName,
    #[serde(rename = "weekday")]
    Weekday,
    #[serde(rename = "relative")]
    Relative,
    #[serde(rename = "day-of-month")]
    DayOfMonth,
}

/// Result of extracting a transaction from free text.
///
/// `amount` is always positive and `description` never empty. A missing
/// `date` means the caller should use its own "today".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedTransaction {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: f64,
    pub description: String,
    pub date: Option<NaiveDate>,
    /// Pattern that matched the amount
    pub amount_rule: AmountRule,
    /// Pattern that matched the date, if any
    pub date_rule: Option<DateRule>,
    /// Income keyword that decided the type
    pub income_keyword: Option<String>,
}

impl ParsedTransaction {
    /// Date of the transaction, falling back to `today`
    pub fn date_or(&self, today: NaiveDate) -> NaiveDate {
        self.date.unwrap_or(today)
    }
}

/// A classified transaction ready to be stored by the caller
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionRecord {
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    pub description: String,
    /// Always positive; see `signed_amount`
    pub amount: f64,
}

impl TransactionRecord {
    /// Build a record from a parsed message.
    ///
    /// `today` is used when the message carried no date; `time` is the
    /// moment the message was handled.
    pub fn from_parsed(
        parsed: &ParsedTransaction,
        category: impl Into<String>,
        today: NaiveDate,
        time: NaiveTime,
    ) -> Self {
        Self {
            date: parsed.date_or(today),
            time,
            kind: parsed.kind,
            category: category.into(),
            description: parsed.description.clone(),
            amount: parsed.amount,
        }
    }

    /// Positive for income, negative for expense
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    pub fn income(&self) -> Option<f64> {
        (self.kind == TransactionType::Income).then_some(self.amount)
    }

    pub fn expense(&self) -> Option<f64> {
        (self.kind == TransactionType::Expense).then_some(self.amount)
    }
}
