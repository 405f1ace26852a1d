//! The transaction records exchanged with the persistence service.
//!
//! The persistence service owns transactions; the dashboard only ever holds
//! the copies returned by the latest fetch.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

/// Alias for the integer type the persistence service uses for transaction IDs.
pub type TransactionId = i64;

/// Whether a transaction brings money in or sends it out.
///
/// Amounts are always non-negative, the sign is implied by the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money received, e.g. a salary.
    Income,
    /// Money spent.
    Expense,
}

impl TransactionType {
    /// The wire and display name, `"income"` or `"expense"`.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transaction as returned by `GET /api/transactions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID the persistence service assigned to the transaction.
    pub id: TransactionId,
    /// The day the transaction happened, `YYYY-MM-DD` on the wire.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// A user-defined label such as "Food" or "Salary".
    pub category: String,
    /// The non-negative magnitude of the transaction.
    pub amount: f64,
    /// An optional free-text annotation.
    #[serde(default)]
    pub note: Option<String>,
}

impl Transaction {
    /// The amount with the sign implied by the type: positive for income,
    /// negative for expenses.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

/// The raw form payload for `POST /api/transactions`.
///
/// Every field is sent exactly as entered. The persistence service is the
/// authority on whether the amount, date and type are valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewTransaction {
    /// The date as entered, expected to be `YYYY-MM-DD`.
    pub date: String,
    /// The amount as entered, e.g. `"12.50"`.
    pub amount: String,
    /// The transaction type as entered, expected to be `income` or `expense`.
    #[serde(rename = "type")]
    pub kind: String,
    /// The category label.
    pub category: String,
    /// The note, empty if the user left it blank.
    pub note: String,
}

impl NewTransaction {
    /// An empty form with the date prefilled to `today` and the type set to expense.
    pub fn blank(today: Date) -> Self {
        Self {
            date: today.to_string(),
            kind: TransactionType::Expense.as_str().to_owned(),
            ..Default::default()
        }
    }
}

/// The body returned by the create and delete endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MutationResponse {
    /// Whether the server applied the change.
    pub ok: bool,
    /// A human-readable reason when `ok` is false.
    #[serde(default)]
    pub error: Option<String>,
}

impl MutationResponse {
    /// Convert the response into a [Result].
    ///
    /// # Errors
    /// Returns [Error::ValidationRejected] with the server message, or
    /// "unknown" if there was none, when `ok` is false.
    pub fn into_result(self) -> Result<(), Error> {
        if self.ok {
            Ok(())
        } else {
            Err(Error::ValidationRejected(
                self.error.unwrap_or_else(|| "unknown".to_owned()),
            ))
        }
    }
}

/// Serde helpers for `YYYY-MM-DD` dates.
pub(crate) mod iso_date {
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _, ser::Error as _};
    use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

    const FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let text = date.format(FORMAT).map_err(S::Error::custom)?;
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let text = String::deserialize(deserializer)?;
        Date::parse(&text, FORMAT).map_err(D::Error::custom)
    }
}
