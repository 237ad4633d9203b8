use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};

/// One signed point event for a payer at an instant.
///
/// Positive points are grants; negative points are withdrawals, either
/// requested directly or generated by a spend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub payer: String,
    pub points: i64,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Validates and builds a transaction from raw caller input.
    ///
    /// Rejects empty payers, zero point amounts, and timestamps that do not
    /// parse as RFC3339, so invalid input never reaches the ledger.
    pub fn parse(payer: &str, points: i64, timestamp: &str) -> Result<Self> {
        if payer.is_empty() {
            return Err(LedgerError::EmptyPayer);
        }
        if points == 0 {
            return Err(LedgerError::ZeroPoints);
        }
        let timestamp = DateTime::parse_from_rfc3339(timestamp)
            .map_err(|source| LedgerError::InvalidTimestamp {
                value: timestamp.to_string(),
                source,
            })?
            .with_timezone(&Utc);
        Ok(Self {
            payer: payer.to_string(),
            points,
            timestamp,
        })
    }

    /// Spend-generated withdrawal. Callers guarantee `points` is negative.
    pub(crate) fn withdrawal(payer: String, points: i64, timestamp: DateTime<Utc>) -> Self {
        Self {
            payer,
            points,
            timestamp,
        }
    }

    pub fn is_grant(&self) -> bool {
        self.points > 0
    }
}

/// Net per-payer deduction reported by a successful spend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deduction {
    pub payer: String,
    pub points: i64,
}
