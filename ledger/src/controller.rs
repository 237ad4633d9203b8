use std::collections::HashMap;

use parking_lot::Mutex;

use crate::{
    error::Result,
    ledger::Ledger,
    spend,
    transaction::{Deduction, Transaction},
};

/// Service facade owning the ledger behind a single lock.
///
/// Every operation takes the lock once and completes synchronously, so a
/// spend's availability scan, allocation, and append-back can never
/// interleave with another request's mutation of the same ledger.
pub struct LedgerController {
    ledger: Mutex<Ledger>,
}

impl LedgerController {
    pub fn new() -> Self {
        Self {
            ledger: Mutex::new(Ledger::new()),
        }
    }

    /// Validates and records a signed point grant for `payer`.
    ///
    /// Negative direct grants are accepted even when they drive the payer's
    /// balance negative; only the spend path enforces availability.
    pub fn grant(&self, payer: &str, points: i64, timestamp: &str) -> Result<()> {
        let transaction = Transaction::parse(payer, points, timestamp)?;
        let mut ledger = self.ledger.lock();
        ledger.append(transaction);
        ledger.reorder();
        Ok(())
    }

    /// Spends `amount` points, oldest grants first, returning one net
    /// deduction per contributing payer. Fails without mutating the ledger
    /// when the spendable total falls short.
    pub fn spend(&self, amount: i64) -> Result<Vec<Deduction>> {
        let mut ledger = self.ledger.lock();
        spend::spend(&mut ledger, amount)
    }

    /// Snapshot of every payer's current balance.
    pub fn balances(&self) -> HashMap<String, i64> {
        self.ledger.lock().balances().clone()
    }
}

impl Default for LedgerController {
    fn default() -> Self {
        Self::new()
    }
}
