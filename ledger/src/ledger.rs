use std::collections::HashMap;

use crate::transaction::Transaction;

/// Append-only, chronologically ordered transaction history plus the derived
/// per-payer balance projection.
///
/// The projection is a cache over the sequence: `balances()[payer]` equals the
/// sum of that payer's transaction points at all times, and could be rebuilt
/// by folding the sequence. Transactions are never mutated or deleted.
#[derive(Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    balances: HashMap<String, i64>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a transaction and folds it into the balance projection.
    ///
    /// Ordering is restored separately via [`Ledger::reorder`] so the spend
    /// path can append a batch of withdrawals and sort once. A payer's
    /// balance may go negative here; availability is enforced only on the
    /// spend path.
    pub fn append(&mut self, transaction: Transaction) {
        *self
            .balances
            .entry(transaction.payer.clone())
            .or_insert(0) += transaction.points;
        self.transactions.push(transaction);
    }

    /// Restores ascending-timestamp order.
    ///
    /// Stable: transactions with equal timestamps keep their insertion order,
    /// so the older of two same-instant transactions is the one appended
    /// first. Idempotent and safe to call on an already sorted ledger.
    pub fn reorder(&mut self) {
        self.transactions.sort_by_key(|tx| tx.timestamp);
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn balances(&self) -> &HashMap<String, i64> {
        &self.balances
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(payer: &str, points: i64, timestamp: &str) -> Transaction {
        Transaction::parse(payer, points, timestamp).expect("valid transaction")
    }

    #[test]
    fn projection_tracks_every_append() {
        let mut ledger = Ledger::new();
        ledger.append(tx("DANNON", 300, "2020-10-31T10:00:00Z"));
        ledger.append(tx("UNILEVER", 200, "2020-10-31T11:00:00Z"));
        ledger.append(tx("DANNON", -200, "2020-10-31T15:00:00Z"));

        assert_eq!(ledger.balances()["DANNON"], 100);
        assert_eq!(ledger.balances()["UNILEVER"], 200);
        assert_eq!(ledger.len(), 3);

        let folded: i64 = ledger
            .transactions()
            .iter()
            .filter(|tx| tx.payer == "DANNON")
            .map(|tx| tx.points)
            .sum();
        assert_eq!(folded, ledger.balances()["DANNON"]);
    }

    #[test]
    fn reorder_sorts_by_timestamp() {
        let mut ledger = Ledger::new();
        ledger.append(tx("DANNON", 1000, "2020-11-02T14:00:00Z"));
        ledger.append(tx("UNILEVER", 200, "2020-10-31T11:00:00Z"));
        ledger.append(tx("DANNON", 300, "2020-10-31T10:00:00Z"));
        ledger.reorder();

        let payers: Vec<&str> = ledger
            .transactions()
            .iter()
            .map(|tx| tx.payer.as_str())
            .collect();
        assert_eq!(payers, ["DANNON", "UNILEVER", "DANNON"]);
        assert_eq!(ledger.transactions()[0].points, 300);
    }

    #[test]
    fn reorder_is_idempotent() {
        let mut ledger = Ledger::new();
        ledger.append(tx("B", 10, "2020-11-02T14:00:00Z"));
        ledger.append(tx("A", 20, "2020-10-31T10:00:00Z"));
        ledger.reorder();
        let once: Vec<Transaction> = ledger.transactions().to_vec();
        ledger.reorder();
        assert_eq!(ledger.transactions(), once.as_slice());
    }

    #[test]
    fn equal_timestamps_keep_insertion_order() {
        let mut ledger = Ledger::new();
        ledger.append(tx("FIRST", 10, "2020-11-02T14:00:00Z"));
        ledger.append(tx("SECOND", 20, "2020-11-02T14:00:00Z"));
        ledger.reorder();
        ledger.reorder();

        assert_eq!(ledger.transactions()[0].payer, "FIRST");
        assert_eq!(ledger.transactions()[1].payer, "SECOND");
    }

    #[test]
    fn negative_grant_may_drive_balance_negative() {
        let mut ledger = Ledger::new();
        ledger.append(tx("DANNON", -500, "2020-10-31T10:00:00Z"));
        assert_eq!(ledger.balances()["DANNON"], -500);
    }
}
