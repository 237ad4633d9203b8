use std::collections::HashMap;

use crate::transaction::Transaction;

/// Computes, per transaction index, how many of that grant's points can still
/// be spent without driving the payer's balance negative at any later point
/// in the history.
///
/// Single backward pass, newest to oldest. Withdrawals accumulate into a
/// per-payer deficit until fully offset by earlier grants: a grant that only
/// partially offsets the deficit contributes nothing, and the grant that
/// finishes the offset contributes only its surplus. Withdrawals always
/// report zero. Summed per payer, the result never exceeds the payer's
/// balance that survives FIFO consumption of its grants.
pub(crate) fn spendable_by_transaction(transactions: &[Transaction]) -> Vec<i64> {
    let mut spendable = vec![0i64; transactions.len()];
    let mut pending: HashMap<&str, i64> = HashMap::new();

    for (idx, tx) in transactions.iter().enumerate().rev() {
        let payer = tx.payer.as_str();
        match pending.get_mut(payer) {
            Some(deficit) => {
                *deficit += tx.points;
                let offset = *deficit;
                if tx.points > 0 && offset >= 0 {
                    spendable[idx] = offset;
                    pending.remove(payer);
                }
            }
            None if tx.points < 0 => {
                pending.insert(payer, tx.points);
            }
            None => {
                spendable[idx] = tx.points;
            }
        }
    }

    spendable
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(payer: &str, points: i64, timestamp: &str) -> Transaction {
        Transaction::parse(payer, points, timestamp).expect("valid transaction")
    }

    #[test]
    fn untouched_grants_are_fully_spendable() {
        let transactions = [
            tx("DANNON", 300, "2020-10-31T10:00:00Z"),
            tx("UNILEVER", 200, "2020-10-31T11:00:00Z"),
        ];
        assert_eq!(spendable_by_transaction(&transactions), [300, 200]);
    }

    #[test]
    fn withdrawal_consumes_oldest_grant_first() {
        let transactions = [
            tx("DANNON", 300, "2020-10-31T10:00:00Z"),
            tx("DANNON", -200, "2020-10-31T15:00:00Z"),
            tx("DANNON", 1000, "2020-11-02T14:00:00Z"),
        ];
        assert_eq!(spendable_by_transaction(&transactions), [100, 0, 1000]);
    }

    #[test]
    fn withdrawal_spans_multiple_grants() {
        let transactions = [
            tx("DANNON", 100, "2020-10-31T10:00:00Z"),
            tx("DANNON", 100, "2020-10-31T11:00:00Z"),
            tx("DANNON", -150, "2020-10-31T15:00:00Z"),
        ];
        // The newer grant is swallowed whole; the older keeps the surplus.
        assert_eq!(spendable_by_transaction(&transactions), [50, 0, 0]);
    }

    #[test]
    fn unmatched_withdrawal_leaves_nothing_spendable() {
        let transactions = [
            tx("DANNON", 100, "2020-10-31T10:00:00Z"),
            tx("DANNON", -500, "2020-10-31T15:00:00Z"),
        ];
        assert_eq!(spendable_by_transaction(&transactions), [0, 0]);
    }

    #[test]
    fn consecutive_withdrawals_accumulate() {
        let transactions = [
            tx("DANNON", 500, "2020-10-31T10:00:00Z"),
            tx("DANNON", -200, "2020-10-31T15:00:00Z"),
            tx("DANNON", -100, "2020-10-31T16:00:00Z"),
        ];
        assert_eq!(spendable_by_transaction(&transactions), [200, 0, 0]);
    }

    #[test]
    fn payers_are_tracked_independently() {
        let transactions = [
            tx("DANNON", 300, "2020-10-31T10:00:00Z"),
            tx("UNILEVER", 200, "2020-10-31T11:00:00Z"),
            tx("DANNON", -200, "2020-10-31T15:00:00Z"),
            tx("MILLER COORS", 10000, "2020-11-01T14:00:00Z"),
            tx("DANNON", 1000, "2020-11-02T14:00:00Z"),
        ];
        assert_eq!(
            spendable_by_transaction(&transactions),
            [100, 200, 0, 10000, 1000]
        );
    }

    #[test]
    fn empty_history_yields_empty_vector() {
        assert!(spendable_by_transaction(&[]).is_empty());
    }
}
