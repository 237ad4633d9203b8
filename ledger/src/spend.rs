use chrono::Utc;

use crate::{
    availability::spendable_by_transaction,
    error::{LedgerError, Result},
    ledger::Ledger,
    transaction::{Deduction, Transaction},
};

/// Spends `amount` points against the ledger, oldest grants first.
///
/// On success one synthetic withdrawal per contributing payer is appended,
/// timestamped now, and the ledger is reordered; the returned deductions sum
/// to exactly `-amount`. On shortfall the ledger is left untouched.
pub(crate) fn spend(ledger: &mut Ledger, amount: i64) -> Result<Vec<Deduction>> {
    if amount < 0 {
        return Err(LedgerError::NegativeSpend { amount });
    }
    let deductions = allocate(ledger.transactions(), amount)?;
    let now = Utc::now();
    for deduction in &deductions {
        ledger.append(Transaction::withdrawal(
            deduction.payer.clone(),
            deduction.points,
            now,
        ));
    }
    ledger.reorder();
    Ok(deductions)
}

/// Forward oldest-to-newest scan consuming spendable points until `amount`
/// is satisfied.
///
/// Repeat contributions from one payer fold into a single deduction, and
/// deductions are emitted in first-consumption order.
fn allocate(transactions: &[Transaction], amount: i64) -> Result<Vec<Deduction>> {
    let spendable = spendable_by_transaction(transactions);
    let mut deductions: Vec<Deduction> = Vec::new();
    let mut remaining = amount;

    for (tx, available) in transactions.iter().zip(&spendable) {
        if remaining == 0 {
            break;
        }
        if !tx.is_grant() || *available <= 0 {
            continue;
        }
        let take = (*available).min(remaining);
        match deductions.iter_mut().find(|d| d.payer == tx.payer) {
            Some(existing) => existing.points -= take,
            None => deductions.push(Deduction {
                payer: tx.payer.clone(),
                points: -take,
            }),
        }
        remaining -= take;
    }

    if remaining > 0 {
        return Err(LedgerError::InsufficientPoints {
            requested: amount,
            available: amount - remaining,
        });
    }
    Ok(deductions)
}
