use chrono::NaiveDate;
use getset::{CopyGetters, Getters};
use rust_decimal::Decimal;

use super::schedule::{Reference, Schedule};
use super::{DataError, MonthKey};

/// Journal amounts are monetary and always carry 2 decimal places.
const AMOUNT_SCALE: u32 = 2;

/// Account code for the expense leg of an amortization pair.
pub const EXPENSE_CODE: &str = "EXP001";
/// Account code for the prepayment asset leg.
pub const PREPAYMENT_CODE: &str = "PRE001";

/// The two accounts an amortization entry can post to.
///
/// Every item currently uses the same fixed pair. Per-category account
/// codes would extend this with a lookup from item category to a pair of
/// `Account` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Account {
    Expense,
    Prepayment,
}

impl Account {
    pub fn code(&self) -> &'static str {
        match self {
            Account::Expense => EXPENSE_CODE,
            Account::Prepayment => PREPAYMENT_CODE,
        }
    }
}

/// A single debit or credit record, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct JournalEntry {
    #[getset(get_copy = "pub")]
    date: NaiveDate,
    #[getset(get = "pub")]
    description: String,
    #[getset(get_copy = "pub")]
    reference: Reference,
    #[getset(get_copy = "pub")]
    account: Account,
    #[getset(get_copy = "pub")]
    amount: Decimal,
}

/// Generates one balanced debit/credit pair per schedule row for the
/// target month, in schedule order, dated on the last day of that month.
///
/// Rows with nothing to amortize in the target month still get a
/// zero-amount pair, so the output keeps a 1:1 audit trail with the
/// scheduled items. A month the schedule has no column for at all is an
/// error instead.
pub fn generate(schedule: &Schedule, target_month: MonthKey) -> Result<Vec<JournalEntry>, DataError> {
    if !schedule.covers(target_month) {
        return Err(DataError::MonthNotCovered(target_month));
    }

    let date = target_month.last_day();
    let mut entries = Vec::with_capacity(schedule.rows().len() * 2);

    for row in schedule.rows() {
        // Some schedules carry amortization as negative amounts; the
        // debit leg is always the positive one.
        let mut magnitude = row.amount_for(target_month).round_dp(AMOUNT_SCALE).abs();
        magnitude.rescale(AMOUNT_SCALE);

        // Negating a zero Decimal keeps the sign flag and would render
        // as "-0.00".
        let credit_amount = if magnitude.is_zero() { magnitude } else { -magnitude };

        let description = format!("Prepayment amortisation for {}", row.item_name());

        entries.push(JournalEntry {
            date,
            description: description.clone(),
            reference: row.reference(),
            account: Account::Expense,
            amount: magnitude,
        });
        entries.push(JournalEntry {
            date,
            description,
            reference: row.reference(),
            account: Account::Prepayment,
            amount: credit_amount,
        });
    }

    Ok(entries)
}
