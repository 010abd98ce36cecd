//! Turns a prepayment amortization schedule into balanced debit/credit
//! journal entries for a single target month.

pub mod data;
pub mod journal;
