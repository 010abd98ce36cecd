use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use getset::{CopyGetters, Getters};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::MonthKey;

/// An invoice reference from the schedule. References are whole numbers
/// when present; a blank or non-numeric source cell means there is no
/// usable reference and the entry is marked `N/A` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    Number(u64),
    Absent,
}

impl Reference {
    /// Coerces a raw schedule cell. Whole numbers are kept, including
    /// ones with decimal noise like `1001.0`; everything else degrades
    /// to `Absent` rather than failing the load.
    pub fn parse(cell: &str) -> Reference {
        let Ok(value) = Decimal::from_str(cell.trim()) else {
            return Reference::Absent;
        };

        if value.is_sign_negative() || !value.is_integer() {
            return Reference::Absent;
        }

        match value.to_u64() {
            Some(number) => Reference::Number(number),
            None => Reference::Absent,
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::Number(number) => write!(f, "{number}"),
            Reference::Absent => write!(f, "N/A"),
        }
    }
}

/// One prepayment item with its pre-calculated monthly amortization
/// amounts.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct ScheduleRow {
    #[getset(get = "pub")]
    item_name: String,
    #[getset(get_copy = "pub")]
    reference: Reference,
    monthly_amounts: HashMap<MonthKey, Decimal>,
}

impl ScheduleRow {
    pub fn new(
        item_name: String,
        reference: Reference,
        monthly_amounts: HashMap<MonthKey, Decimal>,
    ) -> ScheduleRow {
        ScheduleRow {
            item_name,
            reference,
            monthly_amounts,
        }
    }

    /// The amortization amount for a month. A missing cell means 0.
    pub fn amount_for(&self, month: MonthKey) -> Decimal {
        self.monthly_amounts.get(&month).copied().unwrap_or(Decimal::ZERO)
    }
}

/// A cleaned prepayment schedule: the retained item rows plus the months
/// the source file covers, in column order.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct Schedule {
    #[getset(get = "pub")]
    rows: Vec<ScheduleRow>,
    #[getset(get = "pub")]
    months: Vec<MonthKey>,
}

impl Schedule {
    pub fn new(rows: Vec<ScheduleRow>, months: Vec<MonthKey>) -> Schedule {
        Schedule { rows, months }
    }

    /// Whether the source file has a column for the given month. A covered
    /// month whose amounts are all zero is still covered.
    pub fn covers(&self, month: MonthKey) -> bool {
        self.months.contains(&month)
    }
}
