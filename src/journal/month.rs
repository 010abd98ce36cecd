use std::fmt;

use chrono::NaiveDate;

use super::InputError;

/// A calendar month, normalized from either of the two spellings the tool
/// has to deal with: schedule column labels (`May-24`) and the runtime
/// target month (`2024-05`). Both resolve to the same key, which is what
/// makes matching them possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<MonthKey> {
        if (1..=12).contains(&month) {
            Some(MonthKey { year, month })
        } else {
            None
        }
    }

    /// Parses a schedule column label such as `May-24` or `jan-24`.
    /// Two-digit years mean 2000+YY. Anything that doesn't fit the
    /// `MMM-YY` shape is simply not a month column, so this returns
    /// `None` rather than an error.
    pub fn parse_label(label: &str) -> Option<MonthKey> {
        let (name, year) = label.trim().split_once('-')?;
        if name.len() != 3 || year.len() != 2 || !year.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let month = month_number(name)?;
        let year: i32 = year.parse().ok()?;
        MonthKey::new(2000 + year, month)
    }

    /// Parses the runtime target month, strictly `YYYY-MM`.
    pub fn parse_target(target: &str) -> Result<MonthKey, InputError> {
        let bad = || InputError::BadTargetMonth(target.to_string());

        let (year, month) = target.split_once('-').ok_or_else(bad)?;
        if year.len() != 4
            || month.len() != 2
            || !year.chars().all(|c| c.is_ascii_digit())
            || !month.chars().all(|c| c.is_ascii_digit())
        {
            return Err(bad());
        }

        let year: i32 = year.parse().map_err(|_| bad())?;
        let month: u32 = month.parse().map_err(|_| bad())?;
        MonthKey::new(year, month).ok_or_else(bad)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The last calendar day of this month, used as the posting date.
    pub fn last_day(&self) -> NaiveDate {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };

        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|first_of_next| first_of_next.pred_opt())
            .expect("month is validated on construction")
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

fn month_number(name: &str) -> Option<u32> {
    match name.to_ascii_lowercase().as_str() {
        "jan" => Some(1),
        "feb" => Some(2),
        "mar" => Some(3),
        "apr" => Some(4),
        "may" => Some(5),
        "jun" => Some(6),
        "jul" => Some(7),
        "aug" => Some(8),
        "sep" => Some(9),
        "oct" => Some(10),
        "nov" => Some(11),
        "dec" => Some(12),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_label() {
        assert_eq!(MonthKey::parse_label("May-24"), MonthKey::new(2024, 5));
        assert_eq!(MonthKey::parse_label("Jan-24"), MonthKey::new(2024, 1));
        assert_eq!(MonthKey::parse_label("Dec-99"), MonthKey::new(2099, 12));
    }

    #[test]
    fn test_parse_label_is_case_insensitive() {
        assert_eq!(MonthKey::parse_label("MAY-24"), MonthKey::new(2024, 5));
        assert_eq!(MonthKey::parse_label("jan-24"), MonthKey::new(2024, 1));
    }

    #[test]
    fn test_parse_label_rejects_non_month_columns() {
        assert_eq!(MonthKey::parse_label("Items"), None);
        assert_eq!(MonthKey::parse_label("Invoice amount"), None);
        assert_eq!(MonthKey::parse_label("May-2024"), None);
        assert_eq!(MonthKey::parse_label("Ma-24"), None);
        assert_eq!(MonthKey::parse_label("May24"), None);
        assert_eq!(MonthKey::parse_label("May--4"), None);
        assert_eq!(MonthKey::parse_label(""), None);
    }

    #[test]
    fn test_parse_target() {
        assert_eq!(MonthKey::parse_target("2024-05"), Ok(MonthKey { year: 2024, month: 5 }));
        assert_eq!(MonthKey::parse_target("2024-12"), Ok(MonthKey { year: 2024, month: 12 }));
    }

    #[test]
    fn test_parse_target_rejects_bad_input() {
        for target in ["2024-13", "2024-00", "24-05", "2024-5", "2024/05", "May-24", "garbage", ""] {
            assert_eq!(
                MonthKey::parse_target(target),
                Err(InputError::BadTargetMonth(target.to_string())),
                "'{target}' should not parse",
            );
        }
    }

    #[test]
    fn test_label_and_target_resolve_to_the_same_key() {
        assert_eq!(
            MonthKey::parse_label("May-24").unwrap(),
            MonthKey::parse_target("2024-05").unwrap(),
        );
    }

    #[test]
    fn test_last_day() {
        let last_day = |target: &str| MonthKey::parse_target(target).unwrap().last_day();

        assert_eq!(last_day("2024-05"), NaiveDate::from_ymd_opt(2024, 5, 31).unwrap());
        assert_eq!(last_day("2024-04"), NaiveDate::from_ymd_opt(2024, 4, 30).unwrap());
        assert_eq!(last_day("2024-02"), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(last_day("2023-02"), NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());
        assert_eq!(last_day("2024-12"), NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }
}
