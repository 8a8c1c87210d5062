//! Date parsing and whole-period arithmetic shared by the declaration and internship programs.

use chrono::{Datelike, NaiveDate};

use crate::validation::ValidationError;

/// Input/output pattern for declaration dates.
pub const DAY_FIRST: DatePattern = DatePattern {
    display: "dd/MM/yyyy",
    format: "%d/%m/%Y",
};

/// Input/output pattern for internship dates.
pub const ISO: DatePattern = DatePattern {
    display: "yyyy-MM-dd",
    format: "%Y-%m-%d",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatePattern {
    pub display: &'static str,
    pub format: &'static str,
}

impl DatePattern {
    pub fn parse(self, raw: &str) -> Result<NaiveDate, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::rejected("Input cannot be empty"));
        }
        NaiveDate::parse_from_str(trimmed, self.format).map_err(|_| ValidationError::DateFormat {
            pattern: self.display,
        })
    }

    pub fn render(self, date: NaiveDate) -> String {
        date.format(self.format).to_string()
    }
}

/// Calendar months from `start` to `end`, not counting a final partial month.
///
/// Negative when `end` precedes `start`.
pub fn whole_months_between(start: NaiveDate, end: NaiveDate) -> i32 {
    let mut months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    if months > 0 && end.day() < start.day() {
        months -= 1;
    } else if months < 0 && end.day() > start.day() {
        months += 1;
    }
    months
}

pub fn whole_weeks_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() / 7
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn months_drop_trailing_partial_month() {
        assert_eq!(whole_months_between(date(2025, 1, 15), date(2025, 3, 15)), 2);
        assert_eq!(whole_months_between(date(2025, 1, 15), date(2025, 3, 14)), 1);
        assert_eq!(whole_months_between(date(2024, 11, 30), date(2025, 2, 28)), 2);
        assert_eq!(whole_months_between(date(2025, 5, 1), date(2025, 5, 31)), 0);
    }

    #[test]
    fn weeks_are_floored() {
        assert_eq!(whole_weeks_between(date(2025, 1, 1), date(2025, 2, 11)), 5);
        assert_eq!(whole_weeks_between(date(2025, 1, 1), date(2025, 2, 12)), 6);
    }

    #[test]
    fn patterns_parse_and_render() {
        let parsed = DAY_FIRST.parse(" 05/03/2025 ").expect("valid date");
        assert_eq!(parsed, date(2025, 3, 5));
        assert_eq!(DAY_FIRST.render(parsed), "05/03/2025");
        assert_eq!(ISO.render(parsed), "2025-03-05");

        assert_eq!(
            ISO.parse("05/03/2025").unwrap_err().to_string(),
            "Invalid date format. Please use yyyy-MM-dd format."
        );
    }
}
