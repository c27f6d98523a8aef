use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::core::RegistryError;

const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Which side of the system clock a date is allowed to fall on.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DateCheck {
    /// The date must be on or after the system date (expiry dates, clock
    /// advancement).
    NotInPast,
    /// The date must be on or before the system date (historical filters).
    NotInFuture,
}

/// Calendar date. Ordering is chronological: (year, month, day).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Date {
    pub day: u32,
    pub month: u32,
    pub year: u32,
}

impl Date {
    pub const fn new(day: u32, month: u32, year: u32) -> Self {
        Self { day, month, year }
    }

    fn days_in_month(month: u32, year: u32) -> u32 {
        if month == 2 && is_leap_year(year) {
            29
        } else {
            DAYS_IN_MONTH[(month - 1) as usize]
        }
    }

    /// True when day and month are in range and the day exists in the
    /// month, accounting for leap-year February.
    pub fn is_well_formed(&self) -> bool {
        if self.day < 1 || self.day > 31 || self.month < 1 || self.month > 12 {
            return false;
        }
        self.day <= Self::days_in_month(self.month, self.year)
    }

    /// Pure predicate: well-formed and on the allowed side of `today`.
    pub fn validate(&self, today: Date, check: DateCheck) -> bool {
        if !self.is_well_formed() {
            return false;
        }
        match check {
            DateCheck::NotInPast => *self >= today,
            DateCheck::NotInFuture => *self <= today,
        }
    }

    fn key(&self) -> (u32, u32, u32) {
        (self.year, self.month, self.day)
    }
}

fn is_leap_year(year: u32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

impl Ord for Date {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for Date {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}-{}", self.day, self.month, self.year)
    }
}

impl FromStr for Date {
    type Err = RegistryError;

    /// Parses the `d-m-y` numeric form. Only the shape is checked here;
    /// range validation is a separate concern (`validate`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('-');
        let mut next = || {
            parts
                .next()
                .and_then(|p| p.parse::<u32>().ok())
                .ok_or(RegistryError::InvalidDate)
        };
        let (day, month, year) = (next()?, next()?, next()?);
        if parts.next().is_some() {
            return Err(RegistryError::InvalidDate);
        }
        Ok(Self { day, month, year })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_fields() {
        let today = Date::new(1, 1, 2025);
        assert!(!Date::new(0, 1, 2025).validate(today, DateCheck::NotInPast));
        assert!(!Date::new(32, 1, 2025).validate(today, DateCheck::NotInPast));
        assert!(!Date::new(1, 0, 2025).validate(today, DateCheck::NotInPast));
        assert!(!Date::new(1, 13, 2025).validate(today, DateCheck::NotInPast));
    }

    #[test]
    fn respects_days_in_month() {
        assert!(Date::new(31, 1, 2025).is_well_formed());
        assert!(!Date::new(31, 4, 2025).is_well_formed());
        assert!(!Date::new(29, 2, 2025).is_well_formed());
        assert!(Date::new(28, 2, 2025).is_well_formed());
    }

    #[test]
    fn leap_year_february() {
        assert!(Date::new(29, 2, 2024).is_well_formed());
        assert!(!Date::new(29, 2, 2100).is_well_formed());
        assert!(Date::new(29, 2, 2000).is_well_formed());
    }

    #[test]
    fn not_in_past_mode() {
        let today = Date::new(15, 6, 2025);
        assert!(today.validate(today, DateCheck::NotInPast));
        assert!(Date::new(16, 6, 2025).validate(today, DateCheck::NotInPast));
        assert!(Date::new(1, 7, 2025).validate(today, DateCheck::NotInPast));
        assert!(!Date::new(14, 6, 2025).validate(today, DateCheck::NotInPast));
        assert!(!Date::new(15, 5, 2025).validate(today, DateCheck::NotInPast));
        assert!(!Date::new(15, 6, 2024).validate(today, DateCheck::NotInPast));
    }

    #[test]
    fn not_in_future_mode() {
        let today = Date::new(15, 6, 2025);
        assert!(today.validate(today, DateCheck::NotInFuture));
        assert!(Date::new(14, 6, 2025).validate(today, DateCheck::NotInFuture));
        assert!(!Date::new(16, 6, 2025).validate(today, DateCheck::NotInFuture));
        assert!(!Date::new(15, 7, 2025).validate(today, DateCheck::NotInFuture));
    }

    #[test]
    fn chronological_ordering() {
        assert!(Date::new(1, 1, 2026) > Date::new(31, 12, 2025));
        assert!(Date::new(1, 2, 2025) > Date::new(28, 1, 2025));
        assert!(Date::new(2, 1, 2025) > Date::new(1, 1, 2025));
        assert_eq!(Date::new(5, 5, 2025), Date::new(5, 5, 2025));
    }

    #[test]
    fn display_and_parse() {
        let date: Date = "9-10-2025".parse().unwrap();
        assert_eq!(date, Date::new(9, 10, 2025));
        assert_eq!(date.to_string(), "09-10-2025");
        assert!("10-2025".parse::<Date>().is_err());
        assert!("a-b-c".parse::<Date>().is_err());
        assert!("1-2-3-4".parse::<Date>().is_err());
    }
}
