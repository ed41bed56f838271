//! Age derived from date of birth.

use chrono::{Datelike, Local, NaiveDate};

/// Whole years between `dob` and `today`, comparing day-of-year ordinals.
///
/// Not leap-year exact: after February in a leap year the ordinal is shifted by
/// one, so e.g. a 2000-03-01 birthday (day 61) is not yet reached on
/// 2001-03-01 (day 60).
pub fn compute_age(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if today.ordinal() < dob.ordinal() {
        age -= 1;
    }
    age
}

/// Source of the current calendar date for age calculation.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
