use chrono::{Datelike, NaiveDate};

/// Whole years between `birth` and `today`.
///
/// The year difference drops by one until the birthday has come around this
/// year. Dates before `birth` yield zero.
#[must_use]
pub fn calculate_age(birth: NaiveDate, today: NaiveDate) -> u32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    u32::try_from(age).unwrap_or(0)
}
