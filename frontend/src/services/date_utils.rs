use chrono::NaiveDate;
use js_sys::Date;

/// Local calendar date of the visitor's browser
pub fn today() -> NaiveDate {
    let now = Date::new_0();
    date_from_parts(now.get_full_year(), now.get_month() + 1, now.get_date())
}

fn date_from_parts(year: u32, month: u32, day: u32) -> NaiveDate {
    i32::try_from(year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, month, day))
        .unwrap_or_default()
}

/// Milliseconds until the visitor's next local midnight, when the grid dates roll over
pub fn millis_until_midnight() -> u32 {
    let now = Date::new_0();
    let elapsed = f64::from(now.get_hours()) * 3_600_000.0
        + f64::from(now.get_minutes()) * 60_000.0
        + f64::from(now.get_seconds()) * 1_000.0
        + f64::from(now.get_milliseconds());
    (86_400_000.0 - elapsed).max(1_000.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_from_parts() {
        assert_eq!(date_from_parts(2025, 10, 18), NaiveDate::from_ymd_opt(2025, 10, 18).unwrap());
        assert_eq!(date_from_parts(2025, 2, 30), NaiveDate::default());
    }
}
