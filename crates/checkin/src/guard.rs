use crate::state::StateRecord;
use chrono::{Local, NaiveDate};

/// Date format used for entries in [`StateRecord::commits`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's calendar date in the process time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Whether a run for `today` should go ahead.
///
/// False iff `today` is already recorded. This is advisory only: two runs that
/// overlap can both see `true`.
pub fn should_run(record: &StateRecord, today: NaiveDate) -> bool {
    let today = format_date(today);
    !record.commits.iter().any(|d| *d == today)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_runs_on_empty_record() {
        assert!(should_run(&StateRecord::default(), date("2024-01-01")));
    }

    #[test]
    fn test_skips_when_today_recorded() {
        let mut record = StateRecord::default();
        record.record("2024-01-01", "a");
        record.record("2024-01-02", "b");
        assert!(!should_run(&record, date("2024-01-01")));
        assert!(!should_run(&record, date("2024-01-02")));
        assert!(should_run(&record, date("2024-01-03")));
    }

    #[test]
    fn test_format_is_zero_padded() {
        assert_eq!(format_date(date("2024-03-07")), "2024-03-07");
    }
}
