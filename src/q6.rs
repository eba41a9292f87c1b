use crate::data::Catalog;
use chrono::{Local, Months, NaiveDate};

/// Titles added on or after `today` minus `years` calendar years. Titles
/// with an unknown `date_added` are excluded.
pub fn added_since(db: &Catalog, today: NaiveDate, years: u32) -> Catalog {
    let cutoff = today
        .checked_sub_months(Months::new(years.saturating_mul(12)))
        .unwrap_or(NaiveDate::MIN);

    let rows: Vec<usize> = db
        .date_added
        .iter()
        .enumerate()
        .filter_map(|(i, date_added)| date_added.is_some_and(|d| d >= cutoff).then_some(i))
        .collect();
    db.take(&rows)
}

/// [`added_since`] relative to the local date.
pub fn recently_added(db: &Catalog, years: u32) -> Catalog {
    added_since(db, Local::now().date_naive(), years)
}

#[cfg(test)]
mod test_q6 {
    use super::*;
    use crate::data::{Field, RawRecord, catalog};

    fn added(id: &str, date: &str) -> RawRecord {
        RawRecord::new(id, "Movie").set(Field::DateAdded, date)
    }

    #[test]
    fn test_added_since() {
        let db = catalog([
            added("s1", "October 19, 2021"),
            added("s2", "October 18, 2021"),
            added("s3", "2026-01-01"),
            added("s4", "someday"),
            RawRecord::new("s5", "Movie"),
        ]);
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(added_since(&db, today, 5).show_id, vec!["s1", "s3"]);
    }

    #[test]
    fn leap_day_cutoff_clamps() {
        let db = catalog([added("s1", "2021-02-28"), added("s2", "2021-02-27")]);
        let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(added_since(&db, today, 3).show_id, vec!["s1"]);
    }
}
