use crate::data::{Catalog, cell_contains};
use chrono::{Datelike, Local};
use memchr::memmem::Finder;

/// Titles featuring `actor` released in the last `window` years, i.e. with
/// `release_year > current_year - window`.
pub fn actor_in_recent(db: &Catalog, actor: &str, current_year: i32, window: i32) -> Catalog {
    let finder = Finder::new(actor);
    let since = current_year.saturating_sub(window);
    let rows: Vec<usize> = db
        .casts
        .iter()
        .zip(db.release_year.iter())
        .enumerate()
        .filter_map(|(i, (casts, year))| {
            (cell_contains(casts, &finder) && year.is_some_and(|y| y > since)).then_some(i)
        })
        .collect();
    db.take(&rows)
}

/// [`actor_in_recent`] relative to the local year.
pub fn actor_in_last_years(db: &Catalog, actor: &str, window: i32) -> Catalog {
    actor_in_recent(db, actor, Local::now().year(), window)
}
