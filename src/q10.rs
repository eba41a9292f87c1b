use crate::data::{Catalog, cell_contains};
use crate::explode::Tally;
use memchr::memmem::Finder;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearShare {
    pub release_year: i32,
    pub total_release: usize,
    pub release_percentage: f64,
}

/// Share of each release year among titles whose country field contains
/// `country`, as a percentage rounded to two decimals. Titles without a
/// release year are left out of the total. Largest share first; equal
/// shares put the later year first. Empty when nothing matches.
pub fn release_year_shares(db: &Catalog, country: &str) -> Vec<YearShare> {
    let finder = Finder::new(country);
    let mut tally = Tally::default();
    db.country
        .iter()
        .zip(db.release_year.iter())
        .filter_map(|(c, year)| cell_contains(c, &finder).then_some(*year).flatten())
        .for_each(|year| tally.add(year));
    if tally.is_empty() {
        return Vec::new();
    }

    let total = tally.total() as f64;
    let mut res: Vec<YearShare> = tally
        .ranked()
        .into_iter()
        .map(|(release_year, total_release)| YearShare {
            release_year,
            total_release,
            release_percentage: (total_release as f64 / total * 10_000.0).round() / 100.0,
        })
        .collect();
    res.sort_by(|a, b| {
        b.total_release
            .cmp(&a.total_release)
            .then_with(|| b.release_year.cmp(&a.release_year))
    });
    res
}

/// The `n` largest entries of [`release_year_shares`].
pub fn top_release_years(db: &Catalog, country: &str, n: usize) -> Vec<YearShare> {
    let mut res = release_year_shares(db, country);
    res.truncate(n);
    res
}
