use crate::data::Catalog;
use crate::explode::{Tally, primary};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryCount {
    pub country: String,
    pub total_content: usize,
}

/// Titles per primary country (first listed), top `n` by count.
pub fn top_countries(db: &Catalog, n: usize) -> Vec<CountryCount> {
    let mut tally = Tally::default();
    db.country
        .iter()
        .filter_map(|country| country.as_deref().and_then(primary))
        .for_each(|country| tally.add(country));

    tally
        .ranked()
        .into_iter()
        .take(n)
        .map(|(country, total_content)| CountryCount {
            country: country.to_string(),
            total_content,
        })
        .collect()
}
