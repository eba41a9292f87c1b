use crate::data::Catalog;
use crate::explode::explode_count;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreCount {
    pub genre: String,
    pub total_titles: usize,
}

/// Distinct titles per genre, most common first. A title listed under
/// several genres counts once for each of them.
pub fn genre_counts(db: &Catalog) -> Vec<GenreCount> {
    explode_count(db.listed_in.iter().map(|genres| genres.as_deref()), true)
        .into_iter()
        .map(|(genre, total_titles)| GenreCount {
            genre: genre.to_string(),
            total_titles,
        })
        .collect()
}
