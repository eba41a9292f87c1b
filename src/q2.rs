use crate::data::{Catalog, ShowType};
use crate::explode::Tally;
use ahash::HashMap;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingCount {
    pub show_type: ShowType,
    pub rating: String,
    pub rating_count: usize,
}

/// The most frequent rating of each show type. Every rating tied for the
/// top count is returned (dense rank 1). Rows without a rating or a type are
/// ignored.
pub fn top_rating_per_type(db: &Catalog) -> Vec<RatingCount> {
    let mut by_type: HashMap<&ShowType, Tally<&str>> = HashMap::default();
    for (show_type, rating) in db.show_type.iter().zip(db.rating.iter()) {
        if let (Some(show_type), Some(rating)) = (show_type, rating) {
            by_type.entry(show_type).or_default().add(rating);
        }
    }

    let mut types: Vec<(&ShowType, Tally<&str>)> = by_type.into_iter().collect();
    types.sort_by(|a, b| a.0.cmp(b.0));

    let mut res = Vec::new();
    for (show_type, tally) in types {
        let ranked = tally.ranked();
        let Some(&(_, top)) = ranked.first() else {
            continue;
        };
        res.extend(
            ranked
                .into_iter()
                .take_while(|&(_, count)| count == top)
                .map(|(rating, rating_count)| RatingCount {
                    show_type: show_type.clone(),
                    rating: rating.to_string(),
                    rating_count,
                }),
        );
    }
    res
}
