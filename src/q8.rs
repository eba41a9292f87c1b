use crate::data::{Catalog, ShowType};

/// TV shows with more than `min_seasons` seasons.
pub fn long_running_shows(db: &Catalog, min_seasons: u32) -> Catalog {
    let rows: Vec<usize> = db
        .show_type
        .iter()
        .zip(db.duration_num.iter())
        .enumerate()
        .filter_map(|(i, (show_type, seasons))| {
            (*show_type == Some(ShowType::TvShow) && seasons.is_some_and(|s| s > min_seasons))
                .then_some(i)
        })
        .collect();
    db.take(&rows)
}
