use crate::data::{Catalog, ShowType};
use std::cmp::Reverse;

/// The `n` longest movies by `duration_num`. Movies without a duration are
/// skipped; equal durations keep source order.
pub fn longest_movies(db: &Catalog, n: usize) -> Catalog {
    let mut rows: Vec<(usize, u32)> = db
        .show_type
        .iter()
        .zip(db.duration_num.iter())
        .enumerate()
        .filter_map(|(i, (show_type, minutes))| {
            (*show_type == Some(ShowType::Movie))
                .then_some(*minutes)
                .flatten()
                .map(|minutes| (i, minutes))
        })
        .collect();
    rows.sort_by_key(|&(_, minutes)| Reverse(minutes));

    let rows: Vec<usize> = rows.into_iter().take(n).map(|(i, _)| i).collect();
    db.take(&rows)
}
