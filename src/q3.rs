use crate::data::{Catalog, ShowType};

/// Movies released in `year`.
pub fn movies_released_in(db: &Catalog, year: i32) -> Catalog {
    let rows: Vec<usize> = db
        .show_type
        .iter()
        .zip(db.release_year.iter())
        .enumerate()
        .filter_map(|(i, (show_type, release_year))| {
            (*show_type == Some(ShowType::Movie) && *release_year == Some(year)).then_some(i)
        })
        .collect();
    db.take(&rows)
}

#[cfg(test)]
mod test_q3 {
    use super::*;
    use crate::data::{Field, RawRecord, catalog};

    #[test]
    fn test_movies_released_in() {
        let db = catalog([
            RawRecord::new("s1", "Movie").set(Field::ReleaseYear, "2020"),
            RawRecord::new("s2", "TV Show").set(Field::ReleaseYear, "2020"),
            RawRecord::new("s3", "Movie").set(Field::ReleaseYear, "2019"),
            RawRecord::new("s4", "Movie"),
            RawRecord::new("s5", "Movie").set(Field::ReleaseYear, "2020"),
            RawRecord::new("s6", "").set(Field::ReleaseYear, "2020"),
        ]);
        assert_eq!(movies_released_in(&db, 2020).show_id, vec!["s1", "s5"]);
        assert!(movies_released_in(&db, 1999).is_empty());
    }
}
