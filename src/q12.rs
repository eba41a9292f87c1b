use crate::data::Catalog;

/// Titles with no director.
pub fn missing_director(db: &Catalog) -> Catalog {
    let rows: Vec<usize> = db
        .director
        .iter()
        .enumerate()
        .filter_map(|(i, director)| director.as_deref().is_none_or(str::is_empty).then_some(i))
        .collect();
    db.take(&rows)
}

#[cfg(test)]
mod test_q12 {
    use super::*;
    use crate::data::{Field, RawRecord, catalog};

    #[test]
    fn test_missing_director() {
        let db = catalog([
            RawRecord::new("s1", "Movie").set(Field::Director, "Ava DuVernay"),
            RawRecord::new("s2", "Movie"),
            RawRecord::new("s3", "TV Show").set(Field::Director, ""),
        ]);
        assert_eq!(missing_director(&db).show_id, vec!["s2", "s3"]);
    }

    #[test]
    fn empty_string_counts_as_missing() {
        let mut db = catalog([RawRecord::new("s1", "Movie").set(Field::Director, "X")]);
        db.director[0] = Some(String::new());
        assert_eq!(missing_director(&db).len(), 1);
    }
}
