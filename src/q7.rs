use crate::data::{Catalog, cell_contains};
use memchr::memmem::Finder;

/// Titles whose director field contains `name` (case-sensitive).
pub fn by_director(db: &Catalog, name: &str) -> Catalog {
    let finder = Finder::new(name);
    let rows: Vec<usize> = db
        .director
        .iter()
        .enumerate()
        .filter_map(|(i, director)| cell_contains(director, &finder).then_some(i))
        .collect();
    db.take(&rows)
}

#[cfg(test)]
mod test_q7 {
    use super::*;
    use crate::data::{Field, RawRecord, catalog};

    #[test]
    fn test_by_director() {
        let db = catalog([
            RawRecord::new("s1", "Movie").set(Field::Director, "Steven Spielberg"),
            RawRecord::new("s2", "Movie"),
            RawRecord::new("s3", "Movie").set(Field::Director, "steven spielberg"),
            RawRecord::new("s4", "Movie").set(Field::Director, "George Lucas, Steven Spielberg"),
        ]);
        assert_eq!(by_director(&db, "Steven Spielberg").show_id, vec!["s1", "s4"]);
        assert!(by_director(&db, "Kubrick").is_empty());
    }
}
