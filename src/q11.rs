use crate::data::{Catalog, cell_contains};
use memchr::memmem::Finder;

/// Titles whose genre list mentions `genre`, e.g. "Documentaries".
pub fn in_genre(db: &Catalog, genre: &str) -> Catalog {
    let finder = Finder::new(genre);
    let rows: Vec<usize> = db
        .listed_in
        .iter()
        .enumerate()
        .filter_map(|(i, genres)| cell_contains(genres, &finder).then_some(i))
        .collect();
    db.take(&rows)
}

#[cfg(test)]
mod test_q11 {
    use super::*;
    use crate::data::{Field, RawRecord, catalog};

    #[test]
    fn test_in_genre() {
        let db = catalog([
            RawRecord::new("s1", "Movie").set(Field::ListedIn, "Documentaries"),
            RawRecord::new("s2", "TV Show").set(Field::ListedIn, "Docuseries, Reality TV"),
            RawRecord::new("s3", "Movie"),
            RawRecord::new("s4", "Movie").set(Field::ListedIn, "International Movies, Documentaries"),
        ]);
        assert_eq!(in_genre(&db, "Documentaries").show_id, vec!["s1", "s4"]);
    }
}
