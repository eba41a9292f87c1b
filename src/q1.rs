use crate::data::{Catalog, ShowType};
use ahash::HashMap;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    /// `None` groups the titles whose type is unknown.
    pub show_type: Option<ShowType>,
    pub total: usize,
}

/// Number of titles per show type, smallest group first.
pub fn count_by_type(db: &Catalog) -> Vec<TypeCount> {
    // show_id is unique after cleaning, so rows are distinct titles
    let totals: HashMap<Option<&ShowType>, usize> =
        db.show_type
            .iter()
            .fold(HashMap::default(), |mut acc, show_type| {
                *acc.entry(show_type.as_ref()).or_default() += 1;
                acc
            });

    let mut res: Vec<TypeCount> = totals
        .into_iter()
        .map(|(show_type, total)| TypeCount {
            show_type: show_type.cloned(),
            total,
        })
        .collect();
    res.sort_by(|a, b| {
        a.total
            .cmp(&b.total)
            .then_with(|| a.show_type.cmp(&b.show_type))
    });
    res
}

#[cfg(test)]
mod test_q1 {
    use super::*;
    use crate::data::{RawRecord, catalog};

    #[test]
    fn test_count_by_type() {
        let db = catalog([
            RawRecord::new("s1", "Movie"),
            RawRecord::new("s2", "TV Show"),
            RawRecord::new("s3", "Movie"),
            RawRecord::new("s3", "TV Show"),
        ]);
        let res = count_by_type(&db);
        assert_eq!(
            res,
            vec![
                TypeCount {
                    show_type: Some(ShowType::TvShow),
                    total: 1
                },
                TypeCount {
                    show_type: Some(ShowType::Movie),
                    total: 2
                },
            ]
        );
        let sum: usize = res.iter().map(|row| row.total).sum();
        assert_eq!(sum, db.len());
    }

    #[test]
    fn unknown_type_is_its_own_group() {
        let db = catalog([
            RawRecord::new("s1", "Movie"),
            RawRecord::new("s2", ""),
            RawRecord::new("s3", "Movie"),
            RawRecord::new("s4", " "),
            RawRecord::new("s5", "TV Show"),
        ]);
        let res = count_by_type(&db);
        let res: Vec<(Option<&str>, usize)> = res
            .iter()
            .map(|r| (r.show_type.as_ref().map(ShowType::as_str), r.total))
            .collect();
        assert_eq!(
            res,
            vec![(Some("TV Show"), 1), (None, 2), (Some("Movie"), 2)]
        );
    }

    #[test]
    fn empty_catalog_has_no_groups() {
        assert!(count_by_type(&Catalog::default()).is_empty());
    }
}
